use crate::domain::ports::ValidLog;
use crate::domain::voucher::ValidEntry;
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A thread-safe in-memory log of discovered codes.
///
/// Clones share the same entries, so a test can hand one clone to the checker
/// and inspect the other afterwards.
#[derive(Default, Clone)]
pub struct InMemoryValidLog {
    entries: Arc<RwLock<Vec<ValidEntry>>>,
}

impl InMemoryValidLog {
    /// Creates a new, empty in-memory log.
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn entries(&self) -> Vec<ValidEntry> {
        self.entries.read().await.clone()
    }

    /// Log lines exactly as the file-backed log would write them.
    pub async fn lines(&self) -> Vec<String> {
        self.entries
            .read()
            .await
            .iter()
            .map(ToString::to_string)
            .collect()
    }
}

#[async_trait]
impl ValidLog for InMemoryValidLog {
    async fn append(&self, entry: &ValidEntry) -> Result<()> {
        let mut entries = self.entries.write().await;
        entries.push(entry.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[tokio::test]
    async fn test_in_memory_log_keeps_order_and_duplicates() {
        let log = InMemoryValidLog::new();
        let shared = log.clone();
        let at = NaiveDate::from_ymd_opt(2024, 12, 31)
            .unwrap()
            .and_hms_opt(23, 59, 59)
            .unwrap();

        for code in ["B", "A", "B"] {
            log.append(&ValidEntry {
                found_at: at,
                code: code.to_string(),
                discount: "NA".to_string(),
            })
            .await
            .unwrap();
        }

        let codes: Vec<String> = shared.entries().await.into_iter().map(|e| e.code).collect();
        assert_eq!(codes, vec!["B", "A", "B"]);
        assert_eq!(shared.lines().await[0], "[2024-12-31 23:59:59] B | NA");
    }
}
