use crate::domain::ports::ValidLog;
use crate::domain::voucher::ValidEntry;
use crate::error::Result;
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;

/// Appends discovered codes to a text file, one line per entry.
///
/// The file is opened in append mode for every entry and flushed before
/// returning, so an interrupted run never loses a line already reported.
#[derive(Debug, Clone)]
pub struct FileValidLog {
    path: PathBuf,
}

impl FileValidLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ValidLog for FileValidLog {
    async fn append(&self, entry: &ValidEntry) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(format!("{entry}\n").as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }
}
