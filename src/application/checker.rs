use crate::config::RetryPolicy;
use crate::domain::ports::{ValidLogBox, VoucherApiBox};
use crate::domain::voucher::{CheckOutcome, CheckResult, ValidEntry, classify};
use crate::error::{Result, TransportError};
use tracing::{error, info, warn};

/// Checks one code at a time against the voucher endpoint.
///
/// Transport failures are retried after a jittered backoff up to the policy's
/// attempt ceiling. A received response is classified once and never retried.
pub struct VoucherChecker {
    api: VoucherApiBox,
    log: ValidLogBox,
    retry: RetryPolicy,
}

impl VoucherChecker {
    pub fn new(api: VoucherApiBox, log: ValidLogBox, retry: RetryPolicy) -> Self {
        Self { api, log, retry }
    }

    /// Checks `code` and persists it if it turns out to be valid.
    ///
    /// Only a failure to write the valid log is returned as an error.
    pub async fn check(&self, code: &str) -> Result<CheckOutcome> {
        let mut last_failure = None;

        for attempt in 1..=self.retry.max_attempts {
            match self.api.apply(code).await {
                Ok(response) => {
                    info!("Status: {}", response.status);
                    let outcome = classify(code, &response);
                    self.report(&outcome).await?;
                    return Ok(outcome);
                }
                Err(e) => {
                    match &e {
                        TransportError::Timeout(_) => {
                            warn!("Timeout (try {attempt}/{})", self.retry.max_attempts)
                        }
                        TransportError::Network(_) => warn!("Network error: {e}"),
                    }
                    last_failure = Some(e);
                    tokio::time::sleep(self.retry.backoff.sample()).await;
                }
            }
        }

        warn!("Failed after retries: {code}");
        Ok(CheckOutcome::Checked(CheckResult::Error {
            code: code.to_string(),
            reason: last_failure
                .map(|e| format!("retries exhausted: {e}"))
                .unwrap_or_else(|| "retries exhausted".to_string()),
        }))
    }

    async fn report(&self, outcome: &CheckOutcome) -> Result<()> {
        match outcome {
            CheckOutcome::Blocked => error!("BLOCKED (HTTP 403), stopping"),
            CheckOutcome::Checked(CheckResult::Error { reason, .. }) => warn!("Skipped: {reason}"),
            CheckOutcome::Checked(CheckResult::Invalid { code }) => info!("Invalid: {code}"),
            CheckOutcome::Checked(CheckResult::Valid { code, discount }) => {
                info!("VALID: {code} ({discount})");
                self.log
                    .append(&ValidEntry {
                        found_at: chrono::Local::now().naive_local(),
                        code: code.clone(),
                        discount: discount.clone(),
                    })
                    .await?;
            }
        }
        Ok(())
    }
}
