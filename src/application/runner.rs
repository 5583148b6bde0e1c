use super::checker::VoucherChecker;
use crate::config::Config;
use crate::domain::voucher::{CheckOutcome, RoundTally};
use crate::error::Result;
use crate::interfaces::text::coupon_reader::load_coupons;
use tracing::info;

/// Result of one pass over the candidate list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleReport {
    pub tally: RoundTally,
    /// The pass was cut short by a 403; `tally` covers only the codes before it.
    pub blocked: bool,
}

/// Why the run loop returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunExit {
    Blocked,
    CycleLimit,
}

/// Drives the check-sleep-report loop over the candidate list.
pub struct SweepRunner<'a> {
    config: &'a Config,
    checker: VoucherChecker,
}

impl<'a> SweepRunner<'a> {
    pub fn new(config: &'a Config, checker: VoucherChecker) -> Self {
        Self { config, checker }
    }

    /// Runs cycles until blocked or until the configured cycle limit.
    ///
    /// The candidate list is re-read at the start of every cycle.
    pub async fn run(&self) -> Result<RunExit> {
        let mut completed: u64 = 0;
        loop {
            let codes = load_coupons(&self.config.coupons_path)?;
            info!("Total coupons: {}", codes.len());

            let report = self.run_cycle(&codes).await?;
            if report.blocked {
                return Ok(RunExit::Blocked);
            }
            report_round(&report.tally);

            completed += 1;
            if self.config.max_cycles.is_some_and(|max| completed >= max) {
                return Ok(RunExit::CycleLimit);
            }

            info!(
                "Next round in {} seconds",
                self.config.cycle_pause.as_secs()
            );
            tokio::time::sleep(self.config.cycle_pause).await;
        }
    }

    /// Checks every code in order with a pause after each one.
    ///
    /// Counters start from zero on every call.
    pub async fn run_cycle(&self, codes: &[String]) -> Result<CycleReport> {
        let mut tally = RoundTally::default();

        for code in codes {
            info!("Checking: {code}");
            match self.checker.check(code).await? {
                CheckOutcome::Blocked => {
                    return Ok(CycleReport {
                        tally,
                        blocked: true,
                    });
                }
                CheckOutcome::Checked(result) => tally.record(&result),
            }

            let wait = self.config.code_delay.sample();
            info!("Waiting {} sec", wait.as_secs());
            tokio::time::sleep(wait).await;
        }

        Ok(CycleReport {
            tally,
            blocked: false,
        })
    }
}

/// Emits the per-round counters.
pub fn report_round(tally: &RoundTally) {
    info!("ROUND SUMMARY {tally}");
}
