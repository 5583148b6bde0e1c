//! Application layer: the coupon checker and the cycle loop that drives it.
//!
//! `VoucherChecker` owns the endpoint and result-log ports and turns one code
//! into one outcome. `SweepRunner` walks the candidate list, accumulates a
//! fresh `RoundTally` per cycle and stops on the first `Blocked` outcome.

pub mod checker;
pub mod runner;
