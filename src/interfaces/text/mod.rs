//! Plain-text adapters: the candidate list the operator edits and the
//! append-only log of discovered codes.

pub mod coupon_reader;
pub mod valid_log;
