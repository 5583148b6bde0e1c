//! Domain types for the voucher sweep: session credentials, the request
//! header set, response classification and the ports the application layer
//! talks through.

pub mod credentials;
pub mod headers;
pub mod ports;
pub mod voucher;
