use super::voucher::{ApiResponse, ValidEntry};
use crate::error::{Result, TransportError};
use async_trait::async_trait;

#[async_trait]
pub trait VoucherApi: Send + Sync {
    /// Submits one code. A transport failure means no response was received.
    async fn apply(&self, code: &str) -> std::result::Result<ApiResponse, TransportError>;
}

#[async_trait]
pub trait ValidLog: Send + Sync {
    async fn append(&self, entry: &ValidEntry) -> Result<()>;
}

pub type VoucherApiBox = Box<dyn VoucherApi>;
pub type ValidLogBox = Box<dyn ValidLog>;
