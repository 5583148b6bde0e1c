use crate::config::Config;
use crate::domain::headers::build_headers;
use crate::domain::ports::VoucherApi;
use crate::domain::voucher::{ApiResponse, ApplyVoucher};
use crate::error::{Result, SweepError, TransportError};
use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use std::time::Duration;
use tracing::debug;

/// `VoucherApi` backed by a reqwest client with the session headers baked in.
pub struct HttpVoucherApi {
    client: reqwest::Client,
    endpoint: String,
    timeout: Duration,
}

impl HttpVoucherApi {
    /// Builds the client once; the cookie header is never refreshed afterwards.
    pub fn new(config: &Config, cookie: &str) -> Result<Self> {
        let headers = header_map(&build_headers(cookie, &config.site))?;
        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            timeout: config.request_timeout,
        })
    }

    fn transport_error(&self, e: reqwest::Error) -> TransportError {
        if e.is_timeout() {
            TransportError::Timeout(self.timeout)
        } else {
            TransportError::Network(e.to_string())
        }
    }
}

fn header_map(headers: &[(&'static str, String)]) -> Result<HeaderMap> {
    let mut map = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        let value = HeaderValue::from_str(value).map_err(|_| {
            SweepError::Config(format!("value for header {name:?} is not valid header text"))
        })?;
        map.insert(HeaderName::from_static(*name), value);
    }
    Ok(map)
}

#[async_trait]
impl VoucherApi for HttpVoucherApi {
    async fn apply(&self, code: &str) -> std::result::Result<ApiResponse, TransportError> {
        let resp = self
            .client
            .post(&self.endpoint)
            .json(&ApplyVoucher::web(code))
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = resp.status().as_u16();
        let content_type = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = resp.text().await.map_err(|e| self.transport_error(e))?;

        debug!(code, status, content_type = ?content_type, "voucher response");

        Ok(ApiResponse {
            status,
            content_type,
            body,
        })
    }
}
