use chrono::NaiveDateTime;
use serde::Serialize;
use serde_json::Value;
use std::fmt;

pub const DISCOUNT_FIELD: &str = "voucherDiscountValue";
pub const ERROR_FIELD: &str = "errorMessage";
pub const MISSING_DISCOUNT: &str = "NA";

/// Request body of the apply-voucher call.
#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ApplyVoucher<'a> {
    pub voucher_id: &'a str,
    pub device: Device,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct Device {
    pub client_type: &'static str,
}

impl<'a> ApplyVoucher<'a> {
    pub fn web(code: &'a str) -> Self {
        Self {
            voucher_id: code,
            device: Device { client_type: "web" },
        }
    }
}

/// What came back from the endpoint, before any interpretation.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: String,
}

impl ApiResponse {
    pub fn is_blocked(&self) -> bool {
        self.status == 403
    }

    pub fn is_json(&self) -> bool {
        self.content_type
            .as_deref()
            .is_some_and(|ct| ct.contains("application/json"))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CheckResult {
    Valid { code: String, discount: String },
    Invalid { code: String },
    Error { code: String, reason: String },
}

impl CheckResult {
    pub fn code(&self) -> &str {
        match self {
            CheckResult::Valid { code, .. }
            | CheckResult::Invalid { code }
            | CheckResult::Error { code, .. } => code,
        }
    }
}

/// The checker's verdict for one code. `Blocked` ends the whole run.
#[derive(Debug, Clone, PartialEq)]
pub enum CheckOutcome {
    Checked(CheckResult),
    Blocked,
}

/// Interprets a response that was actually received.
///
/// Anything other than a 403 resolves to a final result; responses are never
/// retried once they arrive.
pub fn classify(code: &str, response: &ApiResponse) -> CheckOutcome {
    if response.is_blocked() {
        return CheckOutcome::Blocked;
    }

    let error = |reason: String| {
        CheckOutcome::Checked(CheckResult::Error {
            code: code.to_string(),
            reason,
        })
    };

    if !response.is_json() {
        return error(format!(
            "non-JSON response (status {}, content-type {})",
            response.status,
            response.content_type.as_deref().unwrap_or("none")
        ));
    }

    let data = match serde_json::from_str::<Value>(&response.body) {
        Ok(Value::Object(map)) => map,
        Ok(_) => return error("JSON response is not an object".to_string()),
        Err(e) => return error(format!("malformed JSON body: {e}")),
    };

    if data.contains_key(ERROR_FIELD) {
        return CheckOutcome::Checked(CheckResult::Invalid {
            code: code.to_string(),
        });
    }

    let discount = match data.get(DISCOUNT_FIELD) {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => MISSING_DISCOUNT.to_string(),
    };

    CheckOutcome::Checked(CheckResult::Valid {
        code: code.to_string(),
        discount,
    })
}

/// One line of the valid-result log.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidEntry {
    pub found_at: NaiveDateTime,
    pub code: String,
    pub discount: String,
}

impl fmt::Display for ValidEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} | {}",
            self.found_at.format("%Y-%m-%d %H:%M:%S"),
            self.code,
            self.discount
        )
    }
}

/// Per-cycle counters. `checked` is always the sum of the other three.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RoundTally {
    pub valid: u64,
    pub invalid: u64,
    pub error: u64,
}

impl RoundTally {
    pub fn checked(&self) -> u64 {
        self.valid + self.invalid + self.error
    }

    pub fn record(&mut self, result: &CheckResult) {
        match result {
            CheckResult::Valid { .. } => self.valid += 1,
            CheckResult::Invalid { .. } => self.invalid += 1,
            CheckResult::Error { .. } => self.error += 1,
        }
    }
}

impl<'a> FromIterator<&'a CheckResult> for RoundTally {
    fn from_iter<I: IntoIterator<Item = &'a CheckResult>>(iter: I) -> Self {
        iter.into_iter().fold(Self::default(), |mut tally, result| {
            tally.record(result);
            tally
        })
    }
}

impl fmt::Display for RoundTally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "checked={} valid={} invalid={} error={}",
            self.checked(),
            self.valid,
            self.invalid,
            self.error
        )
    }
}
