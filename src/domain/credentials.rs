use crate::error::{Result, SweepError};
use serde_json::Value;
use std::path::Path;

/// A single `name=value` session cookie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cookie {
    pub name: String,
    pub value: String,
}

/// The session cookies loaded once at startup, in file order.
///
/// The store is either a list of `{"name": .., "value": ..}` objects (the shape
/// browser cookie exporters produce) or a flat `{"name": "value"}` object.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Credentials {
    cookies: Vec<Cookie>,
}

impl Credentials {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            SweepError::Config(format!("cannot read cookie store {}: {e}", path.display()))
        })?;
        Self::from_json_str(&raw)
    }

    pub fn from_json_str(raw: &str) -> Result<Self> {
        let data: Value = serde_json::from_str(raw)
            .map_err(|e| SweepError::Config(format!("cookie store is not valid JSON: {e}")))?;

        let cookies = match data {
            Value::Array(entries) => entries
                .iter()
                .enumerate()
                .map(|(idx, entry)| cookie_from_entry(idx, entry))
                .collect::<Result<Vec<_>>>()?,
            Value::Object(map) => map
                .iter()
                .map(|(name, value)| {
                    Ok(Cookie {
                        name: name.clone(),
                        value: scalar_text(value).ok_or_else(|| {
                            SweepError::Config(format!(
                                "cookie {name:?} has a non-scalar value"
                            ))
                        })?,
                    })
                })
                .collect::<Result<Vec<_>>>()?,
            _ => {
                return Err(SweepError::Config(
                    "cookie store must be a JSON array or object".to_string(),
                ));
            }
        };

        Ok(Self { cookies })
    }

    pub fn cookies(&self) -> &[Cookie] {
        &self.cookies
    }

    /// Flattens the cookies into a single `Cookie` header value.
    pub fn cookie_header(&self) -> String {
        self.cookies
            .iter()
            .map(|c| format!("{}={}", c.name, c.value))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

fn cookie_from_entry(idx: usize, entry: &Value) -> Result<Cookie> {
    let field = |key: &str| {
        entry
            .get(key)
            .and_then(scalar_text)
            .ok_or_else(|| {
                SweepError::Config(format!(
                    "cookie entry #{idx} has a missing or non-scalar {key:?}"
                ))
            })
    };

    Ok(Cookie {
        name: field("name")?,
        value: field("value")?,
    })
}

/// Strings are taken verbatim; numbers and booleans keep their JSON spelling.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_shape_flattens_in_order() {
        let raw = r#"[
            {"name": "session", "value": "abc", "domain": ".example.com"},
            {"name": "token", "value": "x=y"},
            {"name": "a", "value": "1"}
        ]"#;
        let creds = Credentials::from_json_str(raw).unwrap();
        assert_eq!(creds.cookie_header(), "session=abc; token=x=y; a=1");
    }

    #[test]
    fn test_map_shape_preserves_file_order() {
        let raw = r#"{"zeta": "1", "alpha": "2", "mid": "3"}"#;
        let creds = Credentials::from_json_str(raw).unwrap();
        assert_eq!(creds.cookie_header(), "zeta=1; alpha=2; mid=3");
    }

    #[test]
    fn test_scalar_values_are_coerced() {
        let raw = r#"{"count": 42, "flag": true}"#;
        let creds = Credentials::from_json_str(raw).unwrap();
        assert_eq!(creds.cookie_header(), "count=42; flag=true");
    }

    #[test]
    fn test_empty_store_yields_empty_header() {
        assert_eq!(Credentials::from_json_str("[]").unwrap().cookie_header(), "");
        assert_eq!(Credentials::from_json_str("{}").unwrap().cookie_header(), "");
    }

    #[test]
    fn test_malformed_stores_are_config_errors() {
        for raw in [
            "not json",
            r#""just a string""#,
            r#"[{"name": "a"}]"#,
            r#"[{"value": "a"}]"#,
            r#"[{"name": "a", "value": null}]"#,
            r#"{"a": {"nested": 1}}"#,
            r#"{"a": [1, 2]}"#,
            r#"[["a", "b"]]"#,
        ] {
            assert!(
                matches!(Credentials::from_json_str(raw), Err(SweepError::Config(_))),
                "expected config error for {raw}"
            );
        }
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = Credentials::load(dir.path().join("absent.json"));
        assert!(matches!(result, Err(SweepError::Config(_))));
    }
}
