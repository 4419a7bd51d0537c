use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    Unauthorized,
    Forbidden,
    NotFound,
    Validation,
    RateLimited,
    Internal,
    Other,
}

impl ErrorCode {
    pub fn from_status(status: u16) -> Self {
        match status {
            401 => Self::Unauthorized,
            403 => Self::Forbidden,
            404 => Self::NotFound,
            400 | 409 | 422 => Self::Validation,
            429 => Self::RateLimited,
            500..=599 => Self::Internal,
            _ => Self::Other,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationItem {
    #[serde(default)]
    pub loc: Vec<Value>,
    #[serde(default)]
    pub msg: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorDetail {
    Text(String),
    Items(Vec<ValidationItem>),
    Other(Value),
}

/// Error body returned by the backend. Any of the three fields may carry the
/// human-readable message.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<ErrorDetail>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<Value>,
}

impl ApiErrorBody {
    pub fn message(&self) -> Option<String> {
        if let Some(detail) = &self.detail {
            match detail {
                ErrorDetail::Text(text) if !text.trim().is_empty() => return Some(text.clone()),
                ErrorDetail::Items(items) if !items.is_empty() => {
                    let joined = items
                        .iter()
                        .map(|item| {
                            let field = item
                                .loc
                                .iter()
                                .filter_map(|part| match part {
                                    Value::String(s) if s != "body" => Some(s.clone()),
                                    Value::Number(n) => Some(n.to_string()),
                                    _ => None,
                                })
                                .collect::<Vec<_>>()
                                .join(".");
                            if field.is_empty() {
                                item.msg.clone()
                            } else {
                                format!("{field}: {}", item.msg)
                            }
                        })
                        .collect::<Vec<_>>()
                        .join("; ");
                    return Some(joined);
                }
                _ => {}
            }
        }

        if let Some(message) = self.message.as_deref() {
            if !message.trim().is_empty() {
                return Some(message.to_string());
            }
        }

        match &self.error {
            Some(Value::String(text)) if !text.trim().is_empty() => Some(text.clone()),
            Some(Value::Object(map)) => map
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_string),
            _ => None,
        }
    }
}
