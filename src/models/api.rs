use serde::{Deserialize, Deserializer, Serialize};

/// Inbound body of `POST /api/chat`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ChatRequest {
    /// Trimmed; a non-string value reads as empty.
    #[serde(default, deserialize_with = "trimmed_string_or_empty")]
    pub message: String,
}

fn trimmed_string_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value.as_str().map(|s| s.trim().to_string()).unwrap_or_default())
}

impl ChatRequest {
    /// Lenient extraction used by the handler.
    ///
    /// Anything other than a JSON object is treated as an empty mapping.
    pub fn from_body(body: &[u8]) -> Self {
        match serde_json::from_slice::<serde_json::Value>(body) {
            Ok(value @ serde_json::Value::Object(_)) => {
                Self::deserialize(value).unwrap_or_default()
            }
            _ => Self::default(),
        }
    }
}

/// Successful reply of `POST /api/chat`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub answer: String,
}

/// Error body shared by every failing route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
