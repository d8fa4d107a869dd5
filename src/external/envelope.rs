use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{AppError, AppResult};

/// Raw `{success, message, payload}` wrapper returned by every backend call.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Envelope {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub payload: Value,
}

/// One page of a resource plus the backend's total row count.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Listing<T> {
    pub data: Vec<T>,
    pub total: u64,
}

impl<T> Default for Listing<T> {
    fn default() -> Self {
        Self {
            data: Vec::new(),
            total: 0,
        }
    }
}

/// Acknowledgement of a mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ack {
    pub message: String,
}

const COUNT_KEYS: [&str; 3] = ["count", "total", "totalCount"];

impl Envelope {
    pub fn ack(self, fallback: &str) -> Ack {
        Ack {
            message: self
                .message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| fallback.to_string()),
        }
    }

    /// Normalizes the list payload shapes the backend uses: `{data, count}`,
    /// a bare array, an object holding a single array under a bespoke key, or
    /// a lone object.
    pub fn into_listing<T: DeserializeOwned>(self) -> AppResult<Listing<T>> {
        let (rows, count) = match self.payload {
            Value::Null => (Vec::new(), None),
            Value::Array(rows) => (rows, None),
            Value::Object(mut map) => {
                let count = COUNT_KEYS
                    .iter()
                    .find_map(|k| map.get(*k).and_then(Value::as_u64));
                if let Some(Value::Array(rows)) = map.remove("data") {
                    (rows, count)
                } else if let Some(key) = map
                    .iter()
                    .find(|(_, v)| v.is_array())
                    .map(|(k, _)| k.clone())
                {
                    match map.remove(&key) {
                        Some(Value::Array(rows)) => (rows, count),
                        _ => (Vec::new(), count),
                    }
                } else {
                    (vec![Value::Object(map)], None)
                }
            }
            other => {
                return Err(AppError::api(
                    200,
                    Some(format!("unexpected list payload: {other}")),
                ));
            }
        };

        let total = count.unwrap_or(rows.len() as u64);
        let data = rows
            .into_iter()
            .map(serde_json::from_value)
            .collect::<Result<Vec<T>, _>>()?;
        Ok(Listing { data, total })
    }
}
