use serde::Deserialize;
use serde_json::Value;

/// GET /customer/name 的响应：纯字符串或 `{ "name": ... }`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum CustomerName {
    Plain(String),
    Named { name: String },
}

impl CustomerName {
    pub fn from_value(value: Value) -> Option<String> {
        let name = match serde_json::from_value::<CustomerName>(value).ok()? {
            CustomerName::Plain(name) | CustomerName::Named { name } => name,
        };
        let name = name.trim();
        if name.is_empty() {
            None
        } else {
            Some(name.to_string())
        }
    }
}
