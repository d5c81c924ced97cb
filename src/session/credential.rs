use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::Deserialize;
use std::fmt;

use crate::models::EntityId;

/// 凭证载荷中可能出现的主体字段
///
/// 上游两个版本分别使用 `clienteUuid` 与 `customerId`，按此顺序查找。
#[derive(Debug, Default, Deserialize)]
struct SubjectClaims {
    #[serde(rename = "clienteUuid", default)]
    cliente_uuid: Option<EntityId>,
    #[serde(rename = "customerId", default)]
    customer_id: Option<EntityId>,
}

/// Bearer 凭证
///
/// 对门户而言是不透明字符串，只在本地解码中间段读取主体 ID，从不校验签名；
/// 真正的校验由远端自省接口完成。
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// 空白值视为没有凭证
    pub fn new(token: impl Into<String>) -> Option<Self> {
        let token = token.into();
        let trimmed = token.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn token(&self) -> &str {
        &self.0
    }

    pub fn bearer_header(&self) -> String {
        format!("Bearer {}", self.0)
    }

    /// 从载荷中读取主体 ID，任何解析失败都返回 None
    pub fn subject_id(&self) -> Option<EntityId> {
        let payload = self.0.split('.').nth(1)?;
        let bytes = URL_SAFE_NO_PAD
            .decode(payload.trim_end_matches('='))
            .ok()?;
        let claims: SubjectClaims = serde_json::from_slice(&bytes).ok()?;

        claims
            .cliente_uuid
            .filter(|id| !id.as_str().is_empty())
            .or(claims.customer_id.filter(|id| !id.as_str().is_empty()))
    }
}

// 避免在日志中输出完整凭证
impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix: String = self.0.chars().take(8).collect();
        write!(f, "Credential({prefix}...)")
    }
}
