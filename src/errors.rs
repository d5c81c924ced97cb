//! 统一错误处理模块
//!
//! 使用宏自动生成门户错误类型，支持错误代码和类型名称；
//! 另提供 API 访问层使用的 `RequestError`。

use std::fmt;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_portal_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum PortalError {
            $($variant(String),)*
        }

        impl PortalError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(PortalError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(PortalError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(PortalError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl PortalError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        PortalError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_portal_errors! {
    Configuration("E001", "Configuration Error"),
    Request("E002", "Request Error"),
    Authentication("E003", "Authentication Error"),
    Validation("E004", "Validation Error"),
    Serialization("E005", "Serialization Error"),
    NotFound("E006", "Resource Not Found"),
    FileOperation("E007", "File Operation Error"),
}

impl PortalError {
    /// 格式化为彩色输出（用于开发环境）
    #[cfg(debug_assertions)]
    pub fn format_colored(&self) -> String {
        format!(
            "\x1b[1;31m[ERROR]\x1b[0m \x1b[33m{}\x1b[0m \x1b[31m{}\x1b[0m\n  {}",
            self.code(),
            self.error_type(),
            self.message()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for PortalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for PortalError {}

impl From<std::io::Error> for PortalError {
    fn from(err: std::io::Error) -> Self {
        PortalError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for PortalError {
    fn from(err: serde_json::Error) -> Self {
        PortalError::Serialization(err.to_string())
    }
}

impl From<config::ConfigError> for PortalError {
    fn from(err: config::ConfigError) -> Self {
        PortalError::Configuration(err.to_string())
    }
}

impl From<RequestError> for PortalError {
    fn from(err: RequestError) -> Self {
        PortalError::Request(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PortalError>;

/// API 访问层的统一失败类型
///
/// 非 2xx 响应只携带状态码，不解析响应体；传输层失败（连接被拒、
/// 响应体不是 JSON 等）没有状态码。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestError {
    status: Option<u16>,
    message: String,
}

impl RequestError {
    /// 后端返回了非 2xx 状态
    pub fn status(status: u16) -> Self {
        Self {
            status: Some(status),
            message: format!("Request failed with status {status}"),
        }
    }

    /// 网络或协议层失败
    pub fn transport<T: Into<String>>(msg: T) -> Self {
        Self {
            status: None,
            message: msg.into(),
        }
    }

    /// 路径不是后端相对路径
    pub fn invalid_path(path: &str) -> Self {
        Self {
            status: None,
            message: format!("Path must be backend-relative: {path:?}"),
        }
    }

    pub fn status_code(&self) -> Option<u16> {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// 401 / 403：凭证缺失、过期或被拒绝
    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status, Some(401) | Some(403))
    }
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for RequestError {}

impl From<reqwest::Error> for RequestError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => RequestError::status(status.as_u16()),
            None => RequestError::transport(err.to_string()),
        }
    }
}
