use serde::{Deserialize, Serialize};

/// 应用配置结构体
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub app: AppSettings,
    pub server: ServerConfig,
    pub backend: BackendConfig,
    pub session: SessionConfig,
    pub query: QueryConfig,
    pub ui_state: UiStateConfig,
    pub cors: CorsConfig,
}

/// 应用设置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub system_name: String,
    pub environment: String,
    pub log_level: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            system_name: "Plannfly".to_string(),
            environment: "development".to_string(),
            log_level: "info".to_string(),
        }
    }
}

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub unix_socket_path: String,
    pub workers: usize,
    pub max_workers: usize,
    pub timeouts: TimeoutConfig,
    pub limits: LimitConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            unix_socket_path: String::new(),
            workers: 0,
            max_workers: 8,
            timeouts: TimeoutConfig::default(),
            limits: LimitConfig::default(),
        }
    }
}

/// 超时配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeoutConfig {
    pub client_request: u64,
    pub client_disconnect: u64,
    pub keep_alive: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            client_request: 5000,
            client_disconnect: 1000,
            keep_alive: 30,
        }
    }
}

/// 限制配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitConfig {
    pub max_payload_size: usize,
}

impl Default for LimitConfig {
    fn default() -> Self {
        Self {
            max_payload_size: 256 * 1024,
        }
    }
}

/// 远端业务 API 配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// 后端源地址，所有调用路径都拼接在其后
    pub base_url: String,
    /// POST 请求是否默认携带 Bearer 凭证（历史行为为不携带）
    pub post_attaches_credential: bool,
    pub user_agent: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            post_attaches_credential: false,
            user_agent: format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
        }
    }
}

/// 会话与路由守卫配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// 存放 Bearer 凭证的 cookie 名
    pub cookie_name: String,
    /// 无需校验即可访问的前端路由
    pub public_routes: Vec<String>,
    /// 凭证自省接口
    pub introspection_path: String,
    pub login_path: String,
    pub session_expired_path: String,
    /// 登出时是否同时清除浏览器的 localStorage / sessionStorage
    pub logout_clears_storage: bool,
    pub secure_cookie: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: "token".to_string(),
            public_routes: vec![
                "/".to_string(),
                "/login".to_string(),
                "/register".to_string(),
                "/session-expired".to_string(),
                "/internal-error".to_string(),
            ],
            introspection_path: "/auth/token".to_string(),
            login_path: "/login".to_string(),
            session_expired_path: "/session-expired".to_string(),
            logout_clears_storage: true,
            secure_cookie: false,
        }
    }
}

/// 查询缓存与重试配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    /// 列表数据新鲜期 (秒)
    pub stale_time: u64,
    /// 变化较少的字典数据新鲜期 (秒)
    pub long_stale_time: u64,
    /// 查询失败后的最大重试次数
    pub retry: u32,
    /// 指数退避基准 (毫秒)
    pub retry_base_delay_ms: u64,
    /// 指数退避上限 (毫秒)
    pub retry_max_delay_ms: u64,
    pub max_capacity: u64,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            stale_time: 5 * 60,
            long_stale_time: 10 * 60,
            retry: 3,
            retry_base_delay_ms: 1000,
            retry_max_delay_ms: 30_000,
            max_capacity: 10_000,
        }
    }
}

/// 页面交互状态配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiStateConfig {
    /// 页面状态空闲过期时间 (秒)
    pub idle_timeout: u64,
    pub max_capacity: u64,
}

impl Default for UiStateConfig {
    fn default() -> Self {
        Self {
            idle_timeout: 30 * 60,
            max_capacity: 50_000,
        }
    }
}

/// CORS 配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
    pub max_age: usize,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec![],
            max_age: 3600,
        }
    }
}
