//! 会话与路由守卫
//!
//! 凭证 cookie 只在这里读取和清除：
//! - 请求进入时由 [`Session::from_request`] 读取一次（init）
//! - 登出时由 [`Session::teardown_response`] 清除（teardown）

pub mod credential;
pub mod guard;

pub use credential::Credential;
pub use guard::{AuthGuard, AuthState, GuardOutcome};

use actix_web::cookie::{Cookie, SameSite};
use actix_web::dev::Payload;
use actix_web::http::header::LOCATION;
use actix_web::{FromRequest, HttpMessage, HttpRequest, HttpResponse, web};
use futures_util::future::{Ready, ready};
use sha2::{Digest, Sha256};

use crate::config::SessionConfig;
use crate::models::EntityId;

/// 登出时要求浏览器清除的站点数据
pub const CLEAR_SITE_DATA_HEADER: &str = "Clear-Site-Data";
const CLEAR_SITE_DATA_VALUE: &str = "\"cookies\", \"storage\"";

/// 当前请求的会话
///
/// 不持久化，每次请求从 cookie 重新构造。
#[derive(Debug, Clone, Default)]
pub struct Session {
    credential: Option<Credential>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn with_credential(credential: Credential) -> Self {
        Self {
            credential: Some(credential),
        }
    }

    pub fn from_cookie_value(value: Option<&str>) -> Self {
        Self {
            credential: value.and_then(Credential::new),
        }
    }

    /// 从请求 cookie 读取凭证
    pub fn from_request(req: &HttpRequest, config: &SessionConfig) -> Self {
        let cookie = req.cookie(&config.cookie_name);
        Self::from_cookie_value(cookie.as_ref().map(|c| c.value()))
    }

    pub fn credential(&self) -> Option<&Credential> {
        self.credential.as_ref()
    }

    pub fn is_anonymous(&self) -> bool {
        self.credential.is_none()
    }

    pub fn subject_id(&self) -> Option<EntityId> {
        self.credential.as_ref().and_then(Credential::subject_id)
    }

    /// 日志用的主体标识，未经验签，只用于关联日志
    pub fn subject_label(&self) -> String {
        match self.subject_id() {
            Some(subject) => subject.to_string(),
            None => "unknown".to_string(),
        }
    }

    /// 按会话隔离缓存和页面状态的键
    ///
    /// 取整个凭证的 SHA-256 摘要。主体 ID 未经验签，不能作为隔离依据。
    pub fn state_key(&self) -> String {
        match &self.credential {
            Some(credential) => {
                let digest = Sha256::digest(credential.token().as_bytes());
                format!("tok:{}", hex::encode(digest))
            }
            None => "anonymous".to_string(),
        }
    }

    /// 登出响应：清除凭证 cookie，按配置要求浏览器清空存储，然后跳转登录页
    pub fn teardown_response(config: &SessionConfig) -> HttpResponse {
        let removal = Cookie::build(config.cookie_name.clone(), "")
            .path("/")
            .max_age(actix_web::cookie::time::Duration::seconds(0))
            .same_site(SameSite::Lax)
            .secure(config.secure_cookie)
            .finish();

        let mut response = HttpResponse::SeeOther();
        response
            .insert_header((LOCATION, config.login_path.as_str()))
            .cookie(removal);

        if config.logout_clears_storage {
            response.insert_header((CLEAR_SITE_DATA_HEADER, CLEAR_SITE_DATA_VALUE));
        }

        response.finish()
    }
}

impl FromRequest for Session {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        // 守卫中间件已经构造过会话
        if let Some(session) = req.extensions().get::<Session>() {
            return ready(Ok(session.clone()));
        }

        let session = match req.app_data::<web::Data<SessionConfig>>() {
            Some(config) => Session::from_request(req, config),
            None => Session::from_request(req, &SessionConfig::default()),
        };
        ready(Ok(session))
    }
}
