//! 前端路由
//!
//! 使用 rust-embed 嵌入前端构建产物：
//! - 静态资源 (`/assets/*`、根目录文件) 不经过守卫
//! - 已知的前端路由先经过守卫，授权后返回 index.html，否则跳转登录页
//! - 未知路由返回 404 状态的 index.html，由前端渲染 NotFound
//! - 自定义前端目录覆盖（开发用）

use actix_web::http::header::LOCATION;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use rust_embed::Embed;
use std::path::Path;
use tracing::debug;

use crate::models::{ApiResponse, ErrorCode};
use crate::session::{AuthGuard, GuardOutcome, Session, guard::normalize_path};

/// 嵌入前端静态资源
/// 编译时从 frontend/dist/ 目录读取文件
#[derive(Embed)]
#[folder = "frontend/dist/"]
struct FrontendAssets;

/// 前端路由表 (小写，不含末尾斜杠)
const CLIENT_ROUTES: &[&str] = &[
    "/",
    "/login",
    "/register",
    "/subscriptions",
    "/dashboard",
    "/session-expired",
    "/internal-error",
    "/classes",
    "/students",
    "/student-subscriptions",
    "/schedule",
    "/instructors",
    "/teachers",
];

const CHECKOUT_PREFIX: &str = "/checkout/";

/// 判断路径是否为已知的前端路由
fn is_client_route(path: &str) -> bool {
    let path = normalize_path(path);
    if CLIENT_ROUTES.contains(&path.as_str()) {
        return true;
    }
    // /checkout/:subscriptionId
    path.strip_prefix(CHECKOUT_PREFIX)
        .is_some_and(|id| !id.is_empty() && !id.contains('/'))
}

/// 获取文件的 MIME 类型
fn get_mime_type(path: &str) -> &'static str {
    let ext = Path::new(path)
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("");

    match ext {
        "html" => "text/html; charset=utf-8",
        "js" | "mjs" => "application/javascript; charset=utf-8",
        "css" => "text/css; charset=utf-8",
        "json" | "map" => "application/json; charset=utf-8",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "ico" => "image/x-icon",
        "woff" => "font/woff",
        "woff2" => "font/woff2",
        "ttf" => "font/ttf",
        "webp" => "image/webp",
        "txt" => "text/plain; charset=utf-8",
        "webmanifest" => "application/manifest+json",
        _ => "application/octet-stream",
    }
}

/// 带 hash 的静态资源可以长期缓存
fn should_cache(path: &str) -> bool {
    path.starts_with("assets/")
        && matches!(
            Path::new(path).extension().and_then(|s| s.to_str()),
            Some("js" | "css" | "woff" | "woff2" | "ttf" | "png" | "jpg" | "jpeg" | "svg" | "webp")
        )
}

/// 尝试从自定义目录读取文件（开发用）
fn try_custom_file(path: &str) -> Option<Vec<u8>> {
    if path.contains("..") {
        return None;
    }
    std::fs::read(format!("./frontend-custom/{path}")).ok()
}

/// 获取文件内容（优先自定义目录，然后嵌入资源）
fn get_file(path: &str) -> Option<Vec<u8>> {
    try_custom_file(path).or_else(|| FrontendAssets::get(path).map(|f| f.data.to_vec()))
}

fn asset_response(path: &str, data: Vec<u8>) -> HttpResponse {
    let mut response = HttpResponse::Ok();
    response.content_type(get_mime_type(path));
    if should_cache(path) {
        response.insert_header(("Cache-Control", "public, max-age=31536000, immutable"));
    }
    response.body(data)
}

/// 返回前端外壳 index.html
fn shell_response(mut response: actix_web::HttpResponseBuilder) -> HttpResponse {
    match get_file("index.html") {
        Some(data) => response
            .content_type("text/html; charset=utf-8")
            .insert_header(("Cache-Control", "no-cache, no-store, must-revalidate"))
            .body(data),
        None => HttpResponse::NotFound()
            .content_type("text/html; charset=utf-8")
            .body(
                r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>Plannfly</title>
</head>
<body>
    <h1>Frontend Not Found</h1>
    <p>The frontend assets have not been built or embedded.</p>
    <pre>cd frontend && npm run build</pre>
</body>
</html>"#,
            ),
    }
}

/// 前端请求处理
pub async fn serve_frontend(
    req: HttpRequest,
    guard: web::Data<AuthGuard>,
    session: Session,
) -> ActixResult<HttpResponse> {
    let path = req.path();
    let file_path = path.trim_start_matches('/');

    // 静态资源不经过守卫
    if !file_path.is_empty()
        && let Some(data) = get_file(file_path)
    {
        return Ok(asset_response(file_path, data));
    }

    // 未匹配的门户接口
    if file_path.starts_with("api/") {
        return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::NotFound,
            format!("No API route for {path}"),
        )));
    }

    if !is_client_route(path) {
        debug!("Unknown client route {}", path);
        return Ok(shell_response(HttpResponse::NotFound()));
    }

    match guard.navigate(path, &session).await {
        GuardOutcome::Render | GuardOutcome::Loading => Ok(shell_response(HttpResponse::Ok())),
        GuardOutcome::Redirect { location } => Ok(HttpResponse::SeeOther()
            .insert_header((LOCATION, location))
            .finish()),
    }
}

/// 配置前端路由
pub fn configure_frontend_routes(cfg: &mut web::ServiceConfig) {
    // 所有非 API 路由都交给前端处理（放在最后）
    cfg.route("/{tail:.*}", web::get().to(serve_frontend));
}
