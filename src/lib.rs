//! Plannfly Portal - 教育机构管理面板的前端服务
//!
//! 基于 Actix Web 构建，位于浏览器与远端教育 API 之间：
//! 持有凭证 cookie、在每次导航时执行路由守卫、代理所有出站请求，
//! 并为每个页面计算可直接渲染的视图模型。
//!
//! # 架构
//! - `api`: 出站 HTTP 访问层
//! - `config`: 配置管理
//! - `errors`: 统一错误处理
//! - `middlewares`: 会话中间件
//! - `models`: 数据模型定义
//! - `pages`: 页面服务层
//! - `query`: 查询缓存与重试
//! - `routes`: 路由层
//! - `runtime`: 运行时生命周期管理
//! - `session`: 会话与路由守卫
//! - `utils`: 工具函数
//! - `view_state`: 页面派生状态

pub mod api;
pub mod config;
pub mod errors;
pub mod middlewares;
pub mod models;
pub mod pages;
pub mod query;
pub mod routes;
pub mod runtime;
pub mod session;
pub mod utils;
pub mod view_state;
