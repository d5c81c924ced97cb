//! 查询层
//!
//! 列表查询按 (会话, 路径) 缓存在新鲜期内，失败按指数退避有限重试。
//! 写操作不经过这里，也从不重试。

pub mod retry;

pub use retry::RetryPolicy;

use moka::future::Cache;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use crate::api::{Api, decode};
use crate::config::QueryConfig;
use crate::errors::RequestError;
use crate::session::Session;

/// 新鲜期档位
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    /// 列表数据
    Standard,
    /// 变化较少的字典数据，例如订阅类型
    Long,
}

#[derive(Clone)]
pub struct QueryClient {
    api: Api,
    standard: Cache<String, Value>,
    long: Cache<String, Value>,
    retry: RetryPolicy,
}

impl QueryClient {
    pub fn new(api: Api, config: &QueryConfig) -> Self {
        let build = |ttl: Duration| -> Cache<String, Value> {
            Cache::builder()
                .max_capacity(config.max_capacity)
                .time_to_live(ttl)
                .support_invalidation_closures()
                .build()
        };

        debug!(
            "QueryClient initialized: stale window {}s / {}s, {} retries",
            config.stale_time, config.long_stale_time, config.retry
        );

        Self {
            api,
            standard: build(config.stale_window()),
            long: build(config.long_stale_window()),
            retry: RetryPolicy::from_config(config),
        }
    }

    pub fn api(&self) -> &Api {
        &self.api
    }

    fn cache(&self, freshness: Freshness) -> &Cache<String, Value> {
        match freshness {
            Freshness::Standard => &self.standard,
            Freshness::Long => &self.long,
        }
    }

    fn key(session: &Session, path: &str) -> String {
        format!("{}:{}", session.state_key(), path)
    }

    /// 读取查询结果
    ///
    /// 新鲜期内直接返回缓存；同一键的并发请求只发出一次。
    /// 失败结果不缓存。
    pub async fn fetch(
        &self,
        session: &Session,
        path: &str,
        freshness: Freshness,
    ) -> Result<Value, RequestError> {
        let key = Self::key(session, path);
        let cache = self.cache(freshness);

        if let Some(value) = cache.get(&key).await {
            debug!("Query cache hit: {}", path);
            return Ok(value);
        }

        cache
            .try_get_with(key, self.fetch_with_retry(session, path))
            .await
            .map_err(|err: Arc<RequestError>| (*err).clone())
    }

    pub async fn fetch_as<T: DeserializeOwned>(
        &self,
        session: &Session,
        path: &str,
        freshness: Freshness,
    ) -> Result<T, RequestError> {
        let value = self.fetch(session, path, freshness).await?;
        decode(path, value)
    }

    async fn fetch_with_retry(&self, session: &Session, path: &str) -> Result<Value, RequestError> {
        let mut attempt = 0;
        loop {
            match self.api.get(path, session.credential()).await {
                Ok(value) => return Ok(value),
                Err(err) if attempt < self.retry.retries() && RetryPolicy::is_retryable(&err) => {
                    let delay = self.retry.delay(attempt);
                    warn!(
                        "Query {} failed ({}), retrying in {:?} ({}/{})",
                        path,
                        err,
                        delay,
                        attempt + 1,
                        self.retry.retries()
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }

    /// 作废当前会话下以 `prefix` 开头的所有查询
    pub fn invalidate(&self, session: &Session, prefix: &str) {
        let full_prefix = Self::key(session, prefix);
        for cache in [&self.standard, &self.long] {
            let prefix = full_prefix.clone();
            if let Err(err) = cache.invalidate_entries_if(move |key, _| key.starts_with(&prefix)) {
                warn!("Failed to invalidate queries under {}: {}", full_prefix, err);
            }
        }
        debug!("Invalidated queries under {}", full_prefix);
    }
}
