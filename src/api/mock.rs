//! 测试用的内存后端

use async_trait::async_trait;
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use super::{ApiClient, ApiRequest, Method};
use crate::errors::RequestError;

type Reply = Result<Value, RequestError>;

/// 按 (方法, 路径) 返回预设响应，并记录所有调用
///
/// 同一路径排队多个响应时依次消费，最后一个会一直重复；
/// 未登记的路径返回 404。
#[derive(Default)]
pub struct MockApiClient {
    replies: Mutex<HashMap<(Method, String), VecDeque<Reply>>>,
    calls: Mutex<Vec<ApiRequest>>,
}

impl MockApiClient {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, method: Method, path: &str, reply: Reply) {
        self.replies
            .lock()
            .unwrap()
            .entry((method, path.to_string()))
            .or_default()
            .push_back(reply);
    }

    pub fn on_get(&self, path: &str, body: Value) {
        self.push(Method::Get, path, Ok(body));
    }

    pub fn fail_get(&self, path: &str, status: u16) {
        self.push(Method::Get, path, Err(RequestError::status(status)));
    }

    pub fn fail_get_transport(&self, path: &str) {
        self.push(
            Method::Get,
            path,
            Err(RequestError::transport("connection refused")),
        );
    }

    pub fn on_post(&self, path: &str, body: Value) {
        self.push(Method::Post, path, Ok(body));
    }

    pub fn fail_post(&self, path: &str, status: u16) {
        self.push(Method::Post, path, Err(RequestError::status(status)));
    }

    pub fn calls(&self) -> Vec<ApiRequest> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_to(&self, method: Method, path: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.method == method && c.path == path)
            .count()
    }
}

#[async_trait]
impl ApiClient for MockApiClient {
    async fn execute(&self, request: ApiRequest) -> Result<Value, RequestError> {
        let key = (request.method, request.path.clone());
        self.calls.lock().unwrap().push(request);

        let mut replies = self.replies.lock().unwrap();
        match replies.get_mut(&key) {
            Some(queue) if queue.len() > 1 => queue
                .pop_front()
                .unwrap_or_else(|| Err(RequestError::status(404))),
            Some(queue) => queue
                .front()
                .cloned()
                .unwrap_or_else(|| Err(RequestError::status(404))),
            None => Err(RequestError::status(404)),
        }
    }
}
