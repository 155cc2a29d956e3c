//! 测试用的翻译服务桩
//!
//! 在本地随机端口启动一个axum服务，模拟 `POST /translate?api-version=3.0&to=xx`

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};

use mstranslator::config::TranslatorConfig;
use mstranslator::retry::RetryPolicy;

/// 原文为此值时返回缺少 `translations` 的响应
pub const MALFORMED_TEXT: &str = "malformed";

/// 记录的一次请求
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub query: HashMap<String, String>,
    pub headers: HeaderMap,
    pub body: Value,
}

#[derive(Default)]
struct StubInner {
    statuses: VecDeque<u16>,
    delays: VecDeque<Duration>,
    requests: Vec<RecordedRequest>,
}

/// 翻译服务桩
#[derive(Clone, Default)]
pub struct StubService {
    inner: Arc<Mutex<StubInner>>,
}

impl StubService {
    /// 依次返回的状态码，用完后返回200
    pub fn with_statuses(statuses: &[u16]) -> Self {
        let stub = Self::default();
        stub.inner.lock().unwrap().statuses = statuses.iter().copied().collect();
        stub
    }

    /// 依次在响应前等待的时长，用完后立即响应
    pub fn with_delays(self, delays: &[Duration]) -> Self {
        self.inner.lock().unwrap().delays = delays.iter().copied().collect();
        self
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.inner.lock().unwrap().requests.clone()
    }

    /// 启动服务，返回服务地址
    pub async fn start(&self) -> String {
        let app = Router::new()
            .route("/translate", post(handle_translate))
            .with_state(self.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        format!("http://{}", addr)
    }
}

async fn handle_translate(
    State(stub): State<StubService>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let (status, delay) = {
        let mut inner = stub.inner.lock().unwrap();
        inner.requests.push(RecordedRequest {
            query: query.clone(),
            headers,
            body: body.clone(),
        });
        (inner.statuses.pop_front().unwrap_or(200), inner.delays.pop_front())
    };

    if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
    }

    if status != 200 {
        let status = StatusCode::from_u16(status).unwrap();
        let error = json!({ "error": { "code": status.as_u16() as u32 * 1000, "message": "stub failure" } });
        return (status, Json(error)).into_response();
    }

    let to = query.get("to").cloned().unwrap_or_default();
    let text = body[0]["Text"].as_str().unwrap_or_default().to_string();

    if text == MALFORMED_TEXT {
        return Json(json!([{ "detectedLanguage": { "language": "en", "score": 1.0 } }])).into_response();
    }

    Json(json!([{ "translations": [{ "text": format!("{}@{}", text, to), "to": to }] }])).into_response()
}

/// 不等待退避的测试配置
pub fn fast_config(endpoint: &str) -> TranslatorConfig {
    TranslatorConfig::new("test-key")
        .with_endpoint(endpoint)
        .with_timeout_secs(5)
        .with_retry_policy(RetryPolicy::new().with_backoff_factor(Duration::ZERO))
}

/// 唯一的临时文件路径
pub fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("mstranslator-{}-{}", uuid::Uuid::new_v4(), name))
}
