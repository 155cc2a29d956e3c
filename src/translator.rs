//! 翻译客户端模块
//!
//! 每次调用只发送一条文本，连接池与重试策略归属于客户端实例

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::json;
use tracing::{debug, warn};
use url::Url;
use uuid::Uuid;

use crate::api_constants::api_config;
use crate::config::TranslatorConfig;
use crate::error::{Result, TranslationError};
use crate::response::api_error_message;
use crate::translation_error;

/// 单次逻辑调用的最终响应
#[derive(Debug, Clone)]
pub struct ApiResponse {
    /// 最后一次尝试的HTTP状态
    pub status: StatusCode,
    /// 原始响应体
    pub body: String,
    /// 实际尝试次数
    pub attempts: u32,
}

impl ApiResponse {
    /// 是否为2xx响应
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

/// 文本翻译接口，供批量翻译驱动使用
#[async_trait]
pub trait TextTranslator: Send + Sync {
    /// 翻译单条文本，返回2xx响应的原始响应体
    async fn translate(&self, text: &str, to: &str) -> Result<String>;
}

/// Microsoft Translator 客户端
pub struct Translator {
    http: Client,
    config: TranslatorConfig,
    translate_url: Url,
    trace_id: Uuid,
}

impl Translator {
    /// 创建客户端，整个生命周期内复用同一连接池和追踪ID
    pub fn new(config: TranslatorConfig) -> Result<Self> {
        let translate_url = build_translate_url(config.endpoint())?;

        let http = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| translation_error!(config, "http_client", format!("创建HTTP客户端失败: {}", e)))?;

        let trace_id = Uuid::new_v4();
        debug!("🔑 客户端追踪ID: {}", trace_id);

        Ok(Self {
            http,
            config,
            translate_url,
            trace_id,
        })
    }

    /// 客户端追踪ID
    pub fn trace_id(&self) -> Uuid {
        self.trace_id
    }

    /// 针对目标语言的请求地址
    pub fn request_url(&self, to: &str) -> Url {
        let mut url = self.translate_url.clone();
        url.query_pairs_mut()
            .append_pair("api-version", api_config::API_VERSION)
            .append_pair("to", to);
        url
    }

    /// 发送一条文本，返回最后一次尝试的原始响应（不论状态码）
    ///
    /// 超时或连接失败在重试耗尽后以 `TranslationError::Network` 返回。
    pub async fn send(&self, text: &str, to: &str) -> Result<ApiResponse> {
        let url = self.request_url(to);
        let body = request_body(text);
        let policy = self.config.retry_policy();

        let outcome = policy
            .run(
                |attempt| {
                    let url = url.clone();
                    let body = &body;
                    async move {
                        debug!("📤 POST {} (尝试 {})", url, attempt);
                        let mut request = self
                            .http
                            .post(url)
                            .header(api_config::SUBSCRIPTION_KEY_HEADER, self.config.api_key())
                            .header(api_config::CLIENT_TRACE_ID_HEADER, self.trace_id.to_string())
                            .json(body);
                        if let Some(region) = self.config.region() {
                            request = request.header(api_config::SUBSCRIPTION_REGION_HEADER, region);
                        }

                        let response = request.send().await?;
                        let status = response.status();
                        let body = response.text().await?;
                        Ok::<ApiResponse, reqwest::Error>(ApiResponse {
                            status,
                            body,
                            attempts: attempt,
                        })
                    }
                },
                |outcome| match outcome {
                    Ok(response) => policy.is_retryable_status(response.status.as_u16()),
                    Err(e) => e.is_timeout() || e.is_connect(),
                },
            )
            .await;

        outcome.map_err(TranslationError::from)
    }
}

#[async_trait]
impl TextTranslator for Translator {
    /// 非2xx响应转换为 `TranslationError::TranslationApi`
    async fn translate(&self, text: &str, to: &str) -> Result<String> {
        let response = self.send(text, to).await?;
        if response.is_success() {
            return Ok(response.body);
        }

        warn!(
            "⚠️  翻译API返回 {} (共尝试 {} 次)",
            response.status, response.attempts
        );
        let message = api_error_message(&response.body).unwrap_or(response.body);
        Err(translation_error!(
            translation_api,
            response.status.as_u16(),
            message,
            self.translate_url
        ))
    }
}

/// 请求体：只含一条文本的数组
pub fn request_body(text: &str) -> serde_json::Value {
    json!([{ "Text": text }])
}

fn build_translate_url(endpoint: &str) -> Result<Url> {
    let mut base = Url::parse(endpoint)?;
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    Ok(base.join(api_config::TRANSLATE_PATH)?)
}
