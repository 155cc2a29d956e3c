//! 配置管理模块
//!
//! 提供CLI参数解析和翻译客户端配置管理功能

// 标准库导入
use std::path::PathBuf;
use std::time::Duration;

// 第三方crate导入
use clap::Parser;

// 本地模块导入
use crate::api_constants::{api_config, is_valid_api_url, service_config};
use crate::error::Result;
use crate::retry::RetryPolicy;
use crate::translation_error;

/// 翻译客户端配置结构体
///
/// 支持Builder模式进行链式配置。
///
/// # Examples
///
/// ```rust
/// use mstranslator::config::TranslatorConfig;
///
/// let config = TranslatorConfig::new("my-key")
///     .with_endpoint("http://localhost:8080")
///     .with_region("japaneast")
///     .with_timeout_secs(10);
/// assert_eq!(config.endpoint(), "http://localhost:8080");
/// ```
#[derive(Debug, Clone)]
pub struct TranslatorConfig {
    /// 订阅密钥
    api_key: String,
    /// 翻译服务地址
    endpoint: String,
    /// Azure资源区域（可选）
    region: Option<String>,
    /// 单次请求超时
    timeout: Duration,
    /// 重试策略
    retry: RetryPolicy,
}

impl TranslatorConfig {
    /// 创建新的配置实例
    ///
    /// 默认值：
    /// - 服务地址: `https://api.cognitive.microsofttranslator.com`
    /// - 超时: 30秒
    /// - 重试: 最多5次尝试，退避系数1秒
    pub fn new(api_key: &str) -> Self {
        Self {
            api_key: api_key.to_string(),
            endpoint: api_config::DEFAULT_ENDPOINT.to_string(),
            region: None,
            timeout: Duration::from_secs(service_config::REQUEST_TIMEOUT_SECONDS),
            retry: RetryPolicy::default(),
        }
    }

    /// 根据命令行参数构建配置
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let api_key = cli
            .api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                translation_error!(
                    config,
                    "api_key",
                    format!("未提供API密钥，请使用 --api-key 或环境变量 {}", api_config::API_KEY_ENV)
                )
            })?;

        if !is_valid_api_url(&cli.endpoint) {
            return Err(translation_error!(config, "endpoint", format!("无效的服务地址: {}", cli.endpoint)));
        }

        if !cli.backoff_factor.is_finite() || cli.backoff_factor < 0.0 {
            return Err(translation_error!(config, "backoff_factor", "退避系数必须为非负数"));
        }

        let retry = RetryPolicy::new()
            .with_max_attempts(cli.max_attempts)
            .with_backoff_factor(Duration::from_secs_f64(cli.backoff_factor));

        let mut config = Self::new(api_key)
            .with_endpoint(&cli.endpoint)
            .with_timeout_secs(cli.timeout)
            .with_retry_policy(retry);
        if let Some(region) = &cli.region {
            config = config.with_region(region);
        }
        Ok(config)
    }

    /// 获取API密钥
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// 获取服务地址
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// 获取资源区域
    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    /// 获取单次请求超时
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// 获取重试策略
    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    /// 设置服务地址
    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = endpoint.to_string();
        self
    }

    /// 设置资源区域
    pub fn with_region(mut self, region: &str) -> Self {
        self.region = Some(region.to_string());
        self
    }

    /// 设置单次请求超时（秒）
    pub fn with_timeout_secs(mut self, seconds: u64) -> Self {
        self.timeout = Duration::from_secs(seconds);
        self
    }

    /// 设置重试策略
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }
}

/// CLI参数结构
#[derive(Parser, Debug)]
#[command(author, version, about = "Microsoft Translator 命令行工具 - 支持单条文本与Excel批量翻译", long_about = None)]
pub struct Cli {
    /// 目标语言代码 (如: en, ja, zh-Hans)
    #[arg(short = 't', long = "to", default_value = service_config::DEFAULT_TARGET_LANG)]
    pub to: String,

    /// Microsoft Azure 翻译服务的API密钥
    #[arg(short = 'k', long, env = api_config::API_KEY_ENV, hide_env_values = true)]
    pub api_key: Option<String>,

    /// 需要翻译的字符串
    #[arg(short, long, value_name = "TEXT", conflicts_with = "file")]
    pub string: Option<String>,

    /// 需要批量翻译的Excel文件 (包含名为 data 的工作表)
    #[arg(short, long, value_name = "XLSX")]
    pub file: Option<PathBuf>,

    /// 输出文件路径 (可选，默认为 输入文件名_translated.扩展名)
    #[arg(short, long, value_name = "FILE", requires = "file", conflicts_with = "string")]
    pub output: Option<PathBuf>,

    /// Azure资源区域 (多服务或区域资源需要)
    #[arg(long)]
    pub region: Option<String>,

    /// 翻译服务地址
    #[arg(long, default_value = api_config::DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// 最大尝试次数 (含首次请求)
    #[arg(long, default_value = "5")]
    pub max_attempts: u32,

    /// 退避系数 (秒)，第n次失败后等待 factor * 2^(n-1) 秒
    #[arg(long, default_value = "1.0")]
    pub backoff_factor: f64,

    /// 单次请求超时时间 (秒)
    #[arg(long, default_value = "30")]
    pub timeout: u64,

    /// 详细输出模式
    #[arg(short, long)]
    pub verbose: bool,

    /// 静默模式 (仅输出错误)
    #[arg(short, long)]
    pub quiet: bool,

    /// 显示批量翻译统计
    #[arg(long)]
    pub stats: bool,
}
