/// 翻译API配置常量
///
/// 该文件定义了Microsoft Translator服务相关的常量配置，方便统一管理和维护

/// 默认翻译API配置
pub mod api_config {
    /// 默认翻译服务地址
    pub const DEFAULT_ENDPOINT: &str = "https://api.cognitive.microsofttranslator.com";

    /// 翻译接口路径
    pub const TRANSLATE_PATH: &str = "translate";

    /// API版本
    pub const API_VERSION: &str = "3.0";

    /// 订阅密钥请求头
    pub const SUBSCRIPTION_KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";

    /// 资源区域请求头
    pub const SUBSCRIPTION_REGION_HEADER: &str = "Ocp-Apim-Subscription-Region";

    /// 客户端追踪ID请求头
    pub const CLIENT_TRACE_ID_HEADER: &str = "X-ClientTraceId";

    /// API密钥环境变量
    pub const API_KEY_ENV: &str = "MSTRANSLATOR_API_KEY";
}

/// 翻译服务配置
pub mod service_config {
    /// 默认目标语言
    pub const DEFAULT_TARGET_LANG: &str = "en";

    /// 请求超时时间（秒）
    pub const REQUEST_TIMEOUT_SECONDS: u64 = 30;
}

/// 重试策略配置
pub mod retry_config {
    /// 最大尝试次数（含首次请求）
    pub const MAX_ATTEMPTS: u32 = 5;

    /// 退避系数（秒）
    pub const BACKOFF_FACTOR_SECONDS: f64 = 1.0;

    /// 单次退避上限（秒）
    pub const MAX_BACKOFF_SECONDS: u64 = 120;

    /// 需要重试的HTTP状态码
    pub const RETRY_STATUS_CODES: &[u16] = &[500, 502, 503, 504];
}

/// 批量翻译配置
pub mod batch_config {
    /// 工作表名称
    pub const SHEET_NAME: &str = "data";

    /// 表头所在行（始终跳过）
    pub const HEADER_ROW: u32 = 1;

    /// ID列 (A)
    pub const ID_COLUMN: u32 = 1;

    /// 原文列 (B)
    pub const SOURCE_COLUMN: u32 = 2;

    /// 译文列 (C)
    pub const TARGET_COLUMN: u32 = 3;

    /// 输出文件名后缀
    pub const OUTPUT_SUFFIX: &str = "_translated";
}

/// 退出码
pub mod exit_codes {
    /// 运行期失败
    pub const RUNTIME_FAILURE: i32 = 1;

    /// 配置错误（未发起任何网络请求）
    pub const CONFIG_ERROR: i32 = 2;
}

/// 验证API地址是否有效
pub fn is_valid_api_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}
