//! 统一错误处理模块
//!
//! 提供mstranslator项目的统一错误类型定义和处理机制

// 标准库导入
use std::fmt;

// 第三方crate导入
use anyhow::Error as AnyhowError;

/// mstranslator 统一错误类型
///
/// 定义了项目中可能出现的所有错误类型，提供统一的错误处理接口
#[derive(Debug)]
pub enum TranslationError {
    /// 网络请求相关错误（超时、连接失败等，重试耗尽后返回）
    Network {
        /// 错误消息
        message: String,
        /// HTTP状态码（如果适用）
        status_code: Option<u16>,
    },

    /// 翻译API返回非2xx状态
    TranslationApi {
        /// API响应状态码
        status_code: u16,
        /// 错误消息（响应体或解析后的错误信息）
        message: String,
        /// API地址
        api_url: String,
    },

    /// Excel文件操作相关错误
    Spreadsheet {
        /// 文件路径
        path: String,
        /// 操作类型（读取、写入等）
        operation: String,
        /// 底层错误信息
        source: String,
    },

    /// 配置相关错误
    Configuration {
        /// 配置项名称
        field: String,
        /// 错误原因
        reason: String,
    },

    /// 输入验证错误
    InputValidation {
        /// 输入值
        input: String,
        /// 验证失败原因
        reason: String,
    },

    /// 内部处理错误（包装anyhow::Error）
    Internal {
        /// 包装的错误
        source: AnyhowError,
    },
}

impl TranslationError {
    /// 是否为配置类错误（此类错误发生在任何网络请求之前）
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            TranslationError::Configuration { .. } | TranslationError::InputValidation { .. }
        )
    }
}

impl fmt::Display for TranslationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TranslationError::Network { message, status_code } => {
                if let Some(code) = status_code {
                    write!(f, "网络请求失败 [{}]: {}", code, message)
                } else {
                    write!(f, "网络请求失败: {}", message)
                }
            }
            TranslationError::TranslationApi { status_code, message, api_url } => {
                write!(f, "翻译API错误 [{}] {}: {}", status_code, api_url, message)
            }
            TranslationError::Spreadsheet { path, operation, source } => {
                write!(f, "Excel{}操作失败 [{}]: {}", operation, path, source)
            }
            TranslationError::Configuration { field, reason } => {
                write!(f, "配置错误 [{}]: {}", field, reason)
            }
            TranslationError::InputValidation { input, reason } => {
                write!(f, "输入验证失败 [{}]: {}", input, reason)
            }
            TranslationError::Internal { source } => {
                write!(f, "内部处理错误: {}", source)
            }
        }
    }
}

impl std::error::Error for TranslationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TranslationError::Internal { source } => Some(source.as_ref()),
            _ => None,
        }
    }
}

/// mstranslator 结果类型别名
pub type Result<T> = std::result::Result<T, TranslationError>;

/// 便捷的错误创建宏
#[macro_export]
macro_rules! translation_error {
    (network, $msg:expr) => {
        $crate::error::TranslationError::Network {
            message: $msg.to_string(),
            status_code: None,
        }
    };
    (translation_api, $code:expr, $msg:expr, $url:expr) => {
        $crate::error::TranslationError::TranslationApi {
            status_code: $code,
            message: $msg.to_string(),
            api_url: $url.to_string(),
        }
    };
    (spreadsheet, $path:expr, $op:expr, $source:expr) => {
        $crate::error::TranslationError::Spreadsheet {
            path: $path.to_string(),
            operation: $op.to_string(),
            source: $source.to_string(),
        }
    };
    (config, $field:expr, $reason:expr) => {
        $crate::error::TranslationError::Configuration {
            field: $field.to_string(),
            reason: $reason.to_string(),
        }
    };
    (input_validation, $input:expr, $reason:expr) => {
        $crate::error::TranslationError::InputValidation {
            input: $input.to_string(),
            reason: $reason.to_string(),
        }
    };
}

/// 从anyhow::Error转换为TranslationError
impl From<AnyhowError> for TranslationError {
    fn from(error: AnyhowError) -> Self {
        TranslationError::Internal { source: error }
    }
}

/// 从reqwest::Error转换为TranslationError
impl From<reqwest::Error> for TranslationError {
    fn from(error: reqwest::Error) -> Self {
        let status_code = error.status().map(|s| s.as_u16());
        TranslationError::Network {
            message: error.to_string(),
            status_code,
        }
    }
}

/// 从url::ParseError转换为TranslationError
impl From<url::ParseError> for TranslationError {
    fn from(error: url::ParseError) -> Self {
        TranslationError::Configuration {
            field: "endpoint".to_string(),
            reason: error.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TranslationError::Network {
            message: "Connection failed".to_string(),
            status_code: Some(503),
        };

        assert_eq!(format!("{}", err), "网络请求失败 [503]: Connection failed");

        let err = translation_error!(config, "input", "未提供待翻译的字符串或文件");
        assert_eq!(format!("{}", err), "配置错误 [input]: 未提供待翻译的字符串或文件");
    }

    #[test]
    fn test_error_macro() {
        let err = translation_error!(translation_api, 401, "Unauthorized", "https://api.example.com");
        match err {
            TranslationError::TranslationApi { status_code, message, api_url } => {
                assert_eq!(status_code, 401);
                assert_eq!(message, "Unauthorized");
                assert_eq!(api_url, "https://api.example.com");
            }
            _ => panic!("Wrong error type"),
        }
    }

    #[test]
    fn test_configuration_classification() {
        assert!(translation_error!(config, "api_key", "缺失").is_configuration());
        assert!(translation_error!(input_validation, "a.txt", "不存在").is_configuration());
        assert!(!translation_error!(network, "timeout").is_configuration());
        assert!(!translation_error!(spreadsheet, "a.xlsx", "读取", "zip error").is_configuration());
    }

    #[test]
    fn test_url_parse_conversion() {
        let parse_err = url::Url::parse("not a url").unwrap_err();
        let err: TranslationError = parse_err.into();
        assert!(matches!(err, TranslationError::Configuration { ref field, .. } if field == "endpoint"));
    }

    #[test]
    fn test_anyhow_conversion() {
        let anyhow_err = anyhow::anyhow!("Test anyhow error");
        let translation_err: TranslationError = anyhow_err.into();

        match translation_err {
            TranslationError::Internal { .. } => {}
            _ => panic!("Wrong error type"),
        }
    }
}
