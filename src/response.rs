//! 翻译响应解析模块
//!
//! 在边界处一次性校验响应结构，得到"译文"或"结构异常"两种结果之一

use serde::Deserialize;
use serde_json::Value;

/// 单条翻译
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Translation {
    pub text: String,
    pub to: String,
}

/// 单个输入文本对应的翻译结果
#[derive(Debug, Clone, Deserialize)]
pub struct TranslationResult {
    pub translations: Vec<Translation>,
}

/// 服务端错误响应体：`{"error": {"code": 401000, "message": "..."}}`
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorDetail {
    pub code: i64,
    pub message: String,
}

/// 解析后的翻译响应
#[derive(Debug, Clone, PartialEq)]
pub enum TranslationReply {
    /// 结构正确，取 `[0].translations[0]`
    Translated { text: String, to: String },
    /// 结构不符合预期
    Unexpected {
        /// 不符合预期的原因
        details: String,
        /// 原始JSON（无法解析为JSON时为None）
        raw: Option<Value>,
    },
}

/// 解析翻译API的响应体
pub fn parse_reply(body: &str) -> TranslationReply {
    let raw: Value = match serde_json::from_str(body) {
        Ok(value) => value,
        Err(e) => {
            return TranslationReply::Unexpected {
                details: format!("响应不是合法JSON: {}", e),
                raw: None,
            }
        }
    };

    let results: Vec<TranslationResult> = match Vec::<TranslationResult>::deserialize(&raw) {
        Ok(results) => results,
        Err(e) => {
            return TranslationReply::Unexpected {
                details: format!("响应结构不匹配: {}", e),
                raw: Some(raw),
            }
        }
    };

    let first = results
        .into_iter()
        .next()
        .and_then(|result| result.translations.into_iter().next());

    match first {
        Some(Translation { text, to }) => TranslationReply::Translated { text, to },
        None => TranslationReply::Unexpected {
            details: "响应中缺少 [0].translations[0]".to_string(),
            raw: Some(raw),
        },
    }
}

/// 格式化JSON以便输出；非JSON时原样返回
pub fn pretty_json(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| serde_json::to_string_pretty(&value).ok())
        .unwrap_or_else(|| body.to_string())
}

/// 从错误响应中提取 `code: message`
pub fn api_error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ApiErrorBody>(body)
        .ok()
        .map(|body| format!("{}: {}", body.error.code, body.error.message))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn translated_text(body: &str) -> Option<String> {
        match parse_reply(body) {
            TranslationReply::Translated { text, .. } => Some(text),
            TranslationReply::Unexpected { .. } => None,
        }
    }

    #[test]
    fn test_parse_well_formed_reply() {
        let body = r#"[{"detectedLanguage":{"language":"ja","score":1.0},"translations":[{"text":"Hello","to":"en"}]}]"#;
        assert_eq!(
            parse_reply(body),
            TranslationReply::Translated {
                text: "Hello".to_string(),
                to: "en".to_string()
            }
        );
    }

    #[test]
    fn test_only_first_translation_is_used() {
        let body = r#"[{"translations":[{"text":"Bonjour","to":"fr"},{"text":"Hallo","to":"de"}]}]"#;
        assert_eq!(translated_text(body).as_deref(), Some("Bonjour"));
    }

    #[test]
    fn test_missing_translations_key() {
        let body = r#"[{"detectedLanguage":{"language":"ja","score":1.0}}]"#;
        match parse_reply(body) {
            TranslationReply::Unexpected { details, raw } => {
                assert!(details.contains("translations"), "{}", details);
                assert!(raw.is_some());
            }
            other => panic!("unexpected reply: {:?}", other),
        }
    }

    #[test]
    fn test_empty_arrays_are_unexpected() {
        assert!(translated_text("[]").is_none());
        assert!(translated_text(r#"[{"translations":[]}]"#).is_none());
    }

    #[test]
    fn test_error_object_is_unexpected() {
        let body = r#"{"error":{"code":401000,"message":"The request is not authorized"}}"#;
        assert!(matches!(parse_reply(body), TranslationReply::Unexpected { raw: Some(_), .. }));
        assert_eq!(
            api_error_message(body).as_deref(),
            Some("401000: The request is not authorized")
        );
    }

    #[test]
    fn test_invalid_json() {
        match parse_reply("<html>bad gateway</html>") {
            TranslationReply::Unexpected { raw, .. } => assert!(raw.is_none()),
            other => panic!("unexpected reply: {:?}", other),
        }
        assert_eq!(pretty_json("<html>bad gateway</html>"), "<html>bad gateway</html>");
        assert_eq!(api_error_message("oops"), None);
    }

    #[test]
    fn test_pretty_json_keeps_non_ascii() {
        let pretty = pretty_json(r#"[{"translations":[{"text":"こんにちは","to":"ja"}]}]"#);
        assert!(pretty.contains("こんにちは"));
        assert!(pretty.contains('\n'));
    }
}
