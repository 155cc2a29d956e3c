//! mstranslator - Microsoft Translator 命令行工具库
//!
//! 这个库提供了带重试退避的翻译客户端、响应解析和基于Excel的批量翻译功能。

pub mod api_constants;
pub mod batch;
pub mod config;
pub mod error;
pub mod response;
pub mod retry;
pub mod spreadsheet;
pub mod stats;
pub mod translator;
pub mod utils;

pub use batch::{translate_rows, translate_workbook, BatchReport, RowFailure, RowOutcome, RowTable};
pub use config::{Cli, TranslatorConfig};
pub use error::{Result, TranslationError};
pub use response::{parse_reply, TranslationReply};
pub use retry::RetryPolicy;
pub use translator::{ApiResponse, TextTranslator, Translator};
