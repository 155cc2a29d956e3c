//! 批量翻译驱动模块
//!
//! 此模块负责：
//! - 按文件顺序逐行调用翻译客户端（跳过表头和空原文）
//! - 为每一行产出独立的结果，单行失败不会中断整批任务
//! - 记录每行结果的日志，并把译文写回目标列

use std::path::Path;

use tracing::{debug, error, info};

use crate::api_constants::batch_config;
use crate::error::{Result, TranslationError};
use crate::response::{parse_reply, TranslationReply};
use crate::spreadsheet::{data_sheet_mut, open_workbook, save_workbook};
use crate::translator::TextTranslator;

/// 按行访问的表格
pub trait RowTable {
    /// 最后一行的行号（从1开始）
    fn last_row(&self) -> u32;

    /// 行标识（A列），仅用于日志
    fn row_id(&self, row: u32) -> String;

    /// 原文（B列），为空时返回None
    fn source_text(&self, row: u32) -> Option<String>;

    /// 写入译文（C列）
    fn write_translation(&mut self, row: u32, text: &str);
}

/// 单行失败原因
#[derive(Debug)]
pub enum RowFailure {
    /// 请求失败（网络错误或API错误状态）
    Request(TranslationError),
    /// 响应结构不符合预期
    UnexpectedShape {
        details: String,
        /// 格式化后的原始JSON
        raw_json: Option<String>,
    },
}

impl std::fmt::Display for RowFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RowFailure::Request(e) => write!(f, "{}", e),
            RowFailure::UnexpectedShape { details, .. } => write!(f, "{}", details),
        }
    }
}

/// 单行处理结果
#[derive(Debug)]
pub enum RowOutcome {
    Translated { row: u32, id: String, text: String },
    Skipped { row: u32 },
    Failed { row: u32, id: String, failure: RowFailure },
}

impl RowOutcome {
    pub fn row(&self) -> u32 {
        match self {
            RowOutcome::Translated { row, .. }
            | RowOutcome::Skipped { row }
            | RowOutcome::Failed { row, .. } => *row,
        }
    }
}

/// 整批任务的结果汇总
#[derive(Debug, Default)]
pub struct BatchReport {
    pub outcomes: Vec<RowOutcome>,
}

impl BatchReport {
    pub fn translated(&self) -> usize {
        self.count(|o| matches!(o, RowOutcome::Translated { .. }))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, RowOutcome::Skipped { .. }))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, RowOutcome::Failed { .. }))
    }

    /// 失败的行
    pub fn failures(&self) -> impl Iterator<Item = &RowOutcome> {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, RowOutcome::Failed { .. }))
    }

    fn count(&self, pred: impl Fn(&RowOutcome) -> bool) -> usize {
        self.outcomes.iter().filter(|o| pred(o)).count()
    }
}

/// 翻译单行，不修改表格
pub async fn translate_row<T>(table: &impl RowTable, translator: &T, row: u32, to: &str) -> RowOutcome
where
    T: TextTranslator + ?Sized,
{
    let Some(source) = table.source_text(row) else {
        return RowOutcome::Skipped { row };
    };
    let id = table.row_id(row);

    let body = match translator.translate(&source, to).await {
        Ok(body) => body,
        Err(e) => {
            return RowOutcome::Failed {
                row,
                id,
                failure: RowFailure::Request(e),
            }
        }
    };

    match parse_reply(&body) {
        TranslationReply::Translated { text, .. } => RowOutcome::Translated { row, id, text },
        TranslationReply::Unexpected { details, raw } => RowOutcome::Failed {
            row,
            id,
            failure: RowFailure::UnexpectedShape {
                details,
                raw_json: raw.and_then(|v| serde_json::to_string_pretty(&v).ok()),
            },
        },
    }
}

/// 逐行翻译整张表
///
/// 第1行为表头，始终跳过；失败的行保持目标列不变。
pub async fn translate_rows<T>(table: &mut impl RowTable, translator: &T, to: &str) -> BatchReport
where
    T: TextTranslator + ?Sized,
{
    let mut report = BatchReport::default();
    let first = batch_config::HEADER_ROW + 1;

    for row in first..=table.last_row() {
        let outcome = translate_row(&*table, translator, row, to).await;
        log_outcome(&outcome);
        if let RowOutcome::Translated { row, text, .. } = &outcome {
            table.write_translation(*row, text);
        }
        report.outcomes.push(outcome);
    }

    report
}

/// 翻译工作簿的 `data` 工作表并保存到 `output`
///
/// 无论是否有行失败，都会保存整个工作簿；中途被终止则不会留下任何输出。
pub async fn translate_workbook<T>(input: &Path, output: &Path, translator: &T, to: &str) -> Result<BatchReport>
where
    T: TextTranslator + ?Sized,
{
    let mut book = open_workbook(input)?;
    let sheet = data_sheet_mut(&mut book, input)?;

    info!("📊 共 {} 行数据待处理", sheet.last_row().saturating_sub(batch_config::HEADER_ROW));
    let report = translate_rows(sheet, translator, to).await;

    save_workbook(&book, output)?;
    info!(
        "💾 已保存 {} (成功 {}, 跳过 {}, 失败 {})",
        output.display(),
        report.translated(),
        report.skipped(),
        report.failed()
    );
    Ok(report)
}

fn log_outcome(outcome: &RowOutcome) {
    match outcome {
        RowOutcome::Translated { row, id, text } => {
            debug!("✅ 第 {} 行 [{}] 翻译完成: {}", row, id, text);
        }
        RowOutcome::Skipped { row } => {
            debug!("⏭️  第 {} 行原文为空，跳过", row);
        }
        RowOutcome::Failed { row, id, failure } => match failure {
            RowFailure::UnexpectedShape { raw_json: Some(raw), .. } => {
                error!("❌ 第 {} 行 [{}] 翻译失败: {}\n原始响应:\n{}", row, id, failure, raw);
            }
            _ => error!("❌ 第 {} 行 [{}] 翻译失败: {}", row, id, failure),
        },
    }
}
