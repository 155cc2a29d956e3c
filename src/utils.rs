use std::path::{Path, PathBuf};

use tracing::warn;

use crate::api_constants::batch_config;
use crate::config::Cli;
use crate::error::Result;
use crate::translation_error;

/// 输入源类型枚举
#[derive(Debug, Clone, PartialEq)]
pub enum InputSource {
    /// 单条字符串
    Text(String),
    /// Excel文件路径
    File(PathBuf),
}

/// 初始化日志系统
///
/// 日志输出到标准输出，包含时间戳
pub fn init_logging(verbose: bool, quiet: bool) {
    let level = if quiet {
        tracing::Level::ERROR
    } else if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();
}

/// 根据命令行参数确定输入源
///
/// 字符串与文件都未提供时返回配置错误，此时不会发起任何网络请求
pub fn resolve_input(cli: &Cli) -> Result<InputSource> {
    if let Some(text) = &cli.string {
        return Ok(InputSource::Text(text.clone()));
    }

    if let Some(path) = &cli.file {
        validate_input_file(path)?;
        return Ok(InputSource::File(path.clone()));
    }

    Err(translation_error!(config, "input", "请使用 --string 指定字符串或使用 --file 指定Excel文件"))
}

/// 验证输入文件
pub fn validate_input_file(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(translation_error!(input_validation, path.display(), "输入文件不存在"));
    }

    if !path.is_file() {
        return Err(translation_error!(input_validation, path.display(), "输入路径不是文件"));
    }

    if let Some(ext) = path.extension() {
        if ext != "xlsx" && ext != "xlsm" {
            warn!("⚠️  文件扩展名不是xlsx: {}", ext.to_string_lossy());
        }
    }

    Ok(())
}

/// 生成输出文件路径
pub fn generate_output_path(input: &Path, output: &Option<PathBuf>) -> PathBuf {
    if let Some(output_path) = output {
        return output_path.clone();
    }

    // 自动生成输出路径: input_translated.xlsx
    let stem = input.file_stem().unwrap_or_default();
    let output_name = match input.extension() {
        Some(extension) => format!(
            "{}{}.{}",
            stem.to_string_lossy(),
            batch_config::OUTPUT_SUFFIX,
            extension.to_string_lossy()
        ),
        None => format!("{}{}", stem.to_string_lossy(), batch_config::OUTPUT_SUFFIX),
    };

    if let Some(parent) = input.parent() {
        parent.join(output_name)
    } else {
        PathBuf::from(output_name)
    }
}
