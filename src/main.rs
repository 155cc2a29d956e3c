use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info, warn};

use mstranslator::api_constants::exit_codes;
use mstranslator::config::{Cli, TranslatorConfig};
use mstranslator::response::pretty_json;
use mstranslator::stats::{print_batch_stats, BatchStats};
use mstranslator::translator::Translator;
use mstranslator::utils::{generate_output_path, init_logging, resolve_input, InputSource};
use mstranslator::translate_workbook;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 初始化日志系统
    init_logging(cli.verbose, cli.quiet);

    // 输入与配置校验均在任何网络请求之前完成
    let input = exit_on_config_error(resolve_input(&cli));
    let config = exit_on_config_error(TranslatorConfig::from_cli(&cli));
    let translator = exit_on_config_error(Translator::new(config));

    let result = match input {
        InputSource::Text(text) => translate_text(&translator, &text, &cli.to).await,
        InputSource::File(path) => translate_file(&translator, &cli, &path).await,
    };

    if let Err(e) = result {
        error!("❌ 翻译失败: {:#}", e);
        std::process::exit(exit_codes::RUNTIME_FAILURE);
    }
    Ok(())
}

fn exit_on_config_error<T>(result: mstranslator::Result<T>) -> T {
    match result {
        Ok(value) => value,
        Err(e) => {
            error!("❌ {}", e);
            let code = if e.is_configuration() {
                exit_codes::CONFIG_ERROR
            } else {
                exit_codes::RUNTIME_FAILURE
            };
            std::process::exit(code);
        }
    }
}

/// 翻译单条字符串并打印格式化后的响应
async fn translate_text(translator: &Translator, text: &str, to: &str) -> Result<()> {
    let response = translator.send(text, to).await.context("发送翻译请求失败")?;

    println!("{}", pretty_json(&response.body));

    if !response.is_success() {
        anyhow::bail!(
            "翻译API返回 {} (共尝试 {} 次)",
            response.status,
            response.attempts
        );
    }
    Ok(())
}

/// 批量翻译Excel文件
async fn translate_file(translator: &Translator, cli: &Cli, input: &Path) -> Result<()> {
    let output = generate_output_path(input, &cli.output);

    info!("🚀 启动批量翻译");
    info!("📂 输入文件: {}", input.display());
    info!("📄 输出文件: {}", output.display());
    info!("🌐 目标语言: {}", cli.to);

    let started = Instant::now();
    let report = translate_workbook(input, &output, translator, &cli.to)
        .await
        .with_context(|| format!("批量翻译失败: {}", input.display()))?;
    let elapsed = started.elapsed();

    if report.failed() > 0 {
        warn!("⚠️  {} 行翻译失败，目标列保持为空", report.failed());
    }
    info!("✅ 批量翻译完成！总耗时: {:.3}秒", elapsed.as_secs_f64());

    if cli.stats || cli.verbose {
        print_batch_stats(&BatchStats::from_report(&report, elapsed));
    }
    Ok(())
}
