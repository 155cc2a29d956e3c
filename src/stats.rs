use std::time::Duration;

use crate::batch::BatchReport;

/// 批量翻译统计结构
#[derive(Debug, Default)]
pub struct BatchStats {
    pub read_and_translate_time: Duration,
    pub rows_total: usize,
    pub rows_translated: usize,
    pub rows_skipped: usize,
    pub rows_failed: usize,
}

impl BatchStats {
    /// 从批量结果汇总统计
    pub fn from_report(report: &BatchReport, elapsed: Duration) -> Self {
        Self {
            read_and_translate_time: elapsed,
            rows_total: report.outcomes.len(),
            rows_translated: report.translated(),
            rows_skipped: report.skipped(),
            rows_failed: report.failed(),
        }
    }

    /// 成功率（不计跳过的行）
    pub fn success_rate(&self) -> f64 {
        let attempted = self.rows_translated + self.rows_failed;
        if attempted == 0 {
            return 0.0;
        }
        self.rows_translated as f64 / attempted as f64 * 100.0
    }
}

/// 打印批量翻译统计
pub fn print_batch_stats(stats: &BatchStats) {
    println!("\n📊 批量翻译统计报告:");
    println!("═══════════════════════════════════════");

    println!("🔤 行统计:");
    println!("   数据行: {} 行", stats.rows_total);
    println!("   翻译成功: {} 行", stats.rows_translated);
    println!("   原文为空: {} 行", stats.rows_skipped);
    println!("   翻译失败: {} 行", stats.rows_failed);
    println!("   成功率: {:.1}%", stats.success_rate());

    println!("\n⏱️  耗时: {}", format_duration(stats.read_and_translate_time));
    if stats.rows_translated > 0 {
        let per_row = stats.read_and_translate_time / stats.rows_translated as u32;
        println!("   平均每行: {}", format_duration(per_row));
    }
}

/// 格式化持续时间
pub fn format_duration(duration: Duration) -> String {
    let millis = duration.as_millis();
    if millis < 1000 {
        format!("{}ms", millis)
    } else {
        format!("{:.3}s", duration.as_secs_f64())
    }
}
