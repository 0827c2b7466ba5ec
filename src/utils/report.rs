use crate::models::BenchmarkReport;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::info;

/// 将报告序列化为 JSON
pub fn to_json(report: &BenchmarkReport) -> Result<String> {
    serde_json::to_string_pretty(report).context("无法序列化跑分报告")
}

/// 输出报告
///
/// # 参数
/// - `report`: 跑分报告
/// - `output_file`: 可选的结果文件，写入与 stdout 相同的 JSON
pub fn emit_report(report: &BenchmarkReport, output_file: Option<&Path>) -> Result<()> {
    let json = to_json(report)?;
    println!("{}", json);

    if let Some(path) = output_file {
        fs::write(path, format!("{}\n", json))
            .with_context(|| format!("无法写入结果文件: {}", path.display()))?;
        info!("\n结果已保存至: {}", path.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ResultSet;
    use crate::services::summarize_group;
    use chrono::Local;

    #[test]
    fn test_emit_report_writes_file() {
        let mut results = ResultSet::new();
        results.push(summarize_group(8, vec![10.0, 20.0, 30.0]).unwrap());
        let report = BenchmarkReport {
            started_at: Local::now(),
            finished_at: Local::now(),
            runs_per_group: 3,
            cooldown_seconds: 0,
            idle_wait_seconds: 0,
            executable: "cpu-stress".to_string(),
            results,
        };

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("result.json");
        emit_report(&report, Some(&path)).unwrap();

        let written: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written["runs_per_group"], 3);
        assert_eq!(written["results"][0]["thread_count"], 8);
        assert_eq!(written["results"][0]["average"], 20.0);
        assert_eq!(written["results"][0]["std_dev_percent"], "40.82%");
    }
}
