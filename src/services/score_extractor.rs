//! 分数提取服务 - 业务能力层
//!
//! 只负责从跑分程序的原始输出里抠出 `Values: {<score>}` 中的分数

use crate::error::{AppResult, ParseError};
use regex::Regex;
use std::sync::OnceLock;
use tracing::debug;

/// 错误信息里保留的输出尾部长度
const EXCERPT_LEN: usize = 200;

fn score_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"Values: \{([^}]*)\}").expect("score regex"))
}

/// 从原始输出中提取分数
///
/// 匹配区分大小写，花括号为字面量；只取第一个匹配。
/// `NaN` / `inf` 这类非有限值同样视为无法解析。
/// 找不到或无法解析为数字都视为致命错误，不做重试。
pub fn extract_score(raw_output: &str) -> AppResult<f64> {
    let captures = score_regex()
        .captures(raw_output)
        .ok_or_else(|| ParseError::ScoreNotFound {
            excerpt: excerpt(raw_output),
        })?;

    let raw = captures[1].trim();
    let score = raw
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ParseError::InvalidScore {
            raw: raw.to_string(),
        })?;

    debug!("从输出中提取到分数: {}", score);
    Ok(score)
}

/// 截取输出末尾用于日志
fn excerpt(text: &str) -> String {
    let trimmed = text.trim();
    let count = trimmed.chars().count();
    if count > EXCERPT_LEN {
        let tail: String = trimmed.chars().skip(count - EXCERPT_LEN).collect();
        format!("...{}", tail)
    } else {
        trimmed.to_string()
    }
}
