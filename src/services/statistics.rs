//! 统计服务 - 业务能力层

use crate::error::{AppResult, ParseError};
use crate::models::RunResult;

/// 一组分数的汇总统计
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub minimum: f64,
    pub maximum: f64,
    pub mean: f64,
    /// 总体标准差：sqrt(sum((x - mean)^2) / n)
    pub std_dev: f64,
    /// 100 * std_dev / mean；mean 为 0 时无定义，返回 None
    pub std_dev_percent: Option<f64>,
}

/// 计算最小值、最大值、平均值、总体标准差和相对标准差
pub fn aggregate(scores: &[f64]) -> AppResult<Summary> {
    if scores.is_empty() {
        return Err(ParseError::NoScores.into());
    }

    let n = scores.len() as f64;
    let mean = scores.iter().sum::<f64>() / n;
    let minimum = scores.iter().copied().fold(f64::INFINITY, f64::min);
    let maximum = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let variance = scores.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
    let std_dev = variance.sqrt();

    let std_dev_percent = if mean == 0.0 {
        None
    } else {
        Some(100.0 * std_dev / mean)
    };

    Ok(Summary {
        minimum,
        maximum,
        mean,
        std_dev,
        std_dev_percent,
    })
}

/// 将一个线程组的分数汇总为 RunResult
pub fn summarize_group(thread_count: u32, scores: Vec<f64>) -> AppResult<RunResult> {
    let summary = aggregate(&scores)?;
    Ok(RunResult {
        thread_count,
        scores,
        average: summary.mean,
        minimum: summary.minimum,
        maximum: summary.maximum,
        std_dev: summary.std_dev,
        std_dev_percent: summary.std_dev_percent,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn test_aggregate_ten_twenty_thirty() {
        let s = aggregate(&[10.0, 20.0, 30.0]).unwrap();
        assert_eq!(s.mean, 20.0);
        assert_eq!(s.minimum, 10.0);
        assert_eq!(s.maximum, 30.0);
        assert!(approx(s.std_dev, 8.165), "std_dev = {}", s.std_dev);
        assert!(approx(s.std_dev_percent.unwrap(), 40.825));
    }

    #[test]
    fn test_aggregate_repeated_value_has_zero_deviation() {
        let s = aggregate(&[7.5, 7.5, 7.5]).unwrap();
        assert_eq!(s.std_dev, 0.0);
        assert_eq!(s.std_dev_percent, Some(0.0));
    }

    #[test]
    fn test_aggregate_population_not_sample() {
        // 样本标准差为 sqrt(2) ≈ 1.414，总体标准差为 1
        let s = aggregate(&[1.0, 3.0]).unwrap();
        assert_eq!(s.std_dev, 1.0);
    }

    #[test]
    fn test_aggregate_zero_mean() {
        let s = aggregate(&[-5.0, 5.0]).unwrap();
        assert_eq!(s.mean, 0.0);
        assert_eq!(s.std_dev, 5.0);
        assert_eq!(s.std_dev_percent, None);
    }

    #[test]
    fn test_aggregate_empty_is_error() {
        let err = aggregate(&[]).unwrap_err();
        assert!(matches!(err, AppError::Parse(ParseError::NoScores)));
        assert_eq!(err.exit_code(), 5);
    }

    #[test]
    fn test_mean_is_plain_sum_over_n() {
        // 累加误差让 sum/n 略大于 0.1，平均值照原样报告
        let scores = [0.1; 17];
        let s = aggregate(&scores).unwrap();
        assert_eq!(s.mean, scores.iter().sum::<f64>() / 17.0);
        assert!(s.mean > s.maximum);
    }

    #[test]
    fn test_min_le_mean_le_max() {
        let inputs: [&[f64]; 5] = [
            &[1.0],
            &[0.1, 0.2, 0.3],
            &[1e9, 1.0, 3.5, -2.0],
            &[0.5; 17],
            &[512.34, 498.2, 530.0, 505.5],
        ];
        for scores in inputs {
            let s = aggregate(scores).unwrap();
            assert!(s.minimum <= s.mean && s.mean <= s.maximum, "{:?}", scores);
        }
    }

    #[test]
    fn test_summarize_group_keeps_scores() {
        let result = summarize_group(4, vec![100.0, 200.0]).unwrap();
        assert_eq!(result.thread_count, 4);
        assert_eq!(result.scores, vec![100.0, 200.0]);
        assert_eq!(result.average, 150.0);
        assert_eq!(result.std_dev, 50.0);
    }
}
