use chrono::{DateTime, Local};
use serde::{Serialize, Serializer};

/// 单个线程组的汇总结果
///
/// 该组所有运行完成后创建，之后不再修改。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunResult {
    pub thread_count: u32,
    /// 按运行顺序排列，长度等于每组运行次数
    pub scores: Vec<f64>,
    pub average: f64,
    pub minimum: f64,
    pub maximum: f64,
    /// 总体标准差（除以 n）
    pub std_dev: f64,
    /// 相对标准差；平均值为 0 时为 None
    #[serde(serialize_with = "serialize_percent")]
    pub std_dev_percent: Option<f64>,
}

impl RunResult {
    /// 相对标准差的显示形式，例如 `4.08%`
    pub fn std_dev_percent_display(&self) -> String {
        format_percent(self.std_dev_percent)
    }
}

/// 格式化百分比，保留两位小数；无定义时为 `n/a`
pub fn format_percent(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.2}%", v),
        None => "n/a".to_string(),
    }
}

fn serialize_percent<S: Serializer>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error> {
    match value {
        Some(v) => serializer.serialize_str(&format!("{:.2}%", v)),
        None => serializer.serialize_none(),
    }
}

/// 按执行顺序（线程数降序）排列的结果集合
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ResultSet {
    results: Vec<RunResult>,
}

impl ResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加一个已完成线程组的结果
    pub fn push(&mut self, result: RunResult) {
        self.results.push(result);
    }

    /// 按线程数查找；线程数重复时返回最先执行的那一组
    pub fn get(&self, thread_count: u32) -> Option<&RunResult> {
        self.results.iter().find(|r| r.thread_count == thread_count)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RunResult> {
        self.results.iter()
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// 执行顺序中的线程数列表
    pub fn thread_counts(&self) -> Vec<u32> {
        self.results.iter().map(|r| r.thread_count).collect()
    }
}

/// 最终输出的跑分报告
#[derive(Debug, Clone, Serialize)]
pub struct BenchmarkReport {
    pub started_at: DateTime<Local>,
    pub finished_at: DateTime<Local>,
    pub runs_per_group: u32,
    pub cooldown_seconds: u64,
    pub idle_wait_seconds: u64,
    pub executable: String,
    pub results: ResultSet,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(thread_count: u32, average: f64) -> RunResult {
        RunResult {
            thread_count,
            scores: vec![average],
            average,
            minimum: average,
            maximum: average,
            std_dev: 0.0,
            std_dev_percent: Some(0.0),
        }
    }

    #[test]
    fn test_get_returns_first_duplicate() {
        let mut set = ResultSet::new();
        set.push(sample(8, 100.0));
        set.push(sample(8, 200.0));
        set.push(sample(2, 50.0));

        assert_eq!(set.len(), 3);
        assert_eq!(set.get(8).unwrap().average, 100.0);
        assert_eq!(set.get(2).unwrap().average, 50.0);
        assert!(set.get(4).is_none());
        assert_eq!(set.thread_counts(), vec![8, 8, 2]);
    }

    #[test]
    fn test_percent_serialization() {
        let mut result = sample(4, 10.0);
        result.std_dev_percent = Some(4.0824);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["std_dev_percent"], "4.08%");

        result.std_dev_percent = None;
        let json = serde_json::to_value(&result).unwrap();
        assert!(json["std_dev_percent"].is_null());
        assert_eq!(result.std_dev_percent_display(), "n/a");
    }

    #[test]
    fn test_result_set_serializes_as_array() {
        let mut set = ResultSet::new();
        set.push(sample(16, 1.0));
        let json = serde_json::to_value(&set).unwrap();
        assert!(json.is_array());
        assert_eq!(json[0]["thread_count"], 16);
    }
}
