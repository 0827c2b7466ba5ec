use crate::error::{AppResult, ConfigError};
use crate::infrastructure::compile_prefs_glob;
use crate::services::config_patcher::thread_count_byte;
use clap::Parser;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// 默认的跑分参数
pub const DEFAULT_BENCHMARK_ARG: &str = "--benchmark";
/// 默认的偏好文件搜索模式（相对于应用数据目录）
pub const DEFAULT_PREFS_GLOB: &str = "Maxon/Cinebench*/prefs/*.prefs";

#[cfg(windows)]
const DEFAULT_EXECUTABLE_NAME: &str = "cpu-stress.exe";
#[cfg(not(windows))]
const DEFAULT_EXECUTABLE_NAME: &str = "cpu-stress";

/// 命令行参数，每一项也可以用 `THREADBENCH_*` 环境变量给出
#[derive(Parser, Debug, Default)]
#[command(name = "threadbench", version, about = "按线程数循环跑 CPU 压力测试并统计分数")]
pub struct Cli {
    /// 每个线程组的运行次数 (1-100)
    #[arg(long, env = "THREADBENCH_RUNS")]
    pub runs: Option<u32>,

    /// 线程组，逗号分隔，例如 16,8,1（默认：逻辑核心数）
    #[arg(long, env = "THREADBENCH_THREADS", value_delimiter = ',')]
    pub threads: Option<Vec<u32>>,

    /// 每次运行前的冷却时间，秒 (0-600)
    #[arg(long, env = "THREADBENCH_COOLDOWN")]
    pub cooldown: Option<u64>,

    /// 第一次运行前的空闲等待时间，秒 (0-1200)
    #[arg(long, env = "THREADBENCH_IDLE_WAIT")]
    pub idle_wait: Option<u64>,

    /// 跑分程序路径（默认：与本程序同目录）
    #[arg(long = "exe", env = "THREADBENCH_EXE")]
    pub exe_path: Option<PathBuf>,

    /// 传给跑分程序的参数
    #[arg(long, env = "THREADBENCH_BENCH_ARG")]
    pub bench_arg: Option<String>,

    /// 偏好文件路径（指定后不再搜索）
    #[arg(long = "prefs", env = "THREADBENCH_PREFS")]
    pub prefs_path: Option<PathBuf>,

    /// 偏好文件搜索根目录（默认：用户应用数据目录）
    #[arg(long, env = "THREADBENCH_PREFS_ROOT")]
    pub prefs_root: Option<PathBuf>,

    /// 偏好文件搜索模式
    #[arg(long, env = "THREADBENCH_PREFS_GLOB")]
    pub prefs_glob: Option<String>,

    /// 额外把 JSON 结果写入该文件
    #[arg(long, env = "THREADBENCH_OUTPUT")]
    pub output: Option<PathBuf>,

    /// TOML 配置文件
    #[arg(long, env = "THREADBENCH_CONFIG")]
    pub config: Option<PathBuf>,

    /// 显示详细日志
    #[arg(short, long, env = "THREADBENCH_VERBOSE")]
    pub verbose: bool,
}

/// TOML 配置文件，字段与命令行一致，全部可选
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "snake_case", deny_unknown_fields)]
pub struct FileConfig {
    pub runs: Option<u32>,
    pub threads: Option<Vec<u32>>,
    pub cooldown: Option<u64>,
    pub idle_wait: Option<u64>,
    pub exe: Option<PathBuf>,
    pub bench_arg: Option<String>,
    pub prefs: Option<PathBuf>,
    pub prefs_root: Option<PathBuf>,
    pub prefs_glob: Option<String>,
    pub output: Option<PathBuf>,
    pub verbose: Option<bool>,
}

impl FileConfig {
    /// 读取并解析 TOML 配置文件
    pub fn load(path: &Path) -> AppResult<Self> {
        let invalid = |message: String| ConfigError::FileParseFailed {
            path: path.display().to_string(),
            message,
        };
        let content = std::fs::read_to_string(path).map_err(|e| invalid(e.to_string()))?;
        Ok(toml::from_str::<Self>(&content).map_err(|e| invalid(e.to_string()))?)
    }
}

/// 偏好文件位置
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PreferenceLocation {
    /// 明确指定的路径
    Explicit(PathBuf),
    /// 在 root 下按模式搜索
    Search { root: PathBuf, pattern: String },
}

/// 运行配置，校验通过后不再修改
#[derive(Clone, Debug)]
pub struct RunConfig {
    /// 每个线程组的运行次数
    pub runs_per_group: u32,
    /// 线程组（输入顺序，允许重复）
    pub thread_groups: Vec<u32>,
    /// 冷却时间（秒）
    pub cooldown_seconds: u64,
    /// 空闲等待时间（秒）
    pub idle_wait_seconds: u64,
    /// 跑分程序路径
    pub executable_path: PathBuf,
    /// 跑分参数
    pub benchmark_arg: String,
    /// 偏好文件位置
    pub preferences: PreferenceLocation,
    /// 结果输出文件
    pub output_file: Option<PathBuf>,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            runs_per_group: 3,
            thread_groups: vec![logical_core_count()],
            cooldown_seconds: 120,
            idle_wait_seconds: 0,
            executable_path: default_executable_path(),
            benchmark_arg: DEFAULT_BENCHMARK_ARG.to_string(),
            preferences: PreferenceLocation::Search {
                root: dirs::config_dir().unwrap_or_default(),
                pattern: DEFAULT_PREFS_GLOB.to_string(),
            },
            output_file: None,
            verbose_logging: false,
        }
    }
}

impl RunConfig {
    /// 合并默认值、配置文件和命令行（命令行优先），然后校验
    pub fn resolve(cli: Cli) -> AppResult<Self> {
        let file = match &cli.config {
            Some(path) => FileConfig::load(path)?,
            None => FileConfig::default(),
        };

        let mut config = Self::default();

        if let Some(v) = cli.runs.or(file.runs) {
            config.runs_per_group = v;
        }
        if let Some(v) = cli.threads.or(file.threads) {
            config.thread_groups = v;
        }
        if let Some(v) = cli.cooldown.or(file.cooldown) {
            config.cooldown_seconds = v;
        }
        if let Some(v) = cli.idle_wait.or(file.idle_wait) {
            config.idle_wait_seconds = v;
        }
        if let Some(v) = cli.exe_path.or(file.exe) {
            config.executable_path = v;
        }
        if let Some(v) = cli.bench_arg.or(file.bench_arg) {
            config.benchmark_arg = v;
        }
        config.output_file = cli.output.or(file.output);
        config.verbose_logging = cli.verbose || file.verbose.unwrap_or(false);

        config.preferences = match cli.prefs_path.or(file.prefs) {
            Some(path) => PreferenceLocation::Explicit(path),
            None => {
                let (default_root, default_pattern) = match config.preferences {
                    PreferenceLocation::Search { root, pattern } => (root, pattern),
                    PreferenceLocation::Explicit(_) => {
                        (PathBuf::new(), DEFAULT_PREFS_GLOB.to_string())
                    }
                };
                PreferenceLocation::Search {
                    root: cli.prefs_root.or(file.prefs_root).unwrap_or(default_root),
                    pattern: cli.prefs_glob.or(file.prefs_glob).unwrap_or(default_pattern),
                }
            }
        };

        config.validate()?;
        Ok(config)
    }

    /// 校验参数范围，不产生任何副作用
    pub fn validate(&self) -> AppResult<()> {
        if !(1..=100).contains(&self.runs_per_group) {
            return Err(ConfigError::RunsOutOfRange {
                value: self.runs_per_group,
            }
            .into());
        }
        if self.cooldown_seconds > 600 {
            return Err(ConfigError::CooldownOutOfRange {
                value: self.cooldown_seconds,
            }
            .into());
        }
        if self.idle_wait_seconds > 1200 {
            return Err(ConfigError::IdleWaitOutOfRange {
                value: self.idle_wait_seconds,
            }
            .into());
        }
        if self.thread_groups.is_empty() {
            return Err(ConfigError::NoThreadGroups.into());
        }
        for &count in &self.thread_groups {
            thread_count_byte(count)?;
        }
        if let PreferenceLocation::Search { pattern, .. } = &self.preferences {
            compile_prefs_glob(pattern)?;
        }
        Ok(())
    }

    /// 执行顺序：线程数降序
    ///
    /// 高线程数发热最大，趁机器最凉的时候先跑，低线程数留到最后。
    pub fn execution_order(&self) -> Vec<u32> {
        let mut order = self.thread_groups.clone();
        order.sort_unstable_by(|a, b| b.cmp(a));
        order
    }
}

/// 逻辑核心数，超过单字节上限时取 255
fn logical_core_count() -> u32 {
    std::thread::available_parallelism()
        .map(|n| n.get() as u32)
        .unwrap_or(1)
        .min(u8::MAX as u32)
}

/// 与当前程序同目录的跑分程序
fn default_executable_path() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(DEFAULT_EXECUTABLE_NAME)))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_EXECUTABLE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    fn cli() -> Cli {
        Cli {
            prefs_path: Some(PathBuf::from("prefs.bin")),
            ..Default::default()
        }
    }

    #[test]
    fn test_defaults() {
        let config = RunConfig::resolve(cli()).unwrap();
        assert_eq!(config.runs_per_group, 3);
        assert_eq!(config.cooldown_seconds, 120);
        assert_eq!(config.idle_wait_seconds, 0);
        assert_eq!(config.thread_groups.len(), 1);
        assert!(config.thread_groups[0] >= 1);
        assert_eq!(config.benchmark_arg, DEFAULT_BENCHMARK_ARG);
        assert!(config.executable_path.ends_with(DEFAULT_EXECUTABLE_NAME));
    }

    #[test]
    fn test_execution_order_descending() {
        let config = RunConfig {
            thread_groups: vec![1, 4, 16],
            ..Default::default()
        };
        assert_eq!(config.execution_order(), vec![16, 4, 1]);

        let config = RunConfig {
            thread_groups: vec![2, 8, 2, 4],
            ..Default::default()
        };
        assert_eq!(config.execution_order(), vec![8, 4, 2, 2]);
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        let cases: Vec<Cli> = vec![
            Cli { runs: Some(0), ..cli() },
            Cli { runs: Some(101), ..cli() },
            Cli { cooldown: Some(601), ..cli() },
            Cli { idle_wait: Some(1201), ..cli() },
            Cli { threads: Some(vec![]), ..cli() },
            Cli { threads: Some(vec![8, 256]), ..cli() },
            Cli { threads: Some(vec![0]), ..cli() },
        ];
        for case in cases {
            let err = RunConfig::resolve(case).unwrap_err();
            assert!(matches!(err, AppError::Config(_)), "{err}");
            assert_eq!(err.exit_code(), 2);
        }
    }

    #[test]
    fn test_malformed_prefs_glob_is_config_error() {
        let err = RunConfig::resolve(Cli {
            prefs_glob: Some("Maxon/[".to_string()),
            ..Default::default()
        })
        .unwrap_err();
        match &err {
            AppError::Config(ConfigError::InvalidPrefsGlob { pattern, .. }) => {
                assert_eq!(pattern, "Maxon/[")
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::try_parse_from([
            "threadbench",
            "--runs",
            "5",
            "--threads",
            "1,4,16",
            "--cooldown",
            "0",
            "--prefs",
            "c4d.prefs",
        ])
        .unwrap();
        let config = RunConfig::resolve(cli).unwrap();
        assert_eq!(config.runs_per_group, 5);
        assert_eq!(config.thread_groups, vec![1, 4, 16]);
        assert_eq!(config.cooldown_seconds, 0);
        assert_eq!(
            config.preferences,
            PreferenceLocation::Explicit(PathBuf::from("c4d.prefs"))
        );
    }

    #[test]
    fn test_file_config_with_cli_override() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bench.toml");
        std::fs::write(
            &path,
            "runs = 7\nthreads = [2, 4]\ncooldown = 30\nprefs_root = \"/tmp/appdata\"\n",
        )
        .unwrap();

        let config = RunConfig::resolve(Cli {
            config: Some(path),
            cooldown: Some(5),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(config.runs_per_group, 7);
        assert_eq!(config.thread_groups, vec![2, 4]);
        assert_eq!(config.cooldown_seconds, 5);
        assert_eq!(
            config.preferences,
            PreferenceLocation::Search {
                root: PathBuf::from("/tmp/appdata"),
                pattern: DEFAULT_PREFS_GLOB.to_string(),
            }
        );
    }

    #[test]
    fn test_file_config_unknown_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bench.toml");
        std::fs::write(&path, "runz = 7\n").unwrap();

        let err = RunConfig::resolve(Cli {
            config: Some(path),
            ..Default::default()
        })
        .unwrap_err();
        assert!(matches!(
            err,
            AppError::Config(ConfigError::FileParseFailed { .. })
        ));
    }
}
