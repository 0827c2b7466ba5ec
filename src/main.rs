use clap::Parser;
use std::process::ExitCode;
use threadbench::utils::{emit_report, logging};
use threadbench::{App, AppError, AppResult, BenchmarkReport, Cli, RunConfig};
use tracing::error;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let cli_verbose = cli.verbose;

    // 加载配置
    let config = match RunConfig::resolve(cli) {
        Ok(config) => config,
        Err(e) => {
            logging::init(cli_verbose);
            return fail(&e);
        }
    };

    // 初始化日志
    logging::init(config.verbose_logging);

    let output_file = config.output_file.clone();

    // 初始化并运行应用
    let report = match run(config).await {
        Ok(report) => report,
        Err(e) => return fail(&e),
    };

    if let Err(e) = emit_report(&report, output_file.as_deref()) {
        error!("❌ {:#}", e);
        return ExitCode::from(6);
    }

    ExitCode::SUCCESS
}

async fn run(config: RunConfig) -> AppResult<BenchmarkReport> {
    App::initialize(config).await?.run().await
}

fn fail(e: &AppError) -> ExitCode {
    error!("❌ {}", e);
    ExitCode::from(e.exit_code())
}
