// Copyright 2025 CredSift Contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::path::{Path, PathBuf};

use clap::Parser;
use credsift::config::settings::Settings;
use credsift::infrastructure::breach_list::load_breached_domains;
use credsift::infrastructure::input::load_data_lines;
use credsift::infrastructure::patterns::load_app_patterns;
use credsift::infrastructure::sink::csv_sink::CsvSink;
use credsift::infrastructure::sink::database::DatabaseSink;
use credsift::utils::telemetry;
use credsift::workers::manager::PipelineManager;
use tracing::info;

/// 凭据泄露数据富化管道
#[derive(Debug, Parser)]
#[command(name = "credsift", version, about = "Enriches uri:username:password dump lines into structured exposure records")]
struct Cli {
    /// 凭据数据文件，每行一条uri:username:password记录
    input: PathBuf,

    /// 泄露域名列表文件，每行一个裸域名
    #[arg(long, default_value = "extracted_domains.txt")]
    breached_domains: PathBuf,

    /// 应用识别模式JSON文件
    #[arg(long, default_value = "web_app_patterns.json")]
    patterns: PathBuf,

    /// 覆盖配置中的批次大小
    #[arg(long)]
    batch_size: Option<usize>,

    /// 覆盖配置中的工作器数量
    #[arg(long)]
    workers: Option<usize>,

    /// 覆盖配置中的最大读取行数
    #[arg(long)]
    max_lines: Option<usize>,
}

/// 主函数
///
/// 应用程序入口点，负责加载外部资源并启动管道
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize logging
    telemetry::init_telemetry();
    info!("Starting credsift...");

    let cli = Cli::parse();

    // 2. Load configuration
    let mut settings = Settings::new()?;
    if let Some(batch_size) = cli.batch_size {
        settings.pipeline.batch_size = batch_size;
    }
    if let Some(workers) = cli.workers {
        settings.pipeline.max_workers = workers;
    }
    if let Some(max_lines) = cli.max_lines {
        settings.pipeline.max_lines = Some(max_lines);
    }
    info!("Configuration loaded");

    // 3. Load shared read-only inputs
    let breached_domains = load_breached_domains(&cli.breached_domains).await;
    let patterns = load_app_patterns(&cli.patterns).await;
    let lines = load_data_lines(&cli.input, settings.pipeline.max_lines).await?;

    // 4. Run the pipeline against the configured sink
    let manager = PipelineManager::new(settings.clone(), breached_domains, patterns);

    let report = match &settings.sink.database_url {
        Some(database_url) => {
            let mut sink = DatabaseSink::connect(database_url).await?;
            manager.run(lines, &mut sink).await?
        }
        None => {
            let mut sink = CsvSink::new(Path::new(&settings.sink.csv_path))?;
            manager.run(lines, &mut sink).await?
        }
    };

    info!(
        "Done: {} lines in, {} records written, {} skipped",
        report.lines_in, report.records_out, report.skipped
    );

    Ok(())
}
