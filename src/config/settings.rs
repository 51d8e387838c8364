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

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// 应用程序配置设置
///
/// 包含批处理、域名解析、内容探测和输出接收器等所有配置项
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// 批处理配置
    pub pipeline: PipelineSettings,
    /// 域名解析配置
    pub resolver: ResolverSettings,
    /// 内容探测配置
    pub probe: ProbeSettings,
    /// 输出接收器配置
    pub sink: SinkSettings,
}

/// 批处理配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct PipelineSettings {
    /// 每个批次的行数
    pub batch_size: usize,
    /// 并行工作器数量
    pub max_workers: usize,
    /// 最大读取行数（为空时读取全部）
    pub max_lines: Option<usize>,
}

/// 域名解析配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct ResolverSettings {
    /// 单次DNS解析超时时间（毫秒）
    pub timeout_ms: u64,
}

/// 内容探测配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct ProbeSettings {
    /// 单次请求超时时间（毫秒）
    pub timeout_ms: u64,
    /// 单个工作器内的全局并发请求上限
    pub max_concurrent: usize,
    /// 单个主机的并发请求上限
    pub per_host_limit: usize,
    /// 请求使用的User-Agent
    pub user_agent: String,
}

/// 输出接收器配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct SinkSettings {
    /// CSV输出文件路径
    pub csv_path: String,
    /// 数据库连接URL（为空时写入CSV）
    pub database_url: Option<String>,
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 从配置文件和环境变量加载配置，支持默认值
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载失败
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        let builder = Config::builder()
            // Default pipeline settings
            .set_default("pipeline.batch_size", 1000)?
            .set_default("pipeline.max_workers", 4)?
            // Default resolver settings
            .set_default("resolver.timeout_ms", 200)?
            // Default probe settings
            .set_default("probe.timeout_ms", 200)?
            .set_default("probe.max_concurrent", 100)?
            .set_default("probe.per_host_limit", 10)?
            .set_default("probe.user_agent", "Mozilla/5.0")?
            // Default sink settings
            .set_default("sink.csv_path", "breach_data_full.csv")?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::with_prefix("CREDSIFT").separator("__"));

        builder.build()?.try_deserialize()
    }
}
