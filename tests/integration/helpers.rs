// Copyright (c) 2025 CredSift Contributors
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use credsift::config::settings::{
    PipelineSettings, ProbeSettings, ResolverSettings, Settings, SinkSettings,
};
use credsift::domain::models::record::EnrichedRecord;
use credsift::infrastructure::sink::RecordSink;
use credsift::utils::errors::SinkError;

/// 构造测试用配置
///
/// 探测超时放宽到2秒，避免本地mock服务器下的偶发超时
pub fn test_settings(batch_size: usize, max_workers: usize) -> Settings {
    Settings {
        pipeline: PipelineSettings {
            batch_size,
            max_workers,
            max_lines: None,
        },
        resolver: ResolverSettings { timeout_ms: 200 },
        probe: ProbeSettings {
            timeout_ms: 2000,
            max_concurrent: 100,
            per_host_limit: 10,
            user_agent: "Mozilla/5.0".to_string(),
        },
        sink: SinkSettings {
            csv_path: "breach_data_full.csv".to_string(),
            database_url: None,
        },
    }
}

/// 收集记录到内存的接收器
#[derive(Default)]
pub struct MemorySink {
    pub records: Vec<EnrichedRecord>,
    pub batches: usize,
}

#[async_trait]
impl RecordSink for MemorySink {
    async fn write_batch(&mut self, records: &[EnrichedRecord]) -> Result<(), SinkError> {
        self.records.extend_from_slice(records);
        self.batches += 1;
        Ok(())
    }
}

/// 永远写入失败的接收器
pub struct FailingSink;

#[async_trait]
impl RecordSink for FailingSink {
    async fn write_batch(&mut self, _records: &[EnrichedRecord]) -> Result<(), SinkError> {
        Err(SinkError::Io(std::io::Error::new(
            std::io::ErrorKind::BrokenPipe,
            "sink unavailable",
        )))
    }
}
