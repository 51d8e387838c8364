// Copyright (c) 2025 CredSift Contributors
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::fs::File;
use std::path::Path;

use async_trait::async_trait;
use tracing::info;

use crate::domain::models::record::EnrichedRecord;
use crate::infrastructure::sink::RecordSink;
use crate::utils::errors::SinkError;

/// CSV输出列，顺序固定
const CSV_HEADERS: [&str; 15] = [
    "uri",
    "username",
    "password",
    "domain",
    "ip_address",
    "port",
    "path",
    "tags",
    "title",
    "is_resolved",
    "is_accessible",
    "has_login_form",
    "login_form_type",
    "web_application",
    "is_parked",
];

/// CSV文件接收器
///
/// 以固定列顺序写出富化记录，`tags`列序列化为JSON对象
pub struct CsvSink {
    writer: csv::Writer<File>,
}

impl CsvSink {
    /// 创建CSV接收器并写入表头
    pub fn new(path: &Path) -> Result<Self, SinkError> {
        let mut writer = csv::Writer::from_writer(File::create(path)?);
        writer.write_record(CSV_HEADERS)?;
        info!("CSV sink writing to {}", path.display());
        Ok(Self { writer })
    }
}

#[async_trait]
impl RecordSink for CsvSink {
    async fn write_batch(&mut self, records: &[EnrichedRecord]) -> Result<(), SinkError> {
        for record in records {
            let port = record.port.map(|p| p.to_string()).unwrap_or_default();
            let tags = record.tags.to_json();
            let is_resolved = record.is_resolved.to_string();
            let is_accessible = record.is_accessible.to_string();
            let has_login_form = record.has_login_form.to_string();
            let is_parked = record.is_parked.to_string();

            self.writer.write_record([
                record.uri.as_str(),
                record.username.as_str(),
                record.password.as_str(),
                record.domain.as_str(),
                record.ip_address.as_deref().unwrap_or(""),
                port.as_str(),
                record.path.as_str(),
                tags.as_str(),
                record.title.as_deref().unwrap_or(""),
                is_resolved.as_str(),
                is_accessible.as_str(),
                has_login_form.as_str(),
                record.login_form_type.map(|t| t.as_str()).unwrap_or(""),
                record.web_application.as_deref().unwrap_or(""),
                is_parked.as_str(),
            ])?;
        }
        self.writer.flush()?;
        Ok(())
    }

    async fn finalize(&mut self) -> Result<(), SinkError> {
        self.writer.flush()?;
        Ok(())
    }
}
