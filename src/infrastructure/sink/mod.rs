// Copyright (c) 2025 CredSift Contributors
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

pub mod csv_sink;
pub mod database;

use async_trait::async_trait;

use crate::domain::models::record::EnrichedRecord;
use crate::utils::errors::SinkError;

/// 记录接收器接口
///
/// 工作器把一个批次的富化记录作为整体交付给接收器。
/// 写入失败对该批次是致命的，必须向编排器的调用方暴露——
/// 静默丢失富化数据会使管道失去意义。
#[async_trait]
pub trait RecordSink: Send {
    /// 写入一个批次的记录
    async fn write_batch(&mut self, records: &[EnrichedRecord]) -> Result<(), SinkError>;

    /// 刷新并关闭接收器
    async fn finalize(&mut self) -> Result<(), SinkError> {
        Ok(())
    }
}
