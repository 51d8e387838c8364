// Copyright (c) 2025 CredSift Contributors
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::path::Path;

use tracing::info;

use crate::utils::errors::PipelineError;

/// 从文件加载凭据数据行
///
/// 按UTF-8读取，无法解码的字节按行宽容处理（有损替换），
/// 坏行不会使整个运行失败。空白行被丢弃。
///
/// # 参数
///
/// * `path` - 数据文件路径
/// * `max_lines` - 最大读取行数，为空时读取全部
pub async fn load_data_lines(
    path: &Path,
    max_lines: Option<usize>,
) -> Result<Vec<String>, PipelineError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| PipelineError::Input(format!("failed to read {}: {}", path.display(), e)))?;

    let text = String::from_utf8_lossy(&bytes);
    let iter = text
        .lines()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .map(|line| line.to_string());

    let lines: Vec<String> = match max_lines {
        Some(cap) => iter.take(cap).collect(),
        None => iter.collect(),
    };

    info!("Loaded {} lines from {}", lines.len(), path.display());
    Ok(lines)
}
