// Copyright (c) 2025 CredSift Contributors
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::collections::{HashSet, VecDeque};
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use crate::config::settings::Settings;
use crate::infrastructure::sink::RecordSink;
use crate::utils::errors::PipelineError;
use crate::workers::batch_worker::{Batch, BatchOutput, BatchWorker};

/// 一次管道运行的统计报告
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineReport {
    /// 输入行数
    pub lines_in: usize,
    /// 写入接收器的记录数
    pub records_out: usize,
    /// 干净丢弃的行数
    pub skipped: usize,
}

/// 批次编排器
///
/// 把输入切分为固定大小的批次，交给有界的并行工作器池处理，
/// 并把各批次的结果流式写入接收器。两层并发显式组合：外层是
/// 相互隔离的并行工作器（单元是"处理这个批次"），内层是每个
/// 工作器内的受限协作并发（单元是"富化这一行"）。批次之间
/// 完成顺序不确定，结果乱序写出。
pub struct PipelineManager {
    settings: Settings,
    breached_domains: Arc<HashSet<String>>,
    patterns: Arc<Vec<(String, String)>>,
}

impl PipelineManager {
    /// 创建新的编排器实例
    pub fn new(
        settings: Settings,
        breached_domains: HashSet<String>,
        patterns: Vec<(String, String)>,
    ) -> Self {
        Self {
            settings,
            breached_domains: Arc::new(breached_domains),
            patterns: Arc::new(patterns),
        }
    }

    /// 运行管道
    ///
    /// 阻塞直到所有批次处理完毕并写入接收器。工作器内部的
    /// 失败（解析、校验、解析域名、探测）永远不会中止运行；
    /// 接收器写入失败是唯一的致命错误类别，会原样向调用方
    /// 传播——静默丢失富化数据会使管道失去意义。
    ///
    /// # 参数
    ///
    /// * `lines` - 全部输入行
    /// * `sink` - 接收富化记录的输出端
    ///
    /// # 返回值
    ///
    /// * `Ok(PipelineReport)` - 处理统计
    /// * `Err(PipelineError)` - 接收器失败或工作器初始化失败
    pub async fn run<S>(&self, lines: Vec<String>, sink: &mut S) -> Result<PipelineReport, PipelineError>
    where
        S: RecordSink,
    {
        let lines_in = lines.len();
        let batch_size = self.settings.pipeline.batch_size.max(1);
        let max_workers = self.settings.pipeline.max_workers.max(1);

        let mut batches = VecDeque::new();
        let mut lines = lines;
        let mut index = 0;
        while !lines.is_empty() {
            let rest = lines.split_off(batch_size.min(lines.len()));
            batches.push_back(Batch {
                index,
                lines: std::mem::replace(&mut lines, rest),
            });
            index += 1;
        }

        info!(
            "Processing {} lines in {} batches with {} workers",
            lines_in,
            batches.len(),
            max_workers
        );

        let queue = Arc::new(Mutex::new(batches));
        let (tx, mut rx) = mpsc::channel::<BatchOutput>(max_workers);

        let mut handles: Vec<JoinHandle<()>> = Vec::with_capacity(max_workers);
        for worker_id in 0..max_workers {
            let worker = BatchWorker::new(
                worker_id,
                &self.settings,
                self.patterns.clone(),
                self.breached_domains.clone(),
            )?;
            let queue = queue.clone();
            let tx = tx.clone();

            let handle = tokio::spawn(async move {
                loop {
                    let batch = { queue.lock().pop_front() };
                    let Some(batch) = batch else { break };

                    let output = worker.process_batch(batch).await;
                    // A closed channel means the sink side is gone; stop pulling work
                    if tx.send(output).await.is_err() {
                        break;
                    }
                }
                let stats = worker.resolver_stats();
                debug!(
                    "Worker {} done, resolver cache: {} hits / {} misses",
                    worker_id, stats.hits, stats.misses
                );
            });
            handles.push(handle);
        }
        drop(tx);

        let mut report = PipelineReport {
            lines_in,
            ..Default::default()
        };

        while let Some(output) = rx.recv().await {
            sink.write_batch(&output.records).await?;
            report.records_out += output.records.len();
            report.skipped += output.skipped;
        }

        for handle in handles {
            if let Err(e) = handle.await {
                // A panicked worker loses its remaining batches but must not
                // take the run down with it
                error!("Worker terminated abnormally: {}", e);
            }
        }

        sink.finalize().await?;
        info!(
            "Pipeline finished: {} in, {} records, {} skipped",
            report.lines_in, report.records_out, report.skipped
        );
        Ok(report)
    }
}
