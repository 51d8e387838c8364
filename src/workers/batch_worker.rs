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

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use futures::stream::{self, StreamExt};
use tracing::{debug, info};

use crate::config::settings::Settings;
use crate::domain::models::record::EnrichedRecord;
use crate::pipeline::fingerprint;
use crate::pipeline::parser;
use crate::pipeline::prober::ContentProber;
use crate::pipeline::resolver::{DomainResolver, ResolverStats};
use crate::pipeline::tagging::{assign_tags, TagInputs};
use crate::pipeline::validator::UrlValidator;

/// 一个待处理的批次
#[derive(Debug)]
pub struct Batch {
    /// 批次序号，仅用于日志
    pub index: usize,
    /// 该批次独占的原始行
    pub lines: Vec<String>,
}

/// 一个批次的处理产出
#[derive(Debug)]
pub struct BatchOutput {
    pub index: usize,
    pub records: Vec<EnrichedRecord>,
    /// 被丢弃的行数（格式错误或未通过校验）
    pub skipped: usize,
}

/// 批次工作器
///
/// 独占处理分配给它的批次。校验缓存、域名解析缓存和HTTP
/// 客户端都归工作器所有，在其处理的各批次之间复用，但绝不
/// 跨工作器共享——除只读的泄露域名集合和模式表之外，
/// 工作器之间没有任何共享可变状态。
pub struct BatchWorker {
    worker_id: usize,
    validator: UrlValidator,
    resolver: DomainResolver,
    prober: ContentProber,
    patterns: Arc<Vec<(String, String)>>,
    breached_domains: Arc<HashSet<String>>,
    concurrency: usize,
}

impl BatchWorker {
    /// 创建新的批次工作器实例
    pub fn new(
        worker_id: usize,
        settings: &Settings,
        patterns: Arc<Vec<(String, String)>>,
        breached_domains: Arc<HashSet<String>>,
    ) -> Result<Self, reqwest::Error> {
        Ok(Self {
            worker_id,
            validator: UrlValidator::new(),
            resolver: DomainResolver::with_timeout(Duration::from_millis(
                settings.resolver.timeout_ms,
            )),
            prober: ContentProber::new(&settings.probe)?,
            patterns,
            breached_domains,
            concurrency: settings.probe.max_concurrent,
        })
    }

    /// 处理一个批次
    ///
    /// 批次内所有行在同一个受限并发流下富化，网络等待相互
    /// 重叠。阻塞直到每一行都产生富化记录或丢弃决定，然后把
    /// 批次结果作为一个整体返回。行在结果中的相对顺序不保证。
    pub async fn process_batch(&self, batch: Batch) -> BatchOutput {
        let total = batch.lines.len();

        let outcomes: Vec<Option<EnrichedRecord>> = stream::iter(batch.lines)
            .map(|line| async move { self.enrich_line(&line).await })
            .buffer_unordered(self.concurrency)
            .collect()
            .await;

        let records: Vec<EnrichedRecord> = outcomes.into_iter().flatten().collect();
        let skipped = total - records.len();

        info!(
            "Worker {} finished batch {}: {} records, {} skipped",
            self.worker_id, batch.index, records.len(), skipped
        );

        BatchOutput {
            index: batch.index,
            records,
            skipped,
        }
    }

    /// 富化单独一行
    ///
    /// 返回`None`表示干净地丢弃：行格式错误、凭据被掩码或
    /// URL未通过结构校验。解析失败和探测失败不会丢弃行，
    /// 而是以降级值继续富化。
    async fn enrich_line(&self, line: &str) -> Option<EnrichedRecord> {
        let credential = match parser::parse_credentials(line) {
            Ok(credential) => credential,
            Err(e) => {
                debug!("Skipping line: {}", e);
                return None;
            }
        };

        let validated = self.validator.validate(&credential.uri)?;

        let resolution = self.resolver.resolve(&validated.host).await;
        let (probe, body) = self
            .prober
            .probe(&credential.uri, &validated.scheme, &validated.host)
            .await;

        let domain = urlencoding::decode(&validated.host)
            .map(|d| d.into_owned())
            .unwrap_or_else(|_| validated.host.clone());
        let path = urlencoding::decode(&validated.path)
            .map(|p| p.into_owned())
            .unwrap_or_else(|_| validated.path.clone());

        let web_application =
            fingerprint::detect_application_from_url(&credential.uri, &path, &self.patterns)
                .or_else(|| {
                    body.as_deref()
                        .and_then(fingerprint::detect_application_from_body)
                });

        let tags = assign_tags(
            TagInputs {
                domain: &domain,
                ip: resolution.ip.as_deref(),
                scheme: &validated.scheme,
                resolved: resolution.resolved,
                accessible: probe.accessible,
                parked: probe.is_parked,
                has_login_form: probe.has_login_form,
            },
            &self.breached_domains,
        );

        Some(EnrichedRecord {
            uri: credential.uri,
            username: credential.username,
            password: credential.password,
            domain,
            ip_address: resolution.ip,
            port: validated.port,
            path,
            tags,
            title: probe.title,
            is_resolved: resolution.resolved,
            is_accessible: probe.accessible,
            has_login_form: probe.has_login_form,
            login_form_type: probe.login_form_type,
            web_application,
            is_parked: probe.is_parked,
        })
    }

    /// 工作器解析缓存的统计信息，运行结束时用于日志
    pub fn resolver_stats(&self) -> ResolverStats {
        self.resolver.stats()
    }
}
