// Copyright (c) 2025 CredSift Contributors
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use dashmap::DashMap;
use tracing::debug;

use crate::domain::models::resolution::ResolutionOutcome;

/// 默认DNS解析超时时间（毫秒）
const DEFAULT_RESOLVE_TIMEOUT_MS: u64 = 200;

/// 域名解析缓存
///
/// 泄露数据中域名高度重复，缓存把O(行数)的DNS调用压缩为
/// O(唯一域名)。首次解析的结果（包括失败）在缓存生命周期内
/// 一直有效：无TTL、不失效。这是刻意的设计选择——每次运行
/// 都是有界的批处理任务，不是长期服务。每个工作器持有自己的
/// 实例，不跨工作器共享。
pub struct DomainResolver {
    cache: DashMap<String, ResolutionOutcome>,
    timeout: Duration,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl DomainResolver {
    /// 创建使用默认超时的解析器
    pub fn new() -> Self {
        Self::with_timeout(Duration::from_millis(DEFAULT_RESOLVE_TIMEOUT_MS))
    }

    /// 创建使用指定超时的解析器
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            cache: DashMap::new(),
            timeout,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// 解析域名，命中缓存时不发起网络调用
    ///
    /// 解析失败（超时或错误）记录为`resolved=false, ip=None`，
    /// 不向上抛出
    pub async fn resolve(&self, domain: &str) -> ResolutionOutcome {
        if let Some(cached) = self.cache.get(domain) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return cached.clone();
        }

        self.misses.fetch_add(1, Ordering::Relaxed);

        let outcome =
            match tokio::time::timeout(self.timeout, tokio::net::lookup_host((domain, 80u16)))
                .await
            {
                Ok(Ok(mut addrs)) => match addrs.next() {
                    Some(addr) => ResolutionOutcome {
                        ip: Some(addr.ip().to_string()),
                        resolved: true,
                    },
                    None => ResolutionOutcome::unresolved(),
                },
                Ok(Err(e)) => {
                    debug!("DNS resolution failed for {}: {}", domain, e);
                    ResolutionOutcome::unresolved()
                }
                Err(_) => {
                    debug!("DNS resolution timed out for {}", domain);
                    ResolutionOutcome::unresolved()
                }
            };

        // First outcome wins if another task raced us on the same domain
        self.cache
            .entry(domain.to_string())
            .or_insert(outcome)
            .clone()
    }

    /// 缓存条目数
    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }

    /// 解析器统计信息
    pub fn stats(&self) -> ResolverStats {
        ResolverStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}

impl Default for DomainResolver {
    fn default() -> Self {
        Self::new()
    }
}

/// 解析器统计信息
#[derive(Debug, Clone, Copy)]
pub struct ResolverStats {
    pub hits: u64,
    pub misses: u64,
}
