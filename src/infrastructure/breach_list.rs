// Copyright (c) 2025 CredSift Contributors
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::collections::HashSet;
use std::path::Path;

use tracing::{info, warn};

/// 从文件加载泄露域名集合
///
/// 每行一个裸域名。文件缺失时降级为空集合而不是启动失败。
/// 集合在处理开始前加载一次，随后被所有工作器只读共享。
pub async fn load_breached_domains(path: &Path) -> HashSet<String> {
    match tokio::fs::read_to_string(path).await {
        Ok(content) => {
            let domains: HashSet<String> = content
                .lines()
                .map(|line| line.trim())
                .filter(|line| !line.is_empty())
                .map(|line| line.to_string())
                .collect();
            info!(
                "Loaded {} breached domains from {}",
                domains.len(),
                path.display()
            );
            domains
        }
        Err(e) => {
            warn!(
                "Breached domain list {} not loaded ({}), continuing with empty set",
                path.display(),
                e
            );
            HashSet::new()
        }
    }
}
