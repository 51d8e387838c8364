// Copyright (c) 2025 CredSift Contributors
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::path::Path;

use serde_json::Value;
use tracing::{info, warn};

/// 从JSON文件加载应用识别模式
///
/// 期望的结构为`{"patterns": {"/wp-admin": "WordPress", ...}}`。
/// 映射的插入顺序有意义（首个命中生效），serde_json的
/// preserve_order特性保证顺序与源文件一致。文件缺失或格式
/// 错误时降级为空映射并记录警告，不会造成启动失败。
pub async fn load_app_patterns(path: &Path) -> Vec<(String, String)> {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) => {
            warn!(
                "Pattern source {} not loaded ({}), continuing with empty mapping",
                path.display(),
                e
            );
            return Vec::new();
        }
    };

    let parsed: Value = match serde_json::from_str(&content) {
        Ok(value) => value,
        Err(e) => {
            warn!(
                "Pattern source {} is malformed ({}), continuing with empty mapping",
                path.display(),
                e
            );
            return Vec::new();
        }
    };

    let patterns: Vec<(String, String)> = parsed
        .get("patterns")
        .and_then(Value::as_object)
        .map(|map| {
            map.iter()
                .filter_map(|(pattern, app)| {
                    app.as_str()
                        .map(|name| (pattern.clone(), name.to_string()))
                })
                .collect()
        })
        .unwrap_or_default();

    info!(
        "Loaded {} application patterns from {}",
        patterns.len(),
        path.display()
    );
    patterns
}
