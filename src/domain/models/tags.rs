// Copyright (c) 2025 CredSift Contributors
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};

/// 优先级等级
///
/// 由固定的加权公式打分后分桶得出
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Critical,
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Critical => "critical",
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }
}

/// 结构化标签集合
///
/// 附加在每条富化记录上的固定键元数据。即使网络探测失败，
/// 记录也携带完整的标签集（取降级值而不是缺失键）。
/// `ip_type`和`scope`仅在存在IP时出现，`breach_status`仅在
/// 域名命中泄露域名集合时出现。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagSet {
    /// IP地址类型（ipv4/ipv6）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_type: Option<String>,
    /// IP地址归属（local/public）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    /// 协议，原样记录
    pub protocol: String,
    /// 域名解析状态（resolved/unresolved）
    pub resolution_status: String,
    /// 可达状态（active/inactive）
    pub status: String,
    /// 环境推断（production/staging/dev）
    pub env: String,
    /// 优先级等级
    pub priority: Priority,
    /// 是否为Android流量
    pub android_traffic: bool,
    /// 泄露状态，仅在域名命中泄露集合时为"breached"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breach_status: Option<String>,
}

impl TagSet {
    /// 标签集序列化为JSON对象字符串
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }

    /// 域名是否被标记为已泄露
    pub fn is_breached(&self) -> bool {
        self.breach_status.as_deref() == Some("breached")
    }
}
