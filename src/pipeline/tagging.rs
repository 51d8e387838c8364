// Copyright (c) 2025 CredSift Contributors
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::collections::HashSet;

use crate::domain::models::tags::{Priority, TagSet};

/// 粗粒度的内网IP前缀
///
/// `172.`覆盖的范围大于真正的私有段172.16.0.0/12，
/// 为保持行为兼容按原样保留，不做CIDR级别的修正
const LOCAL_IP_PREFIXES: [&str; 4] = ["127.", "10.", "192.168.", "172."];

/// 标签分配的输入信号
#[derive(Debug, Clone, Copy)]
pub struct TagInputs<'a> {
    pub domain: &'a str,
    pub ip: Option<&'a str>,
    pub scheme: &'a str,
    pub resolved: bool,
    pub accessible: bool,
    pub parked: bool,
    pub has_login_form: bool,
}

/// 根据输入信号派生结构化标签集合
///
/// 纯函数，完全确定性。`breached_domains`为启动时加载的
/// 只读泄露域名集合，命中时追加`breach_status`标签。
pub fn assign_tags(inputs: TagInputs<'_>, breached_domains: &HashSet<String>) -> TagSet {
    let (ip_type, scope) = match inputs.ip {
        Some(ip) => {
            let ip_type = if ip.matches('.').count() == 3 {
                Some("ipv4".to_string())
            } else if ip.starts_with('[') && ip.ends_with(']') {
                Some("ipv6".to_string())
            } else {
                None
            };
            let scope = if LOCAL_IP_PREFIXES
                .iter()
                .any(|prefix| ip.starts_with(prefix))
            {
                Some("local".to_string())
            } else {
                Some("public".to_string())
            };
            (ip_type, scope)
        }
        None => (None, None),
    };

    let env = if inputs.parked {
        "staging"
    } else if inputs.resolved && inputs.accessible {
        "production"
    } else {
        "dev"
    };

    let breach_status = if breached_domains.contains(inputs.domain) {
        Some("breached".to_string())
    } else {
        None
    };

    TagSet {
        ip_type,
        scope,
        protocol: inputs.scheme.to_string(),
        resolution_status: if inputs.resolved {
            "resolved".to_string()
        } else {
            "unresolved".to_string()
        },
        status: if inputs.accessible {
            "active".to_string()
        } else {
            "inactive".to_string()
        },
        env: env.to_string(),
        priority: calculate_priority(
            inputs.resolved,
            inputs.accessible,
            inputs.parked,
            inputs.has_login_form,
        ),
        android_traffic: inputs.scheme == "android",
        breach_status,
    }
}

/// 根据指标动态计算优先级
///
/// 固定的可审计公式：3·resolved + 4·accessible + 2·login − 3·parked，
/// 权重变更属于标签模式的行为变更，需要版本升级
pub fn calculate_priority(
    is_resolved: bool,
    is_accessible: bool,
    is_parked: bool,
    has_login_form: bool,
) -> Priority {
    let mut score: i32 = 0;

    if is_resolved {
        score += 3;
    }
    if is_accessible {
        score += 4;
    }
    if has_login_form {
        score += 2;
    }
    if is_parked {
        score -= 3;
    }

    if score >= 7 {
        Priority::Critical
    } else if score >= 5 {
        Priority::High
    } else if score >= 3 {
        Priority::Medium
    } else {
        Priority::Low
    }
}
