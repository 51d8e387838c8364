// Copyright (c) 2025 CredSift Contributors
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 域名解析结果
///
/// 按域名缓存；首次解析的结果在缓存生命周期内不再变化，
/// 无TTL也不失效。解析失败被记录为数据而不是错误。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionOutcome {
    /// 解析得到的IP地址，失败时为空
    pub ip: Option<String>,
    /// 域名是否成功解析
    pub resolved: bool,
}

impl ResolutionOutcome {
    /// 创建一个表示解析失败的结果
    pub fn unresolved() -> Self {
        Self {
            ip: None,
            resolved: false,
        }
    }
}
