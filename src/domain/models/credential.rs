// Copyright (c) 2025 CredSift Contributors
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};

/// 已解析的凭据实体
///
/// 表示从泄露数据行中提取出的一条凭据记录。
/// URI总是携带显式的协议前缀（解析时缺失则默认为http）。
/// 创建后不可变，被下游各阶段消费一次。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedCredential {
    /// 目标URI，总是带有协议前缀
    pub uri: String,
    /// 用户名
    pub username: String,
    /// 密码
    pub password: String,
}

/// 结构化校验后的URL组成部分
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedUrl {
    /// 协议
    pub scheme: String,
    /// 主机名
    pub host: String,
    /// 端口（https默认443，http默认80）
    pub port: Option<u16>,
    /// 路径
    pub path: String,
}
