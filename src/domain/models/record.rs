// Copyright (c) 2025 CredSift Contributors
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};

use crate::domain::models::probe::LoginFormType;
use crate::domain::models::tags::TagSet;

/// 富化记录实体
///
/// 管道的终端产物：一条凭据行经过解析、解析域名、内容探测、
/// 应用识别和标签分配后的完整结构化记录。由产出它的工作器
/// 独占，交付给接收器后不可变。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichedRecord {
    /// 原始URI（含协议）
    pub uri: String,
    /// 用户名
    pub username: String,
    /// 密码
    pub password: String,
    /// 域名（已做百分号解码）
    pub domain: String,
    /// 解析得到的IP地址
    pub ip_address: Option<String>,
    /// 端口
    pub port: Option<u16>,
    /// 路径（已做百分号解码）
    pub path: String,
    /// 结构化标签集合
    pub tags: TagSet,
    /// 页面标题
    pub title: Option<String>,
    /// 域名是否成功解析
    pub is_resolved: bool,
    /// 目标是否可达
    pub is_accessible: bool,
    /// 是否检测到登录表单
    pub has_login_form: bool,
    /// 登录表单类型
    pub login_form_type: Option<LoginFormType>,
    /// 识别出的Web应用名称
    pub web_application: Option<String>,
    /// 是否为停放域名
    pub is_parked: bool,
}
