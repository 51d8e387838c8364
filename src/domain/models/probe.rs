// Copyright (c) 2025 CredSift Contributors
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};

/// 登录表单类型
///
/// 根据页面内容细分登录入口：优先级为 captcha > otp > basic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoginFormType {
    Basic,
    Captcha,
    Otp,
}

impl LoginFormType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoginFormType::Basic => "basic",
            LoginFormType::Captcha => "captcha",
            LoginFormType::Otp => "otp",
        }
    }
}

/// 单次内容探测的结果
///
/// 由一次受超时约束的网络请求产生。没有响应时所有字段
/// 取默认值，绝不向调用方抛出错误。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProbeResult {
    /// 目标是否返回HTTP 200
    pub accessible: bool,
    /// 页面标题，原样截取并去除首尾空白
    pub title: Option<String>,
    /// 页面是否包含登录表单标记
    pub has_login_form: bool,
    /// 登录表单类型
    pub login_form_type: Option<LoginFormType>,
    /// 域名是否为停放页面
    pub is_parked: bool,
}
