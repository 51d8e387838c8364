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

use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use once_cell::sync::Lazy;
use regex::Regex;
use tokio::sync::Semaphore;
use tracing::debug;

use crate::config::settings::ProbeSettings;
use crate::domain::models::probe::{LoginFormType, ProbeResult};

/// 页面标题，忽略大小写并允许跨行
static TITLE_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?is)<title>(.*?)</title>").unwrap());

/// 停放域名的页面特征短语
const PARKED_MARKERS: [&str; 2] = ["domain is parked", "buy this domain"];

/// 内容探测器
///
/// 对已通过校验的URI发起单次GET请求并提取登录面信号。
/// 请求不跟随重定向（重定向目标不是被审计的资产）、
/// 跳过证书校验（追求速度而不是信任链）、受激进的超时约束。
/// 两道独立的并发上限（全局与单主机）防止单个迟钝主机
/// 拖垮整个批次。探测失败是数据而不是错误，永远不会向
/// 调用方抛出。不做任何重试。
pub struct ContentProber {
    client: reqwest::Client,
    global_permits: Arc<Semaphore>,
    host_permits: DashMap<String, Arc<Semaphore>>,
    per_host_limit: usize,
}

impl ContentProber {
    /// 根据探测配置构建探测器
    ///
    /// # 参数
    ///
    /// * `settings` - 探测配置（超时与并发上限）
    ///
    /// # 返回值
    ///
    /// * `Ok(ContentProber)` - 探测器实例
    /// * `Err(reqwest::Error)` - HTTP客户端构建失败
    pub fn new(settings: &ProbeSettings) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .user_agent(settings.user_agent.clone())
            .timeout(Duration::from_millis(settings.timeout_ms))
            .redirect(reqwest::redirect::Policy::none())
            .danger_accept_invalid_certs(true)
            .build()?;

        Ok(Self {
            client,
            global_permits: Arc::new(Semaphore::new(settings.max_concurrent)),
            host_permits: DashMap::new(),
            per_host_limit: settings.per_host_limit,
        })
    }

    /// 探测一个URI并提取内容信号
    ///
    /// 仅探测http/https；其他协议直接返回全默认结果。
    /// 非200响应、超时和传输错误同样返回默认结果。
    /// 返回的响应体供内容阶段的应用指纹识别复用，
    /// 仅在HTTP 200且成功读取时存在。
    pub async fn probe(&self, uri: &str, scheme: &str, host: &str) -> (ProbeResult, Option<String>) {
        if scheme != "http" && scheme != "https" {
            return (ProbeResult::default(), None);
        }

        let host_permits = self
            .host_permits
            .entry(host.to_string())
            .or_insert_with(|| Arc::new(Semaphore::new(self.per_host_limit)))
            .clone();

        // Both ceilings must be held for the duration of the request
        let _global = match self.global_permits.clone().acquire_owned().await {
            Ok(permit) => permit,
            Err(_) => return (ProbeResult::default(), None),
        };
        let _host = match host_permits.acquire_owned().await {
            Ok(permit) => permit,
            Err(_) => return (ProbeResult::default(), None),
        };

        let response = match self.client.get(uri).send().await {
            Ok(response) => response,
            Err(e) => {
                debug!("Probe failed for {}: {}", uri, e);
                return (ProbeResult::default(), None);
            }
        };

        if response.status() != reqwest::StatusCode::OK {
            return (ProbeResult::default(), None);
        }

        match response.text().await {
            Ok(body) => {
                let result = extract_signals(&body);
                (result, Some(body))
            }
            Err(e) => {
                debug!("Failed to read body for {}: {}", uri, e);
                (ProbeResult::default(), None)
            }
        }
    }
}

/// 从HTTP 200的响应体中提取登录面信号
///
/// 大小写不敏感地扫描：`<title>`标签、登录表单标记
/// （password/login，细分captcha > otp > basic）以及
/// 停放域名短语
pub fn extract_signals(body: &str) -> ProbeResult {
    let title = TITLE_PATTERN
        .captures(body)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string());

    let lowered = body.to_lowercase();

    let has_login_form = lowered.contains("password") || lowered.contains("login");
    let login_form_type = if has_login_form {
        if lowered.contains("captcha") {
            Some(LoginFormType::Captcha)
        } else if lowered.contains("otp") {
            Some(LoginFormType::Otp)
        } else {
            Some(LoginFormType::Basic)
        }
    } else {
        None
    };

    let is_parked = PARKED_MARKERS.iter().any(|marker| lowered.contains(marker));

    ProbeResult {
        accessible: true,
        title,
        has_login_form,
        login_form_type,
        is_parked,
    }
}
