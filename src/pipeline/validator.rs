// Copyright (c) 2025 CredSift Contributors
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::num::NonZeroUsize;

use lru::LruCache;
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use regex::Regex;
use url::Url;

use crate::domain::models::credential::ValidatedUrl;
use crate::pipeline::SCHEME_PATTERN;

/// 点分IPv4字面量
static IP_ADDRESS_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{1,3}(\.\d{1,3}){3}$").unwrap());

/// 校验结果缓存容量，同一份泄露数据中重复URI很常见
const VALIDATION_CACHE_SIZE: usize = 10_000;

/// 校验URL结构并返回其组成部分
///
/// 纯函数：拒绝短于10个字符的URI、无法识别协议的URI、
/// 主机名包含`<`、`>`、`"`的URI，以及既不是点分IPv4字面量
/// 又不含任何字母的主机名。该检查在任何网络IO之前执行，
/// 避免探测并发被无效输入浪费。
pub fn validate_url(uri: &str) -> Option<ValidatedUrl> {
    if uri.len() < 10 || !SCHEME_PATTERN.is_match(uri) {
        return None;
    }

    let parsed = Url::parse(uri).ok()?;
    let host = parsed.host_str()?;
    if host.is_empty() || host.contains(['<', '>', '"']) {
        return None;
    }
    if !IP_ADDRESS_PATTERN.is_match(host) && !host.chars().any(|c| c.is_alphabetic()) {
        return None;
    }

    let scheme = parsed.scheme().to_string();
    let port = parsed.port().or(match scheme.as_str() {
        "https" => Some(443),
        "http" => Some(80),
        _ => None,
    });

    Some(ValidatedUrl {
        host: host.to_string(),
        port,
        path: parsed.path().to_string(),
        scheme,
    })
}

/// URL校验器
///
/// 按输入字符串缓存校验结果，均摊重复URI的校验成本
pub struct UrlValidator {
    cache: Mutex<LruCache<String, Option<ValidatedUrl>>>,
}

impl UrlValidator {
    pub fn new() -> Self {
        Self {
            cache: Mutex::new(LruCache::new(
                NonZeroUsize::new(VALIDATION_CACHE_SIZE).unwrap(),
            )),
        }
    }

    /// 校验URL，命中缓存时不重复解析
    pub fn validate(&self, uri: &str) -> Option<ValidatedUrl> {
        let mut cache = self.cache.lock();
        if let Some(cached) = cache.get(uri) {
            return cached.clone();
        }
        let result = validate_url(uri);
        cache.put(uri.to_string(), result.clone());
        result
    }
}

impl Default for UrlValidator {
    fn default() -> Self {
        Self::new()
    }
}
