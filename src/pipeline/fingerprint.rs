// Copyright (c) 2025 CredSift Contributors
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 标题关键字指纹，按固定顺序检查
const TITLE_PATTERNS: [(&str, &[&str]); 7] = [
    ("WordPress", &["wordpress"]),
    ("Joomla", &["joomla"]),
    ("Drupal", &["drupal"]),
    ("phpMyAdmin", &["phpmyadmin"]),
    ("Zimbra", &["zimbra"]),
    ("Atlassian Jira", &["jira"]),
    ("Magento", &["magento"]),
];

/// generator元标签指纹，按固定顺序检查
const META_PATTERNS: [(&str, &[&str]); 3] = [
    ("WordPress", &["generator\" content=\"wordpress"]),
    ("Joomla", &["generator\" content=\"joomla"]),
    ("Drupal", &["generator\" content=\"drupal"]),
];

/// 基于URL/路径模式识别Web应用
///
/// 对外部提供的有序模式表做大小写不敏感的子串匹配，
/// 首个命中即返回；模式表的源顺序有意义，必须保留。
///
/// # 参数
///
/// * `uri` - 完整URI
/// * `path` - URL路径部分
/// * `patterns` - 有序的 子串→应用名 映射
pub fn detect_application_from_url(
    uri: &str,
    path: &str,
    patterns: &[(String, String)],
) -> Option<String> {
    let uri_lower = uri.to_lowercase();
    let path_lower = path.to_lowercase();
    for (pattern, app) in patterns {
        if uri_lower.contains(pattern.as_str()) || path_lower.contains(pattern.as_str()) {
            return Some(app.clone());
        }
    }
    None
}

/// 基于响应内容识别Web应用
///
/// 仅在URL阶段没有命中且抓取到了响应体时调用。
/// 依次检查标题关键字和generator元标签关键字，
/// 返回固定检查顺序下的首个命中。
pub fn detect_application_from_body(body: &str) -> Option<String> {
    let lowered = body.to_lowercase();

    for (app, keywords) in TITLE_PATTERNS {
        if keywords.iter().any(|keyword| lowered.contains(keyword)) {
            return Some(app.to_string());
        }
    }

    for (app, keywords) in META_PATTERNS {
        if keywords.iter().any(|keyword| lowered.contains(keyword)) {
            return Some(app.to_string());
        }
    }

    None
}
