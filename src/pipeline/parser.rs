// Copyright (c) 2025 CredSift Contributors
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::credential::ParsedCredential;
use crate::pipeline::SCHEME_PATTERN;
use crate::utils::errors::ParseError;

/// 解析一条凭据泄露行
///
/// 以最后一个冒号作为用户名/密码分隔符，倒数第二个冒号作为
/// URI/用户名分隔符。URI本身可能包含冒号（如`http://`），
/// 因此必须从右向左切分，从左切分会在协议处断开。
///
/// # 参数
///
/// * `line` - 原始的`uri:username:password`行
///
/// # 返回值
///
/// * `Ok(ParsedCredential)` - 解析出的凭据，URI保证带协议
/// * `Err(ParseError)` - 行格式错误或凭据被完全掩码
pub fn parse_credentials(line: &str) -> Result<ParsedCredential, ParseError> {
    let last_colon = line.rfind(':').ok_or(ParseError::MalformedLine)?;
    let second_last_colon = line[..last_colon]
        .rfind(':')
        .ok_or(ParseError::MalformedLine)?;

    let uri = line[..second_last_colon].trim();
    let username = line[second_last_colon + 1..last_colon].trim();
    let password = line[last_colon + 1..].trim();

    // Fully masked credentials carry no signal, drop them here
    if username.trim_matches('*').is_empty() || password.trim_matches('*').is_empty() {
        return Err(ParseError::MaskedCredentials);
    }

    let uri = if SCHEME_PATTERN.is_match(uri) {
        uri.to_string()
    } else {
        format!("http://{}", uri)
    };

    Ok(ParsedCredential {
        uri,
        username: username.to_string(),
        password: password.to_string(),
    })
}
