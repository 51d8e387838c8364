// Copyright (c) 2025 CredSift Contributors
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

pub mod fingerprint;
pub mod parser;
pub mod prober;
pub mod resolver;
pub mod tagging;
pub mod validator;

use once_cell::sync::Lazy;
use regex::Regex;

/// 可识别的协议前缀
pub(crate) static SCHEME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(http|https|android|mqtt|coap)://").unwrap());
