// Copyright (c) 2025 CredSift Contributors
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use thiserror::Error;

/// 凭据行解析错误类型
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseError {
    #[error("malformed line: fewer than two colon separators")]
    MalformedLine,

    #[error("credentials fully masked")]
    MaskedCredentials,
}

/// 输出接收器错误类型
#[derive(Error, Debug)]
pub enum SinkError {
    #[error("csv write error: {0}")]
    Csv(#[from] csv::Error),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// 管道运行错误类型
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("sink failure: {0}")]
    Sink(#[from] SinkError),

    #[error("input error: {0}")]
    Input(String),

    #[error("http client error: {0}")]
    Client(#[from] reqwest::Error),
}
