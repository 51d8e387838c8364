// Copyright (c) 2025 CredSift Contributors
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

use crate::domain::models::record::EnrichedRecord;
use crate::infrastructure::sink::RecordSink;
use crate::utils::errors::SinkError;

/// 插入语句；`breaches`表的模式管理不在本管道职责内，
/// 表假定已存在
const INSERT_SQL: &str = r#"
INSERT INTO breaches (
    uri, username, password, domain, ip_address, port, path, tags,
    title, is_resolved, is_accessible, has_login_form, login_form_type,
    web_application, is_parked, is_breached
) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
"#;

/// 关系型数据库接收器
///
/// 列语义与CSV接收器一致，外加从`tags.breach_status`派生的
/// `is_breached`布尔列
pub struct DatabaseSink {
    pool: PgPool,
}

impl DatabaseSink {
    /// 连接数据库并创建接收器
    pub async fn connect(database_url: &str) -> Result<Self, SinkError> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await?;
        info!("Database sink connected");
        Ok(Self { pool })
    }
}

#[async_trait]
impl RecordSink for DatabaseSink {
    async fn write_batch(&mut self, records: &[EnrichedRecord]) -> Result<(), SinkError> {
        // The whole batch shares one transaction: either every row of the
        // batch lands or the failure surfaces to the orchestrator
        let mut tx = self.pool.begin().await?;

        for record in records {
            sqlx::query(INSERT_SQL)
                .bind(&record.uri)
                .bind(&record.username)
                .bind(&record.password)
                .bind(&record.domain)
                .bind(&record.ip_address)
                .bind(record.port.map(i32::from))
                .bind(&record.path)
                .bind(record.tags.to_json())
                .bind(&record.title)
                .bind(record.is_resolved)
                .bind(record.is_accessible)
                .bind(record.has_login_form)
                .bind(record.login_form_type.map(|t| t.as_str()))
                .bind(&record.web_application)
                .bind(record.is_parked)
                .bind(record.tags.is_breached())
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(())
    }
}
