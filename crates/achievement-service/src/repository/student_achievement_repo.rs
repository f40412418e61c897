//! 学生成就记录仓储
//!
//! (student_id, achievement_id) 唯一约束在此层被翻译为业务 Conflict 错误，
//! 并发申领竞争的落败方据此收到 `AlreadyAwarded` 而非裸数据库错误。

use async_trait::async_trait;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use super::is_unique_violation;
use super::traits::StudentAchievementRepositoryTrait;
use crate::error::{CoreError, Result};
use crate::models::{AwardStatus, StudentAchievement};

const RECORD_COLUMNS: &str = r#"
    id, uuid, student_id, achievement_id, status, notes,
    evidence_url, approved_by, created_at, updated_at
"#;

/// 学生成就记录仓储
pub struct StudentAchievementRepository {
    pool: PgPool,
}

impl StudentAchievementRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StudentAchievementRepositoryTrait for StudentAchievementRepository {
    async fn get(&self, id: i64) -> Result<Option<StudentAchievement>> {
        let record = sqlx::query_as::<_, StudentAchievement>(&format!(
            "SELECT {RECORD_COLUMNS} FROM student_achievements WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    async fn get_by_uuid(&self, uuid: Uuid) -> Result<Option<StudentAchievement>> {
        let record = sqlx::query_as::<_, StudentAchievement>(&format!(
            "SELECT {RECORD_COLUMNS} FROM student_achievements WHERE uuid = $1"
        ))
        .bind(uuid)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    async fn get_by_pair(
        &self,
        student_id: i64,
        achievement_id: i64,
    ) -> Result<Option<StudentAchievement>> {
        let record = sqlx::query_as::<_, StudentAchievement>(&format!(
            r#"
            SELECT {RECORD_COLUMNS} FROM student_achievements
            WHERE student_id = $1 AND achievement_id = $2
            "#
        ))
        .bind(student_id)
        .bind(achievement_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    async fn list(&self) -> Result<Vec<StudentAchievement>> {
        let records = sqlx::query_as::<_, StudentAchievement>(&format!(
            "SELECT {RECORD_COLUMNS} FROM student_achievements ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    async fn list_by_student(&self, student_id: i64) -> Result<Vec<StudentAchievement>> {
        let records = sqlx::query_as::<_, StudentAchievement>(&format!(
            r#"
            SELECT {RECORD_COLUMNS} FROM student_achievements
            WHERE student_id = $1
            ORDER BY created_at DESC
            "#
        ))
        .bind(student_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    async fn list_by_achievement(&self, achievement_id: i64) -> Result<Vec<StudentAchievement>> {
        let records = sqlx::query_as::<_, StudentAchievement>(&format!(
            r#"
            SELECT {RECORD_COLUMNS} FROM student_achievements
            WHERE achievement_id = $1
            ORDER BY created_at DESC
            "#
        ))
        .bind(achievement_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    async fn list_by_status(&self, status: AwardStatus) -> Result<Vec<StudentAchievement>> {
        let records = sqlx::query_as::<_, StudentAchievement>(&format!(
            r#"
            SELECT {RECORD_COLUMNS} FROM student_achievements
            WHERE status = $1
            ORDER BY created_at DESC
            "#
        ))
        .bind(status)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    async fn insert(&self, record: &StudentAchievement) -> Result<i64> {
        let row = sqlx::query(
            r#"
            INSERT INTO student_achievements
                (uuid, student_id, achievement_id, status, notes,
                 evidence_url, approved_by, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id
            "#,
        )
        .bind(record.uuid)
        .bind(record.student_id)
        .bind(record.achievement_id)
        .bind(record.status)
        .bind(&record.notes)
        .bind(&record.evidence_url)
        .bind(record.approved_by)
        .bind(record.created_at)
        .bind(record.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e, "uq_student_achievement") {
                CoreError::AlreadyAwarded {
                    student_id: record.student_id,
                    achievement_id: record.achievement_id,
                }
            } else {
                e.into()
            }
        })?;

        Ok(row.get("id"))
    }

    async fn update_review(&self, record: &StudentAchievement) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE student_achievements
            SET status = $2, notes = $3, evidence_url = $4,
                approved_by = $5, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(record.id)
        .bind(record.status)
        .bind(&record.notes)
        .bind(&record.evidence_url)
        .bind(record.approved_by)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<()> {
        sqlx::query("DELETE FROM student_achievements WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
