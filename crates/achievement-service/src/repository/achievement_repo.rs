//! 成就目录仓储

use async_trait::async_trait;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use super::traits::AchievementRepositoryTrait;
use crate::error::Result;
use crate::models::{Achievement, AchievementCategory};

const ACHIEVEMENT_COLUMNS: &str = r#"
    id, uuid, title, description, star_points, category,
    icon_url, is_active, created_by, created_at, updated_at
"#;

/// 成就目录仓储
pub struct AchievementRepository {
    pool: PgPool,
}

impl AchievementRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AchievementRepositoryTrait for AchievementRepository {
    async fn get(&self, id: i64) -> Result<Option<Achievement>> {
        let achievement = sqlx::query_as::<_, Achievement>(&format!(
            "SELECT {ACHIEVEMENT_COLUMNS} FROM achievements WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(achievement)
    }

    async fn get_by_uuid(&self, uuid: Uuid) -> Result<Option<Achievement>> {
        let achievement = sqlx::query_as::<_, Achievement>(&format!(
            "SELECT {ACHIEVEMENT_COLUMNS} FROM achievements WHERE uuid = $1"
        ))
        .bind(uuid)
        .fetch_optional(&self.pool)
        .await?;

        Ok(achievement)
    }

    async fn get_by_ids(&self, ids: &[i64]) -> Result<Vec<Achievement>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let achievements = sqlx::query_as::<_, Achievement>(&format!(
            "SELECT {ACHIEVEMENT_COLUMNS} FROM achievements WHERE id = ANY($1)"
        ))
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(achievements)
    }

    async fn list_active(&self) -> Result<Vec<Achievement>> {
        let achievements = sqlx::query_as::<_, Achievement>(&format!(
            r#"
            SELECT {ACHIEVEMENT_COLUMNS} FROM achievements
            WHERE is_active = TRUE
            ORDER BY created_at DESC
            "#
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(achievements)
    }

    async fn list_by_category(&self, category: AchievementCategory) -> Result<Vec<Achievement>> {
        let achievements = sqlx::query_as::<_, Achievement>(&format!(
            r#"
            SELECT {ACHIEVEMENT_COLUMNS} FROM achievements
            WHERE category = $1 AND is_active = TRUE
            ORDER BY created_at DESC
            "#
        ))
        .bind(category)
        .fetch_all(&self.pool)
        .await?;

        Ok(achievements)
    }

    async fn search(&self, term: &str) -> Result<Vec<Achievement>> {
        // 空检索词退化为 %%，等价于返回全部 active 条目
        let pattern = format!("%{}%", term);

        let achievements = sqlx::query_as::<_, Achievement>(&format!(
            r#"
            SELECT {ACHIEVEMENT_COLUMNS} FROM achievements
            WHERE is_active = TRUE
              AND (title ILIKE $1 OR description ILIKE $1)
            ORDER BY created_at DESC
            "#
        ))
        .bind(pattern)
        .fetch_all(&self.pool)
        .await?;

        Ok(achievements)
    }

    async fn insert(&self, achievement: &Achievement) -> Result<i64> {
        let row = sqlx::query(
            r#"
            INSERT INTO achievements (uuid, title, description, star_points, category,
                                      icon_url, is_active, created_by, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING id
            "#,
        )
        .bind(achievement.uuid)
        .bind(&achievement.title)
        .bind(&achievement.description)
        .bind(achievement.star_points)
        .bind(achievement.category)
        .bind(&achievement.icon_url)
        .bind(achievement.is_active)
        .bind(achievement.created_by)
        .bind(achievement.created_at)
        .bind(achievement.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.get("id"))
    }

    async fn update(&self, achievement: &Achievement) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE achievements
            SET title = $2, description = $3, star_points = $4, category = $5,
                icon_url = $6, is_active = $7, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(achievement.id)
        .bind(&achievement.title)
        .bind(&achievement.description)
        .bind(achievement.star_points)
        .bind(achievement.category)
        .bind(&achievement.icon_url)
        .bind(achievement.is_active)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<()> {
        sqlx::query("DELETE FROM achievements WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
