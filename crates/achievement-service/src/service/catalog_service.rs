//! 成就目录服务
//!
//! 成就定义的增删改查与检索。编辑/删除由创建者归属规则闸门，
//! 更新走显式字段白名单。

use std::sync::Arc;

use tracing::{info, instrument};
use uuid::Uuid;

use crate::error::{CoreError, Result};
use crate::models::{Achievement, AchievementCategory, Actor};
use crate::policy;
use crate::repository::AchievementRepositoryTrait;
use crate::service::dto::{AchievementUpdate, NewAchievement};

/// 成就目录服务
pub struct CatalogService<AR>
where
    AR: AchievementRepositoryTrait,
{
    repo: Arc<AR>,
}

impl<AR> CatalogService<AR>
where
    AR: AchievementRepositoryTrait,
{
    pub fn new(repo: Arc<AR>) -> Self {
        Self { repo }
    }

    /// 创建成就，记录创建者
    #[instrument(skip(self, data), fields(actor_id = actor.id))]
    pub async fn create(&self, actor: &Actor, data: NewAchievement) -> Result<Achievement> {
        // 传输层已做格式校验，这里复查本服务依赖的不变量
        if data.star_points < 0 {
            return Err(CoreError::Validation("成就积分不能为负数".to_string()));
        }

        let mut achievement = Achievement::new(
            data.title,
            data.description,
            data.star_points,
            data.category.unwrap_or_default(),
            data.icon_url,
            data.is_active.unwrap_or(true),
            Some(actor.id),
        );
        achievement.id = self.repo.insert(&achievement).await?;

        info!(achievement_id = achievement.id, "成就已创建");

        Ok(achievement)
    }

    /// 按数值 ID 查询
    pub async fn get(&self, id: i64) -> Result<Achievement> {
        self.repo
            .get(id)
            .await?
            .ok_or_else(|| CoreError::AchievementNotFound(id.to_string()))
    }

    /// 按不透明外部标识查询
    pub async fn get_by_uuid(&self, uuid: Uuid) -> Result<Achievement> {
        self.repo
            .get_by_uuid(uuid)
            .await?
            .ok_or_else(|| CoreError::AchievementNotFound(uuid.to_string()))
    }

    /// 更新成就（白名单字段）
    ///
    /// 仅创建者或管理员可更新；存在性检查先于权限检查
    #[instrument(skip(self, update), fields(actor_id = actor.id, achievement_id = id))]
    pub async fn update(
        &self,
        actor: &Actor,
        id: i64,
        update: AchievementUpdate,
    ) -> Result<Achievement> {
        let mut achievement = self.get(id).await?;

        if !policy::can_edit_achievement(actor, achievement.created_by) {
            return Err(CoreError::Forbidden(
                "您没有权限编辑该成就".to_string(),
            ));
        }

        if let Some(star_points) = update.star_points {
            if star_points < 0 {
                return Err(CoreError::Validation("成就积分不能为负数".to_string()));
            }
            achievement.star_points = star_points;
        }
        if let Some(title) = update.title {
            achievement.title = title;
        }
        if let Some(description) = update.description {
            achievement.description = description;
        }
        if let Some(category) = update.category {
            achievement.category = category;
        }
        if let Some(icon_url) = update.icon_url {
            achievement.icon_url = Some(icon_url);
        }
        if let Some(is_active) = update.is_active {
            achievement.is_active = is_active;
        }

        self.repo.update(&achievement).await?;

        info!(achievement_id = id, "成就已更新");

        Ok(achievement)
    }

    /// 删除成就
    #[instrument(skip(self), fields(actor_id = actor.id, achievement_id = id))]
    pub async fn remove(&self, actor: &Actor, id: i64) -> Result<()> {
        let achievement = self.get(id).await?;

        if !policy::can_delete_achievement(actor, achievement.created_by) {
            return Err(CoreError::Forbidden(
                "您没有权限删除该成就".to_string(),
            ));
        }

        self.repo.delete(id).await?;

        info!(achievement_id = id, "成就已删除");

        Ok(())
    }

    /// 全部 active 成就（最新在前）
    pub async fn list_active(&self) -> Result<Vec<Achievement>> {
        self.repo.list_active().await
    }

    /// 按分类列出 active 成就
    pub async fn find_by_category(
        &self,
        category: AchievementCategory,
    ) -> Result<Vec<Achievement>> {
        self.repo.list_by_category(category).await
    }

    /// 标题/描述检索（大小写不敏感子串，仅 active；空检索词返回全部 active）
    pub async fn search(&self, term: &str) -> Result<Vec<Achievement>> {
        self.repo.search(term).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserRole;
    use crate::repository::MockAchievementRepositoryTrait;

    fn sample_achievement(id: i64, created_by: Option<i64>) -> Achievement {
        let mut achievement = Achievement::new(
            "优秀学生".into(),
            "学年综合测评第一名".into(),
            50,
            AchievementCategory::Academic,
            None,
            true,
            created_by,
        );
        achievement.id = id;
        achievement
    }

    #[tokio::test]
    async fn test_create_records_creator() {
        let mut repo = MockAchievementRepositoryTrait::new();
        repo.expect_insert()
            .withf(|achievement| {
                achievement.created_by == Some(3)
                    && achievement.is_active
                    && achievement.category == AchievementCategory::Sports
            })
            .returning(|_| Ok(11));

        let svc = CatalogService::new(Arc::new(repo));
        let actor = Actor::new(3, UserRole::Curator);

        let achievement = svc
            .create(
                &actor,
                NewAchievement {
                    title: "校运会冠军".into(),
                    description: "百米决赛第一名".into(),
                    star_points: 30,
                    category: Some(AchievementCategory::Sports),
                    icon_url: None,
                    is_active: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(achievement.id, 11);
        assert_eq!(achievement.created_by, Some(3));
    }

    #[tokio::test]
    async fn test_create_rejects_negative_points() {
        let svc = CatalogService::new(Arc::new(MockAchievementRepositoryTrait::new()));
        let actor = Actor::new(3, UserRole::Admin);

        let err = svc
            .create(
                &actor,
                NewAchievement {
                    title: "x".into(),
                    description: "y".into(),
                    star_points: -1,
                    category: None,
                    icon_url: None,
                    is_active: None,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[tokio::test]
    async fn test_update_by_non_creator_is_forbidden() {
        let mut repo = MockAchievementRepositoryTrait::new();
        repo.expect_get()
            .returning(|id| Ok(Some(sample_achievement(id, Some(1)))));

        let svc = CatalogService::new(Arc::new(repo));
        let actor = Actor::new(2, UserRole::Student);

        let err = svc
            .update(&actor, 11, AchievementUpdate::default())
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::Forbidden(_)));
    }

    #[tokio::test]
    async fn test_update_applies_whitelisted_fields_only() {
        let mut repo = MockAchievementRepositoryTrait::new();
        repo.expect_get()
            .returning(|id| Ok(Some(sample_achievement(id, Some(1)))));
        repo.expect_update()
            .withf(|achievement| {
                achievement.title == "新标题"
                    && achievement.star_points == 80
                    && !achievement.is_active
                    // 未提供的字段保持不变
                    && achievement.description == "学年综合测评第一名"
                    && achievement.created_by == Some(1)
            })
            .returning(|_| Ok(()));

        let svc = CatalogService::new(Arc::new(repo));
        let actor = Actor::new(1, UserRole::Student);

        let achievement = svc
            .update(
                &actor,
                11,
                AchievementUpdate {
                    title: Some("新标题".into()),
                    star_points: Some(80),
                    is_active: Some(false),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(achievement.star_points, 80);
    }

    #[tokio::test]
    async fn test_remove_by_admin_succeeds() {
        let mut repo = MockAchievementRepositoryTrait::new();
        repo.expect_get()
            .returning(|id| Ok(Some(sample_achievement(id, Some(1)))));
        repo.expect_delete().returning(|_| Ok(()));

        let svc = CatalogService::new(Arc::new(repo));
        assert!(
            svc.remove(&Actor::new(9, UserRole::Admin), 11)
                .await
                .is_ok()
        );
    }

    #[tokio::test]
    async fn test_get_unknown_is_not_found() {
        let mut repo = MockAchievementRepositoryTrait::new();
        repo.expect_get().returning(|_| Ok(None));

        let svc = CatalogService::new(Arc::new(repo));
        let err = svc.get(404).await.unwrap_err();
        assert!(matches!(err, CoreError::AchievementNotFound(_)));
    }
}
