//! 成就授予与审核服务
//!
//! 处理成就记录生命周期的核心业务逻辑，包括：
//! - 学生自助申领（self-claim）
//! - 辅导员/管理员代学生授予（grant）
//! - 审核状态流转（pending -> approved/rejected，幂等覆盖语义）
//! - 记录删除
//! - (student_id, achievement_id) 唯一性保证
//!
//! ## 检查顺序
//!
//! - 申领/授予：权限（仅 grant）-> 实体存在性 -> 重复预检查 -> 插入
//! - 审核/删除：记录存在性 -> 权限
//!
//! 存在性先于权限是对线上行为的忠实复刻：权限失败不会泄露比同路径
//! NotFound 更多的存在性信息。
//!
//! ## 并发
//!
//! 重复预检查只保证常见路径报出友好的 Conflict；真正的原子性由
//! 数据库唯一约束提供，并发竞争的落败方在插入时收到 `AlreadyAwarded`。

use std::sync::Arc;

use tracing::{info, instrument};

use crate::error::{CoreError, Result};
use crate::models::{Actor, AwardStatus, StudentAchievement};
use crate::policy;
use crate::repository::{
    AchievementRepositoryTrait, StudentAchievementRepositoryTrait, UserRepositoryTrait,
};
use crate::service::dto::{AwardInput, AwardReview};
use uuid::Uuid;

/// 成就授予与审核服务
pub struct AwardService<AR, UR, SR>
where
    AR: AchievementRepositoryTrait,
    UR: UserRepositoryTrait,
    SR: StudentAchievementRepositoryTrait,
{
    achievement_repo: Arc<AR>,
    user_repo: Arc<UR>,
    record_repo: Arc<SR>,
}

impl<AR, UR, SR> AwardService<AR, UR, SR>
where
    AR: AchievementRepositoryTrait,
    UR: UserRepositoryTrait,
    SR: StudentAchievementRepositoryTrait,
{
    pub fn new(achievement_repo: Arc<AR>, user_repo: Arc<UR>, record_repo: Arc<SR>) -> Self {
        Self {
            achievement_repo,
            user_repo,
            record_repo,
        }
    }

    /// 学生自助申领成就
    ///
    /// 流程：
    /// 1. 成就存在性检查（存在即可申领，不要求 active）
    /// 2. 重复申领预检查
    /// 3. 插入 pending 记录（唯一约束兜底并发竞争）
    #[instrument(skip(self, input), fields(student_id = actor.id, achievement_id = achievement_id))]
    pub async fn claim(
        &self,
        actor: &Actor,
        achievement_id: i64,
        input: AwardInput,
    ) -> Result<StudentAchievement> {
        self.create_record(actor.id, achievement_id, input).await
    }

    /// 代学生授予成就
    ///
    /// 与自助申领的区别仅在于操作者与受益人身份分离，
    /// 因此多一道 can_grant_to_other 权限闸门。
    #[instrument(
        skip(self, input),
        fields(actor_id = actor.id, student_id = student_id, achievement_id = achievement_id)
    )]
    pub async fn grant(
        &self,
        actor: &Actor,
        student_id: i64,
        achievement_id: i64,
        input: AwardInput,
    ) -> Result<StudentAchievement> {
        // 1. 权限检查
        if !policy::can_grant_to_other(actor) {
            return Err(CoreError::Forbidden(
                "仅辅导员或管理员可代学生授予成就".to_string(),
            ));
        }

        // 2. 学生存在性检查
        self.user_repo
            .get(student_id)
            .await?
            .ok_or_else(|| CoreError::UserNotFound(student_id.to_string()))?;

        self.create_record(student_id, achievement_id, input).await
    }

    /// 创建成就记录（申领与授予的公共路径）
    async fn create_record(
        &self,
        student_id: i64,
        achievement_id: i64,
        input: AwardInput,
    ) -> Result<StudentAchievement> {
        // 成就存在性检查
        self.achievement_repo
            .get(achievement_id)
            .await?
            .ok_or_else(|| CoreError::AchievementNotFound(achievement_id.to_string()))?;

        // 重复预检查：常见路径下给出确定的 Conflict
        if self
            .record_repo
            .get_by_pair(student_id, achievement_id)
            .await?
            .is_some()
        {
            return Err(CoreError::AlreadyAwarded {
                student_id,
                achievement_id,
            });
        }

        let mut record = StudentAchievement::new(
            student_id,
            achievement_id,
            input.notes,
            input.evidence_url,
        );
        // 插入；并发竞争下唯一冲突由仓储层翻译为 AlreadyAwarded
        record.id = self.record_repo.insert(&record).await?;

        info!(
            student_id = student_id,
            achievement_id = achievement_id,
            record_id = record.id,
            "成就记录已创建"
        );

        Ok(record)
    }

    /// 审核/更新成就记录
    ///
    /// 任何枚举内的状态值都可被授权操作者重复写入（幂等覆盖语义）。
    /// 写入非 pending 状态时盖上审批人；重写 pending 不改动已有审批人。
    /// notes/evidence_url 仅在提供时替换。
    #[instrument(skip(self, review), fields(actor_id = actor.id, record_id = id))]
    pub async fn review(
        &self,
        actor: &Actor,
        id: i64,
        review: AwardReview,
    ) -> Result<StudentAchievement> {
        // 1. 记录存在性检查
        let mut record = self
            .record_repo
            .get(id)
            .await?
            .ok_or_else(|| CoreError::AwardNotFound(id.to_string()))?;

        // 2. 权限检查
        if !policy::can_review(actor, record.student_id) {
            return Err(CoreError::Forbidden(
                "您没有权限审核该成就记录".to_string(),
            ));
        }

        // 3. 白名单字段更新
        if let Some(status) = review.status {
            record.status = status;
            if status != AwardStatus::Pending {
                record.approved_by = Some(actor.id);
            }
        }
        if let Some(notes) = review.notes {
            record.notes = Some(notes);
        }
        if let Some(evidence_url) = review.evidence_url {
            record.evidence_url = Some(evidence_url);
        }

        self.record_repo.update_review(&record).await?;

        info!(
            record_id = record.id,
            status = ?record.status,
            "成就记录已更新"
        );

        Ok(record)
    }

    /// 删除成就记录
    #[instrument(skip(self), fields(actor_id = actor.id, record_id = id))]
    pub async fn remove(&self, actor: &Actor, id: i64) -> Result<()> {
        let record = self
            .record_repo
            .get(id)
            .await?
            .ok_or_else(|| CoreError::AwardNotFound(id.to_string()))?;

        if !policy::can_delete_award(actor, record.student_id) {
            return Err(CoreError::Forbidden(
                "您没有权限删除该成就记录".to_string(),
            ));
        }

        self.record_repo.delete(id).await?;

        info!(record_id = id, "成就记录已删除");

        Ok(())
    }

    /// 按数值 ID 查询
    pub async fn get(&self, id: i64) -> Result<StudentAchievement> {
        self.record_repo
            .get(id)
            .await?
            .ok_or_else(|| CoreError::AwardNotFound(id.to_string()))
    }

    /// 按不透明外部标识查询
    pub async fn get_by_uuid(&self, uuid: Uuid) -> Result<StudentAchievement> {
        self.record_repo
            .get_by_uuid(uuid)
            .await?
            .ok_or_else(|| CoreError::AwardNotFound(uuid.to_string()))
    }

    /// 全量列表（最新在前）
    pub async fn list(&self) -> Result<Vec<StudentAchievement>> {
        self.record_repo.list().await
    }

    /// 按学生列出
    pub async fn list_by_student(&self, student_id: i64) -> Result<Vec<StudentAchievement>> {
        self.record_repo.list_by_student(student_id).await
    }

    /// 按成就列出
    pub async fn list_by_achievement(
        &self,
        achievement_id: i64,
    ) -> Result<Vec<StudentAchievement>> {
        self.record_repo.list_by_achievement(achievement_id).await
    }

    /// 按状态列出
    pub async fn list_by_status(&self, status: AwardStatus) -> Result<Vec<StudentAchievement>> {
        self.record_repo.list_by_status(status).await
    }
}
