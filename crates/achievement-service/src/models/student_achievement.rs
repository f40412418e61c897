//! 学生成就记录实体定义

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::AwardStatus;

/// 学生成就记录
///
/// 学生与成就的关联实体，携带审核状态。
/// 不变量：同一 (student_id, achievement_id) 至多一条记录，
/// 由数据库唯一约束保证，仓储层将唯一冲突翻译为业务 Conflict 错误。
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct StudentAchievement {
    pub id: i64,
    /// 对外暴露的不透明标识
    pub uuid: Uuid,
    pub student_id: i64,
    pub achievement_id: i64,
    pub status: AwardStatus,
    #[sqlx(default)]
    pub notes: Option<String>,
    #[sqlx(default)]
    pub evidence_url: Option<String>,
    /// 审批人用户 ID，仅在状态离开 pending 时写入
    #[sqlx(default)]
    pub approved_by: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl StudentAchievement {
    /// 构造一条待审核的新记录（id 由数据库生成，无审批人）
    pub fn new(
        student_id: i64,
        achievement_id: i64,
        notes: Option<String>,
        evidence_url: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            uuid: Uuid::new_v4(),
            student_id,
            achievement_id,
            status: AwardStatus::Pending,
            notes,
            evidence_url,
            approved_by: None,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_record_is_pending_without_approver() {
        let record = StudentAchievement::new(1, 7, Some("备注".into()), None);
        assert_eq!(record.status, AwardStatus::Pending);
        assert!(record.approved_by.is_none());
        assert_eq!(record.student_id, 1);
        assert_eq!(record.achievement_id, 7);
    }
}
