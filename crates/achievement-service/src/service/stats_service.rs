//! 统计聚合服务
//!
//! 只读聚合，无副作用。从成就记录表派生学生维度和成就维度的统计，
//! 空数据集返回全零而非错误。

use std::collections::HashMap;
use std::sync::Arc;

use tracing::instrument;

use crate::error::Result;
use crate::models::AwardStatus;
use crate::repository::{AchievementRepositoryTrait, StudentAchievementRepositoryTrait};
use crate::service::dto::{AchievementStats, StudentStats};

/// 统计聚合服务
pub struct StatsService<AR, SR>
where
    AR: AchievementRepositoryTrait,
    SR: StudentAchievementRepositoryTrait,
{
    achievement_repo: Arc<AR>,
    record_repo: Arc<SR>,
}

impl<AR, SR> StatsService<AR, SR>
where
    AR: AchievementRepositoryTrait,
    SR: StudentAchievementRepositoryTrait,
{
    pub fn new(achievement_repo: Arc<AR>, record_repo: Arc<SR>) -> Self {
        Self {
            achievement_repo,
            record_repo,
        }
    }

    /// 学生维度统计
    ///
    /// total_points 只累加 approved 记录对应成就的积分；
    /// pending/rejected 记录对积分无贡献
    #[instrument(skip(self))]
    pub async fn student_stats(&self, student_id: i64) -> Result<StudentStats> {
        let records = self.record_repo.list_by_student(student_id).await?;

        let approved_ids: Vec<i64> = records
            .iter()
            .filter(|r| r.status.counts_toward_points())
            .map(|r| r.achievement_id)
            .collect();

        // 唯一性不变量保证 approved_ids 无重复，map 仅用于按 ID 对齐积分
        let points_by_id: HashMap<i64, i32> = self
            .achievement_repo
            .get_by_ids(&approved_ids)
            .await?
            .into_iter()
            .map(|a| (a.id, a.star_points))
            .collect();

        let total_points: i64 = approved_ids
            .iter()
            .filter_map(|id| points_by_id.get(id))
            .map(|p| i64::from(*p))
            .sum();

        Ok(StudentStats {
            total_achievements: records.len() as i64,
            approved_achievements: count_status(&records, AwardStatus::Approved),
            pending_achievements: count_status(&records, AwardStatus::Pending),
            rejected_achievements: count_status(&records, AwardStatus::Rejected),
            total_points,
        })
    }

    /// 成就维度统计
    ///
    /// 只统计状态计数，不聚合积分（积分是学生维度的概念）
    #[instrument(skip(self))]
    pub async fn achievement_stats(&self, achievement_id: i64) -> Result<AchievementStats> {
        let records = self.record_repo.list_by_achievement(achievement_id).await?;

        Ok(AchievementStats {
            total_students: records.len() as i64,
            approved_students: count_status(&records, AwardStatus::Approved),
            pending_students: count_status(&records, AwardStatus::Pending),
            rejected_students: count_status(&records, AwardStatus::Rejected),
        })
    }
}

fn count_status(records: &[crate::models::StudentAchievement], status: AwardStatus) -> i64 {
    records.iter().filter(|r| r.status == status).count() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Achievement, AchievementCategory, StudentAchievement};
    use crate::repository::{
        MockAchievementRepositoryTrait, MockStudentAchievementRepositoryTrait,
    };

    fn record(id: i64, student_id: i64, achievement_id: i64, status: AwardStatus) -> StudentAchievement {
        let mut r = StudentAchievement::new(student_id, achievement_id, None, None);
        r.id = id;
        r.status = status;
        r
    }

    fn achievement(id: i64, star_points: i32) -> Achievement {
        let mut a = Achievement::new(
            format!("成就{}", id),
            "描述".into(),
            star_points,
            AchievementCategory::Academic,
            None,
            true,
            None,
        );
        a.id = id;
        a
    }

    #[tokio::test]
    async fn test_student_stats_counts_approved_points_only() {
        let mut record_repo = MockStudentAchievementRepositoryTrait::new();
        record_repo.expect_list_by_student().returning(|student_id| {
            Ok(vec![
                record(1, student_id, 7, AwardStatus::Approved),
                record(2, student_id, 8, AwardStatus::Pending),
                record(3, student_id, 9, AwardStatus::Rejected),
                record(4, student_id, 10, AwardStatus::Approved),
            ])
        });

        let mut achievement_repo = MockAchievementRepositoryTrait::new();
        achievement_repo
            .expect_get_by_ids()
            .withf(|ids| ids == [7, 10])
            .returning(|_| Ok(vec![achievement(7, 50), achievement(10, 20)]));

        let svc = StatsService::new(Arc::new(achievement_repo), Arc::new(record_repo));
        let stats = svc.student_stats(1).await.unwrap();

        assert_eq!(
            stats,
            StudentStats {
                total_achievements: 4,
                approved_achievements: 2,
                pending_achievements: 1,
                rejected_achievements: 1,
                // 只有 approved 的 7 和 10 计分；pending 的 8、rejected 的 9 不计
                total_points: 70,
            }
        );
    }

    #[tokio::test]
    async fn test_student_stats_with_no_records_is_all_zero() {
        let mut record_repo = MockStudentAchievementRepositoryTrait::new();
        record_repo
            .expect_list_by_student()
            .returning(|_| Ok(Vec::new()));

        let mut achievement_repo = MockAchievementRepositoryTrait::new();
        achievement_repo
            .expect_get_by_ids()
            .returning(|_| Ok(Vec::new()));

        let svc = StatsService::new(Arc::new(achievement_repo), Arc::new(record_repo));
        let stats = svc.student_stats(1).await.unwrap();

        assert_eq!(stats.total_achievements, 0);
        assert_eq!(stats.total_points, 0);
    }

    #[tokio::test]
    async fn test_achievement_stats_counts_by_status() {
        let mut record_repo = MockStudentAchievementRepositoryTrait::new();
        record_repo
            .expect_list_by_achievement()
            .returning(|achievement_id| {
                Ok(vec![
                    record(1, 1, achievement_id, AwardStatus::Approved),
                    record(2, 2, achievement_id, AwardStatus::Pending),
                    record(3, 3, achievement_id, AwardStatus::Pending),
                ])
            });

        let svc = StatsService::new(
            Arc::new(MockAchievementRepositoryTrait::new()),
            Arc::new(record_repo),
        );
        let stats = svc.achievement_stats(7).await.unwrap();

        assert_eq!(
            stats,
            AchievementStats {
                total_students: 3,
                approved_students: 1,
                pending_students: 2,
                rejected_students: 0,
            }
        );
    }

    #[tokio::test]
    async fn test_achievement_stats_with_no_records_is_all_zero() {
        let mut record_repo = MockStudentAchievementRepositoryTrait::new();
        record_repo
            .expect_list_by_achievement()
            .returning(|_| Ok(Vec::new()));

        let svc = StatsService::new(
            Arc::new(MockAchievementRepositoryTrait::new()),
            Arc::new(record_repo),
        );
        let stats = svc.achievement_stats(404).await.unwrap();

        assert_eq!(stats.total_students, 0);
        assert_eq!(stats.approved_students, 0);
        assert_eq!(stats.pending_students, 0);
        assert_eq!(stats.rejected_students, 0);
    }
}
