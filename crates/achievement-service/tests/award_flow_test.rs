//! 成就授予流程集成测试
//!
//! 使用真实 PostgreSQL 验证申领 -> 审核 -> 统计的完整链路，
//! 以及唯一性不变量在真实唯一约束下的表现。
//! mock 无法覆盖数据库层的冲突翻译，因此需要集成测试。
//!
//! ## 运行方式
//!
//! ```bash
//! DATABASE_URL=postgres://... cargo test --test award_flow_test -- --ignored
//! ```

use std::sync::Arc;

use achievement_service::error::CoreError;
use achievement_service::models::{AchievementCategory, Actor, AwardStatus, UserRole};
use achievement_service::repository::{
    AchievementRepository, StudentAchievementRepository, UserRepository,
};
use achievement_service::service::dto::{AwardInput, AwardReview, NewAchievement, NewUser};
use achievement_service::service::{AwardService, CatalogService, StatsService, UserService};
use sqlx::PgPool;
use uuid::Uuid;

// ==================== 辅助函数 ====================

/// 从环境变量读取数据库 URL，未设置则 panic
fn database_url() -> String {
    std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for integration tests")
}

/// 建立连接池并应用迁移
async fn setup_pool() -> PgPool {
    let config = achievement_shared::config::DatabaseConfig {
        url: database_url(),
        max_connections: 4,
        ..Default::default()
    };
    let db = achievement_shared::database::Database::connect(&config)
        .await
        .expect("连接数据库失败");
    db.run_migrations().await.expect("应用迁移失败");
    db.pool().clone()
}

struct TestStack {
    user_svc: UserService<UserRepository>,
    catalog_svc: CatalogService<AchievementRepository>,
    award_svc: AwardService<AchievementRepository, UserRepository, StudentAchievementRepository>,
    stats_svc: StatsService<AchievementRepository, StudentAchievementRepository>,
}

fn build_stack(pool: &PgPool) -> TestStack {
    let user_repo = Arc::new(UserRepository::new(pool.clone()));
    let achievement_repo = Arc::new(AchievementRepository::new(pool.clone()));
    let record_repo = Arc::new(StudentAchievementRepository::new(pool.clone()));

    TestStack {
        user_svc: UserService::new(user_repo.clone()),
        catalog_svc: CatalogService::new(achievement_repo.clone()),
        award_svc: AwardService::new(
            achievement_repo.clone(),
            user_repo,
            record_repo.clone(),
        ),
        stats_svc: StatsService::new(achievement_repo, record_repo),
    }
}

/// 创建一个测试用户，邮箱随机保证可重复运行
async fn seed_user(stack: &TestStack, role: UserRole) -> Actor {
    let user = stack
        .user_svc
        .create(NewUser {
            firstname: "Тест".into(),
            lastname: "Тестов".into(),
            surname: "Тестович".into(),
            email: format!("{}@integ.test", Uuid::new_v4()),
            password_hash: "$2b$12$integration-test-hash".into(),
            role: Some(role),
            college: Some("IntegTest".into()),
        })
        .await
        .expect("创建测试用户失败");
    Actor::new(user.id, user.role)
}

/// 创建一个测试成就
async fn seed_achievement(stack: &TestStack, creator: &Actor, star_points: i32) -> i64 {
    stack
        .catalog_svc
        .create(
            creator,
            NewAchievement {
                title: format!("IntegTest {}", Uuid::new_v4()),
                description: "集成测试用成就".into(),
                star_points,
                category: Some(AchievementCategory::Academic),
                icon_url: None,
                is_active: Some(true),
            },
        )
        .await
        .expect("创建测试成就失败")
        .id
}

// ==================== 测试用例 ====================

/// 端到端：学生申领 -> 辅导员批准 -> 学生统计反映批准与积分
#[tokio::test]
#[ignore]
async fn test_claim_approve_stats_flow() {
    let pool = setup_pool().await;
    let stack = build_stack(&pool);

    let curator = seed_user(&stack, UserRole::Curator).await;
    let student = seed_user(&stack, UserRole::Student).await;
    let achievement_id = seed_achievement(&stack, &curator, 50).await;

    let record = stack
        .award_svc
        .claim(&student, achievement_id, AwardInput::default())
        .await
        .expect("申领失败");
    assert_eq!(record.status, AwardStatus::Pending);
    assert!(record.approved_by.is_none());

    let reviewed = stack
        .award_svc
        .review(
            &curator,
            record.id,
            AwardReview {
                status: Some(AwardStatus::Approved),
                ..Default::default()
            },
        )
        .await
        .expect("审核失败");
    assert_eq!(reviewed.status, AwardStatus::Approved);
    assert_eq!(reviewed.approved_by, Some(curator.id));

    let stats = stack
        .stats_svc
        .student_stats(student.id)
        .await
        .expect("统计失败");
    assert_eq!(stats.total_achievements, 1);
    assert_eq!(stats.approved_achievements, 1);
    assert_eq!(stats.pending_achievements, 0);
    assert_eq!(stats.rejected_achievements, 0);
    assert_eq!(stats.total_points, 50);
}

/// 端到端：重复申领返回 Conflict，库中只有一条记录
#[tokio::test]
#[ignore]
async fn test_duplicate_claim_is_conflict_and_single_row() {
    let pool = setup_pool().await;
    let stack = build_stack(&pool);

    let curator = seed_user(&stack, UserRole::Curator).await;
    let student = seed_user(&stack, UserRole::Student).await;
    let achievement_id = seed_achievement(&stack, &curator, 10).await;

    stack
        .award_svc
        .claim(&student, achievement_id, AwardInput::default())
        .await
        .expect("首次申领失败");

    let err = stack
        .award_svc
        .claim(&student, achievement_id, AwardInput::default())
        .await
        .expect_err("重复申领应失败");
    assert!(matches!(err, CoreError::AlreadyAwarded { .. }));

    let records = stack
        .award_svc
        .list_by_student(student.id)
        .await
        .expect("查询失败");
    assert_eq!(records.len(), 1, "重复申领不应产生第二条记录");
}

/// 代授予与重复授予：辅导员授予成功，针对同一对重复授予返回 Conflict
#[tokio::test]
#[ignore]
async fn test_grant_and_duplicate_grant() {
    let pool = setup_pool().await;
    let stack = build_stack(&pool);

    let curator = seed_user(&stack, UserRole::Curator).await;
    let student = seed_user(&stack, UserRole::Student).await;
    let achievement_id = seed_achievement(&stack, &curator, 15).await;

    let record = stack
        .award_svc
        .grant(&curator, student.id, achievement_id, AwardInput::default())
        .await
        .expect("代授予失败");
    assert_eq!(record.student_id, student.id);

    let err = stack
        .award_svc
        .grant(&curator, student.id, achievement_id, AwardInput::default())
        .await
        .expect_err("重复授予应失败");
    assert!(matches!(err, CoreError::AlreadyAwarded { .. }));
}

/// 删除权限：本人可删，他人（非管理员）被拒，管理员总是可删
#[tokio::test]
#[ignore]
async fn test_delete_permissions() {
    let pool = setup_pool().await;
    let stack = build_stack(&pool);

    let curator = seed_user(&stack, UserRole::Curator).await;
    let admin = seed_user(&stack, UserRole::Admin).await;
    let owner = seed_user(&stack, UserRole::Student).await;
    let other = seed_user(&stack, UserRole::Student).await;

    // 本人删除
    let achievement_id = seed_achievement(&stack, &curator, 5).await;
    let record = stack
        .award_svc
        .claim(&owner, achievement_id, AwardInput::default())
        .await
        .unwrap();
    stack
        .award_svc
        .remove(&owner, record.id)
        .await
        .expect("本人删除应成功");

    // 他人删除被拒
    let record = stack
        .award_svc
        .claim(&owner, achievement_id, AwardInput::default())
        .await
        .unwrap();
    let err = stack.award_svc.remove(&other, record.id).await.unwrap_err();
    assert!(matches!(err, CoreError::Forbidden(_)));

    // 管理员删除
    stack
        .award_svc
        .remove(&admin, record.id)
        .await
        .expect("管理员删除应成功");
}

/// 零记录成就的统计返回全零而非错误
#[tokio::test]
#[ignore]
async fn test_achievement_stats_with_no_records() {
    let pool = setup_pool().await;
    let stack = build_stack(&pool);

    let curator = seed_user(&stack, UserRole::Curator).await;
    let achievement_id = seed_achievement(&stack, &curator, 5).await;

    let stats = stack
        .stats_svc
        .achievement_stats(achievement_id)
        .await
        .expect("统计失败");
    assert_eq!(stats.total_students, 0);
    assert_eq!(stats.approved_students, 0);
    assert_eq!(stats.pending_students, 0);
    assert_eq!(stats.rejected_students, 0);
}

/// 目录检索：大小写不敏感子串匹配，只返回 active 条目
#[tokio::test]
#[ignore]
async fn test_catalog_search_is_case_insensitive_and_active_only() {
    let pool = setup_pool().await;
    let stack = build_stack(&pool);

    let curator = seed_user(&stack, UserRole::Curator).await;
    let marker = Uuid::new_v4().simple().to_string();

    let active_id = stack
        .catalog_svc
        .create(
            &curator,
            NewAchievement {
                title: format!("Olympiad-{}", marker),
                description: "数学奥赛".into(),
                star_points: 40,
                category: Some(AchievementCategory::Academic),
                icon_url: None,
                is_active: Some(true),
            },
        )
        .await
        .unwrap()
        .id;

    stack
        .catalog_svc
        .create(
            &curator,
            NewAchievement {
                title: format!("olympiad-hidden-{}", marker),
                description: "已下线".into(),
                star_points: 40,
                category: Some(AchievementCategory::Academic),
                icon_url: None,
                is_active: Some(false),
            },
        )
        .await
        .unwrap();

    let found = stack
        .catalog_svc
        .search(&format!("OLYMPIAD-{}", marker.to_uppercase()))
        .await
        .unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, active_id);
}
