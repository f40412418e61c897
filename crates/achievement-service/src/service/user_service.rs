//! 用户服务
//!
//! 用户的增删改查与角色分布统计。更新走显式字段白名单，
//! 密码哈希只在创建时写入，资料更新路径无法触碰。

use std::sync::Arc;

use tracing::{info, instrument};
use uuid::Uuid;

use crate::error::{CoreError, Result};
use crate::models::{Actor, User, UserRole};
use crate::policy;
use crate::repository::UserRepositoryTrait;
use crate::service::dto::{NewUser, UserOverview, UserUpdate};

/// 用户服务
pub struct UserService<UR>
where
    UR: UserRepositoryTrait,
{
    repo: Arc<UR>,
}

impl<UR> UserService<UR>
where
    UR: UserRepositoryTrait,
{
    pub fn new(repo: Arc<UR>) -> Self {
        Self { repo }
    }

    /// 创建用户
    ///
    /// 角色缺省为 student；邮箱唯一冲突由仓储层翻译为 `EmailTaken`。
    /// 通过管理 API 创建用户的管理员权限闸门在传输层（policy::can_create_user），
    /// 注册路径不经过该闸门。
    #[instrument(skip(self, data), fields(email = %data.email))]
    pub async fn create(&self, data: NewUser) -> Result<User> {
        let mut user = User::new(
            data.firstname,
            data.lastname,
            data.surname,
            data.email,
            data.password_hash,
            data.role.unwrap_or_default(),
            data.college,
        );
        user.id = self.repo.insert(&user).await?;

        info!(user_id = user.id, "用户已创建");

        Ok(user)
    }

    /// 按数值 ID 查询
    pub async fn get(&self, id: i64) -> Result<User> {
        self.repo
            .get(id)
            .await?
            .ok_or_else(|| CoreError::UserNotFound(id.to_string()))
    }

    /// 按不透明外部标识查询
    pub async fn get_by_uuid(&self, uuid: Uuid) -> Result<User> {
        self.repo
            .get_by_uuid(uuid)
            .await?
            .ok_or_else(|| CoreError::UserNotFound(uuid.to_string()))
    }

    /// 按邮箱查询（登录路径：缺失不是错误）
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        self.repo.get_by_email(email).await
    }

    /// 全量列表（最新在前）
    pub async fn list(&self) -> Result<Vec<User>> {
        self.repo.list().await
    }

    /// 按角色列出
    pub async fn list_by_role(&self, role: UserRole) -> Result<Vec<User>> {
        self.repo.list_by_role(role).await
    }

    /// 更新用户资料（白名单字段）
    ///
    /// 本人或管理员可更新；存在性检查先于权限检查
    #[instrument(skip(self, update), fields(actor_id = actor.id, user_id = id))]
    pub async fn update(&self, actor: &Actor, id: i64, update: UserUpdate) -> Result<User> {
        let mut user = self.get(id).await?;

        if !policy::can_update_user(actor, user.id) {
            return Err(CoreError::Forbidden(
                "您没有权限更新该用户".to_string(),
            ));
        }

        if let Some(firstname) = update.firstname {
            user.firstname = firstname;
        }
        if let Some(lastname) = update.lastname {
            user.lastname = lastname;
        }
        if let Some(surname) = update.surname {
            user.surname = surname;
        }
        if let Some(email) = update.email {
            user.email = email;
        }
        if let Some(role) = update.role {
            user.role = role;
        }
        if let Some(college) = update.college {
            user.college = Some(college);
        }

        self.repo.update(&user).await?;

        info!(user_id = id, "用户已更新");

        Ok(user)
    }

    /// 删除用户
    #[instrument(skip(self), fields(actor_id = actor.id, user_id = id))]
    pub async fn remove(&self, actor: &Actor, id: i64) -> Result<()> {
        let user = self.get(id).await?;

        if !policy::can_delete_user(actor, user.id) {
            return Err(CoreError::Forbidden(
                "您没有权限删除该用户".to_string(),
            ));
        }

        self.repo.delete(id).await?;

        info!(user_id = id, "用户已删除");

        Ok(())
    }

    /// 角色分布统计
    pub async fn overview(&self) -> Result<UserOverview> {
        let counts = self.repo.count_by_role().await?;

        let mut overview = UserOverview {
            total_users: 0,
            students: 0,
            curators: 0,
            admins: 0,
        };
        for (role, count) in counts {
            overview.total_users += count;
            match role {
                UserRole::Student => overview.students = count,
                UserRole::Curator => overview.curators = count,
                UserRole::Admin => overview.admins = count,
            }
        }

        Ok(overview)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockUserRepositoryTrait;

    fn sample_user(id: i64) -> User {
        let mut user = User::new(
            "Иван".into(),
            "Иванов".into(),
            "Иванович".into(),
            format!("user{}@example.com", id),
            "hash".into(),
            UserRole::Student,
            Some("CS".into()),
        );
        user.id = id;
        user
    }

    #[tokio::test]
    async fn test_create_defaults_role_to_student() {
        let mut repo = MockUserRepositoryTrait::new();
        repo.expect_insert()
            .withf(|user| user.role == UserRole::Student)
            .returning(|_| Ok(1));

        let svc = UserService::new(Arc::new(repo));
        let user = svc
            .create(NewUser {
                firstname: "A".into(),
                lastname: "B".into(),
                surname: "C".into(),
                email: "a@b.c".into(),
                password_hash: "hash".into(),
                role: None,
                college: None,
            })
            .await
            .unwrap();
        assert_eq!(user.id, 1);
        assert_eq!(user.role, UserRole::Student);
    }

    #[tokio::test]
    async fn test_update_self_is_permitted() {
        let mut repo = MockUserRepositoryTrait::new();
        repo.expect_get().returning(|id| Ok(Some(sample_user(id))));
        repo.expect_update()
            .withf(|user| user.college.as_deref() == Some("Mathematics"))
            .returning(|_| Ok(()));

        let svc = UserService::new(Arc::new(repo));
        let actor = Actor::new(1, UserRole::Student);

        let user = svc
            .update(
                &actor,
                1,
                UserUpdate {
                    college: Some("Mathematics".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(user.college.as_deref(), Some("Mathematics"));
    }

    #[tokio::test]
    async fn test_update_other_user_is_forbidden_for_non_admin() {
        let mut repo = MockUserRepositoryTrait::new();
        repo.expect_get().returning(|id| Ok(Some(sample_user(id))));

        let svc = UserService::new(Arc::new(repo));
        let actor = Actor::new(2, UserRole::Curator);

        let err = svc
            .update(&actor, 1, UserUpdate::default())
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::Forbidden(_)));
    }

    #[tokio::test]
    async fn test_remove_by_admin_succeeds() {
        let mut repo = MockUserRepositoryTrait::new();
        repo.expect_get().returning(|id| Ok(Some(sample_user(id))));
        repo.expect_delete().returning(|_| Ok(()));

        let svc = UserService::new(Arc::new(repo));
        assert!(svc.remove(&Actor::new(9, UserRole::Admin), 1).await.is_ok());
    }

    #[tokio::test]
    async fn test_overview_aggregates_role_counts() {
        let mut repo = MockUserRepositoryTrait::new();
        repo.expect_count_by_role().returning(|| {
            Ok(vec![
                (UserRole::Student, 120),
                (UserRole::Curator, 8),
                (UserRole::Admin, 2),
            ])
        });

        let svc = UserService::new(Arc::new(repo));
        let overview = svc.overview().await.unwrap();

        assert_eq!(
            overview,
            UserOverview {
                total_users: 130,
                students: 120,
                curators: 8,
                admins: 2,
            }
        );
    }
}
