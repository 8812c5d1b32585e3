use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set, SqlErr,
};
use std::sync::Arc;

use crate::entities::user::{
    ActiveModel as UserActiveModel, Column, Entity as User, Model as UserModel, Profile,
};
use crate::errors::ServiceError;
use crate::repositories::Repository;

use super::BaseRepository;

/// Repository for user accounts keyed by email
#[derive(Debug, Clone)]
pub struct UserRepository {
    base: BaseRepository,
}

impl UserRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<UserModel>, ServiceError> {
        Ok(User::find_by_id(email.to_owned())
            .one(self.base.get_db())
            .await?)
    }

    /// Exact match on all three fields.
    pub async fn find_by_credentials(
        &self,
        email: &str,
        password: &str,
        profile: Profile,
    ) -> Result<Option<UserModel>, ServiceError> {
        Ok(User::find()
            .filter(Column::Email.eq(email))
            .filter(Column::Password.eq(password))
            .filter(Column::Profile.eq(profile))
            .one(self.base.get_db())
            .await?)
    }

    /// Inserts a new user. A duplicate email is a `Conflict`.
    pub async fn insert(
        &self,
        email: &str,
        password: &str,
        profile: Profile,
    ) -> Result<UserModel, ServiceError> {
        UserActiveModel {
            email: Set(email.to_owned()),
            password: Set(password.to_owned()),
            profile: Set(profile),
            created_at: Set(Utc::now()),
        }
        .insert(self.base.get_db())
        .await
        .map_err(|e| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                ServiceError::Conflict(format!("Email {} is already registered", email))
            }
            _ => ServiceError::DatabaseError(e),
        })
    }
}

impl Repository for UserRepository {
    fn get_db(&self) -> &DatabaseConnection {
        self.base.get_db()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;
    use assert_matches::assert_matches;

    #[tokio::test]
    async fn duplicate_insert_is_conflict() {
        let repo = UserRepository::new(test_pool().await);
        repo.insert("ana@escola.br", "123", Profile::Requester)
            .await
            .unwrap();

        assert_matches!(
            repo.insert("ana@escola.br", "456", Profile::Supervisor).await,
            Err(ServiceError::Conflict(_))
        );
        let kept = repo.find_by_email("ana@escola.br").await.unwrap().unwrap();
        assert_eq!(kept.password, "123");
        assert_eq!(kept.profile, Profile::Requester);
    }

    #[tokio::test]
    async fn credentials_must_match_all_fields() {
        let repo = UserRepository::new(test_pool().await);
        repo.insert("bia@escola.br", "s3nha", Profile::WarehouseStaff)
            .await
            .unwrap();

        assert!(repo
            .find_by_credentials("bia@escola.br", "s3nha", Profile::WarehouseStaff)
            .await
            .unwrap()
            .is_some());
        assert!(repo
            .find_by_credentials("bia@escola.br", "s3nha", Profile::Requester)
            .await
            .unwrap()
            .is_none());
        assert!(repo
            .find_by_credentials("bia@escola.br", "errada", Profile::WarehouseStaff)
            .await
            .unwrap()
            .is_none());
    }
}
