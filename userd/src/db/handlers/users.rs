//! Database repository for users.

use crate::types::UserId;
use crate::{
    api::models::users::Role,
    db::{
        errors::{DbError, Result},
        handlers::repository::Repository,
        models::users::{UserCreateDBRequest, UserDBResponse, UserUpdateDBRequest},
    },
};
use sqlx::PgConnection;
use tracing::instrument;

/// Filter for listing users
#[derive(Debug, Clone)]
pub struct UserFilter {
    /// Only users with one of these roles are returned
    pub roles: Vec<Role>,
    pub skip: i64,
    pub limit: i64,
}

impl UserFilter {
    pub fn new(roles: Vec<Role>, skip: i64, limit: i64) -> Self {
        Self { roles, skip, limit }
    }
}

pub struct Users<'c> {
    db: &'c mut PgConnection,
}

#[async_trait::async_trait]
impl<'c> Repository for Users<'c> {
    type CreateRequest = UserCreateDBRequest;
    type UpdateRequest = UserUpdateDBRequest;
    type Response = UserDBResponse;
    type Id = UserId;
    type Filter = UserFilter;

    #[instrument(skip(self, request), fields(email = %request.email), err)]
    async fn create(&mut self, request: &Self::CreateRequest) -> Result<Self::Response> {
        let user = sqlx::query_as::<_, UserDBResponse>(
            r#"
            INSERT INTO users (name, email, phone, password_hash, role)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(&request.name)
        .bind(&request.email)
        .bind(&request.phone)
        .bind(&request.password_hash)
        .bind(request.role)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(user)
    }

    #[instrument(skip(self), fields(user_id = id), err)]
    async fn get_by_id(&mut self, id: Self::Id) -> Result<Option<Self::Response>> {
        let user = sqlx::query_as::<_, UserDBResponse>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *self.db)
            .await?;

        Ok(user)
    }

    #[instrument(skip(self, filter), fields(limit = filter.limit, skip = filter.skip), err)]
    async fn list(&mut self, filter: &Self::Filter) -> Result<Vec<Self::Response>> {
        let users = sqlx::query_as::<_, UserDBResponse>(
            "SELECT * FROM users WHERE role = ANY($1) ORDER BY created_at DESC LIMIT $2 OFFSET $3",
        )
        .bind(&filter.roles)
        .bind(filter.limit)
        .bind(filter.skip)
        .fetch_all(&mut *self.db)
        .await?;

        Ok(users)
    }

    #[instrument(skip(self, request), fields(user_id = id), err)]
    async fn update(&mut self, id: Self::Id, request: &Self::UpdateRequest) -> Result<Self::Response> {
        // Atomic update with conditional field updates
        let user = sqlx::query_as::<_, UserDBResponse>(
            r#"
            UPDATE users SET
                name = COALESCE($2, name),
                email = COALESCE($3, email),
                phone = COALESCE($4, phone),
                password_hash = COALESCE($5, password_hash),
                role = COALESCE($6, role),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&request.name)
        .bind(&request.email)
        .bind(&request.phone)
        .bind(&request.password_hash)
        .bind(request.role)
        .fetch_optional(&mut *self.db)
        .await?
        .ok_or(DbError::NotFound)?;

        Ok(user)
    }
}

impl<'c> Users<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    #[instrument(skip(self, email), err)]
    pub async fn get_user_by_email(&mut self, email: &str) -> Result<Option<UserDBResponse>> {
        let user = sqlx::query_as::<_, UserDBResponse>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&mut *self.db)
            .await?;

        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::PgPool;

    async fn create_user(pool: &PgPool, name: &str, email: &str, role: Role) -> UserDBResponse {
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Users::new(&mut conn);
        repo.create(&UserCreateDBRequest {
            name: name.to_string(),
            email: email.to_string(),
            phone: "555-0100".to_string(),
            password_hash: "$argon2id$unused".to_string(),
            role,
        })
        .await
        .unwrap()
    }

    #[sqlx::test]
    async fn test_list_returns_only_filtered_roles(pool: PgPool) {
        create_user(&pool, "root", "root@example.com", Role::Admin).await;
        create_user(&pool, "ops", "ops@example.com", Role::SubAdmin).await;
        create_user(&pool, "carol", "carol@example.com", Role::Client).await;

        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Users::new(&mut conn);

        // Sub-admin visibility: sub_admins and clients, never admins
        let visible = repo
            .list(&UserFilter::new(Role::SubAdmin.visible_roles().to_vec(), 0, 100))
            .await
            .unwrap();
        assert_eq!(visible.len(), 2);
        assert!(visible.iter().all(|u| u.role != Role::Admin));

        // Client visibility: clients only
        let visible = repo
            .list(&UserFilter::new(Role::Client.visible_roles().to_vec(), 0, 100))
            .await
            .unwrap();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].email, "carol@example.com");

        // Admin sees everyone
        let visible = repo
            .list(&UserFilter::new(Role::Admin.visible_roles().to_vec(), 0, 100))
            .await
            .unwrap();
        assert_eq!(visible.len(), 3);
    }

    #[sqlx::test]
    async fn test_list_pagination(pool: PgPool) {
        for i in 0..3 {
            create_user(&pool, &format!("user{i}"), &format!("user{i}@example.com"), Role::Client).await;
        }

        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Users::new(&mut conn);

        let page = repo.list(&UserFilter::new(vec![Role::Client], 1, 1)).await.unwrap();
        assert_eq!(page.len(), 1);

        let all = repo.list(&UserFilter::new(vec![Role::Client], 0, 2)).await.unwrap();
        assert_eq!(all.len(), 2);
    }

    #[sqlx::test]
    async fn test_update_leaves_absent_fields_untouched(pool: PgPool) {
        let user = create_user(&pool, "ada", "ada@example.com", Role::Client).await;

        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Users::new(&mut conn);

        let updated = repo
            .update(
                user.id,
                &UserUpdateDBRequest {
                    name: Some("Ada Lovelace".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.name, "Ada Lovelace");
        // Everything not named in the patch keeps its stored value
        assert_eq!(updated.email, user.email);
        assert_eq!(updated.phone, user.phone);
        assert_eq!(updated.password_hash, user.password_hash);
        assert_eq!(updated.role, user.role);
        assert!(updated.updated_at >= user.updated_at);
    }

    #[sqlx::test]
    async fn test_update_merges_multiple_fields(pool: PgPool) {
        let user = create_user(&pool, "ada", "ada@example.com", Role::Client).await;

        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Users::new(&mut conn);

        let updated = repo
            .update(
                user.id,
                &UserUpdateDBRequest {
                    email: Some("countess@example.com".to_string()),
                    role: Some(Role::SubAdmin),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.email, "countess@example.com");
        assert_eq!(updated.role, Role::SubAdmin);
        assert_eq!(updated.name, user.name);
    }

    #[sqlx::test]
    async fn test_update_unknown_id_is_not_found(pool: PgPool) {
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Users::new(&mut conn);

        let result = repo.update(4242, &UserUpdateDBRequest::default()).await;
        assert!(matches!(result, Err(DbError::NotFound)));
    }

    #[sqlx::test]
    async fn test_duplicate_email_is_unique_violation(pool: PgPool) {
        create_user(&pool, "ada", "ada@example.com", Role::Client).await;

        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Users::new(&mut conn);

        let result = repo
            .create(&UserCreateDBRequest {
                name: "other".to_string(),
                email: "ada@example.com".to_string(),
                phone: "555-0101".to_string(),
                password_hash: "$argon2id$unused".to_string(),
                role: Role::Client,
            })
            .await;
        assert!(matches!(result, Err(DbError::UniqueViolation { .. })));
    }

    #[sqlx::test]
    async fn test_get_user_by_email(pool: PgPool) {
        let created = create_user(&pool, "ada", "ada@example.com", Role::Client).await;

        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Users::new(&mut conn);

        let found = repo.get_user_by_email("ada@example.com").await.unwrap().unwrap();
        assert_eq!(found.id, created.id);

        let missing = repo.get_user_by_email("nobody@example.com").await.unwrap();
        assert!(missing.is_none());
    }
}
