//! SeaORM-backed repository implementations for the domain ports.
//!
//! Both structs are generic over `C: ConnectionTrait`, so you can construct
//! them with a `DatabaseConnection` **or** a transactional connection.
//! Uniqueness rules live in the schema (see migrations); constraint
//! violations come back as `StoreError::UniqueViolation`.

use anyhow::Context;
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveValue::NotSet, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set, SqlErr,
};
use uuid::Uuid;

use crate::contract::model::Contact;
use crate::domain::model::{UserRecord, VerificationToken};
use crate::domain::repo::{StoreError, UsersRepository, VerificationTokensRepository};
use crate::infra::storage::entity::{pact_entry, user, verification_token};

fn classify(err: DbErr, what: &'static str) -> StoreError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => StoreError::UniqueViolation(detail),
        _ => StoreError::Other(anyhow::Error::new(err).context(what)),
    }
}

/// SeaORM repository for users and their pact entries.
/// Holds a connection object; its lifetime/ownership is up to the caller.
pub struct SeaOrmUsersRepository<C>
where
    C: ConnectionTrait + Send + Sync,
{
    conn: C,
}

impl<C> SeaOrmUsersRepository<C>
where
    C: ConnectionTrait + Send + Sync,
{
    pub fn new(conn: C) -> Self {
        Self { conn }
    }
}

#[async_trait::async_trait]
impl<C> UsersRepository for SeaOrmUsersRepository<C>
where
    C: ConnectionTrait + Send + Sync + 'static,
{
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<UserRecord>> {
        let found = user::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("find_by_id failed")?;
        Ok(found.map(Into::into))
    }

    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<UserRecord>> {
        let found = user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.conn)
            .await
            .context("find_by_email failed")?;
        Ok(found.map(Into::into))
    }

    async fn insert(&self, u: UserRecord) -> Result<(), StoreError> {
        let m = user::ActiveModel {
            id: Set(u.id),
            name: Set(u.name),
            email: Set(u.email),
            password_hash: Set(u.password_hash),
            verified: Set(u.verified),
            created_at: Set(u.created_at),
        };
        user::Entity::insert(m)
            .exec_without_returning(&self.conn)
            .await
            .map_err(|e| classify(e, "insert user failed"))?;
        Ok(())
    }

    async fn mark_verified(&self, id: Uuid) -> anyhow::Result<bool> {
        let res = user::Entity::update_many()
            .col_expr(user::Column::Verified, Expr::value(true))
            .filter(user::Column::Id.eq(id))
            .exec(&self.conn)
            .await
            .context("mark_verified failed")?;
        Ok(res.rows_affected > 0)
    }

    async fn list_pact(&self, owner: Uuid) -> anyhow::Result<Vec<Contact>> {
        let rows = pact_entry::Entity::find()
            .filter(pact_entry::Column::OwnerId.eq(owner))
            .order_by_asc(pact_entry::Column::Id)
            .all(&self.conn)
            .await
            .context("list_pact failed")?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn push_contact(&self, owner: Uuid, contact: Contact) -> Result<(), StoreError> {
        let m = pact_entry::ActiveModel {
            id: NotSet,
            owner_id: Set(owner),
            contact_id: Set(contact.id),
            contact_name: Set(contact.name),
            contact_email: Set(contact.email),
            added_at: Set(Utc::now()),
        };
        pact_entry::Entity::insert(m)
            .exec_without_returning(&self.conn)
            .await
            .map_err(|e| classify(e, "push_contact failed"))?;
        Ok(())
    }

    async fn pull_contact(&self, owner: Uuid, contact_id: Uuid) -> anyhow::Result<bool> {
        let res = pact_entry::Entity::delete_many()
            .filter(pact_entry::Column::OwnerId.eq(owner))
            .filter(pact_entry::Column::ContactId.eq(contact_id))
            .exec(&self.conn)
            .await
            .context("pull_contact failed")?;
        Ok(res.rows_affected > 0)
    }
}

/// SeaORM repository for email verification tokens.
pub struct SeaOrmVerificationTokensRepository<C>
where
    C: ConnectionTrait + Send + Sync,
{
    conn: C,
}

impl<C> SeaOrmVerificationTokensRepository<C>
where
    C: ConnectionTrait + Send + Sync,
{
    pub fn new(conn: C) -> Self {
        Self { conn }
    }
}

#[async_trait::async_trait]
impl<C> VerificationTokensRepository for SeaOrmVerificationTokensRepository<C>
where
    C: ConnectionTrait + Send + Sync + 'static,
{
    async fn find_for_user(&self, user_id: Uuid) -> anyhow::Result<Option<VerificationToken>> {
        let found = verification_token::Entity::find()
            .filter(verification_token::Column::UserId.eq(user_id))
            .one(&self.conn)
            .await
            .context("find_for_user failed")?;
        Ok(found.map(Into::into))
    }

    async fn find_matching(
        &self,
        user_id: Uuid,
        token: &str,
    ) -> anyhow::Result<Option<VerificationToken>> {
        let found = verification_token::Entity::find()
            .filter(verification_token::Column::UserId.eq(user_id))
            .filter(verification_token::Column::Token.eq(token))
            .one(&self.conn)
            .await
            .context("find_matching failed")?;
        Ok(found.map(Into::into))
    }

    async fn insert(&self, t: VerificationToken) -> Result<(), StoreError> {
        let m = verification_token::ActiveModel {
            id: Set(t.id),
            user_id: Set(t.user_id),
            token: Set(t.token),
            delivered: Set(t.delivered),
            created_at: Set(t.created_at),
        };
        verification_token::Entity::insert(m)
            .exec_without_returning(&self.conn)
            .await
            .map_err(|e| classify(e, "insert token failed"))?;
        Ok(())
    }

    async fn mark_delivered(&self, id: Uuid) -> anyhow::Result<bool> {
        let res = verification_token::Entity::update_many()
            .col_expr(verification_token::Column::Delivered, Expr::value(true))
            .filter(verification_token::Column::Id.eq(id))
            .exec(&self.conn)
            .await
            .context("mark_delivered failed")?;
        Ok(res.rows_affected > 0)
    }

    async fn delete_for_user(&self, user_id: Uuid) -> anyhow::Result<u64> {
        let res = verification_token::Entity::delete_many()
            .filter(verification_token::Column::UserId.eq(user_id))
            .exec(&self.conn)
            .await
            .context("delete_for_user failed")?;
        Ok(res.rows_affected)
    }
}
