//! Persistence gateway for the `users` table.
//!
//! Every call is a single autocommit statement against the shared pool.
//! Failures come back as [`StoreError`] so the HTTP layer can pick a status
//! without inspecting driver messages.

use model::entities::user;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set,
    SqlErr,
};
use thiserror::Error;
use tracing::{debug, instrument, trace, warn};

#[derive(Debug, Error)]
pub enum StoreError {
    /// A unique index (username or email) rejected the write.
    #[error("username or email already taken: {0}")]
    Conflict(String),

    #[error("database error: {0}")]
    Database(#[from] DbErr),
}

impl StoreError {
    fn from_insert(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail)) => StoreError::Conflict(detail),
            _ => StoreError::Database(err),
        }
    }
}

/// A user row about to be inserted. `password_hash` must already be hashed.
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

/// Which unique column a login looks the user up by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginIdentity<'a> {
    Username(&'a str),
    Email(&'a str),
}

#[derive(Clone, Debug)]
pub struct UserRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UserRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Insert a user and return the stored row, including its assigned id.
    #[instrument(skip_all, fields(username = %new_user.username))]
    pub async fn create(&self, new_user: NewUser) -> Result<user::Model, StoreError> {
        let active = user::ActiveModel {
            username: Set(new_user.username),
            email: Set(new_user.email),
            password: Set(new_user.password_hash),
            ..Default::default()
        };

        trace!("Inserting user row");
        match active.insert(self.db).await {
            Ok(model) => {
                debug!("Inserted user with ID: {}", model.id);
                Ok(model)
            }
            Err(db_error) => {
                let err = StoreError::from_insert(db_error);
                if matches!(err, StoreError::Conflict(_)) {
                    warn!("Insert rejected by unique constraint");
                }
                Err(err)
            }
        }
    }

    /// Fetch at most one user matching `identity`.
    #[instrument(skip(self))]
    pub async fn find_by_identity(
        &self,
        identity: LoginIdentity<'_>,
    ) -> Result<Option<user::Model>, StoreError> {
        let query = match identity {
            LoginIdentity::Username(username) => {
                user::Entity::find().filter(user::Column::Username.eq(username))
            }
            LoginIdentity::Email(email) => user::Entity::find().filter(user::Column::Email.eq(email)),
        };

        let found = query.one(self.db).await?;
        debug!("User lookup matched: {}", found.is_some());
        Ok(found)
    }
}
