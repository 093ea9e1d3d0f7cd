//! User repository for database operations.

use kas_core::auth::{Role, UserStatus as CoreUserStatus};
use kas_core::registry::{NewUser, RegistryError, UserProfile};
use kas_shared::auth::UserInfo;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, NotSet,
    PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use tracing::info;

use crate::entities::{
    entries,
    sea_orm_active_enums::{UserRole, UserStatus},
    users,
};

/// Error types for user operations.
#[derive(Debug, thiserror::Error)]
pub enum UserError {
    /// Rejected by a registry rule.
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<users::Model> for UserInfo {
    fn from(user: users::Model) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            role: Role::from(user.role).to_string(),
            status: CoreUserStatus::from(user.status).to_string(),
        }
    }
}

/// User repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    db: DatabaseConnection,
}

impl UserRepository {
    /// Creates a new user repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds a user by email.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<users::Model>, DbErr> {
        users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
    }

    /// Finds a user by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: i32) -> Result<Option<users::Model>, DbErr> {
        users::Entity::find_by_id(id).one(&self.db).await
    }

    /// Lists all users ordered by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self) -> Result<Vec<users::Model>, DbErr> {
        users::Entity::find()
            .order_by_asc(users::Column::Id)
            .all(&self.db)
            .await
    }

    /// Returns true if any account has the chair role.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn chair_exists(&self) -> Result<bool, DbErr> {
        let count = users::Entity::find()
            .filter(users::Column::Role.eq(UserRole::Chair))
            .count(&self.db)
            .await?;
        Ok(count > 0)
    }

    /// Creates an active user with an already hashed password.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::DuplicateUsername` or
    /// `RegistryError::DuplicateEmail` if either is taken.
    pub async fn create(
        &self,
        user: &NewUser,
        password_hash: &str,
    ) -> Result<users::Model, UserError> {
        self.ensure_unique(&user.username, &user.email, None).await?;

        let model = users::ActiveModel {
            id: NotSet,
            username: Set(user.username.clone()),
            email: Set(user.email.clone()),
            password_hash: Set(password_hash.to_string()),
            role: Set(user.role.into()),
            status: Set(UserStatus::Active),
        }
        .insert(&self.db)
        .await?;

        info!(user_id = model.id, username = %model.username, role = %user.role, "User created");
        Ok(model)
    }

    /// Updates username, email and role.
    ///
    /// # Errors
    ///
    /// - `RegistryError::UserNotFound` if the user does not exist
    /// - `RegistryError::DuplicateUsername` / `DuplicateEmail` if another
    ///   account already uses them
    pub async fn update_profile(
        &self,
        id: i32,
        profile: &UserProfile,
    ) -> Result<users::Model, UserError> {
        let existing = self.require(id).await?;
        self.ensure_unique(&profile.username, &profile.email, Some(id))
            .await?;

        let mut active: users::ActiveModel = existing.into();
        active.username = Set(profile.username.clone());
        active.email = Set(profile.email.clone());
        active.role = Set(profile.role.into());
        let model = active.update(&self.db).await?;

        info!(user_id = id, "User profile updated");
        Ok(model)
    }

    /// Activates or deactivates an account.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::UserNotFound` if the user does not exist.
    pub async fn set_status(
        &self,
        id: i32,
        status: CoreUserStatus,
    ) -> Result<users::Model, UserError> {
        let existing = self.require(id).await?;

        let mut active: users::ActiveModel = existing.into();
        active.status = Set(status.into());
        let model = active.update(&self.db).await?;

        info!(user_id = id, status = %status, "User status changed");
        Ok(model)
    }

    /// Replaces the password hash.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::UserNotFound` if the user does not exist.
    pub async fn set_password_hash(&self, id: i32, password_hash: &str) -> Result<(), UserError> {
        let existing = self.require(id).await?;

        let mut active: users::ActiveModel = existing.into();
        active.password_hash = Set(password_hash.to_string());
        active.update(&self.db).await?;

        info!(user_id = id, "User password reset");
        Ok(())
    }

    /// Deletes a user who never recorded an entry.
    ///
    /// # Errors
    ///
    /// - `RegistryError::UserNotFound` if the user does not exist
    /// - `RegistryError::UserHasEntries` if the user recorded any entry
    pub async fn delete(&self, id: i32) -> Result<(), UserError> {
        self.require(id).await?;

        let recorded = entries::Entity::find()
            .filter(entries::Column::RecordedBy.eq(id))
            .count(&self.db)
            .await?;
        if recorded > 0 {
            return Err(RegistryError::UserHasEntries.into());
        }

        users::Entity::delete_by_id(id).exec(&self.db).await?;

        info!(user_id = id, "User deleted");
        Ok(())
    }

    async fn require(&self, id: i32) -> Result<users::Model, UserError> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RegistryError::UserNotFound(id).into())
    }

    async fn ensure_unique(
        &self,
        username: &str,
        email: &str,
        except: Option<i32>,
    ) -> Result<(), UserError> {
        let mut by_username = users::Entity::find().filter(users::Column::Username.eq(username));
        let mut by_email = users::Entity::find().filter(users::Column::Email.eq(email));
        if let Some(id) = except {
            by_username = by_username.filter(users::Column::Id.ne(id));
            by_email = by_email.filter(users::Column::Id.ne(id));
        }

        if by_username.count(&self.db).await? > 0 {
            return Err(RegistryError::DuplicateUsername.into());
        }
        if by_email.count(&self.db).await? > 0 {
            return Err(RegistryError::DuplicateEmail.into());
        }
        Ok(())
    }
}
