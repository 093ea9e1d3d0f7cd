//! Category repository for database operations.

use kas_core::registry::RegistryError;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, NotSet,
    PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use tracing::info;

use crate::entities::{categories, entries};

/// Error types for category operations.
#[derive(Debug, thiserror::Error)]
pub enum CategoryError {
    /// Rejected by a registry rule.
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Category repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct CategoryRepository {
    db: DatabaseConnection,
}

impl CategoryRepository {
    /// Creates a new category repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists all categories ordered by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self) -> Result<Vec<categories::Model>, DbErr> {
        categories::Entity::find()
            .order_by_asc(categories::Column::Name)
            .order_by_asc(categories::Column::Id)
            .all(&self.db)
            .await
    }

    /// Finds a category by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: i32) -> Result<Option<categories::Model>, DbErr> {
        categories::Entity::find_by_id(id).one(&self.db).await
    }

    /// Creates a category with an already trimmed name.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::DuplicateCategory` if the name is taken.
    pub async fn create(&self, name: &str) -> Result<categories::Model, CategoryError> {
        if self.name_taken(name, None).await? {
            return Err(RegistryError::DuplicateCategory(name.to_string()).into());
        }

        let model = categories::ActiveModel {
            id: NotSet,
            name: Set(name.to_string()),
        }
        .insert(&self.db)
        .await?;

        info!(category_id = model.id, name = %model.name, "Category created");
        Ok(model)
    }

    /// Renames a category.
    ///
    /// # Errors
    ///
    /// - `RegistryError::CategoryNotFound` if it does not exist
    /// - `RegistryError::DuplicateCategory` if another category has the name
    pub async fn rename(&self, id: i32, name: &str) -> Result<categories::Model, CategoryError> {
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or(RegistryError::CategoryNotFound(id))?;

        if self.name_taken(name, Some(id)).await? {
            return Err(RegistryError::DuplicateCategory(name.to_string()).into());
        }

        let mut active: categories::ActiveModel = existing.into();
        active.name = Set(name.to_string());
        let model = active.update(&self.db).await?;

        info!(category_id = id, name = %model.name, "Category renamed");
        Ok(model)
    }

    /// Deletes a category no entry references.
    ///
    /// # Errors
    ///
    /// - `RegistryError::CategoryNotFound` if it does not exist
    /// - `RegistryError::CategoryInUse` if any entry references it
    pub async fn delete(&self, id: i32) -> Result<(), CategoryError> {
        self.find_by_id(id)
            .await?
            .ok_or(RegistryError::CategoryNotFound(id))?;

        let used = entries::Entity::find()
            .filter(entries::Column::CategoryId.eq(id))
            .count(&self.db)
            .await?;
        if used > 0 {
            return Err(RegistryError::CategoryInUse.into());
        }

        categories::Entity::delete_by_id(id).exec(&self.db).await?;

        info!(category_id = id, "Category deleted");
        Ok(())
    }

    async fn name_taken(&self, name: &str, except: Option<i32>) -> Result<bool, DbErr> {
        let mut query = categories::Entity::find().filter(categories::Column::Name.eq(name));
        if let Some(id) = except {
            query = query.filter(categories::Column::Id.ne(id));
        }
        Ok(query.count(&self.db).await? > 0)
    }
}
