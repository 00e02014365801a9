//! Error types for shopctl-db

use shopctl_core::StoreError;
use thiserror::Error;

pub type DbResult<T> = Result<T, DbError>;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("conflict: {entity} '{key}' already exists")]
    Conflict { entity: &'static str, key: String },

    #[error("cannot assign {entity} id from row count {count}")]
    IdOverflow { entity: &'static str, count: i64 },
}

impl DbError {
    /// Map a unique-key violation on insert to [`DbError::Conflict`]
    pub fn on_insert(entity: &'static str, key: impl ToString) -> impl FnOnce(sqlx::Error) -> Self {
        move |err| {
            let unique = err
                .as_database_error()
                .is_some_and(|db| db.is_unique_violation());
            if unique {
                Self::Conflict {
                    entity,
                    key: key.to_string(),
                }
            } else {
                Self::Sqlx(err)
            }
        }
    }
}

impl From<DbError> for StoreError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::Sqlx(err) => {
                tracing::error!("Database error: {}", err);
                StoreError::database(err)
            }
            DbError::Conflict { entity, key } => StoreError::Conflict { entity, key },
            DbError::IdOverflow { entity, count } => StoreError::IdOverflow { entity, count },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_database_errors_stay_sqlx() {
        let err = DbError::on_insert("car", "VIN1")(sqlx::Error::RowNotFound);
        assert!(matches!(err, DbError::Sqlx(sqlx::Error::RowNotFound)));
    }

    #[test]
    fn conflict_converts_to_store_conflict() {
        let err: StoreError = DbError::Conflict {
            entity: "car",
            key: "VIN1".into(),
        }
        .into();
        assert_eq!(err.to_string(), "conflict: car 'VIN1' already exists");
    }
}
