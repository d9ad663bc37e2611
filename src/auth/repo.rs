use sqlx::error::ErrorKind;
use sqlx::PgPool;
use thiserror::Error;

use crate::auth::repo_types::User;

/// Failures surfaced by the user store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The write violated the declared shape of the relation: a required
    /// column was missing or the unique email rule was broken.
    #[error("constraint violated: {0}")]
    Constraint(#[source] sqlx::Error),
    /// The store could not run the statement at all (connection refused,
    /// pool timeout, missing table, protocol error).
    #[error("query failed: {0}")]
    Query(#[source] sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        match e.as_database_error().map(|db| db.kind()) {
            Some(ErrorKind::UniqueViolation)
            | Some(ErrorKind::NotNullViolation)
            | Some(ErrorKind::CheckViolation) => StoreError::Constraint(e),
            _ => StoreError::Query(e),
        }
    }
}

/// Declared shape of the `users` relation.
const CREATE_USERS: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id         BIGSERIAL PRIMARY KEY,
    username   TEXT NOT NULL,
    email      TEXT NOT NULL,
    password   TEXT NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
)
"#;

// The uniqueness rule lives in a named index rather than inline in the CREATE
// so a table that predates the rule gets it on the next sync.
const EMAIL_UNIQUE: &str =
    "CREATE UNIQUE INDEX IF NOT EXISTS users_email_key ON users (email)";

impl User {
    /// Create the `users` table if absent and align its uniqueness rule.
    ///
    /// Runs once at startup. The caller logs a failure and keeps serving;
    /// requests then fail at query time until the store is usable.
    pub async fn sync_schema(db: &PgPool) -> Result<(), StoreError> {
        sqlx::query(CREATE_USERS).execute(db).await?;
        sqlx::query(EMAIL_UNIQUE).execute(db).await?;
        Ok(())
    }

    /// Insert a new user and return the stored row.
    ///
    /// Absent fields are bound as NULL so the store itself decides what is
    /// required; no checks happen on this side of the boundary.
    pub async fn create(
        db: &PgPool,
        username: Option<&str>,
        email: Option<&str>,
        password: Option<&str>,
    ) -> Result<User, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, email, password)
            VALUES ($1, $2, $3)
            RETURNING id, username, email, password, created_at
            "#,
        )
        .bind(username)
        .bind(email)
        .bind(password)
        .fetch_one(db)
        .await?;
        Ok(user)
    }

    /// Find the user whose stored username and password both equal the
    /// supplied values. An absent value can match no row.
    pub async fn find_by_credentials(
        db: &PgPool,
        username: Option<&str>,
        password: Option<&str>,
    ) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, password, created_at
            FROM users
            WHERE username = $1 AND password = $2
            "#,
        )
        .bind(username)
        .bind(password)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::error::DatabaseError;
    use std::borrow::Cow;

    // A stand-in database error carrying a PostgreSQL SQLSTATE, so the
    // classification can be exercised without a live server.
    #[derive(Debug)]
    struct FakeDbError(&'static str);

    impl std::fmt::Display for FakeDbError {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "sqlstate {}", self.0)
        }
    }

    impl std::error::Error for FakeDbError {}

    impl DatabaseError for FakeDbError {
        fn message(&self) -> &str {
            "fake database error"
        }

        fn code(&self) -> Option<Cow<'_, str>> {
            Some(Cow::Borrowed(self.0))
        }

        fn kind(&self) -> ErrorKind {
            match self.0 {
                "23505" => ErrorKind::UniqueViolation,
                "23502" => ErrorKind::NotNullViolation,
                "23514" => ErrorKind::CheckViolation,
                _ => ErrorKind::Other,
            }
        }

        fn as_error(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn std::error::Error + Send + Sync + 'static> {
            self
        }
    }

    fn db_error(code: &'static str) -> sqlx::Error {
        sqlx::Error::Database(Box::new(FakeDbError(code)))
    }

    #[test]
    fn duplicate_email_classifies_as_constraint() {
        let err = StoreError::from(db_error("23505"));
        assert!(matches!(err, StoreError::Constraint(_)));
    }

    #[test]
    fn missing_required_column_classifies_as_constraint() {
        let err = StoreError::from(db_error("23502"));
        assert!(matches!(err, StoreError::Constraint(_)));
    }

    #[test]
    fn other_database_errors_classify_as_query() {
        // 42P01: relation does not exist, e.g. schema sync never succeeded.
        let err = StoreError::from(db_error("42P01"));
        assert!(matches!(err, StoreError::Query(_)));
    }

    #[test]
    fn connection_level_errors_classify_as_query() {
        let err = StoreError::from(sqlx::Error::PoolTimedOut);
        assert!(matches!(err, StoreError::Query(_)));
    }

    #[test]
    fn store_error_display_names_the_failure() {
        let msg = StoreError::from(db_error("23505")).to_string();
        assert!(msg.starts_with("constraint violated"));
        let msg = StoreError::from(sqlx::Error::PoolTimedOut).to_string();
        assert!(msg.starts_with("query failed"));
    }
}
