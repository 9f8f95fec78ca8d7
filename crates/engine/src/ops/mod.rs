use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::{Bcrypt, EngineError, PasswordHasher, ResultEngine, TokenSigner};

mod access;
mod balances;
mod categories;
mod sub_categories;
mod transactions;
mod users;

pub use transactions::parse_transaction_date;
pub use users::Session;

/// Run a block inside a DB transaction, committing on success and rolling back on error.
macro_rules! with_tx {
    ($self:expr, |$tx:ident| $body:expr) => {{
        let $tx = $self.database.begin().await?;
        let result = $body;
        match result {
            Ok(value) => {
                $tx.commit().await?;
                Ok(value)
            }
            Err(err) => Err(err),
        }
    }};
}

pub(crate) use with_tx;

#[derive(Debug)]
pub struct Engine {
    database: DatabaseConnection,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Option<Arc<dyn TokenSigner>>,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    fn token_signer(&self) -> ResultEngine<&dyn TokenSigner> {
        self.tokens
            .as_deref()
            .ok_or_else(|| EngineError::Internal("token signer not configured".to_string()))
    }
}

fn normalize_required_name(value: &str, label: &str) -> ResultEngine<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(EngineError::InvalidArgument(format!(
            "{label} must not be empty"
        )));
    }
    Ok(trimmed.to_string())
}

fn normalize_optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
}

/// The builder for `Engine`
#[derive(Default)]
pub struct EngineBuilder {
    database: DatabaseConnection,
    hasher: Option<Arc<dyn PasswordHasher>>,
    tokens: Option<Arc<dyn TokenSigner>>,
}

impl EngineBuilder {
    /// Pass the required database
    pub fn database(mut self, db: DatabaseConnection) -> EngineBuilder {
        self.database = db;
        self
    }

    /// Password hashing used for registration and login. Defaults to bcrypt
    /// with the default cost.
    pub fn password_hasher(mut self, hasher: impl PasswordHasher + 'static) -> EngineBuilder {
        self.hasher = Some(Arc::new(hasher));
        self
    }

    /// Token signer used by login. Without one, login fails.
    pub fn token_signer(mut self, signer: impl TokenSigner + 'static) -> EngineBuilder {
        self.tokens = Some(Arc::new(signer));
        self
    }

    /// Construct `Engine`
    pub async fn build(self) -> ResultEngine<Engine> {
        Ok(Engine {
            database: self.database,
            hasher: self
                .hasher
                .unwrap_or_else(|| Arc::new(Bcrypt::default())),
            tokens: self.tokens,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_trimmed() {
        assert_eq!(
            normalize_required_name("  Food ", "category name").unwrap(),
            "Food"
        );
        assert_eq!(
            normalize_required_name("   ", "category name"),
            Err(EngineError::InvalidArgument(
                "category name must not be empty".to_string()
            ))
        );
    }

    #[test]
    fn blank_notes_are_dropped() {
        assert_eq!(normalize_optional_text(Some("  ")), None);
        assert_eq!(
            normalize_optional_text(Some(" lunch ")),
            Some("lunch".to_string())
        );
        assert_eq!(normalize_optional_text(None), None);
    }
}
