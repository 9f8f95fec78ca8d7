//! Identity service: registration, login and profile maintenance.

use chrono::Utc;
use sea_orm::{ActiveValue, ConnectionTrait, QueryFilter, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{EngineError, RegisterCmd, ResultEngine, SYSTEM_ACTOR, TokenIdentity, User, users};

use super::{Engine, normalize_required_name, with_tx};

/// Same message for an unknown identity and a wrong password.
const BAD_CREDENTIALS: &str = "Wrong username or password";

/// Result of a successful login.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub user_id: Uuid,
}

/// Usernames never contain `@`, so a login identity with one is an email.
fn normalize_username(value: &str) -> ResultEngine<String> {
    let username = normalize_required_name(value, "username")?;
    if username.contains('@') {
        return Err(EngineError::InvalidArgument(
            "username must not contain '@'".to_string(),
        ));
    }
    Ok(username)
}

fn normalize_email(value: &str) -> ResultEngine<String> {
    let email = normalize_required_name(value, "email")?;
    let valid = email
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && !domain.is_empty());
    if !valid {
        return Err(EngineError::InvalidArgument(format!(
            "invalid email: {email}"
        )));
    }
    Ok(email)
}

fn require_password(value: &str, label: &str) -> ResultEngine<()> {
    if value.is_empty() {
        return Err(EngineError::InvalidArgument(format!(
            "{label} must not be empty"
        )));
    }
    Ok(())
}

/// Map a unique index violation on `users` to the field that clashed.
fn user_conflict(err: DbErr) -> EngineError {
    EngineError::from_unique_violation(err, |message| {
        if message.contains("email") {
            "email already registered".to_string()
        } else {
            "username already registered".to_string()
        }
    })
}

impl Engine {
    /// Register a user with a zero balance.
    ///
    /// Duplicates are rejected by the unique indexes on `username` and
    /// `email`, never by a lookup before the insert.
    pub async fn register(&self, cmd: RegisterCmd) -> ResultEngine<User> {
        let username = normalize_username(&cmd.username)?;
        let email = normalize_email(&cmd.email)?;
        require_password(&cmd.password, "password")?;
        let digest = self.hasher.hash(&cmd.password)?;

        let model = users::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4().to_string()),
            username: ActiveValue::Set(username),
            email: ActiveValue::Set(email),
            password: ActiveValue::Set(digest),
            balance: ActiveValue::Set(0),
            created_at: ActiveValue::Set(Utc::now()),
            created_by: ActiveValue::Set(SYSTEM_ACTOR.to_string()),
            updated_at: ActiveValue::Set(None),
            updated_by: ActiveValue::Set(None),
        }
        .insert(&self.database)
        .await
        .map_err(user_conflict)?;

        tracing::info!(user_id = %model.id, "user registered");
        User::try_from(model)
    }

    /// Check credentials and issue an access token.
    ///
    /// `identity` is the email when it contains `@`, the username otherwise.
    pub async fn login(&self, identity: &str, password: &str) -> ResultEngine<Session> {
        let identity = identity.trim();
        let column = if identity.contains('@') {
            users::Column::Email
        } else {
            users::Column::Username
        };
        let model = users::Entity::find()
            .filter(column.eq(identity))
            .one(&self.database)
            .await?;

        let Some(model) = model else {
            tracing::warn!("login rejected: unknown identity");
            return Err(EngineError::Unauthorized(BAD_CREDENTIALS.to_string()));
        };
        if !self.hasher.verify(password, &model.password)? {
            tracing::warn!(user_id = %model.id, "login rejected: wrong password");
            return Err(EngineError::Unauthorized(BAD_CREDENTIALS.to_string()));
        }

        let user = User::try_from(model)?;
        let token = self.token_signer()?.issue(user.id, &user.username)?;
        Ok(Session {
            token,
            user_id: user.id,
        })
    }

    /// Resolve the identity carried by an access token.
    pub fn verify_token(&self, token: &str) -> ResultEngine<TokenIdentity> {
        self.token_signer()?.verify(token)
    }

    /// Return the user's profile, including the current balance.
    pub async fn user(&self, user_id: Uuid) -> ResultEngine<User> {
        let model = self.require_user(&self.database, user_id).await?;
        User::try_from(model)
    }

    /// Look a user up by username. Operator use only.
    pub async fn user_by_username(&self, username: &str) -> ResultEngine<User> {
        let model = users::Entity::find()
            .filter(users::Column::Username.eq(username.trim()))
            .one(&self.database)
            .await?
            .ok_or_else(|| EngineError::NotFound("user not exists".to_string()))?;
        User::try_from(model)
    }

    /// Administrative override of the user's balance.
    pub async fn update_balance(&self, user_id: Uuid, balance: i64) -> ResultEngine<User> {
        with_tx!(self, |db_tx| {
            self.require_user(&db_tx, user_id).await?;
            self.store_balance(&db_tx, user_id, balance, &user_id.to_string())
                .await?;
            let model = self.require_user(&db_tx, user_id).await?;
            User::try_from(model)
        })
    }

    /// Change the username and email.
    pub async fn update_profile(
        &self,
        user_id: Uuid,
        username: &str,
        email: &str,
    ) -> ResultEngine<User> {
        let username = normalize_username(username)?;
        let email = normalize_email(email)?;

        with_tx!(self, |db_tx| {
            self.require_user(&db_tx, user_id).await?;
            let model = users::ActiveModel {
                id: ActiveValue::Set(user_id.to_string()),
                username: ActiveValue::Set(username),
                email: ActiveValue::Set(email),
                updated_at: ActiveValue::Set(Some(Utc::now())),
                updated_by: ActiveValue::Set(Some(user_id.to_string())),
                ..Default::default()
            }
            .update(&db_tx)
            .await
            .map_err(user_conflict)?;
            User::try_from(model)
        })
    }

    /// Change the password after checking the current one.
    pub async fn update_password(
        &self,
        user_id: Uuid,
        old_password: &str,
        new_password: &str,
    ) -> ResultEngine<()> {
        require_password(new_password, "new password")?;

        with_tx!(self, |db_tx| {
            let model = self.require_user(&db_tx, user_id).await?;
            if !self.hasher.verify(old_password, &model.password)? {
                return Err(EngineError::Unauthorized(
                    "old password does not match".to_string(),
                ));
            }
            self.store_password(&db_tx, &model.id, new_password, &model.id)
                .await
        })
    }

    /// Set a new password without the old one. Operator use only.
    pub async fn reset_password(&self, username: &str, new_password: &str) -> ResultEngine<()> {
        require_password(new_password, "new password")?;

        with_tx!(self, |db_tx| {
            let model = users::Entity::find()
                .filter(users::Column::Username.eq(username.trim()))
                .one(&db_tx)
                .await?
                .ok_or_else(|| EngineError::NotFound("user not exists".to_string()))?;
            self.store_password(&db_tx, &model.id, new_password, SYSTEM_ACTOR)
                .await
        })
    }

    async fn store_password(
        &self,
        db: &impl ConnectionTrait,
        user_id: &str,
        password: &str,
        actor: &str,
    ) -> ResultEngine<()> {
        let digest = self.hasher.hash(password)?;
        users::ActiveModel {
            id: ActiveValue::Set(user_id.to_string()),
            password: ActiveValue::Set(digest),
            updated_at: ActiveValue::Set(Some(Utc::now())),
            updated_by: ActiveValue::Set(Some(actor.to_string())),
            ..Default::default()
        }
        .update(db)
        .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_needs_both_halves() {
        assert_eq!(normalize_email(" a@b.io ").unwrap(), "a@b.io");
        assert!(normalize_email("a@").is_err());
        assert!(normalize_email("@b.io").is_err());
        assert!(normalize_email("ab.io").is_err());
    }
}
