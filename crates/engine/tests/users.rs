use chrono::Duration;
use sea_orm::{Database, DatabaseConnection};

use engine::{Bcrypt, Engine, EngineError, JwtSigner, RegisterCmd, SYSTEM_ACTOR};
use migration::MigratorTrait;

async fn engine_with_db() -> (Engine, DatabaseConnection) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = Engine::builder()
        .database(db.clone())
        .password_hasher(Bcrypt::new(4))
        .token_signer(JwtSigner::new("test-secret", Duration::hours(1)).unwrap())
        .build()
        .await
        .unwrap();
    (engine, db)
}

fn alice() -> RegisterCmd {
    RegisterCmd::new("alice", "alice@example.com", "s3cret")
}

#[tokio::test]
async fn register_starts_with_zero_balance() {
    let (engine, _db) = engine_with_db().await;

    let user = engine.register(alice()).await.unwrap();

    assert_eq!(user.username, "alice");
    assert_eq!(user.email, "alice@example.com");
    assert_eq!(user.balance, 0);
    assert_eq!(user.audit.created_by, SYSTEM_ACTOR);
    assert_eq!(user.audit.updated_at, None);
    assert_eq!(engine.user(user.id).await.unwrap(), user);
}

#[tokio::test]
async fn duplicate_username_or_email_conflicts() {
    let (engine, _db) = engine_with_db().await;
    engine.register(alice()).await.unwrap();

    let err = engine
        .register(RegisterCmd::new("alice", "other@example.com", "pw"))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        EngineError::Conflict("username already registered".to_string())
    );

    let err = engine
        .register(RegisterCmd::new("alice2", "alice@example.com", "pw"))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        EngineError::Conflict("email already registered".to_string())
    );
}

#[tokio::test]
async fn register_validates_fields() {
    let (engine, _db) = engine_with_db().await;

    for cmd in [
        RegisterCmd::new("  ", "a@example.com", "pw"),
        RegisterCmd::new("alice", "not-an-email", "pw"),
        RegisterCmd::new("alice", "a@example.com", ""),
    ] {
        assert!(matches!(
            engine.register(cmd).await,
            Err(EngineError::InvalidArgument(_))
        ));
    }
}

#[tokio::test]
async fn login_by_username_or_email_issues_a_token() {
    let (engine, _db) = engine_with_db().await;
    let user = engine.register(alice()).await.unwrap();

    let by_name = engine.login("alice", "s3cret").await.unwrap();
    let by_email = engine.login("alice@example.com", "s3cret").await.unwrap();

    assert_eq!(by_name.user_id, user.id);
    assert_eq!(by_email.user_id, user.id);
    let identity = engine.verify_token(&by_name.token).unwrap();
    assert_eq!(identity.user_id, user.id);
    assert_eq!(identity.username, "alice");
}

#[tokio::test]
async fn usernames_cannot_contain_at_signs() {
    let (engine, _db) = engine_with_db().await;
    let user = engine.register(alice()).await.unwrap();

    assert!(matches!(
        engine
            .register(RegisterCmd::new("bob@example.com", "bob@example.com", "pw"))
            .await,
        Err(EngineError::InvalidArgument(_))
    ));
    assert!(matches!(
        engine
            .update_profile(user.id, "carol@example.com", "alice@example.com")
            .await,
        Err(EngineError::InvalidArgument(_))
    ));
    assert_eq!(engine.user(user.id).await.unwrap().username, "alice");
}

#[tokio::test]
async fn login_identity_picks_one_column() {
    let (engine, _db) = engine_with_db().await;
    let alice = engine.register(alice()).await.unwrap();
    let bob = engine
        .register(RegisterCmd::new("bob", "bob@example.com", "hunter2"))
        .await
        .unwrap();

    // An email-shaped identity never matches a username, and vice versa.
    assert_eq!(
        engine.login("bob@example.com", "hunter2").await.unwrap().user_id,
        bob.id
    );
    assert_eq!(engine.login("alice", "s3cret").await.unwrap().user_id, alice.id);
    assert!(matches!(
        engine.login("bob", "s3cret").await,
        Err(EngineError::Unauthorized(_))
    ));
}

#[tokio::test]
async fn wrong_password_and_unknown_user_look_the_same() {
    let (engine, _db) = engine_with_db().await;
    engine.register(alice()).await.unwrap();

    let wrong_password = engine.login("alice", "guess").await.unwrap_err();
    let unknown_user = engine.login("mallory", "s3cret").await.unwrap_err();

    assert_eq!(
        wrong_password,
        EngineError::Unauthorized("Wrong username or password".to_string())
    );
    assert_eq!(wrong_password, unknown_user);
}

#[tokio::test]
async fn login_without_signer_is_internal() {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = Engine::builder()
        .database(db)
        .password_hasher(Bcrypt::new(4))
        .build()
        .await
        .unwrap();
    engine.register(alice()).await.unwrap();

    assert!(matches!(
        engine.login("alice", "s3cret").await,
        Err(EngineError::Internal(_))
    ));
}

#[tokio::test]
async fn update_password_checks_the_old_one() {
    let (engine, _db) = engine_with_db().await;
    let user = engine.register(alice()).await.unwrap();

    let err = engine
        .update_password(user.id, "nope", "fresh")
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::Unauthorized(_)));
    engine.login("alice", "s3cret").await.unwrap();

    engine
        .update_password(user.id, "s3cret", "fresh")
        .await
        .unwrap();
    assert!(engine.login("alice", "s3cret").await.is_err());
    engine.login("alice", "fresh").await.unwrap();
}

#[tokio::test]
async fn reset_password_skips_the_old_one() {
    let (engine, _db) = engine_with_db().await;
    engine.register(alice()).await.unwrap();

    engine.reset_password("alice", "rescued").await.unwrap();
    engine.login("alice", "rescued").await.unwrap();

    assert!(matches!(
        engine.reset_password("ghost", "pw").await,
        Err(EngineError::NotFound(_))
    ));
}

#[tokio::test]
async fn update_balance_overrides_the_value() {
    let (engine, _db) = engine_with_db().await;
    let user = engine.register(alice()).await.unwrap();

    let updated = engine.update_balance(user.id, -2_500).await.unwrap();

    assert_eq!(updated.balance, -2_500);
    assert_eq!(updated.audit.updated_by, Some(user.id.to_string()));
    assert!(matches!(
        engine.update_balance(uuid::Uuid::new_v4(), 1).await,
        Err(EngineError::NotFound(_))
    ));
}

#[tokio::test]
async fn update_profile_respects_uniqueness() {
    let (engine, _db) = engine_with_db().await;
    let user = engine.register(alice()).await.unwrap();
    engine
        .register(RegisterCmd::new("bob", "bob@example.com", "pw"))
        .await
        .unwrap();

    let err = engine
        .update_profile(user.id, "alice", "bob@example.com")
        .await
        .unwrap_err();
    assert_eq!(
        err,
        EngineError::Conflict("email already registered".to_string())
    );

    let updated = engine
        .update_profile(user.id, "alicia", "alicia@example.com")
        .await
        .unwrap();
    assert_eq!(updated.username, "alicia");
    assert_eq!(updated.email, "alicia@example.com");
    engine.login("alicia@example.com", "s3cret").await.unwrap();
}

#[tokio::test]
async fn unknown_user_is_not_found() {
    let (engine, _db) = engine_with_db().await;
    assert_eq!(
        engine.user(uuid::Uuid::new_v4()).await.unwrap_err(),
        EngineError::NotFound("user not exists".to_string())
    );
}

#[tokio::test]
async fn user_by_username_finds_registered_users() {
    let (engine, _db) = engine_with_db().await;
    let user = engine.register(alice()).await.unwrap();

    assert_eq!(engine.user_by_username(" alice ").await.unwrap(), user);
    assert!(matches!(
        engine.user_by_username("bob").await,
        Err(EngineError::NotFound(_))
    ));
}
