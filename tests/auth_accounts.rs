mod common;

use storefront_api::{
    dto::auth::{LoginRequest, RegisterRequest},
    error::AppError,
    services::auth_service,
};

// Registration, duplicate handling, login by login or email, guest accounts.
#[tokio::test]
async fn register_login_and_guest() -> anyhow::Result<()> {
    // Token issuing needs a secret; set it before anything else runs.
    unsafe { std::env::set_var("JWT_SECRET", "test-secret") };
    let state = match common::setup_state().await? {
        Some(s) => s,
        None => return Ok(()),
    };

    let err = auth_service::register_user(
        &state.pool,
        RegisterRequest {
            login: "carol".into(),
            email: "carol@example.com".into(),
            password: "short".into(),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));

    let user = auth_service::register_user(
        &state.pool,
        RegisterRequest {
            login: "carol".into(),
            email: "carol@example.com".into(),
            password: "secret123".into(),
        },
    )
    .await?
    .data
    .unwrap();
    assert_eq!(user.role, "user");

    // A taken login is rejected whether it trips the pre-check or, under a
    // concurrent race, the unique index.
    let err = auth_service::register_user(
        &state.pool,
        RegisterRequest {
            login: "carol".into(),
            email: "other@example.com".into(),
            password: "secret123".into(),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(
        err,
        AppError::BadRequest(_) | AppError::Conflict(_)
    ));

    let err = auth_service::login_user(
        &state.pool,
        LoginRequest {
            login_or_email: "carol".into(),
            password: "wrong-password".into(),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));

    let session = auth_service::login_user(
        &state.pool,
        LoginRequest {
            login_or_email: "carol@example.com".into(),
            password: "secret123".into(),
        },
    )
    .await?
    .data
    .unwrap();
    assert!(!session.token.is_empty());
    assert_eq!(session.user.login, "carol");

    let guest = auth_service::guest_user(&state.pool).await?.data.unwrap();
    assert_eq!(guest.user.role, "guest");
    assert!(guest.user.login.starts_with("guest-"));

    Ok(())
}
