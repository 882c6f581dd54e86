mod common;

use std::cell::RefCell;
use std::rc::Rc;

use client::storage::{CREDENTIAL_KEY, IDENTITY_KEY};
use client::transport::Body;
use client::{ApiError, KeyValueStorage, LibraryClient, MemoryStorage, Session, TransportError};
use common::{identity, identity_json, token_json, Harness};
use secrecy::SecretString;
use serde_json::json;
use shared::RegisterRequest;

fn password() -> SecretString {
    SecretString::from("pw")
}

#[tokio::test]
async fn test_startup_with_rejected_credential_cleans_session() -> anyhow::Result<()> {
    let stored = identity(1, "a@x.com");
    let snapshot = serde_json::to_string(&stored)?;
    let h = Harness::with_storage(MemoryStorage::with_entries([
        (CREDENTIAL_KEY, "stale"),
        (IDENTITY_KEY, snapshot.as_str()),
    ]));
    h.transport.respond(
        "GET",
        "/users/me",
        401,
        json!({"detail": "Could not validate credentials"}),
    );

    assert!(h.client.session.session().is_initializing());
    h.client.session.initialize().await;

    let session = h.client.session.session();
    assert!(!session.is_initializing());
    assert!(!session.is_authenticated());
    assert_eq!(session.credential(), None);
    assert!(h.storage.is_empty());

    let lookup = h.transport.last_request().expect("identity lookup issued");
    assert_eq!(lookup.header_value("Authorization"), Some("Bearer stale"));
    assert_eq!(h.navigator.redirects(), 1);

    h.client.session.logout();
    assert!(h.storage.is_empty());
    assert_eq!(h.client.session.session(), Session::default());
    Ok(())
}

#[tokio::test]
async fn test_startup_without_credential_skips_lookup() {
    let h = Harness::new();

    h.client.session.initialize().await;

    let session = h.client.session.session();
    assert!(!session.is_initializing());
    assert_eq!(session.identity(), None);
    assert!(h.transport.requests().is_empty());
}

#[tokio::test]
async fn test_startup_with_valid_credential_restores_identity() {
    let user = identity(4, "b@x.com");
    let h = Harness::with_storage(MemoryStorage::with_entries([(CREDENTIAL_KEY, "good")]));
    h.transport
        .respond("GET", "/users/me", 200, identity_json(&user));

    h.client.session.initialize().await;

    let session = h.client.session.session();
    assert_eq!(session.identity(), Some(&user));
    assert_eq!(
        session.credential().map(|credential| credential.expose()),
        Some("good")
    );
    assert_eq!(h.storage.get(CREDENTIAL_KEY).as_deref(), Some("good"));
    assert!(h.storage.get(IDENTITY_KEY).is_some());
}

#[tokio::test]
async fn test_startup_with_unreachable_server_starts_logged_out() {
    let h = Harness::with_storage(MemoryStorage::with_entries([(CREDENTIAL_KEY, "good")]));
    h.transport.fail(
        "GET",
        "/users/me",
        TransportError::Unreachable("connection refused".to_owned()),
    );

    h.client.session.initialize().await;

    assert!(!h.client.session.session().is_authenticated());
    assert!(h.storage.is_empty());
    assert_eq!(h.navigator.redirects(), 0);
}

#[tokio::test]
async fn test_login_then_logout_matches_fresh_start() -> anyhow::Result<()> {
    let fresh = Harness::new();
    fresh.client.session.initialize().await;

    let h = Harness::new();
    h.client.session.initialize().await;
    h.script_login("token-1", &identity(1, "a@x.com"));

    let user = h.client.session.login("a@x.com", &password()).await?;
    assert_eq!(user.email, "a@x.com");
    assert!(h.client.session.session().is_authenticated());
    assert_eq!(h.storage.get(CREDENTIAL_KEY).as_deref(), Some("token-1"));

    h.client.session.logout();

    assert_eq!(h.client.session.session(), fresh.client.session.session());
    assert!(h.storage.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_login_is_form_encoded_and_anonymous() -> anyhow::Result<()> {
    let h = Harness::with_storage(MemoryStorage::with_entries([(CREDENTIAL_KEY, "old")]));
    h.transport.respond("GET", "/users/me", 200, identity_json(&identity(9, "old@x.com")));
    h.client.session.initialize().await;
    h.script_login("new", &identity(1, "a@x.com"));

    h.client.session.login("a@x.com", &password()).await?;

    let login = h
        .transport
        .requests()
        .into_iter()
        .find(|request| request.path == "/users/login")
        .expect("login request sent");
    assert_eq!(login.header_value("Authorization"), None);
    assert_eq!(
        login.body,
        Some(Body::Form(
            "username=a%40x.com&password=pw&grant_type=password".to_owned()
        ))
    );

    let lookup = h.transport.last_request().expect("identity lookup sent");
    assert_eq!(lookup.header_value("Authorization"), Some("Bearer new"));
    Ok(())
}

#[tokio::test]
async fn test_login_with_bad_credentials_is_authentication_error() {
    let h = Harness::new();
    h.client.session.initialize().await;
    h.transport.respond(
        "POST",
        "/users/login",
        401,
        json!({"detail": "Incorrect email or password"}),
    );

    let error = h
        .client
        .session
        .login("a@x.com", &password())
        .await
        .unwrap_err();

    assert_eq!(
        error,
        ApiError::Authentication {
            message: "Incorrect email or password".to_owned()
        }
    );
    assert_eq!(h.navigator.redirects(), 0);
    assert!(h.storage.is_empty());
}

#[tokio::test]
async fn test_credential_is_persisted_before_identity_lookup() -> anyhow::Result<()> {
    let h = Harness::new();
    h.client.session.initialize().await;
    h.transport
        .respond("POST", "/users/login", 200, token_json("kept"));
    h.transport.fail(
        "GET",
        "/users/me",
        TransportError::Unreachable("offline".to_owned()),
    );

    let error = h
        .client
        .session
        .login("a@x.com", &password())
        .await
        .unwrap_err();
    assert!(matches!(error, ApiError::NetworkUnreachable { .. }));
    assert!(!h.client.session.session().is_authenticated());
    assert_eq!(h.storage.get(CREDENTIAL_KEY).as_deref(), Some("kept"));

    // The next start picks the stored credential up again.
    let user = identity(1, "a@x.com");
    h.transport
        .respond("GET", "/users/me", 200, identity_json(&user));
    let restarted = LibraryClient::new(
        h.transport.clone(),
        h.storage.clone(),
        h.navigator.clone(),
    );
    restarted.session.initialize().await;
    assert_eq!(restarted.session.session().identity(), Some(&user));
    Ok(())
}

#[tokio::test]
async fn test_register_logs_into_the_new_account() -> anyhow::Result<()> {
    let h = Harness::new();
    h.client.session.initialize().await;
    let mut registered = identity(12, "new@x.com");
    registered.phone = Some("+380501112233".to_owned());
    h.transport
        .respond("POST", "/users/register", 201, identity_json(&registered));
    h.script_login("fresh", &registered);

    let user = h
        .client
        .session
        .register(RegisterRequest {
            email: "new@x.com".to_owned(),
            password: password(),
            name: "Ann".to_owned(),
            surname: "Lee".to_owned(),
            phone: Some("+380501112233".to_owned()),
        })
        .await?;

    assert_eq!(user, registered);
    assert_eq!(h.client.session.session().identity(), Some(&registered));
    let register = &h.transport.requests()[0];
    assert_eq!(register.path, "/users/register");
    assert_eq!(register.header_value("Authorization"), None);
    Ok(())
}

#[tokio::test]
async fn test_register_keeps_account_when_login_fails() {
    let h = Harness::new();
    h.client.session.initialize().await;
    h.transport.respond(
        "POST",
        "/users/register",
        201,
        identity_json(&identity(12, "new@x.com")),
    );
    h.transport.respond(
        "POST",
        "/users/login",
        400,
        json!({"detail": "Incorrect email or password"}),
    );

    let error = h
        .client
        .session
        .register(RegisterRequest {
            email: "new@x.com".to_owned(),
            password: password(),
            name: "Ann".to_owned(),
            surname: "Lee".to_owned(),
            phone: None,
        })
        .await
        .unwrap_err();

    assert!(matches!(error, ApiError::Authentication { .. }));
    assert!(!h.client.session.session().is_authenticated());
    assert_eq!(h.transport.calls_to("/users/register"), 1);
    assert_eq!(h.transport.calls_to("/users/login"), 1);
}

#[tokio::test]
async fn test_register_validation_errors_are_joined() {
    let h = Harness::new();
    h.client.session.initialize().await;
    h.transport.respond(
        "POST",
        "/users/register",
        422,
        json!({"detail": [
            {"loc": ["body", "email"], "msg": "value is not a valid email address", "type": "value_error"},
            {"loc": ["body", "name"], "msg": "field required", "type": "missing"}
        ]}),
    );

    let error = h
        .client
        .session
        .register(RegisterRequest {
            email: "nope".to_owned(),
            password: password(),
            name: String::new(),
            surname: "Lee".to_owned(),
            phone: None,
        })
        .await
        .unwrap_err();

    assert_eq!(
        error.user_message().as_deref(),
        Some("value is not a valid email address, field required")
    );
    assert_eq!(error.fields().len(), 2);
    assert_eq!(h.transport.calls_to("/users/login"), 0);
}

#[tokio::test]
async fn test_refresh_failure_logs_out() -> anyhow::Result<()> {
    let h = Harness::new();
    h.client.session.initialize().await;
    h.script_login("token", &identity(1, "a@x.com"));
    h.client.session.login("a@x.com", &password()).await?;

    h.transport
        .respond("GET", "/users/me", 500, json!({"detail": "boom"}));
    let result = h.client.session.refresh().await;

    assert!(result.is_err());
    assert_eq!(h.client.session.session(), Session::default());
    assert!(h.storage.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_refresh_replaces_identity_wholesale() -> anyhow::Result<()> {
    let h = Harness::new();
    h.client.session.initialize().await;
    h.script_login("token", &identity(1, "a@x.com"));
    h.client.session.login("a@x.com", &password()).await?;

    let mut renamed = identity(1, "a@x.com");
    renamed.surname = "Smith".to_owned();
    renamed.role = "librarian".to_owned();
    h.transport
        .respond("GET", "/users/me", 200, identity_json(&renamed));

    h.client.session.refresh().await?;

    assert_eq!(h.client.session.session().identity(), Some(&renamed));
    Ok(())
}

#[tokio::test]
async fn test_overlapping_logins_last_completion_wins() -> anyhow::Result<()> {
    let h = Harness::new();
    h.client.session.initialize().await;
    let first = identity(1, "first@x.com");
    let second = identity(2, "second@x.com");

    let release_first =
        h.transport
            .respond_later("POST", "/users/login", 200, token_json("first"));
    h.transport
        .respond("POST", "/users/login", 200, token_json("second"));
    h.transport
        .respond("GET", "/users/me", 200, identity_json(&second));
    h.transport
        .respond("GET", "/users/me", 200, identity_json(&first));

    let pw = password();
    let first_login = h.client.session.login("first@x.com", &pw);
    let second_login = async {
        let result = h.client.session.login("second@x.com", &pw).await;
        let _ = release_first.send(());
        result
    };
    let (first_result, second_result) = tokio::join!(first_login, second_login);
    first_result?;
    second_result?;

    // The login issued first finished last, so its stale result stands.
    let session = h.client.session.session();
    assert_eq!(session.identity(), Some(&first));
    assert_eq!(h.storage.get(CREDENTIAL_KEY).as_deref(), Some("first"));
    Ok(())
}

#[tokio::test]
async fn test_subscribers_see_every_transition() -> anyhow::Result<()> {
    let h = Harness::new();
    let seen: Rc<RefCell<Vec<bool>>> = Rc::default();
    let _subscription = {
        let seen = seen.clone();
        h.client
            .session
            .subscribe(move |session| seen.borrow_mut().push(session.is_authenticated()))
    };

    h.client.session.initialize().await;
    h.script_login("token", &identity(1, "a@x.com"));
    h.client.session.login("a@x.com", &password()).await?;
    h.client.session.logout();

    let seen = seen.borrow();
    assert_eq!(seen.first(), Some(&false));
    assert!(seen.contains(&true));
    assert_eq!(seen.last(), Some(&false));
    Ok(())
}
