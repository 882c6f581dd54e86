mod common;

use client::storage::CREDENTIAL_KEY;
use client::{guard, GuardDecision, MemoryStorage};
use common::{identity, identity_json, Harness};
use serde_json::json;

#[tokio::test]
async fn test_guard_waits_while_initializing() {
    let h = Harness::with_storage(MemoryStorage::with_entries([(CREDENTIAL_KEY, "token")]));

    assert_eq!(guard(&h.client.session.session()), GuardDecision::Loading);
}

#[tokio::test]
async fn test_guard_renders_for_authenticated_session() {
    let h = Harness::with_storage(MemoryStorage::with_entries([(CREDENTIAL_KEY, "token")]));
    h.transport.respond(
        "GET",
        "/users/me",
        200,
        identity_json(&identity(1, "a@x.com")),
    );

    h.client.session.initialize().await;

    assert_eq!(guard(&h.client.session.session()), GuardDecision::Render);
}

#[tokio::test]
async fn test_guard_redirects_without_identity() {
    let h = Harness::with_storage(MemoryStorage::with_entries([(CREDENTIAL_KEY, "token")]));
    h.transport
        .respond("GET", "/users/me", 401, json!({"detail": "expired"}));

    h.client.session.initialize().await;

    assert_eq!(
        guard(&h.client.session.session()),
        GuardDecision::RedirectToLogin
    );
    assert_eq!(h.navigator.redirects(), 1);
}

#[tokio::test]
async fn test_guard_redirects_after_logout() {
    let h = Harness::with_storage(MemoryStorage::with_entries([(CREDENTIAL_KEY, "token")]));
    h.transport.respond(
        "GET",
        "/users/me",
        200,
        identity_json(&identity(1, "a@x.com")),
    );
    h.client.session.initialize().await;

    h.client.session.logout();

    assert_eq!(
        guard(&h.client.session.session()),
        GuardDecision::RedirectToLogin
    );
}
