#![allow(dead_code)]

use std::rc::Rc;

use client::{LibraryClient, MemoryStorage, Navigator};
use serde_json::{json, Value};
use shared::Identity;

pub mod fake_transport;

pub use fake_transport::FakeTransport;

/// Counts hard redirects to the login view.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    redirects: std::cell::Cell<usize>,
}

impl RecordingNavigator {
    pub fn redirects(&self) -> usize {
        self.redirects.get()
    }
}

impl Navigator for RecordingNavigator {
    fn redirect_to_login(&self) {
        self.redirects.set(self.redirects.get() + 1);
    }
}

/// A client wired to a scripted transport, in-memory storage and a
/// recording navigator.
pub struct Harness {
    pub transport: Rc<FakeTransport>,
    pub storage: Rc<MemoryStorage>,
    pub navigator: Rc<RecordingNavigator>,
    pub client: LibraryClient,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_storage(MemoryStorage::default())
    }

    pub fn with_storage(storage: MemoryStorage) -> Self {
        let transport = Rc::new(FakeTransport::default());
        let storage = Rc::new(storage);
        let navigator = Rc::new(RecordingNavigator::default());
        let client = LibraryClient::new(transport.clone(), storage.clone(), navigator.clone());
        Self {
            transport,
            storage,
            navigator,
            client,
        }
    }

    /// Scripts a successful login for `identity` with the given token.
    pub fn script_login(&self, token: &str, identity: &Identity) {
        self.transport
            .respond("POST", "/users/login", 200, token_json(token));
        self.transport
            .respond("GET", "/users/me", 200, identity_json(identity));
    }
}

pub fn identity(id: i64, email: &str) -> Identity {
    Identity {
        id,
        email: email.to_owned(),
        name: "Ann".to_owned(),
        surname: "Lee".to_owned(),
        phone: None,
        role: "reader".to_owned(),
    }
}

pub fn identity_json(identity: &Identity) -> Value {
    serde_json::to_value(identity).expect("identity serializes")
}

pub fn token_json(token: &str) -> Value {
    json!({"access_token": token, "token_type": "bearer"})
}

pub fn reservation_json(id: i64, book_id: i64, start_date: &str, end_date: &str) -> Value {
    json!({
        "id": id,
        "user_id": 1,
        "book_id": book_id,
        "book": {
            "id": book_id,
            "title": "Dune",
            "author": "Frank Herbert",
            "category_id": 2,
            "category": {"id": 2, "name": "Sci-Fi", "description": null},
            "available_copies": 2
        },
        "start_date": start_date,
        "end_date": end_date,
        "created_at": "2025-05-30T09:15:00",
        "status": "active"
    })
}
