use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use shared::Identity;
use tracing::{debug, warn};

use crate::storage::{KeyValueStorage, CREDENTIAL_KEY, IDENTITY_KEY};

/// Opaque bearer token issued by the API.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential([REDACTED])")
    }
}

/// Client-side authentication state. The identity is only ever set from a
/// server response to the current credential.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Session {
    credential: Option<Credential>,
    identity: Option<Identity>,
    initializing: bool,
}

impl Session {
    pub fn credential(&self) -> Option<&Credential> {
        self.credential.as_ref()
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    pub fn is_initializing(&self) -> bool {
        self.initializing
    }

    pub fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }
}

type Listener = Rc<dyn Fn(&Session)>;

/// The single owned session container, shared by the session store and the
/// request pipeline. Every mutation is mirrored to persistent storage and
/// announced to subscribers.
pub struct SessionState {
    session: RefCell<Session>,
    storage: Rc<dyn KeyValueStorage>,
    listeners: RefCell<Vec<(usize, Listener)>>,
    next_listener: Cell<usize>,
}

impl SessionState {
    /// Starts in the initializing state; `SessionStore::initialize` ends it.
    pub fn new(storage: Rc<dyn KeyValueStorage>) -> Rc<Self> {
        Rc::new(Self {
            session: RefCell::new(Session {
                initializing: true,
                ..Session::default()
            }),
            storage,
            listeners: RefCell::new(Vec::new()),
            next_listener: Cell::new(0),
        })
    }

    pub fn snapshot(&self) -> Session {
        self.session.borrow().clone()
    }

    pub fn credential(&self) -> Option<Credential> {
        self.session.borrow().credential.clone()
    }

    pub fn subscribe(self: &Rc<Self>, listener: impl Fn(&Session) + 'static) -> Subscription {
        let id = self.next_listener.get();
        self.next_listener.set(id + 1);
        self.listeners.borrow_mut().push((id, Rc::new(listener)));
        Subscription {
            state: Rc::downgrade(self),
            id,
        }
    }

    pub(crate) fn persisted_credential(&self) -> Option<Credential> {
        self.storage
            .get(CREDENTIAL_KEY)
            .filter(|token| !token.is_empty())
            .map(Credential::new)
    }

    pub(crate) fn begin_initialization(&self, credential: Option<Credential>) {
        self.update(|session| {
            session.credential = credential;
            session.identity = None;
            session.initializing = true;
        });
    }

    pub(crate) fn end_initialization(&self) {
        self.update(|session| session.initializing = false);
    }

    /// Replaces the credential and drops any identity obtained with the
    /// previous one. The credential is persisted before anything else.
    pub(crate) fn store_credential(&self, credential: Credential) {
        self.write(CREDENTIAL_KEY, credential.expose());
        self.erase(IDENTITY_KEY);
        self.update(|session| {
            session.credential = Some(credential);
            session.identity = None;
        });
    }

    pub(crate) fn store_identity(&self, identity: Identity) {
        match serde_json::to_string(&identity) {
            Ok(snapshot) => self.write(IDENTITY_KEY, &snapshot),
            Err(error) => warn!(%error, "Fail to serialize identity snapshot"),
        }
        self.update(|session| session.identity = Some(identity));
    }

    /// Drops credential, identity and their persisted copies. Idempotent.
    pub fn invalidate(&self) {
        self.erase(CREDENTIAL_KEY);
        self.erase(IDENTITY_KEY);
        self.update(|session| {
            session.credential = None;
            session.identity = None;
        });
    }

    fn write(&self, key: &str, value: &str) {
        if let Err(error) = self.storage.set(key, value) {
            warn!(%error, key, "Fail to persist session entry");
        }
    }

    fn erase(&self, key: &str) {
        if let Err(error) = self.storage.remove(key) {
            warn!(%error, key, "Fail to remove persisted session entry");
        }
    }

    fn update(&self, mutation: impl FnOnce(&mut Session)) {
        let snapshot = {
            let mut session = self.session.borrow_mut();
            mutation(&mut session);
            session.clone()
        };
        let listeners: Vec<Listener> = self
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();
        debug!(
            authenticated = snapshot.is_authenticated(),
            initializing = snapshot.initializing,
            listeners = listeners.len(),
            "Session changed"
        );
        for listener in listeners {
            listener(&snapshot);
        }
    }
}

/// Detaches its listener when dropped.
#[must_use = "the listener is removed as soon as the subscription is dropped"]
pub struct Subscription {
    state: Weak<SessionState>,
    id: usize,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(state) = self.state.upgrade() {
            state
                .listeners
                .borrow_mut()
                .retain(|(listener_id, _)| *listener_id != self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn identity() -> Identity {
        Identity {
            id: 1,
            email: "a@x.com".to_owned(),
            name: "Ann".to_owned(),
            surname: "Lee".to_owned(),
            phone: None,
            role: "reader".to_owned(),
        }
    }

    #[test]
    fn new_credential_discards_previous_identity() {
        let storage = Rc::new(MemoryStorage::default());
        let state = SessionState::new(storage.clone());
        state.store_credential(Credential::new("first"));
        state.store_identity(identity());
        assert!(storage.get(IDENTITY_KEY).is_some());

        state.store_credential(Credential::new("second"));

        let session = state.snapshot();
        assert!(!session.is_authenticated());
        assert_eq!(session.credential(), Some(&Credential::new("second")));
        assert_eq!(storage.get(CREDENTIAL_KEY).as_deref(), Some("second"));
        assert_eq!(storage.get(IDENTITY_KEY), None);
    }

    #[test]
    fn listeners_observe_changes_until_dropped() {
        let state = SessionState::new(Rc::new(MemoryStorage::default()));
        let seen = Rc::new(Cell::new(0));

        let subscription = {
            let seen = seen.clone();
            state.subscribe(move |_| seen.set(seen.get() + 1))
        };
        state.end_initialization();
        state.invalidate();
        assert_eq!(seen.get(), 2);

        drop(subscription);
        state.invalidate();
        assert_eq!(seen.get(), 2);
    }

    #[test]
    fn credential_debug_is_redacted() {
        let credential = Credential::new("secret-token");
        assert!(!format!("{credential:?}").contains("secret-token"));
    }
}
