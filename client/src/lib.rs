//! Session and request gateway of the library catalog client.
//!
//! The crate is platform neutral: the browser app and the command line tool
//! plug in their own [`Transport`], [`KeyValueStorage`] and [`Navigator`].

use std::rc::Rc;

pub mod error;
pub mod gateway;
pub mod guard;
pub mod navigation;
pub mod pipeline;
pub mod reservation;
pub mod session;
pub mod storage;
pub mod store;
pub mod transport;

pub use error::{ApiError, FieldError};
pub use gateway::Gateway;
pub use guard::{guard, GuardDecision};
pub use navigation::Navigator;
pub use reservation::{ReservationDraft, ReservationWorkflow};
pub use session::{Credential, Session, SessionState, Subscription};
pub use storage::{KeyValueStorage, MemoryStorage, StorageError};
pub use store::SessionStore;
pub use transport::{Access, ApiRequest, ApiResponse, Transport, TransportError};

/// Everything a front end needs, wired around one session state.
#[derive(Clone)]
pub struct LibraryClient {
    pub gateway: Rc<Gateway>,
    pub session: SessionStore,
    pub reservations: ReservationWorkflow,
}

impl LibraryClient {
    pub fn new(
        transport: impl Transport + 'static,
        storage: Rc<dyn KeyValueStorage>,
        navigator: Rc<dyn Navigator>,
    ) -> Self {
        let state = SessionState::new(storage);
        let gateway = Rc::new(Gateway::with_session(transport, state.clone(), navigator));
        Self {
            session: SessionStore::new(state, gateway.clone()),
            reservations: ReservationWorkflow::new(gateway.clone()),
            gateway,
        }
    }
}

impl PartialEq for LibraryClient {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.gateway, &other.gateway)
    }
}
