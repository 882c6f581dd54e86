use std::rc::Rc;

use secrecy::SecretString;
use shared::{Identity, RegisterRequest};
use tracing::{info, warn};

use crate::error::Result;
use crate::gateway::Gateway;
use crate::session::{Credential, Session, SessionState, Subscription};

/// Login, registration and logout over the shared session state.
///
/// Operations are not deduplicated or cancelled: when two of them overlap,
/// whichever completes last determines the final session.
#[derive(Clone)]
pub struct SessionStore {
    state: Rc<SessionState>,
    gateway: Rc<Gateway>,
}

impl SessionStore {
    pub fn new(state: Rc<SessionState>, gateway: Rc<Gateway>) -> Self {
        Self { state, gateway }
    }

    pub fn session(&self) -> Session {
        self.state.snapshot()
    }

    pub fn subscribe(&self, listener: impl Fn(&Session) + 'static) -> Subscription {
        self.state.subscribe(listener)
    }

    /// One-time startup check of the persisted credential. A rejected
    /// credential goes through the same 401 handling as any other call.
    /// Other failures are logged and leave the session logged out.
    pub async fn initialize(&self) {
        let Some(credential) = self.state.persisted_credential() else {
            info!("No persisted credential, starting logged out");
            self.state.begin_initialization(None);
            self.state.end_initialization();
            return;
        };

        self.state.begin_initialization(Some(credential));
        match self.gateway.current_user().await {
            Ok(identity) => {
                info!(user_id = identity.id, "Persisted credential accepted");
                self.state.store_identity(identity);
            }
            Err(error) => {
                warn!(%error, "Fail to validate persisted credential, cleaning session");
                self.state.invalidate();
            }
        }
        self.state.end_initialization();
    }

    pub async fn login(&self, username: &str, password: &SecretString) -> Result<Identity> {
        let token = self.gateway.login(username, password).await?;
        self.state.store_credential(Credential::new(token.access_token));

        let identity = self.gateway.current_user().await?;
        self.state.store_identity(identity.clone());
        info!(user_id = identity.id, "User login successful");
        Ok(identity)
    }

    /// Creates the account and logs into it. When the login step fails the
    /// account still exists server-side; nothing is retried.
    pub async fn register(&self, request: RegisterRequest) -> Result<Identity> {
        let created = self.gateway.register(&request).await?;
        info!(user_id = created.id, "Account created, logging in");
        self.login(&request.email, &request.password).await
    }

    pub fn logout(&self) {
        info!("User logged out");
        self.state.invalidate();
    }

    /// Reloads the identity. Any failure is treated as an invalid credential.
    pub async fn refresh(&self) -> Result<Identity> {
        match self.gateway.current_user().await {
            Ok(identity) => {
                self.state.store_identity(identity.clone());
                Ok(identity)
            }
            Err(error) => {
                warn!(%error, "Fail to refresh identity, logging out");
                self.logout();
                Err(error)
            }
        }
    }
}
