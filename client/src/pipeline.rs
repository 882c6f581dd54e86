use std::rc::Rc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::navigation::Navigator;
use crate::session::SessionState;
use crate::transport::{Access, ApiRequest, ApiResponse, Transport, TransportError};

const UNAUTHORIZED: u16 = 401;

/// Request stage that attaches the session credential and turns a rejected
/// credential into a global logout followed by a redirect to the login view.
/// Every gateway call passes through here, so no caller has to handle it.
pub struct AuthorizedTransport<T> {
    inner: T,
    state: Rc<SessionState>,
    navigator: Rc<dyn Navigator>,
}

impl<T: Transport> AuthorizedTransport<T> {
    pub fn new(inner: T, state: Rc<SessionState>, navigator: Rc<dyn Navigator>) -> Self {
        Self {
            inner,
            state,
            navigator,
        }
    }
}

#[async_trait(?Send)]
impl<T: Transport> Transport for AuthorizedTransport<T> {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let access = request.access;
        let method = request.method;
        let path = request.path.clone();

        let request = match (access, self.state.credential()) {
            (Access::Anonymous, _) | (_, None) => request,
            (_, Some(credential)) => request.header("Authorization", credential.bearer()),
        };

        let response = self.inner.send(request).await?;
        debug!(
            method = method.as_str(),
            path = %path,
            status = response.status,
            "Api call completed"
        );

        if response.status == UNAUTHORIZED && access == Access::Authorized {
            warn!(path = %path, "Credential rejected by server, ending session");
            self.state.invalidate();
            self.navigator.redirect_to_login();
        }
        Ok(response)
    }
}
