use std::rc::Rc;

use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use shared::{
    BookDetail, BookQuery, BookSummary, Category, Identity, NewReservation, RegisterRequest,
    Reservation, ReservationStatus, Token,
};
use tracing::{info, warn};

use crate::error::{ApiError, Result};
use crate::navigation::Navigator;
use crate::pipeline::AuthorizedTransport;
use crate::session::SessionState;
use crate::transport::{Access, ApiRequest, Transport};

/// Typed client of the library API. All calls share one transport pipeline.
///
/// A gateway can only be built around the session pipeline:
///
/// ```compile_fail
/// use client::transport::{ApiRequest, ApiResponse, Transport, TransportError};
/// use client::Gateway;
///
/// struct Offline;
///
/// #[async_trait::async_trait(?Send)]
/// impl Transport for Offline {
///     async fn send(&self, _: ApiRequest) -> Result<ApiResponse, TransportError> {
///         Err(TransportError::Unreachable("offline".to_owned()))
///     }
/// }
///
/// let _ = Gateway::new(Offline);
/// ```
pub struct Gateway {
    transport: Box<dyn Transport>,
}

impl Gateway {
    fn new(transport: impl Transport + 'static) -> Self {
        Self {
            transport: Box::new(transport),
        }
    }

    /// Gateway whose calls carry the session credential and end the session
    /// when the server rejects it.
    pub fn with_session(
        transport: impl Transport + 'static,
        state: Rc<SessionState>,
        navigator: Rc<dyn Navigator>,
    ) -> Self {
        Self::new(AuthorizedTransport::new(transport, state, navigator))
    }

    async fn execute<T: DeserializeOwned>(&self, request: ApiRequest, fallback: &str) -> Result<T> {
        let access = request.access;
        let response = self.transport.send(request).await?;
        if response.is_success() {
            Ok(serde_json::from_str(&response.body)?)
        } else {
            Err(ApiError::from_response(access, &response, fallback))
        }
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<Identity> {
        let request = ApiRequest::post("/users/register")
            .access(Access::Anonymous)
            .json(request)?;
        let identity: Identity = self
            .execute(request, "Registration failed. Please try again.")
            .await?;
        info!(user_id = identity.id, "Api account registered");
        Ok(identity)
    }

    /// Token endpoint; credentials travel form-encoded as the password grant.
    pub async fn login(&self, username: &str, password: &SecretString) -> Result<Token> {
        let request = ApiRequest::post("/users/login")
            .access(Access::Anonymous)
            .form([
                ("username", username),
                ("password", password.expose_secret()),
                ("grant_type", "password"),
            ]);
        self.execute(request, "Login failed. Check your email and password.")
            .await
            .map_err(ApiError::into_authentication)
    }

    pub async fn current_user(&self) -> Result<Identity> {
        self.execute(
            ApiRequest::get("/users/me"),
            "Could not load the user profile.",
        )
        .await
    }

    pub async fn list_books(&self, query: &BookQuery) -> Result<Vec<BookSummary>> {
        let request = ApiRequest::get("/books/")
            .query_opt("category_id", query.category_id)
            .query_opt("skip", query.skip)
            .query_opt("limit", query.limit);
        self.execute(request, "Could not load books. Try reloading the page.")
            .await
    }

    pub async fn get_book(&self, book_id: i64) -> Result<BookDetail> {
        self.execute(
            ApiRequest::get(format!("/books/{book_id}")),
            "Could not load the book. Try reloading the page.",
        )
        .await
    }

    pub async fn list_categories(&self) -> Result<Vec<Category>> {
        self.execute(
            ApiRequest::get("/books/categories/list"),
            "Could not load categories.",
        )
        .await
    }

    pub async fn create_reservation(&self, reservation: &NewReservation) -> Result<Reservation> {
        let request = ApiRequest::post("/reservations/").json(reservation)?;
        let created: Reservation = self
            .execute(request, "Could not create the reservation. Please try again.")
            .await
            .inspect_err(|error| warn!(%error, book_id = reservation.book_id, "Api reservation rejected"))?;
        info!(
            reservation_id = created.id,
            book_id = created.book_id,
            "Api reservation created"
        );
        Ok(created)
    }

    pub async fn my_reservations(&self, status: ReservationStatus) -> Result<Vec<Reservation>> {
        let request = ApiRequest::get("/reservations/my").query("status_filter", status);
        self.execute(request, "Could not load your reservations.")
            .await
    }
}
