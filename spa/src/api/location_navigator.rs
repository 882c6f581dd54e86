use client::Navigator;
use yew_router::Routable;

use crate::router::Route;

/// Full page load of the login route, dropping every in-memory view state.
pub struct LocationNavigator;

impl Navigator for LocationNavigator {
    fn redirect_to_login(&self) {
        let Some(window) = web_sys::window() else {
            log::error!("No window, cannot redirect to login");
            return;
        };
        if let Err(error) = window.location().set_href(&Route::Login.to_path()) {
            log::error!("Fail to redirect to login, error={error:?}");
        }
    }
}
