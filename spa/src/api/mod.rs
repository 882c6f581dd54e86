use std::rc::Rc;

use client::LibraryClient;
use url::Url;

pub mod gloo_transport;
pub mod local_storage;
pub mod location_navigator;

use gloo_transport::GlooTransport;
use local_storage::LocalStorage;
use location_navigator::LocationNavigator;

/// Root of the library API, fixed at build time.
pub const API_BASE_URL: &str = match option_env!("API_BASE_URL") {
    Some(url) => url,
    None => "http://localhost:8000",
};

pub fn library_client() -> anyhow::Result<LibraryClient> {
    let base_url = Url::parse(API_BASE_URL)
        .map_err(|error| anyhow::anyhow!("Invalid API_BASE_URL={API_BASE_URL}, error: {error}"))?;
    log::info!("Using library api, endpoint={base_url}");
    Ok(LibraryClient::new(
        GlooTransport::new(base_url),
        Rc::new(LocalStorage),
        Rc::new(LocationNavigator),
    ))
}
