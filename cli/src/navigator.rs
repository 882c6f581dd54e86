use client::Navigator;
use tracing::warn;

/// A terminal has no login page, the user is told to sign in again.
pub struct LoginHint;

impl Navigator for LoginHint {
    fn redirect_to_login(&self) {
        warn!("Session expired or rejected by the server");
        eprintln!("Your session has expired. Run `library-cli login` to sign in again.");
    }
}
