use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use secrecy::SecretString;
use shared::ReservationStatus;
use url::Url;

#[derive(Parser, Debug)]
#[command(version, about = "Browse the library catalog and manage reservations")]
pub struct Cli {
    #[clap(flatten)]
    pub config: Config,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Args, Clone, Debug)]
pub struct Config {
    #[arg(
        long,
        help = "Root of the library API",
        env = "LIBRARY_API_URL",
        default_value = "http://localhost:8000",
        global = true
    )]
    pub endpoint: Url,

    #[arg(
        long,
        help = "Where the session is kept between runs, defaults to ~/.library-client/session.json",
        env = "LIBRARY_SESSION_FILE",
        global = true
    )]
    pub session_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Sign in and keep the session for later commands
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "LIBRARY_PASSWORD", hide_env_values = true)]
        password: SecretString,
    },
    /// Create an account, then sign in with it
    Register {
        #[arg(long)]
        email: String,
        #[arg(long, env = "LIBRARY_PASSWORD", hide_env_values = true)]
        password: SecretString,
        #[arg(long)]
        name: String,
        #[arg(long)]
        surname: String,
        #[arg(long)]
        phone: Option<String>,
    },
    /// Forget the stored session
    Logout,
    /// Show the signed in account
    Whoami,
    /// List the catalog
    Books {
        #[arg(long)]
        category: Option<i64>,
        #[arg(long)]
        skip: Option<u32>,
        #[arg(long, default_value_t = 100)]
        limit: u32,
    },
    /// Show one book
    Book { id: i64 },
    /// List the catalog categories
    Categories,
    /// Reserve a book
    Reserve {
        book_id: i64,
        #[arg(long, help = "First day of the reservation, defaults to today")]
        start: Option<NaiveDate>,
        #[arg(long, default_value_t = client::reservation::DEFAULT_DAYS)]
        days: u32,
    },
    /// List your reservations
    Reservations {
        #[arg(long, default_value_t = ReservationStatus::Active)]
        status: ReservationStatus,
    },
}
