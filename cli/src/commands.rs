use chrono::Local;
use client::{ApiError, LibraryClient, ReservationDraft};
use secrecy::SecretString;
use shared::{BookDetail, BookQuery, BookSummary, RegisterRequest, Reservation};
use tracing::info;

use crate::config::Command;

/// Turns an api failure into what the user reads on the terminal. A lost
/// authorization was already reported by the navigator.
fn user_facing(error: ApiError) -> anyhow::Error {
    match error.user_message() {
        Some(message) => anyhow::anyhow!(message),
        None => anyhow::anyhow!(error),
    }
}

pub async fn run(client: &LibraryClient, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Login { email, password } => login(client, &email, &password).await,
        Command::Register {
            email,
            password,
            name,
            surname,
            phone,
        } => {
            let request = RegisterRequest {
                email,
                password,
                name,
                surname,
                phone: phone.filter(|phone| !phone.trim().is_empty()),
            };
            let identity = client
                .session
                .register(request)
                .await
                .map_err(user_facing)?;
            println!("Registered and signed in as {}", identity.display_name());
            Ok(())
        }
        Command::Logout => {
            client.session.logout();
            println!("Signed out");
            Ok(())
        }
        Command::Whoami => {
            client.session.initialize().await;
            match client.session.session().identity() {
                Some(identity) => println!(
                    "{} <{}>, role: {}",
                    identity.display_name(),
                    identity.email,
                    identity.role
                ),
                None => println!("Not signed in"),
            }
            Ok(())
        }
        Command::Books {
            category,
            skip,
            limit,
        } => {
            client.session.initialize().await;
            let query = BookQuery {
                category_id: category,
                skip,
                limit: Some(limit),
            };
            let books = client
                .gateway
                .list_books(&query)
                .await
                .map_err(user_facing)?;
            if books.is_empty() {
                println!("No books found");
            }
            books.iter().for_each(print_book_summary);
            Ok(())
        }
        Command::Book { id } => {
            client.session.initialize().await;
            let book = client.gateway.get_book(id).await.map_err(user_facing)?;
            print_book_detail(&book);
            Ok(())
        }
        Command::Categories => {
            client.session.initialize().await;
            let categories = client
                .gateway
                .list_categories()
                .await
                .map_err(user_facing)?;
            for category in categories {
                match category.description {
                    Some(description) => {
                        println!("{:>5}  {}: {}", category.id, category.name, description)
                    }
                    None => println!("{:>5}  {}", category.id, category.name),
                }
            }
            Ok(())
        }
        Command::Reserve {
            book_id,
            start,
            days,
        } => {
            client.session.initialize().await;
            if !client.session.session().is_authenticated() {
                anyhow::bail!("Sign in first with `library-cli login`");
            }
            let start_date = start.unwrap_or_else(|| Local::now().date_naive());
            let draft = ReservationDraft::new(book_id, start_date).with_days(days);
            let reservation = client
                .reservations
                .submit(&draft, |reservation| {
                    info!(reservation_id = reservation.id, "Reservation created");
                })
                .await
                .map_err(user_facing)?;
            print_reservation(&reservation);
            Ok(())
        }
        Command::Reservations { status } => {
            client.session.initialize().await;
            let reservations = client
                .gateway
                .my_reservations(status)
                .await
                .map_err(user_facing)?;
            if reservations.is_empty() {
                println!("No {status} reservations");
            }
            reservations.iter().for_each(print_reservation);
            Ok(())
        }
    }
}

async fn login(client: &LibraryClient, email: &str, password: &SecretString) -> anyhow::Result<()> {
    let identity = client
        .session
        .login(email, password)
        .await
        .map_err(user_facing)?;
    println!("Signed in as {}", identity.display_name());
    Ok(())
}

fn print_book_summary(book: &BookSummary) {
    let category = book
        .category
        .as_ref()
        .map(|category| category.name.as_str())
        .unwrap_or("-");
    println!(
        "{:>5}  {} by {} [{}], {} available",
        book.id, book.title, book.author, category, book.available_copies
    );
}

fn print_book_detail(book: &BookDetail) {
    println!("{} by {}", book.title, book.author);
    if let Some(category) = &book.category {
        println!("Category: {}", category.name);
    }
    if let Some(isbn) = &book.isbn {
        println!("ISBN: {isbn}");
    }
    println!(
        "Copies: {} of {} available",
        book.available_copies, book.total_copies
    );
    if let Some(description) = &book.description {
        println!();
        println!("{description}");
    }
}

fn print_reservation(reservation: &Reservation) {
    let title = reservation
        .book
        .as_ref()
        .map(|book| book.title.clone())
        .unwrap_or_else(|| format!("book #{}", reservation.book_id));
    println!(
        "{:>5}  {}  {} -> {}  [{}]",
        reservation.id, title, reservation.start_date, reservation.end_date, reservation.status
    );
}
