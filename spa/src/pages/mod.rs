pub mod book_detail;
pub mod books;
pub mod login;
pub mod register;
pub mod reservations;
