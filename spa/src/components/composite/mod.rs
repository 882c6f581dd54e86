pub mod book_card;
pub mod login_form;
pub mod navigation_bar;
pub mod protected_route;
pub mod register_form;
pub mod reservation_modal;
pub mod reservations_table;
