use yew::prelude::*;
use yew_router::prelude::*;

use crate::components::composite::protected_route::ProtectedRoute;
use crate::pages::{
    book_detail::BookDetailPage, books::BooksPage, login::LoginPage, register::RegisterPage,
    reservations::ReservationsPage,
};

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Books,
    #[at("/books/:id")]
    Book { id: i64 },
    #[at("/login")]
    Login,
    #[at("/register")]
    Register,
    #[at("/reservations")]
    Reservations,
    #[not_found]
    #[at("/404")]
    NotFound,
}

pub fn switch(route: Route) -> Html {
    match route {
        Route::Books => html! { <BooksPage /> },
        Route::Book { id } => html! { <BookDetailPage book_id={id} /> },
        Route::Login => html! { <LoginPage /> },
        Route::Register => html! { <RegisterPage /> },
        Route::Reservations => html! {
            <ProtectedRoute>
                <ReservationsPage />
            </ProtectedRoute>
        },
        Route::NotFound => html! { <Redirect<Route> to={Route::Books} /> },
    }
}
