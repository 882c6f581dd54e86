use shared::BookSummary;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::router::Route;

#[derive(PartialEq, Properties)]
pub struct Props {
    pub book: BookSummary,
}

#[function_component(BookCard)]
pub fn book_card(props: &Props) -> Html {
    let book = &props.book;
    let availability = if book.available_copies > 0 {
        html! { <span class="badge bg-success">{format!("{} available", book.available_copies)}</span> }
    } else {
        html! { <span class="badge bg-secondary">{"Not available"}</span> }
    };

    html! {
        <div class="col">
            <div class="card h-100">
                <div class="card-body">
                    <h5 class="card-title">{&book.title}</h5>
                    <h6 class="card-subtitle mb-2 text-muted">{&book.author}</h6>
                    if let Some(category) = &book.category {
                        <p class="card-text"><small>{&category.name}</small></p>
                    }
                    {availability}
                </div>
                <div class="card-footer bg-transparent">
                    <Link<Route> to={Route::Book { id: book.id }} classes={classes!("btn", "btn-sm", "btn-outline-primary")}>
                        {"Details"}
                    </Link<Route>>
                </div>
            </div>
        </div>
    }
}
