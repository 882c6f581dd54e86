use shared::{BookDetail, Reservation};
use yew::prelude::*;
use yew_hooks::prelude::*;
use yew_router::prelude::*;

use crate::components::atoms::error_alert::ErrorAlert;
use crate::components::atoms::loading_spinner::LoadingSpinner;
use crate::components::composite::reservation_modal::ReservationModal;
use crate::router::Route;
use crate::session_context::use_session;

#[derive(PartialEq, Properties)]
pub struct Props {
    pub book_id: i64,
}

#[function_component(BookDetailPage)]
pub fn book_detail_page(props: &Props) -> Html {
    let context = use_session();
    let show_modal = use_state(|| false);
    // bumped after every reservation so availability is read back from the server
    let reload = use_counter(0);
    let notice = use_state(|| Option::<String>::None);

    let book = {
        let gateway = context.client.gateway.clone();
        let book_id = props.book_id;
        use_async(async move {
            gateway.get_book(book_id).await.inspect_err(|error| {
                log::warn!("Fail to load book, book_id={book_id}, error: {error}");
            })
        })
    };

    {
        let book = book.clone();
        use_effect_with((props.book_id, *reload), move |_| book.run());
    }

    let on_open = {
        let show_modal = show_modal.clone();
        Callback::from(move |_: MouseEvent| show_modal.set(true))
    };

    let on_close = {
        let show_modal = show_modal.clone();
        Callback::from(move |_: ()| show_modal.set(false))
    };

    let on_success = {
        let show_modal = show_modal.clone();
        let reload = reload.clone();
        let notice = notice.clone();
        Callback::from(move |reservation: Reservation| {
            log::info!("Book reserved, reservation_id={}", reservation.id);
            notice.set(Some(format!(
                "Reserved from {} until {}.",
                reservation.start_date, reservation.end_date
            )));
            show_modal.set(false);
            reload.increase();
        })
    };

    let content = match (&book.data, &book.error) {
        (_, Some(error)) => html! { <ErrorAlert message={error.user_message()} /> },
        (Some(detail), None) => render_book(detail, context.is_authenticated(), on_open),
        (None, None) => html! { <LoadingSpinner /> },
    };

    let modal = match (&book.data, *show_modal) {
        (Some(detail), true) => html! {
            <ReservationModal
                book_id={detail.id}
                book_title={detail.title.clone()}
                on_close={on_close}
                on_success={on_success} />
        },
        _ => html! {},
    };

    html! {
        <div class="container mt-4">
            <Link<Route> to={Route::Books} classes={classes!("btn", "btn-link", "px-0", "mb-3")}>
                {"< Back to catalog"}
            </Link<Route>>
            if let Some(message) = &*notice {
                <div class="alert alert-success" role="alert">{message}</div>
            }
            {content}
            {modal}
        </div>
    }
}

fn render_book(book: &BookDetail, authenticated: bool, on_reserve: Callback<MouseEvent>) -> Html {
    let available = book.available_copies > 0;
    html! {
        <div class="card">
            <div class="card-body">
                <h2 class="card-title">{&book.title}</h2>
                <h5 class="card-subtitle mb-3 text-muted">{&book.author}</h5>
                if let Some(category) = &book.category {
                    <span class="badge bg-info text-dark mb-3">{&category.name}</span>
                }
                if let Some(description) = &book.description {
                    <p class="card-text">{description}</p>
                }
                <dl class="row">
                    if let Some(isbn) = &book.isbn {
                        <dt class="col-sm-3">{"ISBN"}</dt>
                        <dd class="col-sm-9">{isbn}</dd>
                    }
                    <dt class="col-sm-3">{"Copies"}</dt>
                    <dd class="col-sm-9">
                        {format!("{} of {} available", book.available_copies, book.total_copies)}
                    </dd>
                </dl>
                if authenticated {
                    <button class="btn btn-primary" disabled={!available} onclick={on_reserve}>
                        { if available { "Reserve" } else { "No copies available" } }
                    </button>
                } else {
                    <p class="text-muted">
                        <Link<Route> to={Route::Login}>{"Sign in"}</Link<Route>>
                        {" to reserve this book."}
                    </p>
                }
            </div>
        </div>
    }
}
