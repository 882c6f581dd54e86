use chrono::{DateTime, Local};
use shared::{Reservation, ReservationStatus};
use yew::prelude::*;
use yew_router::prelude::*;

use crate::router::Route;

#[derive(Debug, Clone, PartialEq, Properties)]
pub struct Props {
    pub reservations: Vec<Reservation>,
}

fn status_badge(status: ReservationStatus) -> Html {
    let class = match status {
        ReservationStatus::Active => "badge bg-primary",
        ReservationStatus::Completed => "badge bg-success",
        ReservationStatus::Cancelled => "badge bg-secondary",
    };
    html! { <span class={class}>{status.as_ref()}</span> }
}

fn render_reservation(reservation: &Reservation) -> Html {
    let created_at: DateTime<Local> = reservation.created_at.into();
    let title = match &reservation.book {
        Some(book) => format!("{} ({})", book.title, book.author),
        None => format!("Book #{}", reservation.book_id),
    };

    html! {
        <tr>
            <td>{reservation.id}</td>
            <td>
                <Link<Route> to={Route::Book { id: reservation.book_id }}>{title}</Link<Route>>
            </td>
            <td>{reservation.start_date.to_string()}</td>
            <td>{reservation.end_date.to_string()}</td>
            <td>{status_badge(reservation.status)}</td>
            <td>{created_at.format("%Y-%m-%d %H:%M").to_string()}</td>
        </tr>
    }
}

#[function_component(ReservationsTable)]
pub fn reservations_table(props: &Props) -> Html {
    let content = if props.reservations.is_empty() {
        html! {
            <tr>
                <td colspan="6" class="text-center text-muted">{"No reservations found"}</td>
            </tr>
        }
    } else {
        html! { { for props.reservations.iter().map(render_reservation) } }
    };

    html! {
        <table class="table table-striped table-hover">
            <thead>
              <tr>
                <th>{"ID"}</th>
                <th>{"Book"}</th>
                <th>{"Start"}</th>
                <th>{"End"}</th>
                <th>{"Status"}</th>
                <th>{"Created At"}</th>
              </tr>
            </thead>
            <tbody>
                {content}
            </tbody>
        </table>
    }
}
