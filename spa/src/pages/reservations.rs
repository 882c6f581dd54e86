use shared::ReservationStatus;
use yew::prelude::*;
use yew_hooks::prelude::*;

use crate::components::atoms::error_alert::ErrorAlert;
use crate::components::atoms::loading_spinner::LoadingSpinner;
use crate::components::atoms::select::{Select, SelectOption};
use crate::components::composite::reservations_table::ReservationsTable;
use crate::session_context::use_session;

fn status_label(status: ReservationStatus) -> &'static str {
    match status {
        ReservationStatus::Active => "Active",
        ReservationStatus::Completed => "Completed",
        ReservationStatus::Cancelled => "Cancelled",
    }
}

fn status_options() -> Vec<SelectOption> {
    ReservationStatus::ALL
        .into_iter()
        .map(|status| SelectOption::new(status.to_string(), status_label(status)))
        .collect()
}

#[function_component(ReservationsPage)]
pub fn reservations_page() -> Html {
    let context = use_session();
    let status = use_state(ReservationStatus::default);

    let reservations = {
        let gateway = context.client.gateway.clone();
        let status = *status;
        use_async(async move {
            gateway.my_reservations(status).await.inspect_err(|error| {
                log::warn!("Fail to load reservations, status={status}, error: {error}");
            })
        })
    };

    {
        let reservations = reservations.clone();
        use_effect_with(*status, move |_| reservations.run());
    }

    let on_status_change = {
        let status = status.clone();
        Callback::from(move |value: String| match value.parse::<ReservationStatus>() {
            Ok(selected) => status.set(selected),
            Err(error) => log::error!("Unknown reservation status: {value}, error: {error}"),
        })
    };

    let pending = reservations.data.is_none() && reservations.error.is_none();
    let content = if reservations.loading || pending {
        html! { <LoadingSpinner /> }
    } else if let Some(error) = &reservations.error {
        html! { <ErrorAlert message={error.user_message()} /> }
    } else {
        html! {
            <ReservationsTable reservations={reservations.data.clone().unwrap_or_default()} />
        }
    };

    html! {
        <div class="container mt-4">
            <div class="d-flex justify-content-between align-items-center mb-4">
                <h1>{"My reservations"}</h1>
                <div style="min-width: 200px;">
                    <Select
                        id="status-filter"
                        name="status"
                        class="form-select"
                        options={status_options()}
                        selected={status.to_string()}
                        on_change={on_status_change} />
                </div>
            </div>
            {content}
        </div>
    }
}
