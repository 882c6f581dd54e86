use chrono::{Local, NaiveDate};
use client::reservation::{ALLOWED_DAYS, DEFAULT_DAYS};
use client::ReservationDraft;
use shared::Reservation;
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::components::atoms::error_alert::ErrorAlert;
use crate::components::atoms::input_date::InputDate;
use crate::components::atoms::input_text::{InputText, InputType};
use crate::session_context::use_session;

#[derive(Debug, Clone, PartialEq)]
struct ReservationFormState {
    start_date: Option<NaiveDate>,
    days: String,
    is_submitting: bool,
    error: Option<String>,
}

#[derive(PartialEq, Properties)]
pub struct Props {
    pub book_id: i64,
    pub book_title: String,
    pub on_close: Callback<()>,
    pub on_success: Callback<Reservation>,
}

/// Non-numeric input falls back to the default length, the range check is
/// left to the draft validation.
fn parse_days(input: &str) -> u32 {
    input.trim().parse().unwrap_or(DEFAULT_DAYS)
}

#[function_component(ReservationModal)]
pub fn reservation_modal(props: &Props) -> Html {
    let context = use_session();
    let today = Local::now().date_naive();
    let state = use_state(|| ReservationFormState {
        start_date: Some(today),
        days: DEFAULT_DAYS.to_string(),
        is_submitting: false,
        error: None,
    });

    let on_change_start_date = {
        let state = state.clone();
        Callback::from(move |start_date: Option<NaiveDate>| {
            let mut data = (*state).clone();
            data.start_date = start_date;
            state.set(data);
        })
    };

    let on_change_days = {
        let state = state.clone();
        Callback::from(move |days: String| {
            let mut data = (*state).clone();
            data.days = days;
            state.set(data);
        })
    };

    let on_dismiss_error = {
        let state = state.clone();
        Callback::from(move |_: ()| {
            let mut data = (*state).clone();
            data.error = None;
            state.set(data);
        })
    };

    let on_submit = {
        let state = state.clone();
        let client = context.client.clone();
        let book_id = props.book_id;
        let on_success = props.on_success.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let Some(start_date) = state.start_date else {
                let mut data = (*state).clone();
                data.error = Some("Pick a start date.".to_owned());
                state.set(data);
                return;
            };
            let draft = ReservationDraft::new(book_id, start_date).with_days(parse_days(&state.days));

            let mut data = (*state).clone();
            data.is_submitting = true;
            data.error = None;
            state.set(data.clone());

            let state = state.clone();
            let client = client.clone();
            let on_success = on_success.clone();
            spawn_local(async move {
                let result = client
                    .reservations
                    .submit(&draft, |reservation| on_success.emit(reservation.clone()))
                    .await;
                if let Err(error) = result {
                    log::warn!("Reservation failed, book_id={book_id}, error: {error}");
                    data.is_submitting = false;
                    data.error = error.user_message();
                    state.set(data);
                }
            });
        })
    };

    let on_close_click = props.on_close.reform(|_: MouseEvent| ());

    html! {
        <>
            <div class="modal fade show d-block" tabindex="-1" role="dialog" aria-modal="true">
              <div class="modal-dialog modal-dialog-centered">
                <div class="modal-content">
                  <form onsubmit={on_submit}>
                    <div class="modal-header">
                      <h1 class="modal-title fs-5">{format!("Reserve \"{}\"", props.book_title)}</h1>
                      <button type="button" class="btn-close" aria-label="Close" onclick={on_close_click.clone()}></button>
                    </div>
                    <div class="modal-body">
                      <ErrorAlert message={state.error.clone()} on_dismiss={on_dismiss_error} />
                      <div class="mb-3">
                        <label for="start-date" class="form-label">{"Start date"}</label>
                        <InputDate
                            id="start-date"
                            name="start_date"
                            class={"form-control"}
                            value={state.start_date}
                            min={Some(today)}
                            on_change={on_change_start_date} />
                      </div>
                      <div class="mb-3">
                        <label for="days" class="form-label">{"Days"}</label>
                        <InputText
                            id="days"
                            name="days"
                            class={"form-control"}
                            input_type={InputType::Number}
                            min={Some(ALLOWED_DAYS.start().to_string())}
                            max={Some(ALLOWED_DAYS.end().to_string())}
                            value={state.days.clone()}
                            required={true}
                            on_change={on_change_days} />
                        <div class="form-text">
                            {format!("Between {} and {} days.", ALLOWED_DAYS.start(), ALLOWED_DAYS.end())}
                        </div>
                      </div>
                    </div>
                    <div class="modal-footer">
                      <button type="button" class="btn btn-secondary" onclick={on_close_click}>{"Cancel"}</button>
                      <button type="submit" class="btn btn-primary" disabled={state.is_submitting}>
                        { if state.is_submitting { "Reserving..." } else { "Reserve" } }
                      </button>
                    </div>
                  </form>
                </div>
              </div>
            </div>
            <div class="modal-backdrop fade show"></div>
        </>
    }
}
