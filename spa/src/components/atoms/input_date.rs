use chrono::NaiveDate;
use wasm_bindgen::JsCast;
use web_sys::{EventTarget, HtmlInputElement};
use yew::prelude::*;

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(PartialEq, Properties, Debug)]
pub struct Props {
    pub id: String,
    pub name: String,
    pub value: Option<NaiveDate>,
    #[prop_or_default]
    pub min: Option<NaiveDate>,
    #[prop_or_default]
    pub class: Classes,
    pub on_change: Callback<Option<NaiveDate>>,
}

#[function_component(InputDate)]
pub fn input_date(props: &Props) -> Html {
    let callback = props.on_change.clone();

    let on_change = Callback::from(move |event: Event| {
        let target: EventTarget = event.target().expect("Fail to cast to EventTarget");
        let value_string: String = target.unchecked_into::<HtmlInputElement>().value();
        if value_string.trim().is_empty() {
            callback.emit(None);
            return;
        }
        match NaiveDate::parse_from_str(&value_string, DATE_FORMAT) {
            Ok(date) => callback.emit(Some(date)),
            Err(error) => {
                log::error!("Fail to parse date: {value_string}, error: {error}, doing nothing")
            }
        }
    });

    html! {
        <input
            id={props.id.clone()}
            name={props.name.clone()}
            type="date"
            value={props.value.map(|date| date.format(DATE_FORMAT).to_string()).unwrap_or_default()}
            min={props.min.map(|date| date.format(DATE_FORMAT).to_string())}
            class={props.class.clone()}
            required={true}
            onchange={on_change} />
    }
}
