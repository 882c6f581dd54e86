pub mod error_alert;
pub mod input_date;
pub mod input_text;
pub mod loading_spinner;
pub mod select;
