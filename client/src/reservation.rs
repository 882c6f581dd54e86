use std::ops::RangeInclusive;
use std::rc::Rc;

use chrono::NaiveDate;
use shared::{NewReservation, Reservation};
use tracing::info;

use crate::error::{ApiError, FieldError, Result};
use crate::gateway::Gateway;

pub const DEFAULT_DAYS: u32 = 5;
pub const ALLOWED_DAYS: RangeInclusive<u32> = 1..=30;

#[derive(Debug, Clone, PartialEq)]
pub struct ReservationDraft {
    pub book_id: i64,
    pub start_date: NaiveDate,
    pub days: u32,
}

impl ReservationDraft {
    pub fn new(book_id: i64, start_date: NaiveDate) -> Self {
        Self {
            book_id,
            start_date,
            days: DEFAULT_DAYS,
        }
    }

    pub fn with_days(mut self, days: u32) -> Self {
        self.days = days;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if ALLOWED_DAYS.contains(&self.days) {
            Ok(())
        } else {
            Err(ApiError::validation(vec![FieldError::new(
                &["body", "days"],
                format!(
                    "Reservation length must be between {} and {} days",
                    ALLOWED_DAYS.start(),
                    ALLOWED_DAYS.end()
                ),
                "value_error.range",
            )]))
        }
    }
}

impl From<&ReservationDraft> for NewReservation {
    fn from(value: &ReservationDraft) -> Self {
        NewReservation {
            book_id: value.book_id,
            start_date: value.start_date,
            days: Some(value.days),
        }
    }
}

/// Submits one reservation. Availability is never adjusted locally: the
/// caller refreshes whatever it displays from `on_reserved`.
#[derive(Clone)]
pub struct ReservationWorkflow {
    gateway: Rc<Gateway>,
}

impl ReservationWorkflow {
    pub fn new(gateway: Rc<Gateway>) -> Self {
        Self { gateway }
    }

    pub async fn submit(
        &self,
        draft: &ReservationDraft,
        on_reserved: impl FnOnce(&Reservation),
    ) -> Result<Reservation> {
        draft.validate()?;
        let reservation = self
            .gateway
            .create_reservation(&NewReservation::from(draft))
            .await?;
        info!(
            reservation_id = reservation.id,
            end_date = %reservation.end_date,
            "Reservation workflow completed"
        );
        on_reserved(&reservation);
        Ok(reservation)
    }
}
