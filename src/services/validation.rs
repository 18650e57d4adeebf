use chrono::{Duration, NaiveDate};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateRejection {
    InPast,
    TooFarAhead { max_days: i64 },
    CheckoutNotAfterCheckin,
}

impl std::fmt::Display for DateRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DateRejection::InPast => write!(f, "You cannot book for past dates."),
            DateRejection::TooFarAhead { max_days } if max_days % 30 == 0 => {
                write!(
                    f,
                    "Booking is allowed only within the next {} months.",
                    max_days / 30
                )
            }
            DateRejection::TooFarAhead { max_days } => {
                write!(f, "Booking is allowed only within the next {max_days} days.")
            }
            DateRejection::CheckoutNotAfterCheckin => {
                write!(f, "Check out date must be after check in date.")
            }
        }
    }
}

/// Accepts dates from `today` up to and including `today + max_days`.
pub fn validate_booking_date(
    date: NaiveDate,
    today: NaiveDate,
    max_days: i64,
) -> Result<(), DateRejection> {
    if date < today {
        return Err(DateRejection::InPast);
    }
    let horizon = Duration::try_days(max_days).and_then(|days| today.checked_add_signed(days));
    match horizon {
        Some(last) if date > last => Err(DateRejection::TooFarAhead { max_days }),
        _ => Ok(()),
    }
}

pub fn validate_stay(checkin: NaiveDate, checkout: NaiveDate) -> Result<(), DateRejection> {
    if checkout <= checkin {
        return Err(DateRejection::CheckoutNotAfterCheckin);
    }
    Ok(())
}
