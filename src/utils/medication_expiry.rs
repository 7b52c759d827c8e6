use chrono::{Days, NaiveDate};

use crate::models::medication::{ExpiryStatus, ExpirySummary, Medication};

pub const EXPIRY_WARNING_DAYS: u64 = 30;

/// A medication expires on its expiry date; the warning window covers the
/// following thirty days.
pub fn expiry_status(expiry_date: Option<NaiveDate>, today: NaiveDate) -> ExpiryStatus {
    let Some(expiry) = expiry_date else {
        return ExpiryStatus::NoExpiry;
    };
    if expiry <= today {
        return ExpiryStatus::Expired;
    }
    let warning_limit = today
        .checked_add_days(Days::new(EXPIRY_WARNING_DAYS))
        .unwrap_or(NaiveDate::MAX);
    if expiry <= warning_limit {
        ExpiryStatus::ExpiringSoon
    } else {
        ExpiryStatus::Active
    }
}

/// Split medications into the tracker's tabs. `active` also lists the ones
/// expiring soon, since they are still usable.
pub fn summarize_expiry(medications: Vec<Medication>, today: NaiveDate) -> ExpirySummary {
    let mut summary = ExpirySummary {
        today,
        active: Vec::new(),
        expiring_soon: Vec::new(),
        expired: Vec::new(),
    };

    for medication in medications {
        match expiry_status(medication.expiry_date, today) {
            ExpiryStatus::Expired => summary.expired.push(medication),
            ExpiryStatus::ExpiringSoon => {
                summary.expiring_soon.push(medication.clone());
                summary.active.push(medication);
            }
            ExpiryStatus::Active | ExpiryStatus::NoExpiry => summary.active.push(medication),
        }
    }

    summary
}
