mod config;
mod session;

use crate::clock::{ManualClock, SharedClock, Timestamp};
use chrono::TimeZone;
use std::sync::Arc;

pub(crate) fn start_time() -> Timestamp {
    chrono::Utc
        .with_ymd_and_hms(2024, 5, 1, 12, 0, 0)
        .single()
        .expect("valid date")
}

pub(crate) fn manual_clock() -> (Arc<ManualClock>, SharedClock) {
    let clock = Arc::new(ManualClock::new(start_time()));
    let shared: SharedClock = clock.clone();
    (clock, shared)
}
