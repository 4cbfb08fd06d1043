use chrono::{DateTime, Duration, Utc};

use crate::models::TimeWindow;

/// Map a lower-cased query to the window its due dates should fall in.
pub fn extract_timeframe(query: &str, now: DateTime<Utc>) -> TimeWindow {
    if query.contains("today") {
        TimeWindow {
            label: "today",
            start: now,
            end: now + Duration::days(1),
        }
    } else if query.contains("tomorrow") {
        TimeWindow {
            label: "tomorrow",
            start: now + Duration::days(1),
            end: now + Duration::days(2),
        }
    } else if query.contains("this week") || query.contains("week") {
        TimeWindow {
            label: "this week",
            start: now,
            end: now + Duration::days(7),
        }
    } else {
        TimeWindow {
            label: "upcoming",
            start: now,
            end: now + Duration::days(14),
        }
    }
}
