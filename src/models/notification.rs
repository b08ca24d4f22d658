//! Notification model and relative-time rendering.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A notification shown in the user's inbox.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NotificationMessage {
    pub id: String,
    pub title: String,
    pub description: String,
    pub timestamp: DateTime<Utc>,
    pub read: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

/// Notification as listed to the UI, with its age already rendered.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationView {
    #[serde(flatten)]
    pub notification: NotificationMessage,
    pub time_ago: String,
}

impl NotificationView {
    pub fn new(notification: NotificationMessage, now: DateTime<Utc>) -> Self {
        let time_ago = time_ago(notification.timestamp, now);
        Self {
            notification,
            time_ago,
        }
    }
}

/// Request body for raising a notification.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateNotificationRequest {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub link: Option<String>,
}

/// Unread notification counter.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnreadCount {
    pub unread: usize,
}

/// Outcome of marking every notification as read.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkedAllRead {
    /// Notifications that flipped from unread to read.
    pub marked: usize,
    pub unread: usize,
}

const MINUTE: i64 = 60;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;
const MONTH: i64 = 30 * DAY;
const YEAR: i64 = 365 * DAY;

/// Render the distance between `timestamp` and `now` as e.g. "3 days ago".
///
/// A unit is used once the elapsed time is strictly more than one of it.
pub fn time_ago(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (now - timestamp).num_seconds().max(0);

    for (unit_secs, unit) in [
        (YEAR, "year"),
        (MONTH, "month"),
        (DAY, "day"),
        (HOUR, "hour"),
        (MINUTE, "minute"),
    ] {
        if seconds > unit_secs {
            return plural(seconds / unit_secs, unit);
        }
    }

    plural(seconds, "second")
}

fn plural(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("1 {} ago", unit)
    } else {
        format!("{} {}s ago", n, unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_time_ago_units() {
        let now = now();
        assert_eq!(time_ago(now - Duration::seconds(5), now), "5 seconds ago");
        assert_eq!(time_ago(now - Duration::minutes(5), now), "5 minutes ago");
        assert_eq!(time_ago(now - Duration::hours(3), now), "3 hours ago");
        assert_eq!(time_ago(now - Duration::days(2), now), "2 days ago");
        assert_eq!(time_ago(now - Duration::days(65), now), "2 months ago");
        assert_eq!(time_ago(now - Duration::days(800), now), "2 years ago");
    }

    #[test]
    fn test_time_ago_exact_boundary_stays_in_smaller_unit() {
        let now = now();
        assert_eq!(time_ago(now - Duration::minutes(1), now), "60 seconds ago");
        assert_eq!(time_ago(now - Duration::hours(1), now), "60 minutes ago");
    }

    #[test]
    fn test_time_ago_singular_and_future() {
        let now = now();
        assert_eq!(time_ago(now - Duration::seconds(1), now), "1 second ago");
        assert_eq!(time_ago(now - Duration::minutes(90), now), "1 hour ago");
        assert_eq!(time_ago(now + Duration::minutes(10), now), "0 seconds ago");
    }

    #[test]
    fn test_view_flattens_fields() {
        let now = now();
        let view = NotificationView::new(
            NotificationMessage {
                id: "n1".to_string(),
                title: "Hello".to_string(),
                description: "World".to_string(),
                timestamp: now - Duration::days(3),
                read: false,
                link: None,
            },
            now,
        );
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["id"], "n1");
        assert_eq!(json["timeAgo"], "3 days ago");
        assert!(json.get("link").is_none());
    }
}
