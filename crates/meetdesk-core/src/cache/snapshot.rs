use chrono::{DateTime, Utc};

/// Data plus the moment it was read from the server.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot<T> {
    pub data: T,
    pub fetched_at: DateTime<Utc>,
}

impl<T> Snapshot<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            fetched_at: Utc::now(),
        }
    }

    pub fn at(data: T, fetched_at: DateTime<Utc>) -> Self {
        Self { data, fetched_at }
    }

    pub fn age_seconds(&self) -> i64 {
        (Utc::now() - self.fetched_at).num_seconds()
    }

    pub fn age_display(&self) -> String {
        age_display_seconds(self.age_seconds())
    }
}

/// Human-readable age for the status bar.
pub fn age_display_seconds(seconds: i64) -> String {
    if seconds < 5 {
        // Includes negative ages from clock skew
        "just now".to_string()
    } else if seconds < 60 {
        format!("{}s ago", seconds)
    } else if seconds < 3600 {
        format!("{}m ago", seconds / 60)
    } else {
        let hours = seconds / 3600;
        let remaining_mins = (seconds % 3600) / 60;
        if remaining_mins >= 30 {
            // Round up: 1h 30m+ becomes 2h
            format!("{}h ago", hours + 1)
        } else {
            format!("{}h ago", hours)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_age_display() {
        assert_eq!(age_display_seconds(-3), "just now");
        assert_eq!(age_display_seconds(2), "just now");
        assert_eq!(age_display_seconds(42), "42s ago");
        assert_eq!(age_display_seconds(150), "2m ago");
        assert_eq!(age_display_seconds(3600 + 29 * 60), "1h ago");
        assert_eq!(age_display_seconds(3600 + 31 * 60), "2h ago");
    }

    #[test]
    fn test_snapshot_age() {
        let snap = Snapshot::at(1, Utc::now() - Duration::minutes(3));
        assert_eq!(snap.age_display(), "3m ago");
    }
}
