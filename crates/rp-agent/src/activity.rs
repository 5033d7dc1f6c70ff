//! Activity sources
//!
//! The scheduler asks an [`ActivitySource`] for a fresh activity on every
//! tick. [`ClockActivity`] shows the local wall-clock time and date.

use chrono::{DateTime, Local, TimeZone};

use rp_core::config::AssetsConfig;
use rp_protocol::Activity;

/// Produces the activity to publish on each update
pub trait ActivitySource: Send {
    /// Build the activity for the current tick
    fn activity(&mut self) -> Activity;
}

/// Displays the current local time and date
#[derive(Debug, Clone, Default)]
pub struct ClockActivity {
    assets: AssetsConfig,
}

impl ClockActivity {
    pub fn new(assets: AssetsConfig) -> Self {
        Self { assets }
    }
}

impl ActivitySource for ClockActivity {
    fn activity(&mut self) -> Activity {
        clock_activity_at(&Local::now(), &self.assets)
    }
}

/// Build the clock activity for a fixed instant
pub fn clock_activity_at<Tz>(now: &DateTime<Tz>, assets: &AssetsConfig) -> Activity
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    Activity::new()
        .with_details(format!("It's {}", now.format("%-I:%M %p %Z")))
        .with_state(format!("🗓️ {}", now.format("%a, %b %-d")))
        .with_start(now.timestamp())
        .with_assets(assets.to_assets())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn afternoon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2006, 1, 2, 15, 4, 5).unwrap()
    }

    #[test]
    fn test_clock_details_and_state() {
        let activity = clock_activity_at(&afternoon(), &AssetsConfig::default());

        assert_eq!(activity.details.as_deref(), Some("It's 3:04 PM UTC"));
        assert_eq!(activity.state.as_deref(), Some("🗓️ Mon, Jan 2"));
    }

    #[test]
    fn test_clock_start_timestamp() {
        let now = afternoon();
        let activity = clock_activity_at(&now, &AssetsConfig::default());

        let timestamps = activity.timestamps.unwrap();
        assert_eq!(timestamps.start, Some(now.timestamp()));
    }

    #[test]
    fn test_clock_morning_has_no_leading_zero() {
        let morning = Utc.with_ymd_and_hms(2024, 3, 9, 9, 30, 0).unwrap();
        let activity = clock_activity_at(&morning, &AssetsConfig::default());

        assert_eq!(activity.details.as_deref(), Some("It's 9:30 AM UTC"));
        assert_eq!(activity.state.as_deref(), Some("🗓️ Sat, Mar 9"));
    }

    #[test]
    fn test_clock_uses_configured_assets() {
        let assets = AssetsConfig {
            large_image: "sun".to_string(),
            large_text: String::new(),
            ..AssetsConfig::default()
        };
        let activity = clock_activity_at(&afternoon(), &assets);

        let sent = activity.assets.unwrap();
        assert_eq!(sent.large_image.as_deref(), Some("sun"));
        assert_eq!(sent.large_text, None);
        assert_eq!(sent.small_image.as_deref(), Some("time_small"));
    }

    #[test]
    fn test_local_clock_source() {
        let mut source = ClockActivity::default();
        let activity = source.activity();

        assert!(activity.details.unwrap().starts_with("It's "));
        assert!(activity.timestamps.unwrap().start.unwrap() > 0);
    }
}
