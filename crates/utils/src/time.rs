use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{Local, TimeZone};

/// Display format for filesystem stat times in upload tables.
pub const STAT_TIME_FORMAT: &str = "%Y-%m-%d-%H:%M:%S";

/// Formats an epoch timestamp (in seconds, local time zone) for display.
///
/// Out-of-range or ambiguous instants fall back to the raw epoch value, so
/// callers always get something printable.
#[must_use]
pub fn human_readable_time(epoch_secs: i64) -> String {
	Local
		.timestamp_opt(epoch_secs, 0)
		.single()
		.map_or_else(|| epoch_secs.to_string(), |dt| dt.format(STAT_TIME_FORMAT).to_string())
}

/// Seconds since the Unix epoch for a [`SystemTime`], clamping pre-epoch
/// instants to zero.
#[must_use]
pub fn epoch_secs(time: SystemTime) -> i64 {
	time.duration_since(UNIX_EPOCH)
		.map_or(0, |d| i64::try_from(d.as_secs()).unwrap_or(i64::MAX))
}

#[cfg(test)]
mod tests {
	use std::time::Duration;

	use chrono::NaiveDateTime;

	use super::*;

	#[test]
	fn formatted_time_round_trips() {
		let formatted = human_readable_time(1_704_207_000);
		assert!(NaiveDateTime::parse_from_str(&formatted, STAT_TIME_FORMAT).is_ok());
	}

	#[test]
	fn epoch_secs_counts_from_unix_epoch() {
		assert_eq!(epoch_secs(UNIX_EPOCH + Duration::from_secs(100)), 100);
		assert_eq!(epoch_secs(UNIX_EPOCH), 0);
	}
}
