use chrono::{DateTime, Utc};
use traintrack_client::RunStatus;

/// Format a timestamp like `16 Oct 2026, 14:05`, or `—` when there is none.
pub fn format_date(value: Option<DateTime<Utc>>) -> String {
	match value {
		Some(value) => value.format("%d %b %Y, %H:%M").to_string(),
		None => "—".to_owned(),
	}
}

/// The first eight characters of an identifier.
pub fn short_id(id: &str) -> &str {
	match id.char_indices().nth(8) {
		Some((index, _)) => &id[..index],
		None => id,
	}
}

/// The css class for a run status. Unrecognized statuses are shown as running.
pub fn status_class(status: RunStatus) -> &'static str {
	match status {
		RunStatus::Completed => "completed",
		RunStatus::Failed => "failed",
		RunStatus::Running | RunStatus::Unknown => "running",
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use chrono::TimeZone;

	#[test]
	fn test_format_date() {
		let value = Utc.with_ymd_and_hms(2026, 10, 16, 14, 5, 0).unwrap();
		assert_eq!(format_date(Some(value)), "16 Oct 2026, 14:05");
		assert_eq!(format_date(None), "—");
	}

	#[test]
	fn test_short_id() {
		assert_eq!(short_id("3f2c9e1a-7b4d-4c1e-9a2f-0d6e5b8c7a91"), "3f2c9e1a");
		assert_eq!(short_id("abc"), "abc");
	}

	#[test]
	fn test_status_class() {
		assert_eq!(status_class(RunStatus::Failed), "failed");
		assert_eq!(status_class(RunStatus::Unknown), "running");
	}
}
