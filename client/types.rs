use crate::hyperparameters::Hyperparameters;
use chrono::{DateTime, Utc};
use traintrack_charts::{MetricPoint, Split};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ModelRecord {
	pub id: String,
	pub name: String,
	pub project_name: String,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RunRecord {
	pub id: String,
	pub model_id: String,
	pub status: RunStatus,
	#[serde(default, deserialize_with = "timestamp::deserialize")]
	pub started_at: Option<DateTime<Utc>>,
	#[serde(default, deserialize_with = "timestamp::deserialize")]
	pub finished_at: Option<DateTime<Utc>>,
	#[serde(default)]
	pub hyperparameters: Option<Hyperparameters>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
	Running,
	Completed,
	Failed,
	#[serde(other)]
	Unknown,
}

impl RunStatus {
	pub fn as_str(self) -> &'static str {
		match self {
			RunStatus::Running => "running",
			RunStatus::Completed => "completed",
			RunStatus::Failed => "failed",
			RunStatus::Unknown => "unknown",
		}
	}
}

impl std::fmt::Display for RunStatus {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LossRecord {
	pub run_id: String,
	pub step: u64,
	pub split: String,
	pub value: f64,
	#[serde(default, deserialize_with = "timestamp::deserialize")]
	pub timestamp: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MetricRecord {
	pub run_id: String,
	pub step: u64,
	pub split: String,
	pub metric_name: String,
	pub value: f64,
	#[serde(default, deserialize_with = "timestamp::deserialize")]
	pub timestamp: Option<DateTime<Utc>>,
}

impl From<LossRecord> for MetricPoint {
	fn from(record: LossRecord) -> MetricPoint {
		MetricPoint {
			step: record.step,
			value: record.value,
			split: record.split,
		}
	}
}

impl From<MetricRecord> for MetricPoint {
	fn from(record: MetricRecord) -> MetricPoint {
		MetricPoint {
			step: record.step,
			value: record.value,
			split: record.split,
		}
	}
}

/// A loss value reported by a training script.
#[derive(Clone, Debug, PartialEq)]
pub struct LossEntry {
	pub step: u64,
	pub split: Split,
	pub value: f64,
}

/// A metric value reported by a training script.
#[derive(Clone, Debug, PartialEq)]
pub struct MetricEntry {
	pub step: u64,
	pub split: Split,
	pub metric_name: String,
	pub value: f64,
}

/// The backend sends timestamps without an offset. Those are read as utc.
pub(crate) mod timestamp {
	use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
	use serde::{de::Error, Deserialize, Deserializer};

	pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
	where
		D: Deserializer<'de>,
	{
		let value: Option<String> = Option::deserialize(deserializer)?;
		value
			.map(|value| parse(&value).map_err(D::Error::custom))
			.transpose()
	}

	pub fn parse(value: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
		DateTime::parse_from_rfc3339(value)
			.map(|value| value.with_timezone(&Utc))
			.or_else(|_| {
				NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
					.map(|value| Utc.from_utc_datetime(&value))
			})
	}
}
