use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

pub type Hyperparameters = BTreeMap<String, HyperparameterValue>;

/// A hyperparameter is either a number or free text. The backend stores an arbitrary json object, so values of any other json type are kept as their json text.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum HyperparameterValue {
	Number(f64),
	String(String),
}

impl HyperparameterValue {
	/// Interpret user input. Numeric text becomes a number. Everything else, including the empty string and non-finite values, stays text.
	pub fn coerce(raw: &str) -> HyperparameterValue {
		let raw = raw.trim();
		if raw.is_empty() {
			return HyperparameterValue::String(String::new());
		}
		match raw.parse::<f64>() {
			Ok(value) if value.is_finite() => HyperparameterValue::Number(value),
			_ => HyperparameterValue::String(raw.to_owned()),
		}
	}
}

impl std::fmt::Display for HyperparameterValue {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			HyperparameterValue::Number(value) => write!(f, "{}", value),
			HyperparameterValue::String(value) => f.write_str(value),
		}
	}
}

impl<'de> Deserialize<'de> for HyperparameterValue {
	fn deserialize<D>(deserializer: D) -> Result<HyperparameterValue, D::Error>
	where
		D: Deserializer<'de>,
	{
		let value = serde_json::Value::deserialize(deserializer)?;
		let value = match value {
			serde_json::Value::Number(number) => match number.as_f64() {
				Some(number) => HyperparameterValue::Number(number),
				None => HyperparameterValue::String(number.to_string()),
			},
			serde_json::Value::String(value) => HyperparameterValue::String(value),
			value => HyperparameterValue::String(value.to_string()),
		};
		Ok(value)
	}
}

impl From<f64> for HyperparameterValue {
	fn from(value: f64) -> HyperparameterValue {
		HyperparameterValue::Number(value)
	}
}

impl From<&str> for HyperparameterValue {
	fn from(value: &str) -> HyperparameterValue {
		HyperparameterValue::String(value.to_owned())
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn test_coerce() {
		assert_eq!(
			HyperparameterValue::coerce("0.01"),
			HyperparameterValue::Number(0.01)
		);
		assert_eq!(
			HyperparameterValue::coerce(" 32 "),
			HyperparameterValue::Number(32.0)
		);
		assert_eq!(
			HyperparameterValue::coerce("resnet50"),
			HyperparameterValue::String("resnet50".to_owned())
		);
		assert_eq!(
			HyperparameterValue::coerce(""),
			HyperparameterValue::String(String::new())
		);
		assert_eq!(
			HyperparameterValue::coerce("NaN"),
			HyperparameterValue::String("NaN".to_owned())
		);
	}

	#[test]
	fn test_deserialize_mixed_values() {
		let hyperparameters: Hyperparameters = serde_json::from_str(
			r#"{"lr": 0.001, "epochs": 50, "optimizer": "adam", "nesterov": true, "betas": [0.9, 0.999]}"#,
		)
		.unwrap();
		assert_eq!(hyperparameters["lr"], HyperparameterValue::Number(0.001));
		assert_eq!(hyperparameters["epochs"].to_string(), "50");
		assert_eq!(hyperparameters["optimizer"].to_string(), "adam");
		assert_eq!(hyperparameters["nesterov"].to_string(), "true");
		assert_eq!(hyperparameters["betas"].to_string(), "[0.9,0.999]");
	}

	#[test]
	fn test_serialize_untagged() {
		let mut hyperparameters = Hyperparameters::new();
		hyperparameters.insert("lr".to_owned(), 0.5.into());
		hyperparameters.insert("name".to_owned(), "resnet50".into());
		assert_eq!(
			serde_json::to_string(&hyperparameters).unwrap(),
			r#"{"lr":0.5,"name":"resnet50"}"#
		);
	}
}
