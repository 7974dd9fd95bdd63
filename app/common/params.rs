use super::error::Error;
use std::collections::BTreeMap;
use traintrack_charts::{ChartDisplay, Split};

pub type SearchParams = Option<BTreeMap<String, String>>;

pub fn get<'a>(search_params: &'a SearchParams, name: &str) -> Option<&'a str> {
	search_params
		.as_ref()
		.and_then(|search_params| search_params.get(name))
		.map(|value| value.trim())
		.filter(|value| !value.is_empty())
}

pub fn required<'a>(search_params: &'a SearchParams, name: &str) -> Result<&'a str, Error> {
	get(search_params, name).ok_or(Error::BadRequest)
}

/// Checkboxes submit `on` unless they carry a value.
pub fn flag(search_params: &SearchParams, name: &str) -> bool {
	matches!(get(search_params, name), Some("true") | Some("on") | Some("1"))
}

pub fn chart_display(search_params: &SearchParams) -> ChartDisplay {
	ChartDisplay {
		show_min: flag(search_params, "show_min"),
		show_max: flag(search_params, "show_max"),
	}
}

/// An absent split, or `both`, compares every split.
pub fn split(search_params: &SearchParams) -> Result<Option<Split>, Error> {
	match get(search_params, "split") {
		None | Some("both") => Ok(None),
		Some(split) => split.parse().map(Some).map_err(|_| Error::BadRequest),
	}
}

/// The run ids of a comparison. They are accepted both as `runs=a,b` and as repeated `runs` fields, and the first occurrence of an id decides its position.
pub fn run_ids(query: Option<&str>) -> Vec<String> {
	let mut run_ids: Vec<String> = Vec::new();
	let values = url::form_urlencoded::parse(query.unwrap_or_default().as_bytes())
		.filter(|(name, _)| name == "runs")
		.map(|(_, value)| value.into_owned());
	for value in values {
		for run_id in value.split(',').map(str::trim) {
			if !run_id.is_empty() && !run_ids.iter().any(|existing| existing == run_id) {
				run_ids.push(run_id.to_owned());
			}
		}
	}
	run_ids
}

#[cfg(test)]
mod test {
	use super::*;

	fn search_params(pairs: &[(&str, &str)]) -> SearchParams {
		Some(
			pairs
				.iter()
				.map(|(name, value)| (name.to_string(), value.to_string()))
				.collect(),
		)
	}

	#[test]
	fn test_flags() {
		let params = search_params(&[("show_min", "true"), ("show_max", "false")]);
		assert_eq!(
			chart_display(&params),
			ChartDisplay {
				show_min: true,
				show_max: false,
			}
		);
		assert!(flag(&search_params(&[("show_max", "on")]), "show_max"));
		assert!(!flag(&None, "show_max"));
	}

	#[test]
	fn test_split() {
		assert_eq!(split(&None).unwrap(), None);
		assert_eq!(split(&search_params(&[("split", "both")])).unwrap(), None);
		assert_eq!(
			split(&search_params(&[("split", "validation")])).unwrap(),
			Some(Split::Validation)
		);
		assert!(split(&search_params(&[("split", "test")])).is_err());
	}

	#[test]
	fn test_required_rejects_blank() {
		assert!(required(&search_params(&[("model_id", " ")]), "model_id").is_err());
		assert_eq!(
			required(&search_params(&[("model_id", "m1")]), "model_id").unwrap(),
			"m1"
		);
	}

	#[test]
	fn test_run_ids() {
		assert_eq!(
			run_ids(Some("model_id=m&runs=a,b&runs=c&runs=a&runs=")),
			vec!["a", "b", "c"]
		);
		assert_eq!(run_ids(Some("runs=a%2Cb")), vec!["a", "b"]);
		assert!(run_ids(None).is_empty());
	}
}
