use traintrack_charts::{ChartDisplay, Split};

fn with_query(path: String, pairs: &[(&str, &str)]) -> String {
	if pairs.is_empty() {
		return path;
	}
	let query = url::form_urlencoded::Serializer::new(String::new())
		.extend_pairs(pairs.iter())
		.finish();
	format!("{}?{}", path, query)
}

fn display_pairs(display: ChartDisplay) -> Vec<(&'static str, &'static str)> {
	let mut pairs = Vec::new();
	if display.show_min {
		pairs.push(("show_min", "true"));
	}
	if display.show_max {
		pairs.push(("show_max", "true"));
	}
	pairs
}

pub fn model_href(model_id: &str) -> String {
	format!("/models/{}", model_id)
}

pub fn run_href(run_id: &str, model_id: &str, display: ChartDisplay) -> String {
	let mut pairs = vec![("model_id", model_id)];
	pairs.extend(display_pairs(display));
	with_query(format!("/runs/{}", run_id), &pairs)
}

pub fn hyperparameters_href(run_id: &str, model_id: &str) -> String {
	with_query(
		format!("/runs/{}/hyperparameters", run_id),
		&[("model_id", model_id)],
	)
}

pub fn compare_href(
	model_id: &str,
	run_ids: &[String],
	split: Option<Split>,
	metric: Option<&str>,
	display: ChartDisplay,
) -> String {
	let runs = run_ids.join(",");
	let mut pairs = vec![("model_id", model_id), ("runs", runs.as_str())];
	if let Some(split) = split {
		pairs.push(("split", split.as_str()));
	}
	if let Some(metric) = metric {
		pairs.push(("metric", metric));
	}
	pairs.extend(display_pairs(display));
	with_query("/compare".to_owned(), &pairs)
}

#[test]
fn test_links() {
	let display = ChartDisplay {
		show_min: true,
		show_max: false,
	};
	assert_eq!(run_href("r1", "m 1", display), "/runs/r1?model_id=m+1&show_min=true");
	assert_eq!(
		hyperparameters_href("r1", "m1"),
		"/runs/r1/hyperparameters?model_id=m1"
	);
	assert_eq!(
		compare_href(
			"m1",
			&["a".to_owned(), "b".to_owned()],
			Some(Split::Train),
			Some("acc"),
			ChartDisplay::default(),
		),
		"/compare?model_id=m1&runs=a%2Cb&split=train&metric=acc"
	);
}
