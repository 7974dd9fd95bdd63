use crate::config::{ColorPair, RUN_COLORS, TRAIN_COLORS, VALIDATION_COLORS};
use crate::line_chart::LineChartPoint;
use derive_more::{Display, Error};
use itertools::iproduct;

/// One recorded value of a loss or metric series.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MetricPoint {
	pub step: u64,
	pub value: f64,
	pub split: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Split {
	Train,
	Validation,
}

impl Split {
	pub const ALL: [Split; 2] = [Split::Train, Split::Validation];

	pub fn from_tag(tag: &str) -> Option<Split> {
		match tag {
			"train" => Some(Split::Train),
			"validation" => Some(Split::Validation),
			_ => None,
		}
	}

	pub fn as_str(self) -> &'static str {
		match self {
			Split::Train => "train",
			Split::Validation => "validation",
		}
	}

	pub fn title(self) -> &'static str {
		match self {
			Split::Train => "Train",
			Split::Validation => "Validation",
		}
	}

	pub fn colors(self) -> ColorPair {
		match self {
			Split::Train => TRAIN_COLORS,
			Split::Validation => VALIDATION_COLORS,
		}
	}
}

impl std::fmt::Display for Split {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

#[derive(Debug, Display, Error)]
#[display(fmt = "unknown split \"{}\"", _0)]
pub struct ParseSplitError(#[error(not(source))] pub String);

impl std::str::FromStr for Split {
	type Err = ParseSplitError;
	fn from_str(value: &str) -> Result<Split, ParseSplitError> {
		Split::from_tag(value).ok_or_else(|| ParseSplitError(value.to_owned()))
	}
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SplitData {
	pub train: Vec<LineChartPoint>,
	pub validation: Vec<LineChartPoint>,
}

impl SplitData {
	pub fn get(&self, split: Split) -> &[LineChartPoint] {
		match split {
			Split::Train => &self.train,
			Split::Validation => &self.validation,
		}
	}
}

/// Partition points into the train and validation buckets, each ordered by step. Points with any other split are dropped.
pub fn split_data(points: &[MetricPoint]) -> SplitData {
	let mut split_data = SplitData::default();
	for point in sorted_by_step(points.iter()) {
		let bucket = match Split::from_tag(&point.split) {
			Some(Split::Train) => &mut split_data.train,
			Some(Split::Validation) => &mut split_data.validation,
			None => continue,
		};
		bucket.push(chart_point(point));
	}
	split_data
}

/// The step ordered points of a single split. The split does not have to be one of the recognized ones.
pub fn filter_split(points: &[MetricPoint], split: &str) -> Vec<LineChartPoint> {
	sorted_by_step(points.iter().filter(|point| point.split == split))
		.map(chart_point)
		.collect()
}

/// The points of one run, labeled for display in a comparison chart.
#[derive(Clone, Debug, PartialEq)]
pub struct RunSeries {
	pub run_id: String,
	pub label: String,
	pub points: Vec<MetricPoint>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ComparisonSeries {
	pub title: String,
	pub split: Split,
	pub data: Vec<LineChartPoint>,
	pub colors: ColorPair,
}

/// Produce one series per run and split that has at least one point, in run then split order. Colors are assigned from [`RUN_COLORS`] in emission order, so empty combinations do not use up a color.
pub fn comparison_series(runs: &[RunSeries], split: Option<Split>) -> Vec<ComparisonSeries> {
	let splits: &[Split] = match &split {
		Some(split) => std::slice::from_ref(split),
		None => &Split::ALL,
	};
	iproduct!(runs.iter(), splits.iter())
		.filter_map(|(run, split)| {
			let data = filter_split(&run.points, split.as_str());
			if data.is_empty() {
				return None;
			}
			Some((run, *split, data))
		})
		.zip(RUN_COLORS.iter().cycle())
		.map(|((run, split, data), colors)| ComparisonSeries {
			title: format!("{} ({})", run.label, split),
			split,
			data,
			colors: *colors,
		})
		.collect()
}

fn sorted_by_step<'a>(points: impl Iterator<Item = &'a MetricPoint>) -> impl Iterator<Item = &'a MetricPoint> {
	let mut points: Vec<&MetricPoint> = points.collect();
	// A stable sort keeps the fetch order of points that share a step.
	points.sort_by_key(|point| point.step);
	points.into_iter()
}

fn chart_point(point: &MetricPoint) -> LineChartPoint {
	LineChartPoint {
		x: point.step as f64,
		y: point.value,
	}
}
