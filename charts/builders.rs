use crate::chart::LineChart;
use crate::config::{ChartColors, ColorPair, CHART_CONFIG, TRAIN_COLORS};
use crate::data::{comparison_series, filter_split, split_data, MetricPoint, RunSeries, Split};
use crate::extrema::min_max_series;
use crate::line_chart::{
	AxisOptions, ChartTitle, LegendOptions, LineChartOptions, LineChartPoint, LineChartSeries,
	LineStyle, PointStyle, TooltipOptions,
};

/// Which extrema markers to draw on top of each series.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ChartDisplay {
	pub show_min: bool,
	pub show_max: bool,
}

/// One filled series per split present in `points`.
pub fn create_overlay_chart(
	points: &[MetricPoint],
	title: &str,
	existing: Option<LineChart>,
	display: ChartDisplay,
	colors: &ChartColors,
) -> LineChart {
	let split_data = split_data(points);
	let series = Split::ALL
		.iter()
		.filter(|split| !split_data.get(**split).is_empty())
		.map(|split| {
			core_series(
				split.title().to_owned(),
				split_data.get(*split).to_vec(),
				split.colors(),
				true,
			)
		})
		.collect();
	finish(existing, title, series, display, colors)
}

/// A single filled series for `split`. A split without points yields a chart with no series.
pub fn create_single_split_chart(
	points: &[MetricPoint],
	split: &str,
	title: &str,
	existing: Option<LineChart>,
	display: ChartDisplay,
	colors: &ChartColors,
) -> LineChart {
	let data = filter_split(points, split);
	let series = if data.is_empty() {
		Vec::new()
	} else {
		let split_colors = Split::from_tag(split)
			.map(Split::colors)
			.unwrap_or(TRAIN_COLORS);
		vec![core_series(capitalize(split), data, split_colors, true)]
	};
	finish(existing, title, series, display, colors)
}

/// One unfilled series per run and split, colored round-robin.
pub fn create_comparison_chart(
	runs: &[RunSeries],
	split: Option<Split>,
	title: &str,
	existing: Option<LineChart>,
	display: ChartDisplay,
	colors: &ChartColors,
) -> LineChart {
	let series = comparison_series(runs, split)
		.into_iter()
		.map(|series| core_series(series.title, series.data, series.colors, false))
		.collect();
	finish(existing, title, series, display, colors)
}

fn finish(
	existing: Option<LineChart>,
	title: &str,
	mut series: Vec<LineChartSeries>,
	display: ChartDisplay,
	colors: &ChartColors,
) -> LineChart {
	let markers = min_max_series(&series, display.show_min, display.show_max);
	series.extend(markers);
	let options = chart_options(title, series, colors);
	match existing {
		Some(mut chart) => {
			chart.update(options);
			chart
		}
		None => LineChart::new(options),
	}
}

fn core_series(
	title: String,
	data: Vec<LineChartPoint>,
	colors: ColorPair,
	fill: bool,
) -> LineChartSeries {
	LineChartSeries {
		background_color: colors.background.to_owned(),
		color: colors.border.to_owned(),
		data,
		fill,
		line_style: LineStyle::Solid,
		line_width: CHART_CONFIG.line_width,
		point_hover_radius: CHART_CONFIG.point_hover_radius,
		point_radius: CHART_CONFIG.point_radius,
		point_style: PointStyle::Circle,
		tension: CHART_CONFIG.tension,
		title,
	}
}

fn chart_options(title: &str, series: Vec<LineChartSeries>, colors: &ChartColors) -> LineChartOptions {
	LineChartOptions {
		animation_duration_ms: CHART_CONFIG.animation_duration_ms,
		legend: LegendOptions {
			color: colors.text.to_owned(),
			font_family: CHART_CONFIG.font_family.to_owned(),
			use_point_style: true,
		},
		series,
		title: ChartTitle {
			color: colors.tooltip_title.to_owned(),
			font_family: CHART_CONFIG.font_family.to_owned(),
			font_size: CHART_CONFIG.title_font_size,
			font_weight: CHART_CONFIG.title_font_weight,
			text: title.to_owned(),
		},
		tooltip: TooltipOptions {
			background_color: colors.tooltip_background.to_owned(),
			body_color: colors.tooltip_body.to_owned(),
			border_color: colors.tooltip_border.to_owned(),
			title_color: colors.tooltip_title.to_owned(),
		},
		x_axis: axis_options(CHART_CONFIG.x_axis_title, Some(0), colors),
		y_axis: axis_options(CHART_CONFIG.y_axis_title, None, colors),
	}
}

fn axis_options(title: &str, tick_precision: Option<u32>, colors: &ChartColors) -> AxisOptions {
	AxisOptions {
		grid_color: colors.grid.to_owned(),
		tick_color: colors.text_light.to_owned(),
		tick_font_size: CHART_CONFIG.tick_font_size,
		tick_precision,
		title: title.to_owned(),
		title_color: colors.text_light.to_owned(),
		title_font_size: CHART_CONFIG.axis_title_font_size,
	}
}

fn capitalize(value: &str) -> String {
	let mut chars = value.chars();
	match chars.next() {
		Some(first) => first.to_uppercase().chain(chars).collect(),
		None => String::new(),
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::chart::RedrawMode;
	use crate::config::{DARK_CHART_COLORS, LIGHT_CHART_COLORS, RUN_COLORS, VALIDATION_COLORS};

	fn point(step: u64, value: f64, split: &str) -> MetricPoint {
		MetricPoint {
			step,
			value,
			split: split.to_owned(),
		}
	}

	fn losses() -> Vec<MetricPoint> {
		vec![
			point(1, 0.8, "train"),
			point(0, 1.0, "train"),
			point(0, 1.1, "validation"),
			point(1, 0.9, "validation"),
		]
	}

	fn titles(chart: &LineChart) -> Vec<&str> {
		chart
			.options()
			.series
			.iter()
			.map(|series| series.title.as_str())
			.collect()
	}

	#[test]
	fn test_overlay_chart() {
		let display = ChartDisplay {
			show_min: true,
			show_max: false,
		};
		let chart = create_overlay_chart(&losses(), "Loss", None, display, &DARK_CHART_COLORS);
		insta::assert_debug_snapshot!(titles(&chart), @r###"
  [
      "Train",
      "Validation",
      "Min (Train): 0.8000 @ step 1",
      "Min (Validation): 0.9000 @ step 1",
  ]
  "###);
		let series = &chart.options().series;
		assert!(series[0].fill && series[1].fill);
		assert_eq!(series[1].color, VALIDATION_COLORS.border);
		assert_eq!(chart.options().title.text, "Loss");
		assert_eq!(chart.options().x_axis.title, "Step");
		assert_eq!(chart.options().y_axis.title, "Value");
		assert_eq!(chart.redraw(), RedrawMode::Animated);
	}

	#[test]
	fn test_overlay_chart_omits_missing_split() {
		let points = vec![point(0, 1.0, "validation")];
		let chart = create_overlay_chart(
			&points,
			"Loss",
			None,
			ChartDisplay::default(),
			&DARK_CHART_COLORS,
		);
		assert_eq!(titles(&chart), vec!["Validation"]);
	}

	#[test]
	fn test_update_matches_fresh_build() {
		let display = ChartDisplay {
			show_min: true,
			show_max: true,
		};
		let existing = create_overlay_chart(
			&[point(0, 5.0, "train")],
			"Old",
			None,
			ChartDisplay::default(),
			&LIGHT_CHART_COLORS,
		);
		let updated = create_overlay_chart(
			&losses(),
			"Loss",
			Some(existing),
			display,
			&DARK_CHART_COLORS,
		);
		let fresh = create_overlay_chart(&losses(), "Loss", None, display, &DARK_CHART_COLORS);
		assert_eq!(updated.options(), fresh.options());
		assert_eq!(updated.redraw(), RedrawMode::None);
		assert_eq!(updated.revision(), 1);
	}

	#[test]
	fn test_theme_applied_at_build_time() {
		let dark = create_overlay_chart(
			&losses(),
			"Loss",
			None,
			ChartDisplay::default(),
			&DARK_CHART_COLORS,
		);
		assert_eq!(dark.options().title.color, "#e8e8e8");
		let light = create_overlay_chart(
			&losses(),
			"Loss",
			Some(dark),
			ChartDisplay::default(),
			&LIGHT_CHART_COLORS,
		);
		assert_eq!(light.options().title.color, "#1a1a1a");
		assert_eq!(light.options().x_axis.grid_color, "rgba(0,0,0,0.06)");
	}

	#[test]
	fn test_single_split_chart() {
		let chart = create_single_split_chart(
			&losses(),
			"validation",
			"Validation Loss",
			None,
			ChartDisplay::default(),
			&DARK_CHART_COLORS,
		);
		assert_eq!(titles(&chart), vec!["Validation"]);
		let xs: Vec<f64> = chart.options().series[0]
			.data
			.iter()
			.map(|point| point.x)
			.collect();
		assert_eq!(xs, vec![0.0, 1.0]);
	}

	#[test]
	fn test_single_split_chart_without_points_is_empty() {
		let display = ChartDisplay {
			show_min: true,
			show_max: true,
		};
		let chart = create_single_split_chart(
			&[point(0, 1.0, "train")],
			"validation",
			"Validation Loss",
			None,
			display,
			&DARK_CHART_COLORS,
		);
		assert!(chart.options().series.is_empty());
	}

	#[test]
	fn test_single_split_chart_unknown_split_uses_train_colors() {
		let chart = create_single_split_chart(
			&[point(0, 1.0, "test")],
			"test",
			"Test Loss",
			None,
			ChartDisplay::default(),
			&DARK_CHART_COLORS,
		);
		assert_eq!(titles(&chart), vec!["Test"]);
		assert_eq!(chart.options().series[0].color, TRAIN_COLORS.border);
	}

	#[test]
	fn test_comparison_chart() {
		let runs = vec![
			RunSeries {
				run_id: "a".to_owned(),
				label: "a".to_owned(),
				points: vec![point(0, 1.0, "train")],
			},
			RunSeries {
				run_id: "b".to_owned(),
				label: "b".to_owned(),
				points: vec![point(0, 2.0, "train"), point(1, 1.5, "train")],
			},
		];
		let display = ChartDisplay {
			show_min: false,
			show_max: true,
		};
		let chart = create_comparison_chart(
			&runs,
			Some(Split::Train),
			"Compare",
			None,
			display,
			&DARK_CHART_COLORS,
		);
		insta::assert_debug_snapshot!(titles(&chart), @r###"
  [
      "a (train)",
      "b (train)",
      "Max (a (train)): 1.0000 @ step 0",
      "Max (b (train)): 2.0000 @ step 0",
  ]
  "###);
		let series = &chart.options().series;
		assert!(!series[0].fill && !series[1].fill);
		assert_eq!(series[0].color, RUN_COLORS[0].border);
		assert_eq!(series[1].color, RUN_COLORS[1].border);
	}
}
