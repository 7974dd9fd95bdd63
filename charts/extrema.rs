use crate::config::{CHART_CONFIG, MAX_COLOR, MIN_COLOR};
use crate::line_chart::{LineChartPoint, LineChartSeries, LineStyle, PointStyle};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MinMax {
	pub min: LineChartPoint,
	pub max: LineChartPoint,
}

/// Find the first point with the smallest y and the first point with the largest y.
pub fn find_min_max(points: &[LineChartPoint]) -> Option<MinMax> {
	let first = *points.first()?;
	let mut min_max = MinMax {
		min: first,
		max: first,
	};
	for point in points.iter() {
		if point.y < min_max.min.y {
			min_max.min = *point;
		}
		if point.y > min_max.max.y {
			min_max.max = *point;
		}
	}
	Some(min_max)
}

/// Build the marker series for the extrema of each non-empty series. When both markers are requested and the minimum and maximum coincide, both are emitted at the same location.
pub fn min_max_series(
	series: &[LineChartSeries],
	show_min: bool,
	show_max: bool,
) -> Vec<LineChartSeries> {
	let mut markers = Vec::new();
	for series in series.iter() {
		let min_max = match find_min_max(&series.data) {
			Some(min_max) => min_max,
			None => continue,
		};
		if show_min {
			markers.push(marker(
				format!("Min ({})", series.title),
				min_max.min,
				MIN_COLOR,
				PointStyle::Circle,
			));
		}
		if show_max {
			markers.push(marker(
				format!("Max ({})", series.title),
				min_max.max,
				MAX_COLOR,
				PointStyle::Triangle,
			));
		}
	}
	markers
}

fn marker(
	label: String,
	point: LineChartPoint,
	color: &str,
	point_style: PointStyle,
) -> LineChartSeries {
	LineChartSeries {
		background_color: color.to_owned(),
		color: color.to_owned(),
		data: vec![point],
		fill: false,
		line_style: LineStyle::Hidden,
		line_width: CHART_CONFIG.line_width,
		point_hover_radius: CHART_CONFIG.marker_hover_radius,
		point_radius: CHART_CONFIG.marker_radius,
		point_style,
		tension: 0.0,
		title: format!("{}: {:.4} @ step {}", label, point.y, point.x),
	}
}

#[cfg(test)]
mod test {
	use super::*;

	fn points(values: &[(f64, f64)]) -> Vec<LineChartPoint> {
		values
			.iter()
			.map(|(x, y)| LineChartPoint { x: *x, y: *y })
			.collect()
	}

	fn series(title: &str, data: Vec<LineChartPoint>) -> LineChartSeries {
		LineChartSeries {
			background_color: "transparent".to_owned(),
			color: "#000".to_owned(),
			data,
			fill: false,
			line_style: LineStyle::Solid,
			line_width: 2.0,
			point_hover_radius: 4.0,
			point_radius: 0.0,
			point_style: PointStyle::Circle,
			tension: 0.3,
			title: title.to_owned(),
		}
	}

	#[test]
	fn test_find_min_max_empty() {
		assert_eq!(find_min_max(&[]), None);
	}

	#[test]
	fn test_find_min_max_bounds_every_point() {
		let data = points(&[(0.0, 0.7), (1.0, 0.2), (2.0, 1.4), (3.0, 0.9)]);
		let min_max = find_min_max(&data).unwrap();
		for point in data.iter() {
			assert!(min_max.min.y <= point.y && point.y <= min_max.max.y);
		}
		assert_eq!(min_max.min, LineChartPoint { x: 1.0, y: 0.2 });
		assert_eq!(min_max.max, LineChartPoint { x: 2.0, y: 1.4 });
	}

	#[test]
	fn test_find_min_max_first_occurrence_wins() {
		let data = points(&[(0.0, 5.0), (1.0, 5.0)]);
		let min_max = find_min_max(&data).unwrap();
		assert_eq!(min_max.min, LineChartPoint { x: 0.0, y: 5.0 });
		assert_eq!(min_max.max, LineChartPoint { x: 0.0, y: 5.0 });
	}

	#[test]
	fn test_min_max_series_titles_and_colors() {
		let core = vec![series("Train", points(&[(0.0, 0.5), (1.0, 0.25), (2.0, 0.75)]))];
		let markers = min_max_series(&core, true, true);
		let titles: Vec<&str> = markers.iter().map(|marker| marker.title.as_str()).collect();
		insta::assert_debug_snapshot!(titles, @r###"
  [
      "Min (Train): 0.2500 @ step 1",
      "Max (Train): 0.7500 @ step 2",
  ]
  "###);
		assert_eq!(markers[0].color, MIN_COLOR);
		assert_eq!(markers[0].point_style, PointStyle::Circle);
		assert_eq!(markers[1].color, MAX_COLOR);
		assert_eq!(markers[1].point_style, PointStyle::Triangle);
		assert!(markers
			.iter()
			.all(|marker| marker.line_style == LineStyle::Hidden && marker.point_radius == 7.0));
	}

	#[test]
	fn test_min_max_series_coincident_point() {
		let core = vec![series("Validation", points(&[(4.0, 0.125)]))];
		let markers = min_max_series(&core, true, true);
		assert_eq!(markers.len(), 2);
		assert_eq!(markers[0].data, markers[1].data);
		assert_ne!(markers[0].color, markers[1].color);
	}

	#[test]
	fn test_min_max_series_skips_empty_and_disabled() {
		let core = vec![
			series("Empty", Vec::new()),
			series("Train", points(&[(0.0, 1.0)])),
		];
		assert!(min_max_series(&core, false, false).is_empty());
		let markers = min_max_series(&core, false, true);
		assert_eq!(markers.len(), 1);
		assert_eq!(markers[0].title, "Max (Train): 1.0000 @ step 0");
	}
}
