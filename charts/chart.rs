use crate::line_chart::LineChartOptions;

/// How the renderer should apply a new set of options.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum RedrawMode {
	#[serde(rename = "animated")]
	Animated,
	#[serde(rename = "none")]
	None,
}

/// A built line chart. Refreshing an existing chart replaces its options in place instead of
/// creating a new one, so the renderer can redraw without animating.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct LineChart {
	options: LineChartOptions,
	redraw: RedrawMode,
	revision: u64,
}

impl LineChart {
	pub fn new(options: LineChartOptions) -> LineChart {
		LineChart {
			options,
			redraw: RedrawMode::Animated,
			revision: 0,
		}
	}

	pub fn update(&mut self, options: LineChartOptions) {
		self.options = options;
		self.redraw = RedrawMode::None;
		self.revision += 1;
	}

	pub fn options(&self) -> &LineChartOptions {
		&self.options
	}

	pub fn redraw(&self) -> RedrawMode {
		self.redraw
	}

	pub fn revision(&self) -> u64 {
		self.revision
	}
}
