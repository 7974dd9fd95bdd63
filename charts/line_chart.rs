#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LineChartOptions {
	pub animation_duration_ms: u64,
	pub legend: LegendOptions,
	pub series: Vec<LineChartSeries>,
	pub title: ChartTitle,
	pub tooltip: TooltipOptions,
	pub x_axis: AxisOptions,
	pub y_axis: AxisOptions,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ChartTitle {
	pub color: String,
	pub font_family: String,
	pub font_size: u32,
	pub font_weight: u32,
	pub text: String,
}

/// Both axes are linear. The x axis carries the step.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AxisOptions {
	pub grid_color: String,
	pub tick_color: String,
	pub tick_font_size: u32,
	pub tick_precision: Option<u32>,
	pub title: String,
	pub title_color: String,
	pub title_font_size: u32,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LegendOptions {
	pub color: String,
	pub font_family: String,
	pub use_point_style: bool,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TooltipOptions {
	pub background_color: String,
	pub body_color: String,
	pub border_color: String,
	pub title_color: String,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LineChartSeries {
	pub background_color: String,
	pub color: String,
	pub data: Vec<LineChartPoint>,
	pub fill: bool,
	pub line_style: LineStyle,
	pub line_width: f64,
	pub point_hover_radius: f64,
	pub point_radius: f64,
	pub point_style: PointStyle,
	pub tension: f64,
	pub title: String,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LineChartPoint {
	pub x: f64,
	pub y: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum LineStyle {
	#[serde(rename = "hidden")]
	Hidden,
	#[serde(rename = "solid")]
	Solid,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum PointStyle {
	#[serde(rename = "circle")]
	Circle,
	#[serde(rename = "triangle")]
	Triangle,
}
