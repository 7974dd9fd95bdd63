use derive_more::{Display, Error};

pub struct ChartConfig {
	pub animation_duration_ms: u64,
	pub font_family: &'static str,
	pub axis_title_font_size: u32,
	pub tick_font_size: u32,
	pub title_font_size: u32,
	pub title_font_weight: u32,
	pub line_width: f64,
	pub point_radius: f64,
	pub point_hover_radius: f64,
	pub tension: f64,
	pub marker_radius: f64,
	pub marker_hover_radius: f64,
	pub x_axis_title: &'static str,
	pub y_axis_title: &'static str,
}

pub const CHART_CONFIG: ChartConfig = ChartConfig {
	animation_duration_ms: 300,
	font_family: "Inter",
	axis_title_font_size: 12,
	tick_font_size: 11,
	title_font_size: 14,
	title_font_weight: 600,
	line_width: 2.0,
	point_radius: 0.0,
	point_hover_radius: 4.0,
	tension: 0.3,
	marker_radius: 7.0,
	marker_hover_radius: 9.0,
	x_axis_title: "Step",
	y_axis_title: "Value",
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColorPair {
	pub background: &'static str,
	pub border: &'static str,
}

/// Palette for comparison charts, assigned round-robin per emitted series.
pub const RUN_COLORS: [ColorPair; 8] = [
	ColorPair {
		background: "rgba(150,150,150,0.12)",
		border: "#b0b0b0",
	},
	ColorPair {
		background: "rgba(91,192,222,0.12)",
		border: "#5bc0de",
	},
	ColorPair {
		background: "rgba(245,166,35,0.12)",
		border: "#f5a623",
	},
	ColorPair {
		background: "rgba(92,184,92,0.12)",
		border: "#5cb85c",
	},
	ColorPair {
		background: "rgba(217,83,79,0.12)",
		border: "#d9534f",
	},
	ColorPair {
		background: "rgba(155,89,182,0.12)",
		border: "#9b59b6",
	},
	ColorPair {
		background: "rgba(243,156,18,0.12)",
		border: "#f39c12",
	},
	ColorPair {
		background: "rgba(52,152,219,0.12)",
		border: "#3498db",
	},
];

pub const TRAIN_COLORS: ColorPair = ColorPair {
	background: "rgba(180,180,180,0.12)",
	border: "#b0b0b0",
};

pub const VALIDATION_COLORS: ColorPair = ColorPair {
	background: "rgba(245,166,35,0.12)",
	border: "#f5a623",
};

pub const MIN_COLOR: &str = "#d9534f";
pub const MAX_COLOR: &str = "#5cb85c";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
	Dark,
	Light,
}

impl Default for Theme {
	fn default() -> Theme {
		Theme::Dark
	}
}

impl Theme {
	pub fn as_str(self) -> &'static str {
		match self {
			Theme::Dark => "dark",
			Theme::Light => "light",
		}
	}

	pub fn toggled(self) -> Theme {
		match self {
			Theme::Dark => Theme::Light,
			Theme::Light => Theme::Dark,
		}
	}

	pub fn chart_colors(self) -> &'static ChartColors {
		match self {
			Theme::Dark => &DARK_CHART_COLORS,
			Theme::Light => &LIGHT_CHART_COLORS,
		}
	}
}

impl std::fmt::Display for Theme {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

#[derive(Debug, Display, Error)]
#[display(fmt = "unknown theme \"{}\"", _0)]
pub struct ParseThemeError(#[error(not(source))] pub String);

impl std::str::FromStr for Theme {
	type Err = ParseThemeError;
	fn from_str(value: &str) -> Result<Theme, ParseThemeError> {
		match value {
			"dark" => Ok(Theme::Dark),
			"light" => Ok(Theme::Light),
			other => Err(ParseThemeError(other.to_owned())),
		}
	}
}

#[derive(Debug, PartialEq, Eq)]
pub struct ChartColors {
	pub text: &'static str,
	pub text_light: &'static str,
	pub grid: &'static str,
	pub tooltip_background: &'static str,
	pub tooltip_title: &'static str,
	pub tooltip_body: &'static str,
	pub tooltip_border: &'static str,
}

pub const DARK_CHART_COLORS: ChartColors = ChartColors {
	text: "#999",
	text_light: "#666",
	grid: "rgba(255,255,255,0.05)",
	tooltip_background: "rgba(26,26,26,0.95)",
	tooltip_title: "#e8e8e8",
	tooltip_body: "#999",
	tooltip_border: "rgba(255,255,255,0.08)",
};

pub const LIGHT_CHART_COLORS: ChartColors = ChartColors {
	text: "#666",
	text_light: "#999",
	grid: "rgba(0,0,0,0.06)",
	tooltip_background: "rgba(255,255,255,0.95)",
	tooltip_title: "#1a1a1a",
	tooltip_body: "#666",
	tooltip_border: "rgba(0,0,0,0.08)",
};

#[test]
fn test_theme_parse_and_toggle() {
	assert_eq!("light".parse::<Theme>().unwrap(), Theme::Light);
	assert_eq!(Theme::default().toggled(), Theme::Light);
	assert_eq!(Theme::Light.toggled().chart_colors().tooltip_title, "#e8e8e8");
	let error = "sepia".parse::<Theme>().unwrap_err();
	assert_eq!(error.to_string(), "unknown theme \"sepia\"");
}
