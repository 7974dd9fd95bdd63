use crate::chart::LineChart;
use html::{component, html, Node};

/// The container a line chart is drawn into. The options are embedded as json so the renderer can draw the chart, and `src`, when present, is the address the renderer polls for fresh options.
pub fn line_chart_container(
	id: String,
	chart: &LineChart,
	src: Option<String>,
) -> serde_json::Result<Node> {
	let data_options = serde_json::to_string(chart)?;
	Ok(html! {
		<LineChartContainer id={id} chart={chart} data_options={data_options} src={src} />
	})
}

#[component]
pub fn LineChartContainer<'a>(
	id: String,
	chart: &'a LineChart,
	data_options: String,
	src: Option<String>,
) {
	let options = chart.options();
	let legend_items = options
		.series
		.iter()
		.map(|series| {
			html! {
				<ChartLegendItem color={series.color.clone()} title={series.title.clone()} />
			}
		})
		.collect::<Vec<_>>();
	html! {
		<div class="chart-wrapper">
			<ChartTitle>{options.title.text.clone()}</ChartTitle>
			<div class="chart-legend-wrapper">{legend_items}</div>
			<div
				class="chart-container"
				id={id}
				data-chart-type="line"
				data-options={data_options}
				data-src={src}
			>
				<noscript>
					<div class="chart-noscript">{"Please enable JavaScript to view charts."}</div>
				</noscript>
			</div>
		</div>
	}
}

#[component]
pub fn ChartTitle() {
	html! {
		<div class="chart-title">{children}</div>
	}
}

#[component]
fn ChartLegendItem(color: String, title: String) {
	html! {
		<div class="chart-legend-item">
			<div
				class="chart-legend-indicator"
				style={format!("background-color: {}", color)}
			>
			</div>
			<div class="chart-legend-title">{title}</div>
		</div>
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::builders::{create_overlay_chart, ChartDisplay};
	use crate::config::DARK_CHART_COLORS;
	use crate::data::MetricPoint;

	#[test]
	fn test_container_embeds_options() {
		let points = vec![MetricPoint {
			step: 0,
			value: 1.0,
			split: "train".to_owned(),
		}];
		let chart = create_overlay_chart(
			&points,
			"Loss <raw>",
			None,
			ChartDisplay::default(),
			&DARK_CHART_COLORS,
		);
		let html = line_chart_container(
			"loss".to_owned(),
			&chart,
			Some("/api/charts/abc".to_owned()),
		)
		.unwrap()
		.render_to_string();
		assert!(html.contains(r#"<div class="chart-title">Loss &lt;raw&gt;</div>"#));
		assert!(html.contains(r#"data-src="/api/charts/abc""#));
		assert!(html.contains("data-options=\"{&quot;options&quot;:"));
		assert!(html.contains(r#"<div class="chart-legend-title">Train</div>"#));
	}
}
