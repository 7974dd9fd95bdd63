use crate::common::links::{model_href, run_href};
use html::{component, html, Node};
use traintrack_charts::{ChartDisplay, Split};
use traintrack_ui::{
	icons::{Icon, ARROW_LEFT},
	short_id, Button, ButtonType, Callout, CheckboxField, HiddenField, Level, SelectField,
	SelectFieldOption, TextField,
};

pub struct Props {
	pub model_id: String,
	pub run_ids: Vec<String>,
	pub split: Option<Split>,
	pub metric: Option<String>,
	pub display: ChartDisplay,
	/// Absent when no runs were selected.
	pub charts: Option<Node>,
}

pub fn render(props: Props) -> Node {
	let run_links = props
		.run_ids
		.iter()
		.map(|run_id| {
			html! {
				<li>
					<a href={run_href(run_id, &props.model_id, props.display)}>
						<code>{short_id(run_id).to_owned()}</code>
					</a>
				</li>
			}
		})
		.collect::<Vec<_>>();
	let controls = html! { <Controls props={&props} /> };
	let charts = match props.charts {
		Some(charts) => charts,
		None => html! {
			<Callout level={Level::Info} title={None}>
				{"Select at least one run to compare."}
			</Callout>
		},
	};
	html! {
		<>
			<div class="page-header">
				<a class="back-link" href={model_href(&props.model_id)}>
					<Icon svg={ARROW_LEFT} />
					{"Back to runs"}
				</a>
				<h1>{"Compare Runs"}</h1>
			</div>
			{controls}
			{charts}
			<ul class="compared-runs">{run_links}</ul>
		</>
	}
}

#[component]
fn Controls<'a>(props: &'a Props) {
	let split_options = vec![
		SelectFieldOption {
			text: "Train and validation".to_owned(),
			value: "both".to_owned(),
		},
		SelectFieldOption {
			text: "Train".to_owned(),
			value: Split::Train.as_str().to_owned(),
		},
		SelectFieldOption {
			text: "Validation".to_owned(),
			value: Split::Validation.as_str().to_owned(),
		},
	];
	let selected_split = props.split.map(Split::as_str).unwrap_or("both").to_owned();
	html! {
		<form class="chart-controls" method="get" action="/compare">
			<HiddenField name="model_id" value={props.model_id.clone()} />
			<HiddenField name="runs" value={props.run_ids.join(",")} />
			<SelectField name="split" options={split_options} value={Some(selected_split)} />
			<TextField
				name="metric"
				value={props.metric.clone().unwrap_or_default()}
				placeholder="Metric (losses when empty)"
			/>
			<CheckboxField label="Show min" name="show_min" value="true" checked={props.display.show_min} />
			<CheckboxField label="Show max" name="show_max" value="true" checked={props.display.show_max} />
			<Button
				button_type={ButtonType::Submit}
				class={Some("btn btn-secondary")}
				name={None}
				value={None}
				title={None}
			>
				{"Apply"}
			</Button>
		</form>
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn test_without_runs() {
		let html = render(Props {
			model_id: "m1".to_owned(),
			run_ids: Vec::new(),
			split: None,
			metric: None,
			display: ChartDisplay::default(),
			charts: None,
		})
		.render_to_string();
		assert!(html.contains("Select at least one run to compare."));
		assert!(html.contains(r#"<option value="both" selected>"#));
	}

	#[test]
	fn test_controls_keep_the_selection() {
		let html = render(Props {
			model_id: "m1".to_owned(),
			run_ids: vec!["run-a".to_owned(), "run-b".to_owned()],
			split: Some(Split::Validation),
			metric: Some("accuracy".to_owned()),
			display: ChartDisplay::default(),
			charts: Some(html! { <div class="charts-grid"></div> }),
		})
		.render_to_string();
		assert!(html.contains(r#"name="runs" value="run-a,run-b""#));
		assert!(html.contains(r#"<option value="validation" selected>"#));
		assert!(html.contains(r#"name="metric" value="accuracy""#));
		assert!(html.contains(r#"href="/runs/run-a?model_id=m1""#));
	}
}
