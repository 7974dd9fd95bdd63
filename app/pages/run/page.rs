use crate::common::links::{hyperparameters_href, model_href};
use html::{component, html, Node};
use traintrack_charts::ChartDisplay;
use traintrack_client::RunRecord;
use traintrack_ui::{
	format_date,
	icons::{Icon, ARROW_LEFT, PENCIL},
	short_id, status_class, Button, ButtonType, CheckboxField, HiddenField, Table, TableBody,
	TableCell, TableHeader, TableHeaderCell, TableRow,
};

pub struct Props {
	pub model_id: String,
	pub run: RunRecord,
	pub display: ChartDisplay,
	pub charts: Node,
}

pub fn render(props: Props) -> Node {
	let status = props.run.status;
	html! {
		<>
			<div class="page-header">
				<a class="back-link" href={model_href(&props.model_id)}>
					<Icon svg={ARROW_LEFT} />
					{"Back to runs"}
				</a>
				<h1>
					{"Run "}
					<code>{short_id(&props.run.id).to_owned()}</code>
					<span class={format!("status-badge {}", status_class(status))}>
						{status.as_str()}
					</span>
				</h1>
				<dl class="run-info">
					<dt>{"Started"}</dt>
					<dd>{format_date(props.run.started_at)}</dd>
					<dt>{"Finished"}</dt>
					<dd>{format_date(props.run.finished_at)}</dd>
				</dl>
			</div>
			<DisplayForm run_id={&props.run.id} model_id={&props.model_id} display={props.display} />
			{props.charts}
			<HyperparametersSection run={&props.run} model_id={&props.model_id} />
		</>
	}
}

#[component]
fn DisplayForm<'a>(run_id: &'a str, model_id: &'a str, display: ChartDisplay) {
	html! {
		<form class="chart-controls" method="get" action={format!("/runs/{}", run_id)}>
			<HiddenField name="model_id" value={model_id.to_owned()} />
			<CheckboxField label="Show min" name="show_min" value="true" checked={display.show_min} />
			<CheckboxField label="Show max" name="show_max" value="true" checked={display.show_max} />
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

#[component]
fn HyperparametersSection<'a>(run: &'a RunRecord, model_id: &'a str) {
	let body = match run.hyperparameters.as_ref().filter(|h| !h.is_empty()) {
		Some(hyperparameters) => {
			let rows = hyperparameters
				.iter()
				.map(|(key, value)| {
					html! {
						<TableRow>
							<TableCell>{key.clone()}</TableCell>
							<TableCell>
								<code>{value.to_string()}</code>
							</TableCell>
						</TableRow>
					}
				})
				.collect::<Vec<_>>();
			html! {
				<Table>
					<TableHeader>
						<TableRow>
							<TableHeaderCell text_align={None}>{"Key"}</TableHeaderCell>
							<TableHeaderCell text_align={None}>{"Value"}</TableHeaderCell>
						</TableRow>
					</TableHeader>
					<TableBody>{rows}</TableBody>
				</Table>
			}
		}
		None => html! {
			<p class="muted">{"No hyperparameters recorded."}</p>
		},
	};
	html! {
		<section class="hyperparameters">
			<div class="section-header">
				<h2>{"Hyperparameters"}</h2>
				<a
					class="btn btn-secondary"
					id="edit-params-btn"
					href={hyperparameters_href(&run.id, model_id)}
				>
					<Icon svg={PENCIL} />
					{"Edit"}
				</a>
			</div>
			{body}
		</section>
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use traintrack_client::{HyperparameterValue, Hyperparameters, RunStatus};

	fn props(hyperparameters: Option<Hyperparameters>, display: ChartDisplay) -> Props {
		Props {
			model_id: "m1".to_owned(),
			run: RunRecord {
				id: "r1".to_owned(),
				model_id: "m1".to_owned(),
				status: RunStatus::Running,
				started_at: None,
				finished_at: None,
				hyperparameters,
			},
			display,
			charts: html! { <div class="charts-grid"></div> },
		}
	}

	#[test]
	fn test_hyperparameters_with_edit_link() {
		let mut hyperparameters = Hyperparameters::new();
		hyperparameters.insert("batch_size".to_owned(), HyperparameterValue::Number(32.0));
		let html = render(props(Some(hyperparameters), ChartDisplay::default())).render_to_string();
		assert!(html.contains(r#"href="/runs/r1/hyperparameters?model_id=m1""#));
		assert!(html.contains("<code>32</code>"));
		assert!(!html.contains("No hyperparameters recorded."));
	}

	#[test]
	fn test_display_form_reflects_toggles() {
		let display = ChartDisplay {
			show_min: true,
			show_max: false,
		};
		let html = render(props(None, display)).render_to_string();
		assert!(html.contains(r#"name="show_min" value="true" checked />"#));
		assert!(html.contains(r#"name="show_max" value="true" />"#));
		assert!(html.contains("No hyperparameters recorded."));
	}
}
