use crate::common::links::run_href;
use html::{component, html, Node};
use itertools::Itertools;
use traintrack_charts::ChartDisplay;
use traintrack_client::{Hyperparameters, ModelRecord, RunRecord};
use traintrack_ui::{
	format_date,
	icons::{Icon, ARROW_LEFT, COMPARE},
	short_id, status_class, Button, ButtonType, Callout, HiddenField, Level, SelectField,
	SelectFieldOption, Table, TableBody, TableCell, TableHeader, TableHeaderCell, TableRow,
};

pub struct Props {
	pub model: ModelRecord,
	pub runs: Vec<RunRecord>,
}

pub fn render(props: Props) -> Node {
	let content = if props.runs.is_empty() {
		html! {
			<Callout level={Level::Info} title={None}>
				{"No runs for this model yet."}
			</Callout>
		}
	} else {
		html! { <CompareForm model={&props.model} runs={&props.runs} /> }
	};
	html! {
		<>
			<div class="page-header">
				<a class="back-link" href="/">
					<Icon svg={ARROW_LEFT} />
					{"All models"}
				</a>
				<h1>{props.model.name.clone()}</h1>
				<div class="page-subtitle">{props.model.project_name.clone()}</div>
			</div>
			{content}
		</>
	}
}

/// The runs table doubles as the form that picks runs to compare.
#[component]
fn CompareForm<'a>(model: &'a ModelRecord, runs: &'a [RunRecord]) {
	let rows = runs
		.iter()
		.map(|run| {
			let id = short_id(&run.id).to_owned();
			html! {
				<TableRow>
					<TableCell>
						<input
							type="checkbox"
							name="runs"
							value={run.id.clone()}
							aria-label={format!("Compare run {}", id)}
						/>
					</TableCell>
					<TableCell>
						<a href={run_href(&run.id, &model.id, ChartDisplay::default())}>
							<code>{id}</code>
						</a>
					</TableCell>
					<TableCell>
						<span class={format!("status-badge {}", status_class(run.status))}>
							{run.status.as_str()}
						</span>
					</TableCell>
					<TableCell>{format_date(run.started_at)}</TableCell>
					<TableCell>{format_date(run.finished_at)}</TableCell>
					<TableCell>{hyperparameters_summary(run.hyperparameters.as_ref())}</TableCell>
				</TableRow>
			}
		})
		.collect::<Vec<_>>();
	let headers = ["", "Run", "Status", "Started", "Finished", "Hyperparameters"]
		.iter()
		.map(|header| html! { <TableHeaderCell text_align={None}>{*header}</TableHeaderCell> })
		.collect::<Vec<_>>();
	let split_options = vec![
		SelectFieldOption {
			text: "Train and validation".to_owned(),
			value: "both".to_owned(),
		},
		SelectFieldOption {
			text: "Train".to_owned(),
			value: "train".to_owned(),
		},
		SelectFieldOption {
			text: "Validation".to_owned(),
			value: "validation".to_owned(),
		},
	];
	html! {
		<form class="compare-form" method="get" action="/compare">
			<HiddenField name="model_id" value={model.id.clone()} />
			<Table>
				<TableHeader>
					<TableRow>{headers}</TableRow>
				</TableHeader>
				<TableBody>{rows}</TableBody>
			</Table>
			<div class="compare-actions">
				<SelectField name="split" options={split_options} value={Some("both".to_owned())} />
				<Button
					button_type={ButtonType::Submit}
					class={Some("btn btn-primary")}
					name={None}
					value={None}
					title={None}
				>
					{"Compare selected"}
					<Icon svg={COMPARE} />
				</Button>
			</div>
		</form>
	}
}

fn hyperparameters_summary(hyperparameters: Option<&Hyperparameters>) -> String {
	match hyperparameters {
		Some(hyperparameters) if !hyperparameters.is_empty() => hyperparameters
			.iter()
			.map(|(key, value)| format!("{}={}", key, value))
			.join(", "),
		_ => "—".to_owned(),
	}
}
