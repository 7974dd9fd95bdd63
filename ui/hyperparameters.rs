use crate::alert::{Callout, Level};
use crate::form::{Button, ButtonType, TextField};
use derive_more::{Display, Error};
use html::{component, html};
use std::{collections::BTreeMap, future::Future};
use traintrack_client::{HyperparameterValue, Hyperparameters};

pub const SAVE_FAILED_ALERT: &str =
	"Failed to save hyperparameters. The API endpoint may not be available yet.";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HyperparameterRow {
	pub key: String,
	pub value: String,
}

#[derive(Clone, Debug, PartialEq)]
enum EditorState {
	Closed,
	Open {
		run_id: String,
		rows: Vec<HyperparameterRow>,
	},
}

#[derive(Debug, Display, Error, PartialEq)]
pub enum SaveError {
	#[display(fmt = "the hyperparameter editor is not open")]
	NotOpen,
	#[display(fmt = "{}", SAVE_FAILED_ALERT)]
	Failed { cause: String },
}

/// Editable rows for the hyperparameters of one run. Edits only reach the run when they are saved.
#[derive(Clone, Debug, PartialEq)]
pub struct HyperparameterEditor {
	state: EditorState,
}

impl Default for HyperparameterEditor {
	fn default() -> HyperparameterEditor {
		HyperparameterEditor::new()
	}
}

impl HyperparameterEditor {
	pub fn new() -> HyperparameterEditor {
		HyperparameterEditor {
			state: EditorState::Closed,
		}
	}

	/// Start editing a copy of `current`.
	pub fn open(&mut self, run_id: impl Into<String>, current: Option<&Hyperparameters>) {
		let rows = current
			.into_iter()
			.flatten()
			.map(|(key, value)| HyperparameterRow {
				key: key.clone(),
				value: value.to_string(),
			})
			.collect();
		self.state = EditorState::Open {
			run_id: run_id.into(),
			rows,
		};
	}

	pub fn is_open(&self) -> bool {
		matches!(self.state, EditorState::Open { .. })
	}

	pub fn run_id(&self) -> Option<&str> {
		match &self.state {
			EditorState::Open { run_id, .. } => Some(run_id),
			EditorState::Closed => None,
		}
	}

	pub fn rows(&self) -> &[HyperparameterRow] {
		match &self.state {
			EditorState::Open { rows, .. } => rows,
			EditorState::Closed => &[],
		}
	}

	pub fn add_row(&mut self) {
		if let Some(rows) = self.rows_mut() {
			rows.push(HyperparameterRow::default());
		}
	}

	pub fn set_key(&mut self, index: usize, key: impl Into<String>) {
		if let Some(row) = self.rows_mut().and_then(|rows| rows.get_mut(index)) {
			row.key = key.into();
		}
	}

	pub fn set_value(&mut self, index: usize, value: impl Into<String>) {
		if let Some(row) = self.rows_mut().and_then(|rows| rows.get_mut(index)) {
			row.value = value.into();
		}
	}

	pub fn delete_row(&mut self, index: usize) {
		if let Some(rows) = self.rows_mut() {
			if index < rows.len() {
				rows.remove(index);
			}
		}
	}

	/// Replace every row, as when a submitted form is read back.
	pub fn set_rows(&mut self, new_rows: Vec<HyperparameterRow>) {
		if let Some(rows) = self.rows_mut() {
			*rows = new_rows;
		}
	}

	pub fn cancel(&mut self) {
		self.state = EditorState::Closed;
	}

	/// Persist the rows through `on_save`. The editor closes on success. On failure it stays open with its rows, and the error is logged.
	pub async fn save<F, Fut, T, E>(&mut self, on_save: F) -> Result<Hyperparameters, SaveError>
	where
		F: FnOnce(String, Hyperparameters) -> Fut,
		Fut: Future<Output = Result<T, E>>,
		E: std::fmt::Display,
	{
		let (run_id, hyperparameters) = match &self.state {
			EditorState::Open { run_id, rows } => (run_id.clone(), collect_hyperparameters(rows)),
			EditorState::Closed => return Err(SaveError::NotOpen),
		};
		match on_save(run_id.clone(), hyperparameters.clone()).await {
			Ok(_) => {
				self.state = EditorState::Closed;
				Ok(hyperparameters)
			}
			Err(error) => {
				tracing::error!(%run_id, %error, "failed to save hyperparameters");
				Err(SaveError::Failed {
					cause: error.to_string(),
				})
			}
		}
	}

	fn rows_mut(&mut self) -> Option<&mut Vec<HyperparameterRow>> {
		match &mut self.state {
			EditorState::Open { rows, .. } => Some(rows),
			EditorState::Closed => None,
		}
	}
}

/// Rows with an empty key are dropped. When a key repeats, the later row wins.
pub fn collect_hyperparameters(rows: &[HyperparameterRow]) -> Hyperparameters {
	rows.iter()
		.filter_map(|row| {
			let key = row.key.trim();
			if key.is_empty() {
				return None;
			}
			Some((key.to_owned(), HyperparameterValue::coerce(&row.value)))
		})
		.collect()
}

/// Read the rows of a submitted editor form. Rows are named `key_{index}` and `value_{index}`.
pub fn rows_from_form(fields: &BTreeMap<String, String>) -> Vec<HyperparameterRow> {
	let mut indices: Vec<usize> = fields
		.keys()
		.filter_map(|name| name.strip_prefix("key_"))
		.filter_map(|index| index.parse().ok())
		.collect();
	indices.sort_unstable();
	indices
		.into_iter()
		.map(|index| HyperparameterRow {
			key: fields
				.get(&format!("key_{}", index))
				.cloned()
				.unwrap_or_default(),
			value: fields
				.get(&format!("value_{}", index))
				.cloned()
				.unwrap_or_default(),
		})
		.collect()
}

/// The editor rendered as a form. Every button submits the rows along with an `action` of `add`, `delete:{index}` or `save`.
#[component]
pub fn HyperparameterForm<'a>(
	action: String,
	cancel_href: String,
	rows: &'a [HyperparameterRow],
	error: Option<&'a SaveError>,
) {
	let alert = error.map(|error| {
		html! {
			<Callout level={Level::Danger} title={None}>
				{error.to_string()}
			</Callout>
		}
	});
	let rows = rows
		.iter()
		.enumerate()
		.map(|(index, row)| {
			html! {
				<div class="param-row">
					<TextField name={format!("key_{}", index)} value={row.key.clone()} placeholder="Key" />
					<TextField name={format!("value_{}", index)} value={row.value.clone()} placeholder="Value" />
					<Button
						button_type={ButtonType::Submit}
						class={Some("param-delete")}
						name={Some("action")}
						value={Some(format!("delete:{}", index))}
						title={Some("Remove")}
					>
						{"−"}
					</Button>
				</div>
			}
		})
		.collect::<Vec<_>>();
	html! {
		<div class="modal">
			<form method="post" action={action}>
				<div class="modal-header">
					<h3 class="modal-title">{"Edit Hyperparameters"}</h3>
				</div>
				{alert}
				<div id="params-container">{rows}</div>
				<Button
					button_type={ButtonType::Submit}
					class={Some("add-param-btn")}
					name={Some("action")}
					value={Some("add".to_owned())}
					title={None}
				>
					{"+ Add Parameter"}
				</Button>
				<div class="modal-footer">
					<a class="btn btn-secondary" href={cancel_href}>{"Cancel"}</a>
					<Button
						button_type={ButtonType::Submit}
						class={Some("btn btn-primary")}
						name={Some("action")}
						value={Some("save".to_owned())}
						title={None}
					>
						{"Save Changes"}
					</Button>
				</div>
			</form>
		</div>
	}
}
