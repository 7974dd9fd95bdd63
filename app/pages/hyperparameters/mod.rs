use crate::{
	common::{
		error::Error,
		links::{hyperparameters_href, run_href},
		params,
	},
	layouts::app_layout::AppLayout,
	Context,
};
use anyhow::Result;
use html::html;
use hyper::{header, Body, Request, Response, StatusCode};
use std::collections::BTreeMap;
use traintrack_charts::ChartDisplay;
use traintrack_ui::{
	hyperparameters::rows_from_form, short_id, ActivePage, HyperparameterEditor, HyperparameterForm,
	SaveError,
};

/// What a submitted editor form asks for.
#[derive(Debug, PartialEq)]
enum Action {
	AddRow,
	DeleteRow(usize),
	Save,
}

impl Action {
	fn parse(value: &str) -> Option<Action> {
		match value {
			"add" => Some(Action::AddRow),
			"save" => Some(Action::Save),
			_ => value
				.strip_prefix("delete:")
				.and_then(|index| index.parse().ok())
				.map(Action::DeleteRow),
		}
	}
}

pub async fn get(
	context: &Context,
	_request: Request<Body>,
	run_id: &str,
	search_params: params::SearchParams,
) -> Result<Response<Body>> {
	let model_id = params::required(&search_params, "model_id")?;
	let run = context
		.client
		.get_runs_by_model(model_id)
		.await?
		.into_iter()
		.find(|run| run.id == run_id)
		.ok_or(Error::NotFound)?;
	let mut editor = HyperparameterEditor::new();
	editor.open(run.id.as_str(), run.hyperparameters.as_ref());
	render(context, &editor, run_id, model_id, None)
}

pub async fn post(
	context: &Context,
	request: Request<Body>,
	run_id: &str,
	search_params: params::SearchParams,
) -> Result<Response<Body>> {
	let model_id = params::required(&search_params, "model_id")?;
	let data = hyper::body::to_bytes(request.into_body()).await?;
	let fields: BTreeMap<String, String> =
		serde_urlencoded::from_bytes(&data).map_err(|_| Error::BadRequest)?;
	let action = fields
		.get("action")
		.and_then(|action| Action::parse(action))
		.ok_or(Error::BadRequest)?;
	let mut editor = HyperparameterEditor::new();
	editor.open(run_id, None);
	editor.set_rows(rows_from_form(&fields));
	match action {
		Action::AddRow => editor.add_row(),
		Action::DeleteRow(index) => editor.delete_row(index),
		Action::Save => {
			let client = &context.client;
			let result = editor
				.save(|run_id, hyperparameters| async move {
					client.update_hyperparameters(&run_id, &hyperparameters).await
				})
				.await;
			return match result {
				Ok(hyperparameters) => {
					tracing::info!(%run_id, count = hyperparameters.len(), "saved hyperparameters");
					Ok(Response::builder()
						.status(StatusCode::SEE_OTHER)
						.header(
							header::LOCATION,
							run_href(run_id, model_id, ChartDisplay::default()),
						)
						.body(Body::empty())?)
				}
				Err(error) => render(context, &editor, run_id, model_id, Some(&error)),
			};
		}
	}
	render(context, &editor, run_id, model_id, None)
}

fn render(
	context: &Context,
	editor: &HyperparameterEditor,
	run_id: &str,
	model_id: &str,
	error: Option<&SaveError>,
) -> Result<Response<Body>> {
	let title = format!("Edit Run {}", short_id(run_id));
	let html = html::document(html! {
		<AppLayout context={context} title={title} active={ActivePage::Run} live={false}>
			<div class="modal-overlay" id="params-modal">
				<HyperparameterForm
					action={hyperparameters_href(run_id, model_id)}
					cancel_href={run_href(run_id, model_id, ChartDisplay::default())}
					rows={editor.rows()}
					error={error}
				/>
			</div>
		</AppLayout>
	});
	Ok(Response::builder()
		.status(StatusCode::OK)
		.header(header::CONTENT_TYPE, "text/html; charset=utf-8")
		.body(Body::from(html))?)
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::test::{body_string, context, stub_api};
	use hyper::Method;
	use std::sync::{Arc, Mutex};

	#[test]
	fn test_parse_action() {
		assert_eq!(Action::parse("add"), Some(Action::AddRow));
		assert_eq!(Action::parse("delete:3"), Some(Action::DeleteRow(3)));
		assert_eq!(Action::parse("save"), Some(Action::Save));
		assert_eq!(Action::parse("delete:x"), None);
		assert_eq!(Action::parse("publish"), None);
	}

	fn form_request(body: &str) -> Request<Body> {
		Request::builder()
			.method(Method::POST)
			.uri("/runs/r1/hyperparameters?model_id=m1")
			.header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
			.body(Body::from(body.to_owned()))
			.unwrap()
	}

	#[tokio::test]
	async fn test_add_row_rerenders() {
		let context = context("http://127.0.0.1:9");
		let response = crate::handle(context, form_request("key_0=lr&value_0=0.1&action=add")).await;
		assert_eq!(response.status(), StatusCode::OK);
		let html = body_string(response).await;
		assert!(html.contains(r#"name="key_0" value="lr""#));
		assert!(html.contains(r#"name="key_1" value="""#));
	}

	#[tokio::test]
	async fn test_save_redirects_to_run() {
		let requests = Arc::new(Mutex::new(Vec::new()));
		let recorded = requests.clone();
		let api_url = stub_api(move |uri| {
			recorded.lock().unwrap().push(uri.to_owned());
			(
				200,
				r#"{"id": "r1", "model_id": "m1", "status": "running"}"#.to_owned(),
			)
		})
		.await;
		let context = context(&api_url);
		let response =
			crate::handle(context, form_request("key_0=lr&value_0=0.1&action=save")).await;
		assert_eq!(response.status(), StatusCode::SEE_OTHER);
		assert_eq!(response.headers()[header::LOCATION], "/runs/r1?model_id=m1");
		assert_eq!(
			requests.lock().unwrap().as_slice(),
			&["/runs/r1/hyperparameters".to_owned()]
		);
	}

	#[tokio::test]
	async fn test_failed_save_keeps_rows() {
		let api_url = stub_api(|_| (404, r#"{"detail": "Not Found"}"#.to_owned())).await;
		let context = context(&api_url);
		let response =
			crate::handle(context, form_request("key_0=lr&value_0=0.1&action=save")).await;
		assert_eq!(response.status(), StatusCode::OK);
		let html = body_string(response).await;
		assert!(html.contains(traintrack_ui::SAVE_FAILED_ALERT));
		assert!(html.contains(r#"name="value_0" value="0.1""#));
	}

	#[tokio::test]
	async fn test_unknown_action() {
		let context = context("http://127.0.0.1:9");
		let response = crate::handle(context, form_request("action=publish")).await;
		assert_eq!(response.status(), StatusCode::BAD_REQUEST);
	}
}
