/*!
An async client for the tracking API. The dashboard uses the read operations, and training scripts use the write operations to report models, runs, losses and metrics.
*/

use derive_more::{Display, Error};
use reqwest::{Method, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use traintrack_charts::Split;
use url::Url;

mod hyperparameters;
mod types;

pub use self::hyperparameters::{HyperparameterValue, Hyperparameters};
pub use self::types::{
	LossEntry, LossRecord, MetricEntry, MetricRecord, ModelRecord, RunRecord, RunStatus,
};

pub const DEFAULT_API_URL: &str = "http://localhost:8000";

#[derive(Debug, Display, Error)]
pub enum Error {
	#[display(fmt = "Failed to {}: {}", operation, status)]
	Status { operation: &'static str, status: u16 },
	#[display(fmt = "Failed to {}: {}", operation, source)]
	Request {
		operation: &'static str,
		source: reqwest::Error,
	},
	#[display(fmt = "Failed to {}: unexpected response: {}", operation, source)]
	Decode {
		operation: &'static str,
		source: serde_json::Error,
	},
}

impl Error {
	/// The http status of the response, if the server answered.
	pub fn status(&self) -> Option<u16> {
		match self {
			Error::Status { status, .. } => Some(*status),
			_ => None,
		}
	}
}

#[derive(Clone, Debug)]
pub struct Client {
	base_url: Url,
	http: reqwest::Client,
}

impl Client {
	pub fn new(base_url: Url) -> Client {
		Client {
			base_url,
			http: reqwest::Client::new(),
		}
	}

	pub fn base_url(&self) -> &Url {
		&self.base_url
	}

	pub async fn get_models(&self) -> Result<Vec<ModelRecord>, Error> {
		let operation = "fetch models";
		let response = self.send(operation, Method::GET, self.url("/models/"), None::<&()>).await?;
		decode(operation, response).await
	}

	/// List the runs of a model. The backend answers 404 when a model has no runs yet, which is an empty list here.
	pub async fn get_runs_by_model(&self, model_id: &str) -> Result<Vec<RunRecord>, Error> {
		let url = self.url(&format!("/runs/runbymodels/{}", model_id));
		self.get_runs("fetch runs", url).await
	}

	/// List the runs of every model in a project. A project without models is an empty list.
	pub async fn get_runs_by_project(&self, project_name: &str) -> Result<Vec<RunRecord>, Error> {
		let url = self.url(&format!("/runs/runbyproject/{}", project_name));
		self.get_runs("fetch project runs", url).await
	}

	async fn get_runs(&self, operation: &'static str, url: Url) -> Result<Vec<RunRecord>, Error> {
		match self.send(operation, Method::GET, url, None::<&()>).await {
			Ok(response) => decode(operation, response).await,
			Err(Error::Status { status: 404, .. }) => Ok(Vec::new()),
			Err(error) => Err(error),
		}
	}

	pub async fn update_hyperparameters(
		&self,
		run_id: &str,
		hyperparameters: &Hyperparameters,
	) -> Result<RunRecord, Error> {
		#[derive(Serialize)]
		struct Body<'a> {
			hyperparameters: &'a Hyperparameters,
		}
		let operation = "update hyperparameters";
		let url = self.url(&format!("/runs/{}/hyperparameters", run_id));
		let body = Body { hyperparameters };
		let response = self.send(operation, Method::PATCH, url, Some(&body)).await?;
		decode(operation, response).await
	}

	pub async fn get_losses(
		&self,
		run_id: &str,
		split: Option<&str>,
	) -> Result<Vec<LossRecord>, Error> {
		let operation = "fetch losses";
		let mut url = self.url("/loss/");
		{
			let mut query = url.query_pairs_mut();
			query.append_pair("run_id", run_id);
			if let Some(split) = split {
				query.append_pair("split", split);
			}
		}
		let response = self.send(operation, Method::GET, url, None::<&()>).await?;
		decode(operation, response).await
	}

	pub async fn get_metrics(
		&self,
		run_id: &str,
		split: Option<&str>,
		metric_name: Option<&str>,
	) -> Result<Vec<MetricRecord>, Error> {
		let operation = "fetch metrics";
		let mut url = self.url("/metric/");
		{
			let mut query = url.query_pairs_mut();
			query.append_pair("run_id", run_id);
			if let Some(split) = split {
				query.append_pair("split", split);
			}
			if let Some(metric_name) = metric_name {
				query.append_pair("metric_name", metric_name);
			}
		}
		let response = self.send(operation, Method::GET, url, None::<&()>).await?;
		decode(operation, response).await
	}

	pub async fn create_model(&self, name: &str, project_name: &str) -> Result<ModelRecord, Error> {
		#[derive(Serialize)]
		struct Body<'a> {
			name: &'a str,
			project_name: &'a str,
		}
		let operation = "create model";
		let body = Body { name, project_name };
		let response = self
			.send(operation, Method::POST, self.url("/models/"), Some(&body))
			.await?;
		decode(operation, response).await
	}

	pub async fn create_run(
		&self,
		model_id: &str,
		hyperparameters: Option<&Hyperparameters>,
	) -> Result<RunRecord, Error> {
		#[derive(Serialize)]
		struct Body<'a> {
			model_id: &'a str,
			#[serde(skip_serializing_if = "Option::is_none")]
			hyperparameters: Option<&'a Hyperparameters>,
		}
		let operation = "create run";
		let body = Body {
			model_id,
			hyperparameters,
		};
		let response = self
			.send(operation, Method::POST, self.url("/runs/"), Some(&body))
			.await?;
		decode(operation, response).await
	}

	pub async fn update_run_status(&self, run_id: &str, status: RunStatus) -> Result<(), Error> {
		#[derive(Serialize)]
		struct Body<'a> {
			run_id: &'a str,
			new_status: RunStatus,
		}
		let body = Body {
			run_id,
			new_status: status,
		};
		self.send(
			"update run status",
			Method::PATCH,
			self.url("/runs/update_status"),
			Some(&body),
		)
		.await?;
		Ok(())
	}

	pub async fn complete_run(&self, run_id: &str) -> Result<(), Error> {
		self.update_run_status(run_id, RunStatus::Completed).await
	}

	pub async fn fail_run(&self, run_id: &str) -> Result<(), Error> {
		self.update_run_status(run_id, RunStatus::Failed).await
	}

	pub async fn delete_run(&self, run_id: &str) -> Result<(), Error> {
		let url = self.url(&format!("/runs/{}", run_id));
		self.send("delete run", Method::DELETE, url, None::<&()>)
			.await?;
		Ok(())
	}

	pub async fn delete_model(&self, model_id: &str) -> Result<(), Error> {
		let url = self.url(&format!("/models/{}", model_id));
		self.send("delete model", Method::DELETE, url, None::<&()>)
			.await?;
		Ok(())
	}

	pub async fn delete_project(&self, project_name: &str) -> Result<(), Error> {
		let url = self.url(&format!("/models/project/{}", project_name));
		self.send("delete project", Method::DELETE, url, None::<&()>)
			.await?;
		Ok(())
	}

	pub async fn log_loss(&self, run_id: &str, loss: &LossEntry) -> Result<LossRecord, Error> {
		let operation = "log loss";
		let body = LossBody::new(run_id, loss);
		let response = self
			.send(operation, Method::POST, self.url("/loss/"), Some(&body))
			.await?;
		decode(operation, response).await
	}

	pub async fn log_losses(
		&self,
		run_id: &str,
		losses: &[LossEntry],
	) -> Result<Vec<LossRecord>, Error> {
		#[derive(Serialize)]
		struct Body<'a> {
			run_id: &'a str,
			losses: Vec<LossBody<'a>>,
		}
		let operation = "log losses";
		let body = Body {
			run_id,
			losses: losses.iter().map(|loss| LossBody::new(run_id, loss)).collect(),
		};
		let response = self
			.send(operation, Method::POST, self.url("/loss/batch"), Some(&body))
			.await?;
		decode(operation, response).await
	}

	pub async fn log_metric(
		&self,
		run_id: &str,
		metric: &MetricEntry,
	) -> Result<MetricRecord, Error> {
		let operation = "log metric";
		let body = MetricBody::new(run_id, metric);
		let response = self
			.send(operation, Method::POST, self.url("/metric/"), Some(&body))
			.await?;
		decode(operation, response).await
	}

	pub async fn log_metrics(
		&self,
		run_id: &str,
		metrics: &[MetricEntry],
	) -> Result<Vec<MetricRecord>, Error> {
		#[derive(Serialize)]
		struct Body<'a> {
			run_id: &'a str,
			metrics: Vec<MetricBody<'a>>,
		}
		let operation = "log metrics";
		let body = Body {
			run_id,
			metrics: metrics
				.iter()
				.map(|metric| MetricBody::new(run_id, metric))
				.collect(),
		};
		let response = self
			.send(operation, Method::POST, self.url("/metric/batch"), Some(&body))
			.await?;
		decode(operation, response).await
	}

	fn url(&self, path: &str) -> Url {
		let mut url = self.base_url.clone();
		let base_path = url.path().trim_end_matches('/').to_owned();
		url.set_path(&format!("{}{}", base_path, path));
		url
	}

	/// Issue one request and fail on any non-success status.
	async fn send<B>(
		&self,
		operation: &'static str,
		method: Method,
		url: Url,
		body: Option<&B>,
	) -> Result<reqwest::Response, Error>
	where
		B: Serialize + ?Sized,
	{
		tracing::debug!(%method, %url, "{}", operation);
		let mut request = self.http.request(method, url);
		if let Some(body) = body {
			request = request.json(body);
		}
		let response = request
			.send()
			.await
			.map_err(|source| Error::Request { operation, source })?;
		let status = response.status();
		if !status.is_success() {
			return Err(status_error(operation, status));
		}
		Ok(response)
	}
}

#[derive(Serialize)]
struct LossBody<'a> {
	run_id: &'a str,
	step: u64,
	split: Split,
	value: f64,
}

impl<'a> LossBody<'a> {
	fn new(run_id: &'a str, loss: &LossEntry) -> LossBody<'a> {
		LossBody {
			run_id,
			step: loss.step,
			split: loss.split,
			value: loss.value,
		}
	}
}

#[derive(Serialize)]
struct MetricBody<'a> {
	run_id: &'a str,
	step: u64,
	split: Split,
	metric_name: &'a str,
	value: f64,
}

impl<'a> MetricBody<'a> {
	fn new(run_id: &'a str, metric: &'a MetricEntry) -> MetricBody<'a> {
		MetricBody {
			run_id,
			step: metric.step,
			split: metric.split,
			metric_name: &metric.metric_name,
			value: metric.value,
		}
	}
}

fn status_error(operation: &'static str, status: StatusCode) -> Error {
	Error::Status {
		operation,
		status: status.as_u16(),
	}
}

/// Payloads are passed through as decoded, without further validation.
async fn decode<T>(operation: &'static str, response: reqwest::Response) -> Result<T, Error>
where
	T: DeserializeOwned,
{
	let bytes = response
		.bytes()
		.await
		.map_err(|source| Error::Request { operation, source })?;
	serde_json::from_slice(&bytes).map_err(|source| Error::Decode { operation, source })
}
