/*!
The dashboard web app. Pages read models, runs, losses and metrics from the tracking API and render them as charts. Charts on the run and compare pages are live: the app keeps polling their data and serves the latest options at `/api/charts/{key}`.
*/

use self::common::error::Error;
use hyper::{Body, Method, Request, Response, StatusCode};
use std::{
	collections::{BTreeMap, HashMap},
	net::{IpAddr, SocketAddr},
	path::PathBuf,
	sync::Arc,
	time::Duration,
};
use traintrack_client::Client;
use traintrack_ui::{FileThemeStorage, MemoryThemeStorage, ThemeStorage, ThemeStore};
use traintrack_util::PollingManager;
use url::Url;

mod api;
pub mod common;
mod layouts;
pub mod live;
mod pages;

pub struct Options {
	pub host: IpAddr,
	pub port: u16,
	pub api_url: Url,
	pub poll_interval: Duration,
	pub live_chart_ttl: Duration,
	/// Where the theme is persisted. Without a file the theme only lasts as long as the process.
	pub theme_file: Option<PathBuf>,
}

pub struct Context {
	pub options: Options,
	pub client: Client,
	pub theme: ThemeStore,
	pub polling: PollingManager,
	pub live_charts: tokio::sync::Mutex<HashMap<String, live::LiveChart>>,
}

impl Context {
	pub fn new(options: Options, theme: ThemeStore) -> Context {
		let client = Client::new(options.api_url.clone());
		let polling = PollingManager::new(options.poll_interval);
		Context {
			options,
			client,
			theme,
			polling,
			live_charts: tokio::sync::Mutex::new(HashMap::new()),
		}
	}
}

#[allow(clippy::cognitive_complexity)]
pub async fn handle(context: Arc<Context>, request: Request<Body>) -> Response<Body> {
	let method = request.method().clone();
	let uri = request.uri().clone();
	let path = uri.path();
	let query = uri.query();
	let path_components: Vec<_> = path.split('/').skip(1).collect();
	let search_params: Option<BTreeMap<String, String>> = query.map(|search_params| {
		url::form_urlencoded::parse(search_params.as_bytes())
			.into_owned()
			.collect()
	});
	let result = match (&method, path_components.as_slice()) {
		(&Method::GET, &["health"]) => self::api::health::get(&context, request).await,
		(&Method::GET, &["api", "charts", chart_key]) => {
			self::api::charts::get(&context, request, chart_key).await
		}
		(&Method::POST, &["theme"]) => self::pages::theme::post(&context, request).await,
		(&Method::GET, &[""]) => self::pages::index::get(&context, request).await,
		(&Method::GET, &["models", model_id]) => {
			self::pages::model::get(&context, request, model_id).await
		}
		(&Method::GET, &["runs", run_id]) => {
			self::pages::run::get(&context, request, run_id, search_params).await
		}
		(&Method::GET, &["runs", run_id, "hyperparameters"]) => {
			self::pages::hyperparameters::get(&context, request, run_id, search_params).await
		}
		(&Method::POST, &["runs", run_id, "hyperparameters"]) => {
			self::pages::hyperparameters::post(&context, request, run_id, search_params).await
		}
		(&Method::GET, &["compare"]) => self::pages::compare::get(&context, request).await,
		_ => Err(Error::NotFound.into()),
	};
	match result {
		Ok(response) => response,
		Err(error) => error_response(&context, error),
	}
}

fn error_response(context: &Context, error: anyhow::Error) -> Response<Body> {
	let (status, body) = if let Some(error) = error.downcast_ref::<Error>() {
		match error {
			Error::BadRequest => (StatusCode::BAD_REQUEST, "bad request".to_owned()),
			Error::NotFound => (StatusCode::NOT_FOUND, "not found".to_owned()),
		}
	} else if let Some(error) = error.downcast_ref::<traintrack_client::Error>() {
		tracing::warn!(%error, "the tracking api request failed");
		(
			StatusCode::BAD_GATEWAY,
			self::pages::error::render(context, error),
		)
	} else {
		tracing::error!(%error, "failed to handle the request");
		(
			StatusCode::INTERNAL_SERVER_ERROR,
			"internal server error".to_owned(),
		)
	};
	let mut response = Response::new(Body::from(body));
	*response.status_mut() = status;
	response
}

pub fn run(options: Options) -> anyhow::Result<()> {
	tokio::runtime::Builder::new_multi_thread()
		.enable_all()
		.build()?
		.block_on(run_impl(options))
}

async fn run_impl(options: Options) -> anyhow::Result<()> {
	let storage: Box<dyn ThemeStorage> = match &options.theme_file {
		Some(path) => Box::new(FileThemeStorage::new(path)),
		None => Box::new(MemoryThemeStorage::default()),
	};
	let theme = ThemeStore::load(storage);
	tracing::info!(api_url = %options.api_url, theme = %theme.get(), "starting the dashboard");
	let addr = SocketAddr::new(options.host, options.port);
	let context = Arc::new(Context::new(options, theme));
	live::start_reaper(&context);
	traintrack_util::serve::serve(addr, context.clone(), handle, shutdown_signal()).await?;
	context.polling.stop_all();
	Ok(())
}

async fn shutdown_signal() {
	if let Err(error) = tokio::signal::ctrl_c().await {
		tracing::error!(%error, "failed to listen for ctrl-c");
		futures::future::pending::<()>().await;
	}
	tracing::info!("shutting down");
}

#[cfg(test)]
pub(crate) mod test {
	use super::*;
	use traintrack_charts::Theme;

	pub fn context(api_url: &str) -> Arc<Context> {
		let options = Options {
			host: IpAddr::from([127, 0, 0, 1]),
			port: 0,
			api_url: Url::parse(api_url).unwrap(),
			poll_interval: Duration::from_secs(3),
			live_chart_ttl: Duration::from_secs(30),
			theme_file: None,
		};
		let theme = ThemeStore::load(Box::new(MemoryThemeStorage::default()));
		Arc::new(Context::new(options, theme))
	}

	/// Serve canned tracking api responses on a local port and return its address.
	pub async fn stub_api(
		respond: impl Fn(&str) -> (u16, String) + Send + Sync + 'static,
	) -> String {
		use hyper::service::{make_service_fn, service_fn};
		use std::convert::Infallible;
		let respond = Arc::new(respond);
		let make_service = make_service_fn(move |_| {
			let respond = respond.clone();
			async move {
				Ok::<_, Infallible>(service_fn(move |request: Request<Body>| {
					let (status, body) = respond(&request.uri().to_string());
					let mut response = Response::new(Body::from(body));
					*response.status_mut() = StatusCode::from_u16(status).unwrap();
					response.headers_mut().insert(
						hyper::header::CONTENT_TYPE,
						hyper::header::HeaderValue::from_static("application/json"),
					);
					async move { Ok::<_, Infallible>(response) }
				}))
			}
		});
		let server = hyper::Server::bind(&([127, 0, 0, 1], 0).into()).serve(make_service);
		let addr = server.local_addr();
		tokio::spawn(server);
		format!("http://{}/", addr)
	}

	pub async fn body_string(response: Response<Body>) -> String {
		let bytes = hyper::body::to_bytes(response.into_body()).await.unwrap();
		String::from_utf8(bytes.to_vec()).unwrap()
	}

	fn request(method: Method, uri: &str) -> Request<Body> {
		Request::builder()
			.method(method)
			.uri(uri)
			.body(Body::empty())
			.unwrap()
	}

	// Port 9 is discard, nothing answers there.
	const UNREACHABLE_API: &str = "http://127.0.0.1:9";

	#[tokio::test]
	async fn test_health() {
		let context = context(UNREACHABLE_API);
		let response = handle(context, request(Method::GET, "/health")).await;
		assert_eq!(response.status(), StatusCode::OK);
	}

	#[tokio::test]
	async fn test_unknown_route() {
		let context = context(UNREACHABLE_API);
		let response = handle(context, request(Method::GET, "/nope/nope")).await;
		assert_eq!(response.status(), StatusCode::NOT_FOUND);
	}

	#[tokio::test]
	async fn test_run_page_requires_model_id() {
		let context = context(UNREACHABLE_API);
		let response = handle(context, request(Method::GET, "/runs/r1")).await;
		assert_eq!(response.status(), StatusCode::BAD_REQUEST);
	}

	#[tokio::test]
	async fn test_api_failure_renders_callout() {
		let context = context(UNREACHABLE_API);
		let response = handle(context, request(Method::GET, "/")).await;
		assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
		let body = body_string(response).await;
		assert!(body.contains("callout-wrapper-danger"));
		assert!(body.contains("Failed to fetch models"));
	}

	#[tokio::test]
	async fn test_theme_toggle_redirects_back() {
		let context = context(UNREACHABLE_API);
		let request = Request::builder()
			.method(Method::POST)
			.uri("/theme")
			.header(hyper::header::REFERER, "/models/m1")
			.body(Body::empty())
			.unwrap();
		let response = handle(context.clone(), request).await;
		assert_eq!(response.status(), StatusCode::SEE_OTHER);
		assert_eq!(
			response.headers()[hyper::header::LOCATION],
			"/models/m1"
		);
		assert_eq!(context.theme.get(), Theme::Light);
		let response = handle(context.clone(), request_without_referer()).await;
		assert_eq!(response.headers()[hyper::header::LOCATION], "/");
		assert_eq!(context.theme.get(), Theme::Dark);
	}

	fn request_without_referer() -> Request<Body> {
		request(Method::POST, "/theme")
	}

	#[tokio::test]
	async fn test_unknown_live_chart() {
		let context = context(UNREACHABLE_API);
		let response = handle(context, request(Method::GET, "/api/charts/0123456789abcdef")).await;
		assert_eq!(response.status(), StatusCode::NOT_FOUND);
	}
}
