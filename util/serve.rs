use backtrace::Backtrace;
use futures::FutureExt;
use hyper::{Body, Request, Response, StatusCode};
use sha2::{Digest, Sha256};
use std::{cell::RefCell, convert::Infallible, future::Future, panic::AssertUnwindSafe, sync::Arc};

/// Serve `request_handler` until `shutdown` resolves. A panicking handler is answered with a 500 whose body holds the panic message and backtrace.
pub async fn serve<C, H, F>(
	addr: std::net::SocketAddr,
	request_handler_context: Arc<C>,
	request_handler: H,
	shutdown: impl Future<Output = ()>,
) -> hyper::Result<()>
where
	C: Send + Sync + 'static,
	H: Fn(Arc<C>, Request<Body>) -> F + Send + Sync + 'static,
	F: Future<Output = Response<Body>> + Send,
{
	// Create a task local that will store the panic message and backtrace if a panic occurs.
	tokio::task_local! {
		static PANIC_MESSAGE_AND_BACKTRACE: RefCell<Option<(String, Backtrace)>>;
	}
	async fn service<C, H, F>(
		request_handler: Arc<H>,
		request_handler_context: Arc<C>,
		request: Request<Body>,
	) -> Result<Response<Body>, Infallible>
	where
		C: Send + Sync + 'static,
		H: Fn(Arc<C>, Request<Body>) -> F + Send + Sync + 'static,
		F: Future<Output = Response<Body>> + Send,
	{
		let method = request.method().clone();
		let path = request.uri().path().to_owned();
		let result = AssertUnwindSafe(request_handler(request_handler_context, request))
			.catch_unwind()
			.await;
		let response = match result {
			Ok(response) => response,
			Err(_) => {
				let body = PANIC_MESSAGE_AND_BACKTRACE
					.try_with(|panic_message_and_backtrace| {
						panic_message_and_backtrace
							.borrow()
							.as_ref()
							.map(|(message, backtrace)| format!("{}\n{:?}", message, backtrace))
					})
					.ok()
					.flatten()
					.unwrap_or_else(|| "internal server error".to_owned());
				tracing::error!("{}", body);
				let mut response = Response::new(Body::from(body));
				*response.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
				response
			}
		};
		tracing::info!("{} {} {}", method, path, response.status().as_u16());
		Ok(response)
	}
	// Install a panic hook that will record the panic message and backtrace if a panic occurs inside a request. Panics anywhere else go to the previous hook.
	let previous_hook = Arc::new(std::panic::take_hook());
	let hook = previous_hook.clone();
	std::panic::set_hook(Box::new(move |panic_info| {
		let recorded = PANIC_MESSAGE_AND_BACKTRACE.try_with(|panic_message_and_backtrace| {
			let value = (panic_info.to_string(), Backtrace::new());
			panic_message_and_backtrace.borrow_mut().replace(value);
		});
		if recorded.is_err() {
			hook(panic_info);
		}
	}));
	let request_handler = Arc::new(request_handler);
	let service = hyper::service::make_service_fn(|_| {
		let request_handler = request_handler.clone();
		let request_handler_context = request_handler_context.clone();
		async move {
			Ok::<_, Infallible>(hyper::service::service_fn(move |request| {
				let request_handler = request_handler.clone();
				let request_handler_context = request_handler_context.clone();
				PANIC_MESSAGE_AND_BACKTRACE.scope(RefCell::new(None), async move {
					service(request_handler, request_handler_context, request).await
				})
			}))
		}
	});
	let server = hyper::Server::try_bind(&addr)?;
	tracing::info!("serving on {}", addr);
	let result = server
		.serve(service)
		.with_graceful_shutdown(shutdown)
		.await;
	std::panic::set_hook(Box::new(move |panic_info| previous_hook(panic_info)));
	result
}

/// A short, stable identifier for `s`.
pub fn hash(s: &str) -> String {
	let mut hash = Sha256::new();
	hash.update(s);
	let hash = hex::encode(hash.finalize());
	hash[0..16].to_owned()
}
