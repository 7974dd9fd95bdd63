use crate::{layouts::app_layout::AppLayout, Context};
use html::html;
use traintrack_ui::{ActivePage, Callout, Level};

/// The page shown when the tracking api could not be reached or answered with an error.
pub fn render(context: &Context, error: &traintrack_client::Error) -> String {
	let hint = format!(
		"Check that the API is running at {}.",
		context.options.api_url
	);
	html::document(html! {
		<AppLayout context={context} title="Error" active={ActivePage::Home} live={false}>
			<div class="page-error">
				<Callout
					level={Level::Danger}
					title={Some("The tracking API is unavailable".to_owned())}
				>
					{error.to_string()}
				</Callout>
				<p class="muted">{hint}</p>
			</div>
		</AppLayout>
	})
}
