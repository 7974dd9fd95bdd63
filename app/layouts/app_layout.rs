use super::document::{Document, PageInfo};
use crate::Context;
use html::{component, html};
use traintrack_ui::{ActivePage, Navbar};

/// The page chrome shared by every page. Live pages reload on the poll interval.
#[component]
pub fn AppLayout<'a>(context: &'a Context, title: String, active: ActivePage, live: bool) {
	let theme = context.theme.get();
	let refresh = if live {
		Some(context.polling.interval())
	} else {
		None
	};
	let page_info = PageInfo {
		title,
		theme,
		refresh,
	};
	html! {
		<Document page_info={page_info}>
			<div class="app-layout">
				<Navbar active={active} theme={theme} />
				<main class="container">{children}</main>
			</div>
		</Document>
	}
}
