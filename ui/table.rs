use html::{component, html};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextAlign {
	Left,
	Center,
	Right,
}

#[component]
pub fn Table() {
	html! {
		<div class="table-wrapper">
			<table class="table">
				{children}
			</table>
		</div>
	}
}

#[component]
pub fn TableHeader() {
	html! {
		<thead class="table-header">
			{children}
		</thead>
	}
}

#[component]
pub fn TableBody() {
	html! { <tbody>{children}</tbody> }
}

#[component]
pub fn TableRow() {
	html! { <tr>{children}</tr> }
}

#[component]
pub fn TableHeaderCell(text_align: Option<TextAlign>) {
	let text_align_class = match text_align.unwrap_or(TextAlign::Left) {
		TextAlign::Left => "table-align-left",
		TextAlign::Right => "table-align-right",
		TextAlign::Center => "table-align-center",
	};
	html! {
		<th class={format!("table-header-cell {}", text_align_class)}>
			{children}
		</th>
	}
}

#[component]
pub fn TableCell() {
	html! {
		<td class="table-cell">
			{children}
		</td>
	}
}

#[test]
fn test_table() {
	let node = html! {
		<Table>
			<TableHeader>
				<TableRow>
					<TableHeaderCell text_align={Some(TextAlign::Right)}>{"Runs"}</TableHeaderCell>
				</TableRow>
			</TableHeader>
			<TableBody>
				<TableRow>
					<TableCell>{"3"}</TableCell>
				</TableRow>
			</TableBody>
		</Table>
	};
	insta::assert_snapshot!(node.render_to_string(), @r###"<div class="table-wrapper"><table class="table"><thead class="table-header"><tr><th class="table-header-cell table-align-right">Runs</th></tr></thead><tbody><tr><td class="table-cell">3</td></tr></tbody></table></div>"###);
}
