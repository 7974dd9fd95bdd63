use derive_more::From;
use std::borrow::Cow;
use std::fmt::Write;

pub use html_macro::{component, html};

// `html!` expands to paths under `::html`, which this lets the crate's own tests use.
extern crate self as html;

#[derive(Clone, Debug, From)]
pub enum Node {
	RawText(RawTextNode),
	EscapedText(EscapedTextNode),
	Fragment(FragmentNode),
	Host(HostNode),
	#[from(ignore)]
	Option(Option<Box<Node>>),
	#[from(ignore)]
	Vec(Vec<Node>),
}

#[derive(Clone, Debug)]
pub struct RawTextNode(pub Cow<'static, str>);

#[derive(Clone, Debug)]
pub struct EscapedTextNode(pub Cow<'static, str>);

#[derive(Clone, Debug, Default)]
pub struct FragmentNode {
	pub children: Vec<Node>,
}

#[derive(Clone, Debug)]
pub struct HostNode {
	pub name: &'static str,
	pub attributes: Vec<(AttributeKey, AttributeValue)>,
	pub children: Vec<Node>,
	pub self_closing: bool,
}

pub type AttributeKey = &'static str;

/// An absent value, or `false`, leaves the attribute out.
#[derive(Clone, Debug, From)]
pub enum AttributeValue {
	Bool(Option<bool>),
	String(Option<Cow<'static, str>>),
}

/// A reusable piece of markup. `#[component]` turns a function into one, and `html!` renders it in place with its children.
pub trait Component {
	fn render(self, children: Vec<Node>) -> Node;
}

impl Node {
	pub fn render_to_string(&self) -> String {
		self.to_string()
	}
}

/// Render a full page, prefixed with the html5 doctype.
pub fn document(root: impl Into<Node>) -> String {
	format!("<!doctype html>{}", root.into())
}

impl std::fmt::Display for Node {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Node::RawText(node) => {
				write!(f, "{}", node)?;
			}
			Node::EscapedText(node) => {
				write!(f, "{}", node)?;
			}
			Node::Fragment(node) => {
				write!(f, "{}", node)?;
			}
			Node::Host(node) => {
				write!(f, "{}", node)?;
			}
			Node::Option(node) => {
				if let Some(node) = node {
					write!(f, "{}", node)?;
				}
			}
			Node::Vec(node) => {
				for node in node {
					write!(f, "{}", node)?;
				}
			}
		};
		Ok(())
	}
}

impl std::fmt::Display for FragmentNode {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		for child in self.children.iter() {
			write!(f, "{}", child)?;
		}
		Ok(())
	}
}

impl std::fmt::Display for HostNode {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "<{}", self.name)?;
		for (key, value) in self.attributes.iter() {
			match value {
				AttributeValue::Bool(value) => {
					if let Some(true) = value {
						write!(f, " {}", key)?;
					}
				}
				AttributeValue::String(value) => {
					if let Some(value) = value {
						write!(f, " {}=\"", key)?;
						escape(f, value)?;
						f.write_char('"')?;
					}
				}
			}
		}
		if self.self_closing {
			write!(f, " /")?;
		}
		write!(f, ">")?;
		if !self.self_closing {
			for child in self.children.iter() {
				write!(f, "{}", child)?;
			}
			write!(f, "</{}>", self.name)?;
		}
		Ok(())
	}
}

impl std::fmt::Display for RawTextNode {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.0)
	}
}

impl std::fmt::Display for EscapedTextNode {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		escape(f, &self.0)
	}
}

fn escape(f: &mut std::fmt::Formatter<'_>, value: &str) -> std::fmt::Result {
	for c in value.chars() {
		match c {
			'>' => write!(f, "&gt;")?,
			'<' => write!(f, "&lt;")?,
			'"' => write!(f, "&quot;")?,
			'&' => write!(f, "&amp;")?,
			'\'' => write!(f, "&apos;")?,
			c => f.write_char(c)?,
		};
	}
	Ok(())
}

impl From<bool> for AttributeValue {
	fn from(value: bool) -> AttributeValue {
		AttributeValue::Bool(Some(value))
	}
}

impl From<Option<String>> for AttributeValue {
	fn from(value: Option<String>) -> AttributeValue {
		AttributeValue::String(value.map(|value| value.into()))
	}
}

impl From<Option<&'static str>> for AttributeValue {
	fn from(value: Option<&'static str>) -> AttributeValue {
		AttributeValue::String(value.map(|value| value.into()))
	}
}

impl From<Cow<'static, str>> for AttributeValue {
	fn from(value: Cow<'static, str>) -> AttributeValue {
		AttributeValue::String(Some(value))
	}
}

impl From<String> for AttributeValue {
	fn from(value: String) -> AttributeValue {
		AttributeValue::String(Some(value.into()))
	}
}

impl From<&'static str> for AttributeValue {
	fn from(value: &'static str) -> AttributeValue {
		AttributeValue::String(Some(value.into()))
	}
}

impl From<String> for Node {
	fn from(value: String) -> Node {
		Node::EscapedText(EscapedTextNode(value.into()))
	}
}

impl From<&'static str> for Node {
	fn from(value: &'static str) -> Node {
		Node::EscapedText(EscapedTextNode(value.into()))
	}
}

impl<T> From<Option<T>> for Node
where
	T: Into<Node>,
{
	fn from(value: Option<T>) -> Node {
		Node::Option(value.map(|value| Box::new(value.into())))
	}
}

impl<T> From<Vec<T>> for Node
where
	T: Into<Node>,
{
	fn from(value: Vec<T>) -> Node {
		Node::Vec(value.into_iter().map(Into::into).collect())
	}
}

#[macro_export]
macro_rules! raw {
	($t:expr) => {
		::html::RawTextNode($t.into())
	};
}

#[cfg(test)]
mod test {
	use super::*;

	#[component]
	fn Badge(label: String) {
		html! {
			<span class="badge" title={label.clone()}>
				{label}
				{children}
			</span>
		}
	}

	#[test]
	fn test_escapes_text_and_attributes() {
		let node = html! {
			<div title="a \"quoted\" <title>">{"fish & chips"}</div>
		};
		insta::assert_snapshot!(node.render_to_string(), @r###"<div title="a &quot;quoted&quot; &lt;title&gt;">fish &amp; chips</div>"###);
	}

	#[test]
	fn test_self_closing_and_bool_attributes() {
		let checked = true;
		let node = html! {
			<form>
				<input name="show_min" checked disabled={false} data-step={None::<String>} />
			</form>
		};
		insta::assert_snapshot!(node.render_to_string(), @r###"<form><input name="show_min" checked /></form>"###);
	}

	#[test]
	fn test_optional_children_and_raw_text() {
		let missing: Option<&'static str> = None;
		let node = html! {
			<p>{missing}{Some("present")}{raw!("&nbsp;")}{vec!["a", "b"]}</p>
		};
		assert_eq!(node.render_to_string(), "<p>present&nbsp;ab</p>");
	}

	#[test]
	fn test_component_children() {
		let node = html! {
			<>
				<Badge label="<new>">{"!"}</Badge>
			</>
		};
		assert_eq!(
			node.render_to_string(),
			r#"<span class="badge" title="&lt;new&gt;">&lt;new&gt;!</span>"#
		);
	}

	#[test]
	fn test_document_doctype() {
		assert_eq!(
			document(html! { <html lang="en"></html> }),
			"<!doctype html><html lang=\"en\"></html>"
		);
	}
}
