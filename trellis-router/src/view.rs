//! Minimal view tree handed between components and outlets.
//!
//! DOM materialization lives in the component system; the router only needs
//! a value it can store in an outlet and render for inspection.

use std::borrow::Cow;

/// A renderable node produced by a component.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum View {
    /// A DOM element.
    Element(ElementView),
    /// A text node.
    Text(Cow<'static, str>),
    /// Multiple views without a wrapper element.
    Fragment(Vec<View>),
    /// Renders nothing.
    #[default]
    Empty,
}

/// An element with attributes and children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementView {
    tag: Cow<'static, str>,
    attrs: Vec<(Cow<'static, str>, Cow<'static, str>)>,
    children: Vec<View>,
}

impl ElementView {
    /// Creates a new element view.
    pub fn new(tag: impl Into<Cow<'static, str>>) -> Self {
        Self {
            tag: tag.into(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Adds an attribute.
    pub fn attr(
        mut self,
        name: impl Into<Cow<'static, str>>,
        value: impl Into<Cow<'static, str>>,
    ) -> Self {
        self.attrs.push((name.into(), value.into()));
        self
    }

    /// Appends a child view.
    pub fn child(mut self, child: impl Into<View>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Returns the tag name.
    pub fn tag_name(&self) -> &str {
        &self.tag
    }

    /// Looks up an attribute value.
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_ref())
    }

    /// Returns the child views.
    pub fn children(&self) -> &[View] {
        &self.children
    }
}

impl View {
    /// Creates a text view.
    pub fn text(text: impl Into<Cow<'static, str>>) -> Self {
        Self::Text(text.into())
    }

    /// Returns true when the view renders nothing.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Renders the view to an HTML string.
    pub fn render_to_string(&self) -> String {
        let mut output = String::new();
        self.render_into(&mut output);
        output
    }

    fn render_into(&self, output: &mut String) {
        match self {
            View::Element(el) => {
                output.push('<');
                output.push_str(&el.tag);
                for (name, value) in &el.attrs {
                    output.push(' ');
                    output.push_str(name);
                    output.push_str("=\"");
                    output.push_str(&html_escape(value));
                    output.push('"');
                }
                output.push('>');
                for child in &el.children {
                    child.render_into(output);
                }
                output.push_str("</");
                output.push_str(&el.tag);
                output.push('>');
            }
            View::Text(text) => output.push_str(&html_escape(text)),
            View::Fragment(children) => {
                for child in children {
                    child.render_into(output);
                }
            }
            View::Empty => {}
        }
    }
}

impl From<ElementView> for View {
    fn from(el: ElementView) -> Self {
        View::Element(el)
    }
}

impl From<&'static str> for View {
    fn from(text: &'static str) -> Self {
        View::Text(Cow::Borrowed(text))
    }
}

impl From<String> for View {
    fn from(text: String) -> Self {
        View::Text(Cow::Owned(text))
    }
}

fn html_escape(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_element_with_attrs_and_children() {
        let view: View = ElementView::new("div")
            .attr("class", "page")
            .child("Hello")
            .into();
        assert_eq!(view.render_to_string(), "<div class=\"page\">Hello</div>");
    }

    #[test]
    fn test_render_escapes_text() {
        assert_eq!(View::text("<b>&</b>").render_to_string(), "&lt;b&gt;&amp;&lt;/b&gt;");
    }

    #[test]
    fn test_fragment_and_empty() {
        let view = View::Fragment(vec![View::text("a"), View::Empty, View::text("b")]);
        assert_eq!(view.render_to_string(), "ab");
        assert!(View::default().is_empty());
    }
}
