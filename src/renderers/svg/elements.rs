//! SVG element tree
//!
//! A small owned scene graph: each node has a tag, ordered attributes, an
//! optional text body and children. The tree is what the renderer mutates;
//! it is serialized to markup only when mounted or exported.

use std::fmt::Write as _;

use quick_xml::escape::escape;

pub const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

#[derive(Clone, Debug, PartialEq)]
pub struct SvgNode {
    pub tag: String,
    attrs: Vec<(String, String)>,
    pub text: Option<String>,
    pub children: Vec<SvgNode>,
}

impl SvgNode {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: Vec::new(),
            text: None,
            children: Vec::new(),
        }
    }

    /// Builder-style attribute setter
    pub fn attr(mut self, name: &str, value: impl ToString) -> Self {
        self.set_attr(name, value);
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn child(mut self, node: SvgNode) -> Self {
        self.children.push(node);
        self
    }

    /// Set or overwrite an attribute, keeping its original position
    pub fn set_attr(&mut self, name: &str, value: impl ToString) {
        let value = value.to_string();
        match self.attrs.iter_mut().find(|(k, _)| k == name) {
            Some((_, v)) => *v = value,
            None => self.attrs.push((name.to_string(), value)),
        }
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn attrs(&self) -> &[(String, String)] {
        &self.attrs
    }

    /// True when the space-separated `class` attribute contains `class`
    pub fn has_class(&self, class: &str) -> bool {
        self.get_attr("class")
            .map(|c| c.split_whitespace().any(|c| c == class))
            .unwrap_or(false)
    }

    pub fn append(&mut self, node: SvgNode) -> &mut SvgNode {
        self.children.push(node);
        let last = self.children.len() - 1;
        &mut self.children[last]
    }

    /// Direct children carrying `class`
    pub fn children_with_class<'a>(&'a self, class: &'a str) -> impl Iterator<Item = &'a SvgNode> + 'a {
        self.children.iter().filter(move |c| c.has_class(class))
    }

    /// First direct child carrying `class`
    pub fn find_child_mut(&mut self, class: &str) -> Option<&mut SvgNode> {
        self.children.iter_mut().find(|c| c.has_class(class))
    }

    /// Remove direct children matching `pred`, returning how many went
    pub fn remove_children<F>(&mut self, mut pred: F) -> usize
    where
        F: FnMut(&SvgNode) -> bool,
    {
        let before = self.children.len();
        self.children.retain(|c| !pred(c));
        before - self.children.len()
    }

    pub fn to_markup(&self) -> String {
        let mut out = String::new();
        self.write_markup(&mut out);
        out
    }

    fn write_markup(&self, out: &mut String) {
        let _ = write!(out, "<{}", self.tag);
        for (name, value) in &self.attrs {
            let _ = write!(out, " {}=\"{}\"", name, escape(value.as_str()));
        }

        if self.text.is_none() && self.children.is_empty() {
            out.push_str("/>");
            return;
        }

        out.push('>');
        if let Some(text) = &self.text {
            out.push_str(&escape(text.as_str()));
        }
        for child in &self.children {
            child.write_markup(out);
        }
        let _ = write!(out, "</{}>", self.tag);
    }
}

/// Format a coordinate without trailing zeros (`450` not `450.0`)
pub fn fmt_num(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        let s = format!("{:.6}", value);
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

pub fn translate(x: f64, y: f64) -> String {
    format!("translate({},{})", fmt_num(x), fmt_num(y))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markup_escapes_text_and_attributes() {
        let node = SvgNode::new("text")
            .attr("data-author", "a\"b")
            .with_text("Tom & <Jerry>");
        assert_eq!(
            node.to_markup(),
            "<text data-author=\"a&quot;b\">Tom &amp; &lt;Jerry&gt;</text>"
        );
    }

    #[test]
    fn test_set_attr_overwrites_in_place() {
        let mut node = SvgNode::new("circle").attr("cx", 1).attr("cy", 2);
        node.set_attr("cx", 5);
        assert_eq!(node.get_attr("cx"), Some("5"));
        assert_eq!(node.attrs()[0].0, "cx");
    }

    #[test]
    fn test_has_class() {
        let node = SvgNode::new("g").attr("class", "x axis");
        assert!(node.has_class("x"));
        assert!(node.has_class("axis"));
        assert!(!node.has_class("y"));
    }

    #[test]
    fn test_fmt_num() {
        assert_eq!(fmt_num(450.0), "450");
        assert_eq!(fmt_num(3.5), "3.5");
        assert_eq!(fmt_num(-0.25), "-0.25");
        assert_eq!(fmt_num(1.0 / 3.0), "0.333333");
        assert_eq!(translate(40.0, 20.0), "translate(40,20)");
    }
}
