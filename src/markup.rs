//! Minimal markup tree: the renderer builds one of these per diagram, the
//! serializer materializes it to SVG text. The tree is the seam snapshot
//! tests hook into, so attribute order is preserved exactly as written.

use once_cell::sync::Lazy;
use std::collections::{HashMap, HashSet};

// Legacy attribute-name aliases, normalized during materialization.
static ATTR_ALIASES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("rowspan", "rowSpan"),
        ("colspan", "colSpan"),
        ("cellpadding", "cellPadding"),
        ("cellspacing", "cellSpacing"),
        ("tabindex", "tabIndex"),
        ("accesskey", "accessKey"),
        ("hidefocus", "hideFocus"),
        ("usemap", "useMap"),
        ("maxlength", "maxLength"),
        ("readonly", "readOnly"),
        ("contenteditable", "contentEditable"),
    ])
});

static EVENT_NAMES: Lazy<HashSet<String>> = Lazy::new(|| {
    "blur,change,click,dblclick,error,focus,keydown,keypress,keyup,load,mousedown,mouseenter,\
     mouseleave,mousemove,mouseout,mouseover,mouseup,resize,scroll,select,submit,unload"
        .split(',')
        .map(|name| format!("on{name}"))
        .collect()
});

#[derive(Debug, Clone, PartialEq)]
pub enum Child {
    Element(Node),
    Text(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub tag: String,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<Child>,
}

impl Node {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// A tagless wrapper: serializes its children only.
    pub fn fragment() -> Self {
        Self::new("")
    }

    pub fn attr(mut self, name: &str, value: impl ToString) -> Self {
        self.attrs.push((name.to_string(), value.to_string()));
        self
    }

    pub fn child(mut self, node: Node) -> Self {
        self.children.push(Child::Element(node));
        self
    }

    pub fn text(mut self, text: impl ToString) -> Self {
        self.children.push(Child::Text(text.to_string()));
        self
    }

    pub fn children(mut self, nodes: impl IntoIterator<Item = Node>) -> Self {
        self.children
            .extend(nodes.into_iter().map(Child::Element));
        self
    }

    pub fn push(&mut self, node: Node) {
        self.children.push(Child::Element(node));
    }

    /// Materialize the tree into SVG text. A node with an invalid tag is
    /// replaced in-band by a text marker carrying the error; siblings are
    /// unaffected.
    pub fn serialize(&self) -> String {
        let mut out = String::new();
        write_node(&mut out, self);
        out
    }
}

fn write_node(out: &mut String, node: &Node) {
    if node.tag.is_empty() {
        for child in &node.children {
            write_child(out, child);
        }
        return;
    }
    if !valid_tag(&node.tag) {
        out.push_str(&escape_xml(&format!(
            "[markup error: invalid tag {:?}]",
            node.tag
        )));
        return;
    }

    out.push('<');
    out.push_str(&node.tag);
    for (name, value) in &node.attrs {
        let name = normalize_attr(name);
        out.push(' ');
        out.push_str(&name);
        out.push_str("=\"");
        out.push_str(&escape_xml(value));
        out.push('"');
    }
    if node.children.is_empty() {
        out.push_str("/>");
        return;
    }
    out.push('>');
    for child in &node.children {
        write_child(out, child);
    }
    out.push_str("</");
    out.push_str(&node.tag);
    out.push('>');
}

fn write_child(out: &mut String, child: &Child) {
    match child {
        Child::Element(node) => write_node(out, node),
        Child::Text(text) => out.push_str(&escape_xml(text)),
    }
}

fn valid_tag(tag: &str) -> bool {
    let mut chars = tag.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, ':' | '-' | '_'))
}

fn normalize_attr(name: &str) -> String {
    let lower = name.to_ascii_lowercase();
    if let Some(alias) = ATTR_ALIASES.get(lower.as_str()) {
        return alias.to_string();
    }
    // Handler attributes keep their canonical lowercase form so a host
    // materializer can wire them; in text output they serialize as-is.
    if EVENT_NAMES.contains(&lower) {
        return lower;
    }
    name.to_string()
}

pub fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
