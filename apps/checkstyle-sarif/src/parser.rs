//! Checkstyle XML report parser.
//!
//! Parsing happens in two steps:
//! - Tokenize with `quick-xml` and build a small attributed element tree.
//!   Element names listed in `PLURAL_ELEMENTS` are always stored as
//!   sequences, so a lone `<file>` or `<error>` is read the same way as many.
//! - Map the tree onto `CheckstyleReport`, defaulting missing or malformed
//!   attributes per field instead of failing the whole report.
//!
//! Only elements enter the tree. Text, comments, CDATA and processing
//! instructions are dropped while tokenizing, so the field mapping never sees
//! anything but attribute-bearing elements.

use crate::error::ParseError;
use crate::models::{CheckstyleError, CheckstyleFile, CheckstyleReport, Severity};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use tracing::debug;

const ROOT_ELEMENT: &str = "checkstyle";

/// Element names that are collected as sequences even when they occur once.
const PLURAL_ELEMENTS: &[&str] = &["file", "error"];

/// Parse a Checkstyle XML document into the intermediate report model.
///
/// Fails on empty input, on XML that is not well-formed, and on documents
/// whose root element is not `<checkstyle>`.
pub fn parse(xml: &str) -> Result<CheckstyleReport, ParseError> {
    if xml.trim().is_empty() {
        return Err(ParseError::Empty);
    }
    let root = build_tree(xml)?.ok_or(ParseError::MissingRoot)?;
    if root.name != ROOT_ELEMENT {
        return Err(ParseError::MissingRoot);
    }

    let report = CheckstyleReport {
        version: root.attr("version").map(str::to_string),
        file: root.elements("file").iter().map(to_file).collect(),
    };
    debug!(
        files = report.file.len(),
        errors = report.file.iter().map(|f| f.error.len()).sum::<usize>(),
        version = report.version.as_deref().unwrap_or("-"),
        "parsed checkstyle report"
    );
    Ok(report)
}

fn to_file(el: &Element) -> CheckstyleFile {
    CheckstyleFile {
        name: el.attr("name").unwrap_or_default().to_string(),
        error: el.elements("error").iter().map(to_error).collect(),
    }
}

fn to_error(el: &Element) -> CheckstyleError {
    CheckstyleError {
        line: parse_number(el.attr("line"))
            .filter(|n| *n > 0)
            .unwrap_or(1),
        column: parse_number(el.attr("column")),
        severity: Severity::normalize(el.attr("severity")),
        message: el.attr("message").unwrap_or_default().to_string(),
        source: el.attr("source").unwrap_or_default().to_string(),
    }
}

/// Base-10 parse of an attribute; `None` when absent, not a number, or negative.
///
/// Decimals keep their integer part; values past `u32::MAX` saturate.
fn parse_number(raw: Option<&str>) -> Option<u32> {
    let n = raw?.trim().parse::<f64>().ok()?;
    if !n.is_finite() || n < 0.0 {
        return None;
    }
    Some(n.trunc() as u32)
}

#[derive(Debug)]
/// Children sharing one element name.
enum Node {
    One(Element),
    Many(Vec<Element>),
}

#[derive(Debug)]
struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    children: BTreeMap<String, Node>,
}

impl Element {
    fn from_start(start: &BytesStart<'_>, reader: &Reader<&[u8]>) -> Result<Self, ParseError> {
        let name = String::from_utf8_lossy(start.name().as_ref()).to_string();
        let mut attributes = Vec::new();
        for attr in start.attributes() {
            let attr = attr?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).to_string();
            let value = attr.decode_and_unescape_value(reader.decoder())?;
            attributes.push((key, value.into_owned()));
        }
        Ok(Self {
            name,
            attributes,
            children: BTreeMap::new(),
        })
    }

    fn attr(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Child elements named `name`, in document order.
    fn elements(&self, name: &str) -> &[Element] {
        match self.children.get(name) {
            Some(Node::Many(items)) => items,
            Some(Node::One(item)) => std::slice::from_ref(item),
            None => &[],
        }
    }

    fn push_child(&mut self, child: Element) {
        let plural = PLURAL_ELEMENTS.contains(&child.name.as_str());
        match self.children.entry(child.name.clone()) {
            Entry::Vacant(slot) => {
                slot.insert(if plural {
                    Node::Many(vec![child])
                } else {
                    Node::One(child)
                });
            }
            Entry::Occupied(mut slot) => {
                let node = slot.get_mut();
                match node {
                    Node::Many(items) => items.push(child),
                    Node::One(_) => {
                        if let Node::One(first) = std::mem::replace(node, Node::Many(Vec::new())) {
                            *node = Node::Many(vec![first, child]);
                        }
                    }
                }
            }
        }
    }
}

/// Tokenize `xml` and return its root element, if the document has one.
fn build_tree(xml: &str) -> Result<Option<Element>, ParseError> {
    let xml = xml.strip_prefix('\u{feff}').unwrap_or(xml);
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                ensure_single_root(&root, &stack)?;
                stack.push(Element::from_start(&e, &reader)?);
            }
            Event::Empty(e) => {
                ensure_single_root(&root, &stack)?;
                let el = Element::from_start(&e, &reader)?;
                attach(el, &mut stack, &mut root);
            }
            Event::End(_) => {
                // quick-xml already rejects mismatched end tags
                if let Some(el) = stack.pop() {
                    attach(el, &mut stack, &mut root);
                }
            }
            Event::Text(t) if stack.is_empty() => {
                if !t.iter().all(u8::is_ascii_whitespace) {
                    return Err(ParseError::Malformed {
                        reason: "text content outside of the root element".into(),
                    });
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(ParseError::Malformed {
            reason: format!("unclosed element <{}>", open.name),
        });
    }
    Ok(root)
}

fn ensure_single_root(root: &Option<Element>, stack: &[Element]) -> Result<(), ParseError> {
    if stack.is_empty() && root.is_some() {
        return Err(ParseError::Malformed {
            reason: "content after the root element".into(),
        });
    }
    Ok(())
}

fn attach(el: Element, stack: &mut [Element], root: &mut Option<Element>) {
    match stack.last_mut() {
        Some(parent) => parent.push_child(el),
        None => *root = Some(el),
    }
}
