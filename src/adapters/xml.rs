use chrono::{DateTime, NaiveDate};
use roxmltree::{Document, Node, ParsingOptions};
use std::collections::BTreeMap;

use crate::errors::MalformedInputError;

// --- Document Loading ---

pub fn parse_document(xml: &str) -> Result<Document<'_>, MalformedInputError> {
    let mut options = ParsingOptions::default();
    options.allow_dtd = true;
    Ok(Document::parse_with_options(xml, options)?)
}

// --- Element Lookup ---

pub fn tag_is(node: Node, name: &str) -> bool {
    node.is_element() && node.tag_name().name().eq_ignore_ascii_case(name)
}

pub fn descendants_named<'a, 'input>(
    node: Node<'a, 'input>,
    name: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> + 'a {
    node.descendants().filter(move |n| tag_is(*n, name))
}

pub fn first_named<'a, 'input>(node: Node<'a, 'input>, name: &'a str) -> Option<Node<'a, 'input>> {
    descendants_named(node, name).next()
}

/// Elements matching the first tag in `names` that occurs at all
pub fn descendants_any<'a, 'input>(node: Node<'a, 'input>, names: &[&'a str]) -> Vec<Node<'a, 'input>> {
    names
        .iter()
        .map(|name| descendants_named(node, name).collect::<Vec<_>>())
        .find(|nodes| !nodes.is_empty())
        .unwrap_or_default()
}

// --- Attribute Access ---

/// First non-empty attribute among `names`, compared case-insensitively
pub fn attr(node: Node, names: &[&str]) -> Option<String> {
    names.iter().find_map(|name| {
        node.attributes()
            .find(|a| a.name().eq_ignore_ascii_case(name))
            .map(|a| a.value().trim())
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    })
}

pub fn attr_u32(node: Node, names: &[&str]) -> Option<u32> {
    attr(node, names).and_then(|v| v.parse().ok())
}

pub fn attributes_map(node: Node) -> BTreeMap<String, String> {
    node.attributes()
        .map(|a| (a.name().to_string(), a.value().to_string()))
        .collect()
}

pub fn is_truthy(value: Option<&str>) -> bool {
    matches!(
        value.map(|v| v.trim().to_ascii_lowercase()).as_deref(),
        Some("1" | "true" | "yes" | "y")
    )
}

/// Period number of the closest enclosing `<period>`/`<quarter>`/`<half>` element
pub fn enclosing_period(node: Node) -> Option<u32> {
    node.ancestors()
        .skip(1)
        .find(|n| ["period", "quarter", "half"].iter().any(|t| tag_is(*n, t)))
        .and_then(|n| attr_u32(n, &["number", "period", "id"]))
}

// --- Value Parsing ---

pub fn parse_game_date(text: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.date_naive());
    }

    ["%m/%d/%Y", "%Y-%m-%d", "%Y%m%d", "%d.%m.%Y"]
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
}
