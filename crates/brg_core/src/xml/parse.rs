//! Parse XML text into an owned [`Element`] tree.

use super::element::Element;

/// Parse a document and return its root element.
///
/// Text and tail whitespace is kept as found so that re-indenting a
/// previously written document is a no-op. Element and attribute names
/// keep their prefixes, and each element keeps the namespace declarations
/// it introduces. Comments and processing instructions are dropped.
pub fn parse_document(xml: &str) -> Result<Element, String> {
    let options = roxmltree::ParsingOptions {
        allow_dtd: true,
        ..roxmltree::ParsingOptions::default()
    };
    let doc = roxmltree::Document::parse_with_options(xml, options)
        .map_err(|e| format!("XML parse error: {}", e))?;

    Ok(convert(doc.root_element()))
}

fn convert(node: roxmltree::Node) -> Element {
    let name = node.tag_name();
    let mut element = Element::new(qualified_name(node, name.namespace(), name.name(), false));
    // `xmlns=""` puts an element back in no namespace.
    element.namespace = name
        .namespace()
        .filter(|uri| !uri.is_empty())
        .map(str::to_string);
    element.attributes = declared_namespaces(node);
    element.attributes.extend(node.attributes().map(|a| {
        (
            qualified_name(node, a.namespace(), a.name(), true),
            a.value().to_string(),
        )
    }));

    for child in node.children() {
        if child.is_element() {
            element.children.push(convert(child));
        } else if child.is_text() {
            let text = child.text().unwrap_or_default();
            // Character data belongs to the preceding sibling's tail, or to
            // the parent's text when no element came before it.
            let slot = match element.children.last_mut() {
                Some(prev) => &mut prev.tail,
                None => &mut element.text,
            };
            slot.get_or_insert_with(String::new).push_str(text);
        }
    }

    element
}

/// `prefix:local` for a name in `namespace`, as bound on `node`.
///
/// Attributes never take the default namespace, so only a prefixed
/// binding will do for them.
fn qualified_name(
    node: roxmltree::Node,
    namespace: Option<&str>,
    local: &str,
    attribute: bool,
) -> String {
    let prefix = match namespace {
        None => None,
        Some(roxmltree::NS_XML_URI) => Some("xml"),
        Some(uri) => node
            .namespaces()
            .filter(|ns| ns.uri() == uri)
            .map(|ns| ns.name())
            .find(|prefix| !attribute || prefix.is_some())
            .flatten(),
    };
    match prefix {
        Some(prefix) => format!("{}:{}", prefix, local),
        None => local.to_string(),
    }
}

/// Namespace declarations made on `node` itself, as `xmlns` attributes.
fn declared_namespaces(node: roxmltree::Node) -> Vec<(String, String)> {
    let inherited: Vec<(Option<&str>, &str)> = node
        .parent_element()
        .map(|parent| parent.namespaces().map(|ns| (ns.name(), ns.uri())).collect())
        .unwrap_or_default();

    node.namespaces()
        .filter(|ns| !inherited.contains(&(ns.name(), ns.uri())))
        .map(|ns| {
            let attr = match ns.name() {
                Some(prefix) => format!("xmlns:{}", prefix),
                None => "xmlns".to_string(),
            };
            (attr, ns.uri().to_string())
        })
        .collect()
}
