//! Owned element tree.
//!
//! Text layout follows the element-tree model: `text` is the character data
//! between the start tag and the first child, `tail` is the character data
//! after the end tag and before the next sibling.
//!
//! `tag` and attribute names are stored qualified (`xsi:schemaLocation`),
//! and namespace declarations are kept as `xmlns` attributes, so a parsed
//! tree writes back out with its prefixes intact. Lookups by tag only
//! match elements in no namespace.

/// An XML element that owns its children.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Element {
    pub tag: String,
    /// Namespace URI of the element, `None` when it is in no namespace.
    pub namespace: Option<String>,
    pub attributes: Vec<(String, String)>,
    pub text: Option<String>,
    pub tail: Option<String>,
    pub children: Vec<Element>,
}

impl Element {
    /// Create an empty element.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    /// Set the text content (builder pattern).
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Add an attribute (builder pattern).
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    /// Add a child (builder pattern).
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    /// Append a child, returning a mutable reference to it.
    pub fn append_child(&mut self, child: Element) -> &mut Element {
        self.children.push(child);
        let last = self.children.len() - 1;
        &mut self.children[last]
    }

    /// Whether this element is `tag` in no namespace.
    ///
    /// `<ext:Block>` and `<Block xmlns="urn:x">` are both distinct from a
    /// plain `<Block>`.
    pub fn is_named(&self, tag: &str) -> bool {
        self.namespace.is_none() && self.tag == tag
    }

    /// First direct child with the given tag.
    pub fn find_child(&self, tag: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.is_named(tag))
    }

    /// First direct child with the given tag, mutably.
    pub fn find_child_mut(&mut self, tag: &str) -> Option<&mut Element> {
        self.children.iter_mut().find(|c| c.is_named(tag))
    }

    /// Direct children with the given tag, in document order.
    pub fn children_named<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |c| c.is_named(tag))
    }

    /// Remove every direct child with the given tag.
    ///
    /// Other children keep their relative order. Returns the number removed.
    pub fn remove_children_matching(&mut self, tag: &str) -> usize {
        let before = self.children.len();
        self.children.retain(|c| !c.is_named(tag));
        before - self.children.len()
    }

    /// Text content of the first direct child with the given tag.
    pub fn child_text(&self, tag: &str) -> Option<&str> {
        self.find_child(tag).and_then(|c| c.text.as_deref())
    }

    /// Whether this element has any children.
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Element {
        Element::new("blocks")
            .with_child(Element::new("Block").with_text("a"))
            .with_child(Element::new("marker"))
            .with_child(Element::new("Block").with_text("b"))
    }

    #[test]
    fn find_child_returns_first_match() {
        let root = sample();
        assert_eq!(root.child_text("Block"), Some("a"));
        assert!(root.find_child("missing").is_none());
    }

    #[test]
    fn remove_children_keeps_siblings_in_order() {
        let mut root = sample();
        assert_eq!(root.remove_children_matching("Block"), 2);
        assert_eq!(root.children.len(), 1);
        assert_eq!(root.children[0].tag, "marker");
        assert_eq!(root.remove_children_matching("Block"), 0);
    }

    #[test]
    fn namespaced_children_do_not_match_plain_names() {
        let mut root = sample();
        let mut prefixed = Element::new("ext:Block").with_attribute("xmlns:ext", "urn:ext");
        prefixed.namespace = Some("urn:ext".to_string());
        let mut defaulted = Element::new("Block");
        defaulted.namespace = Some("urn:other".to_string());
        root.append_child(prefixed);
        root.append_child(defaulted);

        assert_eq!(root.children_named("Block").count(), 2);
        assert_eq!(root.remove_children_matching("Block"), 2);
        let left: Vec<&str> = root.children.iter().map(|c| c.tag.as_str()).collect();
        assert_eq!(left, ["marker", "ext:Block", "Block"]);
        assert!(!root.children[2].is_named("Block"));
    }

    #[test]
    fn append_child_returns_new_child() {
        let mut root = Element::new("ProjectData");
        root.append_child(Element::new("blocks"))
            .append_child(Element::new("Block"));
        assert_eq!(root.find_child("blocks").unwrap().children_named("Block").count(), 1);
    }
}
