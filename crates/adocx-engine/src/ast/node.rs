use std::collections::BTreeMap;

use super::kind::NodeKind;

/// Doctype reported for documents that never set `:doctype:`.
pub const DEFAULT_DOCTYPE: &str = "article";

/// A node in the document tree.
///
/// Attributes hold everything that is not content: section `level`/`id`, link `href`,
/// image `src`/`alt`, list `style`, admonition `type` and so on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub kind: NodeKind,
    pub attributes: BTreeMap<String, String>,
    pub children: Vec<Node>,
}

impl Node {
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            attributes: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    pub fn document() -> Self {
        Self::new(NodeKind::Document)
    }

    pub fn text(content: impl Into<String>) -> Self {
        Self::new(NodeKind::Text(content.into()))
    }

    pub fn passthrough(content: impl Into<String>) -> Self {
        Self::new(NodeKind::Passthrough(content.into()))
    }

    pub fn block_macro(name: impl Into<String>) -> Self {
        Self::new(NodeKind::BlockMacro(name.into()))
    }

    pub fn inline_macro(name: impl Into<String>) -> Self {
        Self::new(NodeKind::InlineMacro(name.into()))
    }

    /// Builder-style attribute setter.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attribute(key, value);
        self
    }

    /// Builder-style child append.
    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = Node>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn add_child(&mut self, child: Node) {
        self.children.push(child);
    }

    pub fn set_attribute(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(key.into(), value.into());
    }

    /// Returns the attribute value, or `None` when it was never set.
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// Returns the attribute value, or `""` when it was never set.
    pub fn attribute_or_empty(&self, key: &str) -> &str {
        self.attribute(key).unwrap_or("")
    }

    /// Text content of `Text` and `Passthrough` nodes.
    pub fn content(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Text(content) | NodeKind::Passthrough(content) => Some(content),
            _ => None,
        }
    }

    /// Macro name of `BlockMacro` and `InlineMacro` nodes.
    pub fn macro_name(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::BlockMacro(name) | NodeKind::InlineMacro(name) => Some(name),
            _ => None,
        }
    }

    /// The document doctype, falling back to [`DEFAULT_DOCTYPE`].
    pub fn doctype(&self) -> &str {
        self.attribute("doctype").unwrap_or(DEFAULT_DOCTYPE)
    }

    /// Tag used by [`Node::find_by_tag`]: macro name for macros, kind name otherwise.
    pub fn tag(&self) -> &str {
        self.macro_name().unwrap_or_else(|| self.kind.name())
    }

    /// Depth-first, pre-order walk over this node and all its descendants.
    pub fn traverse<'a>(&'a self, visit: &mut impl FnMut(&'a Node)) {
        visit(self);
        for child in &self.children {
            child.traverse(visit);
        }
    }

    /// Collects every node (including `self`) whose [`tag`](Node::tag) equals `tag`.
    pub fn find_by_tag(&self, tag: &str) -> Vec<&Node> {
        let mut found = Vec::new();
        self.traverse(&mut |node| {
            if node.tag() == tag {
                found.push(node);
            }
        });
        found
    }

    /// Concatenated `Text`/`Passthrough` content of the subtree.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.traverse(&mut |node| {
            if let Some(content) = node.content() {
                out.push_str(content);
            }
        });
        out
    }

    /// Follows a child-index path from this node.
    pub fn descendant(&self, path: &[usize]) -> Option<&Node> {
        path.iter()
            .try_fold(self, |node, &index| node.children.get(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> Node {
        Node::document().with_child(
            Node::new(NodeKind::Section)
                .with_attribute("level", "1")
                .with_child(
                    Node::new(NodeKind::Paragraph)
                        .with_child(Node::text("Hello "))
                        .with_child(Node::new(NodeKind::Bold).with_child(Node::text("world"))),
                )
                .with_child(Node::block_macro("image").with_attribute("src", "x.png")),
        )
    }

    #[test]
    fn attribute_lookup() {
        let node = Node::new(NodeKind::Section).with_attribute("level", "2");
        assert_eq!(node.attribute("level"), Some("2"));
        assert_eq!(node.attribute("missing"), None);
        assert_eq!(node.attribute_or_empty("missing"), "");
    }

    #[test]
    fn doctype_defaults_to_article() {
        assert_eq!(Node::document().doctype(), "article");
        let book = Node::document().with_attribute("doctype", "book");
        assert_eq!(book.doctype(), "book");
    }

    #[test]
    fn traverse_is_preorder() {
        let mut tags = Vec::new();
        sample().traverse(&mut |n| tags.push(n.tag().to_string()));
        assert_eq!(
            tags,
            vec!["Document", "Section", "Paragraph", "Text", "Bold", "Text", "image"]
        );
    }

    #[test]
    fn find_by_tag_matches_macro_names_and_kinds() {
        let doc = sample();
        assert_eq!(doc.find_by_tag("image").len(), 1);
        assert_eq!(doc.find_by_tag("Text").len(), 2);
        assert!(doc.find_by_tag("BlockMacro").is_empty());
    }

    #[test]
    fn text_content_concatenates() {
        assert_eq!(sample().text_content(), "Hello world");
    }

    #[test]
    fn descendant_follows_path() {
        let doc = sample();
        let bold = doc.descendant(&[0, 0, 1]).unwrap();
        assert_eq!(bold.kind, NodeKind::Bold);
        assert!(doc.descendant(&[0, 5]).is_none());
        assert_eq!(doc.descendant(&[]).unwrap().kind, NodeKind::Document);
    }

    #[test]
    fn content_and_macro_name() {
        assert_eq!(Node::text("a").content(), Some("a"));
        assert_eq!(Node::passthrough("<b>").content(), Some("<b>"));
        assert_eq!(Node::inline_macro("kbd").macro_name(), Some("kbd"));
        assert_eq!(Node::new(NodeKind::Paragraph).content(), None);
    }
}
