use crate::ast::{Node, NodeKind};
use crate::context::AnchorRegistry;

/// Panics if the tree breaks a structural rule the parser guarantees.
pub fn check(root: &Node) {
    check_node(root, None, false);
}

fn check_node(node: &Node, enclosing_level: Option<usize>, inside_inline: bool) {
    if matches!(node.kind, NodeKind::Text(_) | NodeKind::Passthrough(_)) {
        assert!(
            node.children.is_empty(),
            "leaf node has children: {:?}",
            node.content()
        );
    }
    if inside_inline {
        assert!(
            node.kind.is_inline() || matches!(node.kind, NodeKind::Passthrough(_)),
            "block node {} inside inline content",
            node.tag()
        );
    }

    let mut level = enclosing_level;
    if node.kind == NodeKind::Section {
        let own: usize = node
            .attribute("level")
            .and_then(|level| level.parse().ok())
            .unwrap_or_else(|| panic!("section without numeric level: {:?}", node.attributes));
        if let Some(outer) = enclosing_level {
            assert!(
                own > outer,
                "section level {own} nested inside level {outer}"
            );
        }
        assert!(node.attribute("id").is_some(), "section without id");
        level = Some(own);
    }

    let inline = inside_inline || node.kind.is_inline();
    for child in &node.children {
        check_node(child, level, inline);
    }
}

/// Panics if any registered anchor does not resolve to a node in `root`.
pub fn check_anchors(root: &Node, anchors: &AnchorRegistry) {
    for id in anchors.ids() {
        assert!(
            anchors.resolve(root, id).is_some(),
            "anchor `{id}` points outside the tree: {:?}",
            anchors.get(id).map(|anchor| &anchor.path)
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(level: usize) -> Node {
        Node::new(NodeKind::Section)
            .with_attribute("level", level.to_string())
            .with_attribute("id", format!("s{level}"))
    }

    #[test]
    fn accepts_deeper_nesting() {
        check(&Node::document().with_child(section(1).with_child(section(2))));
    }

    #[test]
    #[should_panic(expected = "nested inside")]
    fn rejects_same_level_nesting() {
        check(&Node::document().with_child(section(2).with_child(section(2))));
    }

    #[test]
    #[should_panic(expected = "inside inline content")]
    fn rejects_block_in_inline() {
        let bold = Node::new(NodeKind::Bold).with_child(Node::new(NodeKind::Paragraph));
        check(&Node::document().with_child(Node::new(NodeKind::Paragraph).with_child(bold)));
    }
}
