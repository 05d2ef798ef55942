use std::collections::BTreeMap;

use crate::ast::Node;

/// Where an anchor was declared and the text a cross reference can show for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anchor {
    /// Child-index path from the document root to the declaring node.
    pub path: Vec<usize>,
    /// Section title or anchor label, empty when the declaration had none.
    pub text: String,
}

/// Id lookup for sections, block anchors and inline anchors.
///
/// Entries refer to nodes by path rather than by reference, so the registry can be
/// built while the tree is still being assembled.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnchorRegistry {
    anchors: BTreeMap<String, Anchor>,
}

impl AnchorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `id`. The first declaration of an id wins.
    pub fn register(&mut self, id: impl Into<String>, path: Vec<usize>, text: impl Into<String>) {
        let id = id.into();
        if self.anchors.contains_key(&id) {
            log::debug!("duplicate anchor id `{id}` ignored");
            return;
        }
        self.anchors.insert(
            id,
            Anchor {
                path,
                text: text.into(),
            },
        );
    }

    /// Registers a section id together with its `_`-prefixed alias.
    pub fn register_section(&mut self, id: &str, path: Vec<usize>, title: &str) {
        self.register(format!("_{id}"), path.clone(), title);
        self.register(id, path, title);
    }

    pub fn contains(&self, id: &str) -> bool {
        self.anchors.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&Anchor> {
        self.anchors.get(id)
    }

    /// The declaring node for `id` inside `root`.
    pub fn resolve<'a>(&self, root: &'a Node, id: &str) -> Option<&'a Node> {
        self.get(id).and_then(|anchor| root.descendant(&anchor.path))
    }

    /// Display text for a cross reference to `id`, falling back to the raw id.
    pub fn display_text<'a>(&'a self, id: &'a str) -> &'a str {
        match self.get(id) {
            Some(anchor) if !anchor.text.is_empty() => &anchor.text,
            _ => id,
        }
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.anchors.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.anchors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::NodeKind;

    #[test]
    fn section_registers_alias() {
        let mut anchors = AnchorRegistry::new();
        anchors.register_section("intro", vec![0], "Intro");
        assert!(anchors.contains("intro"));
        assert!(anchors.contains("_intro"));
        assert_eq!(anchors.len(), 2);
    }

    #[test]
    fn first_declaration_wins() {
        let mut anchors = AnchorRegistry::new();
        anchors.register("x", vec![0], "First");
        anchors.register("x", vec![1], "Second");
        assert_eq!(anchors.get("x").unwrap().path, vec![0]);
    }

    #[test]
    fn display_text_falls_back_to_id() {
        let mut anchors = AnchorRegistry::new();
        anchors.register("labelled", vec![], "Label");
        anchors.register("bare", vec![], "");
        assert_eq!(anchors.display_text("labelled"), "Label");
        assert_eq!(anchors.display_text("bare"), "bare");
        assert_eq!(anchors.display_text("unknown"), "unknown");
    }

    #[test]
    fn resolve_follows_path() {
        let root = Node::document().with_child(
            Node::new(NodeKind::Section).with_child(Node::inline_macro("anchor")),
        );
        let mut anchors = AnchorRegistry::new();
        anchors.register("a", vec![0, 0], "");
        let node = anchors.resolve(&root, "a").unwrap();
        assert_eq!(node.macro_name(), Some("anchor"));
        assert!(anchors.resolve(&root, "missing").is_none());
    }
}
