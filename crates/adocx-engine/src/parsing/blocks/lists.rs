use crate::ast::{Node, NodeKind};

use super::kinds::{ListFamily, ListMarker};
use super::parser::{BlockParser, CONTINUATION, child_path};

impl<'a, 'c> BlockParser<'a, 'c> {
    /// Parses the list starting at the cursor, including nested lists and attached blocks.
    pub(super) fn list(&mut self, marker: ListMarker, parent: &mut Node, path: &[usize]) {
        let meta = std::mem::take(&mut self.pending);
        let list_path = child_path(parent, path);
        let mut open = Vec::new();
        let list = self.list_level(marker.family, marker.depth, &list_path, &mut open);
        self.place(list, &meta, parent, list_path);
    }

    /// One list of a single family and depth. `open` holds the lists enclosing this one;
    /// a marker that continues any of them ends this list.
    fn list_level(
        &mut self,
        family: ListFamily,
        depth: usize,
        path: &[usize],
        open: &mut Vec<(ListFamily, usize)>,
    ) -> Node {
        let mut list = Node::new(NodeKind::List).with_attribute("style", family.style());

        while let Some((index, marker)) = self.next_marker() {
            if marker.continues(family, depth) {
                self.pos = index;
                let item_path = child_path(&list, path);
                let item = self.list_item(marker, &item_path);
                list.add_child(item);
                continue;
            }
            if open.iter().any(|&(f, d)| marker.continues(f, d)) {
                break;
            }
            let item_index = list.children.len().saturating_sub(1);
            let Some(item) = list.children.last_mut() else {
                break;
            };
            let mut item_path = path.to_vec();
            item_path.push(item_index);
            let nested_path = child_path(item, &item_path);

            self.pos = index;
            open.push((family, depth));
            let nested = self.list_level(marker.family, marker.depth, &nested_path, open);
            open.pop();
            item.add_child(nested);
        }

        list
    }

    /// Next list marker, allowing blank lines before it. Does not move the cursor.
    fn next_marker(&self) -> Option<(usize, ListMarker)> {
        let mut index = self.pos;
        while let Some(line) = self.lines.get(index) {
            if line.trim().is_empty() {
                index += 1;
                continue;
            }
            return ListMarker::parse(line).map(|marker| (index, marker));
        }
        None
    }

    fn list_item(&mut self, marker: ListMarker, item_path: &[usize]) -> Node {
        self.pos += 1;
        let mut item = Node::new(NodeKind::ListItem)
            .with_attribute("depth", marker.depth.to_string());
        if let Some(checked) = marker.checked {
            item.set_attribute("checked", checked.to_string());
        }
        if let Some(term) = &marker.term {
            item.set_attribute("term", self.attributes.substitute(term));
        }
        if let Some(callout) = &marker.callout {
            item.set_attribute("callout", callout.as_str());
        }

        let mut lines = Vec::new();
        if !marker.text.is_empty() {
            lines.push(marker.text.as_str());
        }
        lines.extend(self.continuation_lines());
        item.children = self.inline_lines(&lines, item_path);

        while self
            .current()
            .is_some_and(|line| line.trim() == CONTINUATION)
        {
            self.pos += 1;
            self.attach_block(&mut item, item_path);
        }
        item
    }

    /// Parses the single block following a `+` continuation line into `item`.
    fn attach_block(&mut self, item: &mut Node, item_path: &[usize]) {
        let before = item.children.len();
        while !self.is_done() && item.children.len() == before {
            if !self.step(item, item_path, Some(usize::MAX)) {
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::context::{AttributeTable, ParseContext};

    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(text: &str) -> Node {
        let lines: Vec<&str> = text.lines().collect();
        let mut ctx = ParseContext::new();
        let mut root = Node::document();
        BlockParser::new(&lines, AttributeTable::new(), &mut ctx).parse_into(&mut root, &[], None);
        root
    }

    fn item_texts(list: &Node) -> Vec<String> {
        list.children
            .iter()
            .map(|item| {
                item.children
                    .iter()
                    .filter(|child| child.kind.is_inline())
                    .map(Node::text_content)
                    .collect()
            })
            .collect()
    }

    #[test]
    fn flat_unordered_list() {
        let root = parse("* one\n* two\n\n* three");
        assert_eq!(root.children.len(), 1);
        let list = &root.children[0];
        assert_eq!(list.attribute("style"), Some("unordered"));
        assert_eq!(item_texts(list), vec!["one", "two", "three"]);
    }

    #[test]
    fn nested_by_marker_depth() {
        let root = parse("* a\n** a.1\n** a.2\n* b");
        let list = &root.children[0];
        assert_eq!(list.children.len(), 2);
        let nested = list.children[0].children.last().unwrap();
        assert_eq!(nested.kind, NodeKind::List);
        assert_eq!(item_texts(nested), vec!["a.1", "a.2"]);
        assert_eq!(nested.children[0].attribute("depth"), Some("1"));
    }

    #[test]
    fn mixed_families_nest() {
        let root = parse(". step\n* detail\n. next");
        let list = &root.children[0];
        assert_eq!(list.attribute("style"), Some("ordered"));
        assert_eq!(item_texts(list), vec!["step", "next"]);
        let nested = list.children[0].children.last().unwrap();
        assert_eq!(nested.attribute("style"), Some("unordered"));
    }

    #[test]
    fn item_text_continues_on_following_lines() {
        let root = parse("* first line\nsecond line\n* next");
        assert_eq!(item_texts(&root.children[0]), vec!["first line second line", "next"]);
    }

    #[test]
    fn labeled_list_terms() {
        let root = parse("CPU:: The brain\nRAM::\n  Short-term memory");
        let list = &root.children[0];
        assert_eq!(list.attribute("style"), Some("labeled"));
        assert_eq!(list.children[0].attribute("term"), Some("CPU"));
        assert_eq!(item_texts(list), vec!["The brain", "Short-term memory"]);
    }

    #[test]
    fn checklist_items() {
        let root = parse("* [x] done\n* [ ] todo");
        let list = &root.children[0];
        assert_eq!(list.children[0].attribute("checked"), Some("true"));
        assert_eq!(list.children[1].attribute("checked"), Some("false"));
        assert_eq!(item_texts(list), vec!["done", "todo"]);
    }

    #[test]
    fn continuation_attaches_block() {
        let root = parse("* install\n+\n----\ncargo install adocx\n----\n* run");
        let list = &root.children[0];
        assert_eq!(list.children.len(), 2);
        let attached = list.children[0].children.last().unwrap();
        assert_eq!(attached.kind, NodeKind::CodeBlock);
        assert_eq!(attached.text_content(), "cargo install adocx");
    }

    #[test]
    fn continuation_paragraph_stops_at_next_item() {
        let root = parse("* a\n+\nmore about a\n* b");
        let list = &root.children[0];
        assert_eq!(list.children.len(), 2);
        assert_eq!(list.children[0].children.last().unwrap().kind, NodeKind::Paragraph);
    }

    #[test]
    fn callout_list() {
        let root = parse("<1> The import\n<2> The call");
        let list = &root.children[0];
        assert_eq!(list.attribute("style"), Some("callout"));
        assert_eq!(list.children[1].attribute("callout"), Some("2"));
    }

    #[test]
    fn paragraph_after_list_is_separate() {
        let root = parse("* item\n\nParagraph.");
        assert_eq!(root.children.len(), 2);
        assert_eq!(root.children[1].kind, NodeKind::Paragraph);
    }
}
