use super::kinds::{AttributeEntry, Delimiter, SectionHeading};
use super::parser::{BlockParser, is_comment};

impl<'a, 'c> BlockParser<'a, 'c> {
    /// Consumes the document header: an optional `= Title` line followed by attribute
    /// entries and comments. The header ends at the first blank line after header content,
    /// or at the first line that is neither.
    pub fn header(&mut self) {
        let mut seen = false;
        let mut titled = false;
        while let Some(line) = self.current() {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                self.pos += 1;
                if seen {
                    break;
                }
                continue;
            }
            if is_comment(trimmed) {
                self.pos += 1;
                continue;
            }
            if !titled {
                if let Some(heading) = SectionHeading::parse(trimmed).filter(|h| h.level == 0) {
                    let title = self.attributes.substitute(&heading.title).into_owned();
                    self.attributes.set("title", &title);
                    self.ctx.document_attributes.set("title", title);
                    self.pos += 1;
                    seen = true;
                    titled = true;
                    continue;
                }
            }
            match AttributeEntry::parse(trimmed) {
                Some(entry) => {
                    self.assign(entry);
                    self.pos += 1;
                    seen = true;
                }
                None => break,
            }
        }
    }

    /// Whether a level 1 or deeper section heading follows the cursor outside of any
    /// delimited block.
    pub fn body_has_sections(&self) -> bool {
        let mut index = self.pos;
        while let Some(line) = self.lines.get(index) {
            let line = line.trim();
            if let Some(delimiter) = Delimiter::detect(line) {
                let rest = &self.lines[index + 1..];
                index += delimiter.find_close(rest).map_or(rest.len(), |close| close + 1) + 1;
                continue;
            }
            if SectionHeading::parse(line).is_some_and(|heading| heading.level >= 1) {
                return true;
            }
            index += 1;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use crate::context::{AttributeTable, ParseContext};

    use super::*;

    fn header_of(text: &str) -> (usize, AttributeTable, ParseContext) {
        let lines: Vec<&str> = text.lines().collect();
        let mut ctx = ParseContext::new();
        let mut parser = BlockParser::new(&lines, AttributeTable::new(), &mut ctx);
        parser.header();
        let pos = parser.pos;
        let attributes = parser.attributes().clone();
        (pos, attributes, ctx)
    }

    #[test]
    fn title_and_attributes() {
        let (pos, attributes, ctx) =
            header_of("= User Guide\n:author: Jane Doe\n// note\n:version: 1.2\n\nBody");
        assert_eq!(pos, 5);
        assert_eq!(attributes.title(), Some("User Guide"));
        assert_eq!(attributes.author(), Some("Jane Doe"));
        assert_eq!(ctx.document_attributes.get("version"), Some("1.2"));
    }

    #[test]
    fn attributes_without_title() {
        let (pos, attributes, _) = header_of(":doctype: book\n\n== Chapter");
        assert_eq!(pos, 2);
        assert_eq!(attributes.doctype(), "book");
        assert_eq!(attributes.title(), None);
    }

    #[test]
    fn body_content_stops_the_header() {
        let (pos, attributes, _) = header_of("Just a paragraph.\n:late: value");
        assert_eq!(pos, 0);
        assert_eq!(attributes.get("late"), None);
    }

    #[test]
    fn title_uses_earlier_attributes() {
        let (_, attributes, _) = header_of(":product: Widget\n= {product} Manual");
        assert_eq!(attributes.title(), Some("Widget Manual"));
    }

    #[test]
    fn section_scan_skips_delimited_blocks() {
        let lines = vec!["intro", "----", "== not a heading", "----"];
        let mut ctx = ParseContext::new();
        let parser = BlockParser::new(&lines, AttributeTable::new(), &mut ctx);
        assert!(!parser.body_has_sections());

        let lines = vec!["intro", "", "== Real"];
        let mut ctx = ParseContext::new();
        let parser = BlockParser::new(&lines, AttributeTable::new(), &mut ctx);
        assert!(parser.body_has_sections());
    }
}
