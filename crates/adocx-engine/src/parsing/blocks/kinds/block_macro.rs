use std::sync::LazyLock;

use regex::Regex;

static MEDIA: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(include|toc|video|audio)::(\S*?)\[(.*)\]$").expect("Invalid block macro regex")
});
static COMPONENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^component::([A-Za-z_][\w\-]*)\[(.*)\]$").expect("Invalid component macro regex")
});
static IMAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^image::(\S+?)\[(.*)\]$").expect("Invalid block image regex"));
static ANCHOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\[\[([A-Za-z_][\w:.\-]*)(?:,\s*(.*?))?\]\]$").expect("Invalid block anchor regex")
});

/// A standalone `name::target[attributes]` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockMacroLine {
    pub name: String,
    pub target: String,
    /// Raw text between the brackets.
    pub attributes: String,
}

impl BlockMacroLine {
    /// `include::`, `toc::`, `video::`, `audio::` and `component::name[...]`.
    pub fn parse(line: &str) -> Option<BlockMacroLine> {
        let line = line.trim();
        if let Some(caps) = MEDIA.captures(line) {
            return Some(BlockMacroLine {
                name: caps[1].to_string(),
                target: caps[2].to_string(),
                attributes: caps[3].to_string(),
            });
        }
        let caps = COMPONENT.captures(line)?;
        Some(BlockMacroLine {
            name: "component".to_string(),
            target: caps[1].to_string(),
            attributes: caps[2].to_string(),
        })
    }

    /// `image::src[alt, width, height]`.
    pub fn image(line: &str) -> Option<BlockMacroLine> {
        let caps = IMAGE.captures(line.trim())?;
        Some(BlockMacroLine {
            name: "image".to_string(),
            target: caps[1].to_string(),
            attributes: caps[2].to_string(),
        })
    }

    /// `[[id]]` or `[[id, label]]` on a line of its own.
    pub fn anchor(line: &str) -> Option<(String, Option<String>)> {
        let caps = ANCHOR.captures(line.trim())?;
        let label = caps
            .get(2)
            .map(|m| m.as_str().trim().to_string())
            .filter(|label| !label.is_empty());
        Some((caps[1].to_string(), label))
    }
}

/// Default alt text for an image: the file stem with `-`/`_` read as spaces.
pub fn alt_from_src(src: &str) -> String {
    let file = src.rsplit('/').next().unwrap_or(src);
    let stem = file.rsplit_once('.').map_or(file, |(stem, _)| stem);
    stem.replace(['-', '_'], " ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn media_macros() {
        let video = BlockMacroLine::parse("video::intro.mp4[width=640]").unwrap();
        assert_eq!(video.name, "video");
        assert_eq!(video.target, "intro.mp4");
        assert_eq!(video.attributes, "width=640");
        let toc = BlockMacroLine::parse("toc::[]").unwrap();
        assert_eq!(toc.name, "toc");
        assert_eq!(toc.target, "");
    }

    #[test]
    fn component_is_strict() {
        let component = BlockMacroLine::parse(r#"component::hero[title="Hi"]"#).unwrap();
        assert_eq!(component.name, "component");
        assert_eq!(component.target, "hero");
        assert_eq!(BlockMacroLine::parse("component::[x]"), None);
        assert_eq!(BlockMacroLine::parse("component::a b[x]"), None);
    }

    #[test]
    fn unknown_names_are_not_block_macros() {
        assert_eq!(BlockMacroLine::parse("widget::x[]"), None);
        assert_eq!(BlockMacroLine::parse("image::x.png[Alt]"), None);
    }

    #[test]
    fn block_image() {
        let image = BlockMacroLine::image("image::img/x.png[Alt, 200]").unwrap();
        assert_eq!(image.target, "img/x.png");
        assert_eq!(image.attributes, "Alt, 200");
        assert_eq!(BlockMacroLine::image("image:x.png[Alt]"), None);
    }

    #[test]
    fn block_anchor() {
        assert_eq!(
            BlockMacroLine::anchor("[[install]]"),
            Some(("install".to_string(), None))
        );
        assert_eq!(
            BlockMacroLine::anchor("[[install, Installing]]"),
            Some(("install".to_string(), Some("Installing".to_string())))
        );
        assert_eq!(BlockMacroLine::anchor("[[x]] trailing"), None);
    }

    #[test]
    fn alt_text_from_file_name() {
        assert_eq!(alt_from_src("images/sunset-over_sea.jpg"), "sunset over sea");
        assert_eq!(alt_from_src("logo"), "logo");
    }
}
