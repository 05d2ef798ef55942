use std::sync::LazyLock;

use regex::Regex;

static UNORDERED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\*{1,5}|-)\s+(.*)$").expect("Invalid unordered list regex"));
static ORDERED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:(\.{1,5})|(\d+)\.)\s+(.*)$").expect("Invalid ordered list regex")
});
static LABELED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.*?\S)(:{2,4}|;;)(?:\s+(.*))?$").expect("Invalid labeled list regex")
});
static CALLOUT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^<(\d+|\.)>(?:\s+(.*))?$").expect("Invalid callout regex"));
static TASK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[([ xX*])\]\s+(.*)$").expect("Invalid task item regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListFamily {
    Unordered,
    Ordered,
    Labeled,
    Callout,
}

impl ListFamily {
    /// Value of the list node's `style` attribute.
    pub fn style(self) -> &'static str {
        match self {
            ListFamily::Unordered => "unordered",
            ListFamily::Ordered => "ordered",
            ListFamily::Labeled => "labeled",
            ListFamily::Callout => "callout",
        }
    }
}

/// A list item marker line, already split into its parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListMarker {
    pub family: ListFamily,
    /// Nesting depth from the marker length: `*` and `.` are 1, `**` is 2, `:::` is 2.
    pub depth: usize,
    pub text: String,
    /// `Some` for task items (`* [x] done`).
    pub checked: Option<bool>,
    /// Term of a labeled item.
    pub term: Option<String>,
    /// Number of a callout item (`<1>`).
    pub callout: Option<String>,
}

impl ListMarker {
    pub fn parse(line: &str) -> Option<ListMarker> {
        let line = line.trim();
        if let Some(caps) = UNORDERED.captures(line) {
            let marker = &caps[1];
            let depth = if marker == "-" { 1 } else { marker.len() };
            let text = caps[2].trim();
            let (checked, text) = match TASK.captures(text) {
                Some(task) => (Some(&task[1] != " "), task[2].to_string()),
                None => (None, text.to_string()),
            };
            return Some(ListMarker {
                family: ListFamily::Unordered,
                depth,
                text,
                checked,
                term: None,
                callout: None,
            });
        }
        if let Some(caps) = ORDERED.captures(line) {
            let depth = caps.get(1).map_or(1, |dots| dots.as_str().len());
            return Some(ListMarker::simple(ListFamily::Ordered, depth, &caps[3]));
        }
        if let Some(caps) = CALLOUT.captures(line) {
            let mut marker =
                ListMarker::simple(ListFamily::Callout, 1, caps.get(2).map_or("", |m| m.as_str()));
            marker.callout = Some(caps[1].to_string());
            return Some(marker);
        }
        if let Some(caps) = LABELED.captures(line) {
            let delimiter = &caps[2];
            let depth = if delimiter == ";;" { 4 } else { delimiter.len() - 1 };
            let mut marker =
                ListMarker::simple(ListFamily::Labeled, depth, caps.get(3).map_or("", |m| m.as_str()));
            marker.term = Some(caps[1].trim().to_string());
            return Some(marker);
        }
        None
    }

    fn simple(family: ListFamily, depth: usize, text: &str) -> ListMarker {
        ListMarker {
            family,
            depth,
            text: text.trim().to_string(),
            checked: None,
            term: None,
            callout: None,
        }
    }

    /// Whether this marker continues a list opened with `family`/`depth`.
    pub fn continues(&self, family: ListFamily, depth: usize) -> bool {
        self.family == family && self.depth == depth
    }
}
