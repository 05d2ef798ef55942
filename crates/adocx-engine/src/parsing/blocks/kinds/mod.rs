pub mod admonition;
pub mod attribute_entry;
pub mod block_macro;
pub mod delimiter;
pub mod list_marker;
pub mod meta;
pub mod section;

pub use admonition::Admonition;
pub use attribute_entry::AttributeEntry;
pub use block_macro::{BlockMacroLine, alt_from_src};
pub use delimiter::{BlockDelimiter, Delimiter};
pub use list_marker::{ListFamily, ListMarker};
pub use meta::BlockMeta;
pub use section::{SectionHeading, generate_id};
