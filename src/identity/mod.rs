pub mod types;
pub mod attributes;
pub mod classifier;
pub mod resolver;
pub mod display;

pub use types::*;
pub use attributes::{parse_attributes, AttributesError, FromAttribute};
pub use classifier::{classify_author, AuthorClass};
pub use resolver::{attach_from_attribute, resolve_from_label, resolve_outgoing_label};
pub use display::{resolve_display_batch, resolve_display_info};
