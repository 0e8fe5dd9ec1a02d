//! Minimal XML document model.
//!
//! - **Tree**: owned [`Element`] nodes with text and tail, parent owns children
//! - **Parsing**: existing documents are read with `roxmltree`
//! - **Indentation**: deterministic, idempotent tab layout
//! - **Writing**: declaration + escaped markup, written atomically

mod element;
mod indent;
mod parse;
mod writer;

pub use element::Element;
pub use indent::indent;
pub use parse::parse_document;
pub use writer::{to_xml_string, write_document};
