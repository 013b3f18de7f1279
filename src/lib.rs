//! Convert a supported subset of HTML into WordprocessingML paragraph/run
//! markup.
//!
//! The conversion runs in two phases: a queue/stack-based builder turns the
//! parsed markup into paragraph-level nodes (handling block elements found
//! inside inline content and arbitrarily nested lists), and a recursive
//! extractor threads accumulated formatting into the leaf runs. A cleanup
//! visitor then trims trailing line breaks before the tree is serialized.
//!
//! ```
//! use wordml_from_html::{HtmlConverter, Numbering};
//!
//! let mut converter = HtmlConverter::new(Numbering::new());
//! let xml = converter.process("<p>Hello <b>world</b></p>").unwrap();
//! assert!(xml.contains("<w:pStyle w:val=\"Paragraph\" />"));
//! ```

pub mod ast;
pub mod builder;
pub mod convert;
pub mod docx;
mod dom;
pub mod error;
pub mod format;
pub mod numbering;
pub mod visitor;

pub use ast::{Collection, ListParagraph, Node, Paragraph, Root, Text};
pub use convert::{HtmlConverter, highlight_name};
pub use error::ConvertError;
pub use format::TextFormat;
pub use numbering::{ListDefinition, Numbering, NumberingRegistry};
