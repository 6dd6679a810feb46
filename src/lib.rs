//! Animated "party parrot" gradients for SVG documents.
//!
//! ```
//! use svg_party::{party::Party, svg::Document};
//!
//! let mut document = Document::parse(r#"<svg><g id="chart"><rect></rect></g></svg>"#).unwrap();
//! let rects = document.select_all("#chart rect").unwrap();
//! let party = Party::with_defaults(&mut document, &rects).unwrap();
//! party.apply(&mut document, &rects).unwrap();
//!
//! assert!(document.to_markup().contains(r#"<rect fill="url(#party)"/>"#));
//! ```

pub mod party;
pub mod svg;

pub use party::{Party, PartyConfig, PartyError};
pub use svg::{Document, DocumentError, NodeId, Selection};
