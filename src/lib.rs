//! Post-processing for generated HTML documentation.
//!
//! Two independent text transformations, each applied to one HTML file in
//! place: [`rewrite_links`] turns relative markdown hrefs into same-page
//! anchors, and [`highlight_html`] applies naive regex-based syntax
//! coloring to code blocks tagged with a language marker.

mod highlight;
mod links;

pub use highlight::{Lexicon, highlight_file, highlight_html};
pub use links::{rewrite_links, rewrite_links_in_file};
