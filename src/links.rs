//! Anchor link rewriting for generated documentation pages.

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::fs;
use std::path::Path;

/// Matches href attributes whose value ends in the ".md" extension.
static MD_HREF: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"href="([^"]+\.md)""#).expect("href pattern is valid"));

/// Converts a relative markdown path to a same-page anchor slug.
///
/// Parent-directory markers are stripped wherever they occur, the ".md"
/// extension is removed, and path separators become hyphens:
/// `02_syntax/01_bindings.md` → `02_syntax-01_bindings`.
///
/// Note: ".md" is removed as a substring anywhere in the path, not only as
/// a suffix, so `a.md.md` collapses to `a`.
fn slug(path: &str) -> String {
    path.replace("../", "").replace(".md", "").replace('/', "-")
}

/// Rewrites relative markdown links into in-page anchor references.
///
/// Every `href` attribute whose value ends in ".md" is replaced with
/// `href="#slug"`; all other content is preserved byte-for-byte. Already
/// rewritten anchors never re-match, so applying this twice is a no-op.
///
/// # Arguments
///
/// * `html`: Full document text
///
/// # Returns
///
/// Document text with markdown hrefs rewritten to anchors
pub fn rewrite_links(html: &str) -> String {
    MD_HREF
        .replace_all(html, |caps: &Captures| {
            format!("href=\"#{}\"", slug(&caps[1]))
        })
        .into_owned()
}

/// Rewrites markdown links in an HTML file in place.
///
/// Reads the whole file as UTF-8, applies [`rewrite_links`], and writes the
/// result back. A document with zero markdown links is rewritten unchanged.
///
/// # Errors
///
/// Returns error if the file cannot be read or written.
pub fn rewrite_links_in_file(path: &Path) -> Result<()> {
    let html = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let rewritten = rewrite_links(&html);

    fs::write(path, rewritten).with_context(|| format!("Failed to write {}", path.display()))?;

    Ok(())
}
