//! Integration tests for in-place file rewriting.
//!
//! Exercises the file-level wrappers over temporary documents: whole-file
//! read, transform, whole-file write, and error propagation for missing
//! files.

use anyhow::Result;
use docpost::Lexicon;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Writes an HTML document into a fresh temporary directory.
///
/// # Returns
///
/// The temporary directory (kept alive by the caller) and the file path
fn write_test_page(content: &str) -> Result<(TempDir, PathBuf)> {
    let dir = TempDir::new()?;
    let path = dir.path().join("page.html");
    fs::write(&path, content)?;
    Ok((dir, path))
}

#[test]
fn test_rewrite_links_in_file_round_trip() -> Result<()> {
    // Arrange
    let html = concat!(
        "<html><body>\n",
        "<a href=\"02_syntax/01_bindings.md\">bindings</a>\n",
        "<a href=\"../README.md\">readme</a>\n",
        "<a href=\"https://example.com\">external</a>\n",
        "</body></html>\n"
    );
    let (_dir, path) = write_test_page(html)?;

    // Act
    docpost::rewrite_links_in_file(&path)?;

    // Assert
    let rewritten = fs::read_to_string(&path)?;
    assert!(rewritten.contains("href=\"#02_syntax-01_bindings\""));
    assert!(rewritten.contains("href=\"#README\""));
    assert!(
        rewritten.contains("href=\"https://example.com\""),
        "External links must survive untouched"
    );
    assert!(!rewritten.contains(".md\""));
    Ok(())
}

#[test]
fn test_rewrite_links_in_file_matches_pure_transformation() -> Result<()> {
    // Arrange
    let html = "<a href=\"a/b/c.md\">x</a>";
    let (_dir, path) = write_test_page(html)?;

    // Act
    docpost::rewrite_links_in_file(&path)?;

    // Assert
    let rewritten = fs::read_to_string(&path)?;
    assert_eq!(rewritten, docpost::rewrite_links(html));
    Ok(())
}

#[test]
fn test_rewrite_links_in_file_identity_without_matches() -> Result<()> {
    // Arrange
    let html = "<p>nothing to do</p>";
    let (_dir, path) = write_test_page(html)?;

    // Act
    docpost::rewrite_links_in_file(&path)?;

    // Assert
    assert_eq!(fs::read_to_string(&path)?, html, "No matches is a no-op");
    Ok(())
}

#[test]
fn test_rewrite_links_in_file_reapplication_is_stable() -> Result<()> {
    // Arrange
    let html = "<a href=\"guide/setup.md\">setup</a>";
    let (_dir, path) = write_test_page(html)?;

    // Act
    docpost::rewrite_links_in_file(&path)?;
    let first = fs::read_to_string(&path)?;
    docpost::rewrite_links_in_file(&path)?;
    let second = fs::read_to_string(&path)?;

    // Assert
    assert_eq!(first, "<a href=\"#guide-setup\">setup</a>");
    assert_eq!(second, first, "Rewriting an already rewritten file is a no-op");
    Ok(())
}

#[test]
fn test_rewrite_links_missing_file_fails() {
    // Arrange
    let path = PathBuf::from("/nonexistent/docs/page.html");

    // Act
    let result = docpost::rewrite_links_in_file(&path);

    // Assert
    assert!(result.is_err(), "Missing input file must propagate an error");
    let err_msg = format!("{:#}", result.unwrap_err());
    assert!(
        err_msg.contains("page.html"),
        "Error should name the file: {}",
        err_msg
    );
}

#[test]
fn test_highlight_file_rewrites_tagged_blocks() -> Result<()> {
    // Arrange
    let html = concat!(
        "<pre><code class=\"sourceCode aivi\">let x = 42</code></pre>\n",
        "<pre><code class=\"sourceCode rust\">let y = 1;</code></pre>\n"
    );
    let (_dir, path) = write_test_page(html)?;

    // Act
    let blocks = docpost::highlight_file(&path, &Lexicon::aivi())?;

    // Assert
    let rewritten = fs::read_to_string(&path)?;
    assert_eq!(blocks, 1, "Only the aivi block is rewritten");
    assert!(rewritten.contains(
        "<code class=\"sourceCode aivi\"><span class=\"keyword\">let</span> x = <span class=\"number\">42</span></code>"
    ));
    assert!(
        rewritten.contains("<code class=\"sourceCode rust\">let y = 1;</code>"),
        "The rust block must be byte-identical"
    );
    Ok(())
}

#[test]
fn test_highlight_file_zero_blocks_is_not_an_error() -> Result<()> {
    // Arrange
    let html = "<p>prose only</p>";
    let (_dir, path) = write_test_page(html)?;

    // Act
    let blocks = docpost::highlight_file(&path, &Lexicon::aivi())?;

    // Assert
    assert_eq!(blocks, 0);
    assert_eq!(fs::read_to_string(&path)?, html);
    Ok(())
}

#[test]
fn test_highlight_file_missing_file_fails() {
    // Arrange
    let path = PathBuf::from("/nonexistent/docs/page.html");

    // Act
    let result = docpost::highlight_file(&path, &Lexicon::aivi());

    // Assert
    assert!(result.is_err(), "Missing input file must propagate an error");
}

#[test]
fn test_link_and_highlight_pipeline_over_one_page() -> Result<()> {
    // Both tools run once per page during a docs build; order between the
    // two does not matter because they touch disjoint attributes.

    // Arrange
    let html = concat!(
        "<h1>Guide</h1>\n",
        "<a href=\"reference/types.md\">types</a>\n",
        "<pre><code class=\"sourceCode aivi\">// demo\n",
        "let total = 3.14</code></pre>\n"
    );
    let (_dir, path) = write_test_page(html)?;

    // Act
    docpost::rewrite_links_in_file(&path)?;
    let blocks = docpost::highlight_file(&path, &Lexicon::aivi())?;

    // Assert
    let rewritten = fs::read_to_string(&path)?;
    assert_eq!(blocks, 1);
    assert!(rewritten.contains("href=\"#reference-types\""));
    assert!(rewritten.contains("<span class=\"comment\">// demo</span>"));
    assert!(rewritten.contains("<span class=\"keyword\">let</span>"));
    assert!(rewritten.contains("<span class=\"number\">3.14</span>"));
    Ok(())
}
