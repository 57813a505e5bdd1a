//! Naive syntax coloring for tagged code blocks in HTML documentation.
//!
//! Code blocks are matched as text, not as a DOM. A block is any
//! `<code ... class="... MARKER ..." ...>...</code>` region; its inner text
//! runs through a fixed sequence of regex passes that wrap comments,
//! strings, character literals, decorators, type names, keywords, and
//! numbers in `<span class="...">` markup. The pass order is load-bearing:
//! comments and strings are claimed first, and later passes never match
//! inside tags injected by earlier ones.

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Reserved words of the aivi language, in highlighting order.
const AIVI_KEYWORDS: &[&str] = &[
    "domain", "over", "type", "class", "module", "export", "use", "effect", "do", "if", "then",
    "else", "when", "pure", "let", "in", "True", "False", "None", "Some", "Ok", "Err", "Empty",
    "Unit",
];

/// Built-in type names of the aivi language, in highlighting order.
const AIVI_TYPES: &[&str] = &[
    "Int", "Float", "Text", "Bool", "List", "Option", "Result", "Effect", "Source", "Table",
    "Row", "Query", "Element", "Attribute", "Date", "Instant", "Duration", "Span", "Rgb", "Hsl",
    "Vec2", "Vec3", "User", "Post", "Account", "Decimal", "Children", "Delta", "Patch", "Http",
    "File", "Json", "JsonSchema", "Image", "ImageData",
];

static LINE_COMMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"//[^\n]*").expect("line comment pattern is valid"));

static BLOCK_COMMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)/\*.*?\*/").expect("block comment pattern is valid"));

/// Double-quoted strings with backslash escapes, or backtick strings
/// with no escape processing.
static STRING_LITERAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""(?:[^"\\]|\\.)*"|`[^`]*`"#).expect("string pattern is valid"));

/// Exactly one character between single quotes; escapes unsupported.
static CHAR_LITERAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"'[^']'").expect("char pattern is valid"));

static DECORATOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"@\w+").expect("decorator pattern is valid"));

static NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b\d+(?:\.\d+)?\b").expect("number pattern is valid"));

/// Lexicon driving the highlighter.
///
/// Keyword and type lists are explicit ordered sequences rather than
/// process-wide constants, so tests and future languages can substitute
/// their own. Order matters: words are wrapped one at a time in list order.
#[derive(Debug, Clone)]
pub struct Lexicon<'a> {
    /// Class token identifying code blocks eligible for highlighting.
    pub marker: &'a str,
    /// Built-in type names, wrapped as `type` spans.
    pub types: &'a [&'a str],
    /// Reserved words and literal constants, wrapped as `keyword` spans.
    pub keywords: &'a [&'a str],
}

impl Lexicon<'static> {
    /// Returns the built-in aivi lexicon.
    pub fn aivi() -> Self {
        Lexicon {
            marker: "aivi",
            types: AIVI_TYPES,
            keywords: AIVI_KEYWORDS,
        }
    }
}

/// Lexical categories emitted as span class names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SpanClass {
    Comment,
    String,
    Decorator,
    Type,
    Keyword,
    Number,
}

impl SpanClass {
    /// CSS class name for this category.
    fn css_class(&self) -> &'static str {
        match self {
            SpanClass::Comment => "comment",
            SpanClass::String => "string",
            SpanClass::Decorator => "decorator",
            SpanClass::Type => "type",
            SpanClass::Keyword => "keyword",
            SpanClass::Number => "number",
        }
    }
}

/// Reports whether the byte offset falls inside an injected span tag.
///
/// True when an unclosed `<span` or `</span` precedes `pos`. Later passes
/// use this to skip the tag names and attributes injected by earlier
/// passes; a span's visible text is still fair game, and a bare `<` in
/// code text (a less-than comparison) does not suppress later passes.
fn within_span_tag(text: &str, pos: usize) -> bool {
    match text[..pos].rfind('<') {
        Some(open) => {
            let tag = &text[open + 1..pos];
            if tag.contains('>') {
                return false;
            }
            tag.strip_prefix('/').unwrap_or(tag).starts_with("span")
        }
        None => false,
    }
}

/// Wraps every match of `pattern` outside existing markup in a span.
///
/// Walks matches in order, stitching unmatched gaps through unchanged.
fn wrap_matches(text: &str, pattern: &Regex, class: SpanClass) -> String {
    let mut result = String::with_capacity(text.len());
    let mut pos = 0;

    for m in pattern.find_iter(text) {
        result.push_str(&text[pos..m.start()]);

        if within_span_tag(text, m.start()) {
            result.push_str(m.as_str());
        } else {
            result.push_str("<span class=\"");
            result.push_str(class.css_class());
            result.push_str("\">");
            result.push_str(m.as_str());
            result.push_str("</span>");
        }

        pos = m.end();
    }

    result.push_str(&text[pos..]);
    result
}

/// Compiles a whole-word pattern for one lexicon entry.
fn word_pattern(word: &str) -> Result<Regex> {
    Regex::new(&format!(r"\b{}\b", regex::escape(word)))
        .with_context(|| format!("Invalid lexicon word: {}", word))
}

/// Annotates one code block's inner text with category spans.
///
/// Passes run in a fixed order, each over the accumulated output of the
/// previous one: line comments, block comments, strings, character
/// literals, decorators, types, keywords, numbers. Do not reorder; later
/// passes rely on earlier ones having already claimed their text. A word
/// appearing in a comment or string's visible text is still wrapped by the
/// word passes (known single-pass limitation, carried deliberately).
fn annotate_code(code: &str, types: &[Regex], keywords: &[Regex]) -> String {
    let mut code = wrap_matches(code, &LINE_COMMENT, SpanClass::Comment);
    code = wrap_matches(&code, &BLOCK_COMMENT, SpanClass::Comment);
    code = wrap_matches(&code, &STRING_LITERAL, SpanClass::String);
    code = wrap_matches(&code, &CHAR_LITERAL, SpanClass::String);
    code = wrap_matches(&code, &DECORATOR, SpanClass::Decorator);

    for pattern in types {
        code = wrap_matches(&code, pattern, SpanClass::Type);
    }

    for pattern in keywords {
        code = wrap_matches(&code, pattern, SpanClass::Keyword);
    }

    wrap_matches(&code, &NUMBER, SpanClass::Number)
}

/// Highlights every code block tagged with the lexicon's marker.
///
/// Blocks are regions matching
/// `<code ... class="... MARKER ..." ...>INNER</code>` (non-greedy; nested
/// code elements unsupported). Each matched block's opening tag is
/// normalized to `class="sourceCode MARKER"` and its inner text is
/// annotated; everything else, including code blocks without the marker,
/// is returned character-for-character.
///
/// # Arguments
///
/// * `html`: Full document text
/// * `lexicon`: Marker plus ordered keyword/type lists
///
/// # Returns
///
/// Rewritten document text and the number of blocks annotated
///
/// # Errors
///
/// Returns error if a lexicon entry produces an invalid pattern.
pub fn highlight_html(html: &str, lexicon: &Lexicon) -> Result<(String, usize)> {
    let block = Regex::new(&format!(
        r#"(?s)<code[^>]*class="[^"]*{}[^"]*"[^>]*>(.*?)</code>"#,
        regex::escape(lexicon.marker)
    ))
    .with_context(|| format!("Invalid language marker: {}", lexicon.marker))?;

    let types = lexicon
        .types
        .iter()
        .map(|t| word_pattern(t))
        .collect::<Result<Vec<_>>>()?;
    let keywords = lexicon
        .keywords
        .iter()
        .map(|k| word_pattern(k))
        .collect::<Result<Vec<_>>>()?;

    let mut annotated_blocks = 0usize;

    let result = block.replace_all(html, |caps: &regex::Captures| {
        let full = &caps[0];

        // Re-check the opening tag independent of the outer match.
        let open_tag = full.split('>').next().unwrap_or(full);
        if !open_tag.contains(lexicon.marker) {
            return full.to_string();
        }

        annotated_blocks += 1;

        format!(
            r#"<code class="sourceCode {}">{}</code>"#,
            lexicon.marker,
            annotate_code(&caps[1], &types, &keywords)
        )
    });

    Ok((result.into_owned(), annotated_blocks))
}

/// Highlights tagged code blocks in an HTML file in place.
///
/// # Arguments
///
/// * `path`: HTML file rewritten in place
/// * `lexicon`: Marker plus ordered keyword/type lists
///
/// # Returns
///
/// Number of code blocks annotated (zero is not an error)
///
/// # Errors
///
/// Returns error if the file cannot be read or written.
pub fn highlight_file(path: &Path, lexicon: &Lexicon) -> Result<usize> {
    let html = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let (highlighted, count) = highlight_html(&html, lexicon)?;

    fs::write(path, highlighted)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    Ok(count)
}
