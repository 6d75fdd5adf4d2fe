//! Comment collection.
//!
//! Line and block comments are gathered in source order. Tooling directives
//! are dropped, JSDoc tags are stripped from block comments, and the result
//! is capped by the caller.

use once_cell::sync::Lazy;
use regex::Regex;

/// Prefixes of line comments that are tooling directives, not prose
const DIRECTIVE_PREFIXES: &[&str] = &[
    "eslint",
    "@",
    "prettier",
    "istanbul",
    "tslint",
    "jshint",
    "global ",
    "#region",
    "#endregion",
    "/",
];

const MIN_LINE_COMMENT_CHARS: usize = 6;
const MIN_BLOCK_COMMENT_CHARS: usize = 11;

static LINE_COMMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)(?:^|[^:/\\])//(.*)$").expect("valid regex"));

static BLOCK_COMMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)/\*(.*?)\*/").expect("valid regex"));

static JSDOC_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"@\w+\s*(?:\{[^}]*\}\s*)?").expect("valid regex"));

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));

/// A comment and where it starts in the source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub offset: usize,
    pub text: String,
    pub is_block: bool,
}

fn is_directive(text: &str) -> bool {
    let lower = text.to_lowercase();
    DIRECTIVE_PREFIXES.iter().any(|p| lower.starts_with(p))
}

/// Strip `*` gutters and JSDoc tags from a block comment body
pub fn clean_block_comment(body: &str) -> String {
    let joined = body
        .lines()
        .map(|line| line.trim().trim_start_matches('*').trim())
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    let untagged = JSDOC_TAG.replace_all(&joined, "");
    WHITESPACE.replace_all(untagged.trim(), " ").into_owned()
}

/// Line comments worth keeping
pub fn line_comments(content: &str) -> Vec<Comment> {
    LINE_COMMENT
        .captures_iter(content)
        .filter_map(|caps| {
            let body = caps.get(1)?;
            let text = body.as_str().trim();
            if is_directive(text) || text.chars().count() < MIN_LINE_COMMENT_CHARS {
                return None;
            }
            Some(Comment {
                offset: body.start(),
                text: text.to_string(),
                is_block: false,
            })
        })
        .collect()
}

/// Block comments worth keeping
pub fn block_comments(content: &str) -> Vec<Comment> {
    BLOCK_COMMENT
        .captures_iter(content)
        .filter_map(|caps| {
            let body = caps.get(1)?;
            let raw = body.as_str().trim().trim_start_matches('*').trim();
            if is_directive(raw) {
                return None;
            }
            let text = clean_block_comment(body.as_str());
            if text.chars().count() < MIN_BLOCK_COMMENT_CHARS {
                return None;
            }
            Some(Comment {
                offset: body.start(),
                text,
                is_block: true,
            })
        })
        .collect()
}

/// All kept comments in source order, at most `limit`
pub fn extract_comments(content: &str, limit: usize) -> Vec<Comment> {
    let blocks = block_comments(content);
    // Line-comment markers inside a block comment belong to the block
    let spans: Vec<(usize, usize)> = BLOCK_COMMENT
        .find_iter(content)
        .map(|m| (m.start(), m.end()))
        .collect();

    let mut comments: Vec<Comment> = line_comments(content)
        .into_iter()
        .filter(|c| !spans.iter().any(|(s, e)| c.offset > *s && c.offset < *e))
        .chain(blocks)
        .collect();
    comments.sort_by_key(|c| c.offset);
    comments.truncate(limit);
    comments
}

/// The description of a component: its first kept comment
pub fn description(comments: &[Comment]) -> Option<String> {
    comments.first().map(|c| c.text.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(comments: &[Comment]) -> Vec<&str> {
        comments.iter().map(|c| c.text.as_str()).collect()
    }

    #[test]
    fn test_line_comments_skip_directives_and_short() {
        let content = "// eslint-disable-next-line\n// @ts-ignore\n// ok\n// Renders the login form\nconst url = 'https://example.com'; // trailing note here";
        assert_eq!(
            texts(&line_comments(content)),
            vec!["Renders the login form", "trailing note here"]
        );
    }

    #[test]
    fn test_triple_slash_directive_is_skipped() {
        let content = "/// <reference types=\"vite/client\" />";
        assert!(line_comments(content).is_empty());
    }

    #[test]
    fn test_block_comment_strips_jsdoc_tags() {
        let content = "/**\n * Primary call to action.\n * @param {string} label shown text\n */";
        assert_eq!(
            texts(&block_comments(content)),
            vec!["Primary call to action. label shown text"]
        );
    }

    #[test]
    fn test_short_and_directive_blocks_are_skipped() {
        let content = "/* short */\n/* eslint-disable react/prop-types */";
        assert!(block_comments(content).is_empty());
    }

    #[test]
    fn test_extract_comments_order_and_cap() {
        let content = "/** Header navigation bar */\n// first line note\n/* second block note */\n// third line note\n// fourth line note\n// fifth line note";
        let comments = extract_comments(content, 5);
        assert_eq!(
            texts(&comments),
            vec![
                "Header navigation bar",
                "first line note",
                "second block note",
                "third line note",
                "fourth line note"
            ]
        );
        assert_eq!(description(&comments).as_deref(), Some("Header navigation bar"));
    }

    #[test]
    fn test_line_marker_inside_block_is_ignored() {
        let content = "/*\n * See https://docs.example.com for // details\n */";
        let comments = extract_comments(content, 5);
        assert_eq!(comments.len(), 1);
        assert!(comments[0].is_block);
    }

    #[test]
    fn test_no_comments() {
        assert!(extract_comments("const a = 1;", 5).is_empty());
        assert_eq!(description(&[]), None);
    }
}
