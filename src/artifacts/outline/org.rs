//! Reading and writing outlines in Org syntax
//!
//! Only the subset the overview relies on is interpreted:
//!
//! - headings: `** TODO heading text`; without a keyword, a heading whose
//!   first word reads as one is written as `=TODO=` and read back as `TODO`
//! - property drawers placed directly below a heading
//! - everything else is kept verbatim as body text of the preceding heading
//!
//! Rendering a parsed outline reproduces that subset exactly, so syncing an
//! unchanged repository leaves the file byte-identical.

use crate::artifacts::outline::document::{Document, NodeId};
use crate::artifacts::outline::outline::Outline;
use crate::artifacts::outline::{
    DRAWER_END, DRAWER_START, HEADING_REGEX, KEYWORDS, PROPERTY_REGEX, ROOT_LEVEL,
};
use crate::errors::{OverviewError, OverviewResult};
use regex::Regex;
use std::borrow::Cow;
use std::fmt::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Right after a heading line; a drawer may start here.
    AfterHeading,
    InDrawer { opened_at: usize },
    Body,
}

pub fn parse(content: &str) -> OverviewResult<Outline> {
    let heading_re = Regex::new(HEADING_REGEX).map_err(|e| parse_error(0, e.to_string()))?;
    let property_re = Regex::new(PROPERTY_REGEX).map_err(|e| parse_error(0, e.to_string()))?;

    let mut outline = Outline::new();
    let mut stack = vec![outline.root()];
    let mut state = State::Body;

    for (index, line) in content.lines().enumerate() {
        let line_number = index + 1;
        let current = stack.last().copied().unwrap_or(outline.root());

        if let State::InDrawer { .. } = state {
            if line.trim() == DRAWER_END {
                state = State::Body;
                continue;
            }

            let captures = property_re.captures(line).ok_or_else(|| {
                parse_error(line_number, format!("malformed property line {line:?}"))
            })?;
            let value = captures.get(2).map_or("", |value| value.as_str());
            outline.set_property(current, &captures[1], value);
            continue;
        }

        if state == State::AfterHeading && line.trim() == DRAWER_START {
            state = State::InDrawer {
                opened_at: line_number,
            };
            continue;
        }

        if let Some(captures) = heading_re.captures(line) {
            let level = captures[1].len();
            let (keyword, heading) = split_keyword(&captures[2]);
            let heading = match keyword {
                Some(_) => Cow::Borrowed(heading),
                None => unescape_heading(heading),
            };

            while let Some(&top) = stack.last() {
                if top == outline.root() || outline.level(top) < level {
                    break;
                }
                stack.pop();
            }
            let parent = stack.last().copied().unwrap_or(outline.root());

            let node = outline.append_child(parent, &heading, level);
            outline.set_keyword(node, keyword.map(str::to_string));
            outline.set_source_line(node, line_number);
            stack.push(node);
            state = State::AfterHeading;
            continue;
        }

        outline.push_body_line(current, line.to_string());
        state = State::Body;
    }

    if let State::InDrawer { opened_at } = state {
        return Err(parse_error(
            opened_at,
            "property drawer is never closed".to_string(),
        ));
    }

    Ok(outline)
}

pub fn render(outline: &Outline) -> String {
    let mut out = String::new();

    for line in outline.body(outline.root()) {
        let _ = writeln!(out, "{line}");
    }

    for node in outline.descendants(outline.root()) {
        render_heading(outline, node, &mut out);

        let properties = outline.properties(node);
        if !properties.is_empty() {
            let _ = writeln!(out, "{DRAWER_START}");
            for (key, value) in properties {
                if value.is_empty() {
                    let _ = writeln!(out, ":{key}:");
                } else {
                    let _ = writeln!(out, ":{key}: {value}");
                }
            }
            let _ = writeln!(out, "{DRAWER_END}");
        }

        for line in outline.body(node) {
            let _ = writeln!(out, "{line}");
        }
    }

    out
}

fn render_heading(outline: &Outline, node: NodeId, out: &mut String) {
    let level = outline.level(node).max(ROOT_LEVEL + 1);
    out.push_str(&"*".repeat(level));
    out.push(' ');

    let heading = outline.heading(node);
    match outline.keyword(node) {
        Some(keyword) if heading.is_empty() => out.push_str(keyword),
        Some(keyword) => {
            let _ = write!(out, "{keyword} {heading}");
        }
        None => out.push_str(&escape_heading(heading)),
    }
    out.push('\n');
}

/// Wraps a keyword-like first word in one more pair of `=`.
fn escape_heading(heading: &str) -> Cow<'_, str> {
    let (first, _) = heading.split_once(' ').unwrap_or((heading, ""));

    if is_keyword_like(first) {
        Cow::Owned(format!("={first}={}", &heading[first.len()..]))
    } else {
        Cow::Borrowed(heading)
    }
}

fn unescape_heading(heading: &str) -> Cow<'_, str> {
    let (first, _) = heading.split_once(' ').unwrap_or((heading, ""));

    match first.strip_prefix('=').and_then(|word| word.strip_suffix('=')) {
        Some(inner) if is_keyword_like(inner) => {
            Cow::Owned(format!("{inner}{}", &heading[first.len()..]))
        }
        _ => Cow::Borrowed(heading),
    }
}

/// A keyword, possibly wrapped in any number of `=` pairs.
fn is_keyword_like(mut word: &str) -> bool {
    while let Some(inner) = word.strip_prefix('=').and_then(|word| word.strip_suffix('=')) {
        word = inner;
    }

    KEYWORDS.contains(word)
}

fn split_keyword(text: &str) -> (Option<&str>, &str) {
    let (first, rest) = text.split_once(' ').unwrap_or((text, ""));

    match KEYWORDS.get_key(first) {
        Some(keyword) => (Some(*keyword), rest.trim_start()),
        None => (None, text),
    }
}

fn parse_error(line_number: usize, message: String) -> OverviewError {
    OverviewError::OutlineParse {
        line_number,
        message,
    }
}
