//! Snippet regeneration for prompt payloads.
//!
//! A snippet is the source of one definition, decorators and nested body
//! included, regenerated from the entity's subtree so it parses on its own:
//! - comment nodes are removed, and lines that only held a comment dropped
//! - the block is dedented to column 0
//! - trailing whitespace is stripped and line endings become `\n`
//!
//! Rows inside a multi-line string literal keep their indentation and
//! trailing whitespace, so the literal's value is unchanged.
//!
//! Rendering a snippet that was itself produced by [`render_snippet`] yields
//! the same text.

use std::ops::Range;

use crate::parser::SourceEntity;

/// Regenerate the source text of `entity` from `source`.
///
/// Falls back to [`render_lines`] when the recorded span does not fit the
/// given source.
pub fn render_snippet(source: &str, entity: &SourceEntity) -> String {
    let span = &entity.span;
    let Some(body) = source.get(span.start_byte..span.end_byte) else {
        tracing::warn!(
            name = %entity.name,
            "span does not match source, slicing by line numbers"
        );
        return render_lines(source, entity);
    };

    let mut lines = Vec::new();
    let mut line_start = span.start_byte;

    for (index, raw) in body.split('\n').enumerate() {
        let line_end = line_start + raw.len();

        let mut text = String::with_capacity(raw.len());
        let mut had_comment = false;
        let mut pos = line_start;
        for comment in entity
            .comments
            .iter()
            .filter(|c| c.start >= line_start && c.end <= line_end)
        {
            text.push_str(&source[pos..comment.start]);
            pos = comment.end;
            had_comment = true;
        }
        text.push_str(&source[pos..line_end]);

        // Rows of a multi-line string are part of its value.
        let starts_in_string = inside_string(&entity.strings, line_start);
        let ends_in_string = inside_string(&entity.strings, line_end);
        line_start = line_end + 1;

        let content = text.strip_suffix('\r').unwrap_or(&text);
        let trimmed = if ends_in_string {
            content
        } else {
            content.trim_end()
        };
        if had_comment && trimmed.is_empty() {
            continue;
        }

        // The first line already starts at the definition's column.
        let line = if index == 0 || starts_in_string {
            trimmed
        } else {
            dedent(trimmed, span.start_column)
        };
        lines.push(line.to_string());
    }

    lines.join("\n")
}

/// Slice the original text between the entity's first and last lines.
pub fn render_lines(source: &str, entity: &SourceEntity) -> String {
    let span = &entity.span;
    let first = span.start_line.saturating_sub(1);
    let count = span.end_line.saturating_sub(first).max(1);

    source
        .lines()
        .skip(first)
        .take(count)
        .collect::<Vec<_>>()
        .join("\n")
}

fn inside_string(strings: &[Range<usize>], offset: usize) -> bool {
    strings.iter().any(|s| s.start < offset && offset < s.end)
}

/// Strip up to `width` bytes of leading indentation.
fn dedent(line: &str, width: usize) -> &str {
    let strip = line
        .bytes()
        .take(width)
        .take_while(|b| *b == b' ' || *b == b'\t')
        .count();
    &line[strip..]
}
