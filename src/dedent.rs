//! Docstring normalization.
//!
//! Follows `textwrap.dedent` semantics:
//!
//! - Lines made only of spaces and tabs become empty and are ignored when
//!   computing the margin.
//! - The margin is the longest common leading whitespace *string*. Tabs and
//!   spaces are compared literally, so `"\t"` and `"    "` share no margin.
//! - The margin is removed from every line that starts with it.

/// Normalize a raw docstring into template source.
///
/// Drops exactly one leading `\n`, then dedents the remainder.
///
/// ```
/// use templatify::normalize_docstring;
///
/// let doc = "\n    Hello {{ name }}\n      indented\n    ";
/// assert_eq!(normalize_docstring(doc), "Hello {{ name }}\n  indented\n");
/// ```
pub fn normalize_docstring(raw: &str) -> String {
    let body = raw.strip_prefix('\n').unwrap_or(raw);
    dedent(body)
}

/// Remove the common leading whitespace from every line of `text`.
pub fn dedent(text: &str) -> String {
    let lines: Vec<&str> = text
        .split('\n')
        .map(|line| if is_blank(line) { "" } else { line })
        .collect();

    let mut margin: Option<&str> = None;
    for line in &lines {
        let indent = leading_whitespace(line);
        if indent.len() == line.len() {
            // Empty line; never contributes.
            continue;
        }
        margin = Some(match margin {
            None => indent,
            Some(current) => common_prefix(current, indent),
        });
    }

    let margin = margin.unwrap_or("");
    if margin.is_empty() {
        return lines.join("\n");
    }

    lines
        .iter()
        .map(|line| line.strip_prefix(margin).unwrap_or(line))
        .collect::<Vec<_>>()
        .join("\n")
}

fn is_blank(line: &str) -> bool {
    !line.is_empty() && line.chars().all(|c| c == ' ' || c == '\t')
}

fn leading_whitespace(line: &str) -> &str {
    let end = line
        .find(|c: char| c != ' ' && c != '\t')
        .unwrap_or(line.len());
    &line[..end]
}

fn common_prefix<'a>(a: &'a str, b: &str) -> &'a str {
    let end = a
        .bytes()
        .zip(b.bytes())
        .take_while(|(x, y)| x == y)
        .count();
    // Only ASCII spaces and tabs reach here, so any byte offset is a char boundary.
    &a[..end]
}
