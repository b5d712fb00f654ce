//! Logical line scanning for Inno Setup scripts
//!
//! Turns raw script text into logical lines tagged with the section they
//! belong to and the physical line they started on. Comments, blank lines
//! and `[Code]` bodies never reach the caller.

/// One logical line of the script
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicalLine {
    /// 1-based physical line the logical line starts on
    pub line: usize,
    /// Lowercased name of the enclosing section (`files`, `components`, ...)
    pub section: String,
    /// Trimmed text with continuations joined
    pub text: String,
}

fn is_comment(line: &str) -> bool {
    line.starts_with(';') || line.starts_with("//")
}

fn section_header(line: &str) -> Option<String> {
    let inner = line.strip_prefix('[')?.strip_suffix(']')?;
    if inner.is_empty() || inner.contains(['[', ']']) {
        return None;
    }
    Some(inner.trim().to_ascii_lowercase())
}

fn has_open_quote(text: &str) -> bool {
    text.chars().filter(|c| *c == '"').count() % 2 == 1
}

/// Split script text into logical lines
///
/// A physical line whose last character is `\` outside an open quote is
/// joined with the following line.
pub fn logical_lines(text: &str) -> Vec<LogicalLine> {
    let mut lines = Vec::new();
    let mut section = String::new();
    let mut pending: Option<(usize, String)> = None;

    for (idx, raw) in text.lines().enumerate() {
        let trimmed = raw.trim();

        let (start, joined) = match pending.take() {
            Some((start, mut acc)) => {
                acc.push_str(trimmed);
                (start, acc)
            }
            None => {
                if trimmed.is_empty() || is_comment(trimmed) {
                    continue;
                }
                if let Some(name) = section_header(trimmed) {
                    section = name;
                    continue;
                }
                if section == "code" {
                    continue;
                }
                (idx + 1, trimmed.to_string())
            }
        };

        if let Some(head) = joined.strip_suffix('\\') {
            if !has_open_quote(head) {
                pending = Some((start, format!("{} ", head.trim_end())));
                continue;
            }
        }

        lines.push(LogicalLine {
            line: start,
            section: section.clone(),
            text: joined,
        });
    }

    if let Some((start, acc)) = pending {
        lines.push(LogicalLine {
            line: start,
            section,
            text: acc.trim_end().to_string(),
        });
    }

    lines
}

/// A `Key: value` parameter of an entry line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub key: String,
    pub value: String,
}

/// Parse an entry line in Inno parameter syntax
///
/// Parameters are separated by `;`. Quoted values may contain `;` and use
/// `""` for a literal quote. Returns `None` when a segment has no `:`.
pub fn parse_params(text: &str) -> Option<Vec<Param>> {
    let mut params = Vec::new();
    let mut chars = text.chars().peekable();

    loop {
        while chars.peek().is_some_and(|c| c.is_whitespace() || *c == ';') {
            chars.next();
        }
        if chars.peek().is_none() {
            break;
        }

        let mut key = String::new();
        loop {
            match chars.next() {
                Some(':') => break,
                Some(';') | None => return None,
                Some(c) => key.push(c),
            }
        }
        let key = key.trim().to_string();
        if key.is_empty() {
            return None;
        }

        while chars.peek().is_some_and(|c| c.is_whitespace()) {
            chars.next();
        }

        let mut value = String::new();
        if chars.peek() == Some(&'"') {
            chars.next();
            loop {
                match chars.next() {
                    Some('"') if chars.peek() == Some(&'"') => {
                        chars.next();
                        value.push('"');
                    }
                    Some('"') => break,
                    Some(c) => value.push(c),
                    None => return None,
                }
            }
            // anything between the closing quote and the separator is dropped
            for c in chars.by_ref() {
                if c == ';' {
                    break;
                }
            }
        } else {
            for c in chars.by_ref() {
                if c == ';' {
                    break;
                }
                value.push(c);
            }
            value = value.trim().to_string();
        }

        params.push(Param { key, value });
    }

    Some(params)
}

/// Look up a parameter value by case-insensitive key
pub fn param<'a>(params: &'a [Param], key: &str) -> Option<&'a str> {
    params
        .iter()
        .find(|p| p.key.eq_ignore_ascii_case(key))
        .map(|p| p.value.as_str())
}
