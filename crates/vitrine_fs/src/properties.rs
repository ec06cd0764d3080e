//! A reader for `.properties` message bundles.
//!
//! Supports `#`/`!` comments, `=`, `:` and whitespace separators, backslash line
//! continuations and the usual escapes including `\uXXXX` (surrogate pairs included).
//! Malformed `\u` escapes are kept as literal text.

use vitrine_core::messages::MessageBundle;

const WHITESPACE: [char; 3] = [' ', '\t', '\x0c'];

pub fn parse_properties(input: &str) -> MessageBundle {
    logical_lines(input)
        .iter()
        .map(|line| {
            let (key, value) = split_entry(line);
            (unescape(key), unescape(value))
        })
        .collect()
}

/// Joins continued lines and drops comments and blank lines.
fn logical_lines(input: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut continuing = false;

    for raw in input.lines() {
        let line = raw.trim_start_matches(WHITESPACE);
        if !continuing && (line.is_empty() || line.starts_with(['#', '!'])) {
            continue;
        }

        let trailing = line.chars().rev().take_while(|c| *c == '\\').count();
        continuing = trailing % 2 == 1;
        if continuing {
            current.push_str(&line[..line.len() - 1]);
        } else {
            current.push_str(line);
            lines.push(std::mem::take(&mut current));
        }
    }
    if continuing {
        lines.push(current);
    }
    lines
}

fn split_entry(line: &str) -> (&str, &str) {
    let mut escaped = false;
    let mut key_end = line.len();
    for (i, c) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '=' | ':' => {
                key_end = i;
                break;
            }
            c if WHITESPACE.contains(&c) => {
                key_end = i;
                break;
            }
            _ => {}
        }
    }

    let rest = line[key_end..].trim_start_matches(WHITESPACE);
    let rest = rest
        .strip_prefix(['=', ':'])
        .unwrap_or(rest)
        .trim_start_matches(WHITESPACE);
    (&line[..key_end], rest)
}

fn unescape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut units: Vec<u16> = Vec::new();
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\\' && chars.peek() == Some(&'u') {
            let hex: String = chars.clone().skip(1).take(4).collect();
            if hex.len() == 4
                && hex.chars().all(|h| h.is_ascii_hexdigit())
                && let Ok(unit) = u16::from_str_radix(&hex, 16)
            {
                units.push(unit);
                chars.nth(4);
                continue;
            }
        }

        if !units.is_empty() {
            out.push_str(&String::from_utf16_lossy(&units));
            units.clear();
        }

        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\x0c'),
            Some(other) => out.push(other),
            None => {}
        }
    }

    if !units.is_empty() {
        out.push_str(&String::from_utf16_lossy(&units));
    }
    out
}
