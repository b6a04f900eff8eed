//! Extraction of top-level import specifiers from TypeScript source.

use regex::Regex;
use std::sync::LazyLock;

/// Matches a static import declaration starting at column 0.
///
/// Covers `import x from '...'`, `import * as x from '...'`,
/// `import { a, b } from '...'` (across lines), `import type ... from '...'`
/// and bare side-effect imports `import '...'`. Dynamic `import(...)` and
/// `import.meta` never match because `import` must be followed by whitespace.
static IMPORT_DECL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m)^import\s+(?:type\s+)?(?:[\w*${}\s,]+?\s+from\s*)?["']([^"'\r\n]+)["']"#)
        .expect("import declaration regex is valid")
});

/// Return every import specifier in source order.
pub fn import_specifiers(source: &str) -> Vec<String> {
    let stripped = strip_comments(source);
    IMPORT_DECL
        .captures_iter(&stripped)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Blank out `//` and `/* */` comments, keeping string literals intact.
///
/// Newlines inside block comments are preserved so declarations after a
/// comment still start at column 0.
fn strip_comments(source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    let mut chars = source.chars().peekable();
    let mut quote: Option<char> = None;

    while let Some(c) = chars.next() {
        if let Some(q) = quote {
            out.push(c);
            if c == '\\' {
                if let Some(escaped) = chars.next() {
                    out.push(escaped);
                }
            } else if c == q || (c == '\n' && q != '`') {
                quote = None;
            }
            continue;
        }

        match c {
            '\'' | '"' | '`' => {
                quote = Some(c);
                out.push(c);
            }
            '/' if chars.peek() == Some(&'/') => {
                for next in chars.by_ref() {
                    if next == '\n' {
                        out.push('\n');
                        break;
                    }
                }
            }
            '/' if chars.peek() == Some(&'*') => {
                chars.next();
                let mut prev = '\0';
                for next in chars.by_ref() {
                    if next == '\n' {
                        out.push('\n');
                    }
                    if prev == '*' && next == '/' {
                        break;
                    }
                    prev = next;
                }
            }
            _ => out.push(c),
        }
    }

    out
}
