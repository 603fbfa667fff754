// src/config/env_file.rs
//
// `KEY=VALUE` settings file, one pair per line.
// Supports `#` comments, an optional `export ` prefix, and quoted values
// with backslash escapes. Text after a closing quote is ignored.

use std::collections::HashMap;
use std::path::Path;
use std::{fs, io};

pub fn parse(text: &str) -> HashMap<String, String> {
    let mut out = HashMap::new();
    for raw in text.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let line = line.strip_prefix("export ").unwrap_or(line);
        let Some((key, value)) = line.split_once('=') else {
            logd!("config: skipping line without '=': {}", line);
            continue;
        };
        let key = key.trim();
        if key.is_empty() {
            continue;
        }
        out.insert(key.to_string(), parse_value(value.trim()));
    }
    out
}

fn parse_value(v: &str) -> String {
    let mut chars = v.chars();
    match chars.next() {
        Some(q @ ('"' | '\'')) => match unquote(chars, q) {
            Some(inner) => inner,
            None => {
                logd!("config: unterminated quote in {}", v);
                strip_comment(v).to_string()
            }
        },
        _ => strip_comment(v).to_string(),
    }
}

/// Read up to the closing `q`. Double quotes understand `\n`, `\t` and `\r`;
/// in both styles a backslash keeps the next character literally.
fn unquote(mut chars: std::str::Chars<'_>, q: char) -> Option<String> {
    let mut out = String::new();
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next()? {
                'n' if q == '"' => out.push('\n'),
                't' if q == '"' => out.push('\t'),
                'r' if q == '"' => out.push('\r'),
                e if e == q || e == '\\' => out.push(e),
                e => {
                    out.push('\\');
                    out.push(e);
                }
            },
            c if c == q => return Some(out),
            c => out.push(c),
        }
    }
    None
}

/// Unquoted values may carry a trailing ` # comment`.
fn strip_comment(v: &str) -> &str {
    match v.find(" #").or_else(|| v.find("\t#")) {
        Some(ix) => v[..ix].trim_end(),
        None => v,
    }
}

/// Read a settings file. A missing file is an empty set, not an error.
pub fn load(path: &Path) -> io::Result<HashMap<String, String>> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(parse(&text)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(HashMap::new()),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_pairs_comments_and_quotes() {
        let text = r#"
            # portal
            FROTA162_LOGIN_URL=https://portal.example/login
            export FROTA162_USERNAME = "fleet user"
            FROTA162_PASSWORD='p#ss=word'
            NOISE
            TIMEOUT=45 # seconds
        "#;
        let map = parse(text);
        assert_eq!(map["FROTA162_LOGIN_URL"], "https://portal.example/login");
        assert_eq!(map["FROTA162_USERNAME"], "fleet user");
        assert_eq!(map["FROTA162_PASSWORD"], "p#ss=word");
        assert_eq!(map["TIMEOUT"], "45");
        assert!(!map.contains_key("NOISE"));
    }

    #[test]
    fn quoted_value_ignores_trailing_comment() {
        let map = parse("FROTA162_PASSWORD=\"s3cret\" # portal\nOTHER='x y'   # note");
        assert_eq!(map["FROTA162_PASSWORD"], "s3cret");
        assert_eq!(map["OTHER"], "x y");
    }

    #[test]
    fn escapes_inside_quotes() {
        let map = parse(r#"
            A="say \"hi\""
            B="line\nbreak"
            C='it\'s'
            D="C:\path"
        "#);
        assert_eq!(map["A"], r#"say "hi""#);
        assert_eq!(map["B"], "line\nbreak");
        assert_eq!(map["C"], "it's");
        assert_eq!(map["D"], r"C:\path");
    }

    #[test]
    fn unterminated_quote_keeps_raw_text() {
        let map = parse("A=\"open # note");
        assert_eq!(map["A"], "\"open");
    }

    #[test]
    fn missing_file_is_empty() {
        let map = load(Path::new("definitely/not/here/config.env")).unwrap();
        assert!(map.is_empty());
    }
}
