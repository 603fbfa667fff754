// src/core/sanitize.rs

/// Collapse runs of whitespace into one space and trim the ends.
pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// Business keys compare on their trimmed text.
pub fn normalize_key(s: &str) -> String {
    s.trim().to_string()
}

/// Clean a header row: whitespace-normalized names, blanks become
/// `Unnamed: <i>`, repeats get `.1`, `.2`, … suffixes.
pub fn unique_headers<I, S>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out: Vec<String> = Vec::new();
    for (i, name) in raw.into_iter().enumerate() {
        let base = normalize_ws(name.as_ref());
        let base = if base.is_empty() { format!("Unnamed: {i}") } else { base };

        let mut candidate = base.clone();
        let mut n = 0;
        while out.contains(&candidate) {
            n += 1;
            candidate = format!("{base}.{n}");
        }
        out.push(candidate);
    }
    out
}
