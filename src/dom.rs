// src/dom.rs
// String-level HTML helpers for snapshot element handles. Deliberately
// naive: they only need to walk simple tag blocks (tr/td/button) inside a
// subtree that a full selector engine already carved out. Fragment
// re-parsing is avoided because table innards get fostered out of orphaned
// fragments.

/// Find the next complete `<tag ...>...</tag>` block from `from` onwards,
/// ASCII-case-insensitive on the tag name. Returns (start, end) byte
/// offsets spanning the whole block.
pub fn next_tag_block(s: &str, tag: &str, from: usize) -> Option<(usize, usize)> {
    let lc = to_lowercase_fast(s);
    let open_lc = format!("<{}", to_lowercase_fast(tag));
    let close_lc = format!("</{}>", to_lowercase_fast(tag));

    let mut at = from;
    let start = loop {
        let rel = lc.get(at..)?.find(&open_lc)?;
        let idx = at + rel;
        // Reject prefix collisions like <thead> when scanning for <th>
        match lc.as_bytes().get(idx + open_lc.len()) {
            Some(b) if b.is_ascii_alphanumeric() => at = idx + 1,
            _ => break idx,
        }
    };
    let open_end = s[start..].find('>')? + start + 1;
    let end_rel = lc[open_end..].find(&close_lc)?;
    Some((start, open_end + end_rel + close_lc.len()))
}

/// All complete blocks of `tag` inside `s`, in document order.
pub fn tag_blocks<'a>(s: &'a str, tag: &str) -> Vec<&'a str> {
    let mut blocks = Vec::new();
    let mut pos = 0usize;
    while let Some((start, end)) = next_tag_block(s, tag, pos) {
        blocks.push(&s[start..end]);
        pos = end;
    }
    blocks
}

/// Given `<td ...>INNER</td>`, return INNER (may still contain nested tags).
pub fn inner_after_open_tag(block: &str) -> &str {
    if let Some(open_end) = block.find('>') {
        if let Some(close_start) = block.rfind('<') {
            if close_start > open_end {
                return &block[open_end + 1..close_start];
            }
        }
    }
    ""
}

/// Remove all `<...>` tags, decode the common entities, collapse whitespace.
pub fn strip_tags(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_tag = false;
    for ch in s.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    normalize_ws(&normalize_entities(&out))
}

/// Minimal entity decoding: `&nbsp;` and `&amp;` only.
pub fn normalize_entities(s: &str) -> String {
    s.replace("&nbsp;", " ").replace("&amp;", "&")
}

/// Collapse whitespace runs into single spaces and trim.
pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space {
                out.push(' ');
                prev_space = true;
            }
        } else {
            out.push(ch);
            prev_space = false;
        }
    }
    out.trim().to_string()
}

/// Read an attribute value out of an opening tag. Handles `name="v"`,
/// `name='v'` and bare `name=v`; a valueless attribute reads as "".
pub fn tag_attr(open_tag: &str, name: &str) -> Option<String> {
    let lc = to_lowercase_fast(open_tag);
    let needle = to_lowercase_fast(name);
    let mut at = 0usize;
    loop {
        let idx = lc.get(at..)?.find(&needle)? + at;
        // Must be preceded by whitespace and followed by '=', whitespace or '>'
        let before_ok = idx > 0 && lc.as_bytes()[idx - 1].is_ascii_whitespace();
        let after = lc.as_bytes().get(idx + needle.len()).copied();
        let after_ok = match after {
            None | Some(b'=') | Some(b'>') | Some(b'/') => true,
            Some(b) => b.is_ascii_whitespace(),
        };
        if !before_ok || !after_ok {
            at = idx + 1;
            continue;
        }
        return match after {
            Some(b'=') => {
                let rest = &open_tag[idx + needle.len() + 1..];
                let rest = rest.trim_start();
                let value = match rest.as_bytes().first() {
                    Some(b'"') => rest[1..].split('"').next().unwrap_or(""),
                    Some(b'\'') => rest[1..].split('\'').next().unwrap_or(""),
                    _ => rest
                        .split(|c: char| c.is_ascii_whitespace() || c == '>')
                        .next()
                        .unwrap_or(""),
                };
                Some(value.to_string())
            }
            _ => Some(String::new()),
        };
    }
}

/// Fast ASCII-only lowercasing for tag/attribute matching.
fn to_lowercase_fast(s: &str) -> String {
    s.chars()
        .map(|c| if c.is_ascii() { c.to_ascii_lowercase() } else { c })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_blocks_walks_cells() {
        let row = r#"<tr><td>BNBL</td> <td class="name">Bhutan National Bank</td><td>34.50</td></tr>"#;
        let cells = tag_blocks(row, "td");
        assert_eq!(cells.len(), 3);
        assert_eq!(strip_tags(inner_after_open_tag(cells[0])), "BNBL");
        assert_eq!(
            strip_tags(inner_after_open_tag(cells[1])),
            "Bhutan National Bank"
        );
    }

    #[test]
    fn tag_scan_skips_prefix_collisions() {
        let html = "<thead><th>Symbol</th></thead>";
        let ths = tag_blocks(html, "th");
        assert_eq!(ths.len(), 1);
        assert_eq!(strip_tags(ths[0]), "Symbol");
    }

    #[test]
    fn strip_tags_decodes_and_collapses() {
        assert_eq!(
            strip_tags("<b>&nbsp;Penden\n   Cement&amp;Co</b>"),
            "Penden Cement&Co"
        );
    }

    #[test]
    fn unterminated_block_yields_nothing() {
        assert!(tag_blocks("<td>never closed", "td").is_empty());
    }

    #[test]
    fn reads_quoted_and_bare_attributes() {
        let tag = r#"<button aria-label="Next page" data-page=3 disabled>"#;
        assert_eq!(tag_attr(tag, "aria-label").as_deref(), Some("Next page"));
        assert_eq!(tag_attr(tag, "data-page").as_deref(), Some("3"));
        assert_eq!(tag_attr(tag, "disabled").as_deref(), Some(""));
        assert_eq!(tag_attr(tag, "href"), None);
    }
}
