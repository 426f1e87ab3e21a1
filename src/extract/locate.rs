// src/extract/locate.rs

/// The shortest text that unambiguously opens an array of date-keyed
/// objects. One optional space before the colon is tolerated.
const ARRAY_PREFIXES: [&str; 2] = [r#"[{"date":"#, r#"[{"date" :"#];

/// All byte offsets where `anchor` occurs in `buf`. Exact, case-sensitive.
pub fn occurrences(buf: &str, anchor: &str) -> Vec<usize> {
    if anchor.is_empty() {
        return Vec::new();
    }
    let mut offsets = Vec::new();
    let mut pos = 0usize;
    while let Some(rel) = buf[pos..].find(anchor) {
        offsets.push(pos + rel);
        pos += rel + anchor.len();
    }
    offsets
}

/// Search the clamped window around one anchor occurrence for the start of
/// a candidate record array. The first prefix hit in the window wins; None
/// when the window holds no array start.
pub fn candidate_in_window(
    buf: &str,
    occ_start: usize,
    occ_end: usize,
    window_before: usize,
    window_after: usize,
) -> Option<usize> {
    let lo = floor_char_boundary(buf, occ_start.saturating_sub(window_before));
    let hi = ceil_char_boundary(buf, occ_end.saturating_add(window_after).min(buf.len()));
    let window = &buf[lo..hi];
    ARRAY_PREFIXES
        .iter()
        .filter_map(|prefix| window.find(prefix))
        .min()
        .map(|rel| lo + rel)
}

fn floor_char_boundary(s: &str, mut i: usize) -> usize {
    while i > 0 && !s.is_char_boundary(i) {
        i -= 1;
    }
    i
}

fn ceil_char_boundary(s: &str, mut i: usize) -> usize {
    while i < s.len() && !s.is_char_boundary(i) {
        i += 1;
    }
    i
}
