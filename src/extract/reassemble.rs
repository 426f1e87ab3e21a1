// src/extract/reassemble.rs
// The server-rendered page streams its state as many JSON string literals
// pushed through a bootstrap hook. Harvesting pulls those literals out of
// the serialized source in document order; reassembly unescapes each and
// concatenates them into the single buffer all later scanning runs over.

use log::warn;

/// The streaming bootstrap call the chunks hide in.
const CHUNK_MARKER: &str = "self.__next_f.push([";

/// Raw (still escaped) chunk payloads in document order. The string literal
/// boundary scan honors `\"` so an escaped quote never ends a chunk.
pub fn harvest_chunks(source: &str) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut pos = 0usize;
    while let Some(rel) = source[pos..].find(CHUNK_MARKER) {
        let after = pos + rel + CHUNK_MARKER.len();
        match string_literal_after(source, after) {
            Some((start, end)) => {
                chunks.push(source[start + 1..end - 1].to_string());
                pos = end;
            }
            // push([0]) and friends carry no payload literal
            None => pos = after,
        }
    }
    chunks
}

/// Decode and concatenate chunks strictly in the supplied order. A chunk
/// with malformed escapes keeps its raw text instead of being dropped, so
/// corruption in one chunk cannot hide valid data elsewhere in the buffer.
pub fn reassemble(chunks: &[String]) -> String {
    let mut buf = String::new();
    for (i, chunk) in chunks.iter().enumerate() {
        let quoted = format!("\"{}\"", chunk);
        match serde_json::from_str::<String>(&quoted) {
            Ok(decoded) => buf.push_str(&decoded),
            Err(e) => {
                warn!("chunk {}: malformed escape ({}), keeping raw text", i, e);
                buf.push_str(chunk);
            }
        }
    }
    buf
}

/// Find the bounds of the first string literal starting at or shortly after
/// `from` (the chunk index and comma sit between the marker and the quote).
/// Returns (opening quote, one past closing quote).
fn string_literal_after(source: &str, from: usize) -> Option<(usize, usize)> {
    let bytes = source.as_bytes();
    let mut i = from;
    // Skip the leading stream-id and separator, nothing else
    while i < bytes.len() && matches!(bytes[i], b'0'..=b'9' | b',' | b' ') {
        i += 1;
    }
    if bytes.get(i) != Some(&b'"') {
        return None;
    }
    let open = i;
    i += 1;
    let mut escaped = false;
    while i < bytes.len() {
        let b = bytes[i];
        if escaped {
            escaped = false;
        } else if b == b'\\' {
            escaped = true;
        } else if b == b'"' {
            return Some((open, i + 1));
        }
        i += 1;
    }
    None
}
