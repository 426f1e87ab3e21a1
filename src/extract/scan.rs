// src/extract/scan.rs

/// Find the end of the balanced array starting at `start`, which must point
/// at `[`. Runs over the decoded buffer: bracket depth changes only count
/// outside string literals, a `\` consumes exactly the next byte, and an
/// unescaped `"` toggles the in-string flag. Returns the offset one past
/// the closing bracket, or None when the buffer ends mid-array.
pub fn balanced_span(buf: &str, start: usize) -> Option<usize> {
    let bytes = buf.as_bytes();
    if bytes.get(start) != Some(&b'[') {
        return None;
    }
    let mut depth = 0i64;
    let mut in_string = false;
    let mut escaped = false;
    for (i, &b) in bytes.iter().enumerate().skip(start) {
        if escaped {
            escaped = false;
        } else if in_string {
            match b {
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
        } else {
            match b {
                b'"' => in_string = true,
                b'[' => depth += 1,
                b']' => {
                    depth -= 1;
                    if depth == 0 {
                        return Some(i + 1);
                    }
                }
                _ => {}
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_exact_end_of_flat_array() {
        let buf = r#"x=[1,2,3];rest"#;
        let end = balanced_span(buf, 2).unwrap();
        assert_eq!(&buf[2..end], "[1,2,3]");
    }

    #[test]
    fn brackets_inside_strings_are_not_structural() {
        let buf = r#"[{"note":"a ] stray [ pair"},{"n":2}] tail"#;
        let end = balanced_span(buf, 0).unwrap();
        assert_eq!(&buf[..end], r#"[{"note":"a ] stray [ pair"},{"n":2}]"#);
    }

    #[test]
    fn escaped_quotes_keep_the_string_open() {
        let buf = r#"[{"q":"she said \"hi ]\" then left"}]end"#;
        let end = balanced_span(buf, 0).unwrap();
        assert_eq!(&buf[..end], r#"[{"q":"she said \"hi ]\" then left"}]"#);
        // the returned span is itself well-formed
        assert!(serde_json::from_str::<serde_json::Value>(&buf[..end]).is_ok());
    }

    #[test]
    fn nested_arrays_balance() {
        let buf = "[[1,[2]],[3]]x";
        assert_eq!(balanced_span(buf, 0), Some(13));
    }

    #[test]
    fn truncated_array_yields_no_span() {
        assert_eq!(balanced_span(r#"[{"date":"2024-01-01""#, 0), None);
    }

    #[test]
    fn unterminated_string_yields_no_span() {
        assert_eq!(balanced_span(r#"[{"date":"2024-01-]"#, 0), None);
    }

    #[test]
    fn start_must_be_an_opening_bracket() {
        assert_eq!(balanced_span("abc[1]", 0), None);
    }
}
