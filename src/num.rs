// src/num.rs
use crate::models::CellValue;

/// Strip thousands separators, the Nu. currency marker and a percent sign,
/// then parse as a float. Non-numeric text comes back trimmed but otherwise
/// unchanged; empty text is `None`.
pub fn parse_number(text: &str) -> Option<CellValue> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    let clean = trimmed.replace(',', "").replace("Nu.", "").replace('%', "");
    match clean.trim().parse::<f64>() {
        Ok(n) => Some(CellValue::Num(n)),
        Err(_) => Some(CellValue::Text(trimmed.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_thousands_separators() {
        assert_eq!(parse_number("1,234.50"), Some(CellValue::Num(1234.5)));
    }

    #[test]
    fn strips_currency_marker() {
        assert_eq!(parse_number("Nu. 500"), Some(CellValue::Num(500.0)));
    }

    #[test]
    fn strips_percent() {
        assert_eq!(parse_number("-1.25%"), Some(CellValue::Num(-1.25)));
    }

    #[test]
    fn non_numeric_text_is_kept_trimmed() {
        assert_eq!(
            parse_number("  N/A "),
            Some(CellValue::Text("N/A".to_string()))
        );
    }

    #[test]
    fn empty_cell_is_none() {
        assert_eq!(parse_number("   "), None);
        assert_eq!(parse_number(""), None);
    }
}
