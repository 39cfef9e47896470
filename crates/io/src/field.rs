//! Fixed-width field extraction shared by the text readers.

use std::str::FromStr;

/// Parses the `width` columns starting at byte `start`, trimmed.
///
/// Returns `None` for fields past the end of the line, blank fields,
/// fields straddling a non-ASCII boundary, and unparsable content —
/// the caller skips all of these alike.
pub(crate) fn parse_field<T: FromStr>(line: &str, start: usize, width: usize) -> Option<T> {
    let field = line.get(start..start + width)?.trim();
    if field.is_empty() {
        return None;
    }
    field.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_and_parses() {
        assert_eq!(parse_field::<f64>("   2.5   x", 0, 9), Some(2.5));
        assert_eq!(parse_field::<u32>("      108", 0, 9), Some(108));
    }

    #[test]
    fn blank_and_bad_fields_are_none() {
        assert_eq!(parse_field::<f64>("         ", 0, 9), None);
        assert_eq!(parse_field::<f64>("     n/a ", 0, 9), None);
    }

    #[test]
    fn out_of_range_is_none() {
        assert_eq!(parse_field::<f64>("1.0", 0, 9), None);
        assert_eq!(parse_field::<f64>("123456789", 5, 9), None);
    }
}
