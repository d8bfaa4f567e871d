//! Coercions applied to raw input strings before a payload is built:
//! empty strings become absent values, numbers are parsed with a
//! user-facing message on failure.

use chrono::NaiveDate;

/// Empty or whitespace-only input becomes `None`.
pub fn optional_text(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}

/// Monetary field; blank means the component is absent and defaults to 0
/// at submission time.
/// # Errors
/// This function will return an error if the input is non-blank and not a
/// number
pub fn parse_fee(value: &str) -> Result<Option<f64>, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse::<f64>()
        .map(Some)
        .map_err(|_| format!("`{trimmed}` is not a number"))
}

/// Percentage field; blank means 0.
/// # Errors
/// This function will return an error if the input is not a whole number
/// between 0 and 100
pub fn parse_percentage(value: &str) -> Result<u8, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }
    let share = trimmed
        .parse::<u8>()
        .map_err(|_| format!("`{trimmed}` is not a whole number between 0 and 100"))?;
    if share > 100 {
        return Err(format!("`{trimmed}` is more than 100"));
    }
    Ok(share)
}

/// Record id typed or pasted into a form.
/// # Errors
/// This function will return an error if the input is not a positive
/// integer
pub fn parse_id(value: &str) -> Result<i64, String> {
    let trimmed = value.trim();
    trimmed
        .parse::<i64>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| format!("`{trimmed}` is not a valid id"))
}

/// Value of an `<input type="date">`, always `YYYY-MM-DD`.
/// # Errors
/// This function will return an error if the input is blank or malformed
pub fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| "Pick a date for the event".to_owned())
}

#[cfg(test)]
mod test {
    use rstest::rstest;

    use super::{optional_text, parse_date, parse_fee, parse_id, parse_percentage};

    #[rstest]
    #[case("", None)]
    #[case("   ", None)]
    #[case(" Violinist ", Some("Violinist"))]
    fn optional_text_should_drop_blank_input(#[case] input: &str, #[case] expected: Option<&str>) {
        assert_eq!(optional_text(input).as_deref(), expected);
    }

    #[rstest]
    #[case("", Ok(None))]
    #[case("1000", Ok(Some(1000.0)))]
    #[case(" 12.5 ", Ok(Some(12.5)))]
    fn parse_fee_should_coerce_blank_to_absent(
        #[case] input: &str,
        #[case] expected: Result<Option<f64>, String>,
    ) {
        assert_eq!(parse_fee(input), expected);
    }

    #[test]
    fn parse_fee_should_reject_junk() {
        assert!(parse_fee("a lot").is_err());
    }

    #[rstest]
    #[case("", 0)]
    #[case("70", 70)]
    #[case("100", 100)]
    fn parse_percentage_should_accept_whole_shares(#[case] input: &str, #[case] expected: u8) {
        assert_eq!(parse_percentage(input), Ok(expected));
    }

    #[rstest]
    #[case("101")]
    #[case("-5")]
    #[case("70.5")]
    #[case("most of it")]
    fn parse_percentage_should_reject_out_of_range(#[case] input: &str) {
        assert!(parse_percentage(input).is_err());
    }

    #[rstest]
    #[case("42", Ok(42))]
    #[case(" 7 ", Ok(7))]
    fn parse_id_should_accept_positive_integers(
        #[case] input: &str,
        #[case] expected: Result<i64, String>,
    ) {
        assert_eq!(parse_id(input), expected);
    }

    #[rstest]
    #[case("0")]
    #[case("-3")]
    #[case("forty-two")]
    fn parse_id_should_reject_non_positive_input(#[case] input: &str) {
        assert!(parse_id(input).is_err());
    }

    #[test]
    fn parse_date_should_read_html_date_inputs() {
        let date = parse_date("2026-08-07").unwrap();
        assert_eq!(date.to_string(), "2026-08-07");
        assert!(parse_date("07/08/2026").is_err());
    }
}
