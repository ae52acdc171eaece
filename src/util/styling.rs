/// A CSS length given either as a number or as text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Length<'a> {
    Empty,
    Number(f64),
    Text(&'a str),
}

impl From<f64> for Length<'_> {
    fn from(value: f64) -> Self {
        Length::Number(value)
    }
}

impl From<i32> for Length<'_> {
    fn from(value: i32) -> Self {
        Length::Number(f64::from(value))
    }
}

impl From<u32> for Length<'_> {
    fn from(value: u32) -> Self {
        Length::Number(f64::from(value))
    }
}

impl<'a> From<&'a str> for Length<'a> {
    fn from(value: &'a str) -> Self {
        Length::Text(value)
    }
}

impl<'a> From<&'a String> for Length<'a> {
    fn from(value: &'a String) -> Self {
        Length::Text(value.as_str())
    }
}

impl<'a, T: Into<Length<'a>>> From<Option<T>> for Length<'a> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Length::Empty, Into::into)
    }
}

/// Format a length as CSS pixels.
///
/// Empty, zero and non-finite inputs yield `None`. Anything else is
/// stringified (numbers in plain decimal, never exponent form) and gets a
/// `px` suffix unless it already ends with one.
pub fn pixels<'a>(value: impl Into<Length<'a>>) -> Option<String> {
    let result = match value.into() {
        Length::Empty => return None,
        Length::Number(n) if n == 0.0 || !n.is_finite() => return None,
        Length::Number(n) => n.to_string(),
        Length::Text("") => return None,
        Length::Text(s) => s.to_string(),
    };
    if result.ends_with("px") {
        Some(result)
    } else {
        Some(result + "px")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn falsy_inputs_yield_none() {
        assert_eq!(pixels(0), None);
        assert_eq!(pixels(0.0), None);
        assert_eq!(pixels(f64::NAN), None);
        assert_eq!(pixels(""), None);
        assert_eq!(pixels(None::<&str>), None);
    }

    #[test]
    fn non_finite_numbers_yield_none() {
        assert_eq!(pixels(f64::INFINITY), None);
        assert_eq!(pixels(f64::NEG_INFINITY), None);
    }

    #[test]
    fn large_numbers_print_in_decimal() {
        assert_eq!(pixels(1e21).as_deref(), Some("1000000000000000000000px"));
    }

    #[test]
    fn numbers_get_suffix() {
        assert_eq!(pixels(10).as_deref(), Some("10px"));
        assert_eq!(pixels(1.5).as_deref(), Some("1.5px"));
        assert_eq!(pixels(-4).as_deref(), Some("-4px"));
    }

    #[test]
    fn text_gets_suffix_once() {
        assert_eq!(pixels("10").as_deref(), Some("10px"));
        assert_eq!(pixels("10px").as_deref(), Some("10px"));
        assert_eq!(pixels(Some("2em")).as_deref(), Some("2empx"));
    }

    #[test]
    fn owned_string_input() {
        let width = String::from("320");
        assert_eq!(pixels(&width).as_deref(), Some("320px"));
    }
}
