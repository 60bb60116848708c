use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InputRejected {
    #[error("only digits are accepted")]
    NonDigit,
}

/// An accepted, non-empty field: the digits as typed plus their numeric value.
///
/// The value is a JS number, so digit strings past 2^53 lose precision and
/// very long ones become `Infinity`, as `parseInt` would give.
#[derive(Debug, Clone, PartialEq)]
pub struct DigitsInput {
    text: String,
    value: f64,
}

impl DigitsInput {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn value(&self) -> f64 {
        self.value
    }
}

/// Validates one keystroke's worth of field text against `^\d*$`.
///
/// `Ok(None)` is the empty (unset) field. Signs, decimal points, whitespace and
/// non-ASCII digits are all rejected.
pub fn parse_digits(raw: &str) -> Result<Option<DigitsInput>, InputRejected> {
    if raw.is_empty() {
        return Ok(None);
    }
    if !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(InputRejected::NonDigit);
    }
    let value = raw.parse::<f64>().map_err(|_| InputRejected::NonDigit)?;
    Ok(Some(DigitsInput {
        text: raw.to_string(),
        value,
    }))
}
