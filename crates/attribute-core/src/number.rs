//! Canonical decimal text for number attributes.
//!
//! `N` and `NS` payloads are carried as text so that no precision is lost on
//! the way through the pipeline. Source text without an exponent is kept
//! verbatim; exponent notation is expanded to plain decimal by moving the
//! decimal point, without touching any digit the source provided.

/// Longest expansion of exponent notation we are willing to produce.
///
/// Inputs such as `1e1000000` would otherwise expand into megabytes of zeros;
/// past this length the source text is kept in exponent form.
pub const MAX_EXPANDED_LEN: usize = 1024;

/// A number literal split into its lexical parts.
#[derive(Debug, PartialEq, Eq)]
struct Parts<'a> {
    negative: bool,
    integer: &'a str,
    fraction: &'a str,
    exponent: Option<&'a str>,
}

/// Split `text` according to the JSON number grammar:
/// `-?(0|[1-9][0-9]*)(\.[0-9]+)?([eE][+-]?[0-9]+)?`
fn parse_parts(text: &str) -> Option<Parts<'_>> {
    let (negative, rest) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };

    let int_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if int_len == 0 || (int_len > 1 && rest.starts_with('0')) {
        return None;
    }
    let (integer, mut rest) = rest.split_at(int_len);

    let mut fraction = "";
    if let Some(after_dot) = rest.strip_prefix('.') {
        let frac_len = after_dot.bytes().take_while(u8::is_ascii_digit).count();
        if frac_len == 0 {
            return None;
        }
        fraction = &after_dot[..frac_len];
        rest = &after_dot[frac_len..];
    }

    let mut exponent = None;
    if let Some(after_e) = rest.strip_prefix(['e', 'E']) {
        let digits = after_e.strip_prefix(['+', '-']).unwrap_or(after_e);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        exponent = Some(after_e);
        rest = "";
    }

    if !rest.is_empty() {
        return None;
    }

    Some(Parts {
        negative,
        integer,
        fraction,
        exponent,
    })
}

/// Check whether `text` is a decimal number literal.
pub fn is_decimal(text: &str) -> bool {
    parse_parts(text).is_some()
}

/// Canonical decimal text for a number literal, or `None` if `text` is not a
/// number.
///
/// ```
/// use attribute_core::number::canonical_decimal;
///
/// assert_eq!(canonical_decimal("1.50").as_deref(), Some("1.50"));
/// assert_eq!(canonical_decimal("1e3").as_deref(), Some("1000"));
/// assert_eq!(canonical_decimal("1.5E-3").as_deref(), Some("0.0015"));
/// assert_eq!(canonical_decimal("abc"), None);
/// ```
pub fn canonical_decimal(text: &str) -> Option<String> {
    let parts = parse_parts(text)?;
    let Some(exponent) = parts.exponent else {
        return Some(text.to_string());
    };

    // An exponent that does not even fit in i64 is far beyond the cap
    let Ok(exponent) = exponent.parse::<i64>() else {
        return Some(text.to_string());
    };

    let digits = [parts.integer, parts.fraction].concat();
    let Some(point) = (parts.integer.len() as i64).checked_add(exponent) else {
        return Some(text.to_string());
    };

    let expanded_len = if point <= 0 {
        2 + point.unsigned_abs() as usize + digits.len()
    } else if point as usize >= digits.len() {
        point as usize
    } else {
        digits.len() + 1
    };
    if expanded_len > MAX_EXPANDED_LEN {
        return Some(text.to_string());
    }

    let (whole, fraction) = if point <= 0 {
        let zeros = "0".repeat(point.unsigned_abs() as usize);
        ("0".to_string(), format!("{zeros}{digits}"))
    } else if point as usize >= digits.len() {
        let zeros = "0".repeat(point as usize - digits.len());
        (format!("{digits}{zeros}"), String::new())
    } else {
        let (whole, fraction) = digits.split_at(point as usize);
        (whole.to_string(), fraction.to_string())
    };

    let whole = match whole.trim_start_matches('0') {
        "" => "0",
        trimmed => trimmed,
    };

    let mut out = String::with_capacity(expanded_len + 1);
    if parts.negative {
        out.push('-');
    }
    out.push_str(whole);
    if !fraction.is_empty() {
        out.push('.');
        out.push_str(&fraction);
    }
    Some(out)
}

/// Canonical text for a number set member, or `None` if `text` is not a
/// number.
///
/// Set members that denote the same number must collapse into one, so on top
/// of [`canonical_decimal`] insignificant trailing fractional zeros are
/// dropped and negative zero becomes `0`: `1.0`, `1.00` and `1` are one
/// member. Text kept in exponent form (see [`MAX_EXPANDED_LEN`]) is left
/// untouched.
pub fn set_member(text: &str) -> Option<String> {
    let mut canonical = canonical_decimal(text)?;
    if canonical.contains(['e', 'E']) {
        return Some(canonical);
    }
    if canonical.contains('.') {
        let trimmed = canonical.trim_end_matches('0').trim_end_matches('.').len();
        canonical.truncate(trimmed);
    }
    if canonical == "-0" {
        canonical = "0".to_string();
    }
    Some(canonical)
}

/// Decimal text for a native float.
///
/// Uses the shortest representation that round-trips to the same `f64`,
/// which never uses exponent notation. Non-finite values have no decimal
/// form.
pub fn from_f64(value: f64) -> Option<String> {
    value.is_finite().then(|| format!("{value}"))
}
