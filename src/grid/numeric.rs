//! Locale-tolerant numeric coercion
//!
//! Cell text typed by users mixes Brazilian (`1.234,56`) and English
//! (`1,234.56`) conventions. Coercion never fails: anything unparseable
//! becomes `0`.

/// Values that can be coerced into a grid number
pub trait ToNumber {
    fn to_number(&self) -> f64;
}

impl ToNumber for str {
    fn to_number(&self) -> f64 {
        coerce_text(self)
    }
}

impl ToNumber for &str {
    fn to_number(&self) -> f64 {
        coerce_text(self)
    }
}

impl ToNumber for String {
    fn to_number(&self) -> f64 {
        coerce_text(self)
    }
}

impl ToNumber for f64 {
    fn to_number(&self) -> f64 {
        if self.is_finite() {
            *self
        } else {
            0.0
        }
    }
}

impl ToNumber for f32 {
    fn to_number(&self) -> f64 {
        f64::from(*self).to_number()
    }
}

impl ToNumber for i32 {
    fn to_number(&self) -> f64 {
        f64::from(*self)
    }
}

impl ToNumber for i64 {
    fn to_number(&self) -> f64 {
        *self as f64
    }
}

impl ToNumber for usize {
    fn to_number(&self) -> f64 {
        *self as f64
    }
}

impl<T: ToNumber> ToNumber for Option<T> {
    fn to_number(&self) -> f64 {
        self.as_ref().map_or(0.0, ToNumber::to_number)
    }
}

/// Convert text or a number into `f64`, returning `0` for anything unparseable
pub fn to_number<T: ToNumber>(raw: T) -> f64 {
    raw.to_number()
}

/// Render a number the way cells store it (`5` rather than `5.0`)
pub fn number_to_text(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    if value == 0.0 {
        // Avoid "-0"
        return "0".to_string();
    }
    format!("{}", value)
}

/// Whether the text carries any digit at all (used to decide if a
/// numeric format applies or the raw text is shown instead)
pub fn looks_numeric(raw: &str) -> bool {
    raw.chars().any(|c| c.is_ascii_digit())
}

fn coerce_text(raw: &str) -> f64 {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, '.' | ',' | '-'))
        .collect();

    if cleaned.is_empty() {
        return 0.0;
    }

    let normalized = match (cleaned.rfind(','), cleaned.rfind('.')) {
        // Comma after the last dot: comma is the decimal separator
        (Some(comma), Some(dot)) if comma > dot => cleaned.replace('.', "").replacen(',', ".", 1),
        (Some(_), None) => cleaned.replacen(',', ".", 1),
        _ => cleaned.replace(',', ""),
    };

    parse_float_prefix(&normalized).unwrap_or(0.0)
}

/// Parse the longest leading `-?digits[.digits]` run, ignoring trailing junk
fn parse_float_prefix(text: &str) -> Option<f64> {
    let mut chars = text.chars().peekable();
    let mut negative = false;
    if chars.peek() == Some(&'-') {
        negative = true;
        chars.next();
    }

    let mut int_part = String::new();
    while let Some(&c) = chars.peek() {
        if c.is_ascii_digit() {
            int_part.push(c);
            chars.next();
        } else {
            break;
        }
    }

    let mut frac_part = String::new();
    if chars.peek() == Some(&'.') {
        chars.next();
        while let Some(&c) = chars.peek() {
            if c.is_ascii_digit() {
                frac_part.push(c);
                chars.next();
            } else {
                break;
            }
        }
    }

    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }

    let literal = format!(
        "{}{}.{}",
        if negative { "-" } else { "" },
        if int_part.is_empty() { "0" } else { &int_part },
        if frac_part.is_empty() { "0" } else { &frac_part },
    );

    literal.parse::<f64>().ok().filter(|v| v.is_finite())
}
