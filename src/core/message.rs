//! Message assembly from a primary message plus positional and keyword extras
//!
//! Positional extras are substituted into printf-style placeholders when the
//! message contains a `%`, and appended space-separated otherwise. Keyword
//! extras are appended as `key=value` pairs in call order.

use super::error::{LoggerError, Result};
use super::log_value::LogValue;

/// Keyword names reserved for emission control; never folded into the text
pub const RESERVED_KEYS: [&str; 4] = ["exc_info", "stack_info", "stacklevel", "extra"];

pub fn is_reserved_key(key: &str) -> bool {
    RESERVED_KEYS.contains(&key)
}

/// Build the final message text for a log call.
///
/// # Examples
///
/// ```
/// use color_logger::core::message::assemble;
/// use color_logger::LogValue;
///
/// let text = assemble("msg", &["a".into(), "b".into()], &[]).unwrap();
/// assert_eq!(text, "msg a b");
///
/// let text = assemble("val=%s", &["x".into()], &[]).unwrap();
/// assert_eq!(text, "val=x");
///
/// let kwargs = vec![("k1".to_string(), LogValue::from(1)), ("k2".to_string(), "y".into())];
/// assert_eq!(assemble("msg", &[], &kwargs).unwrap(), "msg k1=1 k2=y");
/// ```
pub fn assemble(message: &str, args: &[LogValue], kwargs: &[(String, LogValue)]) -> Result<String> {
    let mut text = if args.is_empty() {
        message.to_string()
    } else if message.contains('%') {
        percent_format(message, args)?
    } else {
        let mut joined = String::from(message);
        for arg in args {
            joined.push(' ');
            joined.push_str(&arg.to_string());
        }
        joined
    };

    for (key, value) in kwargs.iter().filter(|(key, _)| !is_reserved_key(key)) {
        text.push(' ');
        text.push_str(key);
        text.push('=');
        text.push_str(&value.to_string());
    }

    Ok(text)
}

#[derive(Debug, Default)]
struct Spec {
    left: bool,
    zero: bool,
    plus: bool,
    space: bool,
    alternate: bool,
    width: usize,
    precision: Option<usize>,
}

/// printf-style substitution of `args` into `template`.
///
/// Supports `%s %r %d %i %u %f %F %e %E %g %G %x %X %o %c %%` with the
/// `-+ 0#` flags, width and precision (`*` takes them from the arguments).
pub fn percent_format(template: &str, args: &[LogValue]) -> Result<String> {
    let mut out = String::with_capacity(template.len() + args.len() * 8);
    let mut chars = template.chars().peekable();
    let mut remaining = args.iter();

    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }

        if chars.peek() == Some(&'(') {
            return Err(LoggerError::format("format requires a mapping"));
        }

        let mut spec = Spec::default();
        while let Some(&flag) = chars.peek() {
            match flag {
                '-' => spec.left = true,
                '0' => spec.zero = true,
                '+' => spec.plus = true,
                ' ' => spec.space = true,
                '#' => spec.alternate = true,
                _ => break,
            }
            chars.next();
        }

        if chars.peek() == Some(&'*') {
            chars.next();
            let width = next_arg(&mut remaining)?;
            let width = width
                .as_i128()
                .filter(|_| !matches!(width, LogValue::Float(_)))
                .ok_or_else(|| LoggerError::format("* wants int"))?;
            if width < 0 {
                spec.left = true;
            }
            spec.width = bounded(width.unsigned_abs(), "width too big")?;
        } else {
            spec.width = take_number(&mut chars, "width too big")?;
        }

        if chars.peek() == Some(&'.') {
            chars.next();
            if chars.peek() == Some(&'*') {
                chars.next();
                let precision = next_arg(&mut remaining)?
                    .as_i128()
                    .ok_or_else(|| LoggerError::format("* wants int"))?;
                spec.precision = Some(bounded(precision.max(0).unsigned_abs(), "precision too big")?);
            } else {
                spec.precision = Some(take_number(&mut chars, "precision too big")?);
            }
        }

        // Length modifiers are accepted and ignored
        while matches!(chars.peek(), Some('h' | 'l' | 'L')) {
            chars.next();
        }

        let conversion = chars
            .next()
            .ok_or_else(|| LoggerError::format("incomplete format"))?;
        if conversion == '%' {
            out.push('%');
            continue;
        }

        let value = next_arg(&mut remaining)?;
        let (body, numeric) = convert(conversion, value, &spec)?;
        pad_into(&mut out, &body, numeric, &spec);
    }

    if remaining.next().is_some() {
        return Err(LoggerError::format(
            "not all arguments converted during string formatting",
        ));
    }

    Ok(out)
}

fn next_arg<'a>(remaining: &mut std::slice::Iter<'a, LogValue>) -> Result<&'a LogValue> {
    remaining
        .next()
        .ok_or_else(|| LoggerError::format("not enough arguments for format string"))
}

/// Largest width or precision accepted; `std::fmt` rejects anything above it
pub const MAX_FIELD_WIDTH: usize = u16::MAX as usize;

fn bounded(value: u128, message: &str) -> Result<usize> {
    usize::try_from(value)
        .ok()
        .filter(|value| *value <= MAX_FIELD_WIDTH)
        .ok_or_else(|| LoggerError::format(message))
}

fn take_number(chars: &mut std::iter::Peekable<std::str::Chars<'_>>, message: &str) -> Result<usize> {
    let mut number = 0u128;
    while let Some(digit) = chars.peek().and_then(|c| c.to_digit(10)) {
        number = number.saturating_mul(10).saturating_add(u128::from(digit));
        chars.next();
    }
    bounded(number, message)
}

/// Render one conversion. The flag tells the padder whether zero padding applies.
fn convert(conversion: char, value: &LogValue, spec: &Spec) -> Result<(String, bool)> {
    let text = match conversion {
        's' => truncate(value.to_string(), spec.precision),
        'r' | 'a' => truncate(value.repr(), spec.precision),
        'd' | 'i' | 'u' => {
            let number = value.as_i128().ok_or_else(|| {
                LoggerError::format(format!(
                    "%{} format: a real number is required, not {}",
                    conversion,
                    value.type_name()
                ))
            })?;
            return Ok((signed(number < 0, number.unsigned_abs().to_string(), spec), true));
        }
        'x' | 'X' | 'o' => {
            let number = match value {
                LogValue::Float(_) | LogValue::String(_) | LogValue::Null => None,
                other => other.as_i128(),
            }
            .ok_or_else(|| {
                LoggerError::format(format!(
                    "%{} format: an integer is required, not {}",
                    conversion,
                    value.type_name()
                ))
            })?;
            let magnitude = number.unsigned_abs();
            let digits = match conversion {
                'x' if spec.alternate => format!("0x{:x}", magnitude),
                'x' => format!("{:x}", magnitude),
                'X' if spec.alternate => format!("0X{:X}", magnitude),
                'X' => format!("{:X}", magnitude),
                _ if spec.alternate => format!("0o{:o}", magnitude),
                _ => format!("{:o}", magnitude),
            };
            return Ok((signed(number < 0, digits, spec), true));
        }
        'f' | 'F' | 'e' | 'E' | 'g' | 'G' => {
            let number = value.as_f64().ok_or_else(|| {
                LoggerError::format(format!(
                    "must be real number, not {}",
                    value.type_name()
                ))
            })?;
            let digits = float_digits(conversion, number.abs(), spec);
            return Ok((signed(number.is_sign_negative() && !number.is_nan(), digits, spec), number.is_finite()));
        }
        'c' => match value {
            LogValue::String(s) if s.chars().count() == 1 => s.clone(),
            other => other
                .as_i128()
                .filter(|_| !matches!(other, LogValue::Float(_)))
                .and_then(|code| u32::try_from(code).ok())
                .and_then(char::from_u32)
                .map(String::from)
                .ok_or_else(|| LoggerError::format("%c requires int or char"))?,
        },
        other => {
            return Err(LoggerError::format(format!(
                "unsupported format character '{}' (0x{:x})",
                other, other as u32
            )))
        }
    };
    Ok((text, false))
}

fn truncate(text: String, precision: Option<usize>) -> String {
    match precision {
        Some(max) => text.chars().take(max).collect(),
        None => text,
    }
}

fn signed(negative: bool, digits: String, spec: &Spec) -> String {
    if negative {
        format!("-{}", digits)
    } else if spec.plus {
        format!("+{}", digits)
    } else if spec.space {
        format!(" {}", digits)
    } else {
        digits
    }
}

fn float_digits(conversion: char, number: f64, spec: &Spec) -> String {
    if number.is_nan() {
        return if conversion.is_uppercase() { "NAN" } else { "nan" }.to_string();
    }
    if number.is_infinite() {
        return if conversion.is_uppercase() { "INF" } else { "inf" }.to_string();
    }

    let precision = spec.precision.unwrap_or(6);
    let text = match conversion {
        'f' | 'F' => format!("{:.*}", precision, number),
        'e' | 'E' => exponent_form(number, precision),
        _ => general_form(number, precision, spec.alternate),
    };
    if conversion.is_uppercase() {
        text.to_uppercase()
    } else {
        text
    }
}

/// `1.500000e+02` rather than Rust's `1.5e2`
fn exponent_form(number: f64, precision: usize) -> String {
    let raw = format!("{:.*e}", precision, number);
    match raw.split_once('e') {
        Some((mantissa, exponent)) => {
            let exponent: i32 = exponent.parse().unwrap_or(0);
            let sign = if exponent < 0 { '-' } else { '+' };
            format!("{}e{}{:02}", mantissa, sign, exponent.abs())
        }
        None => raw,
    }
}

fn general_form(number: f64, precision: usize, alternate: bool) -> String {
    let precision = precision.max(1);
    let exponent = if number == 0.0 {
        0
    } else {
        let raw = format!("{:.*e}", precision - 1, number);
        raw.split_once('e')
            .and_then(|(_, e)| e.parse::<i32>().ok())
            .unwrap_or(0)
    };

    let text = if exponent >= -4 && exponent < precision as i32 {
        let decimals = (precision as i32 - 1 - exponent).max(0) as usize;
        format!("{:.*}", decimals, number)
    } else {
        exponent_form(number, precision - 1)
    };

    if alternate {
        return text;
    }
    match text.split_once('e') {
        Some((mantissa, exponent)) => format!("{}e{}", strip_zeros(mantissa), exponent),
        None => strip_zeros(&text).to_string(),
    }
}

fn strip_zeros(text: &str) -> &str {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text
    }
}

fn pad_into(out: &mut String, body: &str, numeric: bool, spec: &Spec) {
    let len = body.chars().count();
    if len >= spec.width {
        out.push_str(body);
        return;
    }
    let fill = spec.width - len;

    if spec.left {
        out.push_str(body);
        out.extend(std::iter::repeat(' ').take(fill));
    } else if spec.zero && numeric {
        // Zeros go between the sign/radix prefix and the digits
        let prefix_len = body
            .char_indices()
            .find(|(_, c)| c.is_ascii_digit())
            .map(|(idx, _)| idx)
            .unwrap_or(0);
        let prefix_len = if body[prefix_len..].starts_with("0x")
            || body[prefix_len..].starts_with("0X")
            || body[prefix_len..].starts_with("0o")
        {
            prefix_len + 2
        } else {
            prefix_len
        };
        out.push_str(&body[..prefix_len]);
        out.extend(std::iter::repeat('0').take(fill));
        out.push_str(&body[prefix_len..]);
    } else {
        out.extend(std::iter::repeat(' ').take(fill));
        out.push_str(body);
    }
}
