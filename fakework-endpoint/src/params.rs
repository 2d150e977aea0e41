//! Query parameter resolution for `/fake_work`
//!
//! Coercion rules, applied to each parameter independently:
//!
//! - absent: the configured default (50 / 250 / 20000 out of the box)
//! - present: the leading integer of the value, so `12ms` is 12 and `abc`
//!   or an empty value is 0
//! - negative values clamp to 0, oversized values saturate
//! - `response_chars` is capped when a maximum is configured, and never
//!   exceeds [`MAX_FILLER_CHARS`]

use fakework_config::WorkDefaults;

/// Longest filler a `String` can hold
pub const MAX_FILLER_CHARS: u64 = isize::MAX as u64;

/// Resolved parameters of one fake-work request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkParams {
    pub cpu_ms: u64,
    pub iowait_ms: u64,
    pub response_chars: u64,
}

impl Default for WorkParams {
    fn default() -> Self {
        Self::from_defaults(&WorkDefaults::default())
    }
}

impl WorkParams {
    pub fn new(cpu_ms: u64, iowait_ms: u64, response_chars: u64) -> Self {
        Self {
            cpu_ms,
            iowait_ms,
            response_chars,
        }
    }

    pub fn from_defaults(defaults: &WorkDefaults) -> Self {
        Self::new(defaults.cpu_ms, defaults.iowait_ms, defaults.response_chars)
    }

    /// Resolve raw parameter values against defaults and an optional cap
    pub fn resolve(
        cpu_ms: Option<&str>,
        iowait_ms: Option<&str>,
        response_chars: Option<&str>,
        defaults: &WorkDefaults,
        max_response_chars: Option<u64>,
    ) -> Self {
        let response_chars = resolve_one(response_chars, defaults.response_chars);

        Self {
            cpu_ms: resolve_one(cpu_ms, defaults.cpu_ms),
            iowait_ms: resolve_one(iowait_ms, defaults.iowait_ms),
            response_chars: response_chars
                .min(max_response_chars.unwrap_or(MAX_FILLER_CHARS))
                .min(MAX_FILLER_CHARS),
        }
    }

    /// Resolve from a raw (still percent-encoded) query string.
    ///
    /// Decoding is lenient: malformed escapes are passed through rather than
    /// rejected. When a key repeats, the last occurrence wins.
    pub fn from_query(
        query: Option<&str>,
        defaults: &WorkDefaults,
        max_response_chars: Option<u64>,
    ) -> Self {
        let mut cpu_ms = None;
        let mut iowait_ms = None;
        let mut response_chars = None;

        if let Some(query) = query {
            for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
                match key.as_ref() {
                    "cpu_ms" => cpu_ms = Some(value.into_owned()),
                    "iowait_ms" => iowait_ms = Some(value.into_owned()),
                    "response_chars" => response_chars = Some(value.into_owned()),
                    _ => {}
                }
            }
        }

        Self::resolve(
            cpu_ms.as_deref(),
            iowait_ms.as_deref(),
            response_chars.as_deref(),
            defaults,
            max_response_chars,
        )
    }
}

fn resolve_one(raw: Option<&str>, default: u64) -> u64 {
    match raw {
        Some(value) => parse_int_lenient(value),
        None => default,
    }
}

/// Parse the leading integer of `value`, never failing.
///
/// Leading whitespace and a single sign are accepted, digits may be
/// separated by single underscores, parsing stops at the first other
/// character. No digits yields 0, a negative number yields 0 and overflow
/// saturates at `u64::MAX`.
pub fn parse_int_lenient(value: &str) -> u64 {
    let mut chars = value.trim_start().chars().peekable();

    let negative = match chars.peek() {
        Some('-') => {
            chars.next();
            true
        }
        Some('+') => {
            chars.next();
            false
        }
        _ => false,
    };

    let mut result: u64 = 0;
    let mut seen_digit = false;
    let mut last_was_underscore = false;

    while let Some(&c) = chars.peek() {
        if let Some(digit) = c.to_digit(10) {
            result = result.saturating_mul(10).saturating_add(u64::from(digit));
            seen_digit = true;
            last_was_underscore = false;
        } else if c == '_' && seen_digit && !last_was_underscore {
            last_was_underscore = true;
        } else {
            break;
        }
        chars.next();
    }

    if negative {
        0
    } else {
        result
    }
}
