use std::fmt;

/// Elapsed seconds printed as `H:MM:SS`, with a leading `N day(s), ` past one day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HumanDuration(pub u64);

impl fmt::Display for HumanDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let days = self.0 / 86_400;
        let hours = self.0 % 86_400 / 3600;
        let minutes = self.0 % 3600 / 60;
        let seconds = self.0 % 60;

        match days {
            0 => {}
            1 => write!(f, "1 day, ")?,
            days => write!(f, "{days} days, ")?,
        }

        write!(f, "{hours}:{minutes:02}:{seconds:02}")
    }
}

/// Whole seconds of a non negative statistic, ties go to the even neighbour
pub fn round_seconds(value: f64) -> u64 {
    value.max(0.0).round_ties_even() as u64
}

/// `printf("%.{precision}g")`: significant digits, trailing zeros removed,
/// scientific notation for very small or large magnitudes
pub fn general(value: f64, precision: usize) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if !value.is_finite() {
        return value.to_string();
    }

    let precision = precision.max(1);
    // rounding to the requested digits may bump the exponent (99.95 -> 1.00e2)
    let scientific = format!("{:.*e}", precision - 1, value);
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some((mantissa, exponent)) => (mantissa, exponent.parse::<i32>().unwrap_or(0)),
        None => (scientific.as_str(), 0),
    };

    if exponent < -4 || exponent >= precision as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!(
            "{}e{sign}{:02}",
            strip_zeros(mantissa),
            exponent.unsigned_abs()
        )
    } else {
        let decimals = (precision as i32 - 1 - exponent).max(0) as usize;
        strip_zeros(&format!("{value:.decimals$}")).to_string()
    }
}

fn strip_zeros(number: &str) -> &str {
    if number.contains('.') {
        number.trim_end_matches('0').trim_end_matches('.')
    } else {
        number
    }
}
