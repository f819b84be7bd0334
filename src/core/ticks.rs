//! "Nice" tick generation and tick label formatting for continuous axes.
//!
//! Steps are always 1, 2 or 5 times a power of ten. Fractional steps are
//! carried as an inverse increment so that values such as `0.3` come out
//! exact instead of accumulating binary rounding error.

const E10: f64 = 7.0710678118654755; // sqrt(50)
const E5: f64 = 3.1622776601683795; // sqrt(10)
const E2: f64 = std::f64::consts::SQRT_2;

const SI_PREFIXES: [&str; 17] = [
    "y", "z", "a", "f", "p", "n", "µ", "m", "", "k", "M", "G", "T", "P", "E", "Z", "Y",
];

#[derive(Debug, Clone, Copy, PartialEq)]
struct TickSpec {
    first: f64,
    last: f64,
    /// Positive: multiply the index. Negative: divide the index by `-increment`.
    increment: f64,
}

fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

fn tick_spec(start: f64, stop: f64, count: f64) -> TickSpec {
    let step = (stop - start) / count.max(0.0);
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= E10 {
        10.0
    } else if error >= E5 {
        5.0
    } else if error >= E2 {
        2.0
    } else {
        1.0
    };

    let (mut first, mut last, increment);
    if power < 0.0 {
        let inverse = 10f64.powf(-power) / factor;
        first = round_half_up(start * inverse);
        last = round_half_up(stop * inverse);
        if first / inverse < start {
            first += 1.0;
        }
        if last / inverse > stop {
            last -= 1.0;
        }
        increment = -inverse;
    } else {
        let step = 10f64.powf(power) * factor;
        first = round_half_up(start / step);
        last = round_half_up(stop / step);
        if first * step < start {
            first += 1.0;
        }
        if last * step > stop {
            last -= 1.0;
        }
        increment = step;
    }

    if last < first && (0.5..2.0).contains(&count) {
        return tick_spec(start, stop, count * 2.0);
    }
    TickSpec {
        first,
        last,
        increment,
    }
}

fn tick_value(index: f64, increment: f64) -> f64 {
    if increment < 0.0 {
        index / -increment
    } else {
        index * increment
    }
}

/// Returns round tick values inside `[start, stop]`, in domain order.
#[must_use]
pub fn nice_ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    if count == 0 || !start.is_finite() || !stop.is_finite() {
        return Vec::new();
    }
    if start == stop {
        return vec![start];
    }

    let reverse = stop < start;
    let (low, high) = if reverse { (stop, start) } else { (start, stop) };
    let spec = tick_spec(low, high, count as f64);
    if spec.last < spec.first || !spec.increment.is_finite() {
        return Vec::new();
    }

    let n = (spec.last - spec.first) as usize + 1;
    (0..n)
        .map(|i| {
            let index = if reverse {
                spec.last - i as f64
            } else {
                spec.first + i as f64
            };
            tick_value(index, spec.increment)
        })
        .collect()
}

/// Signed distance between consecutive ticks for the given domain.
#[must_use]
pub fn tick_step(start: f64, stop: f64, count: usize) -> f64 {
    if count == 0 || !start.is_finite() || !stop.is_finite() || start == stop {
        return 0.0;
    }
    let reverse = stop < start;
    let (low, high) = if reverse { (stop, start) } else { (start, stop) };
    let increment = tick_spec(low, high, count as f64).increment;
    let magnitude = if increment < 0.0 {
        1.0 / -increment
    } else {
        increment
    };
    if reverse { -magnitude } else { magnitude }
}

/// Decimal exponent of `value`, treating zero as exponent 0.
fn decimal_exponent(value: f64) -> i32 {
    let magnitude = value.abs();
    if magnitude == 0.0 || !magnitude.is_finite() {
        return 0;
    }
    let exponent = magnitude.log10().floor() as i32;
    // log10 can land just below an exact power of ten
    if 10f64.powi(exponent + 1) <= magnitude {
        exponent + 1
    } else {
        exponent
    }
}

/// Formats value-axis ticks with one shared SI prefix chosen from the
/// largest magnitude in the domain (`2k`, `2.5M`, `500m`).
#[must_use]
pub fn format_si_ticks(ticks: &[f64], domain: (f64, f64)) -> Vec<String> {
    let step = match ticks {
        [first, second, ..] => (second - first).abs(),
        _ => (domain.1 - domain.0).abs(),
    };
    let reference = domain.0.abs().max(domain.1.abs());
    let group = (decimal_exponent(reference).div_euclid(3)).clamp(-8, 8);
    let exponent = group * 3;
    let precision = if step > 0.0 {
        (exponent - decimal_exponent(step)).max(0) as usize
    } else {
        0
    };
    let prefix = SI_PREFIXES[(group + 8) as usize];
    let scale = 10f64.powi(-exponent);

    ticks
        .iter()
        .map(|tick| format!("{}{prefix}", fixed(tick * scale, precision)))
        .collect()
}

/// Formats ticks with a fixed number of decimals derived from the step and
/// thousands separators (`1,000`, `0.25`).
#[must_use]
pub fn format_fixed_ticks(ticks: &[f64]) -> Vec<String> {
    let precision = match ticks {
        [first, second, ..] => (-decimal_exponent((second - first).abs())).max(0) as usize,
        _ => 0,
    };
    ticks
        .iter()
        .map(|tick| group_thousands(&fixed(*tick, precision)))
        .collect()
}

fn fixed(value: f64, precision: usize) -> String {
    let rendered = format!("{value:.precision$}");
    // avoid "-0" / "-0.00" for values that round to zero
    if rendered.starts_with('-') && rendered[1..].chars().all(|c| c == '0' || c == '.') {
        rendered[1..].to_owned()
    } else {
        rendered
    }
}

fn group_thousands(rendered: &str) -> String {
    let (sign, unsigned) = match rendered.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", rendered),
    };
    let (integer, fraction) = match unsigned.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (i, digit) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    match fraction {
        Some(fraction) => format!("{sign}{grouped}.{fraction}"),
        None => format!("{sign}{grouped}"),
    }
}

/// Renders a data value the way it appears in tooltips: integers without a
/// fractional part, everything else with the shortest round-trip form.
#[must_use]
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_owned()
    } else if value.is_infinite() {
        if value > 0.0 { "Infinity" } else { "-Infinity" }.to_owned()
    } else if value == 0.0 {
        "0".to_owned()
    } else {
        format!("{value}")
    }
}

#[cfg(test)]
mod tests {
    use super::{format_fixed_ticks, format_number, format_si_ticks, nice_ticks, tick_step};

    #[test]
    fn ticks_use_one_two_five_steps() {
        assert_eq!(nice_ticks(0.0, 30.0, 3), vec![0.0, 10.0, 20.0, 30.0]);
        assert_eq!(nice_ticks(0.0, 1.0, 5), vec![0.0, 0.2, 0.4, 0.6, 0.8, 1.0]);
        assert_eq!(nice_ticks(3.0, 3.0, 3), vec![3.0]);
        assert!(nice_ticks(0.0, 10.0, 0).is_empty());
    }

    #[test]
    fn fractional_ticks_are_exact() {
        assert_eq!(nice_ticks(0.0, 0.3, 3), vec![0.0, 0.1, 0.2, 0.3]);
    }

    #[test]
    fn reversed_domain_yields_reversed_ticks() {
        assert_eq!(nice_ticks(30.0, 0.0, 3), vec![30.0, 20.0, 10.0, 0.0]);
        assert_eq!(tick_step(30.0, 0.0, 3), -10.0);
    }

    #[test]
    fn si_format_shares_prefix_across_ticks() {
        let ticks = nice_ticks(0.0, 2500.0, 3);
        assert_eq!(ticks, vec![0.0, 1000.0, 2000.0]);
        assert_eq!(format_si_ticks(&ticks, (0.0, 2500.0)), vec!["0k", "1k", "2k"]);
        assert_eq!(
            format_si_ticks(&[0.0, 0.5, 1.0], (0.0, 1.0)),
            vec!["0.0", "0.5", "1.0"]
        );
    }

    #[test]
    fn fixed_format_groups_thousands() {
        assert_eq!(
            format_fixed_ticks(&[0.0, 5000.0, 10000.0]),
            vec!["0", "5,000", "10,000"]
        );
    }

    #[test]
    fn numbers_render_like_tooltips_expect() {
        assert_eq!(format_number(30.0), "30");
        assert_eq!(format_number(2.5), "2.5");
        assert_eq!(format_number(-0.0), "0");
    }
}
