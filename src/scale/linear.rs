//! Linear scales
//!
//! Maps a continuous domain onto a pixel range and produces "nice" tick
//! values (multiples of 1, 2 or 5 times a power of ten) for axes.

use serde::{Deserialize, Serialize};

const E10: f64 = 7.0710678118654755; // sqrt(50)
const E5: f64 = 3.1622776601683795; // sqrt(10)
const E2: f64 = std::f64::consts::SQRT_2;

/// Domain used when there is no data to derive one from
pub const EMPTY_DOMAIN: (f64, f64) = (0.0, 1.0);

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Build a scale whose domain is the `[min, max]` extent of `values`.
    ///
    /// An empty iterator yields `EMPTY_DOMAIN`.
    pub fn from_extent<I>(values: I, range: (f64, f64)) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let domain = extent(values).unwrap_or(EMPTY_DOMAIN);
        Self::new(domain, range)
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// A collapsed domain (min == max) maps every value to the middle of the range
    pub fn is_degenerate(&self) -> bool {
        self.domain.0 == self.domain.1
    }

    pub fn map(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let t = if self.is_degenerate() {
            0.5
        } else {
            (value - d0) / (d1 - d0)
        };
        r0 + t * (r1 - r0)
    }

    /// Pixel back to domain value; `None` when the range is collapsed
    pub fn invert(&self, pixel: f64) -> Option<f64> {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if r0 == r1 {
            return None;
        }
        Some(d0 + (pixel - r0) / (r1 - r0) * (d1 - d0))
    }

    /// Roughly `count` evenly spaced round values inside the domain
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        ticks(self.domain.0, self.domain.1, count as f64)
    }

    /// Labels for `ticks(count)`, formatted with the precision the tick step needs
    pub fn tick_labels(&self, count: usize) -> Vec<(f64, String)> {
        let (d0, d1) = self.domain;
        let step = tick_step(d0, d1, count as f64).abs();
        let precision = precision_fixed(step);
        self.ticks(count)
            .into_iter()
            .map(|t| (t, format_grouped(t, precision)))
            .collect()
    }
}

/// `[min, max]` of the finite values, or `None` when there are none
pub fn extent<I>(values: I) -> Option<(f64, f64)>
where
    I: IntoIterator<Item = f64>,
{
    values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

/// Integer tick bounds and increment. A negative increment means the step is
/// `1 / -inc`, which keeps fractional ticks exact.
fn tick_spec(start: f64, stop: f64, count: f64) -> (f64, f64, f64) {
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

    let (mut i1, mut i2, inc);
    if power < 0.0 {
        let i = 10f64.powf(-power) / factor;
        i1 = (start * i).round();
        i2 = (stop * i).round();
        if i1 / i < start {
            i1 += 1.0;
        }
        if i2 / i > stop {
            i2 -= 1.0;
        }
        inc = -i;
    } else {
        let i = 10f64.powf(power) * factor;
        i1 = (start / i).round();
        i2 = (stop / i).round();
        if i1 * i < start {
            i1 += 1.0;
        }
        if i2 * i > stop {
            i2 -= 1.0;
        }
        inc = i;
    }

    if i2 < i1 && (0.5..2.0).contains(&count) {
        return tick_spec(start, stop, count * 2.0);
    }
    (i1, i2, inc)
}

pub fn ticks(start: f64, stop: f64, count: f64) -> Vec<f64> {
    if !(count > 0.0) || !start.is_finite() || !stop.is_finite() {
        return Vec::new();
    }
    if start == stop {
        return vec![start];
    }

    let reverse = stop < start;
    let (i1, i2, inc) = if reverse {
        tick_spec(stop, start, count)
    } else {
        tick_spec(start, stop, count)
    };
    if !(i2 >= i1) {
        return Vec::new();
    }

    let n = (i2 - i1 + 1.0) as usize;
    (0..n)
        .map(|i| {
            let k = if reverse { i2 - i as f64 } else { i1 + i as f64 };
            if inc < 0.0 {
                k / -inc
            } else {
                k * inc
            }
        })
        .collect()
}

/// Signed distance between adjacent ticks
pub fn tick_step(start: f64, stop: f64, count: f64) -> f64 {
    if start == stop || !(count > 0.0) {
        return 0.0;
    }
    let reverse = stop < start;
    let (lo, hi) = if reverse { (stop, start) } else { (start, stop) };
    let (_, _, inc) = tick_spec(lo, hi, count);
    let step = if inc < 0.0 { 1.0 / -inc } else { inc };
    if reverse {
        -step
    } else {
        step
    }
}

/// Decimal places needed to print values spaced `step` apart
pub fn precision_fixed(step: f64) -> usize {
    if step == 0.0 || !step.is_finite() {
        return 0;
    }
    let exponent = step.abs().log10().floor();
    if exponent < 0.0 {
        (-exponent) as usize
    } else {
        0
    }
}

/// Fixed-point with thousands separators: `1234.5` at precision 1 is `1,234.5`
pub fn format_grouped(value: f64, precision: usize) -> String {
    let fixed = format!("{:.*}", precision, value.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };

    let digits = int_part.as_bytes();
    let mut grouped = String::with_capacity(fixed.len() + digits.len() / 3 + 1);
    for (i, digit) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*digit as char);
    }
    if let Some(frac) = frac_part {
        grouped.push('.');
        grouped.push_str(frac);
    }

    // "-0" and "-0.0" print unsigned
    let is_zero = fixed.bytes().all(|b| b == b'0' || b == b'.');
    if value < 0.0 && !is_zero {
        grouped.insert(0, '-');
    }
    grouped
}
