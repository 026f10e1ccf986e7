//! Moment and order-statistic formulas over plain `f64` slices.

use std::cmp::Ordering;

/// Sort values ascending. Infinities sort to the ends.
pub(crate) fn sorted(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    sorted
}

/// The `p`-th quantile of pre-sorted data, linear interpolation between
/// order statistics (R-7).
///
/// Interpolation never mixes an infinite neighbour into the result: an
/// infinite neighbour is returned as is, and between `-inf` and `+inf` the
/// nearer order statistic wins (`+inf` at the midpoint).
pub(crate) fn quantile_sorted(sorted: &[f64], p: f64) -> Option<f64> {
    let n = sorted.len();
    if n == 0 || !(0.0..=1.0).contains(&p) {
        return None;
    }
    if n == 1 {
        return Some(sorted[0]);
    }

    let h = (n - 1) as f64 * p;
    let j = h.floor() as usize;
    let g = h - h.floor();

    if j + 1 >= n {
        return Some(sorted[n - 1]);
    }

    let (lo, hi) = (sorted[j], sorted[j + 1]);
    let value = if g == 0.0 || lo == hi {
        lo
    } else if lo.is_infinite() && hi.is_infinite() {
        if g < 0.5 { lo } else { hi }
    } else if lo.is_infinite() {
        lo
    } else if hi.is_infinite() {
        hi
    } else {
        lo + g * (hi - lo)
    };
    Some(value)
}

pub(crate) fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample standard deviation (n - 1 denominator).
pub(crate) fn sample_std(values: &[f64]) -> Option<f64> {
    let n = values.len();
    if n < 2 {
        return None;
    }
    let mean = mean(values)?;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
    Some(variance.sqrt())
}

/// Central moments m2, m3, m4 (population denominators).
fn central_moments(values: &[f64]) -> Option<(f64, f64, f64)> {
    let n = values.len() as f64;
    let mean = mean(values)?;
    let (mut m2, mut m3, mut m4) = (0.0, 0.0, 0.0);
    for v in values {
        let d = v - mean;
        let d2 = d * d;
        m2 += d2;
        m3 += d2 * d;
        m4 += d2 * d2;
    }
    Some((m2 / n, m3 / n, m4 / n))
}

/// Adjusted Fisher-Pearson skewness G1. Zero for a constant sample.
pub(crate) fn skewness(values: &[f64]) -> Option<f64> {
    let n = values.len();
    if n < 3 {
        return None;
    }
    let (m2, m3, _) = central_moments(values)?;
    if m2 == 0.0 {
        return Some(0.0);
    }
    let n = n as f64;
    let g1 = m3 / m2.powf(1.5);
    Some(g1 * (n * (n - 1.0)).sqrt() / (n - 2.0))
}

/// Bias-corrected excess kurtosis G2 (Fisher). Zero for a constant sample.
pub(crate) fn kurtosis(values: &[f64]) -> Option<f64> {
    let n = values.len();
    if n < 4 {
        return None;
    }
    let (m2, _, m4) = central_moments(values)?;
    if m2 == 0.0 {
        return Some(0.0);
    }
    let n = n as f64;
    let g2 = m4 / (m2 * m2) - 3.0;
    Some(((n + 1.0) * g2 + 6.0) * (n - 1.0) / ((n - 2.0) * (n - 3.0)))
}

/// Pearson correlation of paired samples.
///
/// None when fewer than two pairs or either side has zero variance.
pub(crate) fn pearson(pairs: &[(f64, f64)]) -> Option<f64> {
    if pairs.len() < 2 {
        return None;
    }
    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|(x, _)| x).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|(_, y)| y).sum::<f64>() / n;

    let (mut cov, mut var_x, mut var_y) = (0.0, 0.0, 0.0);
    for (x, y) in pairs {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 || var_y == 0.0 {
        return None;
    }
    Some((cov / (var_x.sqrt() * var_y.sqrt())).clamp(-1.0, 1.0))
}
