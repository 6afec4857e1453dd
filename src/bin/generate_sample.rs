//! Writes `result.csv` and `points.csv` for the default comparison:
//! sinc(x) on [-1, 1], a degree-6 Maclaurin truncation against a degree-4
//! polynomial obtained by Chebyshev telescoping of the degree-8 series.

use anyhow::{Context, Result};

/// Intervals of the sampling grid (the grid has one more point).
const SPLIT_NUM: usize = 2000;

/// Degree of the series that gets telescoped.
const N: usize = 8;

/// Number of highest-order Chebyshev terms dropped.
const CUT_TERMS: usize = 2;

fn sinc(x: f64) -> f64 {
    if x == 0.0 {
        1.0
    } else {
        x.sin() / x
    }
}

/// Maclaurin coefficients `[a0, a1, .., aN]` of sinc(x).
fn sinc_series(n: usize) -> Vec<f64> {
    let mut a = vec![0.0; n + 1];
    let mut term = 1.0;
    for k in 0..=n / 2 {
        if k > 0 {
            term /= -((2 * k) as f64 * (2 * k + 1) as f64);
        }
        a[2 * k] = term;
    }
    a
}

/// Evaluate `c0 + c1 x + .. + cn x^n` (Horner).
fn polynomial(x: f64, c: &[f64]) -> f64 {
    c.iter().rev().fold(0.0, |y, &ci| y * x + ci)
}

fn binomial(n: usize, k: usize) -> f64 {
    (0..k).fold(1.0, |acc, i| acc * (n - i) as f64 / (i + 1) as f64)
}

/// Power-basis coefficients → Chebyshev coefficients.
fn power_to_chebyshev(a: &[f64]) -> Vec<f64> {
    let mut b = vec![0.0; a.len()];
    for (n, &an) in a.iter().enumerate() {
        if an == 0.0 {
            continue;
        }
        // x^n = 2^(1-n) * sum_k C(n, k) T_{n-2k}, the T_0 term halved
        let scale = 2f64.powi(1 - n as i32);
        for k in 0..=n / 2 {
            let j = n - 2 * k;
            let mut c = binomial(n, k) * scale;
            if j == 0 {
                c *= 0.5;
            }
            b[j] += an * c;
        }
    }
    b
}

/// Chebyshev coefficients → power-basis coefficients.
fn chebyshev_to_power(b: &[f64]) -> Vec<f64> {
    let n = b.len();
    // t[j] holds the power-basis coefficients of T_j
    let mut t: Vec<Vec<f64>> = Vec::with_capacity(n);
    for j in 0..n {
        let mut row = vec![0.0; n];
        match j {
            0 => row[0] = 1.0,
            1 => row[1] = 1.0,
            _ => {
                for k in 0..n - 1 {
                    row[k + 1] += 2.0 * t[j - 1][k];
                }
                for k in 0..n {
                    row[k] -= t[j - 2][k];
                }
            }
        }
        t.push(row);
    }

    let mut a = vec![0.0; n];
    for (j, &bj) in b.iter().enumerate() {
        for k in 0..n {
            a[k] += bj * t[j][k];
        }
    }
    a
}

/// Drop the `cut` highest non-zero-parity Chebyshev terms of the degree-`n` series.
fn telescope(n: usize, cut: usize) -> Vec<f64> {
    let mut b = power_to_chebyshev(&sinc_series(n));
    // sinc is even: only even-order terms are non-zero
    let top = if n % 2 == 0 { n } else { n - 1 };
    for i in 0..cut {
        b[top - 2 * i] = 0.0;
    }
    chebyshev_to_power(&b)
}

/// Grid samples where |error| peaks, endpoints included.
fn error_extrema(x: &[f64], e: &[f64]) -> Vec<[f64; 2]> {
    let n = x.len();
    (0..n)
        .filter(|&i| {
            let here = e[i].abs();
            let left = if i > 0 { e[i - 1].abs() } else { f64::NEG_INFINITY };
            let right = if i + 1 < n { e[i + 1].abs() } else { f64::NEG_INFINITY };
            here > left && here >= right
        })
        .map(|i| [x[i], e[i]])
        .collect()
}

fn main() -> Result<()> {
    let maclaurin = sinc_series(6);
    let chebyshev = telescope(N, CUT_TERMS);
    println!("telescoped coefficients: {chebyshev:?}");

    let h = 2.0 / SPLIT_NUM as f64;
    let xs: Vec<f64> = (0..=SPLIT_NUM).map(|i| h * i as f64 - 1.0).collect();

    let results_path = "result.csv";
    let mut results = csv::Writer::from_path(results_path)
        .with_context(|| format!("creating {results_path}"))?;
    let mut cheb_errors = Vec::with_capacity(xs.len());
    for &x in &xs {
        let y_true = sinc(x);
        let y_mac = polynomial(x, &maclaurin);
        let y_cheb = polynomial(x, &chebyshev);
        cheb_errors.push(y_cheb - y_true);
        results
            .write_record(&[
                x.to_string(),
                y_true.to_string(),
                y_mac.to_string(),
                y_cheb.to_string(),
                (y_mac - y_true).to_string(),
                (y_cheb - y_true).to_string(),
            ])
            .context("writing results row")?;
    }
    results.flush().context("flushing results")?;

    let points_path = "points.csv";
    let points = error_extrema(&xs, &cheb_errors);
    let mut writer = csv::Writer::from_path(points_path)
        .with_context(|| format!("creating {points_path}"))?;
    for [x, e] in &points {
        writer
            .write_record(&[x.to_string(), e.to_string()])
            .context("writing marker row")?;
    }
    writer.flush().context("flushing markers")?;

    println!(
        "Wrote {} samples to {results_path} and {} deviation points to {points_path}",
        xs.len(),
        points.len()
    );
    Ok(())
}
