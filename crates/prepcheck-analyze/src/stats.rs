//! Cell access bridges and the statistical primitives shared by the checks.
//!
//! All tests here are fail-open: a degenerate input (empty sample, zero
//! variance, collapsed contingency table) returns `None` and the caller
//! skips the column or pair instead of erroring out.

use polars::prelude::{AnyValue, Column, DataType};
use statrs::distribution::{ChiSquared, ContinuousCDF, FisherSnedecor};

/// Render a cell as a string; nulls become the empty string.
pub fn any_to_string(value: AnyValue) -> String {
    match value {
        AnyValue::String(value) => value.to_string(),
        AnyValue::StringOwned(value) => value.to_string(),
        AnyValue::Null => String::new(),
        _ => value.to_string(),
    }
}

/// Convert a cell to f64 where it carries a numeric value.
pub fn any_to_f64(value: AnyValue) -> Option<f64> {
    match value {
        AnyValue::Null => None,
        AnyValue::Float32(value) => Some(value as f64),
        AnyValue::Float64(value) => Some(value),
        AnyValue::Int8(value) => Some(value as f64),
        AnyValue::Int16(value) => Some(value as f64),
        AnyValue::Int32(value) => Some(value as f64),
        AnyValue::Int64(value) => Some(value as f64),
        AnyValue::UInt8(value) => Some(value as f64),
        AnyValue::UInt16(value) => Some(value as f64),
        AnyValue::UInt32(value) => Some(value as f64),
        AnyValue::UInt64(value) => Some(value as f64),
        AnyValue::Boolean(value) => Some(if value { 1.0 } else { 0.0 }),
        _ => None,
    }
}

/// Missing means null, NaN, or a blank string cell.
pub fn is_missing(value: &AnyValue) -> bool {
    match value {
        AnyValue::Null => true,
        AnyValue::Float32(v) => v.is_nan(),
        AnyValue::Float64(v) => v.is_nan(),
        AnyValue::String(v) => v.trim().is_empty(),
        AnyValue::StringOwned(v) => v.trim().is_empty(),
        _ => false,
    }
}

pub fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}

/// String-like columns: plain strings and native categoricals.
pub fn is_string_like_dtype(dtype: &DataType) -> bool {
    matches!(dtype, DataType::String) || dtype.is_categorical()
}

/// Cell at `idx`, null when out of range.
pub fn cell(column: &Column, idx: usize) -> AnyValue<'_> {
    column.get(idx).unwrap_or(AnyValue::Null)
}

/// Finite non-missing numeric values of a column, in row order.
pub fn numeric_values(column: &Column) -> Vec<f64> {
    let mut values = Vec::new();
    for idx in 0..column.len() {
        if let Some(v) = any_to_f64(cell(column, idx))
            && v.is_finite()
        {
            values.push(v);
        }
    }
    values
}

/// Non-missing cells rendered as trimmed strings, in row order.
pub fn string_values(column: &Column) -> Vec<String> {
    let mut values = Vec::new();
    for idx in 0..column.len() {
        let value = cell(column, idx);
        if !is_missing(&value) {
            values.push(any_to_string(value).trim().to_string());
        }
    }
    values
}

/// Row-aligned numeric pairs where both cells are present and finite.
pub fn paired_values(a: &Column, b: &Column) -> (Vec<f64>, Vec<f64>) {
    let mut xs = Vec::new();
    let mut ys = Vec::new();
    let len = a.len().min(b.len());
    for idx in 0..len {
        let x = any_to_f64(cell(a, idx));
        let y = any_to_f64(cell(b, idx));
        if let (Some(x), Some(y)) = (x, y)
            && x.is_finite()
            && y.is_finite()
        {
            xs.push(x);
            ys.push(y);
        }
    }
    (xs, ys)
}

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Population standard deviation (ddof = 0).
pub fn std_population(values: &[f64]) -> Option<f64> {
    let m = mean(values)?;
    let var = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64;
    Some(var.sqrt())
}

/// Sample variance (ddof = 1).
pub fn variance_sample(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values)?;
    Some(values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (values.len() - 1) as f64)
}

/// Bias-corrected sample skewness (adjusted Fisher-Pearson G1).
pub fn skewness(values: &[f64]) -> Option<f64> {
    let n = values.len();
    if n < 3 {
        return None;
    }
    let m = mean(values)?;
    let nf = n as f64;
    let m2 = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / nf;
    let m3 = values.iter().map(|v| (v - m).powi(3)).sum::<f64>() / nf;
    if m2 <= f64::EPSILON {
        return None;
    }
    let g1 = m3 / m2.powf(1.5);
    Some(g1 * (nf * (nf - 1.0)).sqrt() / (nf - 2.0))
}

/// Average ranks (1-based), ties receive the mean of their rank range.
pub fn ranks(values: &[f64]) -> Vec<f64> {
    let n = values.len();
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| {
        values[a]
            .partial_cmp(&values[b])
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    let mut out = vec![0.0; n];
    let mut i = 0;
    while i < n {
        let mut j = i;
        while j + 1 < n && values[order[j + 1]] == values[order[i]] {
            j += 1;
        }
        let avg = (i + j) as f64 / 2.0 + 1.0;
        for &idx in &order[i..=j] {
            out[idx] = avg;
        }
        i = j + 1;
    }
    out
}

/// Pearson correlation. `None` when either side has zero variance.
pub fn pearson(xs: &[f64], ys: &[f64]) -> Option<f64> {
    if xs.len() != ys.len() || xs.len() < 2 {
        return None;
    }
    let mx = mean(xs)?;
    let my = mean(ys)?;
    let mut cov = 0.0;
    let mut vx = 0.0;
    let mut vy = 0.0;
    for (x, y) in xs.iter().zip(ys) {
        cov += (x - mx) * (y - my);
        vx += (x - mx).powi(2);
        vy += (y - my).powi(2);
    }
    if vx <= f64::EPSILON || vy <= f64::EPSILON {
        return None;
    }
    Some(cov / (vx.sqrt() * vy.sqrt()))
}

/// Spearman rank correlation with average ranks for ties.
pub fn spearman(xs: &[f64], ys: &[f64]) -> Option<f64> {
    if xs.len() != ys.len() || xs.len() < 2 {
        return None;
    }
    pearson(&ranks(xs), &ranks(ys))
}

/// Kendall tau-b with tie correction. Quadratic, acceptable for the
/// column-pair workloads this engine sees.
pub fn kendall_tau(xs: &[f64], ys: &[f64]) -> Option<f64> {
    let n = xs.len();
    if n != ys.len() || n < 2 {
        return None;
    }
    let mut concordant = 0i64;
    let mut discordant = 0i64;
    let mut ties_x = 0i64;
    let mut ties_y = 0i64;
    for i in 0..n {
        for j in (i + 1)..n {
            let dx = xs[i] - xs[j];
            let dy = ys[i] - ys[j];
            if dx == 0.0 && dy == 0.0 {
                ties_x += 1;
                ties_y += 1;
            } else if dx == 0.0 {
                ties_x += 1;
            } else if dy == 0.0 {
                ties_y += 1;
            } else if dx * dy > 0.0 {
                concordant += 1;
            } else {
                discordant += 1;
            }
        }
    }
    let n0 = (n * (n - 1) / 2) as f64;
    let denom = (n0 - ties_x as f64) * (n0 - ties_y as f64);
    if denom <= 0.0 {
        return None;
    }
    Some((concordant - discordant) as f64 / denom.sqrt())
}

/// Chi-square statistic with its p-value and degrees of freedom.
#[derive(Debug, Clone, Copy)]
pub struct Chi2Test {
    pub statistic: f64,
    pub p_value: f64,
    pub dof: usize,
}

/// Right-tail (survival) probability of the chi-square distribution.
pub fn chi2_sf(statistic: f64, dof: usize) -> Option<f64> {
    if dof == 0 || !statistic.is_finite() || statistic < 0.0 {
        return None;
    }
    let dist = ChiSquared::new(dof as f64).ok()?;
    Some((1.0 - dist.cdf(statistic)).clamp(0.0, 1.0))
}

/// Right-tail probability of the F distribution.
pub fn f_sf(statistic: f64, dof1: usize, dof2: usize) -> Option<f64> {
    if dof1 == 0 || dof2 == 0 || !statistic.is_finite() || statistic < 0.0 {
        return None;
    }
    let dist = FisherSnedecor::new(dof1 as f64, dof2 as f64).ok()?;
    Some((1.0 - dist.cdf(statistic)).clamp(0.0, 1.0))
}

/// Pearson chi-square test of independence on a contingency table
/// (rows x columns of observed counts).
pub fn chi2_contingency(table: &[Vec<f64>]) -> Option<Chi2Test> {
    let rows = table.len();
    let cols = table.first()?.len();
    if rows < 2 || cols < 2 {
        return None;
    }
    let row_totals: Vec<f64> = table.iter().map(|row| row.iter().sum()).collect();
    let col_totals: Vec<f64> = (0..cols).map(|c| table.iter().map(|row| row[c]).sum()).collect();
    let grand: f64 = row_totals.iter().sum();
    if grand <= 0.0 || row_totals.iter().any(|&t| t <= 0.0) || col_totals.iter().any(|&t| t <= 0.0)
    {
        return None;
    }
    let mut statistic = 0.0;
    for (r, row) in table.iter().enumerate() {
        for (c, &observed) in row.iter().enumerate() {
            let expected = row_totals[r] * col_totals[c] / grand;
            statistic += (observed - expected).powi(2) / expected;
        }
    }
    let dof = (rows - 1) * (cols - 1);
    let p_value = chi2_sf(statistic, dof)?;
    Some(Chi2Test {
        statistic,
        p_value,
        dof,
    })
}

/// Chi-square goodness-of-fit of observed counts against expected counts.
pub fn chi2_goodness_of_fit(observed: &[f64], expected: &[f64]) -> Option<Chi2Test> {
    if observed.len() != expected.len() || observed.len() < 2 {
        return None;
    }
    let mut statistic = 0.0;
    for (&o, &e) in observed.iter().zip(expected) {
        // Floor tiny expectations so unseen categories stay finite.
        let e = e.max(1e-10);
        statistic += (o - e).powi(2) / e;
    }
    let dof = observed.len() - 1;
    let p_value = chi2_sf(statistic, dof)?;
    Some(Chi2Test {
        statistic,
        p_value,
        dof,
    })
}

/// Cramér's V association strength from a contingency table:
/// sqrt(phi2 / min(k-1, r-1)) with phi2 = chi2 / n.
pub fn cramers_v(table: &[Vec<f64>]) -> Option<f64> {
    let test = chi2_contingency(table)?;
    let rows = table.len();
    let cols = table[0].len();
    let n: f64 = table.iter().map(|row| row.iter().sum::<f64>()).sum();
    let phi2 = test.statistic / n;
    let denom = (rows - 1).min(cols - 1) as f64;
    if denom <= 0.0 {
        return None;
    }
    Some((phi2 / denom).sqrt())
}

/// One-way ANOVA F-test result.
#[derive(Debug, Clone, Copy)]
pub struct FTest {
    pub statistic: f64,
    pub p_value: f64,
}

/// One-way ANOVA over the given groups. Skips when fewer than two groups,
/// no residual degrees of freedom, or zero within-group variance.
pub fn one_way_anova(groups: &[Vec<f64>]) -> Option<FTest> {
    let k = groups.len();
    if k < 2 {
        return None;
    }
    let n: usize = groups.iter().map(Vec::len).sum();
    if n <= k {
        return None;
    }
    let grand = mean(&groups.iter().flatten().copied().collect::<Vec<_>>())?;
    let mut ss_between = 0.0;
    let mut ss_within = 0.0;
    for group in groups {
        let gm = mean(group)?;
        ss_between += group.len() as f64 * (gm - grand).powi(2);
        ss_within += group.iter().map(|v| (v - gm).powi(2)).sum::<f64>();
    }
    if ss_within <= f64::EPSILON {
        return None;
    }
    let dof1 = k - 1;
    let dof2 = n - k;
    let statistic = (ss_between / dof1 as f64) / (ss_within / dof2 as f64);
    let p_value = f_sf(statistic, dof1, dof2)?;
    Some(FTest {
        statistic,
        p_value,
    })
}

/// Correlation ratio eta = sqrt(SS_between / SS_total) in [0, 1].
pub fn correlation_ratio(groups: &[Vec<f64>]) -> Option<f64> {
    if groups.len() < 2 {
        return None;
    }
    let all: Vec<f64> = groups.iter().flatten().copied().collect();
    let grand = mean(&all)?;
    let ss_total: f64 = all.iter().map(|v| (v - grand).powi(2)).sum();
    if ss_total <= f64::EPSILON {
        return None;
    }
    let mut ss_between = 0.0;
    for group in groups {
        if group.is_empty() {
            continue;
        }
        let gm = mean(group)?;
        ss_between += group.len() as f64 * (gm - grand).powi(2);
    }
    Some((ss_between / ss_total).sqrt())
}

/// Cohen's d effect size between two samples (pooled sample std).
pub fn cohens_d(a: &[f64], b: &[f64]) -> Option<f64> {
    if a.len() < 2 || b.len() < 2 {
        return None;
    }
    let va = variance_sample(a)?;
    let vb = variance_sample(b)?;
    let pooled = (((a.len() - 1) as f64 * va + (b.len() - 1) as f64 * vb)
        / (a.len() + b.len() - 2) as f64)
        .sqrt();
    if pooled <= f64::EPSILON {
        return None;
    }
    Some((mean(a)? - mean(b)?) / pooled)
}

/// Kolmogorov-Smirnov test result.
#[derive(Debug, Clone, Copy)]
pub struct KsTest {
    pub statistic: f64,
    pub p_value: f64,
}

/// Survival function of the Kolmogorov distribution,
/// Q(x) = 2 * sum_{k>=1} (-1)^{k-1} exp(-2 k^2 x^2).
fn kolmogorov_sf(x: f64) -> f64 {
    if x < 1e-8 {
        return 1.0;
    }
    let mut sum = 0.0;
    let mut sign = 1.0;
    for k in 1..=100 {
        let term = (-2.0 * (k as f64).powi(2) * x * x).exp();
        sum += sign * term;
        if term < 1e-12 {
            break;
        }
        sign = -sign;
    }
    (2.0 * sum).clamp(0.0, 1.0)
}

/// Two-sample Kolmogorov-Smirnov test with the asymptotic p-value.
pub fn ks_two_sample(a: &[f64], b: &[f64]) -> Option<KsTest> {
    if a.is_empty() || b.is_empty() {
        return None;
    }
    let mut xs = a.to_vec();
    let mut ys = b.to_vec();
    xs.sort_by(|p, q| p.partial_cmp(q).unwrap_or(std::cmp::Ordering::Equal));
    ys.sort_by(|p, q| p.partial_cmp(q).unwrap_or(std::cmp::Ordering::Equal));

    let (m, n) = (xs.len(), ys.len());
    let mut i = 0;
    let mut j = 0;
    let mut statistic: f64 = 0.0;
    while i < m && j < n {
        let v = xs[i].min(ys[j]);
        while i < m && xs[i] <= v {
            i += 1;
        }
        while j < n && ys[j] <= v {
            j += 1;
        }
        let diff = (i as f64 / m as f64 - j as f64 / n as f64).abs();
        statistic = statistic.max(diff);
    }

    let en = ((m * n) as f64 / (m + n) as f64).sqrt();
    let p_value = kolmogorov_sf((en + 0.12 + 0.11 / en) * statistic);
    Some(KsTest {
        statistic,
        p_value,
    })
}

/// One-sample Kolmogorov-Smirnov test against the U(0, 1) distribution.
/// Input values must already be normalized into [0, 1].
pub fn ks_uniform(values: &[f64]) -> Option<KsTest> {
    if values.is_empty() {
        return None;
    }
    let mut xs = values.to_vec();
    xs.sort_by(|p, q| p.partial_cmp(q).unwrap_or(std::cmp::Ordering::Equal));
    let n = xs.len() as f64;
    let mut statistic: f64 = 0.0;
    for (i, &x) in xs.iter().enumerate() {
        let cdf = x.clamp(0.0, 1.0);
        let d_plus = (i + 1) as f64 / n - cdf;
        let d_minus = cdf - i as f64 / n;
        statistic = statistic.max(d_plus.max(d_minus));
    }
    let en = n.sqrt();
    let p_value = kolmogorov_sf((en + 0.12 + 0.11 / en) * statistic);
    Some(KsTest {
        statistic,
        p_value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pearson_of_linear_data_is_one() {
        let xs = [1.0, 2.0, 3.0, 4.0, 5.0];
        let ys = [2.0, 4.0, 6.0, 8.0, 10.0];
        let r = pearson(&xs, &ys).unwrap();
        assert!((r - 1.0).abs() < 1e-12);
    }

    #[test]
    fn pearson_skips_constant_input() {
        let xs = [1.0, 1.0, 1.0];
        let ys = [2.0, 4.0, 6.0];
        assert!(pearson(&xs, &ys).is_none());
    }

    #[test]
    fn ranks_average_ties() {
        let r = ranks(&[10.0, 20.0, 20.0, 30.0]);
        assert_eq!(r, vec![1.0, 2.5, 2.5, 4.0]);
    }

    #[test]
    fn spearman_detects_monotonic_nonlinear() {
        let xs = [1.0, 2.0, 3.0, 4.0, 5.0];
        let ys = [1.0, 8.0, 27.0, 64.0, 125.0];
        let r = spearman(&xs, &ys).unwrap();
        assert!((r - 1.0).abs() < 1e-12);
    }

    #[test]
    fn kendall_perfect_inverse() {
        let xs = [1.0, 2.0, 3.0, 4.0];
        let ys = [4.0, 3.0, 2.0, 1.0];
        let tau = kendall_tau(&xs, &ys).unwrap();
        assert!((tau + 1.0).abs() < 1e-12);
    }

    #[test]
    fn skewness_of_symmetric_data_is_zero() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert!(skewness(&values).unwrap().abs() < 1e-12);
    }

    #[test]
    fn chi2_independent_table_has_high_p() {
        // Perfectly proportional rows carry no association.
        let table = vec![vec![50.0, 50.0], vec![50.0, 50.0]];
        let test = chi2_contingency(&table).unwrap();
        assert!(test.statistic.abs() < 1e-9);
        assert!(test.p_value > 0.99);
    }

    #[test]
    fn cramers_v_of_perfect_association_is_one() {
        let table = vec![vec![50.0, 0.0], vec![0.0, 50.0]];
        let v = cramers_v(&table).unwrap();
        assert!((v - 1.0).abs() < 1e-9);
    }

    #[test]
    fn anova_separated_groups_is_significant() {
        let groups = vec![
            vec![1.0, 1.1, 0.9, 1.05, 0.95],
            vec![10.0, 10.1, 9.9, 10.05, 9.95],
        ];
        let test = one_way_anova(&groups).unwrap();
        assert!(test.statistic > 100.0);
        assert!(test.p_value < 0.001);
    }

    #[test]
    fn anova_skips_zero_variance() {
        let groups = vec![vec![1.0, 1.0, 1.0], vec![2.0, 2.0, 2.0]];
        assert!(one_way_anova(&groups).is_none());
    }

    #[test]
    fn ks_two_sample_same_distribution() {
        let a: Vec<f64> = (0..100).map(|i| i as f64).collect();
        let test = ks_two_sample(&a, &a).unwrap();
        assert!(test.statistic.abs() < 1e-12);
        assert!(test.p_value > 0.99);
    }

    #[test]
    fn ks_two_sample_shifted_distribution() {
        let a: Vec<f64> = (0..100).map(|i| i as f64).collect();
        let b: Vec<f64> = (0..100).map(|i| (i + 1000) as f64).collect();
        let test = ks_two_sample(&a, &b).unwrap();
        assert!((test.statistic - 1.0).abs() < 1e-12);
        assert!(test.p_value < 1e-6);
    }

    #[test]
    fn ks_uniform_accepts_uniform_grid() {
        let values: Vec<f64> = (0..100).map(|i| i as f64 / 99.0).collect();
        let test = ks_uniform(&values).unwrap();
        assert!(test.p_value > 0.1);
    }

    #[test]
    fn cohens_d_detects_separation() {
        let a = vec![1.0, 1.2, 0.8, 1.1, 0.9];
        let b = vec![3.0, 3.2, 2.8, 3.1, 2.9];
        let d = cohens_d(&a, &b).unwrap();
        assert!(d.abs() > 5.0);
    }
}
