use std::collections::BTreeMap;

/// Arithmetic mean; `None` for an empty input.
pub fn mean<I: IntoIterator<Item = f64>>(values: I) -> Option<f64> {
    let (sum, n) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
    (n > 0).then(|| sum / n as f64)
}

/// Sample standard deviation (n − 1 denominator).
///
/// A single observation has no variance estimate, so one or zero values
/// give `None` rather than `0.0` or NaN.
pub fn sample_std_dev(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values.iter().copied())?;
    let ss: f64 = values.iter().map(|v| (v - m).powi(2)).sum();
    Some((ss / (values.len() - 1) as f64).sqrt())
}

/// Quantile of an ascending-sorted slice with linear interpolation between
/// closest ranks. `q` is clamped to `[0, 1]`.
pub fn quantile(sorted: &[f64], q: f64) -> Option<f64> {
    let last = sorted.len().checked_sub(1)?;
    let pos = q.clamp(0.0, 1.0) * last as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}

/// Percentage of `part` in `total`; `0.0` when `total` is zero.
pub fn percentage(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 * 100.0 / total as f64
    }
}

/// `a - b` when both sides are defined.
pub fn delta(a: Option<f64>, b: Option<f64>) -> Option<f64> {
    Some(a? - b?)
}

/// Group items by key. Only keys with at least one member appear.
pub fn group_by<'a, T, K, F>(items: impl IntoIterator<Item = &'a T>, key: F) -> BTreeMap<K, Vec<&'a T>>
where
    T: 'a,
    K: Ord,
    F: Fn(&T) -> K,
{
    let mut groups: BTreeMap<K, Vec<&'a T>> = BTreeMap::new();
    for item in items {
        groups.entry(key(item)).or_default().push(item);
    }
    groups
}

// ---------------------------------------------------------------------------
// Ordinary least squares
// ---------------------------------------------------------------------------

/// `y = slope * x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearFit {
    /// Least-squares line through the points. Needs two points with
    /// distinct x values.
    pub fn fit(points: &[[f64; 2]]) -> Option<Self> {
        if points.len() < 2 {
            return None;
        }
        let mx = mean(points.iter().map(|p| p[0]))?;
        let my = mean(points.iter().map(|p| p[1]))?;
        let sxx: f64 = points.iter().map(|p| (p[0] - mx).powi(2)).sum();
        if sxx.abs() < f64::EPSILON {
            return None;
        }
        let sxy: f64 = points.iter().map(|p| (p[0] - mx) * (p[1] - my)).sum();
        let slope = sxy / sxx;
        Some(LinearFit {
            slope,
            intercept: my - slope * mx,
        })
    }

    pub fn at(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn mean_of_empty_is_none() {
        assert_eq!(mean(Vec::new()), None);
        assert_eq!(mean([1.0, 2.0, 6.0]), Some(3.0));
    }

    #[test]
    fn std_dev_single_member_is_undefined() {
        assert_eq!(sample_std_dev(&[]), None);
        assert_eq!(sample_std_dev(&[4200.0]), None);
        let sd = sample_std_dev(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
        assert!(close(sd, 2.138089935299395));
    }

    #[test]
    fn quantile_interpolates() {
        let data = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(quantile(&data, 0.0), Some(1.0));
        assert_eq!(quantile(&data, 1.0), Some(4.0));
        assert!(close(quantile(&data, 0.5).unwrap(), 2.5));
        assert!(close(quantile(&data, 0.25).unwrap(), 1.75));
        assert_eq!(quantile(&[], 0.5), None);
    }

    #[test]
    fn percentage_guards_zero_total() {
        assert_eq!(percentage(0, 0), 0.0);
        assert_eq!(percentage(1, 4), 25.0);
    }

    #[test]
    fn delta_needs_both_sides() {
        assert_eq!(delta(Some(3.0), Some(1.0)), Some(2.0));
        assert_eq!(delta(None, Some(1.0)), None);
    }

    #[test]
    fn group_by_omits_empty_keys() {
        let words = ["apple", "avocado", "banana"];
        let groups = group_by(words.iter(), |w| w.chars().next().unwrap());
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[&'a'].len(), 2);
    }

    #[test]
    fn linear_fit() {
        let fit = LinearFit::fit(&[[0.0, 1.0], [1.0, 3.0], [2.0, 5.0]]).unwrap();
        assert!(close(fit.slope, 2.0));
        assert!(close(fit.intercept, 1.0));
        assert!(close(fit.at(10.0), 21.0));

        assert_eq!(LinearFit::fit(&[[1.0, 1.0]]), None);
        assert_eq!(LinearFit::fit(&[[1.0, 1.0], [1.0, 2.0]]), None);
    }
}
