use std::collections::BTreeMap;

use crate::data::filter::FilteredView;

use super::overview::value_counts;
use super::stats::{group_by, LinearFit};

// ---------------------------------------------------------------------------
// Age histogram
// ---------------------------------------------------------------------------

/// Equal-width age bins over the view's age range, with one count series
/// per gender.
#[derive(Debug, Clone, PartialEq)]
pub struct AgeHistogram {
    /// Lower edge of the first bin.
    pub start: f64,
    pub bin_width: f64,
    /// gender → count per bin; every series has the same length.
    pub counts: BTreeMap<String, Vec<usize>>,
}

impl AgeHistogram {
    /// Build `bins` equal-width bins spanning `[min_age, max_age]`. The top
    /// edge is inclusive. A view where everyone has the same age gets a
    /// single bin of width one.
    pub fn compute(view: &FilteredView<'_>, bins: usize) -> Self {
        let ages = view.employees().map(|e| f64::from(e.age));
        let (min, max) = ages.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), a| {
            (lo.min(a), hi.max(a))
        });

        if view.is_empty() || bins == 0 {
            return AgeHistogram {
                start: 0.0,
                bin_width: 1.0,
                counts: BTreeMap::new(),
            };
        }

        let span = max - min;
        let (bins, bin_width) = if span > 0.0 {
            (bins, span / bins as f64)
        } else {
            (1, 1.0)
        };

        let mut counts: BTreeMap<String, Vec<usize>> = BTreeMap::new();
        for emp in view.employees() {
            let idx = (((f64::from(emp.age) - min) / bin_width) as usize).min(bins - 1);
            counts.entry(emp.gender.clone()).or_insert_with(|| vec![0; bins])[idx] += 1;
        }

        AgeHistogram {
            start: min,
            bin_width,
            counts,
        }
    }

    /// Centre of bin `idx`.
    pub fn bin_center(&self, idx: usize) -> f64 {
        self.start + (idx as f64 + 0.5) * self.bin_width
    }

    pub fn total(&self) -> usize {
        self.counts.values().flatten().sum()
    }
}

// ---------------------------------------------------------------------------
// Experience vs performance
// ---------------------------------------------------------------------------

/// Scatter of (total working years, performance rating) for one department,
/// with monthly income kept for marker sizing.
#[derive(Debug, Clone, PartialEq)]
pub struct ExperienceSeries {
    pub department: String,
    /// `[years, rating]` pairs.
    pub points: Vec<[f64; 2]>,
    pub incomes: Vec<f64>,
    pub trend: Option<LinearFit>,
}

pub fn experience_vs_performance(view: &FilteredView<'_>) -> Vec<ExperienceSeries> {
    group_by(view.employees(), |e| e.department.clone())
        .into_iter()
        .map(|(department, members)| {
            let points: Vec<[f64; 2]> = members
                .iter()
                .map(|e| [f64::from(e.total_working_years), f64::from(e.performance_rating)])
                .collect();
            let trend = LinearFit::fit(&points);
            ExperienceSeries {
                department,
                incomes: members.iter().map(|e| e.monthly_income).collect(),
                points,
                trend,
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Section
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct DemographicsSection {
    pub age_histogram: AgeHistogram,
    pub education_counts: Vec<(String, usize)>,
    pub experience_performance: Vec<ExperienceSeries>,
}

impl DemographicsSection {
    pub fn compute(view: &FilteredView<'_>, age_bins: usize) -> Self {
        DemographicsSection {
            age_histogram: AgeHistogram::compute(view, age_bins),
            education_counts: value_counts(view.employees(), |e| e.education_field.as_str()),
            experience_performance: experience_vs_performance(view),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::fixtures::employee;
    use crate::data::model::{Attrition, Employee, HrDataset};

    fn person(age: u32, gender: &str) -> Employee {
        let mut e = employee("Sales", gender, Attrition::No, 3000.0);
        e.age = age;
        e
    }

    #[test]
    fn histogram_bins_cover_range() {
        let ds = HrDataset::from_employees(vec![
            person(20, "Male"),
            person(30, "Female"),
            person(40, "Male"),
            person(60, "Female"),
        ]);
        let hist = AgeHistogram::compute(&FilteredView::full(&ds), 4);

        assert_eq!(hist.start, 20.0);
        assert_eq!(hist.bin_width, 10.0);
        assert_eq!(hist.counts["Male"], vec![1, 0, 1, 0]);
        // The oldest employee lands in the last (closed) bin.
        assert_eq!(hist.counts["Female"], vec![0, 1, 0, 1]);
        assert_eq!(hist.total(), 4);
        assert_eq!(hist.bin_center(0), 25.0);
    }

    #[test]
    fn histogram_single_age() {
        let ds = HrDataset::from_employees(vec![person(33, "Male"), person(33, "Male")]);
        let hist = AgeHistogram::compute(&FilteredView::full(&ds), 30);
        assert_eq!(hist.counts["Male"], vec![2]);
    }

    #[test]
    fn histogram_empty_view() {
        let ds = HrDataset::from_employees(Vec::new());
        let hist = AgeHistogram::compute(&FilteredView::full(&ds), 30);
        assert!(hist.counts.is_empty());
        assert_eq!(hist.total(), 0);
    }

    #[test]
    fn experience_trend_per_department() {
        let mut rows = Vec::new();
        for (years, rating) in [(1, 3), (5, 3), (9, 4)] {
            let mut e = employee("Sales", "Male", Attrition::No, 3000.0);
            e.total_working_years = years;
            e.performance_rating = rating;
            rows.push(e);
        }
        rows.push(employee("Human Resources", "Female", Attrition::No, 2000.0));
        let ds = HrDataset::from_employees(rows);

        let series = experience_vs_performance(&FilteredView::full(&ds));
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].department, "Human Resources");
        assert!(series[0].trend.is_none());

        let sales = &series[1];
        assert_eq!(sales.points.len(), 3);
        assert_eq!(sales.incomes, vec![3000.0; 3]);
        let trend = sales.trend.unwrap();
        assert!((trend.slope - 0.125).abs() < 1e-9);
    }
}
