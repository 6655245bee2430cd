use crate::data::filter::FilteredView;
use crate::data::model::Employee;

use super::stats::{delta, group_by, mean, percentage};

// ---------------------------------------------------------------------------
// Scalar metrics
// ---------------------------------------------------------------------------

/// Percentage of employees who left; `0.0` for an empty set.
pub fn attrition_rate<'a>(employees: impl IntoIterator<Item = &'a Employee>) -> f64 {
    let (left, total) = employees
        .into_iter()
        .fold((0, 0), |(left, total), e| (left + usize::from(e.attrition.has_left()), total + 1));
    percentage(left, total)
}

pub fn mean_job_satisfaction<'a>(employees: impl IntoIterator<Item = &'a Employee>) -> Option<f64> {
    mean(employees.into_iter().map(|e| f64::from(e.job_satisfaction)))
}

pub fn mean_monthly_income<'a>(employees: impl IntoIterator<Item = &'a Employee>) -> Option<f64> {
    mean(employees.into_iter().map(|e| e.monthly_income))
}

/// A headline number for the filtered view next to the same number over
/// the whole dataset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metric {
    pub value: Option<f64>,
    pub baseline: Option<f64>,
}

impl Metric {
    /// Filtered minus baseline; `None` when either side is undefined.
    pub fn delta(&self) -> Option<f64> {
        delta(self.value, self.baseline)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyMetrics {
    pub attrition_rate: Metric,
    pub job_satisfaction: Metric,
    pub monthly_income: Metric,
}

impl KeyMetrics {
    pub fn compute(view: &FilteredView<'_>) -> Self {
        let all = &view.dataset().employees;
        KeyMetrics {
            attrition_rate: Metric {
                value: Some(attrition_rate(view.employees())),
                baseline: Some(attrition_rate(all)),
            },
            job_satisfaction: Metric {
                value: mean_job_satisfaction(view.employees()),
                baseline: mean_job_satisfaction(all),
            },
            monthly_income: Metric {
                value: mean_monthly_income(view.employees()),
                baseline: mean_monthly_income(all),
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Grouped tables
// ---------------------------------------------------------------------------

/// Attrition within one department.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupAttrition {
    pub department: String,
    pub headcount: usize,
    pub leavers: usize,
    pub rate: f64,
}

/// Attrition rate per department, ordered by department name. Departments
/// with no employees in the view are absent.
pub fn attrition_by_department(view: &FilteredView<'_>) -> Vec<GroupAttrition> {
    group_by(view.employees(), |e| e.department.clone())
        .into_iter()
        .map(|(department, members)| {
            let leavers = members.iter().filter(|e| e.attrition.has_left()).count();
            GroupAttrition {
                department,
                headcount: members.len(),
                leavers,
                rate: percentage(leavers, members.len()),
            }
        })
        .collect()
}

/// The department with the highest attrition rate (first by name on ties).
pub fn highest_attrition(groups: &[GroupAttrition]) -> Option<&GroupAttrition> {
    groups
        .iter()
        .reduce(|best, g| if g.rate > best.rate { g } else { best })
}

/// Number of employees per distinct value, largest group first, ties by
/// value.
pub fn value_counts<'a, F>(employees: impl IntoIterator<Item = &'a Employee>, field: F) -> Vec<(String, usize)>
where
    F: Fn(&Employee) -> &str,
{
    let mut counts: Vec<(String, usize)> = group_by(employees, |e| field(e).to_string())
        .into_iter()
        .map(|(value, members)| (value, members.len()))
        .collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    counts
}

// ---------------------------------------------------------------------------
// Section
// ---------------------------------------------------------------------------

/// Everything the overview tab shows.
#[derive(Debug, Clone, PartialEq)]
pub struct OverviewSection {
    pub metrics: KeyMetrics,
    pub department_counts: Vec<(String, usize)>,
    pub department_attrition: Vec<GroupAttrition>,
}

impl OverviewSection {
    pub fn compute(view: &FilteredView<'_>) -> Self {
        OverviewSection {
            metrics: KeyMetrics::compute(view),
            department_counts: value_counts(view.employees(), |e| e.department.as_str()),
            department_attrition: attrition_by_department(view),
        }
    }

    pub fn highest_attrition(&self) -> Option<&GroupAttrition> {
        highest_attrition(&self.department_attrition)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::data::filter::FilterCriteria;
    use crate::data::model::fixtures::three_rows;

    fn sales_only(ds: &crate::data::model::HrDataset) -> FilterCriteria {
        let mut criteria = FilterCriteria::full_domain(ds);
        criteria.departments = BTreeSet::from(["Sales".to_string()]);
        criteria
    }

    #[test]
    fn sales_scenario() {
        let ds = three_rows();
        let view = FilteredView::new(&ds, &sales_only(&ds));

        assert_eq!(view.len(), 2);
        assert_eq!(attrition_rate(view.employees()), 50.0);
        assert_eq!(mean_monthly_income(view.employees()), Some(4500.0));
    }

    #[test]
    fn deltas_against_full_dataset() {
        let ds = three_rows();
        let view = FilteredView::new(&ds, &sales_only(&ds));
        let metrics = KeyMetrics::compute(&view);

        let baseline_rate = 100.0 / 3.0;
        assert!((metrics.attrition_rate.delta().unwrap() - (50.0 - baseline_rate)).abs() < 1e-9);
        assert_eq!(metrics.monthly_income.baseline, Some(5000.0));
        assert_eq!(metrics.monthly_income.delta(), Some(-500.0));
        assert_eq!(metrics.job_satisfaction.delta(), Some(0.0));
    }

    #[test]
    fn empty_view_yields_sentinels() {
        let ds = three_rows();
        let mut criteria = FilterCriteria::full_domain(&ds);
        criteria.departments = BTreeSet::from(["Human Resources".to_string()]);
        let view = FilteredView::new(&ds, &criteria);

        let section = OverviewSection::compute(&view);
        assert_eq!(section.metrics.attrition_rate.value, Some(0.0));
        assert_eq!(section.metrics.monthly_income.value, None);
        assert_eq!(section.metrics.monthly_income.delta(), None);
        assert!(section.department_attrition.is_empty());
        assert!(section.department_counts.is_empty());
        assert!(section.highest_attrition().is_none());
    }

    #[test]
    fn department_groups_cover_view() {
        let ds = three_rows();
        let view = FilteredView::full(&ds);
        let groups = attrition_by_department(&view);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups.iter().map(|g| g.headcount).sum::<usize>(), view.len());
        let sales = groups.iter().find(|g| g.department == "Sales").unwrap();
        assert_eq!(sales.leavers, 1);
        assert_eq!(sales.rate, 50.0);
        assert_eq!(highest_attrition(&groups).unwrap().department, "Sales");
    }

    #[test]
    fn value_counts_largest_first() {
        let ds = three_rows();
        let counts = value_counts(&ds.employees, |e| e.department.as_str());
        assert_eq!(
            counts,
            vec![("Sales".to_string(), 2), ("Research & Development".to_string(), 1)]
        );
    }
}
