//! Aggregation layer: every dashboard number is a pure function of the
//! filtered view (and of the full dataset for the baseline deltas).
//!
//! ```text
//!   FilteredView ──┬── overview      key metrics, department mix, attrition
//!                  ├── demographics  age histogram, education, experience
//!                  ├── compensation  salary per role, income spread
//!                  └── satisfaction  heatmap, mean scores, long-form table
//!                          │
//!                          ▼
//!                   DashboardReport  (consumed by the UI)
//! ```
//!
//! Empty inputs never fail: rates fall back to `0.0`, means and standard
//! deviations to `None`, and grouped tables come back empty.

pub mod compensation;
pub mod demographics;
pub mod overview;
pub mod satisfaction;
pub mod stats;

use crate::data::filter::FilteredView;

use compensation::CompensationSection;
use demographics::DemographicsSection;
use overview::OverviewSection;
use satisfaction::SatisfactionSection;

/// All sections, recomputed together after every filter change.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardReport {
    pub visible: usize,
    pub total: usize,
    pub overview: OverviewSection,
    pub demographics: DemographicsSection,
    pub compensation: CompensationSection,
    pub satisfaction: SatisfactionSection,
}

impl DashboardReport {
    pub fn compute(view: &FilteredView<'_>, age_bins: usize) -> Self {
        DashboardReport {
            visible: view.len(),
            total: view.dataset().len(),
            overview: OverviewSection::compute(view),
            demographics: DemographicsSection::compute(view, age_bins),
            compensation: CompensationSection::compute(view),
            satisfaction: SatisfactionSection::compute(view),
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::data::filter::FilterCriteria;
    use crate::data::model::fixtures::employee;
    use crate::data::model::{Attrition, Employee, HrDataset};

    fn arb_employee() -> impl Strategy<Value = Employee> {
        (
            prop::sample::select(vec!["Sales", "Research & Development", "Human Resources"]),
            prop::sample::select(vec!["Male", "Female"]),
            any::<bool>(),
            1000.0f64..20000.0,
            (1u8..=4, 1u8..=4, 1u8..=4, 1u8..=4),
            18u32..60,
        )
            .prop_map(|(dept, gender, left, income, (js, es, rs, wlb), age)| {
                let attrition = if left { Attrition::Yes } else { Attrition::No };
                let mut e = employee(dept, gender, attrition, income);
                e.job_satisfaction = js;
                e.environment_satisfaction = es;
                e.relationship_satisfaction = rs;
                e.work_life_balance = wlb;
                e.age = age;
                e
            })
    }

    proptest! {
        #[test]
        fn report_invariants(
            rows in prop::collection::vec(arb_employee(), 1..80),
            keep_sales in any::<bool>(),
        ) {
            let ds = HrDataset::from_employees(rows);
            let mut criteria = FilterCriteria::full_domain(&ds);
            if !keep_sales {
                criteria.departments.remove("Sales");
            }
            let view = FilteredView::new(&ds, &criteria);
            let report = DashboardReport::compute(&view, 30);

            prop_assert_eq!(report.visible, view.len());
            prop_assert_eq!(report.total, ds.len());

            let rate = report.overview.metrics.attrition_rate.value.unwrap();
            prop_assert!((0.0..=100.0).contains(&rate));
            if let Some(js) = report.overview.metrics.job_satisfaction.value {
                prop_assert!((1.0..=4.0).contains(&js));
            } else {
                prop_assert!(view.is_empty());
            }

            let headcount: usize = report.overview.department_attrition.iter().map(|g| g.headcount).sum();
            prop_assert_eq!(headcount, view.len());
            let counted: usize = report.overview.department_counts.iter().map(|c| c.1).sum();
            prop_assert_eq!(counted, view.len());
            let roles: usize = report.compensation.salary_by_role.iter().map(|s| s.headcount).sum();
            prop_assert_eq!(roles, view.len());
            prop_assert_eq!(report.satisfaction.heatmap.total(), view.len());
            prop_assert_eq!(report.demographics.age_histogram.total(), view.len());

            for g in &report.overview.department_attrition {
                prop_assert!(g.headcount > 0);
                prop_assert!((0.0..=100.0).contains(&g.rate));
            }
        }

        #[test]
        fn report_is_idempotent(rows in prop::collection::vec(arb_employee(), 0..40)) {
            let ds = HrDataset::from_employees(rows);
            let view = FilteredView::new(&ds, &FilterCriteria::full_domain(&ds));
            prop_assert_eq!(DashboardReport::compute(&view, 30), DashboardReport::compute(&view, 30));
        }
    }
}
