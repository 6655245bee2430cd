use std::collections::BTreeSet;

use super::model::{Dimension, Employee, HrDataset};

// ---------------------------------------------------------------------------
// Filter predicate: selected values per dimension + experience range
// ---------------------------------------------------------------------------

/// The user's current selection. Within a dimension the selected values are
/// OR-ed, across dimensions (and the experience range) they are AND-ed.
/// An empty set on any dimension matches nothing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterCriteria {
    pub departments: BTreeSet<String>,
    pub job_roles: BTreeSet<String>,
    pub genders: BTreeSet<String>,
    /// Inclusive `(min, max)` bounds on `TotalWorkingYears`. A range with
    /// `min > max` matches nothing.
    pub experience: (u32, u32),
}

impl FilterCriteria {
    /// Criteria with every observed value selected and the full observed
    /// experience range (i.e., show everything).
    pub fn full_domain(dataset: &HrDataset) -> Self {
        FilterCriteria {
            departments: dataset.departments.clone(),
            job_roles: dataset.job_roles.clone(),
            genders: dataset.genders.clone(),
            experience: dataset.experience_bounds.unwrap_or((0, 0)),
        }
    }

    pub fn selection(&self, dimension: Dimension) -> &BTreeSet<String> {
        match dimension {
            Dimension::Department => &self.departments,
            Dimension::JobRole => &self.job_roles,
            Dimension::Gender => &self.genders,
        }
    }

    pub fn selection_mut(&mut self, dimension: Dimension) -> &mut BTreeSet<String> {
        match dimension {
            Dimension::Department => &mut self.departments,
            Dimension::JobRole => &mut self.job_roles,
            Dimension::Gender => &mut self.genders,
        }
    }

    /// Whether a single record passes every clause.
    pub fn matches(&self, employee: &Employee) -> bool {
        let (min, max) = self.experience;
        Dimension::ALL
            .iter()
            .all(|&dim| self.selection(dim).contains(dim.value_of(employee)))
            && (min..=max).contains(&employee.total_working_years)
    }

    /// Restrict the criteria to what the dataset actually contains: drop
    /// unknown category values and clamp the range to the observed bounds.
    pub fn clamp_to(&mut self, dataset: &HrDataset) {
        for dim in Dimension::ALL {
            let domain = dataset.domain(dim);
            self.selection_mut(dim).retain(|v| domain.contains(v));
        }
        if let Some((lo, hi)) = dataset.experience_bounds {
            let (min, max) = self.experience;
            self.experience = (min.clamp(lo, hi), max.clamp(lo, hi));
        }
    }
}

/// Return indices of employees that pass the criteria, in dataset order.
///
/// A dimension whose selection equals its full observed domain cannot
/// exclude anything and is skipped.
pub fn filtered_indices(dataset: &HrDataset, criteria: &FilterCriteria) -> Vec<usize> {
    let active: Vec<Dimension> = Dimension::ALL
        .into_iter()
        .filter(|&dim| criteria.selection(dim) != dataset.domain(dim))
        .collect();
    let (min, max) = criteria.experience;

    dataset
        .employees
        .iter()
        .enumerate()
        .filter(|(_, emp)| {
            active
                .iter()
                .all(|&dim| criteria.selection(dim).contains(dim.value_of(emp)))
                && (min..=max).contains(&emp.total_working_years)
        })
        .map(|(i, _)| i)
        .collect()
}

// ---------------------------------------------------------------------------
// FilteredView – a borrowed subset of the dataset
// ---------------------------------------------------------------------------

/// A stable subset of a dataset, identified by row indices.
#[derive(Debug, Clone)]
pub struct FilteredView<'a> {
    dataset: &'a HrDataset,
    indices: Vec<usize>,
}

impl<'a> FilteredView<'a> {
    pub fn new(dataset: &'a HrDataset, criteria: &FilterCriteria) -> Self {
        FilteredView {
            dataset,
            indices: filtered_indices(dataset, criteria),
        }
    }

    /// The whole dataset as a view (the unfiltered baseline).
    pub fn full(dataset: &'a HrDataset) -> Self {
        FilteredView {
            dataset,
            indices: (0..dataset.len()).collect(),
        }
    }

    /// Rebuild a view from indices previously returned by
    /// [`filtered_indices`] for the same dataset.
    pub fn from_indices(dataset: &'a HrDataset, indices: Vec<usize>) -> Self {
        FilteredView { dataset, indices }
    }

    /// Filter this view further; the result is a subset of `self`.
    pub fn refine(&self, criteria: &FilterCriteria) -> Self {
        let employees = &self.dataset.employees;
        FilteredView {
            dataset: self.dataset,
            indices: self
                .indices
                .iter()
                .copied()
                .filter(|&i| criteria.matches(&employees[i]))
                .collect(),
        }
    }

    pub fn dataset(&self) -> &'a HrDataset {
        self.dataset
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn employees(&self) -> impl Iterator<Item = &'a Employee> + Clone + '_ {
        let employees = &self.dataset.employees;
        self.indices.iter().map(move |&i| &employees[i])
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::data::model::fixtures::{employee, three_rows};
    use crate::data::model::Attrition;

    fn with_years(years: &[u32]) -> HrDataset {
        HrDataset::from_employees(
            years
                .iter()
                .map(|&y| {
                    let mut emp = employee("Sales", "Male", Attrition::No, 3000.0);
                    emp.total_working_years = y;
                    emp
                })
                .collect(),
        )
    }

    #[test]
    fn full_domain_keeps_everything() {
        let ds = three_rows();
        let criteria = FilterCriteria::full_domain(&ds);
        assert_eq!(filtered_indices(&ds, &criteria), vec![0, 1, 2]);
    }

    #[test]
    fn department_selection() {
        let ds = three_rows();
        let mut criteria = FilterCriteria::full_domain(&ds);
        criteria.departments = BTreeSet::from(["Sales".to_string()]);

        let view = FilteredView::new(&ds, &criteria);
        assert_eq!(view.indices(), &[0, 1]);
        assert!(view.employees().all(|e| e.department == "Sales"));
    }

    #[test]
    fn empty_selection_matches_nothing() {
        let ds = three_rows();
        let mut criteria = FilterCriteria::full_domain(&ds);
        criteria.genders.clear();
        assert!(FilteredView::new(&ds, &criteria).is_empty());
    }

    #[test]
    fn unknown_department_matches_nothing() {
        let ds = three_rows();
        let mut criteria = FilterCriteria::full_domain(&ds);
        criteria.departments = BTreeSet::from(["Legal".to_string()]);
        assert_eq!(FilteredView::new(&ds, &criteria).len(), 0);
    }

    #[test]
    fn experience_range_is_inclusive() {
        let ds = with_years(&[1, 2, 4, 5, 10]);
        let mut criteria = FilterCriteria::full_domain(&ds);
        criteria.experience = (2, 5);

        let years: Vec<u32> = FilteredView::new(&ds, &criteria)
            .employees()
            .map(|e| e.total_working_years)
            .collect();
        assert_eq!(years, vec![2, 4, 5]);
    }

    #[test]
    fn inverted_range_matches_nothing() {
        let ds = with_years(&[1, 2, 3]);
        let mut criteria = FilterCriteria::full_domain(&ds);
        criteria.experience = (3, 1);
        assert!(filtered_indices(&ds, &criteria).is_empty());
    }

    #[test]
    fn clamp_drops_unknown_values_and_narrows_range() {
        let ds = with_years(&[3, 8]);
        let mut criteria = FilterCriteria::full_domain(&ds);
        criteria.departments.insert("Legal".to_string());
        criteria.experience = (0, 40);

        criteria.clamp_to(&ds);
        assert_eq!(criteria.departments, ds.departments);
        assert_eq!(criteria.experience, (3, 8));
    }

    fn arb_employee() -> impl Strategy<Value = Employee> {
        (
            prop::sample::select(vec!["Sales", "Research & Development", "Human Resources"]),
            prop::sample::select(vec!["Manager", "Laboratory Technician", "Sales Executive"]),
            prop::sample::select(vec!["Male", "Female"]),
            0u32..40,
            any::<bool>(),
        )
            .prop_map(|(dept, role, gender, years, left)| {
                let attrition = if left { Attrition::Yes } else { Attrition::No };
                let mut emp = employee(dept, gender, attrition, 4000.0);
                emp.job_role = role.to_string();
                emp.total_working_years = years;
                emp
            })
    }

    fn arb_dataset_and_criteria() -> impl Strategy<Value = (HrDataset, FilterCriteria)> {
        prop::collection::vec(arb_employee(), 1..60).prop_flat_map(|rows| {
            let ds = HrDataset::from_employees(rows);
            let subset = |set: &BTreeSet<String>| {
                prop::sample::subsequence(set.iter().cloned().collect::<Vec<_>>(), 0..=set.len())
                    .prop_map(|v| v.into_iter().collect::<BTreeSet<String>>())
            };
            (
                Just(ds.clone()),
                subset(&ds.departments),
                subset(&ds.job_roles),
                subset(&ds.genders),
                0u32..40,
                0u32..40,
            )
                .prop_map(|(ds, departments, job_roles, genders, a, b)| {
                    let criteria = FilterCriteria {
                        departments,
                        job_roles,
                        genders,
                        experience: (a.min(b), a.max(b)),
                    };
                    (ds, criteria)
                })
        })
    }

    proptest! {
        #[test]
        fn view_is_subset_satisfying_every_clause((ds, criteria) in arb_dataset_and_criteria()) {
            let view = FilteredView::new(&ds, &criteria);
            prop_assert!(view.len() <= ds.len());
            prop_assert!(view.indices().windows(2).all(|w| w[0] < w[1]));
            for emp in view.employees() {
                prop_assert!(criteria.departments.contains(&emp.department));
                prop_assert!(criteria.job_roles.contains(&emp.job_role));
                prop_assert!(criteria.genders.contains(&emp.gender));
                prop_assert!(criteria.experience.0 <= emp.total_working_years);
                prop_assert!(emp.total_working_years <= criteria.experience.1);
            }
            let excluded = ds.employees.iter().filter(|e| !criteria.matches(e)).count();
            prop_assert_eq!(view.len() + excluded, ds.len());
        }

        #[test]
        fn filtering_is_idempotent((ds, criteria) in arb_dataset_and_criteria()) {
            let once = FilteredView::new(&ds, &criteria);
            let twice = once.refine(&criteria);
            prop_assert_eq!(once.indices(), twice.indices());
        }

        #[test]
        fn full_domain_is_identity(rows in prop::collection::vec(arb_employee(), 0..60)) {
            let ds = HrDataset::from_employees(rows);
            let view = FilteredView::new(&ds, &FilterCriteria::full_domain(&ds));
            prop_assert_eq!(view.len(), ds.len());
            prop_assert!(view.employees().zip(ds.employees.iter()).all(|(a, b)| a == b));
        }
    }
}
