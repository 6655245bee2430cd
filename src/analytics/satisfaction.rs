use std::collections::{BTreeMap, BTreeSet};

use crate::data::filter::FilteredView;
use crate::data::model::Employee;

use super::stats::{group_by, mean};

/// The four 1–4 satisfaction scales.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SatisfactionField {
    JobSatisfaction,
    EnvironmentSatisfaction,
    RelationshipSatisfaction,
    WorkLifeBalance,
}

impl SatisfactionField {
    pub const ALL: [SatisfactionField; 4] = [
        SatisfactionField::JobSatisfaction,
        SatisfactionField::EnvironmentSatisfaction,
        SatisfactionField::RelationshipSatisfaction,
        SatisfactionField::WorkLifeBalance,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SatisfactionField::JobSatisfaction => "Job Satisfaction",
            SatisfactionField::EnvironmentSatisfaction => "Environment Satisfaction",
            SatisfactionField::RelationshipSatisfaction => "Relationship Satisfaction",
            SatisfactionField::WorkLifeBalance => "Work-Life Balance",
        }
    }

    pub fn score(self, employee: &Employee) -> u8 {
        match self {
            SatisfactionField::JobSatisfaction => employee.job_satisfaction,
            SatisfactionField::EnvironmentSatisfaction => employee.environment_satisfaction,
            SatisfactionField::RelationshipSatisfaction => employee.relationship_satisfaction,
            SatisfactionField::WorkLifeBalance => employee.work_life_balance,
        }
    }
}

// ---------------------------------------------------------------------------
// Cross-tabulation
// ---------------------------------------------------------------------------

/// Grid of counts: `counts[r][c]` is the number of employees whose row field
/// equals `rows[r]` and column field equals `columns[c]`. Only values that
/// occur in the view get a row or column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrossTab {
    pub row_field: SatisfactionField,
    pub column_field: SatisfactionField,
    pub rows: Vec<u8>,
    pub columns: Vec<u8>,
    pub counts: Vec<Vec<usize>>,
}

impl CrossTab {
    pub fn compute(view: &FilteredView<'_>, row_field: SatisfactionField, column_field: SatisfactionField) -> Self {
        let pairs: Vec<(u8, u8)> = view
            .employees()
            .map(|e| (row_field.score(e), column_field.score(e)))
            .collect();

        let rows: Vec<u8> = pairs.iter().map(|p| p.0).collect::<BTreeSet<_>>().into_iter().collect();
        let columns: Vec<u8> = pairs.iter().map(|p| p.1).collect::<BTreeSet<_>>().into_iter().collect();

        let mut counts = vec![vec![0usize; columns.len()]; rows.len()];
        for (r, c) in pairs {
            // Both searches succeed: the axes were built from these pairs.
            if let (Ok(ri), Ok(ci)) = (rows.binary_search(&r), columns.binary_search(&c)) {
                counts[ri][ci] += 1;
            }
        }

        CrossTab {
            row_field,
            column_field,
            rows,
            columns,
            counts,
        }
    }

    pub fn total(&self) -> usize {
        self.counts.iter().flatten().sum()
    }

    pub fn max_count(&self) -> usize {
        self.counts.iter().flatten().copied().max().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Means
// ---------------------------------------------------------------------------

/// Mean of every satisfaction scale, in [`SatisfactionField::ALL`] order.
/// Each mean is `None` for an empty view.
pub fn mean_scores<'a, I>(employees: I) -> BTreeMap<SatisfactionField, Option<f64>>
where
    I: IntoIterator<Item = &'a Employee>,
    I::IntoIter: Clone,
{
    let employees = employees.into_iter();
    SatisfactionField::ALL
        .into_iter()
        .map(|field| {
            let m = mean(employees.clone().map(|e| f64::from(field.score(e))));
            (field, m)
        })
        .collect()
}

/// One row of the long-form department × metric table.
#[derive(Debug, Clone, PartialEq)]
pub struct DepartmentScore {
    pub department: String,
    pub metric: SatisfactionField,
    pub score: f64,
}

/// Mean of each satisfaction scale per department, melted into one row per
/// (department, metric). Departments are ordered by name, metrics in
/// [`SatisfactionField::ALL`] order.
pub fn scores_by_department(view: &FilteredView<'_>) -> Vec<DepartmentScore> {
    let mut rows = Vec::new();
    for (department, members) in group_by(view.employees(), |e| e.department.clone()) {
        for (metric, score) in mean_scores(members.iter().copied()) {
            // Groups are never empty, so every mean is defined.
            if let Some(score) = score {
                rows.push(DepartmentScore {
                    department: department.clone(),
                    metric,
                    score,
                });
            }
        }
    }
    rows
}

// ---------------------------------------------------------------------------
// Section
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct SatisfactionSection {
    /// Job satisfaction (rows) × work-life balance (columns).
    pub heatmap: CrossTab,
    pub mean_scores: BTreeMap<SatisfactionField, Option<f64>>,
    pub by_department: Vec<DepartmentScore>,
}

impl SatisfactionSection {
    pub fn compute(view: &FilteredView<'_>) -> Self {
        SatisfactionSection {
            heatmap: CrossTab::compute(
                view,
                SatisfactionField::JobSatisfaction,
                SatisfactionField::WorkLifeBalance,
            ),
            mean_scores: mean_scores(view.employees()),
            by_department: scores_by_department(view),
        }
    }
}
