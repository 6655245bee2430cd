use crate::data::filter::FilteredView;

use super::stats::{group_by, mean, quantile, sample_std_dev};

/// Income summary for one job role.
#[derive(Debug, Clone, PartialEq)]
pub struct SalaryStats {
    pub job_role: String,
    pub headcount: usize,
    pub mean_income: f64,
    pub min_income: f64,
    pub max_income: f64,
    /// Sample standard deviation; `None` for a single-member role.
    pub std_dev: Option<f64>,
    pub mean_hike: f64,
}

/// Salary statistics per job role, ordered by role name. Roles without
/// employees in the view are absent.
pub fn salary_by_role(view: &FilteredView<'_>) -> Vec<SalaryStats> {
    group_by(view.employees(), |e| e.job_role.clone())
        .into_iter()
        .filter_map(|(job_role, members)| {
            let incomes: Vec<f64> = members.iter().map(|e| e.monthly_income).collect();
            Some(SalaryStats {
                headcount: members.len(),
                mean_income: mean(incomes.iter().copied())?,
                min_income: incomes.iter().copied().fold(f64::INFINITY, f64::min),
                max_income: incomes.iter().copied().fold(f64::NEG_INFINITY, f64::max),
                std_dev: sample_std_dev(&incomes),
                mean_hike: mean(members.iter().map(|e| e.percent_salary_hike))?,
                job_role,
            })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Box plot summary
// ---------------------------------------------------------------------------

/// Five-number summary of monthly income for one department, with Tukey
/// whiskers (1.5 × IQR, pulled in to the most extreme observed values
/// inside the fences).
#[derive(Debug, Clone, PartialEq)]
pub struct IncomeSpread {
    pub department: String,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
    pub lower_whisker: f64,
    pub upper_whisker: f64,
    /// Observations outside the whiskers.
    pub outliers: Vec<f64>,
}

impl IncomeSpread {
    /// `None` for an empty sample.
    pub fn from_incomes(department: String, mut incomes: Vec<f64>) -> Option<Self> {
        incomes.sort_by(f64::total_cmp);
        let q1 = quantile(&incomes, 0.25)?;
        let median = quantile(&incomes, 0.5)?;
        let q3 = quantile(&incomes, 0.75)?;
        let iqr = q3 - q1;
        let (lo_fence, hi_fence) = (q1 - 1.5 * iqr, q3 + 1.5 * iqr);

        let fences = lo_fence..=hi_fence;
        let (inside, outliers): (Vec<f64>, Vec<f64>) = incomes.iter().partition(|v| fences.contains(*v));
        // The median always lies inside the fences, so `inside` is never empty.
        let lower_whisker = inside.first().copied().unwrap_or(q1);
        let upper_whisker = inside.last().copied().unwrap_or(q3);

        Some(IncomeSpread {
            department,
            min: incomes[0],
            max: incomes[incomes.len() - 1],
            q1,
            median,
            q3,
            lower_whisker,
            upper_whisker,
            outliers,
        })
    }
}

pub fn income_spread_by_department(view: &FilteredView<'_>) -> Vec<IncomeSpread> {
    group_by(view.employees(), |e| e.department.clone())
        .into_iter()
        .filter_map(|(department, members)| {
            IncomeSpread::from_incomes(department, members.iter().map(|e| e.monthly_income).collect())
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Section
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct CompensationSection {
    pub salary_by_role: Vec<SalaryStats>,
    pub income_spread: Vec<IncomeSpread>,
}

impl CompensationSection {
    pub fn compute(view: &FilteredView<'_>) -> Self {
        CompensationSection {
            salary_by_role: salary_by_role(view),
            income_spread: income_spread_by_department(view),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::fixtures::employee;
    use crate::data::model::{Attrition, Employee, HrDataset};

    fn paid(role: &str, income: f64, hike: f64) -> Employee {
        let mut e = employee("Sales", "Male", Attrition::No, income);
        e.job_role = role.to_string();
        e.percent_salary_hike = hike;
        e
    }

    #[test]
    fn role_statistics() {
        let ds = HrDataset::from_employees(vec![
            paid("Manager", 10000.0, 11.0),
            paid("Manager", 14000.0, 15.0),
            paid("Manager", 12000.0, 13.0),
            paid("Research Director", 19000.0, 20.0),
        ]);
        let stats = salary_by_role(&FilteredView::full(&ds));

        assert_eq!(stats.len(), 2);
        let manager = &stats[0];
        assert_eq!(manager.job_role, "Manager");
        assert_eq!(manager.headcount, 3);
        assert_eq!(manager.mean_income, 12000.0);
        assert_eq!(manager.min_income, 10000.0);
        assert_eq!(manager.max_income, 14000.0);
        assert_eq!(manager.std_dev, Some(2000.0));
        assert_eq!(manager.mean_hike, 13.0);

        let director = &stats[1];
        assert_eq!(director.headcount, 1);
        assert_eq!(director.std_dev, None);
        assert_eq!(director.min_income, director.max_income);
    }

    #[test]
    fn role_counts_sum_to_view() {
        let ds = HrDataset::from_employees(vec![
            paid("A", 1.0, 1.0),
            paid("B", 2.0, 1.0),
            paid("A", 3.0, 1.0),
        ]);
        let view = FilteredView::full(&ds);
        let total: usize = salary_by_role(&view).iter().map(|s| s.headcount).sum();
        assert_eq!(total, view.len());
    }

    #[test]
    fn spread_with_outlier() {
        let spread = IncomeSpread::from_incomes(
            "Sales".to_string(),
            vec![5.0, 1.0, 2.0, 3.0, 4.0, 100.0],
        )
        .unwrap();

        assert_eq!(spread.min, 1.0);
        assert_eq!(spread.max, 100.0);
        assert_eq!(spread.median, 3.5);
        assert_eq!(spread.q1, 2.25);
        assert_eq!(spread.q3, 4.75);
        assert_eq!(spread.lower_whisker, 1.0);
        assert_eq!(spread.upper_whisker, 5.0);
        assert_eq!(spread.outliers, vec![100.0]);
    }

    #[test]
    fn spread_of_nothing() {
        assert!(IncomeSpread::from_incomes("Sales".to_string(), Vec::new()).is_none());
    }
}
