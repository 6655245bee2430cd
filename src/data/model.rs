use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Attrition – whether the employee has left
// ---------------------------------------------------------------------------

/// The `Attrition` column: `"Yes"` when the employee left, `"No"` otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Attrition {
    Yes,
    No,
}

impl Attrition {
    pub fn has_left(self) -> bool {
        self == Attrition::Yes
    }

    /// Parse the textual column value. Only the exact `Yes` / `No` spellings
    /// are accepted.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "Yes" => Some(Attrition::Yes),
            "No" => Some(Attrition::No),
            _ => None,
        }
    }
}

impl fmt::Display for Attrition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Attrition::Yes => write!(f, "Yes"),
            Attrition::No => write!(f, "No"),
        }
    }
}

// ---------------------------------------------------------------------------
// Employee – one row of the HR table
// ---------------------------------------------------------------------------

/// A single employee record. Field names follow the CSV header spelling,
/// any additional columns in the source file are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Employee {
    pub age: u32,
    pub attrition: Attrition,
    pub department: String,
    pub education_field: String,
    pub environment_satisfaction: u8,
    pub gender: String,
    pub job_role: String,
    pub job_satisfaction: u8,
    pub monthly_income: f64,
    pub percent_salary_hike: f64,
    pub performance_rating: u8,
    pub relationship_satisfaction: u8,
    pub total_working_years: u32,
    pub work_life_balance: u8,
}

/// Column names every input file must provide.
pub const REQUIRED_COLUMNS: [&str; 14] = [
    "Age",
    "Attrition",
    "Department",
    "EducationField",
    "EnvironmentSatisfaction",
    "Gender",
    "JobRole",
    "JobSatisfaction",
    "MonthlyIncome",
    "PercentSalaryHike",
    "PerformanceRating",
    "RelationshipSatisfaction",
    "TotalWorkingYears",
    "WorkLifeBalance",
];

// ---------------------------------------------------------------------------
// Dimension – the categorical columns the user can filter on
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Dimension {
    Department,
    JobRole,
    Gender,
}

impl Dimension {
    pub const ALL: [Dimension; 3] = [Dimension::Department, Dimension::JobRole, Dimension::Gender];

    pub fn label(self) -> &'static str {
        match self {
            Dimension::Department => "Departments",
            Dimension::JobRole => "Job Roles",
            Dimension::Gender => "Gender",
        }
    }

    /// The value of this dimension on a record.
    pub fn value_of(self, employee: &Employee) -> &str {
        match self {
            Dimension::Department => &employee.department,
            Dimension::JobRole => &employee.job_role,
            Dimension::Gender => &employee.gender,
        }
    }
}

// ---------------------------------------------------------------------------
// HrDataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed dataset with the observed domain of every filterable
/// column. Immutable once built.
#[derive(Debug, Clone)]
pub struct HrDataset {
    /// All employees, in file order.
    pub employees: Vec<Employee>,
    pub departments: BTreeSet<String>,
    pub job_roles: BTreeSet<String>,
    pub genders: BTreeSet<String>,
    /// Observed (min, max) of `TotalWorkingYears`; `None` for an empty table.
    pub experience_bounds: Option<(u32, u32)>,
}

impl HrDataset {
    /// Build the domain indices from the loaded records.
    pub fn from_employees(employees: Vec<Employee>) -> Self {
        let mut departments = BTreeSet::new();
        let mut job_roles = BTreeSet::new();
        let mut genders = BTreeSet::new();
        let mut experience_bounds: Option<(u32, u32)> = None;

        for emp in &employees {
            departments.insert(emp.department.clone());
            job_roles.insert(emp.job_role.clone());
            genders.insert(emp.gender.clone());
            let years = emp.total_working_years;
            experience_bounds = Some(match experience_bounds {
                Some((lo, hi)) => (lo.min(years), hi.max(years)),
                None => (years, years),
            });
        }

        HrDataset {
            employees,
            departments,
            job_roles,
            genders,
            experience_bounds,
        }
    }

    /// Observed values of a categorical dimension.
    pub fn domain(&self, dimension: Dimension) -> &BTreeSet<String> {
        match dimension {
            Dimension::Department => &self.departments,
            Dimension::JobRole => &self.job_roles,
            Dimension::Gender => &self.genders,
        }
    }

    /// Number of employees.
    pub fn len(&self) -> usize {
        self.employees.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    /// Build an employee with neutral defaults for the fields a test does
    /// not care about.
    pub fn employee(department: &str, gender: &str, attrition: Attrition, income: f64) -> Employee {
        Employee {
            age: 35,
            attrition,
            department: department.to_string(),
            education_field: "Life Sciences".to_string(),
            environment_satisfaction: 3,
            gender: gender.to_string(),
            job_role: "Sales Executive".to_string(),
            job_satisfaction: 3,
            monthly_income: income,
            percent_salary_hike: 12.0,
            performance_rating: 3,
            relationship_satisfaction: 3,
            total_working_years: 5,
            work_life_balance: 3,
        }
    }

    /// Three-row table: two Sales employees (one leaver) and one in R&D.
    pub fn three_rows() -> HrDataset {
        HrDataset::from_employees(vec![
            employee("Sales", "Male", Attrition::Yes, 4000.0),
            employee("Sales", "Female", Attrition::No, 5000.0),
            employee("Research & Development", "Male", Attrition::No, 6000.0),
        ])
    }
}
