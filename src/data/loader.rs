use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use arrow::array::{Array, ArrayRef, AsArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Float64Type, Int64Type};
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use super::error::DataLoadError;
use super::model::{Attrition, Employee, HrDataset, REQUIRED_COLUMNS};

type Result<T> = std::result::Result<T, DataLoadError>;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load an HR dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row naming the employee columns (recommended)
/// * `.json`    – `[{ "Age": 41, "Attrition": "Yes", ... }, ...]`
/// * `.parquet` – flat table with one column per employee field
///
/// The load is all-or-nothing: the first bad row fails the whole file, and
/// a file without any rows is rejected.
pub fn load_file(path: &Path) -> Result<HrDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let employees = match ext.as_str() {
        "csv" => load_csv(path)?,
        "json" => load_json(path)?,
        "parquet" | "pq" => load_parquet(path)?,
        other => return Err(DataLoadError::UnsupportedFormat(other.to_string())),
    };

    if employees.is_empty() {
        return Err(DataLoadError::EmptyDataset);
    }
    for (row, emp) in employees.iter().enumerate() {
        validate(row, emp)?;
    }
    log::debug!("parsed {} employees from {}", employees.len(), path.display());

    Ok(HrDataset::from_employees(employees))
}

// ---------------------------------------------------------------------------
// Value checks shared by every format
// ---------------------------------------------------------------------------

/// Highest value of the 1–4 satisfaction and rating scales.
const SCALE_MAX: u8 = 4;

/// Reject values the type system lets through: non-finite or negative
/// amounts, and scale scores outside `1..=4`.
fn validate(row: usize, emp: &Employee) -> Result<()> {
    let amounts = [
        ("MonthlyIncome", emp.monthly_income),
        ("PercentSalaryHike", emp.percent_salary_hike),
    ];
    for (column, value) in amounts {
        if !value.is_finite() || value < 0.0 {
            return Err(DataLoadError::invalid(
                row,
                column,
                format!("{value} is not a non-negative number"),
            ));
        }
    }

    let scales = [
        ("EnvironmentSatisfaction", emp.environment_satisfaction),
        ("JobSatisfaction", emp.job_satisfaction),
        ("PerformanceRating", emp.performance_rating),
        ("RelationshipSatisfaction", emp.relationship_satisfaction),
        ("WorkLifeBalance", emp.work_life_balance),
    ];
    for (column, value) in scales {
        if !(1..=SCALE_MAX).contains(&value) {
            return Err(DataLoadError::invalid(
                row,
                column,
                format!("{value} is outside the 1-{SCALE_MAX} scale"),
            ));
        }
    }
    Ok(())
}

fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|source| DataLoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, one employee per row.
/// Columns beyond [`REQUIRED_COLUMNS`] are ignored.
fn load_csv(path: &Path) -> Result<Vec<Employee>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(open(path)?);

    let headers = reader.headers()?.clone();
    for required in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == required) {
            return Err(DataLoadError::MissingColumn(required.to_string()));
        }
    }

    reader
        .deserialize::<Employee>()
        .map(|row| row.map_err(DataLoadError::from))
        .collect()
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "Age": 41, "Attrition": "Yes", "Department": "Sales", ... },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<Vec<Employee>> {
    let reader = BufReader::new(open(path)?);
    Ok(serde_json::from_reader(reader)?)
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with one column per employee field.
///
/// Columns are cast to the type the record needs (string, Int64, Float64),
/// so files written by both **Pandas** and **Polars** are accepted,
/// including dictionary-encoded categoricals.
fn load_parquet(path: &Path) -> Result<Vec<Employee>> {
    let builder = ParquetRecordBatchReaderBuilder::try_new(open(path)?)?;
    let reader = builder.build()?;

    let mut employees = Vec::new();

    for batch_result in reader {
        let batch = batch_result?;
        let columns = BatchColumns::from_batch(&batch)?;
        let offset = employees.len();

        for row in 0..batch.num_rows() {
            employees.push(columns.employee(offset + row, row)?);
        }
    }

    Ok(employees)
}

// -- Parquet / Arrow helpers --

/// The required columns of one record batch, already cast to their target
/// Arrow types.
struct BatchColumns {
    age: ArrayRef,
    attrition: ArrayRef,
    department: ArrayRef,
    education_field: ArrayRef,
    environment_satisfaction: ArrayRef,
    gender: ArrayRef,
    job_role: ArrayRef,
    job_satisfaction: ArrayRef,
    monthly_income: ArrayRef,
    percent_salary_hike: ArrayRef,
    performance_rating: ArrayRef,
    relationship_satisfaction: ArrayRef,
    total_working_years: ArrayRef,
    work_life_balance: ArrayRef,
}

impl BatchColumns {
    fn from_batch(batch: &RecordBatch) -> Result<Self> {
        let column = |name: &str, to: DataType| -> Result<ArrayRef> {
            let idx = batch
                .schema()
                .index_of(name)
                .map_err(|_| DataLoadError::MissingColumn(name.to_string()))?;
            Ok(cast(batch.column(idx), &to)?)
        };
        let text = |name: &str| column(name, DataType::Utf8);
        let int = |name: &str| column(name, DataType::Int64);
        let float = |name: &str| column(name, DataType::Float64);

        Ok(BatchColumns {
            age: int("Age")?,
            attrition: text("Attrition")?,
            department: text("Department")?,
            education_field: text("EducationField")?,
            environment_satisfaction: int("EnvironmentSatisfaction")?,
            gender: text("Gender")?,
            job_role: text("JobRole")?,
            job_satisfaction: int("JobSatisfaction")?,
            monthly_income: float("MonthlyIncome")?,
            percent_salary_hike: float("PercentSalaryHike")?,
            performance_rating: int("PerformanceRating")?,
            relationship_satisfaction: int("RelationshipSatisfaction")?,
            total_working_years: int("TotalWorkingYears")?,
            work_life_balance: int("WorkLifeBalance")?,
        })
    }

    /// Build the employee at `row` of this batch; `line` is the row number
    /// within the whole file, used in error messages.
    fn employee(&self, line: usize, row: usize) -> Result<Employee> {
        let attrition_text = string_at(&self.attrition, line, row, "Attrition")?;
        let attrition = Attrition::parse(&attrition_text).ok_or_else(|| {
            DataLoadError::invalid(line, "Attrition", format!("expected Yes/No, got '{attrition_text}'"))
        })?;

        Ok(Employee {
            age: int_at(&self.age, line, row, "Age")?,
            attrition,
            department: string_at(&self.department, line, row, "Department")?,
            education_field: string_at(&self.education_field, line, row, "EducationField")?,
            environment_satisfaction: int_at(
                &self.environment_satisfaction,
                line,
                row,
                "EnvironmentSatisfaction",
            )?,
            gender: string_at(&self.gender, line, row, "Gender")?,
            job_role: string_at(&self.job_role, line, row, "JobRole")?,
            job_satisfaction: int_at(&self.job_satisfaction, line, row, "JobSatisfaction")?,
            monthly_income: float_at(&self.monthly_income, line, row, "MonthlyIncome")?,
            percent_salary_hike: float_at(&self.percent_salary_hike, line, row, "PercentSalaryHike")?,
            performance_rating: int_at(&self.performance_rating, line, row, "PerformanceRating")?,
            relationship_satisfaction: int_at(
                &self.relationship_satisfaction,
                line,
                row,
                "RelationshipSatisfaction",
            )?,
            total_working_years: int_at(&self.total_working_years, line, row, "TotalWorkingYears")?,
            work_life_balance: int_at(&self.work_life_balance, line, row, "WorkLifeBalance")?,
        })
    }
}

fn string_at(col: &ArrayRef, line: usize, row: usize, name: &str) -> Result<String> {
    if col.is_null(row) {
        return Err(DataLoadError::invalid(line, name, "null value"));
    }
    Ok(col.as_string::<i32>().value(row).trim().to_string())
}

/// Read an integer cell and narrow it to the record's field type.
fn int_at<T: TryFrom<i64>>(col: &ArrayRef, line: usize, row: usize, name: &str) -> Result<T> {
    if col.is_null(row) {
        return Err(DataLoadError::invalid(line, name, "null or non-integer value"));
    }
    let value = col.as_primitive::<Int64Type>().value(row);
    T::try_from(value).map_err(|_| DataLoadError::invalid(line, name, format!("{value} is out of range")))
}

fn float_at(col: &ArrayRef, line: usize, row: usize, name: &str) -> Result<f64> {
    if col.is_null(row) {
        return Err(DataLoadError::invalid(line, name, "null or non-numeric value"));
    }
    Ok(col.as_primitive::<Float64Type>().value(row))
}
