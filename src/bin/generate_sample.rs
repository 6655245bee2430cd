use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use hr_panda::data::model::{Attrition, Employee};
use parquet::arrow::ArrowWriter;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[(self.next_u64() % items.len() as u64) as usize]
    }

    /// Integer in `lo..=hi`.
    fn range(&mut self, lo: u32, hi: u32) -> u32 {
        lo + (self.next_u64() % u64::from(hi - lo + 1)) as u32
    }

    /// A 1–4 satisfaction score, skewed towards the top of the scale.
    fn score(&mut self) -> u8 {
        match self.next_f64() {
            p if p < 0.18 => 1,
            p if p < 0.40 => 2,
            p if p < 0.72 => 3,
            _ => 4,
        }
    }
}

/// (department, job roles, base monthly income, attrition probability)
const DEPARTMENTS: [(&str, &[&str], f64, f64); 3] = [
    (
        "Sales",
        &["Sales Executive", "Sales Representative", "Manager"],
        6500.0,
        0.21,
    ),
    (
        "Research & Development",
        &[
            "Research Scientist",
            "Laboratory Technician",
            "Healthcare Representative",
            "Manufacturing Director",
            "Research Director",
            "Manager",
        ],
        6200.0,
        0.14,
    ),
    ("Human Resources", &["Human Resources", "Manager"], 5500.0, 0.19),
];

const EDUCATION_FIELDS: [&str; 6] = [
    "Life Sciences",
    "Medical",
    "Marketing",
    "Technical Degree",
    "Human Resources",
    "Other",
];

fn generate(n: usize, rng: &mut SimpleRng) -> Vec<Employee> {
    (0..n)
        .map(|_| {
            // Roughly 65 % R&D, 30 % Sales, 5 % HR.
            let (department, roles, base_income, churn) = match rng.next_f64() {
                p if p < 0.30 => DEPARTMENTS[0],
                p if p < 0.95 => DEPARTMENTS[1],
                _ => DEPARTMENTS[2],
            };
            let job_role = rng.pick(roles);
            let age = rng.range(18, 60);
            let total_working_years = rng.range(0, (age - 18).min(40));
            let seniority = if job_role.contains("Manager") || job_role.contains("Director") {
                2.2
            } else {
                1.0
            };
            let income = (base_income * seniority + 180.0 * f64::from(total_working_years)
                + rng.gauss(0.0, 1200.0))
            .max(1009.0)
            .round();
            let job_satisfaction = rng.score();
            // Unhappy juniors leave more often.
            let mut p_leave = churn;
            if job_satisfaction == 1 {
                p_leave += 0.12;
            }
            if total_working_years < 3 {
                p_leave += 0.10;
            }

            Employee {
                age,
                attrition: if rng.next_f64() < p_leave { Attrition::Yes } else { Attrition::No },
                department: department.to_string(),
                education_field: rng.pick(&EDUCATION_FIELDS).to_string(),
                environment_satisfaction: rng.score(),
                gender: if rng.next_f64() < 0.6 { "Male" } else { "Female" }.to_string(),
                job_role: job_role.to_string(),
                job_satisfaction,
                monthly_income: income,
                percent_salary_hike: f64::from(rng.range(11, 25)),
                performance_rating: if rng.next_f64() < 0.85 { 3 } else { 4 },
                relationship_satisfaction: rng.score(),
                total_working_years,
                work_life_balance: rng.score(),
            }
        })
        .collect()
}

fn write_csv(path: &Path, employees: &[Employee]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV file")?;
    for emp in employees {
        writer.serialize(emp).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV file")?;
    Ok(())
}

fn write_parquet(path: &Path, employees: &[Employee]) -> Result<()> {
    let text = |f: fn(&Employee) -> &str| -> ArrayRef {
        Arc::new(StringArray::from(employees.iter().map(f).collect::<Vec<_>>()))
    };
    let int = |f: fn(&Employee) -> i64| -> ArrayRef {
        Arc::new(Int64Array::from(employees.iter().map(f).collect::<Vec<_>>()))
    };
    let float = |f: fn(&Employee) -> f64| -> ArrayRef {
        Arc::new(Float64Array::from(employees.iter().map(f).collect::<Vec<_>>()))
    };

    let columns: Vec<(&str, DataType, ArrayRef)> = vec![
        ("Age", DataType::Int64, int(|e| i64::from(e.age))),
        ("Attrition", DataType::Utf8, text(|e| if e.attrition.has_left() { "Yes" } else { "No" })),
        ("Department", DataType::Utf8, text(|e| e.department.as_str())),
        ("EducationField", DataType::Utf8, text(|e| e.education_field.as_str())),
        ("EnvironmentSatisfaction", DataType::Int64, int(|e| i64::from(e.environment_satisfaction))),
        ("Gender", DataType::Utf8, text(|e| e.gender.as_str())),
        ("JobRole", DataType::Utf8, text(|e| e.job_role.as_str())),
        ("JobSatisfaction", DataType::Int64, int(|e| i64::from(e.job_satisfaction))),
        ("MonthlyIncome", DataType::Float64, float(|e| e.monthly_income)),
        ("PercentSalaryHike", DataType::Float64, float(|e| e.percent_salary_hike)),
        ("PerformanceRating", DataType::Int64, int(|e| i64::from(e.performance_rating))),
        ("RelationshipSatisfaction", DataType::Int64, int(|e| i64::from(e.relationship_satisfaction))),
        ("TotalWorkingYears", DataType::Int64, int(|e| i64::from(e.total_working_years))),
        ("WorkLifeBalance", DataType::Int64, int(|e| i64::from(e.work_life_balance))),
    ];

    let schema = Arc::new(Schema::new(
        columns
            .iter()
            .map(|(name, dt, _)| Field::new(*name, dt.clone(), false))
            .collect::<Vec<_>>(),
    ));
    let arrays = columns.into_iter().map(|(_, _, arr)| arr).collect();
    let batch = RecordBatch::try_new(schema.clone(), arrays).context("building record batch")?;

    let file = std::fs::File::create(path).context("creating output file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let output = std::env::args().nth(1).unwrap_or_else(|| "sample_hr.csv".to_string());
    let path = Path::new(&output);

    let mut rng = SimpleRng::new(42);
    let employees = generate(1470, &mut rng);

    match path.extension().and_then(|e| e.to_str()) {
        Some("parquet") | Some("pq") => write_parquet(path, &employees)?,
        _ => write_csv(path, &employees)?,
    }

    let leavers = employees.iter().filter(|e| e.attrition.has_left()).count();
    println!(
        "Wrote {} employees ({leavers} leavers) to {}",
        employees.len(),
        path.display()
    );
    Ok(())
}
