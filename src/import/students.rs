// src/import/students.rs
//! Bulk student import from a university CSV export

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};
use uuid::Uuid;

use crate::utils::{initials, is_valid_email, mask_email, normalize_header, read_file_safe};

const MIN_GRADUATION_YEAR: u16 = 1950;
const MAX_GRADUATION_YEAR: u16 = 2100;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentRecord {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub masked_email: String,
    pub initials: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub university: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub degree: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub major: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub graduation_year: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gpa: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RowError {
    pub line: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportReport {
    pub batch_id: Uuid,
    pub imported_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub university: Option<String>,
    pub total_rows: usize,
    pub students: Vec<StudentRecord>,
    pub errors: Vec<RowError>,
}

impl ImportReport {
    pub fn imported_count(&self) -> usize {
        self.students.len()
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }
}

/// Column positions resolved from the header row
struct Columns {
    first_name: usize,
    last_name: usize,
    email: usize,
    degree: Option<usize>,
    major: Option<usize>,
    graduation_year: Option<usize>,
    gpa: Option<usize>,
}

impl Columns {
    fn from_headers(headers: &csv::StringRecord) -> Result<Self> {
        let normalized: Vec<String> = headers.iter().map(normalize_header).collect();
        let find = |aliases: &[&str]| {
            normalized
                .iter()
                .position(|h| aliases.contains(&h.as_str()))
        };
        let require = |aliases: &[&str], name: &str| {
            find(aliases).ok_or_else(|| anyhow::anyhow!("Missing required column: {}", name))
        };

        Ok(Self {
            first_name: require(&["firstname", "givenname", "nome"], "first_name")?,
            last_name: require(&["lastname", "surname", "familyname", "cognome"], "last_name")?,
            email: require(&["email", "emailaddress"], "email")?,
            degree: find(&["degree"]),
            major: find(&["major", "fieldofstudy"]),
            graduation_year: find(&["graduationyear", "gradyear"]),
            gpa: find(&["gpa"]),
        })
    }
}

fn field<'r>(record: &'r csv::StringRecord, index: Option<usize>) -> Option<&'r str> {
    index
        .and_then(|i| record.get(i))
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

fn parse_row(
    record: &csv::StringRecord,
    columns: &Columns,
    university: Option<&str>,
) -> std::result::Result<StudentRecord, String> {
    let first_name = field(record, Some(columns.first_name)).ok_or("Missing first name")?;
    let last_name = field(record, Some(columns.last_name)).ok_or("Missing last name")?;
    let email = field(record, Some(columns.email))
        .ok_or("Missing email")?
        .to_lowercase();

    if !is_valid_email(&email) {
        return Err(format!("Invalid email: {}", email));
    }

    let graduation_year = match field(record, columns.graduation_year) {
        Some(raw) => {
            let year = raw
                .parse::<u16>()
                .ok()
                .filter(|y| {
                    raw.len() == 4 && (MIN_GRADUATION_YEAR..=MAX_GRADUATION_YEAR).contains(y)
                })
                .ok_or_else(|| format!("Invalid graduation year: {}", raw))?;
            Some(year)
        }
        None => None,
    };

    let gpa = match field(record, columns.gpa) {
        Some(raw) => {
            let gpa = raw
                .replace(',', ".")
                .parse::<f64>()
                .ok()
                .filter(|g| g.is_finite() && *g >= 0.0)
                .ok_or_else(|| format!("Invalid GPA: {}", raw))?;
            Some(gpa)
        }
        None => None,
    };

    Ok(StudentRecord {
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        masked_email: mask_email(&email),
        initials: initials(first_name, last_name),
        email,
        university: university.map(str::to_string),
        degree: field(record, columns.degree).map(str::to_string),
        major: field(record, columns.major).map(str::to_string),
        graduation_year,
        gpa,
    })
}

/// Parse and validate a student CSV. Invalid rows are reported, not fatal.
pub fn parse_students<R: Read>(reader: R, university: Option<&str>) -> Result<ImportReport> {
    let university = university.map(str::trim).filter(|u| !u.is_empty());

    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader
        .headers()
        .context("Failed to read CSV header row")?
        .clone();
    let columns = Columns::from_headers(&headers)?;

    let mut students = Vec::new();
    let mut errors = Vec::new();
    let mut seen_emails = HashSet::new();
    let mut total_rows = 0;

    for result in csv_reader.records() {
        total_rows += 1;

        let record = match result {
            Ok(record) => record,
            Err(e) => {
                let line = e.position().map(|p| p.line()).unwrap_or(0);
                warn!("CSV parsing error at line {}: {}", line, e);
                errors.push(RowError {
                    line,
                    email: None,
                    message: format!("CSV parsing error: {}", e),
                });
                continue;
            }
        };

        let line = record.position().map(|p| p.line()).unwrap_or(0);

        match parse_row(&record, &columns, university) {
            Ok(student) => {
                if seen_emails.insert(student.email.clone()) {
                    students.push(student);
                } else {
                    errors.push(RowError {
                        line,
                        email: Some(student.email.clone()),
                        message: format!("Duplicate email: {}", student.email),
                    });
                }
            }
            Err(message) => {
                errors.push(RowError {
                    line,
                    email: field(&record, Some(columns.email)).map(str::to_lowercase),
                    message,
                });
            }
        }
    }

    info!(
        "Student import parsed: {} rows, {} valid, {} rejected",
        total_rows,
        students.len(),
        errors.len()
    );

    Ok(ImportReport {
        batch_id: Uuid::new_v4(),
        imported_at: Utc::now(),
        university: university.map(str::to_string),
        total_rows,
        students,
        errors,
    })
}

pub fn parse_students_str(content: &str, university: Option<&str>) -> Result<ImportReport> {
    parse_students(content.as_bytes(), university)
}

/// Read a CSV file and parse it
pub async fn import_file(path: &Path, university: Option<&str>) -> Result<ImportReport> {
    let content = read_file_safe(path).await?;
    parse_students_str(&content, university)
        .with_context(|| format!("Failed to import students from {}", path.display()))
}
