//! Bulk import
//!
//! Reads candidate expenses from a JSON list or a CSV file with a header row
//! and runs each one through the same validation as a manual add. Invalid
//! records are skipped and reported one by one; they never abort the import.
//!
//! Nothing here touches the store. The caller decides whether to merge the
//! accepted records and save.

use std::collections::HashMap;
use std::fmt;
use std::io::Read;
use std::path::Path;

use chrono::Local;
use csv::{ReaderBuilder, StringRecord, Trim};
use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{ExpenseInput, NewExpense, ValidationError};

/// Supported import document formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportFormat {
    Json,
    Csv,
}

impl ImportFormat {
    /// Pick the format from the file extension (case-insensitive)
    pub fn from_path(path: &Path) -> ExpenseResult<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match extension.as_deref() {
            Some("json") => Ok(Self::Json),
            Some("csv") => Ok(Self::Csv),
            _ => Err(ExpenseError::Import(format!(
                "Unsupported file type: {}. Please provide a .csv or .json file",
                path.display()
            ))),
        }
    }
}

/// Why a candidate record was not imported
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// A field failed validation
    Invalid(ValidationError),
    /// The record could not be read as a set of fields at all
    Malformed(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Invalid(e) => write!(f, "{}", e),
            Self::Malformed(msg) => write!(f, "{}", msg),
        }
    }
}

impl From<ValidationError> for SkipReason {
    fn from(err: ValidationError) -> Self {
        Self::Invalid(err)
    }
}

/// A candidate record that was skipped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRecord {
    /// 1-based position of the record in the document (data rows only for CSV)
    pub position: usize,
    /// The record as it appeared in the input
    pub raw: String,
    pub reason: SkipReason,
}

/// Outcome of reading an import document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub accepted: Vec<NewExpense>,
    pub skipped: Vec<SkippedRecord>,
}

impl ImportReport {
    pub fn total(&self) -> usize {
        self.accepted.len() + self.skipped.len()
    }

    fn record(&mut self, position: usize, raw: String, result: Result<NewExpense, SkipReason>) {
        match result {
            Ok(expense) => self.accepted.push(expense),
            Err(reason) => {
                debug!(position, %reason, "skipping import record");
                self.skipped.push(SkippedRecord {
                    position,
                    raw,
                    reason,
                });
            }
        }
    }
}

/// Read and validate every record of an import file
pub fn import_file(path: &Path) -> ExpenseResult<ImportReport> {
    let format = ImportFormat::from_path(path)?;
    let content = std::fs::read_to_string(path).map_err(|e| {
        ExpenseError::Import(format!("Failed to read {}: {}", path.display(), e))
    })?;

    let report = match format {
        ImportFormat::Json => import_json_str(&content)?,
        ImportFormat::Csv => import_csv(content.as_bytes())?,
    };

    info!(
        path = %path.display(),
        accepted = report.accepted.len(),
        skipped = report.skipped.len(),
        "read import file"
    );
    Ok(report)
}

/// Import from a JSON document holding a list of record objects
pub fn import_json_str(content: &str) -> ExpenseResult<ImportReport> {
    let document: Value = serde_json::from_str(content)
        .map_err(|e| ExpenseError::Import(format!("Invalid JSON: {}", e)))?;

    let Value::Array(items) = document else {
        return Err(ExpenseError::Import(
            "JSON file must contain a list of expense records".into(),
        ));
    };

    let mut report = ImportReport::default();
    for (idx, item) in items.iter().enumerate() {
        let result = match item {
            Value::Object(fields) => json_record_to_input(fields).and_then(validate),
            _ => Err(SkipReason::Malformed("Record is not an object".into())),
        };
        report.record(idx + 1, item.to_string(), result);
    }
    Ok(report)
}

/// Import from CSV text whose header row names the required columns
pub fn import_csv<R: Read>(reader: R) -> ExpenseResult<ImportReport> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::Headers)
        .flexible(true)
        .from_reader(reader);

    let columns = CsvColumns::from_headers(reader.headers()?)?;

    let mut report = ImportReport::default();
    for (idx, row) in reader.records().enumerate() {
        let position = idx + 1;
        match row {
            Ok(record) => {
                let raw = record.iter().collect::<Vec<_>>().join(",");
                let result = columns.to_input(&record).and_then(validate);
                report.record(position, raw, result);
            }
            Err(e) => report.record(
                position,
                String::new(),
                Err(SkipReason::Malformed(format!("Unreadable CSV row: {}", e))),
            ),
        }
    }
    Ok(report)
}

fn validate(input: ExpenseInput) -> Result<NewExpense, SkipReason> {
    Ok(input.validate(Local::now().naive_local())?)
}

fn json_record_to_input(fields: &Map<String, Value>) -> Result<ExpenseInput, SkipReason> {
    let field = |name: &'static str| -> Result<String, SkipReason> {
        match fields.get(name) {
            None | Some(Value::Null) => Err(ValidationError::MissingField(name).into()),
            Some(Value::String(s)) => Ok(s.clone()),
            Some(Value::Number(n)) => Ok(n.to_string()),
            Some(Value::Bool(b)) => Ok(b.to_string()),
            Some(_) => Err(SkipReason::Malformed(format!(
                "Field '{}' must be text or a number",
                name
            ))),
        }
    };

    let date = field("date")?;
    Ok(ExpenseInput {
        amount: field("amount")?,
        category: field("category")?,
        description: field("description")?,
        date: Some(date),
    })
}

/// Positions of the required columns in a CSV header row
#[derive(Debug, Clone, PartialEq, Eq)]
struct CsvColumns {
    date: usize,
    amount: usize,
    category: usize,
    description: usize,
}

impl CsvColumns {
    fn from_headers(headers: &StringRecord) -> ExpenseResult<Self> {
        let by_name: HashMap<String, usize> = headers
            .iter()
            .enumerate()
            .map(|(idx, h)| (h.trim().trim_start_matches('\u{feff}').to_lowercase(), idx))
            .collect();

        let column = |name: &str| {
            by_name.get(name).copied().ok_or_else(|| {
                ExpenseError::Import(format!("CSV file is missing the '{}' column", name))
            })
        };

        Ok(Self {
            date: column("date")?,
            amount: column("amount")?,
            category: column("category")?,
            description: column("description")?,
        })
    }

    fn to_input(&self, record: &StringRecord) -> Result<ExpenseInput, SkipReason> {
        let cell = |idx: usize, name: &'static str| {
            record
                .get(idx)
                .map(str::to_string)
                .ok_or(SkipReason::Invalid(ValidationError::MissingField(name)))
        };

        let date = cell(self.date, "date")?;
        Ok(ExpenseInput {
            amount: cell(self.amount, "amount")?,
            category: cell(self.category, "category")?,
            description: cell(self.description, "description")?,
            date: Some(date),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Money};
    use tempfile::TempDir;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(
            ImportFormat::from_path(Path::new("a.json")).unwrap(),
            ImportFormat::Json
        );
        assert_eq!(
            ImportFormat::from_path(Path::new("B.CSV")).unwrap(),
            ImportFormat::Csv
        );
        assert!(matches!(
            ImportFormat::from_path(Path::new("notes.txt")),
            Err(ExpenseError::Import(_))
        ));
        assert!(ImportFormat::from_path(Path::new("noext")).is_err());
    }

    #[test]
    fn test_json_import_skips_invalid_records() {
        let content = r#"[
            {"date": "2025-10-24", "amount": 12.5, "category": "Food & Dining", "description": "Lunch"},
            {"date": "2025-10-24", "amount": -3, "category": "Other", "description": "Refund"},
            {"date": "2025-10-24 18:00", "amount": "9", "category": "Groceries", "description": "Milk"}
        ]"#;

        let report = import_json_str(content).unwrap();

        assert_eq!(report.accepted.len(), 1);
        assert_eq!(report.accepted[0].amount, Money::from_cents(1250));
        assert_eq!(report.accepted[0].category, Category::FoodAndDining);

        assert_eq!(report.skipped.len(), 2);
        assert_eq!(report.skipped[0].position, 2);
        assert_eq!(
            report.skipped[0].reason,
            SkipReason::Invalid(ValidationError::NonPositiveAmount(Money::from_cents(-300)))
        );
        assert_eq!(report.skipped[1].position, 3);
        assert_eq!(
            report.skipped[1].reason,
            SkipReason::Invalid(ValidationError::UnknownCategory("Groceries".into()))
        );
        assert_eq!(report.total(), 3);
    }

    #[test]
    fn test_json_import_missing_and_malformed_fields() {
        let content = r#"[
            {"amount": 1, "category": "Other", "description": "no date"},
            {"date": "2025-10-24", "amount": [1], "category": "Other", "description": "x"},
            "just a string",
            {"date": "2025-10-24", "amount": 1, "category": "Other", "description": ""}
        ]"#;

        let report = import_json_str(content).unwrap();
        assert!(report.accepted.is_empty());

        let reasons: Vec<&SkipReason> = report.skipped.iter().map(|s| &s.reason).collect();
        assert_eq!(
            reasons[0],
            &SkipReason::Invalid(ValidationError::MissingField("date"))
        );
        assert!(matches!(reasons[1], SkipReason::Malformed(_)));
        assert!(matches!(reasons[2], SkipReason::Malformed(_)));
        assert_eq!(
            reasons[3],
            &SkipReason::Invalid(ValidationError::EmptyDescription)
        );
    }

    #[test]
    fn test_json_document_must_be_a_list() {
        assert!(matches!(
            import_json_str(r#"{"date": "2025-10-24"}"#),
            Err(ExpenseError::Import(_))
        ));
        assert!(matches!(
            import_json_str("not json"),
            Err(ExpenseError::Import(_))
        ));
    }

    #[test]
    fn test_csv_import() {
        let content = "\
Description, Amount ,DATE,category,notes
Rent,1200,2025-10-01,Housing,october
Bus,0,2025-10-02 08:15,Transportation,
\"Dinner, with friends\",45.10,2025-10-03 20:00,Food & Dining,
Doctor,80,03/10/2025,Healthcare & Insurance,
";

        let report = import_csv(content.as_bytes()).unwrap();

        assert_eq!(report.accepted.len(), 2);
        assert_eq!(report.accepted[0].description, "Rent");
        assert_eq!(report.accepted[1].description, "Dinner, with friends");
        assert_eq!(report.accepted[1].amount, Money::from_cents(4510));

        let skipped: Vec<(usize, &str)> = report
            .skipped
            .iter()
            .map(|s| (s.position, s.reason_field()))
            .collect();
        assert_eq!(skipped, vec![(2, "amount"), (4, "date")]);
    }

    #[test]
    fn test_category_labels_are_not_trimmed() {
        let json = r#"[{"date": "2025-10-24", "amount": 4, "category": " Housing ", "description": "x"}]"#;
        let report = import_json_str(json).unwrap();
        assert_eq!(
            report.skipped[0].reason,
            SkipReason::Invalid(ValidationError::UnknownCategory(" Housing ".into()))
        );

        let csv = "date, amount ,category,description\n2025-10-24, 4 , Housing,x\n";
        let report = import_csv(csv.as_bytes()).unwrap();
        assert!(report.accepted.is_empty());
        assert_eq!(report.skipped[0].reason_field(), "category");
    }

    #[test]
    fn test_csv_short_row_is_skipped() {
        let content = "date,amount,category,description\n2025-10-01,5\n";
        let report = import_csv(content.as_bytes()).unwrap();
        assert_eq!(
            report.skipped[0].reason,
            SkipReason::Invalid(ValidationError::MissingField("category"))
        );
    }

    #[test]
    fn test_csv_missing_column_fails_whole_import() {
        let content = "date,amount,description\n2025-10-01,5,x\n";
        let err = import_csv(content.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("category"));
    }

    #[test]
    fn test_import_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("expenses.CSV");
        std::fs::write(
            &path,
            "date,amount,category,description\n2025-10-01,5,Other,Stamp\n",
        )
        .unwrap();

        let report = import_file(&path).unwrap();
        assert_eq!(report.accepted.len(), 1);

        let missing = temp_dir.path().join("missing.json");
        assert!(matches!(import_file(&missing), Err(ExpenseError::Import(_))));
    }

    impl SkippedRecord {
        fn reason_field(&self) -> &'static str {
            match &self.reason {
                SkipReason::Invalid(e) => e.field(),
                SkipReason::Malformed(_) => "malformed",
            }
        }
    }
}
