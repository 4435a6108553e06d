use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use serde_json::Value as JsonValue;

use super::model::{parse_numeric, FacultyRecord, Rank, Sex};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the faculty salary table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`  – header row with `discipline`, `sex`, `rank`, `yrs.since.phd`,
///             `yrs.service`, `salary` (the original dataset layout)
/// * `.json` – records-oriented array of objects with the same field names
pub fn load_file(path: &Path) -> Result<Vec<FacultyRecord>> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// One CSV row as it appears on disk.  The numeric columns arrive as decimal
/// text and are converted after deserialization.
#[derive(Debug, Deserialize)]
struct RawRow {
    discipline: String,
    sex: String,
    rank: String,
    #[serde(rename = "yrs.since.phd")]
    yrs_since_phd: String,
    #[serde(rename = "yrs.service")]
    yrs_service: String,
    salary: String,
}

impl RawRow {
    fn into_record(self) -> Result<FacultyRecord> {
        Ok(FacultyRecord {
            discipline: self.discipline,
            sex: Sex::parse(&self.sex),
            rank: Rank::parse(&self.rank),
            yrs_since_phd: parse_numeric("yrs.since.phd", &self.yrs_since_phd)?,
            yrs_service: parse_numeric("yrs.service", &self.yrs_service)?,
            salary: parse_numeric("salary", &self.salary)?,
        })
    }
}

fn load_csv(path: &Path) -> Result<Vec<FacultyRecord>> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;

    let mut records = Vec::new();
    for (row_no, result) in reader.deserialize::<RawRow>().enumerate() {
        let raw = result.with_context(|| format!("CSV row {row_no}"))?;
        let record = raw
            .into_record()
            .with_context(|| format!("CSV row {row_no}"))?;
        records.push(record);
    }

    Ok(records)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented):
///
/// ```json
/// [
///   {
///     "discipline": "A",
///     "sex": "Female",
///     "rank": "Prof",
///     "yrs.since.phd": 22,
///     "yrs.service": 18,
///     "salary": 139750
///   },
///   ...
/// ]
/// ```
///
/// Numeric fields may be JSON numbers or decimal strings.
fn load_json(path: &Path) -> Result<Vec<FacultyRecord>> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let rows = root.as_array().context("Expected top-level JSON array")?;

    let mut records = Vec::with_capacity(rows.len());
    for (i, row) in rows.iter().enumerate() {
        let obj = row
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;

        let record = FacultyRecord {
            discipline: json_text(obj.get("discipline"), i, "discipline")?,
            sex: Sex::parse(&json_text(obj.get("sex"), i, "sex")?),
            rank: Rank::parse(&json_text(obj.get("rank"), i, "rank")?),
            yrs_since_phd: json_numeric(obj.get("yrs.since.phd"), i, "yrs.since.phd")?,
            yrs_service: json_numeric(obj.get("yrs.service"), i, "yrs.service")?,
            salary: json_numeric(obj.get("salary"), i, "salary")?,
        };
        records.push(record);
    }

    Ok(records)
}

fn json_text(val: Option<&JsonValue>, row: usize, col: &str) -> Result<String> {
    val.and_then(|v| v.as_str())
        .map(|s| s.to_string())
        .with_context(|| format!("Row {row}: missing or non-string '{col}'"))
}

fn json_numeric(val: Option<&JsonValue>, row: usize, col: &'static str) -> Result<i64> {
    let val = val.with_context(|| format!("Row {row}: missing '{col}'"))?;
    match val {
        JsonValue::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .with_context(|| format!("Row {row}: '{col}' is out of range")),
        JsonValue::String(s) => {
            parse_numeric(col, s).with_context(|| format!("Row {row}: bad '{col}'"))
        }
        other => bail!("Row {row}: '{col}' is not a number, got {other}"),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn write_temp(ext: &str, contents: &str) -> tempfile::TempPath {
        let mut file = tempfile::Builder::new()
            .suffix(&format!(".{ext}"))
            .tempfile()
            .unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.into_temp_path()
    }

    #[test]
    fn csv_rows_convert_to_typed_records() {
        let path = write_temp(
            "csv",
            "rank,discipline,yrs.since.phd,yrs.service,sex,salary\n\
             Prof,B,19,18,Male,139750.0\n\
             AsstProf,A,4,3,Female,80225\n",
        );
        let records = load_file(&path).unwrap();
        assert_eq!(records.len(), 2);

        assert_eq!(records[0].rank, Rank::Prof);
        assert_eq!(records[0].sex, Sex::Male);
        assert_eq!(records[0].yrs_since_phd, 19);
        assert_eq!(records[0].salary, 139_750);

        assert_eq!(records[1].discipline, "A");
        assert_eq!(records[1].yrs_service, 3);
    }

    #[test]
    fn malformed_numeric_text_is_an_error_with_row_context() {
        let path = write_temp(
            "csv",
            "rank,discipline,yrs.since.phd,yrs.service,sex,salary\n\
             Prof,B,19,18,Male,not-a-salary\n",
        );
        let err = load_file(&path).unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains("row 0"), "unexpected error: {msg}");
        assert!(msg.contains("not-a-salary"), "unexpected error: {msg}");
    }

    #[test]
    fn json_rows_accept_numbers_and_decimal_strings() {
        let path = write_temp(
            "json",
            r#"[
                {"discipline": "A", "sex": "Female", "rank": "Prof",
                 "yrs.since.phd": 22, "yrs.service": 18, "salary": 139750},
                {"discipline": "B", "sex": "Male", "rank": "AssocProf",
                 "yrs.since.phd": "9", "yrs.service": "7", "salary": "91000.0"}
            ]"#,
        );
        let records = load_file(&path).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].salary, 139_750);
        assert_eq!(records[1].rank, Rank::AssocProf);
        assert_eq!(records[1].salary, 91_000);
    }

    #[test]
    fn unknown_extensions_are_rejected() {
        let path = write_temp("parquet", "");
        let err = load_file(&path).unwrap_err();
        assert!(err.to_string().contains("Unsupported file extension"));
    }
}
