use std::fs::File;
use std::path::{Path, PathBuf};

use arrow::array::{Array, ArrayRef, AsArray};
use arrow::datatypes::{DataType, Float32Type, Float64Type, Int32Type, Int64Type};
use arrow::error::ArrowError;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::errors::ParquetError;
use serde_json::Value as JsonValue;
use thiserror::Error;

use super::model::{
    Dataset, LaunchRecord, Outcome, COL_BOOSTER, COL_CLASS, COL_PAYLOAD, COL_SITE,
};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Why a launch records file could not be turned into a [`Dataset`].
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),

    #[error("cannot read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV")]
    Csv(#[from] csv::Error),

    #[error("malformed JSON")]
    Json(#[from] serde_json::Error),

    #[error("expected a top-level JSON array of row objects")]
    JsonNotArray,

    #[error("row {0} is not a JSON object")]
    JsonRowNotObject(usize),

    #[error("malformed parquet file")]
    Parquet(#[from] ParquetError),

    #[error("reading parquet record batch")]
    Arrow(#[from] ArrowError),

    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("row {row}, column '{column}': {value:?} is {reason}")]
    InvalidValue {
        row: usize,
        column: &'static str,
        value: String,
        reason: &'static str,
    },
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a launch records dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with the required column names (recommended)
/// * `.json`    – `[{ "Launch Site": "...", "Payload Mass (kg)": 500.0, ... }, ...]`
/// * `.parquet` – one row per launch, same column names
///
/// Columns other than the four required ones are ignored.
pub fn load_file(path: &Path) -> Result<Dataset, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => Err(LoadError::UnsupportedExtension(other.to_string())),
    }
}

fn open(path: &Path) -> Result<File, LoadError> {
    File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

// ---------------------------------------------------------------------------
// Cell parsing shared by every format
// ---------------------------------------------------------------------------

/// Raw text of the four required cells of one row.
struct RawRow<'a> {
    site: &'a str,
    payload: &'a str,
    class: &'a str,
    booster: &'a str,
}

impl RawRow<'_> {
    fn parse(&self, row: usize) -> Result<LaunchRecord, LoadError> {
        let invalid = |column, value: &str, reason| LoadError::InvalidValue {
            row,
            column,
            value: value.to_string(),
            reason,
        };

        let payload_kg = self
            .payload
            .trim()
            .parse::<f64>()
            .map_err(|_| invalid(COL_PAYLOAD, self.payload, "not a number"))?;
        if !payload_kg.is_finite() || payload_kg < 0.0 {
            return Err(invalid(COL_PAYLOAD, self.payload, "not a non-negative mass"));
        }

        let outcome = self
            .class
            .trim()
            .parse::<f64>()
            .ok()
            .and_then(Outcome::from_class)
            .ok_or_else(|| invalid(COL_CLASS, self.class, "not 0 or 1"))?;

        Ok(LaunchRecord::new(
            self.site.trim(),
            payload_kg,
            outcome,
            self.booster.trim(),
        ))
    }
}

/// Positions of the required columns within a header row.
struct ColumnIndex {
    site: usize,
    payload: usize,
    class: usize,
    booster: usize,
}

impl ColumnIndex {
    fn locate<S: AsRef<str>>(headers: &[S]) -> Result<Self, LoadError> {
        let find = |name: &'static str| {
            headers
                .iter()
                .position(|h| h.as_ref().trim() == name)
                .ok_or(LoadError::MissingColumn(name))
        };
        Ok(ColumnIndex {
            site: find(COL_SITE)?,
            payload: find(COL_PAYLOAD)?,
            class: find(COL_CLASS)?,
            booster: find(COL_BOOSTER)?,
        })
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, one launch per line.
fn load_csv(path: &Path) -> Result<Dataset, LoadError> {
    let file = open(path)?;
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_reader(file);

    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();
    let idx = ColumnIndex::locate(&headers)?;

    let mut records = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result?;
        let cell = |i: usize| record.get(i).unwrap_or("");
        let raw = RawRow {
            site: cell(idx.site),
            payload: cell(idx.payload),
            class: cell(idx.class),
            booster: cell(idx.booster),
        };
        records.push(raw.parse(row_no)?);
    }

    Ok(Dataset::from_records(records))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   {
///     "Launch Site": "CCAFS LC-40",
///     "Payload Mass (kg)": 525.0,
///     "class": 0,
///     "Booster Version Category": "v1.0"
///   },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<Dataset, LoadError> {
    let root: JsonValue = serde_json::from_reader(std::io::BufReader::new(open(path)?))?;
    let rows = root.as_array().ok_or(LoadError::JsonNotArray)?;

    let mut records = Vec::with_capacity(rows.len());
    for (i, row) in rows.iter().enumerate() {
        let obj = row.as_object().ok_or(LoadError::JsonRowNotObject(i))?;
        let cell = |name: &'static str| -> Result<String, LoadError> {
            let val = obj.get(name).ok_or(LoadError::MissingColumn(name))?;
            json_cell_text(val).ok_or_else(|| LoadError::InvalidValue {
                row: i,
                column: name,
                value: val.to_string(),
                reason: "not a string or number",
            })
        };
        let (site, payload, class, booster) =
            (cell(COL_SITE)?, cell(COL_PAYLOAD)?, cell(COL_CLASS)?, cell(COL_BOOSTER)?);
        let raw = RawRow {
            site: &site,
            payload: &payload,
            class: &class,
            booster: &booster,
        };
        records.push(raw.parse(i)?);
    }

    Ok(Dataset::from_records(records))
}

fn json_cell_text(val: &JsonValue) -> Option<String> {
    match val {
        JsonValue::String(s) => Some(s.clone()),
        JsonValue::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file containing launch records.
///
/// String columns may be `Utf8` or `LargeUtf8`; numeric columns any of the
/// common integer or float widths. Files written by both **Pandas** and
/// **Polars** work.
fn load_parquet(path: &Path) -> Result<Dataset, LoadError> {
    let builder = ParquetRecordBatchReaderBuilder::try_new(open(path)?)?;
    let reader = builder.build()?;

    let mut records = Vec::new();
    let mut row_base = 0;

    for batch_result in reader {
        let batch = batch_result?;
        let schema = batch.schema();
        let names: Vec<&str> = schema.fields().iter().map(|f| f.name().as_str()).collect();
        let idx = ColumnIndex::locate(&names)?;

        for row in 0..batch.num_rows() {
            let row_no = row_base + row;
            let text = |col: usize, name: &'static str| {
                arrow_cell_text(batch.column(col), row).ok_or_else(|| LoadError::InvalidValue {
                    row: row_no,
                    column: name,
                    value: format!("{:?}", batch.column(col).data_type()),
                    reason: "null or of an unsupported type",
                })
            };
            let site = text(idx.site, COL_SITE)?;
            let payload = text(idx.payload, COL_PAYLOAD)?;
            let class = text(idx.class, COL_CLASS)?;
            let booster = text(idx.booster, COL_BOOSTER)?;
            let raw = RawRow {
                site: &site,
                payload: &payload,
                class: &class,
                booster: &booster,
            };
            records.push(raw.parse(row_no)?);
        }
        row_base += batch.num_rows();
    }

    Ok(Dataset::from_records(records))
}

/// Render a single Arrow cell as text, `None` for nulls and nested types.
fn arrow_cell_text(col: &ArrayRef, row: usize) -> Option<String> {
    if col.is_null(row) {
        return None;
    }
    let text = match col.data_type() {
        DataType::Utf8 => col.as_string::<i32>().value(row).to_string(),
        DataType::LargeUtf8 => col.as_string::<i64>().value(row).to_string(),
        DataType::Int32 => col.as_primitive::<Int32Type>().value(row).to_string(),
        DataType::Int64 => col.as_primitive::<Int64Type>().value(row).to_string(),
        DataType::Float32 => col.as_primitive::<Float32Type>().value(row).to_string(),
        DataType::Float64 => col.as_primitive::<Float64Type>().value(row).to_string(),
        _ => return None,
    };
    Some(text)
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Arc;

    use arrow::array::{Float64Array, Int64Array, StringArray};
    use arrow::datatypes::{Field, Schema};
    use arrow::record_batch::RecordBatch;
    use parquet::arrow::ArrowWriter;

    use super::*;

    fn write_temp(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(suffix)
            .tempfile()
            .expect("create temp file");
        file.write_all(contents.as_bytes()).expect("write temp file");
        file
    }

    #[test]
    fn csv_loads_required_columns_and_ignores_extras() {
        let file = write_temp(
            ".csv",
            "Flight Number,Launch Site,class,Payload Mass (kg),Booster Version,Booster Version Category\n\
             1,CCAFS LC-40,0,0,F9 v1.0  B0003,v1.0\n\
             2,VAFB SLC-4E,1,500,F9 v1.1,v1.1\n\
             3,CCAFS LC-40,1.0,2296.5,F9 FT B1021.1,FT\n",
        );
        let ds = load_file(file.path()).expect("load csv");
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.sites(), ["CCAFS LC-40".to_string(), "VAFB SLC-4E".to_string()]);
        assert_eq!(ds.min_payload(), Some(0.0));
        assert_eq!(ds.max_payload(), Some(2296.5));

        let third = &ds.records()[2];
        assert_eq!(third.outcome, Outcome::Success);
        assert_eq!(third.booster_category, "FT");
    }

    #[test]
    fn csv_header_whitespace_is_trimmed() {
        let file = write_temp(
            ".csv",
            " Launch Site , Payload Mass (kg) , class , Booster Version Category \n\
             KSC LC-39A,3000,1,B4\n",
        );
        let ds = load_file(file.path()).expect("load csv");
        assert_eq!(ds.records()[0].site, "KSC LC-39A");
    }

    #[test]
    fn csv_missing_column_is_rejected() {
        let file = write_temp(".csv", "Launch Site,Payload Mass (kg),class\nA,100,1\n");
        let err = load_file(file.path()).unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn(COL_BOOSTER)), "{err}");
    }

    #[test]
    fn csv_bad_class_reports_row_and_column() {
        let file = write_temp(
            ".csv",
            "Launch Site,Payload Mass (kg),class,Booster Version Category\n\
             A,100,1,FT\n\
             A,100,2,FT\n",
        );
        match load_file(file.path()).unwrap_err() {
            LoadError::InvalidValue { row, column, .. } => {
                assert_eq!(row, 1);
                assert_eq!(column, COL_CLASS);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn csv_negative_payload_is_rejected() {
        let file = write_temp(
            ".csv",
            "Launch Site,Payload Mass (kg),class,Booster Version Category\nA,-5,1,FT\n",
        );
        let err = load_file(file.path()).unwrap_err();
        assert!(matches!(err, LoadError::InvalidValue { column: COL_PAYLOAD, .. }));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let err = load_file(&dir.path().join("nope.csv")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let file = write_temp(".xlsx", "");
        let err = load_file(file.path()).unwrap_err();
        assert!(matches!(err, LoadError::UnsupportedExtension(ref ext) if ext == "xlsx"));
    }

    #[test]
    fn json_accepts_numbers_and_strings() {
        let file = write_temp(
            ".json",
            r#"[
                {"Launch Site": "A", "Payload Mass (kg)": 500, "class": 1, "Booster Version Category": "FT", "extra": null},
                {"Launch Site": "B", "Payload Mass (kg)": "1500.5", "class": "0", "Booster Version Category": "B4"}
            ]"#,
        );
        let ds = load_file(file.path()).expect("load json");
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records()[1].payload_kg, 1500.5);
        assert_eq!(ds.records()[1].outcome, Outcome::Failure);
    }

    #[test]
    fn json_object_root_is_rejected() {
        let file = write_temp(".json", r#"{"Launch Site": "A"}"#);
        assert!(matches!(load_file(file.path()).unwrap_err(), LoadError::JsonNotArray));
    }

    #[test]
    fn parquet_loads_typed_columns() {
        let schema = Arc::new(Schema::new(vec![
            Field::new(COL_SITE, DataType::Utf8, false),
            Field::new(COL_PAYLOAD, DataType::Float64, false),
            Field::new(COL_CLASS, DataType::Int64, false),
            Field::new(COL_BOOSTER, DataType::Utf8, false),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(StringArray::from(vec!["A", "B"])),
                Arc::new(Float64Array::from(vec![500.0, 4000.0])),
                Arc::new(Int64Array::from(vec![1, 0])),
                Arc::new(StringArray::from(vec!["FT", "B5"])),
            ],
        )
        .expect("record batch");

        let file = tempfile::Builder::new()
            .suffix(".parquet")
            .tempfile()
            .expect("create temp file");
        let mut writer = ArrowWriter::try_new(File::create(file.path()).expect("open"), schema, None)
            .expect("writer");
        writer.write(&batch).expect("write batch");
        writer.close().expect("close writer");

        let ds = load_file(file.path()).expect("load parquet");
        assert_eq!(ds.sites(), ["A".to_string(), "B".to_string()]);
        assert_eq!(ds.records()[0].outcome, Outcome::Success);
        assert_eq!(ds.max_payload(), Some(4000.0));
    }
}
