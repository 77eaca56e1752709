//! CSV-backed attendance store and register lookup.
//!
//! Every call reads the files fresh. Writes replace the whole attendance
//! file through a sibling temp file and a rename.

use crate::config::Config;
use crate::engine::{self, SubmitOutcome};
use crate::error::AppResult;
use crate::model::{attendance::AttendanceRecord, merged::MergedRow, register::RegisterEntry};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::NamedTempFile;
use tracing::{debug, info};

const ATTENDANCE_HEADERS: [&str; 3] = ["Date", "EMPID", "Present"];

#[derive(Serialize, Deserialize)]
struct AttendanceRow {
    #[serde(rename = "Date", with = "csv_date")]
    date: NaiveDate,
    #[serde(rename = "EMPID")]
    employee_id: String,
    #[serde(rename = "Present", with = "csv_bool")]
    present: bool,
}

impl From<AttendanceRow> for AttendanceRecord {
    fn from(row: AttendanceRow) -> Self {
        AttendanceRecord::new(row.employee_id, row.date, row.present)
    }
}

impl From<&AttendanceRecord> for AttendanceRow {
    fn from(record: &AttendanceRecord) -> Self {
        AttendanceRow {
            date: record.date,
            employee_id: record.employee_id.clone(),
            present: record.present,
        }
    }
}

#[derive(Deserialize)]
struct RegisterRow {
    #[serde(rename = "EMPID")]
    employee_id: String,
    // empty or missing cells read as None
    #[serde(rename = "Name", default)]
    name: Option<String>,
    #[serde(rename = "Department", default)]
    department: Option<String>,
    #[serde(rename = "Position", default)]
    position: Option<String>,
}

impl From<RegisterRow> for RegisterEntry {
    fn from(row: RegisterRow) -> Self {
        RegisterEntry {
            employee_id: row.employee_id,
            name: row.name,
            department: row.department,
            position: row.position,
        }
    }
}

pub struct AttendanceStore {
    attendance_path: PathBuf,
    register_path: PathBuf,
    export_path: PathBuf,
    // serializes read-check-append-write of submissions and exports
    write_lock: Mutex<()>,
}

impl AttendanceStore {
    pub fn new(
        attendance_path: impl Into<PathBuf>,
        register_path: impl Into<PathBuf>,
        export_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            attendance_path: attendance_path.into(),
            register_path: register_path.into(),
            export_path: export_path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            &config.attendance_file,
            &config.register_file,
            &config.export_file,
        )
    }

    pub fn attendance_path(&self) -> &Path {
        &self.attendance_path
    }

    pub fn export_path(&self) -> &Path {
        &self.export_path
    }

    /// Reads the attendance table; a missing file is an empty table.
    pub fn load_attendance(&self) -> AppResult<Vec<AttendanceRecord>> {
        let rows: Vec<AttendanceRow> = read_rows(&self.attendance_path, false)?;
        Ok(rows.into_iter().map(AttendanceRecord::from).collect())
    }

    /// Reads the register; a missing file is an empty register. The file is
    /// maintained by hand, so short rows are accepted.
    pub fn load_register(&self) -> AppResult<Vec<RegisterEntry>> {
        let rows: Vec<RegisterRow> = read_rows(&self.register_path, true)?;
        Ok(rows.into_iter().map(RegisterEntry::from).collect())
    }

    /// Rewrites the whole attendance file.
    pub fn save_attendance(&self, table: &[AttendanceRecord]) -> AppResult<()> {
        let bytes = encode_attendance(table)?;
        write_replacing(&self.attendance_path, &bytes)?;
        debug!(
            path = %self.attendance_path.display(),
            records = table.len(),
            "Attendance table written"
        );
        Ok(())
    }

    pub fn merged_view(&self) -> AppResult<Vec<MergedRow>> {
        let table = self.load_attendance()?;
        let register = self.load_register()?;
        Ok(engine::merge(&table, &register))
    }

    /// Loads the table, applies [`engine::submit`] and persists it when the
    /// record was accepted.
    pub fn submit(
        &self,
        employee_id: &str,
        date: NaiveDate,
        present: bool,
    ) -> AppResult<SubmitOutcome> {
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());

        let table = self.load_attendance()?;
        let (table, outcome) = engine::submit(table, employee_id, date, present);

        if outcome == SubmitOutcome::Accepted {
            self.save_attendance(&table)?;
        }
        Ok(outcome)
    }

    /// Writes the current table verbatim to the export file and returns the
    /// bytes written.
    pub fn export(&self) -> AppResult<Vec<u8>> {
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());

        let table = self.load_attendance()?;
        let bytes = encode_attendance(&table)?;
        write_replacing(&self.export_path, &bytes)?;
        info!(
            path = %self.export_path.display(),
            records = table.len(),
            "Attendance exported"
        );
        Ok(bytes)
    }
}

fn read_rows<T>(path: &Path, flexible: bool) -> AppResult<Vec<T>>
where
    T: for<'de> Deserialize<'de>,
{
    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "File not found, using empty table");
            return Ok(Vec::new());
        }
        Err(e) => return Err(e.into()),
    };

    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .flexible(flexible)
        .from_reader(file);

    let mut rows: Vec<T> = Vec::new();
    for row in rdr.deserialize::<T>() {
        rows.push(row?);
    }
    Ok(rows)
}

fn encode_attendance(table: &[AttendanceRecord]) -> AppResult<Vec<u8>> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    // explicit header so an empty table still carries its columns
    wtr.write_record(ATTENDANCE_HEADERS)?;
    for record in table {
        wtr.serialize(AttendanceRow::from(record))?;
    }

    wtr.into_inner().map_err(|e| e.into_error().into())
}

fn write_replacing(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    // unique sibling per write, renamed over the target
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

mod csv_date {
    use chrono::{NaiveDate, NaiveDateTime};
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    const DATE_FORMAT: &str = "%Y-%m-%d";

    pub fn serialize<S: Serializer>(date: &NaiveDate, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(&date.format(DATE_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(d)?;
        let raw = raw.trim();

        if let Ok(date) = NaiveDate::parse_from_str(raw, DATE_FORMAT) {
            return Ok(date);
        }
        // tables exported with a time component
        ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"]
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
            .map(|dt| dt.date())
            .ok_or_else(|| D::Error::custom(format!("invalid date: {raw:?}")))
    }
}

mod csv_bool {
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(value: &bool, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(if *value { "True" } else { "False" })
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
        let raw = String::deserialize(d)?;
        match raw.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" => Ok(true),
            "false" | "0" | "no" | "" => Ok(false),
            other => Err(D::Error::custom(format!("invalid boolean: {other:?}"))),
        }
    }
}
