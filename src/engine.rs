//! Attendance reconciliation: duplicate detection, register merge, search
//! and the daily present/absent summary.
//!
//! Everything here is pure; reading and writing the backing files is the
//! job of [`crate::store`].

use crate::model::{
    attendance::AttendanceRecord,
    merged::MergedRow,
    register::RegisterEntry,
    summary::{AbsenteeDetail, DailySummary},
};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};
use strum::{AsRefStr, Display};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display, AsRefStr, ToSchema)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RejectReason {
    /// A record with the same employee id and date already exists.
    Duplicate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Accepted,
    Rejected(RejectReason),
}

/// Insert-if-absent on `(employee_id, date)`.
///
/// Keys compare by exact equality. A rejected submission leaves the table
/// untouched regardless of `present`. Persisting an accepted table is up to
/// the caller.
pub fn submit(
    mut table: Vec<AttendanceRecord>,
    employee_id: &str,
    date: NaiveDate,
    present: bool,
) -> (Vec<AttendanceRecord>, SubmitOutcome) {
    if table.iter().any(|r| r.is_key(employee_id, date)) {
        return (table, SubmitOutcome::Rejected(RejectReason::Duplicate));
    }

    table.push(AttendanceRecord::new(employee_id, date, present));
    (table, SubmitOutcome::Accepted)
}

/// Left-outer join of the attendance table with the register on employee id.
///
/// Table order is kept. Register entries without attendance are dropped; a
/// register id listed twice yields one merged row per entry.
pub fn merge(table: &[AttendanceRecord], register: &[RegisterEntry]) -> Vec<MergedRow> {
    let mut by_id: HashMap<&str, Vec<&RegisterEntry>> = HashMap::new();
    for entry in register {
        by_id.entry(entry.employee_id.as_str()).or_default().push(entry);
    }

    let mut merged = Vec::with_capacity(table.len());
    for record in table {
        match by_id.get(record.employee_id.as_str()) {
            Some(entries) => {
                for entry in entries {
                    merged.push(MergedRow {
                        date: record.date,
                        employee_id: record.employee_id.clone(),
                        present: record.present,
                        name: entry.name.clone(),
                        department: entry.department.clone(),
                        position: entry.position.clone(),
                    });
                }
            }
            None => merged.push(MergedRow {
                date: record.date,
                employee_id: record.employee_id.clone(),
                present: record.present,
                name: None,
                department: None,
                position: None,
            }),
        }
    }
    merged
}

/// Exact, case-sensitive match on employee id.
pub fn search(merged: &[MergedRow], employee_id: &str) -> Vec<MergedRow> {
    merged
        .iter()
        .filter(|row| row.employee_id == employee_id)
        .cloned()
        .collect()
}

/// Present/absent partition for `date`.
///
/// The universe is every id that appears anywhere in the table, not the
/// register. An explicit absent mark and a missing mark are both absent.
/// The detail listing spans all dates of the absent ids.
pub fn summarize(table: &[AttendanceRecord], date: NaiveDate) -> DailySummary {
    let on_date = table.iter().filter(|r| r.date == date);

    let present_count = on_date.clone().filter(|r| r.present).count();
    let present_ids: BTreeSet<&str> = on_date
        .filter(|r| r.present)
        .map(|r| r.employee_id.as_str())
        .collect();

    let absent_employees: BTreeSet<String> = table
        .iter()
        .map(|r| r.employee_id.as_str())
        .filter(|id| !present_ids.contains(id))
        .map(str::to_owned)
        .collect();

    let absentee_details = table
        .iter()
        .filter(|r| absent_employees.contains(&r.employee_id))
        .map(|r| AbsenteeDetail {
            employee_id: r.employee_id.clone(),
            present: r.present,
            date: r.date,
        })
        .collect();

    DailySummary {
        date,
        present_count,
        absent_count: absent_employees.len(),
        absent_employees,
        absentee_details,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn sample_table() -> Vec<AttendanceRecord> {
        vec![
            AttendanceRecord::new("E1", day(1), true),
            AttendanceRecord::new("E2", day(1), false),
            AttendanceRecord::new("E1", day(2), false),
        ]
    }

    fn entry(id: &str, name: &str) -> RegisterEntry {
        RegisterEntry {
            employee_id: id.into(),
            name: Some(name.into()),
            department: Some("Physics".into()),
            position: Some("Lecturer".into()),
        }
    }

    #[test]
    fn second_submission_with_same_key_is_rejected() {
        let (table, first) = submit(Vec::new(), "E1", day(1), true);
        assert_eq!(first, SubmitOutcome::Accepted);

        let (table, second) = submit(table, "E1", day(1), false);
        assert_eq!(second, SubmitOutcome::Rejected(RejectReason::Duplicate));
        assert_eq!(table, vec![AttendanceRecord::new("E1", day(1), true)]);
    }

    #[test]
    fn submit_appends_in_order_for_distinct_keys() {
        let (table, _) = submit(Vec::new(), "E1", day(1), true);
        let (table, _) = submit(table, "E1", day(2), true);
        let (table, outcome) = submit(table, "E2", day(1), false);

        assert_eq!(outcome, SubmitOutcome::Accepted);
        assert_eq!(table.len(), 3);
        assert_eq!(table[2], AttendanceRecord::new("E2", day(1), false));
    }

    #[test]
    fn submit_accepts_empty_employee_id() {
        let (table, outcome) = submit(Vec::new(), "", day(1), true);
        assert_eq!(outcome, SubmitOutcome::Accepted);
        assert_eq!(table[0].employee_id, "");
    }

    #[test]
    fn submit_does_not_normalize_keys() {
        let (table, _) = submit(Vec::new(), "E1", day(1), true);
        let (table, outcome) = submit(table, "e1", day(1), true);
        assert_eq!(outcome, SubmitOutcome::Accepted);

        let (_, outcome) = submit(table, " E1", day(1), true);
        assert_eq!(outcome, SubmitOutcome::Accepted);
    }

    #[test]
    fn reject_reason_code_is_snake_case() {
        assert_eq!(RejectReason::Duplicate.as_ref(), "duplicate");
        assert_eq!(RejectReason::Duplicate.to_string(), "duplicate");
    }

    #[test]
    fn search_is_exact_and_case_sensitive() {
        let mut table = sample_table();
        table.push(AttendanceRecord::new("E10", day(1), true));
        table.push(AttendanceRecord::new("e1", day(1), true));
        let merged = merge(&table, &[]);

        let hits = search(&merged, "E1");
        assert_eq!(hits.len(), 2);
        assert!(hits.iter().all(|r| r.employee_id == "E1"));

        assert!(search(&merged, "E7").is_empty());
    }

    #[test]
    fn summary_for_recorded_date() {
        let summary = summarize(&sample_table(), day(1));

        assert_eq!(summary.present_count, 1);
        assert_eq!(summary.absent_count, 1);
        assert_eq!(
            summary.absent_employees,
            BTreeSet::from(["E2".to_string()])
        );
        assert_eq!(
            summary.absentee_details,
            vec![AbsenteeDetail {
                employee_id: "E2".into(),
                present: false,
                date: day(1),
            }]
        );
    }

    #[test]
    fn summary_for_date_without_records() {
        let summary = summarize(&sample_table(), day(3));

        assert_eq!(summary.present_count, 0);
        assert_eq!(
            summary.absent_employees,
            BTreeSet::from(["E1".to_string(), "E2".to_string()])
        );
        // not scoped to the selected date
        assert_eq!(summary.absentee_details.len(), 3);
    }

    #[test]
    fn summary_counts_duplicate_present_rows() {
        let table = vec![
            AttendanceRecord::new("E1", day(1), true),
            AttendanceRecord::new("E1", day(1), true),
        ];
        let summary = summarize(&table, day(1));

        assert_eq!(summary.present_count, 2);
        assert!(summary.absent_employees.is_empty());
    }

    #[test]
    fn summary_of_empty_table() {
        let summary = summarize(&[], day(1));
        assert_eq!(summary.present_count, 0);
        assert_eq!(summary.absent_count, 0);
        assert!(summary.absentee_details.is_empty());
    }

    #[test]
    fn merge_keeps_unmatched_attendance_rows() {
        let table = vec![
            AttendanceRecord::new("E1", day(1), true),
            AttendanceRecord::new("E9", day(1), true),
        ];
        let register = vec![entry("E1", "John Doe"), entry("E5", "Unused")];

        let merged = merge(&table, &register);

        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].name.as_deref(), Some("John Doe"));
        assert_eq!(merged[1].employee_id, "E9");
        assert_eq!(merged[1].name, None);
        assert_eq!(merged[1].department, None);
        assert_eq!(merged[1].position, None);
    }

    #[test]
    fn merge_repeats_row_for_each_register_match() {
        let table = vec![AttendanceRecord::new("E1", day(1), true)];
        let register = vec![entry("E1", "First"), entry("E1", "Second")];

        let merged = merge(&table, &register);

        assert_eq!(merged.len(), 2);
        assert_eq!(merged[1].name.as_deref(), Some("Second"));
    }
}
