//! Read-only queries over a finished [`Document`], run across records with
//! rayon.

use crate::document::Document;
use rayon::prelude::*;
use serde::Serialize;

/// A task's original duration converted with its calendar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskDuration {
    pub task_id: Option<i64>,
    pub task_code: Option<String>,
    pub hours: Option<f64>,
    pub hours_per_day: f64,
    pub days: Option<f64>,
}

/// Durations of every task, in table order.
pub fn task_durations(doc: &Document) -> Vec<TaskDuration> {
    doc.tasks()
        .records()
        .par_iter()
        .map(|task| {
            let hours_per_day = task.hours_per_day(doc);
            let hours = task.target_drtn_hr_cnt.get();
            TaskDuration {
                task_id: task.task_id.get(),
                task_code: task.task_code.value().cloned(),
                hours,
                hours_per_day,
                days: hours.map(|hours| hours / hours_per_day),
            }
        })
        .collect()
}

/// A foreign key whose target row is not in the export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnresolvedReference {
    pub table: &'static str,
    pub record_id: Option<i64>,
    pub field: &'static str,
    pub target_table: &'static str,
    pub key: i64,
}

/// Foreign-key relationships between the typed tables, as
/// (table, field, referenced table).
pub const RELATIONSHIPS: &[(&str, &str, &str)] = &[
    ("PROJECT", "clndr_id", "CALENDAR"),
    ("CALENDAR", "proj_id", "PROJECT"),
    ("CALENDAR", "base_clndr_id", "CALENDAR"),
    ("PROJWBS", "proj_id", "PROJECT"),
    ("PROJWBS", "parent_wbs_id", "PROJWBS"),
    ("RSRC", "clndr_id", "CALENDAR"),
    ("RSRC", "parent_rsrc_id", "RSRC"),
    ("TASK", "proj_id", "PROJECT"),
    ("TASK", "wbs_id", "PROJWBS"),
    ("TASK", "clndr_id", "CALENDAR"),
    ("TASK", "rsrc_id", "RSRC"),
    ("TASKPRED", "task_id", "TASK"),
    ("TASKPRED", "pred_task_id", "TASK"),
    ("TASKRSRC", "task_id", "TASK"),
    ("TASKRSRC", "proj_id", "PROJECT"),
    ("TASKRSRC", "rsrc_id", "RSRC"),
    ("TASKRSRC", "curv_id", "RSRCCURVDATA"),
    ("TASKACTV", "task_id", "TASK"),
    ("TASKACTV", "proj_id", "PROJECT"),
    ("RSRCRCAT", "rsrc_id", "RSRC"),
];

/// Set foreign keys that resolve to nothing. Relationships whose referenced
/// table is not part of the export are not checked.
pub fn unresolved_references(doc: &Document) -> Vec<UnresolvedReference> {
    let per_relationship: Vec<Vec<UnresolvedReference>> = RELATIONSHIPS
        .par_iter()
        .map(|&(table, field, target_table)| {
            let (Some(source), Some(target)) = (doc.table(table), doc.table(target_table)) else {
                return Vec::new();
            };
            source
                .iter_records()
                .filter_map(|record| {
                    let key = record.foreign_key(field)?;
                    target.record_by_id(key).is_none().then(|| UnresolvedReference {
                        table,
                        record_id: record.primary_key(),
                        field,
                        target_table,
                        key,
                    })
                })
                .collect()
        })
        .collect();

    let unresolved: Vec<UnresolvedReference> = per_relationship.into_iter().flatten().collect();
    if !unresolved.is_empty() {
        tracing::debug!(count = unresolved.len(), "unresolved references");
    }
    unresolved
}
