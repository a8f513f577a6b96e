//! Navigation between records by their keys.
//!
//! Every accessor borrows from the [`Document`] and goes through a table
//! index. An unset key resolves to `None` (or an empty list) without a
//! lookup; a key whose target is missing resolves the same way.

use crate::document::Document;
use crate::field::Field;
use crate::records::{
    Calendar, GenericRecord, Project, Record, Resource, ResourceCategory, ResourceCurve, Task,
    TaskActivityCodeAssignment, TaskPredecessor, TaskResourceAssignment, Wbs,
};
use crate::table::Table;
use chrono::NaiveDateTime;
use serde::Serialize;

fn referenced<'d, R: Record>(table: &'d Table<R>, key: &Field<i64>) -> Option<&'d R> {
    table.find_by_id(key.get()?)
}

fn referencing<'d, R: Record>(table: &'d Table<R>, field: &str, key: &Field<i64>) -> Vec<&'d R> {
    match key.get() {
        Some(id) => table.find_all_by_foreign_key(field, id),
        None => Vec::new(),
    }
}

/// A scheduling constraint set on a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Constraint {
    /// The exported constraint type, e.g. `CS_MSO`.
    pub kind: String,
    pub date: NaiveDateTime,
}

impl Task {
    pub fn project<'d>(&self, doc: &'d Document) -> Option<&'d Project> {
        referenced(doc.projects(), &self.proj_id)
    }

    pub fn wbs<'d>(&self, doc: &'d Document) -> Option<&'d Wbs> {
        referenced(doc.wbs(), &self.wbs_id)
    }

    pub fn calendar<'d>(&self, doc: &'d Document) -> Option<&'d Calendar> {
        referenced(doc.calendars(), &self.clndr_id)
    }

    pub fn primary_resource<'d>(&self, doc: &'d Document) -> Option<&'d Resource> {
        referenced(doc.resources(), &self.rsrc_id)
    }

    pub fn assignments<'d>(&self, doc: &'d Document) -> Vec<&'d TaskResourceAssignment> {
        referencing(doc.task_resources(), "task_id", &self.task_id)
    }

    pub fn activity_codes<'d>(&self, doc: &'d Document) -> Vec<&'d TaskActivityCodeAssignment> {
        referencing(doc.task_activity_codes(), "task_id", &self.task_id)
    }

    /// Links in which this task is the successor.
    pub fn predecessors<'d>(&self, doc: &'d Document) -> Vec<&'d TaskPredecessor> {
        referencing(doc.task_predecessors(), "task_id", &self.task_id)
    }

    /// Links in which this task is the predecessor.
    pub fn successors<'d>(&self, doc: &'d Document) -> Vec<&'d TaskPredecessor> {
        referencing(doc.task_predecessors(), "pred_task_id", &self.task_id)
    }

    /// Step rows from `TASKPROC`, empty when the export has no such table.
    pub fn steps<'d>(&self, doc: &'d Document) -> Vec<&'d GenericRecord> {
        doc.generic("TASKPROC")
            .map(|steps| referencing(steps, "task_id", &self.task_id))
            .unwrap_or_default()
    }

    /// Working hours per day of the task's calendar, or the configured
    /// default when the task has no resolvable calendar.
    pub fn hours_per_day(&self, doc: &Document) -> f64 {
        self.calendar(doc)
            .map(|calendar| calendar.work_calendar.hours_per_day())
            .unwrap_or_else(|| doc.options().fallback_day_hours())
    }

    fn in_days(&self, doc: &Document, hours: &Field<f64>) -> Option<f64> {
        hours.get().map(|hours| hours / self.hours_per_day(doc))
    }

    /// Original duration in working days.
    pub fn duration_in_days(&self, doc: &Document) -> Option<f64> {
        self.in_days(doc, &self.target_drtn_hr_cnt)
    }

    pub fn remaining_duration_in_days(&self, doc: &Document) -> Option<f64> {
        self.in_days(doc, &self.remain_drtn_hr_cnt)
    }

    pub fn total_float_days(&self, doc: &Document) -> Option<f64> {
        self.in_days(doc, &self.total_float_hr_cnt)
    }

    pub fn free_float_days(&self, doc: &Document) -> Option<f64> {
        self.in_days(doc, &self.free_float_hr_cnt)
    }

    /// Actual start if the task has started, planned start otherwise.
    pub fn start_date(&self) -> Option<NaiveDateTime> {
        self.act_start_date.get().or(self.target_start_date.get())
    }

    pub fn end_date(&self) -> Option<NaiveDateTime> {
        self.act_end_date.get().or(self.target_end_date.get())
    }

    pub fn constraint(&self) -> Option<Constraint> {
        constraint(&self.cstr_type, &self.cstr_date)
    }

    pub fn secondary_constraint(&self) -> Option<Constraint> {
        constraint(&self.cstr_type2, &self.cstr_date2)
    }
}

fn constraint(kind: &Field<String>, date: &Field<NaiveDateTime>) -> Option<Constraint> {
    Some(Constraint {
        kind: kind.value()?.clone(),
        date: date.get()?,
    })
}

impl Project {
    pub fn calendar<'d>(&self, doc: &'d Document) -> Option<&'d Calendar> {
        referenced(doc.calendars(), &self.clndr_id)
    }

    pub fn tasks<'d>(&self, doc: &'d Document) -> Vec<&'d Task> {
        referencing(doc.tasks(), "proj_id", &self.proj_id)
    }

    pub fn wbs_nodes<'d>(&self, doc: &'d Document) -> Vec<&'d Wbs> {
        referencing(doc.wbs(), "proj_id", &self.proj_id)
    }

    /// Project-specific calendars.
    pub fn calendars<'d>(&self, doc: &'d Document) -> Vec<&'d Calendar> {
        referencing(doc.calendars(), "proj_id", &self.proj_id)
    }
}

impl Calendar {
    pub fn base_calendar<'d>(&self, doc: &'d Document) -> Option<&'d Calendar> {
        referenced(doc.calendars(), &self.base_clndr_id)
    }

    pub fn project<'d>(&self, doc: &'d Document) -> Option<&'d Project> {
        referenced(doc.projects(), &self.proj_id)
    }
}

impl Wbs {
    pub fn project<'d>(&self, doc: &'d Document) -> Option<&'d Project> {
        referenced(doc.projects(), &self.proj_id)
    }

    pub fn parent<'d>(&self, doc: &'d Document) -> Option<&'d Wbs> {
        referenced(doc.wbs(), &self.parent_wbs_id)
    }

    pub fn children<'d>(&self, doc: &'d Document) -> Vec<&'d Wbs> {
        referencing(doc.wbs(), "parent_wbs_id", &self.wbs_id)
    }

    pub fn tasks<'d>(&self, doc: &'d Document) -> Vec<&'d Task> {
        referencing(doc.tasks(), "wbs_id", &self.wbs_id)
    }
}

impl Resource {
    pub fn calendar<'d>(&self, doc: &'d Document) -> Option<&'d Calendar> {
        referenced(doc.calendars(), &self.clndr_id)
    }

    pub fn parent<'d>(&self, doc: &'d Document) -> Option<&'d Resource> {
        referenced(doc.resources(), &self.parent_rsrc_id)
    }

    pub fn assignments<'d>(&self, doc: &'d Document) -> Vec<&'d TaskResourceAssignment> {
        referencing(doc.task_resources(), "rsrc_id", &self.rsrc_id)
    }

    pub fn categories<'d>(&self, doc: &'d Document) -> Vec<&'d ResourceCategory> {
        referencing(doc.resource_categories(), "rsrc_id", &self.rsrc_id)
    }
}

impl TaskPredecessor {
    /// The successor side of the link.
    pub fn task<'d>(&self, doc: &'d Document) -> Option<&'d Task> {
        referenced(doc.tasks(), &self.task_id)
    }

    pub fn predecessor<'d>(&self, doc: &'d Document) -> Option<&'d Task> {
        referenced(doc.tasks(), &self.pred_task_id)
    }
}

impl TaskResourceAssignment {
    pub fn task<'d>(&self, doc: &'d Document) -> Option<&'d Task> {
        referenced(doc.tasks(), &self.task_id)
    }

    pub fn project<'d>(&self, doc: &'d Document) -> Option<&'d Project> {
        referenced(doc.projects(), &self.proj_id)
    }

    pub fn resource<'d>(&self, doc: &'d Document) -> Option<&'d Resource> {
        referenced(doc.resources(), &self.rsrc_id)
    }

    pub fn resource_curve<'d>(&self, doc: &'d Document) -> Option<&'d ResourceCurve> {
        referenced(doc.resource_curves(), &self.curv_id)
    }
}

impl TaskActivityCodeAssignment {
    pub fn task<'d>(&self, doc: &'d Document) -> Option<&'d Task> {
        referenced(doc.tasks(), &self.task_id)
    }

    pub fn project<'d>(&self, doc: &'d Document) -> Option<&'d Project> {
        referenced(doc.projects(), &self.proj_id)
    }
}

impl ResourceCategory {
    pub fn resource<'d>(&self, doc: &'d Document) -> Option<&'d Resource> {
        referenced(doc.resources(), &self.rsrc_id)
    }
}
