use super::{Decode, impl_record};
use crate::decode::{RowView, SourceRow};
use crate::error::FieldError;
use crate::field::Field;

/// A TASKACTV row: an activity code value assigned to a task.
#[derive(Debug, Clone)]
pub struct TaskActivityCodeAssignment {
    pub task_id: Field<i64>,
    pub actv_code_type_id: Field<i64>,
    pub actv_code_id: Field<i64>,
    pub proj_id: Field<i64>,
    source: SourceRow,
}

impl_record!(
    TaskActivityCodeAssignment,
    table = "TASKACTV",
    foreign_keys = [task_id, actv_code_id, proj_id, actv_code_type_id]
);

impl Decode for TaskActivityCodeAssignment {
    fn decode(row: &RowView<'_>) -> Result<Self, FieldError> {
        Ok(Self {
            task_id: row.id("task_id")?,
            actv_code_type_id: row.id("actv_code_type_id")?,
            actv_code_id: row.id("actv_code_id")?,
            proj_id: row.id("proj_id")?,
            source: row.source_row(),
        })
    }
}
