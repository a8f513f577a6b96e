use super::{Decode, impl_record};
use crate::decode::{RowView, SourceRow};
use crate::error::FieldError;
use crate::field::Field;
use chrono::NaiveDateTime;

/// A TASK row: one activity of a project.
#[derive(Debug, Clone)]
pub struct Task {
    pub task_id: Field<i64>,
    pub proj_id: Field<i64>,
    pub wbs_id: Field<i64>,
    pub clndr_id: Field<i64>,
    pub rsrc_id: Field<i64>,
    pub location_id: Field<i64>,
    pub task_code: Field<String>,
    pub task_name: Field<String>,
    pub task_type: Field<String>,
    pub duration_type: Field<String>,
    pub status_code: Field<String>,
    pub complete_pct_type: Field<String>,
    pub priority_type: Field<String>,
    pub phys_complete_pct: Field<f64>,
    pub rev_fdbk_flag: Field<String>,
    pub lock_plan_flag: Field<String>,
    pub auto_compute_act_flag: Field<String>,
    pub driving_path_flag: Field<String>,
    pub est_wt: Field<f64>,
    pub target_drtn_hr_cnt: Field<f64>,
    pub remain_drtn_hr_cnt: Field<f64>,
    pub total_float_hr_cnt: Field<f64>,
    pub free_float_hr_cnt: Field<f64>,
    pub act_work_qty: Field<f64>,
    pub remain_work_qty: Field<f64>,
    pub target_work_qty: Field<f64>,
    pub act_equip_qty: Field<f64>,
    pub remain_equip_qty: Field<f64>,
    pub target_equip_qty: Field<f64>,
    pub act_this_per_work_qty: Field<f64>,
    pub act_this_per_equip_qty: Field<f64>,
    pub cstr_type: Field<String>,
    pub cstr_date: Field<NaiveDateTime>,
    pub cstr_type2: Field<String>,
    pub cstr_date2: Field<NaiveDateTime>,
    pub act_start_date: Field<NaiveDateTime>,
    pub act_end_date: Field<NaiveDateTime>,
    pub target_start_date: Field<NaiveDateTime>,
    pub target_end_date: Field<NaiveDateTime>,
    pub early_start_date: Field<NaiveDateTime>,
    pub early_end_date: Field<NaiveDateTime>,
    pub late_start_date: Field<NaiveDateTime>,
    pub late_end_date: Field<NaiveDateTime>,
    pub expect_end_date: Field<NaiveDateTime>,
    pub restart_date: Field<NaiveDateTime>,
    pub reend_date: Field<NaiveDateTime>,
    pub rem_late_start_date: Field<NaiveDateTime>,
    pub rem_late_end_date: Field<NaiveDateTime>,
    pub suspend_date: Field<NaiveDateTime>,
    pub resume_date: Field<NaiveDateTime>,
    pub external_early_start_date: Field<NaiveDateTime>,
    pub external_late_end_date: Field<NaiveDateTime>,
    pub float_path: Field<i64>,
    pub float_path_order: Field<i64>,
    pub guid: Field<String>,
    pub tmpl_guid: Field<String>,
    pub create_user: Field<String>,
    pub create_date: Field<NaiveDateTime>,
    pub update_user: Field<String>,
    pub update_date: Field<NaiveDateTime>,
    source: SourceRow,
}

impl_record!(
    Task,
    table = "TASK",
    primary_key = task_id,
    foreign_keys = [proj_id, wbs_id, clndr_id, rsrc_id, location_id]
);

impl Task {
    pub fn is_milestone(&self) -> bool {
        matches!(
            self.task_type.as_deref(),
            Some("TT_Mile") | Some("TT_FinMile")
        )
    }

    pub fn is_complete(&self) -> bool {
        self.status_code.as_deref() == Some("TK_Complete")
    }

    pub fn is_started(&self) -> bool {
        self.act_start_date.is_set()
    }
}

impl Decode for Task {
    fn decode(row: &RowView<'_>) -> Result<Self, FieldError> {
        Ok(Self {
            task_id: row.id("task_id")?,
            proj_id: row.id("proj_id")?,
            wbs_id: row.id("wbs_id")?,
            clndr_id: row.id("clndr_id")?,
            rsrc_id: row.id("rsrc_id")?,
            location_id: row.id("location_id")?,
            task_code: row.text("task_code"),
            task_name: row.text("task_name"),
            task_type: row.text("task_type"),
            duration_type: row.text("duration_type"),
            status_code: row.text("status_code"),
            complete_pct_type: row.text("complete_pct_type"),
            priority_type: row.text("priority_type"),
            phys_complete_pct: row.float("phys_complete_pct")?,
            rev_fdbk_flag: row.flag("rev_fdbk_flag"),
            lock_plan_flag: row.flag("lock_plan_flag"),
            auto_compute_act_flag: row.flag("auto_compute_act_flag"),
            driving_path_flag: row.flag("driving_path_flag"),
            est_wt: row.float("est_wt")?,
            target_drtn_hr_cnt: row.float("target_drtn_hr_cnt")?,
            remain_drtn_hr_cnt: row.float("remain_drtn_hr_cnt")?,
            total_float_hr_cnt: row.float("total_float_hr_cnt")?,
            free_float_hr_cnt: row.float("free_float_hr_cnt")?,
            act_work_qty: row.float("act_work_qty")?,
            remain_work_qty: row.float("remain_work_qty")?,
            target_work_qty: row.float("target_work_qty")?,
            act_equip_qty: row.float("act_equip_qty")?,
            remain_equip_qty: row.float("remain_equip_qty")?,
            target_equip_qty: row.float("target_equip_qty")?,
            act_this_per_work_qty: row.float("act_this_per_work_qty")?,
            act_this_per_equip_qty: row.float("act_this_per_equip_qty")?,
            cstr_type: row.text("cstr_type"),
            cstr_date: row.date("cstr_date")?,
            cstr_type2: row.text("cstr_type2"),
            cstr_date2: row.date("cstr_date2")?,
            act_start_date: row.date("act_start_date")?,
            act_end_date: row.date("act_end_date")?,
            target_start_date: row.date("target_start_date")?,
            target_end_date: row.date("target_end_date")?,
            early_start_date: row.date("early_start_date")?,
            early_end_date: row.date("early_end_date")?,
            late_start_date: row.date("late_start_date")?,
            late_end_date: row.date("late_end_date")?,
            expect_end_date: row.date("expect_end_date")?,
            restart_date: row.date("restart_date")?,
            reend_date: row.date("reend_date")?,
            rem_late_start_date: row.date("rem_late_start_date")?,
            rem_late_end_date: row.date("rem_late_end_date")?,
            suspend_date: row.date("suspend_date")?,
            resume_date: row.date("resume_date")?,
            external_early_start_date: row.date("external_early_start_date")?,
            external_late_end_date: row.date("external_late_end_date")?,
            float_path: row.int("float_path")?,
            float_path_order: row.int("float_path_order")?,
            guid: row.text("guid"),
            tmpl_guid: row.text("tmpl_guid"),
            create_user: row.text("create_user"),
            create_date: row.date("create_date")?,
            update_user: row.text("update_user"),
            update_date: row.date("update_date")?,
            source: row.source_row(),
        })
    }
}

/// A TASKPRED row: a logic link from `pred_task_id` to `task_id`.
#[derive(Debug, Clone)]
pub struct TaskPredecessor {
    pub task_pred_id: Field<i64>,
    pub task_id: Field<i64>,
    pub pred_task_id: Field<i64>,
    pub proj_id: Field<i64>,
    pub pred_proj_id: Field<i64>,
    /// `PR_FS`, `PR_SS`, `PR_FF` or `PR_SF`.
    pub pred_type: Field<String>,
    pub lag_hr_cnt: Field<f64>,
    pub float_path: Field<i64>,
    pub aref: Field<NaiveDateTime>,
    pub arls: Field<NaiveDateTime>,
    pub comments: Field<String>,
    source: SourceRow,
}

impl_record!(
    TaskPredecessor,
    table = "TASKPRED",
    primary_key = task_pred_id,
    foreign_keys = [task_id, pred_task_id, proj_id, pred_proj_id]
);

impl Decode for TaskPredecessor {
    fn decode(row: &RowView<'_>) -> Result<Self, FieldError> {
        Ok(Self {
            task_pred_id: row.id("task_pred_id")?,
            task_id: row.id("task_id")?,
            pred_task_id: row.id("pred_task_id")?,
            proj_id: row.id("proj_id")?,
            pred_proj_id: row.id("pred_proj_id")?,
            pred_type: row.text("pred_type"),
            lag_hr_cnt: row.float("lag_hr_cnt")?,
            float_path: row.int("float_path")?,
            aref: row.date("aref")?,
            arls: row.date("arls")?,
            comments: row.text("comments"),
            source: row.source_row(),
        })
    }
}
