use super::{Decode, impl_record};
use crate::decode::{RowView, SourceRow};
use crate::error::FieldError;
use crate::field::Field;
use chrono::NaiveDateTime;

/// A RSRC row.
#[derive(Debug, Clone)]
pub struct Resource {
    pub rsrc_id: Field<i64>,
    pub parent_rsrc_id: Field<i64>,
    pub clndr_id: Field<i64>,
    pub role_id: Field<i64>,
    pub shift_id: Field<i64>,
    pub user_id: Field<i64>,
    pub pobs_id: Field<i64>,
    pub curr_id: Field<i64>,
    pub unit_id: Field<i64>,
    pub location_id: Field<i64>,
    pub rsrc_seq_num: Field<i64>,
    pub rsrc_name: Field<String>,
    pub rsrc_short_name: Field<String>,
    pub rsrc_title_name: Field<String>,
    pub rsrc_type: Field<String>,
    pub email_addr: Field<String>,
    pub employee_code: Field<String>,
    pub office_phone: Field<String>,
    pub other_phone: Field<String>,
    pub def_qty_per_hr: Field<f64>,
    pub cost_qty_type: Field<String>,
    pub ot_factor: Field<f64>,
    pub active_flag: Field<String>,
    pub auto_compute_act_flag: Field<String>,
    pub def_cost_qty_link_flag: Field<String>,
    pub ot_flag: Field<String>,
    pub guid: Field<String>,
    pub rsrc_notes: Field<String>,
    source: SourceRow,
}

impl_record!(
    Resource,
    table = "RSRC",
    primary_key = rsrc_id,
    foreign_keys = [
        parent_rsrc_id,
        clndr_id,
        role_id,
        shift_id,
        user_id,
        pobs_id,
        curr_id,
        unit_id,
        location_id
    ]
);

impl Resource {
    pub fn is_active(&self) -> bool {
        self.active_flag.as_deref() == Some("Y")
    }
}

impl Decode for Resource {
    fn decode(row: &RowView<'_>) -> Result<Self, FieldError> {
        Ok(Self {
            rsrc_id: row.id("rsrc_id")?,
            parent_rsrc_id: row.id("parent_rsrc_id")?,
            clndr_id: row.id("clndr_id")?,
            role_id: row.id("role_id")?,
            shift_id: row.id("shift_id")?,
            user_id: row.id("user_id")?,
            pobs_id: row.id("pobs_id")?,
            curr_id: row.id("curr_id")?,
            unit_id: row.id("unit_id")?,
            location_id: row.id("location_id")?,
            rsrc_seq_num: row.int("rsrc_seq_num")?,
            rsrc_name: row.text("rsrc_name"),
            rsrc_short_name: row.text("rsrc_short_name"),
            rsrc_title_name: row.text("rsrc_title_name"),
            rsrc_type: row.text("rsrc_type"),
            email_addr: row.text("email_addr"),
            employee_code: row.text("employee_code"),
            office_phone: row.text("office_phone"),
            other_phone: row.text("other_phone"),
            def_qty_per_hr: row.float("def_qty_per_hr")?,
            cost_qty_type: row.text("cost_qty_type"),
            ot_factor: row.float("ot_factor")?,
            active_flag: row.flag("active_flag"),
            auto_compute_act_flag: row.flag("auto_compute_act_flag"),
            def_cost_qty_link_flag: row.flag("def_cost_qty_link_flag"),
            ot_flag: row.flag("ot_flag"),
            guid: row.text("guid"),
            rsrc_notes: row.text("rsrc_notes"),
            source: row.source_row(),
        })
    }
}

/// Number of `pct_usage_N` columns on a resource curve.
pub const CURVE_POINTS: usize = 21;

/// A RSRCCURVDATA row: the distribution of units over an assignment.
#[derive(Debug, Clone)]
pub struct ResourceCurve {
    pub curv_id: Field<i64>,
    pub curv_name: Field<String>,
    pub default_flag: Field<String>,
    /// `pct_usage_0` to `pct_usage_20`.
    pub pct_usage: [Field<f64>; CURVE_POINTS],
    source: SourceRow,
}

impl_record!(
    ResourceCurve,
    table = "RSRCCURVDATA",
    primary_key = curv_id,
    foreign_keys = []
);

impl Decode for ResourceCurve {
    fn decode(row: &RowView<'_>) -> Result<Self, FieldError> {
        let mut pct_usage: [Field<f64>; CURVE_POINTS] = Default::default();
        for (point, usage) in pct_usage.iter_mut().enumerate() {
            *usage = row.float(&format!("pct_usage_{point}"))?;
        }
        Ok(Self {
            curv_id: row.id("curv_id")?,
            curv_name: row.text("curv_name"),
            default_flag: row.flag("default_flag"),
            pct_usage,
            source: row.source_row(),
        })
    }
}

/// A RSRCRCAT row: a category value assigned to a resource.
#[derive(Debug, Clone)]
pub struct ResourceCategory {
    pub rsrc_id: Field<i64>,
    pub rsrc_catg_type_id: Field<i64>,
    pub rsrc_catg_id: Field<i64>,
    source: SourceRow,
}

impl_record!(
    ResourceCategory,
    table = "RSRCRCAT",
    foreign_keys = [rsrc_id, rsrc_catg_type_id, rsrc_catg_id]
);

impl Decode for ResourceCategory {
    fn decode(row: &RowView<'_>) -> Result<Self, FieldError> {
        Ok(Self {
            rsrc_id: row.id("rsrc_id")?,
            rsrc_catg_type_id: row.id("rsrc_catg_type_id")?,
            rsrc_catg_id: row.id("rsrc_catg_id")?,
            source: row.source_row(),
        })
    }
}

/// A TASKRSRC row: a resource assigned to a task.
#[derive(Debug, Clone)]
pub struct TaskResourceAssignment {
    pub taskrsrc_id: Field<i64>,
    pub task_id: Field<i64>,
    pub proj_id: Field<i64>,
    pub rsrc_id: Field<i64>,
    pub role_id: Field<i64>,
    pub acct_id: Field<i64>,
    pub curv_id: Field<i64>,
    pub pobs_id: Field<i64>,
    pub rsrc_type: Field<String>,
    pub cost_qty_link_flag: Field<String>,
    pub rollup_dates_flag: Field<String>,
    pub rate_type: Field<String>,
    pub skill_level: Field<i64>,
    pub remain_qty: Field<f64>,
    pub target_qty: Field<f64>,
    pub remain_qty_per_hr: Field<f64>,
    pub target_qty_per_hr: Field<f64>,
    pub target_lag_drtn_hr_cnt: Field<f64>,
    pub act_reg_qty: Field<f64>,
    pub act_ot_qty: Field<f64>,
    pub ot_factor: Field<f64>,
    pub cost_per_qty: Field<f64>,
    pub target_cost: Field<f64>,
    pub act_reg_cost: Field<f64>,
    pub act_ot_cost: Field<f64>,
    pub remain_cost: Field<f64>,
    pub act_start_date: Field<NaiveDateTime>,
    pub act_end_date: Field<NaiveDateTime>,
    pub restart_date: Field<NaiveDateTime>,
    pub reend_date: Field<NaiveDateTime>,
    pub target_start_date: Field<NaiveDateTime>,
    pub target_end_date: Field<NaiveDateTime>,
    pub rem_late_start_date: Field<NaiveDateTime>,
    pub rem_late_end_date: Field<NaiveDateTime>,
    pub guid: Field<String>,
    source: SourceRow,
}

impl_record!(
    TaskResourceAssignment,
    table = "TASKRSRC",
    primary_key = taskrsrc_id,
    foreign_keys = [task_id, proj_id, rsrc_id, role_id, acct_id, curv_id, pobs_id]
);

impl TaskResourceAssignment {
    /// Actual units, regular plus overtime.
    pub fn actual_qty(&self) -> Option<f64> {
        match (self.act_reg_qty.get(), self.act_ot_qty.get()) {
            (None, None) => None,
            (regular, overtime) => Some(regular.unwrap_or(0.0) + overtime.unwrap_or(0.0)),
        }
    }
}

impl Decode for TaskResourceAssignment {
    fn decode(row: &RowView<'_>) -> Result<Self, FieldError> {
        Ok(Self {
            taskrsrc_id: row.id("taskrsrc_id")?,
            task_id: row.id("task_id")?,
            proj_id: row.id("proj_id")?,
            rsrc_id: row.id("rsrc_id")?,
            role_id: row.id("role_id")?,
            acct_id: row.id("acct_id")?,
            curv_id: row.id("curv_id")?,
            pobs_id: row.id("pobs_id")?,
            rsrc_type: row.text("rsrc_type"),
            cost_qty_link_flag: row.flag("cost_qty_link_flag"),
            rollup_dates_flag: row.flag("rollup_dates_flag"),
            rate_type: row.text("rate_type"),
            skill_level: row.int("skill_level")?,
            remain_qty: row.float("remain_qty")?,
            target_qty: row.float("target_qty")?,
            remain_qty_per_hr: row.float("remain_qty_per_hr")?,
            target_qty_per_hr: row.float("target_qty_per_hr")?,
            target_lag_drtn_hr_cnt: row.float("target_lag_drtn_hr_cnt")?,
            act_reg_qty: row.float("act_reg_qty")?,
            act_ot_qty: row.float("act_ot_qty")?,
            ot_factor: row.float("ot_factor")?,
            cost_per_qty: row.float("cost_per_qty")?,
            target_cost: row.float("target_cost")?,
            act_reg_cost: row.float("act_reg_cost")?,
            act_ot_cost: row.float("act_ot_cost")?,
            remain_cost: row.float("remain_cost")?,
            act_start_date: row.date("act_start_date")?,
            act_end_date: row.date("act_end_date")?,
            restart_date: row.date("restart_date")?,
            reend_date: row.date("reend_date")?,
            target_start_date: row.date("target_start_date")?,
            target_end_date: row.date("target_end_date")?,
            rem_late_start_date: row.date("rem_late_start_date")?,
            rem_late_end_date: row.date("rem_late_end_date")?,
            guid: row.text("guid"),
            source: row.source_row(),
        })
    }
}
