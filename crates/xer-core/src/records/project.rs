use super::{Decode, impl_record};
use crate::decode::{RowView, SourceRow};
use crate::error::FieldError;
use crate::field::Field;
use chrono::NaiveDateTime;

/// A PROJECT row.
///
/// Columns not modelled here stay readable through
/// [`Record::source`](super::Record::source).
#[derive(Debug, Clone)]
pub struct Project {
    pub proj_id: Field<i64>,
    pub proj_short_name: Field<String>,
    pub clndr_id: Field<i64>,
    pub acct_id: Field<i64>,
    pub orig_proj_id: Field<i64>,
    pub source_proj_id: Field<i64>,
    pub base_type_id: Field<i64>,
    pub sum_base_proj_id: Field<i64>,
    pub location_id: Field<i64>,
    pub fy_start_month_num: Field<i64>,
    pub priority_num: Field<i64>,
    pub strgy_priority_num: Field<i64>,
    pub wbs_max_sum_level: Field<i64>,
    pub task_code_base: Field<i64>,
    pub task_code_step: Field<i64>,
    pub task_code_prefix: Field<String>,
    pub task_code_prefix_flag: Field<String>,
    pub name_sep_char: Field<String>,
    pub project_flag: Field<String>,
    pub checkout_flag: Field<String>,
    pub export_flag: Field<String>,
    pub allow_complete_flag: Field<String>,
    pub rsrc_self_add_flag: Field<String>,
    pub rsrc_multi_assign_flag: Field<String>,
    pub step_complete_flag: Field<String>,
    pub def_complete_pct_type: Field<String>,
    pub def_duration_type: Field<String>,
    pub def_task_type: Field<String>,
    pub def_qty_type: Field<String>,
    pub def_rate_type: Field<String>,
    pub def_cost_per_qty: Field<f64>,
    pub critical_path_type: Field<String>,
    pub critical_drtn_hr_cnt: Field<f64>,
    pub guid: Field<String>,
    pub add_by_name: Field<String>,
    pub add_date: Field<NaiveDateTime>,
    pub plan_start_date: Field<NaiveDateTime>,
    pub plan_end_date: Field<NaiveDateTime>,
    pub scd_end_date: Field<NaiveDateTime>,
    pub fcst_start_date: Field<NaiveDateTime>,
    pub next_data_date: Field<NaiveDateTime>,
    pub last_recalc_date: Field<NaiveDateTime>,
    pub last_tasksum_date: Field<NaiveDateTime>,
    pub last_baseline_update_date: Field<NaiveDateTime>,
    pub apply_actuals_date: Field<NaiveDateTime>,
    source: SourceRow,
}

impl_record!(
    Project,
    table = "PROJECT",
    primary_key = proj_id,
    foreign_keys = [
        clndr_id,
        acct_id,
        orig_proj_id,
        source_proj_id,
        base_type_id,
        sum_base_proj_id,
        location_id
    ]
);

impl Project {
    /// The data date of the last schedule, falling back to the planned start.
    pub fn data_date(&self) -> Option<NaiveDateTime> {
        self.last_recalc_date.get().or(self.plan_start_date.get())
    }
}

impl Decode for Project {
    fn decode(row: &RowView<'_>) -> Result<Self, FieldError> {
        Ok(Self {
            proj_id: row.id("proj_id")?,
            proj_short_name: row.text("proj_short_name"),
            clndr_id: row.id("clndr_id")?,
            acct_id: row.id("acct_id")?,
            orig_proj_id: row.id("orig_proj_id")?,
            source_proj_id: row.id("source_proj_id")?,
            base_type_id: row.id("base_type_id")?,
            sum_base_proj_id: row.id("sum_base_proj_id")?,
            location_id: row.id("location_id")?,
            fy_start_month_num: row.int("fy_start_month_num")?,
            priority_num: row.int("priority_num")?,
            strgy_priority_num: row.int("strgy_priority_num")?,
            wbs_max_sum_level: row.int("wbs_max_sum_level")?,
            task_code_base: row.int("task_code_base")?,
            task_code_step: row.int("task_code_step")?,
            task_code_prefix: row.text("task_code_prefix"),
            task_code_prefix_flag: row.flag("task_code_prefix_flag"),
            name_sep_char: row.text("name_sep_char"),
            project_flag: row.flag("project_flag"),
            checkout_flag: row.flag("checkout_flag"),
            export_flag: row.flag("export_flag"),
            allow_complete_flag: row.flag("allow_complete_flag"),
            rsrc_self_add_flag: row.flag("rsrc_self_add_flag"),
            rsrc_multi_assign_flag: row.flag("rsrc_multi_assign_flag"),
            step_complete_flag: row.flag("step_complete_flag"),
            def_complete_pct_type: row.text("def_complete_pct_type"),
            def_duration_type: row.text("def_duration_type"),
            def_task_type: row.text("def_task_type"),
            def_qty_type: row.text("def_qty_type"),
            def_rate_type: row.text("def_rate_type"),
            def_cost_per_qty: row.float("def_cost_per_qty")?,
            critical_path_type: row.text("critical_path_type"),
            critical_drtn_hr_cnt: row.float("critical_drtn_hr_cnt")?,
            guid: row.text("guid"),
            add_by_name: row.text("add_by_name"),
            add_date: row.date("add_date")?,
            plan_start_date: row.date("plan_start_date")?,
            plan_end_date: row.date("plan_end_date")?,
            scd_end_date: row.date("scd_end_date")?,
            fcst_start_date: row.date("fcst_start_date")?,
            next_data_date: row.date("next_data_date")?,
            last_recalc_date: row.date("last_recalc_date")?,
            last_tasksum_date: row.date("last_tasksum_date")?,
            last_baseline_update_date: row.date("last_baseline_update_date")?,
            apply_actuals_date: row.date("apply_actuals_date")?,
            source: row.source_row(),
        })
    }
}

/// A PROJWBS row: one node of a project's work breakdown structure.
#[derive(Debug, Clone)]
pub struct Wbs {
    pub wbs_id: Field<i64>,
    pub proj_id: Field<i64>,
    pub obs_id: Field<i64>,
    pub parent_wbs_id: Field<i64>,
    pub phase_id: Field<i64>,
    pub seq_num: Field<i64>,
    pub est_wt: Field<f64>,
    pub proj_node_flag: Field<String>,
    pub sum_data_flag: Field<String>,
    pub status_code: Field<String>,
    pub wbs_short_name: Field<String>,
    pub wbs_name: Field<String>,
    pub ev_user_pct: Field<f64>,
    pub ev_etc_user_value: Field<f64>,
    pub orig_cost: Field<f64>,
    pub indep_remain_total_cost: Field<f64>,
    pub indep_remain_work_qty: Field<f64>,
    pub anticip_start_date: Field<NaiveDateTime>,
    pub anticip_end_date: Field<NaiveDateTime>,
    pub ev_compute_type: Field<String>,
    pub ev_etc_compute_type: Field<String>,
    pub guid: Field<String>,
    pub tmpl_guid: Field<String>,
    source: SourceRow,
}

impl_record!(
    Wbs,
    table = "PROJWBS",
    primary_key = wbs_id,
    foreign_keys = [proj_id, obs_id, parent_wbs_id, phase_id]
);

impl Wbs {
    /// The WBS node that stands for the project itself.
    pub fn is_project_node(&self) -> bool {
        self.proj_node_flag.as_deref() == Some("Y")
    }
}

impl Decode for Wbs {
    fn decode(row: &RowView<'_>) -> Result<Self, FieldError> {
        Ok(Self {
            wbs_id: row.id("wbs_id")?,
            proj_id: row.id("proj_id")?,
            obs_id: row.id("obs_id")?,
            parent_wbs_id: row.id("parent_wbs_id")?,
            phase_id: row.id("phase_id")?,
            seq_num: row.int("seq_num")?,
            est_wt: row.float("est_wt")?,
            proj_node_flag: row.flag("proj_node_flag"),
            sum_data_flag: row.flag("sum_data_flag"),
            status_code: row.text("status_code"),
            wbs_short_name: row.text("wbs_short_name"),
            wbs_name: row.text("wbs_name"),
            ev_user_pct: row.float("ev_user_pct")?,
            ev_etc_user_value: row.float("ev_etc_user_value")?,
            orig_cost: row.float("orig_cost")?,
            indep_remain_total_cost: row.float("indep_remain_total_cost")?,
            indep_remain_work_qty: row.float("indep_remain_work_qty")?,
            anticip_start_date: row.date("anticip_start_date")?,
            anticip_end_date: row.date("anticip_end_date")?,
            ev_compute_type: row.text("ev_compute_type"),
            ev_etc_compute_type: row.text("ev_etc_compute_type"),
            guid: row.text("guid"),
            tmpl_guid: row.text("tmpl_guid"),
            source: row.source_row(),
        })
    }
}
