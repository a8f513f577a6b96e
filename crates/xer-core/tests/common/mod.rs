#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use xer_tool::{Document, ParseOptions};

pub fn d(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn dt(y: i32, m: u32, day: u32, h: u32, min: u32) -> NaiveDateTime {
    d(y, m, day).and_hms_opt(h, min, 0).unwrap()
}

pub fn options() -> ParseOptions {
    ParseOptions::default().with_decimal_separator('.')
}

pub fn line(tag: &str, fields: &[&str]) -> String {
    std::iter::once(tag)
        .chain(fields.iter().copied())
        .collect::<Vec<_>>()
        .join("\t")
}

pub fn export(lines: &[String]) -> String {
    let mut text = lines.join("\r\n");
    text.push_str("\r\n");
    text
}

/// Monday to Friday 08:00-12:00 and 13:00-17:00. Wednesday 2025-01-08 is a
/// holiday and Saturday 2025-01-11 works 09:00-13:00.
pub fn standard_clndr_data() -> String {
    let workday = "(0||0(s|08:00|f|12:00)())(0||1(s|13:00|f|17:00)())";
    let mut days = String::from("(0||1()())");
    for day in 2..=6 {
        days.push_str(&format!("(0||{day}()({workday}))"));
    }
    days.push_str("(0||7()())");

    let exceptions = "(0||0(d|45665)())(0||1(d|45668)((0||0(s|09:00|f|13:00)())))";
    format!(
        "(0||CalendarData()((0||DaysOfWeek()({days}))(0||VIEW(ShowTotal|Y)())(0||Exceptions()({exceptions}))))"
    )
}

/// A small export touching every typed table plus one generic table.
pub fn sample_lines() -> Vec<String> {
    let clndr_data = standard_clndr_data();
    vec![
        line(
            "ERMHDR",
            &["19.12", "2025-01-05", "Project", "admin", "Admin", "dbxDatabaseNoName", "Project Management", "USD"],
        ),
        line("%T", &["CALENDAR"]),
        line(
            "%F",
            &[
                "clndr_id", "default_flag", "clndr_name", "proj_id", "base_clndr_id", "last_chng_date",
                "clndr_type", "day_hr_cnt", "week_hr_cnt", "month_hr_cnt", "year_hr_cnt", "rsrc_private",
                "clndr_data",
            ],
        ),
        line(
            "%R",
            &["1", "Y", "Standard", "", "", "2024-12-01 00:00", "CA_Base", "8", "40", "172", "2000", "N", clndr_data.as_str()],
        ),
        line(
            "%R",
            &["2", "N", "Project Ten", "100", "1", "", "CA_Project", "0", "", "", "", "N", ""],
        ),
        line("%T", &["PROJECT"]),
        line("%F", &["proj_id", "proj_short_name", "clndr_id", "plan_start_date", "last_recalc_date"]),
        line("%R", &["100", "DEMO", "1", "2025-01-06 08:00", ""]),
        line("%T", &["PROJWBS"]),
        line("%F", &["wbs_id", "proj_id", "parent_wbs_id", "proj_node_flag", "wbs_short_name", "wbs_name"]),
        line("%R", &["10", "100", "", "Y", "DEMO", "Demo project"]),
        line("%R", &["11", "100", "10", "N", "DES", "Design"]),
        line("%R", &["0", "100", "10", "N", "ZERO", "Zero node"]),
        line("%T", &["RSRC"]),
        line("%F", &["rsrc_id", "parent_rsrc_id", "clndr_id", "rsrc_name", "rsrc_short_name", "active_flag"]),
        line("%R", &["500", "", "1", "Engineer", "ENG", "Y"]),
        line("%R", &["501", "500", "", "Junior engineer", "JENG", "N"]),
        line("%T", &["TASK"]),
        line(
            "%F",
            &[
                "task_id", "proj_id", "wbs_id", "clndr_id", "rsrc_id", "task_code", "task_name", "task_type",
                "status_code", "target_drtn_hr_cnt", "remain_drtn_hr_cnt", "total_float_hr_cnt",
                "free_float_hr_cnt", "act_start_date", "target_start_date", "target_end_date", "cstr_type",
                "cstr_date", "external_early_start_date",
            ],
        ),
        line(
            "%R",
            &[
                "1003", "100", "11", "1", "500", "A1003", "Design review", "TT_Task", "TK_NotStart", "16", "16",
                "8", "0", "", "2025-01-09 08:00", "2025-01-10 17:00", "CS_MSO", "2025-01-09 08:00", "",
            ],
        ),
        line(
            "%R",
            &[
                "1001", "100", "11", "1", "", "A1001", "Kickoff", "TT_Mile", "TK_Complete", "0", "0", "", "",
                "2025-01-06 08:00", "2025-01-06 08:00", "2025-01-06 08:00", "", "", "",
            ],
        ),
        line(
            "%R",
            &[
                "1002", "100", "", "2", "", "A1002", "Build", "TT_Task", "TK_NotStart", "16", "12", "", "", "",
                "2025-01-13 08:00", "2025-01-14 17:00", "CS_MSO", "", "not a date",
            ],
        ),
        line(
            "%R",
            &[
                "1004", "100", "10", "99", "", "A1004", "Handover", "TT_FinMile", "TK_NotStart", "20", "20", "",
                "", "", "2025-01-15 08:00",
            ],
        ),
        line("%T", &["TASKPRED"]),
        line(
            "%F",
            &["task_pred_id", "task_id", "pred_task_id", "proj_id", "pred_proj_id", "pred_type", "lag_hr_cnt"],
        ),
        line("%R", &["1", "1003", "1001", "100", "100", "PR_FS", "0"]),
        line("%R", &["2", "1002", "1003", "100", "100", "PR_FS", "8"]),
        line("%R", &["3", "1004", "1003", "100", "100", "PR_SS", "0"]),
        line("%R", &["4", "1004", "1002", "100", "100", "PR_FF", "0"]),
        line("%T", &["TASKRSRC"]),
        line(
            "%F",
            &["taskrsrc_id", "task_id", "proj_id", "rsrc_id", "curv_id", "target_qty", "act_reg_qty", "act_ot_qty"],
        ),
        line("%R", &["700", "1003", "100", "500", "900", "16", "4", ""]),
        line("%R", &["701", "1002", "100", "501", "", "8", "", ""]),
        line("%T", &["RSRCCURVDATA"]),
        line("%F", &["curv_id", "curv_name", "default_flag", "pct_usage_0", "pct_usage_1"]),
        line("%R", &["900", "Front loaded", "N", "10", "7.5"]),
        line("%T", &["TASKACTV"]),
        line("%F", &["task_id", "actv_code_type_id", "actv_code_id", "proj_id"]),
        line("%R", &["1003", "40", "41", "100"]),
        line("%R", &["1003", "42", "43", "100"]),
        line("%T", &["RSRCRCAT"]),
        line("%F", &["rsrc_id", "rsrc_catg_type_id", "rsrc_catg_id"]),
        line("%R", &["500", "60", "61"]),
        line("%T", &["TASKMEMO"]),
        line("%F", &["memo_id", "task_id", "memo_type_id", "proj_id", "task_memo"]),
        line("%R", &["5", "1003", "3", "100", "Check drawings"]),
        line("%E", &[]),
    ]
}

pub fn sample_text() -> String {
    export(&sample_lines())
}

pub fn sample_document() -> Document {
    Document::parse_with(&sample_text(), options()).unwrap()
}
