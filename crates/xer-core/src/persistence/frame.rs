use crate::document::Document;
use crate::error::XerResult;
use chrono::{NaiveDate, NaiveDateTime};
use polars::prelude::*;

fn date_to_i32(date: NaiveDate) -> i32 {
    let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap_or_default();
    (date - epoch).num_days() as i32
}

fn date_series(name: &'static str, values: Vec<Option<NaiveDateTime>>) -> PolarsResult<Series> {
    let days: Vec<Option<i32>> = values
        .into_iter()
        .map(|value| value.map(|value| date_to_i32(value.date())))
        .collect();
    Series::new(PlSmallStr::from_static(name), days).cast(&DataType::Date)
}

/// One row per task, in table order.
///
/// Columns: `task_id`, `task_code`, `task_name`, `proj_id`, `clndr_id`,
/// `target_drtn_hr_cnt`, `duration_days`, `total_float_days`, `start_date`,
/// `end_date`. Durations in days use the task's calendar.
pub fn tasks_dataframe(doc: &Document) -> XerResult<DataFrame> {
    let tasks = doc.tasks();
    let height = tasks.len();
    let mut task_id: Vec<Option<i64>> = Vec::with_capacity(height);
    let mut task_code: Vec<Option<String>> = Vec::with_capacity(height);
    let mut task_name: Vec<Option<String>> = Vec::with_capacity(height);
    let mut proj_id: Vec<Option<i64>> = Vec::with_capacity(height);
    let mut clndr_id: Vec<Option<i64>> = Vec::with_capacity(height);
    let mut hours: Vec<Option<f64>> = Vec::with_capacity(height);
    let mut days: Vec<Option<f64>> = Vec::with_capacity(height);
    let mut float_days: Vec<Option<f64>> = Vec::with_capacity(height);
    let mut starts: Vec<Option<NaiveDateTime>> = Vec::with_capacity(height);
    let mut ends: Vec<Option<NaiveDateTime>> = Vec::with_capacity(height);

    for task in tasks {
        task_id.push(task.task_id.get());
        task_code.push(task.task_code.value().cloned());
        task_name.push(task.task_name.value().cloned());
        proj_id.push(task.proj_id.get());
        clndr_id.push(task.clndr_id.get());
        hours.push(task.target_drtn_hr_cnt.get());
        days.push(task.duration_in_days(doc));
        float_days.push(task.total_float_days(doc));
        starts.push(task.start_date());
        ends.push(task.end_date());
    }

    let mut df = df!(
        "task_id" => task_id,
        "task_code" => task_code,
        "task_name" => task_name,
        "proj_id" => proj_id,
        "clndr_id" => clndr_id,
        "target_drtn_hr_cnt" => hours,
        "duration_days" => days,
        "total_float_days" => float_days,
    )?;
    df.with_column(date_series("start_date", starts)?)?;
    df.with_column(date_series("end_date", ends)?)?;
    Ok(df)
}
