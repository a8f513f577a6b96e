use super::{Decode, impl_record};
use crate::calendar::{HourCounts, WorkCalendar};
use crate::decode::{RowView, SourceRow};
use crate::error::{Diagnostic, ErrorKind, FieldError};
use crate::field::Field;

/// A CALENDAR row and the working time decoded from its `clndr_data`.
#[derive(Debug, Clone)]
pub struct Calendar {
    pub clndr_id: Field<i64>,
    pub default_flag: Field<String>,
    pub clndr_name: Field<String>,
    pub proj_id: Field<i64>,
    pub base_clndr_id: Field<i64>,
    pub last_chng_date: Field<chrono::NaiveDateTime>,
    pub clndr_type: Field<String>,
    pub day_hr_cnt: Field<f64>,
    pub week_hr_cnt: Field<f64>,
    pub month_hr_cnt: Field<f64>,
    pub year_hr_cnt: Field<f64>,
    pub rsrc_private: Field<String>,
    pub clndr_data: Field<String>,
    pub work_calendar: WorkCalendar,
    source: SourceRow,
}

impl_record!(
    Calendar,
    table = "CALENDAR",
    primary_key = clndr_id,
    foreign_keys = [proj_id, base_clndr_id]
);

impl Calendar {
    pub fn hour_counts(&self) -> HourCounts {
        HourCounts {
            day: self.day_hr_cnt.get(),
            week: self.week_hr_cnt.get(),
            month: self.month_hr_cnt.get(),
            year: self.year_hr_cnt.get(),
        }
    }

    pub fn is_default(&self) -> bool {
        self.default_flag.as_deref() == Some("Y")
    }
}

impl Decode for Calendar {
    fn decode(row: &RowView<'_>) -> Result<Self, FieldError> {
        let mut calendar = Self {
            clndr_id: row.id("clndr_id")?,
            default_flag: row.flag("default_flag"),
            clndr_name: row.text("clndr_name"),
            proj_id: row.id("proj_id")?,
            base_clndr_id: row.id("base_clndr_id")?,
            last_chng_date: row.date("last_chng_date")?,
            clndr_type: row.text("clndr_type"),
            day_hr_cnt: row.float("day_hr_cnt")?,
            week_hr_cnt: row.float("week_hr_cnt")?,
            month_hr_cnt: row.float("month_hr_cnt")?,
            year_hr_cnt: row.float("year_hr_cnt")?,
            rsrc_private: row.flag("rsrc_private"),
            clndr_data: row.text("clndr_data"),
            work_calendar: WorkCalendar::default(),
            source: row.source_row(),
        };

        let hours = calendar.hour_counts();
        let fallback = row.options().fallback_day_hours();
        let raw = calendar.clndr_data.as_deref().unwrap_or_default();
        calendar.work_calendar = match WorkCalendar::decode(raw, hours, fallback) {
            Ok(work_calendar) => work_calendar,
            Err(err) => {
                row.note(Diagnostic::warning(
                    ErrorKind::MalformedCalendarData,
                    row.table(),
                    row.line(),
                    format!("field clndr_data: {err}; calendar has no working time"),
                ));
                WorkCalendar::empty(hours, fallback)
            }
        };
        Ok(calendar)
    }
}
