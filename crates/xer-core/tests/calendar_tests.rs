mod common;

use chrono::Weekday;
use common::{d, export, line, options, sample_document};
use xer_tool::calendar::{date_to_serial, serial_to_date};
use xer_tool::{Document, ErrorKind, HourCounts, Severity, WorkCalendar, WorkInterval};

#[test]
fn weekly_pattern_comes_from_clndr_data() {
    let doc = sample_document();
    let calendar = &doc.calendar(1).unwrap().work_calendar;
    let workday = [
        WorkInterval::from_hours(8, 12).unwrap(),
        WorkInterval::from_hours(13, 17).unwrap(),
    ];
    assert_eq!(calendar.weekday_pattern(Weekday::Mon), workday);
    assert_eq!(calendar.weekday_pattern(Weekday::Fri), workday);
    assert!(calendar.weekday_pattern(Weekday::Sun).is_empty());
    assert!(calendar.weekday_pattern(Weekday::Sat).is_empty());
    assert_eq!(calendar.weekly_hours(), 40.0);
}

#[test]
fn exceptions_override_the_weekday() {
    let doc = sample_document();
    let calendar = &doc.calendar(1).unwrap().work_calendar;

    // Tuesday, Wednesday holiday, Saturday overtime, Sunday.
    assert_eq!(calendar.working_hours_on(d(2025, 1, 7)), 8.0);
    assert_eq!(calendar.work_minutes(d(2025, 1, 7)), calendar.weekday_pattern(Weekday::Tue));
    assert!(!calendar.is_working(d(2025, 1, 8)));
    assert_eq!(calendar.exception(d(2025, 1, 8)), Some(&[][..]));
    assert_eq!(calendar.working_hours_on(d(2025, 1, 11)), 4.0);
    assert!(!calendar.is_working(d(2025, 1, 12)));
    assert_eq!(calendar.exceptions().len(), 2);
}

#[test]
fn working_day_queries_skip_weekends_and_holidays() {
    let doc = sample_document();
    let calendar = &doc.calendar(1).unwrap().work_calendar;
    assert_eq!(calendar.next_working_day(d(2025, 1, 7)), Some(d(2025, 1, 9)));
    assert_eq!(calendar.next_working_day(d(2025, 1, 10)), Some(d(2025, 1, 11)));
    assert_eq!(calendar.next_working_day(d(2025, 1, 11)), Some(d(2025, 1, 13)));

    let week = calendar.working_days_in_range(d(2025, 1, 6), d(2025, 1, 12));
    assert_eq!(
        week,
        [d(2025, 1, 6), d(2025, 1, 7), d(2025, 1, 9), d(2025, 1, 10), d(2025, 1, 11)]
    );
    assert_eq!(calendar.count_working_days(d(2025, 1, 6), d(2025, 1, 12)), 5);
    assert_eq!(calendar.count_working_days(d(2025, 1, 12), d(2025, 1, 6)), 0);
}

#[test]
fn hour_counts_prefer_exported_values() {
    let doc = sample_document();
    let standard = &doc.calendar(1).unwrap().work_calendar;
    assert_eq!(standard.hours_per_day(), 8.0);
    assert_eq!(standard.hours_per_week(), 40.0);
    assert_eq!(standard.hours_per_month(), 172.0);
    assert_eq!(standard.hours_per_year(), 2000.0);
    assert_eq!(standard.duration_in_days(20.0), 2.5);
}

#[test]
fn zero_and_blank_hour_counts_fall_back() {
    let doc = sample_document();
    let record = doc.calendar(2).unwrap();
    assert_eq!(record.hour_counts().day, Some(0.0));
    assert_eq!(record.hour_counts().week, None);

    let calendar = &record.work_calendar;
    assert_eq!(calendar.hours_per_day(), 8.0);
    assert_eq!(calendar.hours_per_week(), 40.0);
    assert_eq!(calendar.hours_per_year(), 2080.0);
    assert!((calendar.hours_per_month() - 2080.0 / 12.0).abs() < 1e-9);
}

#[test]
fn blank_clndr_data_never_works() {
    let doc = sample_document();
    let calendar = &doc.calendar(2).unwrap().work_calendar;
    assert!(!calendar.is_working(d(2025, 1, 6)));
    assert_eq!(calendar.weekly_hours(), 0.0);
    assert_eq!(calendar.next_working_day(d(2025, 1, 6)), None);
}

#[test]
fn malformed_clndr_data_keeps_the_calendar_row() {
    let text = export(&[
        line("%T", &["CALENDAR"]),
        line("%F", &["clndr_id", "clndr_name", "day_hr_cnt", "clndr_data"]),
        line("%R", &["3", "Broken", "10", "(0||CalendarData()((0||DaysOfWeek()("]),
        line("%R", &["4", "Bad time", "", "(0||CalendarData()((0||DaysOfWeek()((0||2()((0||0(s|8h|f|12:00)())))))))"]),
    ]);
    let doc = Document::parse_with(&text, options()).unwrap();
    assert_eq!(doc.calendars().len(), 2);

    let broken = doc.calendar(3).unwrap();
    assert_eq!(broken.work_calendar.weekly_hours(), 0.0);
    assert_eq!(broken.work_calendar.hours_per_day(), 10.0);

    let diagnostics = doc.diagnostics();
    assert_eq!(diagnostics.len(), 2);
    for diagnostic in diagnostics {
        assert_eq!(diagnostic.kind, ErrorKind::MalformedCalendarData);
        assert_eq!(diagnostic.severity, Severity::Warning);
    }
    assert!(diagnostics[1].message.contains("8h"));
}

#[test]
fn midnight_finish_runs_to_end_of_day() {
    let raw = "(0||CalendarData()((0||DaysOfWeek()((0||2()((0||0(s|22:00|f|00:00)())))))))";
    let calendar = WorkCalendar::decode(raw, HourCounts::default(), 8.0).unwrap();
    assert_eq!(calendar.minutes_on(d(2025, 1, 6)), 120);
    assert_eq!(calendar.work_minutes(d(2025, 1, 6)), [WorkInterval::new(22 * 60, 24 * 60).unwrap()]);
}

#[test]
fn midnight_to_midnight_is_a_full_day() {
    let day = "(0||0(s|00:00|f|00:00)())";
    let mut days = String::new();
    for number in 1..=7 {
        days.push_str(&format!("(0||{number}()({day}))"));
    }
    let raw = format!("(0||CalendarData()((0||DaysOfWeek()({days}))))");
    let hours = HourCounts {
        day: Some(24.0),
        ..HourCounts::default()
    };
    let calendar = WorkCalendar::decode(&raw, hours, 8.0).unwrap();

    assert!(calendar.is_working(d(2025, 1, 6)));
    assert_eq!(calendar.minutes_on(d(2025, 1, 6)), 1440);
    assert_eq!(calendar.weekly_hours(), 168.0);
    assert_eq!(calendar.next_working_day(d(2025, 1, 11)), Some(d(2025, 1, 12)));
}

#[test]
fn exception_dates_accept_serials_and_iso_dates() {
    let raw = "(0||CalendarData()((0||DaysOfWeek()())(0||Exceptions()(\
               (0||0(d|45658)())\
               (0||1(d|2025-01-04)((0||0(s|07:00|f|11:30)())))))))";
    let calendar = WorkCalendar::decode(raw, HourCounts::default(), 8.0).unwrap();
    assert_eq!(calendar.exception(d(2025, 1, 1)), Some(&[][..]));
    assert_eq!(calendar.minutes_on(d(2025, 1, 4)), 270);

    let bad = "(0||CalendarData()((0||Exceptions()((0||0(d|soon)())))))";
    assert!(WorkCalendar::decode(bad, HourCounts::default(), 8.0).is_err());
}

#[test]
fn packed_data_tolerates_layout_whitespace() {
    let raw = "(0||CalendarData()(\r\n  (0||DaysOfWeek()(\r\n    (0||3()(\r\n      (0||0(s|09:00|f|17:00)())))))))\r\n";
    let calendar = WorkCalendar::decode(raw, HourCounts::default(), 8.0).unwrap();
    assert_eq!(calendar.working_hours_on(d(2025, 1, 7)), 8.0);
}

#[test]
fn manual_calendars_merge_touching_intervals() {
    let mut calendar = WorkCalendar::default();
    calendar.set_weekday(
        Weekday::Mon,
        vec![
            WorkInterval::from_hours(13, 17).unwrap(),
            WorkInterval::from_hours(8, 13).unwrap(),
        ],
    );
    assert_eq!(calendar.weekday_pattern(Weekday::Mon), [WorkInterval::from_hours(8, 17).unwrap()]);

    calendar.add_holiday(d(2025, 1, 13));
    assert!(calendar.is_working(d(2025, 1, 6)));
    assert!(!calendar.is_working(d(2025, 1, 13)));
    assert_eq!(calendar.next_working_day(d(2025, 1, 6)), Some(d(2025, 1, 20)));
}

#[test]
fn day_serials_count_from_1899_12_30() {
    assert_eq!(serial_to_date(45658), Some(d(2025, 1, 1)));
    assert_eq!(serial_to_date(1), Some(d(1899, 12, 31)));
    assert_eq!(date_to_serial(d(2025, 1, 11)), 45668);
}
