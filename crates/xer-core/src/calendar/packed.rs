//! Reader for the packed `clndr_data` column.
//!
//! The column holds a tree of nodes written as
//! `(0||NAME(attr|value|attr|value)(children))`. Two subtrees matter:
//!
//! * `DaysOfWeek`, whose nodes `1` to `7` (1 is Sunday) contain one node per
//!   working interval with attributes `s|HH:MM|f|HH:MM`;
//! * `Exceptions`, whose nodes carry `d|SERIAL` (days since 1899-12-30, or an
//!   ISO date) and contain the replacement intervals for that date. An
//!   exception without intervals is a non-working day.
//!
//! Every other node is skipped. Whitespace and `0x7F` bytes are dropped
//! before parsing and anything after the root node is ignored.

use super::{WorkInterval, serial_to_date};
use chrono::{NaiveDate, Weekday};
use thiserror::Error;

const MAX_DEPTH: usize = 64;
const MINUTES_PER_DAY: u16 = 24 * 60;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalendarDataError {
    #[error("calendar data has no root node")]
    NoRoot,

    #[error("calendar data ends inside a node")]
    UnexpectedEnd,

    #[error("expected '{expected}' at offset {offset}")]
    Expected { expected: char, offset: usize },

    #[error("calendar data nests deeper than {0} levels")]
    TooDeep(usize),

    #[error("invalid time of day '{0}'")]
    InvalidTime(String),

    #[error("invalid exception date '{0}'")]
    InvalidDate(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Node {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Node {
    fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(key))
            .map(|(_, value)| value.as_str())
    }

    fn find(&self, name: &str) -> Option<&Node> {
        if self.name.eq_ignore_ascii_case(name) {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(name))
    }
}

/// Weekly intervals and exceptions read from one `clndr_data` value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct PackedCalendar {
    pub weekly: Vec<(Weekday, Vec<WorkInterval>)>,
    pub exceptions: Vec<(NaiveDate, Vec<WorkInterval>)>,
}

pub(crate) fn parse_calendar_data(raw: &str) -> Result<PackedCalendar, CalendarDataError> {
    let root = parse_tree(raw)?;
    let mut calendar = PackedCalendar::default();

    if let Some(days) = root.find("DaysOfWeek") {
        for day in &days.children {
            let Some(weekday) = weekday_from_number(&day.name) else {
                continue;
            };
            calendar.weekly.push((weekday, intervals_of(day)?));
        }
    }

    if let Some(exceptions) = root.find("Exceptions") {
        for exception in &exceptions.children {
            let Some(raw_date) = exception.attribute("d") else {
                continue;
            };
            let date = parse_exception_date(raw_date)
                .ok_or_else(|| CalendarDataError::InvalidDate(raw_date.to_string()))?;
            calendar.exceptions.push((date, intervals_of(exception)?));
        }
    }

    Ok(calendar)
}

pub(crate) fn parse_tree(raw: &str) -> Result<Node, CalendarDataError> {
    let chars: Vec<char> = raw
        .chars()
        .filter(|ch| !ch.is_whitespace() && *ch != '\u{7f}')
        .collect();
    let start = chars
        .iter()
        .position(|ch| *ch == '(')
        .ok_or(CalendarDataError::NoRoot)?;
    let mut parser = Parser {
        chars,
        offset: start,
    };
    parser.node(0)
}

struct Parser {
    chars: Vec<char>,
    offset: usize,
}

impl Parser {
    fn peek(&self) -> Option<char> {
        self.chars.get(self.offset).copied()
    }

    fn expect(&mut self, expected: char) -> Result<(), CalendarDataError> {
        match self.peek() {
            Some(ch) if ch == expected => {
                self.offset += 1;
                Ok(())
            }
            Some(_) => Err(CalendarDataError::Expected {
                expected,
                offset: self.offset,
            }),
            None => Err(CalendarDataError::UnexpectedEnd),
        }
    }

    fn take_until(&mut self, stop: char) -> Result<String, CalendarDataError> {
        let begin = self.offset;
        while let Some(ch) = self.peek() {
            if ch == stop {
                return Ok(self.chars[begin..self.offset].iter().collect());
            }
            self.offset += 1;
        }
        Err(CalendarDataError::UnexpectedEnd)
    }

    fn node(&mut self, depth: usize) -> Result<Node, CalendarDataError> {
        if depth >= MAX_DEPTH {
            return Err(CalendarDataError::TooDeep(MAX_DEPTH));
        }
        self.expect('(')?;
        // Sibling index, unused.
        self.take_until('|')?;
        self.expect('|')?;
        self.expect('|')?;
        let name = self.take_until('(')?;
        self.expect('(')?;
        let attributes = pairs(&self.take_until(')')?);
        self.expect(')')?;

        self.expect('(')?;
        let mut children = Vec::new();
        while self.peek() == Some('(') {
            children.push(self.node(depth + 1)?);
        }
        self.expect(')')?;
        self.expect(')')?;

        Ok(Node {
            name,
            attributes,
            children,
        })
    }
}

fn pairs(raw: &str) -> Vec<(String, String)> {
    if raw.is_empty() {
        return Vec::new();
    }
    let parts: Vec<&str> = raw.split('|').collect();
    parts
        .chunks(2)
        .map(|pair| {
            (
                pair[0].to_string(),
                pair.get(1).copied().unwrap_or_default().to_string(),
            )
        })
        .collect()
}

fn weekday_from_number(name: &str) -> Option<Weekday> {
    match name.parse::<u8>().ok()? {
        1 => Some(Weekday::Sun),
        2 => Some(Weekday::Mon),
        3 => Some(Weekday::Tue),
        4 => Some(Weekday::Wed),
        5 => Some(Weekday::Thu),
        6 => Some(Weekday::Fri),
        7 => Some(Weekday::Sat),
        _ => None,
    }
}

/// Collects the `s`/`f` intervals under a day or exception node. Nodes
/// without both attributes are skipped, as are intervals whose finish is not
/// after their start.
fn intervals_of(node: &Node) -> Result<Vec<WorkInterval>, CalendarDataError> {
    let mut intervals = Vec::new();
    for child in &node.children {
        let (Some(start), Some(finish)) = (child.attribute("s"), child.attribute("f")) else {
            continue;
        };
        let start = parse_time(start)?;
        let mut end = parse_time(finish)?;
        if end == 0 {
            end = MINUTES_PER_DAY;
        }
        if let Some(interval) = WorkInterval::new(start, end) {
            intervals.push(interval);
        }
    }
    Ok(intervals)
}

fn parse_time(raw: &str) -> Result<u16, CalendarDataError> {
    let invalid = || CalendarDataError::InvalidTime(raw.to_string());
    let (hours, minutes) = raw.split_once(':').ok_or_else(invalid)?;
    let hours: u16 = hours.parse().map_err(|_| invalid())?;
    let minutes: u16 = minutes.parse().map_err(|_| invalid())?;
    if minutes >= 60 || hours > 24 || (hours == 24 && minutes > 0) {
        return Err(invalid());
    }
    Ok(hours * 60 + minutes)
}

fn parse_exception_date(raw: &str) -> Option<NaiveDate> {
    if let Ok(serial) = raw.parse::<i64>() {
        return serial_to_date(serial);
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}
