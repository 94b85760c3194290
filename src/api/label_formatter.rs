use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Timelike};

use crate::core::{Label, LabelKind};

use super::LabelOptions;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const WEEKDAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Longest tokens first so `MMMM` wins over `MM` and `M`.
const TOKENS: [&str; 22] = [
    "YYYY", "YY", "MMMM", "MMM", "MM", "M", "DD", "D", "dddd", "ddd", "dd", "d", "HH", "H", "hh",
    "h", "mm", "m", "ss", "s", "A", "a",
];

/// Text shown under a bucket for `label`.
///
/// Date labels that fail to parse, or an empty format, fall back to the raw
/// label value.
#[must_use]
pub fn format_label(label: &Label, options: &LabelOptions) -> String {
    let is_date = label.kind == LabelKind::Date || options.kind == LabelKind::Date;
    if !is_date {
        return label.value.clone();
    }
    format_date_label(&label.value, &options.format).unwrap_or_else(|| label.value.clone())
}

/// Formats a date string with a dayjs-style token pattern.
#[must_use]
pub fn format_date_label(value: &str, format: &str) -> Option<String> {
    if format.is_empty() {
        return None;
    }
    parse_label_datetime(value).map(|datetime| format_tokens(datetime, format))
}

/// Parses a label as a wall-clock timestamp, ignoring any UTC offset.
#[must_use]
pub fn parse_label_datetime(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if let Ok(datetime) = DateTime::parse_from_rfc3339(value) {
        return Some(datetime.naive_local());
    }
    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(value, pattern) {
            return Some(datetime);
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

fn format_tokens(datetime: NaiveDateTime, format: &str) -> String {
    let mut out = String::with_capacity(format.len() + 8);
    let mut rest = format;
    while let Some(ch) = rest.chars().next() {
        if ch == '[' {
            if let Some(end) = rest.find(']') {
                out.push_str(&rest[1..end]);
                rest = &rest[end + 1..];
                continue;
            }
        }
        match TOKENS.iter().find(|token| rest.starts_with(**token)) {
            Some(token) => {
                push_token(&mut out, datetime, token);
                rest = &rest[token.len()..];
            }
            None => {
                out.push(ch);
                rest = &rest[ch.len_utf8()..];
            }
        }
    }
    out
}

fn push_token(out: &mut String, datetime: NaiveDateTime, token: &str) {
    let month = datetime.month0() as usize;
    let weekday = datetime.weekday().num_days_from_sunday() as usize;
    let hour12 = match datetime.hour() % 12 {
        0 => 12,
        hour => hour,
    };
    let text = match token {
        "YYYY" => format!("{:04}", datetime.year()),
        "YY" => format!("{:02}", datetime.year().rem_euclid(100)),
        "MMMM" => MONTH_NAMES[month].to_owned(),
        "MMM" => MONTH_NAMES[month][..3].to_owned(),
        "MM" => format!("{:02}", datetime.month()),
        "M" => datetime.month().to_string(),
        "DD" => format!("{:02}", datetime.day()),
        "D" => datetime.day().to_string(),
        "dddd" => WEEKDAY_NAMES[weekday].to_owned(),
        "ddd" => WEEKDAY_NAMES[weekday][..3].to_owned(),
        "dd" => WEEKDAY_NAMES[weekday][..2].to_owned(),
        "d" => weekday.to_string(),
        "HH" => format!("{:02}", datetime.hour()),
        "H" => datetime.hour().to_string(),
        "hh" => format!("{hour12:02}"),
        "h" => hour12.to_string(),
        "mm" => format!("{:02}", datetime.minute()),
        "m" => datetime.minute().to_string(),
        "ss" => format!("{:02}", datetime.second()),
        "s" => datetime.second().to_string(),
        "A" => meridiem(datetime.hour()).to_owned(),
        "a" => meridiem(datetime.hour()).to_ascii_lowercase(),
        _ => token.to_owned(),
    };
    out.push_str(&text);
}

fn meridiem(hour: u32) -> &'static str {
    if hour < 12 { "AM" } else { "PM" }
}

#[cfg(test)]
mod tests {
    use super::{format_date_label, format_label, parse_label_datetime};
    use crate::api::LabelOptions;
    use crate::core::{Label, LabelKind};

    #[test]
    fn weekday_and_month_day_with_line_break() {
        let formatted = format_date_label("2021-03-08T14:05:09Z", "ddd\nM/DD");
        assert_eq!(formatted.as_deref(), Some("Mon\n3/08"));
    }

    #[test]
    fn twelve_hour_clock_and_literals() {
        let formatted = format_date_label("2021-03-08T00:07:00", "[at] h:mm A, MMMM D YYYY");
        assert_eq!(formatted.as_deref(), Some("at 12:07 AM, March 8 2021"));
    }

    #[test]
    fn offset_keeps_wall_clock_time() {
        let parsed = parse_label_datetime("2021-03-08T23:30:00-05:00").expect("rfc3339");
        assert_eq!(parsed.format("%Y-%m-%d %H:%M").to_string(), "2021-03-08 23:30");
    }

    #[test]
    fn raw_labels_and_bad_dates_pass_through() {
        let raw = LabelOptions::default();
        assert_eq!(format_label(&Label::raw("Mon"), &raw), "Mon");

        let dates = LabelOptions {
            kind: LabelKind::Date,
            format: "MMM D".to_owned(),
            ..LabelOptions::default()
        };
        assert_eq!(format_label(&Label::raw("not a date"), &dates), "not a date");
        assert_eq!(format_label(&Label::raw("2021-12-25"), &dates), "Dec 25");

        let empty_format = LabelOptions::default();
        assert_eq!(format_label(&Label::date("2021-12-25"), &empty_format), "2021-12-25");
    }
}
