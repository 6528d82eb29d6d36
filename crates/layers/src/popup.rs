use std::fmt::Display;

use chrono::TimeZone;
use foundation::EpochMillis;

/// `Tue Nov 14 2023 22:13:20 GMT+0000`, the shape a browser `Date` prints.
pub const TIMESTAMP_FORMAT: &str = "%a %b %d %Y %H:%M:%S GMT%z";

pub const UNKNOWN_TIME: &str = "Unknown time";

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn format_timestamp<Tz>(time: Option<EpochMillis>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    time.and_then(|t| tz.timestamp_millis_opt(t.as_millis()).single())
        .map(|dt| dt.format(TIMESTAMP_FORMAT).to_string())
        .unwrap_or_else(|| UNKNOWN_TIME.to_string())
}

/// Popup body: escaped title heading, rule, then the event time.
pub fn popup_html(title: &str, when: &str) -> String {
    format!(
        "<h5>{}</h5><hr><p>{}</p>",
        escape_html(title),
        escape_html(when)
    )
}
