//! Local time handling and the creation timestamp format.

use time::{
    OffsetDateTime, UtcOffset, format_description::BorrowedFormatItem, macros::format_description,
};
use time_tz::{Offset, TimeZone};

/// The format transactions record their creation time in, e.g.
/// `14:03:07 28/02/2026`.
const TIMESTAMP_FORMAT: &[BorrowedFormatItem] =
    format_description!("[hour]:[minute]:[second] [day]/[month]/[year]");

/// Resolve a canonical timezone string, e.g. "America/Sao_Paulo", to its
/// current UTC offset.
pub fn get_local_offset(canonical_timezone: &str) -> Option<UtcOffset> {
    time_tz::timezones::get_by_name(canonical_timezone)
        .map(|tz| tz.get_offset_utc(&OffsetDateTime::now_utc()).to_utc())
}

/// Format `datetime` as a creation timestamp.
pub fn format_timestamp(datetime: OffsetDateTime) -> String {
    datetime
        .format(&TIMESTAMP_FORMAT)
        .expect("the timestamp format only uses components an OffsetDateTime always has")
}

/// The current time in `offset`, formatted as a creation timestamp.
pub fn now_string(offset: UtcOffset) -> String {
    format_timestamp(OffsetDateTime::now_utc().to_offset(offset))
}
