use chrono::{DateTime, Utc};

/// Timestamp layout used inside MEF3 trailers
pub const MEF3_TS_FORMAT: &str = "%Y-%m-%d-%H.%M.%S";

/// Reformat a compact `YYYYMMDDHHMMSS` timestamp as `YYYY-MM-DD-HH.MM.SS`.
///
/// Anything that is not exactly 14 ASCII digits is returned unchanged.
pub fn reformat_compact_timestamp(ts: &str) -> String {
    if ts.len() != 14 || !ts.bytes().all(|b| b.is_ascii_digit()) {
        return ts.to_string();
    }
    format!(
        "{}-{}-{}-{}.{}.{}",
        &ts[0..4],
        &ts[4..6],
        &ts[6..8],
        &ts[8..10],
        &ts[10..12],
        &ts[12..14]
    )
}

/// Format a timestamp the way MEF3 trailers expect
pub fn format_mef3_timestamp(dt: &DateTime<Utc>) -> String {
    dt.format(MEF3_TS_FORMAT).to_string()
}
