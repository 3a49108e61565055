//! Label stripping for the `label: value` lines printed by `digdag sessions`.
//!
//! Extraction never fails: a line without the expected label yields an empty
//! value so that formatting drift in non-critical fields cannot abort a fetch.

const LABEL_SEPARATOR: char = ':';
const TIME_MARKERS: [&str; 2] = ["at:", "time:"];

/// Strip the label from a raw field line and return its trimmed value
///
/// Plain fields split on `:`, time fields on `at:` or `time:` so that the
/// colons inside the timestamp survive. Only the segment between the first
/// and second separator is returned; no separator means an empty value.
///
/// # Examples
///
/// ```
/// use digdag_sessions::parsers::fields::extract;
///
/// assert_eq!(extract("status: error", false), "error");
/// assert_eq!(extract("created at: 2024-01-01 00:00:00 +0000", true), "2024-01-01 00:00:00 +0000");
/// assert_eq!(extract("no label here", false), "");
/// ```
pub fn extract(raw: &str, is_time_field: bool) -> String {
    let value = if is_time_field {
        extract_time_segment(raw)
    } else {
        raw.split(LABEL_SEPARATOR).nth(1)
    };
    value.map(|v| v.trim().to_string()).unwrap_or_default()
}

/// Extract an integer field, degrading to `0` when the value has no leading digits
///
/// Parses an optional sign followed by the leading run of digits, ignoring
/// anything after it (`"12abc"` is 12).
pub fn extract_integer(raw: &str) -> i64 {
    let value = extract(raw, false);
    let unsigned = value.strip_prefix(['-', '+']).unwrap_or(&value);
    let digits_len = unsigned.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return 0;
    }

    let sign_len = value.len() - unsigned.len();
    value[..sign_len + digits_len].parse().unwrap_or(0)
}

fn extract_time_segment(raw: &str) -> Option<&str> {
    let (start, marker_len) = find_time_marker(raw)?;
    let rest = &raw[start + marker_len..];
    let end = find_time_marker(rest).map(|(idx, _)| idx).unwrap_or(rest.len());
    let segment = &rest[..end];
    // A separator with nothing after it counts as no value
    if segment.is_empty() && end == rest.len() { None } else { Some(segment) }
}

fn find_time_marker(s: &str) -> Option<(usize, usize)> {
    TIME_MARKERS
        .iter()
        .filter_map(|marker| s.find(marker).map(|idx| (idx, marker.len())))
        .min_by_key(|(idx, _)| *idx)
}
