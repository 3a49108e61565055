use crate::error::ParseError;
use crate::models::SessionRecord;

/// Decode one page of `digdag sessions` output into session records
///
/// The page starts with a header line, which is discarded, followed by
/// session blocks separated by blank lines. Every line is trimmed before
/// decoding. Records are returned in the order they appear in the text.
///
/// A block that fails to decode aborts the whole page.
///
/// # Examples
///
/// ```
/// use digdag_sessions::parsers::decode_page;
///
/// let records = decode_page("Session attempts:\n")?;
/// assert!(records.is_empty());
/// # Ok::<(), digdag_sessions::error::ParseError>(())
/// ```
pub fn decode_page(raw: &str) -> Result<Vec<SessionRecord>, ParseError> {
    split_blocks(raw).iter().map(|block| SessionRecord::decode(block.as_slice())).collect()
}

/// Split a page into blocks of trimmed, non-empty lines with the header removed
pub fn split_blocks(raw: &str) -> Vec<Vec<&str>> {
    let mut blocks = Vec::new();
    let mut current = Vec::new();

    // The first line is the header and is skipped
    for line in raw.lines().skip(1) {
        let line = line.trim();
        if line.is_empty() {
            if !current.is_empty() {
                blocks.push(std::mem::take(&mut current));
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        blocks.push(current);
    }

    blocks
}
