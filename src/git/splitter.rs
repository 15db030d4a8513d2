use std::borrow::Cow;

/// Lazy record tokenizer over raw command output.
///
/// Splits on a literal end-of-record marker only, never on newlines, so
/// multi-paragraph commit bodies stay inside one record. Each record is
/// trimmed of surrounding whitespace and `"` characters; records that are
/// empty after trimming are skipped. Whatever follows the last marker is an
/// unfinished record and is dropped.
///
/// # Example
/// ```
/// # use git_sv::git::RecordSplitter;
/// let records: Vec<_> = RecordSplitter::new(b"\"a~~~\"\n\"b\nc~~~\"", b"~~~").collect();
/// assert_eq!(records, vec!["a", "b\nc"]);
/// ```
#[derive(Debug, Clone)]
pub struct RecordSplitter<'a> {
    remaining: &'a [u8],
    marker: &'a [u8],
}

impl<'a> RecordSplitter<'a> {
    pub fn new(data: &'a [u8], marker: &'a [u8]) -> Self {
        RecordSplitter {
            remaining: data,
            marker,
        }
    }
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() || haystack.len() < needle.len() {
        return None;
    }
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

fn clean(raw: &[u8]) -> Cow<'_, str> {
    match String::from_utf8_lossy(raw) {
        Cow::Borrowed(text) => Cow::Borrowed(trim_record(text)),
        Cow::Owned(text) => Cow::Owned(trim_record(&text).to_string()),
    }
}

pub(crate) fn trim_record(text: &str) -> &str {
    text.trim_matches(|c: char| c == '"' || c.is_whitespace())
}

impl<'a> Iterator for RecordSplitter<'a> {
    type Item = Cow<'a, str>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let end = find(self.remaining, self.marker)?;
            let raw = &self.remaining[..end];
            self.remaining = &self.remaining[end + self.marker.len()..];

            let record = clean(raw);
            if !record.is_empty() {
                return Some(record);
            }
        }
    }
}
