//! Splits an input stream into pages and copies the selected ones to a sink.
//!
//! A piece of input is always counted against the page it starts on: the
//! last line of page N (or the form feed closing page N) belongs to page N,
//! and only the byte after it belongs to page N + 1. Nothing is buffered
//! beyond the reader's own buffer, so long lines and long pages stream through.
//!
//! When pages are counted in lines and the sink wants page breaks, a form
//! feed goes out at every page boundary crossed, selected page or not.

use std::io::{self, BufRead};

use crate::error::SelectError;
use crate::page_range::{PageMode, PageRange};
use crate::sink::Sink;

const FORM_FEED: &[u8] = b"\x0C";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StreamSummary {
    /// Pages seen in the input, counting a trailing partial page.
    /// Stops at the end page when line counting lets us quit early.
    pub pages: u32,
    pub bytes_written: u64,
}

struct Cursor {
    page: u32,
    line_in_page: u32,
    page_has_bytes: bool,
}

impl Cursor {
    fn new() -> Self {
        Cursor {
            page: 1,
            line_in_page: 0,
            page_has_bytes: false,
        }
    }

    fn next_page(&mut self) {
        self.page = self.page.saturating_add(1);
        self.line_in_page = 0;
        self.page_has_bytes = false;
    }

    fn pages_seen(&self) -> u32 {
        self.page - 1 + u32::from(self.page_has_bytes)
    }
}

/// Copy the pages in `range` from `reader` to `sink`.
///
/// The sink is not finished here; the caller does that once streaming succeeds.
pub fn stream<R: BufRead, S: Sink>(
    range: &PageRange,
    mut reader: R,
    sink: &mut S,
) -> Result<StreamSummary, SelectError> {
    let delimiter = range.mode.delimiter();
    let page_breaks = matches!(range.mode, PageMode::Lines(_)) && sink.wants_page_breaks();

    let mut cursor = Cursor::new();
    let mut bytes_written = 0u64;

    loop {
        let (consumed, at_boundary) = {
            let buf = match reader.fill_buf() {
                Ok([]) => break,
                Ok(buf) => buf,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(SelectError::StreamReadFailure(e)),
            };

            let (len, at_boundary) = match memchr::memchr(delimiter, buf) {
                Some(i) => (i + 1, true),
                None => (buf.len(), false),
            };

            cursor.page_has_bytes = true;
            if range.contains(cursor.page) {
                sink.write(&buf[..len])?;
                bytes_written += len as u64;
            }
            (len, at_boundary)
        };
        reader.consume(consumed);

        if !at_boundary {
            continue;
        }

        match range.mode {
            PageMode::FormFeed => cursor.next_page(),
            PageMode::Lines(page_len) => {
                cursor.line_in_page += 1;
                if cursor.line_in_page < page_len {
                    continue;
                }

                if page_breaks {
                    sink.write(FORM_FEED)?;
                    bytes_written += FORM_FEED.len() as u64;
                }
                cursor.next_page();

                if cursor.page > range.end {
                    tracing::debug!(end = range.end, "end page reached, not reading further");
                    break;
                }
            }
        }
    }

    let summary = StreamSummary {
        pages: cursor.pages_seen(),
        bytes_written,
    };
    tracing::debug!(
        pages = summary.pages,
        bytes_written = summary.bytes_written,
        "finished streaming"
    );
    Ok(summary)
}
