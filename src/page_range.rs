use crate::error::SelectError;

/// Largest page number (and page length) accepted on the command line.
pub const MAX_PAGE_NUMBER: u32 = i32::MAX as u32;

pub const DEFAULT_PAGE_LEN: u32 = 72;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageMode {
    /// Pages of a fixed number of newline-terminated lines
    Lines(u32),
    /// Pages delimited by form feeds already present in the input
    FormFeed,
}

impl PageMode {
    /// The byte that ends one chunk of input in this mode.
    pub fn delimiter(self) -> u8 {
        match self {
            PageMode::Lines(_) => b'\n',
            PageMode::FormFeed => b'\x0C',
        }
    }
}

/// Range arguments as they come off the command line, before validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeArgs {
    pub start: Option<i64>,
    pub end: Option<i64>,
    pub page_len: i64,
    pub form_feed: bool,
}

/// A validated, inclusive range of 1-based pages plus the way pages are delimited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRange {
    pub start: u32,
    pub end: u32,
    pub mode: PageMode,
}

impl PageRange {
    /// Check raw range arguments, stopping at the first rule they break.
    pub fn validate(args: &RangeArgs) -> Result<Self, SelectError> {
        let (start, end) = match (args.start, args.end) {
            (Some(start), Some(end)) => (start, end),
            _ => return Err(SelectError::MissingRangeArgument),
        };

        let start = page_number(start).ok_or(SelectError::InvalidStartPage(start))?;

        let end = match page_number(end) {
            Some(n) if n >= start => n,
            _ => return Err(SelectError::InvalidEndPage { start, end }),
        };

        let mode = if args.form_feed {
            if args.page_len != i64::from(DEFAULT_PAGE_LEN) {
                tracing::warn!(
                    page_len = args.page_len,
                    "page length is ignored for form-feed delimited pages"
                );
            }
            PageMode::FormFeed
        } else {
            let len = page_number(args.page_len)
                .ok_or(SelectError::InvalidPageLength(args.page_len))?;
            PageMode::Lines(len)
        };

        Ok(PageRange { start, end, mode })
    }

    pub fn contains(&self, page: u32) -> bool {
        (self.start..=self.end).contains(&page)
    }

    /// Make sure the input actually had the pages that were asked for.
    ///
    /// Runs after streaming, so whatever was already written stays written.
    pub fn check_page_count(&self, total: u32) -> Result<(), SelectError> {
        if total < self.start {
            return Err(SelectError::StartPageExceedsInput {
                start: self.start,
                total,
            });
        }
        if total < self.end {
            return Err(SelectError::EndPageExceedsInput {
                end: self.end,
                total,
            });
        }
        Ok(())
    }
}

fn page_number(n: i64) -> Option<u32> {
    u32::try_from(n)
        .ok()
        .filter(|n| (1..=MAX_PAGE_NUMBER).contains(n))
}
