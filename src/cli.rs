use clap::Parser;
use std::path::PathBuf;

use crate::page_range::{RangeArgs, DEFAULT_PAGE_LEN};

#[derive(Parser, Debug)]
#[command(name = "selpg")]
#[command(about = "Select a range of pages from a text file or standard input")]
#[command(version)]
pub struct Cli {
    /// First page to print
    #[arg(
        short = 's',
        long = "startPage",
        alias = "start-page",
        allow_negative_numbers = true
    )]
    pub start_page: Option<i64>,

    /// Last page to print
    #[arg(
        short = 'e',
        long = "endPage",
        alias = "end-page",
        allow_negative_numbers = true
    )]
    pub end_page: Option<i64>,

    /// Lines per page (ignored with -f)
    #[arg(
        short = 'l',
        long = "pageLen",
        alias = "page-len",
        default_value_t = i64::from(DEFAULT_PAGE_LEN),
        allow_negative_numbers = true
    )]
    pub page_len: i64,

    /// Pages are delimited by form feeds instead of a fixed line count
    #[arg(short = 'f', long = "pageType", alias = "form-feed")]
    pub form_feed: bool,

    /// Program in the current directory to pipe the selected pages into
    #[arg(short = 'd', long = "outDestination", alias = "out-destination", default_value = "")]
    pub out_destination: String,

    /// Input file (reads standard input if omitted)
    pub input: Option<PathBuf>,
}

impl Cli {
    pub fn range_args(&self) -> RangeArgs {
        RangeArgs {
            start: self.start_page,
            end: self.end_page,
            page_len: self.page_len,
            form_feed: self.form_feed,
        }
    }

    pub fn destination(&self) -> Option<&str> {
        Some(self.out_destination.as_str()).filter(|d| !d.is_empty())
    }
}
