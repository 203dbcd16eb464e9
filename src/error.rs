use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SelectError {
    #[error("both --startPage and --endPage must be given (e.g. selpg -s1 -e3 [file])")]
    MissingRangeArgument,

    #[error("invalid start page {0}: must be between 1 and {max}", max = crate::page_range::MAX_PAGE_NUMBER)]
    InvalidStartPage(i64),

    #[error("invalid end page {end}: must be between {start} and {max}", max = crate::page_range::MAX_PAGE_NUMBER)]
    InvalidEndPage { start: u32, end: i64 },

    #[error("invalid page length {0}: must be between 1 and {max}", max = crate::page_range::MAX_PAGE_NUMBER)]
    InvalidPageLength(i64),

    #[error("failed to open input file {}", .path.display())]
    InputOpenFailure {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read input")]
    StreamReadFailure(#[source] io::Error),

    #[error("failed to write output")]
    StreamWriteFailure(#[source] io::Error),

    #[error("failed to start destination `{}`", .program.display())]
    SinkSpawnFailure {
        program: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to wait for destination `{}`", .program.display())]
    SinkWaitFailure {
        program: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("destination `{}` failed: {status}", .program.display())]
    SinkExitFailure { program: PathBuf, status: ExitStatus },

    #[error("start page {start} is beyond the end of the input ({total} page(s))")]
    StartPageExceedsInput { start: u32, total: u32 },

    #[error("end page {end} is beyond the end of the input ({total} page(s))")]
    EndPageExceedsInput { end: u32, total: u32 },
}
