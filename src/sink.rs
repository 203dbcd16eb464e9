use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdin, Command, ExitStatus, Stdio};

use crate::error::SelectError;

/// Where selected page bytes go.
pub trait Sink {
    fn write(&mut self, bytes: &[u8]) -> Result<(), SelectError>;

    /// Whether a form feed should be written at each page boundary
    /// when pages are counted in lines.
    fn wants_page_breaks(&self) -> bool {
        false
    }

    /// Flush and release the sink, reporting anything that went wrong on the way out.
    fn finish(self) -> Result<(), SelectError>;
}

/// Buffered sink over any writer. Standard output uses this.
pub struct WriterSink<W: Write> {
    writer: BufWriter<W>,
}

impl<W: Write> WriterSink<W> {
    pub fn new(inner: W) -> Self {
        WriterSink {
            writer: BufWriter::new(inner),
        }
    }

    /// Flush and hand back the wrapped writer.
    #[cfg(test)]
    pub fn into_inner(self) -> io::Result<W> {
        self.writer.into_inner().map_err(|e| e.into_error())
    }
}

impl<W: Write> Sink for WriterSink<W> {
    fn write(&mut self, bytes: &[u8]) -> Result<(), SelectError> {
        self.writer
            .write_all(bytes)
            .map_err(SelectError::StreamWriteFailure)
    }

    fn finish(mut self) -> Result<(), SelectError> {
        self.writer.flush().map_err(SelectError::StreamWriteFailure)
    }
}

/// Sink that pipes selected pages into the standard input of a child process.
pub struct ProcessSink {
    program: PathBuf,
    child: Child,
    stdin: Option<BufWriter<ChildStdin>>,
}

impl ProcessSink {
    /// Start `program` with a piped standard input.
    ///
    /// A bare name is looked up in the current directory, not on `PATH`.
    pub fn spawn(program: &str) -> Result<Self, SelectError> {
        let program = resolve_program(program);
        let mut child = Command::new(&program)
            .stdin(Stdio::piped())
            .spawn()
            .map_err(|source| SelectError::SinkSpawnFailure {
                program: program.clone(),
                source,
            })?;

        let stdin = child.stdin.take().map(BufWriter::new);
        tracing::debug!(program = %program.display(), pid = child.id(), "spawned destination");

        Ok(ProcessSink {
            program,
            child,
            stdin,
        })
    }

    fn wait(&mut self) -> Result<ExitStatus, SelectError> {
        self.child
            .wait()
            .map_err(|source| SelectError::SinkWaitFailure {
                program: self.program.clone(),
                source,
            })
    }
}

impl Sink for ProcessSink {
    fn write(&mut self, bytes: &[u8]) -> Result<(), SelectError> {
        let written = match self.stdin.as_mut() {
            Some(stdin) => stdin.write_all(bytes),
            None => Err(io::Error::new(
                io::ErrorKind::BrokenPipe,
                "destination input is closed",
            )),
        };
        let Err(err) = written else {
            return Ok(());
        };

        // A write usually fails because the child went away; its exit
        // status says more than the broken pipe does.
        self.stdin = None;
        let status = self.wait()?;
        if !status.success() {
            return Err(SelectError::SinkExitFailure {
                program: self.program.clone(),
                status,
            });
        }
        Err(SelectError::StreamWriteFailure(err))
    }

    fn wants_page_breaks(&self) -> bool {
        true
    }

    fn finish(mut self) -> Result<(), SelectError> {
        // Close the pipe first so the child sees end of input.
        let flushed = match self.stdin.take() {
            Some(mut stdin) => stdin.flush(),
            None => Ok(()),
        };

        let status = self.wait()?;
        if !status.success() {
            return Err(SelectError::SinkExitFailure {
                program: self.program.clone(),
                status,
            });
        }
        flushed.map_err(SelectError::StreamWriteFailure)
    }
}

impl Drop for ProcessSink {
    fn drop(&mut self) {
        // Only reached with the pipe still open on an error path; let the
        // child see end of input and reap it.
        if self.stdin.take().is_some() {
            if let Err(err) = self.child.wait() {
                tracing::warn!(error = %err, "failed to reap destination process");
            }
        }
    }
}

fn resolve_program(program: &str) -> PathBuf {
    let path = Path::new(program);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        Path::new(".").join(path)
    }
}
