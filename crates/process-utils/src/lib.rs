//! Small process-related helpers shared across the workspace.

use std::borrow::Cow;
use std::ffi::OsStr;
use std::io;
use std::process::{ExitStatus, Stdio};

use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;
use tokio::sync::mpsc;

#[cfg(windows)]
const CREATE_NO_WINDOW: u32 = 0x0800_0000;

const READ_CHUNK_SIZE: usize = 8 * 1024;

/// Apply the Windows `CREATE_NO_WINDOW` flag to child processes.
///
/// On non-Windows targets this is a no-op.
pub trait NoWindowExt {
    fn no_window(&mut self);
}

impl NoWindowExt for Command {
    fn no_window(&mut self) {
        #[cfg(windows)]
        {
            use std::os::windows::process::CommandExt;
            self.as_std_mut().creation_flags(CREATE_NO_WINDOW);
        }
    }
}

/// Create a `tokio::process::Command` with `CREATE_NO_WINDOW` applied on Windows.
pub fn tokio_command(program: impl AsRef<OsStr>) -> Command {
    let mut cmd = Command::new(program);
    cmd.no_window();
    cmd
}

/// Exit status and captured output of a finished child process.
#[derive(Debug)]
pub struct CombinedOutput {
    pub status: ExitStatus,
    /// Stdout and stderr bytes, interleaved in arrival order.
    pub output: Vec<u8>,
    /// First error hit while reading the pipes. `output` is partial when set.
    pub read_error: Option<io::Error>,
}

impl CombinedOutput {
    /// Captured output decoded as UTF-8, replacing invalid sequences.
    pub fn output_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.output)
    }
}

/// Spawn `cmd` and wait for it to exit, collecting stdout and stderr into one buffer.
///
/// Both pipes are drained concurrently so neither can fill up and stall the child.
/// Chunks are appended in the order they are read, which only approximates the
/// order the child wrote them in.
pub async fn combined_output(cmd: &mut Command) -> io::Result<CombinedOutput> {
    cmd.stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    let mut child = cmd.spawn()?;

    let (tx, mut rx) = mpsc::unbounded_channel();
    let readers = [
        child
            .stdout
            .take()
            .map(|stdout| tokio::spawn(forward_chunks(stdout, tx.clone()))),
        child
            .stderr
            .take()
            .map(|stderr| tokio::spawn(forward_chunks(stderr, tx.clone()))),
    ];
    drop(tx);

    let mut output = Vec::new();
    while let Some(chunk) = rx.recv().await {
        output.extend_from_slice(&chunk);
    }

    let status = child.wait().await?;

    let mut read_error = None;
    for reader in readers.into_iter().flatten() {
        if let Err(e) = reader.await.map_err(io::Error::other).and_then(|r| r)
            && read_error.is_none()
        {
            read_error = Some(e);
        }
    }

    Ok(CombinedOutput {
        status,
        output,
        read_error,
    })
}

async fn forward_chunks<R>(mut reader: R, tx: mpsc::UnboundedSender<Vec<u8>>) -> io::Result<()>
where
    R: AsyncRead + Unpin,
{
    let mut buf = vec![0u8; READ_CHUNK_SIZE];
    loop {
        let n = reader.read(&mut buf).await?;
        if n == 0 || tx.send(buf[..n].to_vec()).is_err() {
            return Ok(());
        }
    }
}
