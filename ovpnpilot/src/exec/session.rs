//! Interactive automation session: the expect-style core.
//!
//! [`drive`] spawns a child process, fans its stdout and stderr into one
//! delivery channel via two reader tasks, and runs a single consumer loop
//! that accumulates output per channel, detects prompt lines (trimmed
//! accumulator ending in `:`), and writes scripted responses to the
//! child's stdin. The whole session is bounded by one deadline.
//!
//! The colon heuristic is deliberately simple: the CLI tools being driven
//! terminate every real prompt with a colon and then block on stdin. It is
//! fragile to cosmetic prompt-text changes but robust to output chunking,
//! because matching runs on the whole accumulator rather than a single
//! chunk. Prompts whose surrounding context is interleaved across both
//! channels are not recognized; that is an accepted limitation.

use std::process::Stdio;

use log::{debug, info, trace, warn};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt};
use tokio::process::{Child, ChildStdin, Command};
use tokio::sync::mpsc;
use tokio::time;

use super::buffer::PromptBuffer;
use super::OutputChannel;
use crate::command::CommandInvocation;
use crate::error::ExecError;
use crate::script::PromptResponder;

const READ_CHUNK: usize = 4096;

/// Events flowing from the reader tasks to the consumer loop.
enum ReaderEvent {
    Chunk {
        channel: OutputChannel,
        data: Vec<u8>,
    },
    Eof(OutputChannel),
    Failed {
        channel: OutputChannel,
        source: std::io::Error,
    },
}

/// Drive one interactive session to completion.
///
/// Success means both output streams reached end-of-stream and the child
/// exited with status zero, whether or not any prompts were answered along
/// the way. The first terminal failure wins: a read or stdin-write error,
/// the session deadline, or a non-zero exit (which carries the captured
/// output). Sessions are not resumable; retries are the caller's business
/// and must start a fresh session.
pub async fn drive<R>(
    invocation: &CommandInvocation,
    responder: &R,
) -> Result<(), ExecError>
where
    R: PromptResponder + ?Sized,
{
    info!("driving interactive command: {invocation}");

    let mut child = Command::new(&invocation.program)
        .args(&invocation.args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|source| ExecError::Spawn {
            program: invocation.program.clone(),
            source,
        })?;

    let stdin = take_pipe(&mut child, |c| c.stdin.take(), invocation)?;
    let stdout = take_pipe(&mut child, |c| c.stdout.take(), invocation)?;
    let stderr = take_pipe(&mut child, |c| c.stderr.take(), invocation)?;

    // One ordered delivery point for both channels. Chunks keep their
    // per-channel order; no ordering is guaranteed across channels.
    let (tx, mut rx) = mpsc::channel::<ReaderEvent>(32);
    spawn_reader(OutputChannel::Stdout, stdout, tx.clone());
    spawn_reader(OutputChannel::Stderr, stderr, tx);

    let deadline = time::Instant::now() + invocation.timeout;
    let mut session = Session {
        stdin,
        primary: PromptBuffer::new(),
        secondary: PromptBuffer::new(),
        transcript: Vec::new(),
        responder,
    };

    let mut open_channels = 2u8;
    loop {
        let event = tokio::select! {
            _ = time::sleep_until(deadline) => {
                warn!("session deadline elapsed after {:?}", invocation.timeout);
                // Best effort; kill_on_drop backs this up.
                let _ = child.start_kill();
                return Err(ExecError::Timeout(invocation.timeout));
            }
            event = rx.recv() => match event {
                Some(event) => event,
                None => break,
            },
        };

        match event {
            ReaderEvent::Chunk { channel, data } => {
                session.handle_chunk(channel, &data).await?;
            }
            ReaderEvent::Eof(channel) => {
                trace!("{channel} reached end of stream");
                open_channels -= 1;
                if open_channels == 0 {
                    break;
                }
            }
            ReaderEvent::Failed { channel, source } => {
                let _ = child.start_kill();
                return Err(ExecError::Read { channel, source });
            }
        }
    }

    // Both pipes are closed; the child is exiting. The session deadline
    // still applies to the wait itself.
    let status = time::timeout_at(deadline, child.wait())
        .await
        .map_err(|_| ExecError::Timeout(invocation.timeout))?
        .map_err(ExecError::Wait)?;

    if status.success() {
        debug!("interactive command {} completed", invocation.program);
        Ok(())
    } else {
        Err(ExecError::NonZeroExit {
            status: status.code(),
            output: String::from_utf8_lossy(&session.transcript).into_owned(),
        })
    }
}

fn take_pipe<T>(
    child: &mut Child,
    take: impl FnOnce(&mut Child) -> Option<T>,
    invocation: &CommandInvocation,
) -> Result<T, ExecError> {
    take(child).ok_or_else(|| ExecError::Spawn {
        program: invocation.program.clone(),
        source: std::io::Error::other("child pipe was not captured"),
    })
}

/// Spawn one reader task for an output channel.
///
/// The task reads fixed-size chunks until end-of-stream or a read error.
/// A failed send means the consumer has torn the session down; the chunk
/// is discarded and the task exits without blocking or panicking.
fn spawn_reader<S>(channel: OutputChannel, mut stream: S, tx: mpsc::Sender<ReaderEvent>)
where
    S: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut buf = [0u8; READ_CHUNK];
        loop {
            match stream.read(&mut buf).await {
                Ok(0) => {
                    let _ = tx.send(ReaderEvent::Eof(channel)).await;
                    break;
                }
                Ok(n) => {
                    if tx
                        .send(ReaderEvent::Chunk {
                            channel,
                            data: buf[..n].to_vec(),
                        })
                        .await
                        .is_err()
                    {
                        trace!("{channel} reader: session closed, dropping chunk");
                        break;
                    }
                }
                Err(source) => {
                    let _ = tx.send(ReaderEvent::Failed { channel, source }).await;
                    break;
                }
            }
        }
    });
}

/// Live execution state for one session.
///
/// The accumulators and stdin are owned exclusively by the consumer loop;
/// readers only produce chunks, so stdin has a single writer and needs no
/// locking.
struct Session<'a, R: ?Sized> {
    stdin: ChildStdin,
    primary: PromptBuffer,
    secondary: PromptBuffer,
    transcript: Vec<u8>,
    responder: &'a R,
}

impl<R: PromptResponder + ?Sized> Session<'_, R> {
    async fn handle_chunk(
        &mut self,
        channel: OutputChannel,
        data: &[u8],
    ) -> Result<(), ExecError> {
        echo(channel, data);
        self.transcript.extend_from_slice(data);

        let buffer = match channel {
            OutputChannel::Stdout => &mut self.primary,
            OutputChannel::Stderr => &mut self.secondary,
        };
        buffer.extend(data);

        let Some(line) = buffer.prompt_candidate() else {
            return Ok(());
        };
        let Some(reply) = self.responder.respond(channel, &line) else {
            // The colon may be mid-sentence; keep accumulating.
            return Ok(());
        };
        if reply.is_empty() {
            return Ok(());
        }

        // The reply itself is never logged; it may be a passphrase.
        debug!("answering {channel} prompt: {line:?}");

        // Clear before writing so the same trailing colon cannot
        // re-trigger without new output.
        buffer.clear();
        self.stdin
            .write_all(reply.as_bytes())
            .await
            .map_err(ExecError::Write)?;
        self.stdin.flush().await.map_err(ExecError::Write)?;
        Ok(())
    }
}

/// Pass a chunk through to the matching display stream, best-effort.
fn echo(channel: OutputChannel, data: &[u8]) {
    use std::io::Write;
    let _ = match channel {
        OutputChannel::Stdout => std::io::stdout().write_all(data),
        OutputChannel::Stderr => std::io::stderr().write_all(data),
    };
}
