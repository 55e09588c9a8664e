//! # Bulk Stream Driver
//!
//! Feeds an async client stream through a [`BulkSession`] and returns the
//! summary once the stream ends.
//!
//! Two input shapes are supported:
//! - a typed stream of `Result<SmsRequest, E>` (what an RPC client stream yields)
//! - a raw byte stream carrying newline-delimited JSON (`SmsRequest` per line)
//!
//! ## Message isolation
//!
//! A line that is not a valid `SmsRequest`, including one longer than the
//! per-line limit, is counted as a failure and the stream continues. Oversized
//! lines are skipped up to their newline without being buffered, so memory per
//! stream stays bounded by the limit.
//!
//! ## Abnormal termination
//!
//! When the stream itself fails the driver records the error, closes the
//! session and returns the partial summary inside the error, so accounting for
//! messages already processed is never lost.

use crate::domain::bulk::BulkSession;
use crate::domain::entities::BulkSummary;
use crate::domain::errors::BulkSessionError;
use crate::ports::inbound::SmsVerificationApi;
use futures::{Stream, StreamExt};
use shared_types::SmsRequest;
use std::fmt;
use std::mem;
use std::pin::pin;
use thiserror::Error;

/// Default cap on a single NDJSON line (1 MiB).
pub const DEFAULT_MAX_LINE_BYTES: usize = 1024 * 1024;

/// Why a bulk stream did not complete normally.
#[derive(Debug, Error)]
pub enum BulkStreamError {
    #[error("bulk stream aborted after {} messages: {reason}", partial.total_processed())]
    Aborted { partial: BulkSummary, reason: String },

    #[error(transparent)]
    Session(#[from] BulkSessionError),
}

impl BulkStreamError {
    /// The summary of everything processed before the stream ended.
    pub fn partial(&self) -> Option<&BulkSummary> {
        match self {
            Self::Aborted { partial, .. } => Some(partial),
            Self::Session(_) => None,
        }
    }
}

/// Verify every request of a typed client stream.
pub async fn verify_request_stream<S, St, E>(
    service: &S,
    requests: St,
) -> Result<BulkSummary, BulkStreamError>
where
    S: SmsVerificationApi + ?Sized,
    St: Stream<Item = Result<SmsRequest, E>>,
    E: fmt::Display,
{
    let mut requests = pin!(requests);
    let mut session = BulkSession::new(service);

    while let Some(item) = requests.next().await {
        match item {
            Ok(request) => {
                session.on_message(&request)?;
            }
            Err(e) => return Err(abort(&mut session, &e)),
        }
    }

    Ok(session.on_complete()?)
}

/// Verify a newline-delimited JSON byte stream.
///
/// Chunk boundaries are arbitrary. Blank lines are skipped, a final line
/// without a trailing newline is still processed, and a line that is not a
/// valid `SmsRequest` or exceeds `max_line_bytes` counts as one failure.
pub async fn verify_ndjson_stream<S, St, B, E>(
    service: &S,
    chunks: St,
    max_line_bytes: usize,
) -> Result<BulkSummary, BulkStreamError>
where
    S: SmsVerificationApi + ?Sized,
    St: Stream<Item = Result<B, E>>,
    B: AsRef<[u8]>,
    E: fmt::Display,
{
    let mut chunks = pin!(chunks);
    let mut session = BulkSession::new(service);
    let mut framer = LineFramer::new(max_line_bytes);

    while let Some(chunk) = chunks.next().await {
        let chunk = match chunk {
            Ok(chunk) => chunk,
            Err(e) => return Err(abort(&mut session, &e)),
        };
        framer.push(chunk.as_ref(), |frame| {
            process_frame(&mut session, frame, max_line_bytes)
        })?;
    }

    if let Some(frame) = framer.finish() {
        process_frame(&mut session, frame, max_line_bytes)?;
    }
    Ok(session.on_complete()?)
}

fn process_frame<S>(
    session: &mut BulkSession<'_, S>,
    frame: Frame,
    max_line_bytes: usize,
) -> Result<(), BulkSessionError>
where
    S: SmsVerificationApi + ?Sized,
{
    let line = match frame {
        Frame::Line(line) => line,
        Frame::Oversized(size) => {
            return session.on_undecodable(format_args!(
                "line of {size} bytes exceeds the {max_line_bytes} byte limit"
            ));
        }
    };

    let line = line.trim_ascii();
    if line.is_empty() {
        return Ok(());
    }

    match serde_json::from_slice::<SmsRequest>(line) {
        Ok(request) => session.on_message(&request).map(|_| ()),
        Err(e) => session.on_undecodable(e),
    }
}

fn abort<S>(session: &mut BulkSession<'_, S>, err: &dyn fmt::Display) -> BulkStreamError
where
    S: SmsVerificationApi + ?Sized,
{
    session.on_upstream_error(err);
    match session.on_complete() {
        Ok(partial) => BulkStreamError::Aborted {
            partial,
            reason: err.to_string(),
        },
        Err(e) => e.into(),
    }
}

/// One `\n`-terminated unit of the byte stream.
#[derive(Debug, PartialEq, Eq)]
enum Frame {
    /// A line within the limit, without its terminator.
    Line(Vec<u8>),
    /// A line over the limit; only its length was kept.
    Oversized(usize),
}

/// Splits a byte stream into `\n`-terminated lines.
///
/// Every pushed byte is searched once and copied at most once, whatever the
/// chunk sizes. Bytes of a line past the limit are counted, not stored.
struct LineFramer {
    line: Vec<u8>,
    line_len: usize,
    max_line_bytes: usize,
}

impl LineFramer {
    fn new(max_line_bytes: usize) -> Self {
        Self {
            line: Vec::new(),
            line_len: 0,
            max_line_bytes,
        }
    }

    /// Feed one chunk, handing every line it completes to `on_frame`.
    fn push<E>(
        &mut self,
        mut bytes: &[u8],
        mut on_frame: impl FnMut(Frame) -> Result<(), E>,
    ) -> Result<(), E> {
        while let Some(pos) = memchr::memchr(b'\n', bytes) {
            self.append(&bytes[..pos]);
            on_frame(self.take())?;
            bytes = &bytes[pos + 1..];
        }
        self.append(bytes);
        Ok(())
    }

    /// The unterminated last line, if any bytes are left.
    fn finish(&mut self) -> Option<Frame> {
        (self.line_len > 0).then(|| self.take())
    }

    fn append(&mut self, bytes: &[u8]) {
        self.line_len += bytes.len();
        if self.line_len > self.max_line_bytes {
            self.line.clear();
        } else {
            self.line.extend_from_slice(bytes);
        }
    }

    fn take(&mut self) -> Frame {
        let len = mem::take(&mut self.line_len);
        if len > self.max_line_bytes {
            self.line.clear();
            Frame::Oversized(len)
        } else {
            Frame::Line(mem::take(&mut self.line))
        }
    }
}
