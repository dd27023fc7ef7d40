//! Length-prefixed message framing.
//!
//! Each message on the wire is an ASCII decimal byte count terminated by
//! a line break, followed by exactly that many payload bytes. There is no
//! type tag: protocol state decides what a payload means. Existing
//! clients depend on this exact shape.

use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt, AsyncWrite, AsyncWriteExt};

/// Upper bound on a single frame.
///
/// Not part of the wire contract; an operational guard so a hostile
/// length header cannot make the server allocate arbitrary memory.
pub const MAX_FRAME_LEN: usize = 256 * 1024 * 1024;

/// Errors while reading a frame.
#[derive(Error, Debug)]
pub enum FrameError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("invalid length header {0:?}")]
    BadHeader(String),
    #[error("frame length {0} exceeds maximum")]
    TooLarge(usize),
}

/// Writes one length-prefixed frame and flushes it.
pub async fn write_frame<W>(writer: &mut W, payload: &[u8]) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    writer.write_all(format!("{}\n", payload.len()).as_bytes()).await?;
    writer.write_all(payload).await?;
    writer.flush().await
}

/// Reads one frame.
///
/// Returns `Ok(None)` on a clean end of stream before any header byte.
/// A header that is not a decimal number, or a stream that ends inside
/// the payload, is an error.
pub async fn read_frame<R>(reader: &mut R) -> Result<Option<Vec<u8>>, FrameError>
where
    R: AsyncBufRead + Unpin,
{
    let mut header = String::new();
    if reader.read_line(&mut header).await? == 0 {
        return Ok(None);
    }

    let trimmed = header.trim();
    let len: usize = trimmed
        .parse()
        .map_err(|_| FrameError::BadHeader(trimmed.to_string()))?;
    if len > MAX_FRAME_LEN {
        return Err(FrameError::TooLarge(len));
    }

    let mut payload = vec![0u8; len];
    reader.read_exact(&mut payload).await?;
    Ok(Some(payload))
}
