//! Length-prefixed JSON framing.
//!
//! Every protocol message travels as a 4-byte big-endian length followed
//! by a JSON body. The length is validated against [`MAX_FRAME_LEN`]
//! before any allocation so a hostile peer cannot request an arbitrarily
//! large buffer.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::error::{WireError, WireResult};

/// Maximum size of a single frame body in bytes.
pub const MAX_FRAME_LEN: usize = 1024 * 1024;

/// Write one message as a length-prefixed JSON frame.
pub async fn write_frame<W, T>(writer: &mut W, message: &T) -> WireResult<()>
where
    W: AsyncWrite + Unpin,
    T: Serialize,
{
    let body = serde_json::to_vec(message)?;
    if body.len() > MAX_FRAME_LEN {
        return Err(WireError::FrameTooLarge {
            len: body.len(),
            max: MAX_FRAME_LEN,
        });
    }

    writer.write_all(&(body.len() as u32).to_be_bytes()).await?;
    writer.write_all(&body).await?;
    writer.flush().await?;
    Ok(())
}

/// Read one length-prefixed JSON frame and decode it.
///
/// A clean EOF before the length prefix is reported as
/// [`WireError::ConnectionClosed`]; EOF in the middle of a frame is an
/// I/O error, since the peer abandoned a message half-way.
pub async fn read_frame<R, T>(reader: &mut R) -> WireResult<T>
where
    R: AsyncRead + Unpin,
    T: DeserializeOwned,
{
    let mut len_buf = [0u8; 4];
    if let Err(err) = reader.read_exact(&mut len_buf).await {
        if err.kind() == std::io::ErrorKind::UnexpectedEof {
            return Err(WireError::ConnectionClosed);
        }
        return Err(WireError::Io(err));
    }

    let len = u32::from_be_bytes(len_buf) as usize;
    if len > MAX_FRAME_LEN {
        return Err(WireError::FrameTooLarge {
            len,
            max: MAX_FRAME_LEN,
        });
    }

    let mut body = vec![0u8; len];
    reader.read_exact(&mut body).await?;
    Ok(serde_json::from_slice(&body)?)
}
