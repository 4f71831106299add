//! i3 IPC framing.
//!
//! # Wire format
//!
//! Every message, in both directions, is
//!
//! ```text
//! "i3-ipc" <payload length: u32> <message type: u32> <payload>
//! ```
//!
//! with both integers in native byte order.  Replies carry the type of the
//! request they answer; events have the high bit of the type set.

use super::I3Error;
use std::io::{Read, Write};

pub const MAGIC: &[u8; 6] = b"i3-ipc";

pub const RUN_COMMAND: u32 = 0;
pub const SUBSCRIBE: u32 = 2;
pub const GET_TREE: u32 = 4;

/// High bit marking an event frame.
pub const EVENT_BIT: u32 = 1 << 31;
pub const EVENT_WORKSPACE: u32 = EVENT_BIT;
pub const EVENT_WINDOW: u32 = EVENT_BIT | 3;

/// Write one framed message.
pub fn write_message<W: Write>(w: &mut W, kind: u32, payload: &[u8]) -> Result<(), I3Error> {
    let len = u32::try_from(payload.len())
        .map_err(|_| I3Error::Protocol(format!("payload too large: {} bytes", payload.len())))?;
    let mut frame = Vec::with_capacity(MAGIC.len() + 8 + payload.len());
    frame.extend_from_slice(MAGIC);
    frame.extend_from_slice(&len.to_ne_bytes());
    frame.extend_from_slice(&kind.to_ne_bytes());
    frame.extend_from_slice(payload);
    w.write_all(&frame)?;
    w.flush()?;
    Ok(())
}

/// Read one framed message, returning its type and payload.
pub fn read_message<R: Read>(r: &mut R) -> Result<(u32, Vec<u8>), I3Error> {
    let mut header = [0u8; 14];
    r.read_exact(&mut header)?;
    if &header[..6] != MAGIC {
        return Err(I3Error::Protocol(format!(
            "bad magic {:?}",
            String::from_utf8_lossy(&header[..6])
        )));
    }
    let len = u32::from_ne_bytes([header[6], header[7], header[8], header[9]]);
    let kind = u32::from_ne_bytes([header[10], header[11], header[12], header[13]]);

    let mut payload = vec![0u8; len as usize];
    r.read_exact(&mut payload)?;
    Ok((kind, payload))
}

/// Whether `kind` denotes an event rather than a reply.
pub fn is_event(kind: u32) -> bool {
    kind & EVENT_BIT != 0
}

//  Tests
