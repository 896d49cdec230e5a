//! Server-Sent Events framing.
//!
//! ```text
//! event: <kind>\n
//! data: <compact json>\n
//! \n
//! ```

use crate::{HubError, HubEvent, Result as HubResult};

use std::panic::Location;

use bytes::{BufMut, Bytes, BytesMut};
use error_location::ErrorLocation;

const EVENT_PREFIX: &[u8] = b"event: ";
const DATA_PREFIX: &[u8] = b"data: ";

/// Serialise one event into a complete frame
#[track_caller]
pub fn encode(event: &HubEvent) -> HubResult<Bytes> {
    // Compact JSON escapes control characters, so the data line is a single line.
    let data = serde_json::to_vec(event.payload()).map_err(|e| HubError::PayloadEncode {
        source: e,
        location: ErrorLocation::from(Location::caller()),
    })?;
    let kind = event.kind().as_str().as_bytes();

    let mut frame =
        BytesMut::with_capacity(EVENT_PREFIX.len() + kind.len() + DATA_PREFIX.len() + data.len() + 3);
    frame.put_slice(EVENT_PREFIX);
    frame.put_slice(kind);
    frame.put_u8(b'\n');
    frame.put_slice(DATA_PREFIX);
    frame.put_slice(&data);
    frame.put_slice(b"\n\n");

    Ok(frame.freeze())
}
