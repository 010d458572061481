//! Versioned length framing for replication messages.
//!
//! Format (little-endian):
//! - u8 `FRAME_VERSION` (1)
//! - u32 LEN (bytes of payload)
//! - [u8; LEN] payload
//!
//! Snapshots, commands and events are all small; the cap is sized for a full
//! world snapshot with generous headroom.

const FRAME_VERSION: u8 = 1;
const MAX_FRAME_LEN: usize = 65_536;

/// Write a framed message into `out`, appending to any existing bytes.
pub fn write_msg(out: &mut Vec<u8>, payload: &[u8]) {
    out.push(FRAME_VERSION);
    let len = u32::try_from(payload.len()).unwrap_or(0);
    out.extend_from_slice(&len.to_le_bytes());
    out.extend_from_slice(payload);
}

/// Read one framed message from the front of `inp`, advancing it past the
/// frame. The returned slice borrows from the original buffer.
pub fn read_msg<'a>(inp: &mut &'a [u8]) -> anyhow::Result<&'a [u8]> {
    use anyhow::bail;
    if inp.len() < 5 {
        bail!("short frame header");
    }
    let ver = inp[0];
    if ver != FRAME_VERSION {
        bail!("unsupported frame version: {ver}");
    }
    let mut lenb = [0u8; 4];
    lenb.copy_from_slice(&inp[1..5]);
    let len = u32::from_le_bytes(lenb) as usize;
    if len > MAX_FRAME_LEN {
        bail!("frame too large: {len} > {MAX_FRAME_LEN}");
    }
    if inp.len() < 5 + len {
        bail!("short frame payload");
    }
    let payload = &inp[5..5 + len];
    *inp = &inp[5 + len..];
    Ok(payload)
}

/// Split a buffer of back-to-back frames into payload slices.
pub fn read_all<'a>(mut inp: &'a [u8]) -> anyhow::Result<Vec<&'a [u8]>> {
    let mut out = Vec::new();
    while !inp.is_empty() {
        out.push(read_msg(&mut inp)?);
    }
    Ok(out)
}
