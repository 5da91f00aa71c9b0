//! Synthetic media segment format
//!
//! Each segment is `SYN0`, the covered duration in milliseconds (u32 BE),
//! the payload length (u32 BE), then the payload. A recording is a plain
//! concatenation of segments, so chunk boundaries never matter.

const MAGIC: &[u8; 4] = b"SYN0";
const HEADER_LEN: usize = 12;

/// Encode one segment
pub fn encode_segment(duration_ms: u32, payload: &[u8]) -> Vec<u8> {
    let len = u32::try_from(payload.len()).unwrap_or(u32::MAX);
    let mut out = Vec::with_capacity(HEADER_LEN + payload.len());
    out.extend_from_slice(MAGIC);
    out.extend_from_slice(&duration_ms.to_be_bytes());
    out.extend_from_slice(&len.to_be_bytes());
    out.extend_from_slice(&payload[..len as usize]);
    out
}

/// Total duration covered by the segments in `data`, in seconds.
///
/// Returns `None` if `data` does not start with a well-formed segment.
/// Trailing garbage after the last complete segment is ignored.
pub fn scan_duration(data: &[u8]) -> Option<f64> {
    let mut rest = data;
    let mut total_ms: u64 = 0;
    let mut segments = 0usize;

    while rest.len() >= HEADER_LEN && rest.starts_with(MAGIC) {
        let duration = u32::from_be_bytes([rest[4], rest[5], rest[6], rest[7]]);
        let len = u32::from_be_bytes([rest[8], rest[9], rest[10], rest[11]]) as usize;
        let Some(next) = rest.get(HEADER_LEN + len..) else {
            break;
        };
        total_ms += u64::from(duration);
        segments += 1;
        rest = next;
    }

    (segments > 0).then(|| total_ms as f64 / 1000.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn concatenated_segments_sum() {
        let mut data = encode_segment(1000, b"frame-1");
        data.extend(encode_segment(1000, b"frame-2"));
        data.extend(encode_segment(350, b""));
        assert_eq!(scan_duration(&data), Some(2.35));
    }

    #[test]
    fn rejects_foreign_data() {
        assert_eq!(scan_duration(b""), None);
        assert_eq!(scan_duration(b"\x1a\x45\xdf\xa3 webm header"), None);
    }

    #[test]
    fn truncated_tail_is_ignored() {
        let mut data = encode_segment(500, b"abc");
        let tail = encode_segment(500, b"defgh");
        data.extend_from_slice(&tail[..tail.len() - 2]);
        assert_eq!(scan_duration(&data), Some(0.5));
    }
}
