//! IEEE-488.2 definite-length block (TMC) header decoding.
//!
//! Binary transfers from the instrument are framed as
//! `#<n><len digits><payload>\n`: a `#`, one digit giving the number of
//! length digits that follow, the payload length in ASCII, the payload
//! itself, and a trailing newline.

use super::InstrumentError;

/// Bytes occupied by the block header (`#`, digit-count digit, length digits).
pub fn header_len(buffer: &[u8]) -> Result<usize, InstrumentError> {
    if buffer.len() < 2 {
        return Err(InstrumentError::BadBlockHeader(
            "buffer shorter than a block header".into(),
        ));
    }
    if buffer[0] != b'#' {
        return Err(InstrumentError::BadBlockHeader(format!(
            "expected '#', found 0x{:02x}",
            buffer[0]
        )));
    }
    let digits = (buffer[1] as char)
        .to_digit(10)
        .ok_or_else(|| InstrumentError::BadBlockHeader("digit count is not a digit".into()))?;
    Ok(2 + digits as usize)
}

/// Payload length announced by the block header.
pub fn payload_len(buffer: &[u8]) -> Result<usize, InstrumentError> {
    let header = header_len(buffer)?;
    if buffer.len() < header {
        return Err(InstrumentError::BadBlockHeader(
            "buffer truncated inside the length field".into(),
        ));
    }
    let field = std::str::from_utf8(&buffer[2..header])
        .map_err(|_| InstrumentError::BadBlockHeader("length field is not ASCII".into()))?;
    field
        .parse::<usize>()
        .map_err(|_| InstrumentError::BadBlockHeader(format!("bad length field '{field}'")))
}

/// Total transfer size: header, payload, and the trailing newline.
pub fn total_len(buffer: &[u8]) -> Result<usize, InstrumentError> {
    Ok(header_len(buffer)? + payload_len(buffer)? + 1)
}

/// Strip the header and terminator, returning only the payload bytes.
pub fn payload(buffer: &[u8]) -> Result<&[u8], InstrumentError> {
    let header = header_len(buffer)?;
    let length = payload_len(buffer)?;
    let end = header + length;
    if buffer.len() < end {
        return Err(InstrumentError::ShortTransfer { got: buffer.len(), expected: end + 1 });
    }
    Ok(&buffer[header..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_len_counts_length_digits() {
        assert_eq!(header_len(b"#9000017152").unwrap(), 11);
        assert_eq!(header_len(b"#15hello\n").unwrap(), 3);
    }

    #[test]
    fn test_payload_len_parses_the_length_field() {
        assert_eq!(payload_len(b"#9000017152").unwrap(), 17_152);
        assert_eq!(payload_len(b"#15hello\n").unwrap(), 5);
    }

    #[test]
    fn test_total_len_includes_header_and_terminator() {
        // 3-byte header + 5 payload bytes + newline.
        assert_eq!(total_len(b"#15hello\n").unwrap(), 9);
    }

    #[test]
    fn test_payload_strips_framing() {
        assert_eq!(payload(b"#15hello\n").unwrap(), b"hello");
    }

    #[test]
    fn test_payload_with_binary_newlines() {
        // Newlines inside the payload are data, not terminators.
        let block = b"#18ab\ncd\ne\n\n";
        assert_eq!(payload(block).unwrap(), b"ab\ncd\ne\n");
    }

    #[test]
    fn test_missing_hash_is_rejected() {
        assert!(matches!(
            header_len(b"9000017152"),
            Err(InstrumentError::BadBlockHeader(_))
        ));
    }

    #[test]
    fn test_non_digit_count_is_rejected() {
        assert!(matches!(
            header_len(b"#x123"),
            Err(InstrumentError::BadBlockHeader(_))
        ));
    }

    #[test]
    fn test_truncated_payload_is_a_short_transfer() {
        assert!(matches!(
            payload(b"#15hel"),
            Err(InstrumentError::ShortTransfer { got: 6, expected: 9 })
        ));
    }
}
