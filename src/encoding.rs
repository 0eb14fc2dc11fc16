//! Decoding of raw source bytes to UTF-8 using chardetng and `encoding_rs`.

use std::borrow::Cow;

use chardetng::EncodingDetector;
use simdutf8::basic::from_utf8;

/// Check if the data starts with a UTF-8 BOM (the byte sequence EF BB BF).
fn has_utf8_bom(data: &[u8]) -> bool {
    data.starts_with(&[0xEF, 0xBB, 0xBF])
}

/// Skip the UTF-8 BOM if present and return the remaining data.
pub fn skip_bom(data: &[u8]) -> &[u8] {
    if has_utf8_bom(data) { &data[3..] } else { data }
}

/// Decode raw source bytes into UTF-8 text.
///
/// UTF-16 BOMs are handled explicitly (chardetng is unreliable on them),
/// valid UTF-8 is passed through zero-copy after BOM stripping, and
/// anything else goes through chardetng detection plus `encoding_rs`
/// transcoding. Undecodable byte sequences become replacement characters
/// rather than failing the load.
pub fn decode_to_utf8(data: &[u8]) -> Cow<'_, str> {
    if data.len() >= 2 {
        // UTF-16 LE BOM: FF FE
        if data[0] == 0xFF && data[1] == 0xFE {
            let (decoded, _, _) = encoding_rs::UTF_16LE.decode(data);
            return Cow::Owned(decoded.into_owned());
        }
        // UTF-16 BE BOM: FE FF
        if data[0] == 0xFE && data[1] == 0xFF {
            let (decoded, _, _) = encoding_rs::UTF_16BE.decode(data);
            return Cow::Owned(decoded.into_owned());
        }
    }

    let data = skip_bom(data);

    // SIMD-accelerated fast path for the common case
    if let Ok(text) = from_utf8(data) {
        return Cow::Borrowed(text);
    }

    let mut detector = EncodingDetector::new();
    detector.feed(data, true);
    let encoding = detector.guess(None, true);

    let (decoded, _, _) = encoding.decode(data);
    Cow::Owned(decoded.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_utf8_is_borrowed() {
        let decoded = decode_to_utf8(b"name,price\nwidget,9.99\n");
        assert!(matches!(decoded, Cow::Borrowed(_)));
        assert_eq!(&*decoded, "name,price\nwidget,9.99\n");
    }

    #[test]
    fn test_utf8_bom_is_stripped() {
        let data = [0xEF, 0xBB, 0xBF, b'a', b',', b'b'];
        assert_eq!(&*decode_to_utf8(&data), "a,b");
    }

    #[test]
    fn test_utf16_le_bom() {
        // "a,b" in UTF-16 LE with BOM
        let data: &[u8] = &[0xFF, 0xFE, b'a', 0x00, b',', 0x00, b'b', 0x00];
        let decoded = decode_to_utf8(data);
        assert_eq!(decoded.trim_start_matches('\u{feff}'), "a,b");
    }

    #[test]
    fn test_windows1251_is_transcoded() {
        // "Привет" in Windows-1251
        let data: &[u8] = &[0xCF, 0xF0, 0xE8, 0xE2, 0xE5, 0xF2];
        let decoded = decode_to_utf8(data);
        assert_eq!(&*decoded, "Привет");
    }

    #[test]
    fn test_skip_bom() {
        let with_bom = [0xEF, 0xBB, 0xBF, b'x'];
        assert_eq!(skip_bom(&with_bom), b"x");
        assert_eq!(skip_bom(b"x"), b"x");
    }
}
