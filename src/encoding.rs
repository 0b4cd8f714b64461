// @module: UTF-8 gate run before any parsing

/// Whether `bytes` follows the UTF-8 lead/continuation byte grammar.
///
/// ASCII always passes. Lead bytes `0xC2..=0xDF`, `0xE0..=0xEF` and
/// `0xF0..=0xF4` need one, two and three continuation bytes
/// (`0x80..=0xBF`). Any other lead byte, or a short or malformed
/// continuation, fails immediately.
///
/// This is a heuristic: it does not reject overlong three-byte forms or
/// surrogate code points, and text in another encoding can pass by chance.
/// A UTF-8 byte-order mark is accepted like any other sequence.
pub fn is_well_formed_utf8(bytes: &[u8]) -> bool {
    let mut i = 0;
    while i < bytes.len() {
        let continuation_count = match bytes[i] {
            0x00..=0x7F => 0,
            0xC2..=0xDF => 1,
            0xE0..=0xEF => 2,
            0xF0..=0xF4 => 3,
            _ => return false,
        };

        let end = i + continuation_count;
        if end >= bytes.len() {
            return false;
        }

        if !bytes[i + 1..=end].iter().all(|b| is_continuation(*b)) {
            return false;
        }

        i = end + 1;
    }

    true
}

fn is_continuation(byte: u8) -> bool {
    (0x80..=0xBF).contains(&byte)
}
