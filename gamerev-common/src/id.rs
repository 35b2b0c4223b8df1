//! Short document ids
//!
//! Documents are keyed by 8-character URL-safe ids rather than UUIDs so they
//! stay readable in URLs and CLI output.

use rand::Rng;

/// URL-safe alphabet (64 symbols)
const ALPHABET: &[u8] = b"useandom-26T198340PX75pxJACKVERYMINDBUSHWOLF_GQZbfghjklqvwyzrict";

/// Default id length
pub const ID_LEN: usize = 8;

/// Generate a new random document id of [`ID_LEN`] characters
pub fn short_id() -> String {
    let mut rng = rand::thread_rng();
    (0..ID_LEN)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect()
}
