use std::fmt;

/// Opaque slice token issued to each uploaded chunk. The upstream API
/// requires ids to be strictly increasing in upload order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SliceId(String);

impl SliceId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SliceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Base-26 odometer over lowercase letters. Seeded one position before
/// `aaaaaaaaaa` (the trailing backtick is `'a' - 1`), so the first call to
/// `next_id` yields `aaaaaaaaaa` and every subsequent id sorts strictly
/// after the previous one. Owned by exactly one orchestrator run.
#[derive(Debug)]
pub struct SliceIdGenerator {
    chars: Vec<u8>,
}

impl SliceIdGenerator {
    pub fn new() -> Self {
        Self {
            chars: b"aaaaaaaaa`".to_vec(),
        }
    }

    pub fn next_id(&mut self) -> SliceId {
        let mut i = self.chars.len() - 1;
        loop {
            if self.chars[i] != b'z' {
                self.chars[i] += 1;
                break;
            }
            self.chars[i] = b'a';
            if i == 0 {
                break;
            }
            i -= 1;
        }
        SliceId(String::from_utf8_lossy(&self.chars).into_owned())
    }
}

impl Default for SliceIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}
