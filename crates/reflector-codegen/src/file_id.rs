//! Per-file identifiers
//!
//! Every generated symbol of a file is namespaced by a random 128-bit id,
//! rendered as lowercase hex in the 8-4-4-4-12 grouping with `_` separators
//! so it can be pasted into C identifiers.

use rand::Rng;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Prefix of the line that records a generated file's id.
pub const CURRENT_FILE_ID_DEFINE: &str = "#define CURRENT_FILE_ID ";

/// Hex digit groups, in characters.
const GROUPS: [usize; 5] = [8, 4, 4, 4, 12];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FileIdError {
    #[error("file id must be {expected} characters, got {found}")]
    InvalidLength { expected: usize, found: usize },

    #[error("invalid character '{ch}' at position {position} in file id")]
    InvalidCharacter { ch: char, position: usize },

    #[error("no '{CURRENT_FILE_ID_DEFINE}' line found")]
    NotRecorded,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FileId(String);

impl FileId {
    /// Length of the rendered id.
    pub const LEN: usize = 36;

    /// Draw a fresh id from the thread-local generator.
    pub fn generate() -> Self {
        Self::generate_with(&mut rand::thread_rng())
    }

    pub fn generate_with<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let bytes: [u8; 16] = rng.gen();
        let hex: String = bytes.iter().map(|b| format!("{:02x}", b)).collect();

        let mut id = String::with_capacity(Self::LEN);
        let mut offset = 0;
        for (i, len) in GROUPS.iter().enumerate() {
            if i > 0 {
                id.push('_');
            }
            id.push_str(&hex[offset..offset + len]);
            offset += len;
        }
        Self(id)
    }

    /// Validate an id as rendered by [`FileId::generate`].
    pub fn parse(text: &str) -> Result<Self, FileIdError> {
        let found = text.chars().count();
        if found != Self::LEN {
            return Err(FileIdError::InvalidLength {
                expected: Self::LEN,
                found,
            });
        }

        let separators = separator_positions();
        for (position, ch) in text.chars().enumerate() {
            let valid = if separators.contains(&position) {
                ch == '_'
            } else {
                ch.is_ascii_digit() || ('a'..='f').contains(&ch)
            };
            if !valid {
                return Err(FileIdError::InvalidCharacter { ch, position });
            }
        }

        Ok(Self(text.to_string()))
    }

    /// Recover the id recorded in a previously generated file.
    pub fn from_generated(contents: &str) -> Result<Self, FileIdError> {
        let start = contents
            .find(CURRENT_FILE_ID_DEFINE)
            .ok_or(FileIdError::NotRecorded)?
            + CURRENT_FILE_ID_DEFINE.len();
        let rest = &contents[start..];
        let end = rest
            .find(|c: char| c.is_whitespace())
            .unwrap_or(rest.len());
        Self::parse(&rest[..end])
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn separator_positions() -> [usize; 4] {
    let mut positions = [0; 4];
    let mut offset = 0;
    for (i, len) in GROUPS[..4].iter().enumerate() {
        offset += len;
        positions[i] = offset;
        offset += 1;
    }
    positions
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for FileId {
    type Err = FileIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_generated_shape() {
        let id = FileId::generate();
        assert_eq!(id.as_str().len(), FileId::LEN);
        let groups: Vec<usize> = id.as_str().split('_').map(str::len).collect();
        assert_eq!(groups, [8, 4, 4, 4, 12]);
        assert!(FileId::parse(id.as_str()).is_ok());
    }

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let a = FileId::generate_with(&mut StdRng::seed_from_u64(7));
        let b = FileId::generate_with(&mut StdRng::seed_from_u64(7));
        let c = FileId::generate_with(&mut StdRng::seed_from_u64(8));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_parse_rejects_malformed_ids() {
        assert!(matches!(
            FileId::parse("abc"),
            Err(FileIdError::InvalidLength { found: 3, .. })
        ));
        assert!(matches!(
            FileId::parse("0123456a-0123-0123-0123-0123456789ab"),
            Err(FileIdError::InvalidCharacter { ch: '-', position: 8 })
        ));
        assert!(FileId::parse("0123456A_0123_0123_0123_0123456789ab").is_err());
        assert!(FileId::parse("0123456a_0123_0123_0123_0123456789ab").is_ok());
    }

    #[test]
    fn test_recover_from_generated_contents() {
        let id = FileId::generate();
        let contents = format!("// header\n#undef CURRENT_FILE_ID\n{}{}\n\n#define X", CURRENT_FILE_ID_DEFINE, id);
        assert_eq!(FileId::from_generated(&contents).unwrap(), id);
        assert_eq!(FileId::from_generated("nothing here"), Err(FileIdError::NotRecorded));
    }
}
