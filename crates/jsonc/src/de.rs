//! Decode JSONC with `serde_json` after stripping comments.

use std::io::Read;

use serde::de::DeserializeOwned;
use serde_json::de::IoRead;

use crate::reader::StripReader;
use crate::strip::strip_comments;
use crate::Error;

/// Strip comments from `input`, then deserialize it as JSON.
pub fn from_slice<T: DeserializeOwned>(input: &[u8]) -> Result<T, Error> {
    let stripped = strip_comments(input)?;
    Ok(serde_json::from_slice(&stripped)?)
}

pub fn from_str<T: DeserializeOwned>(input: &str) -> Result<T, Error> {
    from_slice(input.as_bytes())
}

/// Read all of `reader`, strip comments, then deserialize.
pub fn from_reader<R: Read, T: DeserializeOwned>(mut reader: R) -> Result<T, Error> {
    let mut input = Vec::new();
    reader.read_to_end(&mut input)?;
    from_slice(&input)
}

/// A JSON deserializer over the stripped contents of `reader`.
///
/// Useful for reading a sequence of values with
/// [`serde_json::Deserializer::into_iter`]. A strip failure surfaces as a
/// `serde_json` I/O error of kind `InvalidData`.
pub fn decoder<R: Read>(reader: R) -> serde_json::Deserializer<IoRead<StripReader<R>>> {
    serde_json::Deserializer::from_reader(StripReader::new(reader))
}
