//! # Hex Encoding/Decoding
//!
//! `0x`-prefixed hex, the encoding JSON-RPC uses for addresses, calldata and quantities.

/// Encode bytes as a `0x`-prefixed lowercase hex string.
pub fn hex0x_encode(content: impl AsRef<[u8]>) -> String {
    format!("0x{}", hex::encode(content))
}

/// Decode a hex string, with or without the `0x` prefix.
///
/// An empty payload (`"0x"`) decodes to an empty vector.
pub fn hex0x_decode(value: &str) -> Result<Vec<u8>, Error> {
    let digits = value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
        .unwrap_or(value);

    hex::decode(digits).map_err(|_| Error::FailToHexDecode(value.to_string()))
}

// region:    --- Error
#[derive(Debug, PartialEq, Eq)]
pub enum Error {
    FailToHexDecode(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(fmt, "{self:?}")
    }
}

impl std::error::Error for Error {}
// endregion: --- Error
