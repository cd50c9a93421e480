use std::ops::Deref;

use zeroize::{Zeroize, ZeroizeOnDrop};

/// Owned secret bytes (raw private keys, BIP-39 seeds) wiped on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct ZeroizingBytes(Vec<u8>);

impl ZeroizingBytes {
    /// Take ownership of `data`; it is wiped when the wrapper drops.
    pub fn new(data: Vec<u8>) -> Self {
        Self(data)
    }

    /// Decode a hex secret straight into a zeroizing buffer.
    pub fn from_hex(data: &str) -> Result<Self, hex::FromHexError> {
        hex::decode(data.trim()).map(Self)
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the buffer holds no data.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Deref for ZeroizingBytes {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for ZeroizingBytes {
    fn from(data: Vec<u8>) -> Self {
        Self::new(data)
    }
}

impl From<&[u8]> for ZeroizingBytes {
    fn from(data: &[u8]) -> Self {
        Self::new(data.to_vec())
    }
}

impl std::fmt::Debug for ZeroizingBytes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ZeroizingBytes(<{} bytes redacted>)", self.0.len())
    }
}

/// Owned secret text (WIF keys, hex private keys) wiped on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct ZeroizingString(String);

impl ZeroizingString {
    /// Take ownership of `data`; it is wiped when the wrapper drops.
    pub fn new(data: String) -> Self {
        Self(data)
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the buffer holds no data.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Deref for ZeroizingString {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl From<String> for ZeroizingString {
    fn from(data: String) -> Self {
        Self::new(data)
    }
}

impl From<&str> for ZeroizingString {
    fn from(data: &str) -> Self {
        Self::new(data.to_owned())
    }
}

impl std::fmt::Debug for ZeroizingString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ZeroizingString(<redacted>)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_hex_decodes_private_key() {
        let key = ZeroizingBytes::from_hex(
            "0000000000000000000000000000000000000000000000000000000000000001",
        )
        .unwrap();
        assert_eq!(key.len(), 32);
        assert_eq!(key[31], 1);
    }

    #[test]
    fn from_hex_trims_whitespace() {
        let key = ZeroizingBytes::from_hex("  abcd\n").unwrap();
        assert_eq!(&*key, &[0xab, 0xcd]);
    }

    #[test]
    fn from_hex_rejects_garbage() {
        assert!(ZeroizingBytes::from_hex("zz").is_err());
        assert!(ZeroizingBytes::from_hex("abc").is_err());
    }

    #[test]
    fn debug_does_not_leak_bytes() {
        let key = ZeroizingBytes::new(vec![0xAA; 32]);
        let debug = format!("{key:?}");
        assert!(!debug.contains("aa"));
        assert!(!debug.contains("170"));
        assert!(debug.contains("32 bytes"));

        let wif = ZeroizingString::from("KwDiBf89QgGbjEhKnhXJuH7LrciVrZi3qYjgd9M7rFU73sVHnoWn");
        assert!(!format!("{wif:?}").contains("KwDi"));
    }

    #[test]
    fn manual_zeroize_clears_contents() {
        let mut key = ZeroizingBytes::new(vec![0xAA; 32]);
        key.zeroize();
        assert!(key.is_empty());

        let mut wif = ZeroizingString::new("secret".into());
        wif.zeroize();
        assert!(wif.is_empty());
    }

    #[test]
    fn deref_exposes_contents() {
        let key: ZeroizingBytes = vec![1u8, 2, 3].into();
        assert_eq!(&*key, &[1, 2, 3]);

        let text: ZeroizingString = "L1aW4aubDFB7yfras2S1mN3bqg9nwySY8nkoLmJebSLD5BWv3ENZ".into();
        assert!(text.starts_with('L'));
    }
}
