use secrecy::SecretString;

/// A BIP-39 phrase plus the address index and optional passphrase to derive
/// a key from.
#[derive(Debug)]
pub struct MnemonicDescriptor {
    pub phrase: SecretString,
    pub index: u32,
    pub passphrase: SecretString,
}

impl MnemonicDescriptor {
    pub fn new(phrase: impl Into<String>, index: u32) -> Self {
        Self {
            phrase: SecretString::from(phrase.into()),
            index,
            passphrase: SecretString::from(String::new()),
        }
    }

    pub fn with_passphrase(mut self, passphrase: impl Into<String>) -> Self {
        self.passphrase = SecretString::from(passphrase.into());
        self
    }
}

/// Key material a currency can be opened with.
#[derive(Debug)]
pub enum Secret {
    /// 32-byte private key as hex.
    PrivateKeyHex(SecretString),
    Mnemonic(MnemonicDescriptor),
}

impl Secret {
    pub fn private_key_hex(hex: impl Into<String>) -> Self {
        Secret::PrivateKeyHex(SecretString::from(hex.into()))
    }

    pub fn mnemonic(phrase: impl Into<String>, index: u32) -> Self {
        Secret::Mnemonic(MnemonicDescriptor::new(phrase, index))
    }
}

impl From<MnemonicDescriptor> for Secret {
    fn from(descriptor: MnemonicDescriptor) -> Self {
        Secret::Mnemonic(descriptor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn descriptor_defaults_to_empty_passphrase() {
        let d = MnemonicDescriptor::new("word list", 7);
        assert_eq!(d.index, 7);
        assert_eq!(d.phrase.expose_secret(), "word list");
        assert_eq!(d.passphrase.expose_secret(), "");

        let d = d.with_passphrase("extra");
        assert_eq!(d.passphrase.expose_secret(), "extra");
    }

    #[test]
    fn debug_redacts_secrets() {
        let secret = Secret::private_key_hex("e284129cc0922579a535bbf4d1a3b257");
        let debug = format!("{secret:?}");
        assert!(!debug.contains("e284129c"));

        let secret: Secret = MnemonicDescriptor::new("abandon about", 0)
            .with_passphrase("hunter2")
            .into();
        let debug = format!("{secret:?}");
        assert!(!debug.contains("abandon"));
        assert!(!debug.contains("hunter2"));
    }
}
