use ripemd::Ripemd160;
use sha2::{Digest, Sha256};

/// Double SHA-256, the digest behind txids, sighashes and Base58Check.
pub fn sha256d(data: &[u8]) -> [u8; 32] {
    let first = Sha256::digest(data);
    Sha256::digest(first).into()
}

/// HASH160: RIPEMD-160(SHA-256(data)). Used for P2PKH/P2SH payloads.
pub fn hash160(data: &[u8]) -> [u8; 20] {
    let sha = Sha256::digest(data);
    Ripemd160::digest(sha).into()
}
