//! Wallet address derivation from public keys.
//!
//! Address format: `tsra_` + base32(public_key, 52 chars) + base32(checksum, 8 chars)
//!
//! Checksum: first 5 bytes of Blake2b-256(public_key).
//! Base32 alphabet avoids visually ambiguous characters (0/O, 2/Z, l/I, v).
//! Total address length: 5 (prefix) + 52 + 8 = 65 characters.

use tessera_types::{PublicKey, WalletAddress};

const ALPHABET: &[u8; 32] = b"13456789abcdefghijkmnopqrstuwxyz";

/// Prefix for all Tessera addresses.
const PREFIX: &str = "tsra_";
/// Base32 characters for the public key: ceil(256 / 5) = 52.
const PUBKEY_CHARS: usize = 52;
/// Base32 characters for the 40-bit checksum: 40 / 5 = 8.
const CHECKSUM_CHARS: usize = 8;

fn alphabet_index(c: u8) -> Option<u64> {
    ALPHABET.iter().position(|&a| a == c).map(|i| i as u64)
}

/// Encode bytes as base32, padding the final group with zero bits.
fn encode_base32(bytes: &[u8]) -> String {
    let mut out = String::with_capacity((bytes.len() * 8).div_ceil(5));
    let mut acc: u64 = 0;
    let mut bits = 0u32;
    for &byte in bytes {
        acc = (acc << 8) | byte as u64;
        bits += 8;
        while bits >= 5 {
            bits -= 5;
            out.push(ALPHABET[((acc >> bits) & 0x1F) as usize] as char);
        }
    }
    if bits > 0 {
        out.push(ALPHABET[((acc << (5 - bits)) & 0x1F) as usize] as char);
    }
    out
}

/// Decode a base32 string into exactly `N` bytes, or `None` on invalid
/// characters or wrong length.
fn decode_base32<const N: usize>(s: &str) -> Option<[u8; N]> {
    let mut out = [0u8; N];
    let mut acc: u64 = 0;
    let mut bits = 0u32;
    let mut written = 0;
    for c in s.bytes() {
        acc = (acc << 5) | alphabet_index(c)?;
        bits += 5;
        if bits >= 8 {
            bits -= 8;
            if written == N {
                return None;
            }
            out[written] = (acc >> bits) as u8;
            written += 1;
        }
    }
    (written == N).then_some(out)
}

/// Derive a `tsra_`-prefixed wallet address from a public key.
pub fn derive_address(public_key: &PublicKey) -> WalletAddress {
    let body = encode_base32(public_key.as_bytes());
    let checksum = &crate::blake2b_256(public_key.as_bytes())[..5];
    WalletAddress::new(format!("{PREFIX}{body}{}", encode_base32(checksum)))
}

/// Extract the public key from a valid Tessera address.
///
/// Returns `None` if the address is malformed or its checksum is wrong.
pub fn decode_address(address: &str) -> Option<PublicKey> {
    let encoded = address.strip_prefix(PREFIX)?;
    if encoded.len() != PUBKEY_CHARS + CHECKSUM_CHARS {
        return None;
    }
    let key: [u8; 32] = decode_base32(&encoded[..PUBKEY_CHARS])?;
    let checksum: [u8; 5] = decode_base32(&encoded[PUBKEY_CHARS..])?;
    if checksum != crate::blake2b_256(&key)[..5] {
        return None;
    }
    Some(PublicKey(key))
}

/// Validate that an address string is well-formed and checksummed.
pub fn validate_address(address: &str) -> bool {
    decode_address(address).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::{generate_keypair, keypair_from_seed};

    #[test]
    fn derive_and_validate() {
        let kp = generate_keypair();
        let addr = derive_address(&kp.public);
        assert!(addr.as_str().starts_with("tsra_"));
        assert_eq!(addr.as_str().len(), 65);
        assert!(validate_address(addr.as_str()));
    }

    #[test]
    fn derive_is_deterministic() {
        let kp = keypair_from_seed(&[7u8; 32]);
        assert_eq!(
            derive_address(&kp.public).as_str(),
            derive_address(&kp.public).as_str()
        );
    }

    #[test]
    fn decode_recovers_public_key() {
        let kp = generate_keypair();
        let addr = derive_address(&kp.public);
        assert_eq!(decode_address(addr.as_str()).unwrap(), kp.public);
    }

    #[test]
    fn foreign_prefix_rejected() {
        let kp = generate_keypair();
        let addr = derive_address(&kp.public);
        let renamed = addr.as_str().replacen("tsra_", "brst_", 1);
        assert!(!validate_address(&renamed));
    }

    #[test]
    fn corrupted_checksum_rejected() {
        let kp = generate_keypair();
        let mut s = derive_address(&kp.public).as_str().to_string();
        let last = s.pop().unwrap();
        s.push(if last == '1' { '3' } else { '1' });
        assert!(!validate_address(&s));
    }

    #[test]
    fn wrong_length_rejected() {
        assert!(!validate_address("tsra_short"));
        assert!(!validate_address("tsra_"));
    }

    #[test]
    fn base32_roundtrip() {
        let data = [0x12, 0x34, 0x56, 0x78, 0x9A];
        let decoded: [u8; 5] = decode_base32(&encode_base32(&data)).unwrap();
        assert_eq!(decoded, data);
    }

    #[test]
    fn distinct_keys_distinct_addresses() {
        let a = generate_keypair();
        let b = generate_keypair();
        assert_ne!(
            derive_address(&a.public).as_str(),
            derive_address(&b.public).as_str()
        );
    }
}
