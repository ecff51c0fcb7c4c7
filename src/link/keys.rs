//! Link key derivation and claim-authorization signing.
//!
//! The module contract verifies a claim by recovering the signer of
//!
//! ```text
//! keccak256("\x19Ethereum Signed Message:\n32" ‖ keccak256(abi.encodePacked(claimant)))
//! ```
//!
//! and comparing it with the claim authority stored at creation. Every
//! function here must stay bit-for-bit compatible with that check.

use alloy::primitives::{eip191_hash_message, keccak256, Address, Signature, B256};
use alloy::signers::local::PrivateKeySigner;
use alloy::signers::SignerSync;
use alloy::sol_types::SolValue;
use rand::distributions::Alphanumeric;
use rand::rngs::OsRng;
use rand::Rng;

use crate::link::types::{LinkError, LinkKeyPair, LinkResult};

/// Derive the link key pair for `seed`.
///
/// The private key is `keccak256(utf8(seed))`; the address follows the usual
/// secp256k1 / Ethereum rule. Anyone holding the seed derives the same pair.
pub fn derive_key_pair(seed: &str) -> LinkResult<LinkKeyPair> {
    let private_key = keccak256(seed.as_bytes());
    let signer = signer_for(&private_key)?;
    Ok(LinkKeyPair {
        address: signer.address(),
        private_key,
    })
}

/// `keccak256(abi.encodePacked(address))`: the 20 raw address bytes, no padding.
pub fn hash_address(address: Address) -> B256 {
    keccak256(address.abi_encode_packed())
}

/// EIP-191 personal-message hash of `bytes`.
pub fn hash_with_message_prefix(bytes: impl AsRef<[u8]>) -> B256 {
    eip191_hash_message(bytes)
}

/// The digest the contract recovers the claim signer from.
pub fn claim_digest(claimant: Address) -> B256 {
    hash_with_message_prefix(hash_address(claimant))
}

/// Sign `claimant` with the link's private key.
///
/// Signs the raw 32 bytes of [`hash_address`] as a personal message, giving
/// a 65-byte `(r, s, v)` signature with `v` in {27, 28}.
pub fn sign_address_for_claim(claimant: Address, private_key: &B256) -> LinkResult<Signature> {
    let signer = signer_for(private_key)?;
    let digest = hash_address(claimant);
    signer
        .sign_message_sync(digest.as_slice())
        .map_err(|e| LinkError::Crypto(format!("Claim signing failed: {}", e)))
}

/// Recover the link address that authorised `claimant`.
pub fn recover_claim_signer(claimant: Address, signature: &Signature) -> LinkResult<Address> {
    signature
        .recover_address_from_prehash(&claim_digest(claimant))
        .map_err(|e| LinkError::Crypto(format!("Signature recovery failed: {}", e)))
}

/// Random alphanumeric seed from the operating system's CSPRNG.
pub fn generate_seed(length: usize) -> String {
    OsRng
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}

fn signer_for(private_key: &B256) -> LinkResult<PrivateKeySigner> {
    PrivateKeySigner::from_bytes(private_key)
        .map_err(|e| LinkError::Crypto(format!("Invalid link private key: {}", e)))
}
