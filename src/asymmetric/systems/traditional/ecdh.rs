//! P-256 ECDH 密钥协商
//!
//! 原始共享秘密经 HKDF-SHA256（无盐，info 为 `handshake data`）派生为 32 字节密钥。

use crate::asymmetric::systems::traditional::ecdsa::{
    EcdsaCryptoSystem, EcdsaSystemError, P256PrivateKeyWrapper, P256PublicKeyWrapper,
    generate_p256_keypair,
};
use crate::asymmetric::traits::{KeyAgreementSystem, KeyPairSystem};
use crate::common::config::CryptoConfig;
use crate::common::utils::ZeroizingVec;
use hkdf::Hkdf;
use p256::ecdh::diffie_hellman;
use sha2::Sha256;
use thiserror::Error;
use tracing::debug;

/// 派生密钥长度
pub const SHARED_KEY_LEN: usize = 32;
/// HKDF info 参数
pub const HKDF_INFO: &[u8] = b"handshake data";

/// ECDH 系统的独立错误类型
#[derive(Error, Debug)]
pub enum EcdhSystemError {
    #[error("EC key error: {0}")]
    Key(#[from] EcdsaSystemError),

    #[error("HKDF expansion failed: {0}")]
    KeyDerivation(hkdf::InvalidLength),
}

/// ECDH P-256 + HKDF-SHA256 密钥协商系统
pub struct EcdhCryptoSystem;

impl EcdhCryptoSystem {
    /// 以指定的 info 与长度派生密钥
    pub fn derive_with_info(
        private_key: &P256PrivateKeyWrapper,
        peer_public_key: &P256PublicKeyWrapper,
        info: &[u8],
        length: usize,
    ) -> Result<ZeroizingVec, EcdhSystemError> {
        let secret_key = private_key.to_key()?;
        let peer_key = peer_public_key.to_key()?;

        let shared = diffie_hellman(secret_key.to_nonzero_scalar(), peer_key.as_affine());
        let hkdf = Hkdf::<Sha256>::new(None, shared.raw_secret_bytes().as_slice());

        let mut okm = ZeroizingVec(vec![0u8; length]);
        hkdf.expand(info, &mut okm.0)
            .map_err(EcdhSystemError::KeyDerivation)?;

        debug!(length, "derived ECDH shared key");
        Ok(okm)
    }
}

impl KeyPairSystem for EcdhCryptoSystem {
    type PublicKey = P256PublicKeyWrapper;
    type PrivateKey = P256PrivateKeyWrapper;
    type Error = EcdhSystemError;

    fn generate_keypair(
        _config: &CryptoConfig,
    ) -> Result<(Self::PublicKey, Self::PrivateKey), Self::Error> {
        debug!(curve = "P-256", "generating ECDH key pair");
        generate_p256_keypair().map_err(Into::into)
    }

    // P-256 密钥格式与 ECDSA 相同，直接复用

    fn export_public_key(public_key: &Self::PublicKey) -> Result<String, Self::Error> {
        EcdsaCryptoSystem::export_public_key(public_key).map_err(Into::into)
    }

    fn export_private_key(private_key: &Self::PrivateKey) -> Result<String, Self::Error> {
        EcdsaCryptoSystem::export_private_key(private_key).map_err(Into::into)
    }

    fn import_public_key(key_data: &str) -> Result<Self::PublicKey, Self::Error> {
        EcdsaCryptoSystem::import_public_key(key_data).map_err(Into::into)
    }

    fn import_private_key(key_data: &str) -> Result<Self::PrivateKey, Self::Error> {
        EcdsaCryptoSystem::import_private_key(key_data).map_err(Into::into)
    }
}

impl KeyAgreementSystem for EcdhCryptoSystem {
    type SharedKey = ZeroizingVec;

    fn derive_shared_key(
        private_key: &Self::PrivateKey,
        peer_public_key: &Self::PublicKey,
    ) -> Result<Self::SharedKey, Self::Error> {
        Self::derive_with_info(private_key, peer_public_key, HKDF_INFO, SHARED_KEY_LEN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup_keys() -> (P256PublicKeyWrapper, P256PrivateKeyWrapper) {
        EcdhCryptoSystem::generate_keypair(&CryptoConfig::default()).unwrap()
    }

    #[test]
    fn test_both_parties_derive_same_key() {
        let (alice_public, alice_private) = setup_keys();
        let (bob_public, bob_private) = setup_keys();

        let alice_shared =
            EcdhCryptoSystem::derive_shared_key(&alice_private, &bob_public).unwrap();
        let bob_shared =
            EcdhCryptoSystem::derive_shared_key(&bob_private, &alice_public).unwrap();

        assert_eq!(alice_shared.len(), SHARED_KEY_LEN);
        assert_eq!(alice_shared, bob_shared);
    }

    #[test]
    fn test_different_peers_give_different_keys() {
        let (_, alice_private) = setup_keys();
        let (bob_public, _) = setup_keys();
        let (carol_public, _) = setup_keys();

        let with_bob = EcdhCryptoSystem::derive_shared_key(&alice_private, &bob_public).unwrap();
        let with_carol =
            EcdhCryptoSystem::derive_shared_key(&alice_private, &carol_public).unwrap();

        assert_ne!(with_bob, with_carol);
    }

    #[test]
    fn test_info_changes_derived_key() {
        let (_, alice_private) = setup_keys();
        let (bob_public, _) = setup_keys();

        let default_key =
            EcdhCryptoSystem::derive_shared_key(&alice_private, &bob_public).unwrap();
        let other_key =
            EcdhCryptoSystem::derive_with_info(&alice_private, &bob_public, b"other", 32).unwrap();

        assert_ne!(default_key, other_key);
    }

    #[test]
    fn test_oversized_output_fails() {
        let (_, alice_private) = setup_keys();
        let (bob_public, _) = setup_keys();

        // HKDF-SHA256 最多输出 255 * 32 字节
        let result =
            EcdhCryptoSystem::derive_with_info(&alice_private, &bob_public, b"", 255 * 32 + 1);
        assert!(matches!(result, Err(EcdhSystemError::KeyDerivation(_))));
    }

    #[test]
    fn test_invalid_peer_key_fails() {
        let (_, alice_private) = setup_keys();
        let broken = P256PublicKeyWrapper(vec![0u8; 10]);

        let result = EcdhCryptoSystem::derive_shared_key(&alice_private, &broken);
        assert!(matches!(result, Err(EcdhSystemError::Key(_))));
    }

    #[test]
    fn test_ecdsa_pem_is_accepted() {
        let (public_key, _) = setup_keys();
        let pem = EcdhCryptoSystem::export_public_key(&public_key).unwrap();
        let imported = EcdhCryptoSystem::import_public_key(&pem).unwrap();

        assert_eq!(public_key, imported);
    }
}
