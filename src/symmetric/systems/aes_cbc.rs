//! AES-CBC 对称加密实现
//!
//! 输出格式：`[16 字节 IV][密文]`。IV 每条消息随机生成，分组链接交给 `cbc` crate。
//! 默认零填充：明文总是被补齐到 `(len / 16 + 1) * 16` 字节，解密时去除尾部零字节，
//! 因此以 `0x00` 结尾的明文无法被精确还原。需要精确还原时使用 PKCS#7。
use crate::common::config::{CbcPadding, CryptoConfig};
use crate::common::utils::{ZeroizingVec, from_base64, to_base64};
use crate::symmetric::traits::SymmetricCryptographicSystem;
use aes_gcm::aes::{Aes128, Aes192, Aes256};
use cbc::cipher::block_padding::{NoPadding, Pkcs7};
use cbc::cipher::{BlockCipher, BlockDecryptMut, BlockEncryptMut, KeyInit, KeyIvInit};
use rand_core::{OsRng, TryRngCore};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// AES 分组长度，也是 IV 长度
pub const BLOCK_SIZE: usize = 16;

/// AES-CBC 系统的独立错误类型
#[derive(Error, Debug)]
pub enum AesCbcSystemError {
    #[error("Key generation failed: {0}")]
    KeyGeneration(#[from] rand_core::OsError),

    #[error("Invalid key size: expected 16, 24 or 32 bytes, got {0}")]
    InvalidKeySize(usize),

    #[error("Unsupported AES key size: expected 128, 192 or 256 bits, got {0}")]
    UnsupportedKeyBits(usize),

    #[error("AES-CBC does not authenticate additional data")]
    AssociatedDataUnsupported,

    #[error("Ciphertext is malformed or truncated: {0}")]
    MalformedCiphertext(String),

    #[error("Invalid padding")]
    InvalidPadding,

    #[error("Base64 decoding failed: {0}")]
    Base64Decode(#[from] base64::DecodeError),
}

/// AES-CBC 密钥，长度 16/24/32 字节，释放时擦除
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct AesCbcKey(pub ZeroizingVec);

impl AesCbcKey {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, AesCbcSystemError> {
        check_key_len(bytes.len())?;
        Ok(AesCbcKey(ZeroizingVec(bytes.to_vec())))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// 密钥位数
    pub fn bits(&self) -> usize {
        self.0.len() * 8
    }
}

fn check_key_len(len: usize) -> Result<(), AesCbcSystemError> {
    match len {
        16 | 24 | 32 => Ok(()),
        other => Err(AesCbcSystemError::InvalidKeySize(other)),
    }
}

/// 零填充：至少补 1 字节，对齐时补一个完整分组
fn zero_pad(plaintext: &[u8]) -> Vec<u8> {
    let padded_len = (plaintext.len() / BLOCK_SIZE + 1) * BLOCK_SIZE;
    let mut padded = Vec::with_capacity(padded_len);
    padded.extend_from_slice(plaintext);
    padded.resize(padded_len, 0);
    padded
}

fn strip_zero_padding(data: &mut Vec<u8>) {
    let end = data.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
    data.truncate(end);
}

fn cbc_encrypt<C>(
    key: &[u8],
    iv: &[u8],
    plaintext: &[u8],
    padding: CbcPadding,
) -> Result<Vec<u8>, AesCbcSystemError>
where
    C: BlockEncryptMut + BlockCipher + KeyInit,
{
    let encryptor = cbc::Encryptor::<C>::new_from_slices(key, iv)
        .map_err(|_| AesCbcSystemError::InvalidKeySize(key.len()))?;
    Ok(match padding {
        CbcPadding::Zero => encryptor.encrypt_padded_vec_mut::<NoPadding>(&zero_pad(plaintext)),
        CbcPadding::Pkcs7 => encryptor.encrypt_padded_vec_mut::<Pkcs7>(plaintext),
    })
}

fn cbc_decrypt<C>(
    key: &[u8],
    iv: &[u8],
    body: &[u8],
    padding: CbcPadding,
) -> Result<Vec<u8>, AesCbcSystemError>
where
    C: BlockDecryptMut + BlockCipher + KeyInit,
{
    let decryptor = cbc::Decryptor::<C>::new_from_slices(key, iv)
        .map_err(|_| AesCbcSystemError::InvalidKeySize(key.len()))?;
    match padding {
        CbcPadding::Zero => {
            let mut plaintext = decryptor
                .decrypt_padded_vec_mut::<NoPadding>(body)
                .map_err(|_| {
                    AesCbcSystemError::MalformedCiphertext(
                        "Ciphertext length is not a multiple of the block size".to_string(),
                    )
                })?;
            strip_zero_padding(&mut plaintext);
            Ok(plaintext)
        }
        CbcPadding::Pkcs7 => decryptor
            .decrypt_padded_vec_mut::<Pkcs7>(body)
            .map_err(|_| AesCbcSystemError::InvalidPadding),
    }
}

/// AES-CBC 对称加密系统
#[derive(Debug)]
pub struct AesCbcSystem;

impl AesCbcSystem {
    /// 生成随机 IV
    pub fn generate_iv() -> Result<[u8; BLOCK_SIZE], AesCbcSystemError> {
        let mut iv = [0u8; BLOCK_SIZE];
        OsRng.try_fill_bytes(&mut iv)?;
        Ok(iv)
    }

    /// 随机 IV + 指定填充加密
    pub fn encrypt_with_padding(
        key: &AesCbcKey,
        plaintext: &[u8],
        padding: CbcPadding,
    ) -> Result<Vec<u8>, AesCbcSystemError> {
        let iv = Self::generate_iv()?;
        Self::encrypt_with_iv(key, &iv, plaintext, padding)
    }

    /// 使用调用方提供的 IV 加密，输出仍以 IV 开头
    pub fn encrypt_with_iv(
        key: &AesCbcKey,
        iv: &[u8; BLOCK_SIZE],
        plaintext: &[u8],
        padding: CbcPadding,
    ) -> Result<Vec<u8>, AesCbcSystemError> {
        let bytes = key.as_bytes();
        let ciphertext = match bytes.len() {
            16 => cbc_encrypt::<Aes128>(bytes, iv, plaintext, padding)?,
            24 => cbc_encrypt::<Aes192>(bytes, iv, plaintext, padding)?,
            32 => cbc_encrypt::<Aes256>(bytes, iv, plaintext, padding)?,
            other => return Err(AesCbcSystemError::InvalidKeySize(other)),
        };

        let mut output = Vec::with_capacity(BLOCK_SIZE + ciphertext.len());
        output.extend_from_slice(iv);
        output.extend_from_slice(&ciphertext);

        debug!(
            key_bits = key.bits(),
            %padding,
            plaintext_len = plaintext.len(),
            output_len = output.len(),
            "AES-CBC encrypt"
        );
        Ok(output)
    }

    /// 读取前 16 字节作为 IV 并解密
    pub fn decrypt_with_padding(
        key: &AesCbcKey,
        ciphertext: &[u8],
        padding: CbcPadding,
    ) -> Result<Vec<u8>, AesCbcSystemError> {
        if ciphertext.len() < 2 * BLOCK_SIZE {
            return Err(AesCbcSystemError::MalformedCiphertext(
                "Ciphertext is too short to contain IV and one block".to_string(),
            ));
        }
        if ciphertext.len() % BLOCK_SIZE != 0 {
            return Err(AesCbcSystemError::MalformedCiphertext(
                "Ciphertext length is not a multiple of the block size".to_string(),
            ));
        }

        let bytes = key.as_bytes();
        let (iv, body) = ciphertext.split_at(BLOCK_SIZE);
        match bytes.len() {
            16 => cbc_decrypt::<Aes128>(bytes, iv, body, padding),
            24 => cbc_decrypt::<Aes192>(bytes, iv, body, padding),
            32 => cbc_decrypt::<Aes256>(bytes, iv, body, padding),
            other => Err(AesCbcSystemError::InvalidKeySize(other)),
        }
    }
}

impl SymmetricCryptographicSystem for AesCbcSystem {
    type Key = AesCbcKey;
    type Error = AesCbcSystemError;

    fn generate_key(config: &CryptoConfig) -> Result<Self::Key, Self::Error> {
        if !matches!(config.aes_key_bits, 128 | 192 | 256) {
            return Err(AesCbcSystemError::UnsupportedKeyBits(config.aes_key_bits));
        }
        let len = config.aes_key_len();

        let mut key_bytes = ZeroizingVec(vec![0u8; len]);
        OsRng.try_fill_bytes(&mut key_bytes.0)?;
        Ok(AesCbcKey(key_bytes))
    }

    fn encrypt(
        key: &Self::Key,
        plaintext: &[u8],
        additional_data: Option<&[u8]>,
    ) -> Result<Vec<u8>, Self::Error> {
        if additional_data.is_some_and(|aad| !aad.is_empty()) {
            return Err(AesCbcSystemError::AssociatedDataUnsupported);
        }
        Self::encrypt_with_padding(key, plaintext, CbcPadding::Zero)
    }

    fn decrypt(
        key: &Self::Key,
        ciphertext: &[u8],
        additional_data: Option<&[u8]>,
    ) -> Result<Vec<u8>, Self::Error> {
        if additional_data.is_some_and(|aad| !aad.is_empty()) {
            return Err(AesCbcSystemError::AssociatedDataUnsupported);
        }
        Self::decrypt_with_padding(key, ciphertext, CbcPadding::Zero)
    }

    fn export_key(key: &Self::Key) -> Result<String, Self::Error> {
        Ok(to_base64(key.as_bytes()))
    }

    fn import_key(encoded_key: &str) -> Result<Self::Key, Self::Error> {
        let key_bytes = ZeroizingVec(from_base64(encoded_key)?);
        check_key_len(key_bytes.len())?;
        Ok(AesCbcKey(key_bytes))
    }
}
