//! Streaming content digests
//!
//! Input is consumed through a fixed-size buffer, so memory use does not grow
//! with file size. BLAKE3 is the default algorithm; SHA-256 is available for
//! stores that need digests comparable with external tooling.

use crate::types::{Digest, DIGEST_LEN};
use serde::{Deserialize, Serialize};
use sha2::Digest as _;
use std::fmt;
use std::io::{self, Read};
use std::str::FromStr;
use tracing::trace;

/// Default read buffer: 64 KiB
pub const DEFAULT_CHUNK_SIZE: usize = 64 * 1024;
pub const MIN_CHUNK_SIZE: usize = 1024;
pub const MAX_CHUNK_SIZE: usize = 16 * 1024 * 1024;

/// BLAKE3 digest of zero-length input
pub const BLAKE3_EMPTY: &str = "af1349b9f5f9a1a6a0404dea36dcc9499bcb25c9adc112b7cc9a93cae41f3262";

/// SHA-256 digest of zero-length input
pub const SHA256_EMPTY: &str = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";

/// Supported digest algorithms. Both produce 256-bit output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DigestAlgorithm {
    #[default]
    Blake3,
    Sha256,
}

impl DigestAlgorithm {
    pub fn hasher(&self) -> Box<dyn ContentHasher> {
        match self {
            DigestAlgorithm::Blake3 => Box::new(Blake3Hasher::default()),
            DigestAlgorithm::Sha256 => Box::new(Sha256Hasher::default()),
        }
    }

    /// Digest of zero-length input
    pub fn empty_digest(&self) -> &'static str {
        match self {
            DigestAlgorithm::Blake3 => BLAKE3_EMPTY,
            DigestAlgorithm::Sha256 => SHA256_EMPTY,
        }
    }
}

impl fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DigestAlgorithm::Blake3 => f.write_str("blake3"),
            DigestAlgorithm::Sha256 => f.write_str("sha256"),
        }
    }
}

impl FromStr for DigestAlgorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "blake3" => Ok(DigestAlgorithm::Blake3),
            "sha256" | "sha-256" => Ok(DigestAlgorithm::Sha256),
            other => Err(format!(
                "Unknown digest algorithm: {} (must be 'blake3' or 'sha256')",
                other
            )),
        }
    }
}

/// Incremental hashing capability
pub trait ContentHasher: Send {
    fn update(&mut self, bytes: &[u8]);
    fn finalize(self: Box<Self>) -> Digest;
}

#[derive(Default)]
pub struct Blake3Hasher(blake3::Hasher);

impl ContentHasher for Blake3Hasher {
    fn update(&mut self, bytes: &[u8]) {
        self.0.update(bytes);
    }

    fn finalize(self: Box<Self>) -> Digest {
        Digest::from_bytes(*self.0.finalize().as_bytes())
    }
}

#[derive(Default)]
pub struct Sha256Hasher(sha2::Sha256);

impl ContentHasher for Sha256Hasher {
    fn update(&mut self, bytes: &[u8]) {
        self.0.update(bytes);
    }

    fn finalize(self: Box<Self>) -> Digest {
        let inner = *self;
        let mut bytes = [0u8; DIGEST_LEN];
        bytes.copy_from_slice(&inner.0.finalize());
        Digest::from_bytes(bytes)
    }
}

/// Digest engine configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DigestConfig {
    #[serde(default)]
    pub algorithm: DigestAlgorithm,

    /// Read buffer size in bytes
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
}

fn default_chunk_size() -> usize {
    DEFAULT_CHUNK_SIZE
}

impl Default for DigestConfig {
    fn default() -> Self {
        Self {
            algorithm: DigestAlgorithm::default(),
            chunk_size: default_chunk_size(),
        }
    }
}

impl DigestConfig {
    pub fn validate(&self) -> Result<(), String> {
        if !(MIN_CHUNK_SIZE..=MAX_CHUNK_SIZE).contains(&self.chunk_size) {
            return Err(format!(
                "chunk_size {} out of range ({}..={})",
                self.chunk_size, MIN_CHUNK_SIZE, MAX_CHUNK_SIZE
            ));
        }
        Ok(())
    }
}

/// Streams bytes through the configured algorithm
#[derive(Debug, Clone, Default)]
pub struct DigestEngine {
    config: DigestConfig,
}

impl DigestEngine {
    /// Build an engine. `chunk_size` is clamped to
    /// `MIN_CHUNK_SIZE..=MAX_CHUNK_SIZE`; use [`DigestConfig::validate`] to
    /// reject out-of-range values instead.
    pub fn new(config: DigestConfig) -> Self {
        let chunk_size = config.chunk_size.clamp(MIN_CHUNK_SIZE, MAX_CHUNK_SIZE);
        Self {
            config: DigestConfig {
                chunk_size,
                ..config
            },
        }
    }

    pub fn with_algorithm(algorithm: DigestAlgorithm) -> Self {
        Self::new(DigestConfig {
            algorithm,
            ..DigestConfig::default()
        })
    }

    pub fn algorithm(&self) -> DigestAlgorithm {
        self.config.algorithm
    }

    pub fn chunk_size(&self) -> usize {
        self.config.chunk_size
    }

    /// Digest everything `reader` yields.
    ///
    /// Any read error aborts; no digest is produced for partial input.
    /// `Interrupted` reads are retried.
    pub fn digest_reader<R: Read>(&self, mut reader: R) -> io::Result<Digest> {
        let mut hasher = self.config.algorithm.hasher();
        let mut buf = vec![0u8; self.config.chunk_size];
        let mut total: u64 = 0;

        loop {
            let n = match reader.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            hasher.update(&buf[..n]);
            total += n as u64;
        }

        let digest = hasher.finalize();
        trace!(
            algorithm = %self.config.algorithm,
            bytes = total,
            digest = %digest.short(),
            "Digest computed"
        );
        Ok(digest)
    }

    /// Digest an in-memory buffer
    pub fn digest_bytes(&self, content: &[u8]) -> Digest {
        let mut hasher = self.config.algorithm.hasher();
        hasher.update(content);
        hasher.finalize()
    }
}
