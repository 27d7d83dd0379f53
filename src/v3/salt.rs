//! Local privacy salt.
//!
//! Each session keeps a salt seeded once from a secure random source. Every
//! encrypted message takes the current value as its msgPrivacyParameters and
//! then increments it, so values do not repeat for the session's lifetime:
//!
//! - DES family (RFC 3414 8.1.1.1): 32-bit salt, sent as `engineBoots || salt`
//! - AES family (RFC 3826 3.1.2.1): 64-bit salt, sent as-is

use super::{PrivProtocol, SaltWidth};
use crate::error::{BoxError, ConfigErrorKind, Error, Result};

/// Source of cryptographically secure random bytes.
pub trait RandomSource {
    /// Fill `dest` completely with random bytes.
    fn fill(&mut self, dest: &mut [u8]) -> std::result::Result<(), BoxError>;
}

/// The operating system's secure random source.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsRandom;

impl RandomSource for OsRandom {
    fn fill(&mut self, dest: &mut [u8]) -> std::result::Result<(), BoxError> {
        getrandom::fill(dest).map_err(|e| e.to_string().into())
    }
}

/// Per-session salt state.
#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub enum LocalSalt {
    /// No salt yet; set once at session establishment.
    #[default]
    Uninitialized,
    /// DES family salt.
    Bits32(u32),
    /// AES family salt.
    Bits64(u64),
}

impl LocalSalt {
    /// Seed a salt sized for `protocol` from `rng`.
    pub(crate) fn generate<R>(protocol: PrivProtocol, rng: &mut R) -> Result<Self>
    where
        R: RandomSource + ?Sized,
    {
        match protocol.salt_width() {
            SaltWidth::Bits32 => Ok(Self::Bits32(u32::from_be_bytes(read_seed(rng)?))),
            SaltWidth::Bits64 => Ok(Self::Bits64(u64::from_be_bytes(read_seed(rng)?))),
        }
    }

    /// Whether the salt has been seeded.
    pub fn is_initialized(&self) -> bool {
        !matches!(self, Self::Uninitialized)
    }

    /// Width of the seeded salt.
    pub fn width(&self) -> Option<SaltWidth> {
        match self {
            Self::Uninitialized => None,
            Self::Bits32(_) => Some(SaltWidth::Bits32),
            Self::Bits64(_) => Some(SaltWidth::Bits64),
        }
    }

    /// Take the next msgPrivacyParameters value and advance the salt.
    pub(crate) fn advance(&mut self, engine_boots: u32) -> Result<[u8; 8]> {
        let mut out = [0u8; 8];
        match self {
            Self::Uninitialized => {
                return Err(Error::config(ConfigErrorKind::SaltNotInitialized));
            }
            Self::Bits32(salt) => {
                out[..4].copy_from_slice(&engine_boots.to_be_bytes());
                out[4..].copy_from_slice(&salt.to_be_bytes());
                *salt = salt.wrapping_add(1);
            }
            Self::Bits64(salt) => {
                out.copy_from_slice(&salt.to_be_bytes());
                *salt = salt.wrapping_add(1);
            }
        }
        Ok(out)
    }
}

impl std::fmt::Debug for LocalSalt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Uninitialized => write!(f, "Uninitialized"),
            Self::Bits32(_) => write!(f, "Bits32(<redacted>)"),
            Self::Bits64(_) => write!(f, "Bits64(<redacted>)"),
        }
    }
}

fn read_seed<const N: usize, R>(rng: &mut R) -> Result<[u8; N]>
where
    R: RandomSource + ?Sized,
{
    let mut seed = [0u8; N];
    rng.fill(&mut seed).map_err(|e| {
        tracing::warn!(needed = N, error = %e, "secure random source failed");
        Error::randomness(N, e)
    })?;
    Ok(seed)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Produces 0x01, 0x02, 0x03, ...
    struct Counting(u8);

    impl RandomSource for Counting {
        fn fill(&mut self, dest: &mut [u8]) -> std::result::Result<(), BoxError> {
            for b in dest {
                self.0 = self.0.wrapping_add(1);
                *b = self.0;
            }
            Ok(())
        }
    }

    struct Failing;

    impl RandomSource for Failing {
        fn fill(&mut self, _dest: &mut [u8]) -> std::result::Result<(), BoxError> {
            Err("entropy source unavailable".into())
        }
    }

    #[test]
    fn test_generate_is_big_endian() {
        let salt = LocalSalt::generate(PrivProtocol::Aes128, &mut Counting(0)).unwrap();
        assert_eq!(salt, LocalSalt::Bits64(0x0102_0304_0506_0708));

        let salt = LocalSalt::generate(PrivProtocol::Des, &mut Counting(0)).unwrap();
        assert_eq!(salt, LocalSalt::Bits32(0x0102_0304));
    }

    #[test]
    fn test_generate_width_by_family() {
        for p in [PrivProtocol::Des, PrivProtocol::Des3] {
            let salt = LocalSalt::generate(p, &mut OsRandom).unwrap();
            assert_eq!(salt.width(), Some(SaltWidth::Bits32));
        }
        for p in [
            PrivProtocol::Aes128,
            PrivProtocol::Aes192,
            PrivProtocol::Aes256,
        ] {
            let salt = LocalSalt::generate(p, &mut OsRandom).unwrap();
            assert_eq!(salt.width(), Some(SaltWidth::Bits64));
        }
    }

    #[test]
    fn test_generate_propagates_failure() {
        let err = LocalSalt::generate(PrivProtocol::Aes256, &mut Failing).unwrap_err();
        assert!(matches!(err, Error::Randomness { needed: 8, .. }));

        let err = LocalSalt::generate(PrivProtocol::Des, &mut Failing).unwrap_err();
        assert!(matches!(err, Error::Randomness { needed: 4, .. }));
    }

    #[test]
    fn test_advance_des() {
        let mut salt = LocalSalt::Bits32(0xAABB_CCDD);
        let first = salt.advance(7).unwrap();
        assert_eq!(first, [0, 0, 0, 7, 0xAA, 0xBB, 0xCC, 0xDD]);
        let second = salt.advance(7).unwrap();
        assert_eq!(second, [0, 0, 0, 7, 0xAA, 0xBB, 0xCC, 0xDE]);
    }

    #[test]
    fn test_advance_aes_ignores_boots() {
        let mut salt = LocalSalt::Bits64(1);
        assert_eq!(salt.advance(99).unwrap(), [0, 0, 0, 0, 0, 0, 0, 1]);
        assert_eq!(salt.advance(99).unwrap(), [0, 0, 0, 0, 0, 0, 0, 2]);
    }

    #[test]
    fn test_advance_wraps() {
        let mut salt = LocalSalt::Bits32(u32::MAX);
        salt.advance(0).unwrap();
        assert_eq!(salt, LocalSalt::Bits32(0));

        let mut salt = LocalSalt::Bits64(u64::MAX);
        salt.advance(0).unwrap();
        assert_eq!(salt, LocalSalt::Bits64(0));
    }

    #[test]
    fn test_advance_uninitialized() {
        let mut salt = LocalSalt::Uninitialized;
        assert!(matches!(
            salt.advance(1),
            Err(Error::Config {
                kind: ConfigErrorKind::SaltNotInitialized
            })
        ));
    }

    #[test]
    fn test_debug_hides_value() {
        let dbg = format!("{:?}", LocalSalt::Bits64(0xDEAD_BEEF));
        assert!(!dbg.contains("3735928559"));
        assert!(!dbg.to_lowercase().contains("deadbeef"));
    }
}
