use std::{fmt, str::FromStr};

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Seed for deterministic board generation and play.
///
/// This is a 128-bit (16-byte) seed used to initialize the random number
/// generator shared by board generation and move search. Using the same seed
/// will produce the same board and the same sequence of computer moves, enabling:
///
/// - Reproducible games for debugging
/// - Deterministic testing
///
/// Seeds are written as 32 lowercase hex characters.
///
/// # Example
///
/// ```
/// use quadblock_engine::BoardSeed;
/// use rand::Rng as _;
///
/// // Generate a random seed
/// let seed: BoardSeed = rand::rng().random();
///
/// // Round-trips through its hex form
/// let parsed: BoardSeed = seed.to_string().parse()?;
/// assert_eq!(parsed, seed);
/// # Ok::<(), quadblock_engine::InvalidSeedError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardSeed([u8; 16]);

impl BoardSeed {
    /// Creates the random number generator this seed stands for.
    #[must_use]
    pub fn rng(self) -> Pcg32 {
        Pcg32::from_seed(self.0)
    }
}

impl From<u128> for BoardSeed {
    fn from(num: u128) -> Self {
        Self(num.to_be_bytes())
    }
}

impl fmt::Display for BoardSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", u128::from_be_bytes(self.0))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid seed '{input}': expected 32 hex characters")]
pub struct InvalidSeedError {
    #[error(not(source))]
    input: String,
}

impl FromStr for BoardSeed {
    type Err = InvalidSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidSeedError {
            input: s.to_owned(),
        };
        if s.len() != 32 || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let num = u128::from_str_radix(s, 16).map_err(|_| invalid())?;
        Ok(Self::from(num))
    }
}

impl Serialize for BoardSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for BoardSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        hex_str.parse().map_err(serde::de::Error::custom)
    }
}

/// Allows generating random `BoardSeed` values using the standard random distribution.
///
/// This implementation enables idiomatic seed generation with `rng.random()`.
impl Distribution<BoardSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> BoardSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        BoardSeed(seed)
    }
}

#[cfg(test)]
mod tests {
    use rand::RngCore as _;

    use super::*;

    #[test]
    fn test_seed_serialization() {
        let seed = BoardSeed::from(0x0123_4567_89ab_cdef_u128);
        let serialized = serde_json::to_string(&seed).unwrap();
        assert_eq!(serialized, "\"00000000000000000123456789abcdef\"");

        let deserialized: BoardSeed = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized, seed);
    }

    #[test]
    fn test_seed_rejects_bad_input() {
        assert!("1234".parse::<BoardSeed>().is_err());
        assert!("zz".repeat(16).parse::<BoardSeed>().is_err());
        assert!("0".repeat(33).parse::<BoardSeed>().is_err());
        assert!(format!("+{}", "0".repeat(31)).parse::<BoardSeed>().is_err());
        assert!("f".repeat(32).parse::<BoardSeed>().is_ok());
    }

    #[test]
    fn test_same_seed_same_stream() {
        let seed = BoardSeed::from(42);
        let mut a = seed.rng();
        let mut b = seed.rng();
        for _ in 0..16 {
            assert_eq!(a.next_u32(), b.next_u32());
        }
    }
}
