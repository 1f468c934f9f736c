use std::{fmt, str::FromStr};

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
    seq::IndexedRandom as _,
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{InvalidSpawnPolicyError, ParseSpawnSeedError, core::CellPos};

/// Seed for deterministic tile spawning.
///
/// A 128-bit (16-byte) seed for the spawn random number generator. The same
/// seed and the same sequence of moves always produce the same game, which
/// makes sessions reproducible for debugging, simulation and tests.
///
/// Seeds are written as 32-character hex strings, both in JSON and on the
/// command line.
///
/// # Example
///
/// ```
/// use tilemerge_engine::{Board, SpawnSeed};
/// use rand::Rng as _;
///
/// let seed: SpawnSeed = rand::rng().random();
/// let board1 = Board::with_seed(seed);
/// let board2 = Board::with_seed(seed);
/// assert_eq!(board1.cell_values(), board2.cell_values());
///
/// let parsed: SpawnSeed = seed.to_string().parse().unwrap();
/// assert_eq!(parsed, seed);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpawnSeed([u8; 16]);

impl SpawnSeed {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub const fn to_bytes(self) -> [u8; 16] {
        self.0
    }
}

impl fmt::Display for SpawnSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", u128::from_be_bytes(self.0))
    }
}

impl FromStr for SpawnSeed {
    type Err = ParseSpawnSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 32 {
            return Err(ParseSpawnSeedError::InvalidLength { len: s.len() });
        }
        let num = u128::from_str_radix(s, 16).map_err(|_| ParseSpawnSeedError::InvalidDigit {
            input: s.to_owned(),
        })?;
        Ok(Self(num.to_be_bytes()))
    }
}

impl Serialize for SpawnSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SpawnSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        hex_str.parse().map_err(serde::de::Error::custom)
    }
}

/// Allows generating random `SpawnSeed` values with `rng.random()`.
impl Distribution<SpawnSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> SpawnSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        SpawnSeed(seed)
    }
}

/// Value distribution of spawned tiles.
///
/// A spawned tile is a 4 with probability `four_probability` and a 2 otherwise.
/// The default is the usual 90/10 split.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SpawnPolicy {
    four_probability: f64,
}

impl Default for SpawnPolicy {
    fn default() -> Self {
        Self {
            four_probability: Self::DEFAULT_FOUR_PROBABILITY,
        }
    }
}

impl SpawnPolicy {
    pub const DEFAULT_FOUR_PROBABILITY: f64 = 0.1;

    pub fn new(four_probability: f64) -> Result<Self, InvalidSpawnPolicyError> {
        if !(0.0..=1.0).contains(&four_probability) {
            return Err(InvalidSpawnPolicyError {
                probability: four_probability,
            });
        }
        Ok(Self { four_probability })
    }

    #[must_use]
    pub fn four_probability(&self) -> f64 {
        self.four_probability
    }
}

/// Random source for tile spawning: picks the cell and the value.
#[derive(Debug, Clone)]
pub struct TileSpawner {
    rng: Pcg32,
    policy: SpawnPolicy,
}

impl Default for TileSpawner {
    fn default() -> Self {
        Self::new()
    }
}

impl TileSpawner {
    /// Creates a spawner with a random seed and the default policy.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random(), SpawnPolicy::default())
    }

    #[must_use]
    pub fn with_seed(seed: SpawnSeed, policy: SpawnPolicy) -> Self {
        Self {
            rng: Pcg32::from_seed(seed.0),
            policy,
        }
    }

    /// Picks one of `empty` uniformly, or `None` when there is no empty cell.
    pub fn pick_cell(&mut self, empty: &[CellPos]) -> Option<CellPos> {
        empty.choose(&mut self.rng).copied()
    }

    /// Draws a tile value according to the policy.
    pub fn draw_value(&mut self) -> u32 {
        if self.rng.random_bool(self.policy.four_probability) {
            4
        } else {
            2
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_random_seed() {
        let seed: SpawnSeed = rand::rng().random();
        let serialized = serde_json::to_string(&seed).unwrap();
        let deserialized: SpawnSeed = serde_json::from_str(&serialized).unwrap();
        assert_eq!(seed, deserialized);
    }

    #[test]
    fn test_known_value_sequential_bytes() {
        // Big-endian: first byte appears first in the hex string
        let seed = SpawnSeed::from_bytes([
            0x01, 0x23, 0x45, 0x67, 0x89, 0xAB, 0xCD, 0xEF, 0xFE, 0xDC, 0xBA, 0x98, 0x76, 0x54,
            0x32, 0x10,
        ]);
        assert_eq!(seed.to_string(), "0123456789abcdeffedcba9876543210");
        let serialized = serde_json::to_string(&seed).unwrap();
        assert_eq!(serialized, "\"0123456789abcdeffedcba9876543210\"");
    }

    #[test]
    fn test_parse_accepts_uppercase() {
        let seed: SpawnSeed = "0123456789ABCDEFFEDCBA9876543210".parse().unwrap();
        assert_eq!(seed.0[0], 0x01);
        assert_eq!(seed.0[15], 0x10);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            "0123".parse::<SpawnSeed>(),
            Err(ParseSpawnSeedError::InvalidLength { len: 4 })
        );
        assert!(matches!(
            "ghijklmnopqrstuvwxyzghijklmnopqr".parse::<SpawnSeed>(),
            Err(ParseSpawnSeedError::InvalidDigit { .. })
        ));

        let result: Result<SpawnSeed, _> = serde_json::from_str("\"\"");
        let err_msg = result.unwrap_err().to_string();
        assert!(err_msg.contains("invalid hex"));
    }

    #[test]
    fn test_policy_bounds() {
        assert!(SpawnPolicy::new(0.0).is_ok());
        assert!(SpawnPolicy::new(1.0).is_ok());
        assert!(SpawnPolicy::new(-0.1).is_err());
        assert!(SpawnPolicy::new(1.5).is_err());
        assert!(SpawnPolicy::new(f64::NAN).is_err());
        assert_eq!(SpawnPolicy::default().four_probability(), 0.1);
    }

    #[test]
    fn test_draw_value_follows_policy() {
        let seed: SpawnSeed = rand::rng().random();

        let mut twos = TileSpawner::with_seed(seed, SpawnPolicy::new(0.0).unwrap());
        assert!((0..100).all(|_| twos.draw_value() == 2));

        let mut fours = TileSpawner::with_seed(seed, SpawnPolicy::new(1.0).unwrap());
        assert!((0..100).all(|_| fours.draw_value() == 4));

        let mut mixed = TileSpawner::with_seed(seed, SpawnPolicy::default());
        let values: Vec<_> = (0..1000).map(|_| mixed.draw_value()).collect();
        assert!(values.iter().all(|&v| v == 2 || v == 4));
        assert!(values.iter().filter(|&&v| v == 2).count() > 700);
    }

    #[test]
    fn test_pick_cell() {
        let mut spawner = TileSpawner::new();
        assert_eq!(spawner.pick_cell(&[]), None);

        let empty = [CellPos::new(0, 1), CellPos::new(3, 2)];
        for _ in 0..50 {
            let pos = spawner.pick_cell(&empty).unwrap();
            assert!(empty.contains(&pos));
        }
    }

    #[test]
    fn test_deterministic_spawning() {
        let seed = SpawnSeed::from_bytes([
            0x12, 0x34, 0x56, 0x78, 0x9A, 0xBC, 0xDE, 0xF0, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66,
            0x77, 0x88,
        ]);
        let cells: Vec<_> = (0..4)
            .flat_map(|row| (0..4).map(move |col| CellPos::new(row, col)))
            .collect();

        let mut spawner1 = TileSpawner::with_seed(seed, SpawnPolicy::default());
        let mut spawner2 = TileSpawner::with_seed(seed, SpawnPolicy::default());
        for _ in 0..20 {
            assert_eq!(spawner1.pick_cell(&cells), spawner2.pick_cell(&cells));
            assert_eq!(spawner1.draw_value(), spawner2.draw_value());
        }
    }
}
