//! Snowflake ID - time-ordered 64-bit identifier
//!
//! Every user, conversation and message id is a Snowflake. Ids issued by one
//! generator are strictly increasing, which makes the id a stable secondary
//! sort key whenever two rows share a timestamp.
//!
//! Layout, high to low: 41 bits of milliseconds since [`Snowflake::EPOCH`],
//! 10 bits of worker id, 12 bits of per-millisecond sequence.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use std::sync::{Mutex, PoisonError};

use chrono::Utc;

const SEQUENCE_BITS: u32 = 12;
const WORKER_BITS: u32 = 10;
const SEQUENCE_MASK: i64 = (1 << SEQUENCE_BITS) - 1;

/// Time-ordered 64-bit identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Snowflake(i64);

impl Snowflake {
    /// Custom epoch: 2025-01-01 00:00:00 UTC (milliseconds)
    pub const EPOCH: i64 = 1_735_689_600_000;

    /// Largest worker id that fits the layout
    pub const MAX_WORKER_ID: u16 = (1 << WORKER_BITS) - 1;

    #[inline]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Raw value as stored in the database
    #[inline]
    pub const fn into_inner(self) -> i64 {
        self.0
    }

    /// Unix milliseconds at which the id was issued
    pub fn timestamp_millis(&self) -> i64 {
        (self.0 >> (SEQUENCE_BITS + WORKER_BITS)) + Self::EPOCH
    }

    pub fn worker_id(&self) -> u16 {
        ((self.0 >> SEQUENCE_BITS) & i64::from(Self::MAX_WORKER_ID)) as u16
    }

    /// Parse the decimal form produced by `Display`
    pub fn parse(s: &str) -> Result<Self, SnowflakeParseError> {
        s.trim()
            .parse::<i64>()
            .map(Self)
            .map_err(|_| SnowflakeParseError(s.to_string()))
    }

    fn compose(millis: i64, worker_id: u16, sequence: i64) -> Self {
        Self(
            ((millis - Self::EPOCH) << (SEQUENCE_BITS + WORKER_BITS))
                | (i64::from(worker_id) << SEQUENCE_BITS)
                | sequence,
        )
    }
}

/// Error when parsing a Snowflake from text
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid snowflake: '{0}'")]
pub struct SnowflakeParseError(String);

impl fmt::Display for Snowflake {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<i64> for Snowflake {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl FromStr for Snowflake {
    type Err = SnowflakeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// Serialized as a string so web clients never lose precision
impl Serialize for Snowflake {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Snowflake {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Number(i64),
            Text(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Number(id) => Ok(Self(id)),
            Repr::Text(text) => Self::parse(&text).map_err(serde::de::Error::custom),
        }
    }
}

#[derive(Debug, Default)]
struct Clock {
    last_millis: i64,
    sequence: i64,
}

/// Snowflake ID generator
///
/// Keeps a logical clock that never runs backwards: when the wall clock
/// falls behind the last issued millisecond, or a millisecond runs out of
/// sequence numbers, ids continue from the next logical millisecond.
#[derive(Debug)]
pub struct SnowflakeGenerator {
    worker_id: u16,
    clock: Mutex<Clock>,
}

impl SnowflakeGenerator {
    /// # Panics
    /// Panics if `worker_id` exceeds [`Snowflake::MAX_WORKER_ID`]
    pub fn new(worker_id: u16) -> Self {
        assert!(
            worker_id <= Snowflake::MAX_WORKER_ID,
            "worker id {worker_id} does not fit in {WORKER_BITS} bits"
        );
        Self {
            worker_id,
            clock: Mutex::new(Clock::default()),
        }
    }

    /// Issue the next id
    pub fn generate(&self) -> Snowflake {
        let now = Utc::now().timestamp_millis();
        // The clock holds plain integers, so a poisoned lock is still usable
        let mut clock = self.clock.lock().unwrap_or_else(PoisonError::into_inner);

        if now > clock.last_millis {
            clock.last_millis = now;
            clock.sequence = 0;
        } else if clock.sequence == SEQUENCE_MASK {
            clock.last_millis += 1;
            clock.sequence = 0;
        } else {
            clock.sequence += 1;
        }

        Snowflake::compose(clock.last_millis, self.worker_id, clock.sequence)
    }

    pub fn worker_id(&self) -> u16 {
        self.worker_id
    }
}

impl Default for SnowflakeGenerator {
    fn default() -> Self {
        Self::new(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_parse_and_display_agree() {
        let id = Snowflake::new(123_456_789);
        assert_eq!(Snowflake::parse(&id.to_string()).unwrap(), id);
        assert_eq!(" 42 ".parse::<Snowflake>().unwrap(), Snowflake::new(42));
        assert!(Snowflake::parse("conv-1").is_err());
    }

    #[test]
    fn test_json_uses_strings_but_accepts_numbers() {
        let id = Snowflake::new(123_456_789_012_345_678);
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"123456789012345678\"");

        let from_text: Snowflake = serde_json::from_str("\"123456789012345678\"").unwrap();
        let from_number: Snowflake = serde_json::from_str("123456789012345678").unwrap();
        assert_eq!(from_text, id);
        assert_eq!(from_number, id);
        assert!(serde_json::from_str::<Snowflake>("\"abc\"").is_err());
    }

    #[test]
    fn test_generated_ids_are_strictly_increasing() {
        let gen = SnowflakeGenerator::new(3);
        let mut last = Snowflake::default();
        for _ in 0..10_000 {
            let id = gen.generate();
            assert!(id > last);
            last = id;
        }
    }

    #[test]
    fn test_sequence_exhaustion_borrows_next_millisecond() {
        let gen = SnowflakeGenerator::new(1);
        let far_future = Utc::now().timestamp_millis() + 60_000;
        {
            let mut clock = gen.clock.lock().unwrap();
            clock.last_millis = far_future;
            clock.sequence = SEQUENCE_MASK;
        }

        let id = gen.generate();
        assert_eq!(id.timestamp_millis(), far_future + 1);
        assert_eq!(id.into_inner() & SEQUENCE_MASK, 0);
    }

    #[test]
    fn test_worker_id_and_timestamp_are_encoded() {
        let before = Utc::now().timestamp_millis();
        let id = SnowflakeGenerator::new(Snowflake::MAX_WORKER_ID).generate();
        let after = Utc::now().timestamp_millis();

        assert_eq!(id.worker_id(), Snowflake::MAX_WORKER_ID);
        assert!((before..=after).contains(&id.timestamp_millis()));
    }

    #[test]
    #[should_panic(expected = "does not fit")]
    fn test_oversized_worker_id_panics() {
        let _ = SnowflakeGenerator::new(Snowflake::MAX_WORKER_ID + 1);
    }

    #[test]
    fn test_generator_shared_across_threads() {
        let gen = Arc::new(SnowflakeGenerator::new(1));
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let gen = Arc::clone(&gen);
                thread::spawn(move || (0..1000).map(|_| gen.generate()).collect::<Vec<_>>())
            })
            .collect();

        let ids: HashSet<_> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();
        assert_eq!(ids.len(), 4000);
    }
}
