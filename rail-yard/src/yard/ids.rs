//! Identifier generation for entities created without an explicit number.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::domain::Kind;

/// What an identifier is being generated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdKind {
    Train(Kind),
    Carriage(Kind),
    Route,
}

impl IdKind {
    /// Prefix placed before the generated suffix.
    pub fn prefix(&self) -> &'static str {
        match self {
            IdKind::Train(Kind::Cargo) => "CT",
            IdKind::Train(Kind::Passenger) => "PT",
            IdKind::Carriage(kind) => kind.as_str(),
            IdKind::Route => "route",
        }
    }
}

/// Source of fresh identifiers.
///
/// The yard calls this when a caller creates an entity without a number,
/// and validates whatever comes back like any other identifier.
pub trait IdGenerator {
    fn next_id(&mut self, kind: IdKind) -> String;
}

/// Random `<prefix>_<base36>` identifiers, e.g. `cargo_0k3x9`.
#[derive(Debug, Clone)]
pub struct RandomIds {
    rng: ChaCha8Rng,
    suffix_len: usize,
}

impl RandomIds {
    /// Seeded from the operating system.
    pub fn new(suffix_len: usize) -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
            suffix_len,
        }
    }

    /// Reproducible sequence for a given seed.
    pub fn seeded(seed: u64, suffix_len: usize) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            suffix_len,
        }
    }
}

impl IdGenerator for RandomIds {
    fn next_id(&mut self, kind: IdKind) -> String {
        let suffix: String = (0..self.suffix_len)
            .map(|_| base36_digit(self.rng.gen_range(0..36)))
            .collect();
        format!("{}_{}", kind.prefix(), suffix)
    }
}

/// Counting identifiers, e.g. `CT_00001`, `cargo_00002`.
///
/// One counter is shared by all kinds.
#[derive(Debug, Clone)]
pub struct SequentialIds {
    next: u64,
    width: usize,
}

impl SequentialIds {
    pub fn new(width: usize) -> Self {
        Self { next: 1, width }
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self, kind: IdKind) -> String {
        let id = format!("{}_{:0width$}", kind.prefix(), self.next, width = self.width);
        self.next += 1;
        id
    }
}

fn base36_digit(value: u32) -> char {
    // from_digit only fails for value >= radix
    std::char::from_digit(value, 36).unwrap_or('0')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefixes() {
        assert_eq!(IdKind::Train(Kind::Cargo).prefix(), "CT");
        assert_eq!(IdKind::Train(Kind::Passenger).prefix(), "PT");
        assert_eq!(IdKind::Carriage(Kind::Cargo).prefix(), "cargo");
        assert_eq!(IdKind::Carriage(Kind::Passenger).prefix(), "passenger");
        assert_eq!(IdKind::Route.prefix(), "route");
    }

    #[test]
    fn sequential_ids_count_up() {
        let mut ids = SequentialIds::new(5);
        assert_eq!(ids.next_id(IdKind::Train(Kind::Cargo)), "CT_00001");
        assert_eq!(ids.next_id(IdKind::Carriage(Kind::Passenger)), "passenger_00002");
        assert_eq!(ids.next_id(IdKind::Route), "route_00003");
    }

    #[test]
    fn random_ids_shape() {
        let mut ids = RandomIds::new(5);
        let id = ids.next_id(IdKind::Carriage(Kind::Cargo));
        let suffix = id.strip_prefix("cargo_").unwrap();
        assert_eq!(suffix.len(), 5);
        assert!(suffix.chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    }

    #[test]
    fn seeded_ids_repeat() {
        let mut a = RandomIds::seeded(42, 5);
        let mut b = RandomIds::seeded(42, 5);
        for _ in 0..10 {
            assert_eq!(a.next_id(IdKind::Route), b.next_id(IdKind::Route));
        }
    }

    #[test]
    fn base36_digits() {
        assert_eq!(base36_digit(0), '0');
        assert_eq!(base36_digit(10), 'a');
        assert_eq!(base36_digit(35), 'z');
    }
}
