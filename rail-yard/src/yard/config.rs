//! Yard configuration.

use crate::domain::DEFAULT_MAX_NAME_LEN;

/// Configuration parameters for a [`Yard`](super::Yard).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YardConfig {
    /// Station names and route numbers must be shorter than this
    /// many characters.
    pub max_name_len: usize,

    /// Number of base-36 digits in generated identifiers.
    pub id_suffix_len: usize,

    /// How many times to draw a fresh identifier before giving up
    /// when generated ones collide with existing ones.
    pub max_id_attempts: usize,

    /// Seed for identifier generation. `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl YardConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(
        max_name_len: usize,
        id_suffix_len: usize,
        max_id_attempts: usize,
        seed: Option<u64>,
    ) -> Self {
        Self {
            max_name_len,
            id_suffix_len,
            max_id_attempts,
            seed,
        }
    }
}

impl Default for YardConfig {
    fn default() -> Self {
        Self {
            max_name_len: DEFAULT_MAX_NAME_LEN,
            id_suffix_len: 5,
            max_id_attempts: 16,
            seed: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = YardConfig::default();

        assert_eq!(config.max_name_len, 20);
        assert_eq!(config.id_suffix_len, 5);
        assert_eq!(config.max_id_attempts, 16);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn custom_config() {
        let config = YardConfig::new(32, 6, 4, Some(7));

        assert_eq!(config.max_name_len, 32);
        assert_eq!(config.id_suffix_len, 6);
        assert_eq!(config.max_id_attempts, 4);
        assert_eq!(config.seed, Some(7));
    }
}
