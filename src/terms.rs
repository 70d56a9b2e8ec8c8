pub use fixed_map::key::Key as Term;
pub use fixed_map::Key;
use fixed_map::Map as FixedMap;

use crate::error::Result;
use crate::membership::Triangle;

/// The fuzzy sets of one variable, keyed by a term enum.
pub struct Terms<K: Term>(pub(crate) FixedMap<K, Triangle>);

impl<K: Term> Default for Terms<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Term> Terms<K> {
    pub fn new() -> Self {
        Self(FixedMap::new())
    }

    /// Registers a triangular set `[a, b, c]` under `key`, replacing any
    /// previous set for the same key.
    pub fn insert(&mut self, key: K, [a, b, c]: [f64; 3]) -> Result<()> {
        self.0.insert(key, Triangle::new(a, b, c)?);

        Ok(())
    }
}
