//! Row assembly over a generator tree.

use crate::registry::GeneratorTree;
use datagen_core::Row;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Produces rows from a generator tree and an owned random source.
///
/// With a seed the output is reproducible for the same tree; without one the
/// RNG is seeded from OS entropy.
pub struct RowAssembler {
    /// Generators for each column, in schema order
    tree: GeneratorTree,
    /// Random number generator owned by this assembler
    rng: StdRng,
    /// Index of the next row
    index: u64,
}

impl RowAssembler {
    pub fn new(tree: GeneratorTree, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            tree,
            rng,
            index: 0,
        }
    }

    /// Produce the next row: one value per column, in column order.
    ///
    /// Never fails and never blocks; budget checks belong to the caller.
    pub fn produce_row(&mut self) -> Row {
        let values = self.tree.generate_values(&mut self.rng);
        let row = Row::new(self.index, values);
        self.index += 1;
        row
    }

    /// Index the next row will carry.
    pub fn current_index(&self) -> u64 {
        self.index
    }

    pub fn tree(&self) -> &GeneratorTree {
        &self.tree
    }
}
