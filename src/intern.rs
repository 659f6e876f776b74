//! Interning of normalized lines into compact [`Token`] ids.
//!
//! All diff algorithms in this crate operate on slices of [`Token`] rather
//! than directly on line content, so that equality checks amortize the cost
//! of hashing/comparing line text instead of repeatedly comparing strings.

use ahash::RandomState;
use hashbrown::raw::RawTable;
use std::hash::Hash;
use std::ops::Index;

/// An interned line, represented as an opaque integer.
///
/// Two (normalized) lines compare equal under the diff algorithms' notion of
/// equality if and only if they were interned to the same `Token`.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
#[repr(transparent)]
pub struct Token(pub u32);

/// A hashtable-based interner mapping normalized line values to [`Token`]s.
#[derive(Default)]
pub struct Interner<T: Hash + Eq> {
    values: Vec<T>,
    table: RawTable<Token>,
    hasher: RandomState,
}

impl<T: Hash + Eq> Interner<T> {
    /// Creates a new interner with capacity for roughly `len` distinct values.
    pub fn new(len: usize) -> Self {
        Interner {
            values: Vec::with_capacity(len),
            table: RawTable::with_capacity(len),
            hasher: RandomState::new(),
        }
    }

    /// Removes all interned values, invalidating any previously issued [`Token`]s.
    pub fn clear(&mut self) {
        self.table.clear_no_drop();
        self.values.clear();
    }

    /// Interns `value`, returning its (possibly freshly allocated) [`Token`].
    pub fn intern(&mut self, value: T) -> Token {
        let hash = self.hasher.hash_one(&value);
        if let Some(&token) = self
            .table
            .get(hash, |&it| self.values[it.0 as usize] == value)
        {
            token
        } else {
            let interned = Token(self.values.len() as u32);
            self.table.insert(hash, interned, |&token| {
                self.hasher.hash_one(&self.values[token.0 as usize])
            });
            self.values.push(value);
            interned
        }
    }

    /// The number of distinct values interned so far.
    pub fn num_tokens(&self) -> u32 {
        self.values.len() as u32
    }
}

impl<T: Hash + Eq> Index<Token> for Interner<T> {
    type Output = T;
    fn index(&self, index: Token) -> &Self::Output {
        &self.values[index.0 as usize]
    }
}
