//! Mana colors, costs and the available-mana snapshot.
//!
//! The colour system has exactly three buckets: white, black, and
//! colorless. A cost names how many white and black units it needs plus a
//! generic amount that any producer can pay.

use serde::{Deserialize, Serialize};

/// One of the three mana buckets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ManaColor {
    White,
    Black,
    Colorless,
}

impl ManaColor {
    /// Colours with their own cost requirement, in payment order.
    pub const COLORED: [ManaColor; 2] = [ManaColor::White, ManaColor::Black];

    /// All buckets, in the order "spend any mana" effects look at them.
    pub const ALL: [ManaColor; 3] = [ManaColor::White, ManaColor::Black, ManaColor::Colorless];

    /// Single-letter symbol (`W`, `B`, `C`).
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            ManaColor::White => 'W',
            ManaColor::Black => 'B',
            ManaColor::Colorless => 'C',
        }
    }
}

impl std::fmt::Display for ManaColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A mana cost: coloured requirements plus a generic amount.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ManaCost {
    pub white: u32,
    pub black: u32,
    pub generic: u32,
}

impl ManaCost {
    /// The zero cost.
    pub const FREE: ManaCost = ManaCost { white: 0, black: 0, generic: 0 };

    /// Create a cost from its three components.
    #[must_use]
    pub const fn new(white: u32, black: u32, generic: u32) -> Self {
        Self { white, black, generic }
    }

    /// Requirement for one coloured bucket. Colorless has no coloured
    /// requirement of its own; it is covered by `generic`.
    #[must_use]
    pub const fn colored(&self, color: ManaColor) -> u32 {
        match color {
            ManaColor::White => self.white,
            ManaColor::Black => self.black,
            ManaColor::Colorless => 0,
        }
    }

    /// Total units (the mana value).
    #[must_use]
    pub const fn total(&self) -> u32 {
        self.white + self.black + self.generic
    }

    /// The same cost with extra generic mana added (commander tax).
    #[must_use]
    pub const fn with_extra_generic(self, extra: u32) -> Self {
        Self { generic: self.generic + extra, ..self }
    }
}

impl std::fmt::Display for ManaCost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.total() == 0 {
            return f.write_str("{0}");
        }
        if self.generic > 0 {
            write!(f, "{{{}}}", self.generic)?;
        }
        for _ in 0..self.white {
            f.write_str("{W}")?;
        }
        for _ in 0..self.black {
            f.write_str("{B}")?;
        }
        Ok(())
    }
}

/// Snapshot of mana available from untapped producers.
///
/// A dual land counts once toward each colour it can make, so the sum of
/// the buckets can exceed the producer count.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManaPool {
    pub white: u32,
    pub black: u32,
    pub colorless: u32,
}

impl ManaPool {
    /// Count one producer's colours into the pool.
    pub fn add_producer(&mut self, colors: &[ManaColor]) {
        for color in colors {
            match color {
                ManaColor::White => self.white += 1,
                ManaColor::Black => self.black += 1,
                ManaColor::Colorless => self.colorless += 1,
            }
        }
    }

    /// Units available in one bucket.
    #[must_use]
    pub const fn get(&self, color: ManaColor) -> u32 {
        match color {
            ManaColor::White => self.white,
            ManaColor::Black => self.black,
            ManaColor::Colorless => self.colorless,
        }
    }

    /// `true` when no producer is untapped.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.white == 0 && self.black == 0 && self.colorless == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cost_total_and_tax() {
        let cost = ManaCost::new(1, 1, 0);
        assert_eq!(cost.total(), 2);

        let taxed = cost.with_extra_generic(4);
        assert_eq!(taxed, ManaCost::new(1, 1, 4));
        assert_eq!(taxed.total(), 6);
    }

    #[test]
    fn test_cost_display() {
        assert_eq!(ManaCost::new(2, 0, 3).to_string(), "{3}{W}{W}");
        assert_eq!(ManaCost::FREE.to_string(), "{0}");
        assert_eq!(ManaCost::new(0, 1, 0).to_string(), "{B}");
    }

    #[test]
    fn test_colored_lookup() {
        let cost = ManaCost::new(2, 1, 5);
        assert_eq!(cost.colored(ManaColor::White), 2);
        assert_eq!(cost.colored(ManaColor::Black), 1);
        assert_eq!(cost.colored(ManaColor::Colorless), 0);
    }

    #[test]
    fn test_pool_counts_duals_in_both_buckets() {
        let mut pool = ManaPool::default();
        assert!(pool.is_empty());

        pool.add_producer(&[ManaColor::White]);
        pool.add_producer(&[ManaColor::White, ManaColor::Black]);
        pool.add_producer(&[ManaColor::Colorless]);

        assert_eq!(pool.get(ManaColor::White), 2);
        assert_eq!(pool.get(ManaColor::Black), 1);
        assert_eq!(pool.get(ManaColor::Colorless), 1);
    }
}
