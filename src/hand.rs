//! Per-color reserve of captured pieces.

use std::fmt;

use crate::piece::PieceKind;

/// Counts of captured pieces available to drop, one slot per droppable kind.
///
/// Kings never enter a hand, and no slot grows past the kind's supply;
/// [`Hand::add`] refuses both.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Hand {
    counts: [u8; 7],
}

impl Hand {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(kind: PieceKind) -> Option<usize> {
        PieceKind::DROPPABLE.iter().position(|&k| k == kind)
    }

    pub fn count(&self, kind: PieceKind) -> u8 {
        Self::slot(kind).map_or(0, |i| self.counts[i])
    }

    pub fn contains(&self, kind: PieceKind) -> bool {
        self.count(kind) > 0
    }

    /// Add one piece. Returns `false` (and changes nothing) for a King or
    /// when every copy of the kind is already held.
    pub fn add(&mut self, kind: PieceKind) -> bool {
        let Some(i) = Self::slot(kind) else {
            return false;
        };
        match self.counts[i].checked_add(1) {
            Some(n) if n <= kind.supply() => {
                self.counts[i] = n;
                true
            }
            _ => false,
        }
    }

    /// Take one piece out. Returns `false` if none was held.
    pub fn take(&mut self, kind: PieceKind) -> bool {
        match Self::slot(kind) {
            Some(i) if self.counts[i] > 0 => {
                self.counts[i] -= 1;
                true
            }
            _ => false,
        }
    }

    pub fn total(&self) -> u32 {
        self.counts.iter().map(|&c| c as u32).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Held kinds with their counts, in hand order, skipping empty slots.
    pub fn iter(&self) -> impl Iterator<Item = (PieceKind, u8)> + '_ {
        PieceKind::DROPPABLE
            .iter()
            .zip(self.counts.iter())
            .filter(|&(_, &n)| n > 0)
            .map(|(&k, &n)| (k, n))
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "-");
        }
        for (kind, n) in self.iter() {
            if n > 1 {
                write!(f, "{n}")?;
            }
            write!(f, "{}", kind.letter())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_take() {
        let mut hand = Hand::new();
        assert!(hand.add(PieceKind::Pawn));
        assert!(hand.add(PieceKind::Pawn));
        assert_eq!(hand.count(PieceKind::Pawn), 2);
        assert!(hand.take(PieceKind::Pawn));
        assert_eq!(hand.count(PieceKind::Pawn), 1);
        assert!(!hand.take(PieceKind::Rook));
        assert_eq!(hand.total(), 1);
    }

    #[test]
    fn test_king_never_enters() {
        let mut hand = Hand::new();
        assert!(!hand.add(PieceKind::King));
        assert!(hand.is_empty());
        assert!(!hand.contains(PieceKind::King));
    }

    #[test]
    fn test_add_stops_at_supply() {
        let mut hand = Hand::new();
        for _ in 0..18 {
            assert!(hand.add(PieceKind::Pawn));
        }
        assert!(!hand.add(PieceKind::Pawn));
        assert_eq!(hand.count(PieceKind::Pawn), 18);

        assert!(hand.add(PieceKind::Rook));
        assert!(hand.add(PieceKind::Rook));
        assert!(!hand.add(PieceKind::Rook));
        assert_eq!(hand.total(), 20);
    }

    #[test]
    fn test_display() {
        let mut hand = Hand::new();
        assert_eq!(hand.to_string(), "-");
        hand.add(PieceKind::Pawn);
        hand.add(PieceKind::Pawn);
        hand.add(PieceKind::Rook);
        assert_eq!(hand.to_string(), "R2P");
    }
}
