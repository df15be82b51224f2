//! Supply module - next-piece selection
//!
//! Three interchangeable policies, chosen once when the session is built:
//!
//! - **Plain random**: every draw is an independent uniform pick from the
//!   full catalog (repeats are possible).
//! - **Shuffled bag**: all eight variants are shuffled into a bag and drawn
//!   without replacement; the bag is reshuffled once empty.
//! - **Fixed sequence**: variants come from a caller-supplied list in order.
//!   Running off the end of the list is reported as [`Draw::Exhausted`].
//!
//! Randomness comes from a seeded `StdRng`, so a seed fully determines the
//! piece order.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::types::{Variant, BAG_SIZE};

/// Randomization policy as configured
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", content = "sequence", rename_all = "kebab-case")]
pub enum SupplyMode {
    PlainRandom,
    #[default]
    ShuffledBag,
    FixedSequence(Vec<Variant>),
}

impl SupplyMode {
    /// The stock puzzle sequence: I, O, C, T, J, C, L
    pub fn default_sequence() -> Self {
        SupplyMode::FixedSequence(vec![
            Variant::I,
            Variant::O,
            Variant::C,
            Variant::T,
            Variant::J,
            Variant::C,
            Variant::L,
        ])
    }

    pub fn is_fixed_sequence(&self) -> bool {
        matches!(self, SupplyMode::FixedSequence(_))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SupplyMode::PlainRandom => "plain-random",
            SupplyMode::ShuffledBag => "shuffled-bag",
            SupplyMode::FixedSequence(_) => "fixed-sequence",
        }
    }
}

/// Result of asking the supply for a piece
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Draw {
    Piece(Variant),
    /// The fixed sequence ran out; nothing should be placed
    Exhausted,
}

#[derive(Debug, Clone)]
enum Policy {
    Random,
    Bag {
        bag: [Variant; BAG_SIZE],
        cursor: usize,
    },
    Sequence {
        queue: Vec<Variant>,
        cursor: usize,
    },
}

/// Piece generator
#[derive(Debug, Clone)]
pub struct PieceSupply {
    policy: Policy,
    rng: StdRng,
}

impl PieceSupply {
    pub fn new(mode: &SupplyMode, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let policy = match mode {
            SupplyMode::PlainRandom => Policy::Random,
            SupplyMode::ShuffledBag => Policy::Bag {
                bag: shuffled_bag(&mut rng),
                cursor: 0,
            },
            SupplyMode::FixedSequence(queue) => Policy::Sequence {
                queue: queue.clone(),
                cursor: 0,
            },
        };
        Self { policy, rng }
    }

    /// Draw the next piece
    pub fn next(&mut self) -> Draw {
        match &mut self.policy {
            Policy::Random => Draw::Piece(random_variant(&mut self.rng)),
            Policy::Bag { bag, cursor } => {
                if *cursor >= BAG_SIZE {
                    *bag = shuffled_bag(&mut self.rng);
                    *cursor = 0;
                }
                let variant = bag[*cursor];
                *cursor += 1;
                Draw::Piece(variant)
            }
            Policy::Sequence { queue, cursor } => match queue.get(*cursor) {
                Some(&variant) => {
                    *cursor += 1;
                    Draw::Piece(variant)
                }
                None => {
                    *cursor = 0;
                    Draw::Exhausted
                }
            },
        }
    }

    /// Preview the next draw without consuming it
    ///
    /// Random draws are previewed on a clone of the RNG, so the preview always
    /// matches the following [`next`](Self::next).
    pub fn peek(&self) -> Option<Variant> {
        match &self.policy {
            Policy::Random => {
                let mut rng = self.rng.clone();
                Some(random_variant(&mut rng))
            }
            Policy::Bag { bag, cursor } => {
                if *cursor < BAG_SIZE {
                    return Some(bag[*cursor]);
                }
                let mut rng = self.rng.clone();
                Some(shuffled_bag(&mut rng)[0])
            }
            Policy::Sequence { queue, cursor } => queue.get(*cursor).copied(),
        }
    }

    /// Rewind for a fresh game
    ///
    /// Sequences restart from the first entry; bags are reshuffled.
    pub fn reset(&mut self) {
        match &mut self.policy {
            Policy::Random => {}
            Policy::Bag { bag, cursor } => {
                *bag = shuffled_bag(&mut self.rng);
                *cursor = 0;
            }
            Policy::Sequence { cursor, .. } => *cursor = 0,
        }
    }

    /// True when the last variant handed out by a fixed sequence is the bonus
    /// shape
    pub fn bonus_pending(&self) -> bool {
        match &self.policy {
            Policy::Sequence { queue, cursor } => {
                *cursor > 0 && queue.get(*cursor - 1) == Some(&Variant::BONUS)
            }
            _ => false,
        }
    }

    pub fn is_fixed_sequence(&self) -> bool {
        matches!(self.policy, Policy::Sequence { .. })
    }

    /// Draws left before the current bag or sequence runs out
    pub fn remaining(&self) -> Option<usize> {
        match &self.policy {
            Policy::Random => None,
            Policy::Bag { cursor, .. } => Some(BAG_SIZE.saturating_sub(*cursor)),
            Policy::Sequence { queue, cursor } => Some(queue.len().saturating_sub(*cursor)),
        }
    }
}

fn shuffled_bag(rng: &mut StdRng) -> [Variant; BAG_SIZE] {
    let mut bag = Variant::ALL;
    bag.shuffle(rng);
    bag
}

fn random_variant(rng: &mut StdRng) -> Variant {
    Variant::ALL[rng.gen_range(0..Variant::ALL.len())]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draw_variant(supply: &mut PieceSupply) -> Variant {
        match supply.next() {
            Draw::Piece(v) => v,
            Draw::Exhausted => panic!("unexpected exhaustion"),
        }
    }

    #[test]
    fn test_bag_yields_permutations() {
        let mut supply = PieceSupply::new(&SupplyMode::ShuffledBag, 7);
        for _ in 0..5 {
            let mut drawn: Vec<Variant> = (0..BAG_SIZE).map(|_| draw_variant(&mut supply)).collect();
            drawn.sort();
            assert_eq!(drawn, Variant::ALL.to_vec());
        }
    }

    #[test]
    fn test_bag_remaining_counts_down() {
        let mut supply = PieceSupply::new(&SupplyMode::ShuffledBag, 1);
        assert_eq!(supply.remaining(), Some(8));
        supply.next();
        assert_eq!(supply.remaining(), Some(7));
        for _ in 0..7 {
            supply.next();
        }
        assert_eq!(supply.remaining(), Some(0));
        supply.next();
        assert_eq!(supply.remaining(), Some(7));
    }

    #[test]
    fn test_same_seed_same_order() {
        for mode in [SupplyMode::ShuffledBag, SupplyMode::PlainRandom] {
            let mut a = PieceSupply::new(&mode, 12345);
            let mut b = PieceSupply::new(&mode, 12345);
            for _ in 0..40 {
                assert_eq!(a.next(), b.next());
            }
        }
    }

    #[test]
    fn test_peek_matches_next() {
        for mode in [SupplyMode::ShuffledBag, SupplyMode::PlainRandom, SupplyMode::default_sequence()] {
            let mut supply = PieceSupply::new(&mode, 99);
            for _ in 0..7 {
                let peeked = supply.peek();
                assert_eq!(peeked.map(Draw::Piece), Some(supply.next()), "{:?}", mode);
            }
        }
    }

    #[test]
    fn test_bag_peek_across_boundary() {
        let mut supply = PieceSupply::new(&SupplyMode::ShuffledBag, 3);
        for _ in 0..BAG_SIZE {
            supply.next();
        }
        let peeked = supply.peek();
        assert_eq!(peeked.map(Draw::Piece), Some(supply.next()));
    }

    #[test]
    fn test_sequence_in_order_then_exhausted() {
        let mode = SupplyMode::FixedSequence(vec![Variant::I, Variant::T, Variant::C]);
        let mut supply = PieceSupply::new(&mode, 0);
        assert_eq!(supply.next(), Draw::Piece(Variant::I));
        assert_eq!(supply.next(), Draw::Piece(Variant::T));
        assert_eq!(supply.next(), Draw::Piece(Variant::C));
        assert_eq!(supply.peek(), None);
        assert_eq!(supply.next(), Draw::Exhausted);
        // Cursor rewinds after exhaustion
        assert_eq!(supply.next(), Draw::Piece(Variant::I));
    }

    #[test]
    fn test_sequence_bonus_pending() {
        let mode = SupplyMode::FixedSequence(vec![Variant::C, Variant::O]);
        let mut supply = PieceSupply::new(&mode, 0);
        assert!(!supply.bonus_pending());
        supply.next();
        assert!(supply.bonus_pending());
        supply.next();
        assert!(!supply.bonus_pending());
    }

    #[test]
    fn test_bag_never_bonus() {
        let mut supply = PieceSupply::new(&SupplyMode::ShuffledBag, 0);
        for _ in 0..16 {
            supply.next();
            assert!(!supply.bonus_pending());
        }
    }

    #[test]
    fn test_reset_rewinds_sequence() {
        let mut supply = PieceSupply::new(&SupplyMode::default_sequence(), 0);
        supply.next();
        supply.next();
        supply.reset();
        assert_eq!(supply.next(), Draw::Piece(Variant::I));
    }

    #[test]
    fn test_reset_starts_full_bag() {
        let mut supply = PieceSupply::new(&SupplyMode::ShuffledBag, 5);
        supply.next();
        supply.next();
        supply.reset();
        let mut drawn: Vec<Variant> = (0..BAG_SIZE).map(|_| draw_variant(&mut supply)).collect();
        drawn.sort();
        assert_eq!(drawn, Variant::ALL.to_vec());
    }

    #[test]
    fn test_plain_random_covers_catalog() {
        let mut supply = PieceSupply::new(&SupplyMode::PlainRandom, 42);
        let mut seen = [false; BAG_SIZE];
        for _ in 0..500 {
            seen[draw_variant(&mut supply).index()] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_supply_mode_json() {
        let mode: SupplyMode = serde_json::from_str(r#"{"mode":"fixed-sequence","sequence":["i","c"]}"#).unwrap();
        assert_eq!(mode, SupplyMode::FixedSequence(vec![Variant::I, Variant::C]));

        let mode: SupplyMode = serde_json::from_str(r#"{"mode":"plain-random"}"#).unwrap();
        assert_eq!(mode, SupplyMode::PlainRandom);
    }
}
