//! Combination rules deciding which groups of cards form a valid set.
//!
//! The coordination core only consults these as pure predicates over a
//! caller-supplied card list, so any rule set can be plugged in through
//! [`CombinationOracle`].

use super::entities::Card;

/// Pure predicate over groups of cards.
pub trait CombinationOracle: Send + Sync {
    /// Number of cards that make up one combination.
    fn combination_size(&self) -> usize;

    /// Whether `cards` form a valid combination.
    fn test_combination(&self, cards: &[Card]) -> bool;

    /// Up to `limit` valid combinations drawn from `pool`.
    fn find_combinations(&self, pool: &[Card], limit: usize) -> Vec<Vec<Card>> {
        let k = self.combination_size();
        let mut found = Vec::new();
        if limit == 0 || k == 0 || pool.len() < k {
            return found;
        }

        let mut idx: Vec<usize> = (0..k).collect();
        let mut candidate = Vec::with_capacity(k);
        loop {
            candidate.clear();
            candidate.extend(idx.iter().map(|&i| pool[i]));
            if self.test_combination(&candidate) {
                found.push(candidate.clone());
                if found.len() >= limit {
                    return found;
                }
            }

            // Advance to the next k-combination in lexicographic order.
            let mut pos = k;
            while pos > 0 {
                pos -= 1;
                if idx[pos] < pool.len() - k + pos {
                    idx[pos] += 1;
                    for next in pos + 1..k {
                        idx[next] = idx[next - 1] + 1;
                    }
                    break;
                }
                if pos == 0 {
                    return found;
                }
            }
        }
    }

    /// Whether at least one valid combination exists in `pool`.
    fn has_any_combination(&self, pool: &[Card]) -> bool {
        !self.find_combinations(pool, 1).is_empty()
    }
}

/// Classic "Set" rules.
///
/// Card ids are read as `feature_count` digits in base `feature_size`.
/// A group of `feature_size` distinct cards is valid when, for every
/// feature, the cards either all agree or all differ.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SetRules {
    feature_size: usize,
    feature_count: usize,
}

impl SetRules {
    pub const fn new(feature_size: usize, feature_count: usize) -> Self {
        Self {
            feature_size,
            feature_count,
        }
    }

    /// Deck size implied by these rules, `None` when it overflows.
    pub fn deck_size(&self) -> Option<usize> {
        u32::try_from(self.feature_count)
            .ok()
            .and_then(|count| self.feature_size.checked_pow(count))
    }

    /// Feature values of `card`, least significant feature first.
    pub fn features(&self, card: Card) -> Vec<usize> {
        let mut rest = card.0 as usize;
        (0..self.feature_count)
            .map(|_| {
                let digit = rest % self.feature_size;
                rest /= self.feature_size;
                digit
            })
            .collect()
    }
}

impl Default for SetRules {
    fn default() -> Self {
        Self::new(3, 4)
    }
}

impl CombinationOracle for SetRules {
    fn combination_size(&self) -> usize {
        self.feature_size
    }

    fn test_combination(&self, cards: &[Card]) -> bool {
        if cards.len() != self.feature_size {
            return false;
        }

        let features: Vec<Vec<usize>> = cards.iter().map(|&c| self.features(c)).collect();
        (0..self.feature_count).all(|f| {
            let mut values: Vec<usize> = features.iter().map(|card| card[f]).collect();
            values.sort_unstable();
            values.dedup();
            values.len() == 1 || values.len() == self.feature_size
        }) && {
            let mut ids: Vec<u32> = cards.iter().map(|c| c.0).collect();
            ids.sort_unstable();
            ids.dedup();
            ids.len() == cards.len()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(digits: [u32; 4]) -> Card {
        Card(digits[0] + 3 * digits[1] + 9 * digits[2] + 27 * digits[3])
    }

    #[test]
    fn test_features_decode_base_three() {
        let rules = SetRules::default();
        assert_eq!(rules.features(Card(0)), vec![0, 0, 0, 0]);
        assert_eq!(rules.features(Card(80)), vec![2, 2, 2, 2]);
        assert_eq!(rules.features(card([1, 0, 2, 1])), vec![1, 0, 2, 1]);
    }

    #[test]
    fn test_deck_size() {
        assert_eq!(SetRules::default().deck_size(), Some(81));
        assert_eq!(SetRules::new(3, 2).deck_size(), Some(9));
        assert_eq!(SetRules::new(3, 81).deck_size(), None);
    }

    #[test]
    fn test_all_same_or_all_different_is_valid() {
        let rules = SetRules::default();
        let cards = [card([0, 0, 0, 0]), card([1, 0, 1, 0]), card([2, 0, 2, 0])];
        assert!(rules.test_combination(&cards));
    }

    #[test]
    fn test_two_alike_one_different_is_invalid() {
        let rules = SetRules::default();
        let cards = [card([0, 0, 0, 0]), card([0, 0, 0, 1]), card([1, 0, 0, 2])];
        assert!(!rules.test_combination(&cards));
    }

    #[test]
    fn test_wrong_size_or_duplicates_are_invalid() {
        let rules = SetRules::default();
        assert!(!rules.test_combination(&[Card(0), Card(1)]));
        assert!(!rules.test_combination(&[Card(0), Card(0), Card(0)]));
    }

    #[test]
    fn test_find_respects_limit() {
        let rules = SetRules::default();
        let deck: Vec<Card> = (0..81).map(Card).collect();
        assert_eq!(rules.find_combinations(&deck, 1).len(), 1);
        assert_eq!(rules.find_combinations(&deck, 5).len(), 5);
    }

    #[test]
    fn test_full_deck_has_1080_sets() {
        let rules = SetRules::default();
        let deck: Vec<Card> = (0..81).map(Card).collect();
        assert_eq!(rules.find_combinations(&deck, usize::MAX).len(), 1080);
    }

    #[test]
    fn test_small_pool_without_combination() {
        let rules = SetRules::default();
        let pool = [card([0, 0, 0, 0]), card([0, 0, 0, 1]), card([1, 0, 0, 2])];
        assert!(!rules.has_any_combination(&pool));
        assert!(!rules.has_any_combination(&pool[..2]));
    }
}
