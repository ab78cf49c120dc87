//! Sabotage rubber-band
//!
//! When the player pulls ahead, the rival may hide the player's next order
//! slip. Strictly a comeback mechanic: it can never fire while the rival is
//! tied or ahead, and it is budget-limited per round.

use rand::Rng;

/// Per-round sabotage budget and trigger logic.
#[derive(Debug, Clone, Default)]
pub struct Sabotage {
    charges: u32,
}

impl Sabotage {
    /// Restock the budget at round start.
    pub fn reset(&mut self, budget: u32) {
        self.charges = budget;
    }

    /// Charges still available this round.
    pub fn charges(&self) -> u32 {
        self.charges
    }

    /// Roll for a sabotage after the player scores.
    ///
    /// Gates, in order: the rival must be strictly behind, a charge must be
    /// available, and a 1-in-`odds` draw must come up. The draw only happens
    /// (and the charge is only spent) once the first two gates pass.
    pub fn try_fire(
        &mut self,
        player_score: u32,
        opponent_score: u32,
        odds: u32,
        rng: &mut impl Rng,
    ) -> bool {
        if opponent_score >= player_score || self.charges == 0 {
            return false;
        }
        if rng.random_range(0..odds) != 0 {
            return false;
        }
        self.charges -= 1;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_never_fires_when_not_behind() {
        let mut sabotage = Sabotage::default();
        sabotage.reset(1);

        // odds of 1 would fire on every draw, so only the score gate holds
        let mut rng = Pcg32::seed_from_u64(1);
        for _ in 0..50 {
            assert!(!sabotage.try_fire(3, 3, 1, &mut rng));
            assert!(!sabotage.try_fire(3, 5, 1, &mut rng));
        }
        assert_eq!(sabotage.charges(), 1);
    }

    #[test]
    fn test_fires_at_most_budget_times() {
        let mut sabotage = Sabotage::default();
        sabotage.reset(1);
        let mut rng = Pcg32::seed_from_u64(1);

        let mut fired = 0;
        for _ in 0..200 {
            if sabotage.try_fire(5, 0, 5, &mut rng) {
                fired += 1;
            }
        }
        assert_eq!(fired, 1);
        assert_eq!(sabotage.charges(), 0);
    }

    #[test]
    fn test_zero_budget_never_fires() {
        let mut sabotage = Sabotage::default();
        sabotage.reset(0);
        let mut rng = Pcg32::seed_from_u64(1);

        for _ in 0..50 {
            assert!(!sabotage.try_fire(10, 0, 1, &mut rng));
        }
    }

    #[test]
    fn test_draw_roughly_matches_odds() {
        // With a fat budget, about a fifth of eligible rolls should fire
        let mut sabotage = Sabotage::default();
        sabotage.reset(1000);
        let mut rng = Pcg32::seed_from_u64(99);

        let mut fired = 0;
        for _ in 0..1000 {
            if sabotage.try_fire(2, 1, 5, &mut rng) {
                fired += 1;
            }
        }
        assert!((100..=320).contains(&fired), "fired {fired} of 1000");
    }

    #[test]
    fn test_reset_restocks_budget() {
        let mut sabotage = Sabotage::default();
        sabotage.reset(1);
        let mut rng = Pcg32::seed_from_u64(1);
        while !sabotage.try_fire(5, 0, 2, &mut rng) {}
        assert_eq!(sabotage.charges(), 0);

        sabotage.reset(2);
        assert_eq!(sabotage.charges(), 2);
    }
}
