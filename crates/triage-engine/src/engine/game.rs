use serde::{Deserialize, Serialize};

use crate::{
    GameError,
    core::{collection::PatientCollection, patient::Patient, plan::TreatmentPlan, solver::Budget},
};

use super::round::{Round, RoundResults};

/// Source of synthetic patients.
///
/// A capability interface: any patient simulator implements this single
/// method. Each call yields fresh patients (typically with randomized
/// attributes); the sequence is not restartable.
pub trait PatientProvider {
    /// Produces `n` new patients.
    fn provide(&mut self, n: usize) -> Vec<Patient>;
}

/// Totals folded over a game's played rounds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize, Serialize)]
pub struct GameSummary {
    rounds_played: usize,
    total_cost: u64,
    total_expected_life_gain: f64,
    total_true_life_gain: f64,
}

impl GameSummary {
    /// Number of rounds played so far.
    #[must_use]
    pub fn rounds_played(&self) -> usize {
        self.rounds_played
    }

    /// Treatment cost summed over all played rounds.
    #[must_use]
    pub fn total_cost(&self) -> u64 {
        self.total_cost
    }

    /// Classifier-anticipated life gain summed over all played rounds.
    #[must_use]
    pub fn total_expected_life_gain(&self) -> f64 {
        self.total_expected_life_gain
    }

    /// Actually realized life gain summed over all played rounds.
    #[must_use]
    pub fn total_true_life_gain(&self) -> f64 {
        self.total_true_life_gain
    }

    fn add(&mut self, results: &RoundResults) {
        self.rounds_played += 1;
        self.total_cost += results.cost();
        self.total_expected_life_gain += results.expected_life_gain();
        self.total_true_life_gain += results.true_life_gain();
    }
}

/// A calibration game: a sequence of rounds played against a patient source.
///
/// At most one round is pending at a time. Playing the pending round
/// archives it; `end` makes the game refuse all round operations until
/// `reset`. All mutation is synchronous and single-threaded; callers needing
/// concurrency must serialize access externally.
///
/// The intended gameplay:
///
/// 1. Start a new round with some number of patients (drawn from the
///    provider).
/// 2. Submit a plan assigning a treated disease to every patient, even if
///    that is just [`Disease::Healthy`](crate::Disease::Healthy).
/// 3. Repeat.
#[derive(Debug)]
pub struct Game<P> {
    provider: P,
    round_budget: Budget,
    played_rounds: Vec<Round>,
    current_round: Option<Round>,
    has_ended: bool,
}

impl<P: PatientProvider> Game<P> {
    /// Creates a game whose rounds carry no spending limit.
    #[must_use]
    pub fn new(provider: P) -> Self {
        Self::with_budget(provider, Budget::Unlimited)
    }

    /// Creates a game whose rounds all carry the given budget.
    #[must_use]
    pub fn with_budget(provider: P, round_budget: Budget) -> Self {
        Self {
            provider,
            round_budget,
            played_rounds: Vec::new(),
            current_round: None,
            has_ended: false,
        }
    }

    /// Returns the pending round, if any.
    #[must_use]
    pub fn current_round(&self) -> Option<&Round> {
        self.current_round.as_ref()
    }

    /// Returns `true` once the game has ended; only [`Game::reset`] clears
    /// this.
    #[must_use]
    pub fn has_ended(&self) -> bool {
        self.has_ended
    }

    /// Returns the played rounds in play order.
    #[must_use]
    pub fn played_rounds(&self) -> &[Round] {
        &self.played_rounds
    }

    /// Returns the budget applied to every round this game creates.
    #[must_use]
    pub fn round_budget(&self) -> Budget {
        self.round_budget
    }

    /// Starts a new round with `n_patients` drawn from the provider and
    /// returns it.
    ///
    /// The round's identifier is the number of rounds played so far.
    ///
    /// # Errors
    ///
    /// * [`GameError::RoundInProgress`] if an unplayed round is pending.
    /// * [`GameError::GameEnded`] if the game has ended.
    pub fn start_new_round(&mut self, n_patients: usize) -> Result<&Round, GameError> {
        if self.current_round.is_some() {
            return Err(GameError::RoundInProgress);
        }
        if self.has_ended {
            return Err(GameError::GameEnded);
        }

        let identifier = self.played_rounds.len();
        let patients = self.provider.provide(n_patients);
        let round = Round::new(PatientCollection::new(patients, identifier), self.round_budget);
        log::info!("starting round {identifier} with {n_patients} patients");
        Ok(self.current_round.insert(round))
    }

    /// Plays the pending round with `plan`, archives it, and clears the
    /// pending slot.
    ///
    /// # Errors
    ///
    /// * [`GameError::NoCurrentRound`] if no round is pending.
    /// * [`GameError::GameEnded`] if the game has ended.
    /// * [`GameError::Play`] if the round rejects the plan; the round stays
    ///   pending and unchanged.
    pub fn play_current_round(&mut self, plan: &TreatmentPlan) -> Result<RoundResults, GameError> {
        let Some(round) = self.current_round.as_mut() else {
            return Err(GameError::NoCurrentRound);
        };
        if self.has_ended {
            return Err(GameError::GameEnded);
        }

        let results = round.play(plan).map_err(GameError::Play)?.clone();
        log::info!(
            "round {} played: cost {}, expected life gain {:.3}, true life gain {:.3}",
            round.identifier(),
            results.cost(),
            results.expected_life_gain(),
            results.true_life_gain(),
        );
        let round = self
            .current_round
            .take()
            .expect("the round that was just played is pending");
        self.played_rounds.push(round);
        Ok(results)
    }

    /// Discards the pending round and starts a fresh one with the same
    /// identifier, returning it read-only.
    ///
    /// `n_patients` defaults to the discarded round's patient count.
    ///
    /// # Errors
    ///
    /// * [`GameError::NoCurrentRound`] if no round is pending.
    /// * [`GameError::GameEnded`] if the game has ended.
    pub fn restart_current_round(
        &mut self,
        n_patients: Option<usize>,
    ) -> Result<&Round, GameError> {
        let Some(current) = self.current_round.as_ref() else {
            return Err(GameError::NoCurrentRound);
        };
        if self.has_ended {
            return Err(GameError::GameEnded);
        }

        let identifier = current.identifier();
        let n_patients = n_patients.unwrap_or(current.len());
        let patients = self.provider.provide(n_patients);
        let round = Round::new(PatientCollection::new(patients, identifier), self.round_budget);
        log::info!("restarting round {identifier} with {n_patients} patients");
        Ok(self.current_round.insert(round))
    }

    /// Returns the game to its initial state: no pending round, empty
    /// history, not ended.
    pub fn reset(&mut self) {
        log::debug!("resetting game");
        self.current_round = None;
        self.has_ended = false;
        self.played_rounds.clear();
    }

    /// Ends the game, discarding (not archiving) any pending round.
    pub fn end(&mut self) {
        if let Some(round) = self.current_round.take() {
            log::info!("ending game; discarding unplayed round {}", round.identifier());
        }
        self.has_ended = true;
    }

    /// Returns the `index`-th played round.
    ///
    /// # Errors
    ///
    /// [`GameError::RoundIndexOutOfRange`] if `index` is past the history.
    pub fn get_round(&self, index: usize) -> Result<&Round, GameError> {
        self.played_rounds
            .get(index)
            .ok_or(GameError::RoundIndexOutOfRange {
                index,
                len: self.played_rounds.len(),
            })
    }

    /// Folds the played rounds' results into totals.
    #[must_use]
    pub fn summary(&self) -> GameSummary {
        let mut summary = GameSummary::default();
        for round in &self.played_rounds {
            let results = round
                .results()
                .expect("archived rounds have always been played");
            summary.add(results);
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::core::disease::Disease;

    /// Deterministic provider: every patient has a likely cold.
    struct ColdWard {
        produced: usize,
    }

    impl ColdWard {
        fn new() -> Self {
            Self { produced: 0 }
        }
    }

    impl PatientProvider for ColdWard {
        fn provide(&mut self, n: usize) -> Vec<Patient> {
            (0..n)
                .map(|_| {
                    self.produced += 1;
                    Patient::new(
                        format!("Case {}", self.produced),
                        Disease::Cold,
                        BTreeMap::from([(Disease::Healthy, 0.0), (Disease::Cold, 3.0)]),
                        BTreeMap::from([(Disease::Healthy, 0.3), (Disease::Cold, 0.7)]),
                    )
                })
                .collect()
        }
    }

    fn treat_everyone(round: &Round, treated: Disease) -> TreatmentPlan {
        round
            .patients()
            .iter()
            .map(|patient| (patient.id(), treated))
            .collect()
    }

    #[test]
    fn test_start_play_archives_round() {
        let mut game = Game::new(ColdWard::new());
        assert!(game.current_round().is_none());

        game.start_new_round(2).unwrap();
        let round = game.current_round().unwrap();
        assert_eq!(round.identifier(), 0);
        assert_eq!(round.len(), 2);

        let plan = treat_everyone(game.current_round().unwrap(), Disease::Cold);
        let results = game.play_current_round(&plan).unwrap();
        assert_eq!(results.cost(), 4);
        assert_eq!(results.true_life_gain(), 6.0);

        assert!(game.current_round().is_none());
        assert_eq!(game.played_rounds().len(), 1);
        assert_eq!(game.get_round(0).unwrap().identifier(), 0);
    }

    #[test]
    fn test_second_start_without_playing_fails() {
        let mut game = Game::new(ColdWard::new());
        game.start_new_round(1).unwrap();
        assert_eq!(
            game.start_new_round(1).unwrap_err(),
            GameError::RoundInProgress
        );
    }

    #[test]
    fn test_round_identifiers_are_sequential() {
        let mut game = Game::new(ColdWard::new());
        for expected_id in 0..3 {
            game.start_new_round(1).unwrap();
            assert_eq!(game.current_round().unwrap().identifier(), expected_id);
            let plan = treat_everyone(game.current_round().unwrap(), Disease::Cold);
            game.play_current_round(&plan).unwrap();
        }
    }

    #[test]
    fn test_play_without_round_fails() {
        let mut game = Game::new(ColdWard::new());
        let err = game.play_current_round(&TreatmentPlan::new()).unwrap_err();
        assert_eq!(err, GameError::NoCurrentRound);
    }

    #[test]
    fn test_rejected_plan_keeps_round_pending() {
        let mut game = Game::with_budget(ColdWard::new(), Budget::Limited(1));
        game.start_new_round(2).unwrap();

        let plan = treat_everyone(game.current_round().unwrap(), Disease::Cold);
        let err = game.play_current_round(&plan).unwrap_err();
        assert!(matches!(err, GameError::Play(_)));
        assert!(game.current_round().is_some());
        assert!(game.played_rounds().is_empty());

        let free = treat_everyone(game.current_round().unwrap(), Disease::Healthy);
        game.play_current_round(&free).unwrap();
    }

    #[test]
    fn test_restart_redraws_patients_and_keeps_identifier() {
        let mut game = Game::new(ColdWard::new());
        game.start_new_round(2).unwrap();
        let old_ids: Vec<_> = game
            .current_round()
            .unwrap()
            .patients()
            .iter()
            .map(Patient::id)
            .collect();

        let round = game.restart_current_round(None).unwrap();
        assert_eq!(round.identifier(), 0);
        assert_eq!(round.len(), 2);
        let new_ids: Vec<_> = round.patients().iter().map(Patient::id).collect();
        assert!(new_ids.iter().all(|id| !old_ids.contains(id)));

        let round = game.restart_current_round(Some(3)).unwrap();
        assert_eq!(round.identifier(), 0);
        assert_eq!(round.len(), 3);
    }

    #[test]
    fn test_restart_without_round_fails() {
        let mut game = Game::new(ColdWard::new());
        assert_eq!(
            game.restart_current_round(None).unwrap_err(),
            GameError::NoCurrentRound
        );
    }

    #[test]
    fn test_end_discards_pending_round_and_blocks_operations() {
        let mut game = Game::new(ColdWard::new());
        game.start_new_round(1).unwrap();
        game.end();

        assert!(game.has_ended());
        assert!(game.current_round().is_none());
        assert!(game.played_rounds().is_empty());
        assert_eq!(game.start_new_round(1).unwrap_err(), GameError::GameEnded);
        assert_eq!(
            game.play_current_round(&TreatmentPlan::new()).unwrap_err(),
            GameError::NoCurrentRound
        );
        assert_eq!(
            game.restart_current_round(None).unwrap_err(),
            GameError::NoCurrentRound
        );
    }

    #[test]
    fn test_reset_returns_to_initial_state() {
        let mut game = Game::new(ColdWard::new());
        game.start_new_round(1).unwrap();
        let plan = treat_everyone(game.current_round().unwrap(), Disease::Cold);
        game.play_current_round(&plan).unwrap();
        game.end();

        game.reset();
        assert!(!game.has_ended());
        assert!(game.current_round().is_none());
        assert!(game.played_rounds().is_empty());
        game.start_new_round(1).unwrap();
        assert_eq!(game.current_round().unwrap().identifier(), 0);
    }

    #[test]
    fn test_get_round_out_of_range_fails() {
        let game = Game::new(ColdWard::new());
        assert_eq!(
            game.get_round(0).unwrap_err(),
            GameError::RoundIndexOutOfRange { index: 0, len: 0 }
        );
    }

    #[test]
    fn test_summary_totals_played_rounds() {
        let mut game = Game::new(ColdWard::new());
        for _ in 0..2 {
            game.start_new_round(2).unwrap();
            let plan = treat_everyone(game.current_round().unwrap(), Disease::Cold);
            game.play_current_round(&plan).unwrap();
        }

        let summary = game.summary();
        assert_eq!(summary.rounds_played(), 2);
        assert_eq!(summary.total_cost(), 8);
        assert!((summary.total_expected_life_gain() - 4.0 * (0.7 * 3.0)).abs() < 1e-9);
        assert_eq!(summary.total_true_life_gain(), 12.0);

        let json = serde_json::to_string(&summary).unwrap();
        let back: GameSummary = serde_json::from_str(&json).unwrap();
        assert_eq!(back, summary);
    }
}
