//! Round and game lifecycle.
//!
//! This module sequences the core data structures into the calibration game:
//!
//! - [`Round`] - One set of patients bound to a budget, playable exactly once
//! - [`Game`] - Sequences rounds drawn from a [`PatientProvider`]
//! - [`GameSummary`] - Totals folded over the played rounds
//!
//! # Game Flow
//!
//! A game progresses as follows:
//!
//! 1. `start_new_round(n)` draws `n` patients from the provider
//! 2. The caller (or the solver) produces a [`TreatmentPlan`](crate::TreatmentPlan)
//! 3. `play_current_round(plan)` validates and scores the plan
//! 4. The played round is archived and the current slot cleared
//! 5. Repeat, until `end()` or `reset()`
//!
//! # Example
//!
//! ```
//! use triage_engine::{Budget, Game, PatientProvider};
//! # use std::collections::BTreeMap;
//! # use triage_engine::{Disease, Patient};
//! # struct FixedProvider;
//! # impl PatientProvider for FixedProvider {
//! #     fn provide(&mut self, n: usize) -> Vec<Patient> {
//! #         (0..n)
//! #             .map(|_| {
//! #                 Patient::new(
//! #                     "Pat",
//! #                     Disease::Cold,
//! #                     BTreeMap::from([(Disease::Cold, 3.0)]),
//! #                     BTreeMap::from([(Disease::Healthy, 0.3), (Disease::Cold, 0.7)]),
//! #                 )
//! #             })
//! #             .collect()
//! #     }
//! # }
//!
//! let mut game = Game::with_budget(FixedProvider, Budget::Limited(4));
//! game.start_new_round(2)?;
//!
//! let round = game.current_round().unwrap();
//! let plan = round.optimal_treatment()?.into_plan();
//!
//! let results = game.play_current_round(&plan)?;
//! assert!(results.cost() <= 4);
//! assert_eq!(game.played_rounds().len(), 1);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub use self::{game::*, round::*};

mod game;
mod round;
