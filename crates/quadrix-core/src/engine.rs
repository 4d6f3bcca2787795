//! Quiz engine orchestrator.
//!
//! Coordinates the generator, the store, the verifier, and the aggregator
//! for one request at a time. All numeric work is synchronous; only store
//! calls are awaited.

use std::collections::HashMap;
use std::ops::RangeInclusive;
use std::sync::Arc;

use anyhow::Result;
use rand::Rng;

use crate::error::QuizError;
use crate::generator::{self, COUNT_RANGE};
use crate::model::{Answer, EquationId, SetId, SetListing, UserId};
use crate::statistics::{verify_and_score, ScoreSummary};
use crate::traits::EquationStore;

/// Configuration for the quiz engine.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Accepted equation counts per generation request.
    pub count_range: RangeInclusive<usize>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            count_range: COUNT_RANGE,
        }
    }
}

/// The central quiz engine.
pub struct QuizEngine {
    store: Arc<dyn EquationStore>,
    config: EngineConfig,
}

impl QuizEngine {
    pub fn new(store: Arc<dyn EquationStore>, config: EngineConfig) -> Self {
        Self { store, config }
    }

    pub fn store(&self) -> &Arc<dyn EquationStore> {
        &self.store
    }

    /// Register a new user and return their id.
    pub async fn register(&self, first_name: &str, last_name: &str, login: &str) -> Result<UserId> {
        let (first_name, last_name, login) = (first_name.trim(), last_name.trim(), login.trim());
        for (field, value) in [
            ("first_name", first_name),
            ("last_name", last_name),
            ("login", login),
        ] {
            if value.is_empty() {
                return Err(QuizError::InvalidInput(format!("{field} must not be empty")).into());
            }
        }

        let id = self.store.register_user(first_name, last_name, login).await?;
        tracing::info!(user = %id, login, "registered user");
        Ok(id)
    }

    /// Generate a new equation set for `owner` and persist it.
    ///
    /// The count is validated before anything is written, and the set is
    /// stored in a single call so a failed save leaves no partial set.
    pub async fn new_set<R: Rng + ?Sized>(
        &self,
        owner: UserId,
        count: usize,
        rng: &mut R,
    ) -> Result<SetListing> {
        generator::check_count(count, &self.config.count_range)?;
        let equations = generator::generate(rng, count)?;

        let set_id = self.store.create_set_with(owner, &equations).await?;

        tracing::info!(user = %owner, set = %set_id, count, "generated equation set");
        Ok(SetListing::from_equations(set_id, &equations))
    }

    /// The most recent equation set of `owner`.
    pub async fn latest_set(&self, owner: UserId) -> Result<SetListing> {
        let set_id = self
            .store
            .latest_set(owner)
            .await?
            .ok_or(QuizError::NoSets(owner))?;
        self.list_set(set_id).await
    }

    /// List the equations of a set in display order.
    pub async fn list_set(&self, set_id: SetId) -> Result<SetListing> {
        let equations = self.store.list_equations(set_id).await?;
        tracing::debug!(set = %set_id, count = equations.len(), "listed equation set");
        Ok(SetListing::from_equations(set_id, &equations))
    }

    /// Record answers for a set and score the whole set.
    ///
    /// Every answer is checked (finite values, equation belongs to the set)
    /// before any of them is written, so a bad request leaves the store
    /// untouched. Equations without an answer count as unsolved.
    pub async fn submit_and_score(
        &self,
        set_id: SetId,
        answers: &HashMap<EquationId, Answer>,
    ) -> Result<ScoreSummary> {
        let equations = self.store.list_equations(set_id).await?;

        for (equation_id, answer) in answers {
            answer.validate(*equation_id)?;
            if !equations.iter().any(|eq| eq.id == *equation_id) {
                return Err(QuizError::UnknownEquation(*equation_id).into());
            }
        }

        for (equation_id, answer) in answers {
            self.store.record_answer(set_id, *equation_id, *answer).await?;
        }

        let answered = self.store.list_answered(set_id).await?;
        let summary = verify_and_score(&answered)?;

        tracing::info!(
            set = %set_id,
            submitted = answers.len(),
            count = summary.count,
            correct = summary.correct,
            rate = summary.rate,
            "scored equation set"
        );
        Ok(summary)
    }

    /// Score a set with whatever answers are already recorded.
    pub async fn score(&self, set_id: SetId) -> Result<ScoreSummary> {
        let answered = self.store.list_answered(set_id).await?;
        Ok(verify_and_score(&answered)?)
    }
}
