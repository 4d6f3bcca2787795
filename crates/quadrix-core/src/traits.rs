//! Store capability trait.
//!
//! The pipeline never talks to a concrete database. Anything that can hold
//! users, equation sets, equations, and answers with read-your-writes
//! consistency implements [`EquationStore`]; the `quadrix-store` crate
//! ships in-memory and JSON-file backends.

use async_trait::async_trait;

use crate::model::{Answer, AnsweredEquation, Equation, EquationId, SetId, UserId};

/// Persistence for users, equation sets, and recorded answers.
///
/// Backends report failures as [`StoreError`](crate::error::StoreError) or
/// [`QuizError::UnknownEquation`](crate::error::QuizError::UnknownEquation)
/// wrapped in `anyhow::Error`.
#[async_trait]
pub trait EquationStore: Send + Sync {
    /// Human-readable backend name (e.g. "memory").
    fn name(&self) -> &str;

    /// Register a user. Logins are unique.
    async fn register_user(
        &self,
        first_name: &str,
        last_name: &str,
        login: &str,
    ) -> anyhow::Result<UserId>;

    /// Create an empty equation set owned by `owner`.
    async fn create_set(&self, owner: UserId) -> anyhow::Result<SetId>;

    /// Create a set owned by `owner` holding `equations`, as one write.
    ///
    /// Either the whole set is stored or nothing is.
    async fn create_set_with(
        &self,
        owner: UserId,
        equations: &[Equation],
    ) -> anyhow::Result<SetId>;

    /// Append an equation to a set.
    async fn save_equation(&self, set: SetId, equation: &Equation) -> anyhow::Result<()>;

    /// Equations of a set in creation order.
    async fn list_equations(&self, set: SetId) -> anyhow::Result<Vec<Equation>>;

    /// Record (or overwrite) the answer for one equation of a set.
    async fn record_answer(
        &self,
        set: SetId,
        equation: EquationId,
        answer: Answer,
    ) -> anyhow::Result<()>;

    /// Equations of a set in creation order, each with its recorded answer.
    async fn list_answered(&self, set: SetId) -> anyhow::Result<Vec<AnsweredEquation>>;

    /// The most recently created set of `owner`, if any.
    async fn latest_set(&self, owner: UserId) -> anyhow::Result<Option<SetId>>;
}
