//! In-memory store.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use quadrix_core::model::{Answer, AnsweredEquation, Equation, EquationId, SetId, UserId};
use quadrix_core::traits::EquationStore;

use crate::state::StoreState;

/// A store that keeps everything in process memory.
///
/// Used by tests and by `type = "memory"` configs, where state lives only as
/// long as the process.
#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<StoreState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the current state.
    pub async fn snapshot(&self) -> StoreState {
        self.state.lock().await.clone()
    }
}

#[async_trait]
impl EquationStore for MemoryStore {
    fn name(&self) -> &str {
        "memory"
    }

    async fn register_user(
        &self,
        first_name: &str,
        last_name: &str,
        login: &str,
    ) -> anyhow::Result<UserId> {
        self.state
            .lock()
            .await
            .register_user(first_name, last_name, login, Utc::now())
    }

    async fn create_set(&self, owner: UserId) -> anyhow::Result<SetId> {
        self.state.lock().await.create_set(owner, Utc::now())
    }

    async fn create_set_with(
        &self,
        owner: UserId,
        equations: &[Equation],
    ) -> anyhow::Result<SetId> {
        self.state
            .lock()
            .await
            .create_set_with(owner, equations, Utc::now())
    }

    async fn save_equation(&self, set: SetId, equation: &Equation) -> anyhow::Result<()> {
        self.state.lock().await.save_equation(set, equation)
    }

    async fn list_equations(&self, set: SetId) -> anyhow::Result<Vec<Equation>> {
        self.state.lock().await.list_equations(set)
    }

    async fn record_answer(
        &self,
        set: SetId,
        equation: EquationId,
        answer: Answer,
    ) -> anyhow::Result<()> {
        self.state.lock().await.record_answer(set, equation, answer)
    }

    async fn list_answered(&self, set: SetId) -> anyhow::Result<Vec<AnsweredEquation>> {
        self.state.lock().await.list_answered(set)
    }

    async fn latest_set(&self, owner: UserId) -> anyhow::Result<Option<SetId>> {
        self.state.lock().await.latest_set(owner)
    }
}
