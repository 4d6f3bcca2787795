//! Table layout shared by the store backends.
//!
//! Every backend keeps one [`StoreState`] and applies the same operations to
//! it; they differ only in where the state lives.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use anyhow::Result;
use quadrix_core::error::{QuizError, StoreError};
use quadrix_core::model::{
    Answer, AnsweredEquation, Equation, EquationId, EquationSet, SetId, User, UserId,
};

/// All users and equation sets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreState {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub sets: Vec<StoredSet>,
}

/// An equation set with its equations in creation order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredSet {
    #[serde(flatten)]
    pub set: EquationSet,
    #[serde(default)]
    pub equations: Vec<StoredEquation>,
}

/// An equation row with its last recorded answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredEquation {
    #[serde(flatten)]
    pub equation: Equation,
    #[serde(default)]
    pub answer: Option<Answer>,
}

impl StoreState {
    pub fn register_user(
        &mut self,
        first_name: &str,
        last_name: &str,
        login: &str,
        now: DateTime<Utc>,
    ) -> Result<UserId> {
        if self.users.iter().any(|u| u.login == login) {
            return Err(StoreError::LoginTaken(login.to_string()).into());
        }
        let id = UserId::new();
        self.users.push(User {
            id,
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            login: login.to_string(),
            created_at: now,
        });
        Ok(id)
    }

    fn check_user(&self, owner: UserId) -> Result<()> {
        if self.users.iter().any(|u| u.id == owner) {
            Ok(())
        } else {
            Err(StoreError::UnknownUser(owner).into())
        }
    }

    pub fn create_set(&mut self, owner: UserId, now: DateTime<Utc>) -> Result<SetId> {
        self.check_user(owner)?;
        let id = SetId::new();
        self.sets.push(StoredSet {
            set: EquationSet {
                id,
                owner,
                created_at: now,
            },
            equations: Vec::new(),
        });
        Ok(id)
    }

    /// Checks every equation before adding the set.
    pub fn create_set_with(
        &mut self,
        owner: UserId,
        equations: &[Equation],
        now: DateTime<Utc>,
    ) -> Result<SetId> {
        self.check_user(owner)?;
        let id = SetId::new();
        for (i, equation) in equations.iter().enumerate() {
            if equations[..i].iter().any(|e| e.id == equation.id) {
                return Err(StoreError::DuplicateEquation(equation.id, id).into());
            }
        }
        self.sets.push(StoredSet {
            set: EquationSet {
                id,
                owner,
                created_at: now,
            },
            equations: equations
                .iter()
                .map(|equation| StoredEquation {
                    equation: equation.clone(),
                    answer: None,
                })
                .collect(),
        });
        Ok(id)
    }

    fn set(&self, id: SetId) -> Result<&StoredSet> {
        self.sets
            .iter()
            .find(|s| s.set.id == id)
            .ok_or_else(|| StoreError::UnknownSet(id).into())
    }

    fn set_mut(&mut self, id: SetId) -> Result<&mut StoredSet> {
        self.sets
            .iter_mut()
            .find(|s| s.set.id == id)
            .ok_or_else(|| StoreError::UnknownSet(id).into())
    }

    pub fn save_equation(&mut self, set: SetId, equation: &Equation) -> Result<()> {
        let stored = self.set_mut(set)?;
        if stored.equations.iter().any(|e| e.equation.id == equation.id) {
            return Err(StoreError::DuplicateEquation(equation.id, set).into());
        }
        stored.equations.push(StoredEquation {
            equation: equation.clone(),
            answer: None,
        });
        Ok(())
    }

    pub fn list_equations(&self, set: SetId) -> Result<Vec<Equation>> {
        Ok(self
            .set(set)?
            .equations
            .iter()
            .map(|e| e.equation.clone())
            .collect())
    }

    /// Last write wins.
    pub fn record_answer(&mut self, set: SetId, equation: EquationId, answer: Answer) -> Result<()> {
        let row = self
            .set_mut(set)?
            .equations
            .iter_mut()
            .find(|e| e.equation.id == equation)
            .ok_or(QuizError::UnknownEquation(equation))?;
        row.answer = Some(answer);
        Ok(())
    }

    pub fn list_answered(&self, set: SetId) -> Result<Vec<AnsweredEquation>> {
        Ok(self
            .set(set)?
            .equations
            .iter()
            .map(|e| AnsweredEquation {
                equation: e.equation.clone(),
                answer: e.answer,
            })
            .collect())
    }

    /// Ties on `created_at` go to the set created last.
    pub fn latest_set(&self, owner: UserId) -> Result<Option<SetId>> {
        self.check_user(owner)?;
        Ok(self
            .sets
            .iter()
            .filter(|s| s.set.owner == owner)
            .max_by_key(|s| s.set.created_at)
            .map(|s| s.set.id))
    }
}
