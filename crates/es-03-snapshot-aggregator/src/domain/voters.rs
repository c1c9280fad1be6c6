//! Validator → voters inversion

use shared_types::{AccountId, Voter};
use std::collections::HashMap;

/// Insertion-ordered map from validator to the voters backing it
///
/// Validators registered up front keep their registration order; validators
/// first seen as a nomination target are appended in first-seen order.
#[derive(Clone, Debug, Default)]
pub struct VoterMap {
    order: Vec<AccountId>,
    voters: HashMap<AccountId, Vec<Voter>>,
}

impl VoterMap {
    /// Start with an empty voter list for every known validator
    pub fn with_validators<'a>(validators: impl IntoIterator<Item = &'a AccountId>) -> Self {
        let mut map = Self::default();
        for validator in validators {
            map.ensure(validator);
        }
        map
    }

    /// Register `validator` if unknown; returns true when it was added
    pub fn ensure(&mut self, validator: &AccountId) -> bool {
        if self.voters.contains_key(validator) {
            return false;
        }
        self.order.push(validator.clone());
        self.voters.insert(validator.clone(), Vec::new());
        true
    }

    /// Append a vote; returns true when `validator` was created on demand
    pub fn add_vote(&mut self, validator: &AccountId, voter: Voter) -> bool {
        let created = self.ensure(validator);
        if let Some(list) = self.voters.get_mut(validator) {
            list.push(voter);
        }
        created
    }

    /// Consume into `(validator, voters)` pairs in registration order
    pub fn into_ordered(mut self) -> Vec<(AccountId, Vec<Voter>)> {
        self.order
            .into_iter()
            .map(|validator| {
                let voters = self.voters.remove(&validator).unwrap_or_default();
                (validator, voters)
            })
            .collect()
    }
}
