//! Persistence seams for career data.
//!
//! Stores are keyed by a player id. Implementations report failures as
//! [`StoreError`]; callers decide whether a failure matters.

use std::collections::HashMap;

use crate::error::StoreError;
use crate::rival::Rival;

pub trait RivalStore {
    /// `Ok(None)` when nothing has been saved for the player yet.
    fn load_rivals(&self, player_id: &str) -> Result<Option<Vec<Rival>>, StoreError>;
    fn save_rivals(&mut self, player_id: &str, rivals: &[Rival]) -> Result<(), StoreError>;
}

pub trait FormMeterStore {
    /// Unknown players read as 0.
    fn get_form_meter(&self, player_id: &str) -> Result<u8, StoreError>;
    fn set_form_meter(&mut self, player_id: &str, value: u8) -> Result<(), StoreError>;
}

/// Everything a career session persists.
pub trait CareerStore: RivalStore + FormMeterStore {}

impl<T: RivalStore + FormMeterStore> CareerStore for T {}

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    rivals: HashMap<String, Vec<Rival>>,
    form: HashMap<String, u8>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RivalStore for MemoryStore {
    fn load_rivals(&self, player_id: &str) -> Result<Option<Vec<Rival>>, StoreError> {
        Ok(self.rivals.get(player_id).cloned())
    }

    fn save_rivals(&mut self, player_id: &str, rivals: &[Rival]) -> Result<(), StoreError> {
        self.rivals.insert(player_id.to_string(), rivals.to_vec());
        Ok(())
    }
}

impl FormMeterStore for MemoryStore {
    fn get_form_meter(&self, player_id: &str) -> Result<u8, StoreError> {
        Ok(self.form.get(player_id).copied().unwrap_or(0))
    }

    fn set_form_meter(&mut self, player_id: &str, value: u8) -> Result<(), StoreError> {
        self.form.insert(player_id.to_string(), value);
        Ok(())
    }
}
