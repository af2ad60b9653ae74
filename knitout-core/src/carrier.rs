//! Carrier state: which carriers are in, and which are parked on the hook.

use crate::error::{KnitoutError, Result};
use std::collections::BTreeMap;

/// Tracks active carriers.
///
/// Every transition takes an ordered list of names and is all-or-nothing:
/// the whole list is checked against a staged copy before anything changes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CarrierState {
    /// Active carriers; the value is whether the carrier is on the hook.
    active: BTreeMap<String, bool>,
}

impl CarrierState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_in(&self, carrier: &str) -> bool {
        self.active.contains_key(carrier)
    }

    pub fn is_on_hook(&self, carrier: &str) -> bool {
        self.active.get(carrier).copied().unwrap_or(false)
    }

    /// Active carriers with their hook flag, ordered by name.
    pub fn active(&self) -> impl Iterator<Item = (&str, bool)> {
        self.active.iter().map(|(name, hook)| (name.as_str(), *hook))
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    /// Brings carriers in, optionally parked on the insertion hook.
    pub fn bring_in(&mut self, carriers: &[String], use_hook: bool) -> Result<()> {
        if carriers.is_empty() {
            return Err(KnitoutError::EmptyCarrierSet {
                operation: if use_hook { "inhook" } else { "in" },
            });
        }

        let mut staged = self.active.clone();
        for carrier in carriers {
            if staged.contains_key(carrier) {
                return Err(KnitoutError::CarrierAlreadyIn {
                    carrier: carrier.clone(),
                });
            }
            staged.insert(carrier.clone(), use_hook);
        }

        self.active = staged;
        Ok(())
    }

    /// Releases carriers from the insertion hook.
    pub fn release_hook(&mut self, carriers: &[String]) -> Result<()> {
        if carriers.is_empty() {
            return Err(KnitoutError::EmptyCarrierSet {
                operation: "releasehook",
            });
        }

        let mut staged = self.active.clone();
        for carrier in carriers {
            match staged.get_mut(carrier) {
                None => {
                    return Err(KnitoutError::CarrierNotIn {
                        carrier: carrier.clone(),
                    })
                }
                Some(false) => {
                    return Err(KnitoutError::CarrierNotInHook {
                        carrier: carrier.clone(),
                    })
                }
                Some(hook) => *hook = false,
            }
        }

        self.active = staged;
        Ok(())
    }

    /// Takes carriers out. Any hook flag goes with them.
    pub fn take_out(&mut self, carriers: &[String]) -> Result<()> {
        if carriers.is_empty() {
            return Err(KnitoutError::EmptyCarrierSet { operation: "out" });
        }

        let mut staged = self.active.clone();
        for carrier in carriers {
            if staged.remove(carrier).is_none() {
                return Err(KnitoutError::CarrierNotIn {
                    carrier: carrier.clone(),
                });
            }
        }

        self.active = staged;
        Ok(())
    }
}
