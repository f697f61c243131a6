//! Inert payloads moved between slots and the machine.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Rejected item mutations. The item keeps its previous value.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ItemError {
    #[error("Weight {weight} kg for item '{id}' is invalid: must be a non-negative number")]
    InvalidWeight { id: String, weight: f64 },

    #[error("No item held to weigh")]
    NotHeld,
}

/// A payload identified by a string, with an optional weight in kilograms.
///
/// Items are owned values: a slot or the machine's gripper holds the item
/// itself, so an item can never be in two places at once.
///
/// # Example
///
/// ```rust
/// use picker::core::Item;
///
/// let mut tray = Item::tray("A1");
/// assert_eq!(tray.weight(), Some(0.0));
///
/// tray.update_weight(10.0).unwrap();
/// assert!(tray.update_weight(-10.0).is_err());
/// assert_eq!(tray.weight(), Some(10.0));
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Item {
    id: String,
    weight: Option<f64>,
}

impl Item {
    /// Create an item with no weight attribute.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            weight: None,
        }
    }

    /// Create a tray: an item whose weight starts at zero.
    pub fn tray(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            weight: Some(0.0),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn weight(&self) -> Option<f64> {
        self.weight
    }

    /// Set the weight, rejecting negative or non-finite values.
    pub fn update_weight(&mut self, weight: f64) -> Result<(), ItemError> {
        if weight.is_finite() && weight >= 0.0 {
            self.weight = Some(weight);
            Ok(())
        } else {
            Err(ItemError::InvalidWeight {
                id: self.id.clone(),
                weight,
            })
        }
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}
