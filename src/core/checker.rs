//! Legality checks for pick and place operations.
//!
//! The checker is a pure function of the requested action and two facts
//! about the world: whether the machine holds an item and whether the
//! target slot is occupied. It never mutates anything and gives the same
//! answer every time it is asked.

use super::error::MachineError;
use super::operation::{Action, CheckOutcome, Operation};
use super::slots::SlotStore;

/// Decide whether `action` is legal.
///
/// # Example
///
/// ```rust
/// use picker::core::{check, Action, CheckOutcome};
///
/// assert_eq!(check(Action::Pick, false, true), CheckOutcome::Success);
/// assert_eq!(check(Action::Pick, true, true), CheckOutcome::MachineOccupied);
/// assert_eq!(check(Action::Place, false, false), CheckOutcome::MachineEmpty);
/// ```
pub fn check(action: Action, machine_holds_item: bool, slot_occupied: bool) -> CheckOutcome {
    match action {
        Action::Pick if machine_holds_item => CheckOutcome::MachineOccupied,
        Action::Pick if !slot_occupied => CheckOutcome::SlotEmpty,
        Action::Place if !machine_holds_item => CheckOutcome::MachineEmpty,
        Action::Place if slot_occupied => CheckOutcome::SlotOccupied,
        Action::Pick | Action::Place => CheckOutcome::Success,
    }
}

/// Check `operation` against the current machine and slot store state.
///
/// Fails only if the target slot does not exist.
pub fn check_operation(
    operation: &Operation,
    machine_holds_item: bool,
    slots: &SlotStore,
) -> Result<CheckOutcome, MachineError> {
    let slot_occupied = !slots.slot_available(operation.slot)?;
    Ok(check(operation.action, machine_holds_item, slot_occupied))
}

/// Check an operation given as a raw action code.
///
/// Codes other than `0` (pick) and `1` (place) fail with `InvalidAction`.
pub fn check_code(
    action_code: u8,
    machine_holds_item: bool,
    slot_occupied: bool,
) -> Result<CheckOutcome, MachineError> {
    let action = Action::try_from(action_code)?;
    Ok(check(action, machine_holds_item, slot_occupied))
}
