//! Pick and Place Session
//!
//! This example walks a simulated machine through a short work session.
//!
//! Key concepts:
//! - Trays with validated weights
//! - Adding to and removing from a slot store
//! - Retrying a failed pick until the retry bound is reached
//! - Reading back transaction summaries and a snapshot
//!
//! Run with: cargo run --example pick_and_place

use picker::config::MachineConfig;
use picker::core::{Item, State};
use picker::effects::{Machine, RandomFaults};
use picker::observer::RecordingObserver;
use std::sync::Arc;

fn main() {
    println!("=== Pick and Place Session ===\n");

    // Trays
    println!("1) Trays");
    let mut tray1 = Item::tray("A1");
    let tray2 = Item::tray("B2");
    let tray3 = Item::tray("C3");

    tray1.update_weight(10.0).expect("valid weight");
    println!("  Tray {} weight updated to {:?}", tray1.id(), tray1.weight());
    if let Err(err) = tray1.update_weight(-10.0) {
        println!("  Rejected: {err}");
    }

    // Machine and slot store
    let observer = Arc::new(RecordingObserver::new());
    let mut machine = Machine::builder()
        .config(MachineConfig::simulating())
        .fault_source(RandomFaults::with_seed(2024))
        .observer(observer.clone())
        .build()
        .expect("valid configuration");
    let mut slots = machine.new_slot_store();

    println!("\n2) Slot store");
    slots.add(0, tray1).expect("slot 0 exists");
    slots.add(1, tray2).expect("slot 1 exists");
    slots.add(2, tray3).expect("slot 2 exists");
    print!("{slots}");

    println!("  Removing tray at slot 1");
    let (_, removed) = slots.remove(1).expect("slot 1 exists");
    println!("  Adding a tray to occupied slot 0");
    let outcome = slots
        .add(0, removed.expect("slot 1 was occupied"))
        .expect("slot 0 exists");
    println!("  -> {outcome}");
    print!("{slots}");

    println!("\n3) Machine");
    println!("  Pick from slot 3 (empty)");
    let txn = machine.pick(&mut slots, 3).expect("slot 3 exists");
    println!("{txn}");

    for attempt in 1..=4 {
        println!("\n  Retry {attempt}/4");
        let txn = machine.retry(&mut slots).expect("history is not empty");
        println!("{txn}");
        println!("  state: {}", machine.state().name());
    }

    println!("\n  Pick from slot 0, place in slot 4");
    for txn in [
        machine.pick(&mut slots, 0).expect("slot 0 exists"),
        machine.place(&mut slots, 4).expect("slot 4 exists"),
    ] {
        println!("{txn}");
    }
    print!("{slots}");

    println!("\n4) Snapshot");
    let snapshot = machine.snapshot(&slots);
    println!("{}", snapshot.to_json().expect("snapshot serializes"));
    println!("\n{} events observed", observer.len());
}
