//! Optional demo data seeding.

use cascade_db::queries::{hierarchy, participants, shares};
use cascade_db::Result;
use cascade_types::ParticipantRole;
use rusqlite::Connection;

/// Seed a demo hierarchy into an empty database.
///
/// Owner A -> Operator A (90%) -> Agent A (80%) -> Customer A / Customer B
/// (80% each). Only reference data is written; ledger rows are produced by
/// the engine alone. No-op when seeding is disabled or any participant
/// already exists.
pub fn seed_if_empty(conn: &mut Connection, demo_data: bool) -> Result<()> {
    if !demo_data {
        return Ok(());
    }
    if participants::count(conn)? > 0 {
        return Ok(());
    }

    let now = crate::now_secs();
    let tx = conn.transaction()?;

    let owner = participants::insert(&tx, "Owner A", ParticipantRole::Owner, now)?;
    let operator = participants::insert(&tx, "Operator A", ParticipantRole::Operator, now)?;
    let agent = participants::insert(&tx, "Agent A", ParticipantRole::Agent, now)?;
    let customer_a = participants::insert(&tx, "Customer A", ParticipantRole::Customer, now)?;
    let customer_b = participants::insert(&tx, "Customer B", ParticipantRole::Customer, now)?;

    hierarchy::insert(&tx, owner, operator, now)?;
    hierarchy::insert(&tx, operator, agent, now)?;
    hierarchy::insert(&tx, agent, customer_a, now)?;
    hierarchy::insert(&tx, agent, customer_b, now)?;

    shares::append(&tx, owner, operator, 9000, now)?;
    shares::append(&tx, operator, agent, 8000, now)?;
    shares::append(&tx, agent, customer_a, 8000, now)?;
    shares::append(&tx, agent, customer_b, 8000, now)?;

    tx.commit()?;
    tracing::info!("Seeded demo hierarchy (5 participants)");
    Ok(())
}
