//! Integration test: cascading distribution correctness.
//!
//! Exercises the complete trade lifecycle over the demo hierarchy
//! Owner A -> Operator A -> Agent A -> {Customer A, Customer B}:
//! 1. Build the four-level hierarchy with rules 90% / 80% / 80% / 80%
//! 2. Execute a LOSS entering at a customer and climbing the chain
//! 3. Execute a PROFIT entering at the root and descending
//! 4. Verify kept amounts conserve the trade amount exactly
//! 5. Verify the persisted ledger matches the returned outcome
//!
//! This test uses cascade-engine (execute), cascade-db (participants,
//! hierarchy, shares, trades) and cascade-types.

use cascade_db::queries::{hierarchy, participants, shares, trades};
use cascade_engine::{execute_trade, trade_lines};
use cascade_types::{ParticipantId, ParticipantRole, TradeDirection};
use rust_decimal::Decimal;
use std::str::FromStr;

/// Base timestamp for test scenarios.
const BASE_TIME: u64 = 1_700_000_000;

/// The demo hierarchy: one path from the root to two sibling customers.
struct Tree {
    owner: ParticipantId,
    operator: ParticipantId,
    agent: ParticipantId,
    customer_a: ParticipantId,
    customer_b: ParticipantId,
}

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).expect("decimal literal")
}

/// Helper: build Owner A -> Operator A -> Agent A -> {Customer A, Customer B}
/// with pass-through rules 90% / 80% / 80% / 80%.
fn setup_tree(conn: &rusqlite::Connection) -> Tree {
    let owner = participants::insert(conn, "Owner A", ParticipantRole::Owner, BASE_TIME)
        .expect("insert owner");
    let operator = participants::insert(conn, "Operator A", ParticipantRole::Operator, BASE_TIME)
        .expect("insert operator");
    let agent = participants::insert(conn, "Agent A", ParticipantRole::Agent, BASE_TIME)
        .expect("insert agent");
    let customer_a = participants::insert(conn, "Customer A", ParticipantRole::Customer, BASE_TIME)
        .expect("insert customer a");
    let customer_b = participants::insert(conn, "Customer B", ParticipantRole::Customer, BASE_TIME)
        .expect("insert customer b");

    hierarchy::insert(conn, owner, operator, BASE_TIME).expect("link owner -> operator");
    hierarchy::insert(conn, operator, agent, BASE_TIME).expect("link operator -> agent");
    hierarchy::insert(conn, agent, customer_a, BASE_TIME).expect("link agent -> customer a");
    hierarchy::insert(conn, agent, customer_b, BASE_TIME).expect("link agent -> customer b");

    shares::append(conn, owner, operator, 9000, BASE_TIME).expect("rule owner -> operator");
    shares::append(conn, operator, agent, 8000, BASE_TIME).expect("rule operator -> agent");
    shares::append(conn, agent, customer_a, 8000, BASE_TIME).expect("rule agent -> customer a");
    shares::append(conn, agent, customer_b, 8000, BASE_TIME).expect("rule agent -> customer b");

    Tree {
        owner,
        operator,
        agent,
        customer_a,
        customer_b,
    }
}

#[test]
fn loss_cascade_climbs_the_chain() {
    let mut conn = cascade_db::open_memory().expect("open DB");
    let tree = setup_tree(&conn);

    let outcome = execute_trade(
        &mut conn,
        tree.customer_a,
        dec("1000.00"),
        TradeDirection::Loss,
        BASE_TIME + 100,
    )
    .expect("LOSS trade should succeed");

    // =========================================================
    // Customer -> Agent -> Operator -> Owner, one line each
    // =========================================================
    assert_eq!(outcome.lines.len(), 4, "one ledger line per chain member");

    let rows: Vec<(ParticipantId, Decimal, Decimal)> = outcome
        .lines
        .iter()
        .map(|l| (l.participant_id, l.amount_kept, l.amount_passed))
        .collect();

    assert_eq!(
        rows[0],
        (tree.customer_a, dec("200.00"), dec("800.00")),
        "customer keeps 20% and passes 80% up"
    );
    assert_eq!(
        rows[1],
        (tree.agent, dec("160.00"), dec("640.00")),
        "agent keeps 20% of 800"
    );
    assert_eq!(
        rows[2],
        (tree.operator, dec("64.00"), dec("576.00")),
        "operator keeps 10% of 640"
    );
    assert_eq!(
        rows[3],
        (tree.owner, dec("576.00"), dec("0.00")),
        "owner keeps the rest and passes nothing"
    );
}

#[test]
fn profit_cascade_descends_the_chain() {
    let mut conn = cascade_db::open_memory().expect("open DB");
    let tree = setup_tree(&conn);

    let outcome = execute_trade(
        &mut conn,
        tree.customer_a,
        dec("500.00"),
        TradeDirection::Profit,
        BASE_TIME + 100,
    )
    .expect("PROFIT trade should succeed");

    // =========================================================
    // Owner -> Operator -> Agent -> Customer, one line each
    // =========================================================
    let rows: Vec<(ParticipantId, Decimal, Decimal)> = outcome
        .lines
        .iter()
        .map(|l| (l.participant_id, l.amount_kept, l.amount_passed))
        .collect();

    assert_eq!(
        rows[0],
        (tree.owner, dec("50.00"), dec("450.00")),
        "owner keeps 10% and passes 90% down"
    );
    assert_eq!(
        rows[1],
        (tree.operator, dec("90.00"), dec("360.00")),
        "operator keeps 20% of 450"
    );
    assert_eq!(
        rows[2],
        (tree.agent, dec("72.00"), dec("288.00")),
        "agent keeps 20% of 360"
    );
    assert_eq!(
        rows[3],
        (tree.customer_a, dec("288.00"), dec("0.00")),
        "customer keeps the rest and passes nothing"
    );
}

#[test]
fn kept_amounts_conserve_the_trade_amount() {
    let mut conn = cascade_db::open_memory().expect("open DB");
    let tree = setup_tree(&conn);

    // Amounts chosen so intermediate splits round at every edge.
    for (i, raw) in ["1000.00", "777.77", "0.01", "123.45"].into_iter().enumerate() {
        let amount = dec(raw);
        for direction in [TradeDirection::Loss, TradeDirection::Profit] {
            let outcome = execute_trade(
                &mut conn,
                tree.customer_a,
                amount,
                direction,
                BASE_TIME + i as u64,
            )
            .expect("trade should succeed");

            let total_kept: Decimal = outcome.lines.iter().map(|l| l.amount_kept).sum();
            assert_eq!(
                total_kept, amount,
                "kept amounts must sum to the trade amount for {raw} {direction:?}"
            );

            let last = outcome.lines.last().expect("at least one line");
            assert_eq!(
                last.amount_passed,
                dec("0.00"),
                "terminal participant must pass nothing"
            );
        }
    }
}

#[test]
fn persisted_ledger_matches_the_outcome() {
    let mut conn = cascade_db::open_memory().expect("open DB");
    let tree = setup_tree(&conn);

    let outcome = execute_trade(
        &mut conn,
        tree.customer_a,
        dec("1000.00"),
        TradeDirection::Loss,
        BASE_TIME + 100,
    )
    .expect("trade should succeed");

    // The trade row persists the rounded amount in minor units.
    let trade = trades::find_trade(&conn, outcome.trade_id)
        .expect("find trade")
        .expect("trade row should exist");
    assert_eq!(trade.customer_id, tree.customer_a);
    assert_eq!(trade.amount_minor, 100_000);
    assert_eq!(trade.direction, TradeDirection::Loss);
    assert_eq!(trade.created_at, BASE_TIME + 100);

    // Reading the ledger back reproduces the outcome line for line.
    let lines = trade_lines(&conn, outcome.trade_id).expect("ledger lines");
    assert_eq!(lines.len(), outcome.lines.len());
    for (read, executed) in lines.iter().zip(&outcome.lines) {
        assert_eq!(read.participant_id, executed.participant_id);
        assert_eq!(read.participant_name, executed.participant_name);
        assert_eq!(read.amount_kept, executed.amount_kept);
        assert_eq!(read.amount_passed, executed.amount_passed);
    }
}

#[test]
fn sibling_customers_cascade_independently() {
    let mut conn = cascade_db::open_memory().expect("open DB");
    let tree = setup_tree(&conn);

    let outcome = execute_trade(
        &mut conn,
        tree.customer_b,
        dec("1000.00"),
        TradeDirection::Loss,
        BASE_TIME + 100,
    )
    .expect("trade via Customer B should succeed");

    // Customer B's trade uses its own entry edge and the shared upper chain.
    assert_eq!(outcome.lines[0].participant_id, tree.customer_b);
    assert_eq!(outcome.lines[0].amount_kept, dec("200.00"));
    assert_eq!(outcome.lines[3].participant_id, tree.owner);
    assert_eq!(outcome.lines[3].amount_kept, dec("576.00"));

    // The sibling customer never appears in the ledger.
    assert!(
        outcome
            .lines
            .iter()
            .all(|l| l.participant_id != tree.customer_a),
        "Customer A must not appear in Customer B's cascade"
    );
}
