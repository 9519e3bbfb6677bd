//! Integration test: daily totals over executed trades.
//!
//! 1. Trades on the same reporting day fold pointwise per participant
//! 2. Day membership is judged in the configured offset, not UTC
//! 3. LOSS and PROFIT ledgers of one day aggregate together
//! 4. The summary serializes with fixed two-decimal amounts
//!
//! This test drives cascade-engine for the writes and cascade-report for
//! the reads, sharing one database the way the daemon does.

use cascade_db::queries::{hierarchy, participants, shares};
use cascade_engine::execute_trade;
use cascade_report::{daily_summary, parse_offset};
use cascade_types::{ParticipantId, ParticipantRole, TradeDirection};
use chrono::{NaiveDate, TimeZone, Utc};
use rust_decimal::Decimal;
use std::str::FromStr;

/// Base timestamp for participant rows; trades carry explicit instants.
const BASE_TIME: u64 = 1_700_000_000;

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).expect("decimal literal")
}

fn ist() -> chrono::FixedOffset {
    parse_offset("+05:30").expect("reporting offset")
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("calendar date")
}

fn epoch(y: i32, m: u32, d: u32, h: u32, min: u32) -> u64 {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0)
        .single()
        .expect("valid timestamp")
        .timestamp() as u64
}

/// Helper: Owner A -> Customer A with an 80% rule.
fn setup_pair(conn: &rusqlite::Connection) -> (ParticipantId, ParticipantId) {
    let owner = participants::insert(conn, "Owner A", ParticipantRole::Owner, BASE_TIME)
        .expect("insert owner");
    let customer = participants::insert(conn, "Customer A", ParticipantRole::Customer, BASE_TIME)
        .expect("insert customer");
    hierarchy::insert(conn, owner, customer, BASE_TIME).expect("link");
    shares::append(conn, owner, customer, 8000, BASE_TIME).expect("rule");
    (owner, customer)
}

#[test]
fn same_day_trades_fold_per_participant() {
    let mut conn = cascade_db::open_memory().expect("open DB");
    let (owner, customer) = setup_pair(&conn);

    // 10:00 and 15:00 IST on March 10.
    execute_trade(
        &mut conn,
        customer,
        dec("100.00"),
        TradeDirection::Loss,
        epoch(2024, 3, 10, 4, 30),
    )
    .expect("first trade");
    execute_trade(
        &mut conn,
        customer,
        dec("50.00"),
        TradeDirection::Loss,
        epoch(2024, 3, 10, 9, 30),
    )
    .expect("second trade");

    let summary = daily_summary(&conn, date(2024, 3, 10), ist()).expect("summary");

    assert_eq!(summary.len(), 2, "both chain members appear once");
    let c = summary.get(&customer).expect("customer entry");
    assert_eq!(c.name, "Customer A");
    assert_eq!(c.total_kept, dec("30.00"), "20.00 + 10.00 kept");
    assert_eq!(c.total_passed, dec("120.00"), "80.00 + 40.00 passed");
    let o = summary.get(&owner).expect("owner entry");
    assert_eq!(o.total_kept, dec("120.00"));
    assert_eq!(o.total_passed, dec("0.00"));
}

#[test]
fn day_membership_follows_the_reporting_offset() {
    let mut conn = cascade_db::open_memory().expect("open DB");
    let (_, customer) = setup_pair(&conn);

    // 19:30 UTC on March 10 is already 01:00 on March 11 in +05:30.
    execute_trade(
        &mut conn,
        customer,
        dec("100.00"),
        TradeDirection::Loss,
        epoch(2024, 3, 10, 19, 30),
    )
    .expect("trade");

    assert!(
        daily_summary(&conn, date(2024, 3, 10), ist())
            .expect("summary")
            .is_empty(),
        "the trade belongs to the next local day"
    );
    assert_eq!(
        daily_summary(&conn, date(2024, 3, 11), ist())
            .expect("summary")
            .len(),
        2
    );

    // Under UTC reporting the same trade stays on March 10.
    let utc = parse_offset("+00:00").expect("offset");
    assert_eq!(
        daily_summary(&conn, date(2024, 3, 10), utc)
            .expect("summary")
            .len(),
        2
    );
}

#[test]
fn loss_and_profit_aggregate_together() {
    let mut conn = cascade_db::open_memory().expect("open DB");

    // The four-level demo tree: 90% / 80% / 80% pass-through edges.
    let owner = participants::insert(&conn, "Owner A", ParticipantRole::Owner, BASE_TIME)
        .expect("insert owner");
    let operator = participants::insert(&conn, "Operator A", ParticipantRole::Operator, BASE_TIME)
        .expect("insert operator");
    let agent = participants::insert(&conn, "Agent A", ParticipantRole::Agent, BASE_TIME)
        .expect("insert agent");
    let customer = participants::insert(&conn, "Customer A", ParticipantRole::Customer, BASE_TIME)
        .expect("insert customer");
    hierarchy::insert(&conn, owner, operator, BASE_TIME).expect("link");
    hierarchy::insert(&conn, operator, agent, BASE_TIME).expect("link");
    hierarchy::insert(&conn, agent, customer, BASE_TIME).expect("link");
    shares::append(&conn, owner, operator, 9000, BASE_TIME).expect("rule");
    shares::append(&conn, operator, agent, 8000, BASE_TIME).expect("rule");
    shares::append(&conn, agent, customer, 8000, BASE_TIME).expect("rule");

    // One LOSS and one PROFIT on the same reporting day.
    execute_trade(
        &mut conn,
        customer,
        dec("1000.00"),
        TradeDirection::Loss,
        epoch(2024, 3, 10, 4, 30),
    )
    .expect("loss trade");
    execute_trade(
        &mut conn,
        customer,
        dec("500.00"),
        TradeDirection::Profit,
        epoch(2024, 3, 10, 9, 30),
    )
    .expect("profit trade");

    let summary = daily_summary(&conn, date(2024, 3, 10), ist()).expect("summary");
    assert_eq!(summary.len(), 4);

    // LOSS keeps 200/160/64/576 bottom-up; PROFIT keeps 50/90/72/288 top-down.
    assert_eq!(summary.get(&owner).expect("owner").total_kept, dec("626.00"));
    assert_eq!(
        summary.get(&operator).expect("operator").total_kept,
        dec("154.00")
    );
    assert_eq!(summary.get(&agent).expect("agent").total_kept, dec("232.00"));
    assert_eq!(
        summary.get(&customer).expect("customer").total_kept,
        dec("488.00")
    );

    let day_total: Decimal = summary.values().map(|s| s.total_kept).sum();
    assert_eq!(
        day_total,
        dec("1500.00"),
        "the day's kept totals must sum to the day's trade volume"
    );
}

#[test]
fn summary_serializes_with_two_decimal_amounts() {
    let mut conn = cascade_db::open_memory().expect("open DB");
    let (_, customer) = setup_pair(&conn);

    execute_trade(
        &mut conn,
        customer,
        dec("100.00"),
        TradeDirection::Loss,
        epoch(2024, 3, 10, 4, 30),
    )
    .expect("trade");

    let summary = daily_summary(&conn, date(2024, 3, 10), ist()).expect("summary");
    let json = serde_json::to_value(&summary).expect("serialize summary");

    let entry = &json[customer.to_string().as_str()];
    assert_eq!(entry["name"], "Customer A");
    assert_eq!(entry["total_kept"], "20.00", "amounts travel as strings");
    assert_eq!(entry["total_passed"], "80.00");
}

#[test]
fn empty_day_yields_empty_summary() {
    let mut conn = cascade_db::open_memory().expect("open DB");
    let (_, customer) = setup_pair(&conn);

    execute_trade(
        &mut conn,
        customer,
        dec("100.00"),
        TradeDirection::Loss,
        epoch(2024, 3, 10, 4, 30),
    )
    .expect("trade");

    let summary = daily_summary(&conn, date(2024, 3, 12), ist()).expect("summary");
    assert!(summary.is_empty());
}
