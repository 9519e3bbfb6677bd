//! SQL schema definitions.

/// Complete schema for Cascade v1 database.
pub const SCHEMA_V1: &str = r#"
-- ============================================================
-- Participants & hierarchy
-- ============================================================

CREATE TABLE IF NOT EXISTS participant (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    role TEXT NOT NULL,
    created_at INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS hierarchy_link (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    superior_id INTEGER NOT NULL REFERENCES participant(id),
    subordinate_id INTEGER NOT NULL REFERENCES participant(id),
    created_at INTEGER NOT NULL,
    UNIQUE (superior_id, subordinate_id)
);

CREATE INDEX IF NOT EXISTS idx_link_subordinate ON hierarchy_link(subordinate_id);

-- ============================================================
-- Share rules (versioned; newest row per edge wins)
-- ============================================================

CREATE TABLE IF NOT EXISTS share_config (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    superior_id INTEGER NOT NULL REFERENCES participant(id),
    subordinate_id INTEGER NOT NULL REFERENCES participant(id),
    pass_pct_minor INTEGER NOT NULL,
    updated_at INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_share_edge ON share_config(superior_id, subordinate_id);

-- ============================================================
-- Trades & distribution ledger
-- ============================================================

CREATE TABLE IF NOT EXISTS trade (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    customer_id INTEGER NOT NULL REFERENCES participant(id),
    amount_minor INTEGER NOT NULL,
    direction TEXT NOT NULL,
    created_at INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_trade_created ON trade(created_at);

CREATE TABLE IF NOT EXISTS trade_distribution (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    trade_id INTEGER NOT NULL REFERENCES trade(id) ON DELETE CASCADE,
    participant_id INTEGER NOT NULL REFERENCES participant(id),
    kept_minor INTEGER NOT NULL,
    passed_minor INTEGER NOT NULL,
    created_at INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_distribution_trade ON trade_distribution(trade_id);
"#;
