//! SQL schema for the helpdesk SQLite store.
//!
//! Executed once at connection startup via `PRAGMA user_version`. Future
//! migrations will be gated on that version number.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS users (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    username      TEXT NOT NULL UNIQUE,
    email         TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL,
    full_name     TEXT,
    role          TEXT NOT NULL DEFAULT 'user',   -- 'user' | 'admin' | 'it_staff'
    is_active     INTEGER NOT NULL DEFAULT 1,
    created_at    TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS tickets (
    id                      INTEGER PRIMARY KEY AUTOINCREMENT,
    ticket_id               TEXT NOT NULL UNIQUE,   -- IT-YYYYMMDD-NNNN
    user_id                 INTEGER NOT NULL REFERENCES users(id),
    issue_description       TEXT NOT NULL,
    category                TEXT,
    priority                TEXT,
    status                  TEXT NOT NULL DEFAULT 'new',
    resolution_type         TEXT,
    resolution              TEXT,
    resolution_instructions TEXT,
    confidence_score        REAL,
    auto_resolvable         INTEGER NOT NULL DEFAULT 0,
    requires_human          INTEGER NOT NULL DEFAULT 0,
    assigned_to             TEXT,
    assigned_at             TEXT,
    created_at              TEXT NOT NULL,   -- RFC 3339 UTC, fixed width
    updated_at              TEXT NOT NULL,
    resolved_at             TEXT,
    closed_at               TEXT
);

-- Audit trail; rows are only ever appended.
CREATE TABLE IF NOT EXISTS agent_logs (
    id                 INTEGER PRIMARY KEY AUTOINCREMENT,
    ticket_id          INTEGER NOT NULL REFERENCES tickets(id) ON DELETE CASCADE,
    agent_name         TEXT NOT NULL,
    action             TEXT NOT NULL,
    input_data         TEXT,   -- JSON
    output_data        TEXT,   -- JSON
    status             TEXT NOT NULL,
    processing_time_ms REAL,
    confidence_score   REAL,
    meta_data          TEXT,   -- JSON
    error_message      TEXT,
    created_at         TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS knowledge_base (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    category        TEXT NOT NULL,
    title           TEXT NOT NULL,
    description     TEXT,
    solution        TEXT NOT NULL,
    keywords        TEXT NOT NULL DEFAULT '[]',   -- JSON array
    auto_resolvable INTEGER NOT NULL DEFAULT 1,
    priority_level  TEXT,
    success_rate    REAL NOT NULL DEFAULT 0.0,
    usage_count     INTEGER NOT NULL DEFAULT 0,
    created_at      TEXT NOT NULL,
    updated_at      TEXT NOT NULL,
    UNIQUE (category, title)
);

-- One rollup row per UTC day.
CREATE TABLE IF NOT EXISTS system_metrics (
    id                          INTEGER PRIMARY KEY AUTOINCREMENT,
    date                        TEXT NOT NULL UNIQUE,   -- YYYY-MM-DD
    total_tickets               INTEGER NOT NULL DEFAULT 0,
    auto_resolved               INTEGER NOT NULL DEFAULT 0,
    escalated                   INTEGER NOT NULL DEFAULT 0,
    pending                     INTEGER NOT NULL DEFAULT 0,
    avg_resolution_time_seconds REAL,
    avg_confidence_score        REAL,
    resolution_success_rate     REAL,
    category_distribution       TEXT NOT NULL DEFAULT '{}',   -- JSON object
    priority_distribution       TEXT NOT NULL DEFAULT '{}',   -- JSON object
    computed_at                 TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS tickets_user_idx    ON tickets(user_id);
CREATE INDEX IF NOT EXISTS tickets_status_idx  ON tickets(status);
CREATE INDEX IF NOT EXISTS tickets_created_idx ON tickets(created_at);
CREATE INDEX IF NOT EXISTS logs_ticket_idx     ON agent_logs(ticket_id);
CREATE INDEX IF NOT EXISTS logs_agent_idx      ON agent_logs(agent_name);
CREATE INDEX IF NOT EXISTS kb_category_idx     ON knowledge_base(category);

PRAGMA user_version = 1;
";
