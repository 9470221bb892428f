//! SQLite schema definitions and SQL query constants.
//!
//! Pure data, no I/O.

/// Connection settings applied on open.
pub const PRAGMAS: &str = "PRAGMA foreign_keys = ON;";

/// SQL statement to create all tables.
pub const CREATE_TABLES: &str = r#"
CREATE TABLE IF NOT EXISTS competitions (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    description TEXT NOT NULL DEFAULT '',
    date TEXT NOT NULL,
    location TEXT NOT NULL,
    created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
    updated_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
);

CREATE TABLE IF NOT EXISTS participants (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    email TEXT NOT NULL UNIQUE,
    created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
    updated_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
);

CREATE TABLE IF NOT EXISTS competition_participants (
    competition_id INTEGER NOT NULL,
    participant_id INTEGER NOT NULL,
    registration_date TEXT NOT NULL,
    created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
    updated_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
    UNIQUE (competition_id, participant_id),
    FOREIGN KEY (competition_id) REFERENCES competitions(id) ON DELETE CASCADE,
    FOREIGN KEY (participant_id) REFERENCES participants(id) ON DELETE CASCADE
);

CREATE INDEX IF NOT EXISTS idx_competitions_date ON competitions(date);
CREATE INDEX IF NOT EXISTS idx_registrations_participant_id ON competition_participants(participant_id);
"#;

pub const PING: &str = "SELECT 1";

// Competition queries
pub const SELECT_COMPETITIONS: &str = r#"
SELECT id, name, description, date, location, created_at, updated_at
FROM competitions
ORDER BY date ASC, id ASC
"#;

pub const SELECT_COMPETITION_BY_ID: &str = r#"
SELECT id, name, description, date, location, created_at, updated_at
FROM competitions
WHERE id = ?1
"#;

pub const INSERT_COMPETITION: &str = r#"
INSERT INTO competitions (name, description, date, location)
VALUES (?1, ?2, ?3, ?4)
RETURNING id, name, description, date, location, created_at, updated_at
"#;

pub const UPDATE_COMPETITION: &str = r#"
UPDATE competitions
SET name = ?2, description = ?3, date = ?4, location = ?5,
    updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
WHERE id = ?1
RETURNING id, name, description, date, location, created_at, updated_at
"#;

pub const DELETE_COMPETITION: &str = "DELETE FROM competitions WHERE id = ?1";

pub const COMPETITION_EXISTS: &str = "SELECT EXISTS(SELECT 1 FROM competitions WHERE id = ?1)";

// Participant queries
pub const SELECT_PARTICIPANTS: &str = r#"
SELECT id, name, email, created_at, updated_at
FROM participants
ORDER BY created_at DESC, id DESC
"#;

pub const SELECT_PARTICIPANTS_BY_COMPETITION: &str = r#"
SELECT p.id, p.name, p.email, p.created_at, p.updated_at
FROM participants p
INNER JOIN competition_participants cp ON cp.participant_id = p.id
WHERE cp.competition_id = ?1
ORDER BY cp.registration_date DESC, p.id DESC
"#;

pub const SELECT_PARTICIPANT_BY_ID: &str = r#"
SELECT id, name, email, created_at, updated_at
FROM participants
WHERE id = ?1
"#;

pub const SELECT_COMPETITIONS_FOR_PARTICIPANT: &str = r#"
SELECT c.id, c.name, c.description, c.date, c.location, c.created_at, c.updated_at
FROM competitions c
INNER JOIN competition_participants cp ON cp.competition_id = c.id
WHERE cp.participant_id = ?1
ORDER BY c.date ASC, c.id ASC
"#;

pub const INSERT_PARTICIPANT: &str = r#"
INSERT INTO participants (name, email)
VALUES (?1, ?2)
RETURNING id, name, email, created_at, updated_at
"#;

pub const UPDATE_PARTICIPANT: &str = r#"
UPDATE participants
SET name = ?2, email = ?3, updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
WHERE id = ?1
RETURNING id, name, email, created_at, updated_at
"#;

pub const DELETE_PARTICIPANT: &str = "DELETE FROM participants WHERE id = ?1";

pub const PARTICIPANT_EXISTS: &str = "SELECT EXISTS(SELECT 1 FROM participants WHERE id = ?1)";

/// Email probe excluding one participant ID (pass 0 to exclude nobody).
pub const EMAIL_IN_USE: &str =
    "SELECT EXISTS(SELECT 1 FROM participants WHERE email = ?1 AND id != ?2)";

// Registration queries
pub const REGISTRATION_EXISTS: &str = r#"
SELECT EXISTS(
    SELECT 1 FROM competition_participants
    WHERE competition_id = ?1 AND participant_id = ?2
)
"#;

pub const INSERT_REGISTRATION: &str = r#"
INSERT INTO competition_participants (competition_id, participant_id, registration_date)
VALUES (?1, ?2, ?3)
RETURNING competition_id, participant_id, registration_date, created_at, updated_at
"#;

pub const DELETE_REGISTRATION: &str = r#"
DELETE FROM competition_participants
WHERE competition_id = ?1 AND participant_id = ?2
"#;
