pub const SCHEMA_VERSION: i32 = 1;

pub const SCHEMA_V1: &str = r#"
-- Schema version tracking
CREATE TABLE IF NOT EXISTS schema_version (
    id INTEGER PRIMARY KEY,
    version INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS persons (
    id TEXT PRIMARY KEY,
    first_name TEXT,
    name TEXT NOT NULL,
    email TEXT,
    is_active INTEGER NOT NULL DEFAULT 1,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS mailboxes (
    id TEXT PRIMARY KEY,
    login TEXT NOT NULL UNIQUE COLLATE NOCASE,
    mail_aliases TEXT NOT NULL DEFAULT '',
    unknown_caller TEXT NOT NULL DEFAULT 'ignore'
);

CREATE TABLE IF NOT EXISTS tickets (
    id TEXT PRIMARY KEY,
    reference TEXT NOT NULL UNIQUE,
    title TEXT NOT NULL,
    caller_id TEXT,
    created_at TEXT NOT NULL,
    FOREIGN KEY (caller_id) REFERENCES persons(id) ON DELETE SET NULL
);

CREATE INDEX IF NOT EXISTS idx_person_email ON persons(email COLLATE NOCASE);
CREATE INDEX IF NOT EXISTS idx_person_active ON persons(is_active);
CREATE INDEX IF NOT EXISTS idx_ticket_caller ON tickets(caller_id);
"#;

/// Contact-method extension. Installed on demand; its presence is the capability check.
pub const CONTACT_METHODS_SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS contact_methods (
    id TEXT PRIMARY KEY,
    person_id TEXT NOT NULL,
    contact_method TEXT NOT NULL,
    contact_detail TEXT NOT NULL,
    FOREIGN KEY (person_id) REFERENCES persons(id) ON DELETE CASCADE
);

CREATE INDEX IF NOT EXISTS idx_contact_method_person ON contact_methods(person_id);
CREATE INDEX IF NOT EXISTS idx_contact_method_detail
    ON contact_methods(contact_method, contact_detail COLLATE NOCASE);
"#;

pub const CONTACT_METHODS_TABLE: &str = "contact_methods";
