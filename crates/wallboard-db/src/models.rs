/// Database row types — these map directly to SQLite rows.
/// Distinct from the wallboard-api view models to keep the DB layer independent.

#[derive(Debug, Clone, PartialEq)]
pub struct WallRow {
    pub id: i64,
    pub created_by: String,
    pub title: String,
    pub description: String,
    pub likes: i64,
    pub created_at: String,
}

/// Outcome of a creation attempt. A rejected draft is a normal result,
/// not a storage fault: the caller redisplays the form with the reason.
#[derive(Debug)]
pub enum CreateOutcome {
    Saved(WallRow),
    Rejected(String),
}
