use crate::models::{CreateOutcome, WallRow};
use crate::Database;
use anyhow::Result;
use rusqlite::Connection;

/// Longest accepted creator name or title.
const MAX_NAME_LEN: usize = 255;

impl Database {
    pub fn list_walls(&self) -> Result<Vec<WallRow>> {
        self.with_conn(query_walls)
    }

    pub fn get_wall(&self, id: i64) -> Result<Option<WallRow>> {
        self.with_conn(|conn| query_wall_by_id(conn, id))
    }

    /// Validate and insert in one call. A draft that fails the validation
    /// gate is reported as `CreateOutcome::Rejected` without touching the
    /// table; only storage faults surface as errors.
    pub fn create_wall(
        &self,
        created_by: &str,
        title: &str,
        description: &str,
        likes: i64,
        created_at: &str,
    ) -> Result<CreateOutcome> {
        if let Err(reason) = validate_wall(created_by, title) {
            return Ok(CreateOutcome::Rejected(reason));
        }

        let row = self.with_conn_mut(|conn| {
            conn.execute(
                "INSERT INTO walls (created_by, title, description, likes, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                rusqlite::params![created_by, title, description, likes, created_at],
            )?;

            Ok(WallRow {
                id: conn.last_insert_rowid(),
                created_by: created_by.to_string(),
                title: title.to_string(),
                description: description.to_string(),
                likes,
                created_at: created_at.to_string(),
            })
        })?;

        Ok(CreateOutcome::Saved(row))
    }

    /// Returns true if a row was removed, false if the id did not exist.
    pub fn delete_wall(&self, id: i64) -> Result<bool> {
        self.with_conn_mut(|conn| {
            let removed = conn.execute("DELETE FROM walls WHERE id = ?1", [id])?;
            Ok(removed > 0)
        })
    }
}

fn validate_wall(created_by: &str, title: &str) -> Result<(), String> {
    if created_by.trim().is_empty() {
        return Err("Creator name can't be blank".to_string());
    }
    if created_by.len() > MAX_NAME_LEN {
        return Err("Creator name is too long".to_string());
    }
    if title.trim().is_empty() {
        return Err("Title can't be blank".to_string());
    }
    if title.len() > MAX_NAME_LEN {
        return Err("Title is too long".to_string());
    }
    Ok(())
}

fn query_walls(conn: &Connection) -> Result<Vec<WallRow>> {
    let mut stmt = conn.prepare(
        "SELECT id, created_by, title, description, likes, created_at
         FROM walls
         ORDER BY id",
    )?;

    let rows = stmt
        .query_map([], |row| {
            Ok(WallRow {
                id: row.get(0)?,
                created_by: row.get(1)?,
                title: row.get(2)?,
                description: row.get(3)?,
                likes: row.get(4)?,
                created_at: row.get(5)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows)
}

fn query_wall_by_id(conn: &Connection, id: i64) -> Result<Option<WallRow>> {
    let mut stmt = conn.prepare(
        "SELECT id, created_by, title, description, likes, created_at
         FROM walls WHERE id = ?1",
    )?;

    let row = stmt
        .query_row([id], |row| {
            Ok(WallRow {
                id: row.get(0)?,
                created_by: row.get(1)?,
                title: row.get(2)?,
                description: row.get(3)?,
                likes: row.get(4)?,
                created_at: row.get(5)?,
            })
        })
        .optional()?;

    Ok(row)
}

/// Extension trait for optional query results
trait OptionalExt<T> {
    fn optional(self) -> Result<Option<T>>;
}

impl<T> OptionalExt<T> for std::result::Result<T, rusqlite::Error> {
    fn optional(self) -> Result<Option<T>> {
        match self {
            Ok(val) => Ok(Some(val)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
