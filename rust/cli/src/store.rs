//! SQLite-backed career storage.
//!
//! One database file may hold several players. Rival seeds are stored as
//! their two's-complement `i64` bit pattern since SQLite integers are signed.

use std::path::Path;

use rusqlite::{Connection, OptionalExtension, params};

use quartet_career::{Career, FormMeterStore, Rival, RivalStore, StoreError};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS rivals (
    player_id TEXT NOT NULL,
    rival_id INTEGER NOT NULL,
    display_name TEXT NOT NULL,
    seed INTEGER NOT NULL,
    PRIMARY KEY (player_id, rival_id)
);
CREATE TABLE IF NOT EXISTS form_meter (
    player_id TEXT PRIMARY KEY,
    value INTEGER NOT NULL
);
CREATE TABLE IF NOT EXISTS career (
    player_id TEXT PRIMARY KEY,
    state TEXT NOT NULL
);
";

pub struct SqliteStore {
    conn: Connection,
}

impl std::fmt::Debug for SqliteStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteStore")
            .field("path", &self.conn.path())
            .finish()
    }
}

fn backend(e: rusqlite::Error) -> StoreError {
    StoreError::Backend(e.to_string())
}

impl SqliteStore {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path).map_err(backend)?;
        Self::init(conn)
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory().map_err(backend)?;
        Self::init(conn)
    }

    fn init(conn: Connection) -> Result<Self, StoreError> {
        conn.execute_batch(SCHEMA).map_err(backend)?;
        Ok(Self { conn })
    }

    /// Saved tier progress, if any. The form meter is stored separately.
    pub fn load_career(&self, player_id: &str) -> Result<Option<Career>, StoreError> {
        let state: Option<String> = self
            .conn
            .query_row(
                "SELECT state FROM career WHERE player_id = ?1",
                params![player_id],
                |row| row.get(0),
            )
            .optional()
            .map_err(backend)?;
        state
            .map(|s| serde_json::from_str(&s).map_err(|e| StoreError::Corrupt(e.to_string())))
            .transpose()
    }

    pub fn save_career(&mut self, player_id: &str, career: &Career) -> Result<(), StoreError> {
        let state = serde_json::to_string(career).map_err(|e| StoreError::Corrupt(e.to_string()))?;
        self.conn
            .execute(
                "INSERT INTO career (player_id, state) VALUES (?1, ?2)
                 ON CONFLICT(player_id) DO UPDATE SET state = excluded.state",
                params![player_id, state],
            )
            .map_err(backend)?;
        Ok(())
    }
}

impl RivalStore for SqliteStore {
    fn load_rivals(&self, player_id: &str) -> Result<Option<Vec<Rival>>, StoreError> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT rival_id, display_name, seed FROM rivals
                 WHERE player_id = ?1 ORDER BY rival_id",
            )
            .map_err(backend)?;
        let rows = stmt
            .query_map(params![player_id], |row| {
                let id: i64 = row.get(0)?;
                let name: String = row.get(1)?;
                let seed: i64 = row.get(2)?;
                Ok((id, name, seed))
            })
            .map_err(backend)?;
        let mut rivals = Vec::new();
        for row in rows {
            let (id, name, seed) = row.map_err(backend)?;
            let id = u32::try_from(id).map_err(|_| StoreError::Corrupt(format!("rival id {}", id)))?;
            rivals.push(Rival::new(id, name, seed as u64));
        }
        if rivals.is_empty() {
            Ok(None)
        } else {
            Ok(Some(rivals))
        }
    }

    fn save_rivals(&mut self, player_id: &str, rivals: &[Rival]) -> Result<(), StoreError> {
        let tx = self.conn.transaction().map_err(backend)?;
        tx.execute("DELETE FROM rivals WHERE player_id = ?1", params![player_id])
            .map_err(backend)?;
        {
            let mut stmt = tx
                .prepare(
                    "INSERT INTO rivals (player_id, rival_id, display_name, seed)
                     VALUES (?1, ?2, ?3, ?4)",
                )
                .map_err(backend)?;
            for r in rivals {
                stmt.execute(params![player_id, i64::from(r.id), r.display_name, r.seed as i64])
                    .map_err(backend)?;
            }
        }
        tx.commit().map_err(backend)
    }
}

impl FormMeterStore for SqliteStore {
    fn get_form_meter(&self, player_id: &str) -> Result<u8, StoreError> {
        let value: Option<i64> = self
            .conn
            .query_row(
                "SELECT value FROM form_meter WHERE player_id = ?1",
                params![player_id],
                |row| row.get(0),
            )
            .optional()
            .map_err(backend)?;
        match value {
            None => Ok(0),
            Some(v) => u8::try_from(v)
                .ok()
                .filter(|v| *v <= 100)
                .ok_or_else(|| StoreError::Corrupt(format!("form meter {}", v))),
        }
    }

    fn set_form_meter(&mut self, player_id: &str, value: u8) -> Result<(), StoreError> {
        self.conn
            .execute(
                "INSERT INTO form_meter (player_id, value) VALUES (?1, ?2)
                 ON CONFLICT(player_id) DO UPDATE SET value = excluded.value",
                params![player_id, i64::from(value)],
            )
            .map_err(backend)?;
        Ok(())
    }
}
