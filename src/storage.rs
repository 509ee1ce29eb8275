use crate::api::models::Contact;
use directories::ProjectDirs;
use rusqlite::{params, Connection};
use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

fn db_path() -> Option<PathBuf> {
    let proj = ProjectDirs::from("com", "example", "PhonebookGtk")?;
    let dir = proj.data_dir().to_path_buf();
    Some(dir.join("cache.sqlite"))
}

fn ensure_dir(path: &PathBuf) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}

fn open_conn() -> rusqlite::Result<Connection> {
    let path = db_path().ok_or_else(|| rusqlite::Error::InvalidPath("no data dir".into()))?;
    let _ = ensure_dir(&path);
    Connection::open(path)
}

fn create_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS contacts (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            number TEXT NOT NULL,
            position INTEGER NOT NULL,
            updated_at INTEGER NOT NULL
        );
        "#,
    )
}

// Caching the contact list so the window can render the last known state
// while the fresh list is being fetched
pub fn init() -> Result<(), String> {
    let conn = open_conn().map_err(|e| e.to_string())?;
    conn.execute_batch("PRAGMA journal_mode = WAL;")
        .map_err(|e| e.to_string())?;
    create_schema(&conn).map_err(|e| e.to_string())
}

/// Wholesale replacement, preserving list order via the position column.
fn replace_all(conn: &mut Connection, contacts: &[Contact], now: i64) -> rusqlite::Result<()> {
    let tx = conn.transaction()?;
    tx.execute("DELETE FROM contacts", [])?;
    for (idx, c) in contacts.iter().enumerate() {
        tx.execute(
            r#"
            INSERT INTO contacts (id, name, number, position, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![c.id, c.name, c.number, idx as i64, now],
        )?;
    }
    tx.commit()
}

fn load_all(conn: &Connection) -> rusqlite::Result<Vec<Contact>> {
    let mut stmt =
        conn.prepare("SELECT id, name, number FROM contacts ORDER BY position ASC")?;
    let rows = stmt.query_map([], |row| {
        Ok(Contact {
            id: row.get(0)?,
            name: row.get(1)?,
            number: row.get(2)?,
        })
    })?;
    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn replace_contacts(contacts: &[Contact]) -> Result<(), String> {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| e.to_string())?
        .as_secs() as i64;
    let mut conn = open_conn().map_err(|e| e.to_string())?;
    replace_all(&mut conn, contacts, now).map_err(|e| e.to_string())
}

pub fn get_contacts() -> Result<Vec<Contact>, String> {
    let conn = open_conn().map_err(|e| e.to_string())?;
    load_all(&conn).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact(id: &str, name: &str, number: &str) -> Contact {
        Contact {
            id: id.to_string(),
            name: name.to_string(),
            number: number.to_string(),
        }
    }

    fn memory_conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        create_schema(&conn).unwrap();
        conn
    }

    #[test]
    fn replace_then_load_preserves_order() {
        let mut conn = memory_conn();
        let contacts = vec![contact("2", "Bob", "555"), contact("1", "Ann", "123")];
        replace_all(&mut conn, &contacts, 0).unwrap();
        assert_eq!(load_all(&conn).unwrap(), contacts);
    }

    #[test]
    fn replacement_is_wholesale() {
        let mut conn = memory_conn();
        replace_all(
            &mut conn,
            &[contact("1", "Ann", "123"), contact("2", "Bob", "555")],
            0,
        )
        .unwrap();
        replace_all(&mut conn, &[contact("3", "Cid", "777")], 1).unwrap();
        assert_eq!(load_all(&conn).unwrap(), vec![contact("3", "Cid", "777")]);
    }

    #[test]
    fn empty_cache_loads_empty() {
        let conn = memory_conn();
        assert!(load_all(&conn).unwrap().is_empty());
    }
}
