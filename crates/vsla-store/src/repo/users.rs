use crate::error::{Result, StoreError};
use rusqlite::{params, params_from_iter, Connection};
use std::str::FromStr;
use vsla_core::domain::{phone_match_suffix, phone_variants, User, UserId};

/// Columns a phone-shaped identifier may have landed in. Historical data
/// entry sometimes put the number into `username`, so lookups cover it.
const MATCH_COLUMNS: [&str; 3] = ["phone_number", "alt_phone_number", "username"];

#[derive(Debug, Clone)]
pub struct UserNew {
    pub name: String,
    pub username: Option<String>,
    pub phone_number: Option<String>,
    pub alt_phone_number: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct UserUpdate {
    pub name: Option<String>,
    pub username: Option<Option<String>>,
    pub phone_number: Option<Option<String>>,
    pub alt_phone_number: Option<Option<String>>,
}

pub struct UsersRepo<'a> {
    conn: &'a Connection,
}

impl<'a> UsersRepo<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    pub fn create(&self, now_utc: i64, input: UserNew, country_code: &str) -> Result<User> {
        let tx = self.conn.unchecked_transaction()?;
        let user = create_inner(&tx, now_utc, input, country_code)?;
        tx.commit()?;
        Ok(user)
    }

    pub fn get(&self, id: UserId) -> Result<Option<User>> {
        get_inner(self.conn, id)
    }

    pub fn list_all(&self) -> Result<Vec<User>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, username, phone_number, alt_phone_number, created_at, updated_at
             FROM users
             ORDER BY name COLLATE NOCASE ASC;",
        )?;
        let mut rows = stmt.query([])?;
        let mut users = Vec::new();
        while let Some(row) = rows.next()? {
            users.push(user_from_row(row)?);
        }
        Ok(users)
    }

    pub fn update(&self, now_utc: i64, id: UserId, update: UserUpdate) -> Result<User> {
        if self.conn.is_autocommit() {
            let tx = self.conn.unchecked_transaction()?;
            let user = update_inner(&tx, now_utc, id, update)?;
            tx.commit()?;
            Ok(user)
        } else {
            update_inner(self.conn, now_utc, id, update)
        }
    }

    pub fn delete(&self, id: UserId) -> Result<()> {
        let deleted = self
            .conn
            .execute("DELETE FROM users WHERE id = ?1;", [id.to_string()])?;
        if deleted == 0 {
            return Err(StoreError::NotFound(id.to_string()));
        }
        Ok(())
    }

    /// Locates the first user whose `phone_number`, `alt_phone_number`,
    /// or `username` equals any spelling of `raw`, or whose column value
    /// ends with the last nine digits of `raw` once spaces, `+`, and `-`
    /// are removed. One read, natural (rowid) order decides ties.
    ///
    /// An input without digits degenerates to an empty suffix, and the
    /// suffix predicate then matches every row with a non-NULL column.
    /// Callers that cannot rule out empty input must check it themselves.
    pub fn find_by_phone(&self, raw: &str, country_code: &str) -> Result<Option<User>> {
        let variants = phone_variants(raw, country_code);
        let suffix = phone_match_suffix(raw);

        let mut clauses: Vec<String> = Vec::new();
        let mut values: Vec<String> = Vec::new();

        if !variants.is_empty() {
            let placeholders = vec!["?"; variants.len()].join(", ");
            for column in MATCH_COLUMNS {
                clauses.push(format!("{column} IN ({placeholders})"));
                values.extend(variants.iter().cloned());
            }
        }

        let pattern = format!("%{suffix}");
        for column in MATCH_COLUMNS {
            clauses.push(format!(
                "REPLACE(REPLACE(REPLACE({column}, ' ', ''), '+', ''), '-', '') LIKE ?"
            ));
            values.push(pattern.clone());
        }

        let sql = format!(
            "SELECT id, name, username, phone_number, alt_phone_number, created_at, updated_at
             FROM users
             WHERE {}
             ORDER BY rowid ASC
             LIMIT 1;",
            clauses.join(" OR ")
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(values))?;
        if let Some(row) = rows.next()? {
            Ok(Some(user_from_row(row)?))
        } else {
            Ok(None)
        }
    }
}

fn create_inner(
    conn: &Connection,
    now_utc: i64,
    input: UserNew,
    country_code: &str,
) -> Result<User> {
    let user = User {
        id: UserId::new(),
        name: input.name,
        username: input.username,
        phone_number: input.phone_number,
        alt_phone_number: input.alt_phone_number,
        created_at: now_utc,
        updated_at: now_utc,
    };

    user.validate()?;

    if let Some(phone) = user.phone_number.as_deref() {
        if UsersRepo::new(conn).find_by_phone(phone, country_code)?.is_some() {
            return Err(StoreError::DuplicatePhone(phone.to_string()));
        }
    }

    conn.execute(
        "INSERT INTO users (id, name, username, phone_number, alt_phone_number, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
        params![
            user.id.to_string(),
            user.name,
            user.username,
            user.phone_number,
            user.alt_phone_number,
            user.created_at,
            user.updated_at,
        ],
    )?;

    Ok(user)
}

fn get_inner(conn: &Connection, id: UserId) -> Result<Option<User>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, username, phone_number, alt_phone_number, created_at, updated_at
         FROM users WHERE id = ?1;",
    )?;
    let mut rows = stmt.query([id.to_string()])?;
    if let Some(row) = rows.next()? {
        Ok(Some(user_from_row(row)?))
    } else {
        Ok(None)
    }
}

fn update_inner(conn: &Connection, now_utc: i64, id: UserId, update: UserUpdate) -> Result<User> {
    let mut user = get_inner(conn, id)?.ok_or_else(|| StoreError::NotFound(id.to_string()))?;

    if let Some(value) = update.name {
        user.name = value;
    }
    if let Some(value) = update.username {
        user.username = value;
    }
    if let Some(value) = update.phone_number {
        user.phone_number = value;
    }
    if let Some(value) = update.alt_phone_number {
        user.alt_phone_number = value;
    }

    user.updated_at = now_utc;
    user.validate()?;

    conn.execute(
        "UPDATE users SET name = ?2, username = ?3, phone_number = ?4, alt_phone_number = ?5, updated_at = ?6
         WHERE id = ?1;",
        params![
            user.id.to_string(),
            user.name,
            user.username,
            user.phone_number,
            user.alt_phone_number,
            user.updated_at,
        ],
    )?;

    Ok(user)
}

fn user_from_row(row: &rusqlite::Row<'_>) -> Result<User> {
    let id_str: String = row.get(0)?;
    let id = UserId::from_str(&id_str).map_err(|_| StoreError::InvalidId(id_str.clone()))?;
    Ok(User {
        id,
        name: row.get(1)?,
        username: row.get(2)?,
        phone_number: row.get(3)?,
        alt_phone_number: row.get(4)?,
        created_at: row.get(5)?,
        updated_at: row.get(6)?,
    })
}
