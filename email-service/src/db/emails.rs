//! Email CRUD operations

use chrono::{DateTime, Duration, SecondsFormat, SubsecRound, Utc};
use rusqlite::{params, types::Type, Connection, OptionalExtension, Row, ToSql};

use super::Database;
use crate::error::StoreResult;
use crate::seed::SeedEmail;
use crate::types::Email;

const EMAIL_COLUMNS: &str = "id, sender, recipient, subject, body, timestamp, read";

/// Query over the emails table; every set criterion is ANDed
#[derive(Debug, Clone, Default)]
pub struct EmailQuery {
    pub unread_only: bool,
    /// Case-insensitive substring of subject, body or sender
    pub text: Option<String>,
    /// Exact recipient
    pub recipient: Option<String>,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

impl Database {
    /// Insert a new email and return it as stored
    pub fn insert_email(
        &self,
        sender: &str,
        recipient: &str,
        subject: &str,
        body: &str,
    ) -> StoreResult<Email> {
        let conn = self.conn()?;
        let timestamp = next_timestamp(&conn)?;

        conn.execute(
            r#"
            INSERT INTO emails (sender, recipient, subject, body, timestamp, read)
            VALUES (?1, ?2, ?3, ?4, ?5, 0)
            "#,
            params![sender, recipient, subject, body, format_timestamp(&timestamp)],
        )?;

        Ok(Email {
            id: conn.last_insert_rowid(),
            sender: sender.to_string(),
            recipient: recipient.to_string(),
            subject: subject.to_string(),
            body: body.to_string(),
            timestamp,
            read: false,
        })
    }

    /// List emails matching `query`, newest first
    pub fn query_emails(&self, query: &EmailQuery) -> StoreResult<Vec<Email>> {
        let conn = self.conn()?;

        let mut sql = format!("SELECT {} FROM emails WHERE 1=1", EMAIL_COLUMNS);
        let mut params: Vec<Box<dyn ToSql>> = Vec::new();

        if query.unread_only {
            sql.push_str(" AND read = 0");
        }

        if let Some(text) = &query.text {
            let pattern = format!("%{}%", escape_like(text));
            sql.push_str(
                r" AND (subject LIKE ? ESCAPE '\' OR body LIKE ? ESCAPE '\' OR sender LIKE ? ESCAPE '\')",
            );
            params.push(Box::new(pattern.clone()));
            params.push(Box::new(pattern.clone()));
            params.push(Box::new(pattern));
        }

        if let Some(recipient) = &query.recipient {
            sql.push_str(" AND recipient = ?");
            params.push(Box::new(recipient.clone()));
        }

        if let Some(start) = &query.start {
            sql.push_str(" AND timestamp >= ?");
            params.push(Box::new(format_timestamp(&ceil_micros(start))));
        }

        if let Some(end) = &query.end {
            sql.push_str(" AND timestamp <= ?");
            params.push(Box::new(format_timestamp(end)));
        }

        sql.push_str(" ORDER BY timestamp DESC, id DESC");

        let param_refs: Vec<&dyn ToSql> = params.iter().map(|p| p.as_ref()).collect();

        let mut stmt = conn.prepare(&sql)?;
        let emails = stmt
            .query_map(param_refs.as_slice(), email_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(emails)
    }

    /// Get an email by ID
    pub fn get_email(&self, id: i64) -> StoreResult<Option<Email>> {
        let conn = self.conn()?;

        let email = conn
            .query_row(
                &format!("SELECT {} FROM emails WHERE id = ?1", EMAIL_COLUMNS),
                params![id],
                email_from_row,
            )
            .optional()?;

        Ok(email)
    }

    /// Set the read flag; returns false if no such email exists
    pub fn set_read(&self, id: i64, read: bool) -> StoreResult<bool> {
        let conn = self.conn()?;
        let changed = conn.execute("UPDATE emails SET read = ?1 WHERE id = ?2", params![read, id])?;
        Ok(changed > 0)
    }

    /// Delete an email; returns false if no such email exists
    pub fn delete_email(&self, id: i64) -> StoreResult<bool> {
        let conn = self.conn()?;
        let changed = conn.execute("DELETE FROM emails WHERE id = ?1", params![id])?;
        Ok(changed > 0)
    }

    /// Replace the whole table with `seed` in one transaction
    pub fn reset_emails(&self, seed: &[SeedEmail]) -> StoreResult<()> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;

        tx.execute("DELETE FROM emails", [])?;
        for email in seed {
            insert_seed(&tx, email, "INSERT")?;
        }

        tx.commit()?;
        Ok(())
    }

    /// Insert every seed record whose id is absent; returns how many were added
    pub fn insert_missing_seed(&self, seed: &[SeedEmail]) -> StoreResult<usize> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;

        let mut inserted = 0;
        for email in seed {
            inserted += insert_seed(&tx, email, "INSERT OR IGNORE")?;
        }

        tx.commit()?;
        Ok(inserted)
    }

    /// Number of stored emails
    pub fn count_emails(&self) -> StoreResult<i64> {
        let conn = self.conn()?;
        let count = conn.query_row("SELECT COUNT(*) FROM emails", [], |row| row.get(0))?;
        Ok(count)
    }
}

fn insert_seed(conn: &Connection, email: &SeedEmail, verb: &str) -> StoreResult<usize> {
    let timestamp = next_timestamp(conn)?;
    let changed = conn.execute(
        &format!(
            "{} INTO emails (id, sender, recipient, subject, body, timestamp, read) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            verb
        ),
        params![
            email.id,
            email.sender,
            email.recipient,
            email.subject,
            email.body,
            format_timestamp(&timestamp),
            email.read,
        ],
    )?;
    Ok(changed)
}

/// Current time, but never earlier than the newest stored timestamp.
///
/// Keeps insertion order and timestamp order in agreement when the wall
/// clock steps backwards.
fn next_timestamp(conn: &Connection) -> StoreResult<DateTime<Utc>> {
    let now = Utc::now().trunc_subsecs(6);

    let latest: Option<String> =
        conn.query_row("SELECT MAX(timestamp) FROM emails", [], |row| row.get(0))?;

    match latest {
        Some(raw) => Ok(now.max(parse_stored_timestamp(0, &raw)?)),
        None => Ok(now),
    }
}

/// Fixed-width RFC 3339 so that text order equals time order
fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Round up to the next whole microsecond.
///
/// Stored timestamps carry microseconds, so a sub-microsecond start bound
/// must not admit rows from the microsecond it falls inside.
fn ceil_micros(ts: &DateTime<Utc>) -> DateTime<Utc> {
    let truncated = ts.trunc_subsecs(6);
    if truncated < *ts {
        truncated + Duration::microseconds(1)
    } else {
        truncated
    }
}

fn parse_stored_timestamp(column: usize, raw: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(column, Type::Text, Box::new(e)))
}

fn email_from_row(row: &Row<'_>) -> rusqlite::Result<Email> {
    let raw_timestamp: String = row.get(5)?;

    Ok(Email {
        id: row.get(0)?,
        sender: row.get(1)?,
        recipient: row.get(2)?,
        subject: row.get(3)?,
        body: row.get(4)?,
        timestamp: parse_stored_timestamp(5, &raw_timestamp)?,
        read: row.get(6)?,
    })
}

/// Escape LIKE wildcards so the text matches literally
fn escape_like(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
