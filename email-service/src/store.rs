//! Email store: validation and error mapping on top of [`Database`]

use tracing::{debug, info};

use crate::db::{Database, EmailQuery};
use crate::error::{StoreError, StoreResult};
use crate::seed::SEED_EMAILS;
use crate::types::{Email, EmailFilter, MessageResponse, NewEmail, ResetResponse};

/// Upper bound on sender and recipient length, in characters
pub const MAX_ADDRESS_LEN: usize = 255;
/// Upper bound on subject length, in characters
pub const MAX_SUBJECT_LEN: usize = 500;

/// Default address used as sender when none is given
pub const DEFAULT_SELF_ADDRESS: &str = "you@email.com";

/// The email store service
///
/// Cheap to clone; clones share the underlying connection.
#[derive(Clone)]
pub struct EmailStore {
    db: Database,
    self_address: String,
}

impl EmailStore {
    pub fn new(db: Database, self_address: impl Into<String>) -> Self {
        Self {
            db,
            self_address: self_address.into(),
        }
    }

    /// Address used as sender when a new email doesn't name one
    pub fn self_address(&self) -> &str {
        &self.self_address
    }

    /// Create ("send") an email
    pub fn create(&self, new: NewEmail) -> StoreResult<Email> {
        let sender = match new.sender.as_deref() {
            Some(s) if !s.trim().is_empty() => s,
            _ => self.self_address.as_str(),
        };

        require_non_empty("recipient", &new.recipient)?;
        require_non_empty("subject", &new.subject)?;
        require_non_empty("body", &new.body)?;
        require_max_len("sender", sender, MAX_ADDRESS_LEN)?;
        require_max_len("recipient", &new.recipient, MAX_ADDRESS_LEN)?;
        require_max_len("subject", &new.subject, MAX_SUBJECT_LEN)?;

        let email = self
            .db
            .insert_email(sender, &new.recipient, &new.subject, &new.body)?;

        info!(id = email.id, recipient = %email.recipient, "Email created");
        Ok(email)
    }

    /// All emails, newest first
    pub fn list_all(&self) -> StoreResult<Vec<Email>> {
        self.db.query_emails(&EmailQuery::default())
    }

    /// Unread emails, newest first
    pub fn list_unread(&self) -> StoreResult<Vec<Email>> {
        self.db.query_emails(&EmailQuery {
            unread_only: true,
            ..Default::default()
        })
    }

    /// Case-insensitive substring search over subject, body and sender.
    ///
    /// A blank query matches every email.
    pub fn search(&self, query: &str) -> StoreResult<Vec<Email>> {
        let text = (!query.trim().is_empty()).then(|| query.to_string());
        let results = self.db.query_emails(&EmailQuery {
            text,
            ..Default::default()
        })?;

        debug!(query, matches = results.len(), "Search");
        Ok(results)
    }

    /// Emails matching every criterion in `filter`
    pub fn filter(&self, filter: EmailFilter) -> StoreResult<Vec<Email>> {
        let recipient = filter.recipient.filter(|r| !r.is_empty());

        self.db.query_emails(&EmailQuery {
            recipient,
            start: filter.start_date,
            end: filter.end_date,
            ..Default::default()
        })
    }

    /// Fetch one email
    pub fn get(&self, id: i64) -> StoreResult<Email> {
        self.db.get_email(id)?.ok_or(StoreError::NotFound(id))
    }

    pub fn mark_read(&self, id: i64) -> StoreResult<MessageResponse> {
        self.set_read(id, true)?;
        Ok(MessageResponse::new(id, "Email marked as read"))
    }

    pub fn mark_unread(&self, id: i64) -> StoreResult<MessageResponse> {
        self.set_read(id, false)?;
        Ok(MessageResponse::new(id, "Email marked as unread"))
    }

    fn set_read(&self, id: i64, read: bool) -> StoreResult<()> {
        if !self.db.set_read(id, read)? {
            return Err(StoreError::NotFound(id));
        }
        debug!(id, read, "Read flag updated");
        Ok(())
    }

    /// Delete an email; its id is never handed out again
    pub fn delete(&self, id: i64) -> StoreResult<MessageResponse> {
        if !self.db.delete_email(id)? {
            return Err(StoreError::NotFound(id));
        }

        info!(id, "Email deleted");
        Ok(MessageResponse::new(id, "Email deleted successfully"))
    }

    /// Replace every email with the seed dataset
    pub fn reset(&self) -> StoreResult<ResetResponse> {
        self.db.reset_emails(&SEED_EMAILS)?;

        info!(count = SEED_EMAILS.len(), "Database reset to seed data");
        Ok(ResetResponse {
            message: "Database reset to initial state".to_string(),
        })
    }

    /// Insert seed emails whose ids are absent, leaving the rest alone
    pub fn seed_missing(&self) -> StoreResult<usize> {
        let inserted = self.db.insert_missing_seed(&SEED_EMAILS)?;
        if inserted > 0 {
            info!(inserted, "Seeded missing emails");
        }
        Ok(inserted)
    }

    pub fn count(&self) -> StoreResult<i64> {
        self.db.count_emails()
    }
}

fn require_non_empty(field: &str, value: &str) -> StoreResult<()> {
    if value.trim().is_empty() {
        return Err(StoreError::validation(format!("{} must not be empty", field)));
    }
    Ok(())
}

fn require_max_len(field: &str, value: &str, max: usize) -> StoreResult<()> {
    if value.chars().count() > max {
        return Err(StoreError::validation(format!(
            "{} must be at most {} characters",
            field, max
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::parse_timestamp;

    fn seeded_store() -> EmailStore {
        let store = EmailStore::new(Database::open_in_memory().unwrap(), DEFAULT_SELF_ADDRESS);
        store.reset().unwrap();
        store
    }

    fn new_email(recipient: &str, subject: &str, body: &str) -> NewEmail {
        NewEmail {
            recipient: recipient.to_string(),
            subject: subject.to_string(),
            body: body.to_string(),
            sender: None,
        }
    }

    fn ids(emails: &[Email]) -> Vec<i64> {
        emails.iter().map(|e| e.id).collect()
    }

    #[test]
    fn test_create_then_get() {
        let store = seeded_store();
        let email = store
            .create(new_email("bob@x.com", "Status", "All good"))
            .unwrap();

        let fetched = store.get(email.id).unwrap();
        assert!(!fetched.read);
        assert_eq!(fetched.sender, DEFAULT_SELF_ADDRESS);
        assert_eq!(fetched.recipient, "bob@x.com");
        assert_eq!(fetched.subject, "Status");
        assert_eq!(fetched.body, "All good");
    }

    #[test]
    fn test_create_ids_are_unique() {
        let store = seeded_store();
        let a = store.create(new_email("a@x.com", "A", "a")).unwrap();
        let b = store.create(new_email("b@x.com", "B", "b")).unwrap();
        assert_ne!(a.id, b.id);
        assert!(SEED_EMAILS.iter().all(|s| s.id != a.id && s.id != b.id));
    }

    #[test]
    fn test_concurrent_creates_get_distinct_ordered_ids() {
        const THREADS: usize = 8;
        const PER_THREAD: usize = 25;

        let store = seeded_store();
        let handles: Vec<_> = (0..THREADS)
            .map(|t| {
                let store = store.clone();
                std::thread::spawn(move || {
                    (0..PER_THREAD)
                        .map(|i| {
                            let subject = format!("t{} #{}", t, i);
                            store.create(new_email("a@x.com", &subject, "body")).unwrap().id
                        })
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let created: std::collections::HashSet<i64> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();
        assert_eq!(created.len(), THREADS * PER_THREAD);
        assert!(SEED_EMAILS.iter().all(|s| !created.contains(&s.id)));

        let all = store.list_all().unwrap();
        assert_eq!(all.len(), SEED_EMAILS.len() + THREADS * PER_THREAD);
        assert!(all
            .windows(2)
            .all(|w| (w[0].timestamp, w[0].id) > (w[1].timestamp, w[1].id)));
    }

    #[test]
    fn test_create_uses_explicit_sender() {
        let store = seeded_store();
        let mut new = new_email("a@x.com", "Hi", "Hello");
        new.sender = Some("carol@x.com".to_string());
        let email = store.create(new).unwrap();
        assert_eq!(email.sender, "carol@x.com");

        let mut blank = new_email("a@x.com", "Hi", "Hello");
        blank.sender = Some("  ".to_string());
        assert_eq!(store.create(blank).unwrap().sender, DEFAULT_SELF_ADDRESS);
    }

    #[test]
    fn test_create_rejects_missing_fields() {
        let store = seeded_store();
        for new in [
            new_email("", "Hi", "Hello"),
            new_email("a@x.com", "   ", "Hello"),
            new_email("a@x.com", "Hi", ""),
        ] {
            let err = store.create(new).unwrap_err();
            assert!(matches!(err, StoreError::Validation(_)));
        }
        assert_eq!(store.count().unwrap(), 6);
    }

    #[test]
    fn test_create_rejects_overlong_fields() {
        let store = seeded_store();
        let long_subject = "s".repeat(MAX_SUBJECT_LEN + 1);
        let err = store
            .create(new_email("a@x.com", &long_subject, "body"))
            .unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));

        let long_recipient = format!("{}@x.com", "r".repeat(MAX_ADDRESS_LEN));
        let err = store
            .create(new_email(&long_recipient, "Hi", "body"))
            .unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));

        let exact = "s".repeat(MAX_SUBJECT_LEN);
        assert!(store.create(new_email("a@x.com", &exact, "body")).is_ok());
    }

    #[test]
    fn test_delete_then_get_is_not_found() {
        let store = seeded_store();
        let email = store.create(new_email("a@x.com", "Bye", "gone")).unwrap();

        let resp = store.delete(email.id).unwrap();
        assert_eq!(resp.message, "Email deleted successfully");
        assert!(matches!(store.get(email.id), Err(StoreError::NotFound(_))));
        assert!(matches!(store.delete(email.id), Err(StoreError::NotFound(_))));
    }

    #[test]
    fn test_deleted_id_never_reused() {
        let store = seeded_store();
        let email = store.create(new_email("a@x.com", "Temp", "temp")).unwrap();
        store.delete(email.id).unwrap();

        for _ in 0..3 {
            let next = store.create(new_email("a@x.com", "Next", "next")).unwrap();
            assert!(next.id > email.id);
        }

        store.reset().unwrap();
        let after_reset = store.create(new_email("a@x.com", "Again", "again")).unwrap();
        assert!(after_reset.id > email.id + 3);
    }

    #[test]
    fn test_mark_read_and_unread_are_idempotent() {
        let store = seeded_store();

        store.mark_read(1).unwrap();
        let resp = store.mark_read(1).unwrap();
        assert_eq!(resp, MessageResponse::new(1, "Email marked as read"));
        assert!(store.get(1).unwrap().read);

        store.mark_unread(1).unwrap();
        let resp = store.mark_unread(1).unwrap();
        assert_eq!(resp.message, "Email marked as unread");
        assert!(!store.get(1).unwrap().read);
    }

    #[test]
    fn test_mark_missing_is_not_found() {
        let store = seeded_store();
        assert!(matches!(store.mark_read(999), Err(StoreError::NotFound(999))));
        assert!(matches!(store.mark_unread(999), Err(StoreError::NotFound(999))));
    }

    #[test]
    fn test_get_missing_is_not_found() {
        let store = seeded_store();
        let err = store.get(999).unwrap_err();
        assert!(matches!(err, StoreError::NotFound(999)));
        assert_eq!(err.to_string(), "Email not found");
    }

    #[test]
    fn test_list_all_is_newest_first() {
        let store = seeded_store();
        let first = store.create(new_email("a@x.com", "First", "1")).unwrap();
        let second = store.create(new_email("a@x.com", "Second", "2")).unwrap();

        let all = store.list_all().unwrap();
        assert_eq!(all.len(), 8);
        assert_eq!(all[0].id, second.id);
        assert_eq!(all[1].id, first.id);
        assert!(all
            .windows(2)
            .all(|w| (w[0].timestamp, w[0].id) > (w[1].timestamp, w[1].id)));
    }

    #[test]
    fn test_list_unread_is_unread_subset_of_list_all() {
        let store = seeded_store();
        store.mark_read(2).unwrap();

        let expected: Vec<i64> = store
            .list_all()
            .unwrap()
            .into_iter()
            .filter(|e| !e.read)
            .map(|e| e.id)
            .collect();
        let unread = store.list_unread().unwrap();

        assert_eq!(ids(&unread), expected);
        assert_eq!(unread.len(), 3);
    }

    #[test]
    fn test_search_lunch_finds_seed_three() {
        let store = seeded_store();
        assert_eq!(ids(&store.search("lunch").unwrap()), vec![3]);
        assert_eq!(ids(&store.search("LUNCH").unwrap()), vec![3]);
    }

    #[test]
    fn test_search_matches_sender() {
        let store = seeded_store();
        let mut found = ids(&store.search("boss@").unwrap());
        found.sort();
        assert_eq!(found, vec![2, 5]);
    }

    #[test]
    fn test_search_blank_matches_all() {
        let store = seeded_store();
        assert_eq!(store.search("").unwrap().len(), 6);
        assert_eq!(store.search("   ").unwrap().len(), 6);
    }

    #[test]
    fn test_search_no_match_is_empty() {
        let store = seeded_store();
        assert!(store.search("zzz-no-such-text").unwrap().is_empty());
    }

    #[test]
    fn test_filter_by_recipient() {
        let store = seeded_store();
        let all = store
            .filter(EmailFilter {
                recipient: Some("you@email.com".to_string()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(all.len(), 6);

        let none = store
            .filter(EmailFilter {
                recipient: Some("YOU@email.com".to_string()),
                ..Default::default()
            })
            .unwrap();
        assert!(none.is_empty());
    }

    #[test]
    fn test_filter_empty_recipient_is_ignored() {
        let store = seeded_store();
        let results = store
            .filter(EmailFilter {
                recipient: Some(String::new()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(results.len(), 6);
    }

    #[test]
    fn test_filter_by_date_range() {
        let store = seeded_store();
        let email = store.create(new_email("a@x.com", "Dated", "d")).unwrap();

        let inclusive = store
            .filter(EmailFilter {
                start_date: Some(email.timestamp),
                end_date: Some(email.timestamp),
                ..Default::default()
            })
            .unwrap();
        assert!(ids(&inclusive).contains(&email.id));

        let future = store
            .filter(EmailFilter {
                start_date: Some(parse_timestamp("2999-01-01").unwrap()),
                ..Default::default()
            })
            .unwrap();
        assert!(future.is_empty());

        let past = store
            .filter(EmailFilter {
                end_date: Some(parse_timestamp("2000-01-01").unwrap()),
                ..Default::default()
            })
            .unwrap();
        assert!(past.is_empty());
    }

    #[test]
    fn test_filter_inverted_range_is_empty() {
        let store = seeded_store();
        let results = store
            .filter(EmailFilter {
                start_date: Some(parse_timestamp("2999-01-01").unwrap()),
                end_date: Some(parse_timestamp("2000-01-01").unwrap()),
                ..Default::default()
            })
            .unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn test_reset_restores_seed() {
        let store = seeded_store();
        store.create(new_email("a@x.com", "Extra", "x")).unwrap();
        store.delete(1).unwrap();
        store.mark_read(3).unwrap();

        let resp = store.reset().unwrap();
        assert_eq!(resp.message, "Database reset to initial state");

        let mut all = store.list_all().unwrap();
        all.sort_by_key(|e| e.id);
        assert_eq!(ids(&all), vec![1, 2, 3, 4, 5, 6]);
        for (email, seed) in all.iter().zip(SEED_EMAILS.iter()) {
            assert_eq!(email.sender, seed.sender);
            assert_eq!(email.subject, seed.subject);
            assert_eq!(email.read, seed.read);
        }
    }

    #[test]
    fn test_seed_missing_on_empty_store() {
        let store = EmailStore::new(Database::open_in_memory().unwrap(), DEFAULT_SELF_ADDRESS);
        assert_eq!(store.seed_missing().unwrap(), 6);
        assert_eq!(store.seed_missing().unwrap(), 0);
        assert_eq!(store.count().unwrap(), 6);
    }
}
