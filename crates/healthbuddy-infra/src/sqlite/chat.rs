//! SQLite chat repository implementation.
//!
//! Implements `ChatRepository` from `healthbuddy-core` using sqlx with
//! split read/write pools: raw queries, private Row structs, writer
//! transactions for the append + count increment.
//!
//! A stored row that fails domain mapping is skipped with a warning,
//! so a corrupt history degrades instead of crashing the loader.

use chrono::{DateTime, Utc};
use sqlx::Row;
use uuid::Uuid;

use healthbuddy_core::chat::repository::ChatRepository;
use healthbuddy_types::chat::{ChatSession, Message, Sender};
use healthbuddy_types::error::RepositoryError;

use super::pool::DatabasePool;

/// SQLite-backed implementation of `ChatRepository`.
pub struct SqliteChatRepository {
    pool: DatabasePool,
}

impl SqliteChatRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

// ---------------------------------------------------------------------------
// Private Row types for SQLite-to-domain mapping
// ---------------------------------------------------------------------------

/// Internal row type for mapping SQLite rows to domain ChatSession.
struct ChatSessionRow {
    id: String,
    locale: String,
    started_at: String,
    message_count: i64,
}

impl ChatSessionRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            locale: row.try_get("locale")?,
            started_at: row.try_get("started_at")?,
            message_count: row.try_get("message_count")?,
        })
    }

    fn into_session(self) -> Result<ChatSession, RepositoryError> {
        let id = Uuid::parse_str(&self.id)
            .map_err(|e| RepositoryError::Query(format!("invalid session id: {e}")))?;
        let started_at = parse_datetime(&self.started_at)?;

        Ok(ChatSession {
            id,
            locale: self.locale,
            started_at,
            message_count: self.message_count as u32,
        })
    }
}

/// Internal row type for mapping SQLite rows to domain Message.
struct MessageRow {
    id: String,
    session_id: String,
    sender: String,
    text: String,
    sent_at: i64,
}

impl MessageRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            session_id: row.try_get("session_id")?,
            sender: row.try_get("sender")?,
            text: row.try_get("text")?,
            sent_at: row.try_get("sent_at")?,
        })
    }

    fn into_message(self) -> Result<Message, RepositoryError> {
        let id = Uuid::parse_str(&self.id)
            .map_err(|e| RepositoryError::Query(format!("invalid message id: {e}")))?;
        let session_id = Uuid::parse_str(&self.session_id)
            .map_err(|e| RepositoryError::Query(format!("invalid session_id: {e}")))?;
        let sender: Sender = self
            .sender
            .parse()
            .map_err(|e: String| RepositoryError::Query(e))?;
        let sent_at = DateTime::<Utc>::from_timestamp_millis(self.sent_at).ok_or_else(|| {
            RepositoryError::Query(format!("invalid sent_at millis: {}", self.sent_at))
        })?;

        Ok(Message {
            id,
            session_id,
            sender,
            text: self.text,
            sent_at,
        })
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn parse_datetime(s: &str) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::Query(format!("invalid datetime: {e}")))
}

fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

// ---------------------------------------------------------------------------
// ChatRepository implementation
// ---------------------------------------------------------------------------

impl ChatRepository for SqliteChatRepository {
    async fn create_session(&self, session: &ChatSession) -> Result<ChatSession, RepositoryError> {
        sqlx::query(
            r#"INSERT INTO chat_sessions (id, locale, started_at, message_count)
               VALUES (?, ?, ?, ?)"#,
        )
        .bind(session.id.to_string())
        .bind(&session.locale)
        .bind(format_datetime(&session.started_at))
        .bind(session.message_count as i64)
        .execute(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(session.clone())
    }

    async fn get_session(&self, session_id: &Uuid) -> Result<Option<ChatSession>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM chat_sessions WHERE id = ?")
            .bind(session_id.to_string())
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        match row {
            Some(row) => {
                let session_row = ChatSessionRow::from_row(&row)
                    .map_err(|e| RepositoryError::Query(e.to_string()))?;
                Ok(Some(session_row.into_session()?))
            }
            None => Ok(None),
        }
    }

    async fn set_session_locale(
        &self,
        session_id: &Uuid,
        locale: &str,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query("UPDATE chat_sessions SET locale = ? WHERE id = ?")
            .bind(locale)
            .bind(session_id.to_string())
            .execute(&self.pool.writer)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    async fn append_message(&self, message: &Message) -> Result<(), RepositoryError> {
        // One transaction: the message insert and the session counter
        // increment land together or not at all.
        let mut tx = self
            .pool
            .writer
            .begin()
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        sqlx::query(
            r#"INSERT INTO chat_messages (id, session_id, sender, text, sent_at)
               VALUES (?, ?, ?, ?, ?)"#,
        )
        .bind(message.id.to_string())
        .bind(message.session_id.to_string())
        .bind(message.sender.to_string())
        .bind(&message.text)
        .bind(message.sent_at.timestamp_millis())
        .execute(&mut *tx)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        sqlx::query("UPDATE chat_sessions SET message_count = message_count + 1 WHERE id = ?")
            .bind(message.session_id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        tx.commit()
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(())
    }

    async fn get_messages(&self, session_id: &Uuid) -> Result<Vec<Message>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT * FROM chat_messages WHERE session_id = ? ORDER BY sent_at ASC, id ASC",
        )
        .bind(session_id.to_string())
        .fetch_all(&self.pool.reader)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let mut messages = Vec::with_capacity(rows.len());
        for row in &rows {
            let mapped = MessageRow::from_row(row)
                .map_err(|e| RepositoryError::Query(e.to_string()))
                .and_then(MessageRow::into_message);
            match mapped {
                Ok(message) => messages.push(message),
                Err(err) => {
                    // Corrupt history degrades, it never blocks replay.
                    tracing::warn!(session_id = %session_id, %err, "Skipping corrupt history row");
                }
            }
        }

        Ok(messages)
    }

    async fn count_messages(&self, session_id: &Uuid) -> Result<u64, RepositoryError> {
        let row = sqlx::query("SELECT COUNT(*) AS count FROM chat_messages WHERE session_id = ?")
            .bind(session_id.to_string())
            .fetch_one(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let count: i64 = row
            .try_get("count")
            .map_err(|e| RepositoryError::Query(e.to_string()))?;
        Ok(count as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    async fn test_repo() -> (tempfile::TempDir, SqliteChatRepository) {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let url = format!("sqlite://{}?mode=rwc", db_path.display());
        let pool = DatabasePool::new(&url).await.unwrap();
        (dir, SqliteChatRepository::new(pool))
    }

    fn new_session(locale: &str) -> ChatSession {
        ChatSession {
            id: Uuid::now_v7(),
            locale: locale.to_string(),
            started_at: Utc::now(),
            message_count: 0,
        }
    }

    #[tokio::test]
    async fn test_session_roundtrip() {
        let (_dir, repo) = test_repo().await;
        let session = new_session("hi");
        repo.create_session(&session).await.unwrap();

        let loaded = repo.get_session(&session.id).await.unwrap().unwrap();
        assert_eq!(loaded.id, session.id);
        assert_eq!(loaded.locale, "hi");
        assert_eq!(loaded.message_count, 0);
    }

    #[tokio::test]
    async fn test_get_session_missing_is_none() {
        let (_dir, repo) = test_repo().await;
        assert!(repo.get_session(&Uuid::now_v7()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_set_session_locale() {
        let (_dir, repo) = test_repo().await;
        let session = new_session("en");
        repo.create_session(&session).await.unwrap();

        repo.set_session_locale(&session.id, "te").await.unwrap();
        let loaded = repo.get_session(&session.id).await.unwrap().unwrap();
        assert_eq!(loaded.locale, "te");
    }

    #[tokio::test]
    async fn test_set_locale_missing_session() {
        let (_dir, repo) = test_repo().await;
        let err = repo
            .set_session_locale(&Uuid::now_v7(), "en")
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound));
    }

    #[tokio::test]
    async fn test_history_roundtrip_preserves_order_and_fields() {
        let (_dir, repo) = test_repo().await;
        let session = new_session("en");
        repo.create_session(&session).await.unwrap();

        let mut appended = Vec::new();
        for i in 0..5 {
            let msg = if i % 2 == 0 {
                Message::user(session.id, format!("question {i}"))
            } else {
                Message::bot(session.id, format!("answer {i}"))
            };
            repo.append_message(&msg).await.unwrap();
            appended.push(msg);
        }

        let loaded = repo.get_messages(&session.id).await.unwrap();
        assert_eq!(loaded.len(), appended.len());
        for (loaded, appended) in loaded.iter().zip(&appended) {
            assert_eq!(loaded.id, appended.id);
            assert_eq!(loaded.sender, appended.sender);
            assert_eq!(loaded.text, appended.text);
            assert_eq!(
                loaded.sent_at.timestamp_millis(),
                appended.sent_at.timestamp_millis()
            );
        }
    }

    #[tokio::test]
    async fn test_append_increments_message_count() {
        let (_dir, repo) = test_repo().await;
        let session = new_session("en");
        repo.create_session(&session).await.unwrap();

        repo.append_message(&Message::user(session.id, "a")).await.unwrap();
        repo.append_message(&Message::bot(session.id, "b")).await.unwrap();

        let loaded = repo.get_session(&session.id).await.unwrap().unwrap();
        assert_eq!(loaded.message_count, 2);
        assert_eq!(repo.count_messages(&session.id).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_empty_history_loads_empty() {
        let (_dir, repo) = test_repo().await;
        let session = new_session("en");
        repo.create_session(&session).await.unwrap();
        assert!(repo.get_messages(&session.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_row_is_skipped_not_fatal() {
        let (_dir, repo) = test_repo().await;
        let session = new_session("en");
        repo.create_session(&session).await.unwrap();

        let good = Message::user(session.id, "fever");
        repo.append_message(&good).await.unwrap();

        // Write a row with an unparsable message id directly.
        sqlx::query(
            "INSERT INTO chat_messages (id, session_id, sender, text, sent_at) VALUES (?, ?, 'bot', 'x', ?)",
        )
        .bind("not-a-uuid")
        .bind(session.id.to_string())
        .bind(Utc::now().timestamp_millis())
        .execute(&repo.pool.writer)
        .await
        .unwrap();

        let loaded = repo.get_messages(&session.id).await.unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id, good.id);
    }
}
