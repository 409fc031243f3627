//! ChatRepository trait definition.
//!
//! The append-only session history store. Implementations live in
//! healthbuddy-infra (e.g. `SqliteChatRepository`). Uses native async
//! fn in traits (RPITIT, Rust 2024 edition).

use healthbuddy_types::chat::{ChatSession, Message};
use healthbuddy_types::error::RepositoryError;
use uuid::Uuid;

/// Repository trait for session and message persistence.
///
/// History is append-only: no message edit or delete operations exist.
pub trait ChatRepository: Send + Sync {
    /// Create a new chat session.
    fn create_session(
        &self,
        session: &ChatSession,
    ) -> impl std::future::Future<Output = Result<ChatSession, RepositoryError>> + Send;

    /// Get a chat session by its unique ID.
    fn get_session(
        &self,
        session_id: &Uuid,
    ) -> impl std::future::Future<Output = Result<Option<ChatSession>, RepositoryError>> + Send;

    /// Persist a locale change on a session.
    fn set_session_locale(
        &self,
        session_id: &Uuid,
        locale: &str,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Append one message to a session's history.
    ///
    /// Must persist the message and atomically increment the session's
    /// `message_count` before returning, so no appended message can be
    /// lost between append and persistence.
    fn append_message(
        &self,
        message: &Message,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Load a session's full history, ordered by append order.
    ///
    /// A corrupt stored row must degrade (be skipped), never crash the
    /// loader; an entirely absent history is the empty sequence.
    fn get_messages(
        &self,
        session_id: &Uuid,
    ) -> impl std::future::Future<Output = Result<Vec<Message>, RepositoryError>> + Send;

    /// Total messages recorded for a session.
    fn count_messages(
        &self,
        session_id: &Uuid,
    ) -> impl std::future::Future<Output = Result<u64, RepositoryError>> + Send;
}
