//! Chat controller: owns the submit cycle for one session.
//!
//! This is the only component that mutates history or invokes the
//! resolver. Submissions for the same session are serialized with an
//! in-flight guard: a second submit arriving while one is pending is
//! rejected rather than interleaving its replies out of order.

use std::collections::BTreeMap;
use std::sync::Arc;

use dashmap::DashMap;
use uuid::Uuid;

use chrono::Utc;
use healthbuddy_types::chat::{ChatSession, Exchange, Message};
use healthbuddy_types::error::ChatError;

use crate::chat::repository::ChatRepository;
use crate::i18n::TranslationCatalog;
use crate::reply::delegate::ReplyDelegate;
use crate::reply::matcher::ReplyMatcher;
use crate::reply::resolver::ReplyResolver;

/// Removes the session's in-flight marker when the submit cycle ends,
/// including on early return or panic.
struct InFlightGuard<'a> {
    map: &'a DashMap<Uuid, ()>,
    id: Uuid,
}

impl<'a> InFlightGuard<'a> {
    fn acquire(map: &'a DashMap<Uuid, ()>, id: Uuid) -> Option<Self> {
        use dashmap::mapref::entry::Entry;
        match map.entry(id) {
            Entry::Occupied(_) => None,
            Entry::Vacant(slot) => {
                slot.insert(());
                Some(Self { map, id })
            }
        }
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.map.remove(&self.id);
    }
}

/// Orchestrates session lifecycle, reply resolution, and persistence.
///
/// Generic over the repository, delegate, and matcher seams so core
/// never depends on healthbuddy-infra.
pub struct ChatController<R: ChatRepository, D: ReplyDelegate, M: ReplyMatcher> {
    repo: R,
    resolver: ReplyResolver<D, M>,
    catalog: Arc<TranslationCatalog>,
    in_flight: DashMap<Uuid, ()>,
}

impl<R: ChatRepository, D: ReplyDelegate, M: ReplyMatcher> ChatController<R, D, M> {
    /// Create a controller over the given repository, resolver, and catalog.
    pub fn new(repo: R, resolver: ReplyResolver<D, M>, catalog: Arc<TranslationCatalog>) -> Self {
        Self {
            repo,
            resolver,
            catalog,
            in_flight: DashMap::new(),
        }
    }

    /// Access the translation catalog.
    pub fn catalog(&self) -> &TranslationCatalog {
        &self.catalog
    }

    /// Start a new session pinned to a servable locale.
    ///
    /// Seeds the history with the translated welcome message, so a
    /// fresh session replays with the bot greeting first.
    pub async fn start_session(&self, locale: &str) -> Result<ChatSession, ChatError> {
        let pinned = self.catalog.pin_locale(locale);
        let mut session = ChatSession {
            id: Uuid::now_v7(),
            locale: pinned.to_string(),
            started_at: Utc::now(),
            message_count: 0,
        };
        self.repo.create_session(&session).await?;

        let welcome = Message::bot(session.id, self.catalog.resolve(pinned, "bot_welcome"));
        self.repo.append_message(&welcome).await?;
        session.message_count = 1;

        tracing::info!(session_id = %session.id, locale = %session.locale, "Session started");
        Ok(session)
    }

    /// Handle one submitted utterance.
    ///
    /// Trims the input; whitespace-only input is a no-op that creates
    /// no messages and never reaches the resolver. Otherwise the user
    /// message is persisted first, the reply is resolved, and the bot
    /// message is persisted, in that order.
    pub async fn submit(
        &self,
        session_id: &Uuid,
        raw_text: &str,
    ) -> Result<Option<Exchange>, ChatError> {
        let text = raw_text.trim();
        if text.is_empty() {
            return Ok(None);
        }

        let _guard = InFlightGuard::acquire(&self.in_flight, *session_id)
            .ok_or(ChatError::SubmissionInFlight)?;

        let session = self
            .repo
            .get_session(session_id)
            .await?
            .ok_or(ChatError::SessionNotFound)?;

        let user = Message::user(*session_id, text);
        self.repo.append_message(&user).await?;

        let resolved = self
            .resolver
            .resolve(text, &session.locale, &self.catalog)
            .await;
        let source = resolved.source;

        let bot = Message::bot(*session_id, resolved.text);
        self.repo.append_message(&bot).await?;

        tracing::info!(session_id = %session_id, source = %source, "Exchange recorded");
        Ok(Some(Exchange { user, bot, source }))
    }

    /// Change a session's locale, pinning unknown locales to the default.
    ///
    /// Persists the change and announces it with the translated
    /// welcome message. Returns the pinned locale.
    pub async fn set_locale(&self, session_id: &Uuid, locale: &str) -> Result<String, ChatError> {
        let pinned = self.catalog.pin_locale(locale).to_string();

        if self.repo.get_session(session_id).await?.is_none() {
            return Err(ChatError::SessionNotFound);
        }
        self.repo.set_session_locale(session_id, &pinned).await?;

        let welcome = Message::bot(*session_id, self.catalog.resolve(&pinned, "bot_welcome"));
        self.repo.append_message(&welcome).await?;

        tracing::info!(session_id = %session_id, locale = %pinned, "Locale changed");
        Ok(pinned)
    }

    /// Get a session by ID.
    pub async fn get_session(&self, session_id: &Uuid) -> Result<Option<ChatSession>, ChatError> {
        Ok(self.repo.get_session(session_id).await?)
    }

    /// Replay a session's full history in append order.
    pub async fn history(&self, session_id: &Uuid) -> Result<Vec<Message>, ChatError> {
        if self.repo.get_session(session_id).await?.is_none() {
            return Err(ChatError::SessionNotFound);
        }
        Ok(self.repo.get_messages(session_id).await?)
    }

    /// Every displayed string, re-resolved for a locale.
    pub fn ui_strings(&self, locale: &str) -> BTreeMap<String, String> {
        self.catalog
            .resolved_strings(self.catalog.pin_locale(locale))
    }
}
