//! Reply resolver: remote delegate first, local matcher as fallback.
//!
//! The remote attempt is always tried first; the local keyword path is
//! a pure fallback, never a primary. Any delegate failure or timeout
//! downgrades to the local path and is logged, never propagated.

use std::time::{Duration, Instant};

use healthbuddy_types::reply::{ReplySource, ResolvedReply};

use crate::i18n::TranslationCatalog;
use crate::reply::delegate::ReplyDelegate;
use crate::reply::matcher::{FALLBACK_REPLY_KEY, ReplyMatcher};

/// Default hard bound on the remote attempt.
const DEFAULT_REMOTE_TIMEOUT: Duration = Duration::from_secs(10);

/// Turns a user utterance into a localized reply.
///
/// Generic over the delegate and matcher seams so tests can substitute
/// counting fakes.
pub struct ReplyResolver<D: ReplyDelegate, M: ReplyMatcher> {
    delegate: D,
    matcher: M,
    remote_timeout: Duration,
}

impl<D: ReplyDelegate, M: ReplyMatcher> ReplyResolver<D, M> {
    /// Create a resolver with the default remote timeout.
    pub fn new(delegate: D, matcher: M) -> Self {
        Self {
            delegate,
            matcher,
            remote_timeout: DEFAULT_REMOTE_TIMEOUT,
        }
    }

    /// Override the remote timeout (from config).
    pub fn with_remote_timeout(mut self, timeout: Duration) -> Self {
        self.remote_timeout = timeout;
        self
    }

    /// Resolve an utterance into a localized reply.
    ///
    /// On a usable remote reply the matcher is never invoked and the
    /// result is tagged [`ReplySource::Remote`]. On any unavailability
    /// the matcher's key (or the designated fallback key) is resolved
    /// through the catalog for `locale` and tagged
    /// [`ReplySource::Local`].
    pub async fn resolve(
        &self,
        utterance: &str,
        locale: &str,
        catalog: &TranslationCatalog,
    ) -> ResolvedReply {
        let start = Instant::now();
        match tokio::time::timeout(self.remote_timeout, self.delegate.ask(utterance, locale)).await
        {
            Ok(Ok(text)) if !text.trim().is_empty() => {
                tracing::debug!(
                    latency_ms = start.elapsed().as_millis() as u64,
                    "Remote reply used"
                );
                return ResolvedReply {
                    text,
                    source: ReplySource::Remote,
                };
            }
            Ok(Ok(_)) => {
                tracing::debug!("Remote reply empty, falling back to local matcher");
            }
            Ok(Err(err)) => {
                tracing::debug!(%err, "Remote delegate unavailable, falling back to local matcher");
            }
            Err(_) => {
                tracing::debug!(
                    timeout_ms = self.remote_timeout.as_millis() as u64,
                    "Remote delegate timed out, falling back to local matcher"
                );
            }
        }

        let key = self
            .matcher
            .match_reply(utterance)
            .unwrap_or(FALLBACK_REPLY_KEY);
        ResolvedReply {
            text: catalog.resolve(locale, key).to_string(),
            source: ReplySource::Local,
        }
    }
}
