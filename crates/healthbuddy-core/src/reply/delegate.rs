//! ReplyDelegate trait definition.
//!
//! The seam between the resolver and the remote text-generation
//! service. Uses native async fn in traits (RPITIT, Rust 2024
//! edition). The concrete HTTP implementation lives in
//! healthbuddy-infra.

use healthbuddy_types::error::DelegateError;

/// Trait for the remote reply backend.
///
/// Implementations must classify every failure mode (transport
/// errors, non-success statuses, unparsable bodies, absent or empty
/// reply payloads) as [`DelegateError::Unavailable`]; `ask` never
/// surfaces any other failure.
pub trait ReplyDelegate: Send + Sync {
    /// Send one utterance and locale, returning the remote reply text.
    fn ask(
        &self,
        utterance: &str,
        locale: &str,
    ) -> impl std::future::Future<Output = Result<String, DelegateError>> + Send;
}
