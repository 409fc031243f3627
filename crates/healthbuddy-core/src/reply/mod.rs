//! The reply resolution pipeline: remote delegate first, deterministic
//! local keyword matcher as fallback.

pub mod delegate;
pub mod matcher;
pub mod resolver;

pub use delegate::ReplyDelegate;
pub use matcher::{FALLBACK_REPLY_KEY, LocalReplyMatcher, ReplyMatcher, ReplyRule};
pub use resolver::ReplyResolver;
