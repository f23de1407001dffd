//! Call-number resolution
//!
//! Turns one identifier into zero or one SFA fragments using at most three
//! dependent queries, each carrying its own retries:
//!
//! 1. `<key_type>=<identifier>`
//!    - single match: its fragment
//!    - multiple matches: continue with the first candidate work only
//!    - anything else: nothing
//! 2. `oclc=<owi of first work>`: fragment on single match
//! 3. `oclc=<wi of first work>`: fragment on single match, otherwise nothing
//!
//! An absent result is a normal outcome, never an error.

use crate::services::classify_client::ClassifyTransport;
use crate::services::resilient_query::{ResilientQuery, RetryPolicy};
use crate::types::{ClassificationResponse, KeyType, QueryKey, ResponseStatus, WorkCandidate};
use tracing::debug;

/// Key type used to re-query a candidate work's identifiers
pub const FOLLOW_UP_KEY_TYPE: KeyType = KeyType::Oclc;

/// Resolves identifiers to call-number fragments
pub struct Resolver<T> {
    query: ResilientQuery<T>,
}

impl<T: ClassifyTransport> Resolver<T> {
    pub fn new(transport: T, policy: RetryPolicy) -> Self {
        Self {
            query: ResilientQuery::new(transport, policy),
        }
    }

    pub fn policy(&self) -> RetryPolicy {
        self.query.policy()
    }

    /// Resolve `identifier`, queried as `key_type`
    pub async fn resolve(&self, key_type: &KeyType, identifier: &str) -> Option<String> {
        let key = QueryKey::new(key_type.clone(), identifier);
        let response = self.query.query(&key).await;

        match response.status {
            ResponseStatus::SingleMatch => response.sfa,
            ResponseStatus::MultipleMatches => match response.first_work() {
                Some(work) => self.resolve_candidate(work).await,
                None => {
                    debug!(key = %key, "Multiple matches reported without any work listed");
                    None
                }
            },
            ref status => {
                debug!(key = %key, status = %status, "No classification for identifier");
                None
            }
        }
    }

    /// Follow-up lookups for the first candidate: group id, then record id
    async fn resolve_candidate(&self, work: &WorkCandidate) -> Option<String> {
        if let Some(response) = self.follow_up(&work.owi).await {
            if response.status == ResponseStatus::SingleMatch {
                return response.sfa;
            }
        }

        if let Some(response) = self.follow_up(&work.wi).await {
            if response.status == ResponseStatus::SingleMatch {
                return response.sfa;
            }
        }

        debug!(owi = %work.owi, wi = %work.wi, "Candidate work did not resolve");
        None
    }

    /// `None` when the candidate carries no identifier to query
    async fn follow_up(&self, identifier: &str) -> Option<ClassificationResponse> {
        let identifier = identifier.trim();
        if identifier.is_empty() {
            return None;
        }

        let key = QueryKey::new(FOLLOW_UP_KEY_TYPE, identifier);
        Some(self.query.query(&key).await)
    }
}
