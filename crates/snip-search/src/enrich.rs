//! Label upgrades for chips decoded from a URL.
//!
//! Tokens rebuilt from URL parameters only know ids. Once the referenced
//! tags and user are fetched, their names replace the ids on the chips.
//! A failed lookup leaves the raw id in place.

use std::future::Future;

use snip_core::TokenList;
use snip_core::entities::{Tag, User};

use crate::error::SearchError;

/// Entity lookups used to resolve chip labels.
pub trait EntityLookup: Send + Sync {
    fn tags_by_ids(&self, ids: &[String])
    -> impl Future<Output = Result<Vec<Tag>, SearchError>> + Send;

    fn user_by_id(&self, id: &str) -> impl Future<Output = Result<User, SearchError>> + Send;
}

/// Resolve unlabelled tag and user tokens in place. Returns how many
/// tokens got a new label.
pub async fn enrich_tokens<L: EntityLookup>(lookup: &L, tokens: &mut TokenList) -> usize {
    let tag_ids = tokens.unresolved_tag_ids();
    let user_id = tokens
        .user()
        .filter(|u| u.username.is_none())
        .map(|u| u.id.clone());

    let tags_fut = async {
        if tag_ids.is_empty() {
            Ok(Vec::new())
        } else {
            lookup.tags_by_ids(&tag_ids).await
        }
    };
    let user_fut = async {
        match &user_id {
            Some(id) => lookup.user_by_id(id).await.map(Some),
            None => Ok(None),
        }
    };
    let (tags, user) = tokio::join!(tags_fut, user_fut);

    let mut changed = 0;
    match tags {
        Ok(tags) => changed += tokens.label_tags(&tags),
        Err(error) => tracing::warn!(%error, "failed to resolve tag labels"),
    }
    match user {
        Ok(Some(user)) => changed += usize::from(tokens.label_user(&user)),
        Ok(None) => {}
        Err(error) => tracing::warn!(%error, "failed to resolve user label"),
    }
    changed
}
