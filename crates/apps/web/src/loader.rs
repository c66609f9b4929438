//! KML loading with session caching and in-flight deduplication.
//!
//! A key is loaded at most once per session: the first caller starts the
//! fetch and parks it as a shared future; concurrent callers for the same
//! key await that same completion instead of racing a second fetch against
//! the cache slot.

use formats::KmlDocument;
use foundation::Timestamp;
use futures::FutureExt;
use futures::future::{LocalBoxFuture, Shared};
use gloo_net::http::Request;
use streaming::{LoadError, SourceKey};

use crate::with_state;

pub type SharedLoad = Shared<LocalBoxFuture<'static, Result<(), LoadError>>>;

/// Idempotent per key: resolves immediately from cache, joins an in-flight
/// load, or starts a new one.
pub async fn ensure_loaded(key: SourceKey) -> Result<(), LoadError> {
    if with_state(|s| s.borrow().cache.contains(&key)) {
        return Ok(());
    }
    if let Some(pending) = with_state(|s| s.borrow().pending.get(&key).cloned()) {
        return pending.await;
    }

    let load: SharedLoad = fetch_and_store(key.clone()).boxed_local().shared();
    with_state(|s| {
        s.borrow_mut().pending.insert(key.clone(), load.clone());
    });
    let result = load.await;
    with_state(|s| {
        s.borrow_mut().pending.remove(&key);
    });
    result
}

async fn fetch_and_store(key: SourceKey) -> Result<(), LoadError> {
    let now = Timestamp::from_millis(js_sys::Date::now() as u64);
    let url = key.request_url(now);

    let resp = Request::get(&url)
        .send()
        .await
        .map_err(|e| LoadError::Fetch {
            detail: e.to_string(),
        })?;
    if !resp.ok() {
        return Err(LoadError::status(resp.status(), &url));
    }
    let text = resp.text().await.map_err(|e| LoadError::Fetch {
        detail: e.to_string(),
    })?;

    // A malformed body behind a 200 is a parse failure, not a fetch failure.
    let doc = KmlDocument::parse(text)?;
    with_state(|s| {
        s.borrow_mut().cache.insert(key, doc);
    });
    Ok(())
}
