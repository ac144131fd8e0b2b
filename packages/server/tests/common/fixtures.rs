//! Test data builders.

use chrono::{DateTime, Duration, Utc};
use std::future::Future;

use server_core::common::{MemberId, ReferenceId};
use server_core::domains::references::{PendingReference, ReferenceStatus};
use server_core::domains::threads::NewThread;

pub const CAPTURED_CONTENT: &str = "---\nplatform: ChatGPT\nurl: https://chatgpt.com/share/abc\n---\n\n**Human:**\nWhy does my loop never end?\n\n___\n\n**Assistant:**\nThe counter is never incremented.";

/// A thread as the capture flow would submit it.
pub fn captured_thread(author_id: MemberId, title: &str) -> NewThread {
    NewThread {
        title: Some(title.to_string()),
        content: CAPTURED_CONTENT.to_string(),
        source: "ChatGPT".to_string(),
        tags: vec!["python".to_string()],
        author_id,
    }
}

/// A manually written post with no provider markers anywhere.
pub fn manual_thread(author_id: MemberId, title: &str) -> NewThread {
    NewThread {
        title: Some(title.to_string()),
        content: "Some notes I wrote myself.".to_string(),
        source: "community".to_string(),
        tags: vec![],
        author_id,
    }
}

/// A pending reference created `age` before `now`.
pub fn pending_reference(
    owner_id: MemberId,
    title: Option<&str>,
    age: Duration,
    now: DateTime<Utc>,
) -> PendingReference {
    PendingReference {
        id: ReferenceId::new(),
        owner_id,
        source_url: "https://chatgpt.com/share/abc".to_string(),
        title: title.map(String::from),
        notes: None,
        status: ReferenceStatus::Pending,
        created_at: now - age,
        completed_at: None,
    }
}

/// Poll `check` until it returns true or about two seconds pass.
pub async fn eventually<F, Fut>(mut check: F) -> bool
where
    F: FnMut() -> Fut,
    Fut: Future<Output = bool>,
{
    for _ in 0..100 {
        if check().await {
            return true;
        }
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
    }
    false
}
