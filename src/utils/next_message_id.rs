use once_cell::sync::Lazy;
use std::sync::atomic::{AtomicU64, Ordering};

/// Process-wide correlation id counter. Zero is never handed out.
static NEXT_MESSAGE_ID: Lazy<AtomicU64> = Lazy::new(|| AtomicU64::new(1));

/// Returns an id unique within this process, suitable for `Header::message_id`.
#[inline]
pub fn next_message_id() -> u64 {
    NEXT_MESSAGE_ID.fetch_add(1, Ordering::Relaxed)
}
