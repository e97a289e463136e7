//! Task-local request tag context.
//!
//! A request's tag must be visible to every piece of code handling that
//! request, including code resumed on a different runtime worker after an
//! `.await`. A thread-keyed holder breaks under that model, so the tag is
//! keyed by logical task instead: [`with_tag`] pins it to the request
//! future, and it rides along wherever the scheduler resumes that future.
//!
//! The scope is also the cleanup guarantee. When the wrapped future
//! completes, fails or is dropped (cancellation, timeout), the association
//! goes with it; a reused worker never observes a previous request's tag.
//!
//! Code that hops to a *new* task (`tokio::spawn`, a blocking pool) leaves
//! the scope behind and must re-enter it explicitly:
//!
//! ```rust
//! use gray_core::context;
//!
//! # async fn example() {
//! let tag = context::current_tag();
//! tokio::spawn(context::with_tag(tag, async move {
//!     // downstream calls here see the same tag
//! }));
//! # }
//! ```

use std::cell::Cell;
use std::future::Future;

use crate::GrayTag;

tokio::task_local! {
    static GRAY_TAG: Cell<GrayTag>;
}

/// Run `future` inside a scope carrying `tag`.
///
/// The association is dropped on every exit path: normal completion,
/// error, panic or cancellation of the wrapped future.
pub async fn with_tag<F>(tag: GrayTag, future: F) -> F::Output
where
    F: Future,
{
    GRAY_TAG.scope(Cell::new(tag), future).await
}

/// Tag of the enclosing request scope, `Base` outside any scope.
pub fn current_tag() -> GrayTag {
    GRAY_TAG.try_with(Cell::get).unwrap_or_default()
}

/// Re-assign the tag of the enclosing scope.
///
/// Used by ingress components after classification. Returns `false` (and
/// does nothing) outside a scope, where there is no request to tag.
pub fn set_tag(tag: GrayTag) -> bool {
    GRAY_TAG.try_with(|cell| cell.set(tag)).is_ok()
}
