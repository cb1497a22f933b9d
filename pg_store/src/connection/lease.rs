//! Scoped ownership of one acquired handle

use super::{ConnectionHandle, ConnectionSource};
use crate::errors::DbFailure;

/// A handle borrowed from a source until [`Lease::release`].
///
/// If the lease is dropped first (the owning future was cancelled, or a
/// transaction was abandoned) the handle is discarded: its session may be
/// mid-statement or inside an open transaction, so it never goes back to
/// the pool.
pub(crate) struct Lease<'s, S: ConnectionSource> {
    source: &'s S,
    handle: Option<S::Handle>,
}

impl<'s, S: ConnectionSource> Lease<'s, S> {
    pub(crate) async fn acquire(source: &'s S) -> Result<Self, DbFailure> {
        let handle = source.acquire().await?;
        Ok(Self {
            source,
            handle: Some(handle),
        })
    }

    pub(crate) fn handle(&mut self) -> &mut S::Handle {
        match self.handle.as_mut() {
            Some(handle) => handle,
            None => unreachable!("lease handle is only taken on release"),
        }
    }

    /// Give the handle back; `force` closes it instead of reusing it
    pub(crate) async fn release(mut self, force: bool) {
        if let Some(handle) = self.handle.take() {
            self.source.release(handle, force).await;
        }
    }
}

impl<S: ConnectionSource> Drop for Lease<'_, S> {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            tracing::warn!("Connection dropped before release, discarding it");
            handle.discard();
        }
    }
}
