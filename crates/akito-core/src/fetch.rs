//! Fetch capability consumed by the batch orchestrator

/// Pluggable per-item fetch, split into an I/O phase and a transform phase.
///
/// The orchestrator calls [`retrieve`](Fetch::retrieve) while holding an
/// admission slot and may release the slot before calling
/// [`extract`](Fetch::extract), so parsing is not throttled with network I/O.
///
/// Implementations are shared across worker threads and must not keep
/// mutable per-call state.
pub trait Fetch: Sync {
    /// Locator for one item (e.g. a chapter URL)
    type Descriptor: Sync;
    /// Raw response produced by the I/O phase
    type Response: Send;
    /// Final item stored in the result buffer
    type Item: Send;
    type Error: std::error::Error + Send + Sync + 'static;

    /// Perform the network round-trip for `descriptor` at collection `index`.
    fn retrieve(
        &self,
        descriptor: &Self::Descriptor,
        index: usize,
    ) -> Result<Self::Response, Self::Error>;

    /// Turn a retrieved response into an item.
    fn extract(&self, response: Self::Response, index: usize) -> Result<Self::Item, Self::Error>;
}
