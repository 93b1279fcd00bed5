//! Adapting watch channels into streams

use futures::stream::{self, Stream};
use tokio::sync::watch;

/// Turn a watch receiver into a stream that yields the current value first,
/// then every subsequent change. Ends when the sender is dropped.
pub fn watch_stream<T>(receiver: watch::Receiver<T>) -> impl Stream<Item = T>
where
    T: Clone + Send + Sync + 'static,
{
    stream::unfold((receiver, true), |(mut receiver, first)| async move {
        if !first && receiver.changed().await.is_err() {
            return None;
        }
        let value = receiver.borrow_and_update().clone();
        Some((value, (receiver, false)))
    })
}
