use crate::protocol::DocRequest;
use async_trait::async_trait;
use http::{Method, Uri};
use tokio::sync::Mutex;
use tracing::info;

/// One documented exchange, as handed to a [`DocSink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocEntry {
    method: Method,
    uri: Uri,
    doc: DocRequest,
    rendered: String,
}

impl DocEntry {
    pub fn new(method: Method, uri: Uri, doc: DocRequest, rendered: String) -> Self {
        Self { method, uri, doc, rendered }
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    pub fn doc(&self) -> &DocRequest {
        &self.doc
    }

    /// The API-Blueprint fragment of the exchange.
    pub fn rendered(&self) -> &str {
        &self.rendered
    }
}

/// Where documented exchanges end up.
#[async_trait]
pub trait DocSink {
    async fn record(&self, entry: DocEntry);
}

/// Keeps every entry in memory, in arrival order.
#[derive(Debug, Default)]
pub struct MemorySink {
    entries: Mutex<Vec<DocEntry>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn entries(&self) -> Vec<DocEntry> {
        self.entries.lock().await.clone()
    }

    pub async fn fragments(&self) -> Vec<String> {
        self.entries.lock().await.iter().map(|entry| entry.rendered.clone()).collect()
    }

    pub async fn take(&self) -> Vec<DocEntry> {
        std::mem::take(&mut *self.entries.lock().await)
    }
}

#[async_trait]
impl DocSink for MemorySink {
    async fn record(&self, entry: DocEntry) {
        self.entries.lock().await.push(entry);
    }
}

/// Emits every fragment as an `info` event.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

#[async_trait]
impl DocSink for TracingSink {
    async fn record(&self, entry: DocEntry) {
        info!(method = %entry.method, uri = %entry.uri, "documented request\n{}", entry.rendered);
    }
}

#[async_trait]
impl<S: DocSink + Send + Sync + ?Sized> DocSink for std::sync::Arc<S> {
    async fn record(&self, entry: DocEntry) {
        (**self).record(entry).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn entry(path: &'static str) -> DocEntry {
        let doc = DocRequest::new(Method::GET, None, None, vec![]);
        DocEntry::new(Method::GET, Uri::from_static(path), doc, format!("fragment of {path}"))
    }

    #[tokio::test]
    async fn memory_sink_keeps_order() {
        let sink = MemorySink::new();

        sink.record(entry("/a")).await;
        sink.record(entry("/b")).await;

        assert_eq!(sink.fragments().await, vec!["fragment of /a", "fragment of /b"]);
        let uris: Vec<_> = sink.entries().await.iter().map(|entry| entry.uri().to_string()).collect();
        assert_eq!(uris, vec!["/a", "/b"]);
    }

    #[tokio::test]
    async fn take_drains_the_sink() {
        let sink = MemorySink::new();
        sink.record(entry("/a")).await;

        assert_eq!(sink.take().await.len(), 1);
        assert!(sink.entries().await.is_empty());
    }

    #[tokio::test]
    async fn shared_sink_records_into_the_same_place() {
        let sink = Arc::new(MemorySink::new());
        let shared = Arc::clone(&sink);

        shared.record(entry("/a")).await;

        assert_eq!(sink.entries().await.len(), 1);
    }

    #[tokio::test]
    async fn tracing_sink_accepts_entries() {
        TracingSink.record(entry("/a")).await;
    }
}
