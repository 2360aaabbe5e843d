use crate::core::projector::project;
use crate::core::query::activations_query;
use crate::domain::model::{ActivationRecord, LoadState};
use crate::domain::ports::QueryTransport;
use crate::utils::error::{ActivationError, Result};
use tokio::sync::watch;

/// Signals a pending fetch to stop. Cloned tokens observe the same signal.
#[derive(Debug, Clone)]
pub struct CancelToken {
    receiver: watch::Receiver<bool>,
}

#[derive(Debug)]
pub struct CancelHandle {
    sender: watch::Sender<bool>,
}

impl CancelHandle {
    pub fn cancel(&self) {
        let _ = self.sender.send(true);
    }
}

impl CancelToken {
    pub fn channel() -> (CancelHandle, CancelToken) {
        let (sender, receiver) = watch::channel(false);
        (CancelHandle { sender }, CancelToken { receiver })
    }

    /// A token nobody can fire.
    pub fn never() -> Self {
        Self::channel().1
    }

    pub fn is_cancelled(&self) -> bool {
        *self.receiver.borrow()
    }

    /// Resolves once cancelled; pends forever if the handle is dropped unfired.
    pub async fn cancelled(&mut self) {
        if self.receiver.wait_for(|cancelled| *cancelled).await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}

/// Owns the current record slot for one view and fills it on mount.
pub struct ActivationsView<T: QueryTransport> {
    transport: T,
    records: Option<Vec<ActivationRecord>>,
    mounted: bool,
}

impl<T: QueryTransport> ActivationsView<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            records: None,
            mounted: false,
        }
    }

    pub fn state(&self) -> LoadState {
        LoadState::of(self.records.as_deref())
    }

    pub fn records(&self) -> &[ActivationRecord] {
        self.records.as_deref().unwrap_or(&[])
    }

    pub fn into_records(self) -> Option<Vec<ActivationRecord>> {
        self.records
    }

    /// Fetches, projects and stores the activations. Runs once per view;
    /// later calls return the current state. On failure the slot stays empty.
    pub async fn mount(&mut self, mut cancel: CancelToken) -> Result<LoadState> {
        if self.mounted {
            tracing::debug!("View already mounted, skipping fetch");
            return Ok(self.state());
        }
        self.mounted = true;

        if cancel.is_cancelled() {
            return Err(ActivationError::Cancelled);
        }

        let fetched = tokio::select! {
            result = self.transport.fetch_results(activations_query()) => result,
            _ = cancel.cancelled() => {
                tracing::warn!("Fetch cancelled, discarding pending result");
                return Err(ActivationError::Cancelled);
            }
        };

        let result_set = fetched.inspect_err(|e| {
            tracing::error!("Failed to fetch activations: {} ({:?})", e, e.category());
        })?;

        let records = project(result_set.bindings()).inspect_err(|e| {
            tracing::error!("Failed to project activations: {}", e);
        })?;

        tracing::info!("Loaded {} activations", records.len());
        self.records = Some(records);
        Ok(self.state())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{RawBinding, RawResultSet, RawTerm};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    struct MockTransport {
        rows: Vec<RawBinding>,
        fail: bool,
        delay: Option<Duration>,
        calls: Arc<AtomicUsize>,
    }

    impl MockTransport {
        fn with_rows(rows: Vec<RawBinding>) -> Self {
            Self {
                rows,
                fail: false,
                delay: None,
                calls: Arc::new(AtomicUsize::new(0)),
            }
        }
    }

    #[async_trait]
    impl QueryTransport for MockTransport {
        async fn fetch_results(&self, _query: &str) -> Result<RawResultSet> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            if self.fail {
                return Err(ActivationError::RequestFailed {
                    status: 500,
                    status_text: "Internal Server Error".to_string(),
                });
            }
            Ok(RawResultSet::from_bindings(self.rows.clone()))
        }
    }

    fn row(label: &str) -> RawBinding {
        RawBinding::new()
            .with("label", RawTerm::literal(label))
            .with("year", RawTerm::literal("2024"))
            .with("month", RawTerm::literal("--11"))
            .with("requestTime", RawTerm::literal("21:40"))
            .with("interventionTime", RawTerm::literal("21:52"))
            .with("emergencyType", RawTerm::literal("Intoxicación"))
    }

    #[tokio::test]
    async fn test_mount_populates_records() {
        let mut view = ActivationsView::new(MockTransport::with_rows(vec![row("A"), row("B")]));
        assert_eq!(view.state(), LoadState::NotLoaded);

        let state = view.mount(CancelToken::never()).await.unwrap();

        assert_eq!(state, LoadState::Loaded(2));
        assert_eq!(view.records()[0].id, "A");
        assert_eq!(view.records()[1].month, "11");
    }

    #[tokio::test]
    async fn test_mount_empty_result_is_loaded_empty() {
        let mut view = ActivationsView::new(MockTransport::with_rows(vec![]));
        let state = view.mount(CancelToken::never()).await.unwrap();
        assert_eq!(state, LoadState::LoadedEmpty);
    }

    #[tokio::test]
    async fn test_mount_runs_once() {
        let transport = MockTransport::with_rows(vec![row("A")]);
        let calls = transport.calls.clone();
        let mut view = ActivationsView::new(transport);

        view.mount(CancelToken::never()).await.unwrap();
        let state = view.mount(CancelToken::never()).await.unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(state, LoadState::Loaded(1));
    }

    #[tokio::test]
    async fn test_failed_fetch_leaves_view_not_loaded() {
        let mut transport = MockTransport::with_rows(vec![row("A")]);
        transport.fail = true;
        let mut view = ActivationsView::new(transport);

        let result = view.mount(CancelToken::never()).await;

        assert!(matches!(result, Err(ActivationError::RequestFailed { .. })));
        assert_eq!(view.state(), LoadState::NotLoaded);
    }

    #[tokio::test]
    async fn test_projection_failure_shows_no_partial_results() {
        let mut broken = row("B");
        broken.terms.remove("year");
        let mut view = ActivationsView::new(MockTransport::with_rows(vec![row("A"), broken]));

        let result = view.mount(CancelToken::never()).await;

        assert!(matches!(
            result,
            Err(ActivationError::MissingFieldError { row: 1, .. })
        ));
        assert!(view.records().is_empty());
        assert_eq!(view.state(), LoadState::NotLoaded);
    }

    #[tokio::test]
    async fn test_cancel_discards_pending_fetch() {
        let mut transport = MockTransport::with_rows(vec![row("A")]);
        transport.delay = Some(Duration::from_secs(30));
        let mut view = ActivationsView::new(transport);
        let (handle, token) = CancelToken::channel();

        let cancel_task = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            handle.cancel();
        });

        let result = view.mount(token).await;
        cancel_task.await.unwrap();

        assert!(matches!(result, Err(ActivationError::Cancelled)));
        assert_eq!(view.state(), LoadState::NotLoaded);
    }

    #[tokio::test]
    async fn test_already_cancelled_token_skips_fetch() {
        let transport = MockTransport::with_rows(vec![row("A")]);
        let calls = transport.calls.clone();
        let mut view = ActivationsView::new(transport);
        let (handle, token) = CancelToken::channel();
        handle.cancel();

        let result = view.mount(token).await;

        assert!(matches!(result, Err(ActivationError::Cancelled)));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }
}
