//! LSP client state and notification handling

use std::ops::ControlFlow;

use async_lsp::lsp_types::{
    LogMessageParams, ProgressParams, ProgressParamsValue, PublishDiagnosticsParams,
    ShowMessageParams, WorkDoneProgress, WorkDoneProgressCreateParams,
};
use async_lsp::router::Router;
use async_lsp::{LanguageClient, ResponseError};
use futures::channel::oneshot;

/// Client state for handling LSP notifications
pub(super) struct ClientState {
    ready_tx: Option<oneshot::Sender<()>>,
}

impl ClientState {
    #[cfg(test)]
    pub(super) fn new_for_test(ready_tx: Option<oneshot::Sender<()>>) -> Self {
        ClientState { ready_tx }
    }

    /// Wake the first `wait_for_ready` caller, once
    fn signal_ready(&mut self) {
        let Some(tx) = self.ready_tx.take() else {
            return;
        };
        if tx.send(()).is_err() {
            tracing::debug!("Nobody is waiting for the language server to become ready");
        }
    }
}

/// Event to signal stopping the client
pub(super) struct Stop;

impl LanguageClient for ClientState {
    type Error = ResponseError;
    type NotifyResult = ControlFlow<async_lsp::Result<()>>;

    /// The first finished work-done progress means the project is loaded
    fn progress(&mut self, params: ProgressParams) -> Self::NotifyResult {
        match params.value {
            ProgressParamsValue::WorkDone(WorkDoneProgress::Begin(begin)) => {
                tracing::debug!("Language server started {:?}: {}", params.token, begin.title);
            }
            ProgressParamsValue::WorkDone(WorkDoneProgress::End(_)) => {
                tracing::debug!("Language server finished {:?}", params.token);
                self.signal_ready();
            }
            ProgressParamsValue::WorkDone(WorkDoneProgress::Report(_)) => {}
        }
        ControlFlow::Continue(())
    }

    fn publish_diagnostics(&mut self, _: PublishDiagnosticsParams) -> Self::NotifyResult {
        ControlFlow::Continue(())
    }

    fn show_message(&mut self, params: ShowMessageParams) -> Self::NotifyResult {
        tracing::debug!("LSP message {:?}: {}", params.typ, params.message);
        ControlFlow::Continue(())
    }

    fn log_message(&mut self, params: LogMessageParams) -> Self::NotifyResult {
        tracing::debug!("LSP log {:?}: {}", params.typ, params.message);
        ControlFlow::Continue(())
    }

    fn work_done_progress_create(
        &mut self,
        _params: WorkDoneProgressCreateParams,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<(), ResponseError>> + Send + 'static>,
    > {
        Box::pin(async { Ok(()) })
    }
}

impl ClientState {
    pub(super) fn new_router(ready_tx: oneshot::Sender<()>) -> Router<Self> {
        let mut router = Router::from_language_client(ClientState {
            ready_tx: Some(ready_tx),
        });
        router.request::<async_lsp::lsp_types::request::WorkDoneProgressCreate, _>(
            Self::work_done_progress_create,
        );
        router.event(Self::on_stop);
        router
    }

    fn on_stop(&mut self, _: Stop) -> ControlFlow<async_lsp::Result<()>> {
        ControlFlow::Break(Ok(()))
    }
}
