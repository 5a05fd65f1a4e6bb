//! Loading state machine shared by every page.
//!
//! `Idle → Loading → {Loaded, Failed, Redirect}`. A 404 is navigational and
//! becomes `Redirect(Route::NotFound)`; any other failure is presentational
//! and becomes `Failed` with a translation key, never the raw error text.

use crate::client::{ErrorKind, FetchError};
use crate::i18n::{Language, Localize};
use crate::site::context::LanguageContext;
use crate::site::routes::Route;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::debug;

/// Display-safe summary of a failed fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorNotice {
    pub kind: ErrorKind,
    /// Translation key of the message to show
    pub key: &'static str,
}

impl ErrorNotice {
    pub fn from_error(err: &FetchError) -> Self {
        let kind = err.kind();
        let key = match kind {
            ErrorKind::Auth => "errors.unauthorized",
            ErrorKind::NotFound => "errors.not_found",
            ErrorKind::Validation | ErrorKind::Transient => "errors.generic",
        };
        Self { kind, key }
    }

    pub fn message(&self, context: &LanguageContext) -> String {
        context.t(self.key).to_string()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T> {
    Idle,
    Loading,
    Loaded(T),
    Failed(ErrorNotice),
    Redirect(Route),
}

impl<T> Default for LoadState<T> {
    fn default() -> Self {
        LoadState::Idle
    }
}

impl<T> LoadState<T> {
    pub fn from_result(result: Result<T, FetchError>) -> Self {
        match result {
            Ok(value) => LoadState::Loaded(value),
            Err(err) if err.is_not_found() => LoadState::Redirect(Route::NotFound),
            Err(err) => LoadState::Failed(ErrorNotice::from_error(&err)),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn loaded(&self) -> Option<&T> {
        match self {
            LoadState::Loaded(value) => Some(value),
            _ => None,
        }
    }

    pub fn redirect(&self) -> Option<&Route> {
        match self {
            LoadState::Redirect(route) => Some(route),
            _ => None,
        }
    }

    pub fn map<U>(&self, f: impl FnOnce(&T) -> U) -> LoadState<U> {
        match self {
            LoadState::Idle => LoadState::Idle,
            LoadState::Loading => LoadState::Loading,
            LoadState::Loaded(value) => LoadState::Loaded(f(value)),
            LoadState::Failed(notice) => LoadState::Failed(*notice),
            LoadState::Redirect(route) => LoadState::Redirect(route.clone()),
        }
    }
}

/// Mounted flag shared between a page and whoever owns its lifecycle.
/// Results that arrive after `unmount` are dropped.
#[derive(Debug, Clone)]
pub struct Liveness(Arc<AtomicBool>);

impl Liveness {
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(true)))
    }

    pub fn unmount(&self) {
        self.0.store(false, Ordering::SeqCst);
    }

    pub fn is_mounted(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

impl Default for Liveness {
    fn default() -> Self {
        Self::new()
    }
}

/// One fetch-driven region of a page. Holds the raw (bilingual) record and
/// localizes it at render time.
#[derive(Debug)]
pub struct Page<T> {
    state: LoadState<T>,
    liveness: Liveness,
}

impl<T> Page<T> {
    pub fn new(liveness: Liveness) -> Self {
        Self {
            state: LoadState::Idle,
            liveness,
        }
    }

    pub fn state(&self) -> &LoadState<T> {
        &self.state
    }

    pub fn liveness(&self) -> &Liveness {
        &self.liveness
    }

    /// Run `fetch` and commit its outcome, unless the page was unmounted
    /// while it was in flight.
    pub async fn load<F>(&mut self, fetch: F)
    where
        F: Future<Output = Result<T, FetchError>>,
    {
        if !self.liveness.is_mounted() {
            return;
        }
        self.state = LoadState::Loading;

        let result = fetch.await;
        if !self.liveness.is_mounted() {
            debug!("Discarding fetch result for unmounted page");
            return;
        }
        self.state = LoadState::from_result(result);
    }

    pub fn reset(&mut self) {
        self.state = LoadState::Idle;
    }
}

impl<T: Localize> Page<T> {
    pub fn render(&self, language: Language) -> LoadState<T::View> {
        self.state.map(|value| value.localize(language))
    }
}
