//! Check cycles: fetch → compare → present, with stale results discarded.
//!
//! Each trigger (app launch, a `watch` tick) starts a cycle and takes a ticket
//! from the [`CycleGuard`]. If another cycle starts while the first one's fetch
//! is still in flight, the first result is stale when it arrives and is
//! dropped without reaching the presenter. Combined with the presenter's
//! memory of the last prompted build, rapid re-triggers never produce
//! duplicate prompts.

use crate::config::ResolvedUrl;
use crate::update::checker::{UpdateChecker, UpdateInfo};
use crate::update::fetcher::ManifestSource;
use crate::update::presenter::{UpdatePresenter, UpdatePrompt};
use crate::update::version::VersionCode;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

/// Identifies one started cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleTicket(u64);

impl CycleTicket {
    #[must_use]
    pub const fn id(self) -> u64 {
        self.0
    }
}

/// Generation counter deciding which in-flight cycle is current.
#[derive(Debug, Default)]
pub struct CycleGuard {
    generation: AtomicU64,
}

impl CycleGuard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a cycle; any earlier ticket becomes stale.
    pub fn begin(&self) -> CycleTicket {
        CycleTicket(self.generation.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Whether no newer cycle has started since `ticket` was taken.
    #[must_use]
    pub fn is_current(&self, ticket: CycleTicket) -> bool {
        self.generation.load(Ordering::SeqCst) == ticket.0
    }

    /// Number of cycles started so far.
    #[must_use]
    pub fn started(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }
}

/// Result of [`UpdateSession::run_cycle`].
#[derive(Debug, Clone)]
pub struct CycleOutcome {
    pub ticket: CycleTicket,
    pub info: UpdateInfo,
    /// Set only for the first current cycle that sees a given newer build.
    pub prompt: Option<UpdatePrompt>,
    /// A newer cycle started before this one finished; its result was ignored.
    pub stale: bool,
}

/// Everything needed to run repeated check cycles for one installed build.
#[derive(Debug)]
pub struct UpdateSession<S> {
    checker: UpdateChecker<S>,
    url: ResolvedUrl,
    installed: VersionCode,
    guard: CycleGuard,
    presenter: Mutex<UpdatePresenter>,
}

impl<S: ManifestSource> UpdateSession<S> {
    pub fn new(checker: UpdateChecker<S>, url: ResolvedUrl, installed: VersionCode) -> Self {
        Self {
            checker,
            url,
            installed,
            guard: CycleGuard::new(),
            presenter: Mutex::new(UpdatePresenter::new()),
        }
    }

    #[must_use]
    pub const fn url(&self) -> &ResolvedUrl {
        &self.url
    }

    #[must_use]
    pub const fn installed(&self) -> VersionCode {
        self.installed
    }

    #[must_use]
    pub const fn guard(&self) -> &CycleGuard {
        &self.guard
    }

    /// Run one check cycle.
    pub async fn run_cycle(&self) -> CycleOutcome {
        let ticket = self.guard.begin();
        debug!("Starting update check cycle {}", ticket.id());

        let info = self.checker.check(&self.url, self.installed).await;

        if !self.guard.is_current(ticket) {
            debug!(
                "Discarding result of check cycle {}; cycle {} superseded it",
                ticket.id(),
                self.guard.started()
            );
            return CycleOutcome {
                ticket,
                info,
                prompt: None,
                stale: true,
            };
        }

        let prompt = {
            let mut presenter = self
                .presenter
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner);
            presenter.present(&info)
        };

        CycleOutcome {
            ticket,
            info,
            prompt,
            stale: false,
        }
    }
}
