use crate::error::ApiError;
use crate::models::{Identity, Movie, RecommendationPage};

/// Tracks the next page to request
///
/// Starts at 1 and only ever advances, and only after a successful fetch;
/// a failed fetch leaves the cursor where it was so a retry re-requests
/// the same page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageCursor {
    next_page: u32,
    page_size: u32,
}

impl PageCursor {
    pub fn new(page_size: u32) -> Self {
        Self {
            next_page: 1,
            page_size,
        }
    }

    pub fn next_page(&self) -> u32 {
        self.next_page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    fn advance(&mut self) {
        self.next_page += 1;
    }
}

/// Phase of the feed state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedPhase {
    /// No subject; nothing to fetch.
    Idle,
    /// A page fetch is in flight.
    Loading,
    /// Last fetch succeeded; more pages may or may not remain.
    Ready,
    /// Last fetch failed; accumulated items are kept.
    Errored,
}

/// Cloneable mirror of `ApiError` carried in feed snapshots
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedError {
    MissingCredential,
    Transport(String),
    Server(u16),
    InvalidResponse(String),
    Other(String),
}

impl FeedError {
    /// User-readable message for inline display next to the list.
    pub fn user_message(&self) -> String {
        match self {
            FeedError::MissingCredential => "Log in to see recommendations".to_string(),
            FeedError::Transport(_) => "Network error, please try again".to_string(),
            FeedError::Server(status) => format!("Server error ({})", status),
            FeedError::InvalidResponse(_) => "Unexpected response from server".to_string(),
            FeedError::Other(msg) => msg.clone(),
        }
    }

    pub fn is_missing_credential(&self) -> bool {
        matches!(self, FeedError::MissingCredential)
    }
}

impl std::fmt::Display for FeedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FeedError::MissingCredential => write!(f, "no credential available"),
            FeedError::Transport(msg) => write!(f, "transport error: {}", msg),
            FeedError::Server(status) => write!(f, "server returned status {}", status),
            FeedError::InvalidResponse(msg) => write!(f, "invalid response: {}", msg),
            FeedError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl From<&ApiError> for FeedError {
    fn from(err: &ApiError) -> Self {
        match err {
            ApiError::MissingCredential => FeedError::MissingCredential,
            ApiError::Transport(e) => FeedError::Transport(e.to_string()),
            ApiError::Server { status, .. } => FeedError::Server(*status),
            ApiError::InvalidResponse(msg) => FeedError::InvalidResponse(msg.clone()),
            ApiError::InvalidInput(msg) => FeedError::Other(msg.clone()),
        }
    }
}

/// Observable state published after every transition
#[derive(Debug, Clone, PartialEq)]
pub struct FeedSnapshot {
    /// Accumulated movies in page-arrival order.
    pub items: Vec<Movie>,
    pub loading: bool,
    pub error: Option<FeedError>,
    pub has_more: bool,
    /// Total reported by the most recent successful fetch.
    pub total: u64,
}

impl FeedSnapshot {
    fn empty() -> Self {
        Self {
            items: Vec::new(),
            loading: false,
            error: None,
            has_more: false,
            total: 0,
        }
    }
}

impl Default for FeedSnapshot {
    fn default() -> Self {
        Self::empty()
    }
}

/// A fetch the caller should dispatch
///
/// The epoch ties the eventual response back to the identity that was
/// current when the fetch was planned; responses from earlier epochs are
/// discarded on arrival.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchPlan {
    pub epoch: u64,
    pub identity: Identity,
    pub page: u32,
    pub page_size: u32,
}

/// Outcome of (re)setting the feed identity
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentityChange {
    /// Same identity as before; existing state stands.
    Unchanged,
    /// Identity became absent; state was cleared, nothing to fetch.
    Reset,
    /// New identity; state was cleared and page 1 should be fetched.
    ResetAndFetch(FetchPlan),
}

/// The feed state machine
///
/// Holds the single authoritative record of accumulated items, cursor and
/// phase. The owner is responsible for actually running the fetches a
/// `FetchPlan` describes and reporting their outcome back via
/// `fetch_succeeded` / `fetch_failed`.
#[derive(Debug)]
pub struct Paginator {
    identity: Identity,
    epoch: u64,
    cursor: PageCursor,
    items: Vec<Movie>,
    total: u64,
    phase: FeedPhase,
    error: Option<FeedError>,
}

impl Paginator {
    pub fn new(page_size: u32) -> Self {
        Self {
            identity: Identity::absent(),
            epoch: 0,
            cursor: PageCursor::new(page_size),
            items: Vec::new(),
            total: 0,
            phase: FeedPhase::Idle,
            error: None,
        }
    }

    pub fn phase(&self) -> FeedPhase {
        self.phase
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn has_more(&self) -> bool {
        (self.items.len() as u64) < self.total
    }

    /// (Re)start pagination for a subject.
    ///
    /// Any change of identity, including to absent, discards all
    /// accumulated items, total and error unconditionally. An unchanged
    /// identity is a no-op.
    pub fn set_identity(&mut self, identity: Identity) -> IdentityChange {
        if identity == self.identity {
            return IdentityChange::Unchanged;
        }

        self.identity = identity;
        self.epoch += 1;
        self.items.clear();
        self.total = 0;
        self.error = None;
        self.cursor = PageCursor::new(self.cursor.page_size());

        if self.identity.is_absent() {
            self.phase = FeedPhase::Idle;
            return IdentityChange::Reset;
        }

        self.phase = FeedPhase::Loading;
        IdentityChange::ResetAndFetch(self.plan())
    }

    /// Request the next page if eligible; `None` means no-op.
    ///
    /// No-op while a fetch is in flight, while idle, and when every item
    /// has already been accumulated. After a failure the same page is
    /// re-requested and the error cleared optimistically.
    pub fn load_more(&mut self) -> Option<FetchPlan> {
        match self.phase {
            FeedPhase::Idle | FeedPhase::Loading => None,
            FeedPhase::Ready => {
                if !self.has_more() {
                    return None;
                }
                self.phase = FeedPhase::Loading;
                Some(self.plan())
            }
            FeedPhase::Errored => {
                self.error = None;
                self.phase = FeedPhase::Loading;
                Some(self.plan())
            }
        }
    }

    /// Apply a successful page fetch.
    ///
    /// Returns false when the response belongs to an earlier identity
    /// epoch and was discarded. An empty page is terminal regardless of
    /// the reported total, so a server that overstates its total cannot
    /// cause an endless fetch loop.
    pub fn fetch_succeeded(&mut self, epoch: u64, page: RecommendationPage) -> bool {
        if epoch != self.epoch {
            return false;
        }

        let fetched = page.movies.len();
        self.items.extend(page.movies);
        self.total = page.total;
        if fetched == 0 {
            self.total = self.items.len() as u64;
        }
        self.cursor.advance();
        self.error = None;
        self.phase = FeedPhase::Ready;
        true
    }

    /// Apply a failed page fetch.
    ///
    /// Accumulated items and total are kept and the cursor does not
    /// advance. Returns false when the failure was stale and discarded.
    pub fn fetch_failed(&mut self, epoch: u64, error: FeedError) -> bool {
        if epoch != self.epoch {
            return false;
        }

        self.error = Some(error);
        self.phase = FeedPhase::Errored;
        true
    }

    pub fn snapshot(&self) -> FeedSnapshot {
        FeedSnapshot {
            items: self.items.clone(),
            loading: self.phase == FeedPhase::Loading,
            error: self.error.clone(),
            has_more: self.has_more(),
            total: self.total,
        }
    }

    fn plan(&self) -> FetchPlan {
        FetchPlan {
            epoch: self.epoch,
            identity: self.identity.clone(),
            page: self.cursor.next_page(),
            page_size: self.cursor.page_size(),
        }
    }
}
