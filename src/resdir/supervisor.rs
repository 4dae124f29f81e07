//! The reactivity supervisor: recomputes the merged result whenever the
//! filter selection or the override sets change, and guards against a
//! late-arriving response from a superseded fetch overwriting a newer one.
//!
//! The supervisor is deliberately free of I/O. Each relevant mutation
//! issues a [`FetchPlan`] carrying a monotonically increasing
//! [`RequestToken`]; some driver (the synchronous one in `api.rs`, or any
//! async runtime) executes the plan's sub-fetches and feeds the outcomes
//! back through [`SearchSupervisor::complete_pinned`] /
//! [`SearchSupervisor::complete_filtered`]. Completions whose token does
//! not match the latest issued token are discarded: last request wins by
//! issuance order, not by completion order. Completion calls are safe to
//! repeat and never panic.

use crate::filter::FilterSelection;
use crate::merge::merge_segments;
use crate::model::{Entity, EntityId, EntityKind, NeedCategory, ServiceCategory};
use crate::overrides::OverrideSets;
use crate::query::FilterQuery;
use tracing::{debug, warn};

/// Monotonically increasing identifier of one fetch cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

/// Where the engine currently stands.
///
/// `AwaitingInput` means no query was attempted because no filter is
/// active, no entity is pinned and no deep link is pending — distinct from
/// `NoResults`, where a query ran and legitimately matched nothing.
/// `Failed` surfaces a fetch error instead of disguising it as an empty
/// result.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchState {
    AwaitingInput,
    Loading,
    Results(Vec<Entity>),
    NoResults,
    Failed(String),
}

/// The work one recompute cycle asks of the store: an optional
/// fetch-by-ids for the pinned segment and an optional filtered query.
/// A segment that is `None` is defined as empty for this cycle.
#[derive(Debug, Clone)]
pub struct FetchPlan {
    pub token: RequestToken,
    pub pinned_ids: Option<Vec<EntityId>>,
    pub filtered: Option<FilterQuery>,
}

/// Outcome of one sub-fetch. Errors cross this boundary as strings so
/// completions can be delivered from any driver.
pub type SegmentResult = Result<Vec<Entity>, String>;

#[derive(Debug)]
enum Slot {
    NotRequested,
    Pending,
    Done(SegmentResult),
}

impl Slot {
    fn is_settled(&self) -> bool {
        !matches!(self, Slot::Pending)
    }
}

#[derive(Debug)]
struct Cycle {
    token: RequestToken,
    deep_link: Option<EntityId>,
    pinned: Slot,
    filtered: Slot,
}

#[derive(Debug, Clone, Copy)]
enum Segment {
    Pinned,
    Filtered,
}

impl Segment {
    fn name(&self) -> &'static str {
        match self {
            Segment::Pinned => "pinned",
            Segment::Filtered => "filtered",
        }
    }
}

#[derive(Debug)]
pub struct SearchSupervisor {
    filter: FilterSelection,
    overrides: OverrideSets,
    pending_deep_link: Option<EntityId>,
    state: SearchState,
    highlight: Option<EntityId>,
    next_seq: u64,
    inflight: Option<Cycle>,
}

impl SearchSupervisor {
    /// Initial session state — including the deep-link target, which is
    /// passed in once here rather than read from ambient page state. No
    /// fetch is issued until [`SearchSupervisor::restart`] is called.
    pub fn new(
        filter: FilterSelection,
        overrides: OverrideSets,
        deep_link: Option<EntityId>,
    ) -> Self {
        Self {
            filter,
            overrides,
            pending_deep_link: deep_link,
            state: SearchState::AwaitingInput,
            highlight: None,
            next_seq: 0,
            inflight: None,
        }
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    /// The current merged result; empty unless the state is `Results`.
    pub fn results(&self) -> &[Entity] {
        match &self.state {
            SearchState::Results(entities) => entities,
            _ => &[],
        }
    }

    /// The deep-link target located in the last completed cycle, for the
    /// presentation layer to scroll into view and highlight. Cleared at
    /// the start of every new cycle.
    pub fn highlight(&self) -> Option<&str> {
        self.highlight.as_deref()
    }

    pub fn filter(&self) -> &FilterSelection {
        &self.filter
    }

    pub fn overrides(&self) -> &OverrideSets {
        &self.overrides
    }

    pub fn set_service_category(&mut self, value: Option<ServiceCategory>) -> Option<FetchPlan> {
        self.filter.set_service_category(value);
        self.restart()
    }

    pub fn set_need_category(&mut self, value: Option<NeedCategory>) -> Option<FetchPlan> {
        self.filter.set_need_category(value);
        self.restart()
    }

    pub fn set_kind(&mut self, value: Option<EntityKind>) -> Option<FetchPlan> {
        self.filter.set_kind(value);
        self.restart()
    }

    pub fn set_keyword(&mut self, value: Option<String>) -> Option<FetchPlan> {
        self.filter.set_keyword(value);
        self.restart()
    }

    pub fn pin(&mut self, id: impl Into<EntityId>) -> Option<FetchPlan> {
        self.overrides.pin(id);
        self.restart()
    }

    pub fn unpin(&mut self, id: &str) -> Option<FetchPlan> {
        self.overrides.unpin(id);
        self.restart()
    }

    pub fn toggle_pin(&mut self, id: impl Into<EntityId>) -> Option<FetchPlan> {
        self.overrides.toggle_pin(id);
        self.restart()
    }

    pub fn hide(&mut self, id: impl Into<EntityId>) -> Option<FetchPlan> {
        self.overrides.hide(id);
        self.restart()
    }

    /// Supersedes any in-flight cycle and issues a new fetch plan for the
    /// current filter, overrides and pending deep link. Returns `None` —
    /// and settles into `AwaitingInput` — when there is nothing to fetch.
    pub fn restart(&mut self) -> Option<FetchPlan> {
        self.highlight = None;

        if let Some(stale) = self.inflight.take() {
            debug!(token = stale.token.0, "superseding in-flight fetch cycle");
        }

        let deep_link = self.pending_deep_link.clone();
        let wants_filtered = self.filter.has_active_filter() || deep_link.is_some();
        let wants_pinned = self.overrides.has_pins();

        if !wants_filtered && !wants_pinned {
            self.state = SearchState::AwaitingInput;
            return None;
        }

        let token = RequestToken(self.next_seq);
        self.next_seq += 1;

        self.inflight = Some(Cycle {
            token,
            deep_link,
            pinned: if wants_pinned {
                Slot::Pending
            } else {
                Slot::NotRequested
            },
            filtered: if wants_filtered {
                Slot::Pending
            } else {
                Slot::NotRequested
            },
        });
        self.state = SearchState::Loading;

        Some(FetchPlan {
            token,
            pinned_ids: wants_pinned.then(|| self.overrides.pinned_ids().to_vec()),
            filtered: wants_filtered.then(|| FilterQuery::from_selection(&self.filter)),
        })
    }

    /// Delivers the pinned-segment outcome for the cycle identified by
    /// `token`. Stale and duplicate deliveries are discarded.
    pub fn complete_pinned(&mut self, token: RequestToken, result: SegmentResult) {
        self.complete(token, Segment::Pinned, result);
    }

    /// Delivers the filtered-segment outcome for the cycle identified by
    /// `token`. Stale and duplicate deliveries are discarded.
    pub fn complete_filtered(&mut self, token: RequestToken, result: SegmentResult) {
        self.complete(token, Segment::Filtered, result);
    }

    fn complete(&mut self, token: RequestToken, segment: Segment, result: SegmentResult) {
        let Some(cycle) = self.inflight.as_mut() else {
            debug!(
                token = token.0,
                segment = segment.name(),
                "completion with no cycle in flight, discarding"
            );
            return;
        };
        if cycle.token != token {
            debug!(
                token = token.0,
                current = cycle.token.0,
                segment = segment.name(),
                "stale completion, discarding"
            );
            return;
        }

        let slot = match segment {
            Segment::Pinned => &mut cycle.pinned,
            Segment::Filtered => &mut cycle.filtered,
        };
        match slot {
            Slot::Pending => *slot = Slot::Done(result),
            Slot::NotRequested | Slot::Done(_) => {
                debug!(
                    token = token.0,
                    segment = segment.name(),
                    "unexpected or duplicate completion, discarding"
                );
                return;
            }
        }

        if cycle.pinned.is_settled() && cycle.filtered.is_settled() {
            self.finalize();
        }
    }

    /// Both sub-fetches have settled: merge, resolve the deep link, and
    /// land in a terminal state.
    fn finalize(&mut self) {
        let Some(cycle) = self.inflight.take() else {
            return;
        };

        // A completed cycle consumes the pending deep link, whatever the
        // outcome: the forced query ran.
        if cycle.deep_link.is_some() {
            self.pending_deep_link = None;
        }

        let mut failure = None;
        let pinned = settle(cycle.pinned, Segment::Pinned, &mut failure);
        let filtered = settle(cycle.filtered, Segment::Filtered, &mut failure);

        if let Some(reason) = failure {
            self.state = SearchState::Failed(reason);
            return;
        }

        let merged = merge_segments(pinned, filtered, &self.overrides);
        self.highlight = cycle
            .deep_link
            .filter(|target| merged.iter().any(|e| &e.id == target));
        self.state = if merged.is_empty() {
            SearchState::NoResults
        } else {
            SearchState::Results(merged)
        };
    }
}

fn settle(slot: Slot, segment: Segment, failure: &mut Option<String>) -> Vec<Entity> {
    match slot {
        Slot::NotRequested | Slot::Pending => Vec::new(),
        Slot::Done(Ok(entities)) => entities,
        Slot::Done(Err(reason)) => {
            warn!(segment = segment.name(), %reason, "fetch failed");
            if failure.is_none() {
                *failure = Some(format!("{} fetch failed: {}", segment.name(), reason));
            }
            Vec::new()
        }
    }
}
