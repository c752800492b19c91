//! Backtracking tour enumeration.
//!
//! Every catalog activity seeds a root branch. A branch clones its tour for
//! each remaining candidate, tries to admit it, records the result if it is
//! acceptable and recurses with the candidate removed. Branches share nothing
//! but the catalog and the transit cache, so they run on the rayon pool.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use rayon::prelude::*;
use tracing::{debug, trace};

use crate::catalog::Catalog;
use crate::transit::{TransitResolver, TransitSource};

use super::config::SearchConfig;
use super::constraint::ConstraintSpec;
use super::tour::TourState;

/// Error from tour search.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// The constraints contradict each other
    #[error("invalid search request: {0}")]
    InvalidSpec(String),

    /// The dedicated worker pool could not be started
    #[error("failed to build search thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Shared flag that stops a running search.
///
/// Cloning shares the flag. Branches check it before each expansion, so a
/// cancelled search returns whatever it had already recorded.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Result of a search run.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// Completed tours, in no particular order.
    pub tours: Vec<TourState>,

    /// Number of admission attempts made.
    pub branches_explored: usize,

    /// The search was stopped through its cancel token.
    pub cancelled: bool,

    /// More tours existed than `max_results` allowed.
    pub truncated: bool,
}

/// Counters shared by every branch of one search.
struct Progress<'c> {
    cancel: &'c CancelToken,
    branches: AtomicUsize,
    found: AtomicUsize,
    truncated: AtomicBool,
    limit: Option<usize>,
}

impl<'c> Progress<'c> {
    fn new(cancel: &'c CancelToken, limit: Option<usize>) -> Self {
        Self {
            cancel,
            branches: AtomicUsize::new(0),
            found: AtomicUsize::new(0),
            truncated: AtomicBool::new(false),
            limit,
        }
    }

    fn should_stop(&self) -> bool {
        self.cancel.is_cancelled() || self.truncated.load(Ordering::Relaxed)
    }

    /// Reserve room for one more result, or mark the search truncated.
    fn claim_result(&self) -> bool {
        let Some(limit) = self.limit else {
            return true;
        };
        if self.found.fetch_add(1, Ordering::Relaxed) < limit {
            true
        } else {
            self.truncated.store(true, Ordering::Relaxed);
            false
        }
    }
}

/// Enumerates every tour of a catalog that satisfies a constraint spec.
pub struct SearchEngine<'a, S: TransitSource> {
    catalog: &'a Catalog,
    resolver: &'a TransitResolver<S>,
    spec: &'a ConstraintSpec,
    config: &'a SearchConfig,
}

impl<'a, S: TransitSource> SearchEngine<'a, S> {
    /// Create a new search engine.
    pub fn new(
        catalog: &'a Catalog,
        resolver: &'a TransitResolver<S>,
        spec: &'a ConstraintSpec,
        config: &'a SearchConfig,
    ) -> Self {
        Self {
            catalog,
            resolver,
            spec,
            config,
        }
    }

    /// Run the search to completion.
    pub fn search(&self) -> Result<SearchOutcome, SearchError> {
        self.search_with_cancel(&CancelToken::new())
    }

    /// Run the search until it finishes or `cancel` fires.
    pub fn search_with_cancel(&self, cancel: &CancelToken) -> Result<SearchOutcome, SearchError> {
        self.spec.validate()?;

        debug!(
            activities = self.catalog.len(),
            people = self.spec.people(),
            start = %self.spec.start_time(),
            "starting tour search"
        );

        let progress = Progress::new(cancel, self.config.result_limit());
        let run = || self.run(&progress);
        let tours = if self.config.threads > 0 {
            rayon::ThreadPoolBuilder::new()
                .num_threads(self.config.threads)
                .build()?
                .install(run)
        } else {
            run()
        };

        let outcome = SearchOutcome {
            tours,
            branches_explored: progress.branches.load(Ordering::Relaxed),
            cancelled: cancel.is_cancelled(),
            truncated: progress.truncated.load(Ordering::Relaxed),
        };

        debug!(
            tours = outcome.tours.len(),
            branches = outcome.branches_explored,
            cancelled = outcome.cancelled,
            truncated = outcome.truncated,
            "tour search finished"
        );

        Ok(outcome)
    }

    fn run(&self, progress: &Progress<'_>) -> Vec<TourState> {
        let empty = TourState::new(self.spec);
        let all: Vec<usize> = (0..self.catalog.len()).collect();

        all.par_iter()
            .flat_map_iter(|&index| self.branch(&empty, index, &all, progress))
            .collect()
    }

    /// Admit catalog activity `index` onto a copy of `tour` and explore on.
    fn branch(
        &self,
        tour: &TourState,
        index: usize,
        candidates: &[usize],
        progress: &Progress<'_>,
    ) -> Vec<TourState> {
        if progress.should_stop() {
            return Vec::new();
        }
        let Some(activity) = self.catalog.get(index) else {
            return Vec::new();
        };

        progress.branches.fetch_add(1, Ordering::Relaxed);
        let mut next = tour.clone();
        if !next.add_activity(activity, self.spec, self.resolver) {
            return Vec::new();
        }

        let mut found = Vec::new();
        if next.is_acceptable(self.spec) && progress.claim_result() {
            trace!(events = next.events().len(), cost = next.cost(), "recorded tour");
            found.push(next.clone());
        }

        let rest: Vec<usize> = candidates.iter().copied().filter(|&i| i != index).collect();
        found.extend(self.expand(&next, &rest, progress));
        found
    }

    /// Try every remaining candidate that could still fit the budget.
    fn expand(
        &self,
        tour: &TourState,
        remaining: &[usize],
        progress: &Progress<'_>,
    ) -> Vec<TourState> {
        if progress.should_stop() {
            return Vec::new();
        }
        if let Some(depth) = self.config.depth_limit()
            && tour.activity_count() >= depth
        {
            return Vec::new();
        }

        // Pre-filter on the activity's own cost and duration. The comparison is
        // strict, so an activity that would use up exactly the rest of the
        // budget is not tried.
        let money = tour.remaining_money(self.spec);
        let time = tour.remaining_time(self.spec);
        let candidates: Vec<usize> = remaining
            .iter()
            .copied()
            .filter(|&i| {
                self.catalog.get(i).is_some_and(|activity| {
                    money.is_none_or(|money| activity.cost < money)
                        && time.is_none_or(|time| activity.duration < time)
                })
            })
            .collect();

        if candidates.len() >= self.config.parallel_threshold {
            candidates
                .par_iter()
                .flat_map_iter(|&index| self.branch(tour, index, &candidates, progress))
                .collect()
        } else {
            candidates
                .iter()
                .flat_map(|&index| self.branch(tour, index, &candidates, progress))
                .collect()
        }
    }
}
