//! Explicit recomputation entry point for inventory trajectories.
//!
//! Fetches the current item list from an [`ItemSource`] and recomputes the whole
//! window on every call. There is no cache and no incremental update; callers
//! invoke [`TrajectoryService::refresh`] whenever items or the window change.

use chrono::{NaiveDate, Utc};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use stockline_core::{DomainError, ItemId};
use stockline_inventory::{
    flatten, summarize, DailyTrajectoryPoint, StockLevel, TrajectoryCalculator, TrajectorySummary,
    TransactionDelta,
};

use crate::config::TrajectoryConfig;
use crate::read_model::{ItemSource, SourceError};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RefreshError {
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Current stock classification for one item.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemLevel {
    pub item_id: ItemId,
    pub level: StockLevel,
}

/// Everything a dashboard needs for one window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrajectoryReport {
    pub dates: Vec<NaiveDate>,
    pub points: Vec<DailyTrajectoryPoint>,
    pub summaries: Vec<TrajectorySummary>,
    pub levels: Vec<ItemLevel>,
}

impl TrajectoryReport {
    /// Points for one item, oldest first.
    pub fn points_for(&self, item_id: ItemId) -> impl Iterator<Item = &DailyTrajectoryPoint> {
        self.points.iter().filter(move |p| p.item_id == item_id)
    }

    /// Items whose trajectory does not end at the reported quantity.
    pub fn drifted(&self) -> impl Iterator<Item = &TrajectorySummary> {
        self.summaries.iter().filter(|s| s.anchor_drift != 0)
    }
}

#[derive(Debug)]
pub struct TrajectoryService<S>
where
    S: ItemSource,
{
    source: S,
    config: TrajectoryConfig,
}

impl<S> TrajectoryService<S>
where
    S: ItemSource,
{
    pub fn new(source: S, config: TrajectoryConfig) -> Self {
        Self { source, config }
    }

    pub fn config(&self) -> &TrajectoryConfig {
        &self.config
    }

    /// Recompute the window ending on `today`.
    ///
    /// Uses `transactions` when supplied, synthetic movements otherwise. The
    /// window is validated before the source is queried.
    pub fn refresh(
        &self,
        today: NaiveDate,
        transactions: Option<&[TransactionDelta]>,
    ) -> Result<TrajectoryReport, RefreshError> {
        let calculator = TrajectoryCalculator::new(self.config.window_days, today)?;
        let items = self.source.list_items()?;

        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let trajectories = calculator.compute_or_synthesize(&items, transactions, &mut rng);
        let summaries = summarize(&trajectories);
        let levels = items
            .iter()
            .map(|item| ItemLevel {
                item_id: item.id_typed(),
                level: item.stock_level(),
            })
            .collect();

        let report = TrajectoryReport {
            dates: calculator.dates().to_vec(),
            points: flatten(trajectories),
            summaries,
            levels,
        };

        tracing::info!(
            items = items.len(),
            window_days = self.config.window_days,
            %today,
            synthetic = transactions.is_none(),
            drifted = report.drifted().count(),
            "recomputed inventory trajectories"
        );

        Ok(report)
    }

    /// Recompute the window ending today (UTC).
    pub fn refresh_today(&self, transactions: Option<&[TransactionDelta]>) -> Result<TrajectoryReport, RefreshError> {
        self.refresh(Utc::now().date_naive(), transactions)
    }
}
