//! Rolling stock trajectories.
//!
//! Given each item's current (most recent) quantity and the movements inside a
//! trailing window, reconstruct the end-of-day stock for every day:
//!
//! 1. Sum the window's net change per item.
//! 2. Derive the starting stock backward from the current quantity. A negative
//!    result is replaced by `max(50, floor(current / 2))`.
//! 3. Walk forward day by day, clamping each day at zero.
//!
//! When step 2 clamps, the last day no longer matches the current quantity.
//! That drift is kept as-is and reported through [`TrajectorySummary`].

use std::collections::{HashMap, HashSet};

use chrono::{NaiveDate, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use stockline_core::{DomainResult, ItemId, ValueObject};

use crate::item::{InventoryItem, ItemCategory};
use crate::synthetic;
use crate::transaction::{DayTotals, TransactionDelta};
use crate::window::trailing_days;

/// Lower bound used when the backward-derived starting stock is negative.
pub const STARTING_STOCK_FLOOR: i64 = 50;

/// Window length used by the dashboards.
pub const DEFAULT_WINDOW_DAYS: i64 = 7;

/// End-of-day stock for one item on one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyTrajectoryPoint {
    pub date: NaiveDate,
    pub item_id: ItemId,
    pub item_name: String,
    pub category: ItemCategory,
    pub unit: String,
    pub stock: i64,
    pub inbound: i64,
    pub outbound: i64,
    pub adjustment: i64,
}

impl ValueObject for DailyTrajectoryPoint {}

/// One item's full trajectory across the window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemTrajectory {
    pub item_id: ItemId,
    pub current_quantity: i64,
    pub starting_stock: i64,
    /// The backward-derived starting stock was negative and got replaced.
    pub start_clamped: bool,
    pub points: Vec<DailyTrajectoryPoint>,
}

impl ItemTrajectory {
    pub fn ending_stock(&self) -> i64 {
        self.points.last().map_or(self.starting_stock, |p| p.stock)
    }

    /// Ending stock minus the item's reported current quantity.
    pub fn anchor_drift(&self) -> i64 {
        self.ending_stock().saturating_sub(self.current_quantity)
    }

    pub fn summary(&self) -> TrajectorySummary {
        let stocks = self.points.iter().map(|p| p.stock);
        TrajectorySummary {
            item_id: self.item_id,
            starting_stock: self.starting_stock,
            ending_stock: self.ending_stock(),
            min_stock: stocks.clone().min().unwrap_or(self.starting_stock),
            max_stock: stocks.max().unwrap_or(self.starting_stock),
            start_clamped: self.start_clamped,
            anchor_drift: self.anchor_drift(),
        }
    }
}

/// Per-item roll-up of a trajectory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrajectorySummary {
    pub item_id: ItemId,
    pub starting_stock: i64,
    pub ending_stock: i64,
    pub min_stock: i64,
    pub max_stock: i64,
    pub start_clamped: bool,
    pub anchor_drift: i64,
}

/// Summaries in trajectory order.
pub fn summarize(trajectories: &[ItemTrajectory]) -> Vec<TrajectorySummary> {
    trajectories.iter().map(ItemTrajectory::summary).collect()
}

/// Flatten per-item trajectories into points, item by item, oldest day first.
pub fn flatten(trajectories: Vec<ItemTrajectory>) -> Vec<DailyTrajectoryPoint> {
    trajectories.into_iter().flat_map(|t| t.points).collect()
}

/// Computes trajectories for a fixed trailing window.
///
/// Pure apart from the random source handed to
/// [`compute_synthetic`](Self::compute_synthetic). Nothing is cached: callers
/// recompute whenever items or the window change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrajectoryCalculator {
    dates: Vec<NaiveDate>,
}

impl TrajectoryCalculator {
    /// Window of `window_days` ending on `today`.
    ///
    /// Fails with `InvalidWindow` when `window_days <= 0`.
    pub fn new(window_days: i64, today: NaiveDate) -> DomainResult<Self> {
        Ok(Self {
            dates: trailing_days(today, window_days)?,
        })
    }

    /// Window dates, oldest first.
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Trajectories from real movements.
    ///
    /// Movements dated outside the window or for unknown items are ignored.
    pub fn compute(&self, items: &[InventoryItem], transactions: &[TransactionDelta]) -> Vec<ItemTrajectory> {
        let buckets = self.bucket(items, transactions);
        items
            .iter()
            .map(|item| self.walk(item, &buckets))
            .collect()
    }

    /// Trajectories from synthetic movements drawn from `rng`.
    pub fn compute_synthetic<R>(&self, items: &[InventoryItem], rng: &mut R) -> Vec<ItemTrajectory>
    where
        R: Rng + ?Sized,
    {
        let generated = synthetic::generate(items, &self.dates, rng);
        self.compute(items, &generated)
    }

    /// Real movements when supplied, synthetic ones otherwise.
    pub fn compute_or_synthesize<R>(
        &self,
        items: &[InventoryItem],
        transactions: Option<&[TransactionDelta]>,
        rng: &mut R,
    ) -> Vec<ItemTrajectory>
    where
        R: Rng + ?Sized,
    {
        match transactions {
            Some(txs) => self.compute(items, txs),
            None => self.compute_synthetic(items, rng),
        }
    }

    fn bucket(
        &self,
        items: &[InventoryItem],
        transactions: &[TransactionDelta],
    ) -> HashMap<(ItemId, NaiveDate), DayTotals> {
        let (Some(&first), Some(&last)) = (self.dates.first(), self.dates.last()) else {
            return HashMap::new();
        };

        let known: HashSet<ItemId> = items.iter().map(InventoryItem::id_typed).collect();
        let mut buckets: HashMap<(ItemId, NaiveDate), DayTotals> = HashMap::new();
        let mut ignored = 0usize;

        for delta in transactions {
            let in_window = delta.date >= first && delta.date <= last;
            if !(in_window && known.contains(&delta.item_id)) {
                ignored += 1;
                continue;
            }
            buckets
                .entry((delta.item_id, delta.date))
                .or_default()
                .record(delta);
        }

        if ignored > 0 {
            tracing::debug!(ignored, %first, %last, "ignored movements outside window or item list");
        }

        buckets
    }

    fn walk(&self, item: &InventoryItem, buckets: &HashMap<(ItemId, NaiveDate), DayTotals>) -> ItemTrajectory {
        let item_id = item.id_typed();
        let current = item.current_quantity();

        let daily: Vec<DayTotals> = self
            .dates
            .iter()
            .map(|date| buckets.get(&(item_id, *date)).copied().unwrap_or_default())
            .collect();

        let total_net_change = daily.iter().map(DayTotals::net).fold(0i64, i64::saturating_add);
        let derived = current.saturating_sub(total_net_change);
        let start_clamped = derived < 0;
        let starting_stock = if start_clamped {
            STARTING_STOCK_FLOOR.max(current.div_euclid(2))
        } else {
            derived
        };

        let mut stock = starting_stock;
        let points: Vec<DailyTrajectoryPoint> = self
            .dates
            .iter()
            .zip(&daily)
            .map(|(date, totals)| {
                stock = stock.saturating_add(totals.net()).max(0);
                DailyTrajectoryPoint {
                    date: *date,
                    item_id,
                    item_name: item.name().to_string(),
                    category: item.category(),
                    unit: item.unit().to_string(),
                    stock,
                    inbound: totals.inbound,
                    outbound: totals.outbound,
                    adjustment: totals.adjustment,
                }
            })
            .collect();

        let trajectory = ItemTrajectory {
            item_id,
            current_quantity: current,
            starting_stock,
            start_clamped,
            points,
        };

        let drift = trajectory.anchor_drift();
        if drift != 0 {
            tracing::warn!(
                item_id = %item_id,
                current_quantity = current,
                ending_stock = trajectory.ending_stock(),
                drift,
                start_clamped,
                "trajectory does not end at the reported quantity"
            );
        }

        trajectory
    }
}

/// Compute trajectories for the window ending today (UTC).
///
/// Uses `transactions` when given, otherwise synthesizes movements from an
/// entropy-seeded generator. An empty item list yields an empty result; a
/// non-positive `window_days` fails with `InvalidWindow`.
pub fn compute_trajectories(
    items: &[InventoryItem],
    window_days: i64,
    transactions: Option<&[TransactionDelta]>,
) -> DomainResult<Vec<DailyTrajectoryPoint>> {
    let calculator = TrajectoryCalculator::new(window_days, Utc::now().date_naive())?;
    let trajectories = calculator.compute_or_synthesize(items, transactions, &mut rand::thread_rng());
    Ok(flatten(trajectories))
}
