//! Inventory trajectory domain module.
//!
//! This crate contains the inventory item schema and the rolling stock
//! trajectory computation, implemented purely as deterministic domain logic
//! (no IO, no HTTP, no storage). Randomness only enters through the synthetic
//! generator's injected source.

pub mod item;
pub mod synthetic;
pub mod trajectory;
pub mod transaction;
pub mod window;

pub use item::{CategoryProfile, InventoryItem, ItemCategory, StockLevel, DEFAULT_UNIT};
pub use trajectory::{
    compute_trajectories, flatten, summarize, DailyTrajectoryPoint, ItemTrajectory, TrajectoryCalculator,
    TrajectorySummary, DEFAULT_WINDOW_DAYS, STARTING_STOCK_FLOOR,
};
pub use transaction::{DayTotals, TransactionDelta, TransactionKind};
pub use window::{is_weekend, trailing_days, week_of};
