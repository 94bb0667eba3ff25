use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use stockline_core::{ItemId, ValueObject};

/// Direction of a stock movement.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Inbound,
    Outbound,
    /// Stock-count correction. Quantities are non-negative, so adjustments add.
    Adjustment,
}

/// A single dated stock movement, real or synthetic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionDelta {
    pub date: NaiveDate,
    pub item_id: ItemId,
    pub kind: TransactionKind,
    pub quantity: u32,
}

impl ValueObject for TransactionDelta {}

impl TransactionDelta {
    pub fn new(date: NaiveDate, item_id: ItemId, kind: TransactionKind, quantity: u32) -> Self {
        Self {
            date,
            item_id,
            kind,
            quantity,
        }
    }

    pub fn inbound(date: NaiveDate, item_id: ItemId, quantity: u32) -> Self {
        Self::new(date, item_id, TransactionKind::Inbound, quantity)
    }

    pub fn outbound(date: NaiveDate, item_id: ItemId, quantity: u32) -> Self {
        Self::new(date, item_id, TransactionKind::Outbound, quantity)
    }

    pub fn adjustment(date: NaiveDate, item_id: ItemId, quantity: u32) -> Self {
        Self::new(date, item_id, TransactionKind::Adjustment, quantity)
    }
}

/// Per-day movement totals for one item.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct DayTotals {
    pub inbound: i64,
    pub outbound: i64,
    pub adjustment: i64,
}

impl DayTotals {
    pub fn record(&mut self, delta: &TransactionDelta) {
        let qty = i64::from(delta.quantity);
        match delta.kind {
            TransactionKind::Inbound => self.inbound = self.inbound.saturating_add(qty),
            TransactionKind::Outbound => self.outbound = self.outbound.saturating_add(qty),
            TransactionKind::Adjustment => self.adjustment = self.adjustment.saturating_add(qty),
        }
    }

    /// Signed stock change for the day.
    pub fn net(&self) -> i64 {
        self.inbound
            .saturating_sub(self.outbound)
            .saturating_add(self.adjustment)
    }
}
