//! Synthetic transaction history.
//!
//! Used when the caller has no real movement history for the window. Every
//! (item, day) pair samples inbound, outbound and adjustment events
//! independently, scaled by the item's [`CategoryProfile`](crate::CategoryProfile)
//! and damped on weekends.
//!
//! The random source is injected. Pass a seeded `StdRng` to get exact,
//! repeatable sequences.

use chrono::NaiveDate;
use rand::Rng;

use crate::item::InventoryItem;
use crate::transaction::{TransactionDelta, TransactionKind};
use crate::window::is_weekend;

pub const INBOUND_PROBABILITY: f64 = 0.4;
pub const OUTBOUND_PROBABILITY: f64 = 0.8;
pub const ADJUSTMENT_PROBABILITY: f64 = 0.1;
pub const WEEKEND_FACTOR: f64 = 0.3;

const INBOUND_BASE: u32 = 10;
const OUTBOUND_BASE: u32 = 5;
const ADJUSTMENT_BASE: u32 = 1;
const ADJUSTMENT_SPREAD: f64 = 20.0;

/// Generate plausible movements for every item over `dates`.
///
/// Output is ordered by item, then date, then kind (inbound, outbound,
/// adjustment). Each probability check consumes one uniform draw; a triggered
/// event consumes one more for its quantity.
pub fn generate<R>(items: &[InventoryItem], dates: &[NaiveDate], rng: &mut R) -> Vec<TransactionDelta>
where
    R: Rng + ?Sized,
{
    let mut out = Vec::new();

    for item in items {
        let profile = item.category().profile();
        let item_id = item.id_typed();

        for &date in dates {
            let factor = if is_weekend(date) { WEEKEND_FACTOR } else { 1.0 };

            if draw(rng) < INBOUND_PROBABILITY * factor {
                let qty = floor_u32(draw(rng) * profile.max_inbound * profile.activity) + INBOUND_BASE;
                out.push(TransactionDelta::new(date, item_id, TransactionKind::Inbound, qty));
            }

            if draw(rng) < OUTBOUND_PROBABILITY * factor {
                let qty = floor_u32(draw(rng) * profile.max_outbound * profile.activity) + OUTBOUND_BASE;
                out.push(TransactionDelta::new(date, item_id, TransactionKind::Outbound, qty));
            }

            if draw(rng) < ADJUSTMENT_PROBABILITY * factor {
                let qty = floor_u32(draw(rng) * ADJUSTMENT_SPREAD) + ADJUSTMENT_BASE;
                out.push(TransactionDelta::new(date, item_id, TransactionKind::Adjustment, qty));
            }
        }
    }

    tracing::debug!(
        items = items.len(),
        days = dates.len(),
        deltas = out.len(),
        "generated synthetic transactions"
    );

    out
}

fn draw<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    rng.gen_range(0.0..1.0)
}

/// Draws are in `[0, 1)` and spans are small, so the product fits `u32`.
fn floor_u32(x: f64) -> u32 {
    x.floor() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::ItemCategory;
    use crate::window::trailing_days;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use rand::rngs::mock::StepRng;
    use stockline_core::ItemId;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn items() -> Vec<InventoryItem> {
        vec![
            InventoryItem::new(ItemId::new(), "Steel coil").with_category(ItemCategory::RawMaterial),
            InventoryItem::new(ItemId::new(), "Torque wrench").with_category(ItemCategory::Tool),
            InventoryItem::new(ItemId::new(), "Gasket").with_category(ItemCategory::Part),
        ]
    }

    #[test]
    fn same_seed_same_history() {
        let items = items();
        let dates = trailing_days(ymd(2024, 3, 10), 14).unwrap();

        let a = generate(&items, &dates, &mut StdRng::seed_from_u64(42));
        let b = generate(&items, &dates, &mut StdRng::seed_from_u64(42));

        assert_eq!(a, b);
    }

    #[test]
    fn quantities_stay_within_category_bounds() {
        let items = items();
        let dates = trailing_days(ymd(2024, 3, 10), 60).unwrap();
        let deltas = generate(&items, &dates, &mut StdRng::seed_from_u64(7));

        assert!(!deltas.is_empty());
        for delta in &deltas {
            let item = items.iter().find(|i| i.id_typed() == delta.item_id).unwrap();
            let p = item.category().profile();
            let (lo, hi) = match delta.kind {
                TransactionKind::Inbound => (10, 10 + (p.max_inbound * p.activity).ceil() as u32),
                TransactionKind::Outbound => (5, 5 + (p.max_outbound * p.activity).ceil() as u32),
                TransactionKind::Adjustment => (1, 21),
            };
            assert!(
                delta.quantity >= lo && delta.quantity < hi,
                "{:?} quantity {} outside [{lo}, {hi})",
                delta.kind,
                delta.quantity
            );
            assert!(dates.contains(&delta.date));
        }
    }

    #[test]
    fn zero_draws_trigger_every_event_at_minimum_size() {
        // StepRng(0, 0) always yields 0, so every check passes and every
        // quantity is the base amount.
        let item = InventoryItem::new(ItemId::new(), "Bracket").with_category(ItemCategory::Component);
        let date = ymd(2024, 3, 9); // Saturday
        let deltas = generate(std::slice::from_ref(&item), &[date], &mut StepRng::new(0, 0));

        assert_eq!(
            deltas,
            vec![
                TransactionDelta::inbound(date, item.id_typed(), 10),
                TransactionDelta::outbound(date, item.id_typed(), 5),
                TransactionDelta::adjustment(date, item.id_typed(), 1),
            ]
        );
    }

    /// A source whose every uniform draw is `x` (exact for dyadic `x`).
    fn constant_draw(x: f64) -> StepRng {
        // `gen_range(0.0..1.0)` keeps the top 52 bits of each u64 as the mantissa.
        StepRng::new(((x * (1u64 << 52) as f64) as u64) << 12, 0)
    }

    fn kinds(x: f64, date: NaiveDate) -> Vec<TransactionKind> {
        let item = InventoryItem::new(ItemId::new(), "Bracket").with_category(ItemCategory::Component);
        generate(std::slice::from_ref(&item), &[date], &mut constant_draw(x))
            .into_iter()
            .map(|d| d.kind)
            .collect()
    }

    #[test]
    fn event_probabilities_on_weekdays() {
        use crate::transaction::TransactionKind::*;
        let monday = ymd(2024, 3, 4);

        assert_eq!(kinds(0.05, monday), vec![Inbound, Outbound, Adjustment]);
        assert_eq!(kinds(0.35, monday), vec![Inbound, Outbound]);
        assert_eq!(kinds(0.5, monday), vec![Outbound]);
        assert_eq!(kinds(0.85, monday), Vec::<TransactionKind>::new());
    }

    #[test]
    fn weekend_factor_scales_every_probability() {
        use crate::transaction::TransactionKind::*;
        let saturday = ymd(2024, 3, 9);
        let sunday = ymd(2024, 3, 10);

        // Thresholds: inbound 0.12, outbound 0.24, adjustment 0.03.
        assert_eq!(kinds(0.02, saturday), vec![Inbound, Outbound, Adjustment]);
        assert_eq!(kinds(0.1, sunday), vec![Inbound, Outbound]);
        assert_eq!(kinds(0.2, saturday), vec![Outbound]);
        assert_eq!(kinds(0.25, sunday), Vec::<TransactionKind>::new());
        assert_eq!(kinds(0.35, saturday), Vec::<TransactionKind>::new());
    }

    #[test]
    fn quantities_scale_by_category_profile() {
        let date = ymd(2024, 3, 4);
        let component = InventoryItem::new(ItemId::new(), "Bracket").with_category(ItemCategory::Component);
        let tool = InventoryItem::new(ItemId::new(), "Caliper").with_category(ItemCategory::Tool);

        // 0.25: floor(0.25 * 100 * 2.0) + 10, floor(0.25 * 40 * 2.0) + 5.
        let deltas = generate(std::slice::from_ref(&component), &[date], &mut constant_draw(0.25));
        assert_eq!(
            deltas,
            vec![
                TransactionDelta::inbound(date, component.id_typed(), 60),
                TransactionDelta::outbound(date, component.id_typed(), 25),
            ]
        );

        // 0.25: floor(0.25 * 20 * 0.5) + 10, floor(0.25 * 5 * 0.5) + 5.
        let deltas = generate(std::slice::from_ref(&tool), &[date], &mut constant_draw(0.25));
        assert_eq!(
            deltas,
            vec![
                TransactionDelta::inbound(date, tool.id_typed(), 12),
                TransactionDelta::outbound(date, tool.id_typed(), 5),
            ]
        );

        // 0.0625 also triggers an adjustment: floor(0.0625 * 20) + 1.
        let deltas = generate(std::slice::from_ref(&tool), &[date], &mut constant_draw(0.0625));
        assert_eq!(deltas[2], TransactionDelta::adjustment(date, tool.id_typed(), 2));
    }

    #[test]
    fn weekends_are_quieter() {
        let items: Vec<_> = (0..50)
            .map(|_| InventoryItem::new(ItemId::new(), "Widget").with_category(ItemCategory::Component))
            .collect();
        // 2024-03-04 is a Monday; 2024-03-09 a Saturday.
        let mut rng = StdRng::seed_from_u64(2024);
        let weekday_events = generate(&items, &[ymd(2024, 3, 4)], &mut rng).len();
        let weekend_events = generate(&items, &[ymd(2024, 3, 9)], &mut rng).len();

        assert!(
            weekend_events < weekday_events,
            "weekend={weekend_events} weekday={weekday_events}"
        );
    }

    #[test]
    fn no_items_no_history() {
        let dates = trailing_days(ymd(2024, 3, 10), 7).unwrap();
        assert!(generate(&[], &dates, &mut StdRng::seed_from_u64(1)).is_empty());
    }
}
