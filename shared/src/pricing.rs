use serde::{Deserialize, Serialize};

use crate::model::{Frequency, ServiceKind, ServiceSelection, Weekday};

/// Fixed monthly base charge, applied once when any service is active.
pub const BASE_FEE: f64 = 29.00;

/// Standard two-decimal currency display, e.g. "$49.00".
pub fn format_amount(amount: f64) -> String {
    format!("${:.2}", amount)
}

/// One breakdown row per active service. Display strings are precomputed
/// here so the rendering layer never re-derives money formatting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub service: ServiceKind,
    pub label: String,
    pub quantity: u32,
    pub frequency: Frequency,
    pub pickup_weekday: Option<Weekday>,
    pub unit_price: f64,
    pub subtotal: f64,
    pub formatted_subtotal: String,
}

impl LineItem {
    /// Human-readable row, e.g.
    /// "Recycling — 2 cans, every other week on Monday — $10.00".
    pub fn summary(&self) -> String {
        let cans = if self.quantity == 1 { "can" } else { "cans" };
        let day = match self.pickup_weekday {
            Some(day) => day.name(),
            None => "pickup day not set",
        };
        format!(
            "{} — {} {}, {} on {} — {}",
            self.label,
            self.quantity,
            cans,
            self.frequency.label().to_lowercase(),
            day,
            self.formatted_subtotal
        )
    }
}

/// Derived pricing state. Never stored; recomputed from the selections on
/// every form mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingBreakdown {
    pub base_fee: f64,
    pub line_items: Vec<LineItem>,
    pub total: f64,
}

impl PricingBreakdown {
    pub fn formatted_base_fee(&self) -> String {
        format_amount(self.base_fee)
    }

    pub fn formatted_total(&self) -> String {
        format_amount(self.total)
    }

    /// Whether anything is being charged at all.
    pub fn has_charges(&self) -> bool {
        !self.line_items.is_empty()
    }
}

/// Pure pricing function: selections in, itemized monthly breakdown out.
///
/// Defensive about inconsistent input: a selection with `frequency = None`
/// or `quantity = 0` contributes nothing regardless of its `enabled` flag,
/// and the base fee only applies when at least one service charges.
pub fn compute_total(selections: &[ServiceSelection]) -> PricingBreakdown {
    let mut line_items = Vec::new();
    let mut services_subtotal = 0.0;

    for selection in selections {
        if !selection.is_active() {
            continue;
        }
        let unit_price = selection.frequency.unit_price();
        let subtotal = unit_price * selection.quantity as f64;
        services_subtotal += subtotal;
        line_items.push(LineItem {
            service: selection.kind,
            label: selection.kind.label().to_string(),
            quantity: selection.quantity,
            frequency: selection.frequency,
            pickup_weekday: selection.pickup_weekday,
            unit_price,
            subtotal,
            formatted_subtotal: format_amount(subtotal),
        });
    }

    let base_fee = if line_items.is_empty() { 0.0 } else { BASE_FEE };

    PricingBreakdown {
        base_fee,
        total: base_fee + services_subtotal,
        line_items,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selection(
        kind: ServiceKind,
        frequency: Frequency,
        quantity: u32,
    ) -> ServiceSelection {
        ServiceSelection {
            kind,
            enabled: frequency != Frequency::None,
            frequency,
            quantity,
            pickup_weekday: Some(Weekday::Monday),
        }
    }

    #[test]
    fn test_trash_and_recycling_example() {
        // Trash weekly x1 + recycling biweekly x2 = 29 + 10 + 10.
        let selections = vec![
            selection(ServiceKind::Trash, Frequency::Weekly, 1),
            selection(ServiceKind::Recycling, Frequency::Biweekly, 2),
            ServiceSelection::disabled(ServiceKind::Compost),
        ];
        let breakdown = compute_total(&selections);
        assert_eq!(breakdown.base_fee, BASE_FEE);
        assert_eq!(breakdown.line_items.len(), 2);
        assert_eq!(breakdown.total, 49.00);
        assert_eq!(breakdown.formatted_total(), "$49.00");
    }

    #[test]
    fn test_no_services_means_no_base_fee() {
        let selections = vec![
            ServiceSelection::disabled(ServiceKind::Trash),
            ServiceSelection::disabled(ServiceKind::Recycling),
            ServiceSelection::disabled(ServiceKind::Compost),
        ];
        let breakdown = compute_total(&selections);
        assert_eq!(breakdown.base_fee, 0.0);
        assert_eq!(breakdown.total, 0.0);
        assert!(!breakdown.has_charges());
        assert_eq!(breakdown.formatted_total(), "$0.00");
    }

    #[test]
    fn test_inconsistent_selection_charges_nothing() {
        // Enabled box but no cadence picked yet: not billed.
        let mut orphan = ServiceSelection::disabled(ServiceKind::Compost);
        orphan.enabled = true;
        let breakdown = compute_total(&[orphan]);
        assert_eq!(breakdown.total, 0.0);
        assert!(breakdown.line_items.is_empty());
    }

    #[test]
    fn test_zero_quantity_charges_nothing() {
        let mut sel = selection(ServiceKind::Trash, Frequency::Weekly, 0);
        sel.enabled = true;
        let breakdown = compute_total(&[sel]);
        assert_eq!(breakdown.total, 0.0);
    }

    #[test]
    fn test_total_matches_sum_of_parts() {
        let selections = vec![
            selection(ServiceKind::Trash, Frequency::Weekly, 3),
            selection(ServiceKind::Recycling, Frequency::Monthly, 2),
            selection(ServiceKind::Compost, Frequency::Biweekly, 1),
        ];
        let breakdown = compute_total(&selections);
        let item_sum: f64 = breakdown.line_items.iter().map(|item| item.subtotal).sum();
        assert_eq!(breakdown.total, breakdown.base_fee + item_sum);
        assert_eq!(breakdown.total, 29.00 + 30.00 + 5.00 + 5.00);
    }

    #[test]
    fn test_determinism() {
        let selections = vec![
            selection(ServiceKind::Trash, Frequency::Weekly, 2),
            selection(ServiceKind::Recycling, Frequency::Biweekly, 1),
        ];
        assert_eq!(compute_total(&selections), compute_total(&selections));
    }

    #[test]
    fn test_line_item_summary() {
        let selections = vec![selection(ServiceKind::Recycling, Frequency::Biweekly, 2)];
        let breakdown = compute_total(&selections);
        assert_eq!(
            breakdown.line_items[0].summary(),
            "Recycling — 2 cans, every other week on Monday — $10.00"
        );
    }
}
