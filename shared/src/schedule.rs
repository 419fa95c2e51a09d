use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{Frequency, ServiceKind, ServiceSelection, Weekday};

/// Fixed per-field bound on the can stepper.
pub const MAX_QUANTITY: u32 = 10;

/// The signup form's service state, one selection per stream. All
/// transitions live here so the DOM layer only reads and writes this
/// struct; callers recompute pricing after every mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleForm {
    pub trash: ServiceSelection,
    pub recycling: ServiceSelection,
    pub compost: ServiceSelection,
}

impl Default for ScheduleForm {
    fn default() -> Self {
        ScheduleForm {
            trash: ServiceSelection::disabled(ServiceKind::Trash),
            recycling: ServiceSelection::disabled(ServiceKind::Recycling),
            compost: ServiceSelection::disabled(ServiceKind::Compost),
        }
    }
}

impl ScheduleForm {
    pub fn new() -> ScheduleForm {
        ScheduleForm::default()
    }

    pub fn get(&self, kind: ServiceKind) -> &ServiceSelection {
        match kind {
            ServiceKind::Trash => &self.trash,
            ServiceKind::Recycling => &self.recycling,
            ServiceKind::Compost => &self.compost,
        }
    }

    pub fn get_mut(&mut self, kind: ServiceKind) -> &mut ServiceSelection {
        match kind {
            ServiceKind::Trash => &mut self.trash,
            ServiceKind::Recycling => &mut self.recycling,
            ServiceKind::Compost => &mut self.compost,
        }
    }

    /// Snapshot of all three selections, in display order, for pricing.
    pub fn selections(&self) -> [ServiceSelection; 3] {
        [
            self.trash.clone(),
            self.recycling.clone(),
            self.compost.clone(),
        ]
    }

    /// Selections the user has checked on.
    pub fn enabled_selections(&self) -> Vec<&ServiceSelection> {
        [&self.trash, &self.recycling, &self.compost]
            .into_iter()
            .filter(|selection| selection.enabled)
            .collect()
    }

    /// Check a service on or off. Enabling forces a sane starting state:
    /// at least one can, weekly cadence, and (for non-trash streams) the
    /// trash pickup day, since a property has a single physical pickup day.
    pub fn toggle_service(&mut self, kind: ServiceKind, enabled: bool) {
        let trash_day = self.trash.pickup_weekday;
        let selection = self.get_mut(kind);
        if enabled {
            selection.enabled = true;
            selection.frequency = Frequency::Weekly;
            if selection.quantity == 0 {
                selection.quantity = 1;
            }
            if selection.pickup_weekday.is_none() {
                selection.pickup_weekday = match kind {
                    ServiceKind::Trash => Some(Weekday::Monday),
                    _ => trash_day,
                };
            }
        } else {
            selection.enabled = false;
            selection.frequency = Frequency::None;
            selection.quantity = 0;
        }
    }

    /// Change a service's cadence. "No pickup" zeroes the quantity; any
    /// real cadence bumps a zero quantity to one. One rule for every
    /// stream (see DESIGN.md).
    pub fn change_frequency(&mut self, kind: ServiceKind, frequency: Frequency) {
        let selection = self.get_mut(kind);
        selection.frequency = frequency;
        match frequency {
            Frequency::None => selection.quantity = 0,
            _ => {
                if selection.quantity == 0 {
                    selection.quantity = 1;
                }
            }
        }
    }

    pub fn set_pickup_weekday(&mut self, kind: ServiceKind, weekday: Option<Weekday>) {
        self.get_mut(kind).pickup_weekday = weekday;
    }

    pub fn increment_quantity(&mut self, kind: ServiceKind) {
        let selection = self.get_mut(kind);
        if selection.quantity < MAX_QUANTITY {
            selection.quantity += 1;
        }
    }

    /// Decrement, clamped to one can while the service is enabled. Going
    /// below the floor is a silent no-op.
    pub fn decrement_quantity(&mut self, kind: ServiceKind) {
        let selection = self.get_mut(kind);
        let floor = if selection.enabled { 1 } else { 0 };
        if selection.quantity > floor {
            selection.quantity -= 1;
        }
    }

    /// Submit-time validation: at least one service, and every enabled
    /// service fully specified. Violations block submission.
    pub fn validate_for_submit(&self) -> Vec<ScheduleValidationError> {
        let enabled = self.enabled_selections();
        if enabled.is_empty() {
            return vec![ScheduleValidationError::NoServiceSelected];
        }
        let mut errors = Vec::new();
        for selection in enabled {
            if selection.pickup_weekday.is_none() {
                errors.push(ScheduleValidationError::MissingPickupWeekday(selection.kind));
            }
            if selection.frequency == Frequency::None {
                errors.push(ScheduleValidationError::MissingFrequency(selection.kind));
            }
        }
        errors
    }
}

/// Field-specific submission errors; `Display` is the user-facing copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum ScheduleValidationError {
    #[error("Choose at least one service to continue")]
    NoServiceSelected,
    #[error("Pick a collection day for your {} service", .0.label())]
    MissingPickupWeekday(ServiceKind),
    #[error("Pick a pickup frequency for your {} service", .0.label())]
    MissingFrequency(ServiceKind),
}

impl ScheduleValidationError {
    /// The service row this error anchors to; `None` means the whole form.
    pub fn field(&self) -> Option<ServiceKind> {
        match self {
            ScheduleValidationError::NoServiceSelected => None,
            ScheduleValidationError::MissingPickupWeekday(kind) => Some(*kind),
            ScheduleValidationError::MissingFrequency(kind) => Some(*kind),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::compute_total;

    #[test]
    fn test_toggle_on_defaults() {
        let mut form = ScheduleForm::new();
        form.toggle_service(ServiceKind::Trash, true);
        assert!(form.trash.enabled);
        assert_eq!(form.trash.frequency, Frequency::Weekly);
        assert_eq!(form.trash.quantity, 1);
        assert_eq!(form.trash.pickup_weekday, Some(Weekday::Monday));
    }

    #[test]
    fn test_toggle_off_resets() {
        let mut form = ScheduleForm::new();
        form.toggle_service(ServiceKind::Trash, true);
        form.change_frequency(ServiceKind::Trash, Frequency::Monthly);
        form.increment_quantity(ServiceKind::Trash);
        form.increment_quantity(ServiceKind::Trash);

        form.toggle_service(ServiceKind::Trash, false);
        assert!(!form.trash.enabled);
        assert_eq!(form.trash.frequency, Frequency::None);
        assert_eq!(form.trash.quantity, 0);
    }

    #[test]
    fn test_toggle_off_and_on_forgets_intermediate_state() {
        let mut form = ScheduleForm::new();
        form.toggle_service(ServiceKind::Recycling, true);
        form.change_frequency(ServiceKind::Recycling, Frequency::Biweekly);
        form.increment_quantity(ServiceKind::Recycling);
        form.toggle_service(ServiceKind::Recycling, false);
        form.toggle_service(ServiceKind::Recycling, true);
        assert_eq!(form.recycling.frequency, Frequency::Weekly);
        assert_eq!(form.recycling.quantity, 1);
    }

    #[test]
    fn test_non_trash_copies_trash_pickup_day() {
        let mut form = ScheduleForm::new();
        form.toggle_service(ServiceKind::Trash, true);
        form.set_pickup_weekday(ServiceKind::Trash, Some(Weekday::Thursday));
        form.toggle_service(ServiceKind::Compost, true);
        assert_eq!(form.compost.pickup_weekday, Some(Weekday::Thursday));
    }

    #[test]
    fn test_non_trash_without_trash_day_stays_unset() {
        let mut form = ScheduleForm::new();
        form.toggle_service(ServiceKind::Recycling, true);
        assert_eq!(form.recycling.pickup_weekday, None);
        assert_eq!(
            form.validate_for_submit(),
            vec![ScheduleValidationError::MissingPickupWeekday(
                ServiceKind::Recycling
            )]
        );
    }

    #[test]
    fn test_frequency_none_zeroes_quantity_for_any_service() {
        let mut form = ScheduleForm::new();
        for kind in ServiceKind::all() {
            form.toggle_service(kind, true);
            form.increment_quantity(kind);
            form.change_frequency(kind, Frequency::None);
            assert_eq!(form.get(kind).quantity, 0, "{:?}", kind);
            form.change_frequency(kind, Frequency::Monthly);
            assert_eq!(form.get(kind).quantity, 1, "{:?}", kind);
        }
    }

    #[test]
    fn test_quantity_clamps() {
        let mut form = ScheduleForm::new();
        form.toggle_service(ServiceKind::Trash, true);
        for _ in 0..20 {
            form.increment_quantity(ServiceKind::Trash);
        }
        assert_eq!(form.trash.quantity, MAX_QUANTITY);
        for _ in 0..20 {
            form.decrement_quantity(ServiceKind::Trash);
        }
        // Enabled services never drop below one can.
        assert_eq!(form.trash.quantity, 1);

        form.toggle_service(ServiceKind::Trash, false);
        form.decrement_quantity(ServiceKind::Trash);
        assert_eq!(form.trash.quantity, 0);
    }

    #[test]
    fn test_validate_requires_a_service() {
        let form = ScheduleForm::new();
        assert_eq!(
            form.validate_for_submit(),
            vec![ScheduleValidationError::NoServiceSelected]
        );
    }

    #[test]
    fn test_validate_passes_fully_specified_form() {
        let mut form = ScheduleForm::new();
        form.toggle_service(ServiceKind::Trash, true);
        assert!(form.validate_for_submit().is_empty());
    }

    #[test]
    fn test_validation_messages_name_the_field() {
        let error = ScheduleValidationError::MissingPickupWeekday(ServiceKind::Compost);
        assert_eq!(
            error.to_string(),
            "Pick a collection day for your Compost service"
        );
        assert_eq!(error.field(), Some(ServiceKind::Compost));
        assert_eq!(ScheduleValidationError::NoServiceSelected.field(), None);
    }

    #[test]
    fn test_mutations_feed_pricing() {
        let mut form = ScheduleForm::new();
        form.toggle_service(ServiceKind::Trash, true);
        form.toggle_service(ServiceKind::Recycling, true);
        form.change_frequency(ServiceKind::Recycling, Frequency::Biweekly);
        form.increment_quantity(ServiceKind::Recycling);
        let breakdown = compute_total(&form.selections());
        assert_eq!(breakdown.total, 29.00 + 10.00 + 10.00);
    }
}
