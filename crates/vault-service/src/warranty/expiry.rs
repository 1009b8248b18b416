//! Keeping the stored expiry date consistent with the warranty inputs.

use chrono::NaiveDate;

use vault_entity::warranty::Warranty;

/// Expiry date to store after an update turned `previous` into `next`.
///
/// The date is recomputed when `next` carries none, or when the purchase
/// date, period or unit changed and `next` still holds a value the user
/// did not choose (the old stored date, or what the old inputs would
/// calculate). Any other incoming date is a manual override and is kept.
///
/// `None` means the new inputs produce no representable date.
pub fn reconcile_expiry(previous: &Warranty, next: &Warranty) -> Option<NaiveDate> {
    let Some(incoming) = next.expiry_date else {
        return next.calculated_expiry();
    };

    let inputs_changed = previous.purchase_date != next.purchase_date
        || previous.warranty_period != next.warranty_period
        || previous.warranty_period_unit != next.warranty_period_unit;
    if !inputs_changed {
        return Some(incoming);
    }

    let untouched = previous.expiry_date == Some(incoming)
        || previous.calculated_expiry() == Some(incoming);
    if untouched {
        next.calculated_expiry()
    } else {
        Some(incoming)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use vault_core::types::{ShareToken, UserId, WarrantyId};
    use vault_entity::warranty::{PeriodUnit, WarrantyCategory, WarrantyChanges};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("date")
    }

    fn stored(expiry: Option<NaiveDate>) -> Warranty {
        Warranty {
            id: WarrantyId::new(),
            user_id: UserId::new(),
            product_name: "Phone".into(),
            brand: "Acme".into(),
            category: WarrantyCategory::Electronics,
            purchase_date: date(2025, 1, 15),
            warranty_period: 12,
            warranty_period_unit: PeriodUnit::Months,
            expiry_date: expiry,
            receipt_file: None,
            share_token: ShareToken::new(),
            notes: String::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn apply(previous: &Warranty, changes: WarrantyChanges) -> Option<NaiveDate> {
        reconcile_expiry(previous, &changes.merge_into(previous))
    }

    #[test]
    fn period_change_recomputes_calculated_date() {
        let prev = stored(Some(date(2026, 1, 15)));
        let got = apply(
            &prev,
            WarrantyChanges {
                warranty_period: Some(24),
                ..Default::default()
            },
        );
        assert_eq!(got, Some(date(2027, 1, 15)));
    }

    #[test]
    fn override_survives_unrelated_edit() {
        let prev = stored(Some(date(2026, 6, 30)));
        let got = apply(
            &prev,
            WarrantyChanges {
                notes: Some("moved to garage".into()),
                ..Default::default()
            },
        );
        assert_eq!(got, Some(date(2026, 6, 30)));
    }

    #[test]
    fn stale_override_is_replaced_when_inputs_change() {
        // The stored date was a manual override, but the request echoes it
        // back untouched while changing the purchase date.
        let prev = stored(Some(date(2026, 6, 30)));
        let got = apply(
            &prev,
            WarrantyChanges {
                purchase_date: Some(date(2025, 3, 1)),
                expiry_date: Some(Some(date(2026, 6, 30))),
                ..Default::default()
            },
        );
        assert_eq!(got, Some(date(2026, 3, 1)));
    }

    #[test]
    fn new_explicit_date_with_input_change_is_kept() {
        let prev = stored(Some(date(2026, 1, 15)));
        let got = apply(
            &prev,
            WarrantyChanges {
                warranty_period: Some(6),
                expiry_date: Some(Some(date(2026, 12, 31))),
                ..Default::default()
            },
        );
        assert_eq!(got, Some(date(2026, 12, 31)));
    }

    #[test]
    fn unit_change_counts_as_input_change() {
        let prev = stored(Some(date(2026, 1, 15)));
        let got = apply(
            &prev,
            WarrantyChanges {
                warranty_period_unit: Some(PeriodUnit::Days),
                ..Default::default()
            },
        );
        assert_eq!(got, Some(date(2025, 1, 27)));
    }

    #[test]
    fn missing_expiry_is_filled_in() {
        let prev = stored(None);
        assert_eq!(apply(&prev, WarrantyChanges::default()), Some(date(2026, 1, 15)));
    }
}
