//! Heuristic completeness score for an extraction result.
//!
//! The four important fields are always part of the denominator. Every other
//! field only enters it once it is present on the record, so the maximum is
//! data-dependent and scores of records with different field sets are not
//! comparable.

use crate::models::extracted::{ExtractedData, FieldState};

/// Fields that always count toward the maximum.
pub const IMPORTANT_FIELDS: [&str; 4] = ["invoiceNumber", "date", "sellerName", "buyerName"];

/// Weight of an important field.
pub const IMPORTANT_WEIGHT: u32 = 10;

/// Weight of any other present field.
pub const BONUS_WEIGHT: u32 = 5;

/// Score one record on a 0-100 scale.
pub fn score(data: &ExtractedData) -> f64 {
    let mut earned = 0u32;
    let mut possible = 0u32;

    for (key, state) in data.field_states() {
        let weight = if IMPORTANT_FIELDS.contains(&key) {
            possible += IMPORTANT_WEIGHT;
            IMPORTANT_WEIGHT
        } else if state != FieldState::Absent {
            possible += BONUS_WEIGHT;
            BONUS_WEIGHT
        } else {
            continue;
        };

        if state == FieldState::Populated {
            earned += weight;
        }
    }

    if possible == 0 {
        return 0.0;
    }
    f64::from(earned) / f64::from(possible) * 100.0
}

/// Mean of per-file scores, 0 for an empty batch.
pub fn average(scores: &[f64]) -> f64 {
    if scores.is_empty() {
        return 0.0;
    }
    scores.iter().sum::<f64>() / scores.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::extracted::ProductInfo;

    fn important() -> ExtractedData {
        ExtractedData {
            invoice_number: Some("12345".to_string()),
            date: Some("2025-08-28".to_string()),
            seller_name: Some("Australis Mar S.A.".to_string()),
            buyer_name: Some("JSC RUSSIAN FISH COMPANY".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_record_scores_zero() {
        assert_eq!(score(&ExtractedData::new()), 0.0);
    }

    #[test]
    fn test_important_fields_only_scores_full() {
        assert_eq!(score(&important()), 100.0);
    }

    #[test]
    fn test_bonus_fields_extend_maximum() {
        // 10 of 40 for the invoice number, plus 5 of 5 for the container.
        let data = ExtractedData {
            invoice_number: Some("12345".to_string()),
            container_number: Some("MEDU9179728".to_string()),
            ..Default::default()
        };
        assert_eq!(score(&data), 15.0 / 45.0 * 100.0);
    }

    #[test]
    fn test_empty_values_count_against() {
        let mut data = important();
        data.vessel_name = Some(String::new());
        // 40 of 45
        assert_eq!(score(&data), 40.0 / 45.0 * 100.0);
    }

    #[test]
    fn test_lists_count_as_bonus() {
        let mut data = important();
        data.products = Some(vec![ProductInfo::default()]);
        assert_eq!(score(&data), 100.0);
    }

    #[test]
    fn test_average() {
        assert_eq!(average(&[]), 0.0);
        assert_eq!(average(&[100.0, 50.0]), 75.0);
    }
}
