/// Advice given for crops with no table entry.
pub const DEFAULT_ADVICE: &str = "Balanced NPK recommended";

const FERTILIZER_TABLE: &[(&str, &str)] = &[
    ("rice", "Urea (N), DAP (P), MOP (K)"),
    ("wheat", "Urea, DAP, Potash"),
    ("maize", "DAP, MOP, Nitrogen"),
    ("sugarcane", "NPK 12:32:16"),
    ("cotton", "NPK 10:26:26"),
    ("barley", "Urea, Phosphate fertilizers"),
    ("millet", "Nitrogen-rich fertilizers"),
    ("coffee", "Compost + NPK"),
    ("tea", "Organic manure + NPK"),
    ("pulses", "Phosphorus-rich fertilizers"),
];

fn lookup(crop: &str) -> Option<&'static str> {
    FERTILIZER_TABLE
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(crop))
        .map(|(_, advice)| *advice)
}

/// Fertilizer advice for a crop label (case-insensitive exact match).
pub fn fertilizer_for(crop: &str) -> &'static str {
    lookup(crop).unwrap_or(DEFAULT_ADVICE)
}

pub fn has_entry(crop: &str) -> bool {
    lookup(crop).is_some()
}

pub fn known_crops() -> impl Iterator<Item = &'static str> {
    FERTILIZER_TABLE.iter().map(|(name, _)| *name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rice_advice() {
        assert_eq!(fertilizer_for("rice"), "Urea (N), DAP (P), MOP (K)");
    }

    #[test]
    fn unknown_crop_gets_default() {
        assert_eq!(fertilizer_for("unknowncrop"), "Balanced NPK recommended");
        assert_eq!(fertilizer_for(""), DEFAULT_ADVICE);
    }

    #[test]
    fn lookup_ignores_case() {
        assert_eq!(fertilizer_for("RICE"), fertilizer_for("rice"));
        assert_eq!(fertilizer_for("Sugarcane"), "NPK 12:32:16");
        assert!(has_entry("Tea"));
    }

    #[test]
    fn lookup_is_exact_not_prefix() {
        assert_eq!(fertilizer_for("rice paddy"), DEFAULT_ADVICE);
        assert_eq!(fertilizer_for("ric"), DEFAULT_ADVICE);
        assert!(!has_entry("teas"));
    }

    #[test]
    fn table_covers_ten_crops() {
        let crops: Vec<&str> = known_crops().collect();
        assert_eq!(crops.len(), 10);
        for crop in crops {
            assert_ne!(fertilizer_for(crop), DEFAULT_ADVICE);
        }
    }
}
