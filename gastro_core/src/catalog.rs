//! Default catalog of symptom, trigger, remedy and condition labels.
//!
//! This module provides the built-in label lists the logging and
//! assessment flows present to the user.

use once_cell::sync::Lazy;

/// Which label list a lookup applies to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LabelKind {
    Symptom,
    Trigger,
    Remedy,
    Condition,
}

/// The complete set of selectable labels
#[derive(Clone, Debug)]
pub struct LabelCatalog {
    pub symptoms: Vec<String>,
    pub triggers: Vec<String>,
    pub remedies: Vec<String>,
    pub conditions: Vec<String>,
}

/// Cached default catalog - built once and reused across all operations
static DEFAULT_CATALOG: Lazy<LabelCatalog> = Lazy::new(build_default_catalog_internal);

/// Get a reference to the cached default catalog
pub fn get_default_catalog() -> &'static LabelCatalog {
    &DEFAULT_CATALOG
}

/// Builds the default catalog with built-in labels
///
/// **Note**: For production use, prefer `get_default_catalog()` which returns a
/// cached reference. This function is retained for testing and custom catalog creation.
pub fn build_default_catalog() -> LabelCatalog {
    build_default_catalog_internal()
}

/// The cached default catalog extended with user-defined trigger labels
pub fn catalog_with_custom_triggers(custom: &[String]) -> LabelCatalog {
    let mut catalog = get_default_catalog().clone();
    catalog.extend_triggers(custom);
    catalog
}

fn build_default_catalog_internal() -> LabelCatalog {
    let to_vec = |labels: &[&str]| labels.iter().map(|s| s.to_string()).collect();

    LabelCatalog {
        symptoms: to_vec(&[
            "Stomach Pain",
            "Nausea",
            "Bloating",
            "Heartburn",
            "Acid Reflux",
            "Indigestion",
            "Cramping",
            "Gas",
            "Diarrhea",
            "Constipation",
            "Loss of Appetite",
            "Vomiting",
            "Belching",
            "Fullness",
        ]),
        triggers: to_vec(&[
            "Spicy Food",
            "Fatty Food",
            "Acidic Food",
            "Dairy",
            "Gluten",
            "Alcohol",
            "Caffeine",
            "Stress",
            "Lack of Sleep",
            "Medication",
            "Large Meal",
            "Eating Late",
            "Smoking",
            "NSAIDs",
        ]),
        remedies: to_vec(&[
            "Antacid",
            "PPI",
            "H2 Blocker",
            "Probiotics",
            "Ginger Tea",
            "Chamomile Tea",
            "Rest",
            "Light Walk",
            "Heat Pad",
            "Deep Breathing",
            "Small Meals",
            "Bland Diet",
            "Hydration",
            "Meditation",
        ]),
        conditions: to_vec(&[
            "Gastritis",
            "GERD",
            "IBS",
            "Dyspepsia",
            "Food Sensitivities",
            "IBD",
        ]),
    }
}

impl LabelCatalog {
    /// Validate the catalog for consistency and completeness
    ///
    /// Returns a list of validation errors, or empty Vec if valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        let check = |name: &str, labels: &[String], errors: &mut Vec<String>| {
            if labels.is_empty() {
                errors.push(format!("Catalog has no {} labels", name));
            }
            for label in labels {
                if label.trim().is_empty() {
                    errors.push(format!("Catalog has an empty {} label", name));
                }
            }
            let mut seen = std::collections::HashSet::new();
            for label in labels {
                if !seen.insert(label.to_lowercase()) {
                    errors.push(format!("Duplicate {} label '{}'", name, label));
                }
            }
        };

        check("symptom", &self.symptoms, &mut errors);
        check("trigger", &self.triggers, &mut errors);
        check("remedy", &self.remedies, &mut errors);
        check("condition", &self.conditions, &mut errors);

        errors
    }

    /// Labels the user supplied that are not in the catalog, case-insensitive
    pub fn unknown_labels<'a>(&self, kind: LabelKind, supplied: &'a [String]) -> Vec<&'a str> {
        let known = match kind {
            LabelKind::Symptom => &self.symptoms,
            LabelKind::Trigger => &self.triggers,
            LabelKind::Remedy => &self.remedies,
            LabelKind::Condition => &self.conditions,
        };
        supplied
            .iter()
            .filter(|label| !known.iter().any(|k| k.eq_ignore_ascii_case(label)))
            .map(|label| label.as_str())
            .collect()
    }

    /// Append user-defined trigger labels, skipping duplicates
    pub fn extend_triggers(&mut self, custom: &[String]) {
        for trigger in custom {
            let exists = self
                .triggers
                .iter()
                .any(|t| t.eq_ignore_ascii_case(trigger));
            if !exists && !trigger.trim().is_empty() {
                self.triggers.push(trigger.clone());
            }
        }
    }
}
