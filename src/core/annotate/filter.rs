//! Entity allow-list and confidence threshold.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::core::annotate::record::AnnotationRecord;
use crate::core::error::{Result, VidsplitError};

/// Immutable filter applied to every annotation record.
///
/// Validated once at construction: the allow-list is non-empty
/// and `min_confidence` lies in `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterConfig {
    allowed_entities: BTreeSet<String>,
    min_confidence: f64,
}

impl FilterConfig {
    pub fn new<I, E>(allowed_entities: I, min_confidence: f64) -> Result<Self>
    where
        I: IntoIterator<Item = E>,
        E: Into<String>,
    {
        let allowed_entities: BTreeSet<String> = allowed_entities
            .into_iter()
            .map(Into::into)
            .collect();

        // Membership is exact, so padded names could never match
        if let Some(entity) = allowed_entities
            .iter()
            .find(|e| e.is_empty() || e.trim() != e.as_str())
        {
            return Err(VidsplitError::ConfigError(format!(
                "Allowed entity {entity:?} is empty or has surrounding whitespace"
            )));
        }

        if allowed_entities.is_empty() {
            return Err(VidsplitError::ConfigError(
                "Allowed entity list must not be empty".to_string(),
            ));
        }

        if !(0.0..=1.0).contains(&min_confidence) {
            return Err(VidsplitError::ConfigError(format!(
                "Minimum confidence must be within [0, 1], got {min_confidence}"
            )));
        }

        Ok(Self {
            allowed_entities,
            min_confidence,
        })
    }

    pub fn allowed_entities(&self) -> &BTreeSet<String> {
        &self.allowed_entities
    }

    pub fn min_confidence(&self) -> f64 {
        self.min_confidence
    }

    /// True iff the entity is allowed and the confidence is
    /// strictly above the threshold.
    pub fn matches(&self, record: &AnnotationRecord) -> bool {
        self.allowed_entities.contains(&record.entity) && record.confidence > self.min_confidence
    }
}
