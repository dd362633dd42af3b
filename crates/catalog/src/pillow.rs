use serde::{Deserialize, Serialize};

use atelier_core::{DomainError, DomainResult, PillowId, ensure_non_negative, lenient_f64, or_zero};

/// Finished-goods entry ("pillow"): a ready item with its own sale price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pillow {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<PillowId>,
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_f64", skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64", skip_serializing_if = "Option::is_none")]
    pub length: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64", skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64", skip_serializing_if = "Option::is_none")]
    pub quantity: Option<f64>,
}

impl Pillow {
    pub fn price(&self) -> f64 {
        or_zero(self.price)
    }

    /// Start an edit of this entry, keeping its identifier.
    pub fn to_draft(&self) -> PillowDraft {
        PillowDraft {
            id: self.id.clone(),
            name: self.name.clone(),
            price: self.price(),
            length: or_zero(self.length),
            weight: or_zero(self.weight),
            quantity: or_zero(self.quantity),
        }
    }
}

/// Body of `POST /pillow`: creates an entry, or updates it when `id` is set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PillowDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<PillowId>,
    pub name: String,
    pub price: f64,
    pub length: f64,
    pub weight: f64,
    pub quantity: f64,
}

impl PillowDraft {
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Self {
            id: None,
            name: name.into(),
            price,
            length: 0.0,
            weight: 0.0,
            quantity: 0.0,
        }
    }

    pub fn is_update(&self) -> bool {
        self.id.is_some()
    }

    pub fn validate(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        ensure_non_negative("price", self.price)?;
        ensure_non_negative("length", self.length)?;
        ensure_non_negative("weight", self.weight)?;
        ensure_non_negative("quantity", self.quantity)?;
        Ok(())
    }
}
