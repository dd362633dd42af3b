use serde::{Deserialize, Deserializer, Serialize};

use atelier_catalog::{ComponentKind, PricedComponent};
use atelier_core::{DomainResult, ensure_non_negative, lenient_f64};

/// One cart entry / order line.
///
/// Any subset of the four component slots may be empty. Each multiplier is
/// paired with one slot: `length` (m) with `item`, `weight` (kg) with
/// `material`, `quantity` (pcs) with `case`. Services are flat.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    #[serde(default, deserialize_with = "lenient_component", skip_serializing_if = "Option::is_none")]
    pub item: Option<PricedComponent>,
    #[serde(default, deserialize_with = "lenient_f64", skip_serializing_if = "Option::is_none")]
    pub length: Option<f64>,

    #[serde(default, deserialize_with = "lenient_component", skip_serializing_if = "Option::is_none")]
    pub material: Option<PricedComponent>,
    #[serde(default, deserialize_with = "lenient_f64", skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,

    #[serde(default, deserialize_with = "lenient_component", skip_serializing_if = "Option::is_none")]
    pub case: Option<PricedComponent>,
    #[serde(default, deserialize_with = "lenient_f64", skip_serializing_if = "Option::is_none")]
    pub quantity: Option<f64>,

    #[serde(default, deserialize_with = "lenient_component", skip_serializing_if = "Option::is_none")]
    pub service: Option<PricedComponent>,
}

impl LineItem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_item(mut self, item: PricedComponent, length: f64) -> Self {
        self.item = Some(item);
        self.length = Some(length);
        self
    }

    pub fn with_material(mut self, material: PricedComponent, weight: f64) -> Self {
        self.material = Some(material);
        self.weight = Some(weight);
        self
    }

    pub fn with_case(mut self, case: PricedComponent, quantity: f64) -> Self {
        self.case = Some(case);
        self.quantity = Some(quantity);
        self
    }

    pub fn with_service(mut self, service: PricedComponent) -> Self {
        self.service = Some(service);
        self
    }

    /// Component in the given slot, if present.
    pub fn component(&self, kind: ComponentKind) -> Option<&PricedComponent> {
        match kind {
            ComponentKind::Item => self.item.as_ref(),
            ComponentKind::Material => self.material.as_ref(),
            ComponentKind::Case => self.case.as_ref(),
            ComponentKind::Service => self.service.as_ref(),
        }
    }

    /// Multiplier paired with the slot. A missing value is the identity (1);
    /// services always multiply by 1.
    pub fn multiplier(&self, kind: ComponentKind) -> f64 {
        let raw = match kind {
            ComponentKind::Item => self.length,
            ComponentKind::Material => self.weight,
            ComponentKind::Case => self.quantity,
            ComponentKind::Service => None,
        };
        raw.unwrap_or(1.0)
    }

    pub fn is_empty(&self) -> bool {
        ComponentKind::ALL
            .iter()
            .all(|kind| self.component(*kind).is_none())
    }

    /// Every present price and every multiplier of a present slot must be a
    /// finite, non-negative number.
    pub fn validate(&self) -> DomainResult<()> {
        for kind in ComponentKind::ALL {
            let Some(component) = self.component(kind) else {
                continue;
            };
            component.validate()?;
            if let Some(unit) = kind.unit() {
                ensure_non_negative(
                    &format!("{kind} multiplier ({unit})"),
                    self.multiplier(kind),
                )?;
            }
        }
        Ok(())
    }
}

/// Component slots sometimes hold an empty string or a bare key instead of an
/// embedded record; anything that is not a component object reads as absent.
fn lenient_component<'de, D>(deserializer: D) -> Result<Option<PricedComponent>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    if !value.is_object() {
        return Ok(None);
    }
    Ok(serde_json::from_value(value).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use atelier_core::DomainError;

    #[test]
    fn decodes_recorded_line() {
        let json = r#"{
            "item": {"_id": "i1", "name": "Velvet", "price": 1200},
            "length": "2",
            "material": null,
            "weight": 1,
            "case": "",
            "quantity": 1,
            "service": {"name": "Sewing", "price": 500}
        }"#;
        let line: LineItem = serde_json::from_str(json).unwrap();
        assert_eq!(line.item.as_ref().map(|c| c.price()), Some(1200.0));
        assert_eq!(line.length, Some(2.0));
        assert!(line.material.is_none());
        assert!(line.case.is_none());
        assert_eq!(line.service.as_ref().map(|c| c.name.as_str()), Some("Sewing"));
    }

    #[test]
    fn missing_multiplier_is_identity() {
        let line = LineItem {
            case: Some(PricedComponent::new("Zip case", 300.0)),
            ..LineItem::default()
        };
        assert_eq!(line.multiplier(ComponentKind::Case), 1.0);
        assert_eq!(line.multiplier(ComponentKind::Service), 1.0);
    }

    #[test]
    fn empty_line_has_no_components() {
        assert!(LineItem::new().is_empty());
        assert!(!LineItem::new()
            .with_service(PricedComponent::new("Sewing", 500.0))
            .is_empty());
    }

    #[test]
    fn negative_multiplier_on_present_slot_is_rejected() {
        let line = LineItem::new().with_material(PricedComponent::new("Down", 800.0), -1.0);
        assert!(matches!(line.validate(), Err(DomainError::InvalidInput(_))));
    }

    #[test]
    fn multiplier_of_absent_slot_is_ignored() {
        let line = LineItem {
            weight: Some(-3.0),
            ..LineItem::default()
        };
        assert!(line.validate().is_ok());
    }

    #[test]
    fn infinite_multiplier_is_rejected() {
        let line = LineItem::new().with_item(PricedComponent::new("Velvet", 1.0), f64::INFINITY);
        assert!(matches!(line.validate(), Err(DomainError::InvalidInput(_))));
    }
}
