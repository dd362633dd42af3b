use serde::{Deserialize, Serialize};

use atelier_core::{ComponentId, DomainResult, ensure_non_negative, lenient_f64, or_zero};

/// The four kinds of priced component a line item can reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentKind {
    /// Fabric sold by length.
    Item,
    /// Filling sold by weight.
    Material,
    /// Covers sold per piece.
    Case,
    /// Flat-priced work.
    Service,
}

impl ComponentKind {
    pub const ALL: [ComponentKind; 4] = [
        ComponentKind::Item,
        ComponentKind::Material,
        ComponentKind::Case,
        ComponentKind::Service,
    ];

    /// Collection path on the remote API.
    pub fn endpoint(&self) -> &'static str {
        match self {
            ComponentKind::Item => "item",
            ComponentKind::Material => "material",
            ComponentKind::Case => "case",
            ComponentKind::Service => "service",
        }
    }

    /// Unit of the paired multiplier; services have none.
    pub fn unit(&self) -> Option<&'static str> {
        match self {
            ComponentKind::Item => Some("m"),
            ComponentKind::Material => Some("kg"),
            ComponentKind::Case => Some("pcs"),
            ComponentKind::Service => None,
        }
    }
}

impl core::fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.endpoint())
    }
}

impl core::str::FromStr for ComponentKind {
    type Err = atelier_core::DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "item" => Ok(ComponentKind::Item),
            "material" => Ok(ComponentKind::Material),
            "case" => Ok(ComponentKind::Case),
            "service" => Ok(ComponentKind::Service),
            other => Err(atelier_core::DomainError::validation(format!(
                "unknown component kind '{other}'"
            ))),
        }
    }
}

/// A catalog entry with a name and unit price.
///
/// Line items carry a copy of the component as it was when the sale was
/// recorded, so `price` here is a snapshot, not a live link.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricedComponent {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ComponentId>,
    /// Collection the record was fetched from. Not part of the stored record.
    #[serde(skip)]
    pub kind: Option<ComponentKind>,
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_f64", skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
}

impl PricedComponent {
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Self {
            id: None,
            kind: None,
            name: name.into(),
            price: Some(price),
        }
    }

    pub fn with_id(mut self, id: ComponentId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_kind(mut self, kind: ComponentKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Price with the zero-fallback applied.
    pub fn price(&self) -> f64 {
        or_zero(self.price)
    }

    /// Reject prices that are negative, NaN or infinite.
    pub fn validate(&self) -> DomainResult<()> {
        if let Some(price) = self.price {
            ensure_non_negative(&format!("price of '{}'", self.name), price)?;
        }
        Ok(())
    }
}

/// Read-only snapshot of the four component collections.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    pub items: Vec<PricedComponent>,
    pub materials: Vec<PricedComponent>,
    pub cases: Vec<PricedComponent>,
    pub services: Vec<PricedComponent>,
}

impl Catalog {
    pub fn by_kind(&self, kind: ComponentKind) -> &[PricedComponent] {
        match kind {
            ComponentKind::Item => &self.items,
            ComponentKind::Material => &self.materials,
            ComponentKind::Case => &self.cases,
            ComponentKind::Service => &self.services,
        }
    }

    pub fn set_kind(&mut self, kind: ComponentKind, components: Vec<PricedComponent>) {
        match kind {
            ComponentKind::Item => self.items = components,
            ComponentKind::Material => self.materials = components,
            ComponentKind::Case => self.cases = components,
            ComponentKind::Service => self.services = components,
        }
    }

    pub fn find(&self, kind: ComponentKind, id: &ComponentId) -> Option<&PricedComponent> {
        self.by_kind(kind)
            .iter()
            .find(|c| c.id.as_ref() == Some(id))
    }

    pub fn len(&self) -> usize {
        ComponentKind::ALL.iter().map(|k| self.by_kind(*k).len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atelier_core::DomainError;

    #[test]
    fn decodes_store_record() {
        let json = r#"{"_id":"64f0","name":"Velvet","price":"1200","__v":0}"#;
        let c: PricedComponent = serde_json::from_str(json).unwrap();
        assert_eq!(c.id, Some(ComponentId::new("64f0")));
        assert_eq!(c.name, "Velvet");
        assert_eq!(c.price(), 1200.0);
        assert_eq!(c.kind, None);
    }

    #[test]
    fn kind_stays_off_the_wire() {
        let c = PricedComponent::new("Down", 800.0).with_kind(ComponentKind::Material);
        assert_eq!(c.kind, Some(ComponentKind::Material));
        let body = serde_json::to_value(&c).unwrap();
        assert!(body.get("kind").is_none());
        assert_eq!(body["name"], "Down");
    }

    #[test]
    fn missing_price_counts_as_zero() {
        let c: PricedComponent = serde_json::from_str(r#"{"name":"Ironing"}"#).unwrap();
        assert_eq!(c.price, None);
        assert_eq!(c.price(), 0.0);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn negative_price_is_invalid_input() {
        let c = PricedComponent::new("Broken", -5.0);
        assert!(matches!(c.validate(), Err(DomainError::InvalidInput(_))));
    }

    #[test]
    fn kind_round_trips_through_text() {
        for kind in ComponentKind::ALL {
            assert_eq!(kind.to_string().parse::<ComponentKind>().unwrap(), kind);
        }
        assert!("pillow".parse::<ComponentKind>().is_err());
        assert_eq!(ComponentKind::Service.unit(), None);
        assert_eq!(ComponentKind::Material.unit(), Some("kg"));
    }

    #[test]
    fn catalog_lookup_by_kind_and_id() {
        let mut catalog = Catalog::default();
        catalog.set_kind(
            ComponentKind::Case,
            vec![PricedComponent::new("Zip case", 300.0).with_id(ComponentId::new("c1"))],
        );
        assert_eq!(catalog.len(), 1);
        assert!(catalog.find(ComponentKind::Case, &ComponentId::new("c1")).is_some());
        assert!(catalog.find(ComponentKind::Item, &ComponentId::new("c1")).is_none());
    }
}
