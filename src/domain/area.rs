//! Parking area entity and process-wide registry

/// A named parking location with a fixed slot capacity.
///
/// Areas are configured at process start and never change afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Area {
    /// Stable identifier used in URLs (e.g. `mg_road`)
    pub id: String,
    /// Display name; bookings reference areas by this name (loose FK)
    pub name: String,
    /// Total physical slots in the area
    pub total_slots: u32,
    /// Geocoordinate for map rendering
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

/// Immutable registry of all configured areas.
///
/// Built once from configuration and shared via `Arc`; lookups by
/// id (URL path) or by name (booking rows) are the only operations.
#[derive(Debug, Default)]
pub struct AreaRegistry {
    areas: Vec<Area>,
}

impl AreaRegistry {
    pub fn new(areas: Vec<Area>) -> Self {
        Self { areas }
    }

    pub fn by_id(&self, id: &str) -> Option<&Area> {
        self.areas.iter().find(|a| a.id == id)
    }

    pub fn by_name(&self, name: &str) -> Option<&Area> {
        self.areas.iter().find(|a| a.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Area> {
        self.areas.iter()
    }

    pub fn len(&self) -> usize {
        self.areas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.areas.is_empty()
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_registry() -> AreaRegistry {
        AreaRegistry::new(vec![
            Area {
                id: "kr_circle".into(),
                name: "KR Circle".into(),
                total_slots: 100,
                lat: Some(12.9740),
                lng: Some(77.5732),
            },
            Area {
                id: "mg_road".into(),
                name: "MG Road".into(),
                total_slots: 150,
                lat: None,
                lng: None,
            },
        ])
    }

    #[test]
    fn lookup_by_id() {
        let reg = sample_registry();
        assert_eq!(reg.by_id("mg_road").unwrap().name, "MG Road");
        assert!(reg.by_id("unknown").is_none());
    }

    #[test]
    fn lookup_by_name() {
        let reg = sample_registry();
        assert_eq!(reg.by_name("KR Circle").unwrap().id, "kr_circle");
        assert!(reg.by_name("kr_circle").is_none()); // names, not ids
    }

    #[test]
    fn iteration_preserves_order() {
        let reg = sample_registry();
        let ids: Vec<_> = reg.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["kr_circle", "mg_road"]);
    }
}
