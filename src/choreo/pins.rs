use dashmap::DashMap;
use serde::{Deserialize, Serialize};

use super::ChoreoError;

/// The measured scroll bounds of a pinned section, in document pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriggerRegion {
    pub id: String,
    pub start: f64,
    pub end: f64,
}

impl TriggerRegion {
    pub fn len(&self) -> f64 {
        self.end - self.start
    }
}

/// Pin id -> measured region, scoped to one page session.
///
/// Sections that own a pin write their entry once their layout is measured
/// and overwrite it on every remeasure. Readers must cope with the entry not
/// existing yet and retry when told the registry changed.
#[derive(Debug, Default)]
pub struct PinRegistry {
    regions: DashMap<String, TriggerRegion>,
}

impl PinRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the region for `id`.
    pub fn register(&self, id: impl Into<String>, start: f64, end: f64) {
        let id = id.into();
        log::debug!("pin {id} measured at {start}..{end}");
        self.regions
            .insert(id.clone(), TriggerRegion { id, start, end });
    }

    pub fn lookup(&self, id: &str) -> Result<TriggerRegion, ChoreoError> {
        self.regions
            .get(id)
            .map(|r| r.clone())
            .ok_or_else(|| ChoreoError::PinNotReady(id.to_string()))
    }

    pub fn remove(&self, id: &str) -> Option<TriggerRegion> {
        self.regions.remove(id).map(|(_, r)| r)
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_before_register() {
        let pins = PinRegistry::new();
        assert_eq!(
            pins.lookup("aboutPin"),
            Err(ChoreoError::PinNotReady("aboutPin".to_string()))
        );
    }

    #[test]
    fn test_register_then_lookup() {
        let pins = PinRegistry::new();
        pins.register("aboutPin", 1000.0, 3000.0);
        let region = pins.lookup("aboutPin").unwrap();
        assert_eq!(region.start, 1000.0);
        assert_eq!(region.end, 3000.0);
        assert_eq!(region.len(), 2000.0);
    }

    #[test]
    fn test_remeasure_replaces() {
        let pins = PinRegistry::new();
        pins.register("aboutPin", 1000.0, 3000.0);
        pins.register("aboutPin", 1200.0, 2800.0);
        assert_eq!(pins.len(), 1);
        assert_eq!(
            pins.lookup("aboutPin").unwrap(),
            TriggerRegion {
                id: "aboutPin".to_string(),
                start: 1200.0,
                end: 2800.0
            }
        );
    }

    #[test]
    fn test_remove() {
        let pins = PinRegistry::new();
        pins.register("a", 0.0, 10.0);
        pins.register("b", 5.0, 10.0);
        assert!(pins.remove("a").is_some());
        assert!(pins.remove("a").is_none());
        assert!(pins.lookup("a").is_err());
        assert!(pins.lookup("b").is_ok());
    }
}
