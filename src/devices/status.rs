//! Ordered on/off status map produced by the rule pipeline.

use super::registry::DeviceRegistry;

/// Synthetic climate actuator for heating.
pub const HEATING: &str = "Heating";
/// Synthetic climate actuator for cooling.
pub const COOLING: &str = "Cooling";

/// Device name → on/off map with insertion order preserved.
///
/// Built once per evaluation by [`DeviceStatusMap::initial`], so every
/// registry device and both climate actuators are always present. Lookups
/// never fall back to a default value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceStatusMap {
    entries: Vec<(String, bool)>,
}

impl DeviceStatusMap {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the starting map: every registry device on, then `Heating` and
    /// `Cooling` off unless the registry already names them.
    pub fn initial(registry: &DeviceRegistry) -> Self {
        let mut map = Self {
            entries: registry.names().map(|n| (n.to_string(), true)).collect(),
        };
        map.insert_if_absent(HEATING, false);
        map.insert_if_absent(COOLING, false);
        map
    }

    /// Returns the status of `name`, or `None` if absent.
    pub fn get(&self, name: &str) -> Option<bool> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|&(_, on)| on)
    }

    /// Returns `true` only if `name` is present and on.
    pub fn is_on(&self, name: &str) -> bool {
        self.get(name) == Some(true)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(n, _)| n == name)
    }

    /// Sets the status of `name`, appending it if absent.
    pub fn set(&mut self, name: &str, on: bool) {
        if let Some(slot) = self.entries.iter_mut().find(|(n, _)| n == name) {
            slot.1 = on;
        } else {
            self.entries.push((name.to_string(), on));
        }
    }

    /// Appends `name` with `on` only if it is not already present.
    pub fn insert_if_absent(&mut self, name: &str, on: bool) {
        if !self.contains(name) {
            self.entries.push((name.to_string(), on));
        }
    }

    /// Iterates `(name, on)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.entries.iter().map(|(n, on)| (n.as_str(), *on))
    }

    /// Number of devices currently on.
    pub fn count_on(&self) -> usize {
        self.entries.iter().filter(|(_, on)| *on).count()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
