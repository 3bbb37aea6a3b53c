//! Ordered device registry mapping device names to priority tiers.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Priority of essential devices. Anything above this tier is sheddable.
pub const ESSENTIAL_PRIORITY: u32 = 1;

/// One registered device and its priority tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceEntry {
    /// Device identifier, unique within a registry.
    pub name: String,
    /// Priority tier (1 = essential, > 1 = sheddable).
    pub priority: u32,
}

impl DeviceEntry {
    /// Creates a new registry entry.
    pub fn new(name: impl Into<String>, priority: u32) -> Self {
        Self {
            name: name.into(),
            priority,
        }
    }

    /// Returns `true` if price and budget rules may turn this device off.
    pub fn is_sheddable(&self) -> bool {
        self.priority > ESSENTIAL_PRIORITY
    }
}

/// Caller-owned, ordered collection of devices.
///
/// Registration order is significant: it is the order in which the budget
/// loop scans for devices to shed, and the order of keys in the resulting
/// status map.
///
/// # Examples
///
/// ```
/// use home_ems::devices::DeviceRegistry;
///
/// let registry = DeviceRegistry::new()
///     .with("Security", 1)
///     .with("Lights", 2)
///     .with("TV", 3);
/// let names: Vec<&str> = registry.names().collect();
/// assert_eq!(names, vec!["Security", "Lights", "TV"]);
/// assert_eq!(registry.priority_of("TV"), Some(3));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<DeviceEntry>", into = "Vec<DeviceEntry>")]
pub struct DeviceRegistry {
    entries: Vec<DeviceEntry>,
}

impl DeviceRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a device, or updates its priority if the name already exists.
    ///
    /// Re-registering keeps the device at its original scan position.
    pub fn register(&mut self, name: impl Into<String>, priority: u32) {
        let name = name.into();
        if let Some(entry) = self.entries.iter_mut().find(|e| e.name == name) {
            entry.priority = priority;
        } else {
            self.entries.push(DeviceEntry { name, priority });
        }
    }

    /// Builder form of [`DeviceRegistry::register`].
    pub fn with(mut self, name: impl Into<String>, priority: u32) -> Self {
        self.register(name, priority);
        self
    }

    /// Returns the priority of `name`, if registered.
    pub fn priority_of(&self, name: &str) -> Option<u32> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .map(|e| e.priority)
    }

    /// Returns `true` if `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|e| e.name == name)
    }

    /// Iterates entries in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &DeviceEntry> {
        self.entries.iter()
    }

    /// Iterates device names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Rejects empty names and zero priorities.
    ///
    /// # Errors
    ///
    /// Returns the first offending entry in registration order.
    pub fn validate(&self) -> EngineResult<()> {
        for entry in &self.entries {
            if entry.name.is_empty() {
                return Err(EngineError::EmptyDeviceName);
            }
            if entry.priority < ESSENTIAL_PRIORITY {
                return Err(EngineError::InvalidPriority {
                    device: entry.name.clone(),
                    priority: entry.priority,
                });
            }
        }
        Ok(())
    }
}

impl<S: Into<String>> FromIterator<(S, u32)> for DeviceRegistry {
    fn from_iter<I: IntoIterator<Item = (S, u32)>>(iter: I) -> Self {
        let mut registry = Self::new();
        for (name, priority) in iter {
            registry.register(name, priority);
        }
        registry
    }
}

/// Repeated names merge into the first entry, as with
/// [`DeviceRegistry::register`].
impl From<Vec<DeviceEntry>> for DeviceRegistry {
    fn from(entries: Vec<DeviceEntry>) -> Self {
        entries.into_iter().map(|e| (e.name, e.priority)).collect()
    }
}

impl From<DeviceRegistry> for Vec<DeviceEntry> {
    fn from(registry: DeviceRegistry) -> Self {
        registry.entries
    }
}

impl<'a> IntoIterator for &'a DeviceRegistry {
    type Item = &'a DeviceEntry;
    type IntoIter = std::slice::Iter<'a, DeviceEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
