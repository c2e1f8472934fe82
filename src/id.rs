use gpui::{ElementId, SharedString};

/// Identity of one mounted field. Uncontrolled state in the control registry
/// is keyed by this value, so it must stay stable across re-renders of the
/// same call site.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct ComponentId {
    value: SharedString,
}

impl ComponentId {
    pub fn new(value: impl Into<SharedString>) -> Self {
        Self {
            value: value.into(),
        }
    }

    #[track_caller]
    pub fn auto(prefix: &str) -> Self {
        Self::new(stable_auto_id(prefix))
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Element id for a named sub-region of this component.
    pub fn slot(&self, name: &str) -> ElementId {
        ElementId::Name(SharedString::from(format!("{}::{name}", self.value)))
    }
}

impl std::fmt::Display for ComponentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.value)
    }
}

impl From<&str> for ComponentId {
    fn from(value: &str) -> Self {
        Self::new(value.to_string())
    }
}

impl From<String> for ComponentId {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<ComponentId> for ElementId {
    fn from(id: ComponentId) -> Self {
        ElementId::Name(id.value)
    }
}

#[track_caller]
pub fn stable_auto_id(prefix: &str) -> String {
    let location = std::panic::Location::caller();
    let seed = format!(
        "{prefix}:{}:{}:{}",
        location.file(),
        location.line(),
        location.column()
    );
    format!("{prefix}-{:016x}", fnv1a64(seed.as_bytes()))
}

fn fnv1a64(bytes: &[u8]) -> u64 {
    const OFFSET_BASIS: u64 = 0xcbf29ce484222325;
    const PRIME: u64 = 0x00000100000001b3;

    let mut hash = OFFSET_BASIS;
    for byte in bytes {
        hash ^= u64::from(*byte);
        hash = hash.wrapping_mul(PRIME);
    }
    hash
}

#[cfg(test)]
mod tests {
    use super::*;

    #[track_caller]
    fn call_once() -> String {
        stable_auto_id("field")
    }

    #[test]
    fn id_is_stable_for_same_callsite() {
        let ids = (0..3).map(|_| call_once()).collect::<Vec<_>>();
        assert!(ids.windows(2).all(|pair| pair[0] == pair[1]));
    }

    #[test]
    fn id_differs_for_different_callsites() {
        let first = call_once();
        let second = {
            // Different callsite by design.
            stable_auto_id("field")
        };
        assert_ne!(first, second);
    }

    #[test]
    fn slot_ids_are_namespaced_under_the_component() {
        let id = ComponentId::new("login-password");
        let slot = id.slot("toggle");
        assert_eq!(
            slot,
            ElementId::Name(SharedString::from("login-password::toggle"))
        );
    }
}
