//! Script-related components

use serde::{Deserialize, Serialize};

/// Tags an entity with a managed script class.
///
/// The class is resolved by the [`ScriptEngine`](super::ScriptEngine) when the
/// entity is instantiated; `initialized` flips once that has happened.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub struct ScriptComponent {
    /// Script class name (e.g., "PlayerController")
    pub class_name: String,
    /// Set by the script engine after instantiation
    #[serde(skip)]
    pub initialized: bool,
}

impl ScriptComponent {
    pub fn new(class_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            initialized: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_component_new() {
        let script = ScriptComponent::new("PlayerController");
        assert_eq!(script.class_name, "PlayerController");
        assert!(!script.initialized);
    }

    #[test]
    fn test_initialized_flag_not_serialized() {
        let mut script = ScriptComponent::new("PlayerController");
        script.initialized = true;

        let json = serde_json::to_string(&script).unwrap();
        assert_eq!(json, r#"{"class_name":"PlayerController"}"#);

        let restored: ScriptComponent = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.class_name, "PlayerController");
        assert!(!restored.initialized);
    }
}
