//! Script engine context
//!
//! The managed runtime is not wired in yet. The engine tracks lifecycle state,
//! loaded assemblies and which entities have been instantiated so the rest of
//! the engine can call through a stable boundary.

use super::ScriptError;
use crate::core::scene::{Entity, EntityId};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info, trace, warn};

/// Script engine context.
///
/// Created and torn down by the host and handed to the scene each frame.
#[derive(Debug, Default)]
pub struct ScriptEngine {
    initialized: bool,
    assemblies: Vec<PathBuf>,
    /// Entity id to the script class it was instantiated with
    entity_scripts: HashMap<EntityId, String>,
    update_calls: u64,
}

impl ScriptEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bring up the runtime. Calling it twice is harmless.
    pub fn init(&mut self) {
        if self.initialized {
            debug!("Script engine already initialized");
            return;
        }
        self.initialized = true;
        info!("Script engine initialized");
    }

    /// Drop every loaded assembly and instantiated entity
    pub fn shutdown(&mut self) {
        if !self.initialized {
            return;
        }
        info!(
            assemblies = self.assemblies.len(),
            entities = self.entity_scripts.len(),
            update_calls = self.update_calls,
            "Script engine shut down"
        );
        self.assemblies.clear();
        self.entity_scripts.clear();
        self.update_calls = 0;
        self.initialized = false;
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Register a script assembly. The file must exist; its contents are not inspected.
    pub fn load_assembly(&mut self, path: impl AsRef<Path>) -> Result<(), ScriptError> {
        if !self.initialized {
            return Err(ScriptError::NotInitialized);
        }

        let path = path.as_ref();
        if !path.is_file() {
            return Err(ScriptError::AssemblyNotFound(path.to_path_buf()));
        }

        if self.assemblies.iter().any(|p| p == path) {
            debug!(path = %path.display(), "Assembly already loaded");
            return Ok(());
        }

        info!(path = %path.display(), "Loaded script assembly");
        self.assemblies.push(path.to_path_buf());
        Ok(())
    }

    pub fn assemblies(&self) -> &[PathBuf] {
        &self.assemblies
    }

    /// Bind an entity's script tag to the runtime and mark it initialized.
    ///
    /// Entities without a script tag are ignored. Returns whether the entity
    /// is now registered.
    pub fn instantiate_entity(&mut self, entity: &mut Entity) -> bool {
        let id = entity.id();
        let Some(script) = entity.script_mut() else {
            return false;
        };

        if !self.initialized {
            warn!(entity = %id, "Script engine not initialized, skipping instantiation");
            return false;
        }

        debug!(entity = %id, class = %script.class_name, "Instantiating script");
        self.entity_scripts.insert(id, script.class_name.clone());
        script.initialized = true;
        true
    }

    /// Forget an entity, e.g. after it has been destroyed
    pub fn release_entity(&mut self, id: EntityId) -> bool {
        self.entity_scripts.remove(&id).is_some()
    }

    /// Per-frame update hook for a single entity.
    ///
    /// Only entities previously passed to [`instantiate_entity`](Self::instantiate_entity)
    /// are dispatched; everything else is a no-op.
    pub fn on_update_entity(&mut self, entity: &Entity, delta_time: f32) {
        let Some(class_name) = self.entity_scripts.get(&entity.id()) else {
            return;
        };
        trace!(entity = %entity.id(), class = %class_name, delta_time, "Script update");
        self.update_calls += 1;
    }

    pub fn is_registered(&self, id: EntityId) -> bool {
        self.entity_scripts.contains_key(&id)
    }

    pub fn registered_count(&self) -> usize {
        self.entity_scripts.len()
    }

    /// Number of dispatched entity updates since init
    pub fn update_calls(&self) -> u64 {
        self.update_calls
    }
}

impl Drop for ScriptEngine {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::scene::Scene;
    use std::io::Write;

    #[test]
    fn test_init_and_shutdown() {
        let mut engine = ScriptEngine::new();
        assert!(!engine.is_initialized());

        engine.init();
        engine.init();
        assert!(engine.is_initialized());

        engine.shutdown();
        assert!(!engine.is_initialized());
        assert_eq!(engine.registered_count(), 0);
    }

    #[test]
    fn test_load_assembly_requires_init() {
        let mut engine = ScriptEngine::new();
        let result = engine.load_assembly("Scripts.dll");
        assert!(matches!(result, Err(ScriptError::NotInitialized)));
    }

    #[test]
    fn test_load_missing_assembly() {
        let mut engine = ScriptEngine::new();
        engine.init();
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.dll");

        match engine.load_assembly(&missing) {
            Err(ScriptError::AssemblyNotFound(path)) => assert_eq!(path, missing),
            other => panic!("unexpected result: {other:?}"),
        }
        assert!(engine.assemblies().is_empty());
    }

    #[test]
    fn test_load_assembly_once() {
        let mut engine = ScriptEngine::new();
        engine.init();

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"assembly").unwrap();

        engine.load_assembly(file.path()).unwrap();
        engine.load_assembly(file.path()).unwrap();
        assert_eq!(engine.assemblies().len(), 1);
    }

    #[test]
    fn test_instantiate_marks_script_initialized() {
        let mut scene = Scene::new();
        let player = scene.create_entity("Player");
        let plain = scene.create_entity("Plain");
        scene.get_mut(player).unwrap().add_script("PlayerController");

        let mut engine = ScriptEngine::new();
        engine.init();

        assert!(engine.instantiate_entity(scene.get_mut(player).unwrap()));
        assert!(!engine.instantiate_entity(scene.get_mut(plain).unwrap()));

        assert!(scene.get(player).unwrap().script().unwrap().initialized);
        assert!(engine.is_registered(player));
        assert!(!engine.is_registered(plain));
    }

    #[test]
    fn test_update_only_dispatches_registered_entities() {
        let mut scene = Scene::new();
        let tagged = scene.create_entity("Tagged");
        scene.get_mut(tagged).unwrap().add_script("PlayerController");

        let mut engine = ScriptEngine::new();
        engine.init();

        // Tagged but never instantiated
        engine.on_update_entity(scene.get(tagged).unwrap(), 0.016);
        assert_eq!(engine.update_calls(), 0);

        engine.instantiate_entity(scene.get_mut(tagged).unwrap());
        engine.on_update_entity(scene.get(tagged).unwrap(), 0.016);
        assert_eq!(engine.update_calls(), 1);

        assert!(engine.release_entity(tagged));
        engine.on_update_entity(scene.get(tagged).unwrap(), 0.016);
        assert_eq!(engine.update_calls(), 1);
    }
}
