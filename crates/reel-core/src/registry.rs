//! # Scene Registry
//!
//! Named compositions available for rendering. Ids are unique and every
//! registered scene carries valid metadata.

use crate::error::{ConfigError, Result};
use crate::scene::Scene;
use crate::types::CompositionMeta;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Compositions keyed by id, listed in registration order.
#[derive(Default)]
pub struct SceneRegistry {
    scenes: Vec<Arc<dyn Scene>>,
    index: HashMap<String, usize>,
}

impl SceneRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, scene: Arc<dyn Scene>) -> Result<()> {
        let meta = scene.meta();
        meta.validate()?;
        if self.index.contains_key(&meta.id) {
            return Err(ConfigError::DuplicateScene(meta.id.clone()));
        }

        debug!(
            id = %meta.id,
            width = meta.width,
            height = meta.height,
            fps = meta.fps,
            frames = meta.duration_in_frames,
            "registered composition"
        );
        self.index.insert(meta.id.clone(), self.scenes.len());
        self.scenes.push(scene);
        Ok(())
    }

    /// Builder-style `register`.
    pub fn with(mut self, scene: Arc<dyn Scene>) -> Result<Self> {
        self.register(scene)?;
        Ok(self)
    }

    pub fn get(&self, id: &str) -> Result<Arc<dyn Scene>> {
        self.index
            .get(id)
            .map(|&i| Arc::clone(&self.scenes[i]))
            .ok_or_else(|| ConfigError::UnknownScene(id.to_string()))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Metadata of every composition, in registration order.
    pub fn list(&self) -> Vec<&CompositionMeta> {
        self.scenes.iter().map(|s| s.meta()).collect()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.scenes.iter().map(|s| s.meta().id.as_str())
    }

    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::VisualTree;
    use crate::types::Frame;

    struct Blank(CompositionMeta);

    impl Scene for Blank {
        fn meta(&self) -> &CompositionMeta {
            &self.0
        }

        fn render(&self, _frame: Frame) -> VisualTree {
            VisualTree::new(self.0.width, self.0.height)
        }
    }

    fn blank(id: &str, frames: u32) -> Arc<dyn Scene> {
        Arc::new(Blank(CompositionMeta {
            id: id.into(),
            width: 1080,
            height: 1920,
            fps: 30,
            duration_in_frames: frames,
        }))
    }

    #[test]
    fn lists_in_registration_order() {
        let registry = SceneRegistry::new()
            .with(blank("Scene3-ExamCards", 120))
            .and_then(|r| r.with(blank("Scene4-BrandOutro", 300)))
            .unwrap();

        let ids: Vec<&str> = registry.ids().collect();
        assert_eq!(ids, vec!["Scene3-ExamCards", "Scene4-BrandOutro"]);
        assert_eq!(registry.list()[1].duration_in_frames, 300);
        assert_eq!(registry.get("Scene4-BrandOutro").unwrap().meta().id, "Scene4-BrandOutro");
    }

    #[test]
    fn rejects_duplicates_and_unknown_ids() {
        let mut registry = SceneRegistry::new();
        registry.register(blank("intro", 30)).unwrap();
        assert_eq!(
            registry.register(blank("intro", 60)).unwrap_err(),
            ConfigError::DuplicateScene("intro".into())
        );
        assert_eq!(registry.len(), 1);
        assert!(matches!(registry.get("outro"), Err(ConfigError::UnknownScene(id)) if id == "outro"));
    }

    #[test]
    fn rejects_invalid_metadata() {
        let mut registry = SceneRegistry::new();
        assert!(registry.register(blank("empty", 0)).is_err());
        assert!(registry.is_empty());
    }
}
