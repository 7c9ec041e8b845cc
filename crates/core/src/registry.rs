//! Per-module registry of declared compilation targets.

use crate::target::Target;
use std::collections::HashMap;

/// Registry of which targets each module declares.
///
/// Populated during the configuration phase while the manifest is converted
/// into a [`crate::Project`]; read-only afterwards. Registration is
/// idempotent and preserves first-declaration order per module.
#[derive(Debug, Clone, Default)]
pub struct TargetRegistry {
    targets: HashMap<String, Vec<Target>>,
}

impl TargetRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a target for a module. Idempotent.
    pub fn register(&mut self, module: &str, target: Target) {
        let entry = self.targets.entry(module.to_string()).or_default();
        if !entry.iter().any(|existing| existing.id == target.id) {
            entry.push(target);
        }
    }

    /// Check whether a module declares the given target identifier.
    #[must_use]
    pub fn has_target(&self, module: &str, target_id: &str) -> bool {
        self.targets
            .get(module)
            .is_some_and(|targets| targets.iter().any(|target| target.id == target_id))
    }

    /// Get the targets a module declares, in declaration order.
    ///
    /// Unknown modules yield an empty slice.
    #[must_use]
    pub fn targets_of(&self, module: &str) -> &[Target] {
        self.targets.get(module).map_or(&[], Vec::as_slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_query() {
        let mut registry = TargetRegistry::new();
        registry.register("producer", Target::new("jvm"));
        registry.register("producer", Target::new("linuxX64"));

        assert!(registry.has_target("producer", "jvm"));
        assert!(registry.has_target("producer", "linuxX64"));
        assert!(!registry.has_target("producer", "js"));
        assert!(!registry.has_target("consumer", "jvm"));
    }

    #[test]
    fn test_register_is_idempotent() {
        let mut registry = TargetRegistry::new();
        registry.register("producer", Target::new("jvm"));
        registry.register("producer", Target::new("jvm"));

        assert_eq!(registry.targets_of("producer").len(), 1);
    }

    #[test]
    fn test_targets_of_preserves_declaration_order() {
        let mut registry = TargetRegistry::new();
        registry.register("consumer", Target::new("jvm"));
        registry.register("consumer", Target::new("linuxX64"));
        registry.register("consumer", Target::new("js"));

        let ids: Vec<&str> = registry
            .targets_of("consumer")
            .iter()
            .map(|target| target.id.as_str())
            .collect();
        assert_eq!(ids, vec!["jvm", "linuxX64", "js"]);
    }

    #[test]
    fn test_targets_of_unknown_module() {
        let registry = TargetRegistry::new();
        assert!(registry.targets_of("ghost").is_empty());
    }
}
