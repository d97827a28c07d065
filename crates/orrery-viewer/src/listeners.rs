//! Window-level listeners owned by the current scene.
//!
//! Window events reach the scene only while the matching listener is
//! registered. Building a scene registers them; tearing it down clears them.

/// A window event the scene reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Listener {
    /// Window resize: updates the camera aspect ratio.
    Resize,
    /// Completed pointer click: picking and overlay dismissal.
    Click,
}

#[derive(Debug, Default)]
pub struct ListenerRegistry {
    active: Vec<Listener>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` if `listener` was already registered.
    pub fn register(&mut self, listener: Listener) -> bool {
        if self.active.contains(&listener) {
            return false;
        }
        self.active.push(listener);
        true
    }

    pub fn is_listening(&self, listener: Listener) -> bool {
        self.active.contains(&listener)
    }

    /// Remove every listener; returns how many were registered.
    pub fn clear(&mut self) -> usize {
        let count = self.active.len();
        self.active.clear();
        count
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_query() {
        let mut registry = ListenerRegistry::new();
        assert!(registry.register(Listener::Resize));
        assert!(registry.is_listening(Listener::Resize));
        assert!(!registry.is_listening(Listener::Click));
    }

    #[test]
    fn test_double_register_ignored() {
        let mut registry = ListenerRegistry::new();
        assert!(registry.register(Listener::Click));
        assert!(!registry.register(Listener::Click));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_clear_removes_all() {
        let mut registry = ListenerRegistry::new();
        registry.register(Listener::Resize);
        registry.register(Listener::Click);
        assert_eq!(registry.clear(), 2);
        assert!(!registry.is_listening(Listener::Resize));
        assert!(!registry.is_listening(Listener::Click));
        assert!(registry.is_empty());
    }
}
