//! Application state for the roster engine API.

use std::sync::Arc;

use crate::config::ConfigLoader;

/// Shared application state.
///
/// Holds the team rule records loaded at startup. Handlers never mutate it.
#[derive(Clone)]
pub struct AppState {
    /// The loaded team rules.
    config: Arc<ConfigLoader>,
}

impl AppState {
    /// Creates a new application state with the given configuration loader.
    pub fn new(config: ConfigLoader) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_shares_loaded_teams() {
        let state = AppState::new(ConfigLoader::load("./config/teams").unwrap());
        let cloned = state.clone();

        assert!(cloned.config().rules_for("platform-ops").is_ok());
        assert_eq!(state.config().team_ids().count(), 2);
    }
}
