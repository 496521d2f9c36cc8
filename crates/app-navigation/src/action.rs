//! Navigation actions as data
//!
//! Screens describe their buttons with a [`NavAction`]; the navigator
//! executes it.

use serde::{Deserialize, Serialize};

use crate::route::Route;
use crate::tabs::Tab;

/// A navigation primitive that can be stored and dispatched later
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum NavAction {
    /// Push a route onto the active stack
    Push {
        /// Target route
        route: Route,
    },
    /// Replace the top of the active stack
    Replace {
        /// Target route
        route: Route,
    },
    /// Go back one step
    Back,
    /// Switch tabs
    SwitchTab {
        /// Target tab
        tab: Tab,
        /// Route used when the tab has no saved history
        #[serde(rename = "defaultRoute")]
        default_route: Route,
    },
}

impl NavAction {
    /// Push shorthand
    pub fn push(route: impl Into<Route>) -> Self {
        NavAction::Push {
            route: route.into(),
        }
    }

    /// Replace shorthand
    pub fn replace(route: impl Into<Route>) -> Self {
        NavAction::Replace {
            route: route.into(),
        }
    }

    /// Switch-tab shorthand using the tab's root as default
    pub fn switch_tab(tab: Tab) -> Self {
        NavAction::SwitchTab {
            tab,
            default_route: tab.root_route(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_serialization() {
        let action = NavAction::push("/vault-word?id=42");
        let json = serde_json::to_string(&action).unwrap();
        assert!(json.contains("\"action\":\"push\""));

        let parsed: NavAction = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, action);
    }

    #[test]
    fn test_switch_tab_shorthand() {
        match NavAction::switch_tab(Tab::Quiz) {
            NavAction::SwitchTab { tab, default_route } => {
                assert_eq!(tab, Tab::Quiz);
                assert_eq!(default_route.path(), "/quiz");
            }
            other => panic!("unexpected action: {:?}", other),
        }
    }
}
