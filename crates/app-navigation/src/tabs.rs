//! Navigation tabs
//!
//! The app has a fixed set of top-level tabs, each with its own stack.
//! Every known path prefix belongs to exactly one tab; see [`tab_for_path`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::route::{path_is_under, Route};

/// Main navigation tabs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    /// Home tab
    #[default]
    Home,
    /// Saved words
    Vault,
    /// Quizzes and flashcards
    Quiz,
    /// Story exercises
    Stories,
    /// Account and settings
    Account,
}

/// Prefix table behind [`tab_for_path`]; the longest matching prefix wins
const TAB_PREFIXES: &[(&str, Tab)] = &[
    ("/vault", Tab::Vault),
    ("/vault-word", Tab::Vault),
    ("/quiz", Tab::Quiz),
    ("/flashcards", Tab::Quiz),
    ("/stories", Tab::Stories),
    ("/story", Tab::Stories),
    ("/account", Tab::Account),
    ("/signup", Tab::Account),
    ("/login", Tab::Account),
    ("/settings", Tab::Account),
    ("/paywall", Tab::Account),
];

impl Tab {
    /// Canonical root route of this tab
    pub fn root_route(&self) -> Route {
        Route::new(self.root_path())
    }

    /// Canonical root path of this tab
    pub fn root_path(&self) -> &'static str {
        match self {
            Tab::Home => "/",
            Tab::Vault => "/vault",
            Tab::Quiz => "/quiz",
            Tab::Stories => "/stories",
            Tab::Account => "/account",
        }
    }

    /// Tabs that never resume a saved history
    ///
    /// Switching to one of these always starts from its canonical root, so
    /// stale state such as a leftover `redirect` param cannot resurface.
    pub fn always_resets(&self) -> bool {
        matches!(self, Tab::Home | Tab::Account)
    }

    /// Stable key used in logs and config
    pub fn as_str(&self) -> &'static str {
        match self {
            Tab::Home => "home",
            Tab::Vault => "vault",
            Tab::Quiz => "quiz",
            Tab::Stories => "stories",
            Tab::Account => "account",
        }
    }

    /// Get icon name for this tab
    pub fn icon(&self) -> &'static str {
        match self {
            Tab::Home => "home",
            Tab::Vault => "bookmark",
            Tab::Quiz => "lightbulb",
            Tab::Stories => "book-open",
            Tab::Account => "user",
        }
    }

    /// Get label for this tab
    pub fn label(&self) -> &'static str {
        match self {
            Tab::Home => "Home",
            Tab::Vault => "Vault",
            Tab::Quiz => "Quiz",
            Tab::Stories => "Stories",
            Tab::Account => "Account",
        }
    }

    /// Get all tabs in order
    pub fn all() -> [Tab; 5] {
        [Tab::Home, Tab::Vault, Tab::Quiz, Tab::Stories, Tab::Account]
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tab::all()
            .into_iter()
            .find(|tab| tab.as_str() == s)
            .ok_or_else(|| format!("unknown tab: {}", s))
    }
}

/// Which tab a path belongs to; unmatched paths belong to home
pub fn tab_for_path(path: &str) -> Tab {
    let path = path.split_once('?').map_or(path, |(path, _)| path);

    TAB_PREFIXES
        .iter()
        .filter(|(prefix, _)| path_is_under(path, prefix))
        .max_by_key(|(prefix, _)| prefix.len())
        .map(|(_, tab)| *tab)
        .unwrap_or(Tab::Home)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_root_routes() {
        assert_eq!(Tab::Home.root_route(), Route::new("/"));
        assert_eq!(Tab::Vault.root_route().path(), "/vault");
        assert_eq!(Tab::Account.root_path(), "/account");
    }

    #[test]
    fn test_tab_for_path() {
        assert_eq!(tab_for_path("/"), Tab::Home);
        assert_eq!(tab_for_path("/vault"), Tab::Vault);
        assert_eq!(tab_for_path("/vault-word?id=42"), Tab::Vault);
        assert_eq!(tab_for_path("/quiz/learn"), Tab::Quiz);
        assert_eq!(tab_for_path("/story/7/reader"), Tab::Stories);
        assert_eq!(tab_for_path("/signup"), Tab::Account);
        assert_eq!(tab_for_path("/paywall"), Tab::Account);
    }

    #[test]
    fn test_tab_for_path_defaults_to_home() {
        assert_eq!(tab_for_path("/translate"), Tab::Home);
        assert_eq!(tab_for_path("/nowhere/at/all"), Tab::Home);
        assert_eq!(tab_for_path("/quizzical"), Tab::Home);
    }

    #[test]
    fn test_always_resets() {
        assert!(Tab::Home.always_resets());
        assert!(Tab::Account.always_resets());
        assert!(!Tab::Quiz.always_resets());
    }

    #[test]
    fn test_tab_from_str() {
        assert_eq!("stories".parse::<Tab>(), Ok(Tab::Stories));
        assert!("feed".parse::<Tab>().is_err());
    }

    #[test]
    fn test_every_prefix_maps_to_one_tab() {
        for (prefix, tab) in TAB_PREFIXES {
            assert_eq!(tab_for_path(prefix), *tab, "{}", prefix);
        }
    }
}
