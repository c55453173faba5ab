use serde::{Deserialize, Serialize};

use phoneframe_navigation::{InputResolver, Location};

use crate::Result;

/// One-click navigation target shown above the phone frame
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuickLink {
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub icon: String,
}

impl QuickLink {
    pub fn new(name: &str, url: &str, icon: &str) -> Self {
        Self {
            name: name.to_string(),
            url: url.to_string(),
            icon: icon.to_string(),
        }
    }

    /// Location this link navigates to
    pub fn resolve(&self, resolver: &InputResolver) -> Result<Location> {
        Ok(resolver.resolve(&self.url)?)
    }

    /// Name trimmed, or the link's host label if the name is blank
    pub fn display_name(&self) -> String {
        let name = self.name.trim();
        if !name.is_empty() {
            return name.to_string();
        }

        InputResolver::new()
            .resolve(&self.url)
            .map(|location| location.label)
            .unwrap_or_else(|_| self.url.clone())
    }
}

pub fn default_quick_links() -> Vec<QuickLink> {
    vec![
        QuickLink::new("Wikipedia", "https://www.wikipedia.org", "📚"),
        QuickLink::new("Google", "https://www.google.com", "🔍"),
        QuickLink::new("YouTube", "https://m.youtube.com", "▶️"),
        QuickLink::new("GitHub", "https://github.com", "🐙"),
        QuickLink::new("Hacker News", "https://news.ycombinator.com", "📰"),
        QuickLink::new("Rust", "https://www.rust-lang.org", "🦀"),
    ]
}
