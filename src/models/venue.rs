use serde::{Deserialize, Serialize};

/// One catalog entry as supplied by the venue sheet
///
/// Every field is optional: the sheet is edited by hand and any column may be
/// blank or missing. Placeholders are applied only when a [`Recommendation`]
/// is assembled.
///
/// [`Recommendation`]: super::Recommendation
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct VenueRecord {
    pub name: Option<String>,
    pub cuisine: Option<String>,
    pub vibe: Option<String>,
    pub aim: Option<String>,
    pub address: Option<String>,
    pub socials: Option<String>,
    pub menu: Option<String>,
    pub menu_url: Option<String>,
    pub photo: Option<String>,
}

impl VenueRecord {
    /// Creates a record with only a name set
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Name for log output
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("<unnamed>")
    }

    /// Menu text, empty when absent
    pub fn menu_text(&self) -> &str {
        self.menu.as_deref().unwrap_or_default()
    }

    /// Lowercased `vibe aim cuisine` text used for category matching
    pub fn profile_text(&self) -> String {
        format!(
            "{} {} {}",
            self.vibe.as_deref().unwrap_or_default(),
            self.aim.as_deref().unwrap_or_default(),
            self.cuisine.as_deref().unwrap_or_default()
        )
        .to_lowercase()
    }
}
