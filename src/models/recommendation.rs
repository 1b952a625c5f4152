use serde::{Deserialize, Serialize};

use super::VenueRecord;

pub const NAME_PLACEHOLDER: &str = "Ресторан";
pub const ADDRESS_PLACEHOLDER: &str = "Адреса не вказана";
pub const SOCIALS_PLACEHOLDER: &str = "Соц-мережі не вказані";
pub const VIBE_PLACEHOLDER: &str = "Приємна атмосфера";
pub const AIM_PLACEHOLDER: &str = "Для будь-яких подій";
pub const CUISINE_PLACEHOLDER: &str = "Смачна кухня";

/// The venue chosen for one request, ready for presentation
///
/// Built fresh per request from a single catalog record. Absent fields carry
/// fixed placeholders; `menu`, `menu_url` and `photo` fall back to empty.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Recommendation {
    pub name: String,
    pub address: String,
    pub socials: String,
    pub vibe: String,
    pub aim: String,
    pub cuisine: String,
    pub menu: String,
    pub menu_url: String,
    pub photo: String,
}

impl Recommendation {
    /// Assembles a recommendation from a record and an already-normalized photo link
    pub fn from_record(record: &VenueRecord, photo: Option<String>) -> Self {
        fn or(value: &Option<String>, placeholder: &str) -> String {
            value.clone().unwrap_or_else(|| placeholder.to_string())
        }

        Self {
            name: or(&record.name, NAME_PLACEHOLDER),
            address: or(&record.address, ADDRESS_PLACEHOLDER),
            socials: or(&record.socials, SOCIALS_PLACEHOLDER),
            vibe: or(&record.vibe, VIBE_PLACEHOLDER),
            aim: or(&record.aim, AIM_PLACEHOLDER),
            cuisine: or(&record.cuisine, CUISINE_PLACEHOLDER),
            menu: or(&record.menu, ""),
            menu_url: or(&record.menu_url, ""),
            photo: photo.unwrap_or_default(),
        }
    }

    /// Photo link suitable for sending as media, if any
    pub fn photo_link(&self) -> Option<&str> {
        web_link(&self.photo)
    }

    /// Menu link suitable for rendering as a hyperlink, if any
    pub fn menu_link(&self) -> Option<&str> {
        web_link(&self.menu_url)
    }
}

fn web_link(value: &str) -> Option<&str> {
    value.starts_with("http").then_some(value)
}
