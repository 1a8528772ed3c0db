//! Ballet company profiles.

use serde::{Deserialize, Serialize};

/// Profile of a ballet company.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Company {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_name: Option<String>,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub founded: Option<u32>,
}

impl Company {
    /// Short display name, falling back to the full name.
    pub fn display_short_name(&self) -> &str {
        self.short_name.as_deref().unwrap_or(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_api_shape() {
        let json = r#"{
            "id": "bolshoi_ballet",
            "name": "Bolshoi Ballet",
            "shortName": "Bolshoi",
            "description": "Moscow",
            "founded": 1776
        }"#;

        let company: Company = serde_json::from_str(json).unwrap();
        assert_eq!(company.display_short_name(), "Bolshoi");
        assert_eq!(company.founded, Some(1776));
        assert!(company.logo.is_none());
    }

    #[test]
    fn short_name_falls_back_to_name() {
        let company = Company {
            id: "royal_ballet".into(),
            name: "The Royal Ballet".into(),
            ..Default::default()
        };
        assert_eq!(company.display_short_name(), "The Royal Ballet");
    }
}
