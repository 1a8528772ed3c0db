//! Static fallback catalog embedded at compile time.
//!
//! When the ballet API cannot be reached, the data service serves company
//! profiles and performances from this catalog verbatim. The catalog lives
//! under `data/fallback`: `companies.yml` holds the profiles and
//! `performances/<company id>.yml` holds each company's season.

use chrono::NaiveDate;
use include_dir::{include_dir, Dir};
use std::collections::BTreeMap;

use crate::error::{BalletError, Result};
use crate::model::{Company, Performance};
use crate::schedule::{is_current, sort_by_start_date, ClassifierSettings};

/// Embedded catalog directory.
static FALLBACK_DIR: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/data/fallback");

/// Offline company and performance data.
#[derive(Debug, Clone, Default)]
pub struct FallbackCatalog {
    companies: Vec<Company>,
    performances: BTreeMap<String, Vec<Performance>>,
}

impl FallbackCatalog {
    /// Load the catalog embedded in the binary.
    pub fn embedded() -> Result<Self> {
        let companies_file = FALLBACK_DIR.get_file("companies.yml").ok_or_else(|| {
            BalletError::ConfigNotFound {
                path: "data/fallback/companies.yml".into(),
            }
        })?;
        let companies: Vec<Company> = parse_yaml(companies_file)?;

        let mut performances = BTreeMap::new();
        if let Some(dir) = FALLBACK_DIR.get_dir("performances") {
            for file in dir.files() {
                let path = file.path();
                if !path.extension().is_some_and(|e| e == "yml" || e == "yaml") {
                    continue;
                }
                let Some(company_id) = path.file_stem().and_then(|s| s.to_str()) else {
                    continue;
                };
                performances.insert(company_id.to_string(), parse_yaml(file)?);
            }
        }

        Ok(Self::from_parts(companies, performances))
    }

    /// Build a catalog from explicit data.
    ///
    /// Performances without a company are assigned the id they are keyed by.
    pub fn from_parts(
        companies: Vec<Company>,
        mut performances: BTreeMap<String, Vec<Performance>>,
    ) -> Self {
        for (company_id, list) in performances.iter_mut() {
            for performance in list.iter_mut() {
                if performance.company.is_none() {
                    performance.company = Some(company_id.clone());
                }
            }
        }

        Self {
            companies,
            performances,
        }
    }

    /// All company profiles, in catalog order.
    pub fn companies(&self) -> &[Company] {
        &self.companies
    }

    /// A company profile.
    pub fn company(&self, company_id: &str) -> Option<&Company> {
        self.companies.iter().find(|c| c.id == company_id)
    }

    /// A company's season; empty for unknown companies.
    pub fn performances(&self, company_id: &str) -> Vec<Performance> {
        self.performances
            .get(company_id)
            .cloned()
            .unwrap_or_default()
    }

    /// One performance of a company.
    pub fn performance(&self, company_id: &str, performance_id: &str) -> Option<Performance> {
        self.performances
            .get(company_id)?
            .iter()
            .find(|p| p.id == performance_id)
            .cloned()
    }

    /// Every performance, tagged with its company's display name.
    pub fn all_performances(&self) -> Vec<Performance> {
        let mut all = Vec::new();
        for (company_id, list) in &self.performances {
            let company_name = self.company(company_id).map(|c| c.name.clone());
            for performance in list {
                let mut performance = performance.clone();
                if performance.company_name.is_none() {
                    performance.company_name = company_name.clone();
                }
                all.push(performance);
            }
        }
        all
    }

    /// Performances current on `today`, sorted by start date.
    pub fn current_performances(
        &self,
        today: NaiveDate,
        settings: &ClassifierSettings,
    ) -> Vec<Performance> {
        let mut current: Vec<Performance> = self
            .all_performances()
            .into_iter()
            .filter(|p| is_current(p, today, settings))
            .map(|mut p| {
                p.is_current = true;
                p
            })
            .collect();
        sort_by_start_date(&mut current);
        current
    }

    /// Performances whose title or description contains `query`.
    pub fn search(&self, query: &str) -> Vec<Performance> {
        if query.is_empty() {
            return Vec::new();
        }
        self.all_performances()
            .into_iter()
            .filter(|p| p.matches(query))
            .collect()
    }
}

fn parse_yaml<T: serde::de::DeserializeOwned>(file: &include_dir::File<'_>) -> Result<T> {
    let content = file
        .contents_utf8()
        .ok_or_else(|| BalletError::ConfigParseError {
            path: file.path().to_path_buf(),
            message: "Invalid UTF-8".to_string(),
        })?;

    serde_yaml::from_str(content).map_err(|e| BalletError::ConfigParseError {
        path: file.path().to_path_buf(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> FallbackCatalog {
        FallbackCatalog::embedded().unwrap()
    }

    #[test]
    fn embedded_catalog_loads() {
        let catalog = catalog();
        assert!(catalog.company("paris_opera_ballet").is_some());
        assert!(catalog.company("bolshoi_ballet").is_some());
        assert!(catalog.company("royal_ballet").is_some());
    }

    #[test]
    fn every_performance_has_a_known_company() {
        let catalog = catalog();
        for performance in catalog.all_performances() {
            let company = performance.company.as_deref().unwrap();
            assert!(catalog.company(company).is_some(), "unknown company {}", company);
            assert!(performance.start_date.is_valid(), "{} start", performance.id);
            assert!(performance.end_date.is_valid(), "{} end", performance.id);
            assert!(performance.company_name.is_some());
        }
    }

    #[test]
    fn unknown_company_has_no_performances() {
        assert!(catalog().performances("nobody").is_empty());
        assert!(catalog().company("nobody").is_none());
    }

    #[test]
    fn performance_lookup() {
        let giselle = catalog()
            .performance("paris_opera_ballet", "pob_giselle")
            .unwrap();
        assert_eq!(giselle.title, "Giselle");
        assert_eq!(giselle.venue, "Palais Garnier");
        assert!(catalog().performance("paris_opera_ballet", "missing").is_none());
    }

    #[test]
    fn current_performances_on_a_fixed_date() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
        let current = catalog().current_performances(today, &ClassifierSettings::default());

        let ids: Vec<_> = current.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(
            ids,
            [
                "royal_romeo_juliet",
                "bolshoi_spartacus",
                "pob_giselle",
                "nbc_swan_lake"
            ]
        );
        assert!(current.iter().all(|p| p.is_current));
    }

    #[test]
    fn search_matches_title_and_description() {
        let catalog = catalog();
        let swan: Vec<_> = catalog.search("swan lake").into_iter().map(|p| p.id).collect();
        assert!(swan.contains(&"pob_swan_lake".to_string()));
        assert!(swan.contains(&"nbc_swan_lake".to_string()));

        let by_description = catalog.search("PROKOFIEV");
        assert!(by_description.iter().any(|p| p.id == "royal_romeo_juliet"));

        assert!(catalog.search("").is_empty());
    }

    #[test]
    fn from_parts_assigns_company() {
        let mut performances = BTreeMap::new();
        performances.insert(
            "abt".to_string(),
            vec![Performance::new("abt-1", "Swan Lake", crate::model::CalendarDate::default(), crate::model::CalendarDate::default())],
        );
        let catalog = FallbackCatalog::from_parts(Vec::new(), performances);

        assert!(catalog.performances("abt")[0].belongs_to("abt"));
    }
}
