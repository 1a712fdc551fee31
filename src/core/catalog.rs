use crate::domain::model::{Category, Provider};
use crate::utils::error::{AssistError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_range, validate_unique_ids};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// On-disk shape of a catalog: flat category and provider tables.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogFile {
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub providers: Vec<Provider>,
}

/// Immutable reference data with a precomputed category -> providers index.
///
/// Providers live once in a flat arena; each category slot keeps the arena
/// indices of its providers in declaration order.
#[derive(Debug, Clone)]
pub struct Catalog {
    categories: Vec<Category>,
    providers: Vec<Provider>,
    members: Vec<Vec<usize>>,
    slots: HashMap<String, usize>,
}

/// A category together with its providers, borrowed from a [`Catalog`].
#[derive(Debug, Clone, Copy)]
pub struct CategoryView<'a> {
    catalog: &'a Catalog,
    slot: usize,
}

impl<'a> CategoryView<'a> {
    pub fn category(&self) -> &'a Category {
        &self.catalog.categories[self.slot]
    }

    pub fn providers(&self) -> impl Iterator<Item = &'a Provider> + 'a {
        let catalog = self.catalog;
        catalog.members[self.slot]
            .iter()
            .map(move |&index| &catalog.providers[index])
    }

    pub fn provider_count(&self) -> usize {
        self.catalog.members[self.slot].len()
    }
}

impl Catalog {
    pub fn build(categories: Vec<Category>, providers: Vec<Provider>) -> Result<Self> {
        Self::check(&categories, &providers).map_err(|e| AssistError::catalog(e.to_string()))?;

        Ok(Self::assemble(categories, providers))
    }

    fn assemble(categories: Vec<Category>, providers: Vec<Provider>) -> Self {
        let slots: HashMap<String, usize> = categories
            .iter()
            .enumerate()
            .map(|(slot, category)| (category.id.clone(), slot))
            .collect();

        let mut members = vec![Vec::new(); categories.len()];
        for (index, provider) in providers.iter().enumerate() {
            for category_id in &provider.categories {
                match slots.get(category_id) {
                    Some(&slot) if !members[slot].contains(&index) => members[slot].push(index),
                    Some(_) => {}
                    None => tracing::debug!(
                        "Provider '{}' lists unknown category '{}', ignoring",
                        provider.id,
                        category_id
                    ),
                }
            }
        }

        tracing::debug!(
            "Catalog built: {} categories, {} providers",
            categories.len(),
            providers.len()
        );

        Self {
            categories,
            providers,
            members,
            slots,
        }
    }

    fn check(categories: &[Category], providers: &[Provider]) -> Result<()> {
        for (i, category) in categories.iter().enumerate() {
            validate_non_empty_string(&format!("categories[{}].id", i), &category.id)?;
            validate_non_empty_string(&format!("categories[{}].name", i), &category.name)?;
        }
        validate_unique_ids("categories.id", categories.iter().map(|c| c.id.as_str()))?;

        for (i, provider) in providers.iter().enumerate() {
            validate_non_empty_string(&format!("providers[{}].id", i), &provider.id)?;
            validate_non_empty_string(&format!("providers[{}].name", i), &provider.name)?;
            validate_range(&format!("providers[{}].rating", i), provider.rating, 0.0, 5.0)?;
            validate_range(
                &format!("providers[{}].distance_km", i),
                provider.distance_km,
                0.0,
                f64::MAX,
            )?;
        }
        validate_unique_ids("providers.id", providers.iter().map(|p| p.id.as_str()))?;

        Ok(())
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!("Loading catalog from {}", path.display());
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content, &path.display().to_string())
    }

    pub fn from_toml_str(content: &str, source_name: &str) -> Result<Self> {
        let file: CatalogFile =
            toml::from_str(content).map_err(|e| AssistError::TomlParseError {
                source_name: source_name.to_string(),
                message: e.to_string(),
            })?;
        Self::build(file.categories, file.providers)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        let file = CatalogFile {
            categories: self.categories.clone(),
            providers: self.providers.clone(),
        };
        toml::to_string_pretty(&file)
            .map_err(|e| AssistError::catalog(format!("cannot render catalog as TOML: {}", e)))
    }

    /// Categories in catalog order.
    pub fn entries(&self) -> impl Iterator<Item = CategoryView<'_>> {
        (0..self.categories.len()).map(move |slot| CategoryView { catalog: self, slot })
    }

    pub fn category(&self, id: &str) -> Option<CategoryView<'_>> {
        self.slots
            .get(id)
            .map(|&slot| CategoryView { catalog: self, slot })
    }

    pub fn providers(&self) -> &[Provider] {
        &self.providers
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// The demo data set the assistant ships with.
    pub fn builtin() -> Self {
        let provider = |id: &str,
                        name: &str,
                        address: &str,
                        phone: &str,
                        email: &str,
                        categories: &[&str],
                        rating: f64,
                        distance_km: f64| Provider {
            id: id.to_string(),
            name: name.to_string(),
            address: address.to_string(),
            phone: phone.to_string(),
            email: Some(email.to_string()),
            categories: categories.iter().map(|c| c.to_string()).collect(),
            rating,
            distance_km,
            verified: true,
        };
        let category = |id: &str, name: &str, description: &str, icon: &str| Category {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            icon: Some(icon.to_string()),
        };

        let providers = vec![
            provider(
                "1",
                "EcoRecycle Center",
                "123 Green Street, Downtown",
                "+1 (555) 123-4567",
                "contact@ecorecycle.com",
                &["plastic", "paper", "glass"],
                4.8,
                2.3,
            ),
            provider(
                "2",
                "Metal Works Recycling",
                "456 Industrial Ave",
                "+1 (555) 987-6543",
                "info@metalworks.com",
                &["metal", "electronics"],
                4.5,
                5.1,
            ),
            provider(
                "3",
                "Green Electronics Hub",
                "789 Tech Boulevard",
                "+1 (555) 456-7890",
                "hello@greenelectronics.com",
                &["electronics", "batteries"],
                4.9,
                3.7,
            ),
        ];

        let categories = vec![
            category("plastic", "Plastic", "Bottles, containers, packaging materials", "Trash2"),
            category("paper", "Paper", "Newspapers, magazines, cardboard", "FileText"),
            category("glass", "Glass", "Bottles, jars, containers", "Wine"),
            category("metal", "Metal", "Cans, foil, scrap metal", "Zap"),
            category("electronics", "Electronics", "Phones, computers, appliances", "Smartphone"),
        ];

        Self::assemble(categories, providers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider(id: &str, categories: &[&str]) -> Provider {
        Provider {
            id: id.to_string(),
            name: format!("Provider {}", id),
            address: "1 Main St".to_string(),
            phone: "555".to_string(),
            email: None,
            categories: categories.iter().map(|c| c.to_string()).collect(),
            rating: 4.0,
            distance_km: 1.0,
            verified: false,
        }
    }

    fn category(id: &str, name: &str) -> Category {
        Category {
            id: id.to_string(),
            name: name.to_string(),
            description: String::new(),
            icon: None,
        }
    }

    #[test]
    fn test_builtin_catalog_matches_build() {
        let builtin = Catalog::builtin();
        let rebuilt =
            Catalog::build(builtin.categories.clone(), builtin.providers.clone()).unwrap();

        assert_eq!(builtin.len(), 5);
        assert_eq!(builtin.members, rebuilt.members);

        let electronics = builtin.category("electronics").unwrap();
        let names: Vec<&str> = electronics.providers().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Metal Works Recycling", "Green Electronics Hub"]);
    }

    #[test]
    fn test_index_keeps_declaration_order() {
        let catalog = Catalog::build(
            vec![category("glass", "Glass")],
            vec![provider("b", &["glass"]), provider("a", &["glass"])],
        )
        .unwrap();

        let ids: Vec<&str> = catalog
            .category("glass")
            .unwrap()
            .providers()
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn test_unknown_category_ids_are_ignored() {
        let catalog = Catalog::build(
            vec![category("metal", "Metal")],
            vec![provider("1", &["metal", "batteries", "metal"])],
        )
        .unwrap();

        assert_eq!(catalog.category("metal").unwrap().provider_count(), 1);
        assert!(catalog.category("batteries").is_none());
    }

    #[test]
    fn test_rejects_duplicate_category_ids() {
        let err = Catalog::build(
            vec![category("paper", "Paper"), category("paper", "Cardboard")],
            vec![],
        )
        .unwrap_err();
        assert!(matches!(err, AssistError::CatalogError { .. }));
    }

    #[test]
    fn test_rejects_out_of_range_values() {
        let mut bad_rating = provider("1", &[]);
        bad_rating.rating = 7.5;
        assert!(Catalog::build(vec![], vec![bad_rating]).is_err());

        let mut bad_distance = provider("1", &[]);
        bad_distance.distance_km = -1.0;
        assert!(Catalog::build(vec![], vec![bad_distance]).is_err());
    }

    #[test]
    fn test_rejects_empty_names() {
        assert!(Catalog::build(vec![category("x", "  ")], vec![]).is_err());
    }

    #[test]
    fn test_toml_round_trip_keeps_order() {
        let builtin = Catalog::builtin();
        let rendered = builtin.to_toml_string().unwrap();
        let parsed = Catalog::from_toml_str(&rendered, "rendered").unwrap();

        let original: Vec<&str> = builtin.entries().map(|e| e.category().name.as_str()).collect();
        let reparsed: Vec<&str> = parsed.entries().map(|e| e.category().name.as_str()).collect();
        assert_eq!(original, reparsed);
        assert_eq!(parsed.providers(), builtin.providers());
    }

    #[test]
    fn test_invalid_toml_reports_source() {
        let err = Catalog::from_toml_str("[[categories]\nid = 1", "broken.toml").unwrap_err();
        match err {
            AssistError::TomlParseError { source_name, .. } => {
                assert_eq!(source_name, "broken.toml")
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
