//! Language alias configuration
//!
//! Column headers are matched against a fixed alias list per role. The
//! defaults cover German source files with French, Italian and English
//! targets; a YAML file can override any of the top-level keys. Entries under
//! `targets` are merged over the default aliases:
//!
//! ```yaml
//! source: [DE, DEU, GERMAN, DEUTSCH]
//! targets:
//!   FR: [FR, FRA, FRENCH, FRANÇAIS]
//!   ES: [ES, ESP, SPANISH, ESPAÑOL]
//! languages: [FR, ES]
//! category_column: Komponente
//! ```

use crate::error::{PrepError, PrepResult};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Header name of the optional component/category column
pub const DEFAULT_CATEGORY_COLUMN: &str = "Komponente";

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExtractConfig {
    /// Accepted headers for the source-language column
    pub source: Vec<String>,
    /// Accepted headers per target-language code
    #[serde(deserialize_with = "merge_default_targets")]
    pub targets: BTreeMap<String, Vec<String>>,
    /// Target codes to emit, in output order
    pub languages: Vec<String>,
    /// Exact header of the category column
    pub category_column: String,
}

fn default_targets() -> BTreeMap<String, Vec<String>> {
    let mut targets = BTreeMap::new();
    targets.insert("FR".to_string(), strings(&["FR", "FRA", "FRENCH", "FRANÇAIS"]));
    targets.insert("IT".to_string(), strings(&["IT", "ITA", "ITALIAN", "ITALIANO"]));
    targets.insert("EN".to_string(), strings(&["EN", "ENG", "ENGLISH"]));
    targets
}

/// User entries replace the default alias list of the same code (codes are
/// uppercased) and leave the other defaults in place
fn merge_default_targets<'de, D>(deserializer: D) -> Result<BTreeMap<String, Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let user = BTreeMap::<String, Vec<String>>::deserialize(deserializer)?;
    let mut targets = default_targets();
    targets.extend(
        user.into_iter()
            .map(|(code, aliases)| (code.trim().to_uppercase(), aliases)),
    );
    Ok(targets)
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            source: strings(&["DE", "DEU", "GERMAN", "DEUTSCH"]),
            targets: default_targets(),
            languages: strings(&["FR", "IT", "EN"]),
            category_column: DEFAULT_CATEGORY_COLUMN.to_string(),
        }
    }
}

impl ExtractConfig {
    /// Load a YAML configuration file
    pub fn load(path: &Path) -> PrepResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            PrepError::Config(format!("Failed to read '{}': {}", path.display(), e))
        })?;
        Self::from_yaml_str(&content)
    }

    pub fn from_yaml_str(content: &str) -> PrepResult<Self> {
        let config: Self = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Replace the emitted target list, keeping aliases
    pub fn with_languages(mut self, languages: Vec<String>) -> Self {
        self.languages = languages
            .into_iter()
            .map(|code| code.trim().to_uppercase())
            .filter(|code| !code.is_empty())
            .collect();
        self
    }

    pub fn validate(&self) -> PrepResult<()> {
        if self.source.iter().all(|a| a.trim().is_empty()) {
            return Err(PrepError::Config(
                "source alias list must not be empty".to_string(),
            ));
        }
        if self.languages.is_empty() {
            return Err(PrepError::Config(
                "at least one target language is required".to_string(),
            ));
        }
        Ok(())
    }

    /// Accepted headers for a target code.
    ///
    /// Codes without an alias entry accept only the code itself.
    pub fn aliases_for(&self, code: &str) -> Vec<String> {
        self.targets
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(code))
            .map(|(_, aliases)| aliases.clone())
            .unwrap_or_else(|| vec![code.to_string()])
    }
}
