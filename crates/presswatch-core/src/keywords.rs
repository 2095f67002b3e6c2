use std::collections::BTreeMap;
use std::path::Path;

use regex::RegexBuilder;
use serde::Deserialize;

use crate::types::FintechCategory;
use crate::CoreError;

/// Number of non-English languages the filter screens for.
pub const NON_ENGLISH_LANGUAGE_COUNT: usize = 5;

/// Keyword/pattern tables for language filtering and fintech classification.
///
/// Kept as versioned data in `config/keywords.yaml` rather than hardcoded:
/// the tables drift with the tracked corpus, the matching arithmetic does
/// not. Classifiers compile these into matchers at construction.
#[derive(Debug, Clone, Deserialize)]
pub struct KeywordsFile {
    pub language: LanguageKeywords,
    pub fintech: BTreeMap<FintechCategory, CategoryKeywords>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LanguageKeywords {
    /// Function-word and business-term patterns marking English copy.
    pub english: Vec<String>,
    /// Common-word patterns per screened language.
    pub non_english: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CategoryKeywords {
    /// Case-insensitive substring keywords.
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Regex patterns, compiled case-insensitively.
    #[serde(default)]
    pub patterns: Vec<String>,
}

/// Load and validate the keyword tables from a YAML file.
///
/// # Errors
///
/// Returns `CoreError` if the file cannot be read or parsed, if a category
/// or language table is missing or empty, or if a pattern does not compile.
pub fn load_keywords(path: &Path) -> Result<KeywordsFile, CoreError> {
    let content = std::fs::read_to_string(path).map_err(|e| CoreError::ConfigFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let file: KeywordsFile = serde_yaml::from_str(&content)?;
    validate_keywords(&file)?;
    Ok(file)
}

fn validate_keywords(file: &KeywordsFile) -> Result<(), CoreError> {
    if file.language.english.is_empty() {
        return Err(CoreError::Validation(
            "language.english must list at least one pattern".to_string(),
        ));
    }
    check_patterns("language.english", &file.language.english)?;

    if file.language.non_english.len() != NON_ENGLISH_LANGUAGE_COUNT {
        return Err(CoreError::Validation(format!(
            "language.non_english must cover exactly {} languages, found {}",
            NON_ENGLISH_LANGUAGE_COUNT,
            file.language.non_english.len()
        )));
    }
    for (language, patterns) in &file.language.non_english {
        if patterns.is_empty() {
            return Err(CoreError::Validation(format!(
                "language.non_english.{language} must list at least one pattern"
            )));
        }
        check_patterns(&format!("language.non_english.{language}"), patterns)?;
    }

    for category in FintechCategory::ALL {
        let Some(entry) = file.fintech.get(&category) else {
            return Err(CoreError::Validation(format!(
                "fintech table missing category '{category}'"
            )));
        };
        if entry.keywords.is_empty() {
            return Err(CoreError::Validation(format!(
                "fintech.{category} must list at least one keyword"
            )));
        }
        if entry.keywords.iter().any(|k| k.trim().is_empty()) {
            return Err(CoreError::Validation(format!(
                "fintech.{category} contains an empty keyword"
            )));
        }
        check_patterns(&format!("fintech.{category}"), &entry.patterns)?;
    }

    Ok(())
}

fn check_patterns(table: &str, patterns: &[String]) -> Result<(), CoreError> {
    for pattern in patterns {
        RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .map_err(|e| {
                CoreError::Validation(format!("{table} pattern '{pattern}' does not compile: {e}"))
            })?;
    }
    Ok(())
}
