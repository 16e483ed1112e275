// ============================================================================
// Module : i18n
// ============================================================================
// Tables de traduction statiques (anglais / chinois)
//
// Les tables sont embarquées à la compilation (include_str!) puis parsées
// avec serde_json. Les vues indexent directement par clé.
// ============================================================================

use std::collections::{BTreeMap, BTreeSet};

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::theme::Language;

/// JSON embarqué dans le binaire
const DEFAULT_TABLES: &str = include_str!("../assets/translations.json");

/// Erreurs de chargement des traductions
#[derive(Debug, Error)]
pub enum I18nError {
    #[error("invalid translation tables: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Forme brute du fichier : une table par langue
#[derive(Debug, Deserialize)]
struct RawTables {
    en: BTreeMap<String, String>,
    zh: BTreeMap<String, String>,
}

/// Les deux tables de traduction
#[derive(Debug, Clone)]
pub struct Translations {
    en: BTreeMap<String, String>,
    zh: BTreeMap<String, String>,
}

impl Translations {
    /// Charge les tables embarquées
    pub fn load_default() -> Result<Self, I18nError> {
        Self::from_json(DEFAULT_TABLES)
    }

    /// Parse des tables depuis une chaîne JSON `{"en": {...}, "zh": {...}}`
    pub fn from_json(json: &str) -> Result<Self, I18nError> {
        let raw: RawTables = serde_json::from_str(json)?;
        debug!(en = raw.en.len(), zh = raw.zh.len(), "Translation tables parsed");
        Ok(Self {
            en: raw.en,
            zh: raw.zh,
        })
    }

    fn table(&self, language: Language) -> &BTreeMap<String, String> {
        match language {
            Language::En => &self.en,
            Language::Zh => &self.zh,
        }
    }

    /// Retourne la traduction si la clé existe
    pub fn get(&self, language: Language, key: &str) -> Option<&str> {
        self.table(language).get(key).map(String::as_str)
    }

    /// Retourne la traduction, ou la clé elle-même si absente
    ///
    /// CONCEPT RUST : lifetime partagé
    /// - Le résultat emprunte soit `self`, soit `key`
    /// - D'où le même lifetime 'a pour les deux
    pub fn t<'a>(&'a self, language: Language, key: &'a str) -> &'a str {
        self.get(language, key).unwrap_or(key)
    }

    /// Liste les clés présentes dans une table mais pas dans l'autre
    ///
    /// Chaque entrée indique la langue à laquelle il manque la clé.
    pub fn missing_keys(&self) -> Vec<(Language, String)> {
        let en: BTreeSet<&String> = self.en.keys().collect();
        let zh: BTreeSet<&String> = self.zh.keys().collect();

        let missing_in_zh = en.difference(&zh).map(|k| (Language::Zh, (*k).clone()));
        let missing_in_en = zh.difference(&en).map(|k| (Language::En, (*k).clone()));

        missing_in_zh.chain(missing_in_en).collect()
    }

    /// Nombre de clés dans une table
    pub fn len(&self, language: Language) -> usize {
        self.table(language).len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_tables_load() {
        let translations = Translations::load_default().unwrap();
        assert!(translations.len(Language::En) > 0);
        assert_eq!(translations.len(Language::En), translations.len(Language::Zh));
    }

    #[test]
    fn test_embedded_tables_have_key_parity() {
        let translations = Translations::load_default().unwrap();
        assert!(
            translations.missing_keys().is_empty(),
            "missing keys: {:?}",
            translations.missing_keys()
        );
    }

    #[test]
    fn test_every_key_resolves_in_both_languages() {
        let translations = Translations::load_default().unwrap();
        for key in translations.en.keys() {
            assert!(translations.get(Language::Zh, key).is_some(), "zh lacks {key}");
        }
        for key in translations.zh.keys() {
            assert!(translations.get(Language::En, key).is_some(), "en lacks {key}");
        }
    }

    #[test]
    fn test_lookup_by_language() {
        let translations = Translations::load_default().unwrap();
        assert_eq!(translations.t(Language::En, "spot"), "Spot");
        assert_eq!(translations.t(Language::Zh, "spot"), "现货");
    }

    #[test]
    fn test_unknown_key_falls_back_to_key() {
        let translations = Translations::load_default().unwrap();
        assert_eq!(translations.get(Language::En, "no_such_key"), None);
        assert_eq!(translations.t(Language::En, "no_such_key"), "no_such_key");
    }

    #[test]
    fn test_missing_keys_are_reported() {
        let json = r#"{"en": {"a": "A", "b": "B"}, "zh": {"a": "甲", "c": "丙"}}"#;
        let translations = Translations::from_json(json).unwrap();
        let missing = translations.missing_keys();

        assert_eq!(missing.len(), 2);
        assert!(missing.contains(&(Language::Zh, "b".to_string())));
        assert!(missing.contains(&(Language::En, "c".to_string())));
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(matches!(
            Translations::from_json("{\"en\": {}}"),
            Err(I18nError::Parse(_))
        ));
    }
}
