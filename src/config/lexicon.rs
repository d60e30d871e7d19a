// src/config/lexicon.rs
//! Lexicon document: category dictionaries, morphology lists and narrative
//! templates, loaded from TOML.
//!
//! Resolution order for [`Lexicon::from_env`]:
//! 1. `DREAM_LEXICON_PATH` if set (a read/parse failure is an error),
//! 2. `config/lexicon.ko.toml` relative to the working directory if present,
//! 3. the Korean lexicon compiled into the binary.
//!
//! Shape checks (category counts, empty entries) live in
//! [`crate::dictionary::Dictionaries::from_lexicon`]; this module only parses.

use serde::Deserialize;
use std::{fs, path::Path, path::PathBuf};
use tracing::info;

use super::{DEFAULT_LEXICON_PATH, ENV_LEXICON_PATH};

/// Korean lexicon shipped with the crate.
pub const BUILTIN_KO: &str = include_str!("../../config/lexicon.ko.toml");

fn default_script_pattern() -> String {
    "^[가-힣]+$".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct Lexicon {
    #[serde(default)]
    pub categories: CategoriesCfg,
    pub emotions: Vec<CategoryCfg>,
    pub themes: Vec<CategoryCfg>,
    #[serde(default)]
    pub morphology: MorphologyCfg,
    #[serde(default)]
    pub keywords: KeywordsCfg,
    pub narrative: NarrativeCfg,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CategoriesCfg {
    /// Emotion indices flagged with `trend_suffix` when they dominate.
    #[serde(default)]
    pub emphasis: Vec<usize>,
    #[serde(default)]
    pub trend_suffix: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CategoryCfg {
    pub label: String,
    pub keywords: Vec<String>,
}

/// Ordered lists; order breaks ties between equal-length suffixes.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MorphologyCfg {
    #[serde(default)]
    pub particles: Vec<String>,
    #[serde(default)]
    pub tails: Vec<String>,
    #[serde(default)]
    pub stopwords: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct KeywordsCfg {
    /// Regex every surfaced keyword (spaces removed) must match.
    #[serde(default = "default_script_pattern")]
    pub script_pattern: String,
}

impl Default for KeywordsCfg {
    fn default() -> Self {
        Self {
            script_pattern: default_script_pattern(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NarrativeCfg {
    pub heading_separator: String,
    pub bullet_delimiter: String,
    pub arrow: String,
    pub checklist: Vec<String>,
    pub conclusion: String,
    pub headings: HeadingsCfg,
    pub triggers: TriggersCfg,
    pub summary: SummaryCfg,
    pub symbol: SymbolCfg,
    pub emotion: EmotionTemplatesCfg,
    pub outlook: OutlookCfg,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HeadingsCfg {
    pub summary: String,
    pub symbol: String,
    pub emotion: String,
    pub outlook: String,
    pub checklist: String,
}

/// Literal variants searched in the raw text; any hit fires the trigger.
#[derive(Debug, Clone, Deserialize)]
pub struct TriggersCfg {
    pub toilet: Vec<String>,
    pub excrement: Vec<String>,
    pub pig: Vec<String>,
    pub house: Vec<String>,
    pub yard: Vec<String>,
    pub hand: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SummaryCfg {
    pub toilet_excrement: String,
    pub pig: String,
    pub house: String,
    pub yard: String,
    #[serde(rename = "default")]
    pub fallback: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SymbolCfg {
    pub toilet_excrement_pig: String,
    pub pig_house: String,
    pub toilet_excrement_hand: String,
    #[serde(rename = "default")]
    pub fallback: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmotionTemplatesCfg {
    /// Placeholders: `{feeling}`, `{themes}`.
    pub with_themes: String,
    /// Placeholder: `{feeling}`.
    pub without_themes: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutlookCfg {
    pub toilet_excrement: String,
    pub pig: String,
    pub yard: String,
    #[serde(rename = "default")]
    pub fallback: String,
}

impl Lexicon {
    /// Parse a lexicon from a TOML string.
    pub fn from_toml_str(toml_str: &str) -> anyhow::Result<Self> {
        let lex: Lexicon = toml::from_str(toml_str)
            .map_err(|e| anyhow::anyhow!("Invalid lexicon TOML: {}", e))?;
        Ok(lex)
    }

    /// The Korean lexicon compiled into the crate.
    pub fn builtin() -> anyhow::Result<Self> {
        Self::from_toml_str(BUILTIN_KO)
    }

    /// Load from a TOML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            anyhow::anyhow!("Failed to read lexicon at {}: {}", path.display(), e)
        })?;
        Self::from_toml_str(&content)
            .map_err(|e| anyhow::anyhow!("{} ({})", e, path.display()))
    }

    /// Resolve the lexicon from env, the default path, or the built-in copy.
    pub fn from_env() -> anyhow::Result<Self> {
        if let Ok(p) = std::env::var(ENV_LEXICON_PATH) {
            let lex = Self::load_from_file(&p)?;
            info!(path = %p, "lexicon loaded from {}", ENV_LEXICON_PATH);
            return Ok(lex);
        }

        let default_path = PathBuf::from(DEFAULT_LEXICON_PATH);
        if default_path.is_file() {
            let lex = Self::load_from_file(&default_path)?;
            info!(path = %default_path.display(), "lexicon loaded");
            return Ok(lex);
        }

        info!("lexicon: using built-in Korean copy");
        Self::builtin()
    }
}
