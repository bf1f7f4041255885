// String collation strategies
// Author: Gabriel Demetrios Lafis

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Produces the key used to order text values
pub trait Collator: fmt::Debug {
    /// Transform a string so that comparing keys byte-wise gives the
    /// collation order
    fn sort_key<'a>(&self, text: &'a str) -> Cow<'a, str>;

    /// Name of the collation, for logs
    fn name(&self) -> &str;
}

/// Raw code-point ordering
#[derive(Debug, Clone, Copy, Default)]
pub struct RawCollator;

impl Collator for RawCollator {
    fn sort_key<'a>(&self, text: &'a str) -> Cow<'a, str> {
        Cow::Borrowed(text)
    }

    fn name(&self) -> &str {
        "raw"
    }
}

/// Locale-aware ordering for Latin-script languages.
///
/// Accents and case are ignored at the first level; the original text
/// breaks ties, so "cote" < "côte" < "coter" holds for French.
#[derive(Debug, Clone)]
pub struct FoldingCollator {
    locale: String,
}

impl FoldingCollator {
    pub fn new(locale: &str) -> Self {
        FoldingCollator {
            locale: locale.to_string(),
        }
    }
}

impl Collator for FoldingCollator {
    fn sort_key<'a>(&self, text: &'a str) -> Cow<'a, str> {
        let mut key = String::with_capacity(text.len() * 2 + 1);
        for c in text.chars().flat_map(char::to_lowercase) {
            push_folded(&mut key, c);
        }
        key.push('\u{0}');
        key.push_str(text);
        Cow::Owned(key)
    }

    fn name(&self) -> &str {
        &self.locale
    }
}

fn push_folded(key: &mut String, c: char) {
    let base = match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'ā' | 'ă' | 'ą' => 'a',
        'æ' => return key.push_str("ae"),
        'ç' | 'ć' | 'ĉ' | 'č' => 'c',
        'ď' | 'đ' => 'd',
        'è' | 'é' | 'ê' | 'ë' | 'ē' | 'ė' | 'ę' | 'ě' => 'e',
        'ğ' => 'g',
        'ì' | 'í' | 'î' | 'ï' | 'ī' | 'į' | 'ı' => 'i',
        'ł' => 'l',
        'ñ' | 'ń' | 'ň' => 'n',
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' | 'ō' | 'ő' => 'o',
        'œ' => return key.push_str("oe"),
        'ř' => 'r',
        'ś' | 'š' | 'ş' | 'ș' => 's',
        'ß' => return key.push_str("ss"),
        'ť' | 'ţ' | 'ț' => 't',
        'ù' | 'ú' | 'û' | 'ü' | 'ū' | 'ů' | 'ű' | 'ų' => 'u',
        'ý' | 'ÿ' => 'y',
        'ź' | 'ż' | 'ž' => 'z',
        other => other,
    };
    key.push(base);
}

const FOLDING_LANGUAGES: [&str; 16] = [
    "ca", "cs", "da", "de", "en", "es", "fi", "fr", "it", "nb", "nl", "no", "pl", "pt", "ro", "sv",
];

/// Requested collation, as selected by the caller or the configuration
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Collation {
    #[default]
    Raw,
    Locale(String),
}

/// A collation ready for use, plus the reason it differs from the request
#[derive(Debug)]
pub struct ResolvedCollation {
    collator: Box<dyn Collator>,
    fallback: Option<String>,
}

impl ResolvedCollation {
    pub fn collator(&self) -> &dyn Collator {
        self.collator.as_ref()
    }

    /// Set when the requested locale was unavailable and raw ordering is used
    pub fn fallback(&self) -> Option<&str> {
        self.fallback.as_deref()
    }
}

impl Collation {
    /// Collation for a locale tag such as `fr_FR.UTF-8`, `fr-CA` or `C`
    pub fn locale(tag: &str) -> Self {
        Collation::Locale(tag.to_string())
    }

    /// Pick the collator for this request; never fails
    pub fn resolve(&self) -> ResolvedCollation {
        let tag = match self {
            Collation::Raw => return raw_resolution(None),
            Collation::Locale(tag) => tag,
        };

        let language = tag
            .split(|c: char| c == '_' || c == '-' || c == '.' || c == '@')
            .next()
            .unwrap_or("")
            .to_lowercase();

        match language.as_str() {
            "" | "c" | "posix" => raw_resolution(None),
            lang if FOLDING_LANGUAGES.contains(&lang) => ResolvedCollation {
                collator: Box::new(FoldingCollator::new(tag)),
                fallback: None,
            },
            _ => raw_resolution(Some(format!(
                "collation for locale '{}' is unavailable, using raw ordering",
                tag
            ))),
        }
    }
}

fn raw_resolution(fallback: Option<String>) -> ResolvedCollation {
    ResolvedCollation {
        collator: Box::new(RawCollator),
        fallback,
    }
}
