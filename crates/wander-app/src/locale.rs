//! Locale store and translation lookup
//!
//! The chosen language persists under a fixed key in an injected
//! key-value store. Resolution order: stored value, then the system
//! locale tag, then English. Lookup falls back to the English table for
//! keys a language has not translated yet.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::warn;
use wander_core::Result;

/// Storage key for the persisted language tag.
pub const LOCALE_KEY: &str = "wander/locale";

/// Supported interface languages
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// English; the fallback for everything
    #[default]
    En,
    /// Italian
    It,
    /// Russian
    Ru,
    /// French
    Fr,
    /// German
    De,
}

impl Language {
    /// Two-letter tag used for persistence.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::En => "en",
            Self::It => "it",
            Self::Ru => "ru",
            Self::Fr => "fr",
            Self::De => "de",
        }
    }

    /// Parse a locale tag, accepting region suffixes (`it-IT` -> `It`).
    pub fn from_tag(tag: &str) -> Option<Self> {
        let primary = tag.split(['-', '_']).next().unwrap_or(tag);
        primary.to_ascii_lowercase().parse().ok()
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error for unknown language tags
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported language: {tag}")]
pub struct LanguageParseError {
    /// The rejected tag
    pub tag: String,
}

impl FromStr for Language {
    type Err = LanguageParseError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "en" => Ok(Self::En),
            "it" => Ok(Self::It),
            "ru" => Ok(Self::Ru),
            "fr" => Ok(Self::Fr),
            "de" => Ok(Self::De),
            other => Err(LanguageParseError {
                tag: other.to_string(),
            }),
        }
    }
}

/// Minimal persistent string store, injected by the host platform.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read a value.
    async fn get(&self, key: &str) -> Result<Option<String>>;
    /// Write a value.
    async fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// In-process store for tests and local development.
#[derive(Debug, Default)]
pub struct MemoryKeyValueStore {
    values: RwLock<HashMap<String, String>>,
}

impl MemoryKeyValueStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.values
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Persisted language selection.
pub struct LocaleStore {
    store: Arc<dyn KeyValueStore>,
}

impl LocaleStore {
    /// Bind to a key-value store.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Resolve the effective language.
    ///
    /// Stored selection wins; otherwise the system tag; otherwise
    /// English. Storage errors and unparseable stored values degrade to
    /// the next step rather than failing.
    pub async fn resolve(&self, system_tag: Option<&str>) -> Language {
        match self.store.get(LOCALE_KEY).await {
            Ok(Some(stored)) => {
                if let Some(language) = Language::from_tag(&stored) {
                    return language;
                }
                warn!(stored, "ignoring unparseable stored locale");
            }
            Ok(None) => {}
            Err(err) => warn!(error = %err, "locale read failed"),
        }
        system_tag
            .and_then(Language::from_tag)
            .unwrap_or(Language::En)
    }

    /// Persist a language selection.
    pub async fn set_locale(&self, language: Language) -> Result<()> {
        self.store.set(LOCALE_KEY, language.as_str()).await
    }
}

// =============================================================================
// Translation tables
// =============================================================================

type Table = &'static [(&'static str, &'static str)];

const EN: Table = &[
    ("common.loading", "Loading..."),
    ("common.error", "Something went wrong"),
    ("common.retry", "Retry"),
    ("common.cancel", "Cancel"),
    ("auth.signIn", "Sign In"),
    ("auth.signUp", "Sign Up"),
    ("auth.email", "Email"),
    ("auth.password", "Password"),
    ("auth.forgotPassword", "Forgot password?"),
    ("onboarding.welcome", "Welcome to Wander"),
    ("onboarding.chooseRole", "Choose your role"),
    ("feed.like", "Like"),
    ("feed.comment", "Comment"),
    ("feed.share", "Share"),
    ("profile.editProfile", "Edit Profile"),
];

const IT: Table = &[
    ("common.loading", "Caricamento..."),
    ("common.error", "Qualcosa è andato storto"),
    ("common.retry", "Riprova"),
    ("common.cancel", "Annulla"),
    ("auth.signIn", "Accedi"),
    ("auth.signUp", "Registrati"),
    ("auth.email", "Email"),
    ("auth.password", "Password"),
    ("auth.forgotPassword", "Password dimenticata?"),
    ("onboarding.welcome", "Benvenuto su Wander"),
    ("onboarding.chooseRole", "Scegli il tuo ruolo"),
    ("feed.like", "Mi piace"),
    ("feed.comment", "Commenta"),
    ("feed.share", "Condividi"),
    ("profile.editProfile", "Modifica profilo"),
];

const RU: Table = &[
    ("common.loading", "Загрузка..."),
    ("common.error", "Что-то пошло не так"),
    ("common.retry", "Повторить"),
    ("auth.signIn", "Войти"),
    ("auth.signUp", "Зарегистрироваться"),
    ("auth.email", "Эл. почта"),
    ("auth.password", "Пароль"),
    ("onboarding.welcome", "Добро пожаловать в Wander"),
    ("feed.like", "Нравится"),
    ("feed.comment", "Комментировать"),
];

const FR: Table = &[
    ("common.loading", "Chargement..."),
    ("common.error", "Une erreur est survenue"),
    ("common.retry", "Réessayer"),
    ("auth.signIn", "Se connecter"),
    ("auth.signUp", "S'inscrire"),
    ("auth.email", "E-mail"),
    ("auth.password", "Mot de passe"),
    ("onboarding.welcome", "Bienvenue sur Wander"),
    ("feed.like", "J'aime"),
    ("feed.comment", "Commenter"),
];

const DE: Table = &[
    ("common.loading", "Wird geladen..."),
    ("common.error", "Etwas ist schiefgelaufen"),
    ("common.retry", "Erneut versuchen"),
    ("auth.signIn", "Anmelden"),
    ("auth.signUp", "Registrieren"),
    ("auth.email", "E-Mail"),
    ("auth.password", "Passwort"),
    ("onboarding.welcome", "Willkommen bei Wander"),
    ("feed.like", "Gefällt mir"),
    ("feed.comment", "Kommentieren"),
];

fn table_for(language: Language) -> Table {
    match language {
        Language::En => EN,
        Language::It => IT,
        Language::Ru => RU,
        Language::Fr => FR,
        Language::De => DE,
    }
}

fn lookup(table: Table, key: &str) -> Option<&'static str> {
    table
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, value)| *value)
}

/// Key-based string lookup with English fallback.
#[derive(Debug, Clone, Copy)]
pub struct Translator {
    language: Language,
}

impl Translator {
    /// A translator for `language`.
    pub fn new(language: Language) -> Self {
        Self { language }
    }

    /// The active language.
    pub fn language(&self) -> Language {
        self.language
    }

    /// Translate `key`.
    ///
    /// Missing keys fall back to English; a key absent there too is
    /// returned verbatim so the UI shows the key instead of nothing.
    pub fn t<'a>(&self, key: &'a str) -> &'a str {
        lookup(table_for(self.language), key)
            .or_else(|| lookup(EN, key))
            .unwrap_or(key)
    }
}
