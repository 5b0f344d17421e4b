//! # 工具栏提示翻译
//!
//! 文本存放在 [`MessageSource`] 中：每个语言一份目录，把 [`TranslationKey`]
//! 映射到文本。消息源按命名空间注册到 [`TranslationRegistry`]，
//! 应用启动时构建一次，并传给每次渲染。
//!
//! ```text
//! lookup("ru-RU", PrevMonth)
//!     ├─ 目录 "ru-RU"  ── 命中 ──> 文本
//!     ├─ 目录 "ru"     ── 命中 ──> 文本
//!     └─ 英文默认值 ("Previous Month")
//! ```

use std::{
    collections::HashMap,
    fs,
    path::Path,
    sync::{Arc, PoisonError, RwLock},
};

use lazy_static::lazy_static;
use serde::Deserialize;
use serde_json::Value;
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};
use tracing::debug;

use super::{error::WidgetError, options::OptionMap};

/// Namespace the widget's messages are registered under.
pub const NAMESPACE: &str = "datepicker";

#[derive(Display, EnumIter, EnumString, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[strum(serialize_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub enum TranslationKey {
    Today,
    Clear,
    Close,
    SelectMonth,
    PrevMonth,
    NextMonth,
    SelectYear,
    PrevYear,
    NextYear,
    SelectDecade,
    PrevDecade,
    NextDecade,
    PrevCentury,
    NextCentury,
}

impl TranslationKey {
    pub fn default_message(self) -> &'static str {
        match self {
            Self::Today => "Go to today",
            Self::Clear => "Clear selection",
            Self::Close => "Close the picker",
            Self::SelectMonth => "Select Month",
            Self::PrevMonth => "Previous Month",
            Self::NextMonth => "Next Month",
            Self::SelectYear => "Select Year",
            Self::PrevYear => "Previous Year",
            Self::NextYear => "Next Year",
            Self::SelectDecade => "Select Decade",
            Self::PrevDecade => "Previous Decade",
            Self::NextDecade => "Next Decade",
            Self::PrevCentury => "Previous Century",
            Self::NextCentury => "Next Century",
        }
    }
}

pub type Catalog = HashMap<TranslationKey, String>;

#[derive(Debug, Clone, Default)]
pub struct MessageSource {
    catalogs: HashMap<String, Catalog>,
}

lazy_static! {
    static ref BUILTIN_MESSAGES: MessageSource = {
        let mut source = MessageSource::default();
        for (locale, yaml) in [
            ("de", include_str!("../../data/messages/de.yaml")),
            ("ru", include_str!("../../data/messages/ru.yaml")),
        ] {
            let catalog =
                serde_yaml::from_str(yaml).expect("Failed to parse built-in message catalog");
            source.insert_catalog(locale, catalog);
        }
        source
    };
}

impl MessageSource {
    /// Catalogs shipped with the crate.
    pub fn builtin() -> Self {
        BUILTIN_MESSAGES.clone()
    }

    /// Built-in catalogs extended by every `<locale>.yaml`/`.yml` file in `dir`.
    ///
    /// Keys from files override the built-in text for the same locale.
    pub fn from_dir<P: AsRef<Path>>(dir: P) -> Result<Self, WidgetError> {
        let dir = dir.as_ref();
        let mut source = Self::builtin();
        let entries = fs::read_dir(dir).map_err(|source| WidgetError::Io {
            path: dir.to_path_buf(),
            source,
        })?;

        for entry in entries {
            let path = entry
                .map_err(|source| WidgetError::Io {
                    path: dir.to_path_buf(),
                    source,
                })?
                .path();
            let is_yaml = path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext == "yaml" || ext == "yml");
            let Some(locale) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };
            if !is_yaml {
                continue;
            }

            let content = fs::read_to_string(&path).map_err(|source| WidgetError::Io {
                path: path.clone(),
                source,
            })?;
            let catalog: Catalog = serde_yaml::from_str(&content).map_err(|source| {
                WidgetError::Catalog {
                    path: path.clone(),
                    source,
                }
            })?;
            debug!("Loaded {} messages for {} from {:?}", catalog.len(), locale, path);
            source
                .catalogs
                .entry(locale.to_string())
                .or_default()
                .extend(catalog);
        }
        Ok(source)
    }

    pub fn insert_catalog<L: Into<String>>(&mut self, locale: L, catalog: Catalog) {
        self.catalogs.insert(locale.into(), catalog);
    }

    pub fn locales(&self) -> impl Iterator<Item = &str> {
        self.catalogs.keys().map(String::as_str)
    }

    /// Looks the key up for `locale`, then for its bare language (`ru-RU` → `ru`).
    pub fn translate(&self, locale: &str, key: TranslationKey) -> Option<&str> {
        let language = locale.split(['-', '_']).next().unwrap_or(locale);
        [locale, language]
            .into_iter()
            .find_map(|candidate| self.catalogs.get(candidate)?.get(&key))
            .map(String::as_str)
    }
}

/// Process-wide message sources, keyed by namespace.
///
/// Registration is write-once: the first source registered for a namespace
/// stays, later registrations are ignored.
#[derive(Debug, Default)]
pub struct TranslationRegistry {
    sources: RwLock<HashMap<String, Arc<MessageSource>>>,
}

impl TranslationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with the built-in catalogs registered under [`NAMESPACE`].
    pub fn with_builtin() -> Self {
        let registry = Self::new();
        registry.register(NAMESPACE, MessageSource::builtin());
        registry
    }

    /// Returns `true` if `source` was stored, `false` if the namespace was taken.
    pub fn register(&self, namespace: &str, source: MessageSource) -> bool {
        let mut sources = self.sources.write().unwrap_or_else(PoisonError::into_inner);
        if sources.contains_key(namespace) {
            debug!("Message source for {} already registered", namespace);
            return false;
        }
        debug!(
            "Registering message source for {} ({} locales)",
            namespace,
            source.catalogs.len()
        );
        sources.insert(namespace.to_string(), Arc::new(source));
        true
    }

    pub fn source(&self, namespace: &str) -> Option<Arc<MessageSource>> {
        self.sources
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(namespace)
            .cloned()
    }

    /// Localized text for `key`, or the English default.
    pub fn lookup(&self, locale: Option<&str>, key: TranslationKey) -> String {
        resolve(self.source(NAMESPACE).as_deref(), locale, key).to_string()
    }

    /// All toolbar tooltips for `locale`, in the shape the picker expects.
    pub fn tooltips(&self, locale: Option<&str>) -> OptionMap {
        let source = self.source(NAMESPACE);
        TranslationKey::iter()
            .map(|key| {
                let text = resolve(source.as_deref(), locale, key);
                (key.to_string(), Value::String(text.to_string()))
            })
            .collect()
    }
}

// catalog for `locale` (or its language), then the English default
fn resolve<'a>(
    source: Option<&'a MessageSource>,
    locale: Option<&str>,
    key: TranslationKey,
) -> &'a str {
    locale
        .zip(source)
        .and_then(|(locale, source)| source.translate(locale, key))
        .unwrap_or(key.default_message())
}
