// Chunk: docs/chunks/themes - Default and custom color themes
//!
//! Color themes.
//!
//! Two themes ship built in; users can add custom ones from a JSON object of
//! color keys. Custom themes and the selected theme id are persisted through a
//! [`KeyValueStore`]. Stored data is never trusted: every color is re-normalized
//! on load and unusable entries are skipped.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::error::SettingsError;
use crate::settings::store::{set_or_warn, KeyValueStore};

/// Storage key for the custom theme list.
pub const STORAGE_CUSTOM_THEMES: &str = "tabfzf.customThemes.v1";

/// Storage key for the selected theme id.
pub const STORAGE_SELECTED_THEME: &str = "tabfzf.selectedThemeId.v1";

/// Every key a theme JSON object may carry.
const SUPPORTED_KEYS: [&str; 10] = [
    "bg", "panel", "text", "muted", "border", "focus", "active", "rowBorder", "title", "fontBody",
];

/// Luminance above which a background counts as light.
const LIGHT_LUMINANCE: f64 = 0.58;

/// The colors and font of a theme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeColors {
    pub bg: String,
    pub panel: String,
    pub text: String,
    pub muted: String,
    pub border: String,
    pub focus: String,
    pub active: String,
    /// Any CSS color, not just hex.
    pub row_border: String,
    pub title: String,
    pub font_body: String,
}

impl Default for ThemeColors {
    /// The Midnight FZF palette.
    fn default() -> Self {
        Self {
            bg: "#0a0f14".into(),
            panel: "#111921".into(),
            text: "#d7e3ee".into(),
            muted: "#8b9aaa".into(),
            border: "#283847".into(),
            focus: "#8eb7ff".into(),
            active: "#1d2a36".into(),
            row_border: "rgba(40, 56, 71, 0.65)".into(),
            title: "#aeb9c5".into(),
            font_body: r#""JetBrains Mono", "Fira Code", Menlo, Consolas, monospace"#.into(),
        }
    }
}

impl ThemeColors {
    fn hex_slots_mut(&mut self) -> [(&'static str, &mut String); 8] {
        [
            ("bg", &mut self.bg),
            ("panel", &mut self.panel),
            ("text", &mut self.text),
            ("muted", &mut self.muted),
            ("border", &mut self.border),
            ("focus", &mut self.focus),
            ("active", &mut self.active),
            ("title", &mut self.title),
        ]
    }

    /// Light or dark, judged from the background.
    pub fn color_scheme(&self) -> ColorScheme {
        color_scheme(&self.bg)
    }
}

/// Where a theme came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeSource {
    Default,
    Custom,
}

/// A named theme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    pub id: String,
    pub name: String,
    pub source: ThemeSource,
    pub colors: ThemeColors,
}

/// Whether a background is light or dark.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorScheme {
    Light,
    Dark,
}

/// The built-in themes. The first is the fallback for unknown ids.
pub fn default_themes() -> Vec<Theme> {
    vec![
        Theme {
            id: "midnight-fzf".into(),
            name: "Midnight FZF".into(),
            source: ThemeSource::Default,
            colors: ThemeColors::default(),
        },
        Theme {
            id: "win98-foot-light".into(),
            name: "Windows 98 Foot Light".into(),
            source: ThemeSource::Default,
            colors: ThemeColors {
                bg: "#f3f1ee".into(),
                panel: "#ffffff".into(),
                text: "#202124".into(),
                muted: "#6f6963".into(),
                border: "#8c867f".into(),
                focus: "#6e8eb3".into(),
                active: "#e2e6ed".into(),
                row_border: "#b3a56e".into(),
                title: "#3a3a3a".into(),
                font_body: r#"Tahoma, "MS Sans Serif", Arial, sans-serif"#.into(),
            },
        },
    ]
}

/// Normalizes `#rrggbb` or `rrggbb` (surrounding whitespace allowed) to a
/// lower-case `#rrggbb`.
pub fn normalize_hex_color(value: &str) -> Option<String> {
    let trimmed = value.trim();
    let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);
    if digits.len() == 6 && digits.chars().all(|ch| ch.is_ascii_hexdigit()) {
        Some(format!("#{}", digits.to_ascii_lowercase()))
    } else {
        None
    }
}

/// Overlays the usable keys of `raw` onto `fallback`.
///
/// Hex keys must normalize; `rowBorder` and `fontBody` accept any non-blank
/// string. Anything else (including a non-object `raw`) keeps the fallback.
pub fn normalize_theme_colors(raw: &Value, fallback: &ThemeColors) -> ThemeColors {
    let mut next = fallback.clone();

    for (key, slot) in next.hex_slots_mut() {
        if let Some(color) = raw.get(key).and_then(Value::as_str).and_then(normalize_hex_color) {
            *slot = color;
        }
    }
    if let Some(row_border) = non_blank(raw.get("rowBorder")) {
        next.row_border = row_border;
    }
    if let Some(font_body) = non_blank(raw.get("fontBody")) {
        next.font_body = font_body;
    }

    next
}

/// `Light` when the relative luminance of `bg` exceeds 0.58.
///
/// Unparseable colors count as dark.
pub fn color_scheme(bg: &str) -> ColorScheme {
    let Some(hex) = normalize_hex_color(bg) else {
        return ColorScheme::Dark;
    };
    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&hex[range], 16).map_or(0.0, f64::from)
    };
    let luminance = (0.2126 * channel(1..3) + 0.7152 * channel(3..5) + 0.0722 * channel(5..7)) / 255.0;
    if luminance > LIGHT_LUMINANCE {
        ColorScheme::Light
    } else {
        ColorScheme::Dark
    }
}

fn non_blank(value: Option<&Value>) -> Option<String> {
    let trimmed = value?.as_str()?.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}

/// Parses the stored custom theme list.
///
/// Anything but a JSON array yields no themes. Non-object entries are skipped;
/// a blank id becomes `custom-<seed>-<i>` and a blank name `Custom Theme <i+1>`.
pub fn parse_custom_themes(raw: &str, seed_millis: u128) -> Vec<Theme> {
    let Ok(Value::Array(items)) = serde_json::from_str::<Value>(raw) else {
        return Vec::new();
    };

    let fallback = ThemeColors::default();
    items
        .iter()
        .enumerate()
        .filter(|(_, item)| item.is_object() || item.is_array())
        .map(|(i, item)| Theme {
            id: non_blank(item.get("id")).unwrap_or_else(|| format!("custom-{seed_millis}-{i}")),
            name: non_blank(item.get("name")).unwrap_or_else(|| format!("Custom Theme {}", i + 1)),
            source: ThemeSource::Custom,
            colors: item
                .get("colors")
                .map_or_else(|| fallback.clone(), |colors| normalize_theme_colors(colors, &fallback)),
        })
        .collect()
}

/// The built-in and custom themes plus the selected id.
#[derive(Debug, Clone)]
pub struct ThemeBook {
    defaults: Vec<Theme>,
    custom: Vec<Theme>,
    selected_id: String,
}

impl Default for ThemeBook {
    fn default() -> Self {
        let defaults = default_themes();
        let selected_id = defaults[0].id.clone();
        Self {
            defaults,
            custom: Vec::new(),
            selected_id,
        }
    }
}

impl ThemeBook {
    /// Loads custom themes and the selected id from `store`.
    ///
    /// An unknown selected id resolves to the first default theme.
    pub fn load<S: KeyValueStore + ?Sized>(store: &S, now_millis: u128) -> Self {
        let mut book = Self::default();
        if let Some(raw) = store.get(STORAGE_CUSTOM_THEMES) {
            book.custom = parse_custom_themes(&raw, now_millis);
        }
        if let Some(selected) = store.get(STORAGE_SELECTED_THEME) {
            if let Some(id) = book.find(selected.trim()).map(|theme| theme.id.clone()) {
                book.selected_id = id;
            }
        }
        book
    }

    /// Built-in themes first, then custom themes in insertion order.
    pub fn themes(&self) -> impl Iterator<Item = &Theme> {
        self.defaults.iter().chain(self.custom.iter())
    }

    pub fn custom_themes(&self) -> &[Theme] {
        &self.custom
    }

    pub fn find(&self, id: &str) -> Option<&Theme> {
        self.themes().find(|theme| theme.id == id)
    }

    pub fn selected_id(&self) -> &str {
        &self.selected_id
    }

    /// The selected theme.
    pub fn active(&self) -> &Theme {
        self.find(&self.selected_id).unwrap_or(&self.defaults[0])
    }

    /// Selects `id` (unknown ids fall back to the first default) and persists
    /// the choice.
    pub fn set_active<S: KeyValueStore + ?Sized>(&mut self, store: &mut S, id: &str) -> &Theme {
        let resolved = self
            .find(id)
            .map_or_else(|| self.defaults[0].id.clone(), |theme| theme.id.clone());
        self.selected_id = resolved;
        set_or_warn(store, STORAGE_SELECTED_THEME, &self.selected_id);
        self.active()
    }

    /// Adds a custom theme from user-supplied JSON and makes it active.
    ///
    /// `json` is either a colors object or `{"colors": {...}}`. A blank `name`
    /// becomes `Custom Theme <n+1>`.
    pub fn add_custom<S: KeyValueStore + ?Sized>(
        &mut self,
        store: &mut S,
        name: &str,
        json: &str,
        now_millis: u128,
    ) -> Result<&Theme, SettingsError> {
        let source = json.trim();
        if source.is_empty() {
            return Err(SettingsError::EmptyThemeJson);
        }
        let parsed: Value = serde_json::from_str(source).map_err(SettingsError::InvalidThemeJson)?;

        let raw = match parsed.get("colors") {
            Some(colors) if colors.is_object() || colors.is_array() => colors,
            _ => &parsed,
        };
        let Some(object) = raw.as_object() else {
            return Err(SettingsError::ThemeNotObject);
        };
        if !SUPPORTED_KEYS.iter().any(|key| object.contains_key(*key)) {
            return Err(SettingsError::NoSupportedThemeKeys);
        }

        let name = match name.trim() {
            "" => format!("Custom Theme {}", self.custom.len() + 1),
            trimmed => trimmed.to_owned(),
        };
        let id = format!("custom-{now_millis}");
        let colors = normalize_theme_colors(raw, &ThemeColors::default());
        self.custom.push(Theme {
            id: id.clone(),
            name,
            source: ThemeSource::Custom,
            colors,
        });
        self.save_custom(store);
        Ok(self.set_active(store, &id))
    }

    /// Deletes a custom theme, returning it.
    ///
    /// Deleting the active theme re-activates the first default.
    pub fn delete_custom<S: KeyValueStore + ?Sized>(
        &mut self,
        store: &mut S,
        id: &str,
    ) -> Result<Theme, SettingsError> {
        let index = self
            .custom
            .iter()
            .position(|theme| theme.id == id)
            .ok_or(SettingsError::ThemeNotFound)?;
        let removed = self.custom.remove(index);
        self.save_custom(store);

        if self.selected_id == removed.id {
            let first = self.defaults[0].id.clone();
            self.set_active(store, &first);
        }
        Ok(removed)
    }

    fn save_custom<S: KeyValueStore + ?Sized>(&self, store: &mut S) {
        match serde_json::to_string(&self.custom) {
            Ok(json) => set_or_warn(store, STORAGE_CUSTOM_THEMES, &json),
            Err(e) => warn!(error = %e, "failed to serialize custom themes"),
        }
    }
}
