//! Token → display string mapping.
//!
//! The [`AliasTable`] is plain configuration: a read-only map handed to the
//! label synthesizer.  Keys are normalized (trimmed, lower-cased) on
//! insertion and on lookup, so matching is exact but case-insensitive.
//! Unknown tokens pass through unchanged.

use std::collections::HashMap;

/// Built-in aliases: Nerd Font glyphs for common applications.
const BUILTIN: &[(&str, &str)] = &[
    // Browsers
    ("firefox", "\u{E658}"),
    ("google-chrome", "\u{F268}"),
    ("chromium", "\u{F268}"),
    // Terminals
    ("alacritty", "\u{EBCA}"),
    ("kitty", "\u{EBCA}"),
    ("st", "\u{EBCA}"),
    ("foot", "\u{EBCA}"),
    // Editors
    ("code", "\u{F0A1E}"),
    ("code-oss", "\u{F0A1E}"),
    ("nvim", "\u{F36F}"),
    ("neovide", "\u{F36F}"),
    ("vim", "\u{E7C5}"),
    ("emacs", "\u{E632}"),
    // Development
    ("jetbrains-idea", "\u{E7B5}"),
    ("jetbrains-clion", "\u{E61D}"),
    ("jetbrains-pycharm", "\u{E73C}"),
    ("jetbrains-goland", "\u{E627}"),
    ("jetbrains-datagrip", "\u{F1C0}"),
    ("postman", "\u{F06EE}"),
    ("docker", "\u{F21F}"),
    ("virt-manager", "\u{F0894}"),
    ("virtualbox", "\u{F0894}"),
    // Communication
    ("telegramdesktop", "\u{F2C6}"),
    ("telegram", "\u{F2C6}"),
    ("evolution", "\u{F01F0}"),
    // Media
    ("pavucontrol", "\u{F057E}"),
    ("vlc", "\u{F057C}"),
    ("mpv", "\u{F36E}"),
    ("obs", "\u{F044B}"),
    ("gimp", "\u{F338}"),
    ("inkscape", "\u{F33B}"),
    ("steam", "\u{F1B6}"),
    // System & utilities
    ("thunar", "\u{F07B}"),
    ("yazi", "\u{F07B}"),
    ("htop", "\u{F04C5}"),
    ("btop", "\u{F04C5}"),
    ("gparted", "\u{F02CA}"),
    ("galculator", "\u{F1EC}"),
    ("zathura", "\u{F1C1}"),
];

fn normalize(token: &str) -> String {
    token.trim().to_lowercase()
}

/// Read-only alias lookup table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasTable {
    map: HashMap<String, String>,
}

impl AliasTable {
    /// An empty table: every token resolves to itself.
    pub fn new() -> Self {
        Self::default()
    }

    /// The compiled-in glyph table.
    pub fn builtin() -> Self {
        Self::from_pairs(BUILTIN.iter().copied())
    }

    /// Build a table from `(token, display)` pairs.  Later pairs override
    /// earlier ones with the same normalized key.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut table = Self::new();
        table.extend(pairs);
        table
    }

    /// Insert or override entries.
    pub fn extend<K, V>(&mut self, pairs: impl IntoIterator<Item = (K, V)>)
    where
        K: AsRef<str>,
        V: Into<String>,
    {
        for (k, v) in pairs {
            self.map.insert(normalize(k.as_ref()), v.into());
        }
    }

    /// Resolve `token` to its display string, or return it unchanged.
    pub fn resolve<'a>(&'a self, token: &'a str) -> &'a str {
        self.map
            .get(&normalize(token))
            .map(String::as_str)
            .unwrap_or(token)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
