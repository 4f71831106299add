//! Label synthesis.
//!
//! A [`LabelSynthesizer`] turns a [`Workspace`] snapshot into the name it
//! should carry.  It is a pure function of the snapshot and the injected
//! [`AliasTable`]: calling it twice on the same workspace always gives the
//! same label.
//!
//! # Rules
//!
//! * Each leaf contributes a [`Descriptor`]: its application token, else its
//!   title, else nothing.
//! * The first descriptor is the primary one.  Manager order is kept as is.
//! * The ordinal is the workspace number, else the leading digits of the
//!   current name (`"3:code"` → 3).
//! * Application tokens go through the alias table, titles never do.
//! * A workspace without descriptors is labeled per [`EmptyPolicy`].

use crate::alias::AliasTable;
use crate::classify::classify;
use crate::model::Workspace;
use serde::{Deserialize, Serialize};

/// What to call a workspace that has no windows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmptyPolicy {
    /// Fall back to the bare ordinal: the workspace number, else the leading
    /// digits of the current name, else the current name unchanged.
    #[default]
    NumericFallback,
    /// Keep the current name; only an empty name is replaced by the
    /// workspace number.
    PreserveExisting,
}

/// What a single leaf window contributes to the label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Descriptor {
    /// Normalized class/instance token.  Subject to alias lookup.
    App(String),
    /// Raw window title.  Used verbatim.
    Title(String),
}

/// Collect the descriptors of `workspace`, in manager order.
pub fn descriptors(workspace: &Workspace) -> Vec<Descriptor> {
    workspace
        .windows
        .iter()
        .filter_map(|window| {
            let token = classify(window);
            if !token.is_empty() {
                return Some(Descriptor::App(token));
            }
            window
                .name
                .as_deref()
                .filter(|title| !title.is_empty())
                .map(|title| Descriptor::Title(title.to_string()))
        })
        .collect()
}

/// The run of ASCII digits at the start of `name`, if any.
pub fn leading_digits(name: &str) -> Option<&str> {
    let end = name
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map(|(i, _)| i)
        .unwrap_or(name.len());
    (end > 0).then(|| &name[..end])
}

/// Resolve the ordinal of `workspace`: its number if set, else the leading
/// digits of its name.  Never fails; an unparsable name gives `None`.
pub fn resolve_ordinal(workspace: &Workspace) -> Option<i64> {
    workspace
        .num
        .or_else(|| leading_digits(&workspace.name).and_then(|d| d.parse().ok()))
}

/// Computes canonical workspace labels.
#[derive(Debug, Clone)]
pub struct LabelSynthesizer {
    aliases: AliasTable,
    empty_policy: EmptyPolicy,
}

impl LabelSynthesizer {
    pub fn new(aliases: AliasTable, empty_policy: EmptyPolicy) -> Self {
        Self {
            aliases,
            empty_policy,
        }
    }

    /// Compute the canonical label for `workspace`.
    pub fn synthesize(&self, workspace: &Workspace) -> String {
        let descriptors = descriptors(workspace);
        let Some(primary) = descriptors.first() else {
            return self.empty_label(workspace);
        };

        let display = match primary {
            Descriptor::App(token) => self.aliases.resolve(token),
            Descriptor::Title(title) => title.as_str(),
        };

        match resolve_ordinal(workspace) {
            Some(n) => format!("{}: {}", n, display),
            None => display.to_string(),
        }
    }

    fn empty_label(&self, workspace: &Workspace) -> String {
        match self.empty_policy {
            EmptyPolicy::NumericFallback => match workspace.num {
                Some(n) => n.to_string(),
                None => leading_digits(&workspace.name)
                    .unwrap_or(&workspace.name)
                    .to_string(),
            },
            EmptyPolicy::PreserveExisting => {
                if !workspace.name.is_empty() {
                    workspace.name.clone()
                } else {
                    workspace.num.map(|n| n.to_string()).unwrap_or_default()
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Window;

    fn synth(policy: EmptyPolicy) -> LabelSynthesizer {
        let aliases = AliasTable::from_pairs([("firefox", "Web"), ("code", "Editor")]);
        LabelSynthesizer::new(aliases, policy)
    }

    //  Descriptors

    #[test]
    fn descriptors_keep_manager_order_and_skip_blank_leaves() {
        let ws = Workspace::new(Some(1), "1").with_windows([
            Window::with_class("Zathura"),
            Window::default(),
            Window::with_title("notes.txt"),
            Window::with_class("Alacritty"),
        ]);
        assert_eq!(
            descriptors(&ws),
            vec![
                Descriptor::App("zathura".into()),
                Descriptor::Title("notes.txt".into()),
                Descriptor::App("alacritty".into()),
            ]
        );
    }

    //  Ordinals

    #[test]
    fn leading_digits_extraction() {
        assert_eq!(leading_digits("3:code"), Some("3"));
        assert_eq!(leading_digits("12 mail"), Some("12"));
        assert_eq!(leading_digits("07"), Some("07"));
        assert_eq!(leading_digits("mail"), None);
        assert_eq!(leading_digits(""), None);
        assert_eq!(leading_digits("١٢"), None, "only ASCII digits count");
    }

    #[test]
    fn ordinal_prefers_workspace_number() {
        let ws = Workspace::new(Some(4), "9: misc");
        assert_eq!(resolve_ordinal(&ws), Some(4));
    }

    #[test]
    fn ordinal_overflow_degrades_to_none() {
        let ws = Workspace::new(None, "99999999999999999999999: huge");
        assert_eq!(resolve_ordinal(&ws), None);
    }

    //  Non-empty workspaces

    #[test]
    fn numbered_workspace_with_alias() {
        let ws = Workspace::new(Some(2), "2").with_windows([Window::with_class("firefox")]);
        assert_eq!(synth(EmptyPolicy::default()).synthesize(&ws), "2: Web");
    }

    #[test]
    fn named_workspace_ordinal_from_name() {
        let ws = Workspace::new(None, "3:code").with_windows([Window::with_class("code")]);
        assert_eq!(synth(EmptyPolicy::default()).synthesize(&ws), "3: Editor");
    }

    #[test]
    fn title_used_verbatim() {
        let ws = Workspace::new(None, "notes").with_windows([Window::with_title("My Notes")]);
        assert_eq!(synth(EmptyPolicy::default()).synthesize(&ws), "My Notes");
    }

    #[test]
    fn title_is_never_alias_resolved() {
        // A title that happens to equal an alias key stays as is.
        let ws = Workspace::new(Some(1), "1").with_windows([Window::with_title("firefox")]);
        assert_eq!(synth(EmptyPolicy::default()).synthesize(&ws), "1: firefox");
    }

    #[test]
    fn first_window_wins() {
        let ws = Workspace::new(Some(6), "6")
            .with_windows([Window::with_class("code"), Window::with_class("firefox")]);
        assert_eq!(synth(EmptyPolicy::default()).synthesize(&ws), "6: Editor");
    }

    #[test]
    fn unknown_app_uses_lowercased_token() {
        let ws = Workspace::new(Some(7), "7").with_windows([Window::with_class("Thunderbird")]);
        assert_eq!(synth(EmptyPolicy::default()).synthesize(&ws), "7: thunderbird");
    }

    #[test]
    fn named_workspace_without_digits_has_no_ordinal() {
        let ws = Workspace::new(None, "mail").with_windows([Window::with_class("firefox")]);
        assert_eq!(synth(EmptyPolicy::default()).synthesize(&ws), "Web");
    }

    #[test]
    fn synthesize_is_idempotent() {
        let s = synth(EmptyPolicy::default());
        let ws = Workspace::new(None, "3:code").with_windows([Window::with_class("code")]);
        let first = s.synthesize(&ws);
        assert_eq!(first, s.synthesize(&ws));

        // Feeding the label back as the name is a fixed point.
        let renamed = Workspace { name: first.clone(), ..ws };
        assert_eq!(s.synthesize(&renamed), first);
    }

    //  Empty workspaces

    #[test]
    fn numeric_fallback_uses_number() {
        let ws = Workspace::new(Some(5), "5: Editor");
        assert_eq!(synth(EmptyPolicy::NumericFallback).synthesize(&ws), "5");
    }

    #[test]
    fn preserve_existing_keeps_name() {
        let ws = Workspace::new(Some(5), "5: Editor");
        assert_eq!(synth(EmptyPolicy::PreserveExisting).synthesize(&ws), "5: Editor");
    }

    #[test]
    fn numeric_fallback_on_named_workspace() {
        let s = synth(EmptyPolicy::NumericFallback);
        assert_eq!(s.synthesize(&Workspace::new(None, "08: mail")), "08");
        assert_eq!(s.synthesize(&Workspace::new(None, "music")), "music");
        assert_eq!(s.synthesize(&Workspace::new(None, "")), "");
    }

    #[test]
    fn preserve_existing_with_empty_name() {
        let s = synth(EmptyPolicy::PreserveExisting);
        assert_eq!(s.synthesize(&Workspace::new(Some(3), "")), "3");
        assert_eq!(s.synthesize(&Workspace::new(None, "")), "");
    }

    #[test]
    fn blank_leaves_count_as_empty() {
        let ws = Workspace::new(Some(5), "5: Editor").with_windows([
            Window::default(),
            Window::with_title(""),
        ]);
        assert_eq!(synth(EmptyPolicy::NumericFallback).synthesize(&ws), "5");
        assert_eq!(synth(EmptyPolicy::PreserveExisting).synthesize(&ws), "5: Editor");
    }
}
