//! The reconciliation pass that ties snapshot, synthesizer and reconciler
//! together.
//!
//! [`LabelEngine`] owns the command-side [`WindowManager`] and a
//! [`LabelSynthesizer`].  Each call to [`pass`](LabelEngine::pass) fetches a
//! fresh snapshot and reconciles every workspace in it.  No state is kept
//! between passes, so a missed or reordered event is corrected by the next
//! one.

use crate::label::LabelSynthesizer;
use crate::model::Workspace;
use crate::reconcile::{reconcile, Outcome};
use crate::traits::WindowManager;
use log::{debug, warn};

/// Errors that abort a whole pass.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The snapshot could not be fetched.
    #[error("tree fetch failed: {0}")]
    Snapshot(String),
}

/// Name i3 gives its internal scratchpad workspace.
pub const SCRATCHPAD_NAME: &str = "__i3_scratch";

/// Per-outcome counts for one pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassSummary {
    pub unchanged: usize,
    pub renamed: usize,
    pub failed: usize,
}

impl PassSummary {
    fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Unchanged => self.unchanged += 1,
            Outcome::Renamed => self.renamed += 1,
            Outcome::Failed => self.failed += 1,
        }
    }
}

/// Recomputes and applies workspace labels.
pub struct LabelEngine<W: WindowManager> {
    wm: W,
    synthesizer: LabelSynthesizer,
}

impl<W: WindowManager> LabelEngine<W> {
    pub fn new(wm: W, synthesizer: LabelSynthesizer) -> Self {
        Self { wm, synthesizer }
    }

    /// Shared access to the underlying window manager.
    pub fn wm(&self) -> &W {
        &self.wm
    }

    fn snapshot(&mut self) -> Result<Vec<Workspace>, EngineError> {
        self.wm
            .workspaces()
            .map_err(|e| EngineError::Snapshot(e.to_string()))
    }

    /// Run one full reconciliation pass.
    ///
    /// Only a failed snapshot aborts the pass.  Per-workspace failures are
    /// logged by the reconciler and counted in the summary.
    pub fn pass(&mut self) -> Result<PassSummary, EngineError> {
        let workspaces = self.snapshot()?;
        let mut summary = PassSummary::default();

        for ws in workspaces.iter().filter(|ws| !ws.scratchpad) {
            let label = self.synthesizer.synthesize(ws);
            debug!("workspace {:?} ({:?}) -> {:?}", ws.name, ws.num, label);
            summary.record(reconcile(&mut self.wm, ws, &label));
        }

        debug!(
            "pass done: {} renamed, {} unchanged, {} failed",
            summary.renamed, summary.unchanged, summary.failed
        );
        Ok(summary)
    }

    /// Restore the scratchpad's reserved name if something renamed it.
    ///
    /// i3 only hides the scratchpad from the bar while it carries its
    /// reserved name.  Returns whether a repair was issued.
    pub fn repair_scratchpad(&mut self) -> Result<bool, EngineError> {
        let workspaces = self.snapshot()?;
        let Some(ws) = workspaces
            .iter()
            .find(|ws| ws.scratchpad && ws.name != SCRATCHPAD_NAME)
        else {
            return Ok(false);
        };

        warn!(
            "scratchpad workspace was renamed to '{}', restoring '{}'",
            ws.name, SCRATCHPAD_NAME
        );
        Ok(reconcile(&mut self.wm, ws, SCRATCHPAD_NAME) == Outcome::Renamed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alias::AliasTable;
    use crate::label::EmptyPolicy;
    use crate::model::Window;

    //  Mock WindowManager

    /// Serves a fixed snapshot and applies renames to it, like i3 would.
    #[derive(Debug, Default)]
    struct FakeWm {
        workspaces: Vec<Workspace>,
        commands: Vec<String>,
        reject: Vec<String>,
        tree_broken: bool,
    }

    #[derive(Debug, thiserror::Error)]
    #[error("fake wm error: {0}")]
    struct FakeErr(String);

    impl FakeWm {
        fn with(workspaces: Vec<Workspace>) -> Self {
            Self {
                workspaces,
                ..Self::default()
            }
        }
    }

    impl WindowManager for FakeWm {
        type Error = FakeErr;

        fn workspaces(&mut self) -> Result<Vec<Workspace>, FakeErr> {
            if self.tree_broken {
                return Err(FakeErr("connection reset".into()));
            }
            Ok(self.workspaces.clone())
        }

        fn run_command(&mut self, command: &str) -> Result<(), FakeErr> {
            self.commands.push(command.to_string());
            if self.reject.iter().any(|r| command.contains(r.as_str())) {
                return Err(FakeErr(format!("rejected {}", command)));
            }
            // Apply the rename so repeated passes see the new state.
            let (target, new) = command
                .strip_prefix("rename workspace ")
                .and_then(|rest| rest.split_once(" to "))
                .ok_or_else(|| FakeErr(format!("unparsable {}", command)))?;
            let new = new.trim_matches('"').replace("\\\"", "\"");
            let ws = if let Some(num) = target.strip_prefix("number ") {
                let num: i64 = num.parse().map_err(|_| FakeErr(num.into()))?;
                self.workspaces.iter_mut().find(|w| w.num == Some(num))
            } else {
                let old = target.trim_matches('"').replace("\\\"", "\"");
                self.workspaces.iter_mut().find(|w| w.name == old)
            };
            ws.ok_or_else(|| FakeErr("no such workspace".into()))?.name = new;
            Ok(())
        }
    }

    fn engine(wm: FakeWm, policy: EmptyPolicy) -> LabelEngine<FakeWm> {
        let aliases = AliasTable::from_pairs([("firefox", "Web"), ("code", "Editor")]);
        LabelEngine::new(wm, LabelSynthesizer::new(aliases, policy))
    }

    fn scratchpad(name: &str) -> Workspace {
        Workspace {
            scratchpad: true,
            ..Workspace::new(None, name)
        }
    }

    #[test]
    fn renames_numbered_workspace_with_alias() {
        let wm = FakeWm::with(vec![
            Workspace::new(Some(2), "2").with_windows([Window::with_class("firefox")])
        ]);
        let mut e = engine(wm, EmptyPolicy::NumericFallback);
        let summary = e.pass().unwrap();
        assert_eq!(summary.renamed, 1);
        assert_eq!(e.wm().commands, vec![r#"rename workspace "2" to "2: Web""#]);
    }

    #[test]
    fn named_workspace_gets_ordinal_from_name() {
        let wm = FakeWm::with(vec![
            Workspace::new(None, "3:code").with_windows([Window::with_class("code")])
        ]);
        let mut e = engine(wm, EmptyPolicy::NumericFallback);
        e.pass().unwrap();
        assert_eq!(
            e.wm().commands,
            vec![r#"rename workspace "3:code" to "3: Editor""#]
        );
    }

    #[test]
    fn numeric_fallback_renames_empty_workspace() {
        let wm = FakeWm::with(vec![Workspace::new(Some(5), "5: Editor")]);
        let mut e = engine(wm, EmptyPolicy::NumericFallback);
        assert_eq!(e.pass().unwrap().renamed, 1);
        assert_eq!(e.wm().commands, vec![r#"rename workspace "5: Editor" to "5""#]);
    }

    #[test]
    fn preserve_existing_leaves_empty_workspace() {
        let wm = FakeWm::with(vec![Workspace::new(Some(5), "5: Editor")]);
        let mut e = engine(wm, EmptyPolicy::PreserveExisting);
        let summary = e.pass().unwrap();
        assert_eq!(summary.unchanged, 1);
        assert!(e.wm().commands.is_empty());
    }

    #[test]
    fn title_only_window_names_workspace() {
        let wm = FakeWm::with(vec![
            Workspace::new(None, "notes").with_windows([Window::with_title("My Notes")])
        ]);
        let mut e = engine(wm, EmptyPolicy::NumericFallback);
        e.pass().unwrap();
        assert_eq!(
            e.wm().commands,
            vec![r#"rename workspace "notes" to "My Notes""#]
        );
    }

    #[test]
    fn second_pass_is_a_no_op() {
        let wm = FakeWm::with(vec![
            Workspace::new(Some(1), "1").with_windows([Window::with_class("firefox")]),
            Workspace::new(Some(2), "2: stale"),
            Workspace::new(None, "3:code").with_windows([Window::with_class("code")]),
        ]);
        let mut e = engine(wm, EmptyPolicy::NumericFallback);
        assert_eq!(e.pass().unwrap().renamed, 3);
        let again = e.pass().unwrap();
        assert_eq!(again, PassSummary { unchanged: 3, renamed: 0, failed: 0 });
        assert_eq!(e.wm().commands.len(), 3);
    }

    #[test]
    fn failure_does_not_stop_the_pass() {
        let mut wm = FakeWm::with(vec![
            Workspace::new(Some(1), "1").with_windows([Window::with_class("firefox")]),
            Workspace::new(Some(2), "2").with_windows([Window::with_class("code")]),
        ]);
        wm.reject.push("1: Web".into());
        let mut e = engine(wm, EmptyPolicy::NumericFallback);
        let summary = e.pass().unwrap();
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.renamed, 1);
        assert_eq!(e.wm().workspaces[1].name, "2: Editor");
    }

    #[test]
    fn snapshot_failure_aborts_pass() {
        let mut wm = FakeWm::with(vec![Workspace::new(Some(1), "1")]);
        wm.tree_broken = true;
        let mut e = engine(wm, EmptyPolicy::NumericFallback);
        assert!(matches!(e.pass(), Err(EngineError::Snapshot(_))));
    }

    #[test]
    fn scratchpad_is_never_labeled() {
        let wm = FakeWm::with(vec![scratchpad(SCRATCHPAD_NAME)
            .with_windows([Window::with_class("firefox")])]);
        let mut e = engine(wm, EmptyPolicy::NumericFallback);
        assert_eq!(e.pass().unwrap(), PassSummary::default());
        assert!(e.wm().commands.is_empty());
    }

    #[test]
    fn repair_restores_renamed_scratchpad() {
        let wm = FakeWm::with(vec![Workspace::new(Some(1), "1"), scratchpad("Web")]);
        let mut e = engine(wm, EmptyPolicy::NumericFallback);
        assert!(e.repair_scratchpad().unwrap());
        assert_eq!(
            e.wm().commands,
            vec![r#"rename workspace "Web" to "__i3_scratch""#]
        );
        assert!(!e.repair_scratchpad().unwrap(), "second repair is a no-op");
    }

    #[test]
    fn healthy_scratchpad_needs_no_repair() {
        let wm = FakeWm::with(vec![scratchpad(SCRATCHPAD_NAME)]);
        let mut e = engine(wm, EmptyPolicy::NumericFallback);
        assert!(!e.repair_scratchpad().unwrap());
        assert!(e.wm().commands.is_empty());
    }
}
