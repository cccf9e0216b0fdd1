use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use rustc_hash::FxHashMap;

use crate::utils::normalize_path;

/// Quiet period after the last event before a rebuild may start.
pub(super) const DEBOUNCE_MS: u64 = 300;
/// Minimum spacing between two consecutive rebuilds.
pub(super) const REBUILD_COOLDOWN_MS: u64 = 800;

/// Net effect of the events seen for one path within the current window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum ChangeKind {
    Created,
    Modified,
    Removed,
}

impl ChangeKind {
    pub(super) fn label(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Modified => "modified",
            Self::Removed => "removed",
        }
    }
}

/// Collapses bursts of watcher events into one rebuild trigger.
///
/// Timing and per-path deduplication only; what the surviving paths mean is
/// the caller's problem.
pub(super) struct Debouncer {
    /// One entry per touched path, holding its net change.
    pub(super) pending: FxHashMap<PathBuf, ChangeKind>,
    pub(super) last_seen: Option<Instant>,
    pub(super) last_build: Option<Instant>,
}

impl Debouncer {
    pub(super) fn new() -> Self {
        Self {
            pending: FxHashMap::default(),
            last_seen: None,
            last_build: None,
        }
    }

    /// Fold a notify event into the pending set.
    ///
    /// Per-path merge: a remove followed by a create/modify counts as the
    /// later event (editor save-via-rename), a modify followed by a remove
    /// counts as removed, a create followed by a remove cancels out, and
    /// anything else keeps the earliest kind.
    pub(super) fn add_event(&mut self, event: &notify::Event) {
        let Some(kind) = change_kind(&event.kind) else {
            return;
        };

        for raw in &event.paths {
            if is_editor_artifact(raw) {
                continue;
            }

            let path = normalize_path(raw);
            let next = match self.pending.get(&path) {
                None => Some(kind),
                Some(&prior) => match (prior, kind) {
                    (ChangeKind::Removed, ChangeKind::Created | ChangeKind::Modified) => Some(kind),
                    (ChangeKind::Modified, ChangeKind::Removed) => Some(ChangeKind::Removed),
                    (ChangeKind::Created, ChangeKind::Removed) => None,
                    _ => continue,
                },
            };

            match next {
                Some(kind) => {
                    crate::debug!("watch"; "{}: {}", kind.label(), path.display());
                    self.pending.insert(path, kind);
                }
                None => {
                    crate::debug!("watch"; "cancelled: {}", path.display());
                    self.pending.remove(&path);
                }
            }
            self.last_seen = Some(Instant::now());
        }
    }

    /// Drain the pending set once both the quiet period and the build
    /// cooldown have passed.
    pub(super) fn take_if_ready(&mut self) -> Option<FxHashMap<PathBuf, ChangeKind>> {
        if !self.is_ready() {
            return None;
        }

        let pending = std::mem::take(&mut self.pending);
        self.last_seen = None;

        if pending.is_empty() {
            return None;
        }

        self.last_build = Some(Instant::now());
        Some(pending)
    }

    pub(super) fn is_ready(&self) -> bool {
        let Some(last_seen) = self.last_seen else {
            return false;
        };

        if last_seen.elapsed() < Duration::from_millis(DEBOUNCE_MS) {
            return false;
        }

        if let Some(last_build) = self.last_build
            && last_build.elapsed() < Duration::from_millis(REBUILD_COOLDOWN_MS)
        {
            return false;
        }

        !self.pending.is_empty()
    }

    /// How long the event loop may sleep before anything can become ready.
    pub(super) fn sleep_duration(&self) -> Duration {
        let Some(last_seen) = self.last_seen else {
            return Duration::from_secs(86400);
        };

        let quiet = Duration::from_millis(DEBOUNCE_MS).saturating_sub(last_seen.elapsed());
        let cooldown = self
            .last_build
            .map(|t| Duration::from_millis(REBUILD_COOLDOWN_MS).saturating_sub(t.elapsed()))
            .unwrap_or(Duration::ZERO);

        quiet.max(cooldown).max(Duration::from_millis(1))
    }
}

/// Translate a notify event kind, dropping the ones that never warrant a
/// rebuild. Metadata-only modifications are filtered because chmod/mtime
/// churn would otherwise loop the rebuild forever.
fn change_kind(kind: &notify::EventKind) -> Option<ChangeKind> {
    use notify::EventKind;

    match kind {
        EventKind::Create(_) => Some(ChangeKind::Created),
        EventKind::Remove(_) => Some(ChangeKind::Removed),
        EventKind::Modify(notify::event::ModifyKind::Metadata(_)) => None,
        EventKind::Modify(_) => Some(ChangeKind::Modified),
        _ => None,
    }
}

/// Editor droppings: swap/backup files and dotfiles never feed a rebuild.
fn is_editor_artifact(path: &Path) -> bool {
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

    matches!(ext, "bck" | "bak" | "backup" | "swp" | "swo" | "tmp")
        || name.ends_with('~')
        || name.starts_with('.')
}
