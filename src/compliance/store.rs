//! Checker result store and its action reducer.
//!
//! State is immutable behind an [`Arc`]. Every action produces a new top-level
//! `Arc` when anything changes and hands back the same `Arc` when nothing
//! does, so callers can detect changes with [`Arc::ptr_eq`]. Unchanged
//! per-checker results are shared between states.

use super::types::{CheckerName, CheckerResult, CheckerResultPatch};
use crate::error::{Error, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

/// Snapshot of all checker results.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckerState {
    /// Whether the checker panel is visible
    pub show_checker: bool,
    /// Result per checker, in [`CheckerName::ALL`] order
    pub checkers: IndexMap<CheckerName, Arc<CheckerResult>>,
}

impl Default for CheckerState {
    fn default() -> Self {
        Self::new()
    }
}

impl CheckerState {
    /// State with every checker at its default result.
    pub fn new() -> Self {
        Self {
            show_checker: false,
            checkers: default_results(),
        }
    }

    /// Result of one checker.
    pub fn get(&self, name: CheckerName) -> Option<&CheckerResult> {
        self.checkers.get(&name).map(Arc::as_ref)
    }
}

fn default_results() -> IndexMap<CheckerName, Arc<CheckerResult>> {
    CheckerName::ALL
        .into_iter()
        .map(|name| (name, Arc::new(name.default_result())))
        .collect()
}

/// Result store actions.
///
/// Checker names are carried as the host's strings; unknown names make the
/// action a no-op.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    /// Flip panel visibility
    ToggleShowChecker,
    /// Flip the resolved flag of one checker
    MarkChecker {
        /// Checker wire name
        checker: String,
    },
    /// Reset every checker to its default
    RefreshChecker,
    /// Reset one checker to its default
    ResetChecker {
        /// Checker wire name
        checker: String,
    },
    /// Merge a partial result into one checker
    UpdateChecker {
        /// Checker wire name
        checker: String,
        /// Fields to overwrite
        #[serde(default)]
        data: Option<CheckerResultPatch>,
    },
}

const ACTION_TYPES: [&str; 5] = [
    "TOGGLE_SHOW_CHECKER",
    "MARK_CHECKER",
    "REFRESH_CHECKER",
    "RESET_CHECKER",
    "UPDATE_CHECKER",
];

impl Action {
    /// Mark action for a known checker.
    pub fn mark(name: CheckerName) -> Self {
        Action::MarkChecker {
            checker: name.as_str().to_string(),
        }
    }

    /// Reset action for a known checker.
    pub fn reset(name: CheckerName) -> Self {
        Action::ResetChecker {
            checker: name.as_str().to_string(),
        }
    }

    /// Update action for a known checker.
    pub fn update(name: CheckerName, data: CheckerResultPatch) -> Self {
        Action::UpdateChecker {
            checker: name.as_str().to_string(),
            data: Some(data),
        }
    }

    /// Decode a host action of the form `{"type": ..., "payload": ...}`.
    ///
    /// Any type outside the supported set is an [`Error::InvalidAction`].
    pub fn from_value(value: &Value) -> Result<Self> {
        let action_type = value
            .get("type")
            .and_then(Value::as_str)
            .ok_or_else(|| Error::InvalidAction(format!("missing action type in {}", value)))?;
        if !ACTION_TYPES.contains(&action_type) {
            return Err(Error::InvalidAction(action_type.to_string()));
        }
        // Unit actions carry no data; any payload the host attaches is ignored.
        match action_type {
            "TOGGLE_SHOW_CHECKER" => Ok(Action::ToggleShowChecker),
            "REFRESH_CHECKER" => Ok(Action::RefreshChecker),
            _ => Ok(serde_json::from_value(value.clone())?),
        }
    }
}

/// Apply `action` to `state`.
pub fn reduce(state: &Arc<CheckerState>, action: &Action) -> Arc<CheckerState> {
    match action {
        Action::ToggleShowChecker => Arc::new(CheckerState {
            show_checker: !state.show_checker,
            checkers: state.checkers.clone(),
        }),
        Action::MarkChecker { checker } => update_one(state, checker, |_, current| CheckerResult {
            resolved_manually: !current.resolved_manually,
            ..current.clone()
        }),
        Action::RefreshChecker => Arc::new(CheckerState {
            show_checker: state.show_checker,
            checkers: default_results(),
        }),
        Action::ResetChecker { checker } => {
            update_one(state, checker, |name, _| name.default_result())
        },
        Action::UpdateChecker { checker, data } => match data {
            Some(patch) => update_one(state, checker, |name, current| patch.apply(name, current)),
            None => Arc::clone(state),
        },
    }
}

/// Decode and apply a host action.
pub fn reduce_value(state: &Arc<CheckerState>, action: &Value) -> Result<Arc<CheckerState>> {
    let action = Action::from_value(action)?;
    Ok(reduce(state, &action))
}

fn update_one<F>(state: &Arc<CheckerState>, checker: &str, f: F) -> Arc<CheckerState>
where
    F: FnOnce(CheckerName, &CheckerResult) -> CheckerResult,
{
    let Some(name) = CheckerName::from_name(checker) else {
        log::debug!("Ignoring action for unknown checker '{}'", checker);
        return Arc::clone(state);
    };
    let Some(current) = state.checkers.get(&name) else {
        return Arc::clone(state);
    };
    let next = f(name, current);
    if next == **current {
        return Arc::clone(state);
    }
    let mut checkers = state.checkers.clone();
    checkers.insert(name, Arc::new(next));
    Arc::new(CheckerState {
        show_checker: state.show_checker,
        checkers,
    })
}

/// Single writer for checker results.
#[derive(Debug, Clone, Default)]
pub struct ResultStore {
    state: Arc<CheckerState>,
}

impl ResultStore {
    /// Store with default results.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current snapshot.
    pub fn state(&self) -> Arc<CheckerState> {
        Arc::clone(&self.state)
    }

    /// Result of one checker.
    pub fn get(&self, name: CheckerName) -> Option<&CheckerResult> {
        self.state.get(name)
    }

    /// Apply an action.
    pub fn dispatch(&mut self, action: &Action) {
        self.state = reduce(&self.state, action);
    }

    /// Decode and apply a host action.
    pub fn dispatch_value(&mut self, action: &Value) -> Result<()> {
        self.state = reduce_value(&self.state, action)?;
        Ok(())
    }
}
