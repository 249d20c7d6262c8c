//! The fixed, ordered rule set applied to every notebook.
//!
//! Each [`Rule`] names a key, where to look for it, and what to do with it.
//! [`apply_rule`] runs a single rule so each one can be exercised alone.

use serde_json::{json, Map, Value};
use tracing::{debug, info, warn};

use crate::core::types::{CleanReport, ColabAction};

pub const WIDGET_VIEW_MIME: &str = "application/vnd.jupyter.widget-view+json";
pub const DEFAULT_COLAB_NAME: &str = "Python 3";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// The notebook-level `metadata` mapping.
    GlobalMetadata,
    /// Each cell's `metadata` mapping.
    CellMetadata,
    /// The `data` mapping of each output of each cell. Outputs whose `data`
    /// ends up empty are dropped.
    OutputData,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleAction {
    Remove,
    /// Collapse to `{"name": ...}` when `base_uri` is present, otherwise remove.
    ReduceColab,
    /// Log the key as cleaned but leave it in place.
    Flag,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    pub name: &'static str,
    pub scope: Scope,
    pub key: &'static str,
    pub action: RuleAction,
}

pub const RULES: &[Rule] = &[
    Rule {
        name: "global-widgets",
        scope: Scope::GlobalMetadata,
        key: "widgets",
        action: RuleAction::Remove,
    },
    Rule {
        name: "global-colab",
        scope: Scope::GlobalMetadata,
        key: "colab",
        action: RuleAction::ReduceColab,
    },
    // kernelspec and language_info are announced as cleaned but never
    // removed. Whether they should be deleted is unresolved, so the no-op is
    // kept and reported through `CleanReport::flagged_keys`.
    Rule {
        name: "global-kernelspec",
        scope: Scope::GlobalMetadata,
        key: "kernelspec",
        action: RuleAction::Flag,
    },
    Rule {
        name: "global-language-info",
        scope: Scope::GlobalMetadata,
        key: "language_info",
        action: RuleAction::Flag,
    },
    Rule {
        name: "cell-colab",
        scope: Scope::CellMetadata,
        key: "colab",
        action: RuleAction::Remove,
    },
    Rule {
        name: "cell-widgets",
        scope: Scope::CellMetadata,
        key: "widgets",
        action: RuleAction::Remove,
    },
    Rule {
        name: "output-widget-view",
        scope: Scope::OutputData,
        key: WIDGET_VIEW_MIME,
        action: RuleAction::Remove,
    },
];

pub fn find_rule(name: &str) -> Option<&'static Rule> {
    RULES.iter().find(|rule| rule.name == name)
}

pub fn apply_rule(rule: &Rule, notebook: &mut Value, report: &mut CleanReport) {
    debug!("applying rule {}", rule.name);
    match rule.scope {
        Scope::GlobalMetadata => {
            if let Some(metadata) = notebook.get_mut("metadata").and_then(Value::as_object_mut) {
                apply_action(rule, metadata, report);
            }
        }
        Scope::CellMetadata => {
            for cell in cells_mut(notebook) {
                if let Some(metadata) = cell.get_mut("metadata").and_then(Value::as_object_mut) {
                    apply_action(rule, metadata, report);
                }
            }
        }
        Scope::OutputData => {
            for cell in cells_mut(notebook) {
                let Some(outputs) = cell.get_mut("outputs").and_then(Value::as_array_mut) else {
                    continue;
                };
                let before = outputs.len();
                outputs.retain_mut(|output| {
                    let Some(data) = output.get_mut("data") else {
                        return true;
                    };
                    let Some(data) = data.as_object_mut() else {
                        return true;
                    };
                    apply_action(rule, data, report);
                    !data.is_empty()
                });
                report.outputs_dropped += before - outputs.len();
            }
        }
    }
}

fn cells_mut(notebook: &mut Value) -> impl Iterator<Item = &mut Value> {
    notebook
        .get_mut("cells")
        .and_then(Value::as_array_mut)
        .into_iter()
        .flatten()
}

fn apply_action(rule: &Rule, map: &mut Map<String, Value>, report: &mut CleanReport) {
    match rule.action {
        RuleAction::Remove => {
            if map.shift_remove(rule.key).is_none() {
                return;
            }
            match rule.scope {
                Scope::GlobalMetadata => {
                    info!("Removing {} metadata from notebook metadata...", rule.key);
                    report.global_keys_removed.push(rule.key.to_string());
                }
                Scope::CellMetadata => {
                    info!("Removing {} from cell metadata...", rule.key);
                    report.cell_metadata_keys_removed += 1;
                }
                Scope::OutputData => {
                    info!("Removing widget view from cell output...");
                    report.widget_views_removed += 1;
                }
            }
        }
        RuleAction::ReduceColab => {
            let Some(entry) = map.get_mut(rule.key) else {
                return;
            };
            info!("Cleaning {} from metadata...", rule.key);
            if entry.get("base_uri").is_some() {
                let name = entry
                    .get("name")
                    .cloned()
                    .unwrap_or_else(|| Value::String(DEFAULT_COLAB_NAME.to_string()));
                *entry = json!({ "name": name });
                report.colab_action = ColabAction::Reduced;
            } else {
                map.shift_remove(rule.key);
                report.colab_action = ColabAction::Removed;
            }
        }
        RuleAction::Flag => {
            if !map.contains_key(rule.key) {
                return;
            }
            info!("Cleaning {} from metadata...", rule.key);
            warn!("{} is reported as cleaned but is left in place", rule.key);
            report.flagged_keys.push(rule.key.to_string());
        }
    }
}
