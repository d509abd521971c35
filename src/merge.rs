//! Reconciles plugin lists declared at two document locations.

use crate::types::{PluginInstance, Plugins};

/// Concatenates `primary` then `secondary` and drops every instance that is
/// structurally equal to one already kept. First occurrences keep their order.
pub fn merge(primary: &[PluginInstance], secondary: &[PluginInstance]) -> Plugins {
    let combined: Vec<&PluginInstance> = primary.iter().chain(secondary).collect();
    dedupe_refs(combined)
}

pub fn dedupe(plugins: &[PluginInstance]) -> Plugins {
    dedupe_refs(plugins.iter().collect())
}

fn dedupe_refs(plugins: Vec<&PluginInstance>) -> Plugins {
    let mut out: Plugins = Vec::with_capacity(plugins.len());
    for plugin in plugins {
        // Quadratic: each candidate is compared with every kept plugin.
        if out.iter().any(|seen| seen == plugin) {
            tracing::debug!(name = %plugin.name, "dropping duplicate plugin");
            continue;
        }
        out.push(plugin.clone());
    }
    out
}
