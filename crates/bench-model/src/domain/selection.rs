use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// How the set of benchmarks for a run is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SelectionMode {
    /// Run exactly the benchmarks whose flag is set to `true`.
    ManuallySelected,
    /// Run every benchmark named in the request; flag values are ignored.
    All,
    /// Run the deploy-time default list; flags are not consulted.
    Default,
}

/// The triggering input for one orchestration run.
///
/// Unknown mode values fail deserialization, so a malformed request is
/// rejected before it ever reaches the resolver.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionRequest {
    pub mode: SelectionMode,
    /// Per-benchmark flags keyed by identifier. A `BTreeMap` keeps the
    /// iteration order deterministic across identical requests.
    #[serde(default)]
    pub flags: BTreeMap<String, bool>,
}
