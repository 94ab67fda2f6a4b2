use tracing::debug;

use bench_model::{JobList, SelectionMode, SelectionRequest};

use crate::error::ResolveError;

/// Deploy-time knobs for turning a selection request into a job list.
#[derive(Debug, Clone)]
pub struct ResolveConfig {
    /// Benchmarks used when the request carries `SelectionMode::Default`.
    /// Empty by default; deployments supply their fixed list.
    pub default_benchmarks: Vec<String>,
    /// Request keys that are control inputs rather than benchmark ids.
    /// Stripped before any mode rule is applied.
    pub control_keys: Vec<String>,
}

impl Default for ResolveConfig {
    fn default() -> Self {
        Self {
            default_benchmarks: Vec::new(),
            control_keys: vec!["mode".to_string()],
        }
    }
}

/// Resolves a selection request into the validated job list for one run.
///
/// Pure and idempotent: ids are trimmed, empties dropped, duplicates removed
/// keeping the first occurrence. Zero surviving ids is a hard failure, not an
/// empty run.
pub fn resolve(request: &SelectionRequest, cfg: &ResolveConfig) -> Result<JobList, ResolveError> {
    let candidates = request
        .flags
        .iter()
        .filter(|(key, _)| !cfg.control_keys.iter().any(|c| c == *key))
        .map(|(key, enabled)| (key.trim(), *enabled))
        .filter(|(key, _)| !key.is_empty());

    let selected: Vec<String> = match request.mode {
        SelectionMode::ManuallySelected => candidates
            .filter(|(_, enabled)| *enabled)
            .map(|(key, _)| key.to_string())
            .collect(),
        SelectionMode::All => candidates.map(|(key, _)| key.to_string()).collect(),
        SelectionMode::Default => cfg
            .default_benchmarks
            .iter()
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty())
            .collect(),
    };

    let mut items: Vec<String> = Vec::with_capacity(selected.len());
    for id in selected {
        if !items.contains(&id) {
            items.push(id);
        }
    }

    debug!(target: "bench.core", jobs = items.len(), mode = ?request.mode, "selection resolved");
    JobList::new(items).ok_or(ResolveError::EmptySelection)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn request(mode: SelectionMode, flags: &[(&str, bool)]) -> SelectionRequest {
        SelectionRequest {
            mode,
            flags: flags
                .iter()
                .map(|(k, v)| (k.to_string(), *v))
                .collect::<BTreeMap<_, _>>(),
        }
    }

    fn ids(list: &JobList) -> Vec<&str> {
        list.iter().map(String::as_str).collect()
    }

    #[test]
    fn manual_mode_keeps_only_true_flags() {
        let req = request(
            SelectionMode::ManuallySelected,
            &[("a", true), ("b", false), ("c", true)],
        );
        let list = resolve(&req, &ResolveConfig::default()).unwrap();
        assert_eq!(ids(&list), vec!["a", "c"]);
    }

    #[test]
    fn manual_mode_with_no_true_flags_fails() {
        let req = request(SelectionMode::ManuallySelected, &[("a", false)]);
        let err = resolve(&req, &ResolveConfig::default()).unwrap_err();
        assert_eq!(err, ResolveError::EmptySelection);
    }

    #[test]
    fn all_mode_ignores_flag_values() {
        let req = request(SelectionMode::All, &[("a", true), ("b", false)]);
        let list = resolve(&req, &ResolveConfig::default()).unwrap();
        assert_eq!(ids(&list), vec!["a", "b"]);
    }

    #[test]
    fn default_mode_uses_configured_list_verbatim() {
        let cfg = ResolveConfig {
            default_benchmarks: vec!["cpu_bound".to_string(), "io_heavy".to_string()],
            ..Default::default()
        };
        let req = request(SelectionMode::Default, &[]);
        let list = resolve(&req, &cfg).unwrap();
        assert_eq!(ids(&list), vec!["cpu_bound", "io_heavy"]);
    }

    #[test]
    fn default_mode_does_not_consult_flags() {
        let cfg = ResolveConfig {
            default_benchmarks: vec!["cpu_bound".to_string()],
            ..Default::default()
        };
        let req = request(SelectionMode::Default, &[("other", true)]);
        let list = resolve(&req, &cfg).unwrap();
        assert_eq!(ids(&list), vec!["cpu_bound"]);
    }

    #[test]
    fn default_mode_with_empty_configured_list_fails() {
        let req = request(SelectionMode::Default, &[]);
        let err = resolve(&req, &ResolveConfig::default()).unwrap_err();
        assert_eq!(err, ResolveError::EmptySelection);
    }

    #[test]
    fn control_keys_are_excluded_before_mode_rules() {
        let req = request(SelectionMode::All, &[("mode", true), ("a", true)]);
        let list = resolve(&req, &ResolveConfig::default()).unwrap();
        assert_eq!(ids(&list), vec!["a"]);
    }

    #[test]
    fn control_keys_are_configurable() {
        let cfg = ResolveConfig {
            control_keys: vec!["mode".to_string(), "dry_run".to_string()],
            ..Default::default()
        };
        let req = request(SelectionMode::All, &[("dry_run", true), ("a", true)]);
        let list = resolve(&req, &cfg).unwrap();
        assert_eq!(ids(&list), vec!["a"]);
    }

    #[test]
    fn only_control_keys_is_an_empty_selection() {
        let req = request(SelectionMode::All, &[("mode", true)]);
        let err = resolve(&req, &ResolveConfig::default()).unwrap_err();
        assert_eq!(err, ResolveError::EmptySelection);
    }

    #[test]
    fn ids_are_trimmed_and_empties_dropped() {
        let req = request(SelectionMode::All, &[("  a  ", true), ("   ", true)]);
        let list = resolve(&req, &ResolveConfig::default()).unwrap();
        assert_eq!(ids(&list), vec!["a"]);
    }

    #[test]
    fn duplicates_keep_first_occurrence() {
        // "a" and "a " collapse to one id after trimming.
        let req = request(SelectionMode::All, &[("a", true), ("a ", false)]);
        let list = resolve(&req, &ResolveConfig::default()).unwrap();
        assert_eq!(ids(&list), vec!["a"]);
    }

    #[test]
    fn resolution_is_idempotent() {
        let req = request(
            SelectionMode::ManuallySelected,
            &[("b", true), ("a", true), ("c", false)],
        );
        let cfg = ResolveConfig::default();
        let first = resolve(&req, &cfg).unwrap();
        let second = resolve(&req, &cfg).unwrap();
        assert_eq!(first, second);
    }
}
