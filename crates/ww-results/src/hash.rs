//! Content-based hashing for case IDs.

use sha2::{Digest, Sha256};
use ww_project::DesignCase;

/// Identifies the inputs a stored design was computed from: influent,
/// engine parameters, negative-sizing policy and engine version. Name,
/// seed, display units and adjustments do not participate.
pub fn compute_case_id(case: &DesignCase, engine_version: &str) -> String {
    let mut hasher = Sha256::new();

    let influent_json = serde_json::to_string(&case.influent).unwrap_or_default();
    hasher.update(influent_json.as_bytes());

    let params_json = serde_json::to_string(&case.parameters).unwrap_or_default();
    hasher.update(params_json.as_bytes());

    let policy_json = serde_json::to_string(&case.negative_sizing).unwrap_or_default();
    hasher.update(policy_json.as_bytes());

    hasher.update(engine_version.as_bytes());

    let result = hasher.finalize();
    format!("{:x}", result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ww_core::InfluentInput;
    use ww_sim::AdjustmentFactors;

    #[test]
    fn hash_stability() {
        let case = DesignCase::new("A", InfluentInput::default());
        assert_eq!(compute_case_id(&case, "v1"), compute_case_id(&case, "v1"));
        assert_eq!(compute_case_id(&case, "v1").len(), 64);
    }

    #[test]
    fn hash_ignores_presentation_and_operation() {
        let base = DesignCase::new("A", InfluentInput::default());
        let mut other = base.clone();
        other.name = "B".to_string();
        other.seed = Some(7);
        other.adjustments = Some(AdjustmentFactors::new(50.0, 50.0, 50.0, 50.0).unwrap());
        assert_eq!(compute_case_id(&base, "v1"), compute_case_id(&other, "v1"));
    }

    #[test]
    fn hash_differs_for_different_inputs() {
        let base = DesignCase::new("A", InfluentInput::default());
        let mut other = base.clone();
        other.influent.bod_mg_l = 300.0;
        assert_ne!(compute_case_id(&base, "v1"), compute_case_id(&other, "v1"));
        assert_ne!(compute_case_id(&base, "v1"), compute_case_id(&base, "v2"));

        let mut tuned = base.clone();
        tuned.parameters.kinetics.kd = 0.08;
        assert_ne!(compute_case_id(&base, "v1"), compute_case_id(&tuned, "v1"));
    }
}
