use serde::{Deserialize, Serialize};

/// What happens to workspace runtime tasks no configuration entry claimed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UnmatchedPolicy {
    /// Only configured tasks get an indicator; orphans are diagnosed and dropped.
    #[default]
    ConfigurationRequired,
    /// Orphans get a default-attributed indicator after the configured ones.
    ShowAll,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serde_names() {
        let p: UnmatchedPolicy = serde_json::from_str(r#""showAll""#).unwrap();
        assert_eq!(p, UnmatchedPolicy::ShowAll);
        assert_eq!(
            serde_json::to_string(&UnmatchedPolicy::default()).unwrap(),
            r#""configurationRequired""#
        );
    }
}
