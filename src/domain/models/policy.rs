/// Remediation policy applied to classification findings.
///
/// Constructed once at process entry (see `AppConfig`) and handed to the
/// tagging service by value; there is no hidden global configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemediationPolicy {
    /// Tag key written to affected objects
    pub tag_key: String,

    /// Findings with a severity score at or above this value are remediated
    pub score_threshold: i64,

    /// Days before non-current versions transition to cold storage
    pub glacier_transition_days: u32,

    /// Days before non-current versions expire
    pub expire_objects_days: u32,
}

impl Default for RemediationPolicy {
    fn default() -> Self {
        Self {
            tag_key: "Severity".to_string(),
            score_threshold: 3,
            glacier_transition_days: 365,
            expire_objects_days: 1825,
        }
    }
}
