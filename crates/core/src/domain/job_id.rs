// Cluster id extraction from scheduler submit output

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::warn;

/// Phrase printed by the scheduler right before the cluster id
pub const SUBMIT_MARKER: &str = "submitted to cluster ";

static CLUSTER_ID: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"{}([0-9]+)", regex::escape(SUBMIT_MARKER)))
        .expect("cluster id pattern is valid")
});

/// Extract the cluster id from `condor_submit` style output.
///
/// Returns the digit run right after [`SUBMIT_MARKER`], or `None` when the
/// marker is absent (or not followed by a digit). Surrounding text,
/// including line breaks, is ignored.
///
/// # Example
/// ```
/// use batchjob_core::domain::extract_job_id;
///
/// let out = "1 job(s) submitted to cluster 4242.\n";
/// assert_eq!(extract_job_id(out), Some("4242"));
/// assert_eq!(extract_job_id("ERROR: no such file"), None);
/// ```
pub fn extract_job_id(output: &str) -> Option<&str> {
    let id = CLUSTER_ID
        .captures(output)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str());

    if id.is_none() {
        warn!(
            output_len = output.len(),
            "Scheduler output did not contain a cluster id"
        );
    }
    id
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_plain() {
        let out = "1000 job(s) submitted to cluster 100000000.0000.";
        assert_eq!(extract_job_id(out), Some("100000000"));
    }

    #[test]
    fn test_extract_with_noise() {
        let out = "asdfadsfadsfadsfa1000 job(s) submitted to cluster 100000000.0000asdfadsfadsfasdfadsfadsfadsfadsfadsf";
        assert_eq!(extract_job_id(out), Some("100000000"));
    }

    #[test]
    fn test_extract_across_lines() {
        let out = "asdfadsfadsfadsfa\nadsfadsfadsfadsfadsfasdfadsfadsfadsfadsfdsa1000 job(s) submitted to cluster 100000000asdfadsfadsfasdfadsfadsfadsfadsfadsf\nasdfadsfasdfadsfdsfsdsfdsafds";
        assert_eq!(extract_job_id(out), Some("100000000"));
    }

    #[test]
    fn test_extract_real_condor_output() {
        let out = "Submitting job(s).\n1 job(s) submitted to cluster 731.\n";
        assert_eq!(extract_job_id(out), Some("731"));
    }

    #[test]
    fn test_extract_first_match_wins() {
        let out = "1 job(s) submitted to cluster 12.\n1 job(s) submitted to cluster 13.\n";
        assert_eq!(extract_job_id(out), Some("12"));
    }

    #[test]
    fn test_extract_not_found() {
        assert_eq!(extract_job_id(""), None);
        assert_eq!(extract_job_id("ERROR: Failed to connect to local queue manager"), None);
        assert_eq!(extract_job_id("1 job(s) submitted to cluster ."), None);
        assert_eq!(extract_job_id("submitted to cluster"), None);
    }
}
