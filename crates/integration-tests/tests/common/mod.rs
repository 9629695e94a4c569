//! Fixture builder shared by the integration tests.
//!
//! Every call builds a fresh config and Job, so tests never share state.

#![allow(dead_code)]

use batchjob_core::domain::Job;
use batchjob_core::port::FixedTimeProvider;
use batchjob_core::{Result, ServicesConfig};

/// 2015-09-17 21:42:20.900 UTC
pub const NOW: i64 = 1_442_526_140_900;

pub const NOW_DATE: &str = "2015-09-17-21-42-20.9";

pub fn test_config() -> ServicesConfig {
    let mut cfg = ServicesConfig::default();
    cfg.condor.run_on_nfs = true;
    cfg.condor.log_path = "/path/to/logs".to_string();
    cfg.condor.porklock_tag = "test".to_string();
    cfg.condor.filter_files = "foo,bar,baz,blippy".to_string();
    cfg.irods.base = "/path/to/irodsbase".to_string();
    cfg.irods.host = "hostname".to_string();
    cfg.irods.port = "1247".to_string();
    cfg.irods.user = "user".to_string();
    cfg.irods.pass = "pass".to_string();
    cfg.irods.zone = "test".to_string();
    cfg
}

pub fn fixture_bytes(name: &str) -> Vec<u8> {
    let path = format!("{}/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name);
    std::fs::read(&path).unwrap_or_else(|e| panic!("read fixture {}: {}", path, e))
}

pub fn try_load(data: &[u8]) -> Result<Job> {
    batchjob_core::application::load_job(data, &test_config(), &FixedTimeProvider(NOW))
}

pub fn load_fixture(name: &str) -> Job {
    try_load(&fixture_bytes(name)).unwrap()
}

pub fn submission() -> Job {
    load_fixture("test_submission.json")
}

/// Fixture as a JSON value, for tests that tweak the raw description
pub fn submission_value() -> serde_json::Value {
    serde_json::from_slice(&fixture_bytes("test_submission.json")).unwrap()
}
