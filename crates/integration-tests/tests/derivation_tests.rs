//! Derived Value Tests
//!
//! Paths, transfer arguments, exclude lists, resources and containers
//! computed from the fixture submissions.

mod common;

use batchjob_core::application::{exclude_file_contents, SchedulerRequest, TransferPlan};
use batchjob_core::domain::{ContainerImage, MetadataArgs};
use common::{load_fixture, submission, NOW_DATE};
use pretty_assertions::assert_eq;

const IMAGE_ID: &str = "fc210a84-f7cd-4067-939c-a68ec3e3bd2b";

fn expected_image(osg_image_path: &str) -> ContainerImage {
    ContainerImage {
        id: IMAGE_ID.to_string(),
        name: "gims.iplantcollaborative.org:5000/backwards-compat".to_string(),
        tag: "latest".to_string(),
        url: "https://registry.hub.docker.com/u/discoenv/backwards-compat".to_string(),
        osg_image_path: osg_image_path.to_string(),
    }
}

#[test]
fn test_directory_name() {
    let s = submission();
    assert_eq!(
        s.directory_name(),
        format!("Word_Count_analysis1__-{}", NOW_DATE)
    );
}

#[test]
fn test_condor_log_directory() {
    let s = submission();
    assert_eq!(
        s.condor_log_directory(),
        format!(
            "/path/to/logs/test_this_is_a_test/Word_Count_analysis1__-{}/",
            NOW_DATE
        )
    );
}

#[test]
fn test_irods_config() {
    assert_eq!(submission().irods_config(), "logs/irods-config");
}

#[test]
fn test_output_directory_empty_output_dir() {
    let mut s = submission();
    s.output_dir = String::new();
    assert_eq!(
        s.output_directory(),
        format!(
            "/path/to/irodsbase/test_this_is_a_test/analyses/{}",
            s.directory_name()
        )
    );
}

#[test]
fn test_output_directory_with_subdir() {
    let s = submission();
    assert_eq!(
        s.output_directory(),
        format!("{}/{}", s.output_dir, s.directory_name())
    );
}

#[test]
fn test_output_directory_without_subdir() {
    let mut s = submission();
    s.create_output_subdir = false;
    s.output_dir.push('/');
    assert_eq!(
        s.output_directory(),
        "/iplant/home/wregglej/analyses/Word_Count_analysis1-2015-09-17-21-42-20.9"
    );
}

#[test]
fn test_file_metadata_arguments() {
    let mut s = submission();
    assert_eq!(
        s.file_metadata.file_metadata_arguments(),
        vec!["-m", "attr1,value1,unit1", "-m", "attr2,value2,unit2"]
    );

    s.add_required_metadata();
    assert_eq!(
        s.file_metadata_arguments(),
        vec![
            "-m",
            "attr1,value1,unit1",
            "-m",
            "attr2,value2,unit2",
            "-m",
            "ipc-analysis-id,c7f05682-23c8-4182-b9a2-e09650a5f49b,UUID",
            "-m",
            "ipc-execution-id,07b04ce2-7757-4b21-9e15-0b4c2f44be26,UUID",
        ]
    );
}

#[test]
fn test_exclude_arguments() {
    let mut s = submission();
    assert_eq!(s.exclude_arguments(), vec!["foo", "bar", "baz", "blippy"]);

    s.steps[0].config.inputs[0].retain = false;
    assert_eq!(
        s.exclude_arguments(),
        vec!["Acer-tree.txt", "foo", "bar", "baz", "blippy"]
    );

    s.steps[0].config.outputs[1].retain = false;
    assert_eq!(
        s.exclude_arguments(),
        vec!["Acer-tree.txt", "/de-app-work/logs/", "foo", "bar", "baz", "blippy"]
    );

    s.archive_logs = false;
    assert_eq!(
        s.exclude_arguments(),
        vec![
            "Acer-tree.txt",
            "/de-app-work/logs/",
            "logs",
            "foo",
            "bar",
            "baz",
            "blippy"
        ]
    );

    s.steps[1].config.inputs[0].retain = false;
    assert_eq!(
        s.exclude_arguments(),
        vec![
            "Acer-tree.txt",
            "reads/",
            "/de-app-work/logs/",
            "logs",
            "foo",
            "bar",
            "baz",
            "blippy"
        ]
    );
}

#[test]
fn test_exclude_file_contents() {
    let mut s = submission();
    s.archive_logs = false;
    assert_eq!(exclude_file_contents(&s), "logs\nfoo\nbar\nbaz\nblippy\n");
}

#[test]
fn test_final_output_arguments() {
    let mut s = submission();
    s.add_required_metadata();
    let output_dir = s.output_directory();

    let mut expected = vec![
        "put",
        "--user",
        "test_this_is_a_test",
        "--destination",
        output_dir.as_str(),
        "--config",
        "logs/irods-config",
        "-m",
        "attr1,value1,unit1",
        "-m",
        "attr2,value2,unit2",
        "-m",
        "ipc-analysis-id,c7f05682-23c8-4182-b9a2-e09650a5f49b,UUID",
        "-m",
        "ipc-execution-id,07b04ce2-7757-4b21-9e15-0b4c2f44be26,UUID",
        "--exclude",
        "exclude.txt",
    ];
    assert_eq!(s.final_output_arguments("exclude.txt"), expected);

    s.skip_parent_metadata = true;
    expected.push("--skip-parent-meta");
    assert_eq!(s.final_output_arguments("exclude.txt"), expected);
}

#[test]
fn test_input_arguments() {
    let s = submission();
    let downloads = s.input_arguments();

    assert_eq!(downloads.len(), 2);
    assert_eq!(
        downloads[0][..7].to_vec(),
        vec![
            "get",
            "--user",
            "test_this_is_a_test",
            "--source",
            "/iplant/home/wregglej/Acer-tree.txt",
            "--config",
            "logs/irods-config"
        ]
    );
    assert_eq!(downloads[1][4], "/iplant/home/wregglej/reads/");
}

#[test]
fn test_transfer_plan() {
    let s = submission();
    let plan = TransferPlan::for_job(&s, "logs/exclude.txt");

    assert_eq!(plan.downloads, s.input_arguments());
    assert_eq!(plan.upload, s.final_output_arguments("logs/exclude.txt"));
    assert_eq!(plan.exclude_file, "foo\nbar\nbaz\nblippy\n");
}

#[test]
fn test_resource_requests() {
    let s = submission();

    assert_eq!(s.cpu_request(), 0.0);
    assert_eq!(s.memory_request(), 2048);
    assert_eq!(s.disk_request(), 0);
}

#[test]
fn test_container_images() {
    let s = submission();
    assert_eq!(s.container_images(), vec![expected_image("")]);
}

#[test]
fn test_container_images_osg() {
    let s = load_fixture("test_submission_osg.json");
    assert_eq!(s.container_images(), vec![expected_image("/path/to/image")]);
}

#[test]
fn test_data_containers() {
    let s = submission();
    let dc = s.data_containers();

    assert_eq!(dc.len(), 2);

    assert_eq!(dc[0].name, "vf-name1");
    assert_eq!(dc[0].name_prefix, "vf-prefix1");
    assert_eq!(dc[0].tag, "vf-tag1");
    assert_eq!(dc[0].url, "vf-url1");
    assert_eq!(dc[0].host_path, "/host/path1");
    assert_eq!(dc[0].container_path, "/container/path1");
    assert!(dc[0].read_only);

    assert_eq!(dc[1].name, "vf-name2");
    assert_eq!(dc[1].name_prefix, "vf-prefix2");
    assert_eq!(dc[1].tag, "vf-tag2");
    assert_eq!(dc[1].url, "vf-url2");
    assert_eq!(dc[1].host_path, "/host/path2");
    assert_eq!(dc[1].container_path, "/container/path2");
    assert!(dc[1].read_only);
}

#[test]
fn test_scheduler_request() {
    let s = submission();
    let req = SchedulerRequest::from_job(&s);

    assert_eq!(req.submitter, "test_this_is_a_test");
    assert_eq!(req.condor_log_directory, s.condor_log_directory());
    assert_eq!(req.user_groups, r#"{"groups:foo","groups:bar","groups:baz"}"#);
    assert_eq!(req.request_memory_mb, 2048);
    assert_eq!(req.container_images.len(), 1);
    assert_eq!(req.data_containers.len(), 2);
    assert!(req.run_on_nfs);
    assert!(req.notify);
}

#[test]
fn test_zero_steps() {
    let mut s = submission();
    s.steps.clear();

    assert_eq!(s.cpu_request(), 0.0);
    assert_eq!(s.memory_request(), 0);
    assert!(s.container_images().is_empty());
    assert!(s.data_containers().is_empty());
    assert_eq!(s.exclude_arguments(), vec!["foo", "bar", "baz", "blippy"]);
}
