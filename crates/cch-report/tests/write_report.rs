//! Integration tests for report output.

use cch_model::{MetricRecord, MetricValue};
use cch_report::{render, write_report};

fn sample() -> Vec<MetricRecord> {
    vec![
        MetricRecord::new(
            "Number of Inbound Referrals into the CCH",
            MetricValue::Count(42),
            "Unique inbound referrals into the CCH.",
        ),
        MetricRecord::new(
            "Number of Outbound Referrals to HRSN Services: Housing",
            MetricValue::Count(7),
            "Total outbound referrals made from the CCH to HRSN services in category: Housing.",
        ),
        MetricRecord::new(
            "Percent of individuals referred to the CCH who are enrolled in the CCH.",
            MetricValue::percent_of(1, 4),
            "Percentage of individuals referred to the CCH who are enrolled in the CCH.",
        ),
        MetricRecord::new(
            "Percent of identified client needs that were successfully met.",
            MetricValue::percent_of(0, 0),
            "Percentage of identified client needs that were successfully met during the reporting period.",
        ),
    ]
}

#[test]
fn rendered_report() {
    let rendered = render(&sample()).unwrap();
    insta::assert_snapshot!(rendered.trim_end(), @r"
    Metric,Value,Description
    Number of Inbound Referrals into the CCH,42,Unique inbound referrals into the CCH.
    Number of Outbound Referrals to HRSN Services: Housing,7,Total outbound referrals made from the CCH to HRSN services in category: Housing.
    Percent of individuals referred to the CCH who are enrolled in the CCH.,25,Percentage of individuals referred to the CCH who are enrolled in the CCH.
    Percent of identified client needs that were successfully met.,0,Percentage of identified client needs that were successfully met during the reporting period.
    ");
}

#[test]
fn writes_file_and_creates_parent_directory() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out").join("metrics.csv");

    write_report(&path, &sample()).unwrap();

    let written = std::fs::read_to_string(&path).unwrap();
    assert_eq!(written, render(&sample()).unwrap());
    assert_eq!(written.lines().count(), 5);
}

#[test]
fn unwritable_path_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("file");
    std::fs::write(&blocker, "").unwrap();

    let err = write_report(&blocker.join("metrics.csv"), &sample()).unwrap_err();
    assert!(matches!(err, cch_report::ReportError::Io { .. }));
}
