//! Dispatcher behavior against a mock collector: payload shape, endpoint
//! routing, and the non-fatal failure contract.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use mockito::Matcher;
use serde_json::json;

use jobsift::config::{Bucket, Keyword};
use jobsift::scrape::{
    Aggregator, CombinedRecord, DispatchOutcome, Dispatcher, JobDetail, JobSummary,
};

mod common;
use common::test_config;

fn sample_record(bucket: &Bucket) -> CombinedRecord {
    let mut fields = BTreeMap::new();
    fields.insert("jobTitle".to_string(), "Backend Engineer".to_string());
    let summary = JobSummary {
        id: "80123".to_string(),
        fields,
    };
    let detail = JobDetail {
        description: "Java and MySQL stack".to_string(),
    };
    let date = NaiveDate::from_ymd_opt(2026, 8, 30).unwrap();
    CombinedRecord::new(bucket, date, summary, detail)
}

#[tokio::test]
async fn records_go_to_the_detail_list_endpoint() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/job-detail-list")
        .match_header("content-type", "application/json")
        .match_body(Matcher::PartialJson(json!([{
            "id": "80123",
            "salaryRange": "0-11000",
            "jobTitle": "Backend Engineer",
            "jobAdDetails": "Java and MySQL stack",
        }])))
        .with_status(200)
        .create_async()
        .await;

    let config = test_config(&server.url(), &["0-11000"]);
    let dispatcher = Dispatcher::new(&config).unwrap();
    let bucket = Bucket::monthly("0-11000");
    let records = vec![sample_record(&bucket)];

    let outcome = dispatcher.send_records(&bucket, 1, &records).await;

    mock.assert_async().await;
    assert_eq!(outcome, DispatchOutcome::Accepted);
}

#[tokio::test]
async fn aggregate_goes_to_the_job_count_endpoint() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/job-count")
        .match_body(Matcher::PartialJson(json!({
            "SalaryRange": "14000-17000",
            "Total": 1,
            "Java": 1,
            "Python": 0,
        })))
        .with_status(200)
        .create_async()
        .await;

    let config = test_config(&server.url(), &["14000-17000"]);
    let dispatcher = Dispatcher::new(&config).unwrap();

    let keywords = vec![Keyword::new("Java", "java"), Keyword::new("Python", "python")];
    let date = NaiveDate::from_ymd_opt(2026, 8, 30).unwrap();
    let mut aggregator = Aggregator::new(Bucket::monthly("14000-17000"), &keywords, date);
    aggregator.record("senior java developer");

    let outcome = dispatcher.send_aggregate(&aggregator.snapshot()).await;

    mock.assert_async().await;
    assert_eq!(outcome, DispatchOutcome::Accepted);
}

#[tokio::test]
async fn server_error_reports_failure() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/v1/job-detail-list")
        .with_status(500)
        .create_async()
        .await;

    let config = test_config(&server.url(), &["0-11000"]);
    let dispatcher = Dispatcher::new(&config).unwrap();
    let bucket = Bucket::monthly("0-11000");
    let records = vec![sample_record(&bucket)];

    let outcome = dispatcher.send_records(&bucket, 1, &records).await;
    assert_eq!(outcome, DispatchOutcome::Failed);
}

#[tokio::test]
async fn unreachable_collector_reports_failure() {
    // Nothing listens on port 1.
    let config = test_config("http://127.0.0.1:1", &["0-11000"]);
    let dispatcher = Dispatcher::new(&config).unwrap();
    let bucket = Bucket::monthly("0-11000");
    let records = vec![sample_record(&bucket)];

    assert_eq!(
        dispatcher.send_records(&bucket, 1, &records).await,
        DispatchOutcome::Failed
    );
}

#[tokio::test]
async fn base_url_with_path_keeps_its_prefix() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/collector/v1/job-count")
        .with_status(200)
        .create_async()
        .await;

    let config = test_config(&format!("{}/collector", server.url()), &["0-11000"]);
    let dispatcher = Dispatcher::new(&config).unwrap();

    let date = NaiveDate::from_ymd_opt(2026, 8, 30).unwrap();
    let aggregator = Aggregator::new(Bucket::monthly("0-11000"), &[], date);

    let outcome = dispatcher.send_aggregate(&aggregator.snapshot()).await;

    mock.assert_async().await;
    assert_eq!(outcome, DispatchOutcome::Accepted);
}
