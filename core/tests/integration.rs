//! End-to-end test against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then drives `TempoClient` over
//! real HTTP through the default `UreqTransport`. Small page limits force the
//! aggregator to walk several server-issued cursors.

use std::net::SocketAddr;

use serde_json::Value;
use tempo_core::{
    ApiDate, ApiError, ClientConfig, NewWorklog, Payload, TempoClient, WorklogSelector,
    WorklogUpdate,
};

/// Start the mock server on an ephemeral port and return its address.
fn start_mock_server() -> SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    addr
}

fn date(s: &str) -> ApiDate {
    s.parse().unwrap()
}

fn worklog_on(day: u32) -> NewWorklog {
    NewWorklog {
        author_account_id: "acc-1".to_string(),
        issue_id: 10042,
        start_date: date(&format!("2020-09-{day:02}")),
        time_spent_seconds: 1800 * u64::from(day),
        start_time: None,
        billable_seconds: None,
        description: Some(format!("day {day}")),
        attributes: Vec::new(),
    }
}

#[test]
fn worklog_lifecycle_and_pagination() {
    let addr = start_mock_server();
    let base_url = format!("http://{addr}");
    let config = ClientConfig::new(mock_server::DEFAULT_TOKEN)
        .with_base_url(&base_url)
        .with_limit(10);
    let client = TempoClient::new(config).unwrap();

    // Step 1: accounts come back in server pages of 50, aggregated.
    let accounts = client.accounts().unwrap().into_collection().unwrap();
    assert_eq!(accounts.len() as u64, mock_server::ACCOUNT_COUNT);
    assert_eq!(accounts[0]["key"], "ACC-1");
    assert_eq!(accounts[119]["key"], "ACC-120");

    // Step 2: create 25 worklogs in September and one outside the range.
    let mut ids = Vec::new();
    for day in 1..=25 {
        let created = client.create_worklog(&worklog_on(day)).unwrap();
        ids.push(created["tempoWorklogId"].as_u64().unwrap());
    }
    let mut november = worklog_on(1);
    november.start_date = date("2020-11-01");
    client.create_worklog(&november).unwrap();

    // Step 3: list September; 25 items over 3 pages of 10.
    let september = client
        .worklogs(date("2020-09-01"), date("2020-09-30"), &WorklogSelector::All, None)
        .unwrap()
        .into_collection()
        .unwrap();
    let listed: Vec<u64> = september
        .iter()
        .map(|w| w["tempoWorklogId"].as_u64().unwrap())
        .collect();
    assert_eq!(listed, ids);

    // Step 4: lookup by id is a single object.
    let id = ids[0];
    let single = client
        .worklogs(date("2020-09-01"), date("2020-09-01"), &WorklogSelector::Id(id), None)
        .unwrap();
    let Payload::Single(worklog) = single else {
        panic!("expected a single worklog");
    };
    assert_eq!(worklog["tempoWorklogId"], id);
    assert_eq!(worklog["description"], "day 1");

    // Step 5: update.
    let update = WorklogUpdate {
        author_account_id: "acc-1".to_string(),
        start_date: date("2020-09-01"),
        time_spent_seconds: 10800,
        start_time: None,
        billable_seconds: None,
        description: Some("Updated TEST worklog".to_string()),
        attributes: Vec::new(),
    };
    let updated = client.update_worklog(id, &update).unwrap();
    assert_eq!(updated["timeSpentSeconds"], 10800);
    assert_eq!(updated["description"], "Updated TEST worklog");

    // Step 6: delete answers 204.
    assert_eq!(client.delete_worklog(id).unwrap(), Value::Null);

    // Step 7: the deleted worklog is gone, with the server's body intact.
    let err = client
        .worklogs(date("2020-09-01"), date("2020-09-01"), &WorklogSelector::Id(id), None)
        .unwrap_err();
    assert!(err.is_not_found(), "{err}");
    match err {
        ApiError::Http { body, .. } => assert!(body.contains("Worklog not found"), "{body}"),
        other => panic!("expected Http error, got {other:?}"),
    }

    // Step 8: September now has 24 worklogs.
    let remaining = client
        .worklogs(date("2020-09-01"), date("2020-09-30"), &WorklogSelector::All, None)
        .unwrap()
        .into_collection()
        .unwrap();
    assert_eq!(remaining.len(), 24);
}

#[test]
fn wrong_token_is_rejected() {
    let addr = start_mock_server();
    let config = ClientConfig::new("not-the-token").with_base_url(format!("http://{addr}"));
    let client = TempoClient::new(config).unwrap();

    let err = client.accounts().unwrap_err();
    assert_eq!(err.status(), Some(401));
}

#[test]
fn refused_connection_is_a_transport_error() {
    // Bind and drop to get a port nothing listens on.
    let addr = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap();
    let config = ClientConfig::new("t").with_base_url(format!("http://{addr}"));
    let client = TempoClient::new(config).unwrap();

    let err = client.accounts().unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)), "{err:?}");
}
