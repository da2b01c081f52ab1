mod listing_stub;

use std::fs;

use fairscrape::formats::ScrapeResult;
use predicates::prelude::*;

use listing_stub::{GONE_PATH, LISTING_HTML, LISTING_PATH, spawn_listing_server};

#[test]
fn scrape_writes_json_and_csv() -> anyhow::Result<()> {
    let (base_url, shutdown_tx, handle) = spawn_listing_server();
    let temp = tempfile::TempDir::new()?;
    let json_path = temp.path().join("result.json");
    let csv_path = temp.path().join("result.csv");

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("fairscrape");
    cmd.args([
        "scrape",
        "--url",
        &format!("{base_url}{LISTING_PATH}"),
        "--out",
        json_path.to_str().unwrap(),
        "--csv",
        csv_path.to_str().unwrap(),
        "--timeout-secs",
        "5",
    ])
    .assert()
    .success();

    let result: ScrapeResult = serde_json::from_str(&fs::read_to_string(&json_path)?)?;
    assert_eq!(result.exhibitions.len(), 2);
    assert_eq!(result.exhibitions[0].exhibition_name, "Canton Fair");

    let csv = fs::read_to_string(&csv_path)?;
    assert!(csv.starts_with("name;frequency;venues;start;end;description;date\n"));
    assert!(csv.contains("Canton Fair;Annual;Poly World Trade Center (Guangzhou);04/15/2024;"));
    assert_eq!(csv.lines().count(), 3);

    let _ = shutdown_tx.send(());
    let _ = handle.join();
    Ok(())
}

#[test]
fn scrape_failure_exits_non_zero_with_upstream_status() {
    let (base_url, shutdown_tx, handle) = spawn_listing_server();

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("fairscrape");
    cmd.args(["scrape", "--url", &format!("{base_url}{GONE_PATH}")])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to fetch: 404"));

    let _ = shutdown_tx.send(());
    let _ = handle.join();
}

#[test]
fn scrape_with_existing_out_writes_nothing() -> anyhow::Result<()> {
    let (base_url, shutdown_tx, handle) = spawn_listing_server();
    let temp = tempfile::TempDir::new()?;
    let json_path = temp.path().join("r.json");
    let csv_path = temp.path().join("r.csv");
    fs::write(&json_path, "{}")?;

    assert_cmd::cargo::cargo_bin_cmd!("fairscrape")
        .args([
            "scrape",
            "--url",
            &format!("{base_url}{LISTING_PATH}"),
            "--out",
            json_path.to_str().unwrap(),
            "--csv",
            csv_path.to_str().unwrap(),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    assert!(!csv_path.exists());
    assert_eq!(fs::read_to_string(&json_path)?, "{}");

    let _ = shutdown_tx.send(());
    let _ = handle.join();
    Ok(())
}

#[test]
fn scrape_rejects_zero_timeout() {
    assert_cmd::cargo::cargo_bin_cmd!("fairscrape")
        .args(["scrape", "--url", "http://127.0.0.1:9/", "--timeout-secs", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--timeout-secs"));

    assert_cmd::cargo::cargo_bin_cmd!("fairscrape-app")
        .args(["--timeout-secs", "301"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--timeout-secs"));
}

#[test]
fn parse_saved_page_prints_json_to_stdout() -> anyhow::Result<()> {
    let temp = tempfile::TempDir::new()?;
    let html_path = temp.path().join("listing.html");
    fs::write(&html_path, LISTING_HTML)?;

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("fairscrape");
    let output = cmd
        .args(["parse", "--html", html_path.to_str().unwrap()])
        .output()?;
    assert!(output.status.success());

    let result: ScrapeResult = serde_json::from_slice(&output.stdout)?;
    assert_eq!(result.total, 2);
    assert_eq!(
        result.exhibitions[0].link,
        "https://www.eventseye.com/fairs/f-canton-fair-4570.html"
    );
    Ok(())
}

#[test]
fn export_converts_saved_result_to_csv() -> anyhow::Result<()> {
    let temp = tempfile::TempDir::new()?;
    let html_path = temp.path().join("listing.html");
    let json_path = temp.path().join("result.json");
    let csv_path = temp.path().join("out").join("result.csv");
    fs::write(&html_path, LISTING_HTML)?;

    assert_cmd::cargo::cargo_bin_cmd!("fairscrape")
        .args([
            "parse",
            "--html",
            html_path.to_str().unwrap(),
            "--out",
            json_path.to_str().unwrap(),
        ])
        .assert()
        .success();

    assert_cmd::cargo::cargo_bin_cmd!("fairscrape")
        .args([
            "export",
            "--input",
            json_path.to_str().unwrap(),
            "--out",
            csv_path.to_str().unwrap(),
            "--format",
            "csv",
        ])
        .assert()
        .success();

    let csv = fs::read_to_string(&csv_path)?;
    assert!(csv.contains("Mystery Show;Unknown;Shanghai;;;;"));

    assert_cmd::cargo::cargo_bin_cmd!("fairscrape")
        .args([
            "export",
            "--input",
            json_path.to_str().unwrap(),
            "--out",
            csv_path.to_str().unwrap(),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
    Ok(())
}

#[test]
fn rust_log_debug_emits_debug_line_to_stderr() -> anyhow::Result<()> {
    let temp = tempfile::TempDir::new()?;
    let html_path = temp.path().join("listing.html");
    fs::write(&html_path, LISTING_HTML)?;

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("fairscrape");
    cmd.env("RUST_LOG", "debug")
        .args(["parse", "--html", html_path.to_str().unwrap()])
        .assert()
        .success()
        .stderr(predicate::str::contains("parsed cli"));
    Ok(())
}
