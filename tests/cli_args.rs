use predicates::prelude::*;

#[test]
fn help_lists_the_subcommands() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("shelfscrape");
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("scrape").and(predicate::str::contains("links")));
}

#[test]
fn non_http_url_is_rejected_before_any_session_is_created() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("shelfscrape");
    cmd.args(["links", "--url", "file:///tmp/listing.html"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("must be http/https"));
}

#[test]
fn unparseable_url_is_rejected() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("shelfscrape");
    cmd.args(["scrape", "--url", "not a url"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("parse --url"));
}

#[test]
fn rust_log_debug_emits_debug_line_to_stderr() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("shelfscrape");
    cmd.env("RUST_LOG", "debug")
        .args(["scrape", "--url", "not a url"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("parsed cli"));
}
