use assert_cmd::Command;
use assert_fs::{prelude::*, TempDir};
use httpmock::{Method::POST, Mock, MockServer};
use indoc::indoc;
use predicates::prelude::*;
use rstest::{fixture, rstest};
use serde_json::{json, Value};
use speculoos::prelude::*;

const GRAPH_KEY: &str = "service:mygraph:not-a-real-secret";
const USER_KEY: &str = "user:gh.someone:not-a-real-secret";
const FRONTEND: &str = "https://studio.example.com";

/// A fake registry plus isolated config home and project directories.
struct Harness {
    server: MockServer,
    home: TempDir,
    project: TempDir,
}

#[fixture]
fn harness() -> Harness {
    Harness {
        server: MockServer::start(),
        home: TempDir::new().unwrap(),
        project: TempDir::new().unwrap(),
    }
}

impl Harness {
    fn lander(&self, api_key: &str) -> Command {
        let mut cmd = Command::cargo_bin("lander").unwrap();
        cmd.env_clear()
            .env("APOLLO_KEY", api_key)
            .env("APOLLO_REGISTRY_URL", self.server.url("/graphql"))
            .env("APOLLO_FRONTEND_URL", FRONTEND)
            .env("APOLLO_CONFIG_HOME", self.home.path())
            .env("APOLLO_TEST_MODE", "1")
            .env("NO_COLOR", "1")
            .current_dir(self.project.path())
            .args(["service", "list"]);
        cmd
    }

    fn registry_responds(&self, variant: &str, body: Value) -> Mock<'_> {
        self.server.mock(|when, then| {
            when.method(POST)
                .path("/graphql")
                .header("x-api-key", GRAPH_KEY)
                .header("apollographql-client-name", "lander")
                .body_includes(r#""operationName":"ServiceListQuery""#)
                .body_includes(format!(r#""graphVariant":"{variant}""#));
            then.status(200)
                .header("content-type", "application/json")
                .json_body(body);
        })
    }
}

fn service(name: &str, updated_at: &str) -> Value {
    json!({
        "graphID": "mygraph",
        "graphVariant": "current",
        "name": name,
        "url": format!("http://{name}.internal/graphql"),
        "updatedAt": updated_at
    })
}

fn federated(services: Vec<Value>) -> Value {
    json!({
        "data": {
            "service": {
                "implementingServices": {
                    "__typename": "FederatedImplementingServices",
                    "services": services
                }
            }
        }
    })
}

fn stdout_of(output: &std::process::Output) -> String {
    String::from_utf8(output.stdout.clone()).unwrap()
}

#[rstest]
fn it_lists_federated_services_sorted_by_name(harness: Harness) {
    let mock = harness.registry_responds(
        "current",
        federated(vec![
            service("b-svc", "2019-06-10T12:00:00Z"),
            service("a-svc", "2019-06-12T12:00:00Z"),
        ]),
    );

    let output = harness.lander(GRAPH_KEY).output().unwrap();

    mock.assert();
    assert_that!(output.status.success()).is_true();
    let stdout = stdout_of(&output);
    let a = stdout.find("a-svc").unwrap();
    let b = stdout.find("b-svc").unwrap();
    assert_that!(a).is_less_than(b);
    assert_that!(stdout).contains("12 June 2019 (12 hours ago)");
    assert_that!(stdout).contains("10 June 2019 (3 days ago)");
    assert_that!(stdout).does_not_contain("federated");
    assert_that!(stdout).ends_with(
        "\n\nView full details at: https://studio.example.com/graph/mygraph/service-list\n",
    );
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert_that!(stderr).contains("==> Fetching list of services for graph mygraph@current");
}

#[rstest]
fn it_explains_non_federated_graphs(harness: Harness) {
    let mock = harness.registry_responds(
        "current",
        json!({
            "data": {
                "service": {
                    "implementingServices": {
                        "__typename": "NonFederatedImplementingService"
                    }
                }
            }
        }),
    );

    harness
        .lander(GRAPH_KEY)
        .assert()
        .success()
        .stdout(predicate::eq(indoc! {"
            This graph is not federated. There are no services composing the graph.
            View full details at: https://studio.example.com/graph/mygraph/service-list
        "}));
    mock.assert();
}

#[rstest]
fn it_explains_graphs_without_implementing_services(harness: Harness) {
    let mock = harness.registry_responds(
        "current",
        json!({ "data": { "service": { "implementingServices": null } } }),
    );

    harness
        .lander(GRAPH_KEY)
        .assert()
        .success()
        .stdout(predicate::eq(indoc! {"
            This graph is not federated. There are no services composing the graph.
            View full details at: https://studio.example.com/graph/mygraph/service-list
        "}));
    mock.assert();
}

#[rstest]
fn it_explains_federated_graphs_without_services(harness: Harness) {
    let mock = harness.registry_responds("current", federated(vec![]));

    harness
        .lander(GRAPH_KEY)
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "There are no services on this federated graph.\n",
        ));
    mock.assert();
}

#[rstest]
fn it_takes_the_graph_and_variant_from_flags(harness: Harness) {
    let mock = harness.registry_responds(
        "prod",
        federated(vec![service("accounts", "2019-06-12T12:00:00Z")]),
    );

    harness
        .lander(GRAPH_KEY)
        .args(["--graph", "othergraph", "--variant", "prod"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "https://studio.example.com/graph/othergraph/service-list",
        ));
    mock.assert();
}

#[rstest]
fn it_takes_the_graph_from_the_project_config(harness: Harness) {
    harness
        .project
        .child(".apollo/config.yaml")
        .write_str(indoc! {"
            service:
              name: configured@staging
        "})
        .unwrap();
    let mock = harness.registry_responds(
        "staging",
        federated(vec![service("accounts", "2019-06-12T12:00:00Z")]),
    );

    harness
        .lander(GRAPH_KEY)
        .assert()
        .success()
        .stdout(predicate::str::contains("/graph/configured/service-list"));
    mock.assert();
}

#[rstest]
fn it_fails_before_any_request_without_a_graph(harness: Harness) {
    let mock = harness.server.mock(|when, then| {
        when.any_request();
        then.status(200);
    });

    harness
        .lander(USER_KEY)
        .assert()
        .failure()
        .stderr(predicate::str::contains("error[E001]"));
    assert_that!(mock.hits()).is_equal_to(0);
}

#[rstest]
fn it_reports_registry_errors(harness: Harness) {
    let mock = harness.server.mock(|when, then| {
        when.method(POST).path("/graphql");
        then.status(200)
            .header("content-type", "application/json")
            .json_body(json!({
                "data": null,
                "errors": [{ "message": "something broke upstream" }]
            }));
    });

    let output = harness.lander(GRAPH_KEY).output().unwrap();

    mock.assert();
    assert_that!(output.status.success()).is_false();
    assert_that!(stdout_of(&output)).does_not_contain("View full details");
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert_that!(stderr).contains("error[E005]");
    assert_that!(stderr).contains("something broke upstream");
}

#[rstest]
fn it_reports_server_errors(harness: Harness) {
    let mock = harness.server.mock(|when, then| {
        when.method(POST).path("/graphql");
        then.status(500).body("internal server error");
    });

    harness
        .lander(GRAPH_KEY)
        .assert()
        .failure()
        .stderr(predicate::str::contains("error[E007]"));
    mock.assert();
}

#[rstest]
fn it_reports_unknown_graphs(harness: Harness) {
    let mock = harness.registry_responds("current", json!({ "data": { "service": null } }));

    harness
        .lander(GRAPH_KEY)
        .assert()
        .failure()
        .stderr(predicate::str::contains("error[E003]"));
    mock.assert();
}

#[rstest]
fn it_writes_json_when_asked(harness: Harness) {
    let mock = harness.registry_responds(
        "current",
        federated(vec![service("accounts", "2019-06-12T12:00:00Z")]),
    );

    let output = harness
        .lander(GRAPH_KEY)
        .args(["--format", "json"])
        .output()
        .unwrap();

    mock.assert();
    assert_that!(output.status.success()).is_true();
    let written: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_that!(written).is_equal_to(json!({
        "json_version": "1",
        "data": {
            "services": [{
                "name": "accounts",
                "url": "http://accounts.internal/graphql",
                "last_updated": "12 June 2019 (12 hours ago)"
            }],
            "message": null,
            "link": "https://studio.example.com/graph/mygraph/service-list",
            "success": true
        },
        "error": null
    }));
}

#[rstest]
fn it_writes_json_errors_to_stdout(harness: Harness) {
    let output = harness
        .lander(USER_KEY)
        .args(["--format", "json"])
        .output()
        .unwrap();

    assert_that!(output.status.success()).is_false();
    let written: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_that!(written["data"]["success"]).is_equal_to(json!(false));
    assert_that!(written["error"]["code"]).is_equal_to(json!("E001"));
}
