use hubcat::{Configuration, Error, Hub, RepositoryName, TransportError};
use serde_json::{Value, json};
use test_log::test;
use wiremock::matchers::*;
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fixture(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap()
}

fn config(server: &MockServer) -> Configuration {
    Configuration {
        catalog_root: format!("{}/v2/", server.uri()),
        auth_url: format!("{}/token", server.uri()),
        registry_url: server.uri(),
        ..Default::default()
    }
}

#[test(tokio::test)]
async fn lists_repositories_over_http() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/repositories/jessestuart"))
        .and(query_param("page", "1"))
        .and(query_param("page_size", "100"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(fixture(include_str!("../fixtures/repositories.json"))),
        )
        .expect(1)
        .mount(&server)
        .await;

    let hub = Hub::from_config(&config(&server)).unwrap();
    let repos = hub
        .catalog
        .list_repositories("jessestuart", None, None)
        .await
        .unwrap();

    assert_eq!(repos.len(), 4);
    assert_eq!(repos[0].name, "owntracks");
}

#[test(tokio::test)]
async fn oversized_page_never_reaches_the_server() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let hub = Hub::from_config(&config(&server)).unwrap();
    let err = hub
        .catalog
        .list_repositories("jessestuart", Some(101), None)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Validation { .. }));
}

#[test(tokio::test)]
async fn fetches_manifest_list_with_token() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/token"))
        .and(query_param("scope", "repository:jessestuart/owntracks:pull"))
        .and(query_param("service", "registry.docker.io"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": "FAKE_TOKEN"})))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v2/jessestuart/owntracks/manifests/latest"))
        .and(header(
            "Accept",
            "application/vnd.docker.distribution.manifest.list.v2+json",
        ))
        .and(header("Authorization", "Bearer FAKE_TOKEN"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(fixture(include_str!("../fixtures/manifest_list.json"))),
        )
        .expect(1)
        .mount(&server)
        .await;

    let hub = Hub::from_config(&config(&server)).unwrap();
    let list = hub
        .manifests
        .fetch_manifest_list(&RepositoryName::new("jessestuart", "owntracks"))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(list.manifests.len(), 3);
    let archs: Vec<String> = list.architectures().iter().map(|a| a.to_string()).collect();
    assert_eq!(archs, vec!["amd64", "arm", "arm64"]);
}

#[test(tokio::test)]
async fn token_endpoint_failure_is_a_transport_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path_regex("^/v2/.*"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let hub = Hub::from_config(&config(&server)).unwrap();
    let err = hub
        .manifests
        .fetch_manifest_list(&RepositoryName::new("jessestuart", "owntracks"))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        Error::Transport(TransportError::Status { status: 500, .. })
    ));
}
