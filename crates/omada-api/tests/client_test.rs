#![allow(clippy::unwrap_used)]
// Integration tests for `OmadaClient` using wiremock.

use serde_json::{Value, json};
use url::Url;
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Match, Mock, MockServer, Request, ResponseTemplate};

use omada_api::{Credentials, Error, GroupType, OmadaClient};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, OmadaClient) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let client = OmadaClient::with_client(reqwest::Client::new(), base_url, "Default".into());
    (server, client)
}

fn ok_envelope(result: Value) -> Value {
    json!({ "errorCode": 0, "msg": "Success.", "result": result })
}

/// Mount a login mock handing out the given token, then log in.
async fn login_as(server: &MockServer, client: &OmadaClient, token: &str) {
    Mock::given(method("POST"))
        .and(path("/api/v2/login"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(ok_envelope(json!({ "token": token, "roleType": 0 }))),
        )
        .mount(server)
        .await;

    client
        .login(Some(Credentials::new("admin", "secret")))
        .await
        .unwrap();
}

/// Matches requests carrying the given query parameter, whatever its value.
/// Needed for the `_` cache-busting parameter, which is a live timestamp.
struct HasQueryParam(&'static str);

impl Match for HasQueryParam {
    fn matches(&self, request: &Request) -> bool {
        request.url.query_pairs().any(|(k, _)| k == self.0)
    }
}

// ── Authentication tests ────────────────────────────────────────────

#[tokio::test]
async fn test_login_stores_token() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/v2/login"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(ok_envelope(json!({ "token": "abc123", "roleType": 0 }))),
        )
        .mount(&server)
        .await;

    let result = client
        .login(Some(Credentials::new("admin", "secret")))
        .await
        .unwrap();

    assert_eq!(result["roleType"], 0);
    assert_eq!(client.token().as_deref(), Some("abc123"));
}

#[tokio::test]
async fn test_login_without_credentials() {
    let (_server, client) = setup().await;

    let result = client.login(None).await;

    assert!(
        matches!(result, Err(Error::MissingCredentials)),
        "expected MissingCredentials, got: {result:?}"
    );
}

#[tokio::test]
async fn test_login_rejected() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/v2/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "errorCode": -30109,
            "msg": "Login failed."
        })))
        .mount(&server)
        .await;

    let err = client
        .login(Some(Credentials::new("admin", "wrong")))
        .await
        .unwrap_err();

    assert_eq!(err.api_error_code(), Some(-30109));
    assert!(client.token().is_none());
}

#[tokio::test]
async fn test_login_result_without_token() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/v2/login"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(ok_envelope(json!({ "roleType": 0 }))),
        )
        .mount(&server)
        .await;

    let result = client
        .login(Some(Credentials::new("admin", "secret")))
        .await;

    assert!(
        matches!(result, Err(Error::Authentication { .. })),
        "expected Authentication error, got: {result:?}"
    );
}

#[tokio::test]
async fn test_logout_clears_token() {
    let (server, client) = setup().await;
    login_as(&server, &client, "abc123").await;

    Mock::given(method("POST"))
        .and(path("/api/v2/logout"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "errorCode": 0, "msg": "Success." })),
        )
        .mount(&server)
        .await;

    client.logout().await.unwrap();

    assert!(client.token().is_none());

    Mock::given(method("GET"))
        .and(path("/api/v2/loginStatus"))
        .and(query_param_is_missing("token"))
        .and(query_param_is_missing("_"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(ok_envelope(json!({ "login": false }))),
        )
        .mount(&server)
        .await;

    let status = client.get_login_status().await.unwrap();
    assert_eq!(status["login"], false);
}

#[tokio::test]
async fn test_logout_failure_keeps_token() {
    let (server, client) = setup().await;
    login_as(&server, &client, "abc123").await;

    Mock::given(method("POST"))
        .and(path("/api/v2/logout"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "errorCode": -1,
            "msg": "General error."
        })))
        .mount(&server)
        .await;

    let result = client.logout().await;

    assert!(matches!(result, Err(Error::Api { .. })));
    assert_eq!(client.token().as_deref(), Some("abc123"));
}

// ── Auth parameter injection tests ──────────────────────────────────

#[tokio::test]
async fn test_auth_params_injected_after_login() {
    let (server, client) = setup().await;
    login_as(&server, &client, "tok-1").await;

    Mock::given(method("GET"))
        .and(path("/api/v2/users/current"))
        .and(query_param("token", "tok-1"))
        .and(HasQueryParam("_"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(ok_envelope(json!({ "name": "admin" }))),
        )
        .mount(&server)
        .await;

    let user = client.get_current_user().await.unwrap();

    assert_eq!(user["name"], "admin");
}

#[tokio::test]
async fn test_no_auth_params_before_login() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/loginStatus"))
        .and(query_param_is_missing("token"))
        .and(query_param_is_missing("_"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(ok_envelope(json!({ "login": false }))),
        )
        .mount(&server)
        .await;

    let status = client.get_login_status().await.unwrap();

    assert_eq!(status["login"], false);
}

#[tokio::test]
async fn test_explicit_params_suppress_injection() {
    let (server, client) = setup().await;
    login_as(&server, &client, "tok-1").await;

    Mock::given(method("GET"))
        .and(path("/api/v2/users/current"))
        .and(query_param("foo", "bar"))
        .and(query_param_is_missing("token"))
        .and(query_param_is_missing("_"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(ok_envelope(json!({ "name": "admin" }))),
        )
        .mount(&server)
        .await;

    let result = client
        .get("/users/current", Some(&[("foo", "bar")]))
        .await
        .unwrap();

    assert_eq!(result.unwrap()["name"], "admin");
}

// ── Resource tests ──────────────────────────────────────────────────

#[tokio::test]
async fn test_site_groups_unwraps_data() {
    let (server, client) = setup().await;

    let result = json!({
        "data": [
            { "groupId": "g1", "name": "Guests", "type": 0 },
            { "groupId": "g2", "name": "Cameras", "type": 0 },
        ],
        "totalRows": 2
    });

    Mock::given(method("GET"))
        .and(path("/api/v2/sites/Default/setting/profiles/groups"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_envelope(result)))
        .mount(&server)
        .await;

    let groups = client.get_site_groups(None, None).await.unwrap();

    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0]["name"], "Guests");
    assert_eq!(groups[1]["groupId"], "g2");
}

#[tokio::test]
async fn test_site_groups_by_type() {
    let (server, client) = setup().await;

    let result = json!({
        "data": [{ "groupId": "g3", "name": "Printers", "type": 2 }]
    });

    Mock::given(method("GET"))
        .and(path("/api/v2/sites/Default/setting/profiles/groups/2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_envelope(result)))
        .mount(&server)
        .await;

    let groups = client
        .get_site_groups(None, Some(GroupType::Mac))
        .await
        .unwrap();

    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0]["type"], 2);
}

#[tokio::test]
async fn test_site_clients_pagination_params() {
    let (server, client) = setup().await;

    let result = json!({
        "data": [{ "mac": "AA-BB-CC-DD-EE-FF", "active": true }],
        "totalRows": 1
    });

    Mock::given(method("GET"))
        .and(path("/api/v2/sites/Default/clients"))
        .and(query_param("currentPageSize", "999"))
        .and(query_param("currentPage", "1"))
        .and(query_param("filters.active", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_envelope(result)))
        .mount(&server)
        .await;

    let clients = client.get_site_clients(None).await.unwrap();

    assert_eq!(clients["totalRows"], 1);
    assert_eq!(clients["data"][0]["mac"], "AA-BB-CC-DD-EE-FF");
}

#[tokio::test]
async fn test_wireless_networks_for_group() {
    let (server, client) = setup().await;

    let result = json!({
        "data": [
            { "id": "ssid1", "name": "Lab", "band": 3 },
            { "id": "ssid2", "name": "Lab-Guest", "band": 1 },
        ]
    });

    Mock::given(method("GET"))
        .and(path("/api/v2/sites/Branch/setting/wlans/wg-1/ssids"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_envelope(result)))
        .mount(&server)
        .await;

    let networks = client
        .get_wireless_networks("wg-1", Some("Branch"))
        .await
        .unwrap();

    assert_eq!(networks.len(), 2);
    assert_eq!(networks[0]["name"], "Lab");
}

#[tokio::test]
async fn test_wireless_groups_malformed_list() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/sites/Default/setting/wlans"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(ok_envelope(json!({ "totalRows": 0 }))),
        )
        .mount(&server)
        .await;

    let result = client.get_wireless_groups(None).await;

    assert!(
        matches!(result, Err(Error::Deserialization { .. })),
        "expected Deserialization error, got: {result:?}"
    );
}

#[tokio::test]
async fn test_site_groups_missing_result() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/sites/Default/setting/profiles/groups"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "errorCode": 0, "msg": "Success." })),
        )
        .mount(&server)
        .await;

    let result = client.get_site_groups(None, None).await;

    assert!(
        matches!(result, Err(Error::Deserialization { .. })),
        "expected Deserialization error, got: {result:?}"
    );
}

#[tokio::test]
async fn test_missing_result_is_null() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/scenarios"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "errorCode": 0, "msg": "Success." })),
        )
        .mount(&server)
        .await;

    let scenarios = client.get_scenarios().await.unwrap();

    assert!(scenarios.is_null());
}

// ── Site settings tests ─────────────────────────────────────────────

#[tokio::test]
async fn test_get_site_settings_strips_beacon_control() {
    let (server, client) = setup().await;

    let result = json!({
        "beaconControl": { "enable": true },
        "led": { "enable": false },
        "dst": { "enable": false }
    });

    Mock::given(method("GET"))
        .and(path("/api/v2/sites/Default/setting"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_envelope(result)))
        .mount(&server)
        .await;

    let settings = client.get_site_settings(None).await.unwrap();

    assert!(settings.get("beaconControl").is_none());
    assert_eq!(settings["led"]["enable"], false);
}

#[tokio::test]
async fn test_set_site_settings_strips_beacon_control() {
    let (server, client) = setup().await;

    Mock::given(method("PATCH"))
        .and(path("/api/v2/sites/Default/setting"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "errorCode": 0, "msg": "Success." })),
        )
        .mount(&server)
        .await;

    let settings = json!({
        "beaconControl": { "enable": true },
        "led": { "enable": true }
    });
    client.set_site_settings(settings, None).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    let patch = requests
        .iter()
        .find(|r| r.method.as_str() == "PATCH")
        .expect("no PATCH request recorded");
    let sent: Value = serde_json::from_slice(&patch.body).unwrap();

    assert!(sent.get("beaconControl").is_none());
    assert_eq!(sent["led"]["enable"], true);
}

// ── Error tests ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_api_error_envelope() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/sites/Default/devices"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "errorCode": -1001,
            "msg": "Invalid parameter."
        })))
        .mount(&server)
        .await;

    let result = client.get_site_devices(None).await;

    match result {
        Err(Error::Api { code, ref msg }) => {
            assert_eq!(code, -1001);
            assert_eq!(msg.as_deref(), Some("Invalid parameter."));
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_http_error_is_transport() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let result = client.get_site_devices(None).await;

    assert!(
        matches!(result, Err(Error::Transport(_))),
        "expected Transport error, got: {result:?}"
    );
}

#[tokio::test]
async fn test_malformed_body() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/loginStatus"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let result = client.get_login_status().await;

    match result {
        Err(Error::Deserialization { ref body, .. }) => {
            assert!(body.contains("<html>"));
        }
        other => panic!("expected Deserialization error, got: {other:?}"),
    }
}
