//! Integration tests for the token lifecycle of the authenticated client,
//! driven against a mock gateway.

use httpmock::prelude::*;
use serde_json::json;
use url::Url;

use sankhya::dataset::LoadRecordsRequest;
use sankhya::{Client, Config, Credentials, Error};

fn test_client(server: &MockServer) -> Client {
    let credentials = Credentials {
        token: "svc-token".to_string(),
        appkey: "svc-appkey".to_string(),
        username: "integration@example.com".to_string(),
        password: "secret".to_string(),
    };
    let base_url = Url::parse(&server.base_url()).unwrap();
    Client::new(Config::new(base_url, credentials))
}

fn load_request() -> LoadRecordsRequest {
    LoadRecordsRequest::new("AD_USUARIOSVENDAS", &["CODUSUARIO", "NOME"], None)
}

fn sample_result_set() -> serde_json::Value {
    json!({
        "responseBody": {
            "entities": {
                "metadata": {"fields": {"field": [{"name": "CODUSUARIO"}, {"name": "NOME"}]}},
                "entity": [{"f0": {"$": "1"}, "f1": {"$": "ALICE"}}]
            }
        }
    })
}

#[tokio::test]
async fn cold_cache_logs_in_once_then_reuses_the_token() {
    let server = MockServer::start();

    let login = server.mock(|when, then| {
        when.method(POST)
            .path("/login")
            .header("token", "svc-token")
            .header("appkey", "svc-appkey")
            .header("username", "integration@example.com")
            .header("password", "secret");
        then.status(200).json_body(json!({"bearerToken": "tok-1"}));
    });

    let data = server.mock(|when, then| {
        when.method(POST)
            .path("/gateway/v1/mge/service.sbr")
            .query_param("serviceName", "CRUDServiceProvider.loadRecords")
            .query_param("outputType", "json")
            .header("authorization", "Bearer tok-1");
        then.status(200).json_body(sample_result_set());
    });

    let client = test_client(&server);
    client.load_records(&load_request()).await.unwrap();
    client.load_records(&load_request()).await.unwrap();

    // One login serves both data calls.
    login.assert_calls(1);
    data.assert_calls(2);
}

#[tokio::test]
async fn login_response_without_token_is_an_authentication_error() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(POST).path("/login");
        then.status(200).json_body(json!({"status": "ok"}));
    });

    let client = test_client(&server);
    let err = client.load_records(&load_request()).await.unwrap_err();

    match err {
        Error::Authentication { message } => {
            assert!(message.contains("token not found"), "got: {message}");
        }
        other => panic!("expected Authentication, got {other:?}"),
    }
}

#[tokio::test]
async fn failed_login_is_an_authentication_error() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(POST).path("/login");
        then.status(500);
    });

    let client = test_client(&server);
    let err = client.load_records(&load_request()).await.unwrap_err();
    assert!(matches!(err, Error::Authentication { .. }), "got {err:?}");
}

#[tokio::test]
async fn unauthorized_data_call_clears_the_cache_and_relogs_on_next_call() {
    let server = MockServer::start();

    let login = server.mock(|when, then| {
        when.method(POST).path("/login");
        then.status(200).json_body(json!({"token": "tok-1"}));
    });

    let mut rejected = server.mock(|when, then| {
        when.method(POST).path("/gateway/v1/mge/service.sbr");
        then.status(401);
    });

    let client = test_client(&server);
    let err = client.load_records(&load_request()).await.unwrap_err();
    assert!(matches!(err, Error::SessionExpired), "got {err:?}");
    rejected.assert_calls(1);
    rejected.delete();

    server.mock(|when, then| {
        when.method(POST)
            .path("/gateway/v1/mge/service.sbr")
            .header("authorization", "Bearer tok-1");
        then.status(200).json_body(sample_result_set());
    });

    client.load_records(&load_request()).await.unwrap();

    // The 401 dropped the cached token, so the second call logged in again.
    login.assert_calls(2);
}

#[tokio::test]
async fn non_2xx_data_call_is_a_communication_error() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(POST).path("/login");
        then.status(200).json_body(json!({"bearerToken": "tok-1"}));
    });
    server.mock(|when, then| {
        when.method(POST).path("/gateway/v1/mge/service.sbr");
        then.status(500);
    });

    let client = test_client(&server);
    let err = client.load_records(&load_request()).await.unwrap_err();
    assert!(matches!(err, Error::Communication { .. }), "got {err:?}");
}

#[tokio::test]
async fn save_posts_the_dataset_save_envelope() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(POST).path("/login");
        then.status(200).json_body(json!({"bearerToken": "tok-1"}));
    });

    let save = server.mock(|when, then| {
        when.method(POST)
            .path("/gateway/v1/mge/service.sbr")
            .query_param("serviceName", "DatasetSP.save")
            .json_body(json!({
                "serviceName": "DatasetSP.save",
                "requestBody": {
                    "entityName": "AD_USUARIOSVENDAS",
                    "standAlone": false,
                    "fields": ["NOME", "EMAIL"],
                    "records": [{"values": {"0": "ALICE", "1": "alice@example.com"}}]
                }
            }));
        then.status(200).json_body(json!({"responseBody": {}}));
    });

    let client = test_client(&server);
    let request = sankhya::dataset::SaveRequest::insert(
        "AD_USUARIOSVENDAS",
        &["NOME", "EMAIL"],
        &["ALICE".into(), "alice@example.com".into()],
    );
    client.save(&request).await.unwrap();

    save.assert_calls(1);
}
