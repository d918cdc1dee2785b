//! Shared fixtures for the DingTalk integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use ding_sync::DingClient;
use ding_sync::cache::MemoryCache;
use ding_sync::config::DingConfig;
use serde_json::{Value, json};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const APP_KEY: &str = "test-app-key";
pub const APP_SECRET: &str = "test-app-secret";
pub const ACCESS_TOKEN: &str = "mock-access-token";
pub const USERNAME_FIELD: &str = "jobnumber";

/// Wraps a payload in the open API success envelope.
pub fn ok(mut body: Value) -> Value {
    body["errcode"] = json!(0);
    body["errmsg"] = json!("ok");
    body
}

pub fn api_error(errcode: i64, errmsg: &str) -> Value {
    json!({ "errcode": errcode, "errmsg": errmsg })
}

/// Mock DingTalk server serving both the oapi and v1.0 endpoints.
pub struct MockDing {
    pub server: MockServer,
}

impl MockDing {
    pub async fn new() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    pub fn config(&self, dept_ids: &str) -> DingConfig {
        DingConfig::new(APP_KEY, APP_SECRET, dept_ids, USERNAME_FIELD)
            .with_base_urls(self.server.uri(), self.server.uri())
    }

    pub fn client(&self, cache: Arc<MemoryCache>) -> DingClient {
        self.client_with(cache, self.config("1"))
    }

    pub fn client_with(&self, cache: Arc<MemoryCache>, config: DingConfig) -> DingClient {
        DingClient::new(config, cache).expect("valid test config")
    }

    pub async fn mock_token(&self, expires_in: i64, expected: u64) {
        Mock::given(method("GET"))
            .and(path("/gettoken"))
            .and(query_param("appkey", APP_KEY))
            .and(query_param("appsecret", APP_SECRET))
            .respond_with(ResponseTemplate::new(200).set_body_json(ok(json!({
                "access_token": ACCESS_TOKEN,
                "expires_in": expires_in
            }))))
            .expect(expected)
            .mount(&self.server)
            .await;
    }

    pub async fn mock_sub_depts(&self, dept_id: i64, children: &[i64], expected: u64) {
        Mock::given(method("GET"))
            .and(path("/department/list_ids"))
            .and(query_param("id", dept_id.to_string()))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(ok(json!({ "sub_dept_id_list": children }))),
            )
            .expect(expected)
            .mount(&self.server)
            .await;
    }

    pub async fn mock_dept_members(&self, dept_id: i64, userids: &[&str]) {
        Mock::given(method("GET"))
            .and(path("/user/getDeptMember"))
            .and(query_param("deptId", dept_id.to_string()))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(ok(json!({ "userIds": userids }))),
            )
            .mount(&self.server)
            .await;
    }

    pub async fn mock_user(&self, userid: &str, fields: Value, expected: u64) {
        let mut body = ok(fields);
        body["userid"] = json!(userid);
        Mock::given(method("GET"))
            .and(path("/user/get"))
            .and(query_param("userid", userid))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .expect(expected)
            .mount(&self.server)
            .await;
    }

    /// Responds with a non-zero errcode for the given path and query parameter.
    pub async fn mock_api_error(&self, api_path: &str, key: &str, value: &str, errcode: i64) {
        Mock::given(method("GET"))
            .and(path(api_path))
            .and(query_param(key, value))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(api_error(errcode, "mock failure")),
            )
            .mount(&self.server)
            .await;
    }
}
