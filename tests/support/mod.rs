#![allow(dead_code)]

use community_hub::HttpCommunityApi;
use community_hub::shared::config::ApiConfig;
use serde_json::Value;
use std::io::Read;
use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::Duration as StdDuration;
use tiny_http::{Header, Response, Server};

#[derive(Debug)]
pub enum MockBody {
    Json(Value),
    Text(String),
    Empty,
}

#[derive(Debug)]
pub struct MockHttpResponse {
    pub status: u16,
    pub body: MockBody,
}

impl MockHttpResponse {
    pub fn json(status: u16, body: Value) -> Self {
        Self {
            status,
            body: MockBody::Json(body),
        }
    }

    pub fn text(status: u16, body: &str) -> Self {
        Self {
            status,
            body: MockBody::Text(body.to_string()),
        }
    }

    pub fn empty(status: u16) -> Self {
        Self {
            status,
            body: MockBody::Empty,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub method: String,
    pub path: String,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl CapturedRequest {
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn body_json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("json request body")
    }
}

/// 受け取ったリクエストを記録しながら、決められた順にレスポンスを返す
pub fn spawn_sequence_server(
    responses: Vec<MockHttpResponse>,
) -> (String, Receiver<CapturedRequest>, thread::JoinHandle<()>) {
    let server = Server::http("127.0.0.1:0").expect("mock server");
    let base_url = format!("http://{}", server.server_addr());
    let (tx, rx) = mpsc::channel();

    let handle = thread::spawn(move || {
        for response_spec in responses {
            let mut request = match server.recv_timeout(StdDuration::from_secs(8)) {
                Ok(Some(request)) => request,
                Ok(None) => break,
                Err(_) => break,
            };

            let mut body = Vec::new();
            let _ = request.as_reader().read_to_end(&mut body);
            let content_type = request
                .headers()
                .iter()
                .find(|header| header.field.equiv("Content-Type"))
                .map(|header| header.value.as_str().to_string());
            let _ = tx.send(CapturedRequest {
                method: request.method().to_string(),
                path: request.url().to_string(),
                content_type,
                body,
            });

            let response = match response_spec.body {
                MockBody::Json(body) => Response::from_string(body.to_string()).with_header(
                    Header::from_bytes("Content-Type", "application/json")
                        .expect("content-type header"),
                ),
                MockBody::Text(body) => Response::from_string(body).with_header(
                    Header::from_bytes("Content-Type", "text/plain").expect("content-type header"),
                ),
                MockBody::Empty => Response::from_string(String::new()),
            };
            let _ = request.respond(response.with_status_code(response_spec.status));
        }
    });

    (base_url, rx, handle)
}

pub fn api_for(base_url: &str) -> HttpCommunityApi {
    let config = ApiConfig {
        base_url: base_url.to_string(),
        request_timeout_secs: Some(5),
        user_agent: None,
    };
    HttpCommunityApi::new(&config).expect("http api")
}

pub fn next_request(rx: &Receiver<CapturedRequest>) -> CapturedRequest {
    rx.recv_timeout(StdDuration::from_secs(5))
        .expect("captured request")
}
