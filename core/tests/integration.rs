//! Built requests executed against the live echo server.
//!
//! # Design
//! Starts the mock server on a random port, then sends requests built by the
//! core through the client's own `ureq::Agent`. The echoed JSON shows what
//! actually reached the server.

use std::net::SocketAddr;

use build_client::{
    opt_base_url, opt_bearer_token, opt_http_client, opt_user_agent, Client, ClientOption, Request,
};
use http::Method;
use mock_server::EchoedRequest;

fn start_server() -> SocketAddr {
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

fn client(addr: SocketAddr, mut options: Vec<ClientOption>) -> Client {
    let agent = ureq::Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .new_agent();
    options.insert(0, opt_http_client(agent));
    options.insert(0, opt_base_url(format!("http://{addr}/api")));
    Client::new(options).unwrap()
}

fn with_headers<B>(mut builder: ureq::RequestBuilder<B>, req: &Request) -> ureq::RequestBuilder<B> {
    for (name, value) in req.headers() {
        builder = builder.header(name, value);
    }
    builder
}

/// Execute `req` with the client's agent and decode the echo.
fn execute(client: &Client, req: Request) -> EchoedRequest {
    let agent = client.http_client();
    let uri = req.uri().to_string();

    let mut response = match req.method().clone() {
        Method::GET => with_headers(agent.get(&uri), &req).call(),
        Method::DELETE => with_headers(agent.delete(&uri), &req).call(),
        Method::POST => with_headers(agent.post(&uri), &req).send(req.body().as_slice()),
        Method::PUT => with_headers(agent.put(&uri), &req).send(req.body().as_slice()),
        other => panic!("unsupported method in test: {other}"),
    }
    .expect("HTTP transport error");

    assert_eq!(response.status().as_u16(), 200);
    let body = response.body_mut().read_to_string().unwrap();
    serde_json::from_str(&body).unwrap()
}

#[test]
fn requests_reach_the_server_as_built() {
    let addr = start_server();

    // Authenticated client with a user agent.
    let authed = client(
        addr,
        vec![opt_bearer_token("abc123"), opt_user_agent("build-client-tests/1.0")],
    );
    assert_eq!(authed.base_url().as_str(), format!("http://{addr}/api/"));

    // GET keeps the base path and carries both headers.
    let req = authed.build_request("GET", "/v1/builds", None).unwrap();
    let echoed = execute(&authed, req);
    assert_eq!(echoed.method, "GET");
    assert_eq!(echoed.path, "/api/v1/builds");
    assert_eq!(echoed.authorization.as_deref(), Some("BEARER abc123"));
    assert_eq!(echoed.user_agent.as_deref(), Some("build-client-tests/1.0"));

    // POST passes the body through unchanged.
    let definition = "Bootstrap: docker\nFrom: alpine:3.19\n";
    let req = authed
        .build_request("POST", "v1/build", Some(definition.as_bytes().to_vec()))
        .unwrap();
    let echoed = execute(&authed, req);
    assert_eq!(echoed.method, "POST");
    assert_eq!(echoed.path, "/api/v1/build");
    assert_eq!(echoed.body, definition);

    // A question mark in the path stays in the path.
    let req = authed.build_request("DELETE", "v1/build/a?b", None).unwrap();
    let echoed = execute(&authed, req);
    assert_eq!(echoed.path, "/api/v1/build/a%3Fb");
    assert!(echoed.query.is_none());

    // Anonymous client sends no Authorization header.
    let anonymous = client(addr, Vec::new());
    let req = anonymous.build_request("GET", "v1/build/1", None).unwrap();
    let echoed = execute(&anonymous, req);
    assert_eq!(echoed.path, "/api/v1/build/1");
    assert!(echoed.authorization.is_none());
}

#[test]
fn one_client_serves_concurrent_callers() {
    let addr = start_server();
    let shared = std::sync::Arc::new(client(addr, vec![opt_bearer_token("abc123")]));

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let shared = shared.clone();
            std::thread::spawn(move || {
                let req = shared.build_request("GET", &format!("v1/build/{i}"), None).unwrap();
                execute(&shared, req)
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let echoed = handle.join().unwrap();
        assert_eq!(echoed.path, format!("/api/v1/build/{i}"));
        assert_eq!(echoed.authorization.as_deref(), Some("BEARER abc123"));
    }
}
