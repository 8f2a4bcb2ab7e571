#![allow(dead_code)]

use std::io::Read;
use std::sync::{Arc, Mutex};
use std::thread;

use alloy::primitives::Address;
use serde_json::{json, Value};
use tiny_http::{Method, Response, Server, StatusCode};

pub fn safe_address() -> Address {
    "0x000000000000000000000000000000000000BEEF"
        .parse()
        .expect("valid safe address")
}

pub fn new_owner_address() -> Address {
    "0x1000000000000000000000000000000000000001"
        .parse()
        .expect("valid owner address")
}

/// JSON-RPC node stub. `respond` maps a method name to `(http status, body)`.
pub fn spawn_rpc_server<F>(
    requests: Arc<Mutex<Vec<Value>>>,
    max_requests: usize,
    respond: F,
) -> (String, thread::JoinHandle<()>)
where
    F: Fn(&str, &Value) -> (u16, Value) + Send + 'static,
{
    let server = Server::http("127.0.0.1:0").expect("start server");
    let addr = format!("http://{}", server.server_addr());

    let join = thread::spawn(move || {
        for _ in 0..max_requests {
            let mut req = match server.recv() {
                Ok(r) => r,
                Err(_) => break,
            };
            let mut body = String::new();
            let _ = req.as_reader().read_to_string(&mut body);
            let payload: Value = serde_json::from_str(&body).unwrap_or(Value::Null);
            let method = payload
                .get("method")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_owned();
            if let Ok(mut g) = requests.lock() {
                g.push(payload.clone());
            }

            let (code, reply) = if *req.method() == Method::Post {
                let (code, result) = respond(&method, &payload);
                (code, result)
            } else {
                (405, json!({"error": "method not allowed"}))
            };
            let response =
                Response::from_string(reply.to_string()).with_status_code(StatusCode(code));
            let _ = req.respond(response);
        }
    });

    (addr, join)
}

pub fn rpc_result(payload: &Value, result: Value) -> Value {
    json!({"jsonrpc": "2.0", "id": payload["id"].clone(), "result": result})
}

pub fn rpc_error(payload: &Value, code: i64, message: &str) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": payload["id"].clone(),
        "error": {"code": code, "message": message}
    })
}
