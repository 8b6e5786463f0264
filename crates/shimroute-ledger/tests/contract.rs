//! A small asset contract built from the router, middleware and ledger helpers.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::json;
use shimroute_core::{handler_fn, Response, StateEntry};
use shimroute_ledger::{creator_common_name, get_json, put_json, query_json, LedgerError};
use shimroute_middleware::{ArgCounter, JsonParser, Middleware};
use shimroute_router::Router;
use shimroute_test::{MockStub, TestResponse};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
struct Asset {
    id: String,
    owner: String,
}

fn ledger_failure(err: &LedgerError) -> Response {
    match err {
        LedgerError::NotFound(_) => Response::error(404, err.to_string()),
        _ => Response::error(500, err.to_string()),
    }
}

fn contract() -> Router {
    let mut router = Router::new();

    router.register_handler(
        "create",
        handler_fn(|stub, _args, ctx| {
            let asset = ctx.get::<Arc<Asset>>("asset").unwrap();
            match put_json(stub, &asset.id, &**asset) {
                Ok(bytes) => Response::success(201, bytes),
                Err(e) => ledger_failure(&e),
            }
        }),
        vec![
            ArgCounter::new(["asset"]).boxed(),
            JsonParser::<Asset>::new(0, "asset").boxed(),
        ],
    );

    router.register_handler(
        "read",
        handler_fn(|stub, args, _ctx| match get_json::<Asset>(stub, &args[0]) {
            Ok(asset) => Response::ok(serde_json::to_vec(&asset).unwrap_or_default()),
            Err(e) => ledger_failure(&e),
        }),
        vec![ArgCounter::new(["id"]).boxed()],
    );

    router.register_handler(
        "query",
        handler_fn(|stub, args, _ctx| match query_json(stub, &args[0]) {
            Ok(bytes) => Response::ok(bytes),
            Err(e) => ledger_failure(&e),
        }),
        vec![ArgCounter::new(["query"]).boxed()],
    );

    router.register_handler(
        "whoami",
        handler_fn(|stub, _args, _ctx| match creator_common_name(stub) {
            Ok(cn) => Response::ok(cn.into_bytes()),
            Err(e) => ledger_failure(&e),
        }),
        vec![ArgCounter::new(Vec::<String>::new()).boxed()],
    );

    router
}

#[test]
fn create_then_read() {
    let router = contract();
    let stub = MockStub::new("assets").with_args("create", [r#"{"id":"a1","owner":"alice"}"#]);
    TestResponse::from(router.invoke(&stub)).assert_status(201);

    let written = stub.state_value("a1").unwrap();
    let read_stub = MockStub::new("assets")
        .with_state("a1", written)
        .with_args("read", ["a1"]);
    TestResponse::from(router.invoke(&read_stub))
        .assert_ok()
        .assert_json_field("owner", &json!("alice"));
}

#[test]
fn read_missing_asset() {
    let router = contract();
    let stub = MockStub::new("assets").with_args("read", ["ghost"]);
    TestResponse::from(router.invoke(&stub)).assert_error(404, "key \"ghost\" not found");
}

#[test]
fn query_by_owner() {
    let router = contract();
    let query = r#"{"selector":{"owner":"alice"}}"#;
    let stub = MockStub::new("assets")
        .with_args("query", [query])
        .with_query(
            query,
            [
                StateEntry::new("a1", br#"{"id":"a1","owner":"alice"}"#.to_vec()),
                StateEntry::new("a2", br#"{"id":"a2","owner":"alice"}"#.to_vec()),
            ],
        );

    TestResponse::from(router.invoke(&stub))
        .assert_ok()
        .assert_json_field("0.Key", &json!("a1"))
        .assert_json_field("1.Record.id", &json!("a2"));
}

#[test]
fn whoami_reads_certificate() {
    let router = contract();
    let stub = MockStub::new("assets")
        .with_args("whoami", Vec::<String>::new())
        .with_creator_cn("Org1MSP", "carol")
        .unwrap();
    TestResponse::from(router.invoke(&stub))
        .assert_ok()
        .assert_payload_eq("carol");
}

#[test]
fn whoami_without_creator() {
    let router = contract();
    let stub = MockStub::new("assets").with_args("whoami", Vec::<String>::new());
    TestResponse::from(router.invoke(&stub))
        .assert_error(500, "stub error: creator identity not set");
}
