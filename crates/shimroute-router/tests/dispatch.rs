//! End-to-end dispatch through the built-in middleware.

use std::sync::Arc;
use std::thread;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use shimroute_core::{handler_fn, ContextScope, Response, TxTimestamp as HostTimestamp};
use shimroute_middleware::{
    middleware_fn, ArgCounter, JsonParser, Middleware, TimestampParser, TxTimestamp,
};
use shimroute_router::Router;
use shimroute_test::{MockStub, TestResponse};

#[derive(Debug, Deserialize)]
struct Transfer {
    asset: String,
    to: String,
}

fn asset_router() -> Router {
    let mut router = Router::new();
    router.use_middleware(vec![TxTimestamp::new("tx_time").boxed()]);

    router.register_handler(
        "transfer",
        handler_fn(|_stub, _args, ctx| {
            let transfer = ctx.get::<Arc<Transfer>>("transfer").unwrap();
            let after = ctx.get::<DateTime<Utc>>("after").unwrap();
            let tx_time = ctx.get::<DateTime<Utc>>("tx_time").unwrap();
            if tx_time < after {
                return Response::error(409, "transfer not yet allowed");
            }
            Response::ok(format!("{} -> {}", transfer.asset, transfer.to).into_bytes())
        }),
        vec![
            ArgCounter::new(["transfer", "after"]).boxed(),
            JsonParser::<Transfer>::new(0, "transfer").boxed(),
            TimestampParser::new(1, "%Y-%m-%d", "after").boxed(),
        ],
    );
    router
}

fn stub(args: [&str; 2]) -> MockStub {
    MockStub::new("assets")
        .with_args("transfer", args)
        .with_tx_timestamp(HostTimestamp::new(1_600_000_000, 0))
}

#[test]
fn full_chain_succeeds() {
    let router = asset_router();
    let rsp = router.invoke(&stub([r#"{"asset":"a1","to":"bob"}"#, "2020-01-01"]));
    TestResponse::from(rsp).assert_ok().assert_payload_eq("a1 -> bob");
}

#[test]
fn handler_decision_uses_parsed_values() {
    let router = asset_router();
    let rsp = router.invoke(&stub([r#"{"asset":"a1","to":"bob"}"#, "2030-01-01"]));
    TestResponse::from(rsp).assert_error(409, "transfer not yet allowed");
}

#[test]
fn bad_json_short_circuits() {
    let router = asset_router();
    let rsp = router.invoke(&stub(["{", "2020-01-01"]));
    TestResponse::from(rsp)
        .assert_status(400)
        .assert_message_contains("error unmarshalling json");
}

#[test]
fn bad_date_short_circuits() {
    let router = asset_router();
    let rsp = router.invoke(&stub([r#"{"asset":"a1","to":"bob"}"#, "soon"]));
    TestResponse::from(rsp)
        .assert_status(400)
        .assert_message_contains("error parsing time string");
}

#[test]
fn missing_tx_timestamp_fails_before_call_middleware() {
    let router = asset_router();
    let stub = MockStub::new("assets").with_args("transfer", ["only one"]);
    TestResponse::from(router.invoke(&stub)).assert_error(
        500,
        "error getting transaction timestamp: transaction timestamp not set",
    );
}

#[test]
fn wrong_arg_count() {
    let router = asset_router();
    let stub = MockStub::new("assets")
        .with_args("transfer", ["x"])
        .with_tx_timestamp(HostTimestamp::new(0, 0));
    TestResponse::from(router.invoke(&stub)).assert_error(
        400,
        "incorrect number of arguments, expected 2: transfer, after",
    );
}

#[test]
fn concurrent_dispatch_keeps_contexts_apart() {
    let mut router = Router::new();
    router.register_handler(
        "echo",
        handler_fn(|_stub, args, ctx| {
            let seen = ctx.get_or_default::<Vec<String>>("seen").unwrap();
            seen.push(args[0].clone());
            Response::ok(seen.join(",").into_bytes())
        }),
        vec![],
    );
    let router = Arc::new(router);

    let workers: Vec<_> = (0..8)
        .map(|i| {
            let router = Arc::clone(&router);
            thread::spawn(move || {
                let stub = MockStub::new("cc").with_args("echo", [i.to_string()]);
                router.invoke(&stub)
            })
        })
        .collect();

    for (i, worker) in workers.into_iter().enumerate() {
        let rsp = worker.join().unwrap();
        assert_eq!(rsp.payload().as_ref(), i.to_string().as_bytes());
    }
}

#[test]
fn shared_scope_serialises_calls() {
    let mut router = Router::with_scope(ContextScope::Shared);
    router.use_middleware(vec![middleware_fn("count", |stub, args, ctx, next| {
        *ctx.get_or_default::<u32>("calls").unwrap() += 1;
        next.run(stub, args, ctx)
    })
    .boxed()]);
    router.register_handler(
        "noop",
        handler_fn(|_stub, _args, _ctx| Response::ok(Vec::new())),
        vec![],
    );
    let router = Arc::new(router);

    let workers: Vec<_> = (0..8)
        .map(|_| {
            let router = Arc::clone(&router);
            thread::spawn(move || {
                for _ in 0..25 {
                    router.invoke(&MockStub::new("cc").with_args("noop", Vec::<String>::new()));
                }
            })
        })
        .collect();
    for worker in workers {
        worker.join().unwrap();
    }

    let ctx = router.shared_context().unwrap();
    assert_eq!(ctx.get::<u32>("calls"), Some(&200));
}
