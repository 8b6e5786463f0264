//! From configuration text to a dispatched call.

use serde::Deserialize;
use shimroute::prelude::*;
use shimroute::ConfigLoader;
use shimroute_test::{MockStub, TestResponse};

#[derive(Debug, Deserialize)]
struct Order {
    item: String,
    quantity: u32,
}

const CONFIG: &str = r#"
[router]
context_scope = "shared"

[logging]
enabled = false
"#;

#[test]
fn configured_router_dispatches() {
    let config = ConfigLoader::new().with_string(CONFIG, "toml").unwrap().load().unwrap();
    let mut router = bootstrap(&config).unwrap();
    assert_eq!(router.scope(), ContextScope::Shared);

    router.use_middleware(vec![middleware_fn("count_calls", |stub, args, ctx, next| {
        if let Some(calls) = ctx.get_or_default::<u32>("calls") {
            *calls += 1;
        }
        next.run(stub, args, ctx)
    })
    .boxed()]);

    router.register_handler(
        "order",
        handler_fn(|_stub, _args, ctx| {
            let Some(order) = ctx.get::<std::sync::Arc<Order>>("order") else {
                return Response::error(500, "order missing from context");
            };
            let calls = ctx.get::<u32>("calls").copied().unwrap_or_default();
            Response::ok(format!("{}x{} (call {calls})", order.quantity, order.item))
        }),
        vec![
            ArgCounter::new(["order"]).boxed(),
            JsonParser::<Order>::new(0, "order").boxed(),
        ],
    );

    let stub = MockStub::new("shop").with_args("order", [r#"{"item":"tea","quantity":2}"#]);
    TestResponse::from(router.invoke(&stub))
        .assert_ok()
        .assert_payload_eq("2xtea (call 1)");

    TestResponse::from(router.invoke(&stub))
        .assert_ok()
        .assert_payload_eq("2xtea (call 2)");
}

#[test]
fn unknown_function_is_rejected() {
    let config = ConfigLoader::new().with_string(CONFIG, "toml").unwrap().load().unwrap();
    let router = bootstrap(&config).unwrap();

    let stub = MockStub::new("shop").with_args("refund", Vec::<String>::new());
    TestResponse::from(router.invoke(&stub)).assert_error(400, "invalid invoke function \"refund\"");
}
