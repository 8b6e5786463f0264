//! Log output of a dispatched call.

use std::io;
use std::sync::Arc;

use parking_lot::Mutex;
use shimroute_core::{handler_fn, Response};
use shimroute_router::Router;
use shimroute_test::MockStub;
use tracing::Level;

#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl Captured {
    fn text(&self) -> String {
        String::from_utf8_lossy(&self.0.lock()).into_owned()
    }
}

impl io::Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn with_captured_logs(f: impl FnOnce()) -> String {
    let captured = Captured::default();
    let writer = captured.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_max_level(Level::DEBUG)
        .with_ansi(false)
        .finish();
    tracing::subscriber::with_default(subscriber, f);
    captured.text()
}

#[test]
fn unknown_function_is_logged_with_call_fields() {
    let router = Router::new();
    let stub = MockStub::new("cc")
        .with_tx_id("tx-42")
        .with_args("nothing", Vec::<String>::new());

    let logs = with_captured_logs(|| {
        router.invoke(&stub);
    });

    assert!(logs.contains("ERROR"), "{logs}");
    assert!(logs.contains("no handler registered"), "{logs}");
    assert!(logs.contains("function=nothing"), "{logs}");
    assert!(logs.contains("tx_id=tx-42"), "{logs}");
    assert!(logs.contains("call_id="), "{logs}");
}

#[test]
fn completed_call_logs_status() {
    let mut router = Router::new();
    router.register_handler(
        "ping",
        handler_fn(|_stub, _args, _ctx| Response::ok("pong")),
        Vec::new(),
    );
    let stub = MockStub::new("cc").with_args("ping", Vec::<String>::new());

    let logs = with_captured_logs(|| {
        router.invoke(&stub);
    });

    assert!(logs.contains("invoke completed"), "{logs}");
    assert!(logs.contains("status=200"), "{logs}");
    assert!(logs.contains("function=ping"), "{logs}");
}
