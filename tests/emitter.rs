use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use evbus::{Arg, Args, Config, DispatcherState, Emitter, Handler, HandlerId, IdSource, args};
use tokio::sync::mpsc;

const WAIT: Duration = Duration::from_secs(2);
const QUIET: Duration = Duration::from_millis(150);

fn strings(args: &Args) -> Vec<String> {
    args.iter().filter_map(Arg::as_str).map(str::to_owned).collect()
}

type Tagged = (&'static str, Vec<String>);

/// Subscribes a handler that forwards its string args (tagged) to a channel.
fn forward(
    bus: &Emitter,
    ty: &'static str,
    tag: &'static str,
    out: mpsc::UnboundedSender<Tagged>,
) -> HandlerId {
    bus.subscribe(ty, move |args: Args| {
        let _ = out.send((tag, strings(&args)));
    })
}

async fn recv<T>(rx: &mut mpsc::UnboundedReceiver<T>) -> T {
    tokio::time::timeout(WAIT, rx.recv())
        .await
        .expect("timed out waiting for delivery")
        .expect("channel closed")
}

async fn assert_quiet<T: std::fmt::Debug>(rx: &mut mpsc::UnboundedReceiver<T>) {
    if let Ok(Some(v)) = tokio::time::timeout(QUIET, rx.recv()).await {
        panic!("unexpected delivery: {v:?}");
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn handler_receives_emitted_args_exactly_once() {
    let bus = Emitter::builder().build().unwrap();
    let (tx, mut rx) = mpsc::unbounded_channel();
    forward(&bus, "test", "h", tx);

    bus.emit("test", args!["x", "y"]);

    let (_, got) = recv(&mut rx).await;
    assert_eq!(got, ["x", "y"]);
    assert_quiet(&mut rx).await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn payload_shapes_survive_delivery() {
    #[derive(Debug, PartialEq)]
    struct Order {
        id: u32,
    }

    let bus = Emitter::builder().build().unwrap();
    let (tx, mut rx) = mpsc::unbounded_channel::<Args>();
    bus.subscribe("order", move |args: Args| {
        let _ = tx.send(args);
    });

    bus.emit(
        "order",
        args![7, 2.5, true, (), vec![1u8, 2], Arg::opaque(Order { id: 3 })],
    );

    let got = recv(&mut rx).await;
    assert_eq!(got.len(), 6);
    assert_eq!(got[0].as_int(), Some(7));
    assert_eq!(got[1].as_float(), Some(2.5));
    assert_eq!(got[2].as_bool(), Some(true));
    assert!(got[3].is_null());
    assert_eq!(got[4].as_bytes(), Some(&[1u8, 2][..]));
    assert_eq!(got[5].downcast_ref::<Order>(), Some(&Order { id: 3 }));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn both_handlers_get_identical_args() {
    let bus = Emitter::builder().build().unwrap();
    let (tx, mut rx) = mpsc::unbounded_channel();
    forward(&bus, "test", "h1", tx.clone());
    forward(&bus, "test", "h2", tx);

    bus.emit("test", args!["a", "b"]);

    let mut seen = vec![recv(&mut rx).await, recv(&mut rx).await];
    seen.sort();
    assert_eq!(
        seen,
        vec![
            ("h1", vec!["a".to_string(), "b".to_string()]),
            ("h2", vec!["a".to_string(), "b".to_string()]),
        ]
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn unsubscribed_handler_is_not_invoked() {
    let bus = Emitter::builder().build().unwrap();
    let (tx, mut rx) = mpsc::unbounded_channel();
    let gone = forward(&bus, "test", "gone", tx.clone());
    forward(&bus, "test", "kept", tx);

    assert!(bus.unsubscribe("test", &gone));
    bus.emit("test", args!["x"]);

    let (tag, _) = recv(&mut rx).await;
    assert_eq!(tag, "kept");
    assert_quiet(&mut rx).await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn unsubscribe_unknown_pairs_is_safe() {
    let bus = Emitter::builder().build().unwrap();
    let stranger = HandlerId::from("not-a-real-id");
    assert!(!bus.unsubscribe("never-registered", &stranger));

    let (tx, mut rx) = mpsc::unbounded_channel();
    forward(&bus, "test", "h", tx);
    assert!(!bus.unsubscribe("test", &stranger));
    assert_eq!(bus.unsubscribe_multiple(["test", "other"], &stranger), 0);

    bus.emit("test", args![]);
    recv(&mut rx).await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn subscribe_multiple_then_unsubscribe_multiple() {
    let bus = Emitter::builder().build().unwrap();
    let (tx, mut rx) = mpsc::unbounded_channel::<Vec<String>>();
    let id = bus.subscribe_multiple(["A", "B"], move |args: Args| {
        let _ = tx.send(strings(&args));
    });
    assert!(!id.as_str().is_empty());
    assert_eq!(bus.handler_count("A"), 1);
    assert_eq!(bus.handler_count("B"), 1);

    bus.emit("A", args!["from-a"]);
    assert_eq!(recv(&mut rx).await, ["from-a"]);
    bus.emit("B", args!["from-b"]);
    assert_eq!(recv(&mut rx).await, ["from-b"]);

    assert_eq!(bus.unsubscribe_multiple(["A", "B"], &id), 2);
    assert_eq!(bus.handler_count("A"), 0);
    assert_eq!(bus.handler_count("B"), 0);
    assert!(bus.event_types().is_empty());

    bus.emit("A", args!["late"]);
    bus.emit("B", args!["late"]);
    assert_quiet(&mut rx).await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn panicking_handler_is_isolated() {
    let bus = Emitter::builder().build().unwrap();
    bus.subscribe("test", |_args: Args| panic!("handler blew up"));
    let (tx, mut rx) = mpsc::unbounded_channel();
    forward(&bus, "test", "healthy", tx);

    bus.emit("test", args!["first"]);
    assert_eq!(recv(&mut rx).await, ("healthy", vec!["first".to_string()]));

    // The dispatcher keeps going after the panic.
    bus.emit("test", args!["second"]);
    assert_eq!(recv(&mut rx).await, ("healthy", vec!["second".to_string()]));
    assert_eq!(bus.state(), DispatcherState::Running);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn emit_without_handlers_is_harmless() {
    let bus = Emitter::builder().build().unwrap();
    bus.emit("nobody-listens", args!["x"]);

    let (tx, mut rx) = mpsc::unbounded_channel();
    forward(&bus, "test", "h", tx);
    bus.emit("test", args!["after"]);
    assert_eq!(recv(&mut rx).await.1, ["after"]);
    assert!(bus.is_running());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn nothing_is_delivered_after_stop() {
    let bus = Emitter::builder().build().unwrap();
    let (tx, mut rx) = mpsc::unbounded_channel();
    forward(&bus, "test", "h", tx);

    bus.stop().await;
    assert_eq!(bus.state(), DispatcherState::Stopped);

    bus.emit("test", args!["too late"]);
    assert!(bus.emit_wait("test", args!["too late"]).await.is_err());
    assert_quiet(&mut rx).await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn stop_does_not_cancel_running_handlers() {
    let bus = Emitter::builder().build().unwrap();
    let (started_tx, mut started_rx) = mpsc::unbounded_channel::<()>();
    let (done_tx, mut done_rx) = mpsc::unbounded_channel::<()>();
    bus.subscribe_async("slow", move |_args: Args| {
        let started_tx = started_tx.clone();
        let done_tx = done_tx.clone();
        async move {
            let _ = started_tx.send(());
            tokio::time::sleep(Duration::from_millis(100)).await;
            let _ = done_tx.send(());
        }
    });

    bus.emit("slow", args![]);
    recv(&mut started_rx).await;
    bus.stop().await;
    recv(&mut done_rx).await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn emit_wait_applies_back_pressure() {
    let bus = Emitter::builder()
        .with_config(Config {
            queue_capacity: 1,
            ..Config::default()
        })
        .build()
        .unwrap();
    let hits = Arc::new(AtomicUsize::new(0));
    let (tx, mut rx) = mpsc::unbounded_channel::<()>();
    let counter = Arc::clone(&hits);
    bus.subscribe("tick", move |_args: Args| {
        counter.fetch_add(1, Ordering::SeqCst);
        let _ = tx.send(());
    });

    for i in 0..20 {
        bus.emit_wait("tick", args![i]).await.unwrap();
    }
    for _ in 0..20 {
        recv(&mut rx).await;
    }
    assert_eq!(hits.load(Ordering::SeqCst), 20);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn burst_larger_than_queue_is_fully_delivered() {
    let bus = Emitter::builder().build().unwrap();
    let (tx, mut rx) = mpsc::unbounded_channel::<i64>();
    bus.subscribe("burst", move |args: Args| {
        if let Some(n) = args.first().and_then(Arg::as_int) {
            let _ = tx.send(n);
        }
    });

    let n = 1_000;
    for i in 0..n {
        bus.emit("burst", args![i]);
    }

    let mut got = Vec::with_capacity(n as usize);
    for _ in 0..n {
        got.push(recv(&mut rx).await);
    }
    got.sort_unstable();
    assert_eq!(got, (0..n).collect::<Vec<_>>());
}

#[tokio::test]
async fn default_config_delivers_burst_emitted_in_one_poll() {
    let bus = Emitter::builder().build().unwrap();
    let (tx, mut rx) = mpsc::unbounded_channel::<i64>();
    bus.subscribe("burst", move |args: Args| {
        if let Some(n) = args.first().and_then(Arg::as_int) {
            let _ = tx.send(n);
        }
    });

    // Current-thread runtime: no writer runs until the loop below yields.
    let n = 6_000;
    for i in 0..n {
        bus.emit("burst", args![i]);
    }

    let mut got = Vec::with_capacity(n as usize);
    for _ in 0..n {
        got.push(recv(&mut rx).await);
    }
    got.sort_unstable();
    assert_eq!(got, (0..n).collect::<Vec<_>>());
    assert_quiet(&mut rx).await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn custom_handler_and_id_source() {
    struct Fixed(AtomicUsize);

    impl IdSource for Fixed {
        fn next_id(&self) -> HandlerId {
            HandlerId::from(format!("sub-{}", self.0.fetch_add(1, Ordering::SeqCst)))
        }
    }

    struct Collect(mpsc::UnboundedSender<usize>);

    #[async_trait]
    impl Handler for Collect {
        async fn handle(&self, args: Args) {
            let _ = self.0.send(args.len());
        }

        fn name(&self) -> &str {
            "collect"
        }
    }

    let bus = Emitter::builder()
        .with_id_source(Arc::new(Fixed(AtomicUsize::new(0))))
        .build()
        .unwrap();
    let (tx, mut rx) = mpsc::unbounded_channel();

    let a = bus.subscribe_handler("test", Arc::new(Collect(tx.clone())));
    let b = bus.subscribe_multiple_handler(["test", "other"], Arc::new(Collect(tx)));
    assert_eq!(a.as_str(), "sub-0");
    assert_eq!(b.as_str(), "sub-1");
    assert_eq!(bus.handler_count("test"), 2);

    bus.emit("other", args![1, 2, 3]);
    assert_eq!(recv(&mut rx).await, 3);
}
