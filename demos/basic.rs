//! # Example: basic
//!
//! Demonstrates the full subscribe → emit → unsubscribe → stop cycle.
//!
//! Shows how to:
//! - Build an [`Emitter`] and install a `tracing` subscriber to see its diagnostics.
//! - Subscribe sync and async closures, and one handler to several event types.
//! - Survive a panicking handler.
//!
//! ## Run
//! ```bash
//! RUST_LOG=evbus=debug cargo run --example basic
//! ```

use std::time::Duration;

use evbus::{Arg, Args, Config, Emitter, args};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let bus = Emitter::builder().with_config(Config::default()).build()?;

    let greeter = bus.subscribe("user.joined", |args: Args| {
        let name = args.first().and_then(Arg::as_str).unwrap_or("<anonymous>");
        println!("[greeter] welcome, {name}");
    });

    bus.subscribe_async("user.joined", |args: Args| async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        println!("[audit] join recorded: {:?}", args.as_slice());
    });

    let auditor = bus.subscribe_multiple(["user.joined", "user.left"], |args: Args| {
        println!("[presence] {} arg(s)", args.len());
    });

    bus.subscribe("user.left", |_args: Args| panic!("this handler is broken"));

    bus.emit("user.joined", args!["ferris", 7]);
    bus.emit("user.left", args!["ferris"]);
    bus.emit("nobody.listens", args![]);
    tokio::time::sleep(Duration::from_millis(200)).await;

    bus.unsubscribe("user.joined", &greeter);
    bus.unsubscribe_multiple(["user.joined", "user.left"], &auditor);
    println!("remaining event types: {:?}", bus.event_types());

    bus.stop().await;
    bus.emit("user.joined", args!["ghost"]);
    println!("stopped: {:?}", bus.state());
    Ok(())
}
