//! Basic introduction to errpolicy.
//!
//! This demo walks through the reporting operations:
//! 1. `check` to test for an error without side effects
//! 2. `log` to write an error and carry on
//! 3. `warn` to write an error, or panic if nothing can receive it
//! 4. `panic` to give up immediately

use std::{fs, io};

use errpolicy::{Config, sink::MemorySink};

fn read_config(path: &str) -> io::Result<String> {
    fs::read_to_string(path)
}

fn main() {
    println!("=== Reporting policies ===\n");

    // Example 1: check only answers whether something went wrong
    let missing = read_config("/nonexistent/config.toml");
    println!("check: {}", errpolicy::check(missing.as_ref()));

    // Example 2: log and warn write to stderr by default, prefixed with the
    // location of this call
    errpolicy::log(missing.as_ref());
    errpolicy::warn(read_config("/nonexistent/config.toml"));

    // Example 3: a standalone policy writing into a buffer
    let buffer = MemorySink::new();
    let policy = Config::new().sink(buffer.clone()).build();
    policy.warn(missing);
    print!("captured: {}", buffer.contents());

    // Example 4: without a sink, warn escalates while log stays quiet
    let silent = Config::new().without_sink().build();
    println!(
        "log without sink returned {}",
        silent.log(read_config("/nonexistent"))
    );
    let escalated = std::panic::catch_unwind(|| silent.warn(read_config("/nonexistent")));
    println!("warn without sink panicked: {}", escalated.is_err());

    // Example 5: panic hands the original error to whoever catches it
    let caught = std::panic::catch_unwind(|| errpolicy::panic(read_config("/nonexistent")));
    if let Err(payload) = caught
        && let Some(err) = payload.downcast_ref::<io::Error>()
    {
        println!("caught io error: {:?}", err.kind());
    }
}
