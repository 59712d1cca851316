//! Marking unfinished and outdated code with documentation errors.
//!
//! Documentation errors are warnings whose message is a note for developers.
//! Run with `ERRPOLICY=panic-on-warn` to turn every note into a panic, which
//! is handy in CI to make sure none of them are hit.

fn load_legacy(path: &str) -> Vec<u8> {
    errpolicy::deprecated(format_args!("load_legacy({path}) is replaced by load"));
    Vec::new()
}

fn load(path: &str) -> Vec<u8> {
    errpolicy::todo("support compressed archives");
    errpolicy::issue!("{path} is read fully into memory");
    Vec::new()
}

fn main() {
    errpolicy::global().set_debug_sink(Some(Box::new(std::io::stdout())));

    let legacy = load_legacy("data.bin");
    let current = load("data.bin");
    errpolicy::debug(format_args!(
        "loaded {} + {} bytes",
        legacy.len(),
        current.len()
    ));
}
