/// Warns about a code path under development, using the global policy.
///
/// The arguments are interpreted in the same way as the [`format!()`] macro
/// and handed to [`issue`](crate::issue()). The reported location is the
/// location of the macro invocation.
///
/// [`format!()`]: std::format
///
/// # Examples
///
/// ```
/// use errpolicy::sink::MemorySink;
///
/// let buffer = MemorySink::new();
/// errpolicy::global().set_sink(Some(Box::new(buffer.clone())));
/// errpolicy::global().set_show_location(false);
///
/// let shard = 4;
/// errpolicy::issue!("shard {shard} is rebalanced by hand");
/// assert_eq!(buffer.contents(), "shard 4 is rebalanced by hand\n");
/// ```
#[macro_export]
macro_rules! issue {
    ($($arg:tt)*) => {
        $crate::issue($crate::__private::format_args!($($arg)*))
    };
}
