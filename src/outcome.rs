/// A value that either succeeded or carries an error.
///
/// Every policy operation takes an `Outcome` so that both `Option<E>`
/// (where `None` means no error) and `Result<T, E>` can be passed directly.
/// Borrowed options and results work too when the error is `Clone`; only the
/// error is cloned, never the success value.
///
/// # Examples
///
/// ```rust
/// use errpolicy::Outcome;
///
/// let ok: Result<u32, &str> = Ok(3);
/// assert!(ok.into_error().is_none());
///
/// let missing: Option<&str> = Some("not found");
/// assert_eq!(missing.into_error(), Some("not found"));
/// ```
pub trait Outcome {
    /// The error carried on failure.
    type Error;

    /// Returns the error, or `None` on success.
    fn into_error(self) -> Option<Self::Error>;

    /// Returns `true` if this outcome carries no error.
    fn is_success(&self) -> bool;
}

impl<E> Outcome for Option<E> {
    type Error = E;

    #[inline]
    fn into_error(self) -> Option<E> {
        self
    }

    #[inline]
    fn is_success(&self) -> bool {
        self.is_none()
    }
}

impl<T, E> Outcome for Result<T, E> {
    type Error = E;

    #[inline]
    fn into_error(self) -> Option<E> {
        self.err()
    }

    #[inline]
    fn is_success(&self) -> bool {
        self.is_ok()
    }
}

impl<E: Clone> Outcome for &Option<E> {
    type Error = E;

    #[inline]
    fn into_error(self) -> Option<E> {
        self.clone()
    }

    #[inline]
    fn is_success(&self) -> bool {
        self.is_none()
    }
}

impl<T, E: Clone> Outcome for &Result<T, E> {
    type Error = E;

    #[inline]
    fn into_error(self) -> Option<E> {
        self.as_ref().err().cloned()
    }

    #[inline]
    fn is_success(&self) -> bool {
        self.is_ok()
    }
}
