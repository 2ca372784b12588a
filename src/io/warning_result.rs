/// An enum acting like a `Result`, but producing warnings instead of errors.
///
/// As there are no error values, there is always an "ok" value, which can be associated with one or more warnings.
pub(crate) enum WarningResult<T, W> {
    Ok(T),
    Warned(T, Vec<W>),
}

impl<T, W> WarningResult<T, W> {
    /// Consumes the warnings, returning the underlying value.
    ///
    /// The warnings, if any, are passed to the provided callback.
    pub fn consume_warnings<F>(self, f: F) -> T
    where
        F: FnOnce(Vec<W>),
    {
        match self {
            WarningResult::Ok(t) => t,
            WarningResult::Warned(t, w) => {
                f(w);
                t
            }
        }
    }

    /// Zips two `WarningResult`, concatenating their warnings.
    pub fn zip<U>(self, other: WarningResult<U, W>) -> WarningResult<(T, U), W> {
        let (t, mut warnings) = self.split();
        let (u, other_warnings) = other.split();
        warnings.extend(other_warnings);
        if warnings.is_empty() {
            WarningResult::Ok((t, u))
        } else {
            WarningResult::Warned((t, u), warnings)
        }
    }

    fn split(self) -> (T, Vec<W>) {
        match self {
            WarningResult::Ok(t) => (t, vec![]),
            WarningResult::Warned(t, w) => (t, w),
        }
    }
}
