use crate::{aa::LabelType, dynamics::Extension, Result};

/// A trait for solvers able to compute an extension.
pub trait SingleExtensionComputer<T>
where
    T: LabelType,
{
    /// Computes a single extension.
    ///
    /// In case the problem admits no extension, [Option::None] is return.
    fn compute_one_extension(&mut self) -> Result<Option<Extension<T>>>;
}

/// A trait for solvers able to check the credulous acceptance of an argument.
pub trait CredulousAcceptanceComputer<T>
where
    T: LabelType,
{
    /// Checks the credulous acceptance of an argument.
    ///
    /// An error is returned if the argument is not defined.
    fn is_credulously_accepted(&mut self, arg: &T) -> Result<bool>;
}

/// A trait for solvers able to enumerate all the extensions.
pub trait ExtensionEnumerator<T>
where
    T: LabelType,
{
    /// Computes all the extensions.
    ///
    /// The extensions are returned in no particular order.
    fn enumerate_extensions(&mut self) -> Result<Vec<Extension<T>>>;

    /// Returns the number of extensions.
    fn count_extensions(&mut self) -> Result<usize> {
        self.enumerate_extensions().map(|e| e.len())
    }
}
