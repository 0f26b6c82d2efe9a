//! A wrapper that keeps credentials out of logs.

use std::fmt::{self, Debug, Display};

/// Holds a configuration secret, such as the portal's token signing key. Both `Debug` and `Display` render
/// `****`, so a secret can never leak through logging or error formatting; reading the value requires an
/// explicit [`Secret::reveal`] call at the point of use.
#[derive(Clone, Default)]
pub struct Secret<T>
where T: Clone + Default
{
    value: T,
}

impl<T: Clone + Default> Secret<T> {
    pub fn new(value: T) -> Self {
        Self { value }
    }

    /// Discloses the wrapped value. Call this where the secret is consumed, not where it is passed around.
    pub fn reveal(&self) -> &T {
        &self.value
    }
}

impl<T: Clone + Default> Debug for Secret<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("****")
    }
}

impl<T: Clone + Default> Display for Secret<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("****")
    }
}
