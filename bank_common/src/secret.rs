use std::{
    fmt,
    fmt::{Debug, Display},
};

use serde::Deserialize;

/// A wrapper around sensitive configuration values (signing keys and the like) that masks the inner
/// value in `Debug` and `Display` output. Access to the wrapped value must go through [`Secret::reveal`],
/// which makes accidental logging of secrets easy to spot in review.
#[derive(Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct Secret<T>
where T: Clone + Default
{
    value: T,
}

impl<T: Clone + Default> Secret<T> {
    pub fn new(value: T) -> Self {
        Self { value }
    }

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
