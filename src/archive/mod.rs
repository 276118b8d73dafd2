//! Unpacking of downloaded release artifacts.

mod zip;

pub use self::zip::{extract_binary, is_zip};

#[cfg(test)]
pub(crate) use self::zip::tests::create_zip;
