#[cfg(feature = "server")]
pub(crate) mod server;
