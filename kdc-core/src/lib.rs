pub mod client;
pub mod cluster;
pub mod config;
pub mod errors;
pub mod namespace;
pub mod probes;
pub mod provisioner;
pub mod retry;

#[cfg(test)]
pub(crate) mod testing;
