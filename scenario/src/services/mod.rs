//! Concrete collaborator implementations shipped with the controller

pub mod http_probe;

#[cfg(test)]
mod tests;

pub use http_probe::HttpHealthProbe;
