//! Common test utilities and infrastructure
//!
//! This module provides the recording collaborators and fixtures shared by
//! the scenario controller test suites.

#![allow(dead_code)]

pub mod fixtures;
pub mod helpers;

pub use fixtures::TestFixtures;
pub use helpers::{Event, ProbeReply, TestHarness};
