//! # hfgen Testing
//!
//! Test doubles that return predictable responses, so dispatcher and protocol
//! tests run without network access:
//!
//! - [`MockGateway`]: an [`InferenceGateway`](hfgen_core::InferenceGateway) with canned
//!   completions and failures that records every request it receives
//! - [`MockTool`]: a [`Tool`](hfgen_core::Tool) with a fixed descriptor and canned results

pub mod mock_gateway;
pub mod mock_tools;

pub use mock_gateway::MockGateway;
pub use mock_tools::MockTool;
