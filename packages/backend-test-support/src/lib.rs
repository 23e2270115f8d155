//! Helpers shared by the backend's integration tests: logging setup,
//! Problem Details assertions and unique fixture data.

pub mod logging;
pub mod problem_details;
pub mod unique_helpers;
