//! Test utilities


pub(crate) use context::TestContext;
