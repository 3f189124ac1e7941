//! CLI command implementations.

pub(crate) mod demo;
pub(crate) mod render;
pub(crate) mod watch;

pub(crate) use demo::DemoArgs;
pub(crate) use render::RenderArgs;
pub(crate) use watch::WatchArgs;
