//! Route table, template matching and dispatch.

pub mod dispatch;
pub mod pattern;
pub mod table;

pub use pattern::{PatternError, RoutePattern};
pub use table::{PageEndpoint, ResolvedEndpoint, RouteMatch, RouteTable};
