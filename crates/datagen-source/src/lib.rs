//! Bounded synthetic table source.
//!
//! [`DatagenSource`] ties the pieces together: table options are parsed into
//! [`DatagenOptions`], the generator tree is built once, and a
//! [`BoundedEnumerationController`] gates every produced row against the
//! configured total and any limit pushed through [`SupportsLimitPushDown`].
//!
//! ```text
//!   optimizer ── push_down_limit ──▶ SupportsLimitPushDown
//!                                            │
//!   runtime ── open / try_advance ──▶ DatagenSource ──▶ BoundedEnumerationController
//!                    produce_row             │
//!                                            └──▶ RowAssembler ──▶ GeneratorTree
//! ```

pub mod config;
pub mod controller;
pub mod error;
pub mod explain;
pub mod negotiation;
pub mod source;

pub use config::DatagenOptions;
pub use controller::{BoundedEnumerationController, ControllerState};
pub use error::{LateLimitPushError, SourceError};
pub use explain::ScanNode;
pub use negotiation::{push_down_limit, SupportsLimitPushDown};
pub use source::{DatagenSource, RowIterator};
