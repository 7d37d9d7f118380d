//! Interactors: the callables that fetch related entities during expansion.
//!
//! - [`Interactor`] - async callable taking keyword [`Arguments`]
//! - [`InteractorOutput`] - `Direct(value)` or a deferred `Interactor` step
//! - [`InteractorSpec`] - an interactor plus its [`ArgumentMapping`]s

pub mod error;
pub mod output;
pub mod spec;

pub use error::InteractorError;
pub use output::{Deferred, InteractorOutput};
pub use spec::{ArgumentMapping, Arguments, Interactor, InteractorSpec};
