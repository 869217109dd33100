//! Reified generic-type resolution over class metadata.
//!
//! Given a [`lyra_meta::Universe`] (or any [`lyra_meta::Reflect`] oracle) and
//! a reflected-style type description, this crate produces canonical
//! [`ResolvedType`] values: immutable, structurally comparable, renderable,
//! and able to resolve member (field and method) types through the class
//! hierarchy with formal-to-actual type-parameter substitution.
//!
//! ```
//! use lyra_meta::{TypeDescription, Universe};
//! use lyra_resolve::ResolvedType;
//!
//! let u = Universe::with_builtins();
//! let list = u.class_id("java.util.List").unwrap();
//! let string = u.class_id("java.lang.String").unwrap();
//!
//! let ty = ResolvedType::capture(
//!     &u,
//!     &TypeDescription::parameterized(list, [TypeDescription::class(string)]),
//! )
//! .unwrap();
//! assert_eq!(ty.to_string(), "java.util.List<java.lang.String>");
//! ```

mod descriptor;
mod error;
mod members;
mod resolved;

pub use error::{ResolveError, ResolveResult};
pub use resolved::{Interfaces, RawClass, ResolvedType};
