//! Class metadata model for Lyra.
//!
//! This crate defines the read-only "oracle" the resolver works against: a
//! registry of class definitions ([`Universe`]) together with the reflected
//! style type descriptions ([`TypeDescription`]) that appear in generic
//! signatures. The registry plays the role a runtime reflection API would
//! play on a managed platform; clients register classes once and hand out
//! ids, and everything downstream treats the metadata as immutable.

mod builtins;
mod def;
mod description;
mod ids;
mod universe;

pub use def::{ClassDef, ClassKind, FieldDef, MethodDef, TypeParamDef};
pub use description::{TypeDescription, WildcardBound};
pub use ids::{ClassId, FieldId, MethodId, TypeVarId};
pub use universe::{Reflect, Universe, WellKnownTypes};
