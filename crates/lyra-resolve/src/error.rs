use lyra_meta::{ClassId, TypeVarId};
use thiserror::Error;

pub type ResolveResult<T> = Result<T, ResolveError>;

/// Everything the resolver can refuse to do.
///
/// All failures are detected synchronously at the offending call and are
/// final: no retry and no partial result. `UnboundVariable`, `MissingClass`
/// and `MissingTypeParam` indicate malformed registration (a construction
/// time invariant violation), not bad runtime input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// The description is not one of the four structural categories the
    /// classifier recognizes (currently only wildcards fall here).
    #[error("cannot classify {kind} type description `{rendered}`")]
    UnsupportedKind {
        kind: &'static str,
        rendered: String,
    },

    /// A parameterized description whose argument count does not match the
    /// class's declared parameter count.
    #[error("`{class}` declares {expected} type parameter(s) but {found} argument(s) were supplied")]
    ParameterArity {
        class: String,
        expected: usize,
        found: usize,
    },

    /// A type variable was resolved against a context that does not declare
    /// it.
    #[error("type variable `{variable}` is not bound in context `{context}`")]
    UnboundVariable { variable: String, context: String },

    /// A description mentions a class the oracle has no definition for.
    #[error("no class metadata registered for {0:?}")]
    MissingClass(ClassId),

    /// A class mentions a type parameter the oracle has no definition for.
    #[error("no type-parameter metadata registered for {0:?}")]
    MissingTypeParam(TypeVarId),

    /// A member lookup against a type whose hierarchy does not declare the
    /// member.
    #[error("{member_kind} `{member}` is not declared in the hierarchy of `{context}`")]
    MemberNotDeclared {
        member_kind: &'static str,
        member: String,
        context: String,
    },

    /// A capture was given a type token that still mentions a free type
    /// variable.
    #[error("cannot capture `{rendered}`: type variable `{variable}` is unresolved")]
    UnresolvedCapture { rendered: String, variable: String },
}
