use serde::{Deserialize, Serialize};

use crate::{ClassId, TypeVarId};

/// A reflected-style type occurrence, as it appears in a generic signature.
///
/// This is the input vocabulary of the resolver: field types, method
/// signatures and supertype declarations are all spelt as descriptions.
/// Primitive types are registered classes, so `int` is a plain `Class`
/// occurrence just like `java.lang.String`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeDescription {
    /// A plain class occurrence (raw usage, no type arguments).
    Class(ClassId),
    /// An array-type occurrence, e.g. `String[]` or `T[]`.
    Array(Box<TypeDescription>),
    /// A parameterized occurrence, e.g. `List<String>`.
    Parameterized {
        class: ClassId,
        args: Vec<TypeDescription>,
    },
    /// A type-variable occurrence, e.g. the `E` in `E get(int index)`.
    Variable(TypeVarId),
    /// A wildcard occurrence, e.g. `? extends Number`.
    ///
    /// Wildcards appear in real signatures but are not one of the resolver's
    /// structural categories; classifying one is an error.
    Wildcard(WildcardBound),
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WildcardBound {
    Unbounded,
    Extends(Box<TypeDescription>),
    Super(Box<TypeDescription>),
}

impl TypeDescription {
    pub fn class(id: ClassId) -> Self {
        Self::Class(id)
    }

    pub fn array(element: TypeDescription) -> Self {
        Self::Array(Box::new(element))
    }

    pub fn parameterized(class: ClassId, args: impl IntoIterator<Item = TypeDescription>) -> Self {
        Self::Parameterized {
            class,
            args: args.into_iter().collect(),
        }
    }

    pub fn variable(var: TypeVarId) -> Self {
        Self::Variable(var)
    }

    /// The structural category this description belongs to, for diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Class(_) => "class",
            Self::Array(_) => "array",
            Self::Parameterized { .. } => "parameterized",
            Self::Variable(_) => "variable",
            Self::Wildcard(_) => "wildcard",
        }
    }

    /// First type-variable occurrence anywhere in this description, if any.
    ///
    /// Wildcard bounds count: `? extends T` mentions `T`.
    pub fn first_variable(&self) -> Option<TypeVarId> {
        match self {
            Self::Class(_) => None,
            Self::Array(element) => element.first_variable(),
            Self::Parameterized { args, .. } => args.iter().find_map(|a| a.first_variable()),
            Self::Variable(var) => Some(*var),
            Self::Wildcard(WildcardBound::Unbounded) => None,
            Self::Wildcard(WildcardBound::Extends(bound))
            | Self::Wildcard(WildcardBound::Super(bound)) => bound.first_variable(),
        }
    }
}
