use serde::{Deserialize, Serialize};

use crate::{TypeDescription, TypeVarId};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClassKind {
    Class,
    Interface,
    Primitive,
}

/// A declared type parameter.
///
/// `upper_bounds` lists the declared bounds in declaration order; an empty
/// list means the parameter is unbounded (implicitly `java.lang.Object`).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeParamDef {
    pub name: String,
    pub upper_bounds: Vec<TypeDescription>,
}

/// Metadata for one registered class.
///
/// `name` is the binary name, e.g. `java.util.List`. Supertype descriptions
/// may mention the class's own `type_params` as [`TypeDescription::Variable`]
/// occurrences; that is how `class ArrayList<E> implements List<E>` is spelt.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassDef {
    pub name: String,
    pub kind: ClassKind,
    pub type_params: Vec<TypeVarId>,
    pub super_class: Option<TypeDescription>,
    pub interfaces: Vec<TypeDescription>,
    pub fields: Vec<FieldDef>,
    pub methods: Vec<MethodDef>,
}

impl ClassDef {
    pub fn simple_name(&self) -> &str {
        self.name
            .rsplit_once('.')
            .map(|(_, s)| s)
            .unwrap_or(&self.name)
    }

    pub fn package_name(&self) -> Option<&str> {
        self.name.rsplit_once('.').map(|(p, _)| p)
    }

    pub fn is_interface(&self) -> bool {
        self.kind == ClassKind::Interface
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDef {
    pub name: String,
    /// The field's declared (possibly generic) type.
    pub ty: TypeDescription,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodDef {
    pub name: String,
    pub params: Vec<TypeDescription>,
    pub return_type: TypeDescription,
    /// Declared thrown exception types, in declaration order.
    pub throws: Vec<TypeDescription>,
}
