use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifies a class registered in a [`crate::Universe`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ClassId(u32);

impl ClassId {
    pub(crate) fn new(index: usize) -> Self {
        let idx: u32 = index.try_into().expect("too many classes");
        Self(idx)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClassId({})", self.0)
    }
}

/// Identifies a declared type parameter (e.g. the `E` of `List<E>`).
///
/// Ids are allocated by the registry and are global: two classes never share
/// a `TypeVarId` even if their parameters have the same name.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TypeVarId(u32);

impl TypeVarId {
    pub(crate) fn new(index: usize) -> Self {
        let idx: u32 = index.try_into().expect("too many type parameters");
        Self(idx)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for TypeVarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeVarId({})", self.0)
    }
}

/// Handle to a field: the declaring class plus the index into its field list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldId {
    owner: ClassId,
    index: u32,
}

impl FieldId {
    pub(crate) fn new(owner: ClassId, index: usize) -> Self {
        let idx: u32 = index.try_into().expect("too many fields");
        Self { owner, index: idx }
    }

    pub fn owner(self) -> ClassId {
        self.owner
    }

    pub fn index(self) -> usize {
        self.index as usize
    }
}

/// Handle to a method: the declaring class plus the index into its method list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MethodId {
    owner: ClassId,
    index: u32,
}

impl MethodId {
    pub(crate) fn new(owner: ClassId, index: usize) -> Self {
        let idx: u32 = index.try_into().expect("too many methods");
        Self { owner, index: idx }
    }

    pub fn owner(self) -> ClassId {
        self.owner
    }

    pub fn index(self) -> usize {
        self.index as usize
    }
}
