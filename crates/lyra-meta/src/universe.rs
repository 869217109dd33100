use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{ClassDef, ClassId, FieldDef, FieldId, MethodDef, MethodId, TypeDescription,
            TypeParamDef, TypeVarId};

/// Read-only access to class metadata.
///
/// The resolver only ever consults metadata through this trait, so tests and
/// embedders can supply their own source. [`Universe`] is the in-memory
/// implementation.
pub trait Reflect {
    fn class(&self, id: ClassId) -> Option<&ClassDef>;

    fn type_param(&self, id: TypeVarId) -> Option<&TypeParamDef>;

    fn lookup_class(&self, name: &str) -> Option<ClassId>;

    fn well_known(&self) -> &WellKnownTypes;
}

/// Ids of classes the resolver itself needs to know about.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WellKnownTypes {
    pub object: ClassId,
    pub string: ClassId,
    pub number: ClassId,
    pub integer: ClassId,
    pub cloneable: ClassId,
    pub serializable: ClassId,
}

/// The in-memory class-metadata registry.
///
/// Construction starts from [`Universe::with_builtins`], which registers the
/// primitives and the core `java.*` types; clients then add their own classes
/// on top. Once handed to the resolver the registry is read-only.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Universe {
    classes: Vec<ClassDef>,
    type_params: Vec<TypeParamDef>,
    by_name: HashMap<String, ClassId>,
    well_known: WellKnownTypes,
}

impl Universe {
    /// Start an empty registry with placeholder well-known ids.
    ///
    /// Only used by the builtin bootstrap, which patches the well-known table
    /// once the core classes exist.
    pub(crate) fn empty() -> Self {
        let placeholder = ClassId::new(0);
        Self {
            classes: Vec::new(),
            type_params: Vec::new(),
            by_name: HashMap::new(),
            well_known: WellKnownTypes {
                object: placeholder,
                string: placeholder,
                number: placeholder,
                integer: placeholder,
                cloneable: placeholder,
                serializable: placeholder,
            },
        }
    }

    pub(crate) fn set_well_known(&mut self, well_known: WellKnownTypes) {
        self.well_known = well_known;
    }

    /// Register a class and return its id.
    ///
    /// The definition may reference ids of classes registered earlier; for
    /// self-referential supertypes (e.g. `Integer implements
    /// Comparable<Integer>`) register with placeholders and patch through
    /// [`Universe::class_mut`].
    pub fn add_class(&mut self, def: ClassDef) -> ClassId {
        let id = ClassId::new(self.classes.len());
        self.by_name.insert(def.name.clone(), id);
        self.classes.push(def);
        id
    }

    /// Allocate a type parameter usable in class definitions.
    pub fn add_type_param(
        &mut self,
        name: impl Into<String>,
        upper_bounds: Vec<TypeDescription>,
    ) -> TypeVarId {
        let id = TypeVarId::new(self.type_params.len());
        self.type_params.push(TypeParamDef {
            name: name.into(),
            upper_bounds,
        });
        id
    }

    pub fn class_mut(&mut self, id: ClassId) -> Option<&mut ClassDef> {
        self.classes.get_mut(id.index())
    }

    pub fn class_id(&self, name: &str) -> Option<ClassId> {
        self.by_name.get(name).copied()
    }

    /// Look up a declared field by name, returning a handle.
    pub fn field_named(&self, class: ClassId, name: &str) -> Option<FieldId> {
        let def = self.classes.get(class.index())?;
        let index = def.fields.iter().position(|f| f.name == name)?;
        Some(FieldId::new(class, index))
    }

    /// Look up a declared method by name, returning a handle.
    ///
    /// Metadata may declare overloads; this returns the first declaration in
    /// order, which is enough for the resolution API (handles are per
    /// declaration, not per name).
    pub fn method_named(&self, class: ClassId, name: &str) -> Option<MethodId> {
        let def = self.classes.get(class.index())?;
        let index = def.methods.iter().position(|m| m.name == name)?;
        Some(MethodId::new(class, index))
    }

    pub fn field(&self, id: FieldId) -> Option<&FieldDef> {
        self.classes.get(id.owner().index())?.fields.get(id.index())
    }

    pub fn method(&self, id: MethodId) -> Option<&MethodDef> {
        self.classes
            .get(id.owner().index())?
            .methods
            .get(id.index())
    }

    pub fn classes(&self) -> impl Iterator<Item = (ClassId, &ClassDef)> {
        self.classes
            .iter()
            .enumerate()
            .map(|(idx, def)| (ClassId::new(idx), def))
    }
}

impl Reflect for Universe {
    fn class(&self, id: ClassId) -> Option<&ClassDef> {
        self.classes.get(id.index())
    }

    fn type_param(&self, id: TypeVarId) -> Option<&TypeParamDef> {
        self.type_params.get(id.index())
    }

    fn lookup_class(&self, name: &str) -> Option<ClassId> {
        self.class_id(name)
    }

    fn well_known(&self) -> &WellKnownTypes {
        &self.well_known
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::ClassKind;

    #[test]
    fn registered_classes_resolve_by_name_and_id() {
        let mut u = Universe::with_builtins();
        let object = u.well_known().object;

        let id = u.add_class(ClassDef {
            name: "com.example.Widget".to_string(),
            kind: ClassKind::Class,
            type_params: vec![],
            super_class: Some(TypeDescription::class(object)),
            interfaces: vec![],
            fields: vec![],
            methods: vec![],
        });

        assert_eq!(u.class_id("com.example.Widget"), Some(id));
        assert_eq!(u.class(id).map(|c| c.simple_name()), Some("Widget"));
        assert_eq!(u.lookup_class("com.example.Missing"), None);
    }

    #[test]
    fn member_handles_round_trip_through_the_registry() {
        let mut u = Universe::with_builtins();
        let object = u.well_known().object;
        let string = u.well_known().string;

        let id = u.add_class(ClassDef {
            name: "com.example.Named".to_string(),
            kind: ClassKind::Class,
            type_params: vec![],
            super_class: Some(TypeDescription::class(object)),
            interfaces: vec![],
            fields: vec![FieldDef {
                name: "name".to_string(),
                ty: TypeDescription::class(string),
            }],
            methods: vec![MethodDef {
                name: "rename".to_string(),
                params: vec![TypeDescription::class(string)],
                return_type: TypeDescription::class(string),
                throws: vec![],
            }],
        });

        let field = u.field_named(id, "name").expect("field should exist");
        assert_eq!(field.owner(), id);
        assert_eq!(u.field(field).map(|f| f.name.as_str()), Some("name"));

        let method = u.method_named(id, "rename").expect("method should exist");
        assert_eq!(u.method(method).map(|m| m.params.len()), Some(1));

        assert_eq!(u.field_named(id, "missing"), None);
        assert_eq!(u.method_named(id, "missing"), None);
    }

    #[test]
    fn type_params_keep_declaration_metadata() {
        let mut u = Universe::with_builtins();
        let number = u.well_known().number;

        let t = u.add_type_param("T", vec![TypeDescription::class(number)]);
        let tp = u.type_param(t).expect("param should exist");
        assert_eq!(tp.name, "T");
        assert_eq!(tp.upper_bounds, vec![TypeDescription::class(number)]);
    }
}
