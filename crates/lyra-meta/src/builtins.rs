//! The built-in universe: primitives plus the core `java.*` surface that the
//! resolver, its tests and typical embedders lean on.

use crate::{ClassDef, ClassKind, MethodDef, TypeDescription, Universe, WellKnownTypes};

impl Universe {
    /// Registry pre-populated with the primitives and a compact core of
    /// `java.lang` / `java.util` types.
    ///
    /// The set is intentionally small; anything beyond it is registered by
    /// the embedder. Generic supertype links are spelt with each class's own
    /// type parameters (`ArrayList<E> implements List<E>`), which is what the
    /// resolver substitutes through.
    pub fn with_builtins() -> Self {
        let mut u = Universe::empty();

        let object = u.add_class(ClassDef {
            name: "java.lang.Object".to_string(),
            kind: ClassKind::Class,
            type_params: vec![],
            super_class: None,
            interfaces: vec![],
            fields: vec![],
            // Patched below once String exists.
            methods: vec![],
        });
        let obj = TypeDescription::class(object);

        for name in [
            "boolean", "byte", "char", "short", "int", "long", "float", "double",
        ] {
            u.add_class(ClassDef {
                name: name.to_string(),
                kind: ClassKind::Primitive,
                type_params: vec![],
                super_class: None,
                interfaces: vec![],
                fields: vec![],
                methods: vec![],
            });
        }
        let int = TypeDescription::class(u.class_id("int").expect("just registered"));
        let boolean = TypeDescription::class(u.class_id("boolean").expect("just registered"));
        let double = TypeDescription::class(u.class_id("double").expect("just registered"));

        let serializable = u.add_class(ClassDef {
            name: "java.io.Serializable".to_string(),
            kind: ClassKind::Interface,
            type_params: vec![],
            super_class: None,
            interfaces: vec![],
            fields: vec![],
            methods: vec![],
        });
        let cloneable = u.add_class(ClassDef {
            name: "java.lang.Cloneable".to_string(),
            kind: ClassKind::Interface,
            type_params: vec![],
            super_class: None,
            interfaces: vec![],
            fields: vec![],
            methods: vec![],
        });

        let comparable_t = u.add_type_param("T", vec![obj.clone()]);
        let comparable = u.add_class(ClassDef {
            name: "java.lang.Comparable".to_string(),
            kind: ClassKind::Interface,
            type_params: vec![comparable_t],
            super_class: None,
            interfaces: vec![],
            fields: vec![],
            methods: vec![MethodDef {
                name: "compareTo".to_string(),
                params: vec![TypeDescription::variable(comparable_t)],
                return_type: int.clone(),
                throws: vec![],
            }],
        });

        let number = u.add_class(ClassDef {
            name: "java.lang.Number".to_string(),
            kind: ClassKind::Class,
            type_params: vec![],
            super_class: Some(obj.clone()),
            interfaces: vec![TypeDescription::class(serializable)],
            fields: vec![],
            methods: vec![
                MethodDef {
                    name: "intValue".to_string(),
                    params: vec![],
                    return_type: int.clone(),
                    throws: vec![],
                },
                MethodDef {
                    name: "doubleValue".to_string(),
                    params: vec![],
                    return_type: double,
                    throws: vec![],
                },
            ],
        });

        let integer = u.add_class(ClassDef {
            name: "java.lang.Integer".to_string(),
            kind: ClassKind::Class,
            type_params: vec![],
            super_class: Some(TypeDescription::class(number)),
            // Patched below: Comparable<Integer> is self-referential.
            interfaces: vec![],
            fields: vec![],
            methods: vec![],
        });
        if let Some(def) = u.class_mut(integer) {
            def.interfaces =
                vec![TypeDescription::parameterized(comparable, [TypeDescription::class(integer)])];
        }

        let string = u.add_class(ClassDef {
            name: "java.lang.String".to_string(),
            kind: ClassKind::Class,
            type_params: vec![],
            super_class: Some(obj.clone()),
            // Patched below: Comparable<String> is self-referential.
            interfaces: vec![],
            fields: vec![],
            methods: vec![
                MethodDef {
                    name: "length".to_string(),
                    params: vec![],
                    return_type: int.clone(),
                    throws: vec![],
                },
                MethodDef {
                    name: "isEmpty".to_string(),
                    params: vec![],
                    return_type: boolean.clone(),
                    throws: vec![],
                },
            ],
        });
        if let Some(def) = u.class_mut(string) {
            def.interfaces = vec![
                TypeDescription::class(serializable),
                TypeDescription::parameterized(comparable, [TypeDescription::class(string)]),
            ];
        }

        if let Some(def) = u.class_mut(object) {
            def.methods = vec![
                MethodDef {
                    name: "hashCode".to_string(),
                    params: vec![],
                    return_type: int.clone(),
                    throws: vec![],
                },
                MethodDef {
                    name: "equals".to_string(),
                    params: vec![obj.clone()],
                    return_type: boolean.clone(),
                    throws: vec![],
                },
                MethodDef {
                    name: "toString".to_string(),
                    params: vec![],
                    return_type: TypeDescription::class(string),
                    throws: vec![],
                },
            ];
        }

        let throwable = u.add_class(ClassDef {
            name: "java.lang.Throwable".to_string(),
            kind: ClassKind::Class,
            type_params: vec![],
            super_class: Some(obj.clone()),
            interfaces: vec![TypeDescription::class(serializable)],
            fields: vec![],
            methods: vec![MethodDef {
                name: "getMessage".to_string(),
                params: vec![],
                return_type: TypeDescription::class(string),
                throws: vec![],
            }],
        });
        let exception = u.add_class(ClassDef {
            name: "java.lang.Exception".to_string(),
            kind: ClassKind::Class,
            type_params: vec![],
            super_class: Some(TypeDescription::class(throwable)),
            interfaces: vec![],
            fields: vec![],
            methods: vec![],
        });

        let iterator_e = u.add_type_param("E", vec![obj.clone()]);
        let iterator = u.add_class(ClassDef {
            name: "java.util.Iterator".to_string(),
            kind: ClassKind::Interface,
            type_params: vec![iterator_e],
            super_class: None,
            interfaces: vec![],
            fields: vec![],
            methods: vec![
                MethodDef {
                    name: "hasNext".to_string(),
                    params: vec![],
                    return_type: boolean.clone(),
                    throws: vec![],
                },
                MethodDef {
                    name: "next".to_string(),
                    params: vec![],
                    return_type: TypeDescription::variable(iterator_e),
                    throws: vec![],
                },
            ],
        });

        let iterable_t = u.add_type_param("T", vec![obj.clone()]);
        let iterable = u.add_class(ClassDef {
            name: "java.lang.Iterable".to_string(),
            kind: ClassKind::Interface,
            type_params: vec![iterable_t],
            super_class: None,
            interfaces: vec![],
            fields: vec![],
            methods: vec![MethodDef {
                name: "iterator".to_string(),
                params: vec![],
                return_type: TypeDescription::parameterized(
                    iterator,
                    [TypeDescription::variable(iterable_t)],
                ),
                throws: vec![],
            }],
        });

        let collection_e = u.add_type_param("E", vec![obj.clone()]);
        let collection = u.add_class(ClassDef {
            name: "java.util.Collection".to_string(),
            kind: ClassKind::Interface,
            type_params: vec![collection_e],
            super_class: None,
            interfaces: vec![TypeDescription::parameterized(
                iterable,
                [TypeDescription::variable(collection_e)],
            )],
            fields: vec![],
            methods: vec![
                MethodDef {
                    name: "size".to_string(),
                    params: vec![],
                    return_type: int.clone(),
                    throws: vec![],
                },
                MethodDef {
                    name: "add".to_string(),
                    params: vec![TypeDescription::variable(collection_e)],
                    return_type: boolean.clone(),
                    throws: vec![],
                },
            ],
        });

        let list_e = u.add_type_param("E", vec![obj.clone()]);
        let list = u.add_class(ClassDef {
            name: "java.util.List".to_string(),
            kind: ClassKind::Interface,
            type_params: vec![list_e],
            super_class: None,
            interfaces: vec![TypeDescription::parameterized(
                collection,
                [TypeDescription::variable(list_e)],
            )],
            fields: vec![],
            methods: vec![MethodDef {
                name: "get".to_string(),
                params: vec![int.clone()],
                return_type: TypeDescription::variable(list_e),
                throws: vec![],
            }],
        });

        let array_list_e = u.add_type_param("E", vec![obj.clone()]);
        u.add_class(ClassDef {
            name: "java.util.ArrayList".to_string(),
            kind: ClassKind::Class,
            type_params: vec![array_list_e],
            super_class: Some(obj.clone()),
            interfaces: vec![
                TypeDescription::parameterized(list, [TypeDescription::variable(array_list_e)]),
                TypeDescription::class(cloneable),
                TypeDescription::class(serializable),
            ],
            fields: vec![],
            methods: vec![],
        });

        let map_k = u.add_type_param("K", vec![obj.clone()]);
        let map_v = u.add_type_param("V", vec![obj.clone()]);
        let map = u.add_class(ClassDef {
            name: "java.util.Map".to_string(),
            kind: ClassKind::Interface,
            type_params: vec![map_k, map_v],
            super_class: None,
            interfaces: vec![],
            fields: vec![],
            methods: vec![
                MethodDef {
                    name: "get".to_string(),
                    params: vec![obj.clone()],
                    return_type: TypeDescription::variable(map_v),
                    throws: vec![],
                },
                MethodDef {
                    name: "put".to_string(),
                    params: vec![
                        TypeDescription::variable(map_k),
                        TypeDescription::variable(map_v),
                    ],
                    return_type: TypeDescription::variable(map_v),
                    throws: vec![],
                },
            ],
        });

        let hash_map_k = u.add_type_param("K", vec![obj.clone()]);
        let hash_map_v = u.add_type_param("V", vec![obj.clone()]);
        u.add_class(ClassDef {
            name: "java.util.HashMap".to_string(),
            kind: ClassKind::Class,
            type_params: vec![hash_map_k, hash_map_v],
            super_class: Some(obj.clone()),
            interfaces: vec![
                TypeDescription::parameterized(
                    map,
                    [
                        TypeDescription::variable(hash_map_k),
                        TypeDescription::variable(hash_map_v),
                    ],
                ),
                TypeDescription::class(cloneable),
                TypeDescription::class(serializable),
            ],
            fields: vec![],
            methods: vec![],
        });

        let callable_v = u.add_type_param("V", vec![obj.clone()]);
        u.add_class(ClassDef {
            name: "java.util.concurrent.Callable".to_string(),
            kind: ClassKind::Interface,
            type_params: vec![callable_v],
            super_class: None,
            interfaces: vec![],
            fields: vec![],
            methods: vec![MethodDef {
                name: "call".to_string(),
                params: vec![],
                return_type: TypeDescription::variable(callable_v),
                throws: vec![TypeDescription::class(exception)],
            }],
        });

        u.set_well_known(WellKnownTypes {
            object,
            string,
            number,
            integer,
            cloneable,
            serializable,
        });
        u
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::{ClassKind, Reflect, Universe};

    #[test]
    fn builtins_register_the_core_surface() {
        let u = Universe::with_builtins();

        for name in [
            "java.lang.Object",
            "java.lang.String",
            "java.lang.Number",
            "java.lang.Integer",
            "java.lang.Comparable",
            "java.lang.Iterable",
            "java.util.Iterator",
            "java.util.Collection",
            "java.util.List",
            "java.util.ArrayList",
            "java.util.Map",
            "java.util.HashMap",
            "java.util.concurrent.Callable",
            "java.lang.Throwable",
            "java.lang.Exception",
            "java.io.Serializable",
            "java.lang.Cloneable",
            "int",
            "boolean",
        ] {
            assert!(u.class_id(name).is_some(), "builtins should define {name}");
        }
    }

    #[test]
    fn well_known_ids_match_name_lookups() {
        let u = Universe::with_builtins();
        let wk = *u.well_known();

        assert_eq!(u.class_id("java.lang.Object"), Some(wk.object));
        assert_eq!(u.class_id("java.lang.String"), Some(wk.string));
        assert_eq!(u.class_id("java.lang.Number"), Some(wk.number));
        assert_eq!(u.class_id("java.lang.Integer"), Some(wk.integer));
        assert_eq!(u.class_id("java.lang.Cloneable"), Some(wk.cloneable));
        assert_eq!(u.class_id("java.io.Serializable"), Some(wk.serializable));
    }

    #[test]
    fn primitives_are_primitive_kinded_and_rootless() {
        let u = Universe::with_builtins();
        let int = u.class_id("int").expect("builtins should define int");
        let def = u.class(int).expect("int should have a definition");

        assert_eq!(def.kind, ClassKind::Primitive);
        assert_eq!(def.super_class, None);
        assert!(def.interfaces.is_empty());
    }

    #[test]
    fn generic_builtins_link_supertypes_through_their_own_params() {
        let u = Universe::with_builtins();
        let list = u.class_id("java.util.List").expect("List should exist");
        let def = u.class(list).expect("List should have a definition");

        assert_eq!(def.kind, ClassKind::Interface);
        assert_eq!(def.type_params.len(), 1);
        // List<E> extends Collection<E>: the interface link mentions List's own E.
        let e = def.type_params[0];
        assert_eq!(
            def.interfaces,
            vec![crate::TypeDescription::parameterized(
                u.class_id("java.util.Collection").expect("Collection should exist"),
                [crate::TypeDescription::variable(e)],
            )]
        );
        assert_eq!(u.type_param(e).map(|p| p.name.as_str()), Some("E"));
    }
}
