//! Canned class hierarchies for resolver tests.

use anyhow::{Context, Result};
use lyra_meta::{ClassDef, ClassId, ClassKind, FieldDef, FieldId, MethodDef, MethodId, Reflect,
                TypeDescription, TypeVarId, Universe};

/// A generic base class with a chain of subclasses that exercises
/// substitution through inheritance:
///
/// ```java
/// class Box<T> { T value; T first(List<T> items) throws Exception; }
/// class StringBox extends Box<String> {}
/// class Chain<U> extends Box<List<U>> {}
/// class StringChain extends Chain<String> {}
/// ```
pub struct BoxHierarchy {
    pub box_class: ClassId,
    pub box_t: TypeVarId,
    pub value_field: FieldId,
    pub first_method: MethodId,
    pub string_box: ClassId,
    pub chain: ClassId,
    pub string_chain: ClassId,
}

pub fn box_hierarchy(u: &mut Universe) -> Result<BoxHierarchy> {
    let object = u.well_known().object;
    let string = u.well_known().string;
    let list = u
        .class_id("java.util.List")
        .context("builtins should define java.util.List")?;
    let exception = u
        .class_id("java.lang.Exception")
        .context("builtins should define java.lang.Exception")?;

    let box_t = u.add_type_param("T", vec![TypeDescription::class(object)]);
    let box_class = u.add_class(ClassDef {
        name: "com.example.Box".to_string(),
        kind: ClassKind::Class,
        type_params: vec![box_t],
        super_class: Some(TypeDescription::class(object)),
        interfaces: vec![],
        fields: vec![FieldDef {
            name: "value".to_string(),
            ty: TypeDescription::variable(box_t),
        }],
        methods: vec![MethodDef {
            name: "first".to_string(),
            params: vec![TypeDescription::parameterized(
                list,
                [TypeDescription::variable(box_t)],
            )],
            return_type: TypeDescription::variable(box_t),
            throws: vec![TypeDescription::class(exception)],
        }],
    });
    let value_field = u
        .field_named(box_class, "value")
        .context("value field was just registered")?;
    let first_method = u
        .method_named(box_class, "first")
        .context("first method was just registered")?;

    let string_box = u.add_class(ClassDef {
        name: "com.example.StringBox".to_string(),
        kind: ClassKind::Class,
        type_params: vec![],
        super_class: Some(TypeDescription::parameterized(
            box_class,
            [TypeDescription::class(string)],
        )),
        interfaces: vec![],
        fields: vec![],
        methods: vec![],
    });

    let chain_u = u.add_type_param("U", vec![TypeDescription::class(object)]);
    let chain = u.add_class(ClassDef {
        name: "com.example.Chain".to_string(),
        kind: ClassKind::Class,
        type_params: vec![chain_u],
        super_class: Some(TypeDescription::parameterized(
            box_class,
            [TypeDescription::parameterized(
                list,
                [TypeDescription::variable(chain_u)],
            )],
        )),
        interfaces: vec![],
        fields: vec![],
        methods: vec![],
    });

    let string_chain = u.add_class(ClassDef {
        name: "com.example.StringChain".to_string(),
        kind: ClassKind::Class,
        type_params: vec![],
        super_class: Some(TypeDescription::parameterized(
            chain,
            [TypeDescription::class(string)],
        )),
        interfaces: vec![],
        fields: vec![],
        methods: vec![],
    });

    Ok(BoxHierarchy {
        box_class,
        box_t,
        value_field,
        first_method,
        string_box,
        chain,
        string_chain,
    })
}
