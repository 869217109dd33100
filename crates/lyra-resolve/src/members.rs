//! The member resolution walk.
//!
//! A member handle names its declaring class; resolving it against a type
//! means locating that declaring class somewhere in the type's hierarchy and
//! classifying the member's generic signature in the ancestor's context, so
//! that type variables pick up the bindings accumulated along the
//! inheritance chain.

use std::collections::HashSet;

use lyra_meta::{ClassId, FieldDef, FieldId, MethodDef, MethodId, Reflect};

use crate::resolved::ResolvedType;
use crate::{ResolveError, ResolveResult};

/// Locate the ancestor of `origin` whose raw class is `owner`.
///
/// Depth-first: the superclass is explored before interfaces, interfaces in
/// declaration order, first match wins. The visited set bounds the walk in
/// case registered metadata contains hierarchy cycles.
fn find_declaring<'env>(
    origin: &ResolvedType<'env>,
    owner: ClassId,
) -> ResolveResult<Option<ResolvedType<'env>>> {
    let mut seen = HashSet::new();
    walk(origin.clone(), owner, &mut seen)
}

fn walk<'env>(
    current: ResolvedType<'env>,
    owner: ClassId,
    seen: &mut HashSet<ClassId>,
) -> ResolveResult<Option<ResolvedType<'env>>> {
    if current.class_id() == Some(owner) {
        return Ok(Some(current));
    }
    if let Some(id) = current.class_id() {
        if !seen.insert(id) {
            return Ok(None);
        }
    }
    for ancestor in current.super_types() {
        let ancestor = ancestor?;
        if let Some(found) = walk(ancestor, owner, seen)? {
            return Ok(Some(found));
        }
    }
    Ok(None)
}

fn field_def<'env>(origin: &ResolvedType<'env>, field: FieldId) -> ResolveResult<&'env FieldDef> {
    let env = origin.env();
    let owner = env
        .class(field.owner())
        .ok_or(ResolveError::MissingClass(field.owner()))?;
    owner
        .fields
        .get(field.index())
        .ok_or_else(|| not_declared("field", &format!("{}[{}]", owner.name, field.index()), origin))
}

fn method_def<'env>(
    origin: &ResolvedType<'env>,
    method: MethodId,
) -> ResolveResult<&'env MethodDef> {
    let env = origin.env();
    let owner = env
        .class(method.owner())
        .ok_or(ResolveError::MissingClass(method.owner()))?;
    owner.methods.get(method.index()).ok_or_else(|| {
        not_declared(
            "method",
            &format!("{}[{}]", owner.name, method.index()),
            origin,
        )
    })
}

fn declaring_or_fail<'env>(
    origin: &ResolvedType<'env>,
    owner: ClassId,
    member_kind: &'static str,
    member_name: &str,
) -> ResolveResult<ResolvedType<'env>> {
    let env = origin.env();
    let owner_name = env
        .class(owner)
        .map(|def| def.name.clone())
        .unwrap_or_else(|| format!("class#{}", owner.index()));
    let member = format!("{owner_name}.{member_name}");
    tracing::trace!(
        target = "lyra.resolve",
        member = %member,
        origin = %origin,
        "searching hierarchy for declaring class"
    );
    find_declaring(origin, owner)?.ok_or_else(|| not_declared(member_kind, &member, origin))
}

fn not_declared(
    member_kind: &'static str,
    member: &str,
    origin: &ResolvedType<'_>,
) -> ResolveError {
    ResolveError::MemberNotDeclared {
        member_kind,
        member: member.to_string(),
        context: origin.render().to_string(),
    }
}

pub(crate) fn field_type<'env>(
    origin: &ResolvedType<'env>,
    field: FieldId,
) -> ResolveResult<ResolvedType<'env>> {
    let def = field_def(origin, field)?;
    let declaring = declaring_or_fail(origin, field.owner(), "field", &def.name)?;
    declaring.member_type(&def.ty)
}

pub(crate) fn return_type<'env>(
    origin: &ResolvedType<'env>,
    method: MethodId,
) -> ResolveResult<ResolvedType<'env>> {
    let def = method_def(origin, method)?;
    let declaring = declaring_or_fail(origin, method.owner(), "method", &def.name)?;
    declaring.member_type(&def.return_type)
}

pub(crate) fn parameter_types<'env>(
    origin: &ResolvedType<'env>,
    method: MethodId,
) -> ResolveResult<Vec<ResolvedType<'env>>> {
    let def = method_def(origin, method)?;
    let declaring = declaring_or_fail(origin, method.owner(), "method", &def.name)?;
    def.params
        .iter()
        .map(|param| declaring.member_type(param))
        .collect()
}

pub(crate) fn exception_types<'env>(
    origin: &ResolvedType<'env>,
    method: MethodId,
) -> ResolveResult<Vec<ResolvedType<'env>>> {
    let def = method_def(origin, method)?;
    let declaring = declaring_or_fail(origin, method.owner(), "method", &def.name)?;
    def.throws
        .iter()
        .map(|thrown| declaring.member_type(thrown))
        .collect()
}

#[cfg(test)]
mod tests {
    use lyra_meta::{ClassDef, ClassKind, FieldDef, MethodDef, Reflect, TypeDescription, Universe};
    use pretty_assertions::assert_eq;

    use crate::{ResolveError, ResolvedType};

    /// `class Box<T> { T value; T get(); }` plus
    /// `class StringBox extends Box<String> {}`.
    fn box_fixture(u: &mut Universe) -> (lyra_meta::ClassId, lyra_meta::ClassId) {
        let object = u.well_known().object;
        let string = u.well_known().string;

        let t = u.add_type_param("T", vec![TypeDescription::class(object)]);
        let box_class = u.add_class(ClassDef {
            name: "com.example.Box".to_string(),
            kind: ClassKind::Class,
            type_params: vec![t],
            super_class: Some(TypeDescription::class(object)),
            interfaces: vec![],
            fields: vec![FieldDef {
                name: "value".to_string(),
                ty: TypeDescription::variable(t),
            }],
            methods: vec![MethodDef {
                name: "get".to_string(),
                params: vec![],
                return_type: TypeDescription::variable(t),
                throws: vec![],
            }],
        });
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
        (box_class, string_box)
    }

    #[test]
    fn inherited_fields_substitute_through_the_chain() {
        let mut u = Universe::with_builtins();
        let (box_class, string_box) = box_fixture(&mut u);
        let string = u.well_known().string;
        let value = u.field_named(box_class, "value").unwrap();

        let ty = ResolvedType::of(&u, string_box);
        assert_eq!(ty.type_of(value).unwrap(), ResolvedType::of(&u, string));
    }

    #[test]
    fn directly_declared_members_resolve_without_walking() {
        let mut u = Universe::with_builtins();
        let (box_class, _) = box_fixture(&mut u);
        let string = u.well_known().string;
        let value = u.field_named(box_class, "value").unwrap();

        let ty = ResolvedType::capture(
            &u,
            &TypeDescription::parameterized(box_class, [TypeDescription::class(string)]),
        )
        .unwrap();
        assert_eq!(ty.type_of(value).unwrap(), ResolvedType::of(&u, string));
    }

    #[test]
    fn raw_usage_erases_inherited_members() {
        let mut u = Universe::with_builtins();
        let (box_class, _) = box_fixture(&mut u);
        let object = u.well_known().object;
        let value = u.field_named(box_class, "value").unwrap();

        // Box used raw: T erases to its first bound, Object.
        let ty = ResolvedType::of(&u, box_class);
        assert_eq!(ty.type_of(value).unwrap(), ResolvedType::of(&u, object));
    }

    #[test]
    fn members_of_unrelated_classes_are_rejected() {
        let mut u = Universe::with_builtins();
        let (box_class, _) = box_fixture(&mut u);
        let string = u.well_known().string;
        let value = u.field_named(box_class, "value").unwrap();

        let err = ResolvedType::of(&u, string).type_of(value).unwrap_err();
        assert_eq!(
            err,
            ResolveError::MemberNotDeclared {
                member_kind: "field",
                member: "com.example.Box.value".to_string(),
                context: "java.lang.String".to_string(),
            }
        );
    }

    #[test]
    fn interface_members_resolve_through_implementations() {
        let u = Universe::with_builtins();
        let array_list = u.class_id("java.util.ArrayList").unwrap();
        let list = u.class_id("java.util.List").unwrap();
        let string = u.well_known().string;
        let get = u.method_named(list, "get").unwrap();

        let ty = ResolvedType::capture(
            &u,
            &TypeDescription::parameterized(array_list, [TypeDescription::class(string)]),
        )
        .unwrap();
        assert_eq!(ty.return_type_of(get).unwrap(), ResolvedType::of(&u, string));
    }

    #[test]
    fn parameter_types_keep_declaration_order() {
        let u = Universe::with_builtins();
        let hash_map = u.class_id("java.util.HashMap").unwrap();
        let map = u.class_id("java.util.Map").unwrap();
        let string = u.well_known().string;
        let integer = u.well_known().integer;
        let put = u.method_named(map, "put").unwrap();

        let ty = ResolvedType::capture(
            &u,
            &TypeDescription::parameterized(
                hash_map,
                [TypeDescription::class(string), TypeDescription::class(integer)],
            ),
        )
        .unwrap();
        assert_eq!(
            ty.parameter_types_of(put).unwrap(),
            vec![ResolvedType::of(&u, string), ResolvedType::of(&u, integer)]
        );
    }

    #[test]
    fn exception_types_resolve_in_the_declaring_context() {
        let mut u = Universe::with_builtins();
        let callable = u.class_id("java.util.concurrent.Callable").unwrap();
        let exception = u.class_id("java.lang.Exception").unwrap();
        let string = u.well_known().string;
        let object = u.well_known().object;
        let call = u.method_named(callable, "call").unwrap();

        let task = u.add_class(ClassDef {
            name: "com.example.StringTask".to_string(),
            kind: ClassKind::Class,
            type_params: vec![],
            super_class: Some(TypeDescription::class(object)),
            interfaces: vec![TypeDescription::parameterized(
                callable,
                [TypeDescription::class(string)],
            )],
            fields: vec![],
            methods: vec![],
        });

        let ty = ResolvedType::of(&u, task);
        assert_eq!(ty.return_type_of(call).unwrap(), ResolvedType::of(&u, string));
        assert_eq!(
            ty.exception_types_of(call).unwrap(),
            vec![ResolvedType::of(&u, exception)]
        );
    }
}
