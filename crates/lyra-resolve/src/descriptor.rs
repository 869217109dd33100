use std::collections::HashSet;
use std::sync::Arc;

use lyra_meta::{ClassId, Reflect, TypeDescription, TypeVarId, WildcardBound};

use crate::{ResolveError, ResolveResult};

/// Canonical structural form of a classified type description.
///
/// Classification resolves type-variable occurrences against their context,
/// so three variants remain. Invariant: when a descriptor's actual parameters
/// are non-empty they are index-aligned with its formal parameters.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) enum Descriptor {
    /// Raw class usage: formals from the class declaration, no actuals.
    Class(ClassId),
    /// Array: one synthetic formal (`E`), the element as its actual.
    Array(Arc<Descriptor>),
    /// Parameterized usage: formals from the class declaration, classified
    /// arguments as actuals.
    Parameterized {
        class: ClassId,
        args: Vec<Arc<Descriptor>>,
    },
}

impl Descriptor {
    pub(crate) fn raw_class_id(&self) -> Option<ClassId> {
        match self {
            Descriptor::Class(class) | Descriptor::Parameterized { class, .. } => Some(*class),
            Descriptor::Array(_) => None,
        }
    }

    /// Formal type-parameter names, in declaration order.
    pub(crate) fn formal_parameters(&self, env: &dyn Reflect) -> ResolveResult<Vec<String>> {
        let class = match self {
            Descriptor::Array(_) => return Ok(vec!["E".to_string()]),
            Descriptor::Class(class) | Descriptor::Parameterized { class, .. } => *class,
        };
        let def = env.class(class).ok_or(ResolveError::MissingClass(class))?;
        def.type_params
            .iter()
            .map(|tp| {
                env.type_param(*tp)
                    .map(|p| p.name.clone())
                    .ok_or(ResolveError::MissingTypeParam(*tp))
            })
            .collect()
    }

    /// Bound actual parameters; empty for raw class usage.
    pub(crate) fn actual_parameters(&self) -> &[Arc<Descriptor>] {
        match self {
            Descriptor::Class(_) => &[],
            Descriptor::Array(element) => std::slice::from_ref(element),
            Descriptor::Parameterized { args, .. } => args,
        }
    }

    /// Resolve a type variable against this descriptor as context.
    ///
    /// Parameterized contexts answer with the argument at the variable's
    /// declared position. Raw class contexts carry no bindings, so the
    /// variable erases to its first declared bound (`Object` if unbounded).
    fn binding_of(&self, env: &dyn Reflect, var: TypeVarId) -> ResolveResult<Descriptor> {
        match self {
            Descriptor::Parameterized { class, args } => {
                let def = env.class(*class).ok_or(ResolveError::MissingClass(*class))?;
                let pos = def
                    .type_params
                    .iter()
                    .position(|tp| *tp == var)
                    .ok_or_else(|| unbound(env, var, self))?;
                match args.get(pos) {
                    Some(arg) => Ok(arg.as_ref().clone()),
                    None => Err(unbound(env, var, self)),
                }
            }
            Descriptor::Class(class) => {
                let def = env.class(*class).ok_or(ResolveError::MissingClass(*class))?;
                if def.type_params.contains(&var) {
                    erase_variable(env, var, &mut HashSet::new())
                } else {
                    Err(unbound(env, var, self))
                }
            }
            // Arrays declare no resolvable variables; their single formal is
            // synthetic.
            Descriptor::Array(_) => Err(unbound(env, var, self)),
        }
    }

    pub(crate) fn render(&self, env: &dyn Reflect) -> String {
        match self {
            Descriptor::Class(class) => class_name(env, *class),
            Descriptor::Array(element) => format!("{}[]", element.render(env)),
            Descriptor::Parameterized { class, args } => {
                let args = args
                    .iter()
                    .map(|a| a.render(env))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("{}<{}>", class_name(env, *class), args)
            }
        }
    }
}

/// Classify a reflected-style description into its canonical descriptor.
///
/// `context` supplies variable bindings; it is the descriptor of the type in
/// whose signature `description` appears. The match is exhaustive over the
/// description categories; wildcards are outside the structural categories
/// and fail.
pub(crate) fn classify(
    env: &dyn Reflect,
    context: &Descriptor,
    description: &TypeDescription,
) -> ResolveResult<Descriptor> {
    match description {
        TypeDescription::Class(id) => {
            env.class(*id).ok_or(ResolveError::MissingClass(*id))?;
            Ok(Descriptor::Class(*id))
        }
        TypeDescription::Array(element) => {
            Ok(Descriptor::Array(Arc::new(classify(env, context, element)?)))
        }
        TypeDescription::Parameterized { class, args } => {
            let def = env.class(*class).ok_or(ResolveError::MissingClass(*class))?;
            if args.is_empty() {
                // A parameterized spelling with no arguments is raw usage.
                return Ok(Descriptor::Class(*class));
            }
            if def.type_params.len() != args.len() {
                return Err(ResolveError::ParameterArity {
                    class: def.name.clone(),
                    expected: def.type_params.len(),
                    found: args.len(),
                });
            }
            let args = args
                .iter()
                .map(|arg| classify(env, context, arg).map(Arc::new))
                .collect::<ResolveResult<Vec<_>>>()?;
            Ok(Descriptor::Parameterized { class: *class, args })
        }
        TypeDescription::Variable(var) => {
            tracing::trace!(
                target = "lyra.resolve",
                variable = %var_name(env, *var),
                context = %context.render(env),
                "resolving type variable against context"
            );
            context.binding_of(env, *var)
        }
        TypeDescription::Wildcard(_) => Err(ResolveError::UnsupportedKind {
            kind: description.kind_name(),
            rendered: render_description(env, description),
        }),
    }
}

/// Erase a variable to the raw class of its first bound.
///
/// Bounds may themselves be variables; `seen` bounds that recursion since
/// registered metadata, unlike a compiler-checked hierarchy, may contain
/// cyclic bounds. A cycle terminates at `Object`.
fn erase_variable(
    env: &dyn Reflect,
    var: TypeVarId,
    seen: &mut HashSet<TypeVarId>,
) -> ResolveResult<Descriptor> {
    if !seen.insert(var) {
        return Ok(Descriptor::Class(env.well_known().object));
    }
    let tp = env
        .type_param(var)
        .ok_or(ResolveError::MissingTypeParam(var))?;
    match tp.upper_bounds.first() {
        None => Ok(Descriptor::Class(env.well_known().object)),
        Some(bound) => erasure_of(env, bound, seen),
    }
}

fn erasure_of(
    env: &dyn Reflect,
    description: &TypeDescription,
    seen: &mut HashSet<TypeVarId>,
) -> ResolveResult<Descriptor> {
    match description {
        TypeDescription::Class(id) => Ok(Descriptor::Class(*id)),
        TypeDescription::Parameterized { class, .. } => Ok(Descriptor::Class(*class)),
        TypeDescription::Array(element) => {
            Ok(Descriptor::Array(Arc::new(erasure_of(env, element, seen)?)))
        }
        TypeDescription::Variable(var) => erase_variable(env, *var, seen),
        // A wildcard as a declared bound is malformed metadata.
        TypeDescription::Wildcard(_) => Err(ResolveError::UnsupportedKind {
            kind: description.kind_name(),
            rendered: render_description(env, description),
        }),
    }
}

fn unbound(env: &dyn Reflect, var: TypeVarId, context: &Descriptor) -> ResolveError {
    ResolveError::UnboundVariable {
        variable: var_name(env, var),
        context: context.render(env),
    }
}

pub(crate) fn class_name(env: &dyn Reflect, id: ClassId) -> String {
    env.class(id)
        .map(|def| def.name.clone())
        .unwrap_or_else(|| format!("class#{}", id.index()))
}

pub(crate) fn var_name(env: &dyn Reflect, var: TypeVarId) -> String {
    env.type_param(var)
        .map(|tp| tp.name.clone())
        .unwrap_or_else(|| format!("var#{}", var.index()))
}

pub(crate) fn render_description(env: &dyn Reflect, description: &TypeDescription) -> String {
    match description {
        TypeDescription::Class(id) => class_name(env, *id),
        TypeDescription::Array(element) => format!("{}[]", render_description(env, element)),
        TypeDescription::Parameterized { class, args } => {
            if args.is_empty() {
                class_name(env, *class)
            } else {
                let args = args
                    .iter()
                    .map(|a| render_description(env, a))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("{}<{}>", class_name(env, *class), args)
            }
        }
        TypeDescription::Variable(var) => var_name(env, *var),
        TypeDescription::Wildcard(WildcardBound::Unbounded) => "?".to_string(),
        TypeDescription::Wildcard(WildcardBound::Extends(bound)) => {
            format!("? extends {}", render_description(env, bound))
        }
        TypeDescription::Wildcard(WildcardBound::Super(bound)) => {
            format!("? super {}", render_description(env, bound))
        }
    }
}
