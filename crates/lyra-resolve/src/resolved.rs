use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, OnceLock};

use lyra_meta::{ClassId, FieldId, MethodId, Reflect, TypeDescription};

use crate::descriptor::{classify, render_description, var_name, Descriptor};
use crate::members;
use crate::{ResolveError, ResolveResult};

/// The raw (erased) class of a resolved type.
///
/// Arrays have no registry id of their own, so the raw view is structural:
/// `Integer[][]` is `Array(Array(Class(integer)))`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum RawClass {
    Class(ClassId),
    Array(Box<RawClass>),
}

/// An immutable, canonical, structurally comparable resolved type.
///
/// A resolved type knows its raw class, its formal type-parameter names and
/// its bound actual parameters, and can resolve the type of any member
/// declared somewhere in its class/interface hierarchy, substituting type
/// variables with the bindings discovered along the inheritance chain.
///
/// Instances borrow the metadata oracle they were resolved against. Derived
/// views (the actual-parameter list and the rendering) are computed on first
/// use and cached; the computation is pure, so a concurrent first access is
/// at worst redundant, never inconsistent.
#[derive(Clone)]
pub struct ResolvedType<'env> {
    env: &'env dyn Reflect,
    descriptor: Arc<Descriptor>,
    actuals: OnceLock<Vec<ResolvedType<'env>>>,
    rendered: OnceLock<String>,
}

impl<'env> ResolvedType<'env> {
    pub(crate) fn new(env: &'env dyn Reflect, descriptor: Arc<Descriptor>) -> Self {
        Self {
            env,
            descriptor,
            actuals: OnceLock::new(),
            rendered: OnceLock::new(),
        }
    }

    /// Resolve a raw class.
    ///
    /// Never fails: a class with no registered metadata only errors once an
    /// operation actually needs its definition.
    pub fn of(env: &'env dyn Reflect, class: ClassId) -> Self {
        Self::new(env, Arc::new(Descriptor::Class(class)))
    }

    /// Capture a fully reified type from an explicit type token.
    ///
    /// This is how a caller names a complete generic type such as
    /// `Map<String, List<String>>`. The token must be closed: a free type
    /// variable (anywhere, including wildcard bounds) is an error, as is a
    /// wildcard itself.
    pub fn capture(env: &'env dyn Reflect, description: &TypeDescription) -> ResolveResult<Self> {
        if let Some(var) = description.first_variable() {
            return Err(ResolveError::UnresolvedCapture {
                rendered: render_description(env, description),
                variable: var_name(env, var),
            });
        }
        // The context is irrelevant for a closed token; any descriptor does.
        let context = Descriptor::Class(env.well_known().object);
        let descriptor = classify(env, &context, description)?;
        Ok(Self::new(env, Arc::new(descriptor)))
    }

    pub(crate) fn env(&self) -> &'env dyn Reflect {
        self.env
    }

    /// The raw class this type erases to.
    pub fn raw(&self) -> RawClass {
        fn raw_of(descriptor: &Descriptor) -> RawClass {
            match descriptor {
                Descriptor::Class(class) | Descriptor::Parameterized { class, .. } => {
                    RawClass::Class(*class)
                }
                Descriptor::Array(element) => RawClass::Array(Box::new(raw_of(element))),
            }
        }
        raw_of(&self.descriptor)
    }

    /// The raw class id, unless this is an array type.
    pub fn class_id(&self) -> Option<ClassId> {
        self.descriptor.raw_class_id()
    }

    /// Formal type-parameter names in declaration order; empty for
    /// non-generic types.
    pub fn formal_parameters(&self) -> ResolveResult<Vec<String>> {
        self.descriptor.formal_parameters(self.env)
    }

    /// Bound actual parameters, one resolved type per binding.
    ///
    /// Empty for raw/erased usage; otherwise index-aligned with
    /// [`ResolvedType::formal_parameters`]. Computed once and cached.
    pub fn actual_parameters(&self) -> &[ResolvedType<'env>] {
        self.actuals.get_or_init(|| {
            self.descriptor
                .actual_parameters()
                .iter()
                .map(|d| ResolvedType::new(self.env, d.clone()))
                .collect()
        })
    }

    /// Classify `description` in this type's context and wrap the result.
    ///
    /// This is the substitution primitive: type variables in `description`
    /// resolve against this type's bindings.
    pub fn member_type(&self, description: &TypeDescription) -> ResolveResult<ResolvedType<'env>> {
        let descriptor = classify(self.env, &self.descriptor, description)?;
        Ok(ResolvedType::new(self.env, Arc::new(descriptor)))
    }

    /// The resolved superclass, if any.
    ///
    /// `None` for `Object`, interfaces and primitives. Arrays report
    /// `Object`, the platform rule.
    pub fn super_type(&self) -> ResolveResult<Option<ResolvedType<'env>>> {
        let class = match &*self.descriptor {
            Descriptor::Array(_) => {
                return Ok(Some(ResolvedType::of(self.env, self.env.well_known().object)));
            }
            Descriptor::Class(class) | Descriptor::Parameterized { class, .. } => *class,
        };
        let def = self
            .env
            .class(class)
            .ok_or(ResolveError::MissingClass(class))?;
        match &def.super_class {
            None => Ok(None),
            Some(sc) => self.member_type(sc).map(Some),
        }
    }

    /// Resolved declared interfaces, in declaration order.
    ///
    /// The sequence is recomputed on each call. Arrays report `Cloneable`
    /// and `Serializable`.
    pub fn interfaces(&self) -> Interfaces<'_, 'env> {
        let source = match &*self.descriptor {
            Descriptor::Array(_) => Source::Array,
            Descriptor::Class(class) | Descriptor::Parameterized { class, .. } => {
                match self.env.class(*class) {
                    Some(def) => Source::Declared(&def.interfaces),
                    None => Source::Missing(*class),
                }
            }
        };
        Interfaces {
            owner: self,
            source,
            pos: 0,
        }
    }

    /// The superclass (if present) followed by the declared interfaces.
    pub fn super_types(&self) -> impl Iterator<Item = ResolveResult<ResolvedType<'env>>> + '_ {
        let first = match self.super_type() {
            Ok(None) => None,
            Ok(Some(ty)) => Some(Ok(ty)),
            Err(err) => Some(Err(err)),
        };
        first.into_iter().chain(self.interfaces())
    }

    /// Resolve a field's type, provided the field is declared somewhere in
    /// this type's hierarchy.
    pub fn type_of(&self, field: FieldId) -> ResolveResult<ResolvedType<'env>> {
        members::field_type(self, field)
    }

    /// Resolve a method's return type; same declaration requirement as
    /// [`ResolvedType::type_of`].
    pub fn return_type_of(&self, method: MethodId) -> ResolveResult<ResolvedType<'env>> {
        members::return_type(self, method)
    }

    /// Resolve a method's parameter types, in declaration order.
    pub fn parameter_types_of(&self, method: MethodId) -> ResolveResult<Vec<ResolvedType<'env>>> {
        members::parameter_types(self, method)
    }

    /// Resolve a method's declared thrown exception types, in declaration
    /// order.
    pub fn exception_types_of(&self, method: MethodId) -> ResolveResult<Vec<ResolvedType<'env>>> {
        members::exception_types(self, method)
    }

    /// Canonical rendering, cached after the first call.
    pub fn render(&self) -> &str {
        self.rendered
            .get_or_init(|| self.descriptor.render(self.env))
    }
}

impl fmt::Display for ResolvedType<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.render())
    }
}

impl fmt::Debug for ResolvedType<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ResolvedType({})", self.render())
    }
}

/// Equality is structural: same raw class, same actual parameters,
/// recursively. The oracle reference does not participate.
impl PartialEq for ResolvedType<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.descriptor == other.descriptor
    }
}

impl Eq for ResolvedType<'_> {}

impl Hash for ResolvedType<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.descriptor.hash(state);
    }
}

enum Source<'env> {
    Declared(&'env [TypeDescription]),
    Array,
    Missing(ClassId),
}

/// Iterator over a resolved type's declared interfaces.
pub struct Interfaces<'a, 'env> {
    owner: &'a ResolvedType<'env>,
    source: Source<'env>,
    pos: usize,
}

impl<'a, 'env> Iterator for Interfaces<'a, 'env> {
    type Item = ResolveResult<ResolvedType<'env>>;

    fn next(&mut self) -> Option<Self::Item> {
        let pos = self.pos;
        self.pos += 1;
        match &self.source {
            Source::Declared(interfaces) => {
                let description = interfaces.get(pos)?;
                Some(self.owner.member_type(description))
            }
            Source::Array => {
                let env = self.owner.env();
                let id = match pos {
                    0 => env.well_known().cloneable,
                    1 => env.well_known().serializable,
                    _ => return None,
                };
                Some(Ok(ResolvedType::of(env, id)))
            }
            Source::Missing(class) => {
                if pos == 0 {
                    Some(Err(ResolveError::MissingClass(*class)))
                } else {
                    None
                }
            }
        }
    }
}
