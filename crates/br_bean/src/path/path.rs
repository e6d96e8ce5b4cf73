use alloc::boxed::Box;
use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::any::Any;
use core::fmt;
use core::hash::{Hash, Hasher};

use crate::engine::Engine;
use crate::error::{AccessError, BeanError, IncompletePathError, Result};
use crate::info::Type;
use crate::path::PathSpec;
use crate::property::PropertyDescriptor;
use crate::resolver::Projection;

// -----------------------------------------------------------------------------
// Step

/// One link of a path: an optional facet projection followed by a property.
#[derive(Clone)]
pub(crate) struct Step {
    pub projection: Option<Projection>,
    pub descriptor: Arc<PropertyDescriptor>,
}

impl Step {
    #[inline]
    pub fn direct(descriptor: Arc<PropertyDescriptor>) -> Self {
        Self {
            projection: None,
            descriptor,
        }
    }

    /// The type a bean must have for this step to apply.
    fn source_type(&self) -> Type {
        match &self.projection {
            Some(projection) => projection.source(),
            None => self.descriptor.declaring_type(),
        }
    }

    fn project<'a>(&self, bean: &'a dyn Any) -> Result<&'a dyn Any> {
        match &self.projection {
            None => Ok(bean),
            Some(projection) => projection.view(bean).ok_or_else(|| {
                AccessError::TypeMismatch {
                    expected: projection.source().name(),
                }
                .into()
            }),
        }
    }

    fn project_mut<'a>(&self, bean: &'a mut dyn Any) -> Result<&'a mut dyn Any> {
        match &self.projection {
            None => Ok(bean),
            Some(projection) => {
                let expected = projection.source().name();
                projection
                    .view_mut(bean)
                    .ok_or_else(|| AccessError::TypeMismatch { expected }.into())
            }
        }
    }
}

// -----------------------------------------------------------------------------
// Path

/// An immutable chain of properties anchored at a root bean type.
///
/// A path reads null-safely, writes by instantiating missing
/// intermediates, and can be extended with further properties. Two paths
/// are equal when their property sequences are equal.
///
/// This is the untyped form working on `dyn Any`. [`BeanPath`] wraps it
/// with the root and value types.
///
/// [`BeanPath`]: crate::BeanPath
#[derive(Clone)]
pub struct Path {
    root: Type,
    steps: Arc<[Step]>,
    engine: Arc<Engine>,
}

impl Path {
    pub(crate) fn new(root: Type, steps: Vec<Step>, engine: Arc<Engine>) -> Result<Self> {
        if steps.is_empty() {
            return Err(BeanError::illegal_path("a path needs at least one property"));
        }
        let path = Self {
            root,
            steps: steps.into(),
            engine,
        };
        path.assert_chained();
        Ok(path)
    }

    /// A new path continuing this one with `steps`.
    pub(crate) fn extended(&self, steps: impl IntoIterator<Item = Step>) -> Self {
        let mut all = self.steps.to_vec();
        all.extend(steps);
        let path = Self {
            root: self.root,
            steps: all.into(),
            engine: self.engine.clone(),
        };
        path.assert_chained();
        path
    }

    #[cfg(all(debug_assertions, feature = "debug"))]
    fn assert_chained(&self) {
        let mut expected = self.root;
        for step in self.steps.iter() {
            if let Some(projection) = &step.projection {
                debug_assert_eq!(
                    projection.target(),
                    step.descriptor.declaring_type(),
                    "facet projection must end at the declaring type"
                );
            }
            debug_assert_eq!(
                step.source_type(),
                expected,
                "property `{}` does not apply to `{expected}`",
                step.descriptor,
            );
            expected = step.descriptor.value_type();
        }
    }

    #[cfg(not(all(debug_assertions, feature = "debug")))]
    #[inline(always)]
    fn assert_chained(&self) {}

    #[inline]
    pub(crate) fn engine(&self) -> &Arc<Engine> {
        &self.engine
    }

    #[inline]
    pub(crate) fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// The root bean type.
    #[inline]
    pub fn root_type(&self) -> Type {
        self.root
    }

    /// The type of the value the path leads to.
    #[inline]
    pub fn value_type(&self) -> Type {
        self.last().value_type()
    }

    /// The number of properties, at least one.
    #[inline]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// The last property of the path.
    pub fn last(&self) -> &Arc<PropertyDescriptor> {
        // Never empty, see `Path::new`.
        &self.steps[self.steps.len() - 1].descriptor
    }

    /// The properties in order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &Arc<PropertyDescriptor>> + '_ {
        self.steps.iter().map(|step| &step.descriptor)
    }

    /// Returns `true` if the last property cannot be written.
    #[inline]
    pub fn is_read_only(&self) -> bool {
        self.last().is_read_only()
    }

    /// Reads the value the path leads to.
    ///
    /// Returns `Ok(None)` as soon as a value along the path is null.
    pub fn get_dyn<'a>(&self, root: &'a dyn Any) -> Result<Option<&'a dyn Any>> {
        let mut current = root;
        for step in self.steps.iter() {
            let bean = step.project(current)?;
            match step.descriptor.get(bean)? {
                Some(value) => current = value,
                None => return Ok(None),
            }
        }
        Ok(Some(current))
    }

    /// Writes `value` at the end of the path.
    ///
    /// Null intermediates are instantiated and written back first. Fails
    /// with [`IncompletePathError`] if one cannot be instantiated or
    /// written back, and with [`ReadOnlyError`] if the last property is
    /// read-only.
    ///
    /// [`ReadOnlyError`]: crate::ReadOnlyError
    pub fn set_dyn(&self, root: &mut dyn Any, value: Option<Box<dyn Any>>) -> Result<()> {
        let (last, intermediates) = match self.steps.split_last() {
            Some(split) => split,
            None => return Err(BeanError::illegal_path("empty path")),
        };

        let mut current = root;
        for (index, step) in intermediates.iter().enumerate() {
            let bean = step.project_mut(current)?;
            if step.descriptor.get(&*bean)?.is_none() {
                self.instantiate(index, step, &mut *bean)?;
            }
            current = step
                .descriptor
                .get_mut(bean)?
                .ok_or_else(|| self.null_at(index))?;
        }

        let bean = last.project_mut(current)?;
        last.descriptor.set(bean, value)
    }

    /// Returns `true` if every intermediate value is non-null.
    ///
    /// The value at the end of the path may still be null.
    pub fn is_complete_dyn(&self, root: &dyn Any) -> Result<bool> {
        let intermediates = &self.steps[..self.steps.len() - 1];
        let mut current = root;
        for step in intermediates {
            let bean = step.project(current)?;
            match step.descriptor.get(bean)? {
                Some(value) => current = value,
                None => return Ok(false),
            }
        }
        Ok(true)
    }

    fn instantiate(&self, index: usize, step: &Step, bean: &mut dyn Any) -> Result<()> {
        let Some(constructor) = step.descriptor.instantiator() else {
            return Err(self.null_at(index).into());
        };
        let fresh = constructor()?;
        log::trace!(
            "instantiated `{}` at `{}`",
            step.descriptor.value_type(),
            self.prefix(index + 1)
        );
        step.descriptor
            .set(bean, Some(fresh))
            .map_err(|error| match error {
                BeanError::ReadOnly(_) => IncompletePathError::caused_by(
                    self.null_message(index),
                    error,
                )
                .into(),
                other => other,
            })
    }

    fn null_message(&self, index: usize) -> String {
        format!(
            "property can not be accessed via path `{}` because `{}` is null",
            self.path(),
            self.prefix(index + 1),
        )
    }

    fn null_at(&self, index: usize) -> IncompletePathError {
        IncompletePathError::new(self.null_message(index))
    }

    fn prefix(&self, len: usize) -> String {
        let mut out = String::new();
        for (i, step) in self.steps[..len].iter().enumerate() {
            if i > 0 {
                out.push('.');
            }
            out.push_str(step.descriptor.name());
        }
        out
    }

    /// The property names joined by `.`.
    pub fn path(&self) -> String {
        self.prefix(self.steps.len())
    }

    /// [`path`](Self::path) prefixed with `root`, without separator.
    ///
    /// The prefix is used verbatim, so it carries its own separator:
    /// `path_with_root("person.")` gives `person.contact.address.city`.
    pub fn path_with_root(&self, root: &str) -> String {
        format!("{root}{}", self.path())
    }

    /// Extends the path with a dotted path resolved from its value type.
    pub fn then_path(&self, path: &str) -> Result<Path> {
        let steps = self.engine.resolve_steps(self.value_type(), path, None)?;
        Ok(self.extended(steps))
    }

    /// Like [`then_path`](Self::then_path), and checks the resulting value type.
    pub fn then_path_as(&self, path: &str, expected: Type) -> Result<Path> {
        let steps = self
            .engine
            .resolve_steps(self.value_type(), path, Some(expected))?;
        Ok(self.extended(steps))
    }

    /// One path per property of the value type.
    pub fn all(&self) -> Result<Vec<Path>> {
        let map = self.engine.introspector().properties(self.value_type())?;
        Ok(map
            .entries()
            .iter()
            .map(|entry| {
                self.extended([Step {
                    projection: entry.projection.clone(),
                    descriptor: entry.descriptor.clone(),
                }])
            })
            .collect())
    }

    /// A serializable form of this path.
    ///
    /// Collection properties are marked with `[]`. A custom collection
    /// factory is not captured.
    pub fn spec(&self) -> PathSpec {
        let mut path = String::new();
        for (i, step) in self.steps.iter().enumerate() {
            if i > 0 {
                path.push('.');
            }
            path.push_str(step.descriptor.name());
            if step.descriptor.is_collection() {
                path.push_str("[]");
            }
        }
        PathSpec {
            root: String::from(self.root.name()),
            path,
        }
    }
}

impl PartialEq for Path {
    fn eq(&self, other: &Self) -> bool {
        self.steps.len() == other.steps.len()
            && self
                .steps
                .iter()
                .zip(other.steps.iter())
                .all(|(a, b)| a.descriptor == b.descriptor)
    }
}

impl Eq for Path {}

impl Hash for Path {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_usize(self.steps.len());
        for step in self.steps.iter() {
            step.descriptor.hash(state);
        }
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

impl fmt::Debug for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Path")
            .field("root", &self.root)
            .field("path", &self.path())
            .field("value", &self.value_type())
            .finish()
    }
}
