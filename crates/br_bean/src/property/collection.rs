use alloc::boxed::Box;
use alloc::sync::Arc;
use core::any::Any;

use crate::error::{BeanError, IncompletePathError, ReadOnlyError, Result};
use crate::info::{CollectionOps, ReadFn, ReadMutFn, WriteFn};

/// Creates an empty collection for a collection property that is null.
pub type CollectionFactory = Arc<dyn Fn() -> Option<Box<dyn Any>> + Send + Sync>;

/// Element access over a collection-valued property.
pub(crate) struct CollectionAccess {
    pub read: ReadFn,
    pub read_mut: ReadMutFn,
    pub write: Option<WriteFn>,
    pub ops: CollectionOps,
    pub factory: Option<CollectionFactory>,
}

impl CollectionAccess {
    /// Uses `factory`, or the collection's own empty value when the
    /// property can be written back.
    pub fn new(
        read: ReadFn,
        read_mut: ReadMutFn,
        write: Option<WriteFn>,
        ops: CollectionOps,
        factory: Option<CollectionFactory>,
    ) -> Self {
        let factory = match factory {
            Some(factory) => Some(factory),
            None if write.is_some() => {
                Some(Arc::new(move || ops.empty()) as CollectionFactory)
            }
            None => None,
        };
        Self {
            read,
            read_mut,
            write,
            ops,
            factory,
        }
    }

    pub fn last<'a>(&self, bean: &'a dyn Any) -> Result<Option<&'a dyn Any>> {
        match (self.read)(bean)? {
            Some(collection) => Ok(self.ops.last(collection)?),
            None => Ok(None),
        }
    }

    pub fn last_mut<'a>(&self, bean: &'a mut dyn Any) -> Result<Option<&'a mut dyn Any>> {
        match (self.read_mut)(bean)? {
            Some(collection) => Ok(self.ops.last_mut(collection)?),
            None => Ok(None),
        }
    }

    /// Appends `value`, or clears the collection on `None`.
    ///
    /// A null collection is materialized first, even when `value` is `None`.
    pub fn write(
        &self,
        bean: &mut dyn Any,
        value: Option<Box<dyn Any>>,
        owner: &'static str,
        property: &str,
    ) -> Result<()> {
        if (self.read)(bean)?.is_none() {
            self.materialize(bean, owner, property)?;
        }

        let collection = (self.read_mut)(bean)?.ok_or_else(|| {
            IncompletePathError::new(format!(
                "collection property `{property}` of `{owner}` is still null after instantiation"
            ))
        })?;

        match value {
            Some(value) => self.ops.append(collection, value)?,
            None => self.ops.clear(collection)?,
        }
        Ok(())
    }

    fn materialize(&self, bean: &mut dyn Any, owner: &'static str, property: &str) -> Result<()> {
        let Some(write) = &self.write else {
            let read_only = ReadOnlyError::new(owner, property.to_owned().into());
            return Err(IncompletePathError::caused_by(
                format!("collection property `{property}` of `{owner}` is null and read-only"),
                read_only.into(),
            )
            .into());
        };

        let fresh = self.factory.as_ref().and_then(|factory| factory());
        let Some(fresh) = fresh else {
            return Err(IncompletePathError::new(format!(
                "cannot instantiate a new `{}` for property `{property}` of `{owner}`",
                self.ops.collection_type(),
            ))
            .into());
        };

        log::trace!("instantiated collection `{}` for `{owner}.{property}`", self.ops.collection_type());
        write(bean, Some(fresh)).map_err(|e| {
            BeanError::from(IncompletePathError::caused_by(
                format!("cannot store a new collection into `{owner}.{property}`"),
                e.into(),
            ))
        })
    }
}
