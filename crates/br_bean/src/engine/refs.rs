use alloc::sync::Arc;
use alloc::vec;
use alloc::vec::Vec;
use core::any::Any;
use core::fmt;

use crate::cache::CachePolicy;
use crate::config::EngineConfig;
use crate::engine::{BeanRoot, Engine};
use crate::error::{BeanError, Result};
use crate::info::{Bean, Getter, OrderedCollection, Type};
use crate::path::{BeanPath, Path, PathSpec, Step};
use crate::property::PropertyDescriptor;
use crate::registry::BeanRegistryArc;
use crate::resolver::CanonicalTypeResolver;

/// A property path engine.
///
/// `BeanRefs` resolves typed getter references and dotted strings into
/// cached property descriptors and chains them into paths. Clones share
/// the same caches.
///
/// # Examples
///
/// ```
/// use br_bean::{BeanRefs, derive::Bean, info::Type, registry::BeanRegistry};
///
/// #[derive(Bean, Default)]
/// #[bean(default)]
/// struct Address {
///     city: Option<String>,
/// }
///
/// #[derive(Bean, Default)]
/// #[bean(default)]
/// struct Contact {
///     address: Option<Address>,
/// }
///
/// let mut registry = BeanRegistry::empty();
/// registry.register::<Contact>();
/// registry.register::<Address>();
///
/// let refs = BeanRefs::new(registry);
/// let typed = refs.property(Contact::ADDRESS).unwrap().then(Address::CITY).unwrap();
/// let named = refs.resolve(Type::of::<Contact>(), "address.city").unwrap();
///
/// assert_eq!(typed, named);
/// ```
#[derive(Clone)]
pub struct BeanRefs {
    engine: Arc<Engine>,
}

impl BeanRefs {
    /// An engine with the default [`EngineConfig`].
    pub fn new(registry: impl Into<BeanRegistryArc>) -> Self {
        Self::with_config(registry, EngineConfig::default())
    }

    /// An engine configured by `config`.
    pub fn with_config(registry: impl Into<BeanRegistryArc>, config: EngineConfig) -> Self {
        Self::with_canonical_resolver(registry, config.cache, config.canonical.resolver())
    }

    /// An engine using a custom [`CanonicalTypeResolver`].
    pub fn with_canonical_resolver(
        registry: impl Into<BeanRegistryArc>,
        cache: CachePolicy,
        canonical: Arc<dyn CanonicalTypeResolver>,
    ) -> Self {
        Self {
            engine: Arc::new(Engine::new(registry.into(), &cache, canonical)),
        }
    }

    /// The registry consulted by this engine.
    #[inline]
    pub fn registry(&self) -> &BeanRegistryArc {
        self.engine.registry()
    }

    /// Registers `T`, see [`BeanRegistry::register`].
    ///
    /// [`BeanRegistry::register`]: crate::registry::BeanRegistry::register
    pub fn register<T: Bean>(&self) {
        self.registry().ensure::<T>();
    }

    /// The number of cached descriptors.
    pub fn cached_descriptors(&self) -> usize {
        self.engine.accessors().cached()
    }

    /// A one-property path from a getter reference.
    ///
    /// Resolving the same getter twice yields the same cached descriptor.
    pub fn property<B: Bean, V: Any>(&self, getter: Getter<B, V>) -> Result<BeanPath<B, V>> {
        let descriptor = self.engine.accessors().resolve(getter)?;
        self.single(Type::of::<B>(), descriptor)
    }

    /// A one-property path to the last element of a collection property.
    pub fn collection<B: Bean, C: OrderedCollection>(
        &self,
        getter: Getter<B, C>,
    ) -> Result<BeanPath<B, C::Item>> {
        let descriptor = self.engine.accessors().resolve_collection(getter, None)?;
        self.single(Type::of::<B>(), descriptor)
    }

    /// Like [`collection`](Self::collection), creating a null collection
    /// with `factory`.
    pub fn collection_with<B: Bean, C: OrderedCollection>(
        &self,
        getter: Getter<B, C>,
        factory: fn() -> C,
    ) -> Result<BeanPath<B, C::Item>> {
        let descriptor = self
            .engine
            .accessors()
            .resolve_collection(getter, Some(factory))?;
        self.single(Type::of::<B>(), descriptor)
    }

    fn single<R, V>(&self, root: Type, descriptor: Arc<PropertyDescriptor>) -> Result<BeanPath<R, V>> {
        let path = Path::new(root, vec![Step::direct(descriptor)], self.engine.clone())?;
        Ok(BeanPath::from_path(path))
    }

    /// A typed entry point anchored at `R`.
    pub fn root<R: Bean>(&self) -> BeanRoot<R> {
        self.register::<R>();
        BeanRoot::new(self.clone())
    }

    /// Resolves a dotted path starting at the registered bean type `root`.
    ///
    /// ```
    /// # use br_bean::{BeanRefs, BeanError, derive::Bean, info::Type, registry::BeanRegistry};
    /// #[derive(Bean)]
    /// struct Address {
    ///     city: Option<String>,
    /// }
    ///
    /// let refs = BeanRefs::new(BeanRegistry::empty());
    /// refs.register::<Address>();
    ///
    /// let city = refs.resolve(Type::of::<Address>(), "city").unwrap();
    /// assert!(city.value_type().is::<String>());
    ///
    /// let missing = refs.resolve(Type::of::<Address>(), "zip");
    /// assert!(matches!(missing, Err(BeanError::IllegalArgument(_))));
    /// ```
    pub fn resolve(&self, root: Type, path: &str) -> Result<Path> {
        let steps = self.engine.resolve_steps(root, path, None)?;
        Path::new(root, steps, self.engine.clone())
    }

    /// Resolves a dotted path from `R` whose value must be a `V`.
    pub fn resolve_as<R: Bean, V: Any>(&self, path: &str) -> Result<BeanPath<R, V>> {
        self.register::<R>();
        let root = Type::of::<R>();
        let steps = self
            .engine
            .resolve_steps(root, path, Some(Type::of::<V>()))?;
        Ok(BeanPath::from_path(Path::new(root, steps, self.engine.clone())?))
    }

    /// One path per property of the registered bean type `root`.
    pub fn all_properties(&self, root: Type) -> Result<Vec<Path>> {
        let map = self.engine.introspector().properties(root)?;
        map.entries()
            .iter()
            .map(|entry| {
                let step = Step {
                    projection: entry.projection.clone(),
                    descriptor: entry.descriptor.clone(),
                };
                Path::new(root, vec![step], self.engine.clone())
            })
            .collect()
    }

    /// Resolves a [`PathSpec`] again.
    ///
    /// The root is looked up by full type path, then by short name.
    pub fn path_from_spec(&self, spec: &PathSpec) -> Result<Path> {
        let info = self.registry().read().find(&spec.root);
        match info {
            Some(info) => self.resolve(info.ty(), &spec.path),
            None => Err(BeanError::illegal_argument(format!(
                "type `{}` is not a registered bean",
                spec.root
            ))),
        }
    }
}

impl fmt::Debug for BeanRefs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BeanRefs")
            .field("registered", &self.registry().read().len())
            .field("cached_descriptors", &self.cached_descriptors())
            .finish()
    }
}
