//! Items used by `#[derive(Bean)]` expansions. Not public API.

/// Detects at expansion sites whether a concrete type is a bean.
///
/// `(&&DetectBean::<T>::new()).__value_bean()` picks [`__ViaBean`] when
/// `T: Bean` and falls back to [`__ViaAny`] otherwise. Inside generic code
/// a type parameter without a `Bean` bound always takes the fallback.
pub mod detect {
    use core::marker::PhantomData;

    use crate::info::{Bean, BeanInfo};

    pub struct DetectBean<T: ?Sized>(PhantomData<fn() -> T>);

    impl<T: ?Sized> DetectBean<T> {
        #[inline(always)]
        pub const fn new() -> Self {
            Self(PhantomData)
        }
    }

    pub trait __ViaBean {
        fn __value_bean(&self) -> Option<fn() -> &'static BeanInfo>;
    }

    impl<T: Bean> __ViaBean for &DetectBean<T> {
        #[inline(always)]
        fn __value_bean(&self) -> Option<fn() -> &'static BeanInfo> {
            Some(T::bean_info)
        }
    }

    pub trait __ViaAny {
        fn __value_bean(&self) -> Option<fn() -> &'static BeanInfo>;
    }

    impl<T: ?Sized> __ViaAny for DetectBean<T> {
        #[inline(always)]
        fn __value_bean(&self) -> Option<fn() -> &'static BeanInfo> {
            None
        }
    }
}

#[cfg(feature = "auto_register")]
pub mod auto_register {
    pub use inventory;

    use crate::info::Bean;
    use crate::registry::BeanRegistry;

    /// A registration function submitted by `#[bean(auto_register)]`.
    pub struct __AutoRegisterFunc(pub fn(&mut BeanRegistry));

    inventory::collect!(__AutoRegisterFunc);

    /// Names the registration function of a bean type in expansions.
    pub trait __RegisterType {
        fn __register(registry: &mut BeanRegistry);
    }

    impl<T: Bean> __RegisterType for T {
        #[inline]
        fn __register(registry: &mut BeanRegistry) {
            registry.register::<T>();
        }
    }

    // Only runs if static collection works on the current platform.
    fn __mark_available(registry: &mut BeanRegistry) {
        registry.mark_auto_registered();
    }

    inventory::submit! { __AutoRegisterFunc(__mark_available) }

    pub(crate) fn __register_types(registry: &mut BeanRegistry) {
        for func in inventory::iter::<__AutoRegisterFunc> {
            (func.0)(registry);
        }
    }
}
