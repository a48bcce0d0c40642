use alloc::boxed::Box;
use alloc::string::String;
use alloc::sync::Arc;
use core::any::TypeId;
use core::fmt;

use crate::Reflect;
use crate::hash::{TypeIdMap, new_map};

type DecodeFn = dyn Fn(&str) -> Option<Box<dyn Reflect>> + Send + Sync;
type EncodeFn = dyn Fn(&dyn Reflect) -> Option<String> + Send + Sync;

// -----------------------------------------------------------------------------
// Converters

/// String to value conversions registered by type.
///
/// A converter returning `None` declines the input, which is reported as a
/// conversion error.
#[derive(Clone)]
pub struct Converters {
    map: TypeIdMap<Arc<DecodeFn>>,
}

impl Converters {
    pub const fn new() -> Self {
        Self { map: new_map() }
    }

    /// Registers `f` for values of type `T`, replacing any earlier one.
    pub fn register<T, F>(&mut self, f: F)
    where
        T: Reflect,
        F: Fn(&str) -> Option<T> + Send + Sync + 'static,
    {
        let erased: Arc<DecodeFn> =
            Arc::new(move |text: &str| f(text).map(|v| Box::new(v) as Box<dyn Reflect>));
        self.map.insert(TypeId::of::<T>(), erased);
    }

    #[inline]
    pub fn contains(&self, type_id: TypeId) -> bool {
        self.map.contains_key(&type_id)
    }

    /// Converts `text` with the converter registered for the type of
    /// `target` and stores the result.
    ///
    /// Returns `None` if no converter is registered, `Some(false)` if the
    /// converter declined.
    pub(crate) fn apply(&self, target: &mut dyn Reflect, text: &str) -> Option<bool> {
        let target = target.as_reflect_mut();
        let f = self.map.get(&target.ty_id())?;
        Some(match f(text) {
            Some(value) => target.set(value).is_ok(),
            None => false,
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl Default for Converters {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Converters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Converters").field("len", &self.map.len()).finish()
    }
}

// -----------------------------------------------------------------------------
// Encoders

/// Value to string conversions registered by type.
///
/// A registered encoder wins over every built-in path, including the
/// recursion into records and lists.
#[derive(Clone)]
pub struct Encoders {
    map: TypeIdMap<Arc<EncodeFn>>,
}

impl Encoders {
    pub const fn new() -> Self {
        Self { map: new_map() }
    }

    /// Registers `f` for values of type `T`, replacing any earlier one.
    pub fn register<T, F>(&mut self, f: F)
    where
        T: Reflect,
        F: Fn(&T) -> String + Send + Sync + 'static,
    {
        let erased: Arc<EncodeFn> =
            Arc::new(move |value: &dyn Reflect| value.downcast_ref::<T>().map(&f));
        self.map.insert(TypeId::of::<T>(), erased);
    }

    #[inline]
    pub fn contains(&self, type_id: TypeId) -> bool {
        self.map.contains_key(&type_id)
    }

    /// Encodes `value` with the encoder registered for its type.
    pub(crate) fn apply(&self, value: &dyn Reflect) -> Option<String> {
        let value = value.as_reflect();
        let f = self.map.get(&value.ty_id())?;
        f(value)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl Default for Encoders {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Encoders {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Encoders").field("len", &self.map.len()).finish()
    }
}
