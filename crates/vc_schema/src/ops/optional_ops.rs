use crate::Reflect;

/// A nullable indirection.
pub trait Optional: Reflect {
    /// The pointee, or `None` when null.
    fn value(&self) -> Option<&dyn Reflect>;

    fn value_mut(&mut self) -> Option<&mut dyn Reflect>;

    /// Returns the pointee, allocating its zero value when null.
    fn get_or_insert_default(&mut self) -> &mut dyn Reflect;

    /// Resets to null.
    fn clear(&mut self);

    #[inline]
    fn is_null(&self) -> bool {
        self.value().is_none()
    }
}
