use alloc::boxed::Box;

use crate::Reflect;

/// A growable list of homogeneous items.
pub trait List: Reflect {
    fn get(&self, index: usize) -> Option<&dyn Reflect>;

    fn get_mut(&mut self, index: usize) -> Option<&mut dyn Reflect>;

    fn len(&self) -> usize;

    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Appends `value`, handing it back if it is not of the item type.
    fn push(&mut self, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>>;

    /// Appends zero-valued items until the list holds at least `len` items.
    fn grow(&mut self, len: usize);

    fn clear(&mut self);
}
