//! Hash containers on top of *hashbrown* and *foldhash*.

use core::any::TypeId;

use foldhash::fast::FixedState;

/// Seed shared by every container in this crate.
const SEED: u64 = 0x5C4E_3A1B_9D07_F261;

/// A [`hashbrown::HashMap`] with a fixed [`foldhash`] state.
pub(crate) type HashMap<K, V> = hashbrown::HashMap<K, V, FixedState>;

/// A map keyed by [`TypeId`].
pub(crate) type TypeIdMap<V> = HashMap<TypeId, V>;

/// Creates an empty map with the crate-wide hash state.
#[inline]
pub(crate) const fn new_map<K, V>() -> HashMap<K, V> {
    hashbrown::HashMap::with_hasher(FixedState::with_seed(SEED))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_id_keys() {
        let mut map: TypeIdMap<&str> = new_map();
        map.insert(TypeId::of::<u8>(), "u8");
        map.insert(TypeId::of::<i8>(), "i8");

        assert_eq!(map.get(&TypeId::of::<u8>()), Some(&"u8"));
        assert_eq!(map.get(&TypeId::of::<u16>()), None);
    }
}
