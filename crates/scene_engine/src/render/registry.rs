//! Interning registry for geometry and material descriptors
//!
//! Repeated shapes (a row of identical wall panels, say) resolve to one handle,
//! so a renderer only has to build GPU state once per distinct descriptor.
//! Handles live as long as the registry; nothing is ever evicted.

use std::collections::HashMap;
use std::hash::Hash;

use slotmap::{new_key_type, Key, SlotMap};

use super::geometry::GeometryDescriptor;
use super::material::MaterialDescriptor;

new_key_type! {
    /// Handle to an interned geometry descriptor
    pub struct GeometryHandle;

    /// Handle to an interned material descriptor
    pub struct MaterialHandle;
}

/// Descriptor that can be deduplicated by structural equality
pub trait Interned: Clone {
    /// Hashable identity of the descriptor's values
    type Key: Eq + Hash;

    /// Compute the structural key
    fn intern_key(&self) -> Self::Key;
}

/// Bit pattern of a float with `-0.0` folded into `0.0`
///
/// NaN never reaches the registry; composition rejects non-finite values.
pub fn canonical_bits(value: f32) -> u32 {
    if value == 0.0 {
        0
    } else {
        value.to_bits()
    }
}

/// Interning cache mapping equal descriptors to one stable handle
pub struct Registry<K: Key, D: Interned> {
    items: SlotMap<K, D>,
    index: HashMap<D::Key, K>,
}

/// Registry of geometry descriptors
pub type GeometryRegistry = Registry<GeometryHandle, GeometryDescriptor>;

/// Registry of material descriptors
pub type MaterialRegistry = Registry<MaterialHandle, MaterialDescriptor>;

impl<K: Key, D: Interned> Registry<K, D> {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            items: SlotMap::with_key(),
            index: HashMap::new(),
        }
    }

    /// Return the handle for `descriptor`, storing it if no equal one exists
    pub fn intern(&mut self, descriptor: D) -> K {
        let key = descriptor.intern_key();
        if let Some(&handle) = self.index.get(&key) {
            return handle;
        }
        let handle = self.items.insert(descriptor);
        self.index.insert(key, handle);
        handle
    }

    /// Look up an interned descriptor
    pub fn get(&self, handle: K) -> Option<&D> {
        self.items.get(handle)
    }

    /// Number of distinct descriptors
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when nothing has been interned
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate over all handles and descriptors
    pub fn iter(&self) -> impl Iterator<Item = (K, &D)> {
        self.items.iter()
    }
}

impl<K: Key, D: Interned> Default for Registry<K, D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Key, D: Interned + std::fmt::Debug> std::fmt::Debug for Registry<K, D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.items.iter()).finish()
    }
}
