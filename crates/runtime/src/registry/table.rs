//! Per-category descriptor tables and hook lists.

use std::collections::BTreeMap;

use modloader_core::RegistryError;

/// Registered content: identity, texture reference and the capability object.
pub struct Descriptor<T: ?Sized, M = ()> {
    pub module: String,
    pub name: String,
    pub id: u32,
    /// Texture reference, resolved against the asset caches at setup.
    pub texture: Option<String>,
    pub meta: M,
    pub content: Box<T>,
}

impl<T: ?Sized, M: std::fmt::Debug> std::fmt::Debug for Descriptor<T, M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Descriptor")
            .field("module", &self.module)
            .field("name", &self.name)
            .field("id", &self.id)
            .field("texture", &self.texture)
            .field("meta", &self.meta)
            .finish_non_exhaustive()
    }
}

type Key = (String, String);

/// Descriptors of one category, keyed by `(module, name)`.
///
/// Keeps registration order for setup and an `id -> key` index for by-ID
/// lookups.
pub struct ContentTable<T: ?Sized, M = ()> {
    label: &'static str,
    entries: BTreeMap<Key, Descriptor<T, M>>,
    order: Vec<Key>,
    by_id: BTreeMap<u32, Key>,
}

impl<T: ?Sized, M> ContentTable<T, M> {
    pub(crate) fn new(label: &'static str) -> Self {
        Self {
            label,
            entries: BTreeMap::new(),
            order: Vec::new(),
            by_id: BTreeMap::new(),
        }
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn contains(&self, module: &str, name: &str) -> bool {
        self.entries
            .contains_key(&(module.to_string(), name.to_string()))
    }

    pub(crate) fn ensure_vacant(&self, module: &str, name: &str) -> Result<(), RegistryError> {
        if self.contains(module, name) {
            return Err(RegistryError::DuplicateName {
                table: self.label,
                module: module.to_string(),
                name: name.to_string(),
            });
        }
        Ok(())
    }

    pub(crate) fn insert(&mut self, descriptor: Descriptor<T, M>) -> Result<(), RegistryError> {
        self.ensure_vacant(&descriptor.module, &descriptor.name)?;
        let key = (descriptor.module.clone(), descriptor.name.clone());
        self.by_id.insert(descriptor.id, key.clone());
        self.order.push(key.clone());
        self.entries.insert(key, descriptor);
        Ok(())
    }

    pub fn get(&self, module: &str, name: &str) -> Option<&Descriptor<T, M>> {
        self.entries.get(&(module.to_string(), name.to_string()))
    }

    pub(crate) fn get_mut(&mut self, module: &str, name: &str) -> Option<&mut Descriptor<T, M>> {
        self.entries.get_mut(&(module.to_string(), name.to_string()))
    }

    /// Assigned ID, or `0` when nothing is registered under the name.
    pub fn type_of(&self, module: &str, name: &str) -> u32 {
        self.get(module, name).map_or(0, |descriptor| descriptor.id)
    }

    pub fn by_id(&self, id: u32) -> Option<&Descriptor<T, M>> {
        self.by_id.get(&id).and_then(|key| self.entries.get(key))
    }

    /// Descriptors in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Descriptor<T, M>> {
        self.order.iter().filter_map(|key| self.entries.get(key))
    }

    /// Mutable descriptors of one module, in registration order.
    pub(crate) fn module_mut<'a>(
        &'a mut self,
        module: &'a str,
    ) -> impl Iterator<Item = &'a mut Descriptor<T, M>> + 'a {
        // IDs are monotonic within a table, so ID order is registration order.
        let mut owned: Vec<_> = self
            .entries
            .iter_mut()
            .filter(|((owner, _), _)| owner == module)
            .map(|(_, descriptor)| descriptor)
            .collect();
        owned.sort_by_key(|descriptor| descriptor.id);
        owned.into_iter()
    }

    /// Removes every descriptor owned by `module`; returns how many.
    pub(crate) fn remove_module(&mut self, module: &str) -> usize {
        let before = self.entries.len();
        self.entries.retain(|(owner, _), _| owner != module);
        self.order.retain(|(owner, _)| owner != module);
        self.by_id.retain(|_, (owner, _)| owner != module);
        before - self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A hook without an ID, applied to every instance of its category.
pub struct HookEntry<T: ?Sized> {
    pub module: String,
    pub name: String,
    pub hook: Box<T>,
}

/// Hooks in registration order, unique per `(module, name)`.
pub struct HookList<T: ?Sized> {
    label: &'static str,
    entries: Vec<HookEntry<T>>,
}

impl<T: ?Sized> HookList<T> {
    pub(crate) fn new(label: &'static str) -> Self {
        Self {
            label,
            entries: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, module: &str, name: &str, hook: Box<T>) -> Result<(), RegistryError> {
        if self.get(module, name).is_some() {
            return Err(RegistryError::DuplicateName {
                table: self.label,
                module: module.to_string(),
                name: name.to_string(),
            });
        }
        self.entries.push(HookEntry {
            module: module.to_string(),
            name: name.to_string(),
            hook,
        });
        Ok(())
    }

    pub fn get(&self, module: &str, name: &str) -> Option<&T> {
        self.entries
            .iter()
            .find(|entry| entry.module == module && entry.name == name)
            .map(|entry| entry.hook.as_ref())
    }

    pub(crate) fn module_mut<'a>(
        &'a mut self,
        module: &'a str,
    ) -> impl Iterator<Item = &'a mut HookEntry<T>> + 'a {
        self.entries
            .iter_mut()
            .filter(move |entry| entry.module == module)
    }

    /// Hooks in invocation order.
    pub fn iter(&self) -> impl Iterator<Item = &HookEntry<T>> {
        self.entries.iter()
    }

    pub(crate) fn remove_module(&mut self, module: &str) -> usize {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.module != module);
        before - self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
