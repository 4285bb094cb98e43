use crate::list_state::{EditTracker, HasId};

/// The in-memory copy of one child list together with its edit state. Items are kept newest
/// first, the same order the store returns them in.
#[derive(Clone, Debug)]
pub struct CrudList<T: HasId> {
    items: Vec<T>,
    pub edit: EditTracker<T::Id>,
    pub loading: bool,
}

impl<T: HasId> CrudList<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items,
            edit: EditTracker::new(),
            loading: false,
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: T::Id) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn add_item(&mut self, item: T) {
        self.items.insert(0, item);
    }

    /// Replaces the item with the same id. Returns `false` if there was none.
    pub fn update_item(&mut self, item: T) -> bool {
        let id = item.id();
        match self.items.iter_mut().find(|existing| existing.id() == id) {
            Some(existing) => {
                *existing = item;
                true
            }
            None => false,
        }
    }

    pub fn remove_item(&mut self, id: T::Id) -> Option<T> {
        let pos = self.items.iter().position(|item| item.id() == id)?;
        Some(self.items.remove(pos))
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }
}
