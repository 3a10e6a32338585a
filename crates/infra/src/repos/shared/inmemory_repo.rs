use event_notifier_domain::{Entity, ID};
use std::sync::Mutex;

/// Useful functions for creating inmemory repositories

/// Replaces the entity with the same id or inserts it if there is none
pub fn upsert<T: Clone + Entity>(val: &T, collection: &Mutex<Vec<T>>) {
    upsert_by(val, collection, |existing| existing.id() == val.id());
}

pub fn upsert_by<T: Clone, F: Fn(&T) -> bool>(val: &T, collection: &Mutex<Vec<T>>, is_same: F) {
    let mut collection = collection.lock().unwrap();
    match collection.iter_mut().find(|existing| is_same(existing)) {
        Some(existing) => *existing = val.clone(),
        None => collection.push(val.clone()),
    }
}

pub fn find<T: Clone + Entity>(val_id: &ID, collection: &Mutex<Vec<T>>) -> Option<T> {
    let collection = collection.lock().unwrap();
    collection.iter().find(|val| val.id() == val_id).cloned()
}

pub fn find_by<T: Clone, F: FnMut(&T) -> bool>(
    collection: &Mutex<Vec<T>>,
    mut compare: F,
) -> Vec<T> {
    let collection = collection.lock().unwrap();
    collection.iter().filter(|item| compare(item)).cloned().collect()
}

pub fn find_one_by<T: Clone, F: FnMut(&T) -> bool>(
    collection: &Mutex<Vec<T>>,
    mut compare: F,
) -> Option<T> {
    let collection = collection.lock().unwrap();
    collection.iter().find(|item| compare(item)).cloned()
}
