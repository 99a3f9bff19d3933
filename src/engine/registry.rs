//! Component Registry - Index allocation for the engine arrays.
//!
//! Manages the lifecycle of component indices:
//! - ID ↔ Index bidirectional mapping
//! - Free index pool for reuse
//! - Parent context stack for nested component creation
//! - Destroy callbacks (control flow and loaders hang their cleanup here)

use std::cell::RefCell;
use std::collections::{BTreeSet, HashMap};

use super::arrays;

// =============================================================================
// Registry State
// =============================================================================

thread_local! {
    /// Map component ID to array index.
    static ID_TO_INDEX: RefCell<HashMap<String, usize>> = RefCell::new(HashMap::new());

    /// Map array index to component ID.
    static INDEX_TO_ID: RefCell<HashMap<usize, String>> = RefCell::new(HashMap::new());

    /// Currently allocated indices.
    static ALLOCATED_INDICES: RefCell<BTreeSet<usize>> = RefCell::new(BTreeSet::new());

    /// Pool of freed indices for reuse.
    static FREE_INDICES: RefCell<Vec<usize>> = RefCell::new(Vec::new());

    /// Next index to allocate if pool is empty.
    static NEXT_INDEX: RefCell<usize> = const { RefCell::new(0) };

    /// Counter for generating unique IDs.
    static ID_COUNTER: RefCell<usize> = const { RefCell::new(0) };

    /// Stack of parent indices for nested component creation.
    static PARENT_STACK: RefCell<Vec<usize>> = RefCell::new(Vec::new());

    /// Destroy callbacks registered per index.
    static DESTROY_CALLBACKS: RefCell<HashMap<usize, Vec<Box<dyn FnOnce()>>>> = RefCell::new(HashMap::new());
}

// =============================================================================
// Parent Context Stack
// =============================================================================

/// Get current parent index (None at root).
pub fn get_current_parent_index() -> Option<usize> {
    PARENT_STACK.with(|stack| stack.borrow().last().copied())
}

/// Push a parent index onto the stack.
pub fn push_parent_context(index: usize) {
    PARENT_STACK.with(|stack| stack.borrow_mut().push(index))
}

/// Pop a parent index from the stack.
pub fn pop_parent_context() {
    PARENT_STACK.with(|stack| {
        stack.borrow_mut().pop();
    })
}

/// Current depth of the parent stack.
pub fn parent_context_depth() -> usize {
    PARENT_STACK.with(|stack| stack.borrow().len())
}

/// Drop every parent pushed above `depth`.
///
/// Used after a child render unwound midway and left its pushes behind.
pub fn truncate_parent_context(depth: usize) {
    PARENT_STACK.with(|stack| stack.borrow_mut().truncate(depth))
}

// =============================================================================
// Index Allocation
// =============================================================================

/// Allocate an index for a new component.
///
/// If `id` is already allocated, its existing index is returned.
/// The new index is attached to the current parent (or becomes a root).
pub fn allocate_index(id: Option<&str>) -> usize {
    let component_id = match id {
        Some(id) => id.to_string(),
        None => ID_COUNTER.with(|counter| {
            let mut counter = counter.borrow_mut();
            let id = format!("c{}", *counter);
            *counter += 1;
            id
        }),
    };

    let existing = ID_TO_INDEX.with(|map| map.borrow().get(&component_id).copied());
    if let Some(index) = existing {
        return index;
    }

    let index = FREE_INDICES.with(|free| {
        free.borrow_mut().pop().unwrap_or_else(|| {
            NEXT_INDEX.with(|next| {
                let mut next = next.borrow_mut();
                let index = *next;
                *next += 1;
                index
            })
        })
    });

    ID_TO_INDEX.with(|map| {
        map.borrow_mut().insert(component_id.clone(), index);
    });
    INDEX_TO_ID.with(|map| {
        map.borrow_mut().insert(index, component_id);
    });
    ALLOCATED_INDICES.with(|set| {
        set.borrow_mut().insert(index);
    });

    arrays::ensure_capacity(index);
    arrays::attach(index, get_current_parent_index());

    index
}

/// Release an index back to the pool.
///
/// Releases all children first (depth first), then runs the index's destroy
/// callbacks. Releasing an index that is not allocated is a no-op.
pub fn release_index(index: usize) {
    let id = INDEX_TO_ID.with(|map| map.borrow().get(&index).cloned());
    let Some(id) = id else { return };

    for child in arrays::children_of(index) {
        release_index(child);
    }

    run_destroy_callbacks(index);

    // A destroy callback may have released this index already.
    if !is_allocated(index) {
        return;
    }

    ID_TO_INDEX.with(|map| {
        map.borrow_mut().remove(&id);
    });
    INDEX_TO_ID.with(|map| {
        map.borrow_mut().remove(&index);
    });
    ALLOCATED_INDICES.with(|set| {
        set.borrow_mut().remove(&index);
    });

    arrays::detach(index);
    arrays::clear_at_index(index);

    FREE_INDICES.with(|free| free.borrow_mut().push(index));
}

/// Release every child of `index`, keeping `index` itself.
pub fn release_children(index: usize) {
    for child in arrays::children_of(index) {
        release_index(child);
    }
}

// =============================================================================
// Destroy Callbacks
// =============================================================================

/// Register a callback to run when the component at `index` is destroyed.
pub fn on_destroy(index: usize, callback: impl FnOnce() + 'static) {
    DESTROY_CALLBACKS.with(|callbacks| {
        callbacks
            .borrow_mut()
            .entry(index)
            .or_default()
            .push(Box::new(callback));
    });
}

fn run_destroy_callbacks(index: usize) {
    let callbacks = DESTROY_CALLBACKS.with(|callbacks| callbacks.borrow_mut().remove(&index));
    if let Some(callbacks) = callbacks {
        for callback in callbacks {
            callback();
        }
    }
}

// =============================================================================
// Lookups
// =============================================================================

/// Get index for a component ID.
pub fn get_index(id: &str) -> Option<usize> {
    ID_TO_INDEX.with(|map| map.borrow().get(id).copied())
}

/// Get ID for an index.
pub fn get_id(index: usize) -> Option<String> {
    INDEX_TO_ID.with(|map| map.borrow().get(&index).cloned())
}

pub fn is_allocated(index: usize) -> bool {
    ALLOCATED_INDICES.with(|set| set.borrow().contains(&index))
}

pub fn get_allocated_count() -> usize {
    ALLOCATED_INDICES.with(|set| set.borrow().len())
}

// =============================================================================
// Reset (for testing)
// =============================================================================

/// Reset all registry state.
pub fn reset_registry() {
    ID_TO_INDEX.with(|map| map.borrow_mut().clear());
    INDEX_TO_ID.with(|map| map.borrow_mut().clear());
    ALLOCATED_INDICES.with(|set| set.borrow_mut().clear());
    FREE_INDICES.with(|free| free.borrow_mut().clear());
    NEXT_INDEX.with(|next| *next.borrow_mut() = 0);
    ID_COUNTER.with(|counter| *counter.borrow_mut() = 0);
    PARENT_STACK.with(|stack| stack.borrow_mut().clear());
    DESTROY_CALLBACKS.with(|callbacks| callbacks.borrow_mut().clear());
    arrays::reset_arrays();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_allocate_index() {
        reset_registry();

        let idx1 = allocate_index(None);
        let idx2 = allocate_index(None);
        let idx3 = allocate_index(Some("hero"));

        assert_eq!((idx1, idx2, idx3), (0, 1, 2));
        assert!(is_allocated(2));
        assert!(!is_allocated(3));
        assert_eq!(get_allocated_count(), 3);
        assert_eq!(arrays::root_indices(), vec![0, 1, 2]);
    }

    #[test]
    fn test_same_id_returns_same_index() {
        reset_registry();

        let first = allocate_index(Some("footer"));
        let second = allocate_index(Some("footer"));
        assert_eq!(first, second);
        assert_eq!(get_index("footer"), Some(first));
        assert_eq!(get_id(first).as_deref(), Some("footer"));
    }

    #[test]
    fn test_release_and_reuse() {
        reset_registry();

        let idx1 = allocate_index(None);
        let idx2 = allocate_index(None);

        release_index(idx1);
        assert!(!is_allocated(idx1));
        assert!(is_allocated(idx2));

        let idx3 = allocate_index(None);
        assert_eq!(idx3, idx1, "freed index should be reused");
    }

    #[test]
    fn test_children_follow_parent_context() {
        reset_registry();

        let parent = allocate_index(Some("parent"));
        push_parent_context(parent);
        let a = allocate_index(None);
        let b = allocate_index(None);
        pop_parent_context();

        assert_eq!(arrays::children_of(parent), vec![a, b]);
        assert_eq!(arrays::parent_of(a), Some(parent));
        assert_eq!(arrays::root_indices(), vec![parent]);
    }

    #[test]
    fn test_release_is_recursive() {
        reset_registry();

        let parent = allocate_index(None);
        push_parent_context(parent);
        let child = allocate_index(None);
        push_parent_context(child);
        let grandchild = allocate_index(None);
        pop_parent_context();
        pop_parent_context();

        release_index(parent);
        assert!(!is_allocated(child));
        assert!(!is_allocated(grandchild));
        assert_eq!(get_allocated_count(), 0);
    }

    #[test]
    fn test_release_children_keeps_parent() {
        reset_registry();

        let parent = allocate_index(None);
        push_parent_context(parent);
        allocate_index(None);
        allocate_index(None);
        pop_parent_context();

        release_children(parent);
        assert!(is_allocated(parent));
        assert!(arrays::children_of(parent).is_empty());
    }

    #[test]
    fn test_truncate_parent_context() {
        reset_registry();

        push_parent_context(1);
        let depth = parent_context_depth();
        push_parent_context(2);
        push_parent_context(3);

        truncate_parent_context(depth);
        assert_eq!(get_current_parent_index(), Some(1));
    }

    #[test]
    fn test_destroy_callback_runs_once() {
        reset_registry();

        let calls = Rc::new(Cell::new(0));
        let calls_clone = calls.clone();

        let idx = allocate_index(None);
        on_destroy(idx, move || calls_clone.set(calls_clone.get() + 1));

        release_index(idx);
        release_index(idx);
        assert_eq!(calls.get(), 1);
    }
}
