//! Local executor for the page's async work.
//!
//! The scene fetch and post-mount checks are spawned here. Tasks only make
//! progress when [`run_until_stalled`] is called, which the mount tick does
//! before every frame.

use std::cell::RefCell;
use std::future::Future;

use futures::executor::{LocalPool, LocalSpawner};
use futures::task::LocalSpawnExt;

use crate::error::{FolioError, FolioResult};

struct Executor {
    pool: RefCell<LocalPool>,
    /// Kept outside the RefCell so tasks can spawn while the pool runs.
    spawner: LocalSpawner,
}

thread_local! {
    static EXECUTOR: Executor = {
        let pool = LocalPool::new();
        let spawner = pool.spawner();
        Executor {
            pool: RefCell::new(pool),
            spawner,
        }
    };
}

/// Spawn a future onto the thread-local pool.
pub fn spawn_local(future: impl Future<Output = ()> + 'static) -> FolioResult<()> {
    EXECUTOR.with(|executor| {
        executor
            .spawner
            .spawn_local(future)
            .map_err(|e| FolioError::Spawn(e.to_string()))
    })
}

/// Run every ready task until none can make progress.
///
/// Returns `false` when called re-entrantly from inside a running task.
pub fn run_until_stalled() -> bool {
    EXECUTOR.with(|executor| match executor.pool.try_borrow_mut() {
        Ok(mut pool) => {
            pool.run_until_stalled();
            true
        }
        Err(_) => false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::channel::oneshot;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_spawned_task_runs_on_stall() {
        let ran = Rc::new(Cell::new(false));
        let ran_clone = ran.clone();

        spawn_local(async move { ran_clone.set(true) }).unwrap();
        assert!(!ran.get(), "tasks wait for the next turn");

        assert!(run_until_stalled());
        assert!(ran.get());
    }

    #[test]
    fn test_pending_task_resumes_after_send() {
        let (tx, rx) = oneshot::channel::<u32>();
        let seen = Rc::new(Cell::new(0));
        let seen_clone = seen.clone();

        spawn_local(async move {
            if let Ok(value) = rx.await {
                seen_clone.set(value);
            }
        })
        .unwrap();

        run_until_stalled();
        assert_eq!(seen.get(), 0);

        tx.send(9).unwrap();
        run_until_stalled();
        assert_eq!(seen.get(), 9);
    }

    #[test]
    fn test_task_can_spawn_while_running() {
        let inner_ran = Rc::new(Cell::new(false));
        let inner_clone = inner_ran.clone();

        spawn_local(async move {
            let _ = spawn_local(async move { inner_clone.set(true) });
            assert!(!run_until_stalled(), "nested drive is refused");
        })
        .unwrap();

        run_until_stalled();
        assert!(inner_ran.get());
    }
}
