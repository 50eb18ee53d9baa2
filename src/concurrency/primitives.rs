//! Locks, one-shot initialisation, a condition gate and an object pool.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Condvar, Mutex, OnceLock};
use std::thread;
use std::time::Duration;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

//==============================================================================
// Counters
//==============================================================================

/// Increments a shared counter from `tasks` threads under a mutex.
pub fn count_with_mutex(tasks: usize) -> usize {
    let counter = Arc::new(Mutex::new(0usize));

    thread::scope(|s| {
        for _ in 0..tasks {
            let counter = Arc::clone(&counter);
            s.spawn(move || {
                let mut value = counter.lock().unwrap_or_else(|e| e.into_inner());
                *value += 1;
            });
        }
    });

    let total = *counter.lock().unwrap_or_else(|e| e.into_inner());
    total
}

/// Read-then-write without a lock. Updates can be lost when two threads read
/// the same value, so the result is anywhere in `1..=tasks`.
pub fn count_unlocked(tasks: usize) -> usize {
    let counter = AtomicUsize::new(0);

    thread::scope(|s| {
        for _ in 0..tasks {
            s.spawn(|| {
                let seen = counter.load(Ordering::Relaxed);
                thread::yield_now();
                counter.store(seen + 1, Ordering::Relaxed);
            });
        }
    });

    counter.load(Ordering::Relaxed)
}

//==============================================================================
// One-shot initialisation
//==============================================================================

pub struct OnceInit<T> {
    cell: OnceLock<T>,
    runs: AtomicUsize,
}

impl<T> OnceInit<T> {
    pub const fn new() -> Self {
        OnceInit {
            cell: OnceLock::new(),
            runs: AtomicUsize::new(0),
        }
    }

    pub fn get_or_init<F: FnOnce() -> T>(&self, init: F) -> &T {
        self.cell.get_or_init(|| {
            self.runs.fetch_add(1, Ordering::SeqCst);
            init()
        })
    }

    /// How many times an initialiser actually ran.
    pub fn runs(&self) -> usize {
        self.runs.load(Ordering::SeqCst)
    }
}

impl<T> Default for OnceInit<T> {
    fn default() -> Self {
        Self::new()
    }
}

//==============================================================================
// Condition gate
//==============================================================================

#[derive(Default)]
pub struct ReadyFlag {
    ready: Mutex<bool>,
    cond: Condvar,
}

impl ReadyFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn signal(&self) {
        let mut ready = self.ready.lock().unwrap_or_else(|e| e.into_inner());
        *ready = true;
        self.cond.notify_all();
    }

    pub fn wait(&self) {
        let mut ready = self.ready.lock().unwrap_or_else(|e| e.into_inner());
        while !*ready {
            ready = self.cond.wait(ready).unwrap_or_else(|e| e.into_inner());
        }
    }

    /// Returns `false` if the flag was still unset when `timeout` elapsed.
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        let ready = self.ready.lock().unwrap_or_else(|e| e.into_inner());
        let (ready, _) = self
            .cond
            .wait_timeout_while(ready, timeout, |ready| !*ready)
            .unwrap_or_else(|e| e.into_inner());
        *ready
    }
}

//==============================================================================
// Object pool
//==============================================================================

pub struct ObjectPool<T> {
    items: Mutex<Vec<T>>,
    factory: Box<dyn Fn() -> T + Send + Sync>,
    created: AtomicUsize,
}

impl<T> ObjectPool<T> {
    pub fn new<F>(factory: F) -> Self
    where
        F: Fn() -> T + Send + Sync + 'static,
    {
        ObjectPool {
            items: Mutex::new(Vec::new()),
            factory: Box::new(factory),
            created: AtomicUsize::new(0),
        }
    }

    /// Reuses a returned object when one is available.
    pub fn get(&self) -> T {
        let reused = self.items.lock().unwrap_or_else(|e| e.into_inner()).pop();
        reused.unwrap_or_else(|| {
            self.created.fetch_add(1, Ordering::Relaxed);
            (self.factory)()
        })
    }

    pub fn put(&self, item: T) {
        self.items.lock().unwrap_or_else(|e| e.into_inner()).push(item);
    }

    pub fn created(&self) -> usize {
        self.created.load(Ordering::Relaxed)
    }

    pub fn idle(&self) -> usize {
        self.items.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

//==============================================================================
// Concurrent map
//==============================================================================

/// Returns the stored value and whether it was already present.
pub fn load_or_store(map: &DashMap<String, String>, key: &str, value: &str) -> (String, bool) {
    match map.entry(key.to_string()) {
        Entry::Occupied(existing) => (existing.get().clone(), true),
        Entry::Vacant(slot) => {
            slot.insert(value.to_string());
            (value.to_string(), false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mutex_counter_is_exact() {
        assert_eq!(count_with_mutex(1000), 1000);
    }

    #[test]
    fn test_unlocked_counter_never_exceeds_tasks() {
        let total = count_unlocked(100);
        assert!(total >= 1 && total <= 100, "got {}", total);
    }

    #[test]
    fn test_once_runs_single_initialiser() {
        let once = OnceInit::new();
        thread::scope(|s| {
            for i in 0..5 {
                let once = &once;
                s.spawn(move || {
                    once.get_or_init(|| i);
                });
            }
        });
        assert_eq!(once.runs(), 1);
        assert!(once.get_or_init(|| 99) < &5);
    }

    #[test]
    fn test_ready_flag_wakes_waiter() {
        let flag = Arc::new(ReadyFlag::new());
        let waiter = {
            let flag = Arc::clone(&flag);
            thread::spawn(move || {
                flag.wait();
                "condition met"
            })
        };
        thread::sleep(Duration::from_millis(20));
        flag.signal();
        assert_eq!(waiter.join().unwrap(), "condition met");
    }

    #[test]
    fn test_ready_flag_times_out() {
        let flag = ReadyFlag::new();
        assert!(!flag.wait_timeout(Duration::from_millis(10)));
        flag.signal();
        assert!(flag.wait_timeout(Duration::from_millis(10)));
    }

    #[test]
    fn test_pool_reuses_returned_objects() {
        let pool = ObjectPool::new(|| Vec::<u8>::with_capacity(16));

        let mut buf = pool.get();
        buf.push(42);
        pool.put(buf);
        assert_eq!(pool.idle(), 1);

        let reused = pool.get();
        assert_eq!(reused, vec![42]);
        assert_eq!(pool.created(), 1);

        let _fresh = pool.get();
        assert_eq!(pool.created(), 2);
    }

    #[test]
    fn test_load_or_store() {
        let map = DashMap::new();
        map.insert("key1".to_string(), "value1".to_string());

        assert_eq!(load_or_store(&map, "key1", "other"), ("value1".to_string(), true));
        assert_eq!(load_or_store(&map, "key3", "value3"), ("value3".to_string(), false));
        assert_eq!(map.len(), 2);
    }
}
