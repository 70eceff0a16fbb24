//! Кеш оброблених запитів для веб-сервера.
//!
//! Ключ: сирий текст запиту, значення: список відібраних слів.
//! Загальне блокування береться тільки для пошуку комірки ключа; обчислення йде вже
//! без нього, тому різні ключі обробляються паралельно, а один ключ обчислюється не більше одного разу.

use once_cell::sync::OnceCell;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

type Slot = Arc<OnceCell<Vec<String>>>;

pub struct QueryCache {
    inner: Mutex<CacheInner>,
}

struct CacheInner {
    entries: HashMap<String, Slot>,
    // Від найстарішого до найновішого використання
    order: Vec<String>,
    capacity: usize,
}

impl CacheInner {
    fn touch(&mut self, query: &str) {
        if let Some(pos) = self.order.iter().position(|k| k == query) {
            let key = self.order.remove(pos);
            self.order.push(key);
        }
    }

    /// Повертає комірку ключа, створюючи її за потреби
    fn slot(&mut self, query: &str) -> Slot {
        if let Some(slot) = self.entries.get(query).cloned() {
            self.touch(query);
            return slot;
        }

        let slot = Slot::default();
        if self.capacity == 0 {
            return slot;
        }
        while self.entries.len() >= self.capacity && !self.order.is_empty() {
            let oldest = self.order.remove(0);
            self.entries.remove(&oldest);
        }
        self.order.push(query.to_string());
        self.entries.insert(query.to_string(), Arc::clone(&slot));
        slot
    }

    fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }
}

impl QueryCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Mutex::new(CacheInner {
                entries: HashMap::with_capacity(capacity),
                order: Vec::with_capacity(capacity),
                capacity,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, CacheInner> {
        match self.inner.lock() {
            Ok(inner) => inner,
            Err(poisoned) => {
                tracing::warn!("Кеш запитів пошкоджено, очищуємо");
                let mut inner = poisoned.into_inner();
                inner.clear();
                inner
            }
        }
    }

    /// Готове значення; ключ, що ще обчислюється, вважається відсутнім
    pub fn get(&self, query: &str) -> Option<Vec<String>> {
        let mut inner = self.lock();
        let value = inner.entries.get(query)?.get().cloned()?;
        inner.touch(query);
        Some(value)
    }

    /// Повертає збережене значення або обчислює його.
    /// Паралельні виклики з тим самим ключем чекають на одне обчислення
    pub fn get_or_compute<F>(&self, query: &str, compute: F) -> Vec<String>
    where
        F: FnOnce() -> Vec<String>,
    {
        let slot = self.lock().slot(query);
        slot.get_or_init(compute).clone()
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.lock().capacity
    }

    pub fn clear(&self) {
        self.lock().clear();
    }
}
