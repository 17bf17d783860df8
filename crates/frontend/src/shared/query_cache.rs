//! Реактивная обёртка над `QueryCache` для страниц.
//!
//! Страница подписывается на [`QueryClient::epoch_for`] своего ресурса
//! внутри `Effect` и перезапрашивает данные после инвалидации этого корня.
//! Скрытые вкладки остаются смонтированными, поэтому у каждого корня свой
//! сигнал: сброс `users` не перезапускает списки споров. Само содержимое
//! кэша читается без подписки.

use std::any::Any;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use contracts::shared::api_error::ApiError;
use contracts::shared::query_cache::{QueryCache, QueryKey};
use leptos::prelude::*;

type CachedValue = Arc<dyn Any + Send + Sync>;

#[derive(Clone, Copy)]
pub struct QueryClient {
    cache: StoredValue<QueryCache<CachedValue>>,
    epochs: StoredValue<HashMap<String, RwSignal<u64>>>,
    /// Владелец сигналов эпох: создаются лениво, но живут столько же, сколько клиент
    owner: StoredValue<Option<Owner>>,
}

impl QueryClient {
    pub fn new() -> Self {
        Self {
            cache: StoredValue::new(QueryCache::new()),
            epochs: StoredValue::new(HashMap::new()),
            owner: StoredValue::new(Owner::current()),
        }
    }

    fn epoch_signal(&self, root: &str) -> RwSignal<u64> {
        if let Some(signal) = self.epochs.with_value(|m| m.get(root).copied()) {
            return signal;
        }
        let initial = self.cache.with_value(|c| c.epoch_of(root));
        let signal = match self.owner.get_value() {
            Some(owner) => owner.with(|| RwSignal::new(initial)),
            None => RwSignal::new(initial),
        };
        self.epochs.update_value(|m| {
            m.insert(root.to_string(), signal);
        });
        signal
    }

    /// Реактивно: меняется после инвалидации ключей под корнем `root`
    pub fn epoch_for(&self, root: &QueryKey) -> u64 {
        match root.root_segment() {
            Some(segment) => self.epoch_signal(segment).get(),
            None => 0,
        }
    }

    /// Последнее сохранённое значение
    pub fn peek<T: Clone + 'static>(&self, key: &QueryKey) -> Option<T> {
        self.cache
            .with_value(|c| c.get(key))
            .and_then(|v| v.downcast_ref::<T>().cloned())
    }

    /// Выполняет запрос и кладёт результат в кэш.
    ///
    /// `None`, если за время запроса по тому же ключу стартовал более новый
    /// или ключ был инвалидирован: такой ответ отбрасывается.
    pub async fn fetch<T, Fut>(&self, key: QueryKey, request: Fut) -> Option<Result<T, ApiError>>
    where
        T: Clone + Send + Sync + 'static,
        Fut: Future<Output = Result<T, ApiError>>,
    {
        let ticket = self.cache.try_update_value(|c| c.begin(key.clone()))?;
        let result = request.await;

        let accepted = match &result {
            Ok(value) => {
                let stored: CachedValue = Arc::new(value.clone());
                self.cache.try_update_value(|c| c.complete(&ticket, stored))
            }
            Err(e) => self.cache.try_update_value(|c| c.fail(&ticket, e.to_string())),
        }
        .unwrap_or(false);

        if accepted {
            Some(result)
        } else {
            log::debug!("Dropped stale response for {}", key);
            None
        }
    }

    /// Сбрасывает все ключи под `prefix`; перезапрашивают только страницы,
    /// подписанные на его корень
    pub fn invalidate(&self, prefix: &QueryKey) {
        let Some(root) = prefix.root_segment() else {
            return;
        };
        let Some((removed, epoch)) = self
            .cache
            .try_update_value(|c| (c.invalidate_prefix(prefix), c.epoch_of(root)))
        else {
            return;
        };
        log::debug!("Invalidated {} cached queries under {}", removed, prefix);
        self.epoch_signal(root).set(epoch);
    }
}

impl Default for QueryClient {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_query_client() -> QueryClient {
    use_context::<QueryClient>().expect("QueryClient not provided")
}
