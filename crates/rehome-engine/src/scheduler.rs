//! Bounded fan-out over per-item translation tasks.

use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::sync::Arc;

use rehome_model::ItemId;
use tokio::sync::Semaphore;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::{Id, JoinError, JoinSet};
use tracing::{debug, warn};

use crate::EngineContext;
use crate::error::EngineResult;
use crate::outcome::{TranslationFailure, TranslationSuccess};
use crate::worker;

/// The two completion-ordered outcome streams of one run.
///
/// Each submitted item produces exactly one report across the two
/// streams. Both close once the last translation task has finished.
#[derive(Debug)]
pub struct TranslationStreams {
    /// Items that reached the destination directory.
    pub successes: UnboundedReceiver<TranslationSuccess>,
    /// Items that failed without affecting their siblings.
    pub failures: UnboundedReceiver<TranslationFailure>,
}

/// Schedule every item for translation and return the outcome streams.
///
/// One task is spawned per item, admitted under a semaphore permit that
/// is acquired before the task starts and released when it finishes,
/// whether it returns or unwinds. A panicking task is converted into
/// that item's failure report. Tasks are not ordered relative to each
/// other and there is no mid-batch cancellation.
#[must_use]
pub fn run(context: Arc<EngineContext>, items: Vec<(ItemId, Vec<u8>)>) -> TranslationStreams {
    let (success_tx, successes) = mpsc::unbounded_channel();
    let (failure_tx, failures) = mpsc::unbounded_channel();
    let limit = admission_limit(&context);
    let task = Arc::new(move |item_id: &ItemId, embedded: &[u8]| {
        worker::translate_item(&context, item_id, embedded)
    });
    tokio::spawn(fan_out(limit, items, task, success_tx, failure_tx));
    TranslationStreams {
        successes,
        failures,
    }
}

async fn fan_out<F>(
    limit: usize,
    items: Vec<(ItemId, Vec<u8>)>,
    task: Arc<F>,
    success_tx: UnboundedSender<TranslationSuccess>,
    failure_tx: UnboundedSender<TranslationFailure>,
) where
    F: Fn(&ItemId, &[u8]) -> EngineResult<TranslationSuccess> + Send + Sync + 'static,
{
    debug!(items = items.len(), limit, "scheduling translation tasks");
    let semaphore = Arc::new(Semaphore::new(limit));
    let mut tasks: JoinSet<Result<TranslationSuccess, TranslationFailure>> = JoinSet::new();
    let mut submitted: HashMap<Id, ItemId> = HashMap::new();

    for (item_id, embedded) in items {
        let Ok(permit) = Arc::clone(&semaphore).acquire_owned().await else {
            // The semaphore is never closed while items remain.
            break;
        };
        let task = Arc::clone(&task);
        let task_item = item_id.clone();
        let handle = tasks.spawn_blocking(move || {
            let _permit = permit;
            let outcome = task(&task_item, &embedded);
            outcome.map_err(|error| TranslationFailure::from_error(task_item, &error))
        });
        submitted.insert(handle.id(), item_id);
    }

    while let Some(joined) = tasks.join_next_with_id().await {
        match joined {
            Ok((id, outcome)) => {
                submitted.remove(&id);
                match outcome {
                    Ok(success) => {
                        let _ = success_tx.send(success);
                    }
                    Err(failure) => {
                        let _ = failure_tx.send(failure);
                    }
                }
            }
            Err(join_error) => {
                let item_id = submitted.remove(&join_error.id());
                let message = panic_message(join_error);
                warn!(message = %message, "translation task panicked");
                if let Some(item_id) = item_id {
                    let _ = failure_tx.send(TranslationFailure {
                        item_id,
                        message: format!("panic while translating item: {message}"),
                    });
                }
            }
        }
    }
}

fn admission_limit(context: &EngineContext) -> usize {
    let limit = context
        .admission_limit
        .unwrap_or_else(|| std::thread::available_parallelism().map_or(1, NonZeroUsize::get) * 2);
    limit.max(1)
}

fn panic_message(error: JoinError) -> String {
    if !error.is_panic() {
        return error.to_string();
    }
    match error.into_panic().downcast::<String>() {
        Ok(text) => *text,
        Err(payload) => match payload.downcast::<&'static str>() {
            Ok(text) => (*text).to_owned(),
            Err(_) => "opaque panic payload".to_owned(),
        },
    }
}
