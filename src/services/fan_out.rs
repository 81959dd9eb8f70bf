use std::future::Future;

use tracing::Instrument;

use crate::error::AppResult;

/// Runs one lookup per input concurrently and substitutes a fallback for each failure
///
/// Every lookup is spawned before any is awaited, so a slow or failing lookup
/// only costs its own slot. Results are collected in dispatch order, never
/// completion order: output `i` always corresponds to input `i`. A lookup that
/// returns an error or panics yields `fallback(&input)`. Spawned lookups stay
/// inside the caller's span.
pub async fn fan_out_with_fallback<I, T, L, Fut, F>(
    inputs: Vec<I>,
    lookup: L,
    fallback: F,
) -> Vec<T>
where
    I: Clone + Send + 'static,
    T: Send + 'static,
    L: Fn(I) -> Fut,
    Fut: Future<Output = AppResult<T>> + Send + 'static,
    F: Fn(&I) -> T,
{
    let tasks: Vec<_> = inputs
        .iter()
        .cloned()
        .map(|input| tokio::spawn(lookup(input).in_current_span()))
        .collect();

    let mut results = Vec::with_capacity(tasks.len());
    let mut fallbacks = 0usize;

    for (index, (input, task)) in inputs.iter().zip(tasks).enumerate() {
        match task.await {
            Ok(Ok(value)) => results.push(value),
            Ok(Err(e)) => {
                tracing::warn!(index, error = %e, "Lookup failed, using fallback");
                fallbacks += 1;
                results.push(fallback(input));
            }
            Err(e) => {
                tracing::error!(index, error = %e, "Lookup task join error, using fallback");
                fallbacks += 1;
                results.push(fallback(input));
            }
        }
    }

    if fallbacks > 0 {
        tracing::warn!(
            success_count = results.len() - fallbacks,
            fallback_count = fallbacks,
            "Partial lookup failure"
        );
    }

    results
}
