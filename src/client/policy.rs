//! Blocking vs non-blocking fetches.
//!
//! Primary content (the record a page exists to show) is fetched with
//! [`fetch_primary`] and its failure decides the page state. Decorative data
//! (social links, badge counts, carousels) is fetched with [`fetch_secondary`]
//! and degrades to `T::default()` instead of failing the page.

use super::error::FetchError;
use std::future::Future;
use tracing::{debug, warn};

pub async fn fetch_primary<T, F>(label: &str, fetch: F) -> Result<T, FetchError>
where
    F: Future<Output = Result<T, FetchError>>,
{
    fetch.await.inspect_err(|err| {
        debug!("Primary fetch '{}' failed: {} (status {:?})", label, err, err.status);
    })
}

pub async fn fetch_secondary<T, F>(label: &str, fetch: F) -> T
where
    T: Default,
    F: Future<Output = Result<T, FetchError>>,
{
    match fetch.await {
        Ok(value) => value,
        Err(err) => {
            warn!("Optional fetch '{}' failed, using default: {}", label, err);
            T::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failure(status: u16) -> FetchError {
        FetchError::from_response(status, String::new())
    }

    #[test]
    fn test_secondary_failure_degrades_to_default() {
        let count: usize = tokio_test::block_on(fetch_secondary("badge", async {
            Err::<usize, _>(failure(500))
        }));
        assert_eq!(count, 0);

        let links: Vec<String> = tokio_test::block_on(fetch_secondary("links", async {
            Err::<Vec<String>, _>(failure(404))
        }));
        assert!(links.is_empty());
    }

    #[test]
    fn test_secondary_success_passes_through() {
        let count = tokio_test::block_on(fetch_secondary("badge", async { Ok::<usize, FetchError>(3) }));
        assert_eq!(count, 3);
    }

    #[test]
    fn test_primary_failure_propagates() {
        let result = tokio_test::block_on(fetch_primary("service", async {
            Err::<String, _>(failure(404))
        }));
        assert_eq!(result.unwrap_err().status, Some(404));
    }
}
