//! Timeout enforcement.
//!
//! # Responsibilities
//! - Wrap upstream calls with a deadline
//! - Cancel the in-flight fetch cleanly when it fires
//!
//! # Design Decisions
//! - Uses Tokio's timeout facilities
//! - Timeout errors are distinct from other errors

use std::future::Future;
use std::time::Duration;

use crate::error::ProxyError;

/// Run `fut` to completion or fail with [`ProxyError::Timeout`] after `deadline`.
pub async fn with_deadline<F, T>(deadline: Duration, fut: F) -> Result<T, ProxyError>
where
    F: Future<Output = Result<T, ProxyError>>,
{
    match tokio::time::timeout(deadline, fut).await {
        Ok(result) => result,
        Err(_) => Err(ProxyError::Timeout(deadline.as_millis() as u64)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_completes_within_deadline() {
        let value = with_deadline(Duration::from_millis(200), async { Ok::<_, ProxyError>(7) })
            .await
            .unwrap();
        assert_eq!(value, 7);
    }

    #[tokio::test]
    async fn test_deadline_fires() {
        let result = with_deadline(Duration::from_millis(20), async {
            tokio::time::sleep(Duration::from_millis(500)).await;
            Ok::<_, ProxyError>(())
        })
        .await;
        assert!(matches!(result, Err(ProxyError::Timeout(20))));
    }

    #[tokio::test]
    async fn test_inner_error_passes_through() {
        let result: Result<(), _> =
            with_deadline(Duration::from_millis(200), async { Err(ProxyError::MissingQuery) })
                .await;
        assert!(matches!(result, Err(ProxyError::MissingQuery)));
    }
}
