//! Inventory data source and the bounded per-subscription fetch pool.

use crate::error::VnetError;
use crate::models::{AddressAllocation, Inventory, PeeringObservation, SubscriptionInventory};
use futures::stream::{self, StreamExt};
use std::sync::Arc;

/// Where raw inventory records come from.
///
/// Calls block; [`collect_inventory`] moves them onto the blocking pool.
pub trait InventorySource: Send + Sync {
    /// All subscriptions the caller can enumerate.
    fn list_subscriptions(&self) -> Result<Vec<String>, VnetError>;

    /// One allocation per (VNet, prefix) in the subscription.
    fn list_allocations(&self, subscription_id: &str) -> Result<Vec<AddressAllocation>, VnetError>;

    /// One observation per peering per source VNet in the subscription.
    fn list_peerings(&self, subscription_id: &str) -> Result<Vec<PeeringObservation>, VnetError>;

    /// Both of the above. Override when one call can answer both.
    fn fetch_subscription(&self, subscription_id: &str) -> Result<SubscriptionInventory, VnetError> {
        Ok(SubscriptionInventory {
            allocations: self.list_allocations(subscription_id)?,
            peerings: self.list_peerings(subscription_id)?,
            diagnostics: vec![],
        })
    }
}

/// The explicit list if one was given, otherwise whatever the source lists.
/// A failed listing yields no subscriptions plus the error.
pub async fn resolve_subscriptions(
    source: Arc<dyn InventorySource>,
    requested: &[String],
) -> (Vec<String>, Option<VnetError>) {
    if !requested.is_empty() {
        log::info!("Reviewing specified subscriptions: {:?}", requested);
        return (requested.to_vec(), None);
    }

    let listed = tokio::task::spawn_blocking(move || source.list_subscriptions())
        .await
        .unwrap_or_else(|e| {
            Err(VnetError::TransientApi {
                subscription_id: "*".to_string(),
                message: format!("subscription listing task failed: {e}"),
            })
        });
    match listed {
        Ok(ids) => (ids, None),
        Err(e) => (vec![], Some(e)),
    }
}

/// Fetch every subscription with at most `workers` requests in flight.
///
/// Results are merged in `subscription_ids` order. A subscription that fails
/// is recorded in `failed_subscriptions` and contributes nothing.
pub async fn collect_inventory(
    source: Arc<dyn InventorySource>,
    subscription_ids: &[String],
    workers: usize,
) -> Inventory {
    let results: Vec<(String, Result<SubscriptionInventory, VnetError>)> =
        stream::iter(subscription_ids.iter().cloned())
            .map(|subscription_id| {
                let source = Arc::clone(&source);
                async move {
                    let task_id = subscription_id.clone();
                    let result =
                        tokio::task::spawn_blocking(move || source.fetch_subscription(&task_id))
                            .await
                            .unwrap_or_else(|e| {
                                Err(VnetError::TransientApi {
                                    subscription_id: subscription_id.clone(),
                                    message: format!("fetch task failed: {e}"),
                                })
                            });
                    (subscription_id, result)
                }
            })
            .buffered(workers.max(1))
            .collect()
            .await;

    let mut inventory = Inventory::default();
    for (subscription_id, result) in results {
        match result {
            Ok(part) => inventory.extend(part),
            Err(e) => inventory.add_failure(subscription_id, e),
        }
    }
    inventory
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// Three readable subscriptions, one denied, one flaky.
    #[derive(Default)]
    struct FakeSource {
        in_flight: AtomicUsize,
        max_in_flight: AtomicUsize,
    }

    impl InventorySource for FakeSource {
        fn list_subscriptions(&self) -> Result<Vec<String>, VnetError> {
            Ok(["s1", "denied", "s2", "flaky", "s3"]
                .iter()
                .map(|s| s.to_string())
                .collect())
        }

        fn list_allocations(&self, subscription_id: &str) -> Result<Vec<AddressAllocation>, VnetError> {
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_in_flight.fetch_max(now, Ordering::SeqCst);
            std::thread::sleep(Duration::from_millis(20));
            self.in_flight.fetch_sub(1, Ordering::SeqCst);

            match subscription_id {
                "denied" => Err(VnetError::AccessDenied {
                    subscription_id: subscription_id.to_string(),
                    message: "AuthorizationFailed".to_string(),
                }),
                "flaky" => Err(VnetError::TransientApi {
                    subscription_id: subscription_id.to_string(),
                    message: "timeout".to_string(),
                }),
                _ => Ok(vec![AddressAllocation::new(
                    "10.0.0.0/16",
                    format!("vnet-{subscription_id}"),
                    "rg",
                    subscription_id,
                )]),
            }
        }

        fn list_peerings(&self, _subscription_id: &str) -> Result<Vec<PeeringObservation>, VnetError> {
            Ok(vec![])
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_collect_inventory_tolerates_failures() {
        let source: Arc<dyn InventorySource> = Arc::new(FakeSource::default());
        let (ids, err) = resolve_subscriptions(Arc::clone(&source), &[]).await;
        assert!(err.is_none());
        assert_eq!(ids.len(), 5);

        let inventory = collect_inventory(source, &ids, 2).await;
        let subs: Vec<&str> = inventory
            .allocations
            .iter()
            .map(|a| a.subscription_id.as_str())
            .collect();
        assert_eq!(subs, vec!["s1", "s2", "s3"]);
        assert_eq!(
            inventory.failed_subscriptions,
            vec!["denied".to_string(), "flaky".to_string()]
        );
        assert!(matches!(
            inventory.diagnostics[0],
            VnetError::AccessDenied { .. }
        ));
        assert!(matches!(
            inventory.diagnostics[1],
            VnetError::TransientApi { .. }
        ));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_collect_inventory_is_bounded() {
        let fake = Arc::new(FakeSource::default());
        let source: Arc<dyn InventorySource> = fake.clone();
        let ids: Vec<String> = (0..12).map(|i| format!("s{i}")).collect();
        let inventory = collect_inventory(source, &ids, 3).await;
        assert_eq!(inventory.allocations.len(), 12);
        assert!(fake.max_in_flight.load(Ordering::SeqCst) <= 3);
    }

    #[tokio::test]
    async fn test_resolve_explicit_subscriptions() {
        let source: Arc<dyn InventorySource> = Arc::new(FakeSource::default());
        let requested = vec!["only-this".to_string()];
        let (ids, err) = resolve_subscriptions(source, &requested).await;
        assert_eq!(ids, requested);
        assert!(err.is_none());
    }

    #[tokio::test]
    async fn test_collect_nothing() {
        let source: Arc<dyn InventorySource> = Arc::new(FakeSource::default());
        let inventory = collect_inventory(source, &[], 4).await;
        assert!(inventory.is_empty());
        assert!(inventory.failed_subscriptions.is_empty());
    }
}
