//! Integration tests for azure-vnet-summary
//!
//! These tests run the whole pipeline from a cached inventory or an in-memory
//! source through to the files on disk.

use azure_vnet_summary::azure::{read_inventory_cache, InventorySource};
use azure_vnet_summary::config::Settings;
use azure_vnet_summary::error::VnetError;
use azure_vnet_summary::models::{AddressAllocation, PeeringObservation};
use azure_vnet_summary::processing::{assemble_report, GraphOptions};
use azure_vnet_summary::{load_inventory, report_inventory};
use std::path::{Path, PathBuf};
use std::sync::Arc;

const CACHE_01: &str = "src/tests/test_data/inventory_test_cache_01.json";

fn settings(output_dir: &Path) -> Settings {
    Settings {
        output_dir: output_dir.to_path_buf(),
        cache_file: Some(PathBuf::from(CACHE_01)),
        no_render: true,
        ..Default::default()
    }
}

fn vnet_id(name: &str) -> String {
    format!("/subscriptions/sub-1/resourceGroups/rg/providers/Microsoft.Network/virtualNetworks/{name}")
}

#[test]
fn test_report_from_cache() {
    let inventory = read_inventory_cache(Path::new(CACHE_01)).expect("Failed to read cache");
    let report = assemble_report(inventory, GraphOptions::default());

    let collided: Vec<&str> = report.collisions.iter().map(|a| a.vnet_name.as_str()).collect();
    assert_eq!(collided, vec!["hub-vnet", "lab-vnet"]);

    assert_eq!(report.overlaps.len(), 1);
    assert_eq!(report.overlaps[0].first.vnet_name, "app-vnet");
    assert_eq!(report.overlaps[0].second.vnet_name, "test-vnet");

    assert_eq!(report.edges.len(), 2);
    assert_eq!(report.edges[0].endpoint_a, "hub-vnet (10.0.0.0/16)");
    assert_eq!(report.edges[0].endpoint_b, "app-vnet (10.1.0.0/16)");
    assert_eq!(report.edges[1].endpoint_b, "partner-vnet (Unknown)");
    assert_eq!(report.edges[1].color, "blue");
    assert!(report.diagnostics.is_empty());
}

#[tokio::test]
async fn test_full_workflow_writes_files() {
    let dir = tempfile::tempdir().unwrap();
    let mut settings = settings(dir.path());
    settings.label_state = true;

    // source is never asked when a cache file is given
    let source: Arc<dyn InventorySource> = Arc::new(StaticSource::default());
    let inventory = load_inventory(&settings, source).await.expect("load");
    let report = report_inventory(inventory, &settings);
    assert!(report.diagnostics.is_empty(), "{:?}", report.diagnostics);

    let all = std::fs::read_to_string(dir.path().join("all_vnets.csv")).unwrap();
    assert!(all.starts_with("CIDR,VNET,ResourceGroup,SubscriptionId\n"));
    assert_eq!(all.lines().count(), 6);

    let collisions = std::fs::read_to_string(dir.path().join("colliding_vnets.csv")).unwrap();
    let lines: Vec<&str> = collisions.lines().collect();
    assert_eq!(
        lines,
        vec![
            "CIDR,VNET,ResourceGroup,SubscriptionId",
            "10.0.0.0/16,hub-vnet,net-rg,sub-1",
            "10.0.0.0/16,lab-vnet,lab-rg,sub-3",
        ]
    );

    let peerings = std::fs::read_to_string(dir.path().join("vnet_peerings.csv")).unwrap();
    assert!(peerings.contains("dmz-vnet,192.168.0.0/24,net-rg,partner-vnet,Unknown,Initiated"));

    let dot = std::fs::read_to_string(dir.path().join("vnet_peering_diagram.dot")).unwrap();
    assert_eq!(dot.matches(" -- ").count(), 2);
    assert!(dot.contains("label=\"Initiated\""));
}

#[tokio::test]
async fn test_missing_cache_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let mut settings = settings(dir.path());
    settings.cache_file = Some(PathBuf::from("src/tests/test_data/does_not_exist.json"));
    let source: Arc<dyn InventorySource> = Arc::new(StaticSource::default());
    assert!(load_inventory(&settings, source).await.is_err());
}

/// In-memory source: sub-1 and sub-2 peer with each other, sub-x is denied.
#[derive(Default)]
struct StaticSource;

impl InventorySource for StaticSource {
    fn list_subscriptions(&self) -> Result<Vec<String>, VnetError> {
        Ok(vec!["sub-1".to_string(), "sub-x".to_string(), "sub-2".to_string()])
    }

    fn list_allocations(&self, subscription_id: &str) -> Result<Vec<AddressAllocation>, VnetError> {
        match subscription_id {
            "sub-1" => Ok(vec![AddressAllocation::new("10.0.0.0/16", "A", "rg", "sub-1")]),
            "sub-2" => Ok(vec![
                AddressAllocation::new("10.0.0.0/16", "B", "rg", "sub-2"),
                AddressAllocation::new("10.9.0.0/16", "B", "rg", "sub-2"),
            ]),
            _ => Err(VnetError::AccessDenied {
                subscription_id: subscription_id.to_string(),
                message: "AuthorizationFailed".to_string(),
            }),
        }
    }

    fn list_peerings(&self, subscription_id: &str) -> Result<Vec<PeeringObservation>, VnetError> {
        let (source, target, cidr) = match subscription_id {
            "sub-1" => ("A", "B", "10.0.0.0/16"),
            _ => ("B", "A", "10.0.0.0/16, 10.9.0.0/16"),
        };
        Ok(vec![PeeringObservation {
            source_vnet: source.to_string(),
            source_cidr: cidr.to_string(),
            source_resource_group: "rg".to_string(),
            target_vnet_id: vnet_id(target),
            peering_state: "Connected".to_string(),
        }])
    }
}

#[tokio::test]
async fn test_restricted_run_with_denied_subscription() {
    let dir = tempfile::tempdir().unwrap();
    let settings = Settings {
        subscription_ids: vec!["sub-1".to_string(), "sub-x".to_string(), "sub-2".to_string()],
        output_dir: dir.path().to_path_buf(),
        no_render: true,
        workers: 2,
        ..Default::default()
    };

    let source: Arc<dyn InventorySource> = Arc::new(StaticSource);
    let inventory = load_inventory(&settings, source).await.expect("load");
    assert_eq!(inventory.failed_subscriptions, vec!["sub-x".to_string()]);

    let report = report_inventory(inventory, &settings);
    assert_eq!(report.allocations.len(), 3);
    assert_eq!(report.collisions.len(), 2);
    assert_eq!(report.edges.len(), 1);
    assert_eq!(report.edges[0].endpoint_b, "B (10.0.0.0/16)");
    assert_eq!(report.diagnostics.len(), 1);
    assert!(matches!(report.diagnostics[0], VnetError::AccessDenied { .. }));
    assert!(dir.path().join("colliding_vnets.csv").exists());
}
