//! Navigation Tests: the explorer, its address bar and resolution
//!
//! These tests verify:
//! 1. Startup canonicalizes the URL and resolves it
//! 2. Every transition keeps URL and path in sync
//! 3. Only genuine navigations grow the history stack
//! 4. Back/forward goes through the same pipeline
//! 5. Stale resolutions never overwrite a newer view

mod common;

use common::{explorer, schema_backend, settle, version, Instrumented};
use futures::StreamExt;
use manifests::{FieldPath, NavigationIntent, ResolvedView, Snapshot};
use std::rc::Rc;
use std::time::Duration;
use tokio::task::LocalSet;

fn node_description(snapshot: &Snapshot) -> Option<String> {
    match snapshot.view.as_ref()? {
        ResolvedView::Node { node, .. } => node.as_ref().map(|n| n.description.clone()),
        _ => None,
    }
}

/// Test: `/` resolves the default listing and rewrites the URL
#[tokio::test(start_paused = true)]
async fn root_rewrites_to_default_listing() {
    LocalSet::new()
        .run_until(async {
            let (explorer, history) = explorer(Rc::new(schema_backend()), "/");
            explorer.initialize_from_browser_location();

            assert_eq!(history.entries(), ["/k8s-1.28/"]);
            assert!(explorer.snapshot().loading);

            settle().await;
            let snapshot = explorer.snapshot();
            assert!(!snapshot.loading);
            match snapshot.view {
                Some(ResolvedView::Listing { banner, listing }) => {
                    assert_eq!(banner[0].text, "Available resources for k8s version 1.28");
                    assert!(listing.contains("pod"));
                    assert!(listing.contains("ingress"));
                }
                other => panic!("expected listing, got {:?}", other),
            }
        })
        .await;
}

/// Test: partial URLs are healed in place
#[tokio::test(start_paused = true)]
async fn partial_url_is_canonicalized() {
    LocalSet::new()
        .run_until(async {
            let (explorer, history) = explorer(Rc::new(schema_backend()), "/pod.spec?tab=fields");
            explorer.initialize_from_browser_location();

            assert_eq!(history.entries(), ["/k8s-1.28/pod.spec"]);
            assert_eq!(explorer.draft(), "pod.spec");
        })
        .await;
}

/// Test: `/k8s-1.28/pod.spec` renders a required `[]Container`
#[tokio::test(start_paused = true)]
async fn pod_spec_renders_required_containers() {
    LocalSet::new()
        .run_until(async {
            let (explorer, _history) = explorer(Rc::new(schema_backend()), "/k8s-1.28/pod.spec");
            explorer.initialize_from_browser_location();
            settle().await;

            let path = explorer.path();
            assert_eq!(path.schema_version, Some(version("k8s-1.28")));
            assert_eq!(path.field_path.segments(), ["pod", "spec"]);

            match explorer.snapshot().view {
                Some(ResolvedView::Node { node, description, rows, .. }) => {
                    assert_eq!(node.unwrap().kind.unwrap().api_version(), "v1");
                    assert_eq!(description[0].text, "PodSpec is a description of a pod.");
                    assert_eq!(
                        description[1].more_info.as_deref(),
                        Some("https://kubernetes.io/docs/concepts/workloads/pods")
                    );

                    let containers = rows.iter().find(|r| r.name == "containers").unwrap();
                    assert_eq!(containers.type_label(), "[]Container *");
                    let restart = rows.iter().find(|r| r.name == "restartPolicy").unwrap();
                    assert_eq!(restart.type_label(), "Enum:\n  - Always\n  - OnFailure\n  - Never");
                    assert!(!restart.required);
                }
                other => panic!("expected node view, got {:?}", other),
            }
        })
        .await;
}

/// Test: schema and field changes drop the pinned resource version
#[tokio::test(start_paused = true)]
async fn transitions_clear_resource_version() {
    LocalSet::new()
        .run_until(async {
            let (explorer, history) = explorer(Rc::new(schema_backend()), "/k8s-1.28/ingress/v1beta1");
            explorer.initialize_from_browser_location();
            settle().await;
            assert_eq!(explorer.path().resource_version.as_deref(), Some("v1beta1"));
            assert_eq!(node_description(&explorer.snapshot()).as_deref(), Some("Ingress v1beta1"));

            explorer.set_schema_version(version("k8s-1.27"), NavigationIntent::Sync);
            assert_eq!(explorer.path().resource_version, None);
            assert_eq!(history.current(), "/k8s-1.27/ingress");

            explorer.set_resource_version(Some("v1beta1".into()), NavigationIntent::Sync);
            assert_eq!(history.current(), "/k8s-1.27/ingress/v1beta1");

            explorer.set_field_path(FieldPath::parse("ingress"), NavigationIntent::Sync);
            assert_eq!(explorer.path().resource_version, None);
            assert_eq!(history.current(), "/k8s-1.27/ingress");

            // Sync transitions rewrite the one entry
            assert_eq!(history.len(), 1);
        })
        .await;
}

/// Test: alternate versions are offered only when there is a choice
#[tokio::test(start_paused = true)]
async fn version_selector_needs_two_versions() {
    LocalSet::new()
        .run_until(async {
            let (explorer, _history) = explorer(Rc::new(schema_backend()), "/k8s-1.28/ingress");
            explorer.initialize_from_browser_location();
            settle().await;
            match explorer.snapshot().view {
                Some(ResolvedView::Node { alternate_versions, selected_version, .. }) => {
                    assert_eq!(alternate_versions, ["v1", "v1beta1"]);
                    assert_eq!(selected_version.as_deref(), Some("v1"));
                }
                other => panic!("expected node view, got {:?}", other),
            }

            explorer.set_field_path(FieldPath::parse("pod"), NavigationIntent::Sync);
            settle().await;
            match explorer.snapshot().view {
                Some(ResolvedView::Node { alternate_versions, selected_version, .. }) => {
                    assert!(alternate_versions.is_empty());
                    assert_eq!(selected_version, None);
                }
                other => panic!("expected node view, got {:?}", other),
            }
        })
        .await;
}

/// Test: a service error replaces the whole view
#[tokio::test(start_paused = true)]
async fn service_error_clears_node_state() {
    LocalSet::new()
        .run_until(async {
            let (explorer, _history) = explorer(Rc::new(schema_backend()), "/k8s-1.28/pod");
            explorer.initialize_from_browser_location();
            settle().await;
            assert!(node_description(&explorer.snapshot()).is_some());

            explorer.set_field_path(FieldPath::parse("secret"), NavigationIntent::Sync);
            settle().await;
            assert_eq!(
                explorer.snapshot().view,
                Some(ResolvedView::Error { message: "resource not found".into() })
            );
        })
        .await;
}

/// Test: clicking into a field pushes, back/forward follow the address bar
#[tokio::test(start_paused = true)]
async fn navigate_into_and_back_forward() {
    LocalSet::new()
        .run_until(async {
            let (explorer, history) = explorer(Rc::new(schema_backend()), "/k8s-1.28/");
            explorer.initialize_from_browser_location();
            settle().await;

            assert!(explorer.navigate_into("pod"));
            settle().await;
            assert!(explorer.navigate_into("spec"));
            settle().await;
            assert!(!explorer.navigate_into("hostname"), "leaf fields are not navigable");
            assert_eq!(history.entries(), ["/k8s-1.28/", "/k8s-1.28/pod", "/k8s-1.28/pod.spec"]);
            assert_eq!(explorer.draft(), "pod.spec");

            assert!(history.back());
            explorer.on_browser_navigated();
            assert_eq!(explorer.path().field_path.to_string(), "pod");
            assert_eq!(explorer.draft(), "pod");
            settle().await;
            assert_eq!(node_description(&explorer.snapshot()).as_deref(), Some("Pod in k8s-1.28"));

            assert!(history.forward());
            explorer.on_browser_navigated();
            settle().await;
            assert_eq!(explorer.path().field_path.to_string(), "pod.spec");
            assert_eq!(history.current(), "/k8s-1.28/pod.spec");

            // History events never add entries
            assert_eq!(history.len(), 3);
        })
        .await;
}

/// Test: a slow resolution finishing late does not overwrite a newer view
#[tokio::test(start_paused = true)]
async fn stale_resolution_is_discarded() {
    LocalSet::new()
        .run_until(async {
            let backend = Rc::new(
                Instrumented::new(schema_backend())
                    .with_node_delay("pod", Duration::from_millis(500))
                    .with_node_delay("service", Duration::from_millis(10)),
            );
            let (explorer, _history) = explorer(backend.clone(), "/k8s-1.28/pod");
            let mut changes = explorer.subscribe();

            explorer.initialize_from_browser_location();
            explorer.set_field_path(FieldPath::parse("service"), NavigationIntent::Sync);

            tokio::time::sleep(Duration::from_millis(50)).await;
            assert_eq!(node_description(&explorer.snapshot()).as_deref(), Some("Service"));

            tokio::time::sleep(Duration::from_millis(1000)).await;
            assert_eq!(node_description(&explorer.snapshot()).as_deref(), Some("Service"));
            assert_eq!(backend.calls_to("node"), ["node k8s-1.28 pod", "node k8s-1.28 service"]);

            // No published snapshot ever showed the pod
            drop(explorer);
            let mut seen = Vec::new();
            while let Ok(Some(snapshot)) = changes.try_next() {
                seen.push(snapshot);
            }
            assert!(!seen.is_empty());
            assert!(seen.iter().all(|s| node_description(s).as_deref() != Some("Pod in k8s-1.28")));
        })
        .await;
}

/// Test: unchanged paths are not resolved again
#[tokio::test(start_paused = true)]
async fn unchanged_path_skips_resolution() {
    LocalSet::new()
        .run_until(async {
            let backend = Rc::new(Instrumented::new(schema_backend()));
            let (explorer, _history) = explorer(backend.clone(), "/k8s-1.28/pod");
            explorer.initialize_from_browser_location();
            settle().await;

            explorer.set_field_path(FieldPath::parse("pod"), NavigationIntent::Sync);
            explorer.on_browser_navigated();
            settle().await;

            assert_eq!(backend.calls_to("node").len(), 1);
            assert!(!explorer.snapshot().loading);
        })
        .await;
}

/// Test: submitting the path already shown does not grow history
#[tokio::test(start_paused = true)]
async fn resubmitting_shown_path_keeps_history() {
    LocalSet::new()
        .run_until(async {
            let (explorer, history) = explorer(Rc::new(schema_backend()), "/k8s-1.28/pod");
            explorer.initialize_from_browser_location();
            settle().await;

            explorer.set_draft("pod");
            explorer.submit_draft(NavigationIntent::Navigate);
            explorer.submit_draft(NavigationIntent::Navigate);
            explorer.select_suggestion("pod", NavigationIntent::Navigate);
            settle().await;
            assert_eq!(history.entries(), ["/k8s-1.28/pod"]);

            // A real move still pushes
            explorer.select_suggestion("pod.spec", NavigationIntent::Navigate);
            assert_eq!(history.entries(), ["/k8s-1.28/pod", "/k8s-1.28/pod.spec"]);
        })
        .await;
}

/// Test: subscribers see loading, then the resolved view
#[tokio::test(start_paused = true)]
async fn subscribers_see_every_commit() {
    LocalSet::new()
        .run_until(async {
            let (explorer, _history) = explorer(Rc::new(schema_backend()), "/k8s-1.28/pod");
            let mut changes = explorer.subscribe();
            explorer.initialize_from_browser_location();

            let first = changes.next().await.expect("snapshot");
            assert!(first.loading);
            assert_eq!(first.url, "/k8s-1.28/pod");
            assert_eq!(first.view, None);

            let second = changes.next().await.expect("snapshot");
            assert!(!second.loading);
            assert_eq!(node_description(&second).as_deref(), Some("Pod in k8s-1.28"));

            let json = serde_json::to_value(&second).unwrap();
            assert_eq!(json["path"]["schemaVersion"], "k8s-1.28");
            assert_eq!(json["view"]["kind"], "node");
        })
        .await;
}
