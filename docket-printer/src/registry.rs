//! Printer registry: discovery snapshot, selection and send locks
//!
//! The registry is the single holder of mutable state in this crate. A
//! handle clones cheaply; all clones see the same snapshot and Selection.
//! Writers replace whole values under one lock, so a reader never observes
//! a half-updated snapshot.

use crate::discovery;
use crate::error::{PrinterError, PrinterResult};
use crate::types::{OnlineState, PrinterDescriptor};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, instrument};

#[derive(Default)]
struct RegistryInner {
    snapshot: Vec<PrinterDescriptor>,
    selected: Option<PrinterDescriptor>,
    send_locks: HashMap<String, Arc<Mutex<()>>>,
}

/// Cheap-to-clone handle over the shared printer state
#[derive(Clone, Default)]
pub struct PrinterRegistry {
    inner: Arc<RwLock<RegistryInner>>,
}

/// Auto-selection precedence: platform default, then first online, then
/// first discovered.
fn pick_auto(snapshot: &[PrinterDescriptor]) -> Option<&PrinterDescriptor> {
    snapshot
        .iter()
        .find(|p| p.is_default)
        .or_else(|| snapshot.iter().find(|p| p.online == OnlineState::Online))
        .or_else(|| snapshot.first())
}

impl PrinterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub(crate) fn with_snapshot(snapshot: Vec<PrinterDescriptor>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(RegistryInner {
                snapshot,
                ..RegistryInner::default()
            })),
        }
    }

    /// Run platform discovery and atomically replace the stored snapshot
    #[instrument(skip(self))]
    pub async fn discover(&self) -> PrinterResult<Vec<PrinterDescriptor>> {
        let printers = discovery::discover().await?;
        let mut inner = self.inner.write().await;
        inner.snapshot = printers.clone();
        debug!(count = printers.len(), "discovery snapshot replaced");
        Ok(printers)
    }

    /// Fresh discovery, returning only likely thermal/receipt hardware
    ///
    /// The full result still becomes the stored snapshot, so a non-thermal
    /// printer stays selectable by name.
    pub async fn discover_thermal(&self) -> PrinterResult<Vec<PrinterDescriptor>> {
        let printers = self.discover().await?;
        Ok(discovery::filter_thermal(printers))
    }

    /// Insert or replace an ad-hoc descriptor, keyed by name
    ///
    /// This is how raw network/device printers that no enumerator reports
    /// become selectable.
    pub async fn register(&self, descriptor: PrinterDescriptor) {
        let mut inner = self.inner.write().await;
        if let Some(existing) = inner
            .snapshot
            .iter_mut()
            .find(|p| p.name == descriptor.name)
        {
            *existing = descriptor;
        } else {
            inner.snapshot.push(descriptor);
        }
    }

    /// Select a printer from the stored snapshot by exact name
    ///
    /// Fails with `NotFound` and leaves any prior Selection in place. The
    /// snapshot is not refreshed here; call [`discover`](Self::discover)
    /// first when staleness matters.
    pub async fn select_by_name(&self, name: &str) -> PrinterResult<PrinterDescriptor> {
        let mut inner = self.inner.write().await;
        let Some(printer) = inner.snapshot.iter().find(|p| p.name == name).cloned() else {
            return Err(PrinterError::NotFound(name.to_string()));
        };
        debug!(printer = %printer.name, "printer selected");
        inner.selected = Some(printer.clone());
        Ok(printer)
    }

    /// Select by precedence: default, first online, first discovered
    pub async fn auto_select(&self) -> PrinterResult<PrinterDescriptor> {
        let mut inner = self.inner.write().await;
        let Some(printer) = pick_auto(&inner.snapshot).cloned() else {
            return Err(PrinterError::NotFound("no printers discovered".to_string()));
        };
        debug!(printer = %printer.name, "printer auto-selected");
        inner.selected = Some(printer.clone());
        Ok(printer)
    }

    /// The current Selection; never triggers discovery
    pub async fn current_selection(&self) -> Option<PrinterDescriptor> {
        self.inner.read().await.selected.clone()
    }

    pub async fn clear_selection(&self) {
        self.inner.write().await.selected = None;
    }

    /// Copy of the stored snapshot for callers needing stability
    pub async fn snapshot(&self) -> Vec<PrinterDescriptor> {
        self.inner.read().await.snapshot.clone()
    }

    /// Per-printer send mutex: one in-flight job per physical printer
    pub async fn send_lock(&self, name: &str) -> Arc<Mutex<()>> {
        let mut inner = self.inner.write().await;
        inner.send_locks.entry(name.to_string()).or_default().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ConnectionKind;

    fn printer(name: &str, is_default: bool, online: OnlineState) -> PrinterDescriptor {
        let mut descriptor = PrinterDescriptor::new(name, ConnectionKind::Cups);
        descriptor.is_default = is_default;
        descriptor.online = online;
        descriptor
    }

    #[tokio::test]
    async fn test_auto_select_prefers_default() {
        let registry = PrinterRegistry::with_snapshot(vec![
            printer("A", false, OnlineState::Online),
            printer("B", true, OnlineState::Offline),
            printer("C", false, OnlineState::Online),
        ]);
        let selected = registry.auto_select().await.unwrap();
        assert_eq!(selected.name, "B");
    }

    #[tokio::test]
    async fn test_auto_select_falls_back_to_online_then_first() {
        let registry = PrinterRegistry::with_snapshot(vec![
            printer("A", false, OnlineState::Offline),
            printer("B", false, OnlineState::Online),
        ]);
        assert_eq!(registry.auto_select().await.unwrap().name, "B");

        let registry = PrinterRegistry::with_snapshot(vec![
            printer("A", false, OnlineState::Offline),
            printer("B", false, OnlineState::Unknown),
        ]);
        assert_eq!(registry.auto_select().await.unwrap().name, "A");
    }

    #[tokio::test]
    async fn test_auto_select_empty_snapshot() {
        let registry = PrinterRegistry::new();
        match registry.auto_select().await {
            Err(PrinterError::NotFound(_)) => {}
            other => panic!("expected NotFound, got {other:?}"),
        }
        assert!(registry.current_selection().await.is_none());
    }

    #[tokio::test]
    async fn test_select_by_name() {
        let registry = PrinterRegistry::with_snapshot(vec![
            printer("Front", false, OnlineState::Online),
            printer("Kitchen", false, OnlineState::Online),
        ]);
        let selected = registry.select_by_name("Kitchen").await.unwrap();
        assert_eq!(selected.name, "Kitchen");
        assert_eq!(
            registry.current_selection().await.unwrap().name,
            "Kitchen"
        );
    }

    #[tokio::test]
    async fn test_ghost_selection_keeps_prior() {
        let registry =
            PrinterRegistry::with_snapshot(vec![printer("Front", true, OnlineState::Online)]);
        registry.select_by_name("Front").await.unwrap();

        let err = registry.select_by_name("Ghost Printer").await.unwrap_err();
        match err {
            PrinterError::NotFound(name) => assert_eq!(name, "Ghost Printer"),
            other => panic!("expected NotFound, got {other:?}"),
        }
        // Prior selection untouched
        assert_eq!(registry.current_selection().await.unwrap().name, "Front");
    }

    #[tokio::test]
    async fn test_clear_selection() {
        let registry =
            PrinterRegistry::with_snapshot(vec![printer("Front", true, OnlineState::Online)]);
        registry.auto_select().await.unwrap();
        registry.clear_selection().await;
        assert!(registry.current_selection().await.is_none());
    }

    #[tokio::test]
    async fn test_register_ad_hoc_printer() {
        let registry = PrinterRegistry::new();
        registry
            .register(PrinterDescriptor::raw_network("192.168.1.77", 9100))
            .await;

        let selected = registry.select_by_name("192.168.1.77:9100").await.unwrap();
        assert_eq!(selected.kind, ConnectionKind::RawNetwork);

        // Re-registering the same name replaces, not duplicates
        registry
            .register(PrinterDescriptor::raw_network("192.168.1.77", 9100))
            .await;
        assert_eq!(registry.snapshot().await.len(), 1);
    }

    #[tokio::test]
    async fn test_selection_is_a_stable_copy() {
        let registry =
            PrinterRegistry::with_snapshot(vec![printer("Front", true, OnlineState::Online)]);
        registry.auto_select().await.unwrap();

        // A later snapshot update does not rewrite the held Selection
        registry
            .register(printer("Front", false, OnlineState::Offline))
            .await;
        let selection = registry.current_selection().await.unwrap();
        assert_eq!(selection.online, OnlineState::Online);
    }

    #[tokio::test]
    async fn test_send_lock_identity() {
        let registry = PrinterRegistry::new();
        let a1 = registry.send_lock("A").await;
        let a2 = registry.send_lock("A").await;
        let b = registry.send_lock("B").await;
        assert!(Arc::ptr_eq(&a1, &a2));
        assert!(!Arc::ptr_eq(&a1, &b));

        let held = a1.lock().await;
        assert!(a2.try_lock().is_err());
        assert!(b.try_lock().is_ok());
        drop(held);
        assert!(a2.try_lock().is_ok());
    }

    #[tokio::test]
    async fn test_clone_shares_state() {
        let registry = PrinterRegistry::with_snapshot(vec![printer(
            "Front",
            false,
            OnlineState::Online,
        )]);
        let clone = registry.clone();
        clone.select_by_name("Front").await.unwrap();
        assert_eq!(registry.current_selection().await.unwrap().name, "Front");
    }
}
