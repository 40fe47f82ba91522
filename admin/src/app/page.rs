//! # Page Settlement
//!
//! What a page does with a closed dialog: refetch after a save, drop the
//! row locally after a confirmed delete, nothing otherwise.

use crate::app::container::{Collection, EntityContainer, Scope};
use crate::app::dialog::DialogResult;

/// What the page did with a dialog result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageAction {
    Reloaded,
    Removed(String),
    Ignored,
}

/// Apply a dialog result to the page's container.
pub async fn settle<C, T>(container: &EntityContainer<C>, scope: &Scope, result: DialogResult<T>) -> PageAction
where
    C: Collection,
{
    match result {
        DialogResult::Saved(_) => {
            // The refetch records its own failure in the container state
            if let Err(err) = container.fetch(scope).await {
                tracing::debug!(collection = C::NAME, error = %err, "Refetch after save failed");
            }
            PageAction::Reloaded
        }
        DialogResult::Deleted { response: true, id } => {
            container.remove(&id);
            PageAction::Removed(id)
        }
        DialogResult::Deleted { response: false, id } => {
            tracing::warn!(collection = C::NAME, id = %id, "Backend declined delete");
            PageAction::Ignored
        }
        DialogResult::Failed(_) | DialogResult::Dismissed => PageAction::Ignored,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::collections::{Stores, Variants};
    use crate::app::container::Paging;
    use crate::app::dialog::open_dialog;
    use crate::app::flows::catalog;
    use crate::core::error::TransportError;
    use crate::test_support::{gateway_with, MockTransport};
    use serde_json::json;
    use shared::{Store, Variant, VariantDraft};

    #[tokio::test]
    async fn test_saved_triggers_refetch() {
        let transport = MockTransport::new();
        transport.reply(json!({ "data": [{ "id": "s-1", "name": "Main" }] }));
        let stores = EntityContainer::<Stores>::new(gateway_with(&transport), Paging::default());
        let scope = Scope::partner("p-1");

        let action = settle(&stores, &scope, DialogResult::Saved(Store::default())).await;

        assert_eq!(action, PageAction::Reloaded);
        assert_eq!(stores.len(), 1);
        assert_eq!(transport.call_count(), 1);
    }

    #[tokio::test]
    async fn test_confirmed_delete_removes_locally() {
        let transport = MockTransport::new();
        transport.reply(json!({ "data": [{ "id": "s-1", "name": "A" }, { "id": "s-2", "name": "B" }] }));
        let stores = EntityContainer::<Stores>::new(gateway_with(&transport), Paging::default());
        let scope = Scope::partner("p-1");
        stores.fetch(&scope).await.unwrap();

        let result: DialogResult<Store> = DialogResult::Deleted { response: true, id: "s-1".into() };
        assert_eq!(settle(&stores, &scope, result).await, PageAction::Removed("s-1".into()));

        let declined: DialogResult<Store> = DialogResult::Deleted { response: false, id: "s-2".into() };
        assert_eq!(settle(&stores, &scope, declined).await, PageAction::Ignored);

        assert_eq!(stores.items().len(), 1);
        assert_eq!(transport.call_count(), 1, "no refetch after delete");
    }

    #[tokio::test]
    async fn test_failed_create_leaves_page_untouched() {
        let transport = MockTransport::new();
        // initial load
        transport.reply(json!({ "data": [{ "id": "v-1", "name": "Small", "sku": "S" }] }));
        // create succeeds, attach to product fails
        transport.reply(json!({ "data": { "id": "v-2", "name": "Large", "sku": "L" } }));
        transport.fail(TransportError::Status { status: 500, body: "boom".into() });

        let gateway = gateway_with(&transport);
        let variants = EntityContainer::<Variants>::new(gateway.clone(), Paging::default());
        let scope = Scope::partner("p-1").with_product("pr-1");
        variants.fetch(&scope).await.unwrap();

        let (dialog, handle) = open_dialog::<Variant>();
        let draft = VariantDraft {
            name: "Large".into(),
            sku: "L".into(),
            product_id: "pr-1".into(),
            ..VariantDraft::default()
        };
        let summary = dialog
            .complete(catalog::create_variant(&gateway, "p-1", "s-1", &draft))
            .await;
        assert!(matches!(summary, DialogResult::Failed(_)));

        let result = handle.closed().await;
        assert!(result.is_empty());
        assert_eq!(settle(&variants, &scope, result).await, PageAction::Ignored);

        assert_eq!(transport.call_count(), 3, "no attach to store, no refetch");
        assert_eq!(variants.items().len(), 1);
        assert!(gateway.state().error().is_some());
    }

    #[tokio::test]
    async fn test_dismissed_dialog_ignored() {
        let transport = MockTransport::new();
        let stores = EntityContainer::<Stores>::new(gateway_with(&transport), Paging::default());
        let (dialog, handle) = open_dialog::<Store>();
        drop(dialog);

        let action = settle(&stores, &Scope::partner("p-1"), handle.closed().await).await;
        assert_eq!(action, PageAction::Ignored);
        assert_eq!(transport.call_count(), 0);
    }
}
