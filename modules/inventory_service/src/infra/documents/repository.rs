//! MongoDB item repository
//!
//! Every filter includes `tenant_id`; updates and deletes filter on
//! `(_id, tenant_id)` together.

use super::document::{attributes_to_document, object_id, ItemDocument};
use crate::contract::{Item, ItemId, ItemPatch, NewItem, TenantScope};
use crate::domain::repository::ItemRepository;
use anyhow::Result;
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{doc, DateTime as BsonDateTime, Document};
use mongodb::{Collection, Database};

pub struct MongoItemRepository {
    items: Collection<ItemDocument>,
}

impl MongoItemRepository {
    pub fn new(database: &Database, collection: &str) -> Self {
        Self {
            items: database.collection::<ItemDocument>(collection),
        }
    }

    fn scoped(scope: &TenantScope, id: &ItemId) -> Result<Document> {
        Ok(doc! {
            "_id": object_id(id)?,
            "tenant_id": scope.document_key(),
        })
    }
}

/// Build the `$set` body for a patch.
///
/// `description` and `updated_at` are always written.
fn set_fields(patch: &ItemPatch) -> Result<Document> {
    let mut set = doc! {
        "description": patch.description.clone(),
        "updated_at": BsonDateTime::now(),
    };
    if let Some(warehouse_id) = &patch.warehouse_id {
        set.insert("warehouse_id", warehouse_id.clone());
    }
    if let Some(category_id) = &patch.category_id {
        set.insert("category_id", category_id.clone());
    }
    if let Some(name) = &patch.name {
        set.insert("name", name.clone());
    }
    if let Some(sku) = &patch.sku {
        set.insert("sku", sku.clone());
    }
    if let Some(quantity) = patch.quantity {
        set.insert("quantity", quantity);
    }
    if let Some(price) = patch.price {
        set.insert("price", price);
    }
    if let Some(images) = &patch.images {
        set.insert("images", images.clone());
    }
    if let Some(attributes) = &patch.attributes {
        set.insert("attributes", attributes_to_document(attributes)?);
    }
    Ok(set)
}

#[async_trait]
impl ItemRepository for MongoItemRepository {
    async fn create(&self, scope: &TenantScope, new: &NewItem) -> Result<Item> {
        let document = ItemDocument::create(scope, new)?;
        self.items.insert_one(&document).await?;

        document.try_into()
    }

    async fn list(&self, scope: &TenantScope) -> Result<Vec<Item>> {
        let documents: Vec<ItemDocument> = self
            .items
            .find(doc! { "tenant_id": scope.document_key() })
            .sort(doc! { "created_at": 1, "_id": 1 })
            .await?
            .try_collect()
            .await?;

        documents.into_iter().map(Item::try_from).collect()
    }

    async fn update(
        &self,
        scope: &TenantScope,
        id: &ItemId,
        patch: &ItemPatch,
    ) -> Result<Option<Item>> {
        let filter = Self::scoped(scope, id)?;
        let result = self
            .items
            .update_one(filter.clone(), doc! { "$set": set_fields(patch)? })
            .await?;

        if result.matched_count == 0 {
            return Ok(None);
        }

        // Read back under the same filter so the caller sees the stored state
        match self.items.find_one(filter).await? {
            Some(document) => Ok(Some(document.try_into()?)),
            None => Ok(None),
        }
    }

    async fn delete(&self, scope: &TenantScope, id: &ItemId) -> Result<bool> {
        let result = self.items.delete_one(Self::scoped(scope, id)?).await?;
        Ok(result.deleted_count > 0)
    }
}
