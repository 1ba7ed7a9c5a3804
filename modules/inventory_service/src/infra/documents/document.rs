//! BSON document shape of an item and conversions to contract models

use crate::contract::{Attributes, Item, ItemId, NewItem, TenantScope};
use anyhow::{anyhow, Result};
use mongodb::bson::{self, oid::ObjectId, Bson, DateTime as BsonDateTime, Document};
use serde::{Deserialize, Serialize};

/// Item as stored in the `items` collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemDocument {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    /// String form of the owning tenant's UUID
    pub tenant_id: String,
    #[serde(default)]
    pub warehouse_id: String,
    #[serde(default)]
    pub category_id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub sku: String,
    #[serde(default)]
    pub quantity: i64,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub attributes: Document,
    pub created_at: BsonDateTime,
    pub updated_at: BsonDateTime,
}

impl ItemDocument {
    /// Build a fresh document owned by `scope`
    pub fn create(scope: &TenantScope, new: &NewItem) -> Result<Self> {
        let now = BsonDateTime::now();
        Ok(Self {
            id: ObjectId::new(),
            tenant_id: scope.document_key(),
            warehouse_id: new.warehouse_id.clone(),
            category_id: new.category_id.clone(),
            name: new.name.clone(),
            description: new.description.clone(),
            sku: new.sku.clone(),
            quantity: new.quantity,
            price: new.price,
            images: new.images.clone(),
            attributes: attributes_to_document(&new.attributes)?,
            created_at: now,
            updated_at: now,
        })
    }
}

impl TryFrom<ItemDocument> for Item {
    type Error = anyhow::Error;

    fn try_from(doc: ItemDocument) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ItemId::parse(&doc.id.to_hex())?,
            tenant_id: doc.tenant_id,
            warehouse_id: doc.warehouse_id,
            category_id: doc.category_id,
            name: doc.name,
            description: doc.description,
            sku: doc.sku,
            quantity: doc.quantity,
            price: doc.price,
            images: doc.images,
            attributes: document_to_attributes(doc.attributes)?,
            created_at: to_chrono(doc.created_at)?,
            updated_at: to_chrono(doc.updated_at)?,
        })
    }
}

/// Parse the document identity of an item
pub fn object_id(id: &ItemId) -> Result<ObjectId> {
    Ok(ObjectId::parse_str(id.as_str())?)
}

/// Encode attributes as an embedded document, keeping key order and value types
pub fn attributes_to_document(attributes: &Attributes) -> Result<Document> {
    Ok(bson::to_document(attributes)?)
}

/// Decode an embedded document back into attributes
pub fn document_to_attributes(doc: Document) -> Result<Attributes> {
    match Bson::Document(doc).into_relaxed_extjson() {
        serde_json::Value::Object(map) => Ok(map),
        other => Err(anyhow!("attributes decoded to non-object value: {}", other)),
    }
}

fn to_chrono(dt: BsonDateTime) -> Result<chrono::DateTime<chrono::Utc>> {
    chrono::DateTime::from_timestamp_millis(dt.timestamp_millis())
        .ok_or_else(|| anyhow!("timestamp {} out of range", dt.timestamp_millis()))
}
