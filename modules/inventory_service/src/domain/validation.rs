//! Input validation for inventory records

use crate::contract::{
    Attributes, CategoryPatch, InventoryError, ItemPatch, NewCategory, NewItem, NewWarehouse,
    Registration, WarehousePatch,
};
use uuid::Uuid;

/// Parse a relational path identifier
pub fn parse_record_id(raw: &str) -> Result<Uuid, InventoryError> {
    Uuid::parse_str(raw)
        .map_err(|_| InventoryError::invalid(format!("'{}' is not a valid UUID", raw)))
}

/// Names are required on create and, when present, on update
fn validate_name(field: &str, value: &str) -> Result<(), InventoryError> {
    if value.trim().is_empty() {
        return Err(InventoryError::invalid(format!("{} cannot be empty", field)));
    }
    Ok(())
}

pub fn validate_new_warehouse(new: &NewWarehouse) -> Result<(), InventoryError> {
    validate_name("name", &new.name)
}

pub fn validate_warehouse_patch(patch: &WarehousePatch) -> Result<(), InventoryError> {
    if let Some(name) = &patch.name {
        validate_name("name", name)?;
    }
    Ok(())
}

pub fn validate_new_category(new: &NewCategory) -> Result<(), InventoryError> {
    validate_name("name", &new.name)
}

pub fn validate_category_patch(patch: &CategoryPatch) -> Result<(), InventoryError> {
    if let Some(name) = &patch.name {
        validate_name("name", name)?;
    }
    Ok(())
}

fn validate_quantity(quantity: i64) -> Result<(), InventoryError> {
    if quantity < 0 {
        return Err(InventoryError::invalid(format!(
            "quantity must not be negative, got {}",
            quantity
        )));
    }
    Ok(())
}

fn validate_price(price: f64) -> Result<(), InventoryError> {
    if !price.is_finite() || price < 0.0 {
        return Err(InventoryError::invalid(format!(
            "price must be a non-negative number, got {}",
            price
        )));
    }
    Ok(())
}

/// Attributes are schema-free, only their encoded size is bounded
fn validate_attributes(attributes: &Attributes, max_bytes: usize) -> Result<(), InventoryError> {
    let size = serde_json::to_vec(attributes)
        .map_err(|e| InventoryError::invalid(format!("attributes are not encodable: {}", e)))?
        .len();
    if size > max_bytes {
        return Err(InventoryError::invalid(format!(
            "attributes exceed {} bytes (got {})",
            max_bytes, size
        )));
    }
    Ok(())
}

pub fn validate_new_item(new: &NewItem, max_attributes_bytes: usize) -> Result<(), InventoryError> {
    validate_name("name", &new.name)?;
    validate_quantity(new.quantity)?;
    validate_price(new.price)?;
    validate_attributes(&new.attributes, max_attributes_bytes)
}

pub fn validate_item_patch(
    patch: &ItemPatch,
    max_attributes_bytes: usize,
) -> Result<(), InventoryError> {
    if let Some(name) = &patch.name {
        validate_name("name", name)?;
    }
    if let Some(quantity) = patch.quantity {
        validate_quantity(quantity)?;
    }
    if let Some(price) = patch.price {
        validate_price(price)?;
    }
    if let Some(attributes) = &patch.attributes {
        validate_attributes(attributes, max_attributes_bytes)?;
    }
    Ok(())
}

/// Validate a registration and return it with a normalized email
pub fn normalize_registration(registration: &Registration) -> Result<Registration, InventoryError> {
    let email = normalize_email(&registration.email);
    if email.is_empty() || !email.contains('@') {
        return Err(InventoryError::invalid(format!(
            "'{}' is not a valid email address",
            registration.email
        )));
    }
    if registration.password.is_empty() {
        return Err(InventoryError::invalid("password cannot be empty"));
    }
    validate_name("tenant name", &registration.tenant_name)?;

    Ok(Registration {
        email,
        password: registration.password.clone(),
        tenant_name: registration.tenant_name.trim().to_string(),
    })
}

/// Emails are compared trimmed and lowercased
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
