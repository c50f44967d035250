// src/forms.rs
//
// Decodes urlencoded submissions into tagged actions before any handler
// logic runs. Which mode applies is tagged by the presence of the submit
// field (update_status, update_items, ...); a submission matching none of
// the known modes is rejected as method-not-allowed.
use std::collections::HashMap;

use crate::error::AppError;
use crate::models::order::OrderStatus;

// Raw urlencoded pairs from a POST body. Keeps repeated keys, which the
// typed extractors collapse.
pub struct FormData(Vec<(String, String)>);

impl FormData {
    pub fn new(pairs: Vec<(String, String)>) -> Self {
        Self(pairs)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    pub fn has(&self, key: &str) -> bool {
        self.0.iter().any(|(k, _)| k == key)
    }

    pub fn values(&self, key: &str) -> Vec<&str> {
        self.0
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    // Collects row-keyed quantities, e.g. quantity_7=3. Keys that do not
    // carry a row id are ignored; rows absent from the submission keep their
    // current value, which the handler resolves.
    fn keyed_quantities(&self, prefix: &str) -> Result<HashMap<i64, i64>, AppError> {
        let mut quantities = HashMap::new();
        for (key, value) in &self.0 {
            let Some(raw_id) = key.strip_prefix(prefix) else {
                continue;
            };
            let Ok(id) = raw_id.parse::<i64>() else {
                continue;
            };
            quantities.insert(id, parse_quantity(value)?);
        }
        Ok(quantities)
    }
}

pub fn parse_quantity(value: &str) -> Result<i64, AppError> {
    let quantity = value
        .trim()
        .parse::<i64>()
        .map_err(|_| AppError::validation(format!("Invalid quantity: {value}")))?;
    if quantity < 0 {
        return Err(AppError::validation("Quantity cannot be negative"));
    }
    Ok(quantity)
}

pub fn parse_price(value: &str) -> Result<f64, AppError> {
    let price = value
        .trim()
        .parse::<f64>()
        .map_err(|_| AppError::validation(format!("Invalid price: {value}")))?;
    if price < 0.0 {
        return Err(AppError::validation("Price cannot be negative"));
    }
    Ok(price)
}

// Mutation modes accepted by the order detail page.
pub enum OrderAction {
    UpdateStatus { status: OrderStatus },
    UpdateItems { quantities: HashMap<i64, i64> },
}

impl OrderAction {
    pub fn decode(form: &FormData) -> Result<Self, AppError> {
        if form.has("update_status") {
            let raw = form.get("status").unwrap_or_default();
            let status = OrderStatus::parse(raw)
                .ok_or_else(|| AppError::validation(format!("Unknown order status: {raw}")))?;
            return Ok(OrderAction::UpdateStatus { status });
        }

        if form.has("update_items") {
            return Ok(OrderAction::UpdateItems {
                quantities: form.keyed_quantities("quantity_")?,
            });
        }

        Err(AppError::method_not_allowed())
    }
}

// Mutation modes accepted by the product detail page.
pub enum ProductAction {
    UpdateQuantity { quantities: HashMap<i64, i64> },
    UpdatePrice { price: Option<f64> },
    AddWarehouse { warehouse_id: i64, quantity: i64 },
}

impl ProductAction {
    pub fn decode(form: &FormData) -> Result<Self, AppError> {
        if form.has("update_quantity") {
            return Ok(ProductAction::UpdateQuantity {
                quantities: form.keyed_quantities("quantity_")?,
            });
        }

        if form.has("update_price") {
            // An empty price field leaves the stored price alone.
            let price = match form.get("price").map(str::trim) {
                None | Some("") => None,
                Some(raw) => Some(parse_price(raw)?),
            };
            return Ok(ProductAction::UpdatePrice { price });
        }

        if form.has("add_warehouse") {
            let warehouse_id = form
                .get("warehouse")
                .and_then(|v| v.trim().parse::<i64>().ok())
                .ok_or_else(|| AppError::validation("Invalid warehouse id"))?;
            let quantity = parse_quantity(form.get("new_quantity").unwrap_or_default())?;
            return Ok(ProductAction::AddWarehouse { warehouse_id, quantity });
        }

        Err(AppError::method_not_allowed())
    }
}

// Mutation modes accepted by the warehouse detail page.
pub enum WarehouseAction {
    Update { name: String, location: String },
}

impl WarehouseAction {
    pub fn decode(form: &FormData) -> Result<Self, AppError> {
        if form.has("update_warehouse") {
            let (Some(name), Some(location)) = (form.get("name"), form.get("location")) else {
                return Err(AppError::method_not_allowed());
            };
            return Ok(WarehouseAction::Update {
                name: name.to_string(),
                location: location.to_string(),
            });
        }

        Err(AppError::method_not_allowed())
    }
}

pub struct CreateProductForm {
    pub name: String,
    pub description: String,
    pub price: f64,
}

impl CreateProductForm {
    pub fn decode(form: &FormData) -> Result<Self, AppError> {
        let name = form.get("name").map(str::trim).unwrap_or_default();
        let price = form.get("price").map(str::trim).unwrap_or_default();
        if name.is_empty() || price.is_empty() {
            return Err(AppError::method_not_allowed());
        }
        Ok(Self {
            name: name.to_string(),
            description: form.get("description").unwrap_or_default().to_string(),
            price: parse_price(price)?,
        })
    }
}

pub struct CreateWarehouseForm {
    pub name: String,
    pub location: String,
}

impl CreateWarehouseForm {
    pub fn decode(form: &FormData) -> Result<Self, AppError> {
        let name = form.get("name").map(str::trim).unwrap_or_default();
        let location = form.get("location").map(str::trim).unwrap_or_default();
        if name.is_empty() || location.is_empty() {
            return Err(AppError::method_not_allowed());
        }
        Ok(Self {
            name: name.to_string(),
            location: location.to_string(),
        })
    }
}

// Order creation: parallel product_ids / quantities lists, paired in list
// order.
pub struct CreateOrderForm {
    pub items: Vec<(i64, i64)>,
}

impl CreateOrderForm {
    pub fn decode(form: &FormData) -> Result<Self, AppError> {
        let product_ids = form.values("product_ids");
        let quantities = form.values("quantities");

        if product_ids.is_empty() || quantities.is_empty() {
            return Err(AppError::method_not_allowed());
        }
        if product_ids.len() != quantities.len() {
            return Err(AppError::validation("Product and quantity lists do not match"));
        }

        let mut items = Vec::with_capacity(product_ids.len());
        for (raw_id, raw_quantity) in product_ids.iter().zip(&quantities) {
            let product_id = raw_id
                .trim()
                .parse::<i64>()
                .map_err(|_| AppError::validation(format!("Invalid product id: {raw_id}")))?;
            items.push((product_id, parse_quantity(raw_quantity)?));
        }
        Ok(Self { items })
    }
}
