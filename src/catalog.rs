//! # Catalog Store Module
//!
//! Holds the ordered product list shown to every user. The catalog is loaded
//! once at startup from a JSON file or a spreadsheet exported as CSV and is
//! never mutated afterwards; sessions and carts only read from it.
//!
//! Loading never fails: a missing or malformed source is logged and yields
//! an empty catalog, which the bot renders as "catalog is empty".

use std::fs;
use std::path::Path;
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::errors::{ShopError, ShopResult};
use crate::pricing::Price;

/// Header aliases accepted in spreadsheet exports
const NAME_HEADERS: &[&str] = &["name", "название", "наименование"];
const PRICE_HEADERS: &[&str] = &["price", "цена"];
const IMAGE_HEADERS: &[&str] = &["image", "фото", "изображение"];

/// A purchasable product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Position in the catalog
    pub index: usize,
    pub name: String,
    pub price: Price,
    /// File name relative to the images directory
    pub image: Option<String>,
}

impl Product {
    /// Create a product without an image; the index is assigned by [`Catalog::new`]
    pub fn new(name: impl Into<String>, price: impl Into<Price>) -> Self {
        Self {
            index: 0,
            name: name.into(),
            price: price.into(),
            image: None,
        }
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }
}

/// One product as written in a JSON catalog file
#[derive(Debug, Default, Deserialize)]
struct RawProduct {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    price: Option<Price>,
    #[serde(default)]
    image: Option<String>,
}

impl From<RawProduct> for Product {
    fn from(raw: RawProduct) -> Self {
        Self {
            index: 0,
            name: raw.name.unwrap_or_default(),
            price: raw.price.unwrap_or_default(),
            image: raw.image.filter(|image| !image.trim().is_empty()),
        }
    }
}

/// Ordered, read-only product list shared by all sessions
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Arc<[Product]>,
}

impl Catalog {
    /// Build a catalog, assigning each product its position as index
    pub fn new(products: Vec<Product>) -> Self {
        let products: Vec<Product> = products
            .into_iter()
            .enumerate()
            .map(|(index, product)| Product { index, ..product })
            .collect();
        Self {
            products: Arc::from(products),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Look up a product by catalog index
    pub fn get(&self, index: usize) -> ShopResult<&Product> {
        self.products.get(index).ok_or(ShopError::NotFound {
            index,
            len: self.products.len(),
        })
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::empty()
    }
}

/// Load a catalog, choosing the format from the file extension
///
/// `.csv` files are read as spreadsheet exports, anything else as JSON.
pub fn load(path: impl AsRef<Path>) -> Catalog {
    let path = path.as_ref();
    let is_csv = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));

    if is_csv {
        load_csv(path)
    } else {
        load_json(path)
    }
}

/// Load a JSON array of `{name, price, image}` objects
pub fn load_json(path: impl AsRef<Path>) -> Catalog {
    let path = path.as_ref();
    fail_soft(path, read_json(path))
}

/// Load a spreadsheet exported as CSV with a header row
pub fn load_csv(path: impl AsRef<Path>) -> Catalog {
    let path = path.as_ref();
    fail_soft(path, read_csv(path))
}

fn fail_soft(path: &Path, result: Result<Vec<Product>>) -> Catalog {
    match result {
        Ok(products) => {
            info!(path = %path.display(), products = products.len(), "Catalog loaded");
            Catalog::new(products)
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Failed to load catalog, continuing with an empty one");
            Catalog::empty()
        }
    }
}

fn read_json(path: &Path) -> Result<Vec<Product>> {
    let content = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let raw: Vec<RawProduct> = serde_json::from_str(&content)?;
    Ok(raw.into_iter().map(Product::from).collect())
}

fn read_csv(path: &Path) -> Result<Vec<Product>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)?;

    let headers = reader.headers()?.clone();
    let column = |aliases: &[&str]| {
        headers
            .iter()
            .position(|header| aliases.iter().any(|alias| header.to_lowercase() == *alias))
    };

    let name_col = column(NAME_HEADERS).ok_or_else(|| anyhow!("no name column in header"))?;
    let price_col = column(PRICE_HEADERS);
    let image_col = column(IMAGE_HEADERS);

    let mut products = Vec::new();
    for record in reader.records() {
        let record = record?;
        let name = record.get(name_col).unwrap_or_default();
        if name.is_empty() {
            continue;
        }

        let price = price_col
            .and_then(|col| record.get(col))
            .map(Price::from)
            .unwrap_or_default();
        let image = image_col
            .and_then(|col| record.get(col))
            .filter(|image| !image.is_empty())
            .map(str::to_string);

        products.push(Product {
            index: 0,
            name: name.to_string(),
            price,
            image,
        });
    }

    Ok(products)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_assigns_indices() {
        let catalog = Catalog::new(vec![Product::new("Rose", "1000"), Product::new("Oud", "1500")]);
        assert_eq!(catalog.get(0).unwrap().index, 0);
        assert_eq!(catalog.get(1).unwrap().index, 1);
    }

    #[test]
    fn test_get_out_of_range() {
        let catalog = Catalog::new(vec![Product::new("Rose", "1000")]);
        assert_eq!(catalog.get(1), Err(ShopError::NotFound { index: 1, len: 1 }));
    }
}
