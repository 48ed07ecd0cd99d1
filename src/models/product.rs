// src/models/product.rs

//! Product record as delivered by a category's product-list resource.

use serde::Deserialize;

/// One product entry rendered as a card.
#[derive(Debug, Clone, Deserialize)]
pub struct Product {
    /// Display title
    #[serde(default)]
    pub title: Option<String>,

    /// Description line
    #[serde(default)]
    pub desc: Option<String>,

    /// Secondary note line
    #[serde(default)]
    pub note: Option<String>,

    /// Price, numeric or pre-formatted string
    #[serde(default)]
    pub price: Option<Price>,

    /// Image reference; absent means the placeholder image is used
    #[serde(default)]
    pub img: Option<String>,
}

/// Price field: numbers and strings both appear in the data files.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Price {
    Number(f64),
    Text(String),
}

impl Price {
    /// An empty string counts as no price at all.
    pub fn is_present(&self) -> bool {
        !matches!(self, Price::Text(text) if text.is_empty())
    }
}
