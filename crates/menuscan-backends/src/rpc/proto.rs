//! Wire messages of the `menu.MenuService` gRPC API.
//!
//! Declared by hand with `prost` derives; field numbers follow the menu
//! service's `menu.proto`. Only the procedures the gateway calls are
//! covered. Messages also derive `Serialize` so responses can be passed
//! to clients and cached as JSON.

use serde::{Serialize, Serializer};

/// `rpc ProcessMenuImage(MenuRequest) returns (MenuResponse)`
pub const PROCESS_MENU_IMAGE_PATH: &str = "/menu.MenuService/ProcessMenuImage";
/// `rpc GetDish(DishRequest) returns (DishResponse)`
pub const GET_DISH_PATH: &str = "/menu.MenuService/GetDish";

#[derive(Clone, PartialEq, ::prost::Message, Serialize)]
pub struct ProcessingOptions {
    #[prost(bool, tag = "1")]
    pub extract_prices: bool,
    #[prost(bool, tag = "2")]
    pub extract_descriptions: bool,
    #[prost(bool, tag = "3")]
    pub extract_ingredients: bool,
    #[prost(string, tag = "4")]
    pub language: String,
    #[prost(bool, tag = "5")]
    pub use_cache: bool,
}

#[derive(Clone, PartialEq, ::prost::Message, Serialize)]
pub struct MenuRequest {
    #[prost(bytes = "vec", tag = "1")]
    #[serde(skip)]
    pub image_data: Vec<u8>,
    #[prost(string, tag = "2")]
    pub image_url: String,
    #[prost(string, tag = "3")]
    pub format: String,
    #[prost(message, optional, tag = "4")]
    pub options: Option<ProcessingOptions>,
}

#[derive(Clone, PartialEq, ::prost::Message, Serialize)]
pub struct Price {
    #[prost(double, tag = "1")]
    pub amount: f64,
    #[prost(string, tag = "2")]
    pub currency: String,
    #[prost(string, tag = "3")]
    pub original_text: String,
}

#[derive(Clone, PartialEq, ::prost::Message, Serialize)]
pub struct Dish {
    #[prost(string, tag = "1")]
    pub dish_id: String,
    #[prost(string, tag = "2")]
    pub name: String,
    #[prost(string, tag = "3")]
    pub description: String,
    #[prost(message, optional, tag = "4")]
    pub price: Option<Price>,
    #[prost(string, tag = "5")]
    pub category: String,
    #[prost(string, repeated, tag = "6")]
    pub ingredients: Vec<String>,
    #[prost(float, tag = "7")]
    pub confidence_score: f32,
    #[prost(string, tag = "8")]
    pub image_url: String,
}

#[derive(Clone, PartialEq, ::prost::Message, Serialize)]
pub struct Metadata {
    #[prost(int64, tag = "1")]
    pub processing_time_ms: i64,
    #[prost(int32, tag = "2")]
    pub total_dishes: i32,
    #[prost(string, tag = "3")]
    pub source: String,
    #[prost(int64, tag = "4")]
    pub timestamp: i64,
}

#[derive(Clone, PartialEq, ::prost::Message, Serialize)]
pub struct ProcessingStatus {
    /// `ProcessingStatus.Status` enum, carried as its varint value.
    #[prost(int32, tag = "1")]
    #[serde(serialize_with = "serialize_processing_state")]
    pub status: i32,
    #[prost(string, tag = "2")]
    pub message: String,
}

#[derive(Clone, PartialEq, ::prost::Message, Serialize)]
pub struct MenuResponse {
    #[prost(string, tag = "1")]
    pub menu_id: String,
    #[prost(message, repeated, tag = "2")]
    pub dishes: Vec<Dish>,
    #[prost(message, optional, tag = "3")]
    pub metadata: Option<Metadata>,
    #[prost(message, optional, tag = "4")]
    pub status: Option<ProcessingStatus>,
}

#[derive(Clone, PartialEq, ::prost::Message, Serialize)]
pub struct DishRequest {
    #[prost(string, tag = "1")]
    pub dish_id: String,
    #[prost(bool, tag = "2")]
    pub include_similar: bool,
}

#[derive(Clone, PartialEq, ::prost::Message, Serialize)]
pub struct DishResponse {
    #[prost(message, optional, tag = "1")]
    pub dish: Option<Dish>,
    #[prost(message, repeated, tag = "2")]
    pub similar_dishes: Vec<Dish>,
}

/// Name of a `ProcessingStatus.Status` value.
pub fn processing_state_name(value: i32) -> &'static str {
    match value {
        1 => "PENDING",
        2 => "PROCESSING",
        3 => "COMPLETED",
        4 => "FAILED",
        _ => "UNKNOWN",
    }
}

fn serialize_processing_state<S: Serializer>(value: &i32, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(processing_state_name(*value))
}
