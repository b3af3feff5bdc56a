//! Typed records of the Selly API.
//!
//! The named client methods return plain JSON. These types can be used with
//! [`SellyClient::call_generic`](crate::SellyClient::call_generic) when a typed
//! result is preferred, or serialized as a request payload.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Payment gateways supported by Selly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gateway {
    /// PayPal
    Paypal,
    /// Bitcoin
    Bitcoin,
    /// Ethereum
    Ethereum,
    /// Litecoin
    Litecoin,
    /// Bitcoin Cash
    #[serde(rename = "Bitcoin Cash")]
    BitcoinCash,
    /// Dash
    Dash,
    /// DigiByte
    Digibyte,
    /// Nano
    Nano,
    /// Ripple
    Ripple,
    /// ZCash
    ZCash,
}

/// A coupon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coupon {
    /// The coupon ID.
    pub id: String,
    /// The coupon code.
    pub coupon: String,
    /// The discount in percent.
    pub discount: Option<f64>,
    /// How often the coupon may be used, `None` for unlimited.
    pub max_use: Option<u64>,
    /// How often the coupon has been used.
    pub uses: u64,
    /// The products the coupon applies to.
    #[serde(default)]
    pub product_ids: Vec<String>,
    /// Creation timestamp.
    pub created_at: String,
    /// Last update timestamp.
    pub updated_at: String,
}

/// An order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// The order ID.
    pub id: String,
    /// The ordered product.
    pub product_id: String,
    /// The email address of the buyer.
    pub email: String,
    /// The IP address of the buyer.
    pub ip_address: String,
    /// The country code of the buyer.
    pub country_code: String,
    /// The user agent of the buyer.
    pub user_agent: String,
    /// The order value.
    pub value: f64,
    /// The currency of the order value.
    pub currency: String,
    /// The gateway the order was paid with.
    pub gateway: Gateway,
    /// The risk level of the order.
    pub risk_level: i64,
    /// The status of the order.
    pub status: i64,
    /// The delivered content, if any.
    pub delivered: Option<String>,
    /// The crypto address payments go to.
    pub crypto_address: Option<String>,
    /// The value in crypto currency.
    pub crypto_value: Option<f64>,
    /// The amount of crypto currency received so far.
    pub crypto_received: f64,
    /// The number of confirmations so far.
    pub crypto_confirmations: u32,
    /// The crypto payment channel.
    pub crypto_channel: Option<String>,
    /// The referral code.
    pub referral: Option<String>,
    /// The exchange rate at the time of the order.
    #[serde(alias = "exchnge_rate")]
    pub exchange_rate: f64,
    /// Custom fields.
    #[serde(default)]
    pub custom: Value,
    /// Creation timestamp.
    pub created_at: String,
    /// Last update timestamp.
    pub updated_at: String,
}

/// A product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// The product ID.
    pub id: String,
    /// The title.
    pub title: String,
    /// The description.
    pub description: String,
    /// The stock count.
    pub stock: i64,
    /// The price.
    pub price: f64,
    /// The currency of the price.
    pub currency: String,
    /// The product type.
    pub product_type: i64,
    /// Accepted gateways.
    #[serde(default, alias = "getways")]
    pub gateways: Vec<Gateway>,
    /// Whether the product is private.
    pub private: bool,
    /// Whether the product is unlisted.
    pub unlisted: bool,
    /// Whether VPN buyers are blocked.
    pub vpn_block: bool,
    /// Note from the seller to the buyer.
    pub seller_note: Option<String>,
    /// Maximum quantity per order.
    pub maximum_quantity: Option<u32>,
    /// Minimum quantity per order.
    pub minimum_quantity: Option<u32>,
    /// URL of the product image.
    pub image_url: Option<String>,
    /// The product image.
    pub image: Option<String>,
    /// The theme.
    pub theme: i64,
    /// Required crypto confirmations.
    pub crypto_confirmations: u32,
    /// Maximum accepted risk level.
    pub max_risk_level: i64,
    /// URL for dynamic delivery.
    pub dynamic_url: Option<String>,
    /// Additional info.
    pub info: String,
    /// Delimiter between stock items.
    pub stock_delimiter: String,
    /// URL notified about orders.
    pub webhook_url: Option<String>,
    /// Custom fields.
    #[serde(default)]
    pub custom: Value,
    /// Creation timestamp.
    pub created_at: String,
    /// Last update timestamp.
    pub updated_at: String,
}

/// A group of products.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductGroup {
    /// The product group ID.
    pub id: String,
    /// The title.
    pub title: String,
    /// The products in the group.
    #[serde(default)]
    pub product_ids: Vec<String>,
    /// Creation timestamp.
    pub created_at: String,
    /// Last update timestamp.
    pub updated_at: String,
}

/// A support query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Query {
    /// The query ID.
    pub id: String,
    /// The query secret.
    pub secret: String,
    /// The status.
    pub status: i64,
    /// The email address of the customer.
    pub email: String,
    /// The initial message.
    pub message: Option<String>,
    /// The IP address of the customer.
    pub ip_address: String,
    /// The country code of the customer.
    pub country_code: String,
    /// The avatar of the customer.
    pub avatar_url: String,
    /// The conversation, only present on single queries.
    #[serde(default)]
    pub query_message: Vec<QueryMessage>,
    /// Creation timestamp.
    pub created_at: String,
    /// Last update timestamp.
    pub updated_at: String,
}

/// A message in a query conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryMessage {
    /// The message text.
    pub message: String,
    /// Whether the seller wrote the message.
    pub is_seller: bool,
    /// Creation timestamp.
    pub created_at: String,
    /// Last update timestamp.
    pub updated_at: String,
}

/// The payload of a `createPayment` call. Unset fields are omitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    /// The payment title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// The gateway.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gateway: Option<Gateway>,
    /// The email address of the buyer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// The value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    /// The currency.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    /// Required crypto confirmations.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confirmations: Option<u32>,
    /// Where the buyer is sent after paying.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_url: Option<String>,
    /// URL notified about the payment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webhook_url: Option<String>,
    /// Whether the payment page is white-labeled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub white_label: Option<bool>,
    /// The IP address of the buyer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
}

/// Response of a `createPayment` call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatedPayment {
    /// The payment ID.
    pub id: String,
    /// The status.
    pub status: i64,
    /// The crypto address to pay to.
    pub crypto_address: Option<String>,
    /// The value in crypto currency.
    pub crypto_value: Option<f64>,
    /// Confirmations needed.
    pub confirmations_needed: u32,
    /// The product ID.
    pub product_id: String,
    /// The email address of the buyer.
    pub email: String,
    /// The value, as returned by the API.
    pub value: String,
    /// The quantity.
    pub quantity: u32,
    /// The currency.
    pub currency: String,
    /// The gateway.
    pub gateway: Gateway,
    /// The crypto payment channel.
    pub crypto_channel: Option<String>,
    /// The exchange rate, as returned by the API.
    pub exchange_rate: String,
    /// The payment page.
    pub url: String,
    /// Creation timestamp.
    pub created_at: String,
    /// Last update timestamp.
    pub updated_at: String,
}

/// Response of a `deletePayment` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletedPayment {
    /// Whether the payment was deleted.
    pub status: bool,
}
