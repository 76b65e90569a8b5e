//! # checkout-core
//!
//! Types shared by the order service and the checkout client, plus the
//! client-side order lifecycle.
//!
//! ## Order Lifecycle
//!
//! ```text
//! ┌──────────────┐  create   ┌───────────────┐  token + order   ┌──────────┐
//! │   Checkout   │──────────▶│ Order Service │─────────────────▶│ Provider │
//! │    Client    │◀──────────│               │◀─────────────────│   API    │
//! │ (CheckoutFlow│  order.id └───────────────┘                  └──────────┘
//! │   + widget)  │  capture        │   token + capture               ▲
//! │              │────────────────▶│─────────────────────────────────┘
//! └──────────────┘◀── session ─────┘
//! ```
//!
//! The `OrderApi` trait is the seam between the flow and whatever transport
//! reaches the order service (browser fetch in production, fakes in tests).

pub mod api;
pub mod error;
pub mod flow;
pub mod session;

pub use api::{CaptureResponse, CreateOrderResponse, ErrorResponse};
pub use error::{FlowError, Result};
pub use flow::{CheckoutFlow, CheckoutState, Destination, OrderApi};
pub use session::{SessionUpdate, Tier, TIER_EXTENSION_DAYS};
