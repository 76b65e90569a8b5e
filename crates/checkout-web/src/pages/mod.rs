//! Page Components

mod cancel;
mod checkout;
mod complete;

pub use cancel::CancelPaymentPage;
pub use checkout::CheckoutPage;
pub use complete::CompletePaymentPage;
