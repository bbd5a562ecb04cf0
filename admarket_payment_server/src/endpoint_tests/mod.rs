mod catalog;
#[cfg(feature = "stripe")]
mod checkout;
mod helpers;
mod mocks;
mod verify;
