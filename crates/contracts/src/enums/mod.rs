pub mod order_status;
pub mod verifactu_status;

pub use order_status::OrderStatus;
pub use verifactu_status::VerifactuStatus;
