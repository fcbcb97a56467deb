pub mod db;
pub mod qr;

pub use db::DbAdapter;
pub use qr::QrCodeAdapter;
