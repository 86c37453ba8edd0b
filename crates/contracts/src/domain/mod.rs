pub mod a001_product;
pub mod a002_category;
pub mod a003_attribute;
pub mod a004_option;
pub mod a005_marketplace;
pub mod a006_supplier;
pub mod a007_store;
pub mod a008_affiliate;
pub mod a009_customer;
pub mod a010_order;
pub mod a011_invoice;
pub mod a012_admin_account;
pub mod common;
