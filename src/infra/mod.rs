//! Record-store clients the pricing service reads through.

pub mod file_store;
pub mod store;

pub use file_store::FileRankStore;
pub use store::{HttpRankStore, RankStore, StaticRankStore, StoreError};
