//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&MySqlPool` as the first argument. MySQL has no
//! `RETURNING`, so inserts and updates re-read the affected row.

pub mod announcement_repo;
pub mod brand_repo;
pub mod charger_repo;
pub mod charging_station_repo;
pub mod media_item_repo;
pub mod page_revision_repo;
pub mod partnership_repo;
pub mod static_page_repo;
pub mod user_repo;

pub use announcement_repo::AnnouncementRepo;
pub use brand_repo::BrandRepo;
pub use charger_repo::ChargerRepo;
pub use charging_station_repo::ChargingStationRepo;
pub use media_item_repo::MediaItemRepo;
pub use page_revision_repo::PageRevisionRepo;
pub use partnership_repo::PartnershipRepo;
pub use static_page_repo::StaticPageRepo;
pub use user_repo::UserRepo;

use brandpanel_core::types::DbId;
use sqlx::mysql::MySqlQueryResult;

/// Id assigned by an `INSERT` into an auto-increment table.
pub(crate) fn inserted_id(result: &MySqlQueryResult) -> DbId {
    result.last_insert_id() as DbId
}
