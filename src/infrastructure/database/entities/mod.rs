//! Database entities module

pub mod hotel;
pub mod reservation;
pub mod reservation_status_history;
pub mod room;
pub mod room_type;
pub mod room_type_daily_price;
pub mod room_type_inventory;

pub use hotel::Entity as Hotel;
pub use reservation::Entity as Reservation;
pub use reservation_status_history::Entity as ReservationStatusHistory;
pub use room::Entity as Room;
pub use room_type::Entity as RoomType;
pub use room_type_daily_price::Entity as RoomTypeDailyPrice;
pub use room_type_inventory::Entity as RoomTypeInventory;
