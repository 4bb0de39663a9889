//! Database entities module

pub mod booking;
pub mod check_in;
pub mod check_out;
pub mod customer;
pub mod hotel;
pub mod password_reset;
pub mod payment;
pub mod room;
pub mod room_type;
pub mod user;

pub use booking::Entity as Booking;
pub use check_in::Entity as CheckIn;
pub use check_out::Entity as CheckOut;
pub use customer::Entity as Customer;
pub use hotel::Entity as Hotel;
pub use password_reset::Entity as PasswordReset;
pub use payment::Entity as Payment;
pub use room::Entity as Room;
pub use room_type::Entity as RoomType;
pub use user::Entity as User;
