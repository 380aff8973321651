pub mod hotel;
pub mod hotel_facility;
pub mod hotel_image;
pub mod hotel_order;
pub mod hotel_policy;
pub mod hotel_room;
pub mod hotel_room_facility;
pub mod hotel_room_image;
pub mod notification;
pub mod payment;
pub mod station;
pub mod template_message;
pub mod ticket_order;
pub mod ticket_traveler_detail;
pub mod train;
pub mod train_carriage;
pub mod train_seat;
pub mod train_station;
pub mod traveler_detail;
pub mod user;
