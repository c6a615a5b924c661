mod reservation_service;

pub use reservation_service::{
    ReservationDependencies, close_reservation, create_reservation, get_reservation,
    list_reservations, rented_amount,
};
