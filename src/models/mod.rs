mod catalog;
mod turn;

pub use catalog::{Barber, Client, Service};
pub use turn::{NewTurn, Turn, TurnWithRelations, UpdateTurn};
