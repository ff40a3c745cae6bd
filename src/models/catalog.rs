use bigdecimal::BigDecimal;
use diesel::prelude::*;

/// Client model for reading from database
#[derive(Debug, Queryable, Selectable, Clone)]
#[diesel(table_name = crate::schema::clients)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Client {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub phone: String,
}

/// Barber model for reading from database
#[derive(Debug, Queryable, Selectable, Clone)]
#[diesel(table_name = crate::schema::barbers)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Barber {
    pub id: i32,
    pub name: String,
}

/// Service model for reading from database
#[derive(Debug, Queryable, Selectable, Clone)]
#[diesel(table_name = crate::schema::services)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Service {
    pub id: i32,
    pub name: String,
    pub price: BigDecimal,
    pub duration_minutes: i32,
}
