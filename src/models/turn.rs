use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::models::{Barber, Client, Service};

/// Turn model for reading from database
/// Derives Queryable for SELECT operations and Selectable for type-safe column selection
#[derive(Debug, Queryable, Selectable, Clone)]
#[diesel(table_name = crate::schema::turns)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Turn {
    pub id: i32,
    pub date: DateTime<Utc>,
    pub service_id: i32,
    pub barber_id: i32,
    pub client_id: i32,
}

/// NewTurn model for inserting new records
/// Derives Insertable for INSERT operations
#[derive(Debug, Insertable, Clone)]
#[diesel(table_name = crate::schema::turns)]
pub struct NewTurn {
    pub date: DateTime<Utc>,
    pub service_id: i32,
    pub barber_id: i32,
    pub client_id: i32,
}

/// UpdateTurn model for full-replacement updates
/// All four fields are overwritten together, so none are optional
#[derive(Debug, AsChangeset, Clone)]
#[diesel(table_name = crate::schema::turns)]
pub struct UpdateTurn {
    pub date: DateTime<Utc>,
    pub service_id: i32,
    pub barber_id: i32,
    pub client_id: i32,
}

/// A turn joined with the catalog rows it references.
///
/// This is the read shape for list and get operations, where the raw
/// foreign keys are replaced by the full associated records.
#[derive(Debug, Clone)]
pub struct TurnWithRelations {
    pub turn: Turn,
    pub service: Service,
    pub barber: Barber,
    pub client: Client,
}

impl From<(Turn, Service, Barber, Client)> for TurnWithRelations {
    fn from((turn, service, barber, client): (Turn, Service, Barber, Client)) -> Self {
        Self {
            turn,
            service,
            barber,
            client,
        }
    }
}
