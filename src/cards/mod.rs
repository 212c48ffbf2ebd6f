//! Card system: definitions and the catalog.
//!
//! ## Key Types
//!
//! - `CardId`: Identifier of a card (every card is unique)
//! - `FactionId`: Faction tag printed on a card
//! - `CardDefinition`: Power and faction memberships
//! - `CardCatalog`: Card lookup plus faction display names

pub mod definition;
pub mod registry;

pub use definition::{CardDefinition, CardId, FactionId, FactionList};
pub use registry::CardCatalog;
