//! Query handlers for the World context.
//!
//! The world is static, so these read straight from the location table and
//! return view DTOs for the front end to render.

use glacial_core::error::DomainError;
use serde::Serialize;

use crate::domain::locations::{LocationId, can_travel};
use crate::domain::weather::WeatherType;

/// Read-only view of a location.
#[derive(Debug, Clone, Serialize)]
pub struct LocationView {
    /// The location identifier.
    pub id: LocationId,
    /// Display name.
    pub name: String,
    /// Flavor text.
    pub description: String,
    /// Locations reachable in one move.
    pub connections: Vec<LocationId>,
}

impl From<LocationId> for LocationView {
    fn from(id: LocationId) -> Self {
        let location = id.location();
        Self {
            id,
            name: location.name.to_owned(),
            description: location.description.to_owned(),
            connections: location.connections.to_vec(),
        }
    }
}

/// A node of the world map.
#[derive(Debug, Serialize)]
pub struct MapNodeView {
    /// The location identifier.
    pub id: LocationId,
    /// Display name.
    pub name: String,
    /// Flavor text.
    pub description: String,
    /// Whether the player stands here.
    pub is_current: bool,
    /// Whether the player can move here in one step.
    pub reachable: bool,
}

/// A directed edge of the world map, one per listed connection.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct MapLinkView {
    /// Where the connection is listed.
    pub source: LocationId,
    /// Where it leads.
    pub target: LocationId,
}

/// Node/link data for drawing the world map.
#[derive(Debug, Serialize)]
pub struct WorldMapView {
    /// The player's location.
    pub current: LocationId,
    /// All locations.
    pub nodes: Vec<MapNodeView>,
    /// All listed connections.
    pub links: Vec<MapLinkView>,
}

/// Read-only view of one weather type.
#[derive(Debug, Serialize)]
pub struct WeatherTypeView {
    /// Weather kind.
    #[serde(rename = "type")]
    pub kind: WeatherType,
    /// Flavor text.
    pub description: String,
}

/// Lists every location in map order.
#[must_use]
pub fn list_locations() -> Vec<LocationView> {
    LocationId::ALL.into_iter().map(LocationView::from).collect()
}

/// Looks up a location by its wire identifier.
///
/// # Errors
///
/// Returns `DomainError::LocationNotFound` if the identifier is unknown.
pub fn get_location(id: &str) -> Result<LocationView, DomainError> {
    let id: LocationId = id.parse()?;
    Ok(LocationView::from(id))
}

/// Builds the map read model as seen from `current`.
#[must_use]
pub fn get_world_map(current: LocationId) -> WorldMapView {
    let nodes = LocationId::ALL
        .into_iter()
        .map(|id| MapNodeView {
            id,
            name: id.location().name.to_owned(),
            description: id.location().description.to_owned(),
            is_current: id == current,
            reachable: can_travel(current, id),
        })
        .collect();

    let links = LocationId::ALL
        .into_iter()
        .flat_map(|source| {
            source
                .location()
                .connections
                .iter()
                .map(move |&target| MapLinkView { source, target })
        })
        .collect();

    WorldMapView {
        current,
        nodes,
        links,
    }
}

/// Lists the weather table.
#[must_use]
pub fn list_weather_types() -> Vec<WeatherTypeView> {
    WeatherType::ALL
        .into_iter()
        .map(|kind| WeatherTypeView {
            kind,
            description: kind.description().to_owned(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_locations_returns_all_six_in_order() {
        let views = list_locations();

        let ids: Vec<LocationId> = views.iter().map(|v| v.id).collect();
        assert_eq!(ids, LocationId::ALL.to_vec());
        assert_eq!(views[1].name, "Pine Heart Forest");
    }

    #[test]
    fn test_get_location_returns_view() {
        let view = get_location("crystal_cave").unwrap();

        assert_eq!(view.id, LocationId::CrystalCave);
        assert_eq!(view.name, "Crystal Cave");
        assert_eq!(view.connections, vec![LocationId::PineHeart]);
    }

    #[test]
    fn test_get_location_rejects_unknown_id() {
        let result = get_location("nowhere");

        match result {
            Err(DomainError::LocationNotFound(id)) => assert_eq!(id, "nowhere"),
            other => panic!("expected LocationNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_world_map_marks_current_and_reachable_nodes() {
        // Act
        let map = get_world_map(LocationId::PineHeart);

        // Assert
        assert_eq!(map.current, LocationId::PineHeart);
        let current: Vec<LocationId> = map
            .nodes
            .iter()
            .filter(|n| n.is_current)
            .map(|n| n.id)
            .collect();
        assert_eq!(current, vec![LocationId::PineHeart]);

        let reachable: Vec<LocationId> = map
            .nodes
            .iter()
            .filter(|n| n.reachable)
            .map(|n| n.id)
            .collect();
        assert_eq!(
            reachable,
            vec![
                LocationId::TundraEdge,
                LocationId::MammothValley,
                LocationId::CrystalCave,
            ]
        );
    }

    #[test]
    fn test_world_map_lists_one_link_per_connection() {
        let map = get_world_map(LocationId::TundraEdge);

        assert_eq!(map.links.len(), 10);
        assert!(map.links.contains(&MapLinkView {
            source: LocationId::FrozenLake,
            target: LocationId::MammothValley,
        }));
    }

    #[test]
    fn test_list_weather_types_covers_table() {
        let table = list_weather_types();

        assert_eq!(table.len(), 4);
        assert_eq!(table[3].kind, WeatherType::Blizzard);
    }
}
