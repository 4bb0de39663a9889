//! Demo fixture data
//!
//! Applied at startup when `app.seed_demo_data` is on and no hotel exists.

use tracing::info;

use crate::domain::customer::{CustomerDetails, EmergencyContact};
use crate::domain::hotel::{HotelDetails, RoomTypeDetails};
use crate::domain::room::NewRoom;
use crate::domain::{DomainResult, RepositoryProvider};

struct RoomTypeSeed {
    name: &'static str,
    description: &'static str,
    base_price: i64,
    capacity: i32,
}

const ROOM_TYPES: [RoomTypeSeed; 3] = [
    RoomTypeSeed {
        name: "Standard",
        description: "Queen bed, city view",
        base_price: 8_000,
        capacity: 2,
    },
    RoomTypeSeed {
        name: "Deluxe",
        description: "King bed, balcony",
        base_price: 12_000,
        capacity: 3,
    },
    RoomTypeSeed {
        name: "Family Suite",
        description: "Two bedrooms and a lounge",
        base_price: 20_000,
        capacity: 5,
    },
];

const FLOORS: i32 = 3;
const ROOMS_PER_FLOOR: i32 = 4;

/// Seed one hotel with room types, rooms and two customers.
///
/// Returns false without writing anything when a hotel already exists.
pub async fn seed_demo_data(repos: &dyn RepositoryProvider) -> DomainResult<bool> {
    if !repos.hotels().find_all().await?.is_empty() {
        info!("Hotels table not empty, skipping demo seed");
        return Ok(false);
    }

    let hotel = repos
        .hotels()
        .create(HotelDetails {
            name: "Seaside Grand Hotel".into(),
            address: Some("1 Ocean Drive".into()),
            phone: Some("+1-555-0100".into()),
            email: Some("frontdesk@seaside.example".into()),
            star_rating: Some(4),
        })
        .await?;

    let mut type_ids = Vec::with_capacity(ROOM_TYPES.len());
    for seed in &ROOM_TYPES {
        let rt = repos
            .hotels()
            .create_room_type(
                hotel.id,
                RoomTypeDetails {
                    name: seed.name.into(),
                    description: Some(seed.description.into()),
                    base_price: seed.base_price,
                    capacity: seed.capacity,
                },
            )
            .await?;
        type_ids.push(rt.id);
    }

    // Floor n holds rooms n01..n04; the top floor is suites
    for floor in 1..=FLOORS {
        for idx in 1..=ROOMS_PER_FLOOR {
            let type_idx = (floor - 1) as usize;
            repos
                .rooms()
                .create(NewRoom {
                    hotel_id: hotel.id,
                    room_type_id: type_ids[type_idx.min(type_ids.len() - 1)],
                    number: format!("{}{:02}", floor, idx),
                    floor,
                })
                .await?;
        }
    }

    for (first, last, email, phone) in [
        ("Ada", "Lovelace", "ada@example.com", "+44-20-0001"),
        ("Alan", "Turing", "alan@example.com", "+44-20-0002"),
    ] {
        repos
            .customers()
            .create(CustomerDetails {
                first_name: first.into(),
                last_name: last.into(),
                email: Some(email.into()),
                phone: Some(phone.into()),
                id_document: None,
                address: None,
                emergency_contact: Some(EmergencyContact {
                    name: "Front Desk".into(),
                    phone: "+1-555-0100".into(),
                }),
            })
            .await?;
    }

    info!(
        hotel_id = hotel.id,
        rooms = FLOORS * ROOMS_PER_FLOOR,
        "🌱 Demo data seeded"
    );
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::room::RoomFilter;
    use crate::infrastructure::database::test_support::memory_repos;

    #[tokio::test]
    async fn seeds_once() {
        let repos = memory_repos().await;
        assert!(seed_demo_data(repos.as_ref()).await.unwrap());
        assert!(!seed_demo_data(repos.as_ref()).await.unwrap());

        let rooms = repos.rooms().find_all(RoomFilter::default()).await.unwrap();
        assert_eq!(rooms.len(), 12);
        assert!(rooms.iter().any(|r| r.number == "101"));
        assert_eq!(repos.hotels().find_room_types(None).await.unwrap().len(), 3);
    }
}
