use aqi_core::gateway::{or_fallback, HttpGateway};
use aqi_core::place::Place;
use log::info;

/// Geocode `query`, degrading to no results on failure.
pub async fn find_places(gateway: &HttpGateway, query: &str) -> Vec<Place> {
    let places = or_fallback(
        gateway.geocode(query).await,
        Vec::new(),
        "Searching for locations",
    );
    info!("{} places found for {:?}", places.len(), query);
    places
}

/// First geocoding hit for `query`.
pub async fn first_place(gateway: &HttpGateway, query: &str) -> anyhow::Result<Place> {
    match find_places(gateway, query).await.into_iter().next() {
        Some(place) => Ok(place),
        None => anyhow::bail!("No location found for {:?}", query),
    }
}

pub async fn run_search(gateway: &HttpGateway, query: &str) -> anyhow::Result<()> {
    let places = find_places(gateway, query).await;
    if places.is_empty() {
        println!("No locations found.");
    }
    for (i, place) in places.iter().enumerate() {
        println!(
            "{}. {} ({:.5}, {:.5})",
            i + 1,
            place.display_name,
            place.lat,
            place.lon
        );
    }
    Ok(())
}
