use axum::{Json, extract::Query};
use rentsim_core::cities::suggest;
use rentsim_core::market_data::{long_term_rate, short_term_rate};
use rentsim_core::model::{AirbnbData, RentData, RoomType};

use crate::models::{AirbnbDataQuery, CitiesQuery, RentDataQuery};

// ============================================================================
// Market Data Handlers
// ============================================================================

/// `GET /api/rent-data?city=&roomType=`
///
/// Unknown cities get the default city's record; unknown room types count as t2.
pub async fn get_rent_data(Query(query): Query<RentDataQuery>) -> Json<RentData> {
    let room_type = RoomType::parse_or_default(query.room_type.as_deref());
    let rate = long_term_rate(&query.city, room_type);

    tracing::debug!(
        city = %rate.city_key,
        %room_type,
        freshness = rate.freshness.as_str(),
        "rent-data lookup"
    );

    Json(rate.to_wire())
}

/// `GET /api/airbnb-data?city=`
pub async fn get_airbnb_data(Query(query): Query<AirbnbDataQuery>) -> Json<AirbnbData> {
    let rate = short_term_rate(&query.city);

    tracing::debug!(
        city = %rate.city_key,
        freshness = rate.freshness.as_str(),
        "airbnb-data lookup"
    );

    Json(rate.to_wire())
}

/// `GET /api/cities?q=`
pub async fn get_city_suggestions(Query(query): Query<CitiesQuery>) -> Json<Vec<&'static str>> {
    Json(suggest(&query.q))
}
