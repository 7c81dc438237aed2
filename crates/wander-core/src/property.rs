//! Property listing model
//!
//! Mirrors the backend `properties` row that showcase posts and the
//! property-detail screens reference. The client reads listings; all
//! writes (drafting, pricing, availability) happen in the host tooling
//! and stay out of this core.

use crate::identifiers::{PropertyId, UserId};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Kind of accommodation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    /// Apartment
    Apartment,
    /// Whole house
    House,
    /// Villa
    Villa,
    /// Private room
    Room,
    /// Studio
    Studio,
    /// Loft
    Loft,
    /// Cottage
    Cottage,
    /// Bungalow
    Bungalow,
    /// Anything else
    Other,
}

/// Listing lifecycle state; only active listings are shown to guests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyStatus {
    /// Being drafted by the host
    Draft,
    /// Published and bookable
    Active,
    /// Temporarily hidden
    Inactive,
    /// Retired
    Archived,
}

/// A property listing row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    /// Row id
    pub id: PropertyId,
    /// Owning user
    pub owner_id: UserId,
    /// Managing host (usually the owner)
    pub host_id: UserId,

    // Basic info
    /// Listing title
    pub title: String,
    /// Long-form description
    pub description: String,
    /// Accommodation kind
    #[serde(rename = "type")]
    pub property_type: PropertyType,
    /// Lifecycle state
    pub status: PropertyStatus,

    // Location
    /// Street address
    pub address: String,
    /// City
    pub city: String,
    /// State or region, where applicable
    pub state: Option<String>,
    /// Country
    pub country: String,
    /// Postal code, where applicable
    pub postal_code: Option<String>,
    /// Latitude
    pub latitude: f64,
    /// Longitude
    pub longitude: f64,

    // Capacity
    /// Bedroom count
    pub bedrooms: u32,
    /// Bathroom count
    pub bathrooms: u32,
    /// Bed count
    pub beds: u32,
    /// Maximum guests
    pub max_guests: u32,

    // Pricing
    /// Nightly base price
    pub base_price_per_night: f64,
    /// ISO currency code
    pub currency: String,
    /// One-off cleaning fee, if charged
    pub cleaning_fee: Option<f64>,

    // Media
    /// Photo URLs in display order
    pub images: Vec<String>,
    /// Walkthrough video, if any
    pub video_url: Option<String>,
    /// Virtual tour link, if any
    pub virtual_tour_url: Option<String>,

    // Amenities and rules
    /// Amenity tags
    pub amenities: Vec<String>,
    /// House rules shown before booking
    pub house_rules: Vec<String>,
    /// Earliest check-in, as backend-formatted local time
    pub check_in_time: Option<String>,
    /// Latest check-out, as backend-formatted local time
    pub check_out_time: Option<String>,
    /// Minimum stay in nights
    pub minimum_stay: u32,
    /// Maximum stay in nights, if capped
    pub maximum_stay: Option<u32>,

    // Status flags
    /// Visible to guests
    pub is_active: bool,
    /// Promoted in discovery
    pub is_featured: bool,
    /// Bookable without host approval
    pub instant_book: bool,

    // Stats (server-owned)
    /// View count
    pub views_count: i64,
    /// Favorite count
    pub favorites_count: i64,
    /// Completed booking count
    pub bookings_count: i64,
    /// Average review rating, once reviewed
    pub average_rating: Option<f64>,
    /// Review count
    pub reviews_count: i64,

    // Timestamps
    /// Row creation time
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    /// Last row update time
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl Property {
    /// Display label combining city and country, e.g. `Lisbon, Portugal`.
    pub fn location_label(&self) -> String {
        format!("{}, {}", self.city, self.country)
    }

    /// Nightly price formatted with the listing's currency.
    pub fn price_label(&self) -> String {
        crate::format::format_currency(self.base_price_per_night, &self.currency)
    }
}
