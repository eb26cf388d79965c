/// Canonical listing fields the pipeline and views understand.
///
/// Sources name the same field differently: a scraped CSV has `neighbourhood`,
/// a `listingsAndReviews` document has `address.suburb`. Each field carries the
/// source column names it may appear under, in order of preference.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Field {
    Id,
    Name,
    Price,
    Rating,
    Neighbourhood,
    RoomType,
    PropertyType,
    Coordinates,
    Longitude,
    Latitude,
    Availability365,
    AvailabilityStart,
    AvailabilityEnd,
    ReviewsPerMonth
}

impl Field {
    pub const ALL: [Field; 14] = [
        Field::Id,
        Field::Name,
        Field::Price,
        Field::Rating,
        Field::Neighbourhood,
        Field::RoomType,
        Field::PropertyType,
        Field::Coordinates,
        Field::Longitude,
        Field::Latitude,
        Field::Availability365,
        Field::AvailabilityStart,
        Field::AvailabilityEnd,
        Field::ReviewsPerMonth
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Field::Id => "id",
            Field::Name => "name",
            Field::Price => "price",
            Field::Rating => "rating",
            Field::Neighbourhood => "neighbourhood",
            Field::RoomType => "room_type",
            Field::PropertyType => "property_type",
            Field::Coordinates => "coordinates",
            Field::Longitude => "longitude",
            Field::Latitude => "latitude",
            Field::Availability365 => "availability_365",
            Field::AvailabilityStart => "availability_start_date",
            Field::AvailabilityEnd => "availability_end_date",
            Field::ReviewsPerMonth => "reviews_per_month"
        }
    }

    /// Whether a source column name is one of this field's aliases, ignoring case.
    pub fn matches(&self, column: &str) -> bool {
        let column = column.trim().to_lowercase();
        self.aliases().contains(&column.as_str())
    }

    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            Field::Id => &["id", "_id", "listing_id"],
            Field::Name => &["name"],
            Field::Price => &["price"],
            Field::Rating => &["rating", "review_scores.review_scores_rating", "review_scores_rating"],
            Field::Neighbourhood => &["neighbourhood", "neighbourhood_cleansed", "neighborhood", "suburb", "address.suburb"],
            Field::RoomType => &["room_type"],
            Field::PropertyType => &["property_type"],
            Field::Coordinates => &["coordinates", "location.coordinates", "address.location.coordinates"],
            Field::Longitude => &["longitude"],
            Field::Latitude => &["latitude"],
            Field::Availability365 => &["availability_365", "availability.availability_365"],
            Field::AvailabilityStart => &["availability_start_date", "availability.start_date"],
            Field::AvailabilityEnd => &["availability_end_date", "availability.end_date"],
            Field::ReviewsPerMonth => &["reviews_per_month"]
        }
    }
}
