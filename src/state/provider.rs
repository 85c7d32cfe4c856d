//! Provider record definitions
//!
//! One row of the harvested dataset.

/// Column names of an exported provider table, in order
pub const COLUMNS: [&str; 7] = [
    "name",
    "website",
    "cities",
    "hour rate",
    "min project size",
    "rating for cost",
    "number of reviews",
];

/// Separator placed between cities when a record is flattened to a row
pub const CITY_SEPARATOR: &str = "; ";

/// Structured data of one provider profile
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProviderRecord {
    /// Company name as shown in the profile title
    pub name: String,

    /// Destination of the profile's website button
    pub website: String,

    /// Office cities in the configured country, in profile order
    pub cities: Vec<String>,

    pub hour_rate: String,

    pub min_project_size: String,

    pub rating_for_cost: String,

    /// Digits of the review counter; empty when the counter has none
    pub number_of_reviews: String,
}

impl ProviderRecord {
    /// Key the result set deduplicates on
    pub fn dedup_key(&self) -> String {
        self.name.to_lowercase()
    }

    /// Flattens the record into cells matching [`COLUMNS`]
    pub fn to_row(&self) -> [String; 7] {
        [
            self.name.clone(),
            self.website.clone(),
            self.cities.join(CITY_SEPARATOR),
            self.hour_rate.clone(),
            self.min_project_size.clone(),
            self.rating_for_cost.clone(),
            self.number_of_reviews.clone(),
        ]
    }

    /// Rebuilds a record from cells produced by [`ProviderRecord::to_row`]
    pub fn from_row(row: [String; 7]) -> Self {
        let [name, website, cities, hour_rate, min_project_size, rating_for_cost, number_of_reviews] =
            row;
        Self {
            name,
            website,
            cities: split_cities(&cities),
            hour_rate,
            min_project_size,
            rating_for_cost,
            number_of_reviews,
        }
    }
}

fn split_cities(joined: &str) -> Vec<String> {
    if joined.is_empty() {
        return Vec::new();
    }
    joined.split(CITY_SEPARATOR).map(str::to_string).collect()
}
