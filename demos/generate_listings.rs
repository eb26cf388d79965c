use std::env;
use std::fs::{create_dir_all, File};
use std::io::{self, stdout, Write};
use std::path::Path;

use chrono::{Duration, NaiveDate};
use rand::seq::SliceRandom;
use rand::Rng;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;

const PROBABILITY_DUPLICATE: f64 = 0.03;
const PROBABILITY_MISSING_PRICE: f64 = 0.05;
const PROBABILITY_FORMATTED_PRICE: f64 = 0.10;
const PROBABILITY_BROKEN_PRICE: f64 = 0.005;
const PROBABILITY_MISSING_RATING: f64 = 0.15;
const PROBABILITY_BROKEN_COORDINATES: f64 = 0.02;
const PROBABILITY_BROKEN_AVAILABILITY: f64 = 0.01;
const PROBABILITY_BROKEN_DATE: f64 = 0.01;
const PROBABILITY_NO_REVIEWS: f64 = 0.20;

const NEIGHBOURHOODS: [(&str, f64, f64); 6] = [
    ("Harlem", -73.9465, 40.8116),
    ("Upper West Side", -73.9754, 40.7870),
    ("Williamsburg", -73.9571, 40.7081),
    ("Soho", -74.0020, 40.7233),
    ("Astoria", -73.9232, 40.7644),
    ("Bushwick", -73.9213, 40.6958)
];
const ROOM_TYPES: [&str; 4] = ["Entire home/apt", "Private room", "Shared room", "Hotel room"];
const PROPERTY_TYPES: [&str; 5] = ["Apartment", "House", "Loft", "Condominium", "Townhouse"];
const HEADER: &str = "id,name,price,rating,neighbourhood,room_type,property_type,coordinates,availability_365,availability_start_date,availability_end_date,reviews_per_month";

struct GeneratorConfig {
    num_listings: usize,
    output_path: String
}

impl GeneratorConfig {
    fn from_args() -> Self {
        let args: Vec<String> = env::args().collect();
        let num_listings = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(100_000);
        let output_path = args.get(2).cloned().unwrap_or_else(|| "samples/generated_listings.csv".to_string());

        Self {
            num_listings,
            output_path
        }
    }
}

fn main() -> io::Result<()> {
    let config = GeneratorConfig::from_args();

    println!("Generating {} listings in {}...", config.num_listings, config.output_path);

    if let Some(parent) = Path::new(&config.output_path).parent() {
        create_dir_all(parent)?;
    }

    let file = File::create(&config.output_path)?;
    let mut writer = io::BufWriter::new(file);

    writeln!(writer, "{HEADER}")?;

    let mut rng = rand::thread_rng();
    let mut previous: Option<String> = None;

    for listing_id in 1..=config.num_listings {
        let line = match previous.take() {
            Some(line) if rng.gen_bool(PROBABILITY_DUPLICATE) => line,
            _ => generate_listing(&mut rng, listing_id)
        };

        writeln!(writer, "{line}")?;
        previous = Some(line);

        if listing_id % 10_000 == 0 {
            print!(".");
            stdout().flush()?;
        }
    }

    println!("\nGeneration complete.");

    Ok(())
}

fn generate_listing<R: Rng>(rng: &mut R, listing_id: usize) -> String {
    let (neighbourhood, longitude, latitude) = *NEIGHBOURHOODS.choose(rng).unwrap();
    let room_type = ROOM_TYPES.choose(rng).unwrap();
    let property_type = PROPERTY_TYPES.choose(rng).unwrap();

    let (start_date, end_date) = generate_availability_window(rng);

    [
        listing_id.to_string(),
        format!("{property_type} in {neighbourhood} #{listing_id}"),
        generate_price(rng),
        generate_rating(rng),
        neighbourhood.to_string(),
        room_type.to_string(),
        property_type.to_string(),
        generate_coordinates(rng, longitude, latitude),
        generate_availability(rng),
        start_date,
        end_date,
        generate_reviews_per_month(rng)
    ].join(",")
}

fn random_decimal<R: Rng>(rng: &mut R, min: f64, max: f64, scale: u32) -> Decimal {
    Decimal::from_f64(rng.gen_range(min..max)).unwrap().round_dp(scale)
}

fn generate_price<R: Rng>(rng: &mut R) -> String {
    let amount = random_decimal(rng, 25.0, 1500.0, 2);

    if rng.gen_bool(PROBABILITY_MISSING_PRICE) {
        String::new()
    } else if rng.gen_bool(PROBABILITY_BROKEN_PRICE) {
        "call for price".to_string()
    } else if rng.gen_bool(PROBABILITY_FORMATTED_PRICE) {
        format!("\"${amount:.2}\"")
    } else {
        amount.to_string()
    }
}

fn generate_rating<R: Rng>(rng: &mut R) -> String {
    if rng.gen_bool(PROBABILITY_MISSING_RATING) {
        String::new()
    } else {
        rng.gen_range(60..=100).to_string()
    }
}

fn generate_coordinates<R: Rng>(rng: &mut R, longitude: f64, latitude: f64) -> String {
    if rng.gen_bool(PROBABILITY_BROKEN_COORDINATES) {
        let broken = ["bad", "\"1,2,3\"", "unknown", "\"40.7, north\""];
        return broken.choose(rng).unwrap().to_string();
    }

    let longitude = random_decimal(rng, longitude - 0.01, longitude + 0.01, 5);
    let latitude = random_decimal(rng, latitude - 0.01, latitude + 0.01, 5);

    format!("\"{longitude}, {latitude}\"")
}

fn generate_availability<R: Rng>(rng: &mut R) -> String {
    if rng.gen_bool(PROBABILITY_BROKEN_AVAILABILITY) {
        rng.gen_range(366..1000).to_string()
    } else {
        rng.gen_range(0..=365).to_string()
    }
}

fn generate_availability_window<R: Rng>(rng: &mut R) -> (String, String) {
    let first_day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let start = first_day + Duration::days(rng.gen_range(0..365));
    let end = start + Duration::days(rng.gen_range(1..180));

    if rng.gen_bool(PROBABILITY_BROKEN_DATE) {
        return (start.to_string(), "someday".to_string());
    }

    (start.to_string(), end.and_hms_opt(12, 0, 0).unwrap().format("%Y-%m-%d %H:%M:%S").to_string())
}

fn generate_reviews_per_month<R: Rng>(rng: &mut R) -> String {
    if rng.gen_bool(PROBABILITY_NO_REVIEWS) {
        String::new()
    } else {
        random_decimal(rng, 0.01, 12.0, 2).to_string()
    }
}
