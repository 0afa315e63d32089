use std::{fs::File, io, io::Read, path::Path, str::FromStr};

use serde::Deserialize;

use crate::{
    error::{AppError, AppResult},
    models::{PriceTier, Restaurant},
};

/// Columns every record is guaranteed to carry after load
pub const REQUIRED_COLUMNS: [&str; 11] = [
    "name",
    "address",
    "rating",
    "user_ratings_total",
    "lat",
    "lng",
    "price_level",
    "location_label",
    "category_tag",
    "opening_hours",
    "map_url",
];

/// Older exports name the category column this way
const CATEGORY_FALLBACK_COLUMN: &str = "predicted_tags";

/// One CSV row as text. Columns absent from the header deserialize as `None`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawRecord {
    name: Option<String>,
    address: Option<String>,
    rating: Option<String>,
    user_ratings_total: Option<String>,
    lat: Option<String>,
    lng: Option<String>,
    price_level: Option<String>,
    location_label: Option<String>,
    category_tag: Option<String>,
    predicted_tags: Option<String>,
    opening_hours: Option<String>,
    map_url: Option<String>,
}

/// Opens `path` and loads it with [`load_from_reader`]
pub fn load_from_path(path: &Path, tag_delimiter: &str) -> AppResult<Vec<Restaurant>> {
    let file = File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => AppError::DataSourceNotFound(path.to_path_buf()),
        _ => AppError::DataLoad(format!("{}: {}", path.display(), e)),
    })?;

    tracing::info!(path = %path.display(), "Loading restaurant dataset");
    load_from_reader(file, tag_delimiter)
}

/// Reads CSV restaurant records, filling missing columns with no value
pub fn load_from_reader<R: Read>(reader: R, tag_delimiter: &str) -> AppResult<Vec<Restaurant>> {
    let mut reader = csv::ReaderBuilder::new().has_headers(true).from_reader(reader);

    let headers = reader.headers()?.clone();
    let has_column = |column: &str| headers.iter().any(|h| h.trim() == column);

    let use_fallback_category = !has_column("category_tag") && has_column(CATEGORY_FALLBACK_COLUMN);
    for column in REQUIRED_COLUMNS {
        if has_column(column) || (column == "category_tag" && use_fallback_category) {
            continue;
        }
        tracing::warn!(column, "Required column missing from dataset; filling with no value");
    }
    if use_fallback_category {
        tracing::info!(
            column = CATEGORY_FALLBACK_COLUMN,
            "Using fallback column for category tags"
        );
    }

    let mut restaurants = Vec::new();
    let mut skipped = 0usize;

    for (index, row) in reader.deserialize::<RawRecord>().enumerate() {
        // Header is line 1
        let line = index + 2;
        let raw = row?;

        match into_restaurant(raw, tag_delimiter, use_fallback_category, line) {
            Some(restaurant) => restaurants.push(restaurant),
            None => {
                skipped += 1;
                tracing::warn!(line, "Skipping row without a name");
            }
        }
    }

    tracing::info!(
        loaded = restaurants.len(),
        skipped,
        "Restaurant dataset loaded"
    );

    Ok(restaurants)
}

fn into_restaurant(
    raw: RawRecord,
    tag_delimiter: &str,
    use_fallback_category: bool,
    line: usize,
) -> Option<Restaurant> {
    let name = clean(raw.name)?;

    let categories = if use_fallback_category {
        raw.predicted_tags
    } else {
        raw.category_tag
    };

    Some(Restaurant {
        name,
        address: clean(raw.address),
        rating: parse_number::<f64>(raw.rating, "rating", line).filter(|r| r.is_finite()),
        user_ratings_total: parse_count(raw.user_ratings_total, line),
        lat: parse_number::<f64>(raw.lat, "lat", line).filter(|v| v.is_finite()),
        lng: parse_number::<f64>(raw.lng, "lng", line).filter(|v| v.is_finite()),
        price_level: parse_number::<PriceTier>(raw.price_level, "price_level", line),
        location_tags: split_tags(raw.location_label.as_deref(), tag_delimiter),
        category_tags: split_tags(categories.as_deref(), tag_delimiter),
        opening_hours: clean(raw.opening_hours),
        map_url: clean(raw.map_url),
    })
}

/// Trims a field and maps blanks and null spellings to no value
fn clean(value: Option<String>) -> Option<String> {
    let value = value?;
    let trimmed = value.trim();
    if trimmed.is_empty() || is_null_marker(trimmed) {
        return None;
    }
    Some(trimmed.to_string())
}

fn is_null_marker(value: &str) -> bool {
    ["nan", "none", "null"]
        .iter()
        .any(|marker| value.eq_ignore_ascii_case(marker))
}

fn parse_number<T: FromStr>(value: Option<String>, column: &'static str, line: usize) -> Option<T> {
    let value = clean(value)?;
    match value.parse::<T>() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            tracing::debug!(line, column, value = %value, "Ignoring unparseable value");
            None
        }
    }
}

/// Counts are often exported as floats (`"120.0"`)
fn parse_count(value: Option<String>, line: usize) -> Option<u64> {
    let count = parse_number::<f64>(value, "user_ratings_total", line)?;
    if count.is_finite() && count >= 0.0 {
        Some(count.trunc() as u64)
    } else {
        tracing::debug!(line, count, "Ignoring invalid rating count");
        None
    }
}

/// Splits a multi-valued column into trimmed tags, dropping blanks and `none`
pub fn split_tags(value: Option<&str>, delimiter: &str) -> Vec<String> {
    let Some(value) = value else {
        return Vec::new();
    };
    value
        .split(delimiter)
        .map(str::trim)
        .filter(|tag| !tag.is_empty() && !is_null_marker(tag))
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_CSV: &str = "\
name,address,rating,user_ratings_total,lat,lng,price_level,location_label,category_tag,opening_hours,map_url
麵屋一燈,台北市大安區,4.5,1200.0,25.01,121.53,2.0,\"公館, 溫州街\",\"日式,麵食\",\"星期一：11:00 - 星期一 21:00\",https://maps.example/1
小吃攤,,,,,,,none,,,
";

    #[test]
    fn test_load_full_schema() {
        let restaurants = load_from_reader(FULL_CSV.as_bytes(), ",").unwrap();
        assert_eq!(restaurants.len(), 2);

        let first = &restaurants[0];
        assert_eq!(first.name, "麵屋一燈");
        assert_eq!(first.rating, Some(4.5));
        assert_eq!(first.user_ratings_total, Some(1200));
        assert_eq!(first.price_level.map(PriceTier::code), Some(2));
        assert_eq!(first.location_tags, vec!["公館", "溫州街"]);
        assert_eq!(first.category_tags, vec!["日式", "麵食"]);
        assert_eq!(first.map_url.as_deref(), Some("https://maps.example/1"));

        let second = &restaurants[1];
        assert_eq!(second.address, None);
        assert_eq!(second.rating, None);
        assert_eq!(second.user_ratings_total, None);
        assert_eq!(second.price_level, None);
        assert!(second.location_tags.is_empty());
        assert_eq!(second.opening_hours, None);
    }

    #[test]
    fn test_missing_columns_are_filled() {
        let csv = "name,rating\n鍋神,4.1\n";
        let restaurants = load_from_reader(csv.as_bytes(), ",").unwrap();
        assert_eq!(restaurants.len(), 1);
        assert_eq!(restaurants[0].rating, Some(4.1));
        assert_eq!(restaurants[0].address, None);
        assert_eq!(restaurants[0].opening_hours, None);
        assert!(restaurants[0].category_tags.is_empty());
    }

    #[test]
    fn test_predicted_tags_fallback() {
        let csv = "name,predicted_tags\n雪花冰,\"冰店, 甜點\"\n";
        let restaurants = load_from_reader(csv.as_bytes(), ",").unwrap();
        assert_eq!(restaurants[0].category_tags, vec!["冰店", "甜點"]);
    }

    #[test]
    fn test_category_tag_wins_over_fallback() {
        let csv = "name,category_tag,predicted_tags\n雪花冰,冰店,甜點\n";
        let restaurants = load_from_reader(csv.as_bytes(), ",").unwrap();
        assert_eq!(restaurants[0].category_tags, vec!["冰店"]);
    }

    #[test]
    fn test_garbage_numbers_become_no_value() {
        let csv = "name,rating,user_ratings_total,price_level\nX,great,-3,expensive\nY,nan,NaN,\n";
        let restaurants = load_from_reader(csv.as_bytes(), ",").unwrap();
        for restaurant in &restaurants {
            assert_eq!(restaurant.rating, None);
            assert_eq!(restaurant.user_ratings_total, None);
            assert_eq!(restaurant.price_level, None);
        }
    }

    #[test]
    fn test_rows_without_name_are_skipped() {
        let csv = "name,rating\n,4.0\nnan,3.0\n好吃,2.0\n";
        let restaurants = load_from_reader(csv.as_bytes(), ",").unwrap();
        assert_eq!(restaurants.len(), 1);
        assert_eq!(restaurants[0].name, "好吃");
    }

    #[test]
    fn test_ragged_rows_are_a_load_error() {
        let csv = "name,rating\nA,4.0,extra\n";
        let err = load_from_reader(csv.as_bytes(), ",").unwrap_err();
        assert!(matches!(err, AppError::DataLoad(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = load_from_path(Path::new("/definitely/not/here.csv"), ",").unwrap_err();
        assert!(matches!(err, AppError::DataSourceNotFound(_)));
    }

    #[test]
    fn test_split_tags() {
        assert_eq!(split_tags(Some(" a ,b,, None ,c"), ","), vec!["a", "b", "c"]);
        assert_eq!(split_tags(Some("a|b"), "|"), vec!["a", "b"]);
        assert!(split_tags(None, ",").is_empty());
    }
}
