//! City and station lookup over the raw station directory.

use std::collections::{BTreeSet, HashSet};

use crate::rasp::{Country, Settlement, StationsList};

/// A settlement offered on the city picker.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DirectoryCity {
    pub title: String,
}

/// A train station offered on the station picker.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DirectoryStation {
    /// Station name without the city prefix, e.g. "Ярославский вокзал".
    pub title: String,
    /// Code accepted by the search endpoint, e.g. `s2000002`.
    pub yandex_code: String,
}

/// Normalize a name for matching: drop spaces and hyphens, lowercase.
///
/// ```
/// use travel_schedule::directory::normalize;
///
/// assert_eq!(normalize("Санкт-Петербург"), normalize("санкт петербург"));
/// ```
pub fn normalize(value: &str) -> String {
    value
        .chars()
        .filter(|c| *c != ' ' && *c != '-')
        .flat_map(char::to_lowercase)
        .collect()
}

/// Every settlement title in the directory, de-duplicated and sorted.
pub fn cities(list: &StationsList) -> Vec<DirectoryCity> {
    let titles: BTreeSet<&str> = list
        .countries
        .iter()
        .flat_map(|c| &c.regions)
        .flat_map(|r| &r.settlements)
        .map(|s| s.title.as_str())
        .filter(|t| !t.is_empty())
        .collect();

    titles
        .into_iter()
        .map(|title| DirectoryCity {
            title: title.to_string(),
        })
        .collect()
}

/// Train stations of a Russian city, ready for display.
///
/// The city matches on its title, popular title or short title after
/// normalization. Stations must be train stations with a Yandex code and a
/// display name containing Cyrillic. Results are de-duplicated by title;
/// names starting with a letter sort before the rest.
pub fn stations_in_city(list: &StationsList, city: &str) -> Vec<DirectoryStation> {
    let city = city.trim();
    if city.is_empty() {
        return Vec::new();
    }
    let target = normalize(city);

    let mut seen = HashSet::new();
    let mut stations: Vec<DirectoryStation> = list
        .countries
        .iter()
        .filter(|c| is_russia(c))
        .flat_map(|c| &c.regions)
        .flat_map(|r| &r.settlements)
        .filter(|s| settlement_matches(s, &target))
        .flat_map(|s| &s.stations)
        .filter(|st| st.transport_type.as_deref() == Some("train"))
        .filter_map(|st| {
            let code = st
                .codes
                .as_ref()
                .and_then(|c| c.yandex_code.as_deref())
                .filter(|c| !c.is_empty())?;
            let full_title = st
                .title
                .as_deref()
                .or(st.short_title.as_deref())
                .unwrap_or("");
            let title = extract_station_name(full_title, city);
            if title.is_empty() || !has_cyrillic(&title) {
                return None;
            }
            Some(DirectoryStation {
                title,
                yandex_code: code.to_string(),
            })
        })
        .filter(|st| seen.insert(st.title.clone()))
        .collect();

    stations.sort_by(|a, b| {
        let a_letter = starts_with_letter(&a.title);
        let b_letter = starts_with_letter(&b.title);
        b_letter.cmp(&a_letter).then_with(|| a.title.cmp(&b.title))
    });
    stations
}

fn is_russia(country: &Country) -> bool {
    country.title.contains("Россия") || country.title.contains("Russia")
}

fn settlement_matches(settlement: &Settlement, target: &str) -> bool {
    [
        Some(settlement.title.as_str()),
        settlement.popular_title.as_deref(),
        settlement.short_title.as_deref(),
    ]
    .into_iter()
    .flatten()
    .any(|name| normalize(name) == target)
}

/// Strip the city from a full station title.
///
/// "Москва, Курский вокзал" and "Москва (Курский вокзал)" both yield
/// "Курский вокзал"; "Тверь Пассажирская" in Тверь yields "Пассажирская".
pub fn extract_station_name(full_title: &str, city: &str) -> String {
    if let Some((_, rest)) = full_title.split_once(',') {
        return rest.trim().to_string();
    }

    if let (Some(open), Some(close)) = (full_title.find('('), full_title.find(')'))
        && open < close
    {
        return full_title[open + 1..close].trim().to_string();
    }

    if normalize(full_title).starts_with(&normalize(city)) {
        let rest: String = full_title.chars().skip(city.chars().count()).collect();
        return rest
            .trim_matches(|c: char| c.is_whitespace() || c == '-')
            .to_string();
    }

    full_title.to_string()
}

fn has_cyrillic(s: &str) -> bool {
    s.chars().any(|c| ('\u{0400}'..='\u{04FF}').contains(&c))
}

fn starts_with_letter(s: &str) -> bool {
    s.chars().next().is_some_and(char::is_alphabetic)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rasp::{DirectoryStationDto, Region, StationCodes};

    fn station(title: &str, transport: &str, code: Option<&str>) -> DirectoryStationDto {
        DirectoryStationDto {
            title: Some(title.to_string()),
            transport_type: Some(transport.to_string()),
            codes: Some(StationCodes {
                yandex_code: code.map(str::to_string),
                esr_code: None,
            }),
            ..DirectoryStationDto::default()
        }
    }

    fn settlement(title: &str, stations: Vec<DirectoryStationDto>) -> Settlement {
        Settlement {
            title: title.to_string(),
            stations,
            ..Settlement::default()
        }
    }

    fn country(title: &str, settlements: Vec<Settlement>) -> Country {
        Country {
            title: title.to_string(),
            regions: vec![Region {
                title: "Регион".to_string(),
                settlements,
            }],
        }
    }

    fn directory() -> StationsList {
        StationsList {
            countries: vec![
                country(
                    "Россия",
                    vec![
                        settlement(
                            "Москва",
                            vec![
                                station("Москва (Ярославский вокзал)", "train", Some("s1")),
                                station("Москва, Курский вокзал", "train", Some("s2")),
                                station("Москва, Курский вокзал", "train", Some("s2b")),
                                station("Москва, Шереметьево", "plane", Some("s3")),
                                station("Москва, Без кода", "train", None),
                                station("Москва, Empty", "train", Some("")),
                                station("Moscow (Latin only)", "train", Some("s4")),
                                station("Москва, 3-й км", "train", Some("s5")),
                            ],
                        ),
                        settlement(
                            "Тверь",
                            vec![station("Тверь Пассажирская", "train", Some("s6"))],
                        ),
                        settlement("", vec![]),
                    ],
                ),
                country(
                    "Беларусь",
                    vec![settlement("Москва", vec![station("Москва, Чужой", "train", Some("s7"))])],
                ),
            ],
        }
    }

    #[test]
    fn cities_are_unique_sorted_non_empty() {
        let titles: Vec<_> = cities(&directory()).into_iter().map(|c| c.title).collect();
        assert_eq!(titles, vec!["Москва", "Тверь"]);
    }

    #[test]
    fn stations_filtered_deduplicated_and_sorted() {
        let stations = stations_in_city(&directory(), " москва ");
        let titles: Vec<_> = stations.iter().map(|s| s.title.as_str()).collect();

        assert_eq!(titles, vec!["Курский вокзал", "Ярославский вокзал", "3-й км"]);
        assert_eq!(stations[0].yandex_code, "s2");
    }

    #[test]
    fn blank_city_has_no_stations() {
        assert!(stations_in_city(&directory(), "   ").is_empty());
    }

    #[test]
    fn city_prefix_stripped_without_separator() {
        let stations = stations_in_city(&directory(), "Тверь");
        assert_eq!(stations.len(), 1);
        assert_eq!(stations[0].title, "Пассажирская");
    }

    #[test]
    fn matches_on_short_title() {
        let mut list = directory();
        list.countries[0].regions[0].settlements[1].short_title = Some("Тверь-Город".to_string());
        assert_eq!(stations_in_city(&list, "тверьгород").len(), 1);
    }

    #[test]
    fn station_name_extraction() {
        assert_eq!(extract_station_name("Москва, Курский вокзал", "Москва"), "Курский вокзал");
        assert_eq!(extract_station_name("Москва (Рижский вокзал)", "Москва"), "Рижский вокзал");
        assert_eq!(extract_station_name("Минск-Пассажирский", "Минск"), "Пассажирский");
        assert_eq!(extract_station_name("Подсолнечная", "Москва"), "Подсолнечная");
        assert_eq!(extract_station_name("Станция )(", "Москва"), "Станция )(");
    }

    #[test]
    fn normalization() {
        assert_eq!(normalize("Санкт-Петербург"), "санктпетербург");
        assert_eq!(normalize("Нижний Новгород"), "нижнийновгород");
    }
}
