//! Display colors for canonical team names.
//!
//! Liveries change over the years, so each color applies to a season range.
//! When ranges overlap for one team the later entry wins. Keys are the names
//! `canonical_team_name` produces, not the names as scraped.

use std::collections::BTreeMap;

/// (first season, last season, canonical team, hex color)
const TEAM_COLORS: &[(u16, u16, &str, &str)] = &[
    (2000, 2025, "Ferrari", "#DC0000"),
    (2000, 2009, "McLaren", "#B4B4B4"),
    (2010, 2016, "McLaren", "#A0A0A0"),
    (2017, 2025, "McLaren", "#FF8000"),
    (2000, 2025, "Williams", "#005AFF"),
    (2000, 2004, "Jordan", "#F2D200"),
    (2005, 2005, "Jordan", "#F2D200"),
    (2000, 2001, "Benetton", "#31A6E6"),
    (2000, 2005, "BAR", "#C8C8C8"),
    (2000, 2005, "Minardi", "#191919"),
    (2000, 2005, "Sauber", "#0067A5"),
    (2006, 2009, "Sauber", "#6CD3FF"),
    (2010, 2018, "Sauber", "#9B0000"),
    (2019, 2023, "Alfa Romeo", "#900000"),
    (2024, 2025, "Sauber", "#52E252"),
    (2000, 2003, "Arrows", "#FF8700"),
    (2000, 2001, "Prost", "#0032A0"),
    (2000, 2004, "Jaguar", "#00573F"),
    (2002, 2009, "Toyota", "#CC0000"),
    (2002, 2011, "Renault", "#FFD800"),
    (2016, 2020, "Renault", "#FFF500"),
    (2021, 2025, "Alpine", "#0093CC"),
    (2005, 2025, "Red Bull", "#1E41FF"),
    (2006, 2019, "Toro Rosso", "#0000FF"),
    (2020, 2023, "AlphaTauri", "#2B4562"),
    (2024, 2025, "RB", "#6692FF"),
    (2025, 2025, "Racing Bulls", "#6692FF"),
    (2006, 2008, "Super Aguri", "#E20613"),
    (2006, 2006, "MF1", "#F52000"),
    (2007, 2007, "Spyker", "#FF6000"),
    (2007, 2007, "Spyker MF1", "#FF6000"),
    (2008, 2018, "Force India", "#F596C8"),
    (2006, 2008, "Honda", "#FFFFFF"),
    (2009, 2009, "Brawn", "#B8FD6E"),
    (2010, 2025, "Mercedes", "#00D2BE"),
    (2010, 2011, "Virgin", "#E10600"),
    (2012, 2015, "Marussia", "#6E0000"),
    (2016, 2016, "MRT", "#6E0000"),
    (2010, 2011, "HRT", "#BBA86F"),
    (2012, 2012, "HRT", "#BBA86F"),
    (2010, 2011, "Lotus", "#00573F"),
    (2012, 2015, "Lotus", "#FFB800"),
    (2012, 2014, "Caterham", "#005030"),
    (2016, 2025, "Haas", "#B6BABD"),
    (2019, 2020, "Racing Point", "#F596C8"),
    (2021, 2025, "Aston Martin", "#006F62"),
];

/// Team -> color for one season
pub fn team_colors(year: u16) -> BTreeMap<String, String> {
    TEAM_COLORS
        .iter()
        .filter(|(first, last, _, _)| (*first..=*last).contains(&year))
        .map(|(_, _, team, color)| (team.to_string(), color.to_string()))
        .collect()
}

/// Year -> (team -> color) for every given season
pub fn palette(years: &[u16]) -> BTreeMap<u16, BTreeMap<String, String>> {
    years.iter().map(|&year| (year, team_colors(year))).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::canonical_team_name;

    #[test]
    fn test_keys_are_canonical_names() {
        for (_, _, team, _) in TEAM_COLORS {
            assert_eq!(canonical_team_name(team), *team);
        }
    }

    #[test]
    fn test_scraped_names_find_a_color() {
        let scraped = [
            (2000, "Minardi Fondmetal"),
            (2006, "MF1 Toyota"),
            (2007, "Spyker Ferrari"),
            (2008, "BMW Sauber"),
            (2009, "Brawn Mercedes"),
            (2016, "MRT Mercedes"),
            (2020, "Racing Point BWT Mercedes"),
            (2023, "Alfa Romeo Ferrari"),
            (2024, "Kick Sauber Ferrari"),
            (2025, "Racing Bulls Honda RBPT"),
        ];
        for (year, name) in scraped {
            let canonical = canonical_team_name(name);
            assert!(
                team_colors(year).contains_key(&canonical),
                "{} ({}) has no color in {}",
                name,
                canonical,
                year
            );
        }
    }

    #[test]
    fn test_team_colors_by_year() {
        let y2005 = team_colors(2005);
        assert_eq!(y2005.get("Ferrari").map(String::as_str), Some("#DC0000"));
        assert_eq!(y2005.get("McLaren").map(String::as_str), Some("#B4B4B4"));
        assert!(y2005.contains_key("Minardi"));
        assert!(!y2005.contains_key("Haas"));

        let y2024 = team_colors(2024);
        assert_eq!(y2024.get("McLaren").map(String::as_str), Some("#FF8000"));
        assert!(y2024.contains_key("Haas"));
        assert!(!y2024.contains_key("Minardi"));
    }

    #[test]
    fn test_palette_is_year_sorted() {
        let palette = palette(&[2024, 2000, 2012]);
        let years: Vec<_> = palette.keys().copied().collect();
        assert_eq!(years, vec![2000, 2012, 2024]);
    }
}
