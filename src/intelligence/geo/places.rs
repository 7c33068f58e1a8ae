//! Static centroid tables. Coordinates are approximate geographic centers.

pub struct StatePlace {
    pub name: &'static str,
    pub abbr: &'static str,
    pub lat: f64,
    pub lng: f64,
    /// Extra phrases that resolve to this state.
    pub aliases: &'static [&'static str],
    /// Whether the bare name may be matched as free text.
    pub name_matchable: bool,
}

pub struct CountryPlace {
    pub name: &'static str,
    pub code: &'static str,
    pub lat: f64,
    pub lng: f64,
    pub aliases: &'static [&'static str],
}

/// Neutral placement for topics with no single location.
pub const GLOBAL_LAT: f64 = 20.0;
pub const GLOBAL_LNG: f64 = 0.0;

/// Washington, D.C.
pub const US_CAPITAL_LAT: f64 = 38.9072;
pub const US_CAPITAL_LNG: f64 = -77.0369;

const fn state(name: &'static str, abbr: &'static str, lat: f64, lng: f64) -> StatePlace {
    StatePlace {
        name,
        abbr,
        lat,
        lng,
        aliases: &[],
        name_matchable: true,
    }
}

const fn country(name: &'static str, code: &'static str, lat: f64, lng: f64) -> CountryPlace {
    CountryPlace {
        name,
        code,
        lat,
        lng,
        aliases: &[],
    }
}

pub const US_STATES: &[StatePlace] = &[
    state("Alabama", "AL", 32.806671, -86.79113),
    state("Alaska", "AK", 61.370716, -152.404419),
    state("Arizona", "AZ", 33.729759, -111.431221),
    state("Arkansas", "AR", 34.969704, -92.373123),
    state("California", "CA", 36.116203, -119.681564),
    state("Colorado", "CO", 39.059811, -105.311104),
    state("Connecticut", "CT", 41.597782, -72.755371),
    state("Delaware", "DE", 39.318523, -75.507141),
    state("Florida", "FL", 27.766279, -81.686783),
    state("Georgia", "GA", 33.040619, -83.643074),
    state("Hawaii", "HI", 21.094318, -157.498337),
    state("Idaho", "ID", 44.240459, -114.478828),
    state("Illinois", "IL", 40.349457, -88.986137),
    state("Indiana", "IN", 39.849426, -86.258278),
    state("Iowa", "IA", 42.011539, -93.210526),
    state("Kansas", "KS", 38.5266, -96.726486),
    state("Kentucky", "KY", 37.66814, -84.670067),
    state("Louisiana", "LA", 31.169546, -91.867805),
    state("Maine", "ME", 44.693947, -69.381927),
    state("Maryland", "MD", 39.063946, -76.802101),
    state("Massachusetts", "MA", 42.230171, -71.530106),
    state("Michigan", "MI", 43.326618, -84.536095),
    state("Minnesota", "MN", 45.694454, -93.900192),
    state("Mississippi", "MS", 32.741646, -89.678696),
    state("Missouri", "MO", 38.456085, -92.288368),
    state("Montana", "MT", 46.921925, -110.454353),
    state("Nebraska", "NE", 41.12537, -98.268082),
    state("Nevada", "NV", 38.313515, -117.055374),
    state("New Hampshire", "NH", 43.452492, -71.563896),
    state("New Jersey", "NJ", 40.298904, -74.521011),
    state("New Mexico", "NM", 34.840515, -106.248482),
    state("New York", "NY", 42.165726, -74.948051),
    state("North Carolina", "NC", 35.630066, -79.806419),
    state("North Dakota", "ND", 47.528912, -99.784012),
    state("Ohio", "OH", 40.388783, -82.764915),
    state("Oklahoma", "OK", 35.565342, -96.928917),
    state("Oregon", "OR", 44.572021, -122.070938),
    state("Pennsylvania", "PA", 40.590752, -77.209755),
    state("Rhode Island", "RI", 41.680893, -71.51178),
    state("South Carolina", "SC", 33.856892, -80.945007),
    state("South Dakota", "SD", 44.299782, -99.438828),
    state("Tennessee", "TN", 35.747845, -86.692345),
    state("Texas", "TX", 31.054487, -97.563461),
    state("Utah", "UT", 40.150032, -111.862434),
    state("Vermont", "VT", 44.045876, -72.710686),
    state("Virginia", "VA", 37.769337, -78.169968),
    state("Washington", "WA", 47.400902, -121.490494),
    state("West Virginia", "WV", 38.491226, -80.954456),
    state("Wisconsin", "WI", 44.268543, -89.616508),
    state("Wyoming", "WY", 42.755966, -107.30249),
    // Pseudo-state: reachable through aliases and its abbreviation only.
    StatePlace {
        name: "District of Columbia",
        abbr: "DC",
        lat: US_CAPITAL_LAT,
        lng: US_CAPITAL_LNG,
        aliases: &["district of columbia", "washington, d.c.", "washington dc", "dc"],
        name_matchable: false,
    },
];

pub const COUNTRIES: &[CountryPlace] = &[
    CountryPlace {
        name: "United States",
        code: "US",
        lat: 39.8283,
        lng: -98.5795,
        aliases: &["usa", "u.s.a.", "u.s.", "us", "united states of america", "america"],
    },
    CountryPlace {
        name: "Germany",
        code: "DE",
        lat: 51.1657,
        lng: 10.4515,
        aliases: &["deutschland"],
    },
    CountryPlace {
        name: "United Kingdom",
        code: "GB",
        lat: 55.3781,
        lng: -3.436,
        aliases: &[
            "uk",
            "u.k.",
            "britain",
            "great britain",
            "england",
            "scotland",
            "wales",
            "northern ireland",
            "gb",
        ],
    },
    country("France", "FR", 46.2276, 2.2137),
    CountryPlace {
        name: "Italy",
        code: "IT",
        lat: 41.8719,
        lng: 12.5674,
        aliases: &["italia"],
    },
    country("Spain", "ES", 40.4637, -3.7492),
    country("Portugal", "PT", 39.3999, -8.2245),
    CountryPlace {
        name: "Netherlands",
        code: "NL",
        lat: 52.1326,
        lng: 5.2913,
        aliases: &["holland"],
    },
    country("Belgium", "BE", 50.5039, 4.4699),
    country("Switzerland", "CH", 46.8182, 8.2275),
    country("Austria", "AT", 47.5162, 14.5501),
    country("Poland", "PL", 51.9194, 19.1451),
    CountryPlace {
        name: "Czech Republic",
        code: "CZ",
        lat: 49.8175,
        lng: 15.473,
        aliases: &["czechia"],
    },
    country("Sweden", "SE", 60.1282, 18.6435),
    country("Norway", "NO", 60.472, 8.4689),
    country("Denmark", "DK", 56.2639, 9.5018),
    country("Finland", "FI", 61.9241, 25.7482),
    country("Ireland", "IE", 53.1424, -7.6921),
    country("Greece", "GR", 39.0742, 21.8243),
    country("Turkey", "TR", 38.9637, 35.2433),
    CountryPlace {
        name: "Russia",
        code: "RU",
        lat: 61.524,
        lng: 105.3188,
        aliases: &["russian federation"],
    },
    country("Ukraine", "UA", 48.3794, 31.1656),
    country("Canada", "CA", 56.1304, -106.3468),
    country("Mexico", "MX", 23.6345, -102.5528),
    country("Brazil", "BR", -14.235, -51.9253),
    country("Argentina", "AR", -38.4161, -63.6167),
    country("Chile", "CL", -35.6751, -71.543),
    country("Colombia", "CO", 4.5709, -74.2973),
    country("Peru", "PE", -9.19, -75.0152),
    CountryPlace {
        name: "China",
        code: "CN",
        lat: 35.8617,
        lng: 104.1954,
        aliases: &["people's republic of china", "prc", "mainland china"],
    },
    country("India", "IN", 20.5937, 78.9629),
    country("Japan", "JP", 36.2048, 138.2529),
    CountryPlace {
        name: "South Korea",
        code: "KR",
        lat: 35.9078,
        lng: 127.7669,
        aliases: &["republic of korea", "rok", "s. korea"],
    },
    CountryPlace {
        name: "North Korea",
        code: "KP",
        lat: 40.3399,
        lng: 127.5101,
        aliases: &["dprk"],
    },
    country("Taiwan", "TW", 23.6978, 120.9605),
    country("Singapore", "SG", 1.3521, 103.8198),
    country("Malaysia", "MY", 4.2105, 101.9758),
    country("Thailand", "TH", 15.87, 100.9925),
    country("Vietnam", "VN", 14.0583, 108.2772),
    country("Philippines", "PH", 12.8797, 121.774),
    country("Indonesia", "ID", -0.7893, 113.9213),
    country("Pakistan", "PK", 30.3753, 69.3451),
    country("Bangladesh", "BD", 23.685, 90.3563),
    country("Israel", "IL", 31.0461, 34.8516),
    CountryPlace {
        name: "Iran",
        code: "IR",
        lat: 32.4279,
        lng: 53.688,
        aliases: &["islamic republic of iran"],
    },
    country("Iraq", "IQ", 33.2232, 43.6793),
    CountryPlace {
        name: "Saudi Arabia",
        code: "SA",
        lat: 23.8859,
        lng: 45.0792,
        aliases: &["ksa"],
    },
    CountryPlace {
        name: "United Arab Emirates",
        code: "AE",
        lat: 23.4241,
        lng: 53.8478,
        aliases: &["uae", "u.a.e."],
    },
    country("Qatar", "QA", 25.3548, 51.1839),
    country("Kuwait", "KW", 29.3117, 47.4818),
    country("Egypt", "EG", 26.8206, 30.8025),
    country("Nigeria", "NG", 9.082, 8.6753),
    country("South Africa", "ZA", -30.5595, 22.9375),
    country("Australia", "AU", -25.2744, 133.7751),
    country("New Zealand", "NZ", -40.9006, 174.886),
];
