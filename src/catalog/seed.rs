//! Built-in catalog used when no remote catalog URL is configured

use super::models::{Equipment, Flex, Resort, TerrainMix};

fn strings(values: &[&str]) -> Option<Vec<String>> {
    Some(values.iter().map(|v| (*v).to_string()).collect())
}

fn mix(beg: f64, int: f64, adv: f64) -> Option<TerrainMix> {
    Some(TerrainMix {
        beg: Some(beg),
        int: Some(int),
        adv: Some(adv),
    })
}

#[must_use]
pub fn equipment() -> Vec<Equipment> {
    vec![
        Equipment {
            id: "qst-98".to_string(),
            title: "Salomon QST 98".to_string(),
            category: Some("Skis".to_string()),
            length: Some(177.0),
            flex: Some(Flex::Label("Medium".to_string())),
            terrain: strings(&["All-Mountain", "Powder"]),
            skill: strings(&["Intermediate", "Advanced"]),
            rating: Some(4.7),
            price: Some(549.0),
            badge: Some("Editor's Pick".to_string()),
            ..Default::default()
        },
        Equipment {
            id: "enforcer-94".to_string(),
            title: "Nordica Enforcer 94".to_string(),
            category: Some("Skis".to_string()),
            length: Some(179.0),
            flex: Some(Flex::Label("Stiff".to_string())),
            terrain: strings(&["All-Mountain"]),
            skill: strings(&["Advanced", "Expert"]),
            rating: Some(4.8),
            price: Some(599.0),
            badge: Some("Most Versatile".to_string()),
            ..Default::default()
        },
        Equipment {
            id: "hawx-110".to_string(),
            title: "Atomic Hawx Prime 110".to_string(),
            category: Some("Boots".to_string()),
            last: Some(100.0),
            flex: Some(Flex::Index(110)),
            terrain: strings(&["All-Mountain"]),
            skill: strings(&["Intermediate", "Advanced"]),
            rating: Some(4.6),
            price: Some(399.0),
            badge: Some("Best Value".to_string()),
            ..Default::default()
        },
        Equipment {
            id: "griffon-13".to_string(),
            title: "Marker Griffon 13 ID".to_string(),
            category: Some("Bindings".to_string()),
            din: Some("4-13".to_string()),
            terrain: strings(&["All-Mountain", "Park"]),
            skill: strings(&["Intermediate", "Advanced", "Expert"]),
            rating: Some(4.5),
            price: Some(229.0),
            badge: Some("Shop Favorite".to_string()),
            ..Default::default()
        },
    ]
}

#[must_use]
pub fn resorts() -> Vec<Resort> {
    vec![
        Resort {
            id: "alta".to_string(),
            name: "Alta".to_string(),
            region: Some("Utah".to_string()),
            state: Some("UT".to_string()),
            country: Some("USA".to_string()),
            pass_types: strings(&["Ikon", "Mountain Collective"]),
            price: Some(189.0),
            travel_hours: Some(0.8),
            snowfall_avg: Some(545.0),
            vertical: Some(2538.0),
            elevation_top: Some(11068.0),
            terrain_mix: mix(15.0, 30.0, 55.0),
            terrain: strings(&["Powder", "All-Mountain"]),
            crowd_level: Some(0.6),
            website: Some("https://www.alta.com".to_string()),
            ..Default::default()
        },
        Resort {
            id: "jackson-hole".to_string(),
            name: "Jackson Hole".to_string(),
            region: Some("Wyoming".to_string()),
            state: Some("WY".to_string()),
            country: Some("USA".to_string()),
            pass_types: strings(&["Ikon", "Mountain Collective"]),
            price: Some(245.0),
            travel_hours: Some(4.5),
            snowfall_avg: Some(459.0),
            vertical: Some(4139.0),
            elevation_top: Some(10450.0),
            terrain_mix: mix(10.0, 40.0, 50.0),
            terrain: strings(&["Powder", "Backcountry", "All-Mountain"]),
            crowd_level: Some(0.5),
            ..Default::default()
        },
        Resort {
            id: "vail".to_string(),
            name: "Vail".to_string(),
            region: Some("Colorado".to_string()),
            state: Some("CO".to_string()),
            country: Some("USA".to_string()),
            pass_types: strings(&["Epic"]),
            price: Some(289.0),
            travel_hours: Some(2.0),
            snowfall_avg: Some(354.0),
            vertical: Some(3450.0),
            elevation_top: Some(11570.0),
            terrain_mix: mix(18.0, 29.0, 53.0),
            terrain: strings(&["Groomers", "All-Mountain", "Powder"]),
            crowd_level: Some(0.9),
            ..Default::default()
        },
        Resort {
            id: "mammoth".to_string(),
            name: "Mammoth Mountain".to_string(),
            region: Some("Sierra".to_string()),
            state: Some("CA".to_string()),
            country: Some("USA".to_string()),
            pass_types: strings(&["Ikon"]),
            price: Some(219.0),
            travel_hours: Some(5.5),
            snowfall_avg: Some(400.0),
            vertical: Some(3100.0),
            elevation_top: Some(11053.0),
            terrain_mix: mix(15.0, 40.0, 45.0),
            terrain: strings(&["Park", "All-Mountain", "Groomers"]),
            crowd_level: Some(0.7),
            ..Default::default()
        },
        Resort {
            id: "mt-bachelor".to_string(),
            name: "Mt. Bachelor".to_string(),
            region: Some("PNW".to_string()),
            state: Some("OR".to_string()),
            country: Some("USA".to_string()),
            pass_types: strings(&["Ikon"]),
            price: Some(149.0),
            travel_hours: Some(3.0),
            snowfall_avg: Some(462.0),
            vertical: Some(3365.0),
            terrain_mix: mix(15.0, 25.0, 60.0),
            terrain: strings(&["All-Mountain", "Park"]),
            ..Default::default()
        },
        Resort {
            id: "bridger-bowl".to_string(),
            name: "Bridger Bowl".to_string(),
            region: Some("Rockies".to_string()),
            state: Some("MT".to_string()),
            country: Some("USA".to_string()),
            pass_types: strings(&[]),
            price: Some(85.0),
            travel_hours: Some(1.5),
            snowfall_avg: Some(350.0),
            terrain_mix: mix(20.0, 25.0, 55.0),
            terrain: strings(&["Powder", "Backcountry"]),
            crowd_level: Some(0.2),
            ..Default::default()
        },
        Resort {
            id: "stowe".to_string(),
            name: "Stowe".to_string(),
            region: Some("New England".to_string()),
            state: Some("VT".to_string()),
            country: Some("USA".to_string()),
            pass_types: strings(&["Epic"]),
            price: Some(199.0),
            travel_hours: Some(3.5),
            snowfall_avg: Some(314.0),
            vertical: Some(2360.0),
            terrain_mix: mix(16.0, 55.0, 29.0),
            terrain: strings(&["Groomers", "All-Mountain"]),
            crowd_level: Some(0.6),
            ..Default::default()
        },
        Resort {
            id: "tremblant".to_string(),
            name: "Tremblant".to_string(),
            region: Some("Quebec".to_string()),
            country: Some("Canada".to_string()),
            pass_types: strings(&["Ikon"]),
            price: Some(129.0),
            travel_hours: Some(2.5),
            snowfall_avg: Some(160.0),
            terrain_mix: mix(20.0, 35.0, 45.0),
            terrain: strings(&["Groomers", "Park"]),
            ..Default::default()
        },
        Resort {
            id: "brundage".to_string(),
            name: "Brundage Mountain".to_string(),
            region: Some("Rockies".to_string()),
            state: Some("ID".to_string()),
            country: Some("USA".to_string()),
            pass_types: strings(&["Indy"]),
            travel_hours: Some(2.0),
            snowfall_avg: Some(320.0),
            ..Default::default()
        },
    ]
}
