use std::collections::HashSet;

use motosound::catalog::Catalog;
use motosound::domain::{FieldAnswer, FieldName, JokerKind, ResponseMode, Subject};
use motosound::hints::{next_hint, HintContext};
use motosound::multiplayer::calculate_round_score;
use motosound::options::OptionsCache;
use motosound::similarity::similarity;
use rand::rngs::StdRng;
use rand::SeedableRng;

const CATALOG: &str = r#"
[[motos]]
manufacturer = "Ducati"
model = "Panigale V4S"
engine = "V4"
cylinders = "4"
year = "2018"
era = "Moderne"

[motos.clip]
video_id = "abc"
channel = "Moto Sound"

[[motos]]
manufacturer = "Yamaha"
model = "R1"
engine = "Crossplane I4"
cylinders = "4"
year = "2015"

[[motos]]
manufacturer = "Honda"
model = "Africa Twin"
engine = "Parallel Twin"
cylinders = "2"
year = "2016"

[[motos]]
manufacturer = "Triumph"
model = "Speed Triple"
engine = "I3"
cylinders = "3"
year = "2011"

[[motos]]
manufacturer = "BMW"
model = "R nineT"
engine = "Flat-Twin"
cylinders = "2"
year = "2014"
"#;

fn panigale() -> Subject {
  Subject {
    manufacturer: "Ducati".into(),
    model: "Panigale V4S".into(),
    engine: "V4".into(),
    cylinders: "4".into(),
    year: "2018".into(),
    ..Default::default()
  }
}

#[test]
fn end_to_end_multiplayer_scenario() {
  let answers = vec![
    FieldAnswer::new(FieldName::Manufacturer, ResponseMode::Expert, "ducati"),
    FieldAnswer::new(FieldName::Model, ResponseMode::Expert, "panigale v4"),
    FieldAnswer::new(FieldName::Cylinders, ResponseMode::Expert, "4"),
    FieldAnswer::new(FieldName::Year, ResponseMode::Expert, "2019"),
  ];
  let score = calculate_round_score(&answers, &panigale(), None, 5_000);
  assert!((score.field_points_total - 73.0).abs() < 1e-9);
  assert!((score.speed_bonus - 3.75).abs() < 1e-9);
  assert_eq!(score.joker_penalty, 0.0);
  assert_eq!(score.total_score, 77);

  let with_hint = calculate_round_score(&answers, &panigale(), Some(JokerKind::Hint), 5_000);
  assert_eq!(with_hint.total_score, 67);
}

#[test]
fn similarity_contract() {
  assert_eq!(similarity("Ducati", "Duca"), 1.0);
  assert!(similarity("Yamaha", "Yam") < 1.0);
  assert_eq!(similarity("R1", ""), 0.0);
}

#[tokio::test]
async fn coherent_options_from_a_catalog_file() {
  let catalog = Catalog::from_toml_str(CATALOG).expect("catalog");
  let cache = OptionsCache::new();
  cache.initialize(&catalog).await.expect("init");

  let rows: HashSet<(String, String)> = catalog
    .entries()
    .iter()
    .map(|e| (e.subject.manufacturer.clone(), e.subject.model.clone()))
    .collect();

  let mut rng = StdRng::seed_from_u64(2024);
  for _ in 0..25 {
    let opts = cache
      .generate_coherent_options_with("Ducati", "Panigale V4S", 4, &mut rng)
      .expect("options");
    assert_eq!(opts.len(), 4);
    assert!(opts.iter().all(|o| rows.contains(&(o.manufacturer.clone(), o.model.clone()))));
    assert_eq!(opts.iter().filter(|o| o.model == "Panigale V4S").count(), 1);
  }
}

#[test]
fn hints_from_catalog_entry() {
  let catalog = Catalog::from_toml_str(CATALOG).expect("catalog");
  let entry = catalog.find("ducati-panigale-v4s").expect("entry");
  let ctx = HintContext::from(entry);
  let first = next_hint(0, &ctx);
  assert_eq!(first.message, "Première lettre de la marque : D");
  // initial, era, engine, cylinders, year, channel, model words
  assert_eq!(first.remaining, 6);
}
