//! Built-in catalog so the service is playable without a catalog file.

use crate::catalog::{Catalog, CatalogEntry};
use crate::domain::{Clip, Subject};

#[allow(clippy::too_many_arguments)]
fn entry(
  manufacturer: &str,
  model: &str,
  engine: &str,
  cylinders: &str,
  year: &str,
  era: &str,
  fun_fact: &str,
  video_id: &str,
  window: (u32, u32),
  channel: &str,
) -> CatalogEntry {
  CatalogEntry::new(
    Subject {
      manufacturer: manufacturer.into(),
      model: model.into(),
      engine: engine.into(),
      cylinders: cylinders.into(),
      year: year.into(),
      era: era.into(),
      fun_fact: fun_fact.into(),
    },
    Some(Clip {
      video_id: video_id.into(),
      start_seconds: Some(window.0),
      end_seconds: Some(window.1),
      channel: Some(channel.into()).filter(|c: &String| !c.is_empty()),
    }),
  )
}

pub fn seed_catalog() -> Catalog {
  Catalog::new(vec![
    entry("Ducati", "Panigale V4S", "V4", "4", "2018", "Moderne",
      "Le moteur Desmosedici Stradale dérive directement de la MotoGP.", "seed-panigale-v4s", (15, 35), "Moto Sound"),
    entry("Yamaha", "YZF-R1", "Crossplane I4", "4", "2015", "Moderne",
      "Le vilebrequin crossplane donne un son proche d'un V4.", "seed-yzf-r1", (5, 25), "Superbike Sounds"),
    entry("Honda", "CBR1000RR-R Fireblade", "I4", "4", "2020", "Moderne",
      "Sa zone rouge dépasse 14 500 tr/min.", "seed-fireblade", (20, 40), "Moto Sound"),
    entry("Kawasaki", "Ninja H2", "I4 suralimenté", "4", "2015", "Moderne",
      "Un compresseur conçu par la division aéronautique de Kawasaki.", "seed-ninja-h2", (10, 30), "Supercharged TV"),
    entry("Triumph", "Street Triple 765 RS", "I3", "3", "2017", "Moderne",
      "Le trois-cylindres a servi de base au moteur Moto2.", "seed-street-triple", (0, 20), "British Bikes"),
    entry("Harley-Davidson", "Fat Boy", "V-Twin 45°", "2", "1990", "Années 90",
      "Popularisée par Terminator 2.", "seed-fat-boy", (30, 50), "Cruiser Channel"),
    entry("BMW", "R 1250 GS", "Flat-Twin", "2", "2019", "Moderne",
      "Le calage variable ShiftCam fait sa première apparition.", "seed-r1250gs", (12, 32), ""),
    entry("Suzuki", "GSX-R750", "I4", "4", "1985", "Années 80",
      "Premier cadre alu de série sur une sportive grand public.", "seed-gsxr750", (8, 28), "Retro Racing"),
    entry("KTM", "1290 Super Duke R", "V-Twin 75°", "2", "2014", "Moderne",
      "Surnommée « The Beast ».", "seed-super-duke", (25, 45), "Orange Bikes"),
    entry("Aprilia", "RSV4 Factory", "V4 65°", "4", "2009", "Moderne",
      "Son V4 compact a remporté plusieurs titres WSBK.", "seed-rsv4", (18, 38), "Moto Sound"),
  ])
}
