use liemath::prelude::*;
use pretty_assertions::assert_eq;

use crate::*;

fn sample_scene() -> Scene {
    let mut scene = Scene::new(2).unwrap();
    scene
        .add_round(&Round::sphere(vector![-2.0, 0.0], 1.0), None)
        .unwrap()
        .with_label("A & B");
    scene
        .add_round(&Round::sphere(vector![2.0, 0.0], -1.5), None)
        .unwrap();
    scene
        .add_round(&Round::plane(vector![0.0, 1.0], -3.0).unwrap(), Rgb::GRAY)
        .unwrap();
    scene
        .add_point_pair([vector![0.0, 1.0], vector![0.0, 4.0]], Rgb::BLACK)
        .unwrap();
    scene
}

#[test]
fn test_scene_json() {
    let scene = sample_scene();
    let json: serde_json::Value = serde_json::from_str(&scene.to_json().unwrap()).unwrap();

    assert_eq!(json["ndim"], 2);
    let entries = json["entries"].as_array().unwrap();
    assert_eq!(entries.len(), 4);
    assert_eq!(entries[0]["type"], "sphere");
    assert_eq!(entries[0]["center"], serde_json::json!([-2.0, 0.0]));
    assert_eq!(entries[0]["label"], "A & B");
    assert_eq!(entries[1]["radius"], -1.5);
    assert_eq!(entries[2]["type"], "plane");
    assert_eq!(entries[2]["color"], "#808080");
    assert_eq!(entries[3]["type"], "point_pair");
    assert!(entries[3].get("label").is_none());

    let blades = entries[0]["multivector"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["blade"].as_str().unwrap())
        .collect::<Vec<_>>();
    assert_eq!(blades, ["e1", "ep", "em"]);
}

#[test]
fn test_scene_entry_roundtrip() {
    let scene = sample_scene();
    for entry in scene.entries() {
        let json = serde_json::to_string(entry).unwrap();
        let parsed: SceneEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(&parsed, entry);
    }
}

#[test]
fn test_scene_svg() {
    let svg = sample_scene().to_svg(&SvgOptions::default()).unwrap();
    assert!(svg.starts_with("<svg "));
    assert!(svg.trim_end().ends_with("</svg>"));
    assert_eq!(svg.matches("<circle").count(), 4); // two spheres + two ends
    assert_eq!(svg.matches("<line").count(), 2); // plane + point pair
    assert_eq!(svg.matches("stroke-dasharray").count(), 2); // negative radius + point pair
    assert!(svg.contains("A &amp; B"));
    assert!(svg.contains(r##"fill="#ffffff""##));
}

#[test]
fn test_empty_scene_svg() {
    let scene = Scene::new(3).unwrap();
    let svg = scene
        .to_svg(&SvgOptions {
            background: None,
            ..Default::default()
        })
        .unwrap();
    assert_eq!(svg.lines().count(), 2);
}

#[test]
fn test_solutions_scene() {
    let solver = Apollonius::new(2).unwrap();
    let rounds = [
        Round::sphere(vector![-2.0, 0.0], 1.0),
        Round::sphere(vector![2.0, 0.0], 1.5),
        Round::sphere(vector![0.0, 2.5], 0.5),
    ];
    let solutions = solver.solve_all(&rounds).unwrap();

    let mut scene = Scene::new(2).unwrap();
    for r in &rounds {
        scene.add_round(r, Rgb::BLACK).unwrap();
    }
    for (i, s) in solutions.iter().enumerate() {
        scene
            .add_round(s, Rgb::gradient(i, solutions.len()))
            .unwrap();
    }
    assert_eq!(scene.len(), 11);
    assert!(scene.to_svg(&SvgOptions::default()).is_ok());
}
