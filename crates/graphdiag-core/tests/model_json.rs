use graphdiag_core::{EdgeKind, GraphModel, NodeKind, parse};
use serde_json::json;

#[test]
fn parsed_model_serializes_in_declaration_order() {
    let g = parse("graphDiagram Crew\nperson Ann 20 #red\nShip--Ann\nAnn-2->Dock: sails");
    let value = serde_json::to_value(&g).unwrap();

    assert_eq!(value["title"], json!("Crew"));
    let ids: Vec<&str> = value["nodes"]
        .as_object()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(ids, vec!["Ann", "Ship", "Dock"]);
    assert_eq!(value["nodes"]["Ann"]["kind"], json!("person"));
    assert_eq!(value["nodes"]["Ann"]["color"], json!("#ff0000"));
    assert!(value["nodes"]["Ann"].get("position").is_none());
    assert_eq!(value["edges"][0]["kind"], json!("line"));
    assert_eq!(value["edges"][1]["kind"], json!("arrow"));
    assert_eq!(value["edges"][1]["weight"], json!(2.0));
    assert_eq!(value["edges"][1]["label"], json!("sails"));
}

#[test]
fn model_json_round_trips() {
    let mut g = parse("concept Idea 14\nIdea->Plan\nIdea->Plan");
    g.nodes["Idea"].position = Some(graphdiag_core::geom::point(3.5, -2.0));

    let text = serde_json::to_string(&g).unwrap();
    let back: GraphModel = serde_json::from_str(&text).unwrap();
    assert_eq!(back, g);
    assert_eq!(back.nodes["Idea"].kind, NodeKind::Concept);
    assert_eq!(back.edges[0].kind, EdgeKind::Arrow);
    assert!(back.edges[0].curvature < back.edges[1].curvature);
}
