use crate::*;
use graphdiag_core::geom::point;
use graphdiag_core::{GraphModel, parse};

pub(super) fn positioned(text: &str, at: &[(&str, f64, f64)]) -> GraphModel {
    let mut g = parse(text);
    for (id, x, y) in at {
        g.nodes[*id].position = Some(point(*x, *y));
    }
    g
}

pub(super) fn elements<'a>(
    doc: &'a roxmltree::Document<'a>,
    name: &str,
) -> Vec<roxmltree::Node<'a, 'a>> {
    doc.descendants()
        .filter(|n| n.is_element() && n.tag_name().name() == name)
        .collect()
}

fn with_class<'a>(doc: &'a roxmltree::Document<'a>, class: &str) -> Vec<roxmltree::Node<'a, 'a>> {
    doc.descendants()
        .filter(|n| n.attribute("class") == Some(class))
        .collect()
}

#[test]
fn empty_graph_renders_a_default_viewport() {
    let svg = render_svg_sync(
        &GraphModel::new(),
        &RenderOptions::default(),
        &BundledIconFetcher::new(),
    );
    let doc = roxmltree::Document::parse(&svg).unwrap();
    let root = doc.root_element();
    assert_eq!(root.tag_name().name(), "svg");
    assert_eq!(root.attribute("viewBox"), Some("0 0 100 100"));
    assert!(with_class(&doc, "node").is_empty());
    assert!(with_class(&doc, "edge").is_empty());
    assert_eq!(with_class(&doc, "edges").len(), 1);
    assert_eq!(with_class(&doc, "labels").len(), 1);
    assert_eq!(with_class(&doc, "nodes").len(), 1);
}

#[test]
fn demo_diagram_renders_layers_in_order() {
    let g = positioned(
        "graphDiagram Demo\nperson Alice 25 #lightgreen\nnode Bob 12 #lightblue\nAlice->Bob: Hi",
        &[("Alice", -100.0, 0.0), ("Bob", 100.0, 0.0)],
    );
    let svg = render_svg_sync(&g, &RenderOptions::default(), &BundledIconFetcher::new());
    let doc = roxmltree::Document::parse(&svg).unwrap();
    let root = doc.root_element();
    assert_eq!(root.attribute("width"), Some("800"));
    assert_eq!(root.attribute("height"), Some("600"));

    let layers: Vec<_> = root
        .children()
        .filter(|n| n.is_element() && n.tag_name().name() == "g")
        .filter_map(|n| n.attribute("class"))
        .collect();
    assert_eq!(layers, ["edges", "labels", "nodes"]);

    let title = elements(&doc, "title")[0].text();
    assert_eq!(title, Some("Demo"));

    let nodes = with_class(&doc, "node");
    let ids: Vec<_> = nodes.iter().filter_map(|n| n.attribute("data-node-id")).collect();
    assert_eq!(ids, ["Alice", "Bob"]);

    // Icon symbols may contain circles too; only look at each node's own shape.
    let circles: Vec<_> = nodes.iter().filter_map(|n| n.first_element_child()).collect();
    assert!(circles.iter().all(|c| c.tag_name().name() == "circle"));
    assert_eq!(circles[0].attribute("r"), Some("25"));
    assert_eq!(circles[0].attribute("fill"), Some("#90ee90"));
    assert_eq!(circles[1].attribute("fill"), Some("#add8e6"));

    let edges = with_class(&doc, "edge");
    assert_eq!(edges.len(), 1);
    assert_eq!(edges[0].attribute("data-kind"), Some("arrow"));
    assert_eq!(edges[0].attribute("fill"), Some("currentColor"));

    let label = elements(&doc, "text")
        .into_iter()
        .find(|t| t.text() == Some("Hi"))
        .expect("edge label");
    assert_eq!(label.attribute("text-anchor"), Some("middle"));
}

#[test]
fn view_box_covers_nodes_and_padding() {
    let g = positioned("node A 10\nnode B 10\nA--B", &[("A", 0.0, 0.0), ("B", 100.0, 50.0)]);
    let options = RenderOptions {
        width: None,
        height: None,
        ..RenderOptions::default()
    };
    let svg = render_svg_sync(&g, &options, &BundledIconFetcher::new());
    let doc = roxmltree::Document::parse(&svg).unwrap();
    let root = doc.root_element();
    let vb: Vec<f64> = root
        .attribute("viewBox")
        .unwrap()
        .split(' ')
        .map(|v| v.parse().unwrap())
        .collect();
    assert_eq!((vb[0], vb[1]), (-30.0, -30.0));
    // Node B's label extends past its circle on the right.
    assert!(vb[0] + vb[2] > 130.0);
    assert_eq!(root.attribute("width").unwrap().parse::<f64>().unwrap(), vb[2]);
}

#[test]
fn unoptimized_paths_are_absolute() {
    let g = positioned("A--B", &[("A", 0.0, 0.0), ("B", 100.0, 0.0)]);
    let options = RenderOptions {
        optimize: false,
        ..RenderOptions::default()
    };
    let svg = render_svg_sync(&g, &options, &BundledIconFetcher::new());
    assert!(svg.contains(r#"d="M 10 0.5 L 10 -0.5 L 90 -0.5 L 90 0.5 Z""#), "{svg}");

    let svg = render_svg_sync(&g, &RenderOptions::default(), &BundledIconFetcher::new());
    assert!(svg.contains(r#"d="M10,0.5l0,-1l80,0l0,1z""#), "{svg}");
}

#[test]
fn background_and_title_are_escaped() {
    let g = positioned("graphDiagram Tom & \"Jerry\"\nnode A", &[("A", 0.0, 0.0)]);
    let options = RenderOptions {
        background: "#fff".into(),
        ..RenderOptions::default()
    };
    let svg = render_svg_sync(&g, &options, &BundledIconFetcher::new());
    let doc = roxmltree::Document::parse(&svg).unwrap();
    assert_eq!(elements(&doc, "title")[0].text(), Some("Tom & \"Jerry\""));
    let rect = elements(&doc, "rect");
    assert_eq!(rect.len(), 1);
    assert_eq!(rect[0].attribute("fill"), Some("#fff"));
}

#[test]
fn parallel_edges_render_as_curves_with_text_paths() {
    let g = positioned(
        "A->B: one\nA->B: two",
        &[("A", 0.0, 0.0), ("B", 200.0, 0.0)],
    );
    let svg = render_svg_sync(&g, &RenderOptions::default(), &BundledIconFetcher::new());
    let doc = roxmltree::Document::parse(&svg).unwrap();
    let kinds: Vec<_> = with_class(&doc, "edge")
        .iter()
        .filter_map(|e| e.attribute("data-kind"))
        .collect();
    assert_eq!(kinds, ["curvedArrow", "curvedArrow"]);

    let text_paths = elements(&doc, "textPath");
    assert_eq!(text_paths.len(), 2);
    assert_eq!(text_paths[0].attribute("href"), Some("#edge-label-path-0"));
    assert_eq!(text_paths[1].attribute("startOffset"), Some("50%"));
    let defs_paths: Vec<_> = elements(&doc, "path")
        .into_iter()
        .filter(|p| p.attribute("id").is_some())
        .collect();
    assert_eq!(defs_paths.len(), 2);
}
