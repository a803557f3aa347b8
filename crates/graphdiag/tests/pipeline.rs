use graphdiag::layout::Algorithm;
use graphdiag::render::{EdgeStyle, RenderOptions};
use graphdiag::{Config, HeadlessRenderer, title_to_filename};

fn count_class(svg: &str, class: &str) -> usize {
    let doc = roxmltree::Document::parse(svg).unwrap();
    doc.descendants()
        .filter(|n| n.attribute("class") == Some(class))
        .count()
}

#[test]
fn seeded_pipeline_is_reproducible() {
    let text = "graphDiagram Team\nperson Ann 20\ngroup Devs 30 #orange\nAnn-3->Devs: member\nDevs--Ops";
    for name in ["random", "simple-force", "force-atlas2"] {
        let layout = name.parse::<Algorithm>().unwrap().with_seed(Some(42));
        let renderer = HeadlessRenderer::new().with_layout(layout);
        let a = renderer.render_svg_sync(text);
        let b = renderer.render_svg_sync(text);
        assert_eq!(a, b, "{name}");
        assert_eq!(count_class(&a, "node"), 3, "{name}");
    }
}

#[test]
fn empty_input_renders_an_empty_document() {
    let svg = HeadlessRenderer::new().render_svg_sync("");
    assert_eq!(count_class(&svg, "node"), 0);
    assert_eq!(count_class(&svg, "edge"), 0);
    assert!(svg.contains(r#"viewBox="0 0 100 100""#));
    assert!(svg.contains("<title>Graph Diagram</title>"));
    assert_eq!(title_to_filename("Graph Diagram", "svg"), "graph-diagram.svg");
}

#[test]
fn config_drives_the_renderer() {
    let config = Config::from_json_str(
        r#"{"layout": {"algorithm": "circular"},
            "render": {"edgeStyle": "curved", "width": null, "height": null}}"#,
    )
    .unwrap();
    let renderer = config.renderer().unwrap();
    assert_eq!(renderer.render.edge_style, EdgeStyle::Curved);
    assert_eq!(
        renderer.render,
        RenderOptions {
            edge_style: EdgeStyle::Curved,
            width: None,
            height: None,
            ..RenderOptions::default()
        }
    );

    let svg = renderer.render_svg_sync("A->B\nB--C");
    let doc = roxmltree::Document::parse(&svg).unwrap();
    let kinds: Vec<_> = doc
        .descendants()
        .filter_map(|n| n.attribute("data-kind"))
        .collect();
    assert_eq!(kinds, ["curvedArrow", "curved"]);
}
