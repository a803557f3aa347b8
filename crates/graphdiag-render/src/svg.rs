//! SVG document assembly.

use crate::icons::{IconBox, IconSymbol};
use crate::options::RenderOptions;
use crate::scene::{EdgeItem, LabelPlacement, NodeItem, Scene};
use crate::util::{escape_xml, escape_xml_into, fmt, fmt1};
use indexmap::IndexMap;
use std::fmt::Write as _;

pub const SVG_NS: &str = "http://www.w3.org/2000/svg";
pub const XLINK_NS: &str = "http://www.w3.org/1999/xlink";

/// Writes `scene` as a standalone SVG document.
///
/// `symbols` maps icon hrefs to embedded symbols; nodes whose icon is missing from it get an
/// external `<image>` instead.
pub fn write_document(
    title: &str,
    scene: &Scene,
    symbols: &IndexMap<String, IconSymbol>,
    options: &RenderOptions,
) -> String {
    let view_box = scene.bounds.view_box();
    let width = options.width.unwrap_or_else(|| scene.bounds.width());
    let height = options.height.unwrap_or_else(|| scene.bounds.height());

    let mut out = String::new();
    let _ = write!(
        &mut out,
        r#"<svg width="{}" height="{}" viewBox="{}" xmlns="{SVG_NS}" xmlns:xlink="{XLINK_NS}" style="font-family:{};">"#,
        fmt(width),
        fmt(height),
        view_box,
        escape_xml(&options.font_family)
    );
    if options.has_background() {
        let _ = write!(
            &mut out,
            r#"<rect x="{}" y="{}" width="100%" height="100%" fill="{}"/>"#,
            fmt(scene.bounds.min_x),
            fmt(scene.bounds.min_y),
            escape_xml(&options.background)
        );
    }
    out.push_str("<title>");
    escape_xml_into(&mut out, title);
    out.push_str("</title>");

    write_edges(&mut out, &scene.edges, options);
    write_labels(&mut out, &scene.edges, options);
    write_nodes(&mut out, &scene.nodes, symbols, options);

    out.push_str("</svg>");
    out
}

fn write_edges(out: &mut String, edges: &[EdgeItem], options: &RenderOptions) {
    out.push_str(r#"<g class="edges">"#);
    let color = escape_xml(&options.edge_color);
    for edge in edges {
        let _ = write!(
            out,
            r#"<path class="edge" data-edge-index="{}" data-kind="{}" d="{}" fill="{color}"/>"#,
            edge.index,
            edge.kind.as_str(),
            edge.path.render(options.optimize)
        );
    }
    out.push_str("</g>");
}

fn write_labels(out: &mut String, edges: &[EdgeItem], options: &RenderOptions) {
    let color = escape_xml(&options.edge_color);
    let family = escape_xml(&options.font_family);

    let mut defs = String::new();
    let mut texts = String::new();
    for edge in edges {
        let Some(label) = &edge.label else {
            continue;
        };
        match &label.placement {
            LabelPlacement::Straight(l) => {
                let (x, y) = (fmt(l.x), fmt(l.y));
                let _ = write!(
                    &mut texts,
                    r#"<text x="{x}" y="{y}" transform="rotate({}, {x}, {y})" text-anchor="middle" dominant-baseline="middle" fill="{color}" font-size="{}" font-family="{family}">"#,
                    fmt(l.angle),
                    fmt(label.font_size)
                );
            }
            LabelPlacement::Curved(curve) => {
                let id = format!("edge-label-path-{}", edge.index);
                let _ = write!(
                    &mut defs,
                    r#"<path id="{id}" d="M {} {} Q {} {} {} {}"/>"#,
                    fmt(curve.from.x),
                    fmt(curve.from.y),
                    fmt(curve.ctrl.x),
                    fmt(curve.ctrl.y),
                    fmt(curve.to.x),
                    fmt(curve.to.y)
                );
                let _ = write!(
                    &mut texts,
                    r##"<text fill="{color}" font-size="{}" font-family="{family}"><textPath href="#{id}" startOffset="50%" text-anchor="middle" dominant-baseline="central">"##,
                    fmt(label.font_size)
                );
            }
        }
        escape_xml_into(&mut texts, &label.text);
        if matches!(label.placement, LabelPlacement::Curved(_)) {
            texts.push_str("</textPath>");
        }
        texts.push_str("</text>");
    }

    out.push_str(r#"<g class="labels">"#);
    if !defs.is_empty() {
        let _ = write!(out, "<defs>{defs}</defs>");
    }
    out.push_str(&texts);
    out.push_str("</g>");
}

fn write_nodes(
    out: &mut String,
    nodes: &[NodeItem],
    symbols: &IndexMap<String, IconSymbol>,
    options: &RenderOptions,
) {
    out.push_str(r#"<g class="nodes">"#);
    if !symbols.is_empty() {
        out.push_str("<defs>");
        for symbol in symbols.values() {
            out.push_str(&symbol.markup());
        }
        out.push_str("</defs>");
    }

    let label_color = escape_xml(&options.node_label_color);
    for node in nodes {
        let c = &node.circle;
        out.push_str(r#"<g class="node" data-node-id=""#);
        escape_xml_into(out, &node.id);
        let _ = write!(
            out,
            r#""><circle cx="{}" cy="{}" r="{}" fill="{}" stroke="none"/>"#,
            fmt(c.center.x),
            fmt(c.center.y),
            fmt(c.radius),
            escape_xml(&node.color)
        );

        if let Some(href) = &node.icon {
            let square = IconBox::square(c);
            match symbols.get(href) {
                Some(symbol) => {
                    let b = square.fit(symbol.aspect_ratio());
                    let _ = write!(
                        out,
                        r##"<use href="#{}" x="{}" y="{}" width="{}" height="{}"/>"##,
                        symbol.id,
                        fmt1(b.x),
                        fmt1(b.y),
                        fmt1(b.width),
                        fmt1(b.height)
                    );
                }
                None => {
                    let _ = write!(
                        out,
                        r#"<image href="{}" x="{}" y="{}" width="{}" height="{}" preserveAspectRatio="xMidYMid meet"/>"#,
                        escape_xml(href),
                        fmt1(square.x),
                        fmt1(square.y),
                        fmt1(square.width),
                        fmt1(square.height)
                    );
                }
            }
        }

        if let Some(label) = &node.label {
            let _ = write!(
                out,
                r#"<text x="{}" y="{}" font-size="{}" fill="{label_color}" dominant-baseline="middle">"#,
                fmt(label.x),
                fmt(label.y),
                fmt(label.font_size)
            );
            escape_xml_into(out, &label.text);
            out.push_str("</text>");
        }
        out.push_str("</g>");
    }
    out.push_str("</g>");
}
