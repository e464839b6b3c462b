//! Diagram assembly: walks the parsed signal tree and the lane geometry and
//! emits the full markup tree, then serializes it. Pipeline order matters:
//! wave lanes fix `xmax` before gridlines, arcs and gaps are placed, and the
//! left gutter is sized from the widest measured name label.

use crate::config::Config;
#[cfg(feature = "png")]
use crate::config::RenderConfig;
use crate::ir::{AssignExpr, Body, Document, Signal, TickSpec};
use crate::layout::{self, GroupRecord, Lane, LaneContent};
use crate::markup::Node;
use crate::skin::{ASSIGN_CSS, Skin};
use crate::text_metrics::text_width;
use crate::wave::find_lane_markers;
use anyhow::Result;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{BTreeMap, VecDeque};
use std::path::Path;

// `<from><shape><to>` then one space and the label, spaces preserved.
static EDGE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?s)(\S)(\S*)(\S)(?: (.*))?$").unwrap());

/// Render a parsed document to a markup tree plus its pixel size.
pub fn render_markup(doc: &Document, config: &Config) -> (Node, f64, f64) {
    match &doc.body {
        Body::Signals(items) => render_waveform(doc, items, config, 0),
        Body::Assigns(trees) => render_assign(trees, 0),
    }
}

/// Render a parsed document straight to SVG text.
pub fn render_svg(doc: &Document, config: &Config) -> String {
    render_markup(doc, config).0.serialize()
}

fn render_waveform(
    doc: &Document,
    items: &[crate::ir::SignalItem],
    config: &Config,
    index: usize,
) -> (Node, f64, f64) {
    let skin = Skin::by_name(config.skin.as_deref().or(doc.config.skin.as_deref()));
    let mut lane = Lane::new(skin);
    layout::parse_config(doc, &mut lane);

    let rows = layout::flatten_tree(items);
    let content = layout::parse_wave_lanes(&rows.lanes, &mut lane);

    let (lane_nodes, glengths) = render_wave_lanes(&content, &mut lane, skin, index);
    let marks = render_marks(&content, &lane, index);
    let arcs = render_arcs(&rows.lanes, doc, &mut lane, skin, index);
    let gaps = render_gaps(&rows.lanes, &mut lane, index);
    let groups = render_groups(&rows.groups, &lane, index);

    let mut label_extent = 0.0f64;
    for (i, glength) in glengths.iter().enumerate() {
        let indent = rows.widths.get(i).copied().unwrap_or(0.0);
        label_extent = label_extent.max(glength + indent);
    }
    lane.xg = ((label_extent - lane.tgo) / lane.xs).ceil() * lane.xs;

    let width = lane.xg + lane.xs * (lane.xmax + 1.0);
    let height =
        content.len() as f64 * lane.yo + lane.yh0 + lane.yh1 + lane.yf0 + lane.yf1;

    let mut lanes_group = Node::new("g")
        .attr("id", format!("lanes_{index}"))
        .attr(
            "transform",
            format!(
                "translate({},{})",
                num(lane.xg + 0.5),
                num(lane.yh0 + lane.yh1 + 0.5)
            ),
        );
    // gridlines under the waves
    lanes_group.push(marks);
    for node in lane_nodes {
        lanes_group.push(node);
    }
    lanes_group.push(arcs);
    lanes_group.push(gaps);

    let svg = Node::new("svg")
        .attr("id", format!("svgcontent_{index}"))
        .attr("xmlns", "http://www.w3.org/2000/svg")
        .attr("xmlns:xlink", "http://www.w3.org/1999/xlink")
        .attr("viewBox", format!("0 0 {} {}", num(width), num(height)))
        .attr("width", num(width))
        .attr("height", num(height))
        .attr("overflow", "hidden")
        .child(Node::new("style").attr("type", "text/css").text(skin.css))
        .child(skin.defs())
        .child(
            Node::new("g")
                .attr("id", format!("waves_{index}"))
                .child(lanes_group)
                .child(
                    Node::new("g")
                        .attr("id", format!("groups_{index}"))
                        .child(groups),
                ),
        );
    (svg, width, height)
}

fn render_wave_lanes(
    content: &[LaneContent],
    lane: &mut Lane,
    skin: &Skin,
    index: usize,
) -> (Vec<Node>, Vec<f64>) {
    let font_px = skin.font_size_px();
    let mut nodes = Vec::with_capacity(content.len());
    let mut glengths = Vec::with_capacity(content.len());
    let mut xmax = 0usize;

    for (j, row) in content.iter().enumerate() {
        if row.name.is_empty() {
            glengths.push(0.0);
            continue;
        }
        let mut row_group = Node::new("g")
            .attr("id", format!("wavelane_{j}_{index}"))
            .attr(
                "transform",
                format!("translate(0,{})", num(lane.y0 + j as f64 * lane.yo)),
            );
        row_group.push(
            Node::new("text")
                .attr("x", num(lane.tgo))
                .attr("y", num(lane.ym))
                .attr("class", "info")
                .attr("text-anchor", "end")
                .attr("xml:space", "preserve")
                .text(&row.name),
        );
        glengths.push(text_width(&row.name, font_px, skin.font_family) as f64);

        // sub-cell remainder of the phase shift
        let xoffset = if row.xoffset > 0.0 {
            (2.0 * row.xoffset).ceil() - 2.0 * row.xoffset
        } else {
            -2.0 * row.xoffset
        };
        let mut draw_group = Node::new("g")
            .attr("id", format!("wavelane_draw_{j}_{index}"))
            .attr(
                "transform",
                format!("translate({}, 0)", num(xoffset * lane.xs)),
            );

        if let Some(bricks) = &row.bricks {
            for (i, brick) in bricks.iter().enumerate() {
                draw_group.push(
                    Node::new("use")
                        .attr("xlink:href", format!("#{brick}"))
                        .attr("transform", format!("translate({})", num(i as f64 * lane.xs))),
                );
            }
            if let Some(data) = &row.data {
                for (k, pos) in find_lane_markers(bricks).iter().enumerate() {
                    let Some(label) = data.get(k) else {
                        continue;
                    };
                    draw_group.push(
                        Node::new("text")
                            .attr("x", num(pos * lane.xs + lane.xlabel))
                            .attr("y", num(lane.ym))
                            .attr("text-anchor", "middle")
                            .attr("xml:space", "preserve")
                            .text(label),
                    );
                }
            }
            xmax = xmax.max(bricks.len());
        }
        row_group.push(draw_group);
        nodes.push(row_group);
    }

    lane.xmax = (xmax as f64).min(lane.xmax_cfg - lane.xmin_cfg);
    (nodes, glengths)
}

fn render_marks(content: &[LaneContent], lane: &Lane, index: usize) -> Node {
    let mstep = 2.0 * lane.hscale;
    let mmstep = mstep * lane.xs;
    let marks = lane.xmax / mstep;
    let gy = content.len() as f64 * lane.yo;

    let mut group = Node::new("g").attr("id", format!("gmarks_{index}"));
    for i in 0..steps(marks + 1.0) {
        group.push(
            Node::new("path")
                .attr("id", format!("gmark_{i}_{index}"))
                .attr("d", format!("m {},0 0,{}", num(i as f64 * mmstep), num(gy)))
                .attr("style", "stroke:#888;stroke-width:0.5;stroke-dasharray:1,3"),
        );
    }

    if let Some(text) = lane.head.as_ref().and_then(|cap| cap.text.as_deref()) {
        let y = if lane.yh0 != 0.0 { -33.0 } else { -13.0 };
        group.push(cap_text(text, lane.xmax * lane.xs / 2.0, y));
    }
    if let Some(text) = lane.foot.as_ref().and_then(|cap| cap.text.as_deref()) {
        let y = gy + if lane.yf0 != 0.0 { 45.0 } else { 25.0 };
        group.push(cap_text(text, lane.xmax * lane.xs / 2.0, y));
    }

    let head_tick = lane.head.as_ref().and_then(|cap| cap.tick.as_ref());
    let head_tock = lane.head.as_ref().and_then(|cap| cap.tock.as_ref());
    let foot_tick = lane.foot.as_ref().and_then(|cap| cap.tick.as_ref());
    let foot_tock = lane.foot.as_ref().and_then(|cap| cap.tock.as_ref());
    tick_row(&mut group, head_tick, 0.0, mmstep, -5.0, steps(marks + 1.0));
    tick_row(&mut group, head_tock, mmstep / 2.0, mmstep, -5.0, steps(marks));
    tick_row(&mut group, foot_tick, 0.0, mmstep, gy + 15.0, steps(marks + 1.0));
    tick_row(&mut group, foot_tock, mmstep / 2.0, mmstep, gy + 15.0, steps(marks));
    group
}

fn cap_text(text: &str, x: f64, y: f64) -> Node {
    Node::new("text")
        .attr("x", num(x))
        .attr("y", num(y))
        .attr("text-anchor", "middle")
        .attr("fill", "#000")
        .attr("xml:space", "preserve")
        .text(text)
}

fn tick_row(group: &mut Node, spec: Option<&TickSpec>, x: f64, dx: f64, y: f64, len: usize) {
    let Some(spec) = spec else {
        return;
    };
    for (i, label) in spec.labels(len).into_iter().enumerate() {
        group.push(
            Node::new("text")
                .attr("x", num(i as f64 * dx + x))
                .attr("y", num(y))
                .attr("text-anchor", "middle")
                .attr("class", "muted")
                .attr("xml:space", "preserve")
                .text(label),
        );
    }
}

const ARC_PLAIN: &str = "fill:none;stroke:#00F;stroke-width:1";
const ARC_UNKNOWN: &str = "fill:none;stroke:#F00;stroke-width:1";
const ARC_HEAD: &str = "marker-end:url(#arrowhead);stroke:#0041c4;stroke-width:1;fill:none";
const ARC_BOTH: &str =
    "marker-end:url(#arrowhead);marker-start:url(#arrowtail);stroke:#0041c4;stroke-width:1;fill:none";

fn render_arcs(
    lanes: &[&Signal],
    doc: &Document,
    lane: &mut Lane,
    skin: &Skin,
    index: usize,
) -> Node {
    // named single-character events anchored on wave positions
    let mut events: BTreeMap<char, (f64, f64)> = BTreeMap::new();
    for (i, sig) in lanes.iter().enumerate() {
        lane.set_signal(sig);
        let Some(node_str) = &sig.node else {
            continue;
        };
        for (pos, ch) in node_str.chars().enumerate() {
            if ch == '.' {
                continue;
            }
            events.insert(
                ch,
                (
                    lane.xs * (2.0 * pos as f64 * lane.period * lane.hscale - lane.phase)
                        + lane.xlabel,
                    i as f64 * lane.yo + lane.y0 + lane.ys * 0.5,
                ),
            );
        }
    }

    let mut group = Node::new("g").attr("id", format!("wavearcs_{index}"));
    for spec in &doc.edges {
        let Some(caps) = EDGE_RE.captures(spec) else {
            continue;
        };
        let from_name = caps[1].chars().next().unwrap_or('.');
        let shape = caps[2].to_string();
        let to_name = caps[3].chars().next().unwrap_or('.');
        let label = caps.get(4).map(|m| m.as_str()).unwrap_or("");
        let (Some(&(fx, fy)), Some(&(tx, ty))) = (events.get(&from_name), events.get(&to_name))
        else {
            continue;
        };

        let dx = tx - fx;
        let dy = ty - fy;
        let mut lx = (fx + tx) / 2.0;
        let ly = (fy + ty) / 2.0;
        let mut d = format!("M {},{} {},{}", num(fx), num(fy), num(tx), num(ty));
        let mut style = ARC_PLAIN;

        let curve = format!(
            "M {},{} c {}, 0 {}, {} {}, {}",
            num(fx),
            num(fy),
            num(0.7 * dx),
            num(0.3 * dx),
            num(dy),
            num(dx),
            num(dy)
        );
        let late = format!(
            "M {},{} c {}, 0 {}, {} {}, {}",
            num(fx),
            num(fy),
            num(0.7 * dx),
            num(dx),
            num(dy),
            num(dx),
            num(dy)
        );
        let early = format!(
            "M {},{} c 0, 0 {}, {} {}, {}",
            num(fx),
            num(fy),
            num(0.3 * dx),
            num(dy),
            num(dx),
            num(dy)
        );
        let over = format!("m {},{} {},0 0,{}", num(fx), num(fy), num(dx), num(dy));
        let under = format!("m {},{} 0,{} {},0", num(fx), num(fy), num(dy), num(dx));
        let zee = format!(
            "m {},{} {},0 0,{} {},0",
            num(fx),
            num(fy),
            num(dx / 2.0),
            num(dy),
            num(dx / 2.0)
        );

        match shape.as_str() {
            "-" => {}
            "~" => d = curve.clone(),
            "-~" => {
                d = late.clone();
                lx = fx + dx * 0.75;
            }
            "~-" => {
                d = early.clone();
                lx = fx + dx * 0.25;
            }
            "-|" => {
                d = over.clone();
                lx = tx;
            }
            "|-" => {
                d = under.clone();
                lx = fx;
            }
            "-|-" => d = zee.clone(),
            "->" => style = ARC_HEAD,
            "~>" => {
                style = ARC_HEAD;
                d = curve.clone();
            }
            "-~>" => {
                style = ARC_HEAD;
                d = late.clone();
                lx = fx + dx * 0.75;
            }
            "~->" => {
                style = ARC_HEAD;
                d = early.clone();
                lx = fx + dx * 0.25;
            }
            "-|>" => {
                style = ARC_HEAD;
                d = over.clone();
                lx = tx;
            }
            "|->" => {
                style = ARC_HEAD;
                d = under.clone();
                lx = fx;
            }
            "-|->" => {
                style = ARC_HEAD;
                d = zee.clone();
            }
            "<->" => style = ARC_BOTH,
            "<~>" => {
                style = ARC_BOTH;
                d = curve.clone();
            }
            "<-~>" => {
                style = ARC_BOTH;
                d = late.clone();
                lx = fx + dx * 0.75;
            }
            "<-|>" => {
                style = ARC_BOTH;
                d = over.clone();
                lx = tx;
            }
            "<-|->" => {
                style = ARC_BOTH;
                d = zee.clone();
            }
            _ => style = ARC_UNKNOWN,
        }

        group.push(
            Node::new("path")
                .attr("id", format!("gmark_{from_name}_{to_name}"))
                .attr("d", d)
                .attr("style", style),
        );

        if !label.is_empty() {
            let lwidth = text_width(label, 10.0, skin.font_family) as f64;
            group.push(
                Node::new("rect")
                    .attr("x", num(lx - lwidth / 2.0))
                    .attr("y", num(ly - 5.0))
                    .attr("width", num(lwidth))
                    .attr("height", 9)
                    .attr("style", "fill:#FFF;"),
            );
            group.push(
                Node::new("text")
                    .attr("style", "font-size:10px;")
                    .attr("text-anchor", "middle")
                    .attr("xml:space", "preserve")
                    .attr("x", num(lx))
                    .attr("y", num(ly + 3.0))
                    .text(label),
            );
        }
    }

    // lower-case event names double as visible labels on the wave
    for (name, &(x, y)) in &events {
        if *name != name.to_ascii_lowercase() || x <= 0.0 {
            continue;
        }
        let lwidth = text_width(&name.to_string(), 8.0, skin.font_family) as f64 + 2.0;
        group.push(
            Node::new("rect")
                .attr("x", num(x - lwidth / 2.0))
                .attr("y", num(y - 4.0))
                .attr("width", num(lwidth))
                .attr("height", 8)
                .attr("style", "fill:#FFF;"),
        );
        group.push(
            Node::new("text")
                .attr("style", "font-size:8px;")
                .attr("x", num(x))
                .attr("y", num(y + 2.0))
                .attr("text-anchor", "middle")
                .text(name.to_string()),
        );
    }
    group
}

fn render_gaps(lanes: &[&Signal], lane: &mut Lane, index: usize) -> Node {
    let mut group = Node::new("g").attr("id", format!("wavegaps_{index}"));
    for (i, sig) in lanes.iter().enumerate() {
        lane.set_signal(sig);
        let mut row = Node::new("g")
            .attr("id", format!("wavegap_{i}_{index}"))
            .attr(
                "transform",
                format!("translate(0,{})", num(lane.y0 + i as f64 * lane.yo)),
            );
        if let Some(wave) = &sig.wave {
            let mut stack: VecDeque<char> = wave.chars().collect();
            let mut sub_cycle = false;
            let mut pos = 0.0f64;
            while let Some(mut next) = stack.pop_front() {
                if next == '<' {
                    sub_cycle = true;
                    match stack.pop_front() {
                        Some(ch) => next = ch,
                        None => break,
                    }
                }
                if next == '>' {
                    sub_cycle = false;
                    match stack.pop_front() {
                        Some(ch) => next = ch,
                        None => break,
                    }
                }
                pos += if sub_cycle { 1.0 } else { 2.0 * lane.period };
                if next == '|' {
                    let adjust = if sub_cycle { 0.0 } else { lane.period };
                    row.push(
                        Node::new("use")
                            .attr("xlink:href", "#gap")
                            .attr(
                                "transform",
                                format!(
                                    "translate({})",
                                    num(lane.xs * ((pos - adjust) * lane.hscale - lane.phase))
                                ),
                            ),
                    );
                }
            }
        }
        group.push(row);
    }
    group
}

fn render_groups(groups: &[GroupRecord], lane: &Lane, index: usize) -> Node {
    let mut out = Node::fragment();
    for (i, record) in groups.iter().enumerate() {
        out.push(
            Node::new("path")
                .attr("id", format!("group_{i}_{index}"))
                .attr(
                    "d",
                    format!(
                        "m {},{} c -3,0 -5,2 -5,5 l 0,{} c 0,3 2,5 5,5",
                        num(record.x + 0.5),
                        num(record.y * lane.yo + 3.5 + lane.yh0 + lane.yh1),
                        num(record.height * lane.yo - 16.0)
                    ),
                )
                .attr("style", "stroke:#0041c4;stroke-width:1;fill:none"),
        );
        let Some(name) = &record.name else {
            continue;
        };
        let x = record.x - 10.0;
        let y = lane.yo * (record.y + record.height / 2.0) + lane.yh0 + lane.yh1;
        out.push(
            Node::new("g")
                .attr("transform", format!("translate({},{})", num(x), num(y)))
                .child(
                    Node::new("g").attr("transform", "rotate(270)").child(
                        Node::new("text")
                            .attr("text-anchor", "middle")
                            .attr("class", "info")
                            .attr("xml:space", "preserve")
                            .text(name),
                    ),
                ),
        );
    }
    out
}

// ---------------------------------------------------------------------------
// assign mode: logic-expression forests drawn as gate schematics

#[derive(Debug)]
enum PosExpr {
    Wire {
        name: String,
        x: f64,
        y: f64,
    },
    Gate {
        op: String,
        x: f64,
        y: f64,
        inputs: Vec<PosExpr>,
    },
}

impl PosExpr {
    fn point(&self, xmax: f64) -> (f64, f64) {
        match self {
            PosExpr::Wire { x, y, .. } | PosExpr::Gate { x, y, .. } => {
                (32.0 * (xmax - x), 8.0 * y)
            }
        }
    }
}

struct AssignState {
    x: f64,
    y: f64,
    xmax: f64,
}

fn position(expr: &AssignExpr, state: &mut AssignState) -> PosExpr {
    match expr {
        AssignExpr::Wire(name) => {
            let leaf = PosExpr::Wire {
                name: name.clone(),
                x: state.x + 1.0,
                y: state.y,
            };
            state.y += 2.0;
            leaf
        }
        AssignExpr::Gate { op, inputs } => {
            state.xmax = state.xmax.max(state.x);
            let y_top = state.y;
            let kids: Vec<PosExpr> = inputs
                .iter()
                .map(|input| match input {
                    AssignExpr::Gate { .. } => {
                        state.x += 1.0;
                        let kid = position(input, state);
                        state.x -= 1.0;
                        kid
                    }
                    AssignExpr::Wire(_) => position(input, state),
                })
                .collect();
            PosExpr::Gate {
                op: op.clone(),
                x: state.x,
                y: ((y_top + state.y - 2.0) / 2.0).round(),
                inputs: kids,
            }
        }
    }
}

fn render_assign(trees: &[AssignExpr], index: usize) -> (Node, f64, f64) {
    let mut state = AssignState {
        x: 0.0,
        y: 2.0,
        xmax: 0.0,
    };
    let positioned: Vec<PosExpr> = trees.iter().map(|tree| position(tree, &mut state)).collect();
    let xmax = state.xmax + 3.0;

    let mut gates = Node::new("g");
    for tree in &positioned {
        gates.push(draw_boxes(tree, xmax));
    }

    let width = 32.0 * (xmax + 1.0) + 1.0;
    let height = 8.0 * (state.y + 1.0) - 7.0;

    let mut grid = Node::new("g");
    for i in 0..=steps(4.0 * (xmax + 1.0)) {
        for j in 0..=steps(state.y + 1.0) {
            grid.push(
                Node::new("rect")
                    .attr("height", 1)
                    .attr("width", 1)
                    .attr("x", num(i as f64 * 8.0 - 0.5))
                    .attr("y", num(j as f64 * 8.0 - 0.5))
                    .attr("class", "grid"),
            );
        }
    }

    let svg = Node::new("svg")
        .attr("id", format!("svgcontent_{index}"))
        .attr("xmlns", "http://www.w3.org/2000/svg")
        .attr("xmlns:xlink", "http://www.w3.org/1999/xlink")
        .attr("viewBox", format!("0 0 {} {}", num(width), num(height)))
        .attr("width", num(width))
        .attr("height", num(height))
        .attr("overflow", "hidden")
        .child(Node::new("style").text(ASSIGN_CSS))
        .child(
            Node::new("g")
                .attr("transform", "translate(0.5, 0.5)")
                .child(grid)
                .child(gates),
        );
    (svg, width, height)
}

fn draw_boxes(expr: &PosExpr, xmax: f64) -> Node {
    let mut group = Node::new("g");
    match expr {
        PosExpr::Gate { op, inputs, .. } => {
            let out_point = expr.point(xmax);
            let in_points: Vec<(f64, f64)> =
                inputs.iter().map(|input| input.point(xmax)).collect();
            group.push(draw_gate(op, out_point, &in_points));
            for input in inputs {
                group.push(draw_boxes(input, xmax));
            }
        }
        PosExpr::Wire { name, .. } => {
            let (x, y) = expr.point(xmax);
            group.push(
                Node::new("g")
                    .attr("transform", format!("translate({},{})", num(x), num(y)))
                    .child(Node::new("title").text(name))
                    .child(
                        Node::new("path").attr("d", "M 2,0 a 2,2 0 1 1 -4,0 2,2 0 1 1 4,0 z"),
                    )
                    .child(
                        Node::new("text").child(
                            Node::new("tspan")
                                .attr("x", "-4")
                                .attr("y", "4")
                                .attr("class", "pinname")
                                .text(name),
                        ),
                    ),
            );
        }
    }
    group
}

fn draw_gate(op: &str, out: (f64, f64), inputs: &[(f64, f64)]) -> Node {
    let mut group = Node::new("g");
    let (ymin, ymax) = inputs
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), (_, y)| {
            (lo.min(*y), hi.max(*y))
        });

    if let Some((first_x, _)) = inputs.first() {
        // fan-in bus bar
        group.push(
            Node::new("g").attr("transform", "translate(16,0)").child(
                Node::new("path")
                    .attr(
                        "d",
                        format!("M {},{} {},{}", num(*first_x), num(ymin), num(*first_x), num(ymax)),
                    )
                    .attr("class", "wire"),
            ),
        );
    }
    for (x, y) in inputs {
        group.push(
            Node::new("g").child(
                Node::new("path")
                    .attr("d", format!("m {},{} 16,0", num(*x), num(*y)))
                    .attr("class", "wire"),
            ),
        );
    }
    let (ymin, ymax) = if inputs.is_empty() {
        (out.1, out.1)
    } else {
        (ymin, ymax)
    };
    group.push(
        Node::new("g")
            .attr("transform", format!("translate({},{})", num(out.0), num(out.1)))
            .child(Node::new("title").text(op))
            .child(draw_body(op, ymin - out.1, ymax - out.1)),
    );
    group
}

const GATE_CIRCLE: &str =
    " M 4,0 C 4,1.1 3.1,2 2,2 0.9,2 0,1.1 0,0 c 0,-1.1 0.9,-2 2,-2 1.1,0 2,0.9 2,2 z";

const NOT_PATH: &str = "M -11,-6 -11,6 0,0 z m -5,6 5,0";
const AND_PATH: &str = "m -16,-10 5,0 c 6,0 11,4 11,10 0,6 -5,10 -11,10 l -5,0 z";
const OR_PATH: &str =
    "m -18,-10 4,0 c 6,0 12,5 14,10 -2,5 -8,10 -14,10 l -4,0 c 2.5,-5 2.5,-15 0,-20 z";
const XOR_PATH: &str = "m -21,-10 c 1,3 2,6 2,10 m 0,0 c 0,4 -1,7 -2,10 m 3,-20 4,0 c 6,0 12,5 14,10 -2,5 -8,10 -14,10 l -4,0 c 1,-3 2,-6 2,-10 0,-4 -1,-7 -2,-10 z";
const ADD_PATH: &str = "m -8,5 0,-10 m -5,5 10,0 m 3,0 c 0,4.418278 -3.581722,8 -8,8 -4.418278,0 -8,-3.581722 -8,-8 0,-4.418278 3.581722,-8 8,-8 4.418278,0 8,3.581722 8,8 z";
const MUL_PATH: &str = "m -4,4 -8,-8 m 0,8 8,-8 m 4,4 c 0,4.418278 -3.581722,8 -8,8 -4.418278,0 -8,-3.581722 -8,-8 0,-4.418278 3.581722,-8 8,-8 4.418278,0 8,3.581722 8,8 z";

fn gate_path(op: &str) -> Option<String> {
    let (base, circled) = match op {
        "~" => (NOT_PATH, true),
        "=" => (NOT_PATH, false),
        "&" => (AND_PATH, false),
        "~&" => (AND_PATH, true),
        "|" => (OR_PATH, false),
        "~|" => (OR_PATH, true),
        "^" => (XOR_PATH, false),
        "~^" => (XOR_PATH, true),
        "+" => (ADD_PATH, false),
        "*" => (MUL_PATH, false),
        _ => return None,
    };
    Some(if circled {
        format!("{base}{GATE_CIRCLE}")
    } else {
        base.to_string()
    })
}

fn iec_label(op: &str) -> Option<&'static str> {
    match op {
        "BUF" | "INV" => Some("1"),
        "AND" | "NAND" => Some("&"),
        "OR" | "NOR" => Some("\u{2265}1"),
        "XOR" | "XNOR" => Some("=1"),
        _ => None,
    }
}

fn iec_circled(op: &str) -> bool {
    matches!(op, "INV" | "NAND" | "NOR" | "XNOR")
}

fn draw_body(op: &str, ymin: f64, ymax: f64) -> Node {
    let (ymin, ymax) = if ymax == ymin {
        (-4.0, 4.0)
    } else {
        (ymin, ymax)
    };
    if let Some(d) = gate_path(op) {
        return Node::new("path").attr("class", "gate").attr("d", d);
    }
    if let Some(label) = iec_label(op) {
        let circle = if iec_circled(op) { GATE_CIRCLE } else { "" };
        return Node::new("g")
            .child(
                Node::new("path").attr("class", "gate").attr(
                    "d",
                    format!(
                        "m -16,{} 16,0 0,{} -16,0 z{}",
                        num(ymin - 3.0),
                        num(ymax - ymin + 6.0),
                        circle
                    ),
                ),
            )
            .child(
                Node::new("text").child(
                    Node::new("tspan")
                        .attr("x", "-14")
                        .attr("y", "4")
                        .attr("class", "wirename")
                        .text(label),
                ),
            );
    }
    // anything else labels the output wire directly
    Node::new("text").child(
        Node::new("tspan")
            .attr("x", "-14")
            .attr("y", "4")
            .attr("class", "wirename")
            .text(op),
    )
}

// ---------------------------------------------------------------------------

/// Iterations of a loose `i < bound` counting loop.
fn steps(bound: f64) -> usize {
    if bound <= 0.0 { 0 } else { bound.ceil() as usize }
}

/// Coordinate formatting: shortest decimal form, rounded to 1/1000 px.
fn num(value: f64) -> String {
    let rounded = (value * 1000.0).round() / 1000.0;
    if rounded == 0.0 {
        return "0".to_string();
    }
    format!("{rounded}")
}

pub fn write_output_svg(svg: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, svg)?;
        }
        None => {
            print!("{}", svg);
        }
    }
    Ok(())
}

#[cfg(feature = "png")]
pub fn write_output_png(svg: &str, output: &Path, render_cfg: &RenderConfig) -> Result<()> {
    let opt = usvg::Options {
        font_family: "Helvetica".to_string(),
        ..usvg::Options::default()
    };
    let tree = usvg::Tree::from_str(svg, &opt)?;
    let size = tree.size().to_int_size();
    let zoom = if render_cfg.zoom > 0.0 {
        render_cfg.zoom
    } else {
        1.0
    };
    let width = ((size.width() as f32 * zoom).round() as u32).max(1);
    let height = ((size.height() as f32 * zoom).round() as u32).max(1);
    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| anyhow::anyhow!("Failed to allocate pixmap"))?;
    if let Some(color) = parse_hex_color(&render_cfg.background) {
        pixmap.fill(color);
    }
    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(
        &tree,
        resvg::tiny_skia::Transform::from_scale(zoom, zoom),
        &mut pixmap_mut,
    );
    pixmap.save_png(output)?;
    Ok(())
}

#[cfg(feature = "png")]
fn parse_hex_color(hex: &str) -> Option<resvg::tiny_skia::Color> {
    let hex = hex.strip_prefix('#')?;
    let (r, g, b) = match hex.len() {
        6 => (
            u8::from_str_radix(&hex[0..2], 16).ok()?,
            u8::from_str_radix(&hex[2..4], 16).ok()?,
            u8::from_str_radix(&hex[4..6], 16).ok()?,
        ),
        3 => {
            let digit = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17);
            (digit(0)?, digit(1)?, digit(2)?)
        }
        _ => return None,
    };
    Some(resvg::tiny_skia::Color::from_rgba8(r, g, b, 255))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_document;

    fn render(input: &str) -> String {
        let doc = parse_document(input).expect("parse failed");
        render_svg(&doc, &Config::default())
    }

    #[test]
    fn renders_a_basic_clock() {
        let svg = render("{ signal: [{ name: 'clk', wave: 'p...' }] }");
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("viewBox=\"0 0 "));
        assert!(svg.contains("xlink:href=\"#pclk\""));
        assert!(svg.contains(">clk</text>"));
    }

    #[test]
    fn rendering_twice_is_byte_identical() {
        let input = "{ signal: [{ name: 'clk', wave: 'p..' }, { name: 'bus', wave: '=.=', data: 'a b' }],\
                      config: { hscale: 2 }, head: { tick: 0 } }";
        assert_eq!(render(input), render(input));
    }

    #[test]
    fn head_tick_zero_labels_each_gridline() {
        // three cells at hscale 1: marks 0..3, labels 0 1 2 3
        let svg = render("{ signal: [{ name: 'clk', wave: 'p..' }], head: { tick: 0 } }");
        for label in ["0", "1", "2", "3"] {
            assert!(
                svg.contains(&format!("class=\"muted\" xml:space=\"preserve\">{label}</text>")),
                "missing tick label {label}"
            );
        }
        assert!(!svg.contains("class=\"muted\" xml:space=\"preserve\">4</text>"));
    }

    #[test]
    fn named_events_connect_with_a_curved_arrow() {
        let svg = render(
            "{ signal: [{ name: 'a', wave: '01', node: '.a' }, { name: 'b', wave: '10', node: '.b' }],\
              edge: ['a~>b hello'] }",
        );
        assert_eq!(svg.matches("marker-end:url(#arrowhead)").count(), 1);
        assert!(svg.contains(">hello</text>"));
        // curve control points, not a straight segment
        assert!(svg.contains(" c "));
    }

    #[test]
    fn waveless_signal_renders_name_without_bricks() {
        let svg = render("{ signal: [{ name: 'only-name' }] }");
        assert!(svg.contains(">only-name</text>"));
        assert!(!svg.contains("<use"));
    }

    #[test]
    fn gap_marker_emits_the_gap_glyph() {
        let svg = render("{ signal: [{ name: 's', wave: '0|1' }] }");
        assert!(svg.contains("xlink:href=\"#gap\""));
    }

    #[test]
    fn groups_draw_brackets_and_rotated_labels() {
        let svg = render(
            "{ signal: [ ['bus', { name: 'addr', wave: '=.' }, { name: 'data', wave: '=.' }] ] }",
        );
        assert!(svg.contains("rotate(270)"));
        assert!(svg.contains(">bus</text>"));
        assert!(svg.contains("id=\"group_0_0\""));
    }

    #[test]
    fn hbounds_clip_the_visible_window() {
        let bounded = render(
            "{ signal: [{ name: 'clk', wave: 'p.......' }], config: { hbounds: [1, 3] } }",
        );
        let full = render("{ signal: [{ name: 'clk', wave: 'p.......' }] }");
        let width_of = |svg: &str| {
            let start = svg.find("viewBox=\"0 0 ").unwrap() + "viewBox=\"0 0 ".len();
            let rest = &svg[start..];
            rest.split(' ').next().unwrap().parse::<f64>().unwrap()
        };
        assert!(width_of(&bounded) < width_of(&full));
    }

    #[test]
    fn assign_mode_draws_gates_and_pins() {
        let doc = parse_document("{ assign: [ ['out', ['&', 'a', 'b']] ] }").unwrap();
        let svg = render_svg(&doc, &Config::default());
        assert!(svg.contains("class=\"gate\""));
        assert!(svg.contains("class=\"pinname\""));
        assert!(svg.contains(">a</tspan>"));
        assert!(svg.contains("class=\"grid\""));
    }

    #[test]
    fn data_labels_center_on_value_runs() {
        let svg = render("{ signal: [{ name: 'bus', wave: '=.', data: 'A5' }] }");
        assert!(svg.contains(">A5</text>"));
    }

    #[test]
    fn unknown_edge_shape_degrades_visibly() {
        let svg = render(
            "{ signal: [{ wave: '01', node: 'a.' }, { wave: '10', node: 'b.' }], edge: ['a?b'] }",
        );
        assert!(svg.contains("stroke:#F00"));
    }
}
