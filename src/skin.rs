//! Brick catalog: the symbol library a diagram's `use` references resolve
//! against, plus the cell geometry every layout computation derives from.
//! The catalog is presentation data, swappable by name; `default` is built
//! in. Path coordinates are skin constants, not layout logic.

use crate::markup::Node;

type BrickDef = (&'static str, &'static [(&'static str, &'static str)]);

#[derive(Debug)]
pub struct Skin {
    pub name: &'static str,
    /// Half-cell width in px; one brick advances this much.
    pub brick_width: f64,
    pub brick_height: f64,
    /// Data-label x offset inside a cell.
    pub label_x: f64,
    /// Text baseline y inside a row.
    pub label_y: f64,
    pub font_family: &'static str,
    /// Label font size in pt, as the stylesheet declares it.
    pub font_size: f32,
    pub css: &'static str,
    bricks: &'static [BrickDef],
}

pub static DEFAULT: Skin = Skin {
    name: "default",
    brick_width: 20.0,
    brick_height: 20.0,
    label_x: 6.0,
    label_y: 15.0,
    font_family: "Helvetica",
    font_size: 11.0,
    css: DEFAULT_CSS,
    bricks: DEFAULT_BRICKS,
};

static SKINS: &[&Skin] = &[&DEFAULT];

impl Skin {
    /// Resolve a skin by name; unknown or absent names fall back to `default`.
    pub fn by_name(name: Option<&str>) -> &'static Skin {
        name.and_then(|name| SKINS.iter().find(|skin| skin.name == name).copied())
            .unwrap_or(&DEFAULT)
    }

    /// The `<defs>` block: socket cell, every brick symbol, arrow markers.
    pub fn defs(&self) -> Node {
        let mut defs = Node::new("defs");
        defs.push(
            Node::new("g").attr("id", "socket").child(
                Node::new("rect")
                    .attr("height", self.brick_height)
                    .attr("width", self.brick_width)
                    .attr("x", self.label_x)
                    .attr("y", self.label_y),
            ),
        );
        for (id, paths) in self.bricks {
            let mut symbol = Node::new("g").attr("id", *id);
            for (class, d) in *paths {
                let mut path = Node::new("path");
                if !class.is_empty() {
                    path = path.attr("class", *class);
                }
                symbol.push(path.attr("d", *d));
            }
            defs.push(symbol);
        }
        defs.push(arrow_marker("arrowhead", "0 -4 11 8", 15.0, "M0 -4 11 0 0 4z"));
        defs.push(arrow_marker("arrowtail", "-11 -4 11 8", -15.0, "M0 -4 -11 0 0 4z"));
        defs
    }

    pub fn font_size_px(&self) -> f32 {
        self.font_size * 4.0 / 3.0
    }
}

fn arrow_marker(id: &str, view_box: &str, ref_x: f64, d: &str) -> Node {
    Node::new("marker")
        .attr("id", id)
        .attr("style", "fill:#0041c4")
        .attr("markerHeight", 7)
        .attr("markerWidth", 10)
        .attr("markerUnits", "strokeWidth")
        .attr("viewBox", view_box)
        .attr("refX", ref_x)
        .attr("refY", 0)
        .attr("orient", "auto")
        .child(Node::new("path").attr("d", d))
}

/// Stylesheet for the `assign` logic-gate mode.
pub(crate) const ASSIGN_CSS: &str = ".pinname {font-size:12px; font-style:normal; font-variant:normal; font-weight:500; font-stretch:normal; text-align:center; text-anchor:end; font-family:Helvetica} .wirename {font-size:12px; font-style:normal; font-variant:normal; font-weight:500; font-stretch:normal; text-align:center; text-anchor:start; font-family:Helvetica} .wirename:hover {fill:blue} .gate {color:#000; fill:#ffc; fill-opacity: 1;stroke:#000; stroke-width:1; stroke-opacity:1} .gate:hover {fill:red !important; } .wire {fill:none; stroke:#000; stroke-width:1; stroke-opacity:1} .grid {fill:#fff; fill-opacity:1; stroke:none}";

pub(crate) const DEFAULT_CSS: &str = "text{width:500;overflow:auto;font-size:11pt;font-style:normal;font-variant:normal;font-weight:normal;font-stretch:normal;text-align:center;fill-opacity:1;font-family:Helvetica}.muted{fill:#aaa}.warning{fill:#f6b900}.error{fill:#f60000}.info{fill:#0041c4}.success{fill:#00ab00}.h1{font-size:33pt;font-weight:bold}.h2{font-size:27pt;font-weight:bold}.h3{font-size:20pt;font-weight:bold}.h4{font-size:14pt;font-weight:bold}.h5{font-size:11pt;font-weight:bold}.h6{font-size:8pt;font-weight:bold}.s6{color:#000;display:inline;enable-background:accumulate;fill-opacity:1;fill-rule:nonzero;fill:#ffffb4;marker:none;overflow:auto;stroke-width:1px;stroke:none;visibility:visible}.s12{fill:none;stroke-dasharray:none;stroke-linecap:round;stroke-linejoin:miter;stroke-miterlimit:4;stroke-opacity:1;stroke-width:1;stroke:#0041c4}.s9{fill-opacity:1;fill:#000;stroke:none}.s1{fill:none;stroke-dasharray:none;stroke-linecap:round;stroke-linejoin:miter;stroke-miterlimit:4;stroke-opacity:1;stroke-width:1;stroke:#000}.s10{color:#000;display:inline;enable-background:accumulate;fill-opacity:1;fill-rule:nonzero;fill:#fff;marker:none;overflow:auto;stroke-width:1px;stroke:none;visibility:visible}.s2{fill:none;stroke-dasharray:none;stroke-linecap:round;stroke-linejoin:miter;stroke-miterlimit:4;stroke-opacity:1;stroke-width:0.5;stroke:#000}.s7{color:#000;display:inline;enable-background:accumulate;fill-opacity:1;fill-rule:nonzero;fill:#ffe0b9;marker:none;overflow:auto;stroke-width:1px;stroke:none;visibility:visible}.s8{color:#000;display:inline;enable-background:accumulate;fill-opacity:1;fill-rule:nonzero;fill:#b9e0ff;marker:none;overflow:auto;stroke-width:1px;stroke:none;visibility:visible}.s5{fill:#fff;stroke:none}.s11{fill-opacity:1;fill:#0041c4;stroke:none}.s3{color:#000;display:inline;enable-background:accumulate;fill:none;marker:none;overflow:auto;stroke-dasharray:1, 3;stroke-dashoffset:0;stroke-linecap:round;stroke-linejoin:miter;stroke-miterlimit:4;stroke-opacity:1;stroke-width:1;stroke:#000;visibility:visible}.s4{color:#000;display:inline;fill:none;marker:none;overflow:auto;stroke-dasharray:none;stroke-dashoffset:0;stroke-linecap:round;stroke-linejoin:miter;stroke-miterlimit:4;stroke-opacity:1;stroke-width:1;stroke:#000;visibility:visible}";

pub(crate) const DEFAULT_BRICKS: &[(&str, &[(&str, &str)])] = &[
    ("pclk", &[("s1", "M0,20 0,0 20,0")]),
    ("nclk", &[("s1", "m0,0 0,20 20,0")]),
    ("000", &[("s1", "m0,20 20,0")]),
    ("0m0", &[("s1", "m0,20 3,0 3,-10 3,10 11,0")]),
    ("0m1", &[("s1", "M0,20 3,20 9,0 20,0")]),
    ("0mx", &[("s1", "M3,20 9,0 20,0"), ("s2", "m20,15 -5,5"), ("s2", "M20,10 10,20"), ("s2", "M20,5 5,20"), ("s2", "M20,0 4,16"), ("s2", "M15,0 6,9"), ("s2", "M10,0 9,1"), ("s1", "m0,20 20,0")]),
    ("0md", &[("s3", "m8,20 10,0"), ("s1", "m0,20 5,0")]),
    ("0mu", &[("s1", "m0,20 3,0 C 7,10 10.107603,0 20,0")]),
    ("0mz", &[("s1", "m0,20 3,0 C 10,10 15,10 20,10")]),
    ("111", &[("s1", "M0,0 20,0")]),
    ("1m0", &[("s1", "m0,0 3,0 6,20 11,0")]),
    ("1m1", &[("s1", "M0,0 3,0 6,10 9,0 20,0")]),
    ("1mx", &[("s1", "m3,0 6,20 11,0"), ("s1", "M0,0 20,0"), ("s2", "m20,15 -5,5"), ("s2", "M20,10 10,20"), ("s2", "M20,5 8,17"), ("s2", "M20,0 7,13"), ("s2", "M15,0 6,9"), ("s2", "M10,0 5,5"), ("s2", "M3.5,1.5 5,0")]),
    ("1md", &[("s1", "m0,0 3,0 c 4,10 7,20 17,20")]),
    ("1mu", &[("s1", "M0,0 5,0"), ("s3", "M8,0 18,0")]),
    ("1mz", &[("s1", "m0,0 3,0 c 7,10 12,10 17,10")]),
    ("xxx", &[("s1", "m0,20 20,0"), ("s1", "M0,0 20,0"), ("s2", "M0,5 5,0"), ("s2", "M0,10 10,0"), ("s2", "M0,15 15,0"), ("s2", "M0,20 20,0"), ("s2", "M5,20 20,5"), ("s2", "M10,20 20,10"), ("s2", "m15,20 5,-5")]),
    ("xm0", &[("s1", "M0,0 4,0 9,20"), ("s1", "m0,20 20,0"), ("s2", "M0,5 4,1"), ("s2", "M0,10 5,5"), ("s2", "M0,15 6,9"), ("s2", "M0,20 7,13"), ("s2", "M5,20 8,17")]),
    ("xm1", &[("s1", "M0,0 20,0"), ("s1", "M0,20 4,20 9,0"), ("s2", "M0,5 5,0"), ("s2", "M0,10 9,1"), ("s2", "M0,15 7,8"), ("s2", "M0,20 5,15")]),
    ("xmx", &[("s1", "m0,20 20,0"), ("s1", "M0,0 20,0"), ("s2", "M0,5 5,0"), ("s2", "M0,10 10,0"), ("s2", "M0,15 15,0"), ("s2", "M0,20 20,0"), ("s2", "M5,20 20,5"), ("s2", "M10,20 20,10"), ("s2", "m15,20 5,-5")]),
    ("xmd", &[("s1", "m0,0 4,0 c 3,10 6,20 16,20"), ("s1", "m0,20 20,0"), ("s2", "M0,5 4,1"), ("s2", "M0,10 5.5,4.5"), ("s2", "M0,15 6.5,8.5"), ("s2", "M0,20 8,12"), ("s2", "m5,20 5,-5"), ("s2", "m10,20 2.5,-2.5")]),
    ("xmu", &[("s1", "M0,0 20,0"), ("s1", "m0,20 4,0 C 7,10 10,0 20,0"), ("s2", "M0,5 5,0"), ("s2", "M0,10 10,0"), ("s2", "M0,15 10,5"), ("s2", "M0,20 6,14")]),
    ("xmz", &[("s1", "m0,0 4,0 c 6,10 11,10 16,10"), ("s1", "m0,20 4,0 C 10,10 15,10 20,10"), ("s2", "M0,5 4.5,0.5"), ("s2", "M0,10 6.5,3.5"), ("s2", "M0,15 8.5,6.5"), ("s2", "M0,20 11.5,8.5")]),
    ("ddd", &[("s3", "m0,20 20,0")]),
    ("dm0", &[("s3", "m0,20 10,0"), ("s1", "m12,20 8,0")]),
    ("dm1", &[("s1", "M0,20 3,20 9,0 20,0")]),
    ("dmx", &[("s1", "M3,20 9,0 20,0"), ("s2", "m20,15 -5,5"), ("s2", "M20,10 10,20"), ("s2", "M20,5 5,20"), ("s2", "M20,0 4,16"), ("s2", "M15,0 6,9"), ("s2", "M10,0 9,1"), ("s1", "m0,20 20,0")]),
    ("dmd", &[("s3", "m0,20 20,0")]),
    ("dmu", &[("s1", "m0,20 3,0 C 7,10 10.107603,0 20,0")]),
    ("dmz", &[("s1", "m0,20 3,0 C 10,10 15,10 20,10")]),
    ("uuu", &[("s3", "M0,0 20,0")]),
    ("um0", &[("s1", "m0,0 3,0 6,20 11,0")]),
    ("um1", &[("s3", "M0,0 10,0"), ("s1", "m12,0 8,0")]),
    ("umx", &[("s1", "m3,0 6,20 11,0"), ("s1", "M0,0 20,0"), ("s2", "m20,15 -5,5"), ("s2", "M20,10 10,20"), ("s2", "M20,5 8,17"), ("s2", "M20,0 7,13"), ("s2", "M15,0 6,9"), ("s2", "M10,0 5,5"), ("s2", "M3.5,1.5 5,0")]),
    ("umd", &[("s1", "m0,0 3,0 c 4,10 7,20 17,20")]),
    ("umu", &[("s3", "M0,0 20,0")]),
    ("umz", &[("s4", "m0,0 3,0 c 7,10 12,10 17,10")]),
    ("zzz", &[("s1", "m0,10 20,0")]),
    ("zm0", &[("s1", "m0,10 6,0 3,10 11,0")]),
    ("zm1", &[("s1", "M0,10 6,10 9,0 20,0")]),
    ("zmx", &[("s1", "m6,10 3,10 11,0"), ("s1", "M0,10 6,10 9,0 20,0"), ("s2", "m20,15 -5,5"), ("s2", "M20,10 10,20"), ("s2", "M20,5 8,17"), ("s2", "M20,0 7,13"), ("s2", "M15,0 6.5,8.5"), ("s2", "M10,0 9,1")]),
    ("zmd", &[("s1", "m0,10 7,0 c 3,5 8,10 13,10")]),
    ("zmu", &[("s1", "m0,10 7,0 C 10,5 15,0 20,0")]),
    ("zmz", &[("s1", "m0,10 20,0")]),
    ("gap", &[("s5", "m7,-2 -4,0 c -5,0 -5,24 -10,24 l 4,0 C 2,22 2,-2 7,-2 z"), ("s1", "M-7,22 C -2,22 -2,-2 3,-2"), ("s1", "M-3,22 C 2,22 2,-2 7,-2")]),
    ("0mv-3", &[("s6", "M9,0 20,0 20,20 3,20 z"), ("s1", "M3,20 9,0 20,0"), ("s1", "m0,20 20,0")]),
    ("1mv-3", &[("s6", "M2.875,0 20,0 20,20 9,20 z"), ("s1", "m3,0 6,20 11,0"), ("s1", "M0,0 20,0")]),
    ("xmv-3", &[("s6", "M9,0 20,0 20,20 9,20 6,10 z"), ("s1", "M0,20 3,20 9,0 20,0"), ("s1", "m0,0 3,0 6,20 11,0"), ("s2", "M0,5 3.5,1.5"), ("s2", "M0,10 4.5,5.5"), ("s2", "M0,15 6,9"), ("s2", "M0,20 4,16")]),
    ("dmv-3", &[("s6", "M9,0 20,0 20,20 3,20 z"), ("s1", "M3,20 9,0 20,0"), ("s1", "m0,20 20,0")]),
    ("umv-3", &[("s6", "M3,0 20,0 20,20 9,20 z"), ("s1", "m3,0 6,20 11,0"), ("s1", "M0,0 20,0")]),
    ("zmv-3", &[("s6", "M9,0 20,0 20,20 9,20 6,10 z"), ("s1", "m6,10 3,10 11,0"), ("s1", "M0,10 6,10 9,0 20,0")]),
    ("vvv-3", &[("s6", "M20,20 0,20 0,0 20,0"), ("s1", "m0,20 20,0"), ("s1", "M0,0 20,0")]),
    ("vm0-3", &[("s6", "M0,20 0,0 3,0 9,20"), ("s1", "M0,0 3,0 9,20"), ("s1", "m0,20 20,0")]),
    ("vm1-3", &[("s6", "M0,0 0,20 3,20 9,0"), ("s1", "M0,0 20,0"), ("s1", "M0,20 3,20 9,0")]),
    ("vmx-3", &[("s6", "M0,0 0,20 3,20 6,10 3,0"), ("s1", "m0,0 3,0 6,20 11,0"), ("s1", "M0,20 3,20 9,0 20,0"), ("s2", "m20,15 -5,5"), ("s2", "M20,10 10,20"), ("s2", "M20,5 8,17"), ("s2", "M20,0 7,13"), ("s2", "M15,0 7,8"), ("s2", "M10,0 9,1")]),
    ("vmd-3", &[("s6", "m0,0 0,20 20,0 C 10,20 7,10 3,0"), ("s1", "m0,0 3,0 c 4,10 7,20 17,20"), ("s1", "m0,20 20,0")]),
    ("vmu-3", &[("s6", "m0,0 0,20 3,0 C 7,10 10,0 20,0"), ("s1", "m0,20 3,0 C 7,10 10,0 20,0"), ("s1", "M0,0 20,0")]),
    ("vmz-3", &[("s6", "M0,0 3,0 C 10,10 15,10 20,10 15,10 10,10 3,20 L 0,20"), ("s1", "m0,0 3,0 c 7,10 12,10 17,10"), ("s1", "m0,20 3,0 C 10,10 15,10 20,10")]),
    ("vmv-3-3", &[("s6", "M9,0 20,0 20,20 9,20 6,10 z"), ("s6", "M3,0 0,0 0,20 3,20 6,10 z"), ("s1", "m0,0 3,0 6,20 11,0"), ("s1", "M0,20 3,20 9,0 20,0")]),
    ("vmv-3-4", &[("s7", "M9,0 20,0 20,20 9,20 6,10 z"), ("s6", "M3,0 0,0 0,20 3,20 6,10 z"), ("s1", "m0,0 3,0 6,20 11,0"), ("s1", "M0,20 3,20 9,0 20,0")]),
    ("vmv-3-5", &[("s8", "M9,0 20,0 20,20 9,20 6,10 z"), ("s6", "M3,0 0,0 0,20 3,20 6,10 z"), ("s1", "m0,0 3,0 6,20 11,0"), ("s1", "M0,20 3,20 9,0 20,0")]),
    ("vmv-4-3", &[("s6", "M9,0 20,0 20,20 9,20 6,10 z"), ("s7", "M3,0 0,0 0,20 3,20 6,10 z"), ("s1", "m0,0 3,0 6,20 11,0"), ("s1", "M0,20 3,20 9,0 20,0")]),
    ("vmv-4-4", &[("s7", "M9,0 20,0 20,20 9,20 6,10 z"), ("s7", "M3,0 0,0 0,20 3,20 6,10 z"), ("s1", "m0,0 3,0 6,20 11,0"), ("s1", "M0,20 3,20 9,0 20,0")]),
    ("vmv-4-5", &[("s8", "M9,0 20,0 20,20 9,20 6,10 z"), ("s7", "M3,0 0,0 0,20 3,20 6,10 z"), ("s1", "m0,0 3,0 6,20 11,0"), ("s1", "M0,20 3,20 9,0 20,0")]),
    ("vmv-5-3", &[("s6", "M9,0 20,0 20,20 9,20 6,10 z"), ("s8", "M3,0 0,0 0,20 3,20 6,10 z"), ("s1", "m0,0 3,0 6,20 11,0"), ("s1", "M0,20 3,20 9,0 20,0")]),
    ("vmv-5-4", &[("s7", "M9,0 20,0 20,20 9,20 6,10 z"), ("s8", "M3,0 0,0 0,20 3,20 6,10 z"), ("s1", "m0,0 3,0 6,20 11,0"), ("s1", "M0,20 3,20 9,0 20,0")]),
    ("vmv-5-5", &[("s8", "M9,0 20,0 20,20 9,20 6,10 z"), ("s8", "M3,0 0,0 0,20 3,20 6,10 z"), ("s1", "m0,0 3,0 6,20 11,0"), ("s1", "M0,20 3,20 9,0 20,0")]),
    ("0mv-4", &[("s7", "M9,0 20,0 20,20 3,20 z"), ("s1", "M3,20 9,0 20,0"), ("s1", "m0,20 20,0")]),
    ("1mv-4", &[("s7", "M2.875,0 20,0 20,20 9,20 z"), ("s1", "m3,0 6,20 11,0"), ("s1", "M0,0 20,0")]),
    ("xmv-4", &[("s7", "M9,0 20,0 20,20 9,20 6,10 z"), ("s1", "M0,20 3,20 9,0 20,0"), ("s1", "m0,0 3,0 6,20 11,0"), ("s2", "M0,5 3.5,1.5"), ("s2", "M0,10 4.5,5.5"), ("s2", "M0,15 6,9"), ("s2", "M0,20 4,16")]),
    ("dmv-4", &[("s7", "M9,0 20,0 20,20 3,20 z"), ("s1", "M3,20 9,0 20,0"), ("s1", "m0,20 20,0")]),
    ("umv-4", &[("s7", "M3,0 20,0 20,20 9,20 z"), ("s1", "m3,0 6,20 11,0"), ("s1", "M0,0 20,0")]),
    ("zmv-4", &[("s7", "M9,0 20,0 20,20 9,20 6,10 z"), ("s1", "m6,10 3,10 11,0"), ("s1", "M0,10 6,10 9,0 20,0")]),
    ("0mv-5", &[("s8", "M9,0 20,0 20,20 3,20 z"), ("s1", "M3,20 9,0 20,0"), ("s1", "m0,20 20,0")]),
    ("1mv-5", &[("s8", "M2.875,0 20,0 20,20 9,20 z"), ("s1", "m3,0 6,20 11,0"), ("s1", "M0,0 20,0")]),
    ("xmv-5", &[("s8", "M9,0 20,0 20,20 9,20 6,10 z"), ("s1", "M0,20 3,20 9,0 20,0"), ("s1", "m0,0 3,0 6,20 11,0"), ("s2", "M0,5 3.5,1.5"), ("s2", "M0,10 4.5,5.5"), ("s2", "M0,15 6,9"), ("s2", "M0,20 4,16")]),
    ("dmv-5", &[("s8", "M9,0 20,0 20,20 3,20 z"), ("s1", "M3,20 9,0 20,0"), ("s1", "m0,20 20,0")]),
    ("umv-5", &[("s8", "M3,0 20,0 20,20 9,20 z"), ("s1", "m3,0 6,20 11,0"), ("s1", "M0,0 20,0")]),
    ("zmv-5", &[("s8", "M9,0 20,0 20,20 9,20 6,10 z"), ("s1", "m6,10 3,10 11,0"), ("s1", "M0,10 6,10 9,0 20,0")]),
    ("vvv-4", &[("s7", "M20,20 0,20 0,0 20,0"), ("s1", "m0,20 20,0"), ("s1", "M0,0 20,0")]),
    ("vm0-4", &[("s7", "M0,20 0,0 3,0 9,20"), ("s1", "M0,0 3,0 9,20"), ("s1", "m0,20 20,0")]),
    ("vm1-4", &[("s7", "M0,0 0,20 3,20 9,0"), ("s1", "M0,0 20,0"), ("s1", "M0,20 3,20 9,0")]),
    ("vmx-4", &[("s7", "M0,0 0,20 3,20 6,10 3,0"), ("s1", "m0,0 3,0 6,20 11,0"), ("s1", "M0,20 3,20 9,0 20,0"), ("s2", "m20,15 -5,5"), ("s2", "M20,10 10,20"), ("s2", "M20,5 8,17"), ("s2", "M20,0 7,13"), ("s2", "M15,0 7,8"), ("s2", "M10,0 9,1")]),
    ("vmd-4", &[("s7", "m0,0 0,20 20,0 C 10,20 7,10 3,0"), ("s1", "m0,0 3,0 c 4,10 7,20 17,20"), ("s1", "m0,20 20,0")]),
    ("vmu-4", &[("s7", "m0,0 0,20 3,0 C 7,10 10,0 20,0"), ("s1", "m0,20 3,0 C 7,10 10,0 20,0"), ("s1", "M0,0 20,0")]),
    ("vmz-4", &[("s7", "M0,0 3,0 C 10,10 15,10 20,10 15,10 10,10 3,20 L 0,20"), ("s1", "m0,0 3,0 c 7,10 12,10 17,10"), ("s1", "m0,20 3,0 C 10,10 15,10 20,10")]),
    ("vvv-5", &[("s8", "M20,20 0,20 0,0 20,0"), ("s1", "m0,20 20,0"), ("s1", "M0,0 20,0")]),
    ("vm0-5", &[("s8", "M0,20 0,0 3,0 9,20"), ("s1", "M0,0 3,0 9,20"), ("s1", "m0,20 20,0")]),
    ("vm1-5", &[("s8", "M0,0 0,20 3,20 9,0"), ("s1", "M0,0 20,0"), ("s1", "M0,20 3,20 9,0")]),
    ("vmx-5", &[("s8", "M0,0 0,20 3,20 6,10 3,0"), ("s1", "m0,0 3,0 6,20 11,0"), ("s1", "M0,20 3,20 9,0 20,0"), ("s2", "m20,15 -5,5"), ("s2", "M20,10 10,20"), ("s2", "M20,5 8,17"), ("s2", "M20,0 7,13"), ("s2", "M15,0 7,8"), ("s2", "M10,0 9,1")]),
    ("vmd-5", &[("s8", "m0,0 0,20 20,0 C 10,20 7,10 3,0"), ("s1", "m0,0 3,0 c 4,10 7,20 17,20"), ("s1", "m0,20 20,0")]),
    ("vmu-5", &[("s8", "m0,0 0,20 3,0 C 7,10 10,0 20,0"), ("s1", "m0,20 3,0 C 7,10 10,0 20,0"), ("s1", "M0,0 20,0")]),
    ("vmz-5", &[("s8", "M0,0 3,0 C 10,10 15,10 20,10 15,10 10,10 3,20 L 0,20"), ("s1", "m0,0 3,0 c 7,10 12,10 17,10"), ("s1", "m0,20 3,0 C 10,10 15,10 20,10")]),
    ("Pclk", &[("s9", "M-3,12 0,3 3,12 C 1,11 -1,11 -3,12 z"), ("s1", "M0,20 0,0 20,0")]),
    ("Nclk", &[("s9", "M-3,8 0,17 3,8 C 1,9 -1,9 -3,8 z"), ("s1", "m0,0 0,20 20,0")]),
    ("vvv-2", &[("s10", "M20,20 0,20 0,0 20,0"), ("s1", "m0,20 20,0"), ("s1", "M0,0 20,0")]),
    ("vm0-2", &[("s10", "M0,20 0,0 3,0 9,20"), ("s1", "M0,0 3,0 9,20"), ("s1", "m0,20 20,0")]),
    ("vm1-2", &[("s10", "M0,0 0,20 3,20 9,0"), ("s1", "M0,0 20,0"), ("s1", "M0,20 3,20 9,0")]),
    ("vmx-2", &[("s10", "M0,0 0,20 3,20 6,10 3,0"), ("s1", "m0,0 3,0 6,20 11,0"), ("s1", "M0,20 3,20 9,0 20,0"), ("s2", "m20,15 -5,5"), ("s2", "M20,10 10,20"), ("s2", "M20,5 8,17"), ("s2", "M20,0 7,13"), ("s2", "M15,0 7,8"), ("s2", "M10,0 9,1")]),
    ("vmd-2", &[("s10", "m0,0 0,20 20,0 C 10,20 7,10 3,0"), ("s1", "m0,0 3,0 c 4,10 7,20 17,20"), ("s1", "m0,20 20,0")]),
    ("vmu-2", &[("s10", "m0,0 0,20 3,0 C 7,10 10,0 20,0"), ("s1", "m0,20 3,0 C 7,10 10,0 20,0"), ("s1", "M0,0 20,0")]),
    ("vmz-2", &[("s10", "M0,0 3,0 C 10,10 15,10 20,10 15,10 10,10 3,20 L 0,20"), ("s1", "m0,0 3,0 c 7,10 12,10 17,10"), ("s1", "m0,20 3,0 C 10,10 15,10 20,10")]),
    ("0mv-2", &[("s10", "M9,0 20,0 20,20 3,20 z"), ("s1", "M3,20 9,0 20,0"), ("s1", "m0,20 20,0")]),
    ("1mv-2", &[("s10", "M2.875,0 20,0 20,20 9,20 z"), ("s1", "m3,0 6,20 11,0"), ("s1", "M0,0 20,0")]),
    ("xmv-2", &[("s10", "M9,0 20,0 20,20 9,20 6,10 z"), ("s1", "M0,20 3,20 9,0 20,0"), ("s1", "m0,0 3,0 6,20 11,0"), ("s2", "M0,5 3.5,1.5"), ("s2", "M0,10 4.5,5.5"), ("s2", "M0,15 6,9"), ("s2", "M0,20 4,16")]),
    ("dmv-2", &[("s10", "M9,0 20,0 20,20 3,20 z"), ("s1", "M3,20 9,0 20,0"), ("s1", "m0,20 20,0")]),
    ("umv-2", &[("s10", "M3,0 20,0 20,20 9,20 z"), ("s1", "m3,0 6,20 11,0"), ("s1", "M0,0 20,0")]),
    ("zmv-2", &[("s10", "M9,0 20,0 20,20 9,20 6,10 z"), ("s1", "m6,10 3,10 11,0"), ("s1", "M0,10 6,10 9,0 20,0")]),
    ("vmv-3-2", &[("s10", "M9,0 20,0 20,20 9,20 6,10 z"), ("s6", "M3,0 0,0 0,20 3,20 6,10 z"), ("s1", "m0,0 3,0 6,20 11,0"), ("s1", "M0,20 3,20 9,0 20,0")]),
    ("vmv-4-2", &[("s10", "M9,0 20,0 20,20 9,20 6,10 z"), ("s7", "M3,0 0,0 0,20 3,20 6,10 z"), ("s1", "m0,0 3,0 6,20 11,0"), ("s1", "M0,20 3,20 9,0 20,0")]),
    ("vmv-5-2", &[("s10", "M9,0 20,0 20,20 9,20 6,10 z"), ("s8", "M3,0 0,0 0,20 3,20 6,10 z"), ("s1", "m0,0 3,0 6,20 11,0"), ("s1", "M0,20 3,20 9,0 20,0")]),
    ("vmv-2-3", &[("s6", "M9,0 20,0 20,20 9,20 6,10 z"), ("s10", "M3,0 0,0 0,20 3,20 6,10 z"), ("s1", "m0,0 3,0 6,20 11,0"), ("s1", "M0,20 3,20 9,0 20,0")]),
    ("vmv-2-4", &[("s7", "M9,0 20,0 20,20 9,20 6,10 z"), ("s10", "M3,0 0,0 0,20 3,20 6,10 z"), ("s1", "m0,0 3,0 6,20 11,0"), ("s1", "M0,20 3,20 9,0 20,0")]),
    ("vmv-2-5", &[("s8", "M9,0 20,0 20,20 9,20 6,10 z"), ("s10", "M3,0 0,0 0,20 3,20 6,10 z"), ("s1", "m0,0 3,0 6,20 11,0"), ("s1", "M0,20 3,20 9,0 20,0")]),
    ("vmv-2-2", &[("s10", "M9,0 20,0 20,20 9,20 6,10 z"), ("s10", "M3,0 0,0 0,20 3,20 6,10 z"), ("s1", "m0,0 3,0 6,20 11,0"), ("s1", "M0,20 3,20 9,0 20,0")]),
    ("arrow0", &[("s11", "m-12,-3 9,3 -9,3 c 1,-2 1,-4 0,-6 z"), ("s12", "M0,0 -15,0")]),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_skin_falls_back_to_default() {
        assert_eq!(Skin::by_name(Some("nope")).name, "default");
        assert_eq!(Skin::by_name(None).name, "default");
    }

    #[test]
    fn defs_carry_every_brick_symbol() {
        let svg = DEFAULT.defs().serialize();
        for id in ["socket", "pclk", "nclk", "000", "111", "xxx", "vvv-2", "0m1", "gap"] {
            assert!(
                svg.contains(&format!("id=\"{id}\"")),
                "missing brick {id}"
            );
        }
        assert!(svg.contains("id=\"arrowhead\""));
        assert!(svg.contains("id=\"arrowtail\""));
    }

    #[test]
    fn geometry_matches_socket_cell() {
        assert_eq!(DEFAULT.brick_width, 20.0);
        assert_eq!(DEFAULT.brick_height, 20.0);
        assert_eq!(DEFAULT.label_x, 6.0);
        assert_eq!(DEFAULT.label_y, 15.0);
    }
}
