//! Per-render geometry: the `Lane` context is constructed fresh for every
//! render call and threaded through parsing and rendering explicitly. All
//! derived fields are a pure function of the skin and the parsed document.

use crate::ir::{Caption, Document, Signal, SignalItem};
use crate::skin::Skin;
use crate::wave;

/// Geometry and config accumulator for one render pass.
#[derive(Debug, Clone)]
pub struct Lane {
    /// Half-cell (brick) width.
    pub xs: f64,
    /// Brick height.
    pub ys: f64,
    /// Left gutter width, recomputed from the widest name label.
    pub xg: f64,
    /// First row top offset.
    pub y0: f64,
    /// Row pitch.
    pub yo: f64,
    /// Name label x relative to the gutter.
    pub tgo: f64,
    /// Text baseline y within a row.
    pub ym: f64,
    /// Data label x offset within a cell.
    pub xlabel: f64,
    /// Widest brick count across rows, clipped to the hbounds window.
    pub xmax: f64,
    pub hscale: f64,
    /// hbounds window in brick indices.
    pub xmin_cfg: f64,
    pub xmax_cfg: f64,
    /// Head gaps: tick row, caption text.
    pub yh0: f64,
    pub yh1: f64,
    /// Foot gaps.
    pub yf0: f64,
    pub yf1: f64,
    /// Current signal's cell period and half-cell phase shift.
    pub period: f64,
    pub phase: f64,
    pub head: Option<Caption>,
    pub foot: Option<Caption>,
}

impl Lane {
    pub fn new(skin: &Skin) -> Self {
        Self {
            xs: skin.brick_width,
            ys: skin.brick_height,
            xg: 120.0,
            y0: 5.0,
            yo: 30.0,
            tgo: -10.0,
            ym: skin.label_y,
            xlabel: skin.label_x,
            xmax: 1.0,
            hscale: 1.0,
            xmin_cfg: 0.0,
            xmax_cfg: 1e12,
            yh0: 0.0,
            yh1: 0.0,
            yf0: 0.0,
            yf1: 0.0,
            period: 1.0,
            phase: 0.0,
            head: None,
            foot: None,
        }
    }

    /// Point the lane at one signal's timing parameters.
    pub fn set_signal(&mut self, sig: &Signal) {
        self.period = sig.period();
        self.phase = sig.phase * 2.0 + self.xmin_cfg;
    }
}

/// Fold the document config and head/foot blocks into the lane. Malformed
/// values clamp or drop silently; identical input always produces the same
/// lane state.
pub fn parse_config(doc: &Document, lane: &mut Lane) {
    lane.hscale = 1.0;
    if let Some(hscale) = doc.config.hscale {
        let hscale = hscale.round();
        if hscale > 0.0 {
            lane.hscale = hscale.min(100.0);
        }
    }

    lane.xmin_cfg = 0.0;
    lane.xmax_cfg = 1e12;
    if let Some((lo, hi)) = doc.config.hbounds {
        let lo = lo.floor();
        let hi = hi.ceil();
        if lo < hi {
            // tick window to brick-index window
            lane.xmin_cfg = 2.0 * lo;
            lane.xmax_cfg = 2.0 * hi.floor();
        }
    }

    lane.yh0 = 0.0;
    lane.yh1 = 0.0;
    lane.head = doc.head.clone();
    if let Some(head) = lane.head.as_mut() {
        if head.has_ticks() {
            lane.yh0 = 20.0;
        }
        if let Some(tick) = head.tick.as_mut() {
            tick.shift(lane.xmin_cfg / 2.0);
        }
        if let Some(tock) = head.tock.as_mut() {
            tock.shift(lane.xmin_cfg / 2.0);
        }
        if head.text.is_some() {
            lane.yh1 = 46.0;
        }
    }

    lane.yf0 = 0.0;
    lane.yf1 = 0.0;
    lane.foot = doc.foot.clone();
    if let Some(foot) = lane.foot.as_mut() {
        if foot.has_ticks() {
            lane.yf0 = 20.0;
        }
        if let Some(tick) = foot.tick.as_mut() {
            tick.shift(lane.xmin_cfg / 2.0);
        }
        if let Some(tock) = foot.tock.as_mut() {
            tock.shift(lane.xmin_cfg / 2.0);
        }
        if foot.text.is_some() {
            lane.yf1 = 46.0;
        }
    }
}

/// Bracket bounds for one drawn group.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupRecord {
    pub x: f64,
    pub y: f64,
    pub height: f64,
    pub name: Option<String>,
}

/// The signal tree flattened into drawing order.
#[derive(Debug, Default)]
pub struct Rows<'a> {
    pub lanes: Vec<&'a Signal>,
    /// Per-row left indent from group nesting.
    pub widths: Vec<f64>,
    pub groups: Vec<GroupRecord>,
}

struct WalkState {
    x: f64,
    y: f64,
    xx: f64,
}

/// Recursive tree walk: rows in document order, group records bottom-up with
/// their row span and nesting indent.
pub fn flatten_tree(items: &[SignalItem]) -> Rows<'_> {
    let mut rows = Rows::default();
    let mut state = WalkState {
        x: 0.0,
        y: 0.0,
        xx: 0.0,
    };
    walk(items, None, &mut state, &mut rows);
    rows
}

fn walk<'a>(
    items: &'a [SignalItem],
    name: Option<&'a str>,
    state: &mut WalkState,
    rows: &mut Rows<'a>,
) {
    let delta = if name.is_some() { 25.0 } else { 10.0 };
    state.x += delta;
    for item in items {
        match item {
            SignalItem::Group(group) => {
                let top = state.y;
                walk(&group.items, group.name.as_deref(), state, rows);
                rows.groups.push(GroupRecord {
                    x: state.xx,
                    y: top,
                    height: state.y - top,
                    name: group.name.clone(),
                });
            }
            SignalItem::Signal(sig) => {
                rows.lanes.push(sig);
                rows.widths.push(state.x);
                state.y += 1.0;
            }
        }
    }
    state.xx = state.x;
    state.x -= delta;
}

/// One parsed row ready to draw.
#[derive(Debug, Clone)]
pub struct LaneContent {
    pub name: String,
    /// Phase remainder in cells, applied as a sub-cell translate.
    pub xoffset: f64,
    pub bricks: Option<Vec<String>>,
    pub data: Option<Vec<String>>,
}

/// Run the wave parser over every row.
pub fn parse_wave_lanes(lanes: &[&Signal], lane: &mut Lane) -> Vec<LaneContent> {
    let mut content = Vec::with_capacity(lanes.len());
    for sig in lanes {
        lane.set_signal(sig);
        let name = sig.name.clone().unwrap_or_else(|| " ".to_string());
        let xoffset = sig.phase + lane.xmin_cfg / 2.0;
        let (bricks, data) = match &sig.wave {
            Some(wave) => {
                let extra = lane.period * lane.hscale - 1.0;
                let (bricks, unseen_markers) =
                    wave::parse_wave_lane(wave, extra, lane.period, lane.phase);
                let data = if sig.data.is_empty() {
                    None
                } else {
                    Some(sig.data.iter().skip(unseen_markers).cloned().collect())
                };
                (Some(bricks), data)
            }
            None => (None, None),
        };
        content.push(LaneContent {
            name,
            xoffset,
            bricks,
            data,
        });
    }
    content
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{Body, DiagramConfig, Group, TickSpec};
    use crate::skin::DEFAULT;

    fn doc_with_config(config: DiagramConfig) -> Document {
        Document {
            body: Body::Signals(Vec::new()),
            config,
            head: None,
            foot: None,
            edges: Vec::new(),
        }
    }

    fn sig(name: &str, wave: &str) -> SignalItem {
        SignalItem::Signal(Signal {
            name: Some(name.to_string()),
            wave: Some(wave.to_string()),
            ..Signal::default()
        })
    }

    #[test]
    fn hscale_is_clamped_silently() {
        let mut lane = Lane::new(&DEFAULT);
        parse_config(
            &doc_with_config(DiagramConfig {
                hscale: Some(250.0),
                ..DiagramConfig::default()
            }),
            &mut lane,
        );
        assert_eq!(lane.hscale, 100.0);

        parse_config(
            &doc_with_config(DiagramConfig {
                hscale: Some(-3.0),
                ..DiagramConfig::default()
            }),
            &mut lane,
        );
        assert_eq!(lane.hscale, 1.0);
    }

    #[test]
    fn inverted_hbounds_are_ignored() {
        let mut lane = Lane::new(&DEFAULT);
        parse_config(
            &doc_with_config(DiagramConfig {
                hbounds: Some((7.0, 3.0)),
                ..DiagramConfig::default()
            }),
            &mut lane,
        );
        assert_eq!(lane.xmin_cfg, 0.0);
        assert_eq!(lane.xmax_cfg, 1e12);
    }

    #[test]
    fn hbounds_convert_ticks_to_bricks() {
        let mut lane = Lane::new(&DEFAULT);
        parse_config(
            &doc_with_config(DiagramConfig {
                hbounds: Some((1.2, 3.7)),
                ..DiagramConfig::default()
            }),
            &mut lane,
        );
        assert_eq!(lane.xmin_cfg, 2.0);
        assert_eq!(lane.xmax_cfg, 8.0);
    }

    #[test]
    fn head_ticks_open_a_gap_and_shift_with_the_window() {
        let mut doc = doc_with_config(DiagramConfig {
            hbounds: Some((2.0, 6.0)),
            ..DiagramConfig::default()
        });
        doc.head = Some(Caption {
            tick: Some(TickSpec::Offset(0.0)),
            ..Caption::default()
        });
        let mut lane = Lane::new(&DEFAULT);
        parse_config(&doc, &mut lane);
        assert_eq!(lane.yh0, 20.0);
        assert_eq!(lane.yh1, 0.0);
        assert_eq!(
            lane.head.as_ref().unwrap().tick,
            Some(TickSpec::Offset(2.0))
        );
    }

    #[test]
    fn parse_config_is_idempotent() {
        let mut doc = doc_with_config(DiagramConfig {
            hscale: Some(2.0),
            hbounds: Some((0.0, 4.0)),
            ..DiagramConfig::default()
        });
        doc.foot = Some(Caption {
            text: Some("t".into()),
            tock: Some(TickSpec::Offset(1.0)),
            ..Caption::default()
        });
        let mut first = Lane::new(&DEFAULT);
        parse_config(&doc, &mut first);
        let mut second = first.clone();
        parse_config(&doc, &mut second);
        assert_eq!(format!("{first:?}"), format!("{second:?}"));
    }

    #[test]
    fn nested_groups_record_span_and_indent() {
        let items = vec![
            sig("clk", "p..."),
            SignalItem::Group(Group {
                name: Some("bus".to_string()),
                items: vec![sig("addr", "=.=."), sig("wdata", "=.=.")],
            }),
        ];
        let rows = flatten_tree(&items);
        assert_eq!(rows.lanes.len(), 3);
        assert_eq!(rows.widths, vec![10.0, 35.0, 35.0]);
        assert_eq!(rows.groups.len(), 1);
        let group = &rows.groups[0];
        assert_eq!(group.y, 1.0);
        assert_eq!(group.height, 2.0);
        assert_eq!(group.name.as_deref(), Some("bus"));
        assert_eq!(group.x, 35.0);
    }

    #[test]
    fn waveless_signal_keeps_its_name_only() {
        let mut lane = Lane::new(&DEFAULT);
        let sig = Signal {
            name: Some("spacer".to_string()),
            ..Signal::default()
        };
        let content = parse_wave_lanes(&[&sig], &mut lane);
        assert_eq!(content[0].name, "spacer");
        assert!(content[0].bricks.is_none());
        assert!(content[0].data.is_none());
    }

    #[test]
    fn data_labels_skip_markers_hidden_by_phase() {
        let mut lane = Lane::new(&DEFAULT);
        let sig = Signal {
            name: Some("bus".to_string()),
            wave: Some("=0".to_string()),
            data: vec!["a".to_string(), "b".to_string()],
            phase: 1.0,
            ..Signal::default()
        };
        let content = parse_wave_lanes(&[&sig], &mut lane);
        assert_eq!(content[0].data.as_deref(), Some(&["b".to_string()][..]));
    }
}
