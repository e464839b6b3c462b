//! Wave-string expansion: a compact per-signal pattern becomes an ordered
//! sequence of brick ids, two half-cells per bit-cell. Transitions are a
//! data-driven state machine over immutable lookup tables; anything the
//! tables do not know degrades to the hatched `xxx` brick.

use once_cell::sync::Lazy;
use std::collections::{HashMap, VecDeque};

/// Fallback brick for unrecognized characters and transitions.
pub const UNKNOWN_BRICK: &str = "xxx";

// Leading edge brick when the new character is a clock or strong level.
static CLOCK_EDGE: Lazy<HashMap<char, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ('p', "pclk"),
        ('n', "nclk"),
        ('P', "Pclk"),
        ('N', "Nclk"),
        ('h', "pclk"),
        ('l', "nclk"),
        ('H', "Pclk"),
        ('L', "Nclk"),
    ])
});

// Second half-period edge, clocks only.
static CLOCK_SECOND_EDGE: Lazy<HashMap<char, &'static str>> = Lazy::new(|| {
    HashMap::from([('p', "nclk"), ('n', "pclk"), ('P', "nclk"), ('N', "pclk")])
});

static CLOCK_SECOND_LEVEL: Lazy<HashMap<char, &'static str>> = Lazy::new(|| {
    HashMap::from([('p', "000"), ('n', "111"), ('P', "000"), ('N', "111")])
});

// A level directly continued by the matching clock half keeps the level
// instead of drawing a redundant edge.
static CLOCK_LEVEL_ALIAS: Lazy<HashMap<(char, char), &'static str>> = Lazy::new(|| {
    HashMap::from([
        (('h', 'p'), "111"),
        (('H', 'p'), "111"),
        (('l', 'n'), "000"),
        (('L', 'n'), "000"),
        (('n', 'h'), "111"),
        (('N', 'h'), "111"),
        (('p', 'l'), "000"),
        (('P', 'l'), "000"),
    ])
});

// Soft-curve target fragment for the new character.
static SOFT_TO: Lazy<HashMap<char, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ('0', "0"),
        ('1', "1"),
        ('x', "x"),
        ('d', "d"),
        ('u', "u"),
        ('z', "z"),
        ('=', "v"),
        ('2', "v"),
        ('3', "v"),
        ('4', "v"),
        ('5', "v"),
    ])
});

static SOFT_TO_SUFFIX: Lazy<HashMap<char, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ('0', ""),
        ('1', ""),
        ('x', ""),
        ('d', ""),
        ('u', ""),
        ('z', ""),
        ('=', "-2"),
        ('2', "-2"),
        ('3', "-3"),
        ('4', "-4"),
        ('5', "-5"),
    ])
});

// Soft-curve source fragment for the previous character.
static SOFT_FROM: Lazy<HashMap<char, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ('p', "0"),
        ('n', "1"),
        ('P', "0"),
        ('N', "1"),
        ('h', "1"),
        ('l', "0"),
        ('H', "1"),
        ('L', "0"),
        ('0', "0"),
        ('1', "1"),
        ('x', "x"),
        ('d', "d"),
        ('u', "u"),
        ('z', "z"),
        ('=', "v"),
        ('2', "v"),
        ('3', "v"),
        ('4', "v"),
        ('5', "v"),
    ])
});

static SOFT_FROM_SUFFIX: Lazy<HashMap<char, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ('p', ""),
        ('n', ""),
        ('P', ""),
        ('N', ""),
        ('h', ""),
        ('l', ""),
        ('H', ""),
        ('L', ""),
        ('0', ""),
        ('1', ""),
        ('x', ""),
        ('d', ""),
        ('u', ""),
        ('z', ""),
        ('=', "-2"),
        ('2', "-2"),
        ('3', "-3"),
        ('4', "-4"),
        ('5', "-5"),
    ])
});

// Steady continuation brick for the new character.
static STEADY: Lazy<HashMap<char, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ('p', "111"),
        ('n', "000"),
        ('P', "111"),
        ('N', "000"),
        ('h', "111"),
        ('l', "000"),
        ('H', "111"),
        ('L', "000"),
        ('0', "000"),
        ('1', "111"),
        ('x', "xxx"),
        ('d', "ddd"),
        ('u', "uuu"),
        ('z', "zzz"),
        ('=', "vvv-2"),
        ('2', "vvv-2"),
        ('3', "vvv-3"),
        ('4', "vvv-4"),
        ('5', "vvv-5"),
    ])
});

/// Counterpart of a loose counting loop: fractional bounds run the partial
/// iteration, non-positive bounds run none.
fn loop_count(bound: f64) -> usize {
    if bound <= 0.0 { 0 } else { bound.ceil() as usize }
}

/// Repetition kernel. A 4-entry text set is a full clock period
/// (edge, fill, edge, fill) repeated `times`; a 1/2-entry set is a leading
/// brick followed by its continuation filling the rest of the run.
pub fn gen_brick(texts: &[&str], extra: f64, times: f64) -> Vec<String> {
    let mut out = Vec::new();
    if texts.len() == 4 {
        for _ in 0..loop_count(times) {
            out.push(texts[0].to_string());
            for _ in 0..loop_count(extra) {
                out.push(texts[1].to_string());
            }
            out.push(texts[2].to_string());
            for _ in 0..loop_count(extra) {
                out.push(texts[3].to_string());
            }
        }
        return out;
    }
    let lead = texts[0];
    let fill = if texts.len() > 1 { texts[1] } else { texts[0] };
    out.push(lead.to_string());
    for _ in 0..loop_count(times * (2.0 * (extra + 1.0)) - 1.0) {
        out.push(fill.to_string());
    }
    out
}

/// Expansion of the first character of a wave string.
pub fn first_brick_pair(ch: char, extra: f64, times: f64) -> Vec<String> {
    match ch {
        'p' => gen_brick(&["pclk", "111", "nclk", "000"], extra, times),
        'n' => gen_brick(&["nclk", "000", "pclk", "111"], extra, times),
        'P' => gen_brick(&["Pclk", "111", "nclk", "000"], extra, times),
        'N' => gen_brick(&["Nclk", "000", "pclk", "111"], extra, times),
        'l' | 'L' | '0' => gen_brick(&["000"], extra, times),
        'h' | 'H' | '1' => gen_brick(&["111"], extra, times),
        '=' | '2' => gen_brick(&["vvv-2"], extra, times),
        '3' => gen_brick(&["vvv-3"], extra, times),
        '4' => gen_brick(&["vvv-4"], extra, times),
        '5' => gen_brick(&["vvv-5"], extra, times),
        'd' => gen_brick(&["ddd"], extra, times),
        'u' => gen_brick(&["uuu"], extra, times),
        'z' => gen_brick(&["zzz"], extra, times),
        _ => gen_brick(&[UNKNOWN_BRICK], extra, times),
    }
}

/// Expansion of a (previous, current) character transition.
pub fn next_brick_pair(prev: char, cur: char, extra: f64, times: f64) -> Vec<String> {
    let Some(&steady) = STEADY.get(&cur) else {
        return gen_brick(&[UNKNOWN_BRICK], extra, times);
    };
    if let Some(&edge) = CLOCK_EDGE.get(&cur) {
        // sharp edges
        let edge = CLOCK_LEVEL_ALIAS
            .get(&(prev, cur))
            .copied()
            .unwrap_or(edge);
        return match CLOCK_SECOND_EDGE.get(&cur) {
            None => gen_brick(&[edge, steady], extra, times),
            Some(&second) => gen_brick(
                &[edge, steady, second, CLOCK_SECOND_LEVEL[&cur]],
                extra,
                times,
            ),
        };
    }
    // soft curves
    let to = SOFT_TO[&cur];
    let Some(&from) = SOFT_FROM.get(&prev) else {
        return gen_brick(&[UNKNOWN_BRICK], extra, times);
    };
    let joint = format!(
        "{from}m{to}{}{}",
        SOFT_FROM_SUFFIX.get(&prev).copied().unwrap_or(""),
        SOFT_TO_SUFFIX[&cur]
    );
    gen_brick(&[&joint, steady], extra, times)
}

/// Bus-value bricks carry data labels.
pub fn is_value_brick(id: &str) -> bool {
    matches!(id, "vvv-2" | "vvv-3" | "vvv-4" | "vvv-5")
}

/// Center position of every run of value bricks: where a data label sits.
pub fn find_lane_markers(bricks: &[String]) -> Vec<f64> {
    let mut positions = Vec::new();
    let mut run = 0usize;
    let mut count = 0usize;
    for brick in bricks {
        if is_value_brick(brick) {
            run += 1;
        } else if run != 0 {
            positions.push(count as f64 - (run as f64 + 1.0) / 2.0);
            run = 0;
        }
        count += 1;
    }
    if run != 0 {
        positions.push(count as f64 - (run as f64 + 1.0) / 2.0);
    }
    positions
}

/// Expand a wave string into bricks, then drop the prefix hidden by the
/// phase offset. Returns the visible bricks and how many data-label markers
/// the dropped prefix consumed; a marker run straddling the cut seam counts
/// once, not twice.
pub fn parse_wave_lane(text: &str, extra: f64, period: f64, phase: f64) -> (Vec<String>, usize) {
    let mut stack: VecDeque<char> = text.chars().collect();
    let mut bricks: Vec<String> = Vec::new();
    let mut sub_cycle = false;

    let Some(first) = stack.pop_front() else {
        return (bricks, 0);
    };
    let mut repeats = 1.0;
    while matches!(stack.front(), Some('.') | Some('|')) {
        stack.pop_front();
        repeats += 1.0;
    }
    bricks.extend(first_brick_pair(first, extra, repeats));

    let mut prev = first;
    while !stack.is_empty() {
        let top = prev;
        let Some(mut cur) = stack.pop_front() else {
            break;
        };
        if cur == '<' {
            sub_cycle = true;
            match stack.pop_front() {
                Some(ch) => cur = ch,
                None => break,
            }
        }
        if cur == '>' {
            sub_cycle = false;
            match stack.pop_front() {
                Some(ch) => cur = ch,
                None => break,
            }
        }
        prev = cur;
        let mut repeats = 1.0;
        while matches!(stack.front(), Some('.') | Some('|')) {
            stack.pop_front();
            repeats += 1.0;
        }
        if sub_cycle {
            bricks.extend(next_brick_pair(top, cur, 0.0, repeats - period));
        } else {
            bricks.extend(next_brick_pair(top, cur, extra, repeats));
        }
    }

    let shift = loop_count(phase).min(bricks.len());
    let unseen: Vec<String> = bricks.drain(..shift).collect();
    let mut unseen_markers = 0;
    if !unseen.is_empty() {
        unseen_markers = find_lane_markers(&unseen).len();
        let seam_left = unseen.last().is_some_and(|b| is_value_brick(b));
        let seam_right = bricks.first().is_some_and(|b| is_value_brick(b));
        if seam_left && seam_right && unseen_markers > 0 {
            unseen_markers -= 1;
        }
    }
    (bricks, unseen_markers)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bricks(text: &str) -> Vec<String> {
        parse_wave_lane(text, 0.0, 1.0, 0.0).0
    }

    #[test]
    fn alternating_levels_use_sharp_transitions() {
        assert_eq!(
            bricks("0101"),
            vec!["000", "000", "0m1", "111", "1m0", "000", "0m1", "111"]
        );
    }

    #[test]
    fn recognized_waves_expand_to_two_bricks_per_cell() {
        for text in ["01xz", "=234", "pnPN", "hlHL", "dudu"] {
            let out = bricks(text);
            assert_eq!(out.len(), 2 * text.len(), "wave {text}");
            if !text.contains('x') {
                assert!(out.iter().all(|b| b != UNKNOWN_BRICK), "wave {text}");
            }
        }
    }

    #[test]
    fn repeated_clock_spans_six_cells() {
        let out = bricks("p.....");
        assert_eq!(out.len(), 12);
        for (idx, brick) in out.iter().enumerate() {
            let expected = if idx % 2 == 0 { "pclk" } else { "nclk" };
            assert_eq!(brick, expected, "brick {idx}");
        }
    }

    #[test]
    fn hscale_padding_fills_clock_halves() {
        let out = first_brick_pair('p', 1.0, 2.0);
        assert_eq!(
            out,
            vec!["pclk", "111", "nclk", "000", "pclk", "111", "nclk", "000"]
        );
    }

    #[test]
    fn repeat_markers_extend_the_previous_run() {
        assert_eq!(bricks("0..."), vec!["000"; 8]);
        // `|` repeats like `.`; the gap glyph is drawn elsewhere.
        assert_eq!(bricks("0|.."), vec!["000"; 8]);
    }

    #[test]
    fn unknown_characters_degrade_to_hatched_bricks() {
        let out = bricks("0q1");
        assert_eq!(
            out,
            vec!["000", "000", "xxx", "xxx", "xxx", "xxx"]
        );
    }

    #[test]
    fn clock_level_alias_keeps_the_level_flat() {
        // a high level into a posedge clock renders as held-high, not an edge
        let out = bricks("hp");
        assert_eq!(out[2], "111");
        // while a low level into a posedge clock shows the rising edge
        let out = bricks("lp");
        assert_eq!(out[2], "pclk");
    }

    #[test]
    fn bus_to_bus_uses_soft_curves() {
        let out = bricks("=3");
        assert_eq!(out, vec!["vvv-2", "vvv-2", "vmv-2-3", "vvv-3"]);
    }

    #[test]
    fn phase_shift_drops_leading_bricks() {
        let (out, markers) = parse_wave_lane("0101", 0.0, 1.0, 2.0);
        assert_eq!(out, vec!["0m1", "111", "1m0", "000", "0m1", "111"]);
        assert_eq!(markers, 0);
    }

    #[test]
    fn phase_shift_counts_markers_once_at_an_exact_seam() {
        // "=.=" expands to [vvv-2 x4, vmv-2-2, vvv-2]; cutting after two
        // bricks splits the first value run across the seam.
        let (out, markers) = parse_wave_lane("=.=", 0.0, 1.0, 2.0);
        assert_eq!(out.len(), 4);
        assert_eq!(markers, 0);
    }

    #[test]
    fn phase_shift_counts_fully_hidden_markers() {
        let (out, markers) = parse_wave_lane("=0", 0.0, 1.0, 2.0);
        assert_eq!(out, vec!["vm0-2", "000"]);
        assert_eq!(markers, 1);
    }

    #[test]
    fn sub_cycle_suspends_extra_padding() {
        let out = parse_wave_lane("0<11>0", 1.0, 1.0, 0.0).0;
        assert_eq!(
            out,
            vec![
                "000", "000", "000", "000", // full cell at hscale 2
                "0m1", "1m1", // two sub-cycle half cells
                "1m0", "000", "000", "000" // back to full cells
            ]
        );
    }

    #[test]
    fn markers_sit_at_value_run_centers() {
        let seq: Vec<String> = ["000", "vvv-2", "vvv-2", "000", "vvv-3", "000"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(find_lane_markers(&seq), vec![1.5, 4.0]);
    }
}
