/// A single diagram row: a named signal with a compact wave pattern.
#[derive(Debug, Clone, Default)]
pub struct Signal {
    pub name: Option<String>,
    pub wave: Option<String>,
    pub data: Vec<String>,
    pub node: Option<String>,
    pub phase: f64,
    pub period: f64,
}

impl Signal {
    pub fn period(&self) -> f64 {
        if self.period > 0.0 { self.period } else { 1.0 }
    }
}

/// Ordered, possibly nested sequence of signals. Parsed fresh per render,
/// never mutated.
#[derive(Debug, Clone)]
pub enum SignalItem {
    Signal(Signal),
    Group(Group),
}

#[derive(Debug, Clone)]
pub struct Group {
    pub name: Option<String>,
    pub items: Vec<SignalItem>,
}

/// Logic-expression tree for `assign` documents: either a named wire or a
/// gate applied to sub-expressions.
#[derive(Debug, Clone)]
pub enum AssignExpr {
    Wire(String),
    Gate { op: String, inputs: Vec<AssignExpr> },
}

#[derive(Debug, Clone)]
pub enum Body {
    Signals(Vec<SignalItem>),
    Assigns(Vec<AssignExpr>),
}

#[derive(Debug, Clone, Default)]
pub struct DiagramConfig {
    pub hscale: Option<f64>,
    pub hbounds: Option<(f64, f64)>,
    pub skin: Option<String>,
}

/// Tick/tock label source for a head or foot row.
#[derive(Debug, Clone, PartialEq)]
pub enum TickSpec {
    /// Counting sequence starting at the offset.
    Offset(f64),
    /// Arithmetic sequence; `precision` fixes the displayed decimals.
    StartStep { start: f64, step: f64, precision: usize },
    /// Explicit labels, used verbatim.
    Labels(Vec<String>),
}

impl TickSpec {
    /// Shift the numeric start by a brick-window offset. Verbatim labels are
    /// positional and do not shift.
    pub fn shift(&mut self, delta: f64) {
        match self {
            TickSpec::Offset(offset) => *offset += delta,
            TickSpec::StartStep { start, .. } => *start += delta,
            TickSpec::Labels(_) => {}
        }
    }

    /// Generate `len` display labels.
    pub fn labels(&self, len: usize) -> Vec<String> {
        match self {
            TickSpec::Offset(offset) => (0..len).map(|i| fmt_num(i as f64 + offset)).collect(),
            TickSpec::StartStep {
                start,
                step,
                precision,
            } => (0..len)
                .map(|i| format!("{:.*}", precision, step * (i as f64 + start)))
                .collect(),
            TickSpec::Labels(labels) => labels.iter().take(len).cloned().collect(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Caption {
    pub text: Option<String>,
    pub tick: Option<TickSpec>,
    pub tock: Option<TickSpec>,
}

impl Caption {
    pub fn has_ticks(&self) -> bool {
        self.tick.is_some() || self.tock.is_some()
    }
}

/// A fully parsed WaveJSON document.
#[derive(Debug, Clone)]
pub struct Document {
    pub body: Body,
    pub config: DiagramConfig,
    pub head: Option<Caption>,
    pub foot: Option<Caption>,
    pub edges: Vec<String>,
}

/// Shortest decimal form, the way untyped numbers print.
pub fn fmt_num(value: f64) -> String {
    format!("{}", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_tick_counts_up() {
        let spec = TickSpec::Offset(0.0);
        assert_eq!(spec.labels(4), vec!["0", "1", "2", "3"]);
    }

    #[test]
    fn start_step_keeps_precision() {
        let spec = TickSpec::StartStep {
            start: 1.0,
            step: 0.5,
            precision: 1,
        };
        assert_eq!(spec.labels(3), vec!["0.5", "1.0", "1.5"]);
    }

    #[test]
    fn verbatim_labels_do_not_shift() {
        let mut spec = TickSpec::Labels(vec!["rst".into(), "run".into()]);
        spec.shift(2.0);
        assert_eq!(spec.labels(2), vec!["rst", "run"]);
    }

    #[test]
    fn zero_period_falls_back_to_one() {
        let sig = Signal::default();
        assert_eq!(sig.period(), 1.0);
    }
}
