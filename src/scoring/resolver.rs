use serde::Serialize;

use super::axes::{Axis, AxisSystem, Category, TypeCode};
use super::tally::Tally;

/// How one axis was decided.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AxisOutcome {
    pub axis: String,
    pub counts: Vec<(Category, u32)>,
    pub winner: Category,
    /// True when the winner came from the axis tie default
    pub tie_broken: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub code: TypeCode,
    pub breakdown: Vec<AxisOutcome>,
}

/// Pick one category per axis, in canonical axis order.
pub fn resolve(tally: &Tally, system: &AxisSystem) -> Resolution {
    let breakdown: Vec<AxisOutcome> = system
        .axes()
        .iter()
        .map(|axis| resolve_axis(axis, tally))
        .collect();

    let code = TypeCode::new(breakdown.iter().map(|o| o.winner.clone()).collect());

    Resolution { code, breakdown }
}

fn resolve_axis(axis: &Axis, tally: &Tally) -> AxisOutcome {
    let counts: Vec<(Category, u32)> = axis
        .categories
        .iter()
        .map(|c| (c.clone(), tally.get(c)))
        .collect();

    let top = counts.iter().map(|(_, n)| *n).max().unwrap_or(0);
    let leaders: Vec<&Category> = counts
        .iter()
        .filter(|(_, n)| *n == top)
        .map(|(c, _)| c)
        .collect();

    // Several categories share the top count: tie default if it is one of
    // them, otherwise the first in declared order.
    let (winner, tie_broken) = if leaders.len() == 1 {
        (leaders[0].clone(), false)
    } else if leaders.contains(&&axis.tie_default) {
        (axis.tie_default.clone(), true)
    } else {
        (leaders[0].clone(), true)
    };

    AxisOutcome {
        axis: axis.name.clone(),
        counts,
        winner,
        tie_broken,
    }
}
