//! Time management: UCI clock parameters to a wall-clock budget.

use std::time::Duration;

use redfin_core::Color;

/// Budget used when `go` arrives with no time information at all.
const DEFAULT_BUDGET: Duration = Duration::from_millis(1000);

/// Convert `go` clock arguments into a thinking budget.
///
/// An explicit `movetime` is used as-is. Otherwise the side to move's
/// clock gives `think = min(time/40 + inc, time/2 - 1)` and the budget
/// is 80% of that, leaving headroom to finish the iteration in flight.
/// With no clock at all the engine thinks for one second.
pub fn think_budget(
    movetime: Option<Duration>,
    wtime: Option<Duration>,
    btime: Option<Duration>,
    winc: Option<Duration>,
    binc: Option<Duration>,
    side: Color,
) -> Duration {
    if let Some(movetime) = movetime {
        return movetime;
    }

    let (remaining, increment) = match side {
        Color::White => (wtime, winc),
        Color::Black => (btime, binc),
    };

    let Some(remaining) = remaining else {
        return DEFAULT_BUDGET;
    };

    let time = remaining.as_millis() as i64;
    let inc = increment.unwrap_or(Duration::ZERO).as_millis() as i64;
    let think = (time / 40 + inc).min(time / 2 - 1).max(0);
    Duration::from_millis((think * 8 / 10) as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn movetime_is_used_directly() {
        let budget = think_budget(
            Some(Duration::from_millis(750)),
            Some(Duration::from_secs(60)),
            None,
            None,
            None,
            Color::White,
        );
        assert_eq!(budget, Duration::from_millis(750));
    }

    #[test]
    fn clock_formula_for_white() {
        // 60s remaining, 1s increment: think = min(1500 + 1000, 29999),
        // budget = 0.8 * 2500 = 2000ms.
        let budget = think_budget(
            None,
            Some(Duration::from_secs(60)),
            Some(Duration::from_secs(5)),
            Some(Duration::from_secs(1)),
            None,
            Color::White,
        );
        assert_eq!(budget, Duration::from_millis(2000));
    }

    #[test]
    fn black_uses_its_own_clock() {
        let budget = think_budget(
            None,
            Some(Duration::from_secs(600)),
            Some(Duration::from_secs(40)),
            None,
            None,
            Color::Black,
        );
        // think = min(1000, 19999) = 1000, budget = 800ms.
        assert_eq!(budget, Duration::from_millis(800));
    }

    #[test]
    fn short_clock_is_capped_by_half_time() {
        let budget = think_budget(
            None,
            Some(Duration::from_millis(100)),
            None,
            Some(Duration::from_secs(10)),
            None,
            Color::White,
        );
        // think = min(2 + 10000, 49) = 49, budget = 39ms.
        assert_eq!(budget, Duration::from_millis(39));
    }

    #[test]
    fn exhausted_clock_never_goes_negative() {
        let budget = think_budget(
            None,
            Some(Duration::ZERO),
            None,
            None,
            None,
            Color::White,
        );
        assert_eq!(budget, Duration::ZERO);
    }

    #[test]
    fn bare_go_defaults_to_a_second() {
        let budget = think_budget(None, None, None, None, None, Color::White);
        assert_eq!(budget, Duration::from_millis(1000));
    }
}
