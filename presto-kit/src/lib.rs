//! Puzzle-file conveniences on top of the core solver: textual machine
//! parsing, file loading, and batch solving with summed press counts.

use std::path::Path;

use anyhow::{Context, anyhow, ensure};
use presto::machine::{CountingMachine, Machine, ParityMachine};
use presto::search::SolveOptions;
use tracing::debug;

/// One parsed puzzle line. Indicator targets, button incidence lists, and
/// counter targets all describe the same machine; the two solve variants
/// pick the target they need.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PuzzleMachine {
    pub indicators: Vec<bool>,
    pub buttons: Vec<Vec<usize>>,
    pub counters: Vec<u64>,
}

impl PuzzleMachine {
    pub fn indicator_machine(&self) -> anyhow::Result<ParityMachine> {
        Machine::new(self.buttons.clone(), self.indicators.clone())
            .map_err(|err| anyhow!("indicator machine rejected: {err}"))
    }

    pub fn counter_machine(&self) -> anyhow::Result<CountingMachine> {
        Machine::new(self.buttons.clone(), self.counters.clone())
            .map_err(|err| anyhow!("counter machine rejected: {err}"))
    }
}

fn delimited<'a>(line: &'a str, open: char, close: char) -> anyhow::Result<&'a str> {
    let start = line
        .find(open)
        .ok_or_else(|| anyhow!("missing `{open}` in machine line"))?;
    let rest = &line[start + open.len_utf8()..];
    let len = rest
        .find(close)
        .ok_or_else(|| anyhow!("missing `{close}` in machine line"))?;
    Ok(&rest[..len])
}

fn parse_indices(group: &str) -> anyhow::Result<Vec<usize>> {
    group
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<usize>()
                .with_context(|| format!("bad variable index `{part}`"))
        })
        .collect()
}

fn parse_counts(group: &str) -> anyhow::Result<Vec<u64>> {
    group
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<u64>()
                .with_context(|| format!("bad counter target `{part}`"))
        })
        .collect()
}

/// Parses one machine line of the form
/// `[.##.] (3) (1,3) (2) (2,3) (0,2) (0,1) {3,5,4,7}`:
/// `[…]` holds the indicator targets (`#` = on), each `(…)` lists one
/// button's affected variables, and `{…}` holds the counter targets.
pub fn parse_machine(line: &str) -> anyhow::Result<PuzzleMachine> {
    let indicators: Vec<bool> = delimited(line, '[', ']')?
        .chars()
        .map(|c| c == '#')
        .collect();

    let mut buttons = Vec::new();
    let mut rest = line;
    while let Some(start) = rest.find('(') {
        let tail = &rest[start + 1..];
        let len = tail
            .find(')')
            .ok_or_else(|| anyhow!("unterminated button group"))?;
        buttons.push(parse_indices(&tail[..len])?);
        rest = &tail[len + 1..];
    }

    let counters = parse_counts(delimited(line, '{', '}')?)?;
    ensure!(
        counters.len() == indicators.len(),
        "indicator and counter targets disagree on the variable count ({} vs {})",
        indicators.len(),
        counters.len()
    );

    Ok(PuzzleMachine {
        indicators,
        buttons,
        counters,
    })
}

/// Loads one machine per non-empty line.
pub fn load_machines(path: impl AsRef<Path>) -> anyhow::Result<Vec<PuzzleMachine>> {
    let path = path.as_ref();
    let text =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let mut machines = Vec::new();
    for (number, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        machines.push(
            parse_machine(line).with_context(|| format!("{}:{}", path.display(), number + 1))?,
        );
    }
    debug!(count = machines.len(), "loaded machines");
    Ok(machines)
}

/// Solves every machine's indicator (parity) variant and sums the minimal
/// press counts.
pub fn sum_indicator_presses(
    machines: &[PuzzleMachine],
    options: &SolveOptions,
) -> anyhow::Result<u64> {
    let mut total = 0u64;
    for (number, puzzle) in machines.iter().enumerate() {
        let presses = puzzle
            .indicator_machine()?
            .minimum_presses(options)
            .with_context(|| format!("machine {number}"))?;
        debug!(machine = number, presses, "indicator variant solved");
        total += presses;
    }
    Ok(total)
}

/// Solves every machine's counter variant and sums the minimal press
/// counts.
pub fn sum_counter_presses(
    machines: &[PuzzleMachine],
    options: &SolveOptions,
) -> anyhow::Result<u64> {
    let mut total = 0u64;
    for (number, puzzle) in machines.iter().enumerate() {
        let presses = puzzle
            .counter_machine()?
            .minimum_presses(options)
            .with_context(|| format!("machine {number}"))?;
        debug!(machine = number, presses, "counter variant solved");
        total += presses;
    }
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::{parse_machine, sum_counter_presses, sum_indicator_presses};
    use presto::search::SolveOptions;

    const SAMPLE: &str = "[.##.] (3) (1,3) (2) (2,3) (0,2) (0,1) {3,5,4,7}";

    #[test]
    fn parses_the_sample_line() {
        let machine = parse_machine(SAMPLE).unwrap();
        assert_eq!(machine.indicators, vec![false, true, true, false]);
        assert_eq!(
            machine.buttons,
            vec![
                vec![3],
                vec![1, 3],
                vec![2],
                vec![2, 3],
                vec![0, 2],
                vec![0, 1],
            ]
        );
        assert_eq!(machine.counters, vec![3, 5, 4, 7]);
    }

    #[test]
    fn rejects_malformed_lines() {
        assert!(parse_machine("(0,1) {2}").is_err());
        assert!(parse_machine("[.#] (0,1 {2,2}").is_err());
        assert!(parse_machine("[.#] (0,x) {2,2}").is_err());
        assert!(parse_machine("[.#] (0) {2}").is_err());
    }

    #[test]
    fn solves_both_variants_of_the_sample() {
        let machine = parse_machine(SAMPLE).unwrap();
        let options = SolveOptions::default();
        let indicator = sum_indicator_presses(std::slice::from_ref(&machine), &options).unwrap();
        let counter = sum_counter_presses(std::slice::from_ref(&machine), &options).unwrap();

        // Cross-check both answers against plain exhaustive references.
        assert_eq!(indicator, exhaustive_indicator_minimum(&machine));
        assert_eq!(counter, exhaustive_counter_minimum(&machine, 8));
    }

    fn exhaustive_indicator_minimum(machine: &super::PuzzleMachine) -> u64 {
        let n = machine.buttons.len();
        let mut best = u64::MAX;
        for mask in 0u32..(1u32 << n) {
            let mut state = vec![false; machine.indicators.len()];
            for (button, affected) in machine.buttons.iter().enumerate() {
                if mask & (1 << button) != 0 {
                    for &variable in affected {
                        state[variable] = !state[variable];
                    }
                }
            }
            if state == machine.indicators {
                best = best.min(u64::from(mask.count_ones()));
            }
        }
        best
    }

    fn exhaustive_counter_minimum(machine: &super::PuzzleMachine, cap: u64) -> u64 {
        let n = machine.buttons.len();
        let mut presses = vec![0u64; n];
        let mut best = u64::MAX;
        loop {
            let mut state = vec![0u64; machine.counters.len()];
            for (button, affected) in machine.buttons.iter().enumerate() {
                for &variable in affected {
                    state[variable] += presses[button];
                }
            }
            if state == machine.counters {
                best = best.min(presses.iter().sum());
            }
            let mut digit = 0;
            loop {
                if digit == n {
                    return best;
                }
                if presses[digit] == cap {
                    presses[digit] = 0;
                    digit += 1;
                } else {
                    presses[digit] += 1;
                    break;
                }
            }
        }
    }
}
