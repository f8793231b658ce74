use presto::machine::{CountingMachine, ParityMachine};

/// Six-button fixture used across the suite:
///   v0 <- b4, b5    v1 <- b1, b5    v2 <- b2, b4    v3 <- b0, b1, b3
pub fn sample_buttons() -> Vec<Vec<usize>> {
    vec![
        vec![3],
        vec![1, 3],
        vec![2],
        vec![3],
        vec![0, 2],
        vec![0, 1],
    ]
}

/// Exhaustive minimum press count over all `2^n` button subsets, or `None`
/// when no subset toggles the indicators to their targets.
pub fn exhaustive_parity_minimum(machine: &ParityMachine) -> Option<u64> {
    let buttons = machine.buttons();
    let target = machine.target();
    let n = buttons.len();
    assert!(n <= 16, "reference enumeration only handles small machines");

    let mut best: Option<u64> = None;
    for mask in 0u32..(1u32 << n) {
        let mut state = vec![false; target.len()];
        for (button, affected) in buttons.iter().enumerate() {
            if mask & (1 << button) != 0 {
                for &variable in affected {
                    state[variable] = !state[variable];
                }
            }
        }
        if state == target {
            let weight = u64::from(mask.count_ones());
            best = Some(best.map_or(weight, |current| current.min(weight)));
        }
    }
    best
}

/// Exhaustive minimum total presses over the box `[0, cap]^n`, or `None`
/// when no press vector in the box reaches the counters exactly.
pub fn exhaustive_counting_minimum(machine: &CountingMachine, cap: u64) -> Option<u64> {
    let buttons = machine.buttons();
    let target = machine.target();
    let n = buttons.len();

    let mut presses = vec![0u64; n];
    let mut best: Option<u64> = None;
    loop {
        let mut state = vec![0u64; target.len()];
        for (button, affected) in buttons.iter().enumerate() {
            for &variable in affected {
                state[variable] += presses[button];
            }
        }
        if state == target {
            let total: u64 = presses.iter().sum();
            best = Some(best.map_or(total, |current| current.min(total)));
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
