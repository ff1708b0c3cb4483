//! Headless mode: the same search the visualizer animates, as text lines.

use beamroute_search::{BeamConfig, BeamSearch, Error, Graph, Outcome, SearchEvent};

/// Run a search between two labelled nodes and describe each round, the
/// result, and the nodes the search expanded.
///
/// ```text
/// Round 1: [me]=10
/// Round 2: [me → B]=8 [me → C]=9
/// ...
/// Route Found: me → B → E → you
/// Explored in 4 rounds: me, B, C, E, D, you
/// ```
pub fn trace(graph: &Graph, start: &str, goal: &str, config: BeamConfig) -> Result<Vec<String>, Error> {
    let start = graph.node(start)?;
    let goal = graph.node(goal)?;
    let mut search = BeamSearch::new(graph, start, goal, config)?;

    let mut lines = Vec::new();
    for event in search.by_ref() {
        match event {
            SearchEvent::Round(snap) => {
                let frontier: Vec<String> = snap
                    .frontier
                    .iter()
                    .map(|c| format!("[{}]={}", graph.format_path(&c.path), c.score))
                    .collect();
                lines.push(format!("Round {}: {}", snap.round, frontier.join(" ")));
            }
            SearchEvent::Finished(Outcome::Found(path)) => {
                lines.push(format!("Route Found: {}", graph.format_path(&path)));
            }
            SearchEvent::Finished(Outcome::NoRoute) => lines.push("No Route Found".to_owned()),
        }
    }

    let explored: Vec<&str> = search
        .explored()
        .iter()
        .map(|&n| graph.label(n))
        .collect::<Result<_, _>>()?;
    lines.push(format!(
        "Explored in {} rounds: {}",
        search.rounds(),
        explored.join(", ")
    ));
    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_trace() {
        let g = Graph::reference();
        let lines = trace(&g, "me", "you", BeamConfig::default()).unwrap();
        assert_eq!(
            lines,
            vec![
                "Round 1: [me]=10",
                "Round 2: [me → B]=8 [me → C]=9",
                "Round 3: [me → B → E]=3 [me → B → D]=5",
                "Round 4: [me → B → E → you]=0 [me → B → D → you]=0",
                "Route Found: me → B → E → you",
                "Explored in 4 rounds: me, B, C, E, D, you",
            ]
        );
    }

    #[test]
    fn unreachable_goal() {
        let g = Graph::reference();
        let lines = trace(&g, "C", "you", BeamConfig::default()).unwrap();
        assert_eq!(
            lines[lines.len() - 2..],
            ["No Route Found", "Explored in 2 rounds: C, F"]
        );
    }

    #[test]
    fn bad_inputs_are_errors() {
        let g = Graph::reference();
        assert_eq!(
            trace(&g, "me", "Z", BeamConfig::default()),
            Err(Error::UnknownNode("Z".into()))
        );
        assert_eq!(
            trace(&g, "me", "you", BeamConfig::with_width(0)),
            Err(Error::InvalidWidth(0))
        );
    }

    #[test]
    fn width_one_is_greedy() {
        let g = Graph::reference();
        let lines = trace(&g, "me", "you", BeamConfig::with_width(1)).unwrap();
        assert_eq!(lines[2], "Round 3: [me → B → E]=3");
        assert_eq!(lines[lines.len() - 2], "Route Found: me → B → E → you");
    }
}
