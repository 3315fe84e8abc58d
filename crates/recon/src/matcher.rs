use crate::config::MatchThresholds;
use crate::model::{BudgetEntry, MatchStatus, PairMatchOutput, Pairing, PlannedTask};
use crate::similarity::SimilarityEngine;

/// Candidates scoring at least this are written to the debug log.
const DEBUG_SCORE_FLOOR: u8 = 30;

/// Pair each planned task with its best unclaimed budget entry.
///
/// Tasks are processed in input order and a claimed entry is never offered
/// again, so earlier tasks win contested entries. Among candidates the
/// strictly highest score wins; ties go to the earlier entry.
pub fn match_tasks(
    engine: &SimilarityEngine,
    thresholds: MatchThresholds,
    tasks: &[PlannedTask],
    entries: &[BudgetEntry],
) -> PairMatchOutput {
    let mut claimed = vec![false; entries.len()];
    let mut pairs = Vec::with_capacity(tasks.len());

    for task in tasks {
        let mut best: Option<(usize, u8)> = None;

        for (ei, entry) in entries.iter().enumerate() {
            if claimed[ei] {
                continue;
            }
            let score = engine.score(&task.task, &entry.task);
            if score >= DEBUG_SCORE_FLOOR {
                log::debug!("candidate '{}' <-> '{}': {}", task.task, entry.task, score);
            }
            if best.map_or(true, |(_, s)| score > s) {
                best = Some((ei, score));
            }
        }

        match best {
            Some((ei, score)) if score >= thresholds.accept => {
                claimed[ei] = true;
                let status = if score >= thresholds.exact {
                    MatchStatus::Exact
                } else {
                    MatchStatus::Fuzzy
                };
                log::debug!("matched '{}' -> '{}' ({status}, {score})", task.task, entries[ei].task);
                pairs.push(Pairing {
                    task: task.clone(),
                    entry: Some(entries[ei].clone()),
                    entry_index: Some(ei),
                    status,
                    score,
                });
            }
            _ => {
                log::debug!("no entry for '{}'", task.task);
                pairs.push(Pairing {
                    task: task.clone(),
                    entry: None,
                    entry_index: None,
                    status: MatchStatus::Unmatched,
                    score: 0,
                });
            }
        }
    }

    let orphaned: Vec<BudgetEntry> = entries
        .iter()
        .enumerate()
        .filter(|(i, _)| !claimed[*i])
        .map(|(_, e)| e.clone())
        .collect();

    PairMatchOutput { pairs, orphaned }
}
