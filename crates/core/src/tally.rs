//! Vote tally math: per-option percentages and ranks within a question.
//!
//! The database layer produces raw per-option counts; this module turns them
//! into the breakdown rows served by the reporting engine. Pure logic, so the
//! rounding and tie-break rules are testable without a database.

use serde::Serialize;

use crate::types::DbId;

/// Raw per-option vote count, one row per option of a survey.
///
/// Rows belonging to the same question must be contiguous, in the order the
/// caller wants ties broken (the reporting queries order by option id).
#[derive(Debug, Clone)]
pub struct OptionCount {
    pub question_id: DbId,
    pub question_prompt: String,
    pub option_id: DbId,
    pub option_text: String,
    pub votes: i64,
}

/// One row of a survey's vote breakdown.
#[derive(Debug, Clone, Serialize)]
pub struct OptionTally {
    pub question_id: DbId,
    pub question_prompt: String,
    pub option_id: DbId,
    pub option_text: String,
    pub votes: i64,
    /// Share of the question's total votes, rounded to two decimals.
    /// `0.00` for every option of a question with no votes.
    pub percentage: f64,
    /// 1-based position within the question, ordered by votes descending.
    /// Options tied on exact count keep their input order and each still
    /// takes the next ordinal; there is no rank collapsing.
    pub rank: u32,
}

/// Compute percentage and rank for every option, question by question.
///
/// The output preserves the question order of the input; within a question,
/// rows are emitted in rank order.
pub fn rank_tallies(counts: &[OptionCount]) -> Vec<OptionTally> {
    let mut out = Vec::with_capacity(counts.len());
    let mut start = 0;
    while start < counts.len() {
        let question_id = counts[start].question_id;
        let mut end = start + 1;
        while end < counts.len() && counts[end].question_id == question_id {
            end += 1;
        }
        rank_question(&counts[start..end], &mut out);
        start = end;
    }
    out
}

/// Rank one question's options into `out`.
fn rank_question(group: &[OptionCount], out: &mut Vec<OptionTally>) {
    let total: i64 = group.iter().map(|c| c.votes).sum();

    // Stable sort: equal counts keep their input order.
    let mut order: Vec<usize> = (0..group.len()).collect();
    order.sort_by_key(|&i| std::cmp::Reverse(group[i].votes));

    for (pos, &i) in order.iter().enumerate() {
        let count = &group[i];
        let percentage = if total == 0 {
            0.0
        } else {
            round2(count.votes as f64 * 100.0 / total as f64)
        };
        out.push(OptionTally {
            question_id: count.question_id,
            question_prompt: count.question_prompt.clone(),
            option_id: count.option_id,
            option_text: count.option_text.clone(),
            votes: count.votes,
            percentage,
            rank: pos as u32 + 1,
        });
    }
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(question_id: DbId, option_id: DbId, votes: i64) -> OptionCount {
        OptionCount {
            question_id,
            question_prompt: format!("q{question_id}"),
            option_id,
            option_text: format!("o{option_id}"),
            votes,
        }
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert!(rank_tallies(&[]).is_empty());
    }

    #[test]
    fn single_voted_option_gets_full_share() {
        let tallies = rank_tallies(&[count(1, 10, 3)]);
        assert_eq!(tallies.len(), 1);
        assert_eq!(tallies[0].percentage, 100.0);
        assert_eq!(tallies[0].rank, 1);
    }

    #[test]
    fn zero_vote_question_is_all_zeros_in_input_order() {
        let tallies = rank_tallies(&[count(1, 10, 0), count(1, 11, 0), count(1, 12, 0)]);
        assert_eq!(tallies.len(), 3);
        for (i, tally) in tallies.iter().enumerate() {
            assert_eq!(tally.percentage, 0.0);
            assert_eq!(tally.rank, i as u32 + 1);
        }
        // Stable: input order survives when everything ties.
        assert_eq!(tallies[0].option_id, 10);
        assert_eq!(tallies[2].option_id, 12);
    }

    #[test]
    fn percentages_sum_to_one_hundred() {
        let tallies = rank_tallies(&[count(1, 10, 1), count(1, 11, 1), count(1, 12, 1)]);
        let sum: f64 = tallies.iter().map(|t| t.percentage).sum();
        assert!((sum - 100.0).abs() < 0.05, "sum was {sum}");
        assert_eq!(tallies[0].percentage, 33.33);
    }

    #[test]
    fn ranks_order_by_votes_descending() {
        let tallies = rank_tallies(&[count(1, 10, 1), count(1, 11, 5), count(1, 12, 3)]);
        let ids: Vec<DbId> = tallies.iter().map(|t| t.option_id).collect();
        assert_eq!(ids, vec![11, 12, 10]);
        let ranks: Vec<u32> = tallies.iter().map(|t| t.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3]);
    }

    #[test]
    fn tied_counts_take_consecutive_ordinals_in_input_order() {
        let tallies = rank_tallies(&[count(1, 10, 2), count(1, 11, 4), count(1, 12, 2)]);
        assert_eq!(tallies[0].option_id, 11);
        // 10 and 12 tie on 2 votes; 10 came first in the input.
        assert_eq!(tallies[1].option_id, 10);
        assert_eq!(tallies[1].rank, 2);
        assert_eq!(tallies[2].option_id, 12);
        assert_eq!(tallies[2].rank, 3);
    }

    #[test]
    fn questions_are_ranked_independently() {
        let tallies = rank_tallies(&[
            count(1, 10, 1),
            count(1, 11, 9),
            count(2, 20, 4),
            count(2, 21, 0),
        ]);
        assert_eq!(tallies[0].question_id, 1);
        assert_eq!(tallies[0].option_id, 11);
        assert_eq!(tallies[0].percentage, 90.0);
        assert_eq!(tallies[2].question_id, 2);
        assert_eq!(tallies[2].option_id, 20);
        assert_eq!(tallies[2].percentage, 100.0);
        assert_eq!(tallies[2].rank, 1);
    }

    #[test]
    fn end_to_end_single_vote_shape() {
        // One question, four options, one vote on the first.
        let tallies = rank_tallies(&[
            count(1, 10, 1),
            count(1, 11, 0),
            count(1, 12, 0),
            count(1, 13, 0),
        ]);
        assert_eq!(tallies[0].option_id, 10);
        assert_eq!(tallies[0].percentage, 100.0);
        assert_eq!(tallies[0].rank, 1);
        for tally in &tallies[1..] {
            assert_eq!(tally.percentage, 0.0);
        }
    }
}
