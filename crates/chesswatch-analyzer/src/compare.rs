use chesswatch_types::player::PlayerSummary;

/// The active player with the highest current tactics rating.
///
/// Ties go to the player listed first. Inactive players and players without
/// a current rating are never picked.
pub fn top_by_tactics(summaries: &[PlayerSummary]) -> Option<&PlayerSummary> {
    let mut top: Option<(&PlayerSummary, i64)> = None;
    for summary in summaries.iter().filter(|s| s.is_active) {
        let Some(rating) = summary.tactics.current_rating else {
            continue;
        };
        match top {
            Some((_, best)) if best >= rating => {}
            _ => top = Some((summary, rating)),
        }
    }
    top.map(|(summary, _)| summary)
}
