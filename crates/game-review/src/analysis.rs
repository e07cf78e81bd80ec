//! Score normalization and move classification (pure functions)
//! (No Board/Engine dependencies)

use serde::Serialize;
use shakmaty::Color;

use crate::engine::{Probe, Score};

/// Classification thresholds (centipawn loss)
const THRESHOLD_INACCURACY: i32 = 50;
const THRESHOLD_MISTAKE: i32 = 100;
const THRESHOLD_BLUNDER: i32 = 300;

/// Value a forced mate saturates to. Centipawn scores are clamped into
/// `-MATE_SCORE..=MATE_SCORE` as well.
pub const MATE_SCORE: i32 = 100_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Severity {
    #[serde(rename = "OK")]
    Ok,
    Inaccuracy,
    Mistake,
    Blunder,
}

impl Severity {
    pub fn from_cp_loss(cp_loss: i32) -> Self {
        if cp_loss >= THRESHOLD_BLUNDER {
            Severity::Blunder
        } else if cp_loss >= THRESHOLD_MISTAKE {
            Severity::Mistake
        } else if cp_loss >= THRESHOLD_INACCURACY {
            Severity::Inaccuracy
        } else {
            Severity::Ok
        }
    }
}

/// Centipawn value of `score` from `side`'s point of view.
///
/// `side_to_move` is whose turn it is in the evaluated position, the frame
/// UCI scores are reported in. Mates saturate to ±[`MATE_SCORE`] regardless
/// of distance. A degraded probe carries no information and yields 0.
pub fn score_for_side(score: &Probe<Score>, side_to_move: Color, side: Color) -> i32 {
    let relative = match score {
        Probe::Found(Score::Cp(cp)) => (*cp).clamp(-MATE_SCORE, MATE_SCORE),
        Probe::Found(Score::Mate(n)) if *n > 0 => MATE_SCORE,
        Probe::Found(Score::Mate(_)) => -MATE_SCORE,
        Probe::Degraded(_) => return 0,
    };
    if side == side_to_move {
        relative
    } else {
        -relative
    }
}

/// Loss of the played move against the engine's best, both already taken
/// from the mover's point of view. Never negative.
pub fn calculate_cp_loss(best_for_mover: i32, played_for_mover: i32) -> i32 {
    best_for_mover.saturating_sub(played_for_mover).max(0)
}

/// Human-readable evaluation from White's point of view: `+0.35`, `-1.20`,
/// `#3`, `#-2`, or the result when the side to move is already mated.
pub fn format_eval(score: &Probe<Score>, side_to_move: Color) -> Option<String> {
    let white_sign: i64 = if side_to_move == Color::White { 1 } else { -1 };
    match score {
        Probe::Found(Score::Cp(cp)) => {
            let white_cp = i64::from(*cp) * white_sign;
            Some(format!("{:+.2}", white_cp as f64 / 100.0))
        }
        Probe::Found(Score::Mate(0)) => Some(match side_to_move {
            Color::White => "0-1".to_string(),
            Color::Black => "1-0".to_string(),
        }),
        Probe::Found(Score::Mate(n)) => Some(format!("#{}", i64::from(*n) * white_sign)),
        Probe::Degraded(_) => None,
    }
}

/// Average centipawn loss, rounded to two decimals. Zero plies gives 0.0.
pub fn calculate_acpl(total_cp_loss: i64, ply_count: u32) -> f64 {
    if ply_count == 0 {
        return 0.0;
    }
    let acpl = total_cp_loss as f64 / f64::from(ply_count);
    (acpl * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn found(score: Score) -> Probe<Score> {
        Probe::Found(score)
    }

    #[test]
    fn test_classify_move() {
        assert_eq!(Severity::from_cp_loss(0), Severity::Ok);
        assert_eq!(Severity::from_cp_loss(49), Severity::Ok);
        assert_eq!(Severity::from_cp_loss(50), Severity::Inaccuracy);
        assert_eq!(Severity::from_cp_loss(99), Severity::Inaccuracy);
        assert_eq!(Severity::from_cp_loss(100), Severity::Mistake);
        assert_eq!(Severity::from_cp_loss(299), Severity::Mistake);
        assert_eq!(Severity::from_cp_loss(300), Severity::Blunder);
        assert_eq!(Severity::from_cp_loss(200_000), Severity::Blunder);
    }

    #[test]
    fn test_severity_serializes_as_tag() {
        let tags: Vec<String> = [
            Severity::Ok,
            Severity::Inaccuracy,
            Severity::Mistake,
            Severity::Blunder,
        ]
        .iter()
        .map(|s| serde_json::to_string(s).unwrap())
        .collect();
        assert_eq!(tags, vec!["\"OK\"", "\"Inaccuracy\"", "\"Mistake\"", "\"Blunder\""]);
    }

    #[test]
    fn test_cp_score_perspective() {
        let s = found(Score::Cp(35));
        assert_eq!(score_for_side(&s, Color::White, Color::White), 35);
        assert_eq!(score_for_side(&s, Color::White, Color::Black), -35);
        assert_eq!(score_for_side(&s, Color::Black, Color::Black), 35);
        assert_eq!(score_for_side(&s, Color::Black, Color::White), -35);
    }

    #[test]
    fn test_mate_score_saturates() {
        // Side to move mates: distance does not matter
        for n in [1, 7, 40] {
            let s = found(Score::Mate(n));
            assert_eq!(score_for_side(&s, Color::White, Color::White), MATE_SCORE);
            assert_eq!(score_for_side(&s, Color::White, Color::Black), -MATE_SCORE);
        }
        // Side to move gets mated
        for n in [-1, -5, 0] {
            let s = found(Score::Mate(n));
            assert_eq!(score_for_side(&s, Color::Black, Color::Black), -MATE_SCORE);
            assert_eq!(score_for_side(&s, Color::Black, Color::White), MATE_SCORE);
        }
    }

    #[test]
    fn test_huge_cp_is_clamped() {
        let s = found(Score::Cp(i32::MAX));
        assert_eq!(score_for_side(&s, Color::White, Color::White), MATE_SCORE);
        assert_eq!(score_for_side(&s, Color::White, Color::Black), -MATE_SCORE);
    }

    #[test]
    fn test_degraded_score_is_zero() {
        let s: Probe<Score> = Probe::Degraded("timeout".into());
        assert_eq!(score_for_side(&s, Color::White, Color::Black), 0);
    }

    #[test]
    fn test_cp_loss_calculation() {
        assert_eq!(calculate_cp_loss(100, 80), 20);
        assert_eq!(calculate_cp_loss(-30, -180), 150);
        assert_eq!(calculate_cp_loss(80, 100), 0);
        assert_eq!(calculate_cp_loss(MATE_SCORE, -MATE_SCORE), 2 * MATE_SCORE);
        assert_eq!(calculate_cp_loss(MATE_SCORE, MATE_SCORE), 0);
    }

    #[test]
    fn test_format_eval() {
        assert_eq!(format_eval(&found(Score::Cp(35)), Color::White).as_deref(), Some("+0.35"));
        assert_eq!(format_eval(&found(Score::Cp(35)), Color::Black).as_deref(), Some("-0.35"));
        assert_eq!(format_eval(&found(Score::Cp(0)), Color::Black).as_deref(), Some("+0.00"));
        assert_eq!(format_eval(&found(Score::Cp(-120)), Color::White).as_deref(), Some("-1.20"));
        assert_eq!(format_eval(&found(Score::Mate(3)), Color::White).as_deref(), Some("#3"));
        assert_eq!(format_eval(&found(Score::Mate(2)), Color::Black).as_deref(), Some("#-2"));
        assert_eq!(format_eval(&found(Score::Mate(-4)), Color::Black).as_deref(), Some("#4"));
        assert_eq!(format_eval(&found(Score::Mate(0)), Color::Black).as_deref(), Some("1-0"));
        assert_eq!(format_eval(&Probe::Degraded("x".into()), Color::White), None);
    }

    #[test]
    fn test_calculate_acpl() {
        assert_eq!(calculate_acpl(0, 0), 0.0);
        assert_eq!(calculate_acpl(150, 1), 150.0);
        assert_eq!(calculate_acpl(100, 3), 33.33);
        assert_eq!(calculate_acpl(200, 3), 66.67);
    }
}
