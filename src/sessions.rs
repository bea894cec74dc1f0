//! Sessions pulled by hand out of the group-chat export. The export is too irregular for
//! `transcript::parse` to recover reliably, so this table is what `parse_transcript` emits.

use crate::{Attempt, GameDate, Session};

/// A session as stored in the table.
#[derive(Debug, Clone, Copy)]
pub struct LiteralSession {
    pub player: &'static str,
    pub date: GameDate,
    pub attempts: [(u32, &'static str); 5],
    pub final_score: u32,
}

impl LiteralSession {
    pub fn to_session(&self) -> Session {
        Session {
            player: self.player.to_owned(),
            date: self.date,
            attempts: self.attempts.map(|(score, tag)| Attempt::new(score, tag)),
            final_score: self.final_score,
        }
    }
}

macro_rules! session {
    ($player:expr, ($year:expr, $month:expr, $day:expr), [$(($score:expr, $tag:expr)),* $(,)?], $final_score:expr) => {
        LiteralSession {
            player: $player,
            date: GameDate::new($year, $month, $day),
            attempts: [$(($score, $tag)),*],
            final_score: $final_score,
        }
    };
}

pub static TRANSCRIPT_SESSIONS: &[LiteralSession] = &[
    // October 23
    session!("Stephen Alexander", (2025, 10, 23), [(99, "&"), (91, "'"), (87, "("), (81, "#"), (82, "#")], 853),
    session!("Ellie Alexander", (2025, 10, 23), [(99, "&"), (98, "!"), (91, "'"), (79, "✨"), (82, "#")], 862),
    // October 24
    session!("Stephen Alexander", (2025, 10, 24), [(95, "\""), (97, "!"), (90, "'"), (84, "+"), (75, ".")], 849),
    session!("Ellie Alexander", (2025, 10, 24), [(95, "\""), (95, "\""), (89, "/"), (450, ""), (931, "")], 782),
    session!("Stephen Alexander", (2025, 10, 24), [(94, "\""), (94, "\""), (98, "&"), (632, ""), (81, "#")], 816),
    // October 25
    session!("Stephen Alexander", (2025, 10, 25), [(100, "3"), (100, "3"), (94, "\""), (96, "!"), (83, "+")], 925),
    session!("Ellie Alexander", (2025, 10, 25), [(100, "3"), (100, "3"), (100, "&"), (98, "&"), (612, "")], 877),
    session!("Stephen Alexander", (2025, 10, 25), [(100, "3"), (100, "3"), (100, "&"), (99, "&"), (88, "/")], 961),
    // October 26
    session!("Ellie Alexander", (2025, 10, 26), [(99, "&"), (88, "/"), (665, ""), (616, ""), (84, "+")], 754),
    session!("Stephen Alexander", (2025, 10, 26), [(99, "&"), (87, "/"), (79, "✨"), (931, ""), (767, "")], 851),
    session!("Stephen Alexander", (2025, 10, 26), [(99, "&"), (96, "!"), (68, "+"), (558, ""), (931, "")], 775),
    // October 27
    session!("Stephen Alexander", (2025, 10, 27), [(96, "!"), (100, "3"), (97, "!"), (65, "$"), (94, "\"")], 867),
    session!("Stephen Alexander", (2025, 10, 27), [(99, "&"), (99, "&"), (98, "&"), (767, ""), (95, "\"")], 907),
    session!("Ellie Alexander", (2025, 10, 27), [(98, "!"), (100, "3"), (931, ""), (450, ""), (3, "<")], 528),
    // October 28
    session!("Stephen Alexander", (2025, 10, 28), [(84, "+"), (100, "3"), (90, "'"), (931, ""), (777, "")], 874),
    session!("Ellie Alexander", (2025, 10, 28), [(94, "\""), (100, "3"), (97, "!"), (96, "!"), (82, "#")], 922),
    // October 29
    session!("Stephen Alexander", (2025, 10, 29), [(98, "!"), (99, "&"), (99, "&"), (33, "="), (95, "\"")], 779),
    session!("Ellie Alexander", (2025, 10, 29), [(98, "&"), (99, "&"), (99, "&"), (16, ")"), (665, "")], 641),
    session!("Ellie Alexander", (2025, 10, 29), [(99, "&"), (931, ""), (100, "&"), (34, "="), (49, "-")], 641),
    // October 30
    session!("Stephen Alexander", (2025, 10, 30), [(97, "!"), (100, "&"), (931, ""), (84, "+"), (70, "?")], 845),
    session!("Ellie Alexander", (2025, 10, 30), [(97, "!"), (99, "&"), (97, "!"), (589, ""), (568, "")], 732),
    session!("Stephen Alexander", (2025, 10, 30), [(96, "!"), (100, "3"), (96, "!"), (85, "+"), (91, "'")], 916),
    // October 31
    session!("Stephen Alexander", (2025, 10, 31), [(98, "&"), (94, "\""), (80, "✨"), (95, "\""), (95, "\"")], 922),
    session!("Ellie Alexander", (2025, 10, 31), [(90, "'"), (94, "\""), (83, "+"), (95, "\""), (86, "(")], 893),
    session!("Ellie Alexander", (2025, 10, 31), [(89, "'"), (921, ""), (87, "/"), (95, "\""), (931, "")], 919),
    // November 1
    session!("Stephen Alexander", (2025, 11, 1), [(921, ""), (79, "✨"), (85, "("), (53, "@"), (96, "!")], 788),
    session!("Stephen Alexander", (2025, 11, 1), [(98, "&"), (84, "+"), (74, "."), (28, "A"), (80, "#")], 654),
    session!("Ellie Alexander", (2025, 11, 1), [(91, "'"), (80, "✨"), (81, "#"), (70, "?"), (98, "!")], 837),
    // November 2
    session!("Stephen Alexander", (2025, 11, 2), [(100, "3"), (75, "."), (95, "\""), (97, "!"), (52, ":")], 812),
    session!("Stephen Alexander", (2025, 11, 2), [(100, "3"), (86, "("), (921, ""), (99, "&"), (90, "'")], 937),
    // November 3
    session!("Stephen Alexander", (2025, 11, 3), [(95, "\""), (94, "\""), (97, "!"), (921, ""), (74, ";")], 881),
    session!("Ellie Alexander", (2025, 11, 3), [(100, "&"), (100, "&"), (97, "!"), (90, "'"), (87, "/")], 925),
    session!("Ellie Alexander", (2025, 11, 3), [(931, ""), (100, "&"), (96, "!"), (931, ""), (98, "&")], 958),
    // November 4
    session!("Stephen Alexander", (2025, 11, 4), [(97, "!"), (95, "\""), (921, ""), (99, "&"), (31, "C")], 766),
    session!("Stephen Alexander", (2025, 11, 4), [(89, "/"), (98, "&"), (83, "#"), (89, "/"), (65, "$")], 815),
    session!("Ellie Alexander", (2025, 11, 4), [(787, ""), (94, "\""), (76, "."), (96, "!"), (80, "✨")], 852),
    // November 5
    session!("Stephen Alexander", (2025, 11, 5), [(99, "&"), (921, ""), (76, "."), (50, ":"), (82, "#")], 739),
    session!("Ellie Alexander", (2025, 11, 5), [(97, "!"), (97, "!"), (100, "3"), (79, "✨"), (921, "")], 907),
    session!("Ellie Alexander", (2025, 11, 5), [(87, "/"), (95, "\""), (100, "3"), (606, ""), (88, "/")], 826),
    // November 6
    session!("Stephen Alexander", (2025, 11, 6), [(94, "\""), (98, "&"), (787, ""), (90, "'"), (931, "")], 897),
    session!("Ellie Alexander", (2025, 11, 6), [(86, "("), (99, "&"), (100, "3"), (98, "!"), (89, "/")], 946),
    session!("Stephen Alexander", (2025, 11, 6), [(95, "\""), (96, "!"), (70, "?"), (72, ";"), (95, "\"")], 832),
    // November 7
    session!("Stephen Alexander", (2025, 11, 7), [(95, "\""), (98, "&"), (579, ""), (71, "?"), (70, "?")], 730),
    session!("Ellie Alexander", (2025, 11, 7), [(99, "&"), (98, "&"), (97, "!"), (90, "'"), (622, "")], 847),
    // November 10
    session!("Ellie Alexander", (2025, 11, 10), [(97, "!"), (98, "!"), (99, "&"), (599, ""), (596, "")], 747),
    session!("Stephen Alexander", (2025, 11, 10), [(99, "&"), (98, "!"), (95, "\""), (74, "."), (50, ":")], 759),
    session!("Stephen Alexander", (2025, 11, 10), [(97, "!"), (97, "!"), (921, ""), (73, ";"), (83, "+")], 846),
    // November 11
    session!("Ellie Alexander", (2025, 11, 11), [(98, "!"), (98, "!"), (94, "\""), (96, "!"), (622, "")], 858),
    // November 12
    session!("Stephen Alexander", (2025, 11, 12), [(98, "&"), (99, "&"), (82, "#"), (98, "!"), (86, "(")], 913),
    session!("Ellie Alexander", (2025, 11, 12), [(99, "&"), (100, "&"), (95, "\""), (96, "!"), (85, "(")], 932),
    session!("Ellie Alexander", (2025, 11, 12), [(99, "&"), (96, "!"), (98, "!"), (94, "\""), (89, "/")], 940),
    // November 13
    session!("Stephen Alexander", (2025, 11, 13), [(100, "3"), (94, "\""), (99, "&"), (100, "3"), (616, "")], 875),
    session!("Ellie Alexander", (2025, 11, 13), [(100, "3"), (94, "\""), (94, "\""), (82, "#"), (42, "H")], 754),
    session!("Ellie Alexander", (2025, 11, 13), [(100, "3"), (96, "!"), (94, "\""), (100, "3"), (787, "")], 918),
    // November 14
    session!("Stephen Alexander", (2025, 11, 14), [(99, "&"), (91, "'"), (99, "&"), (30, "I"), (51, ":")], 631),
    session!("Ellie Alexander", (2025, 11, 14), [(98, "&"), (89, "'"), (100, "&"), (622, ""), (50, ":")], 723),
    // November 15
    session!("Stephen Alexander", (2025, 11, 15), [(97, "!"), (99, "&"), (65, "$"), (83, "+"), (70, "?")], 785),
    session!("Ellie Alexander", (2025, 11, 15), [(921, ""), (99, "&"), (612, ""), (79, "✨"), (777, "")], 781),
    // November 16
    session!("Stephen Alexander", (2025, 11, 16), [(90, "'"), (99, "&"), (787, ""), (70, "?"), (49, "-")], 702),
    session!("Ellie Alexander", (2025, 11, 16), [(97, "!"), (74, "."), (88, "/"), (665, ""), (76, ".")], 773),
    // November 17
    session!("Stephen Alexander", (2025, 11, 17), [(100, "&"), (95, "\""), (931, ""), (99, "&"), (71, "?")], 891),
    session!("Ellie Alexander", (2025, 11, 17), [(90, "'"), (95, "\""), (931, ""), (98, "&"), (931, "")], 944),
    session!("Ellie Alexander", (2025, 11, 17), [(98, "&"), (98, "&"), (931, ""), (97, "!"), (787, "")], 907),
    // November 18
    session!("Stephen Alexander", (2025, 11, 18), [(921, ""), (84, "+"), (98, "!"), (84, "+"), (74, ".")], 846),
    session!("Ellie Alexander", (2025, 11, 18), [(89, "'"), (81, "#"), (95, "\""), (82, "#"), (46, ",")], 744),
    // November 19
    session!("Stephen Alexander", (2025, 11, 19), [(94, "\""), (99, "&"), (86, "("), (599, ""), (50, ":")], 692),
    session!("Ellie Alexander", (2025, 11, 19), [(98, "&"), (98, "&"), (72, "?"), (86, "("), (87, "/")], 859),
    session!("Ellie Alexander", (2025, 11, 19), [(931, ""), (98, "!"), (82, "#"), (43, "H"), (71, "?")], 697),
    // November 20
    session!("Stephen Alexander", (2025, 11, 20), [(99, "&"), (99, "&"), (94, "\""), (5, "K"), (589, "")], 575),
    session!("Ellie Alexander", (2025, 11, 20), [(97, "!"), (98, "&"), (100, "3"), (4, "<"), (74, ".")], 629),
    session!("Ellie Alexander", (2025, 11, 20), [(911, ""), (99, "&"), (100, "3"), (22, "J"), (89, "/")], 723),
    // November 21
    session!("Stephen Alexander", (2025, 11, 21), [(100, "3"), (96, "\""), (579, ""), (589, ""), (94, "\"")], 766),
    session!("Ellie Alexander", (2025, 11, 21), [(100, "3"), (94, "\""), (450, ""), (75, "."), (99, "&")], 806),
    session!("Stephen Alexander", (2025, 11, 21), [(100, "3"), (99, "&"), (777, ""), (72, ";"), (98, "&")], 863),
    // November 22
    session!("Stephen Alexander", (2025, 11, 22), [(100, "3"), (100, "&"), (96, "!"), (91, "'"), (95, "\"")], 950),
    session!("Stephen Alexander", (2025, 11, 22), [(100, "3"), (100, "&"), (99, "&"), (94, "\""), (921, "")], 956),
    session!("Ellie Alexander", (2025, 11, 22), [(100, "3"), (100, "&"), (921, ""), (100, "&"), (65, "$")], 879),
    // November 23
    session!("Ellie Alexander", (2025, 11, 23), [(100, "3"), (80, "✨"), (28, "A"), (97, "!"), (0, "<")], 527),
    session!("Stephen Alexander", (2025, 11, 23), [(100, "3"), (98, "!"), (96, "!"), (86, "("), (23, "J")], 717),
    session!("Stephen Alexander", (2025, 11, 23), [(100, "3"), (99, "&"), (79, "✨"), (78, "✨"), (84, "")], 615),
    // November 24
    session!("Ellie Alexander", (2025, 11, 24), [(91, "'"), (931, ""), (98, "&"), (11, "N"), (87, "(")], 674),
    session!("Stephen Alexander", (2025, 11, 24), [(96, "!"), (921, ""), (85, "("), (98, "!"), (96, "!")], 940),
    session!("Stephen Alexander", (2025, 11, 24), [(931, ""), (84, "+"), (921, ""), (98, "&"), (65, "$")], 850),
    // November 25
    session!("Ellie Alexander", (2025, 11, 25), [(96, "!"), (90, "'"), (100, "3"), (54, "@"), (0, "<")], 548),
    session!("Stephen Alexander", (2025, 11, 25), [(97, "!"), (931, ""), (100, "3"), (50, "-"), (88, "/")], 804),
    session!("Stephen Alexander", (2025, 11, 25), [(98, "&"), (90, "'"), (100, "3"), (3, "<"), (0, "<")], 397),
    // November 26
    session!("Stephen Alexander", (2025, 11, 26), [(96, "!"), (921, ""), (921, ""), (98, "!"), (97, "!")], 957),
    session!("Ellie Alexander", (2025, 11, 26), [(99, "&"), (83, "+"), (91, "'"), (86, "("), (94, "\"")], 904),
    session!("Ellie Alexander", (2025, 11, 26), [(99, "&"), (87, "("), (97, "!"), (96, "!"), (97, "!")], 959),
    // November 27
    session!("Stephen Alexander", (2025, 11, 27), [(99, "&"), (96, "!"), (95, "\""), (95, "\""), (579, "")], 841),
    session!("Ellie Alexander", (2025, 11, 27), [(96, "!"), (96, "\""), (98, "!"), (96, "!"), (11, "N")], 709),
    // November 28
    session!("Stephen Alexander", (2025, 11, 28), [(75, "."), (97, "!"), (96, "!"), (46, ","), (19, "G")], 559),
    session!("Ellie Alexander", (2025, 11, 28), [(921, ""), (95, "\""), (97, "!"), (931, ""), (0, "<")], 660),
    session!("Ellie Alexander", (2025, 11, 28), [(95, "\""), (94, "\""), (98, "&"), (75, "."), (84, "+")], 862),
    // November 29
    session!("Stephen Alexander", (2025, 11, 29), [(97, "!"), (99, "&"), (97, "!"), (97, "!"), (589, "")], 855),
    session!("Ellie Alexander", (2025, 11, 29), [(931, ""), (99, "&"), (90, "'"), (99, "&"), (921, "")], 945),
    // November 30
    session!("Stephen Alexander", (2025, 11, 30), [(99, "&"), (89, "'"), (89, "'"), (83, "+"), (450, "")], 750),
    session!("Ellie Alexander", (2025, 11, 30), [(931, ""), (100, "&"), (65, "$"), (70, "?"), (65, "$")], 728),
    session!("Ellie Alexander", (2025, 11, 30), [(100, "&"), (91, "'"), (95, "\""), (95, "\""), (69, "+")], 873),
    // December 1
    session!("Stephen Alexander", (2025, 12, 1), [(99, "&"), (94, "\""), (921, ""), (91, "'"), (91, "'")], 923),
    session!("Ellie Alexander", (2025, 12, 1), [(99, "&"), (96, "!"), (74, "."), (787, ""), (767, "")], 805),
    // December 2
    session!("Ellie Alexander", (2025, 12, 2), [(94, "\""), (921, ""), (86, "("), (83, "+"), (90, "'")], 877),
    session!("Stephen Alexander", (2025, 12, 2), [(94, "\""), (97, "!"), (99, "&"), (74, "."), (440, "")], 743),
];

/// Every session in the table, in table order.
pub fn transcript_sessions() -> Vec<Session> {
    TRANSCRIPT_SESSIONS.iter().map(LiteralSession::to_session).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EmitOptions, Emitter, ExistingKeys};

    #[test]
    fn test_table_shape() {
        assert_eq!(TRANSCRIPT_SESSIONS.len(), 103);
        for session in TRANSCRIPT_SESSIONS {
            assert_eq!(session.date.year, 2025);
            assert!((10..=12).contains(&session.date.month), "{} {}", session.player, session.date);
            assert!(session.player == "Stephen Alexander" || session.player == "Ellie Alexander");
        }
    }

    #[test]
    fn test_table_order_and_first_entry() {
        let sessions = transcript_sessions();
        assert_eq!(sessions[0].player, "Stephen Alexander");
        assert_eq!(sessions[0].date.to_string(), "2025-10-23");
        assert_eq!(sessions[0].final_score, 853);
        assert_eq!(sessions[0].attempts[4], Attempt::new(82, "#"));
        assert!(sessions.windows(2).all(|pair| pair[0].date <= pair[1].date));
    }

    #[test]
    fn test_existing_rows_filter_table() {
        let mut existing = ExistingKeys::default();
        existing.insert("Stephen Alexander", "2025-10-24");
        let mut emitter = Emitter::new(Vec::new(), existing, EmitOptions::default());
        emitter.emit_all(&transcript_sessions()).unwrap();
        let (out, stats) = emitter.finish().unwrap();
        let out = String::from_utf8(out).unwrap();
        // both of Stephen's games that day are already recorded
        assert_eq!(stats.sessions_skipped, 2);
        assert_eq!(stats.rows_written, (103 - 2) * 5);
        assert!(out.starts_with("Stephen Alexander,2025-10-23,1,99,&,853\n"));
        assert!(!out.contains("Stephen Alexander,2025-10-24"));
        assert!(out.contains("Ellie Alexander,2025-10-24,4,450,,782\n"));
    }
}
