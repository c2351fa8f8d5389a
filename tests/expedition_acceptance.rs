use yetimath_game::{
    AnswerOutcome, Ending, ExpeditionError, MAX_ALTITUDE_M, Phase, Session, SessionBest, TableSet,
    TickOutcome,
};

fn start_session(tables: &str, seed: u64) -> Session {
    let mut session = Session::new(seed);
    session.start(TableSet::parse(tables)).unwrap();
    session
}

fn answer_correctly(session: &mut Session, best: &mut SessionBest) -> AnswerOutcome {
    let product = session.question().expect("live question").product();
    session.submit_answer(&product.to_string(), best).unwrap()
}

fn answer_wrongly(session: &mut Session, best: &mut SessionBest) {
    let product = session.question().expect("live question").product();
    session
        .submit_answer(&(product + 3).to_string(), best)
        .unwrap();
}

#[test]
fn full_climb_reaches_summary_through_summit() {
    let mut session = start_session("all", 0xE7E);
    let mut best = SessionBest::default();

    let mut answers = 0;
    loop {
        answers += 1;
        assert!(answers < 100, "summit must be reachable");
        if let AnswerOutcome::Correct { summited: true, .. } = answer_correctly(&mut session, &mut best)
        {
            break;
        }
        assert_eq!(session.tick(1.2, &mut best), TickOutcome::QuestionIssued);
    }

    assert_eq!(session.altitude_m(), MAX_ALTITUDE_M);
    assert_eq!(session.tick(1.2, &mut best), TickOutcome::SummaryShown);
    let summary = session.summary(&best).expect("terminal report");
    assert_eq!(summary.ending, Ending::Summit);
    assert_eq!(summary.peak_altitude_m, MAX_ALTITUDE_M);
    assert_eq!(best.best_altitude_m, MAX_ALTITUDE_M);
    assert_eq!(best.fastest_summit_secs, Some(summary.elapsed_secs));
}

#[test]
fn altitude_never_leaves_bounds_under_mixed_play() {
    let mut session = start_session("2,3,4-6", 0xBAD5EED);
    let mut best = SessionBest::default();

    for step in 0..400 {
        assert!((0..=MAX_ALTITUDE_M).contains(&session.altitude_m()), "step {step}");
        if session.phase() != Phase::Playing {
            break;
        }
        match step % 5 {
            // Deliberately irregular mix of ticks, right and wrong answers.
            0 | 3 => {
                session.tick(0.7, &mut best);
            }
            1 => {
                if session.ending().is_none() && session.question().is_some() {
                    answer_correctly(&mut session, &mut best);
                }
                session.tick(1.2, &mut best);
            }
            2 => {
                if session.ending().is_none() && session.question().is_some() {
                    answer_wrongly(&mut session, &mut best);
                    let _ = session.acknowledge_feedback();
                }
            }
            _ => {
                session.tick(4.9, &mut best);
            }
        }
    }
    assert!((0..=MAX_ALTITUDE_M).contains(&session.altitude_m()));
    let supplies = session.supplies();
    assert!((0..=10).contains(&supplies.food));
    assert!((0..=10).contains(&supplies.water));
}

#[test]
fn fastest_summit_keeps_minimum_across_sessions() {
    let mut best = SessionBest::default();

    for seed in [1u64, 2, 3] {
        let mut session = start_session("10", seed);
        loop {
            if let AnswerOutcome::Correct { summited: true, .. } =
                answer_correctly(&mut session, &mut best)
            {
                break;
            }
            // Irregular tick sizes so each run posts a different clock.
            session.tick(1.2 + 0.3 * seed as f64, &mut best);
        }
        session.tick(2.0, &mut best);
        assert_eq!(session.phase(), Phase::Summary);
    }

    // Seed 1 ran the shortest per-turn delay, so it holds the record.
    let record = best.fastest_summit_secs.expect("summits recorded");
    let mut fastest_check = SessionBest::default();
    let mut session = start_session("10", 1);
    loop {
        if let AnswerOutcome::Correct { summited: true, .. } =
            answer_correctly(&mut session, &mut fastest_check)
        {
            break;
        }
        session.tick(1.5, &mut fastest_check);
    }
    assert!(record <= fastest_check.fastest_summit_secs.unwrap());
    assert_eq!(best.best_altitude_m, MAX_ALTITUDE_M);
}

#[test]
fn quit_then_rematch_reuses_tables_and_new_run_counts() {
    let mut best = SessionBest::default();
    let mut session = start_session("4-6", 0xC0FFEE);

    answer_correctly(&mut session, &mut best);
    session.quit(&mut best).unwrap();
    assert_eq!(best.best_altitude_m, 260);
    assert_eq!(session.summary(&best).unwrap().ending, Ending::Quit);

    session.rematch().unwrap();
    assert_eq!(session.phase(), Phase::Playing);
    assert_eq!(session.tables(), &TableSet::parse("4-6"));
    assert_eq!(session.altitude_m(), 0);

    // A deeper second run moves the record up.
    answer_correctly(&mut session, &mut best);
    session.tick(1.2, &mut best);
    answer_correctly(&mut session, &mut best);
    session.quit(&mut best).unwrap();
    assert_eq!(best.best_altitude_m, 260 + 280);
}

#[test]
fn commands_outside_their_phase_are_rejected() {
    let mut best = SessionBest::default();
    let mut session = Session::new(5);

    assert_eq!(
        session.submit_answer("4", &mut best),
        Err(ExpeditionError::PhaseMismatch { found: Phase::Intro })
    );
    assert_eq!(
        session.quit(&mut best),
        Err(ExpeditionError::PhaseMismatch { found: Phase::Intro })
    );
    assert_eq!(
        session.rematch(),
        Err(ExpeditionError::PhaseMismatch { found: Phase::Intro })
    );
    assert_eq!(session.tick(10.0, &mut best), TickOutcome::Idle);
    assert!(session.summary(&best).is_none());

    session.start(TableSet::full()).unwrap();
    assert_eq!(
        session.rematch(),
        Err(ExpeditionError::PhaseMismatch {
            found: Phase::Playing
        })
    );
}

#[test]
fn snapshot_serializes_for_the_presentation_layer() {
    let mut session = start_session("2,7", 99);
    let mut best = SessionBest::default();
    answer_correctly(&mut session, &mut best);

    let snapshot = session.snapshot();
    let json = serde_json::to_string(&snapshot).expect("snapshot serializes");
    assert!(json.contains("\"phase\":\"playing\""));
    assert!(json.contains("\"altitude_m\":260"));

    let back: yetimath_game::SessionSnapshot = serde_json::from_str(&json).expect("deserializes");
    assert_eq!(back, snapshot);
}
